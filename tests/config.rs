use anyhow::Result;
use ironpool::{
    DEFAULT_QUEUE_CAPACITY, MalformedPolicy, ParseOptions, RecordParser, SortPolicy, Strategy,
};

#[test]
fn parse_options_fill_missing_fields() -> Result<()> {
    let opts: ParseOptions = serde_json::from_str("{}")?;
    assert_eq!(opts.queue_capacity, DEFAULT_QUEUE_CAPACITY);
    assert_eq!(opts.on_malformed, MalformedPolicy::Skip);
    assert!(opts.cancel.is_none());

    let opts: ParseOptions =
        serde_json::from_str(r#"{"queue_capacity": 8, "on_malformed": "zero_timestamp"}"#)?;
    assert_eq!(opts.queue_capacity, 8);
    assert_eq!(opts.on_malformed, MalformedPolicy::ZeroTimestamp);
    Ok(())
}

#[test]
fn cancel_token_is_never_serialized() -> Result<()> {
    let opts = ParseOptions::default().with_cancel(ironpool::CancelToken::new());
    let json = serde_json::to_value(&opts)?;
    assert!(json.get("cancel").is_none());
    assert_eq!(json["on_malformed"], "skip");
    Ok(())
}

#[test]
fn strategies_load_from_json() -> Result<()> {
    assert_eq!(
        serde_json::from_str::<Strategy>(r#""sequential""#)?,
        Strategy::Sequential
    );
    assert_eq!(
        serde_json::from_str::<Strategy>(r#""unbounded_fan_out""#)?,
        Strategy::UnboundedFanOut
    );
    assert_eq!(
        serde_json::from_str::<Strategy>(r#"{"worker_pool": {"workers": 6}}"#)?,
        Strategy::WorkerPool { workers: Some(6) }
    );
    assert_eq!(
        serde_json::from_str::<Strategy>(r#"{"worker_pool": {"workers": null}}"#)?,
        Strategy::default()
    );
    Ok(())
}

#[test]
fn sort_policies_load_from_json() -> Result<()> {
    assert_eq!(
        serde_json::from_str::<SortPolicy>(r#""always_parallel""#)?,
        SortPolicy::AlwaysParallel
    );
    assert_eq!(
        serde_json::from_str::<SortPolicy>(r#"{"threshold": {"cutoff": 4096}}"#)?,
        SortPolicy::Threshold { cutoff: 4096 }
    );
    Ok(())
}

#[test]
fn loaded_options_drive_a_parser() -> Result<()> {
    let opts: ParseOptions = serde_json::from_str(r#"{"on_malformed": "fail"}"#)?;
    let parser = RecordParser::new(Strategy::WorkerPool { workers: Some(2) }).with_options(opts);
    let input = std::io::Cursor::new("1,John,Doe,100\nbroken\n");
    assert!(parser.parse(input).is_err());
    Ok(())
}
