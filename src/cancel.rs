//! Cooperative cancellation for parse calls.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Cloneable cancellation flag shared between a caller and a running parse.
///
/// Triggering is one-way; a token cannot be reset.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Internal stop signal: set by the pipeline itself (fatal line) or by the
/// caller's token.
///
/// A fatal line only stops work on lines after it, so every line before the
/// first fatal one is still parsed and the lowest fatal line wins.
#[derive(Clone, Debug)]
pub(crate) struct StopSignal {
    fatal_line: Arc<AtomicU64>,
    external: Option<CancelToken>,
}

impl StopSignal {
    pub(crate) fn new(external: Option<CancelToken>) -> Self {
        Self {
            fatal_line: Arc::new(AtomicU64::new(u64::MAX)),
            external,
        }
    }

    /// Record a fatal malformed line.
    pub(crate) fn trigger(&self, line: u64) {
        self.fatal_line.fetch_min(line, Ordering::AcqRel);
    }

    /// True once no further input needs to be read.
    pub(crate) fn is_set(&self) -> bool {
        self.fatal_line.load(Ordering::Acquire) != u64::MAX || self.externally_cancelled()
    }

    /// True if line `number` no longer needs parsing.
    pub(crate) fn skips(&self, number: u64) -> bool {
        self.externally_cancelled() || number > self.fatal_line.load(Ordering::Acquire)
    }

    pub(crate) fn externally_cancelled(&self) -> bool {
        self.external.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let a = CancelToken::new();
        let b = a.clone();
        assert!(!b.is_cancelled());
        a.cancel();
        assert!(b.is_cancelled());
    }

    #[test]
    fn stop_signal_sees_both_sources() {
        let token = CancelToken::new();
        let stop = StopSignal::new(Some(token.clone()));
        assert!(!stop.is_set());
        token.cancel();
        assert!(stop.is_set());
        assert!(stop.externally_cancelled());

        let stop = StopSignal::new(None);
        stop.trigger(7);
        assert!(stop.is_set());
        assert!(!stop.externally_cancelled());
    }

    #[test]
    fn fatal_line_only_skips_later_lines() {
        let stop = StopSignal::new(None);
        assert!(!stop.skips(100));
        stop.trigger(10);
        stop.trigger(40);
        assert!(!stop.skips(9));
        assert!(!stop.skips(10));
        assert!(stop.skips(11));

        stop.trigger(3);
        assert!(stop.skips(4));

        let token = CancelToken::new();
        let stop = StopSignal::new(Some(token.clone()));
        token.cancel();
        assert!(stop.skips(1));
    }
}
