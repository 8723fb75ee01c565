use crate::config::ParseOptions;
use crate::error::ParseError;
use crate::parse::{ParseOutput, parse_sequential, parse_unbounded, parse_worker_pool};
use serde::{Deserialize, Serialize};
use std::io::BufRead;

/// How a [`RecordParser`] spreads work across threads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Sequential,
    /// One task per line with no backpressure. For comparison only.
    UnboundedFanOut,
    /// `workers: None` uses one worker per logical CPU.
    WorkerPool { workers: Option<usize> },
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::WorkerPool { workers: None }
    }
}

impl Strategy {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Sequential => "sequential",
            Strategy::UnboundedFanOut => "unbounded fan-out",
            Strategy::WorkerPool { .. } => "worker pool",
        }
    }
}

/// A strategy plus the options every strategy shares.
#[derive(Clone, Debug, Default)]
pub struct RecordParser {
    pub strategy: Strategy,
    pub options: ParseOptions,
}

impl RecordParser {
    #[must_use]
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            options: ParseOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Worker count the pool strategy would start right now.
    #[must_use]
    pub fn resolved_workers(&self) -> Option<usize> {
        match self.strategy {
            Strategy::WorkerPool { workers } => Some(workers.unwrap_or_else(num_cpus::get)),
            _ => None,
        }
    }

    /// Parse every line of `reader` with the configured strategy.
    ///
    /// # Errors
    /// See [`ParseError`]; the variants each strategy can return are listed on
    /// the strategy functions in [`crate::parse`].
    pub fn parse<R: BufRead + Send>(&self, reader: R) -> Result<ParseOutput, ParseError> {
        log::debug!("parsing with {} strategy", self.strategy.name());
        match self.strategy {
            Strategy::Sequential => parse_sequential(reader, &self.options),
            Strategy::UnboundedFanOut => parse_unbounded(reader, &self.options),
            Strategy::WorkerPool { workers } => parse_worker_pool(
                reader,
                workers.unwrap_or_else(num_cpus::get),
                &self.options,
            ),
        }
    }
}
