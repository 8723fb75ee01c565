//! Parse configuration.

use crate::cancel::CancelToken;
use crate::record::MalformedPolicy;
use serde::{Deserialize, Serialize};

/// Capacity of the bounded work and result queues in the worker pool.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Options shared by every parse strategy.
///
/// Loadable from any serde format; missing fields take their defaults. The
/// cancellation token is runtime-only and never serialized.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Bound of each worker-pool queue. `0` makes them rendezvous channels.
    pub queue_capacity: usize,
    pub on_malformed: MalformedPolicy,
    #[serde(skip)]
    pub cancel: Option<CancelToken>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            on_malformed: MalformedPolicy::default(),
            cancel: None,
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn with_policy(mut self, policy: MalformedPolicy) -> Self {
        self.on_malformed = policy;
        self
    }

    #[must_use]
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }
}
