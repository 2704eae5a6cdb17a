//! Machine configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a [`Machine`](crate::Machine).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Emit a `tracing` event for every read, write, move and transition.
    pub verbose: bool,

    /// Reset every tape to its default once an execution halts cleanly.
    pub reset_after_execution: bool,
}

impl MachineConfig {
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn reset_after_execution(mut self, reset: bool) -> Self {
        self.reset_after_execution = reset;
        self
    }
}
