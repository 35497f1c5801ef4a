//! Worker pool sizing.

use serde::{Deserialize, Serialize};

const fn default_stack_size_mb() -> usize {
    8
}

const fn default_queue_factor() -> usize {
    4
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct WorkersConfig {
    /// Worker threads. `0` means one per available CPU.
    #[serde(default)]
    pub threads: usize,

    /// Stack size per worker, in MiB. Deeply nested documents recurse.
    #[serde(default = "default_stack_size_mb")]
    pub stack_size_mb: usize,

    /// Documents queued per worker before the feeder blocks.
    #[serde(default = "default_queue_factor")]
    pub queue_factor: usize,
}

impl Default for WorkersConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            stack_size_mb: default_stack_size_mb(),
            queue_factor: default_queue_factor(),
        }
    }
}

impl WorkersConfig {
    /// Resolved thread count (never zero).
    #[must_use]
    pub fn effective_threads(&self) -> usize {
        if self.threads > 0 {
            return self.threads;
        }
        std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
    }

    #[must_use]
    pub const fn stack_size_bytes(&self) -> usize {
        self.stack_size_mb * 1024 * 1024
    }
}
