use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::train::progress::DEFAULT_PROGRESS_INTERVAL;

/// Per-session settings for `train` / `query` passes.
///
/// # Fields
/// - `progress_interval`: minimum wall-clock gap between progress callbacks
/// - `stop_flag`: optional atomic flag; when set from another thread
///   the running pass stops at the next record boundary
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub progress_interval: Duration,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            stop_flag: None,
        }
    }
}

impl RunConfig {
    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop_flag = Some(flag);
        self
    }

    pub(crate) fn stop_requested(&self) -> bool {
        self.stop_flag
            .as_ref()
            .map_or(false, |flag| flag.load(Ordering::Relaxed))
    }
}
