pub mod progress;
pub mod run_config;
pub mod session;
pub mod stats;

pub use progress::{ProgressThrottle, DEFAULT_PROGRESS_INTERVAL};
pub use run_config::RunConfig;
pub use session::Session;
pub use stats::{QuerySummary, RunningStats, ScorecardEntry, TrainSummary};
