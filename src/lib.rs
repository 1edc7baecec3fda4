pub mod math;
pub mod activation;
pub mod network;
pub mod optim;
pub mod data;
pub mod train;
pub mod error;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use network::{Network, NetworkSpec};
pub use optim::sgd::Sgd;
pub use data::codec::{argmax_label, Record, RecordCodec};
pub use data::loader::{load_window, read_window};
pub use train::{QuerySummary, RunConfig, RunningStats, ScorecardEntry, Session, TrainSummary};
pub use error::{Error, Result};
