pub mod codec;
pub mod loader;

pub use codec::{argmax_label, Record, RecordCodec};
pub use loader::{load_window, read_window};
