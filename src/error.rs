use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a load, a pass, or network construction.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid network dimensions {input}x{hidden}x{output}: every layer needs at least one node")]
    InvalidDimensions {
        input: usize,
        hidden: usize,
        output: usize,
    },

    #[error("Invalid learning rate {0}: expected a finite positive number")]
    InvalidLearningRate(f64),

    #[error("Malformed record{}: {}", .record.map(|r| format!(" {}", r)).unwrap_or_default(), .reason)]
    Format { record: Option<usize>, reason: String },

    #[error("Label {}{} is out of range: expected 0..{}", .label, .record.map(|r| format!(" in record {}", r)).unwrap_or_default(), .output_size)]
    LabelOutOfRange {
        record: Option<usize>,
        label: i64,
        output_size: usize,
    },

    #[error("Failed to load dataset from '{}'. Check the selected file exists and is not empty.", .path.display())]
    EmptyDataset { path: PathBuf },

    #[error("Pass cancelled after {processed} records")]
    Cancelled { processed: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn format(reason: impl Into<String>) -> Error {
        Error::Format { record: None, reason: reason.into() }
    }

    /// Tags a codec or label error with the 1-based position of the record in its
    /// dataset; the codec itself only ever sees a single line.
    pub(crate) fn at_record(self, record: usize) -> Error {
        match self {
            Error::Format { reason, .. } => Error::Format { record: Some(record), reason },
            Error::LabelOutOfRange { label, output_size, .. } => Error::LabelOutOfRange {
                record: Some(record),
                label,
                output_size,
            },
            other => other,
        }
    }
}
