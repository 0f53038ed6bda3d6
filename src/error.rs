use thiserror::Error;

/// The two validation failures that stop the pipeline before anything is
/// written. Everything else travels as `anyhow::Error`.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("Expected '{column}' column not found.")]
    MissingTimeColumn { column: String },
    #[error("No EEG/ECG/CM columns found after filtering. Check headers.")]
    NoChannels,
}
