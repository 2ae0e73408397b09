use thiserror::Error;

/// Validation failures raised by the shared data-model types.
///
/// These fire before any numeric work happens: a comparison or window that
/// fails validation must never reach the rating engine or the analyzer.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },
}
