use numerics::NumericsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Window {index} is invalid: {reason}")]
    InvalidWindow { index: usize, reason: String },

    #[error("Calculation error: {0}")]
    Calculation(#[from] NumericsError),
}
