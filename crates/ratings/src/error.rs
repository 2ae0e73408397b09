use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RatingError {
    #[error("Invalid comparison: {0}")]
    Validation(#[from] CoreError),

    #[error("Unknown symbol '{0}': register it with ensure_coin_exists before rating games")]
    UnknownSymbol(String),

    #[error("Invalid price change: {0} is not finite")]
    NonFinitePriceChange(f64),
}
