pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use structs::{
    AssetRatingState, Comparison, WindowResult, DEFAULT_RATING, DEFAULT_RATING_DEVIATION,
    DEFAULT_VOLATILITY, MAX_RATING_DEVIATION, MAX_VOLATILITY, MIN_VOLATILITY,
};
