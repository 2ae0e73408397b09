//! # Meridian Numeric Vector Kernel
//!
//! Fixed-precision (f64) numeric buffer operations shared by the rating
//! engine and the success-metrics analyzer: element-wise arithmetic,
//! compensated reductions, rolling windows, percentiles, and the financial
//! helpers layered on top of them.
//!
//! ## Architectural Principles
//!
//! - **Layer 0 Logic:** This crate sits at the bottom of the workspace. It
//!   has no workspace dependencies and no knowledge of assets, ratings, or
//!   backtests — only numbers.
//! - **Pure Functions:** Every operation takes slices and returns fresh
//!   values. No input is ever mutated and no state is shared across calls.
//! - **Stable Summation:** Reductions that sum many terms use compensated
//!   (Kahan) or online (Welford) algorithms. This is the one place genuine
//!   numerical engineering lives and it must not be simplified to naive
//!   loops.
//! - **Degrade, Don't Abort:** Element-wise edge cases that occur in
//!   legitimate data (near-zero divisors, empty vectors, flat series) yield
//!   well-defined sentinels instead of errors. Errors are reserved for
//!   call-site bugs: mismatched lengths, out-of-range percentiles, bad
//!   window sizes, near-zero scalar divisors.
//!
//! ## Public API
//!
//! - `vector`: element-wise and scalar arithmetic, finiteness predicates.
//! - `stats`: Kahan `sum`, `mean`/`variance`/`std_dev`, Welford
//!   `RunningStats`, `correlation`, `percentile`/`median`/`quantile`,
//!   `rolling_sum`/`rolling_mean`, `z_score`, `logistic`.
//! - `financial`: `returns`, `equity_curve`, `max_drawdown`,
//!   `sharpe_ratio`, `sortino_ratio`, `annualized_return`.
//! - `NumericsError`: the error taxonomy for the kernel.

// Declare the modules that constitute this crate.
pub mod error;
pub mod financial;
pub mod stats;
pub mod vector;

// Re-export the key components to create a clean, public-facing API.
pub use error::NumericsError;
pub use financial::{
    annualized_return, equity_curve, max_drawdown, returns, sharpe_ratio, sortino_ratio,
    ReturnMethod, DAYS_PER_YEAR,
};
pub use stats::{
    correlation, logistic, mean, median, percentile, quantile, rolling_mean, rolling_sum, std_dev,
    sum, variance, z_score, RunningStats, ZScore,
};
pub use vector::{
    add, approx_equal, divide, has_nan, is_finite, multiply, replace_nan, scalar_add,
    scalar_divide, scalar_multiply, subtract, DIVISION_EPSILON,
};
