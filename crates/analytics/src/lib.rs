//! # Meridian Success-Metrics Analyzer
//!
//! This crate scores the quality of a trading strategy's historical
//! performance. It acts as the "unbiased judge" of the system: a sequence
//! of backtest window returns goes in, a full `SuccessMetrics` scorecard
//! (ratios, win/loss decomposition, risk, consistency, Kelly sizing, letter
//! grade) comes out.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems. It depends only on `core-types` and `numerics`.
//! - **Stateless Calculation:** The `MetricsAnalyzer` holds only its two
//!   configured rates. Scoring is a pure function of its input, which makes
//!   independent runs embarrassingly parallel — see `batch::analyze_all`.
//! - **Degenerate Inputs Degrade:** An empty run scores the neutral
//!   scorecard rather than erroring; only structurally broken input
//!   (non-finite returns or durations) fails fast.
//!
//! ## Public API
//!
//! - `MetricsAnalyzer`: the calculator.
//! - `SuccessMetrics`: the scorecard, with `StrategyGrade` and `RiskLevel`.
//! - `batch::analyze_all`: parallel scoring of many independent runs.
//! - `AnalyticsError`: the specific error types returned from this crate.

// Declare the modules that constitute this crate.
pub mod batch;
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use batch::analyze_all;
pub use engine::MetricsAnalyzer;
pub use error::AnalyticsError;
pub use report::{RiskLevel, StrategyGrade, SuccessMetrics};
