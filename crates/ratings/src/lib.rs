//! # Meridian Rating Engine
//!
//! Maintains one rating state per tradable asset and updates pairs of them
//! from synthetic "comparison games" derived from relative price moves,
//! using Glicko-2 mechanics adapted for a continuous outcome.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** A pure computation crate with no I/O. It depends
//!   only on `core-types` (the state and input structs) and `numerics` (the
//!   logistic E function and the compensated mean behind normalization).
//! - **Owned State, Explicit Serialization:** The engine owns its symbol
//!   table and every mutating operation takes `&mut self`. A game update
//!   touches exactly two symbols; universe normalization touches all of
//!   them and is a caller-invoked barrier.
//! - **Preserved Departures:** The continuous outcome score and the
//!   closed-form volatility update are deliberate simplifications of
//!   textbook Glicko-2. Downstream consumers depend on this exact numeric
//!   behavior; do not "correct" them.
//!
//! ## Public API
//!
//! - `RatingEngine`: the per-symbol state table and its operations.
//! - `GameOutcome` / `OutcomeConfidence`: the continuous outcome of a game.
//! - `RatingError`: the specific error types returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod glicko;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{RatingEngine, BENCHMARK_RATING, BENCHMARK_RD};
pub use error::RatingError;
pub use glicko::{GameOutcome, OutcomeConfidence, GLICKO2_SCALE};
