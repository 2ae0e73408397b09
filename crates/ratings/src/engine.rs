use crate::error::RatingError;
use crate::glicko::{self, GameOutcome};
use chrono::{DateTime, Utc};
use core_types::{AssetRatingState, Comparison, DEFAULT_RATING};
use std::collections::HashMap;

/// The fixed baseline opponent for benchmark games. Its tight deviation
/// makes it a strong anchor; it is never updated itself.
pub const BENCHMARK_RATING: f64 = 1500.0;
pub const BENCHMARK_RD: f64 = 50.0;

/// The pairwise rating engine: one `AssetRatingState` per tracked symbol.
///
/// All methods are synchronous, non-blocking computations. The `&mut self`
/// receivers make the required serialization explicit: a game touches two
/// symbols and must not race another game touching either of them, and
/// normalization reads and rewrites the whole universe. Callers that share
/// an engine across threads wrap it in their own mutual exclusion.
#[derive(Debug, Default)]
pub struct RatingEngine {
    players: HashMap<String, AssetRatingState>,
}

impl RatingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a symbol at the default rating state if it is not already
    /// tracked. Idempotent: re-registering an active symbol is a no-op.
    pub fn ensure_coin_exists(&mut self, symbol: &str, timestamp: DateTime<Utc>) {
        if !self.players.contains_key(symbol) {
            tracing::debug!(symbol, "registering new asset at default rating");
            self.players
                .insert(symbol.to_string(), AssetRatingState::new(symbol, timestamp));
        }
    }

    /// Looks up the current state of a symbol.
    ///
    /// A miss means the symbol was never registered — that is a lookup
    /// result, not an error.
    pub fn get_coin_state(&self, symbol: &str) -> Option<&AssetRatingState> {
        self.players.get(symbol)
    }

    /// Iterates over every tracked asset's current state, in no particular
    /// order.
    pub fn states(&self) -> impl Iterator<Item = &AssetRatingState> {
        self.players.values()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Applies one pairwise game to both participants.
    ///
    /// The comparison's relative price move becomes a continuous outcome
    /// score for asset A; asset B plays the same game with the
    /// complementary score. Both updates are computed from each other's
    /// pre-update state, which gives the universe its near-zero-sum
    /// behavior. It is not exactly zero-sum — the two sides carry different
    /// deviations and volatilities — and that asymmetry is expected.
    pub fn process_game(&mut self, comparison: &Comparison) -> Result<GameOutcome, RatingError> {
        comparison.validate()?;

        let state_a = self
            .players
            .get(&comparison.asset_a)
            .ok_or_else(|| RatingError::UnknownSymbol(comparison.asset_a.clone()))?
            .clone();
        let state_b = self
            .players
            .get(&comparison.asset_b)
            .ok_or_else(|| RatingError::UnknownSymbol(comparison.asset_b.clone()))?
            .clone();

        let outcome = GameOutcome::from_price_change(comparison.price_change_a);

        let update_a = glicko::rate_against(
            &state_a,
            state_b.rating,
            state_b.rating_deviation,
            outcome.score,
        );
        let update_b = glicko::rate_against(
            &state_b,
            state_a.rating,
            state_a.rating_deviation,
            outcome.complement().score,
        );

        tracing::debug!(
            asset_a = %comparison.asset_a,
            asset_b = %comparison.asset_b,
            score = outcome.score,
            rating_a = update_a.rating,
            rating_b = update_b.rating,
            "processed game"
        );

        // Both lookups succeeded above; the entries are still present.
        if let Some(state) = self.players.get_mut(&comparison.asset_a) {
            state.apply_update(
                update_a.rating,
                update_a.rating_deviation,
                update_a.volatility,
                comparison.timestamp,
            );
        }
        if let Some(state) = self.players.get_mut(&comparison.asset_b) {
            state.apply_update(
                update_b.rating,
                update_b.rating_deviation,
                update_b.volatility,
                comparison.timestamp,
            );
        }

        Ok(outcome)
    }

    /// Rates a single symbol against the fixed 1500/50 benchmark opponent.
    ///
    /// Used when a symbol's move is measured against a quote baseline
    /// rather than another tracked asset. The benchmark never updates.
    pub fn process_benchmark_game(
        &mut self,
        symbol: &str,
        price_change: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<GameOutcome, RatingError> {
        if !price_change.is_finite() {
            return Err(RatingError::NonFinitePriceChange(price_change));
        }
        let state = self
            .players
            .get(symbol)
            .ok_or_else(|| RatingError::UnknownSymbol(symbol.to_string()))?
            .clone();

        let outcome = GameOutcome::from_price_change(price_change);
        let update = glicko::rate_against(&state, BENCHMARK_RATING, BENCHMARK_RD, outcome.score);

        if let Some(entry) = self.players.get_mut(symbol) {
            entry.apply_update(
                update.rating,
                update.rating_deviation,
                update.volatility,
                timestamp,
            );
        }

        Ok(outcome)
    }

    /// Recenters the universe so the mean rating is exactly 1500.
    ///
    /// Shifts every rating by the same amount, leaving deviations and
    /// volatilities untouched. Must be invoked by the caller at quiesce
    /// points — it reads and rewrites every tracked state, so no game may
    /// be in flight against any symbol while it runs. Returns the applied
    /// shift; an empty universe is a no-op.
    pub fn normalize_ratings(&mut self) -> f64 {
        if self.players.is_empty() {
            return 0.0;
        }

        let ratings: Vec<f64> = self.players.values().map(|s| s.rating).collect();
        let shift = DEFAULT_RATING - numerics::mean(&ratings);

        for state in self.players.values_mut() {
            state.rating += shift;
        }

        tracing::info!(
            assets = self.players.len(),
            shift,
            "normalized rating universe to mean 1500"
        );
        shift
    }
}
