use crate::error::CoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The nominal center of the rating scale. Every asset starts here.
pub const DEFAULT_RATING: f64 = 1500.0;
/// The starting rating deviation for an asset with no observed games.
pub const DEFAULT_RATING_DEVIATION: f64 = 350.0;
/// The starting rating volatility.
pub const DEFAULT_VOLATILITY: f64 = 0.06;

/// The rating deviation is never allowed outside this range.
pub const MAX_RATING_DEVIATION: f64 = 350.0;
/// Volatility bounds. The lower bound keeps ratings responsive; the upper
/// bound prevents runaway swings after a streak of extreme moves.
pub const MIN_VOLATILITY: f64 = 0.01;
pub const MAX_VOLATILITY: f64 = 0.2;

/// The rating state of a single tradable asset.
///
/// One of these exists per tracked symbol. It is created lazily at the
/// defaults above and mutated only through [`AssetRatingState::apply_update`]
/// (per-game updates) and the engine's universe normalization, so the
/// deviation and volatility bounds hold after every write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRatingState {
    pub symbol: String,
    pub rating: f64,
    pub rating_deviation: f64,
    pub volatility: f64,
    pub last_updated: DateTime<Utc>,
}

impl AssetRatingState {
    /// Creates a fresh state at the nominal defaults (1500 / 350 / 0.06).
    pub fn new(symbol: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            symbol: symbol.into(),
            rating: DEFAULT_RATING,
            rating_deviation: DEFAULT_RATING_DEVIATION,
            volatility: DEFAULT_VOLATILITY,
            last_updated: timestamp,
        }
    }

    /// The single mutation path for per-game updates.
    ///
    /// Clamps the deviation into [0, 350] and the volatility into
    /// [0.01, 0.2] so the state invariant survives any update, including
    /// ones computed from extreme outcomes.
    pub fn apply_update(
        &mut self,
        rating: f64,
        rating_deviation: f64,
        volatility: f64,
        timestamp: DateTime<Utc>,
    ) {
        self.rating = rating;
        self.rating_deviation = rating_deviation.clamp(0.0, MAX_RATING_DEVIATION);
        self.volatility = volatility.clamp(MIN_VOLATILITY, MAX_VOLATILITY);
        self.last_updated = timestamp;
    }
}

/// One pairwise comparison ("game") between two assets.
///
/// Ephemeral: it is validated, converted to a continuous outcome score, and
/// applied to both participants' rating states. It is never retained after
/// the update completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub asset_a: String,
    pub asset_b: String,
    /// Fractional return of asset A measured against asset B over the
    /// comparison period (e.g., 0.05 means A outperformed B by 5%).
    pub price_change_a: f64,
    pub timestamp: DateTime<Utc>,
}

impl Comparison {
    pub fn new(
        asset_a: impl Into<String>,
        asset_b: impl Into<String>,
        price_change_a: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            asset_a: asset_a.into(),
            asset_b: asset_b.into(),
            price_change_a,
            timestamp,
        }
    }

    /// Rejects comparisons the rating engine must never see: non-finite
    /// price changes, empty symbols, and an asset compared against itself.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.price_change_a.is_finite() {
            return Err(CoreError::Validation {
                field: "price_change_a".to_string(),
                reason: format!("must be finite, got {}", self.price_change_a),
            });
        }
        if self.asset_a.is_empty() || self.asset_b.is_empty() {
            return Err(CoreError::Validation {
                field: "symbol".to_string(),
                reason: "asset symbols must be non-empty".to_string(),
            });
        }
        if self.asset_a == self.asset_b {
            return Err(CoreError::Validation {
                field: "asset_b".to_string(),
                reason: format!("'{}' cannot be compared against itself", self.asset_a),
            });
        }
        Ok(())
    }
}

/// One evaluation period of a backtest run.
///
/// A chronological list of these is the input to the success-metrics
/// analyzer. The analyzer itself enforces no ordering; annualization is only
/// meaningful when the caller supplies windows in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowResult {
    /// Fractional, signed return over the window.
    #[serde(rename = "return")]
    pub window_return: f64,
    /// Length of the window in days.
    #[serde(rename = "duration")]
    pub duration_days: f64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Number of trades executed inside the window.
    pub trades: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_new_state_uses_defaults() {
        let state = AssetRatingState::new("BTC", ts());
        assert_eq!(state.symbol, "BTC");
        assert_eq!(state.rating, DEFAULT_RATING);
        assert_eq!(state.rating_deviation, DEFAULT_RATING_DEVIATION);
        assert_eq!(state.volatility, DEFAULT_VOLATILITY);
    }

    #[test]
    fn test_apply_update_clamps_bounds() {
        let mut state = AssetRatingState::new("BTC", ts());
        state.apply_update(1600.0, 900.0, 5.0, ts());
        assert_eq!(state.rating, 1600.0);
        assert_eq!(state.rating_deviation, MAX_RATING_DEVIATION);
        assert_eq!(state.volatility, MAX_VOLATILITY);

        state.apply_update(1600.0, -10.0, 0.0, ts());
        assert_eq!(state.rating_deviation, 0.0);
        assert_eq!(state.volatility, MIN_VOLATILITY);
    }

    #[test]
    fn test_comparison_rejects_nan() {
        let cmp = Comparison::new("BTC", "ETH", f64::NAN, ts());
        assert!(cmp.validate().is_err());
    }

    #[test]
    fn test_comparison_rejects_self_play() {
        let cmp = Comparison::new("BTC", "BTC", 0.01, ts());
        assert!(cmp.validate().is_err());
    }

    #[test]
    fn test_comparison_accepts_normal_game() {
        let cmp = Comparison::new("BTC", "ETH", 0.05, ts());
        assert!(cmp.validate().is_ok());
    }

    #[test]
    fn test_window_result_serde_field_names() {
        let window = WindowResult {
            window_return: 0.1,
            duration_days: 30.0,
            start_date: ts(),
            end_date: ts(),
            trades: 25,
        };
        let json = serde_json::to_value(&window).unwrap();
        assert!(json.get("return").is_some());
        assert!(json.get("duration").is_some());
    }
}
