use core_types::{AssetRatingState, MAX_VOLATILITY, MIN_VOLATILITY};
use serde::{Deserialize, Serialize};

/// Conversion factor between the external rating scale (centered on 1500)
/// and the Glicko-2 internal scale.
pub const GLICKO2_SCALE: f64 = 173.7178;

/// Relative moves below 0.1% are treated as an exact draw.
pub const DRAW_THRESHOLD: f64 = 0.001;

/// Slope of the continuous outcome mapping: a ±1% relative move saturates
/// the score at 1.0 / 0.0.
pub const OUTCOME_SLOPE: f64 = 50.0;

/// How decisive a game outcome was, judged by its distance from the draw
/// line. Metadata only; the rating math uses the raw score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeConfidence {
    Neutral,
    Low,
    High,
}

/// The continuous outcome of one pairwise game, from asset A's perspective.
///
/// Classical Glicko-2 scores games as {0, 0.5, 1}. This engine instead maps
/// the relative price move onto a continuous score in [0, 1]:
/// `0.5 + price_change * 50`, clamped. The departure is deliberate and
/// downstream consumers depend on this exact numeric behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub score: f64,
    pub draw: bool,
    pub confidence: OutcomeConfidence,
}

impl GameOutcome {
    /// Maps a fractional relative price move to a continuous outcome score.
    pub fn from_price_change(price_change: f64) -> Self {
        let draw = price_change.abs() < DRAW_THRESHOLD;
        let score = if draw {
            0.5
        } else {
            (0.5 + price_change * OUTCOME_SLOPE).clamp(0.0, 1.0)
        };

        let distance = (score - 0.5).abs();
        let confidence = if distance < 0.1 {
            OutcomeConfidence::Neutral
        } else if distance < 0.25 {
            OutcomeConfidence::Low
        } else {
            OutcomeConfidence::High
        };

        Self {
            score,
            draw,
            confidence,
        }
    }

    /// The same game seen from the opponent's side.
    pub fn complement(&self) -> Self {
        Self {
            score: 1.0 - self.score,
            draw: self.draw,
            confidence: self.confidence,
        }
    }
}

/// Converts an external (rating, deviation) pair to the internal scale.
pub fn to_glicko2_scale(rating: f64, rating_deviation: f64) -> (f64, f64) {
    let mu = (rating - 1500.0) / GLICKO2_SCALE;
    let phi = rating_deviation / GLICKO2_SCALE;
    (mu, phi)
}

/// Converts an internal (mu, phi) pair back to the external scale.
pub fn from_glicko2_scale(mu: f64, phi: f64) -> (f64, f64) {
    (GLICKO2_SCALE * mu + 1500.0, GLICKO2_SCALE * phi)
}

// g(phi) function from the Glicko-2 spec.
fn g_function(phi: f64) -> f64 {
    1.0 / (1.0 + 3.0 * phi.powi(2) / std::f64::consts::PI.powi(2)).sqrt()
}

// E(mu, mu_j, g(phi_j)): the expected score against the opponent.
fn e_function(mu: f64, mu_j: f64, g_phi_j: f64) -> f64 {
    numerics::logistic(g_phi_j * (mu - mu_j))
}

/// The result of rating one side of a game. Bounds are enforced when the
/// update is applied to the state.
#[derive(Debug, Clone, Copy)]
pub struct RatingUpdate {
    pub rating: f64,
    pub rating_deviation: f64,
    pub volatility: f64,
}

/// Rates `player` against a single opponent with the given outcome score.
///
/// Follows the Glicko-2 update steps, with one deliberate simplification:
/// the new volatility is the closed form `clamp(sqrt(sigma^2 + delta^2 / v))`
/// rather than the iterative (Illinois) solve from the Glicko-2 paper. The
/// closed form is what the live engine has always run, and live/backtest
/// parity pins it.
pub fn rate_against(
    player: &AssetRatingState,
    opponent_rating: f64,
    opponent_rd: f64,
    score: f64,
) -> RatingUpdate {
    // Step 1: convert both sides to the internal scale.
    let (mu, phi) = to_glicko2_scale(player.rating, player.rating_deviation);
    let (mu_j, phi_j) = to_glicko2_scale(opponent_rating, opponent_rd);

    let g_phi_j = g_function(phi_j);
    let e = e_function(mu, mu_j, g_phi_j);

    // Step 2: estimated variance of the rating from this game alone.
    let v = 1.0 / (g_phi_j.powi(2) * e * (1.0 - e));

    // Step 3: estimated rating adjustment.
    let delta = v * g_phi_j * (score - e);

    // Step 4: closed-form volatility update (see above).
    let new_volatility =
        (player.volatility.powi(2) + delta.powi(2) / v).sqrt().clamp(MIN_VOLATILITY, MAX_VOLATILITY);

    // Step 5: update the deviation and the rating.
    let phi_star = (phi.powi(2) + new_volatility.powi(2)).sqrt();
    let new_phi = 1.0 / (1.0 / phi_star.powi(2) + 1.0 / v).sqrt();
    let new_mu = mu + new_phi.powi(2) * g_phi_j * (score - e);

    // Step 6: convert back to the external scale.
    let (rating, rating_deviation) = from_glicko2_scale(new_mu, new_phi);

    RatingUpdate {
        rating,
        rating_deviation,
        volatility: new_volatility,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_outcome_saturates_on_large_moves() {
        assert_eq!(GameOutcome::from_price_change(0.05).score, 1.0);
        assert_eq!(GameOutcome::from_price_change(-0.05).score, 0.0);
    }

    #[test]
    fn test_outcome_is_continuous_for_small_moves() {
        let outcome = GameOutcome::from_price_change(0.005);
        assert!((outcome.score - 0.75).abs() < 1e-12);
        assert_eq!(outcome.confidence, OutcomeConfidence::Low);
    }

    #[test]
    fn test_outcome_draw_band() {
        let outcome = GameOutcome::from_price_change(0.0005);
        assert_eq!(outcome.score, 0.5);
        assert!(outcome.draw);
        assert_eq!(outcome.confidence, OutcomeConfidence::Neutral);
    }

    #[test]
    fn test_outcome_confidence_tiers() {
        assert_eq!(
            GameOutcome::from_price_change(0.001).confidence,
            OutcomeConfidence::Neutral
        );
        assert_eq!(
            GameOutcome::from_price_change(0.004).confidence,
            OutcomeConfidence::Low
        );
        assert_eq!(
            GameOutcome::from_price_change(0.009).confidence,
            OutcomeConfidence::High
        );
    }

    #[test]
    fn test_complement_mirrors_score() {
        let outcome = GameOutcome::from_price_change(0.004);
        let mirrored = outcome.complement();
        assert!((outcome.score + mirrored.score - 1.0).abs() < 1e-12);
        assert_eq!(outcome.draw, mirrored.draw);
    }

    #[test]
    fn test_scale_round_trip() {
        let (mu, phi) = to_glicko2_scale(1500.0, 350.0);
        assert!(mu.abs() < 1e-12);
        let (rating, rd) = from_glicko2_scale(mu, phi);
        assert!((rating - 1500.0).abs() < 1e-9);
        assert!((rd - 350.0).abs() < 1e-9);
    }

    #[test]
    fn test_g_function_range() {
        assert!((g_function(0.0) - 1.0).abs() < 1e-12);
        let g = g_function(350.0 / GLICKO2_SCALE);
        assert!(g > 0.0 && g < 1.0);
    }

    #[test]
    fn test_expected_score_even_match() {
        let e = e_function(0.0, 0.0, 1.0);
        assert!((e - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_rate_against_win_and_loss() {
        let player = AssetRatingState::new("BTC", Utc::now());

        let win = rate_against(&player, 1500.0, 200.0, 1.0);
        assert!(win.rating > player.rating);
        assert!(win.rating_deviation < player.rating_deviation);

        let loss = rate_against(&player, 1500.0, 200.0, 0.0);
        assert!(loss.rating < player.rating);
        assert!(loss.rating_deviation < player.rating_deviation);
    }

    #[test]
    fn test_rate_against_draw_keeps_rating() {
        let player = AssetRatingState::new("BTC", Utc::now());
        let update = rate_against(&player, 1500.0, 350.0, 0.5);
        assert!((update.rating - 1500.0).abs() < 1e-9);
        assert!(update.rating_deviation < 350.0);
    }
}
