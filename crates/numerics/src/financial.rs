use crate::error::NumericsError;
use crate::stats;
use crate::vector::DIVISION_EPSILON;
use serde::{Deserialize, Serialize};

/// Annualization basis used throughout the financial helpers.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// How period-over-period returns are derived from a price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReturnMethod {
    Simple,
    Logarithmic,
}

/// Period-over-period returns of a price series.
///
/// Fewer than two prices yields an empty vector. Simple returns degrade a
/// near-zero previous price to a `0.0` return (matching the element-wise
/// divide rule); logarithmic returns require strictly positive prices.
pub fn returns(prices: &[f64], method: ReturnMethod) -> Result<Vec<f64>, NumericsError> {
    if prices.len() < 2 {
        return Ok(Vec::new());
    }

    match method {
        ReturnMethod::Simple => Ok(prices
            .windows(2)
            .map(|w| {
                if w[0].abs() < DIVISION_EPSILON {
                    0.0
                } else {
                    (w[1] - w[0]) / w[0]
                }
            })
            .collect()),
        ReturnMethod::Logarithmic => {
            if let Some(bad) = prices.iter().find(|p| **p <= 0.0 || !p.is_finite()) {
                return Err(NumericsError::InvalidArgument(
                    "prices".to_string(),
                    format!("logarithmic returns require strictly positive prices, got {bad}"),
                ));
            }
            Ok(prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect())
        }
    }
}

/// Compounds a return sequence into an equity curve starting at `initial`.
///
/// Output length is `returns.len() + 1`; the first element is `initial`.
pub fn equity_curve(returns: &[f64], initial: f64) -> Vec<f64> {
    let mut curve = Vec::with_capacity(returns.len() + 1);
    curve.push(initial);
    let mut equity = initial;
    for &r in returns {
        equity *= 1.0 + r;
        curve.push(equity);
    }
    curve
}

/// Maximum peak-to-trough drawdown, as a positive fraction of the peak.
///
/// Computed on the compounded equity curve built from the return sequence,
/// so a -10% followed by a +10% window still shows a drawdown.
pub fn max_drawdown(returns: &[f64]) -> f64 {
    let curve = equity_curve(returns, 1.0);
    let mut peak = curve[0];
    let mut max_dd = 0.0;
    for &equity in &curve {
        if equity > peak {
            peak = equity;
        }
        if peak > 0.0 {
            let drawdown = (peak - equity) / peak;
            if drawdown > max_dd {
                max_dd = drawdown;
            }
        }
    }
    max_dd
}

/// Annualized Sharpe ratio of a per-period return series.
///
/// `risk_free_rate` is per period. Zero volatility yields `0.0`. A
/// non-positive `periods_per_year` skips annualization.
pub fn sharpe_ratio(returns: &[f64], risk_free_rate: f64, periods_per_year: f64) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    let excess = stats::mean(returns) - risk_free_rate;
    let vol = stats::std_dev(returns, 0);
    if vol <= 0.0 {
        return 0.0;
    }
    let factor = if periods_per_year > 0.0 {
        periods_per_year.sqrt()
    } else {
        1.0
    };
    excess / vol * factor
}

/// Annualized Sortino ratio.
///
/// The denominator is the downside deviation: root-mean-square distance
/// below `target`, counting only the observations below the target. No
/// sub-target observations, or a zero deviation, yields `0.0`.
pub fn sortino_ratio(returns: &[f64], target: f64, periods_per_year: f64) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    let downside: Vec<f64> = returns
        .iter()
        .filter(|r| **r < target)
        .map(|r| (r - target) * (r - target))
        .collect();
    if downside.is_empty() {
        return 0.0;
    }
    let downside_deviation = (stats::sum(&downside) / downside.len() as f64).sqrt();
    if downside_deviation <= 0.0 {
        return 0.0;
    }
    let factor = if periods_per_year > 0.0 {
        periods_per_year.sqrt()
    } else {
        1.0
    };
    (stats::mean(returns) - target) / downside_deviation * factor
}

/// Converts a total compounded return over `total_days` into an annual rate.
///
/// Guarded to `0.0` when the duration is zero or negative.
pub fn annualized_return(total_return: f64, total_days: f64) -> f64 {
    if total_days <= 0.0 {
        return 0.0;
    }
    (1.0 + total_return).powf(DAYS_PER_YEAR / total_days) - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_returns() {
        let prices = vec![100.0, 110.0, 99.0];
        let r = returns(&prices, ReturnMethod::Simple).unwrap();
        assert!((r[0] - 0.1).abs() < 1e-12);
        assert!((r[1] + 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_log_returns_reject_non_positive_prices() {
        assert!(returns(&[100.0, 0.0], ReturnMethod::Logarithmic).is_err());
        assert!(returns(&[100.0, -5.0], ReturnMethod::Logarithmic).is_err());
        let r = returns(&[100.0, 110.0], ReturnMethod::Logarithmic).unwrap();
        assert!((r[0] - (1.1f64).ln()).abs() < 1e-12);
    }

    #[test]
    fn test_returns_short_series_is_empty() {
        assert!(returns(&[100.0], ReturnMethod::Simple).unwrap().is_empty());
        assert!(returns(&[], ReturnMethod::Simple).unwrap().is_empty());
    }

    #[test]
    fn test_equity_curve_compounds() {
        let curve = equity_curve(&[0.1, -0.5], 1000.0);
        assert_eq!(curve.len(), 3);
        assert!((curve[1] - 1100.0).abs() < 1e-9);
        assert!((curve[2] - 550.0).abs() < 1e-9);
    }

    #[test]
    fn test_max_drawdown_peak_to_trough() {
        // Up 10%, down 20%, partial recovery. Trough is 0.88 of the 1.1 peak.
        let dd = max_drawdown(&[0.1, -0.2, 0.05]);
        assert!((dd - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_max_drawdown_monotone_rise_is_zero() {
        assert_eq!(max_drawdown(&[0.01, 0.02, 0.03]), 0.0);
    }

    #[test]
    fn test_sharpe_flat_series_is_zero() {
        assert_eq!(sharpe_ratio(&[0.01, 0.01, 0.01], 0.0, 12.0), 0.0);
        assert_eq!(sharpe_ratio(&[], 0.0, 12.0), 0.0);
    }

    #[test]
    fn test_sharpe_positive_for_positive_drift() {
        let s = sharpe_ratio(&[0.02, 0.01, 0.03, -0.01], 0.0, 12.0);
        assert!(s > 0.0);
    }

    #[test]
    fn test_sortino_counts_only_downside() {
        // One observation below target out of four.
        let s = sortino_ratio(&[0.02, 0.01, 0.03, -0.02], 0.0, 12.0);
        assert!(s > 0.0);
        // All above target: no downside to measure.
        assert_eq!(sortino_ratio(&[0.02, 0.01], 0.0, 12.0), 0.0);
    }

    #[test]
    fn test_annualized_return_guards_zero_duration() {
        assert_eq!(annualized_return(0.5, 0.0), 0.0);
        let one_year = annualized_return(0.1, DAYS_PER_YEAR);
        assert!((one_year - 0.1).abs() < 1e-12);
        // Six months at +10% annualizes above 10%.
        assert!(annualized_return(0.1, DAYS_PER_YEAR / 2.0) > 0.2);
    }
}
