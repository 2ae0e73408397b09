use crate::error::AnalyticsError;
use crate::report::{RiskLevel, StrategyGrade, SuccessMetrics};
use core_types::WindowResult;
use numerics::DAYS_PER_YEAR;

/// Rolling-sum span for the consistency metric, in windows. Shorter runs
/// fall back to a single whole-run sum.
const CONSISTENCY_WINDOW: usize = 12;

/// Divisor floor for the Calmar ratio.
const DRAWDOWN_FLOOR: f64 = 1e-10;

// Composite blend weights.
const WEIGHT_SHARPE: f64 = 0.25;
const WEIGHT_WIN_RATE: f64 = 0.20;
const WEIGHT_PROFIT_FACTOR: f64 = 0.20;
const WEIGHT_DRAWDOWN: f64 = 0.25;
const WEIGHT_CONSISTENCY: f64 = 0.10;

/// A stateless calculator that scores a backtest run's window returns.
///
/// The analyzer holds no per-run state and is safe to call concurrently
/// from many independent evaluations. The two rates are per evaluation
/// window and default to zero.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricsAnalyzer {
    pub risk_free_rate: f64,
    pub target_return: f64,
}

impl MetricsAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rates(risk_free_rate: f64, target_return: f64) -> Self {
        Self {
            risk_free_rate,
            target_return,
        }
    }

    /// The main entry point: scores one run of window results.
    ///
    /// An empty run yields the neutral scorecard — routinely hit when a
    /// parameter set never trades, so it must not error. Non-finite window
    /// data fails fast instead: it means the upstream backtest is broken.
    pub fn analyze(&self, windows: &[WindowResult]) -> Result<SuccessMetrics, AnalyticsError> {
        if windows.is_empty() {
            return Ok(SuccessMetrics::neutral());
        }
        self.validate(windows)?;

        let returns: Vec<f64> = windows.iter().map(|w| w.window_return).collect();
        let durations: Vec<f64> = windows.iter().map(|w| w.duration_days).collect();
        let total_days = numerics::sum(&durations);

        let mut metrics = SuccessMetrics::neutral();
        metrics.total_windows = windows.len();
        metrics.total_trades = windows.iter().map(|w| u64::from(w.trades)).sum();

        self.calculate_returns(&returns, total_days, &mut metrics);
        self.calculate_ratios(&returns, total_days, &mut metrics);
        self.calculate_win_loss(&returns, &mut metrics);
        self.calculate_risk(&returns, &mut metrics)?;
        self.calculate_consistency(&returns, &mut metrics)?;
        self.calculate_kelly(&mut metrics);
        self.calculate_scores(&mut metrics);
        metrics.recommendation = build_recommendation(&metrics);

        tracing::debug!(
            windows = metrics.total_windows,
            composite = metrics.composite_score,
            grade = %metrics.strategy_grade,
            "scored run"
        );
        Ok(metrics)
    }

    fn validate(&self, windows: &[WindowResult]) -> Result<(), AnalyticsError> {
        for (index, window) in windows.iter().enumerate() {
            if !window.window_return.is_finite() {
                return Err(AnalyticsError::InvalidWindow {
                    index,
                    reason: format!("return {} is not finite", window.window_return),
                });
            }
            if !window.duration_days.is_finite() || window.duration_days < 0.0 {
                return Err(AnalyticsError::InvalidWindow {
                    index,
                    reason: format!("duration {} days is not usable", window.duration_days),
                });
            }
        }
        Ok(())
    }

    /// Compounded total return and its annualization.
    fn calculate_returns(&self, returns: &[f64], total_days: f64, metrics: &mut SuccessMetrics) {
        let curve = numerics::equity_curve(returns, 1.0);
        metrics.total_return = curve[curve.len() - 1] - 1.0;
        metrics.annualized_return = numerics::annualized_return(metrics.total_return, total_days);
    }

    /// Sharpe, Sortino, drawdown, Calmar.
    fn calculate_ratios(&self, returns: &[f64], total_days: f64, metrics: &mut SuccessMetrics) {
        // Annualize by windows-per-year, derived from the mean window span.
        let mean_duration = total_days / returns.len() as f64;
        let windows_per_year = if mean_duration > 0.0 {
            DAYS_PER_YEAR / mean_duration
        } else {
            1.0
        };

        metrics.sharpe_ratio =
            numerics::sharpe_ratio(returns, self.risk_free_rate, windows_per_year);
        metrics.sortino_ratio =
            numerics::sortino_ratio(returns, self.target_return, windows_per_year);
        metrics.max_drawdown = numerics::max_drawdown(returns);
        metrics.calmar_ratio =
            metrics.annualized_return / metrics.max_drawdown.max(DRAWDOWN_FLOOR);
    }

    /// Win rate, profit factor, and the partitioned win/loss averages.
    fn calculate_win_loss(&self, returns: &[f64], metrics: &mut SuccessMetrics) {
        let wins: Vec<f64> = returns.iter().copied().filter(|r| *r > 0.0).collect();
        let losses: Vec<f64> = returns.iter().copied().filter(|r| *r < 0.0).collect();

        metrics.win_rate = wins.len() as f64 / returns.len() as f64;

        let gross_profit = numerics::sum(&wins);
        let gross_loss = -numerics::sum(&losses);
        metrics.profit_factor = if gross_loss > 0.0 {
            gross_profit / gross_loss
        } else if gross_profit > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };

        if !wins.is_empty() {
            metrics.average_win = numerics::mean(&wins);
            metrics.largest_win = wins.iter().copied().fold(f64::MIN, f64::max);
        }
        if !losses.is_empty() {
            metrics.average_loss = numerics::mean(&losses);
            metrics.largest_loss = losses.iter().copied().fold(f64::MAX, f64::min);
        }
    }

    /// Return-distribution risk: volatility, downside deviation, VaR.
    fn calculate_risk(
        &self,
        returns: &[f64],
        metrics: &mut SuccessMetrics,
    ) -> Result<(), AnalyticsError> {
        metrics.volatility = numerics::std_dev(returns, 0);

        let downside: Vec<f64> = returns
            .iter()
            .filter(|r| **r < self.target_return)
            .map(|r| (r - self.target_return) * (r - self.target_return))
            .collect();
        if !downside.is_empty() {
            metrics.downside_deviation =
                (numerics::sum(&downside) / downside.len() as f64).sqrt();
        }

        metrics.value_at_risk_95 = numerics::percentile(returns, 5.0)?;
        Ok(())
    }

    /// Rolling-sum consistency and the mean/volatility stability index.
    fn calculate_consistency(
        &self,
        returns: &[f64],
        metrics: &mut SuccessMetrics,
    ) -> Result<(), AnalyticsError> {
        let window = CONSISTENCY_WINDOW.min(returns.len());
        let rolling = numerics::rolling_sum(returns, window)?;
        let positive = rolling.iter().filter(|s| **s > 0.0).count();
        metrics.consistency = 100.0 * positive as f64 / rolling.len() as f64;

        let mean_return = numerics::mean(returns);
        metrics.stability_index = if mean_return <= 0.0 {
            0.0
        } else if metrics.volatility == 0.0 {
            // Flat, non-negative series: maximally stable.
            100.0
        } else {
            (mean_return / metrics.volatility * 10.0).clamp(0.0, 100.0)
        };
        Ok(())
    }

    /// Kelly fraction from the win/loss decomposition.
    fn calculate_kelly(&self, metrics: &mut SuccessMetrics) {
        let average_loss_magnitude = -metrics.average_loss;
        if metrics.average_win <= 0.0 || average_loss_magnitude <= 0.0 {
            metrics.kelly_percentage = 0.0;
            return;
        }
        let edge = metrics.win_rate * metrics.average_win
            - (1.0 - metrics.win_rate) * average_loss_magnitude;
        metrics.kelly_percentage = (edge / metrics.average_win).clamp(0.0, 1.0);
    }

    /// The composite and risk-adjusted blends, grade, and risk level.
    ///
    /// The normalization factors (x25, x100, x200, x400, and the x10 inside
    /// the stability index) are fixed constants of the scoring contract,
    /// not tunables.
    fn calculate_scores(&self, metrics: &mut SuccessMetrics) {
        let sharpe_component = (metrics.sharpe_ratio * 25.0).clamp(0.0, 100.0);
        let win_rate_component = (metrics.win_rate * 100.0).clamp(0.0, 100.0);
        let profit_factor_component = if metrics.profit_factor.is_finite() {
            (metrics.profit_factor * 25.0).clamp(0.0, 100.0)
        } else {
            100.0
        };
        let drawdown_component = (100.0 - metrics.max_drawdown * 200.0).clamp(0.0, 100.0);

        metrics.composite_score = WEIGHT_SHARPE * sharpe_component
            + WEIGHT_WIN_RATE * win_rate_component
            + WEIGHT_PROFIT_FACTOR * profit_factor_component
            + WEIGHT_DRAWDOWN * drawdown_component
            + WEIGHT_CONSISTENCY * metrics.consistency;

        let annualized_component = (metrics.annualized_return * 200.0).clamp(0.0, 100.0);
        let sortino_component = (metrics.sortino_ratio * 25.0).clamp(0.0, 100.0);
        metrics.risk_adjusted_score = (0.40 * annualized_component
            + 0.30 * sharpe_component
            + 0.30 * sortino_component
            - metrics.max_drawdown * 100.0)
            .clamp(0.0, 100.0);

        metrics.strategy_grade = StrategyGrade::from_composite(metrics.composite_score);

        let risk_score = 0.6 * (metrics.max_drawdown * 200.0).clamp(0.0, 100.0)
            + 0.4 * (metrics.volatility * 400.0).clamp(0.0, 100.0);
        metrics.risk_level = RiskLevel::from_risk_score(risk_score);
    }
}

/// Rule-based prose summary: grade, risk warning, named weaknesses, and the
/// Kelly sizing suggestion.
fn build_recommendation(metrics: &SuccessMetrics) -> String {
    let mut parts = vec![format!(
        "Strategy grades {} with a composite score of {:.1}/100.",
        metrics.strategy_grade, metrics.composite_score
    )];

    if metrics.risk_level == RiskLevel::VeryHigh {
        parts.push(
            "Risk is very high; reduce position sizes or tighten drawdown controls.".to_string(),
        );
    }
    if metrics.win_rate < 0.4 {
        parts.push(format!(
            "Win rate is low ({:.0}%); entries may need stricter filtering.",
            metrics.win_rate * 100.0
        ));
    }
    if metrics.profit_factor.is_finite() && metrics.profit_factor < 1.2 {
        parts.push(format!(
            "Profit factor of {:.2} leaves little margin over losses.",
            metrics.profit_factor
        ));
    }
    if metrics.sharpe_ratio < 0.5 {
        parts.push(format!(
            "Sharpe ratio of {:.2} indicates weak risk-adjusted returns.",
            metrics.sharpe_ratio
        ));
    }
    if metrics.kelly_percentage > 0.0 {
        parts.push(format!(
            "Kelly sizing suggests risking at most {:.1}% of capital per position.",
            metrics.kelly_percentage * 100.0
        ));
    }

    parts.join(" ")
}
