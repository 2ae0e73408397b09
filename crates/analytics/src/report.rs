use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal letter grade for a strategy, bucketed from the composite score
/// at fixed thresholds (90, 85, 80, 75, 70, 65, 60).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StrategyGrade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "C+")]
    CPlus,
    C,
    D,
    F,
}

impl StrategyGrade {
    pub fn from_composite(score: f64) -> Self {
        if score >= 90.0 {
            StrategyGrade::APlus
        } else if score >= 85.0 {
            StrategyGrade::A
        } else if score >= 80.0 {
            StrategyGrade::BPlus
        } else if score >= 75.0 {
            StrategyGrade::B
        } else if score >= 70.0 {
            StrategyGrade::CPlus
        } else if score >= 65.0 {
            StrategyGrade::C
        } else if score >= 60.0 {
            StrategyGrade::D
        } else {
            StrategyGrade::F
        }
    }
}

impl fmt::Display for StrategyGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StrategyGrade::APlus => "A+",
            StrategyGrade::A => "A",
            StrategyGrade::BPlus => "B+",
            StrategyGrade::B => "B",
            StrategyGrade::CPlus => "C+",
            StrategyGrade::C => "C",
            StrategyGrade::D => "D",
            StrategyGrade::F => "F",
        };
        write!(f, "{label}")
    }
}

/// Ordinal risk classification from the blended drawdown + volatility
/// risk score: Low < 20, Medium < 40, High < 60, Very High above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl RiskLevel {
    pub fn from_risk_score(score: f64) -> Self {
        if score < 20.0 {
            RiskLevel::Low
        } else if score < 40.0 {
            RiskLevel::Medium
        } else if score < 60.0 {
            RiskLevel::High
        } else {
            RiskLevel::VeryHigh
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::VeryHigh => "Very High",
        };
        write!(f, "{label}")
    }
}

/// The full scorecard for one backtest run.
///
/// This struct is the final output of the `MetricsAnalyzer` and serves as
/// the data transfer object for scoring results throughout the system. It
/// is pure data: recomputed from its `WindowResult` input each time, never
/// mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessMetrics {
    // I. Run shape
    pub total_windows: usize,
    pub total_trades: u64,

    // II. Returns
    pub total_return: f64,
    pub annualized_return: f64,

    // III. Risk-adjusted ratios
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    pub max_drawdown: f64,
    pub calmar_ratio: f64,

    // IV. Win/loss decomposition
    pub win_rate: f64,
    /// Sum of gains over sum of absolute losses. `f64::INFINITY` when the
    /// run has gains but no losing windows.
    pub profit_factor: f64,
    pub average_win: f64,
    /// Signed; at most zero.
    pub average_loss: f64,
    pub largest_win: f64,
    pub largest_loss: f64,

    // V. Risk
    pub volatility: f64,
    pub downside_deviation: f64,
    /// 5th percentile of the window-return distribution.
    pub value_at_risk_95: f64,

    // VI. Consistency
    /// Percentage of rolling window sums that are positive.
    pub consistency: f64,
    pub stability_index: f64,

    // VII. Sizing and scoring
    pub kelly_percentage: f64,
    pub composite_score: f64,
    pub risk_adjusted_score: f64,
    pub strategy_grade: StrategyGrade,
    pub risk_level: RiskLevel,
    pub recommendation: String,
}

impl SuccessMetrics {
    /// Creates the neutral, zeroed-out scorecard.
    ///
    /// This is what an empty run scores: grade F at composite 0, risk Low,
    /// and a stock recommendation. Also the starting point the analyzer
    /// fills in section by section.
    pub fn neutral() -> Self {
        Self {
            total_windows: 0,
            total_trades: 0,
            total_return: 0.0,
            annualized_return: 0.0,
            sharpe_ratio: 0.0,
            sortino_ratio: 0.0,
            max_drawdown: 0.0,
            calmar_ratio: 0.0,
            win_rate: 0.0,
            profit_factor: 0.0,
            average_win: 0.0,
            average_loss: 0.0,
            largest_win: 0.0,
            largest_loss: 0.0,
            volatility: 0.0,
            downside_deviation: 0.0,
            value_at_risk_95: 0.0,
            consistency: 0.0,
            stability_index: 0.0,
            kelly_percentage: 0.0,
            composite_score: 0.0,
            risk_adjusted_score: 0.0,
            strategy_grade: StrategyGrade::F,
            risk_level: RiskLevel::Low,
            recommendation:
                "No evaluation windows; collect more history before grading this strategy."
                    .to_string(),
        }
    }
}

impl Default for SuccessMetrics {
    fn default() -> Self {
        Self::neutral()
    }
}
