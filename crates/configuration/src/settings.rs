use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub rating: RatingSettings,
    pub analytics: AnalyticsSettings,
    pub simulation: SimulationSettings,
}

/// Caller-side policy around the rating engine.
#[derive(Debug, Clone, Deserialize)]
pub struct RatingSettings {
    /// How many processed games to allow between universe normalizations.
    /// Normalization is a full barrier over every tracked symbol, so the
    /// cadence is a caller decision, not an engine one.
    pub normalization_interval: usize,
}

/// Rates fed into the success-metrics analyzer.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsSettings {
    /// Risk-free rate per evaluation window, as a fraction (0.0005 = 0.05%).
    pub risk_free_rate: f64,
    /// Minimum acceptable return per window for downside-deviation purposes.
    pub target_return: f64,
}

/// Parameters for the deterministic demo feed driven by the `rate` command.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationSettings {
    /// The universe of symbols to track (e.g., ["BTC", "ETH", "SOL"]).
    pub symbols: Vec<String>,
    /// Number of simulated observation steps.
    pub steps: usize,
    /// Hours of simulated time between observation steps.
    pub step_hours: i64,
}
