use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{AnalyticsSettings, Config, RatingSettings, SimulationSettings};

/// Loads the application configuration from the `config.toml` file.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file, deserializes it into our strongly-typed `Config`
/// struct, validates it, and returns it.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        // Tells the builder to look for a file named `config.toml`
        .add_source(config::File::with_name("config.toml"))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    Ok(config)
}

/// Rejects settings the engines would only trip over at runtime.
fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.rating.normalization_interval == 0 {
        return Err(ConfigError::ValidationError(
            "rating.normalization_interval must be at least 1".to_string(),
        ));
    }
    if config.simulation.symbols.len() < 2 {
        return Err(ConfigError::ValidationError(
            "simulation.symbols needs at least two symbols for pairwise games".to_string(),
        ));
    }
    if config.simulation.steps == 0 {
        return Err(ConfigError::ValidationError(
            "simulation.steps must be at least 1".to_string(),
        ));
    }
    if !config.analytics.risk_free_rate.is_finite() || !config.analytics.target_return.is_finite()
    {
        return Err(ConfigError::ValidationError(
            "analytics rates must be finite".to_string(),
        ));
    }
    Ok(())
}
