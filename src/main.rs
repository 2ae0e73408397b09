use analytics::MetricsAnalyzer;
use chrono::{Duration, TimeZone, Utc};
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::Config;
use core_types::{Comparison, WindowResult};
use indicatif::{ProgressBar, ProgressStyle};
use itertools::Itertools;
use ratings::RatingEngine;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// The main entry point for the Meridian rating and scoring application.
fn main() -> anyhow::Result<()> {
    // Initialize structured logging; RUST_LOG controls verbosity.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load the runtime settings from config.toml.
    let config = configuration::load_config()?;

    // Parse command-line arguments and execute the appropriate command.
    let cli = Cli::parse();
    match cli.command {
        Commands::Rate(args) => handle_rate(args, config),
        Commands::Score(args) => handle_score(args, config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Pairwise asset strength ratings and strategy scorecards.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the deterministic demo feed through the rating engine.
    Rate(RateArgs),
    /// Score a backtest run of window results from a JSON file.
    Score(ScoreArgs),
}

#[derive(Parser)]
struct RateArgs {
    /// Override the number of simulated observation steps.
    #[arg(long)]
    steps: Option<usize>,

    /// How many of the strongest assets to print.
    #[arg(long, default_value_t = 10)]
    top: usize,
}

#[derive(Parser)]
struct ScoreArgs {
    /// Path to a JSON array of window results.
    #[arg(long)]
    file: PathBuf,
}

// ==============================================================================
// Rate Command Logic
// ==============================================================================

/// Drives the rating engine over a synthetic, fully deterministic price
/// universe: each symbol follows its own sine-plus-drift path, and every
/// step plays all pairwise games between the symbols' relative moves.
fn handle_rate(args: RateArgs, config: Config) -> anyhow::Result<()> {
    let symbols = &config.simulation.symbols;
    let steps = args.steps.unwrap_or(config.simulation.steps);
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    let mut engine = RatingEngine::new();
    for symbol in symbols {
        engine.ensure_coin_exists(symbol, start);
    }

    let progress_bar = ProgressBar::new(steps as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("=>-"),
    );

    let mut games = 0usize;
    for step in 1..=steps {
        let timestamp = start + Duration::hours(step as i64 * config.simulation.step_hours);
        let step_returns: Vec<f64> = (0..symbols.len())
            .map(|i| simulated_return(i, step))
            .collect();

        // Every unordered pair plays one game on the relative move.
        for (a, b) in (0..symbols.len()).tuple_combinations() {
            let comparison = Comparison::new(
                symbols[a].clone(),
                symbols[b].clone(),
                step_returns[a] - step_returns[b],
                timestamp,
            );
            engine.process_game(&comparison)?;
            games += 1;

            if games % config.rating.normalization_interval == 0 {
                engine.normalize_ratings();
            }
        }
        progress_bar.inc(1);
    }

    engine.normalize_ratings();
    progress_bar.finish_with_message("Simulation complete.");

    // Render the strongest assets.
    let mut states: Vec<_> = engine.states().collect();
    states.sort_by(|x, y| y.rating.total_cmp(&x.rating));

    let mut table = Table::new();
    table.set_header(vec!["Rank", "Symbol", "Rating", "RD", "Volatility"]);
    for (rank, state) in states.iter().take(args.top).enumerate() {
        table.add_row(vec![
            (rank + 1).to_string(),
            state.symbol.clone(),
            format!("{:.1}", state.rating),
            format!("{:.1}", state.rating_deviation),
            format!("{:.4}", state.volatility),
        ]);
    }
    println!("{table}");
    println!("Processed {games} games across {} symbols.", symbols.len());

    Ok(())
}

/// Deterministic per-step fractional return for symbol `i`: a slow sine
/// swing plus a small per-symbol drift, scaled into realistic hourly moves.
fn simulated_return(i: usize, step: usize) -> f64 {
    let phase = i as f64 * 0.7;
    let t = step as f64;
    let cycle = (t * 0.05 + phase).sin() - ((t - 1.0) * 0.05 + phase).sin();
    let drift = (i as f64 - 2.5) * 2.0e-5;
    cycle * 0.004 + drift
}

// ==============================================================================
// Score Command Logic
// ==============================================================================

/// Reads a backtest run from disk and prints the full scorecard.
fn handle_score(args: ScoreArgs, config: Config) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.file)?;
    let windows: Vec<WindowResult> = serde_json::from_str(&raw)?;
    tracing::info!(windows = windows.len(), file = %args.file.display(), "scoring run");

    let analyzer = MetricsAnalyzer::with_rates(
        config.analytics.risk_free_rate,
        config.analytics.target_return,
    );
    let metrics = analyzer.analyze(&windows)?;

    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    let rows: Vec<(&str, String)> = vec![
        ("Windows", metrics.total_windows.to_string()),
        ("Trades", metrics.total_trades.to_string()),
        ("Total return", format!("{:.2}%", metrics.total_return * 100.0)),
        (
            "Annualized return",
            format!("{:.2}%", metrics.annualized_return * 100.0),
        ),
        ("Sharpe ratio", format!("{:.2}", metrics.sharpe_ratio)),
        ("Sortino ratio", format!("{:.2}", metrics.sortino_ratio)),
        ("Max drawdown", format!("{:.2}%", metrics.max_drawdown * 100.0)),
        ("Calmar ratio", format!("{:.2}", metrics.calmar_ratio)),
        ("Win rate", format!("{:.1}%", metrics.win_rate * 100.0)),
        ("Profit factor", format!("{:.2}", metrics.profit_factor)),
        ("Average win", format!("{:.2}%", metrics.average_win * 100.0)),
        ("Average loss", format!("{:.2}%", metrics.average_loss * 100.0)),
        ("Volatility", format!("{:.2}%", metrics.volatility * 100.0)),
        (
            "Value at risk (95%)",
            format!("{:.2}%", metrics.value_at_risk_95 * 100.0),
        ),
        ("Consistency", format!("{:.1}%", metrics.consistency)),
        ("Stability index", format!("{:.1}", metrics.stability_index)),
        ("Kelly fraction", format!("{:.1}%", metrics.kelly_percentage * 100.0)),
        ("Composite score", format!("{:.1}/100", metrics.composite_score)),
        (
            "Risk-adjusted score",
            format!("{:.1}/100", metrics.risk_adjusted_score),
        ),
        ("Grade", metrics.strategy_grade.to_string()),
        ("Risk level", metrics.risk_level.to_string()),
    ];
    for (name, value) in rows {
        table.add_row(vec![name.to_string(), value]);
    }
    println!("{table}");
    println!("\n{}", metrics.recommendation);

    Ok(())
}
