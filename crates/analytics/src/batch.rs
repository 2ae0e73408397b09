use crate::engine::MetricsAnalyzer;
use crate::error::AnalyticsError;
use crate::report::SuccessMetrics;
use core_types::WindowResult;
use rayon::prelude::*;

/// Scores many independent runs in parallel.
///
/// The analyzer is stateless, so runs are embarrassingly parallel — this is
/// the entry point for grid-search callers scoring hundreds of parameter
/// sets. Results come back in input order; one invalid run fails only its
/// own slot.
pub fn analyze_all(
    analyzer: &MetricsAnalyzer,
    runs: &[Vec<WindowResult>],
) -> Vec<Result<SuccessMetrics, AnalyticsError>> {
    tracing::debug!(runs = runs.len(), "scoring run batch");
    runs.par_iter().map(|run| analyzer.analyze(run)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn run(returns: &[f64]) -> Vec<WindowResult> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        returns
            .iter()
            .map(|r| WindowResult {
                window_return: *r,
                duration_days: 30.0,
                start_date: start,
                end_date: start + Duration::days(30),
                trades: 5,
            })
            .collect()
    }

    #[test]
    fn test_batch_preserves_order() {
        let analyzer = MetricsAnalyzer::new();
        let runs = vec![
            run(&[0.1, 0.05]),
            run(&[-0.1, -0.05]),
            run(&[]),
        ];
        let results = analyze_all(&analyzer, &runs);
        assert_eq!(results.len(), 3);
        assert!(results[0].as_ref().unwrap().total_return > 0.0);
        assert!(results[1].as_ref().unwrap().total_return < 0.0);
        assert_eq!(results[2].as_ref().unwrap().total_windows, 0);
    }

    #[test]
    fn test_batch_isolates_invalid_runs() {
        let analyzer = MetricsAnalyzer::new();
        let runs = vec![run(&[0.1]), run(&[f64::NAN])];
        let results = analyze_all(&analyzer, &runs);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn test_batch_matches_sequential() {
        let analyzer = MetricsAnalyzer::new();
        let runs: Vec<_> = (0..16)
            .map(|i| run(&[0.01 * i as f64, -0.005, 0.02]))
            .collect();
        let parallel = analyze_all(&analyzer, &runs);
        for (run, result) in runs.iter().zip(&parallel) {
            let sequential = analyzer.analyze(run).unwrap();
            assert_eq!(result.as_ref().unwrap(), &sequential);
        }
    }
}
