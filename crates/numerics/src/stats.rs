use crate::error::NumericsError;
use crate::vector::check_lengths;
use serde::{Deserialize, Serialize};

/// Compensated (Kahan) summation.
///
/// Every reduction in this crate that sums many floating-point terms goes
/// through here: long rating histories and backtest batches accumulate enough
/// terms that naive summation drifts measurably.
pub fn sum(values: &[f64]) -> f64 {
    let mut total = 0.0;
    let mut compensation = 0.0;
    for &x in values {
        let y = x - compensation;
        let t = total + y;
        compensation = (t - total) - y;
        total = t;
    }
    total
}

/// Arithmetic mean. An empty vector yields `0.0`.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    sum(values) / values.len() as f64
}

/// Two-pass variance with a compensated second pass.
///
/// `ddof = 0` gives the population variance, `ddof = 1` the sample variance.
/// Degenerate inputs (`len <= ddof`) yield `0.0`.
pub fn variance(values: &[f64], ddof: usize) -> f64 {
    if values.len() <= ddof {
        return 0.0;
    }
    let m = mean(values);
    let squared: Vec<f64> = values.iter().map(|x| (x - m) * (x - m)).collect();
    sum(&squared) / (values.len() - ddof) as f64
}

/// Standard deviation derived from [`variance`].
pub fn std_dev(values: &[f64], ddof: usize) -> f64 {
    variance(values, ddof).sqrt()
}

/// Welford's online mean/variance accumulator.
///
/// Single-pass and numerically stable; agrees with the two-pass
/// [`mean`]/[`variance`] path within floating-point tolerance. Useful when
/// the data arrives as a stream and buffering a full vector is wasteful.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunningStats {
    count: usize,
    mean: f64,
    m2: f64,
}

impl RunningStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_slice(values: &[f64]) -> Self {
        let mut stats = Self::new();
        for &x in values {
            stats.push(x);
        }
        stats
    }

    pub fn push(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = x - self.mean;
        self.m2 += delta * delta2;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 { 0.0 } else { self.mean }
    }

    pub fn variance(&self, ddof: usize) -> f64 {
        if self.count <= ddof {
            return 0.0;
        }
        self.m2 / (self.count - ddof) as f64
    }

    pub fn std_dev(&self, ddof: usize) -> f64 {
        self.variance(ddof).sqrt()
    }
}

/// Pearson correlation of two equal-length vectors.
///
/// A vector with zero variance correlates at `0.0` with anything — never
/// NaN. Flat series show up constantly in real data (stablecoins, halted
/// markets) and must not poison downstream aggregates.
pub fn correlation(a: &[f64], b: &[f64]) -> Result<f64, NumericsError> {
    check_lengths(a, b)?;
    if a.is_empty() {
        return Ok(0.0);
    }

    let mean_a = mean(a);
    let mean_b = mean(b);

    let cov_terms: Vec<f64> = a
        .iter()
        .zip(b)
        .map(|(x, y)| (x - mean_a) * (y - mean_b))
        .collect();
    let covariance = sum(&cov_terms);

    let var_a = variance(a, 0) * a.len() as f64;
    let var_b = variance(b, 0) * b.len() as f64;

    if var_a <= f64::EPSILON || var_b <= f64::EPSILON {
        return Ok(0.0);
    }

    Ok((covariance / (var_a * var_b).sqrt()).clamp(-1.0, 1.0))
}

/// Percentile by linear interpolation between order statistics.
///
/// Works on a sorted copy; the input is never mutated. `p` must lie in
/// [0, 100]. An empty vector yields `0.0`.
pub fn percentile(values: &[f64], p: f64) -> Result<f64, NumericsError> {
    if !(0.0..=100.0).contains(&p) {
        return Err(NumericsError::InvalidArgument(
            "percentile".to_string(),
            format!("p must be within [0, 100], got {p}"),
        ));
    }
    if values.is_empty() {
        return Ok(0.0);
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|x, y| x.total_cmp(y));

    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return Ok(sorted[lower]);
    }

    let weight = rank - lower as f64;
    Ok(sorted[lower] * (1.0 - weight) + sorted[upper] * weight)
}

/// The 50th percentile.
pub fn median(values: &[f64]) -> Result<f64, NumericsError> {
    percentile(values, 50.0)
}

/// Quantile with `q` in [0, 1]; thin wrapper over [`percentile`].
pub fn quantile(values: &[f64], q: f64) -> Result<f64, NumericsError> {
    if !(0.0..=1.0).contains(&q) {
        return Err(NumericsError::InvalidArgument(
            "quantile".to_string(),
            format!("q must be within [0, 1], got {q}"),
        ));
    }
    percentile(values, q * 100.0)
}

/// O(n) sliding-window sum.
///
/// Output length is `len - window + 1`. The window must lie in `[1, len]`.
pub fn rolling_sum(values: &[f64], window_size: usize) -> Result<Vec<f64>, NumericsError> {
    if window_size == 0 || window_size > values.len() {
        return Err(NumericsError::InvalidArgument(
            "window_size".to_string(),
            format!(
                "must be within [1, {}], got {window_size}",
                values.len()
            ),
        ));
    }

    let mut out = Vec::with_capacity(values.len() - window_size + 1);
    let mut accumulator = sum(&values[..window_size]);
    out.push(accumulator);
    for i in window_size..values.len() {
        accumulator += values[i] - values[i - window_size];
        out.push(accumulator);
    }
    Ok(out)
}

/// O(n) sliding-window mean, derived from [`rolling_sum`].
pub fn rolling_mean(values: &[f64], window_size: usize) -> Result<Vec<f64>, NumericsError> {
    let sums = rolling_sum(values, window_size)?;
    Ok(sums.iter().map(|s| s / window_size as f64).collect())
}

/// Summary of where `x` sits relative to a reference window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZScore {
    pub mean: f64,
    pub std_dev: f64,
    pub z: f64,
}

/// Z-score of `x` against the population statistics of `values`.
///
/// An empty or flat reference window yields `z = 0`.
pub fn z_score(values: &[f64], x: f64) -> ZScore {
    if values.is_empty() {
        return ZScore {
            mean: x,
            std_dev: 0.0,
            z: 0.0,
        };
    }
    let m = mean(values);
    let sd = std_dev(values, 0);
    let z = if sd > 0.0 { (x - m) / sd } else { 0.0 };
    ZScore {
        mean: m,
        std_dev: sd,
        z,
    }
}

/// The standard logistic function, 1 / (1 + e^(-x)).
pub fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kahan_sum_mixed_magnitudes() {
        // 1.0 followed by many tiny terms that naive summation loses.
        let mut values = vec![1.0];
        values.extend(std::iter::repeat(1e-16).take(10_000));
        let total = sum(&values);
        assert!((total - (1.0 + 1e-12)).abs() < 1e-15, "total = {total}");
    }

    #[test]
    fn test_welford_agrees_with_two_pass() {
        // Mixed-magnitude vector; both paths must agree to 1e-9 relative.
        let values: Vec<f64> = (0..100_000)
            .map(|i| {
                let x = i as f64;
                (x * 0.001).sin() * 1e6 + (x * 0.01).cos() * 1e-6
            })
            .collect();

        let online = RunningStats::from_slice(&values);
        let m1 = mean(&values);
        let v1 = variance(&values, 0);

        let rel = |a: f64, b: f64| (a - b).abs() / b.abs().max(1e-300);
        assert!(rel(online.mean(), m1) < 1e-9);
        assert!(rel(online.variance(0), v1) < 1e-9);
    }

    #[test]
    fn test_variance_ddof_selects_divisor() {
        let values = vec![1.0, 2.0, 3.0, 4.0];
        let pop = variance(&values, 0);
        let sample = variance(&values, 1);
        assert!((pop - 1.25).abs() < 1e-12);
        assert!((sample - 5.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_variance_degenerate_inputs() {
        assert_eq!(variance(&[], 0), 0.0);
        assert_eq!(variance(&[42.0], 1), 0.0);
    }

    #[test]
    fn test_correlation_self_is_one() {
        let values = vec![1.0, 3.0, 2.0, 5.0, 4.0];
        let r = correlation(&values, &values).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_correlation_flat_vector_is_zero() {
        let flat = vec![2.0; 5];
        let moving = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let r = correlation(&flat, &moving).unwrap();
        assert_eq!(r, 0.0);
        assert!(!r.is_nan());
    }

    #[test]
    fn test_percentile_endpoints_and_median() {
        let values = vec![7.0, 1.0, 5.0, 3.0, 9.0];
        assert_eq!(percentile(&values, 0.0).unwrap(), 1.0);
        assert_eq!(percentile(&values, 100.0).unwrap(), 9.0);
        assert_eq!(percentile(&values, 50.0).unwrap(), median(&values).unwrap());
        assert_eq!(median(&values).unwrap(), 5.0);
    }

    #[test]
    fn test_percentile_interpolates() {
        let values = vec![10.0, 20.0];
        assert!((percentile(&values, 25.0).unwrap() - 12.5).abs() < 1e-12);
    }

    #[test]
    fn test_percentile_out_of_range_fails() {
        assert!(percentile(&[1.0], 100.5).is_err());
        assert!(percentile(&[1.0], -0.1).is_err());
        assert!(quantile(&[1.0], 1.5).is_err());
    }

    #[test]
    fn test_rolling_sum_matches_naive() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let rolled = rolling_sum(&values, 3).unwrap();
        assert_eq!(rolled, vec![6.0, 9.0, 12.0]);
        let means = rolling_mean(&values, 3).unwrap();
        assert_eq!(means, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_rolling_window_bounds() {
        let values = vec![1.0, 2.0, 3.0];
        assert!(rolling_sum(&values, 0).is_err());
        assert!(rolling_sum(&values, 4).is_err());
        assert_eq!(rolling_sum(&values, 3).unwrap(), vec![6.0]);
    }

    #[test]
    fn test_z_score_flat_window() {
        let flat = vec![5.0; 4];
        let score = z_score(&flat, 10.0);
        assert_eq!(score.z, 0.0);
        assert_eq!(score.mean, 5.0);
    }

    #[test]
    fn test_z_score_positive_outlier() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let score = z_score(&values, 6.0);
        assert!(score.z > 0.0);
        assert!((score.mean - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_logistic_midpoint_and_symmetry() {
        assert!((logistic(0.0) - 0.5).abs() < 1e-12);
        assert!((logistic(2.0) + logistic(-2.0) - 1.0).abs() < 1e-12);
    }
}
