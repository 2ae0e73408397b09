use crate::error::NumericsError;

/// Divisors with magnitude below this are treated as zero.
pub const DIVISION_EPSILON: f64 = 1e-15;

/// All two-operand functions require equal lengths.
pub(crate) fn check_lengths(a: &[f64], b: &[f64]) -> Result<(), NumericsError> {
    if a.len() != b.len() {
        return Err(NumericsError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(())
}

/// Element-wise addition of two equal-length vectors.
pub fn add(a: &[f64], b: &[f64]) -> Result<Vec<f64>, NumericsError> {
    check_lengths(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x + y).collect())
}

/// Element-wise subtraction (`a - b`) of two equal-length vectors.
pub fn subtract(a: &[f64], b: &[f64]) -> Result<Vec<f64>, NumericsError> {
    check_lengths(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x - y).collect())
}

/// Element-wise multiplication of two equal-length vectors.
pub fn multiply(a: &[f64], b: &[f64]) -> Result<Vec<f64>, NumericsError> {
    check_lengths(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x * y).collect())
}

/// Element-wise division (`a / b`) of two equal-length vectors.
///
/// A divisor with magnitude below [`DIVISION_EPSILON`] yields `0.0` for that
/// element. Near-zero divisors occur routinely in legitimate data (flat
/// prices, zero-volume bars) and must not abort a batch computation.
pub fn divide(a: &[f64], b: &[f64]) -> Result<Vec<f64>, NumericsError> {
    check_lengths(a, b)?;
    Ok(a.iter()
        .zip(b)
        .map(|(x, y)| if y.abs() < DIVISION_EPSILON { 0.0 } else { x / y })
        .collect())
}

/// Adds a scalar to every element.
pub fn scalar_add(v: &[f64], scalar: f64) -> Vec<f64> {
    v.iter().map(|x| x + scalar).collect()
}

/// Multiplies every element by a scalar.
pub fn scalar_multiply(v: &[f64], scalar: f64) -> Vec<f64> {
    v.iter().map(|x| x * scalar).collect()
}

/// Divides every element by a scalar.
///
/// Unlike the element-wise [`divide`], a near-zero scalar fails the whole
/// call: the caller chose a single divisor, so a degenerate one is a bug at
/// the call site rather than a data artifact.
pub fn scalar_divide(v: &[f64], scalar: f64) -> Result<Vec<f64>, NumericsError> {
    if scalar.abs() < DIVISION_EPSILON {
        return Err(NumericsError::DivisionByZero(scalar));
    }
    Ok(v.iter().map(|x| x / scalar).collect())
}

/// True when every element is finite (no NaN, no infinities).
pub fn is_finite(v: &[f64]) -> bool {
    v.iter().all(|x| x.is_finite())
}

/// True when at least one element is NaN.
pub fn has_nan(v: &[f64]) -> bool {
    v.iter().any(|x| x.is_nan())
}

/// Returns a copy with every NaN element replaced by `fill`.
pub fn replace_nan(v: &[f64], fill: f64) -> Vec<f64> {
    v.iter().map(|x| if x.is_nan() { fill } else { *x }).collect()
}

/// Element-wise equality within an absolute tolerance.
///
/// NaN compares unequal to everything, including itself.
pub fn approx_equal(a: &[f64], b: &[f64], tolerance: f64) -> Result<bool, NumericsError> {
    check_lengths(a, b)?;
    Ok(a.iter().zip(b).all(|(x, y)| (x - y).abs() <= tolerance))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_subtract_are_inverses() {
        let a = vec![1.5, -2.25, 1e12, 3.0e-9];
        let b = vec![0.5, 4.0, -1e11, 7.0];
        let sum = add(&a, &b).unwrap();
        let back = subtract(&sum, &b).unwrap();
        assert!(approx_equal(&a, &back, 1e-9).unwrap());
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let err = add(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert_eq!(err, NumericsError::LengthMismatch { left: 2, right: 1 });
    }

    #[test]
    fn test_divide_degrades_near_zero_elements() {
        let out = divide(&[10.0, 5.0, 3.0], &[2.0, 1e-16, 0.0]).unwrap();
        assert_eq!(out, vec![5.0, 0.0, 0.0]);
    }

    #[test]
    fn test_scalar_divide_near_zero_fails() {
        let err = scalar_divide(&[1.0, 2.0], 1e-16).unwrap_err();
        assert!(matches!(err, NumericsError::DivisionByZero(_)));
    }

    #[test]
    fn test_scalar_ops() {
        assert_eq!(scalar_add(&[1.0, 2.0], 1.5), vec![2.5, 3.5]);
        assert_eq!(scalar_multiply(&[1.0, 2.0], -2.0), vec![-2.0, -4.0]);
        assert_eq!(scalar_divide(&[4.0, 2.0], 2.0).unwrap(), vec![2.0, 1.0]);
    }

    #[test]
    fn test_nan_predicates_and_replacement() {
        let v = vec![1.0, f64::NAN, 3.0];
        assert!(has_nan(&v));
        assert!(!is_finite(&v));
        assert_eq!(replace_nan(&v, 0.0), vec![1.0, 0.0, 3.0]);
        assert!(is_finite(&replace_nan(&v, 0.0)));
    }

    #[test]
    fn test_multiply_elementwise() {
        let out = multiply(&[2.0, 3.0], &[4.0, -1.0]).unwrap();
        assert_eq!(out, vec![8.0, -3.0]);
    }
}
