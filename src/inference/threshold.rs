//! Noise tolerance for the numeric classifier.

/// Maximum fraction of unparseable values a column of `num_values` rows may contain and
/// still be classified numeric:
///
/// `log(num_values) / log(num_values * multiplier)`
///
/// Returns `None` when the formula is degenerate: `num_values <= 1` (numerator is zero or
/// undefined) or `multiplier` is not a finite value greater than 1. For any `num_values > 1`
/// and `multiplier > 1` the result lies strictly between 0 and 1.
///
/// ```
/// use rust_type_inference::inference::threshold::logarithmic_threshold;
///
/// let t = logarithmic_threshold(1000, 3.0).unwrap();
/// assert!((t - 3.0 / 3000f64.log10()).abs() < 1e-12);
/// assert_eq!(logarithmic_threshold(1, 3.0), None);
/// ```
pub fn logarithmic_threshold(num_values: usize, multiplier: f64) -> Option<f64> {
    if num_values <= 1 || !multiplier.is_finite() || multiplier <= 1.0 {
        return None;
    }
    let n = num_values as f64;
    Some(n.log10() / (n * multiplier).log10())
}
