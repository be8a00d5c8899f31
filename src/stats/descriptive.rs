//! Descriptive statistics over plain slices

/// Relative tolerance below which a standard deviation counts as zero.
///
/// Scaled by the largest magnitude in the sample, so a window of returns that
/// only differ by rounding has no spread while a genuinely tiny sample keeps
/// its statistics.
pub const ZERO_STD: f64 = 1e-12;

/// Arithmetic mean, `None` for an empty slice
///
/// Accumulated as offsets from the first value, so a constant sample returns
/// that value exactly.
pub fn mean(values: &[f64]) -> Option<f64> {
    let (&first, _) = values.split_first()?;
    let n = values.len() as f64;
    Some(first + values.iter().map(|v| v - first).sum::<f64>() / n)
}

/// Sample standard deviation with Bessel's correction, `None` below two values
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let first = values[0];
    let n = values.len() as f64;
    let offset = values.iter().map(|v| v - first).sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|v| (v - first - offset).powi(2))
        .sum::<f64>()
        / (n - 1.0);
    Some(variance.sqrt())
}

/// Whether `std`, measured over `values`, is too small to divide by
pub fn is_zero_std(std: f64, values: &[f64]) -> bool {
    let magnitude = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    !std.is_finite() || std <= ZERO_STD * magnitude
}
