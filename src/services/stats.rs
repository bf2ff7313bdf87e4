//! Small descriptive statistics helpers shared by the plotting services.
//!
//! All helpers are total over their input: an empty slice yields 0.0, which
//! callers guard against where the distinction matters.

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Standard error of the mean, with the sample (n-1) variance. Fewer than
/// two samples carry no spread information and yield 0.0.
pub fn sem(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values
        .iter()
        .map(|v| {
            let diff = v - m;
            diff * diff
        })
        .sum::<f64>()
        / (n - 1) as f64;
    (variance / n as f64).sqrt()
}

/// Median via linear-interpolated quantile.
pub fn median(values: &[f64]) -> f64 {
    quantile(values, 0.5)
}

/// Linear-interpolated quantile, `q` in [0, 1].
pub fn quantile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let low = position.floor() as usize;
    let fraction = position - low as f64;
    if low + 1 < sorted.len() {
        sorted[low] + fraction * (sorted[low + 1] - sorted[low])
    } else {
        sorted[low]
    }
}
