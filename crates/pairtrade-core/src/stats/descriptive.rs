//! Descriptive statistics over f64 slices.

/// Arithmetic mean. Zero for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n − 1 denominator). Zero below two elements.
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let avg = mean(values);
    let var = values.iter().map(|v| (v - avg) * (v - avg)).sum::<f64>()
        / (values.len() - 1) as f64;
    var.sqrt()
}

/// One-period percentage changes.
///
/// Element t is `(p[t] − p[t−1]) / p[t−1]`; the first period has no prior
/// observation and is carried as 0.0 so the output stays index-aligned with
/// the input.
pub fn pct_change(prices: &[f64]) -> Vec<f64> {
    let mut changes = Vec::with_capacity(prices.len());
    if !prices.is_empty() {
        changes.push(0.0);
    }
    for w in prices.windows(2) {
        changes.push((w[1] - w[0]) / w[0]);
    }
    changes
}

/// Pearson correlation coefficient. NaN-free: returns 0.0 when either
/// series has zero variance.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return 0.0;
    }
    let mean_x = mean(&x[..n]);
    let mean_y = mean(&y[..n]);

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for i in 0..n {
        let dx = x[i] - mean_x;
        let dy = y[i] - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        0.0
    } else {
        cov / denom
    }
}
