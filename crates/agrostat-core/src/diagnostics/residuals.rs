//! Residual-based statistics shared by the normality tests

/// Biased central moments (m2, m3, m4) of finite values
///
/// Returns `None` for empty input.
pub fn central_moments(data: &[f64]) -> Option<(f64, f64, f64)> {
    let clean: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
    if clean.is_empty() {
        return None;
    }
    let n = clean.len() as f64;
    let mean = clean.iter().sum::<f64>() / n;

    let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
    for &x in &clean {
        let d = x - mean;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }
    Some((m2 / n, m3 / n, m4 / n))
}

/// Sample skewness (biased). NaN for constant data.
pub fn skewness(data: &[f64]) -> f64 {
    match central_moments(data) {
        Some((m2, m3, _)) if m2 > 0.0 => m3 / m2.powf(1.5),
        _ => f64::NAN,
    }
}

/// Pearson kurtosis (biased, 3 for a normal distribution). NaN for constant data.
pub fn kurtosis(data: &[f64]) -> f64 {
    match central_moments(data) {
        Some((m2, _, m4)) if m2 > 0.0 => m4 / (m2 * m2),
        _ => f64::NAN,
    }
}

/// Durbin-Watson statistic: sum of squared successive differences over the
/// residual sum of squares. Values near 2 indicate no first-order autocorrelation.
pub fn durbin_watson(residuals: &[f64]) -> f64 {
    let ssr: f64 = residuals.iter().map(|e| e * e).sum();
    if ssr == 0.0 {
        return f64::NAN;
    }
    let diff: f64 = residuals.windows(2).map(|w| (w[1] - w[0]).powi(2)).sum();
    diff / ssr
}
