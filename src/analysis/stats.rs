// ---------------------------------------------------------------------------
// Order statistics over price samples
// ---------------------------------------------------------------------------

/// Median of the samples; even-length inputs average the two middle values.
pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

/// The `q`-th quantile (0.0 to 1.0) using linear interpolation between the
/// closest ranks, matching `pd.Series.quantile(q)`.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        Some(sorted[lower])
    } else {
        let frac = pos - lower as f64;
        Some(lerp(sorted[lower], sorted[upper], frac))
    }
}

/// Interpolate from the nearer endpoint, as numpy does, so equal endpoints
/// come back exactly.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let diff = b - a;
    if t >= 0.5 {
        b - diff * (1.0 - t)
    } else {
        a + diff * t
    }
}

/// `Q75 − Q25` of the samples.
pub fn interquartile_range(values: &[f64]) -> Option<f64> {
    Some(quantile(values, 0.75)? - quantile(values, 0.25)?)
}
