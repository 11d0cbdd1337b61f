//! Probability vector utilities
//!
//! Helpers for building, normalizing and summarising discrete distributions
//! stored as plain `f64` slices indexed by state.

/// Uniform distribution over `n` states
///
/// Returns an empty vector when `n == 0`.
#[inline]
pub fn uniform(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    vec![1.0 / n as f64; n]
}

/// Normalize `values` in place so they sum to one
///
/// Returns the pre-normalization total on success. When the total is zero or
/// not finite the slice is left untouched and `None` is returned, so the
/// caller decides how to surface the degenerate case.
pub fn normalize_in_place(values: &mut [f64]) -> Option<f64> {
    let total: f64 = values.iter().sum();
    if total == 0.0 || !total.is_finite() {
        return None;
    }
    values.iter_mut().for_each(|v| *v /= total);
    Some(total)
}

/// Index of the largest entry
///
/// Ties resolve to the lowest index. Returns `None` for an empty slice.
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, best_v)) if v <= best_v => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Whether `values` is a probability distribution within `tolerance`
///
/// Every entry must be finite and lie in `[0, 1]`, and the entries must sum
/// to one within `tolerance`.
pub fn is_distribution(values: &[f64], tolerance: f64) -> bool {
    let in_range = values
        .iter()
        .all(|v| v.is_finite() && *v >= 0.0 && *v <= 1.0 + tolerance);
    let total: f64 = values.iter().sum();
    in_range && (total - 1.0).abs() <= tolerance
}
