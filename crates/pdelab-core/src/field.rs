//! Dense grid-valued storage and the whole-field reductions the solvers use.

use ndarray::{Array2, Zip};

/// A dense `nx × ny` real-valued array indexed by grid position `[[i, j]]`.
pub type Field = Array2<f64>;

/// `true` if every value is finite.
pub fn all_finite(field: &Field) -> bool {
    field.iter().all(|v| v.is_finite())
}

/// `max |a - b|` over all points. Both fields must have the same shape.
///
/// # Panics
///
/// Panics if the shapes differ.
pub fn max_abs_diff(a: &Field, b: &Field) -> f64 {
    Zip::from(a)
        .and(b)
        .fold(0.0f64, |acc, &x, &y| acc.max((x - y).abs()))
}

/// `(min, max)` over all points.
pub fn min_max(field: &Field) -> (f64, f64) {
    field
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// `max - min` over all points.
pub fn spread(field: &Field) -> f64 {
    let (lo, hi) = min_max(field);
    hi - lo
}
