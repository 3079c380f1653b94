//! One-dimensional linear interpolation.

/// The `index`-th of `count` evenly spaced values from `start` to `end`.
///
/// The first value is exactly `start` and the last is exactly `end`; when
/// `start == end` every value is exactly `start`. For `count < 2` the only
/// value is `start`.
#[inline]
#[must_use]
pub fn lerp_at(start: f64, end: f64, index: usize, count: usize) -> f64 {
    if count < 2 || index == 0 {
        return start;
    }
    if index + 1 == count {
        return end;
    }
    #[allow(clippy::cast_precision_loss)]
    let step = (end - start) / (count - 1) as f64;
    #[allow(clippy::cast_precision_loss)]
    let offset = step * index as f64;
    start + offset
}

/// `count` evenly spaced values from `start` to `end`, both included.
///
/// # Examples
///
/// ```
/// use ffd_grid::linspace;
///
/// assert_eq!(linspace(0.0, 2.0, 3), vec![0.0, 1.0, 2.0]);
/// assert_eq!(linspace(-1.0, 1.0, 2), vec![-1.0, 1.0]);
/// ```
#[must_use]
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    (0..count).map(|i| lerp_at(start, end, i, count)).collect()
}
