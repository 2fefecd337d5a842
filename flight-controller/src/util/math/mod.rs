pub mod vectors;

/// Clamps `value` to `[-bound, bound]`. A negative bound is treated as its
/// magnitude and NaN bounds collapse to zero, so this never panics.
pub fn limit(value: f64, bound: f64) -> f64 {
    let bound = libm::fabs(bound);
    let bound = if bound.is_nan() { 0.0 } else { bound };
    value.max(-bound).min(bound)
}
