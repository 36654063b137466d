use crate::models::{Measurements, QueryFilter};

/// Check a single dimension against its target
#[inline]
pub fn within_tolerance(value: f64, target: f64, tolerance: f64) -> bool {
    (value - target).abs() <= tolerance
}

/// Check all four dimensions against the filter
///
/// `tolerance` is the already-resolved tolerance; the filter's own
/// tolerance field is not consulted here.
#[inline]
pub fn matches_filter(
    measurements: &Measurements,
    filter: &QueryFilter,
    tolerance: f64,
) -> bool {
    within_tolerance(measurements.height, filter.height, tolerance)
        && within_tolerance(measurements.bust, filter.bust, tolerance)
        && within_tolerance(measurements.waist, filter.waist, tolerance)
        && within_tolerance(measurements.hips, filter.hips, tolerance)
}
