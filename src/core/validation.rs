use crate::models::{MeasurementRanges, Measurements, Range};

/// Check a single candidate against its range
#[inline]
fn check(value: Option<f64>, range: &Range) -> Option<f64> {
    value.filter(|v| v.is_finite() && range.contains(*v))
}

impl MeasurementRanges {
    /// Assemble validated measurements
    ///
    /// All four candidates must be present and within range; otherwise
    /// nothing is produced.
    pub fn validate(
        &self,
        height: Option<f64>,
        bust: Option<f64>,
        waist: Option<f64>,
        hips: Option<f64>,
    ) -> Option<Measurements> {
        Some(Measurements {
            height: check(height, &self.height)?,
            bust: check(bust, &self.bust)?,
            waist: check(waist, &self.waist)?,
            hips: check(hips, &self.hips)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_measurements() {
        let ranges = MeasurementRanges::default();
        let m = ranges.validate(Some(65.0), Some(34.0), Some(28.0), Some(36.0)).unwrap();

        assert_eq!(m.height, 65.0);
        assert_eq!(m.hips, 36.0);
    }

    #[test]
    fn test_short_height_rejects_everything() {
        let ranges = MeasurementRanges::default();
        assert!(ranges.validate(Some(49.0), Some(34.0), Some(28.0), Some(36.0)).is_none());
    }

    #[test]
    fn test_missing_value_rejects() {
        let ranges = MeasurementRanges::default();
        assert!(ranges.validate(Some(65.0), None, Some(28.0), Some(36.0)).is_none());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let ranges = MeasurementRanges::default();
        assert!(ranges.validate(Some(50.0), Some(55.0), Some(18.0), Some(60.0)).is_some());
        assert!(ranges.validate(Some(80.0), Some(25.0), Some(50.0), Some(60.1)).is_none());
    }

    #[test]
    fn test_custom_ranges() {
        let ranges = MeasurementRanges {
            height: Range::new(40.0, 90.0),
            ..MeasurementRanges::default()
        };
        assert!(ranges.validate(Some(45.0), Some(34.0), Some(28.0), Some(36.0)).is_some());
    }
}
