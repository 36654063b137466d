use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{Measurements, QueryFilter};

/// Query string for the friends search endpoint
///
/// All fields are optional. When none of the four dimensions is present
/// the request means "no filter".
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SearchQuery {
    #[validate(range(min = 0.0, max = 200.0))]
    pub height: Option<f64>,
    #[validate(range(min = 0.0, max = 200.0))]
    pub bust: Option<f64>,
    #[validate(range(min = 0.0, max = 200.0))]
    pub waist: Option<f64>,
    #[validate(range(min = 0.0, max = 200.0))]
    pub hips: Option<f64>,
    pub tolerance: Option<f64>,
}

impl SearchQuery {
    pub fn has_dimensions(&self) -> bool {
        self.height.is_some() || self.bust.is_some() || self.waist.is_some() || self.hips.is_some()
    }

    /// Build a filter, treating missing dimensions as 0
    pub fn to_filter(&self) -> Option<QueryFilter> {
        if !self.has_dimensions() {
            return None;
        }

        let target = Measurements {
            height: self.height.unwrap_or(0.0),
            bust: self.bust.unwrap_or(0.0),
            waist: self.waist.unwrap_or(0.0),
            hips: self.hips.unwrap_or(0.0),
        };

        Some(QueryFilter::new(target, self.tolerance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_has_no_filter() {
        let query = SearchQuery { tolerance: Some(3.0), ..Default::default() };
        assert!(query.to_filter().is_none());
    }

    #[test]
    fn test_partial_query_defaults_to_zero() {
        let query = SearchQuery { height: Some(65.0), ..Default::default() };
        let filter = query.to_filter().unwrap();

        assert_eq!(filter.height, 65.0);
        assert_eq!(filter.bust, 0.0);
        assert_eq!(filter.tolerance, None);
    }

    #[test]
    fn test_out_of_range_dimension_fails_validation() {
        let query = SearchQuery { waist: Some(500.0), ..Default::default() };
        assert!(query.validate().is_err());

        let query = SearchQuery { waist: Some(28.0), ..Default::default() };
        assert!(query.validate().is_ok());
    }
}
