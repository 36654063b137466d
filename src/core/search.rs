use crate::core::filters::matches_filter;
use crate::models::{Entry, QueryFilter};

/// Tolerance used when a filter does not carry a usable one
pub const DEFAULT_TOLERANCE: f64 = 2.0;

/// Result of a catalog search
#[derive(Debug)]
pub struct SearchResult {
    pub entries: Vec<Entry>,
    pub total_candidates: usize,
}

/// Tolerance search over a catalog
///
/// Results keep catalog order. There is no ranking and no limit.
#[derive(Debug, Clone, Copy)]
pub struct Searcher {
    default_tolerance: f64,
}

impl Searcher {
    pub fn new(default_tolerance: f64) -> Self {
        let default_tolerance = if default_tolerance.is_finite() && default_tolerance >= 0.0 {
            default_tolerance
        } else {
            DEFAULT_TOLERANCE
        };
        Self { default_tolerance }
    }

    pub fn default_tolerance(&self) -> f64 {
        self.default_tolerance
    }

    /// Tolerance to apply for a filter
    ///
    /// Missing, negative or non-finite tolerances fall back to the default.
    /// Zero is kept and means exact match.
    pub fn effective_tolerance(&self, filter: &QueryFilter) -> f64 {
        match filter.tolerance {
            Some(t) if t.is_finite() && t >= 0.0 => t,
            _ => self.default_tolerance,
        }
    }

    /// Filter entries to those within tolerance on every dimension
    ///
    /// # Arguments
    /// * `entries` - The catalog, in display order
    /// * `filter` - Target measurements; `None` returns everything
    pub fn search(&self, entries: &[Entry], filter: Option<&QueryFilter>) -> SearchResult {
        let total_candidates = entries.len();

        let entries = match filter {
            None => entries.to_vec(),
            Some(filter) => {
                let tolerance = self.effective_tolerance(filter);
                entries
                    .iter()
                    .filter(|entry| matches_filter(&entry.measurements, filter, tolerance))
                    .cloned()
                    .collect()
            }
        };

        tracing::debug!(
            "Search returned {} of {} entries",
            entries.len(),
            total_candidates
        );

        SearchResult {
            entries,
            total_candidates,
        }
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Measurements;

    fn create_entry(id: &str, height: f64, bust: f64, waist: f64, hips: f64) -> Entry {
        Entry {
            id: id.to_string(),
            name: format!("Size Reference {}", id),
            image: "https://placehold.co/400x600".to_string(),
            affiliate_link: None,
            measurements: Measurements { height, bust, waist, hips },
        }
    }

    fn create_filter(tolerance: Option<f64>) -> QueryFilter {
        QueryFilter {
            height: 65.0,
            bust: 34.0,
            waist: 28.0,
            hips: 36.0,
            tolerance,
        }
    }

    #[test]
    fn test_search_basic() {
        let searcher = Searcher::default();
        let catalog = vec![
            create_entry("1", 65.0, 34.0, 28.0, 36.0),
            create_entry("2", 72.0, 40.0, 34.0, 42.0),
        ];

        let result = searcher.search(&catalog, Some(&create_filter(Some(2.0))));

        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.entries[0].id, "1");
        assert_eq!(result.total_candidates, 2);
    }

    #[test]
    fn test_no_filter_returns_catalog() {
        let searcher = Searcher::default();
        let catalog = vec![
            create_entry("1", 65.0, 34.0, 28.0, 36.0),
            create_entry("2", 72.0, 40.0, 34.0, 42.0),
        ];

        let result = searcher.search(&catalog, None);
        assert_eq!(result.entries, catalog);
    }

    #[test]
    fn test_preserves_catalog_order() {
        let searcher = Searcher::default();
        let catalog = vec![
            create_entry("c", 66.0, 34.0, 28.0, 36.0),
            create_entry("a", 65.0, 34.0, 28.0, 36.0),
            create_entry("b", 64.0, 35.0, 29.0, 37.0),
        ];

        let result = searcher.search(&catalog, Some(&create_filter(None)));
        let ids: Vec<&str> = result.entries.iter().map(|e| e.id.as_str()).collect();

        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_effective_tolerance() {
        let searcher = Searcher::default();

        assert_eq!(searcher.effective_tolerance(&create_filter(None)), 2.0);
        assert_eq!(searcher.effective_tolerance(&create_filter(Some(-1.0))), 2.0);
        assert_eq!(searcher.effective_tolerance(&create_filter(Some(f64::NAN))), 2.0);
        assert_eq!(searcher.effective_tolerance(&create_filter(Some(0.0))), 0.0);
        assert_eq!(searcher.effective_tolerance(&create_filter(Some(4.5))), 4.5);
    }

    #[test]
    fn test_configured_default_tolerance() {
        let searcher = Searcher::new(5.0);
        let catalog = vec![create_entry("1", 69.0, 34.0, 28.0, 36.0)];

        assert_eq!(searcher.search(&catalog, Some(&create_filter(None))).entries.len(), 1);
        assert_eq!(Searcher::new(-3.0).default_tolerance(), DEFAULT_TOLERANCE);
    }
}
