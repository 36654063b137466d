//! SizeRef - measurement-based size reference catalog
//!
//! This library loads a CSV catalog of size references, normalizes the
//! loosely formatted measurement fields, and filters the catalog by
//! per-dimension tolerance.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{extract_height_inches, extract_numeric_value, AffiliateLinker, Normalizer, Searcher};
pub use models::{Catalog, Entry, MeasurementRanges, Measurements, QueryFilter};
pub use services::{CatalogCache, CatalogError, CatalogLoader};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        assert_eq!(extract_numeric_value("34DD"), Some(34.0));
        assert_eq!(extract_height_inches("5'7\""), Some(67.0));
    }
}
