// Core algorithm exports
pub mod affiliate;
pub mod filters;
pub mod normalize;
pub mod parser;
pub mod search;
pub mod validation;

pub use affiliate::AffiliateLinker;
pub use filters::{matches_filter, within_tolerance};
pub use normalize::{Normalizer, RawRow};
pub use parser::{extract_height_inches, extract_numeric_value};
pub use search::{SearchResult, Searcher, DEFAULT_TOLERANCE};
