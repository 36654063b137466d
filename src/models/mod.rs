// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Catalog, Entry, MeasurementRanges, Measurements, QueryFilter, Range};
pub use requests::SearchQuery;
pub use responses::{ErrorResponse, FriendsResponse, HealthResponse};
