use serde::{Deserialize, Serialize};

/// Body measurements in inches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    pub height: f64,
    pub bust: f64,
    pub waist: f64,
    pub hips: f64,
}

/// One catalog record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub name: String,
    pub image: String,
    #[serde(rename = "vigLink", default, skip_serializing_if = "Option::is_none")]
    pub affiliate_link: Option<String>,
    pub measurements: Measurements,
}

/// Target measurements for a tolerance search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryFilter {
    pub height: f64,
    pub bust: f64,
    pub waist: f64,
    pub hips: f64,
    #[serde(default)]
    pub tolerance: Option<f64>,
}

impl QueryFilter {
    pub fn new(target: Measurements, tolerance: Option<f64>) -> Self {
        Self {
            height: target.height,
            bust: target.bust,
            waist: target.waist,
            hips: target.hips,
            tolerance,
        }
    }
}

/// Inclusive plausible range for a single measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Per-attribute validation policy
///
/// Attributes missing from a deserialized value keep their default range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasurementRanges {
    pub height: Range,
    pub bust: Range,
    pub waist: Range,
    pub hips: Range,
}

impl Default for MeasurementRanges {
    fn default() -> Self {
        Self {
            height: Range::new(50.0, 80.0),
            bust: Range::new(25.0, 55.0),
            waist: Range::new(18.0, 50.0),
            hips: Range::new(25.0, 60.0),
        }
    }
}

/// Loaded, normalized catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub entries: Vec<Entry>,
    #[serde(rename = "sourceRows")]
    pub source_rows: usize,
    #[serde(rename = "loadedAt")]
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

impl Catalog {
    pub fn new(entries: Vec<Entry>, source_rows: usize) -> Self {
        Self {
            entries,
            source_rows,
            loaded_at: chrono::Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
