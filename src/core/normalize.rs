use std::collections::HashMap;

use crate::core::{
    affiliate::AffiliateLinker,
    parser::{extract_height_inches, extract_numeric_value},
};
use crate::models::{Entry, MeasurementRanges};

/// One source row: header name to trimmed, non-empty value
pub type RawRow = HashMap<String, String>;

/// Recognized source columns
pub mod columns {
    pub const ID: &str = "RandID";
    pub const NAME: &str = "Name";
    pub const HEIGHT: &str = "Height";
    pub const BUST: &str = "Bust";
    pub const WAIST: &str = "Waist";
    pub const HIPS: &str = "Hips";
    pub const IMAGE: &str = "BigImage";
    pub const IMAGE_LEGACY: &str = "BigImage_legacy";
    pub const AFFILIATE: &str = "VigLink";
}

pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://placehold.co/400x600";
pub const DEFAULT_NAME_PREFIX: &str = "Size Reference";

/// Turns raw rows into catalog entries
#[derive(Debug, Clone)]
pub struct Normalizer {
    ranges: MeasurementRanges,
    linker: AffiliateLinker,
    placeholder_image: String,
    name_prefix: String,
}

impl Normalizer {
    pub fn new(
        ranges: MeasurementRanges,
        linker: AffiliateLinker,
        placeholder_image: impl Into<String>,
        name_prefix: impl Into<String>,
    ) -> Self {
        Self {
            ranges,
            linker,
            placeholder_image: placeholder_image.into(),
            name_prefix: name_prefix.into(),
        }
    }

    /// Normalize one row
    ///
    /// `row_number` is the 1-based position of the row in the source and is
    /// used for the synthesized display name.
    ///
    /// # Returns
    /// `None` if any measurement is missing, unparseable or out of range
    pub fn normalize(&self, row: &RawRow, row_number: usize) -> Option<Entry> {
        let measurements = self.ranges.validate(
            field(row, columns::HEIGHT).and_then(extract_height_inches),
            field(row, columns::BUST).and_then(extract_numeric_value),
            field(row, columns::WAIST).and_then(extract_numeric_value),
            field(row, columns::HIPS).and_then(extract_numeric_value),
        )?;

        let id = field(row, columns::ID)
            .map(str::to_string)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let name = field(row, columns::NAME)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} {}", self.name_prefix, row_number));

        let image = field(row, columns::IMAGE)
            .or_else(|| field(row, columns::IMAGE_LEGACY))
            .unwrap_or(self.placeholder_image.as_str())
            .to_string();

        let affiliate_link = field(row, columns::AFFILIATE).map(|url| self.linker.wrap(url));

        Some(Entry {
            id,
            name,
            image,
            affiliate_link,
            measurements,
        })
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(
            MeasurementRanges::default(),
            AffiliateLinker::default(),
            DEFAULT_PLACEHOLDER_IMAGE,
            DEFAULT_NAME_PREFIX,
        )
    }
}

/// Trimmed, non-empty field value
fn field<'a>(row: &'a RawRow, column: &str) -> Option<&'a str> {
    row.get(column)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}
