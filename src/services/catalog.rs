use crate::core::normalize::{columns, Normalizer, RawRow};
use crate::models::Catalog;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading the catalog source
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to open catalog source {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read catalog source: {0}")]
    Read(#[from] csv::Error),

    #[error("Catalog load task failed: {0}")]
    Task(String),
}

/// Read a delimited source into raw rows
///
/// Columns are mapped by header. Fields and headers are trimmed, empty
/// values are dropped, and records that fail to parse are skipped. Only
/// I/O failures abort the read.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<RawRow>, CatalogError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .quote(b'"')
        .double_quote(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for (index, result) in csv_reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(CatalogError::Read(e)),
            Err(e) => {
                tracing::debug!("Skipping malformed record {}: {}", index + 1, e);
                skipped += 1;
                continue;
            }
        };

        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .filter(|(key, value)| !key.is_empty() && !value.is_empty())
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        if !row.is_empty() {
            rows.push(row);
        }
    }

    if skipped > 0 {
        tracing::warn!("Skipped {} malformed records", skipped);
    }

    Ok(rows)
}

/// Loads the catalog from a CSV file
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    path: PathBuf,
    normalizer: Normalizer,
}

impl CatalogLoader {
    pub fn new(path: impl Into<PathBuf>, normalizer: Normalizer) -> Self {
        Self {
            path: path.into(),
            normalizer,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and normalize the whole source
    ///
    /// Fails only if the source cannot be opened or read. Invalid rows are
    /// dropped; an empty catalog is a valid result.
    pub fn load(&self) -> Result<Catalog, CatalogError> {
        let file = File::open(&self.path).map_err(|source| CatalogError::Open {
            path: self.path.clone(),
            source,
        })?;

        let rows = read_rows(BufReader::new(file))?;
        Ok(self.build_catalog(rows))
    }

    /// Normalize already-read rows, keeping source order
    pub fn build_catalog(&self, rows: Vec<RawRow>) -> Catalog {
        let source_rows = rows.len();
        tracing::info!("Processing {} records", source_rows);

        if let Some(sample) = rows.first() {
            tracing::debug!(
                height = ?sample.get(columns::HEIGHT),
                bust = ?sample.get(columns::BUST),
                waist = ?sample.get(columns::WAIST),
                hips = ?sample.get(columns::HIPS),
                "Sample record"
            );
        }

        let entries: Vec<_> = rows
            .iter()
            .enumerate()
            .filter_map(|(index, row)| self.normalizer.normalize(row, index + 1))
            .collect();

        tracing::info!("Found {} valid friends", entries.len());
        if let Some(sample) = entries.first() {
            tracing::debug!("Sample valid friend: {:?}", sample);
        }

        Catalog::new(entries, source_rows)
    }
}
