//! CSV loading for the item table.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info, warn};

use super::Dataset;
use crate::codec::decode_embedding;
use crate::error::{CinesimError, Result};
use crate::types::item::dedup_in_order;
use crate::types::{Item, ItemMetadata, MediaType};

/// Columns the engine cannot work without.
pub const REQUIRED_COLUMNS: &[&str] = &["title", "genre_ids", "media_type", "embedding"];

/// One CSV row as stored by the ingestion step. Every field is kept as
/// text so a single odd value never fails the whole row.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRecord {
    id: Option<String>,
    title: Option<String>,
    original_title: Option<String>,
    overview: Option<String>,
    release_date: Option<String>,
    genre_ids: Option<String>,
    original_language: Option<String>,
    popularity: Option<String>,
    vote_average: Option<String>,
    vote_count: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    adult: Option<String>,
    video: Option<String>,
    media_type: Option<String>,
    genres: Option<String>,
    embedding: Option<String>,
}

/// Row accounting for a single load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Data rows encountered (header excluded).
    pub rows_read: usize,
    /// Rows that made it into the dataset.
    pub kept: usize,
    /// Rows with a null/missing embedding.
    pub missing_embedding: usize,
    /// Rows whose embedding failed to decode.
    pub malformed_embedding: usize,
    /// Rows whose embedding length disagreed with the first kept row.
    pub dimension_mismatch: usize,
    /// Rows with no title, an unknown media type or a broken record.
    pub invalid: usize,
}

impl LoadReport {
    /// Total rows left out of the dataset.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.missing_embedding + self.malformed_embedding + self.dimension_mismatch + self.invalid
    }
}

/// Loads the item table from a CSV file.
///
/// # Errors
///
/// Returns `CinesimError::DataLoad` if the file is missing or unreadable,
/// lacks a required column, or fails mid-read. Individual bad rows are
/// dropped with a warning instead.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| CinesimError::data_load(path, e))?;
    let (dataset, report) = read_dataset(file, path)?;

    info!(
        path = %path.display(),
        kept = report.kept,
        dropped = report.dropped(),
        dimension = dataset.dimension().unwrap_or(0),
        "loaded dataset"
    );
    Ok(dataset)
}

/// Reads the item table from any CSV source. `source` is only used in
/// error messages and logs.
///
/// # Errors
///
/// See [`load_dataset`].
pub fn read_dataset<R: Read>(reader: R, source: &Path) -> Result<(Dataset, LoadReport)> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| CinesimError::data_load(source, e))?
        .clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *column) {
            return Err(CinesimError::data_load(
                source,
                format!("missing required column {column:?}"),
            ));
        }
    }

    let mut report = LoadReport::default();
    let mut items: Vec<Item> = Vec::new();
    let mut dimension: Option<usize> = None;

    for (row, record) in rdr.deserialize::<RawRecord>().enumerate() {
        report.rows_read += 1;

        let record = match record {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(CinesimError::data_load(source, e)),
            Err(e) => {
                warn!(row, error = %e, "skipping unreadable record");
                report.invalid += 1;
                continue;
            }
        };

        let Some(raw_embedding) = record.embedding.as_deref() else {
            report.missing_embedding += 1;
            continue;
        };

        let embedding = match decode_embedding(raw_embedding) {
            Ok(embedding) => embedding,
            Err(e) => {
                let title = record.title.as_deref().unwrap_or("");
                warn!(row, title, error = %e, "dropping row");
                report.malformed_embedding += 1;
                continue;
            }
        };

        let Some(item) = into_item(row, record, embedding) else {
            report.invalid += 1;
            continue;
        };

        let expected = *dimension.get_or_insert(item.embedding.len());
        if item.embedding.len() != expected {
            warn!(
                row,
                title = %item.title,
                expected,
                found = item.embedding.len(),
                "dropping row with mismatched embedding dimension"
            );
            report.dimension_mismatch += 1;
            continue;
        }

        items.push(item);
    }

    if report.missing_embedding > 0 {
        debug!(rows = report.missing_embedding, "rows without embeddings skipped");
    }

    report.kept = items.len();
    Ok((Dataset::new(items), report))
}

fn into_item(row: usize, record: RawRecord, embedding: Vec<f32>) -> Option<Item> {
    let title = record
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());
    let Some(title) = title else {
        warn!(row, "dropping row without a title");
        return None;
    };

    let media_type = match record.media_type.as_deref().map(str::parse::<MediaType>) {
        Some(Ok(media_type)) => media_type,
        Some(Err(e)) => {
            warn!(row, title = %title, error = %e, "dropping row");
            return None;
        }
        None => {
            warn!(row, title = %title, "dropping row without a media type");
            return None;
        }
    };

    let genre_ids = parse_genre_ids(record.genre_ids.as_deref()).unwrap_or_else(|| {
        warn!(row, title = %title, "unreadable genre_ids; treating as empty");
        Vec::new()
    });

    Some(Item {
        id: record.id.unwrap_or_default(),
        title,
        media_type,
        genre_ids,
        overview: record.overview,
        embedding,
        metadata: ItemMetadata {
            original_title: record.original_title,
            release_date: record.release_date,
            original_language: record.original_language,
            popularity: parse_f64(record.popularity.as_deref()),
            vote_average: parse_f64(record.vote_average.as_deref()),
            vote_count: parse_count(record.vote_count.as_deref()),
            poster_path: record.poster_path,
            backdrop_path: record.backdrop_path,
            adult: parse_bool(record.adult.as_deref()),
            video: parse_bool(record.video.as_deref()),
            genres: record.genres,
        },
    })
}

/// Parses a JSON-encoded int array, keeping source order and dropping
/// repeats. A missing field is an empty list; `None` means the field is
/// present but unreadable.
fn parse_genre_ids(raw: Option<&str>) -> Option<Vec<u32>> {
    match raw.map(str::trim) {
        None | Some("") => Some(Vec::new()),
        Some(s) => serde_json::from_str::<Vec<u32>>(s).ok().map(dedup_in_order),
    }
}

fn parse_f64(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_count(raw: Option<&str>) -> Option<u64> {
    let raw = raw?.trim();
    raw.parse::<u64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0)
            .map(|v| v as u64)
    })
}

fn parse_bool(raw: Option<&str>) -> Option<bool> {
    match raw?.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
