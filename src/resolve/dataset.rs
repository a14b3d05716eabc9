//! Offline resolver backed by a worldcities-style CSV dataset.
//!
//! The dataset is fetched and parsed once per resolver instance, then every
//! lookup is a linear scan over the cached rows. A failed fetch leaves the
//! cache unloaded so a later call can retry; a successfully loaded dataset
//! is never refetched, even if empty.

use super::types::{CoordinatesSource, ResolveError};
use crate::geo::Coordinates;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Where the dataset text comes from.
#[derive(Debug, Clone)]
pub enum DatasetSource {
    /// The CSV bundled into the binary.
    Embedded,
    /// A CSV file on disk.
    Path(PathBuf),
    /// A CSV fetched over HTTP.
    Url(String),
}

impl DatasetSource {
    fn fetch_text(&self) -> Result<String, ResolveError> {
        match self {
            Self::Embedded => Ok(include_str!("../../data/worldcities.csv").to_string()),
            Self::Path(path) => fs::read_to_string(path)
                .map_err(|e| ResolveError::DatasetFetch(format!("{}: {}", path.display(), e))),
            Self::Url(url) => ureq::get(url)
                .call()
                .map_err(|e| ResolveError::DatasetFetch(e.to_string()))?
                .into_string()
                .map_err(|e| ResolveError::DatasetFetch(e.to_string())),
        }
    }
}

/// One dataset row. All fields optional: the source may carry incomplete
/// rows, and those must load without error and simply never match.
#[derive(Debug, Clone, Deserialize)]
struct CityRecord {
    #[serde(default)]
    city_ascii: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lng: Option<f64>,
}

impl CityRecord {
    fn matches(&self, city: &str, country: &str) -> bool {
        let city_ok = self.city_ascii.as_deref().is_some_and(|c| c.eq_ignore_ascii_case(city));
        let country_ok = self.country.as_deref().is_some_and(|c| c.eq_ignore_ascii_case(country));
        city_ok && country_ok
    }

    fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates::new(self.lat?, self.lng?))
    }
}

/// Dataset lifecycle: populated at most once per resolver instance.
enum DatasetCache {
    Unloaded,
    Loaded(Vec<CityRecord>),
}

/// The CSV-backed resolver.
pub struct CsvResolver {
    source: DatasetSource,
    cache: DatasetCache,
}

impl CsvResolver {
    pub fn new(source: DatasetSource) -> Self {
        Self { source, cache: DatasetCache::Unloaded }
    }

    /// Resolver over the bundled dataset.
    pub fn bundled() -> Self {
        Self::new(DatasetSource::Embedded)
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(DatasetSource::Path(path.into()))
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        Self::new(DatasetSource::Url(url.into()))
    }

    /// Fetch and parse the dataset on first call; no-op once loaded.
    /// On fetch failure the cache stays `Unloaded` so the next call retries.
    fn ensure_loaded(&mut self) -> Result<&[CityRecord], ResolveError> {
        if let DatasetCache::Unloaded = self.cache {
            let text = self.source.fetch_text()?;
            let rows = parse_rows(&text)?;
            self.cache = DatasetCache::Loaded(rows);
        }
        match &self.cache {
            DatasetCache::Loaded(rows) => Ok(rows),
            DatasetCache::Unloaded => Ok(&[]),
        }
    }
}

fn parse_rows(text: &str) -> Result<Vec<CityRecord>, ResolveError> {
    let mut rdr = csv::Reader::from_reader(text.as_bytes());
    rdr.headers()
        .map_err(|e| ResolveError::DatasetParse(e.to_string()))?;

    // Rows that fail row-level deserialization (e.g. garbage in a numeric
    // column) are dropped; the surviving rows keep their source order.
    Ok(rdr.deserialize().flatten().collect())
}

impl CoordinatesSource for CsvResolver {
    fn coordinates(&mut self, city: &str, country: &str) -> Result<Option<Coordinates>, ResolveError> {
        let rows = self.ensure_loaded()?;
        Ok(rows
            .iter()
            .find(|row| row.matches(city, country))
            .and_then(|row| row.coordinates()))
    }
}
