//! Online resolver backed by OpenStreetMap Nominatim.
//!
//! One best-effort search request per lookup, no retry, no timeout tuning.
//! An empty result array is a normal miss; transport and decode failures
//! surface as errors so the caller can log them before collapsing the
//! outcome into the generic failure notice.

use super::types::{CoordinatesSource, ResolveError};
use crate::geo::Coordinates;
use serde::Deserialize;

const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";
const USER_AGENT: &str = "distancia/0.3 (city-distance-comparator)";

/// One Nominatim search result. Nominatim returns coordinates as strings.
#[derive(Debug, Clone, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
}

/// The Nominatim-backed resolver. Stateless: nothing is cached.
pub struct NominatimResolver {
    endpoint: String,
}

impl NominatimResolver {
    pub fn new() -> Self {
        Self { endpoint: DEFAULT_ENDPOINT.to_string() }
    }

    /// Point at a different search endpoint (self-hosted instance, tests).
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into() }
    }

    fn search_url(&self, city: &str, country: &str) -> String {
        format!(
            "{}?q={},{}&format=json&limit=1",
            self.endpoint,
            urlencode(city),
            urlencode(country),
        )
    }
}

impl Default for NominatimResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CoordinatesSource for NominatimResolver {
    fn coordinates(&mut self, city: &str, country: &str) -> Result<Option<Coordinates>, ResolveError> {
        let url = self.search_url(city, country);

        let body = ureq::get(&url)
            .set("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| ResolveError::Network(e.to_string()))?
            .into_string()
            .map_err(|e| ResolveError::Network(e.to_string()))?;

        decode_search_response(&body)
    }
}

/// Decode a Nominatim search body: first candidate wins, empty array is a miss.
fn decode_search_response(body: &str) -> Result<Option<Coordinates>, ResolveError> {
    let results: Vec<NominatimResult> =
        serde_json::from_str(body).map_err(|e| ResolveError::InvalidResponse(e.to_string()))?;

    let first = match results.first() {
        Some(r) => r,
        None => return Ok(None),
    };

    let lat: f64 = first
        .lat
        .parse()
        .map_err(|_| ResolveError::InvalidResponse(format!("bad latitude '{}'", first.lat)))?;
    let lon: f64 = first
        .lon
        .parse()
        .map_err(|_| ResolveError::InvalidResponse(format!("bad longitude '{}'", first.lon)))?;

    Ok(Some(Coordinates::new(lat, lon)))
}

/// Minimal percent-encoding for the query string, no extra dependency.
fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            ' ' => out.push_str("%20"),
            '&' => out.push_str("%26"),
            '=' => out.push_str("%3D"),
            '+' => out.push_str("%2B"),
            ',' => out.push_str("%2C"),
            _ if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~') => out.push(c),
            _ => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    out.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    out
}
