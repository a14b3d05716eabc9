//! Resolution contract and error taxonomy.

use crate::geo::Coordinates;
use std::fmt;
use std::str::FromStr;

/// The coordinate resolution capability.
///
/// `Ok(None)` means "no match" and is a normal outcome, never an error.
/// `Err(_)` is reserved for resolver-internal faults (dataset unreadable,
/// network down, malformed response). At the orchestration level a fault
/// leads to the same user-visible failure as a miss.
pub trait CoordinatesSource {
    fn coordinates(&mut self, city: &str, country: &str) -> Result<Option<Coordinates>, ResolveError>;
}

/// Which resolver variant a comparison should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Offline CSV dataset, parsed once and cached in memory.
    Csv,
    /// Live Nominatim query, one request per lookup.
    Api,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Strategy::Csv),
            "api" => Ok(Strategy::Api),
            _ => Err(format!("Unknown method '{}'. Use 'csv' or 'api'.", s)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Api => write!(f, "api"),
        }
    }
}

/// Resolver-internal faults.
#[derive(Debug)]
pub enum ResolveError {
    /// The dataset resource could not be read. The cache stays unloaded
    /// so a later call may retry.
    DatasetFetch(String),
    /// The dataset text could not be parsed as CSV.
    DatasetParse(String),
    /// The geocoding request failed.
    Network(String),
    /// The geocoding response was not the expected JSON shape.
    InvalidResponse(String),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DatasetFetch(msg) => write!(f, "Dataset fetch failed: {}", msg),
            Self::DatasetParse(msg) => write!(f, "Dataset parse failed: {}", msg),
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::InvalidResponse(msg) => write!(f, "Invalid API response: {}", msg),
        }
    }
}

impl std::error::Error for ResolveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("csv".parse::<Strategy>().unwrap(), Strategy::Csv);
        assert_eq!("API".parse::<Strategy>().unwrap(), Strategy::Api);
        assert!("sql".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_strategy_display_round_trip() {
        assert_eq!(Strategy::Csv.to_string().parse::<Strategy>().unwrap(), Strategy::Csv);
        assert_eq!(Strategy::Api.to_string().parse::<Strategy>().unwrap(), Strategy::Api);
    }

    #[test]
    fn test_error_display() {
        let e = ResolveError::DatasetFetch("no such file".into());
        assert!(e.to_string().contains("no such file"));
    }
}
