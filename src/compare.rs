//! Comparison orchestrator: two lookups, one distance.

use crate::geo::{haversine_distance, Coordinates};
use crate::resolve::{CoordinatesSource, CsvResolver, DatasetSource, NominatimResolver, ResolveError, Strategy};
use std::fmt;

/// How the orchestrator builds its resolvers.
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// Dataset for the csv strategy.
    pub dataset: DatasetSource,
    /// Override for the api strategy's search endpoint.
    pub nominatim_endpoint: Option<String>,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetSource::Embedded,
            nominatim_endpoint: None,
        }
    }
}

/// The single user-facing failure. Misses and resolver faults collapse into
/// this one notice; fault detail goes to stderr only.
#[derive(Debug, PartialEq, Eq)]
pub enum CompareError {
    Unresolved,
}

impl fmt::Display for CompareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolved => write!(f, "Could not resolve coordinates."),
        }
    }
}

impl std::error::Error for CompareError {}

/// Build the resolver for a strategy.
pub fn resolver_for(strategy: Strategy, config: &CompareConfig) -> Box<dyn CoordinatesSource> {
    match strategy {
        Strategy::Csv => Box::new(CsvResolver::new(config.dataset.clone())),
        Strategy::Api => Box::new(match &config.nominatim_endpoint {
            Some(endpoint) => NominatimResolver::with_endpoint(endpoint.clone()),
            None => NominatimResolver::new(),
        }),
    }
}

/// Resolve two place names with a fresh resolver for `strategy`, then return
/// the great-circle distance in kilometres rounded to two decimals.
pub fn compare(
    city1: &str,
    country1: &str,
    city2: &str,
    country2: &str,
    strategy: Strategy,
    config: &CompareConfig,
) -> Result<f64, CompareError> {
    let mut resolver = resolver_for(strategy, config);
    compare_with(resolver.as_mut(), city1, country1, city2, country2)
}

/// Same as [`compare`] but against a caller-supplied resolver. The csv
/// resolver's dataset cache is shared between the two lookups (and across
/// calls, if the caller keeps the resolver around).
pub fn compare_with(
    resolver: &mut dyn CoordinatesSource,
    city1: &str,
    country1: &str,
    city2: &str,
    country2: &str,
) -> Result<f64, CompareError> {
    // Both lookups settle before any distance is computed.
    let first = settle(resolver.coordinates(city1, country1), city1, country1);
    let second = settle(resolver.coordinates(city2, country2), city2, country2);

    match (first, second) {
        (Some(a), Some(b)) => Ok(round2(haversine_distance(a, b))),
        _ => Err(CompareError::Unresolved),
    }
}

/// Collapse a lookup outcome: a fault counts as a miss for the caller, but
/// its detail is logged first.
fn settle(
    outcome: Result<Option<Coordinates>, ResolveError>,
    city: &str,
    country: &str,
) -> Option<Coordinates> {
    match outcome {
        Ok(found) => found,
        Err(e) => {
            eprintln!("  Warning: lookup '{}, {}' failed: {}", city, country, e);
            None
        }
    }
}

fn round2(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::TempDir;

    /// Fixed-table resolver for orchestrator tests.
    struct TableSource {
        places: HashMap<(String, String), Coordinates>,
        calls: usize,
        fail: bool,
    }

    impl TableSource {
        fn new(entries: &[(&str, &str, f64, f64)]) -> Self {
            let places = entries
                .iter()
                .map(|(city, country, lat, lon)| {
                    ((city.to_lowercase(), country.to_lowercase()), Coordinates::new(*lat, *lon))
                })
                .collect();
            Self { places, calls: 0, fail: false }
        }

        fn failing() -> Self {
            let mut s = Self::new(&[]);
            s.fail = true;
            s
        }
    }

    impl CoordinatesSource for TableSource {
        fn coordinates(&mut self, city: &str, country: &str) -> Result<Option<Coordinates>, ResolveError> {
            self.calls += 1;
            if self.fail {
                return Err(ResolveError::Network("connection refused".into()));
            }
            Ok(self.places.get(&(city.to_lowercase(), country.to_lowercase())).copied())
        }
    }

    fn lima_london() -> TableSource {
        TableSource::new(&[
            ("Lima", "Peru", -12.0600, -77.0375),
            ("Londres", "Reino Unido", 51.5072, -0.1276),
        ])
    }

    #[test]
    fn test_self_distance_is_zero() {
        let mut source = lima_london();
        let d = compare_with(&mut source, "Lima", "Peru", "Lima", "Peru").unwrap();
        assert_eq!(d, 0.0);
    }

    #[test]
    fn test_known_pair_rounded() {
        let mut source = lima_london();
        let d = compare_with(&mut source, "Lima", "Peru", "Londres", "Reino Unido").unwrap();
        assert_relative_eq!(d, 10171.14, epsilon = 1e-9);
    }

    #[test]
    fn test_result_is_two_decimals() {
        let mut source = lima_london();
        let d = compare_with(&mut source, "Lima", "Peru", "Londres", "Reino Unido").unwrap();
        assert_eq!(d, (d * 100.0).round() / 100.0);
    }

    #[test]
    fn test_unknown_place_fails() {
        let mut source = lima_london();
        let result = compare_with(&mut source, "Atlantis", "Mythland", "Lima", "Peru");
        assert_eq!(result.unwrap_err(), CompareError::Unresolved);
    }

    #[test]
    fn test_both_lookups_settle_even_after_a_miss() {
        let mut source = lima_london();
        let _ = compare_with(&mut source, "Atlantis", "Mythland", "Lima", "Peru");
        assert_eq!(source.calls, 2);
    }

    #[test]
    fn test_fault_collapses_to_failure() {
        let mut source = TableSource::failing();
        let result = compare_with(&mut source, "Lima", "Peru", "Londres", "Reino Unido");
        assert_eq!(result.unwrap_err(), CompareError::Unresolved);
    }

    #[test]
    fn test_compare_with_csv_strategy() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cities.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        write!(
            f,
            "city,city_ascii,country,iso2,lat,lng\n\
             Lima,Lima,Peru,PE,-12.0600,-77.0375\n\
             Londres,Londres,Reino Unido,GB,51.5072,-0.1276\n"
        )
        .unwrap();

        let config = CompareConfig {
            dataset: DatasetSource::Path(path),
            nominatim_endpoint: None,
        };
        let d = compare("Lima", "Peru", "Londres", "Reino Unido", Strategy::Csv, &config).unwrap();
        assert_relative_eq!(d, 10171.14, epsilon = 1e-9);

        let miss = compare("Atlantis", "Mythland", "Lima", "Peru", Strategy::Csv, &config);
        assert_eq!(miss.unwrap_err(), CompareError::Unresolved);
    }

    #[test]
    fn test_known_pair_bundled_dataset() {
        let config = CompareConfig::default();
        let d = compare("Lima", "Peru", "Londres", "Reino Unido", Strategy::Csv, &config).unwrap();
        assert!((10160.0..10180.0).contains(&d), "distance {}", d);
        assert_relative_eq!(d, 10171.14, epsilon = 1e-9);
    }

    #[test]
    fn test_error_notice_is_generic() {
        assert_eq!(CompareError::Unresolved.to_string(), "Could not resolve coordinates.");
    }
}
