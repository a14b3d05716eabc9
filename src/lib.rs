//! distancia — city-to-city great-circle distance.
//!
//! Two interchangeable resolution strategies map a (city, country) pair to
//! coordinates: an offline CSV dataset (parsed once, queried many times) and
//! a live Nominatim search. The comparison orchestrator resolves two place
//! names through the chosen strategy and reports the haversine distance in
//! kilometres, rounded to two decimals.

pub mod compare;
pub mod geo;
pub mod resolve;
pub mod server;

pub use compare::{compare, compare_with, CompareConfig, CompareError};
pub use geo::{haversine_distance, Coordinates};
pub use resolve::{CoordinatesSource, CsvResolver, DatasetSource, NominatimResolver, ResolveError, Strategy};
