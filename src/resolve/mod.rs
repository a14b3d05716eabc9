//! Coordinate resolution: the strategy contract and its two resolvers.
//!
//! `CsvResolver` answers from a cached offline dataset; `NominatimResolver`
//! asks OpenStreetMap per lookup. Both implement `CoordinatesSource`, so the
//! comparison orchestrator never sees a concrete variant.

pub mod dataset;
pub mod nominatim;
pub mod types;

pub use dataset::{CsvResolver, DatasetSource};
pub use nominatim::NominatimResolver;
pub use types::{CoordinatesSource, ResolveError, Strategy};
