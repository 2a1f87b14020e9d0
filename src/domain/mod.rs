//! Domain models - route descriptions, addresses and reports
//!
//! - `route` - the delivery route as extracted from the route sheet
//! - `address` - candidates and their geocoded classification
//! - `geocode` - lenient view of a geocoding provider response
//! - `report` - clustered groups and batch summary

pub mod address;
pub mod geocode;
pub mod report;
pub mod route;

// Re-export commonly used types at module level
pub use address::{AddressCandidate, ClassifiedAddress, Coordinates, GeocodeStatus};
pub use geocode::ProviderResponse;
pub use report::{Aggregation, ClusteredGroup, RouteReport, StreetAddresses, Summary};
pub use route::{Group, HouseRef, RouteSpec, StreetRange};
