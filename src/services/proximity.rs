//! Proximity filtering of geocoded addresses within one zone
//!
//! Greedy single pass in input order: the first usable address seeds the
//! zone, each later address joins if it is within walking distance of any
//! address already accepted, and is discarded otherwise. Discarded addresses
//! are never reconsidered, so the outcome depends on input order.
//!
//! This is a known approximation of spatial clustering (it is not connected
//! components and not nearest-neighbour chaining). Changing it changes which
//! addresses survive. Worst case is O(n²) distance checks per zone.

use crate::domain::{ClassifiedAddress, Coordinates};
use crate::infra::Config;
use tracing::info;

/// Mean Earth radius (meters)
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Default walking distance between zone members (meters, inclusive)
pub const MAX_WALKING_DISTANCE_M: f64 = 500.0;

/// Great-circle distance in meters
pub fn haversine_m(a: Coordinates, b: Coordinates) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lng - a.lng).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

#[derive(Debug, Clone, Copy)]
pub struct ClusterOptions {
    pub max_distance_m: f64,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self { max_distance_m: MAX_WALKING_DISTANCE_M }
    }
}

impl ClusterOptions {
    pub fn from_config(config: &Config) -> Self {
        Self { max_distance_m: config.max_walking_distance_m() }
    }
}

/// Result of filtering one zone
#[derive(Debug, Clone, Default)]
pub struct ZoneFilter {
    /// Survivors, in the order they were accepted
    pub accepted: Vec<ClassifiedAddress>,
    pub discarded: Vec<ClassifiedAddress>,
}

/// Run the greedy proximity pass over one zone's pool
pub fn filter_zone(
    group_number: i64,
    pool: Vec<ClassifiedAddress>,
    options: &ClusterOptions,
) -> ZoneFilter {
    let mut result = ZoneFilter::default();
    // Parallel to `accepted`; every accepted record has usable coordinates
    let mut accepted_points: Vec<Coordinates> = Vec::new();

    for record in pool {
        let Some(point) = record.usable_coordinates() else {
            info!(
                group = %group_number,
                address = %record.full_address,
                "address_discarded_missing_coordinates"
            );
            result.discarded.push(record);
            continue;
        };

        if accepted_points.is_empty() {
            accepted_points.push(point);
            result.accepted.push(record);
            continue;
        }

        let nearest_m = accepted_points
            .iter()
            .map(|other| haversine_m(point, *other))
            .fold(f64::INFINITY, f64::min);

        if nearest_m <= options.max_distance_m {
            accepted_points.push(point);
            result.accepted.push(record);
        } else {
            info!(
                group = %group_number,
                address = %record.full_address,
                nearest_m = %nearest_m.round(),
                max_m = %options.max_distance_m,
                "address_discarded_proximity"
            );
            result.discarded.push(record);
        }
    }

    result
}
