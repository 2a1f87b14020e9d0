//! Aggregation of a classified batch into per-zone street listings
//!
//! Needs the whole batch: zone pools and summary counters are only
//! meaningful once every candidate has been classified.

use crate::domain::{Aggregation, ClassifiedAddress, ClusteredGroup, GeocodeStatus, StreetAddresses, Summary};
use crate::services::proximity::{filter_zone, ClusterOptions};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Bucket a zone's survivors by street, keeping first-seen order of streets
/// and of addresses within a street
fn group_by_street(accepted: Vec<ClassifiedAddress>) -> Vec<StreetAddresses> {
    let mut streets: Vec<StreetAddresses> = Vec::new();
    let mut index: FxHashMap<String, usize> = FxHashMap::default();

    for record in accepted {
        match index.get(&record.street_name) {
            Some(&i) => streets[i].addresses.push(record),
            None => {
                index.insert(record.street_name.clone(), streets.len());
                streets.push(StreetAddresses {
                    street_name: record.street_name.clone(),
                    addresses: vec![record],
                });
            }
        }
    }

    streets
}

/// Filter outliers per zone, regroup survivors by street and tally the batch
pub fn aggregate(records: &[ClassifiedAddress], options: &ClusterOptions) -> Aggregation {
    // Zones keyed ascending; each pool keeps the batch's relative order
    let mut zones: BTreeMap<i64, Vec<ClassifiedAddress>> = BTreeMap::new();
    for record in records.iter().filter(|r| r.exists) {
        zones.entry(record.group_number).or_default().push(record.clone());
    }

    let existing: usize = zones.values().map(Vec::len).sum();
    debug!(existing = %existing, candidates = %records.len(), zones = %zones.len(), "zones_partitioned");

    let mut summary = Summary {
        total_candidates: records.len(),
        not_found: records.len() - existing,
        ..Default::default()
    };

    let mut groups = Vec::with_capacity(zones.len());
    for (group_number, pool) in zones {
        let filtered = filter_zone(group_number, pool, options);
        summary.discarded_due_to_proximity += filtered.discarded.len();

        for record in &filtered.accepted {
            match record.geocode_status {
                GeocodeStatus::Rooftop => summary.rooftop_addresses += 1,
                GeocodeStatus::Interpolated => summary.interpolated_addresses += 1,
                GeocodeStatus::Approximate | GeocodeStatus::NotFound => {}
            }
            if record.coordinates.is_some() {
                summary.geocoded_houses += 1;
            }
        }

        let total_houses = filtered.accepted.len();
        summary.total_houses += total_houses;
        groups.push(ClusteredGroup {
            group_number,
            streets: group_by_street(filtered.accepted),
            total_houses,
        });
    }
    summary.total_groups = groups.len();

    info!(
        groups = %summary.total_groups,
        candidates = %summary.total_candidates,
        houses = %summary.total_houses,
        rooftop = %summary.rooftop_addresses,
        interpolated = %summary.interpolated_addresses,
        not_found = %summary.not_found,
        discarded_proximity = %summary.discarded_due_to_proximity,
        "aggregation_complete"
    );

    Aggregation { groups, summary }
}
