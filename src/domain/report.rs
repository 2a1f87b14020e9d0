//! Aggregated route report consumed by the review page

use crate::domain::address::ClassifiedAddress;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Surviving addresses of one street inside a zone
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreetAddresses {
    pub street_name: String,
    pub addresses: Vec<ClassifiedAddress>,
}

/// A zone after proximity filtering
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusteredGroup {
    pub group_number: i64,
    pub streets: Vec<StreetAddresses>,
    pub total_houses: usize,
}

/// Batch-wide counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_groups: usize,
    pub total_candidates: usize,
    /// Addresses that survived proximity filtering
    pub total_houses: usize,
    pub geocoded_houses: usize,
    pub rooftop_addresses: usize,
    pub interpolated_addresses: usize,
    /// Candidates whose classification does not count as an existing house
    pub not_found: usize,
    pub discarded_due_to_proximity: usize,
}

impl Summary {
    /// Whether an operator should look at the batch before routing it
    pub fn needs_review(&self) -> bool {
        self.interpolated_addresses > 0 || self.discarded_due_to_proximity > 0
    }
}

/// Output of one aggregation run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation {
    pub groups: Vec<ClusteredGroup>,
    pub summary: Summary,
}

/// Report written at the end of a pipeline run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteReport {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub groups: Vec<ClusteredGroup>,
    pub summary: Summary,
    /// Every classified candidate in canonical order, survivors or not
    pub all_addresses: Vec<ClassifiedAddress>,
}

impl RouteReport {
    pub fn new(aggregation: Aggregation, all_addresses: Vec<ClassifiedAddress>) -> Self {
        Self {
            run_id: Uuid::now_v7().to_string(),
            generated_at: Utc::now(),
            groups: aggregation.groups,
            summary: aggregation.summary,
            all_addresses,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
