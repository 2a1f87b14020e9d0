//! Candidate generation - expands house-number ranges into addresses
//!
//! Routes follow the odd-side/even-side delivery convention: a range walks
//! from `fromHouse` towards `toHouse` in steps of two, so every emitted number
//! keeps the parity of `fromHouse`. Malformed ranges never fail the batch,
//! they just produce fewer candidates.

use crate::domain::route::{HouseRef, RouteSpec, StreetRange};
use crate::domain::AddressCandidate;
use crate::infra::Config;
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::{debug, info};

static ABBREVIATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(PT|ST|AVE?|RD|DR|BLVD|CR|PL|CT|NW|NE|SW|SE)\b")
        .expect("abbreviation pattern is valid")
});

/// Generator parameters
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Appended to each address after the street, e.g. "Edmonton, AB, Canada"
    pub locality: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self { locality: "Edmonton, AB, Canada".to_string() }
    }
}

impl GeneratorOptions {
    pub fn from_config(config: &Config) -> Self {
        Self { locality: config.locality().to_string() }
    }
}

/// Expand common street-type abbreviations as whole words, ignoring case.
/// Directional suffixes stay abbreviated but are upper-cased.
pub fn expand_street_name(street_name: &str) -> String {
    ABBREVIATION
        .replace_all(street_name, |caps: &Captures| {
            let token = caps[1].to_ascii_uppercase();
            match token.as_str() {
                "PT" => "Point".to_string(),
                "ST" => "Street".to_string(),
                "AV" | "AVE" => "Avenue".to_string(),
                "RD" => "Road".to_string(),
                "DR" => "Drive".to_string(),
                "BLVD" => "Boulevard".to_string(),
                "CR" => "Crescent".to_string(),
                "PL" => "Place".to_string(),
                "CT" => "Court".to_string(),
                _ => token,
            }
        })
        .into_owned()
}

/// House numbers a street line stands for, in delivery order.
///
/// - both bounds: same-parity walk from `fromHouse` to `toHouse` inclusive,
///   truncated to `numberOfHouses` when given
/// - only `fromHouse`: that single house
/// - otherwise: nothing
pub fn house_numbers(street: &StreetRange) -> Vec<u32> {
    let from = street.from_house.as_ref().and_then(HouseRef::parse);
    let to = street.to_house.as_ref().and_then(HouseRef::parse);

    match (from, to) {
        (Some(from), Some(to)) => {
            let cap = street.number_of_houses.map_or(usize::MAX, |n| n as usize);
            if from < to {
                (from..=to).step_by(2).take(cap).collect()
            } else {
                (to..=from).rev().step_by(2).take(cap).collect()
            }
        }
        (Some(from), None) => vec![from],
        _ => Vec::new(),
    }
}

/// Expand a route into candidates, ordered group → street → house number.
///
/// This order is canonical: everything downstream refers back to it.
pub fn generate(route: &RouteSpec, options: &GeneratorOptions) -> Vec<AddressCandidate> {
    let mut candidates = Vec::new();

    for group in &route.groups {
        for street in &group.streets {
            let numbers = house_numbers(street);
            if numbers.is_empty() {
                debug!(
                    group = %group.group_number,
                    street = %street.street_name,
                    from_house = ?street.from_house,
                    to_house = ?street.to_house,
                    "street_skipped_unparseable_range"
                );
                continue;
            }

            let expanded = expand_street_name(&street.street_name);
            debug!(
                group = %group.group_number,
                street = %street.street_name,
                expanded = %expanded,
                count = %numbers.len(),
                "street_expanded"
            );

            candidates.extend(numbers.into_iter().map(|house_number| AddressCandidate {
                group_number: group.group_number,
                street_name: street.street_name.clone(),
                house_number,
                full_address: format!("{} {}, {}", house_number, expanded, options.locality),
            }));
        }
    }

    info!(
        groups = %route.groups.len(),
        candidates = %candidates.len(),
        "candidates_generated"
    );
    candidates
}
