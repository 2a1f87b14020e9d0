//! Geocode classification - maps a provider response to a confidence tier
//!
//! | status        | precision tag       | tier         | exists |
//! |---------------|---------------------|--------------|--------|
//! | OK            | ROOFTOP             | rooftop      | yes    |
//! | OK            | RANGE_INTERPOLATED  | interpolated | yes    |
//! | OK            | anything else       | approximate  | no     |
//! | ZERO_RESULTS  |                     | not_found    | no     |
//! | other/missing |                     | not_found    | no     |
//!
//! Only the top-ranked result is looked at. A missing or garbled response
//! is `not_found`, never an error.

use crate::domain::geocode::{LocationType, ProviderResponse, ProviderStatus};
use crate::domain::{AddressCandidate, ClassifiedAddress, Coordinates, GeocodeStatus};
use serde_json::Value;
use tracing::{debug, info};

/// Classify one candidate given the provider's answer for it
pub trait AddressClassifier: Send + Sync {
    fn classify(
        &self,
        candidate: &AddressCandidate,
        response: Option<&ProviderResponse>,
    ) -> ClassifiedAddress;
}

/// Classifier driven by the provider's location precision tag
#[derive(Debug, Clone, Copy, Default)]
pub struct PrecisionClassifier;

impl AddressClassifier for PrecisionClassifier {
    fn classify(
        &self,
        candidate: &AddressCandidate,
        response: Option<&ProviderResponse>,
    ) -> ClassifiedAddress {
        let (status, coordinates) = decide(response);

        match status {
            GeocodeStatus::Rooftop => {
                debug!(address = %candidate.full_address, "geocode_rooftop");
            }
            GeocodeStatus::Interpolated => {
                info!(address = %candidate.full_address, "geocode_interpolated");
            }
            GeocodeStatus::Approximate => {
                debug!(
                    address = %candidate.full_address,
                    location_type = ?response.and_then(ProviderResponse::top_geometry).and_then(|g| g.location_type),
                    "geocode_rejected"
                );
            }
            GeocodeStatus::NotFound => {
                debug!(
                    address = %candidate.full_address,
                    status = ?response.and_then(|r| r.status.as_deref()),
                    "geocode_not_found"
                );
            }
        }

        ClassifiedAddress::from_candidate(candidate, status, coordinates)
    }
}

fn decide(response: Option<&ProviderResponse>) -> (GeocodeStatus, Option<Coordinates>) {
    let Some(response) = response else {
        return (GeocodeStatus::NotFound, None);
    };
    if response.status() != Some(ProviderStatus::Ok) {
        return (GeocodeStatus::NotFound, None);
    }
    let Some(geometry) = response.top_geometry() else {
        return (GeocodeStatus::NotFound, None);
    };

    // A precise tag without a location keeps its tier; the clusterer drops it
    let coordinates = geometry.lat_lng().map(|(lat, lng)| Coordinates::new(lat, lng));
    match geometry.precision() {
        Some(LocationType::Rooftop) => (GeocodeStatus::Rooftop, coordinates),
        Some(LocationType::RangeInterpolated) => (GeocodeStatus::Interpolated, coordinates),
        _ => (GeocodeStatus::Approximate, None),
    }
}

/// Classify against a raw JSON response with the default classifier
pub fn classify(candidate: &AddressCandidate, response: Option<&Value>) -> ClassifiedAddress {
    let parsed = response.and_then(ProviderResponse::from_value);
    PrecisionClassifier.classify(candidate, parsed.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn candidate() -> AddressCandidate {
        AddressCandidate {
            group_number: 2,
            street_name: "Hillcrest PT NW".to_string(),
            house_number: 503,
            full_address: "503 Hillcrest Point NW, Edmonton, AB, Canada".to_string(),
        }
    }

    fn ok_response(location_type: &str) -> Value {
        json!({
            "status": "OK",
            "results": [{
                "geometry": {
                    "location": {"lat": 53.50437469999999, "lng": -113.5907607},
                    "location_type": location_type
                }
            }]
        })
    }

    #[test]
    fn test_rooftop() {
        let record = classify(&candidate(), Some(&ok_response("ROOFTOP")));
        assert_eq!(record.geocode_status, GeocodeStatus::Rooftop);
        assert!(record.exists);
        assert_eq!(record.coordinates, Some(Coordinates::new(53.50437469999999, -113.5907607)));
    }

    #[test]
    fn test_range_interpolated() {
        let record = classify(&candidate(), Some(&ok_response("RANGE_INTERPOLATED")));
        assert_eq!(record.geocode_status, GeocodeStatus::Interpolated);
        assert!(record.exists);
        assert!(record.coordinates.is_some());
    }

    #[test]
    fn test_approximate_and_geometric_center_rejected() {
        for tag in ["APPROXIMATE", "GEOMETRIC_CENTER", "SOMETHING_NEW"] {
            let record = classify(&candidate(), Some(&ok_response(tag)));
            assert_eq!(record.geocode_status, GeocodeStatus::Approximate, "tag {}", tag);
            assert!(!record.exists);
            assert!(record.coordinates.is_none());
        }
    }

    #[test]
    fn test_zero_results() {
        let record = classify(&candidate(), Some(&json!({"status": "ZERO_RESULTS", "results": []})));
        assert_eq!(record.geocode_status, GeocodeStatus::NotFound);
        assert!(!record.exists);
    }

    #[test]
    fn test_ok_without_results_is_not_found() {
        let record = classify(&candidate(), Some(&json!({"status": "OK"})));
        assert_eq!(record.geocode_status, GeocodeStatus::NotFound);

        let record = classify(&candidate(), Some(&json!({"status": "OK", "results": []})));
        assert_eq!(record.geocode_status, GeocodeStatus::NotFound);
    }

    #[test]
    fn test_missing_and_garbled_responses() {
        assert_eq!(classify(&candidate(), None).geocode_status, GeocodeStatus::NotFound);
        for value in [json!(null), json!("timeout"), json!({"status": "REQUEST_DENIED"}), json!({"status": 7})] {
            let record = classify(&candidate(), Some(&value));
            assert_eq!(record.geocode_status, GeocodeStatus::NotFound);
            assert!(!record.exists);
        }
    }

    #[test]
    fn test_only_top_result_counts() {
        let value = json!({
            "status": "OK",
            "results": [
                {"geometry": {"location": {"lat": 53.5, "lng": -113.5}, "location_type": "APPROXIMATE"}},
                {"geometry": {"location": {"lat": 53.6, "lng": -113.6}, "location_type": "ROOFTOP"}}
            ]
        });
        assert_eq!(classify(&candidate(), Some(&value)).geocode_status, GeocodeStatus::Approximate);
    }

    #[test]
    fn test_precise_tag_without_location() {
        let value = json!({"status": "OK", "results": [{"geometry": {"location_type": "ROOFTOP"}}]});
        let record = classify(&candidate(), Some(&value));
        assert_eq!(record.geocode_status, GeocodeStatus::Rooftop);
        assert!(record.exists);
        assert!(record.coordinates.is_none());
    }

    #[test]
    fn test_identity_echoed() {
        let record = classify(&candidate(), Some(&ok_response("ROOFTOP")));
        assert_eq!(record.group_number, 2);
        assert_eq!(record.street_name, "Hillcrest PT NW");
        assert_eq!(record.house_number, 503);
        assert_eq!(record.full_address, "503 Hillcrest Point NW, Edmonton, AB, Canada");
    }
}
