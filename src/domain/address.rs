//! Address candidates and their geocoded classification

use serde::{Deserialize, Serialize};

/// WGS84 coordinates in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Finite and inside the lat/lng domain
    #[inline]
    pub fn is_usable(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && self.lat.abs() <= 90.0
            && self.lng.abs() <= 180.0
    }
}

/// A hypothesized deliverable address, before geocoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressCandidate {
    pub group_number: i64,
    pub street_name: String,
    pub house_number: u32,
    pub full_address: String,
}

/// Confidence tier assigned from the provider's precision tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeocodeStatus {
    Rooftop,
    Interpolated,
    Approximate,
    NotFound,
}

impl GeocodeStatus {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            GeocodeStatus::Rooftop => "rooftop",
            GeocodeStatus::Interpolated => "interpolated",
            GeocodeStatus::Approximate => "approximate",
            GeocodeStatus::NotFound => "not_found",
        }
    }

    /// Rooftop and interpolated results are treated as real houses
    #[inline]
    pub fn exists(&self) -> bool {
        matches!(self, GeocodeStatus::Rooftop | GeocodeStatus::Interpolated)
    }
}

impl std::fmt::Display for GeocodeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate joined with its geocoding outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedAddress {
    pub group_number: i64,
    pub street_name: String,
    pub house_number: u32,
    pub full_address: String,
    pub coordinates: Option<Coordinates>,
    pub geocode_status: GeocodeStatus,
    pub exists: bool,
}

impl ClassifiedAddress {
    /// Build a record, echoing the candidate's identifying fields.
    /// `exists` is derived from the status and never set independently.
    pub fn from_candidate(
        candidate: &AddressCandidate,
        geocode_status: GeocodeStatus,
        coordinates: Option<Coordinates>,
    ) -> Self {
        Self {
            group_number: candidate.group_number,
            street_name: candidate.street_name.clone(),
            house_number: candidate.house_number,
            full_address: candidate.full_address.clone(),
            coordinates,
            geocode_status,
            exists: geocode_status.exists(),
        }
    }

    /// Coordinates that can take part in a distance test
    #[inline]
    pub fn usable_coordinates(&self) -> Option<Coordinates> {
        self.coordinates.filter(Coordinates::is_usable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> AddressCandidate {
        AddressCandidate {
            group_number: 4,
            street_name: "156 ST NW".to_string(),
            house_number: 7204,
            full_address: "7204 156 Street NW, Edmonton, AB, Canada".to_string(),
        }
    }

    #[test]
    fn test_exists_follows_status() {
        assert!(GeocodeStatus::Rooftop.exists());
        assert!(GeocodeStatus::Interpolated.exists());
        assert!(!GeocodeStatus::Approximate.exists());
        assert!(!GeocodeStatus::NotFound.exists());
    }

    #[test]
    fn test_from_candidate_echoes_identity() {
        let record = ClassifiedAddress::from_candidate(
            &candidate(),
            GeocodeStatus::Interpolated,
            Some(Coordinates::new(53.5, -113.6)),
        );
        assert_eq!(record.group_number, 4);
        assert_eq!(record.street_name, "156 ST NW");
        assert_eq!(record.house_number, 7204);
        assert_eq!(record.full_address, "7204 156 Street NW, Edmonton, AB, Canada");
        assert!(record.exists);
    }

    #[test]
    fn test_usable_coordinates() {
        assert!(Coordinates::new(53.5, -113.6).is_usable());
        assert!(!Coordinates::new(f64::NAN, -113.6).is_usable());
        assert!(!Coordinates::new(95.0, 0.0).is_usable());
        assert!(!Coordinates::new(0.0, f64::INFINITY).is_usable());
    }

    #[test]
    fn test_serializes_camel_case() {
        let record = ClassifiedAddress::from_candidate(&candidate(), GeocodeStatus::NotFound, None);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["groupNumber"], 4);
        assert_eq!(json["geocodeStatus"], "not_found");
        assert_eq!(json["exists"], false);
        assert!(json["coordinates"].is_null());
    }
}
