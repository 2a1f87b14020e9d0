//! Geocoding provider response shapes
//!
//! Responses come from a third party and are parsed leniently: every field is
//! optional and only the top-ranked result is ever decoded.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Provider-level status string
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderStatus {
    Ok,
    ZeroResults,
    Other(String),
}

impl std::str::FromStr for ProviderStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "OK" => ProviderStatus::Ok,
            "ZERO_RESULTS" => ProviderStatus::ZeroResults,
            other => ProviderStatus::Other(other.to_string()),
        })
    }
}

/// Location precision tag of a single result
#[derive(Debug, Clone, PartialEq)]
pub enum LocationType {
    Rooftop,
    RangeInterpolated,
    GeometricCenter,
    Approximate,
    Unknown(String),
}

impl std::str::FromStr for LocationType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "ROOFTOP" => LocationType::Rooftop,
            "RANGE_INTERPOLATED" => LocationType::RangeInterpolated,
            "GEOMETRIC_CENTER" => LocationType::GeometricCenter,
            "APPROXIMATE" => LocationType::Approximate,
            other => LocationType::Unknown(other.to_string()),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Location {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Geometry {
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub location_type: Option<String>,
}

/// Raw provider response: `{ status, results: [ { geometry }, ... ] }`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ProviderResponse {
    #[serde(default)]
    pub status: Option<String>,
    /// Kept undecoded; results past the first are never inspected
    #[serde(default)]
    pub results: Option<Vec<Value>>,
}

impl ProviderResponse {
    /// Decode a raw JSON value, `None` if it is not an object of the expected shape
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    pub fn status(&self) -> Option<ProviderStatus> {
        self.status.as_deref().and_then(|s| s.parse().ok())
    }

    /// Geometry of the top-ranked result, if present and well formed
    pub fn top_geometry(&self) -> Option<Geometry> {
        let first = self.results.as_ref()?.first()?;
        let geometry = first.get("geometry")?;
        serde_json::from_value(geometry.clone()).ok()
    }
}

impl Geometry {
    pub fn precision(&self) -> Option<LocationType> {
        self.location_type.as_deref().and_then(|s| s.parse().ok())
    }

    pub fn lat_lng(&self) -> Option<(f64, f64)> {
        let location = self.location.as_ref()?;
        Some((location.lat?, location.lng?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_from_str() {
        assert_eq!("OK".parse::<ProviderStatus>().unwrap(), ProviderStatus::Ok);
        assert_eq!("ZERO_RESULTS".parse::<ProviderStatus>().unwrap(), ProviderStatus::ZeroResults);
        assert!(matches!(
            "OVER_QUERY_LIMIT".parse::<ProviderStatus>().unwrap(),
            ProviderStatus::Other(_)
        ));
    }

    #[test]
    fn test_top_geometry_ignores_later_results() {
        let value = json!({
            "status": "OK",
            "results": [
                {"geometry": {"location": {"lat": 53.5, "lng": -113.59}, "location_type": "ROOFTOP"}},
                "garbage"
            ]
        });
        let response = ProviderResponse::from_value(&value).unwrap();
        let geometry = response.top_geometry().unwrap();
        assert_eq!(geometry.precision(), Some(LocationType::Rooftop));
        assert_eq!(geometry.lat_lng(), Some((53.5, -113.59)));
    }

    #[test]
    fn test_malformed_shapes() {
        assert!(ProviderResponse::from_value(&json!("not an object")).is_none());
        assert!(ProviderResponse::from_value(&json!({"status": 42})).is_none());

        let response = ProviderResponse::from_value(&json!({"status": "OK", "results": [{}]})).unwrap();
        assert!(response.top_geometry().is_none());

        let response = ProviderResponse::from_value(&json!({"status": "OK"})).unwrap();
        assert!(response.top_geometry().is_none());
    }
}
