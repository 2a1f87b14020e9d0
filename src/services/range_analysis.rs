//! Range analysis - flags house-number spans that are likely misreads
//!
//! A street on a delivery sheet rarely spans more than a block or two. A
//! huge span ("10123 - 12123" instead of "10123 - 10143") usually means the
//! extraction misread a digit, and expanding it would flood the geocoder.

use crate::domain::route::{HouseRef, RouteSpec};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeFinding {
    pub group_number: i64,
    pub street_name: String,
    pub from_house: u32,
    pub to_house: u32,
    pub span: u32,
    /// Houses on one side of the street, assuming a same-parity walk
    pub estimated_houses: u32,
    pub suspicious: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeAnalysis {
    pub streets: Vec<RangeFinding>,
    pub total_estimated_candidates: u64,
}

impl RangeAnalysis {
    pub fn suspicious(&self) -> impl Iterator<Item = &RangeFinding> {
        self.streets.iter().filter(|f| f.suspicious)
    }
}

/// Estimate candidate counts per street and flag spans above `suspicious_span`.
/// Unparseable bounds count as 0, so a one-sided range shows as a large span.
pub fn analyze_ranges(route: &RouteSpec, suspicious_span: u32) -> RangeAnalysis {
    let mut analysis = RangeAnalysis::default();

    for group in &route.groups {
        for street in &group.streets {
            let from_house = street.from_house.as_ref().and_then(HouseRef::parse).unwrap_or(0);
            let to_house = street.to_house.as_ref().and_then(HouseRef::parse).unwrap_or(0);
            let span = from_house.abs_diff(to_house);
            let estimated_houses = span / 2 + 1;
            let suspicious = span > suspicious_span;

            if suspicious {
                warn!(
                    group = %group.group_number,
                    street = %street.street_name,
                    from_house = %from_house,
                    to_house = %to_house,
                    span = %span,
                    "suspicious_range"
                );
            }

            analysis.total_estimated_candidates += u64::from(estimated_houses);
            analysis.streets.push(RangeFinding {
                group_number: group.group_number,
                street_name: street.street_name.clone(),
                from_house,
                to_house,
                span,
                estimated_houses,
                suspicious,
            });
        }
    }

    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::route::{Group, StreetRange};

    fn route() -> RouteSpec {
        RouteSpec {
            groups: vec![
                Group {
                    group_number: 1,
                    streets: vec![
                        StreetRange::new("Hillcrest PT NW").with_range(503, 511),
                        StreetRange::new("156 ST NW").with_range("7204", "7210"),
                    ],
                },
                Group {
                    group_number: 2,
                    streets: vec![StreetRange::new("Jasper AVE").with_range("10123", "12123")],
                },
            ],
        }
    }

    #[test]
    fn test_estimates_and_flags() {
        let analysis = analyze_ranges(&route(), 100);
        assert_eq!(analysis.streets.len(), 3);

        let hillcrest = &analysis.streets[0];
        assert_eq!(hillcrest.span, 8);
        assert_eq!(hillcrest.estimated_houses, 5);
        assert!(!hillcrest.suspicious);

        let suspicious: Vec<&str> = analysis.suspicious().map(|f| f.street_name.as_str()).collect();
        assert_eq!(suspicious, vec!["Jasper AVE"]);
        assert_eq!(analysis.streets[2].estimated_houses, 1001);
        assert_eq!(analysis.total_estimated_candidates, 5 + 4 + 1001);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let route = RouteSpec {
            groups: vec![Group { group_number: 1, streets: vec![StreetRange::new("A ST").with_range(100, 200)] }],
        };
        assert!(!analyze_ranges(&route, 100).streets[0].suspicious);
        assert!(analyze_ranges(&route, 99).streets[0].suspicious);
    }

    #[test]
    fn test_descending_and_one_sided_ranges() {
        let route = RouteSpec {
            groups: vec![Group {
                group_number: 1,
                streets: vec![
                    StreetRange::new("A ST").with_range(120, 100),
                    StreetRange::new("B ST").with_from(7204),
                ],
            }],
        };
        let analysis = analyze_ranges(&route, 100);
        assert_eq!(analysis.streets[0].span, 20);
        assert_eq!(analysis.streets[0].estimated_houses, 11);
        assert_eq!(analysis.streets[1].span, 7204);
        assert!(analysis.streets[1].suspicious);
    }
}
