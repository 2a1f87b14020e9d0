//! Route description handed over by the extraction step

use serde::{Deserialize, Deserializer, Serialize};

/// A house-number bound as written on the route sheet.
///
/// Extraction emits either JSON numbers or free text ("10123", "10123A",
/// "#45"), so both forms are kept verbatim until [`HouseRef::parse`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HouseRef {
    Text(String),
    Number(f64),
}

impl HouseRef {
    /// Strip every non-digit character and parse what is left.
    ///
    /// Returns `None` when nothing numeric remains, when the value overflows,
    /// or when it is zero (there is no house 0 on a delivery route).
    pub fn parse(&self) -> Option<u32> {
        let raw = match self {
            HouseRef::Text(s) => s.clone(),
            HouseRef::Number(n) => n.to_string(),
        };
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        match digits.parse::<u32>() {
            Ok(0) | Err(_) => None,
            Ok(n) => Some(n),
        }
    }
}

impl From<&str> for HouseRef {
    fn from(s: &str) -> Self {
        HouseRef::Text(s.to_string())
    }
}

impl From<i32> for HouseRef {
    fn from(n: i32) -> Self {
        HouseRef::Number(f64::from(n))
    }
}

impl<'de> Deserialize<'de> for HouseRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};

        struct HouseRefVisitor;

        // Anything that is not text or a number is kept as unreadable text so
        // that only the owning street is skipped, not the whole route.
        impl<'de> Visitor<'de> for HouseRefVisitor {
            type Value = HouseRef;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a house number as string or number")
            }

            fn visit_bool<E>(self, value: bool) -> Result<HouseRef, E>
            where
                E: de::Error,
            {
                Ok(HouseRef::Text(value.to_string()))
            }

            fn visit_unit<E>(self) -> Result<HouseRef, E>
            where
                E: de::Error,
            {
                Ok(HouseRef::Text(String::new()))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<HouseRef, A::Error>
            where
                A: SeqAccess<'de>,
            {
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(HouseRef::Text(String::new()))
            }

            fn visit_map<A>(self, mut map: A) -> Result<HouseRef, A::Error>
            where
                A: MapAccess<'de>,
            {
                while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
                Ok(HouseRef::Text(String::new()))
            }

            fn visit_str<E>(self, value: &str) -> Result<HouseRef, E>
            where
                E: de::Error,
            {
                Ok(HouseRef::Text(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<HouseRef, E>
            where
                E: de::Error,
            {
                Ok(HouseRef::Text(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<HouseRef, E>
            where
                E: de::Error,
            {
                Ok(HouseRef::Number(value as f64))
            }

            fn visit_i64<E>(self, value: i64) -> Result<HouseRef, E>
            where
                E: de::Error,
            {
                Ok(HouseRef::Number(value as f64))
            }

            fn visit_f64<E>(self, value: f64) -> Result<HouseRef, E>
            where
                E: de::Error,
            {
                Ok(HouseRef::Number(value))
            }
        }

        deserializer.deserialize_any(HouseRefVisitor)
    }
}

/// `numberOfHouses` arrives as a number, a numeric string, an empty string or
/// null. Text is read up to its first non-digit ("3 houses" caps at 3).
/// Anything that does not start with a positive integer means "no cap".
fn deserialize_house_cap<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<HouseRef>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        HouseRef::Number(n) if n >= 1.0 && n <= f64::from(u32::MAX) => Some(n.trunc() as u32),
        HouseRef::Number(_) => None,
        HouseRef::Text(s) => {
            let digits: String = s.trim_start().chars().take_while(char::is_ascii_digit).collect();
            digits.parse::<u32>().ok().filter(|n| *n > 0)
        }
    }))
}

fn deserialize_null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// One street line inside a delivery group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreetRange {
    pub street_name: String,
    #[serde(default)]
    pub from_house: Option<HouseRef>,
    #[serde(default)]
    pub to_house: Option<HouseRef>,
    #[serde(default, deserialize_with = "deserialize_house_cap")]
    pub number_of_houses: Option<u32>,
}

impl StreetRange {
    pub fn new(street_name: &str) -> Self {
        Self { street_name: street_name.to_string(), from_house: None, to_house: None, number_of_houses: None }
    }

    pub fn with_range(mut self, from: impl Into<HouseRef>, to: impl Into<HouseRef>) -> Self {
        self.from_house = Some(from.into());
        self.to_house = Some(to.into());
        self
    }

    pub fn with_from(mut self, from: impl Into<HouseRef>) -> Self {
        self.from_house = Some(from.into());
        self
    }

    pub fn with_cap(mut self, houses: u32) -> Self {
        self.number_of_houses = Some(houses);
        self
    }
}

/// A delivery zone: streets delivered together under one opaque number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub group_number: i64,
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub streets: Vec<StreetRange>,
}

/// Ordered list of delivery groups
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteSpec {
    #[serde(default)]
    pub groups: Vec<Group>,
}

/// Counts reported alongside a freshly normalized route
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteOverview {
    pub total_groups: usize,
    pub total_streets: usize,
}

/// Raw envelope produced by the route-sheet extraction step
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractionResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub groups: Option<Vec<Group>>,
}

impl RouteSpec {
    /// Normalize an extraction envelope.
    ///
    /// A failed or empty extraction gives an empty route. Groups are ordered by
    /// ascending group number; street order inside a group is untouched.
    pub fn from_extraction(result: ExtractionResult) -> Self {
        let mut groups = match result.groups {
            Some(groups) if result.success => groups,
            _ => return Self::default(),
        };
        groups.sort_by_key(|g| g.group_number);
        Self { groups }
    }

    pub fn overview(&self) -> RouteOverview {
        RouteOverview {
            total_groups: self.groups.len(),
            total_streets: self.groups.iter().map(|g| g.streets.len()).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_house_ref_strips_non_digits() {
        assert_eq!(HouseRef::from("10123A").parse(), Some(10123));
        assert_eq!(HouseRef::from("#45").parse(), Some(45));
        assert_eq!(HouseRef::from(7204).parse(), Some(7204));
    }

    #[test]
    fn test_house_ref_without_digits_is_absent() {
        assert_eq!(HouseRef::from("abc").parse(), None);
        assert_eq!(HouseRef::from("").parse(), None);
        assert_eq!(HouseRef::from("0").parse(), None);
    }

    #[test]
    fn test_street_range_accepts_mixed_json() {
        let json = r#"{"streetName":"Hillcrest PT NW","fromHouse":"503","toHouse":511,"numberOfHouses":"3"}"#;
        let street: StreetRange = serde_json::from_str(json).unwrap();
        assert_eq!(street.from_house.as_ref().and_then(HouseRef::parse), Some(503));
        assert_eq!(street.to_house.as_ref().and_then(HouseRef::parse), Some(511));
        assert_eq!(street.number_of_houses, Some(3));
    }

    #[test]
    fn test_street_range_null_and_empty_fields() {
        let json = r#"{"streetName":"156 ST NW","fromHouse":"","toHouse":null,"numberOfHouses":null}"#;
        let street: StreetRange = serde_json::from_str(json).unwrap();
        assert_eq!(street.from_house.as_ref().and_then(HouseRef::parse), None);
        assert!(street.to_house.is_none());
        assert_eq!(street.number_of_houses, None);

        let json = r#"{"streetName":"156 ST NW","numberOfHouses":""}"#;
        let street: StreetRange = serde_json::from_str(json).unwrap();
        assert_eq!(street.number_of_houses, None);
    }

    #[test]
    fn test_house_cap_reads_leading_integer() {
        let cap = |raw: &str| {
            let json = format!(r#"{{"streetName":"Main ST","numberOfHouses":{}}}"#, raw);
            serde_json::from_str::<StreetRange>(&json).unwrap().number_of_houses
        };
        assert_eq!(cap(r#""3 houses""#), Some(3));
        assert_eq!(cap(r#"" 3.5""#), Some(3));
        assert_eq!(cap("3.5"), Some(3));
        assert_eq!(cap(r#""about 3""#), None);
        assert_eq!(cap(r#""0 left""#), None);
        assert_eq!(cap("true"), None);
    }

    #[test]
    fn test_odd_json_bounds_are_unreadable() {
        let json = r#"{"streetName":"Bad ST","fromHouse":true,"toHouse":[1,2]}"#;
        let street: StreetRange = serde_json::from_str(json).unwrap();
        assert_eq!(street.from_house.as_ref().and_then(HouseRef::parse), None);
        assert_eq!(street.to_house.as_ref().and_then(HouseRef::parse), None);

        let json = r#"{"streetName":"Bad ST","fromHouse":{"n":100},"toHouse":"104"}"#;
        let street: StreetRange = serde_json::from_str(json).unwrap();
        assert_eq!(street.from_house.as_ref().and_then(HouseRef::parse), None);
    }

    #[test]
    fn test_from_extraction_sorts_groups() {
        let json = r#"{"success":true,"groups":[
            {"groupNumber":3,"streets":[{"streetName":"A"}]},
            {"groupNumber":1,"streets":null},
            {"groupNumber":2,"streets":[{"streetName":"B"},{"streetName":"C"}]}
        ]}"#;
        let extraction: ExtractionResult = serde_json::from_str(json).unwrap();
        let route = RouteSpec::from_extraction(extraction);

        let order: Vec<i64> = route.groups.iter().map(|g| g.group_number).collect();
        assert_eq!(order, vec![1, 2, 3]);
        assert!(route.groups[0].streets.is_empty());
        assert_eq!(route.overview(), RouteOverview { total_groups: 3, total_streets: 3 });
    }

    #[test]
    fn test_from_extraction_failure_is_empty() {
        let extraction: ExtractionResult =
            serde_json::from_str(r#"{"success":false,"groups":[{"groupNumber":1}]}"#).unwrap();
        assert_eq!(RouteSpec::from_extraction(extraction), RouteSpec::default());

        let extraction: ExtractionResult = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert_eq!(RouteSpec::from_extraction(extraction).overview().total_groups, 0);
    }
}
