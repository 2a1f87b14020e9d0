//! Route description loading
//!
//! Accepts the three shapes upstream steps produce:
//! - a bare route: `{ "groups": [...] }`
//! - a wrapped route: `{ "routeData": { "groups": [...] } }`
//! - a raw extraction envelope: `{ "success": true, "groups": [...] }`

use crate::domain::route::{ExtractionResult, RouteSpec};
use anyhow::Context;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::info;

/// Parse a route from any of the accepted JSON shapes
pub fn parse_route(value: Value) -> anyhow::Result<RouteSpec> {
    if value.get("success").is_some() {
        let extraction: ExtractionResult =
            serde_json::from_value(value).context("Invalid extraction envelope")?;
        return Ok(RouteSpec::from_extraction(extraction));
    }

    let route_value = match value {
        Value::Object(mut map) if map.contains_key("routeData") => {
            map.remove("routeData").unwrap_or(Value::Null)
        }
        other => other,
    };
    serde_json::from_value(route_value).context("Invalid route description")
}

pub fn load_route<P: AsRef<Path>>(path: P) -> anyhow::Result<RouteSpec> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read route file {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse route file {}", path.display()))?;
    let route = parse_route(value).with_context(|| format!("In route file {}", path.display()))?;

    let overview = route.overview();
    info!(
        file = %path.display(),
        groups = %overview.total_groups,
        streets = %overview.total_streets,
        "route_loaded"
    );
    Ok(route)
}
