//! delivery-route - prepares a delivery route for planning
//!
//! Expands the route's house-number ranges, classifies each candidate against
//! recorded geocoding responses, drops per-zone outliers and writes a JSON
//! report for review.
//!
//! Module structure:
//! - `domain/` - Route, address and report types
//! - `services/` - Generator, classifier, dispatch, proximity filter, aggregator
//! - `io/` - Route files, recorded responses, report output
//! - `infra/` - Config, metrics

use anyhow::Context;
use clap::Parser;
use delivery_route::infra::{Config, Metrics};
use delivery_route::io::{load_route, RecordedResponses, ReportWriter};
use delivery_route::services::Pipeline;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// Turn a route description into a geocoded, clustered address report
#[derive(Parser, Debug)]
#[command(name = "delivery-route", version, about)]
struct Args {
    /// Path to TOML configuration file (falls back to ROUTE_CONFIG, then config/route.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Route description JSON (bare, wrapped in routeData, or extraction envelope)
    #[arg(short, long)]
    route: String,

    /// Recorded provider responses, a JSON object keyed by full address
    #[arg(short = 'g', long)]
    responses: String,

    /// Report output path (overrides [output] report_file)
    #[arg(short, long)]
    output: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Default: INFO, use RUST_LOG=debug for per-address classification
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        git = env!("GIT_VERSION"),
        "delivery_route_starting"
    );

    let args = Args::parse();

    let config_path = Config::resolve_config_path(args.config.as_deref());
    let config = Config::load_from_path(&config_path);
    let report_file = args.output.clone().unwrap_or_else(|| config.report_file().to_string());
    info!(
        config_file = %config.config_file(),
        locality = %config.locality(),
        concurrency = %config.concurrency(),
        max_walking_distance_m = %config.max_walking_distance_m(),
        report_file = %report_file,
        "config_loaded"
    );

    let route = load_route(&args.route)?;
    let source = Arc::new(RecordedResponses::from_file(&args.responses)?);

    let pipeline = Pipeline::new(&config, Arc::new(Metrics::new()));
    let report = pipeline.run(&route, source).await;
    pipeline.metrics().snapshot().log();

    for group in &report.groups {
        info!(group = %group.group_number, houses = %group.total_houses, "group_summary");
        for street in &group.streets {
            let houses: Vec<String> =
                street.addresses.iter().map(|a| a.house_number.to_string()).collect();
            info!(
                group = %group.group_number,
                street = %street.street_name,
                count = %houses.len(),
                houses = %houses.join(", "),
                "street_summary"
            );
        }
    }

    ReportWriter::new(&report_file)
        .write(&report)
        .with_context(|| format!("Report not written to {}", report_file))?;

    info!(
        houses = %report.summary.total_houses,
        candidates = %report.summary.total_candidates,
        not_found = %report.summary.not_found,
        discarded_proximity = %report.summary.discarded_due_to_proximity,
        "delivery_route_complete"
    );
    Ok(())
}
