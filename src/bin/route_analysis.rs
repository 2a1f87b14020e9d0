//! Route Analysis - spot likely misread house-number ranges before geocoding
//!
//! Usage:
//!   route-analysis --route route.json
//!   route-analysis --route route.json --span 60 --json

use clap::Parser;
use delivery_route::infra::Config;
use delivery_route::io::load_route;
use delivery_route::services::analyze_ranges;
use tracing::info;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// Route Analysis - estimate candidate counts and flag suspicious ranges
#[derive(Parser, Debug)]
#[command(name = "route-analysis", version, about, long_about = None)]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Route description JSON
    #[arg(short, long)]
    route: String,

    /// Span above which a range is flagged (overrides [analysis] suspicious_span)
    #[arg(short, long)]
    span: Option<u32>,

    /// Print the analysis as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so --json output stays clean
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::load_from_path(&Config::resolve_config_path(args.config.as_deref()));
    let threshold = args.span.unwrap_or_else(|| config.suspicious_span());

    let route = load_route(&args.route)?;
    let analysis = analyze_ranges(&route, threshold);
    info!(
        streets = %analysis.streets.len(),
        suspicious = %analysis.suspicious().count(),
        "range_analysis_complete"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    let mut current_group = None;
    for finding in &analysis.streets {
        if current_group != Some(finding.group_number) {
            println!("Group {}:", finding.group_number);
            current_group = Some(finding.group_number);
        }
        let flag = if finding.suspicious { "  SUSPICIOUS - likely misread" } else { "" };
        println!(
            "  {:<32} {:>6} - {:<6} span {:>5} (~{} houses){}",
            finding.street_name,
            finding.from_house,
            finding.to_house,
            finding.span,
            finding.estimated_houses,
            flag
        );
    }

    println!();
    println!("Total estimated candidates: {}", analysis.total_estimated_candidates);
    println!("Suspicious ranges (span > {}): {}", threshold, analysis.suspicious().count());
    for finding in analysis.suspicious() {
        println!(
            "  Group {}: {} {} - {} ({} span)",
            finding.group_number, finding.street_name, finding.from_house, finding.to_house, finding.span
        );
    }

    Ok(())
}
