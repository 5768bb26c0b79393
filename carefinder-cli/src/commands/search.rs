//! Facility search command.

use std::path::PathBuf;

use carefinder::facility::RankedFacility;
use clap::Args;
use tracing::info;

use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for `carefinder search`.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Latitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude in decimal degrees
    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,

    /// Search radius in kilometres (default: search.default_radius_km from config)
    #[arg(long)]
    pub radius: Option<f64>,

    /// Print results as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Config file to use instead of ~/.carefinder/config.ini
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Run a facility search and print the results.
pub async fn run(args: SearchArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(args.config.as_deref())?;
    runner.log_startup("search");

    let orchestrator = runner.create_orchestrator()?;
    let radius = args
        .radius
        .unwrap_or(runner.config().search.default_radius_km);

    let results = orchestrator
        .find_facilities(args.lat, args.lng, radius)
        .await?;
    info!(count = results.len(), "Search returned results");

    if args.json {
        let json = serde_json::to_string_pretty(&results)
            .map_err(|e| CliError::Output(e.to_string()))?;
        println!("{}", json);
    } else {
        print!("{}", format_table(&results, args.lat, args.lng, radius));
    }

    Ok(())
}

/// Render results as a fixed-width table.
fn format_table(results: &[RankedFacility], lat: f64, lng: f64, radius_km: f64) -> String {
    let mut out = format!(
        "{} facilities within {} km of {}, {}\n",
        results.len(),
        radius_km,
        lat,
        lng
    );
    if results.is_empty() {
        return out;
    }

    out.push('\n');
    out.push_str(&format!(
        "{:>3}  {:>6}  {:>7}  {:>6}  {:<4}  {:<8}  {}\n",
        "#", "Score", "Km", "Rating", "Peds", "Type", "Name / Address"
    ));
    for (i, r) in results.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}  {:>6.3}  {:>7.1}  {:>6.1}  {:<4}  {:<8}  {}\n",
            i + 1,
            r.score,
            r.distance_km,
            r.rating,
            if r.is_pediatric { "yes" } else { "" },
            r.facility.facility_type.as_str(),
            r.name()
        ));
        out.push_str(&format!("{:>50}{}\n", "", r.facility.address));
    }
    out
}
