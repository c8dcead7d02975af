//! fastest-route: minimum travel-time route between two coordinates over
//! an OpenStreetMap drivable network.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use ruta_cli::{AppConfig, NetworkSource, Outcome, analyse, load_network, prompt_trip};
use ruta_core::{EntryOutcome, GeoPoint, RutaError, TripRequest, trip::parse_lat_lon};
use ruta_output::summary_text;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, help = "path to a .toml or .json run configuration")]
    config: Option<PathBuf>,
    #[arg(long, help = "saved Overpass API JSON response to load instead of downloading")]
    osm_json: Option<PathBuf>,
    #[arg(long, help = ".osm.pbf extract to load instead of downloading")]
    pbf: Option<PathBuf>,
    #[arg(long, value_parser = parse_point, requires = "destination", help = "origin as LAT,LON")]
    origin: Option<GeoPoint>,
    #[arg(long, value_parser = parse_point, requires = "origin", help = "destination as LAT,LON")]
    destination: Option<GeoPoint>,
    #[arg(long, help = "directory for route.geojson and the CSV files")]
    output_dir: Option<PathBuf>,
}

fn parse_point(s: &str) -> Result<GeoPoint, RutaError> {
    parse_lat_lon(s)
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        None => AppConfig::default(),
        Some(f) => {
            log::info!("reading configuration from {}", f.display());
            AppConfig::try_from(f.as_path())?
        }
    };
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }

    let trip = match (args.origin, args.destination) {
        (Some(o), Some(d)) => TripRequest::new(o, d),
        _ => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            let outcome =
                prompt_trip(&mut stdin.lock(), &mut stdout.lock(), &config.points_of_interest)
                    .context("reading coordinates")?;
            match outcome {
                EntryOutcome::Submitted(trip) => trip,
                EntryOutcome::Cancelled => {
                    println!("Operation cancelled by user.");
                    return Ok(());
                }
            }
        }
    };
    log::info!("routing from {} to {}", trip.origin(), trip.destination());

    let source = match (args.osm_json, args.pbf) {
        (Some(path), _) => NetworkSource::OverpassFile(path),
        (None, Some(path)) => NetworkSource::Pbf(path),
        (None, None) => NetworkSource::Overpass(config.overpass_query()),
    };
    let network = load_network(&config, &source).context("loading road network")?;

    match analyse(&config, &network, &trip)? {
        Outcome::Routed { summary, artifacts, .. } => {
            println!("{}", summary_text(&summary));
            for path in artifacts {
                println!("wrote {}", path.display());
            }
        }
        Outcome::NoRoute { from, to } => {
            println!("No route found between {from} and {to}.");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    run(args).inspect_err(|e| log::error!("fastest-route failed: {e:#}"))
}
