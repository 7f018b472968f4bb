#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Command-line orchestrator for planning area connectivity scoring.
//!
//! Loads planning area boundaries and facility point feeds from local
//! `GeoJSON` files (fetched beforehand by whatever means), resolves every
//! point to its planning area, scores the populated areas, and writes the
//! CSV table and scored overlay consumed by the map frontend.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use transit_map_analytics::{aggregate, config, scorer};
use transit_map_analytics_models::ScoringConfig;
use transit_map_geography::{boundaries, points, registry};
use transit_map_geography_models::{BoundaryFieldMapping, FacilityCategory, GeoPoint};
use transit_map_spatial::AreaIndex;

#[derive(Parser)]
#[command(name = "transit-map", about = "Planning area connectivity scoring toolchain")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score planning areas from boundary and facility point files
    Score(ScoreArgs),
    /// List the embedded planning area registry
    Areas,
}

#[derive(Args)]
struct ScoreArgs {
    /// Planning area boundaries (`GeoJSON` `FeatureCollection`)
    #[arg(long)]
    boundaries: PathBuf,

    /// Property field carrying the area name
    #[arg(long, default_value = "PLN_AREA_N")]
    name_field: String,

    /// Property field carrying the population, when the file has one
    #[arg(long)]
    population_field: Option<String>,

    /// Bus stop locations (`GeoJSON` points)
    #[arg(long)]
    bus_stops: Option<PathBuf>,

    /// MRT/LRT station locations (`GeoJSON` points)
    #[arg(long)]
    mrt_stations: Option<PathBuf>,

    /// Taxi locations (`GeoJSON` points)
    #[arg(long)]
    taxis: Option<PathBuf>,

    /// Carpark locations (`GeoJSON` points)
    #[arg(long)]
    carparks: Option<PathBuf>,

    /// Scoring weights/divisors override (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the score table as CSV to this path
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the scored GeoJSON overlay to this path
    #[arg(long)]
    geojson: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Score(args) => run_score(&args),
        Commands::Areas => {
            run_areas();
            Ok(())
        }
    }
}

fn run_score(args: &ScoreArgs) -> Result<(), Box<dyn std::error::Error>> {
    let fields = BoundaryFieldMapping {
        name: args.name_field.clone(),
        population: args.population_field.clone(),
    };

    let boundary_doc = std::fs::read_to_string(&args.boundaries)?;
    let mut areas = boundaries::from_geojson(&boundary_doc, &fields)?;
    registry::merge_populations(&mut areas);

    let scoring_config = match &args.config {
        Some(path) => config::from_toml_str(&std::fs::read_to_string(path)?)?,
        None => ScoringConfig::default(),
    };

    let mut points_by_category = BTreeMap::new();
    let category_files = [
        (FacilityCategory::BusStops, args.bus_stops.as_deref()),
        (FacilityCategory::MrtStations, args.mrt_stations.as_deref()),
        (FacilityCategory::Taxis, args.taxis.as_deref()),
        (FacilityCategory::Carparks, args.carparks.as_deref()),
    ];
    for (category, path) in category_files {
        points_by_category.insert(category, load_points(path, category)?);
    }

    let index = AreaIndex::new(areas);
    let counts = aggregate::count_facilities(&index, &points_by_category);
    let records = scorer::score_all(index.areas(), &counts, &scoring_config);

    if let Some(path) = &args.csv {
        transit_map_generate::csv_export::write_csv_file(&records, path)?;
    }
    if let Some(path) = &args.geojson {
        transit_map_generate::overlay::write_overlay_file(index.areas(), &records, path)?;
    }

    println!("{:<26} {:>5}  band", "planning area", "score");
    for record in &records {
        println!(
            "{:<26} {:>5}  {}",
            record.area,
            record.total_score,
            record.band().label()
        );
    }

    Ok(())
}

fn load_points(
    path: Option<&Path>,
    category: FacilityCategory,
) -> Result<Vec<GeoPoint>, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        log::info!("No {} file supplied; tallying 0", category.label());
        return Ok(Vec::new());
    };

    let doc = std::fs::read_to_string(path)?;
    let loaded = points::from_geojson(&doc)?;
    log::info!(
        "Loaded {} {} from {}",
        loaded.len(),
        category.label(),
        path.display()
    );
    Ok(loaded)
}

fn run_areas() {
    let areas = registry::all_areas();
    println!("{:<26} {:>10}  centroid", "planning area", "population");
    for area in &areas {
        println!(
            "{:<26} {:>10}  ({:.4}, {:.4})",
            area.name, area.population, area.centroid.lat, area.centroid.lon
        );
    }
}
