//! Gazetteer - one-shot proximity query over a CSV of coordinates
//!
//! Loads an address list from a CSV file (ids follow row order, starting
//! at 1), runs a single radius search around one of the loaded
//! addresses, and prints the matches nearest-first.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use csv::Writer;
use serde::Deserialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use gazetteer_core::address::{AddressId, ProximityMatch};
use gazetteer_core::config::{GeoConfig, ServiceConfig};
use gazetteer_core::point::Point;
use gazetteer_core::MEAN_EARTH_RADIUS_KM;
use gazetteer_service::AddressBook;
use gazetteer_store::MemoryStore;

#[derive(Parser)]
#[command(name = "gazetteer")]
#[command(about = "Load an address CSV and list everything within a radius of one address")]
struct Args {
    /// Input CSV with a `latitude,longitude` header row
    #[arg(long, short)]
    input: String,

    /// Id of the origin address (ids follow row order, starting at 1)
    #[arg(long)]
    origin_id: i64,

    /// Search radius in kilometers (inclusive)
    #[arg(long)]
    radius_km: f64,

    /// Sphere radius used for distances, in kilometers
    #[arg(long, default_value_t = MEAN_EARTH_RADIUS_KM)]
    earth_radius_km: f64,

    /// Output CSV (id, latitude, longitude, distance_km). If omitted, prints a table to stdout.
    #[arg(long, short)]
    out: Option<String>,

    /// Print matches as JSON instead of a table
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    latitude: f64,
    longitude: f64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = ServiceConfig {
        geo: GeoConfig {
            earth_radius_km: args.earth_radius_km,
        },
        ..Default::default()
    };
    let book = AddressBook::new(Arc::new(MemoryStore::new()), config)?;

    let loaded = load_csv(&book, &args.input).await?;
    info!("Loaded {} addresses from {}", loaded, args.input);

    let matches = book
        .find_nearby(AddressId::from(args.origin_id), args.radius_km)
        .await
        .with_context(|| {
            format!(
                "searching {} km around address {}",
                args.radius_km, args.origin_id
            )
        })?;
    info!("Found {} addresses within {} km", matches.len(), args.radius_km);

    if let Some(out_path) = args.out {
        write_csv(&matches, &out_path)?;
        println!("Wrote {} matches to {}", matches.len(), out_path);
    } else if args.json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else {
        print_table(&matches);
    }

    Ok(())
}

/// Load every CSV row into the address book, in row order
async fn load_csv(book: &AddressBook, path: &str) -> Result<usize> {
    let mut reader = csv::Reader::from_path(path).with_context(|| format!("opening {path}"))?;
    let mut count = 0usize;
    for row in reader.deserialize() {
        let row: CsvRow = row.with_context(|| format!("parsing row {} of {path}", count + 1))?;
        let point = Point::new(row.latitude, row.longitude)
            .with_context(|| format!("row {} of {path}", count + 1))?;
        book.add(point).await?;
        count += 1;
    }
    Ok(count)
}

fn write_csv(matches: &[ProximityMatch], out_path: &str) -> Result<()> {
    let mut wtr =
        Writer::from_path(out_path).with_context(|| format!("creating CSV {out_path}"))?;
    wtr.write_record(["id", "latitude", "longitude", "distance_km"])?;
    for m in matches {
        wtr.write_record(&[
            m.address.id.to_string(),
            m.address.point.latitude().to_string(),
            m.address.point.longitude().to_string(),
            format!("{:.6}", m.distance_km),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn print_table(matches: &[ProximityMatch]) {
    if matches.is_empty() {
        println!("No addresses within range");
        return;
    }
    println!(
        "{:>6}  {:>12}  {:>12}  {:>12}",
        "id", "latitude", "longitude", "distance_km"
    );
    for m in matches {
        println!(
            "{:>6}  {:>12.6}  {:>12.6}  {:>12.3}",
            m.address.id.value(),
            m.address.point.latitude(),
            m.address.point.longitude(),
            m.distance_km
        );
    }
}
