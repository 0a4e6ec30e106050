use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use asteroid_lots::asteroid::{self, SizeClass, SpectralType};
use asteroid_lots::config::EngineConfig;
use asteroid_lots::lattice::{
    self, closest_lots, region_of, region_tally, travel::lot_travel_time_with, ClosestLotsQuery,
};
use asteroid_lots::resources::{bonuses_of, rarity, Bonus, Rarity};
use asteroid_lots::Vec3;

const USAGE: &str = "usage: asteroid-lots <body_id> [spectral_id] [lot_index] [bonus_register]";

/// Nearest neighbours reported for the inspected lot
const NEIGHBOUR_COUNT: u32 = 6;

#[derive(Debug, Serialize)]
struct Neighbour {
    lot: u32,
    distance_km: f64,
    travel_seconds: f64,
}

#[derive(Debug, Serialize)]
struct LotSummary {
    index: u32,
    position: Vec3,
    region: u32,
    nearest: Vec<Neighbour>,
}

#[derive(Debug, Serialize)]
struct BodySummary {
    id: u64,
    name: String,
    spectral_type: SpectralType,
    radius_km: f64,
    size: SizeClass,
    mass_tonnes: f64,
    lots: u32,
    regions: u32,
    seed: String,
    bonuses: Vec<Bonus>,
    rarity: Rarity,
    lot: LotSummary,
}

fn parse_arg<T: std::str::FromStr>(args: &[String], index: usize, name: &str) -> Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    args.get(index)
        .map(|raw| raw.parse::<T>().with_context(|| format!("invalid {} '{}'", name, raw)))
        .transpose()
}

fn summarize(
    config: &EngineConfig,
    body_id: u64,
    spectral: SpectralType,
    lot_index: u32,
    register: u32,
) -> Result<BodySummary> {
    let radius = asteroid::radius(body_id)?;
    let lots = asteroid::surface_area(body_id)?;
    let regions = region_tally(lots);
    let position = lattice::lot_position(body_id, lot_index as i64, None)
        .with_context(|| format!("lot {} does not exist on body {}", lot_index, body_id))?;

    let query = ClosestLotsQuery::around_lot(lot_index, lots).take(NEIGHBOUR_COUNT);
    let nearest = closest_lots(&query)?
        .into_iter()
        .map(|lot| -> Result<Neighbour> {
            let distance_km = lattice::lot_distance(body_id, lot_index as i64, lot as i64)?;
            let travel_seconds =
                lot_travel_time_with(body_id, lot_index as i64, lot as i64, 1.0, 1.0, config)?;
            Ok(Neighbour {
                lot,
                distance_km,
                travel_seconds,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    debug!(lot_index, neighbours = nearest.len(), "Resolved nearest lots");

    let bonuses = bonuses_of(register, spectral);
    Ok(BodySummary {
        id: body_id,
        name: asteroid::base_name(body_id, spectral)?,
        spectral_type: spectral,
        radius_km: radius,
        size: asteroid::size_class(radius),
        mass_tonnes: asteroid::mass(spectral, radius),
        lots,
        regions,
        seed: asteroid::seed(body_id)?.to_hex(),
        rarity: rarity(&bonuses),
        bonuses,
        lot: LotSummary {
            index: lot_index,
            position,
            region: region_of(position, regions)?,
            nearest,
        },
    })
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = EngineConfig::load_or_default();
    if let Err(e) = config.validate() {
        bail!("invalid configuration: {}", e);
    }
    info!(
        "Asteroid lots inspector v{} (parallel_threshold={})",
        env!("CARGO_PKG_VERSION"),
        config.parallel_threshold
    );

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(body_id) = parse_arg::<u64>(&args, 0, "body_id")? else {
        bail!(USAGE);
    };
    let spectral_id = parse_arg::<u32>(&args, 1, "spectral_id")?.unwrap_or(1);
    let lot_index = parse_arg::<u32>(&args, 2, "lot_index")?.unwrap_or(1);
    let register = parse_arg::<u32>(&args, 3, "bonus_register")?.unwrap_or(0);

    let spectral = SpectralType::from_id(spectral_id).context("unknown spectral type")?;
    let summary = summarize(&config, body_id, spectral, lot_index, register)?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
