//! Lattice addressing
//!
//! Lots are placed on the unit sphere with a golden-angle (Fibonacci) spiral:
//! lot 1 sits on the north pole, lot N on the south pole, and the rest wind
//! between them at nearly equal spacing. Region centers use the same spiral
//! with fewer points.
//!
//! The mapping depends on the lot tally. Index 13 on a 13-lot body and index
//! 13 on a 250000-lot body are different points.

pub mod spatial;
pub mod travel;

use rayon::prelude::*;

use crate::asteroid::constants::lattice::GOLDEN_ANGLE;
use crate::asteroid::size::surface_area;
use crate::config::EngineConfig;
use crate::error::{LotError, LotResult};
use crate::util::vec3::Vec3;

pub use spatial::{
    closest_lots, region_of, region_tally, regions_of_positions, ClosestLotsQuery, QueryCenter,
    RegionGrid,
};
pub use travel::{lot_distance, lot_travel_time, TravelModel};

/// Point `i0` (0-based) of an `n`-point spiral
///
/// Callers guarantee `i0 < n`.
#[inline]
pub fn lattice_point(i0: u32, n: u32) -> Vec3 {
    if n <= 1 {
        return Vec3::UP;
    }
    let i = i0 as f64;
    let y = 1.0 - (i / (n - 1) as f64) * 2.0;
    let r = (1.0 - y * y).max(0.0).sqrt();
    let theta = GOLDEN_ANGLE * i;
    Vec3::new(theta.cos() * r, y, theta.sin() * r)
}

/// Check a 1-based lot index against a tally and return it 0-based
#[inline]
pub(crate) fn checked_index(lot_index: i64, lot_tally: u32) -> LotResult<u32> {
    if lot_index < 1 || lot_index > lot_tally as i64 {
        return Err(LotError::InvalidIndex {
            index: lot_index,
            tally: lot_tally,
        });
    }
    Ok((lot_index - 1) as u32)
}

/// Resolve an optional tally against the body's surface area
#[inline]
pub(crate) fn resolve_tally(body_id: u64, lot_tally: Option<u32>) -> LotResult<u32> {
    match lot_tally {
        Some(0) => Err(LotError::invalid("lot tally must be at least 1")),
        Some(n) => Ok(n),
        None => surface_area(body_id),
    }
}

/// Unit-sphere position of a lot
///
/// `lot_tally` defaults to the body's surface area. Pass it explicitly only
/// when the index was generated against a different tally.
pub fn lot_position(body_id: u64, lot_index: i64, lot_tally: Option<u32>) -> LotResult<Vec3> {
    let tally = resolve_tally(body_id, lot_tally)?;
    let i0 = checked_index(lot_index, tally)?;
    Ok(lattice_point(i0, tally))
}

/// Positions of every lot of an `lot_tally`-point lattice, in index order
pub fn lot_positions(lot_tally: u32) -> Vec<Vec3> {
    lot_positions_with(lot_tally, &EngineConfig::default())
}

pub fn lot_positions_with(lot_tally: u32, config: &EngineConfig) -> Vec<Vec3> {
    if lot_tally as usize >= config.parallel_threshold {
        tracing::debug!(lot_tally, "Generating lot positions in parallel");
        (0..lot_tally)
            .into_par_iter()
            .map(|i| lattice_point(i, lot_tally))
            .collect()
    } else {
        (0..lot_tally).map(|i| lattice_point(i, lot_tally)).collect()
    }
}
