//! Surface distances and hopper travel times

use serde::{Deserialize, Serialize};

use super::{checked_index, lattice_point};
use crate::asteroid::constants::travel;
use crate::asteroid::size::{radius, surface_area};
use crate::config::EngineConfig;
use crate::error::{LotError, LotResult};

/// Trapezoidal velocity profile: accelerate, cruise, decelerate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TravelModel {
    /// Cruise speed in km/s
    pub max_speed: f64,
    /// Acceleration and deceleration magnitude in km/s²
    pub acceleration: f64,
}

impl Default for TravelModel {
    fn default() -> Self {
        Self {
            max_speed: travel::MAX_SPEED,
            acceleration: travel::ACCELERATION,
        }
    }
}

impl TravelModel {
    /// Distance consumed by spinning up to cruise speed and back down
    #[inline]
    pub fn crossover_distance(&self) -> f64 {
        self.max_speed * self.max_speed / self.acceleration
    }

    /// Seconds to cover `distance` km starting and ending at rest
    pub fn time_for_distance(&self, distance: f64) -> f64 {
        if distance <= 0.0 {
            return 0.0;
        }
        if distance >= self.crossover_distance() {
            distance / self.max_speed + self.max_speed / self.acceleration
        } else {
            // Never reaches cruise speed
            2.0 * (distance / self.acceleration).sqrt()
        }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

fn check_bonus(name: &str, value: f64) -> LotResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(LotError::invalid(format!(
            "{} must be a positive finite number, got {}",
            name, value
        )));
    }
    Ok(())
}

/// Great-circle distance in km between two lots of a body
pub fn lot_distance(body_id: u64, origin_lot: i64, dest_lot: i64) -> LotResult<f64> {
    let tally = surface_area(body_id)?;
    let origin = checked_index(origin_lot, tally)?;
    let dest = checked_index(dest_lot, tally)?;
    if origin == dest {
        return Ok(0.0);
    }
    let p = lattice_point(origin, tally);
    let q = lattice_point(dest, tally);
    Ok(p.angle_to(q) * radius(body_id)?)
}

/// Whole seconds for a hopper to travel between two lots
///
/// `dist_bonus` shortens the effective distance and `time_bonus` speeds up
/// the whole trip. Trips within the free transport radius take no time.
pub fn lot_travel_time(
    body_id: u64,
    origin_lot: i64,
    dest_lot: i64,
    time_bonus: f64,
    dist_bonus: f64,
) -> LotResult<f64> {
    lot_travel_time_with(
        body_id,
        origin_lot,
        dest_lot,
        time_bonus,
        dist_bonus,
        &EngineConfig::default(),
    )
}

pub fn lot_travel_time_with(
    body_id: u64,
    origin_lot: i64,
    dest_lot: i64,
    time_bonus: f64,
    dist_bonus: f64,
    config: &EngineConfig,
) -> LotResult<f64> {
    check_bonus("time_bonus", time_bonus)?;
    check_bonus("dist_bonus", dist_bonus)?;

    let distance = lot_distance(body_id, origin_lot, dest_lot)? / dist_bonus;
    if round_to(distance, travel::DISTANCE_DECIMALS) <= travel::FREE_TRANSPORT_RADIUS {
        return Ok(0.0);
    }
    let elapsed = config.travel_model().time_for_distance(distance) / time_bonus;
    Ok(elapsed.ceil())
}
