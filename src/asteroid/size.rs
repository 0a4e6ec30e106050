//! Size and shape model
//!
//! Radius follows a power law over the identifier so most bodies are small
//! and a long tail is large. Lot count is the body's surface area in km²,
//! one lot per square kilometre.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::constants::size;
use super::spectral::SpectralType;
use crate::error::{LotError, LotResult};

/// Coarse size bucket for catalog display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeClass {
    Small,
    Medium,
    Large,
    Huge,
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SizeClass::Small => "Small",
            SizeClass::Medium => "Medium",
            SizeClass::Large => "Large",
            SizeClass::Huge => "Huge",
        };
        f.write_str(name)
    }
}

fn check_body_id(body_id: u64) -> LotResult<()> {
    if body_id == 0 {
        return Err(LotError::invalid("body id must be at least 1"));
    }
    Ok(())
}

/// Radius in km
///
/// `MAX_RADIUS / id^0.475`, so the home body gets exactly `MAX_RADIUS`.
/// Identifiers past the catalog end clamp at `MIN_RADIUS`.
pub fn radius(body_id: u64) -> LotResult<f64> {
    check_body_id(body_id)?;
    if body_id == size::HOME_ASTEROID_ID {
        return Ok(size::MAX_RADIUS);
    }
    let r = size::MAX_RADIUS / (body_id as f64).powf(size::RADIUS_EXPONENT);
    Ok(r.max(size::MIN_RADIUS))
}

/// Lot count of a body: `floor(4πr²)`, never below 1
pub fn surface_area(body_id: u64) -> LotResult<u32> {
    let r = radius(body_id)?;
    Ok(surface_area_for_radius(r))
}

/// Lot count for an explicit radius in km
#[inline]
pub fn surface_area_for_radius(radius_km: f64) -> u32 {
    let area = (4.0 * PI * radius_km * radius_km).floor();
    (area as u32).max(1)
}

/// Mass in tonnes from class density (kg/m³) and radius (km)
pub fn mass(spectral: SpectralType, radius_km: f64) -> f64 {
    let r_m = radius_km * 1000.0;
    spectral.density() * (4.0 / 3.0) * PI * (r_m * r_m * r_m) / 1000.0
}

pub fn size_class(radius_km: f64) -> SizeClass {
    if radius_km <= size::SMALL_MAX_RADIUS {
        SizeClass::Small
    } else if radius_km <= size::MEDIUM_MAX_RADIUS {
        SizeClass::Medium
    } else if radius_km <= size::LARGE_MAX_RADIUS {
        SizeClass::Large
    } else {
        SizeClass::Huge
    }
}

/// Default designation, e.g. `104-CMS`
pub fn base_name(body_id: u64, spectral: SpectralType) -> LotResult<String> {
    check_body_id(body_id)?;
    Ok(format!("{}-{}", body_id, spectral.name().to_uppercase()))
}

/// Scanning speed multiplier earned by early purchases
///
/// Earlier purchase orders scan faster; bodies without an order scan at base speed.
pub fn scan_boost_from_purchase_order(purchase_order: Option<u32>) -> u8 {
    match purchase_order {
        None => 1,
        Some(n) if n <= 100 => 4,
        Some(n) if n <= 1_000 => 3,
        Some(n) if n <= 10_000 => 2,
        Some(_) => 1,
    }
}
