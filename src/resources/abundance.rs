//! Abundance field
//!
//! A body's packed blob fixes the mean abundance of each resource. The seed
//! fixes where on the surface it concentrates: every resource samples the
//! same noise volume through its own scale and shift.

use rayon::prelude::*;
use serde::Serialize;

use super::catalog::Resource;
use super::noise_field::{apply_poly, check_octaves, fbm, poly_params};
use crate::asteroid::constants::abundance::{
    MAX_MEAN_ABUNDANCE, MIN_TIER_OCTAVES, OCTAVE_TIERS, POINT_SCALE_MIN, POINT_SCALE_SPAN, POINT_SHIFT_RANGE,
    RESOURCE_SLOTS, SLOTS_PER_HALF, SLOT_BITS,
};
use crate::asteroid::seed::seed;
use crate::asteroid::size::surface_area;
use crate::config::EngineConfig;
use crate::error::LotResult;
use crate::lattice::{checked_index, lattice_point};
use crate::util::packed::PackedU256;
use crate::util::vec3::Vec3;

/// Per-resource parameters carried by the packed blob
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AbundanceParameters {
    /// Mean surface abundance in [0, 1.023], three-decimal resolution
    pub abundance: f64,
}

/// Decoded blob: one parameter record per resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AbundanceTable {
    params: [AbundanceParameters; RESOURCE_SLOTS],
}

impl AbundanceTable {
    #[inline]
    pub fn get(&self, resource: Resource) -> AbundanceParameters {
        self.params[resource.id() as usize - 1]
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Resource, AbundanceParameters)> + '_ {
        Resource::ALL.iter().copied().zip(self.params.iter().copied())
    }
}

/// Unpack the 22 ten-bit abundance slots
///
/// Slots 1..=11 sit in the low 128 bits, 12..=22 in the high 128 bits, each
/// at bit `10 * k` within its half.
pub fn decode_abundance_parameters(blob: &PackedU256) -> AbundanceTable {
    let mut table = AbundanceTable::default();
    for (slot, entry) in table.params.iter_mut().enumerate() {
        let half = (slot / SLOTS_PER_HALF) as u32;
        let position = (slot % SLOTS_PER_HALF) as u32;
        let raw = blob.bits(half * 128 + position * SLOT_BITS, SLOT_BITS);
        entry.abundance = raw as f64 / 1000.0;
    }
    table
}

/// Everything needed to sample one resource's field on one body
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AbundanceSettings {
    pub abundance: f64,
    pub octaves: u32,
    pub poly_params: [f64; 8],
    pub point_scale: f64,
    pub point_shift: Vec3,
}

/// Octave count for a body of `surface_area` lots
pub fn octaves_for_area(surface_area: u32) -> u32 {
    OCTAVE_TIERS
        .iter()
        .find(|(min_area, _)| surface_area >= *min_area)
        .map_or(MIN_TIER_OCTAVES, |&(_, octaves)| octaves)
}

#[inline]
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Sampling settings for one resource on one body
pub fn abundance_map_settings(
    body_id: u64,
    resource: Resource,
    blob: &PackedU256,
) -> LotResult<AbundanceSettings> {
    let octaves = octaves_for_area(surface_area(body_id)?);
    let stream = seed(body_id)?.derive(&resource.id().to_be_bytes());
    let shift = |word: usize| round3((stream.unit_interval(word) * 2.0 - 1.0) * POINT_SHIFT_RANGE);

    Ok(AbundanceSettings {
        abundance: decode_abundance_parameters(blob).get(resource).abundance,
        octaves,
        poly_params: poly_params(octaves)?,
        point_scale: POINT_SCALE_MIN + stream.unit_interval(3) * POINT_SCALE_SPAN,
        point_shift: Vec3::new(shift(0), shift(1), shift(2)),
    })
}

/// Abundance in [0, 1] at a unit-sphere position
pub fn abundance_at(position: Vec3, settings: &AbundanceSettings) -> LotResult<f64> {
    check_octaves(settings.octaves)?;
    Ok(sample(position, settings))
}

/// Map a corrected noise percentile onto an abundance
///
/// `percentile^k` with `k = 1/mean - 1` has mean `mean` over a uniform
/// percentile, so the base sets the surface mean while the top percentiles
/// still approach 1. Means above `MAX_MEAN_ABUNDANCE` are capped there.
#[inline]
fn shape_percentile(percentile: f64, base: f64) -> f64 {
    if base <= 0.0 {
        return 0.0;
    }
    let mean = base.min(MAX_MEAN_ABUNDANCE);
    percentile.clamp(0.0, 1.0).powf(1.0 / mean - 1.0)
}

/// Sampling without validation, for callers that checked the settings
#[inline]
fn sample(position: Vec3, settings: &AbundanceSettings) -> f64 {
    if settings.abundance <= 0.0 {
        return 0.0;
    }
    let point = position * settings.point_scale + settings.point_shift;
    let percentile = apply_poly(fbm(point, settings.octaves), &settings.poly_params);
    shape_percentile(percentile, settings.abundance)
}

/// Abundance of `resource` at one lot of a body
pub fn abundance_at_lot(
    body_id: u64,
    lot_index: i64,
    resource: Resource,
    blob: &PackedU256,
) -> LotResult<f64> {
    let tally = surface_area(body_id)?;
    let i0 = checked_index(lot_index, tally)?;
    let settings = abundance_map_settings(body_id, resource, blob)?;
    abundance_at(lattice_point(i0, tally), &settings)
}

/// Abundance of `resource` at every lot of a body, in lot order
pub fn abundance_map(body_id: u64, resource: Resource, blob: &PackedU256) -> LotResult<Vec<f64>> {
    abundance_map_with(body_id, resource, blob, &EngineConfig::default())
}

pub fn abundance_map_with(
    body_id: u64,
    resource: Resource,
    blob: &PackedU256,
    config: &EngineConfig,
) -> LotResult<Vec<f64>> {
    let tally = surface_area(body_id)?;
    let settings = abundance_map_settings(body_id, resource, blob)?;
    check_octaves(settings.octaves)?;

    let values = if tally as usize >= config.parallel_threshold {
        tracing::debug!(body_id, lots = tally, resource = %resource, "Sampling abundance map in parallel");
        (0..tally)
            .into_par_iter()
            .map(|i| sample(lattice_point(i, tally), &settings))
            .collect()
    } else {
        (0..tally)
            .map(|i| sample(lattice_point(i, tally), &settings))
            .collect()
    };
    Ok(values)
}
