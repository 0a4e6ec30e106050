//! Multi-octave simplex noise and its distribution correction
//!
//! Raw fBm clusters around zero. The correction polynomial for each octave
//! count stretches it toward a uniform spread on [0, 1] centered at 0.5.

use std::sync::OnceLock;

use noise::{Fbm, MultiFractal, NoiseFn, Simplex};

use crate::asteroid::constants::abundance::{
    FBM_LACUNARITY, FBM_PERSISTENCE, MAX_OCTAVES, MIN_OCTAVES, NOISE_SEED, SIMPLEX_POLY_FIT,
};
use crate::error::{LotError, LotResult};
use crate::util::vec3::Vec3;

/// One fBm generator per supported octave count, index 0 = `MIN_OCTAVES`
static FBM_BY_OCTAVES: OnceLock<Vec<Fbm<Simplex>>> = OnceLock::new();

fn fbm_generator(octaves: u32) -> &'static Fbm<Simplex> {
    let generators = FBM_BY_OCTAVES.get_or_init(|| {
        (MIN_OCTAVES..=MAX_OCTAVES)
            .map(|octaves| {
                Fbm::<Simplex>::new(NOISE_SEED)
                    .set_octaves(octaves as usize)
                    .set_persistence(FBM_PERSISTENCE)
                    .set_lacunarity(FBM_LACUNARITY)
            })
            .collect()
    });
    let slot = octaves.clamp(MIN_OCTAVES, MAX_OCTAVES) - MIN_OCTAVES;
    &generators[slot as usize]
}

pub fn check_octaves(octaves: u32) -> LotResult<()> {
    if !(MIN_OCTAVES..=MAX_OCTAVES).contains(&octaves) {
        return Err(LotError::invalid(format!(
            "octaves must be in {}..={}, got {}",
            MIN_OCTAVES, MAX_OCTAVES, octaves
        )));
    }
    Ok(())
}

/// Normalized fractal Brownian motion at `point`
///
/// Each octave doubles the frequency and halves the weight, and the sum is
/// normalized back into the simplex range. Octave counts outside the
/// supported range are clamped; validate with [`check_octaves`] first.
#[inline]
pub fn fbm(point: Vec3, octaves: u32) -> f64 {
    fbm_generator(octaves).get(point.to_array())
}

/// Correction polynomial coefficients (ascending powers) for an octave count
pub fn poly_params(octaves: u32) -> LotResult<[f64; 8]> {
    check_octaves(octaves)?;
    Ok(SIMPLEX_POLY_FIT[octaves as usize])
}

/// Evaluate a correction polynomial with Horner's rule, clamped to [0, 1]
#[inline]
pub fn apply_poly(value: f64, coefficients: &[f64; 8]) -> f64 {
    coefficients
        .iter()
        .rev()
        .fold(0.0, |acc, &c| acc * value + c)
        .clamp(0.0, 1.0)
}
