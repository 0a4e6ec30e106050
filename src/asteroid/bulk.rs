//! Binary bulk import of per-body records
//!
//! Registries ship the whole catalog as a flat array of 32-bit words, three
//! words per body. Record `k` describes body `k + 1`.
//!
//! ```text
//! w0: a (milli-AU) [0..16) | e (1/1000) [16..26) | spectral code [26..30)
//! w1: i (centideg) [0..16) | o (centideg) [16..32)
//! w2: w (centideg) [0..16) | m (centideg) [16..32)
//! ```

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::constants::batch::WORDS_PER_RECORD;
use super::size::radius;
use super::spectral::SpectralType;
use crate::config::EngineConfig;
use crate::error::{LotError, LotResult};

/// Keplerian elements: semi-major axis (AU), eccentricity, angles in radians
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    pub a: f64,
    pub e: f64,
    pub i: f64,
    pub o: f64,
    pub w: f64,
    pub m: f64,
}

/// Decoded body record, same shape as the single-body path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AsteroidRecord {
    pub id: u64,
    pub radius: f64,
    pub spectral_type: SpectralType,
    pub orbital: OrbitalElements,
}

#[inline]
fn field(word: u32, offset: u32, width: u32) -> u32 {
    (word >> offset) & ((1u32 << width) - 1)
}

#[inline]
fn centideg_to_rad(raw: u32) -> f64 {
    (raw as f64 / 100.0).to_radians()
}

#[inline]
fn rad_to_centideg(rad: f64) -> u32 {
    (rad.to_degrees() * 100.0).round().clamp(0.0, u16::MAX as f64) as u32
}

fn decode_record(index: usize, record: &[u32]) -> LotResult<AsteroidRecord> {
    let (w0, w1, w2) = (record[0], record[1], record[2]);
    let id = index as u64 + 1;
    let code = field(w0, 26, 4);
    let spectral_type = SpectralType::from_code(code).map_err(|_| {
        LotError::invalid(format!("record {} has spectral code {} (max 10)", id, code))
    })?;

    Ok(AsteroidRecord {
        id,
        radius: radius(id)?,
        spectral_type,
        orbital: OrbitalElements {
            a: field(w0, 0, 16) as f64 / 1000.0,
            e: field(w0, 16, 10) as f64 / 1000.0,
            i: centideg_to_rad(field(w1, 0, 16)),
            o: centideg_to_rad(field(w1, 16, 16)),
            w: centideg_to_rad(field(w2, 0, 16)),
            m: centideg_to_rad(field(w2, 16, 16)),
        },
    })
}

/// Decode every record in `words`, preserving order
pub fn unpack_asteroid_details(words: &[u32]) -> LotResult<Vec<AsteroidRecord>> {
    unpack_asteroid_details_with(words, &EngineConfig::default())
}

pub fn unpack_asteroid_details_with(
    words: &[u32],
    config: &EngineConfig,
) -> LotResult<Vec<AsteroidRecord>> {
    if words.len() % WORDS_PER_RECORD != 0 {
        return Err(LotError::invalid(format!(
            "bulk array length {} is not a multiple of {}",
            words.len(),
            WORDS_PER_RECORD
        )));
    }
    let count = words.len() / WORDS_PER_RECORD;
    tracing::debug!(records = count, "Unpacking asteroid details");

    if count >= config.parallel_threshold {
        words
            .par_chunks_exact(WORDS_PER_RECORD)
            .enumerate()
            .map(|(k, record)| decode_record(k, record))
            .collect()
    } else {
        words
            .chunks_exact(WORDS_PER_RECORD)
            .enumerate()
            .map(|(k, record)| decode_record(k, record))
            .collect()
    }
}

/// Encode records back into the flat word layout
///
/// Record order defines the ids; the `id` and `radius` fields are ignored.
/// Values are rounded to the stored resolution and saturate at field width.
pub fn pack_asteroid_details(records: &[AsteroidRecord]) -> Vec<u32> {
    let mut words = Vec::with_capacity(records.len() * WORDS_PER_RECORD);
    for record in records {
        let o = &record.orbital;
        let a = (o.a * 1000.0).round().clamp(0.0, u16::MAX as f64) as u32;
        let e = (o.e * 1000.0).round().clamp(0.0, 1023.0) as u32;
        words.push(a | e << 16 | record.spectral_type.code() << 26);
        words.push(rad_to_centideg(o.i) | rad_to_centideg(o.o) << 16);
        words.push(rad_to_centideg(o.w) | rad_to_centideg(o.m) << 16);
    }
    words
}
