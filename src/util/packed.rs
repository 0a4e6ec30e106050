//! 256-bit packed parameter blobs
//!
//! Registries hand out per-asteroid parameters as a single 256-bit integer,
//! either as decimal text or `0x` hex. The value is kept as four little-endian
//! 64-bit limbs; fields are read with [`PackedU256::bits`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{LotError, LotResult};

/// Unsigned 256-bit packed blob
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackedU256 {
    /// Little-endian limbs: `limbs[0]` holds bits 0..64
    limbs: [u64; 4],
}

impl PackedU256 {
    pub const ZERO: PackedU256 = PackedU256 { limbs: [0; 4] };

    /// Build from the low and high 128-bit halves
    pub fn from_halves(low: u128, high: u128) -> Self {
        Self {
            limbs: [low as u64, (low >> 64) as u64, high as u64, (high >> 64) as u64],
        }
    }

    pub fn from_u128(value: u128) -> Self {
        Self::from_halves(value, 0)
    }

    /// Build from 32 big-endian bytes
    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        let mut limbs = [0u64; 4];
        for (i, chunk) in bytes.chunks_exact(8).enumerate() {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            limbs[3 - i] = u64::from_be_bytes(word);
        }
        Self { limbs }
    }

    pub fn low(&self) -> u128 {
        (self.limbs[1] as u128) << 64 | self.limbs[0] as u128
    }

    pub fn high(&self) -> u128 {
        (self.limbs[3] as u128) << 64 | self.limbs[2] as u128
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.iter().all(|&l| l == 0)
    }

    /// Read `width` bits (at most 64) starting at bit `offset`
    pub fn bits(&self, offset: u32, width: u32) -> u64 {
        debug_assert!(width <= 64 && offset + width <= 256);
        if width == 0 {
            return 0;
        }
        let limb = (offset / 64) as usize;
        let shift = offset % 64;
        let mut value = self.limbs[limb] >> shift;
        // Field straddles a limb boundary
        if shift != 0 && shift + width > 64 && limb + 1 < 4 {
            value |= self.limbs[limb + 1] << (64 - shift);
        }
        if width == 64 {
            value
        } else {
            value & ((1u64 << width) - 1)
        }
    }

    /// Parse `0x`-prefixed hex (any length up to 64 digits)
    pub fn from_hex(text: &str) -> LotResult<Self> {
        let digits = text.trim_start_matches("0x").trim_start_matches("0X");
        if digits.is_empty() || digits.len() > 64 {
            return Err(LotError::Decode(format!(
                "hex blob must have 1..=64 digits, got {}",
                digits.len()
            )));
        }
        let padded = format!("{:0>64}", digits);
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(&padded, &mut bytes)
            .map_err(|e| LotError::Decode(format!("invalid hex blob: {}", e)))?;
        Ok(Self::from_be_bytes(bytes))
    }

    /// Parse a base-10 integer that fits in 256 bits
    pub fn from_dec_str(text: &str) -> LotResult<Self> {
        if text.is_empty() {
            return Err(LotError::Decode("empty decimal blob".to_string()));
        }
        let mut limbs = [0u64; 4];
        for ch in text.chars() {
            let digit = ch
                .to_digit(10)
                .ok_or_else(|| LotError::Decode(format!("invalid decimal digit '{}'", ch)))?;
            // limbs = limbs * 10 + digit
            let mut carry = digit as u128;
            for limb in limbs.iter_mut() {
                let wide = (*limb as u128) * 10 + carry;
                *limb = wide as u64;
                carry = wide >> 64;
            }
            if carry != 0 {
                return Err(LotError::Decode("decimal blob exceeds 256 bits".to_string()));
            }
        }
        Ok(Self { limbs })
    }
}

impl FromStr for PackedU256 {
    type Err = LotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with("0x") || s.starts_with("0X") {
            Self::from_hex(s)
        } else {
            Self::from_dec_str(s)
        }
    }
}

impl From<u128> for PackedU256 {
    fn from(value: u128) -> Self {
        Self::from_u128(value)
    }
}

impl fmt::Display for PackedU256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "0x{:016x}{:016x}{:016x}{:016x}",
            self.limbs[3], self.limbs[2], self.limbs[1], self.limbs[0]
        )
    }
}
