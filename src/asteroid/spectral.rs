//! Spectral (material) classes
//!
//! Eleven classes built from four base components. Compound classes inherit
//! the resource families and the mean density of their components.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::constants::density;
use crate::error::{LotError, LotResult};

/// Base material component of a spectral class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    /// Carbonaceous
    C,
    /// Silicaceous
    S,
    /// Metallic
    M,
    /// Icy
    I,
}

impl Component {
    pub fn density(self) -> f64 {
        match self {
            Component::C => density::C,
            Component::S => density::S,
            Component::M => density::M,
            Component::I => density::I,
        }
    }
}

/// Spectral class of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpectralType {
    C,
    Cm,
    Ci,
    Cs,
    Cms,
    Cis,
    S,
    Sm,
    Si,
    M,
    I,
}

impl SpectralType {
    /// All classes in id order
    pub const ALL: [SpectralType; 11] = [
        SpectralType::C,
        SpectralType::Cm,
        SpectralType::Ci,
        SpectralType::Cs,
        SpectralType::Cms,
        SpectralType::Cis,
        SpectralType::S,
        SpectralType::Sm,
        SpectralType::Si,
        SpectralType::M,
        SpectralType::I,
    ];

    /// Look up a class by its 1-based id
    pub fn from_id(id: u32) -> LotResult<Self> {
        if id == 0 {
            return Err(LotError::invalid("spectral type id must be in 1..=11, got 0"));
        }
        Self::ALL
            .get(id as usize - 1)
            .copied()
            .ok_or_else(|| LotError::invalid(format!("spectral type id must be in 1..=11, got {}", id)))
    }

    /// Look up a class by its 0-based code (bulk record encoding)
    pub fn from_code(code: u32) -> LotResult<Self> {
        Self::from_id(code.saturating_add(1))
    }

    /// 1-based id
    pub fn id(self) -> u32 {
        self.code() + 1
    }

    /// 0-based code
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            SpectralType::C => "C",
            SpectralType::Cm => "Cm",
            SpectralType::Ci => "Ci",
            SpectralType::Cs => "Cs",
            SpectralType::Cms => "Cms",
            SpectralType::Cis => "Cis",
            SpectralType::S => "S",
            SpectralType::Sm => "Sm",
            SpectralType::Si => "Si",
            SpectralType::M => "M",
            SpectralType::I => "I",
        }
    }

    /// Components in the order their densities are summed
    pub fn components(self) -> &'static [Component] {
        use Component::*;
        match self {
            SpectralType::C => &[C],
            SpectralType::Cm => &[C, M],
            SpectralType::Ci => &[C, I],
            SpectralType::Cs => &[C, S],
            SpectralType::Cms => &[C, M, S],
            SpectralType::Cis => &[C, I, S],
            SpectralType::S => &[S],
            SpectralType::Sm => &[S, M],
            SpectralType::Si => &[S, I],
            SpectralType::M => &[M],
            SpectralType::I => &[I],
        }
    }

    #[inline]
    pub fn has(self, component: Component) -> bool {
        self.components().contains(&component)
    }

    /// Mean bulk density of the components in kg/m^3
    pub fn density(self) -> f64 {
        let parts = self.components();
        let sum: f64 = parts.iter().map(|c| c.density()).sum();
        sum / parts.len() as f64
    }
}

impl fmt::Display for SpectralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
