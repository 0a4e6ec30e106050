//! Raw resource catalog
//!
//! Twenty-two raw materials, one per abundance slot, each in one extraction
//! category. Categories decide which bonuses boost a resource.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{LotError, LotResult};

/// Extraction category of a raw resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceCategory {
    Volatile,
    Organic,
    Metal,
    RareEarth,
    Fissile,
}

/// Raw resource, numbered 1..=22 in slot order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Resource {
    Water = 1,
    Hydrogen,
    Ammonia,
    Nitrogen,
    SulfurDioxide,
    CarbonDioxide,
    CarbonMonoxide,
    Methane,
    Apatite,
    Bitumen,
    Calcite,
    Feldspar,
    Olivine,
    Pyroxene,
    Coffinite,
    Merrillite,
    Xenotime,
    Rhabdite,
    Graphite,
    Taenite,
    Troilite,
    Uraninite,
}

impl Resource {
    pub const COUNT: usize = 22;

    /// All resources in slot order
    pub const ALL: [Resource; Resource::COUNT] = [
        Resource::Water,
        Resource::Hydrogen,
        Resource::Ammonia,
        Resource::Nitrogen,
        Resource::SulfurDioxide,
        Resource::CarbonDioxide,
        Resource::CarbonMonoxide,
        Resource::Methane,
        Resource::Apatite,
        Resource::Bitumen,
        Resource::Calcite,
        Resource::Feldspar,
        Resource::Olivine,
        Resource::Pyroxene,
        Resource::Coffinite,
        Resource::Merrillite,
        Resource::Xenotime,
        Resource::Rhabdite,
        Resource::Graphite,
        Resource::Taenite,
        Resource::Troilite,
        Resource::Uraninite,
    ];

    pub fn from_id(id: u32) -> LotResult<Self> {
        id.checked_sub(1)
            .and_then(|i| Self::ALL.get(i as usize).copied())
            .ok_or_else(|| LotError::invalid(format!("resource id must be in 1..=22, got {}", id)))
    }

    #[inline]
    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            Resource::Water => "Water",
            Resource::Hydrogen => "Hydrogen",
            Resource::Ammonia => "Ammonia",
            Resource::Nitrogen => "Nitrogen",
            Resource::SulfurDioxide => "Sulfur Dioxide",
            Resource::CarbonDioxide => "Carbon Dioxide",
            Resource::CarbonMonoxide => "Carbon Monoxide",
            Resource::Methane => "Methane",
            Resource::Apatite => "Apatite",
            Resource::Bitumen => "Bitumen",
            Resource::Calcite => "Calcite",
            Resource::Feldspar => "Feldspar",
            Resource::Olivine => "Olivine",
            Resource::Pyroxene => "Pyroxene",
            Resource::Coffinite => "Coffinite",
            Resource::Merrillite => "Merrillite",
            Resource::Xenotime => "Xenotime",
            Resource::Rhabdite => "Rhabdite",
            Resource::Graphite => "Graphite",
            Resource::Taenite => "Taenite",
            Resource::Troilite => "Troilite",
            Resource::Uraninite => "Uraninite",
        }
    }

    pub fn category(self) -> ResourceCategory {
        use Resource::*;
        match self {
            Water | Hydrogen | Ammonia | Nitrogen | SulfurDioxide | CarbonDioxide
            | CarbonMonoxide | Methane => ResourceCategory::Volatile,
            Apatite | Bitumen | Calcite => ResourceCategory::Organic,
            Feldspar | Olivine | Pyroxene | Rhabdite | Graphite | Taenite | Troilite => {
                ResourceCategory::Metal
            }
            Merrillite | Xenotime => ResourceCategory::RareEarth,
            Coffinite | Uraninite => ResourceCategory::Fissile,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
