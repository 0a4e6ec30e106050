//! Bonus register decoding and rarity
//!
//! Bit `n` of the register (n = 1..=14) grants bonus `n`. Each family reports
//! only its highest granted tier, and only families the spectral class can
//! host are reported at all.

use std::fmt;

use bitvec::prelude::*;
use serde::Serialize;
use smallvec::SmallVec;

use super::catalog::{Resource, ResourceCategory};
use crate::asteroid::spectral::{Component, SpectralType};
use crate::error::{LotError, LotResult};

/// Bonus family; declaration order is the canonical report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BonusFamily {
    Yield,
    Volatile,
    Metal,
    Organic,
    RareEarth,
    Fissile,
}

impl BonusFamily {
    pub const ALL: [BonusFamily; 6] = [
        BonusFamily::Yield,
        BonusFamily::Volatile,
        BonusFamily::Metal,
        BonusFamily::Organic,
        BonusFamily::RareEarth,
        BonusFamily::Fissile,
    ];

    /// Whether a body of this class can carry bonuses of this family
    pub fn applies_to(self, spectral: SpectralType) -> bool {
        use Component::*;
        match self {
            BonusFamily::Yield => true,
            BonusFamily::Volatile => spectral.has(C) || spectral.has(I),
            BonusFamily::Metal => spectral.has(M) || spectral.has(S),
            BonusFamily::Organic => spectral.has(C),
            BonusFamily::RareEarth => spectral.has(S),
            BonusFamily::Fissile => spectral.has(M),
        }
    }

    /// Resource category boosted by this family; Yield boosts every category
    pub fn category(self) -> Option<ResourceCategory> {
        match self {
            BonusFamily::Yield => None,
            BonusFamily::Volatile => Some(ResourceCategory::Volatile),
            BonusFamily::Metal => Some(ResourceCategory::Metal),
            BonusFamily::Organic => Some(ResourceCategory::Organic),
            BonusFamily::RareEarth => Some(ResourceCategory::RareEarth),
            BonusFamily::Fissile => Some(ResourceCategory::Fissile),
        }
    }

    /// Level-0 placeholder reported when no tier of the family is granted
    pub fn base(self) -> Bonus {
        BASE_BONUSES[self as usize]
    }
}

/// One bonus tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bonus {
    /// Register bit (1..=14); 0 for family bases
    pub id: u8,
    pub name: &'static str,
    pub level: u8,
    /// Yield increase in percent
    pub modifier: u8,
    pub family: BonusFamily,
}

impl Bonus {
    const fn new(id: u8, name: &'static str, level: u8, modifier: u8, family: BonusFamily) -> Self {
        Self {
            id,
            name,
            level,
            modifier,
            family,
        }
    }

    /// Whether this bonus boosts `resource`
    pub fn applies_to(&self, resource: Resource) -> bool {
        match self.family.category() {
            None => true,
            Some(category) => category == resource.category(),
        }
    }

    #[inline]
    pub fn multiplier(&self) -> f64 {
        1.0 + self.modifier as f64 / 100.0
    }
}

/// Number of grantable bonuses
pub const BONUS_COUNT: usize = 14;

const BONUSES: [Bonus; BONUS_COUNT] = [
    Bonus::new(1, "Yield1", 1, 3, BonusFamily::Yield),
    Bonus::new(2, "Yield2", 2, 6, BonusFamily::Yield),
    Bonus::new(3, "Yield3", 3, 15, BonusFamily::Yield),
    Bonus::new(4, "Volatile1", 1, 10, BonusFamily::Volatile),
    Bonus::new(5, "Volatile2", 2, 20, BonusFamily::Volatile),
    Bonus::new(6, "Volatile3", 3, 50, BonusFamily::Volatile),
    Bonus::new(7, "Metal1", 1, 10, BonusFamily::Metal),
    Bonus::new(8, "Metal2", 2, 20, BonusFamily::Metal),
    Bonus::new(9, "Metal3", 3, 50, BonusFamily::Metal),
    Bonus::new(10, "Organic1", 1, 10, BonusFamily::Organic),
    Bonus::new(11, "Organic2", 2, 20, BonusFamily::Organic),
    Bonus::new(12, "Organic3", 3, 50, BonusFamily::Organic),
    Bonus::new(13, "RareEarth3", 3, 30, BonusFamily::RareEarth),
    Bonus::new(14, "Fissile3", 3, 30, BonusFamily::Fissile),
];

/// Family bases, indexed by family
const BASE_BONUSES: [Bonus; 6] = [
    Bonus::new(0, "Yield0", 0, 0, BonusFamily::Yield),
    Bonus::new(0, "Volatile0", 0, 0, BonusFamily::Volatile),
    Bonus::new(0, "Metal0", 0, 0, BonusFamily::Metal),
    Bonus::new(0, "Organic0", 0, 0, BonusFamily::Organic),
    Bonus::new(0, "RareEarth0", 0, 0, BonusFamily::RareEarth),
    Bonus::new(0, "Fissile0", 0, 0, BonusFamily::Fissile),
];

/// Look up a grantable bonus by register bit
pub fn bonus(id: u8) -> LotResult<Bonus> {
    id.checked_sub(1)
        .and_then(|i| BONUSES.get(i as usize).copied())
        .ok_or_else(|| LotError::invalid(format!("bonus id must be in 1..={}, got {}", BONUS_COUNT, id)))
}

/// Decode a bonus register for a body of the given class
///
/// One entry per applicable family in canonical order: the highest granted
/// tier, or the family's level-0 base.
pub fn bonuses_of(register: u32, spectral: SpectralType) -> Vec<Bonus> {
    let bits = register.view_bits::<Lsb0>();
    BonusFamily::ALL
        .iter()
        .filter(|family| family.applies_to(spectral))
        .map(|&family| {
            let granted: SmallVec<[Bonus; 3]> = BONUSES
                .iter()
                .filter(|b| b.family == family && bits[b.id as usize])
                .copied()
                .collect();
            granted
                .into_iter()
                .max_by_key(|b| b.level)
                .unwrap_or_else(|| family.base())
        })
        .collect()
}

/// Combined multiplier a bonus set grants one resource
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceBonus {
    pub total_bonus: f64,
    /// Granted bonuses that contributed
    pub bonuses: Vec<Bonus>,
}

/// Multiply the modifiers of every bonus that boosts `resource`
pub fn bonus_for_resource(bonuses: &[Bonus], resource: Resource) -> ResourceBonus {
    let applicable: Vec<Bonus> = bonuses
        .iter()
        .filter(|b| b.level > 0 && b.applies_to(resource))
        .copied()
        .collect();
    let total_bonus = applicable.iter().fold(1.0, |acc, b| acc * b.multiplier());
    ResourceBonus {
        total_bonus,
        bonuses: applicable,
    }
}

/// Rarity tier of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Superior,
    Exceptional,
    Incomparable,
}

impl Rarity {
    pub fn name(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Superior => "Superior",
            Rarity::Exceptional => "Exceptional",
            Rarity::Incomparable => "Incomparable",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Rarity from the summed levels of a bonus set
pub fn rarity(bonuses: &[Bonus]) -> Rarity {
    let total: u32 = bonuses.iter().map(|b| b.level as u32).sum();
    match total {
        0 => Rarity::Common,
        1 => Rarity::Uncommon,
        2 => Rarity::Rare,
        3 => Rarity::Superior,
        4..=7 => Rarity::Exceptional,
        _ => Rarity::Incomparable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(bonuses: &[Bonus]) -> Vec<&'static str> {
        bonuses.iter().map(|b| b.name).collect()
    }

    #[test]
    fn test_bonus_lookup() {
        assert_eq!(bonus(2).unwrap().name, "Yield2");
        assert_eq!(bonus(14).unwrap().name, "Fissile3");
        assert_eq!(bonus(13).unwrap().modifier, 30);
        assert!(bonus(0).is_err());
        assert!(bonus(15).is_err());
    }

    #[test]
    fn test_bonuses_of_fixtures() {
        let all = 0b110010010010010;
        assert_eq!(
            names(&bonuses_of(0b10100010, SpectralType::C)),
            ["Yield1", "Volatile2", "Organic0"]
        );
        assert_eq!(
            names(&bonuses_of(all, SpectralType::C)),
            ["Yield1", "Volatile1", "Organic1"]
        );
        assert_eq!(
            names(&bonuses_of(all, SpectralType::M)),
            ["Yield1", "Metal1", "Fissile3"]
        );
    }

    #[test]
    fn test_highest_tier_wins() {
        let register = 0b1110;
        assert_eq!(names(&bonuses_of(register, SpectralType::I)), ["Yield3", "Volatile0"]);
    }

    #[test]
    fn test_family_applicability() {
        let families = |t: SpectralType| -> Vec<BonusFamily> {
            bonuses_of(0, t).iter().map(|b| b.family).collect()
        };
        use BonusFamily::*;
        assert_eq!(families(SpectralType::C), [Yield, Volatile, Organic]);
        assert_eq!(families(SpectralType::S), [Yield, Metal, RareEarth]);
        assert_eq!(families(SpectralType::I), [Yield, Volatile]);
        assert_eq!(
            families(SpectralType::Cms),
            [Yield, Volatile, Metal, Organic, RareEarth, Fissile]
        );
    }

    #[test]
    fn test_bonus_for_resource() {
        let bonuses = bonuses_of(0b101001, SpectralType::C);
        assert_eq!(bonus_for_resource(&bonuses, Resource::Water).total_bonus, 1.38);
        assert_eq!(bonus_for_resource(&bonuses, Resource::Apatite).total_bonus, 1.15);

        let water = bonus_for_resource(&bonuses, Resource::Water);
        assert_eq!(names(&water.bonuses), ["Yield3", "Volatile2"]);

        let bonuses = bonuses_of(0b1, SpectralType::C);
        let none = bonus_for_resource(&bonuses, Resource::Water);
        assert_eq!(none.total_bonus, 1.0);
        assert!(none.bonuses.is_empty());
    }

    #[test]
    fn test_rarity_table() {
        let b = |id| bonus(id).unwrap();
        assert_eq!(rarity(&[]), Rarity::Common);
        assert_eq!(rarity(&[b(1)]), Rarity::Uncommon);
        assert_eq!(rarity(&[b(2)]), Rarity::Rare);
        assert_eq!(rarity(&[b(3)]), Rarity::Superior);
        assert_eq!(rarity(&[b(3), b(10)]), Rarity::Exceptional);
        assert_eq!(rarity(&[b(3), b(6), b(9), b(12)]), Rarity::Incomparable);
        assert_eq!(rarity(&bonuses_of(0, SpectralType::Cms)), Rarity::Common);
        assert_eq!(Rarity::Incomparable.to_string(), "Incomparable");
    }
}
