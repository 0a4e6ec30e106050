//! Resource catalog, abundance fields and bonuses

pub mod abundance;
pub mod bonus;
pub mod catalog;
pub mod noise_field;

pub use abundance::{
    abundance_at, abundance_at_lot, abundance_map, abundance_map_settings,
    decode_abundance_parameters, AbundanceParameters, AbundanceSettings, AbundanceTable,
};
pub use bonus::{bonus, bonus_for_resource, bonuses_of, rarity, Bonus, BonusFamily, Rarity, ResourceBonus};
pub use catalog::{Resource, ResourceCategory};
