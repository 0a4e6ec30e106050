//! Body-level model: seeds, spectral classes, size and bulk records

pub mod constants;
pub mod seed;
pub mod size;
pub mod spectral;

#[cfg(feature = "bulk_import")]
pub mod bulk;

pub use seed::{seed, Seed};
pub use size::{
    base_name, mass, radius, scan_boost_from_purchase_order, size_class, surface_area, SizeClass,
};
pub use spectral::{Component, SpectralType};
