//! Asteroid Lots Library
//!
//! Deterministic lot addressing and procedural resources for a fixed
//! population of spherical bodies. Every value is a pure function of its
//! arguments, so any client, server or verifier recomputes the same numbers.
//!
//! # Features
//!
//! - `bulk_import` - Decode packed per-body records from a flat `u32` array (enabled by default)

pub mod asteroid;
pub mod config;
pub mod error;
pub mod lattice;
pub mod resources;
pub mod util;

pub use error::{LotError, LotResult};
pub use util::packed::PackedU256;
pub use util::vec3::Vec3;
