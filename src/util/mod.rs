pub mod packed;
pub mod vec3;
