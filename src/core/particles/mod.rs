//! Canvas particle fields
//!
//! - [`config`]: per-variant constants and the named presets
//! - [`particle`] and [`trail`]: per-particle state
//! - [`field`]: the pool and its per-frame physics
//! - [`render`]: drawing through the [`render::Painter`] trait

pub mod config;
pub mod field;
pub mod particle;
pub mod render;
pub mod trail;

pub use config::{BoundaryPolicy, FieldConfig, FieldPreset, PointerResponse, PoolLifecycle};
pub use field::{Link, ParticleField};
pub use particle::Particle;
pub use render::{Hsla, Painter, draw_field};
pub use trail::Trail;
