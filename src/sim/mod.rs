//! Deterministic simulation module
//!
//! Everything that moves on the page, minus the drawing:
//! - Seeded RNG only
//! - Fixed steps only
//! - No rendering or platform dependencies

pub mod blaster;
pub mod particles;

pub use blaster::{
    BlasterGame, Camera, CardLabel, Explosion, FlyingCard, ShotHit, default_labels, fog_factor,
    screen_to_ndc,
};
pub use particles::{Link, Particle, ParticleField};
