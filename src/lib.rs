//! # swarm-morph
//!
//! A swarm of particles that morphs between two layouts: a golden-angle spiral
//! wound around a cone (formed) and a uniform scatter through a sphere
//! (dispersed). Every particle also floats, spins and pulses on its own.
//!
//! The crate stops at per-instance data. It produces one transform per particle
//! per frame plus a fixed color per particle; drawing them is up to the caller.
//!
//! ## Quick Start
//!
//! ```ignore
//! use swarm_morph::prelude::*;
//! use rand::SeedableRng;
//!
//! let config = MorphConfig::default().with_count(1500);
//! let mut scene = MorphScene::new(&config, &mut SmallRng::seed_from_u64(1))?;
//! let mut clock = FrameClock::new();
//! let mut buffer = InstanceBuffer::new();
//!
//! loop {
//!     let (elapsed, delta) = clock.tick();
//!     scene.frame(MorphTarget::Formed, delta, elapsed);
//!     scene.write_to(&mut buffer);
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Particle records
//!
//! [`ParticleFactory`] draws everything random once: both target positions,
//! color, base rotation, scale, oscillation speed and phase. The resulting
//! [`ParticleSet`] is read-only; reconfiguring means generating a new one.
//!
//! ### Morph progress
//!
//! [`MorphState`] holds a single progress value in `[0, 1]` for the whole swarm
//! and eases it toward the chosen [`MorphTarget`] with exponential smoothing.
//!
//! ### Transforms
//!
//! [`IdleMotion::evaluate`] turns a record, the progress and the elapsed time
//! into a [`ParticleTransform`]. It is pure: same inputs, same bits out.
//!
//! ## Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`shape`] | Spiral and sphere placement |
//! | [`particle`] | Particle records and the factory |
//! | [`morph`] | Progress smoothing |
//! | [`transform`] | Per-particle transform evaluation |
//! | [`scene`] | Per-frame driver |
//! | [`instance`] | Renderer-facing instance data |
//! | [`clock`] | Frame timing |

pub mod clock;
pub mod color;
pub mod config;
pub mod error;
pub mod instance;
pub mod morph;
pub mod particle;
pub mod scene;
pub mod shape;
pub mod transform;

pub use bytemuck;
pub use clock::FrameClock;
pub use color::Color;
pub use config::MorphConfig;
pub use error::{ColorError, ConfigError};
pub use glam::{Mat4, Quat, Vec3};
pub use instance::{InstanceBuffer, InstanceRaw, InstanceSink};
pub use morph::{MorphState, MorphTarget};
pub use particle::{generate_particles, ParticleFactory, ParticleRecord, ParticleSet};
pub use scene::MorphScene;
pub use shape::{sphere_position, spiral_position, GOLDEN_ANGLE};
pub use transform::{evaluate, IdleMotion, ParticleTransform};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use swarm_morph::prelude::*;
/// ```
pub mod prelude {
    pub use crate::clock::FrameClock;
    pub use crate::color::Color;
    pub use crate::config::MorphConfig;
    pub use crate::error::ConfigError;
    pub use crate::instance::{InstanceBuffer, InstanceSink};
    pub use crate::morph::{MorphState, MorphTarget};
    pub use crate::particle::{ParticleFactory, ParticleRecord, ParticleSet};
    pub use crate::scene::MorphScene;
    pub use crate::transform::{IdleMotion, ParticleTransform};
    pub use crate::Vec3;
    pub use rand::rngs::SmallRng;
}
