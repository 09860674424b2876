//! Particle records and the factory that produces them.
//!
//! Every random draw a particle will ever need happens here, once, when the set
//! is generated. Evaluating a particle afterwards is a pure function of its
//! record, the morph progress and the clock.
//!
//! ```ignore
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let factory = ParticleFactory::new(MorphConfig::default())?;
//! let particles = factory.generate(&mut SmallRng::seed_from_u64(7));
//! assert_eq!(particles.len(), 1500);
//! ```

use crate::color::Color;
use crate::config::MorphConfig;
use crate::error::ConfigError;
use crate::shape::{jitter, sphere_position, spiral_position};
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::f32::consts::{PI, TAU};
use std::ops::{Deref, Range};

/// Range of the baseline size multiplier.
pub const SCALE_RANGE: Range<f32> = 0.5..1.3;
/// Range of the per-particle oscillation speed.
pub const ANGULAR_SPEED_RANGE: Range<f32> = 0.2..0.7;
/// Range of each Euler component of the starting rotation.
pub const ROTATION_RANGE: Range<f32> = 0.0..PI;
/// Range of the oscillation phase offset.
pub const PHASE_RANGE: Range<f32> = 0.0..TAU;

/// Static data for one particle. Never changes once generated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleRecord {
    /// Index into the particle set and the renderer's instance slot.
    pub id: u32,
    /// Location in the cone spiral layout.
    pub formed_position: Vec3,
    /// Location in the sphere scatter layout.
    pub scattered_position: Vec3,
    /// XYZ Euler angles (radians) the spin animation starts from.
    pub base_rotation: Vec3,
    /// Baseline size multiplier.
    pub scale: f32,
    /// Palette color, fixed for the particle's lifetime.
    pub color: Color,
    /// Oscillation frequency for floating and spinning.
    pub angular_speed: f32,
    /// Offset so the swarm does not move in lockstep.
    pub phase: f32,
}

/// An ordered, fixed-length sequence of particle records.
///
/// Record `i` always has `id == i`. The set cannot be edited; changing the
/// configuration means generating a new set and replacing this one whole.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleSet {
    records: Box<[ParticleRecord]>,
    colors: Box<[Color]>,
}

impl ParticleSet {
    /// A set with no particles. Renders as nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    fn from_records(records: Vec<ParticleRecord>) -> Self {
        let colors = records.iter().map(|r| r.color).collect();
        Self {
            records: records.into_boxed_slice(),
            colors,
        }
    }

    /// All records in id order.
    #[inline]
    pub fn records(&self) -> &[ParticleRecord] {
        &self.records
    }

    /// Per-particle colors, indexed by id.
    #[inline]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Record with the given id, or `None` past the end of the set.
    #[inline]
    pub fn get(&self, id: u32) -> Option<&ParticleRecord> {
        self.records.get(id as usize)
    }
}

impl Deref for ParticleSet {
    type Target = [ParticleRecord];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl<'a> IntoIterator for &'a ParticleSet {
    type Item = &'a ParticleRecord;
    type IntoIter = std::slice::Iter<'a, ParticleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Builds particle sets from a validated configuration.
///
/// Validation happens in [`ParticleFactory::new`], so a bad palette is reported
/// before any particle is generated.
#[derive(Clone, Debug)]
pub struct ParticleFactory {
    config: MorphConfig,
}

impl ParticleFactory {
    /// Validate `config` and keep it for later generation.
    pub fn new(config: MorphConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The validated configuration.
    #[inline]
    pub fn config(&self) -> &MorphConfig {
        &self.config
    }

    /// Generate a full set drawing from `rng`.
    ///
    /// The same seed gives the same set.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> ParticleSet {
        let records = (0..self.config.count)
            .map(|id| self.spawn(id, rng))
            .collect::<Vec<_>>();

        log::info!(
            "Generated {} particles ({} palette colors)",
            records.len(),
            self.config.color_palette.len()
        );
        ParticleSet::from_records(records)
    }

    /// Generate with a fresh `SmallRng` seeded from `seed`.
    pub fn generate_seeded(&self, seed: u64) -> ParticleSet {
        self.generate(&mut SmallRng::seed_from_u64(seed))
    }

    /// Generate with an entropy-seeded RNG. Two calls give different sets.
    pub fn generate_random(&self) -> ParticleSet {
        self.generate(&mut SmallRng::from_entropy())
    }

    fn spawn<R: Rng + ?Sized>(&self, id: u32, rng: &mut R) -> ParticleRecord {
        let config = &self.config;

        let formed_position = spiral_position(id, config.count, config.base_radius, config.height)
            + jitter(rng, config.jitter);
        let scattered_position = sphere_position(rng, config.scatter_radius);

        // `new` rejected empty palettes, so `choose` always yields a color.
        let color = config.color_palette.choose(rng).copied().unwrap_or_default();

        let base_rotation = Vec3::new(
            rng.gen_range(ROTATION_RANGE),
            rng.gen_range(ROTATION_RANGE),
            rng.gen_range(ROTATION_RANGE),
        );

        ParticleRecord {
            id,
            formed_position,
            scattered_position,
            base_rotation,
            scale: rng.gen_range(SCALE_RANGE),
            color,
            angular_speed: rng.gen_range(ANGULAR_SPEED_RANGE),
            phase: rng.gen_range(PHASE_RANGE),
        }
    }
}

/// Validate `config` and generate its particle set from `rng`.
pub fn generate_particles<R: Rng + ?Sized>(
    config: &MorphConfig,
    rng: &mut R,
) -> Result<ParticleSet, ConfigError> {
    Ok(ParticleFactory::new(config.clone())?.generate(rng))
}
