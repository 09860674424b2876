//! Frame driver tying the particle set, morph state and evaluator together.
//!
//! One call to [`MorphScene::frame`] is one frame: the morph state advances
//! first, then every particle is evaluated against that same progress and
//! elapsed time. Transforms are written into a buffer owned by the scene, so a
//! steady-state frame allocates nothing.
//!
//! ```ignore
//! let mut scene = MorphScene::new(&MorphConfig::default(), &mut rng)?;
//! let mut buffer = InstanceBuffer::new();
//! let mut clock = FrameClock::new();
//!
//! loop {
//!     let (elapsed, delta) = clock.tick();
//!     scene.frame(ui_target, delta, elapsed);
//!     scene.write_to(&mut buffer);
//!     // upload buffer.as_bytes() ...
//! }
//! ```

use crate::color::Color;
use crate::config::MorphConfig;
use crate::error::ConfigError;
use crate::instance::InstanceSink;
use crate::morph::{MorphState, MorphTarget};
use crate::particle::{ParticleFactory, ParticleSet};
use crate::transform::{IdleMotion, ParticleTransform};
use rand::Rng;

/// A running swarm.
#[derive(Debug, Clone)]
pub struct MorphScene {
    particles: ParticleSet,
    morph: MorphState,
    motion: IdleMotion,
    transforms: Vec<ParticleTransform>,
    last_elapsed: f32,
    colors_pending: bool,
}

impl MorphScene {
    /// Generate a particle set from `config` and start dispersed, heading for
    /// the formed layout.
    pub fn new<R: Rng + ?Sized>(config: &MorphConfig, rng: &mut R) -> Result<Self, ConfigError> {
        let particles = ParticleFactory::new(config.clone())?.generate(rng);
        Ok(Self::from_particles(particles))
    }

    /// Wrap an existing particle set.
    pub fn from_particles(particles: ParticleSet) -> Self {
        let transforms = Vec::with_capacity(particles.len());
        Self {
            particles,
            morph: MorphState::default(),
            motion: IdleMotion::DEFAULT,
            transforms,
            last_elapsed: 0.0,
            colors_pending: true,
        }
    }

    /// Start from `morph` instead of dispersed-heading-for-formed.
    pub fn with_morph_state(mut self, morph: MorphState) -> Self {
        self.morph = morph;
        self
    }

    /// Replace the idle animation constants.
    pub fn with_idle_motion(mut self, motion: IdleMotion) -> Self {
        self.motion = motion;
        self
    }

    /// Run one frame and return the transforms, indexed by particle id.
    ///
    /// Bad time input never reaches the transforms: an invalid `dt` counts as
    /// zero, and a non-finite `elapsed` reuses the last valid elapsed time.
    pub fn frame(&mut self, target: MorphTarget, dt: f32, elapsed: f32) -> &[ParticleTransform] {
        if !(dt.is_finite() && dt >= 0.0) {
            log::warn!("Ignoring invalid frame delta {dt}");
        }
        let elapsed = if elapsed.is_finite() {
            self.last_elapsed = elapsed;
            elapsed
        } else {
            log::warn!("Non-finite elapsed time {elapsed}, reusing {}", self.last_elapsed);
            self.last_elapsed
        };

        let progress = self.morph.step(target, dt);
        self.motion
            .evaluate_into(&self.particles, progress, elapsed, &mut self.transforms);
        &self.transforms
    }

    /// Push the current frame to a renderer.
    ///
    /// Colors are only sent after the particle set was (re)built. Transforms
    /// are held back until a frame has run for the current set, so a sink never
    /// sees a transform slice shorter than the color slice.
    pub fn write_to<S: InstanceSink + ?Sized>(&mut self, sink: &mut S) {
        if self.colors_pending {
            sink.write_colors(self.particles.colors());
            self.colors_pending = false;
        }
        if self.transforms.len() == self.particles.len() {
            sink.write_transforms(&self.transforms);
        }
    }

    /// Replace the particle set with one generated from `config`.
    ///
    /// Validation runs first; on error the current set is left untouched.
    /// Morph progress carries over.
    pub fn rebuild<R: Rng + ?Sized>(&mut self, config: &MorphConfig, rng: &mut R) -> Result<(), ConfigError> {
        let particles = ParticleFactory::new(config.clone())?.generate(rng);
        self.replace_particles(particles);
        Ok(())
    }

    /// Swap in a new particle set in one step.
    pub fn replace_particles(&mut self, particles: ParticleSet) {
        log::info!(
            "Replacing particle set ({} -> {} particles)",
            self.particles.len(),
            particles.len()
        );
        self.particles = particles;
        self.transforms.clear();
        self.transforms.reserve(self.particles.len());
        self.colors_pending = true;
    }

    /// The current particle set.
    #[inline]
    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    /// Per-particle colors of the current set, indexed by id.
    #[inline]
    pub fn colors(&self) -> &[Color] {
        self.particles.colors()
    }

    /// Transforms from the latest frame. Empty before the first frame and
    /// right after a rebuild.
    #[inline]
    pub fn transforms(&self) -> &[ParticleTransform] {
        &self.transforms
    }

    /// Morph progress after the latest frame.
    #[inline]
    pub fn progress(&self) -> f32 {
        self.morph.progress()
    }

    #[inline]
    pub fn morph(&self) -> &MorphState {
        &self.morph
    }

    #[inline]
    pub fn morph_mut(&mut self) -> &mut MorphState {
        &mut self.morph
    }

    #[inline]
    pub fn idle_motion(&self) -> &IdleMotion {
        &self.motion
    }
}
