//! Placement functions for the two swarm layouts.
//!
//! - [`spiral_position`] puts particle `index` of `total` on a tapering cone
//!   using a golden-angle spiral (the formed layout).
//! - [`sphere_position`] draws a point uniformly by volume inside a sphere
//!   (the dispersed layout).
//!
//! Neither function keeps any state between calls.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// `2π(1 - 1/φ)`, about 137.5°.
///
/// Successive multiples never line up with a rational fraction of a turn, so
/// neighbouring indices land at well separated angles and no radial stripes form.
pub const GOLDEN_ANGLE: f32 = 2.399_963_2;

/// Angle (radians, unwrapped) of spiral slot `index`.
#[inline]
pub fn spiral_angle(index: u32) -> f32 {
    index as f32 * GOLDEN_ANGLE
}

/// Position of particle `index` of `total` on a golden-angle cone spiral.
///
/// Heights run linearly from `-height / 2` at index 0 (the base) towards
/// `+height / 2` at the apex. The radius tapers linearly from `base_radius`
/// to zero over the same range.
///
/// `total == 0` is treated as a single slot so the result stays finite.
pub fn spiral_position(index: u32, total: u32, base_radius: f32, height: f32) -> Vec3 {
    let t = index as f32 / total.max(1) as f32;
    let radius = base_radius * (1.0 - t);
    let angle = spiral_angle(index);

    Vec3::new(angle.cos() * radius, t * height - height / 2.0, angle.sin() * radius)
}

/// Random point uniformly distributed throughout a sphere's volume.
///
/// The polar angle goes through `acos(2v - 1)` so directions are uniform over the
/// sphere's surface, and the radius through a cube root so points are not
/// bunched toward the center.
pub fn sphere_position<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let u: f32 = rng.gen();
    let v: f32 = rng.gen();
    let w: f32 = rng.gen();

    let theta = TAU * u;
    let phi = (2.0 * v - 1.0).clamp(-1.0, 1.0).acos();
    let r = radius * w.cbrt();

    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

/// Independent uniform offset on each axis, spanning `magnitude` centered on zero.
pub fn jitter<R: Rng + ?Sized>(rng: &mut R, magnitude: f32) -> Vec3 {
    Vec3::new(
        (rng.gen::<f32>() - 0.5) * magnitude,
        (rng.gen::<f32>() - 0.5) * magnitude,
        (rng.gen::<f32>() - 0.5) * magnitude,
    )
}
