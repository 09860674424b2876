//! Per-particle transform evaluation.
//!
//! Each frame every particle's transform is rebuilt from three inputs: its
//! static [`ParticleRecord`], the swarm's morph progress and the elapsed time.
//! Nothing is retained between calls, and no randomness is drawn here.
//!
//! | Component | Formula |
//! |-----------|---------|
//! | position | `lerp(scattered, formed, p)` plus X/Y float noise |
//! | rotation | `base_rotation + t * speed * (0.1, 0.2, 0)` |
//! | scale | `scale * (1 + sin(2t + phase) * 0.1)` |
//!
//! Float noise is scaled by `(1 - p) * 1.5 + p * 0.1`, so a dispersed swarm
//! drifts visibly while a formed one is almost still.

use crate::particle::ParticleRecord;
use glam::{EulerRot, Mat4, Quat, Vec3};

/// Tunable constants for the idle animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IdleMotion {
    /// Vertical float amplitude.
    pub float_y: f32,
    /// Horizontal float amplitude.
    pub float_x: f32,
    /// Depth float amplitude. Zero keeps depth stable.
    pub float_depth: f32,
    /// Horizontal float frequency relative to the particle's speed.
    pub float_x_frequency: f32,
    /// Float intensity when fully dispersed.
    pub dispersed_intensity: f32,
    /// Float intensity when fully formed.
    pub formed_intensity: f32,
    /// X-axis spin rate relative to the particle's speed.
    pub spin_x: f32,
    /// Y-axis spin rate relative to the particle's speed.
    pub spin_y: f32,
    /// Scale pulse frequency (radians per second).
    pub pulse_frequency: f32,
    /// Scale pulse amplitude as a fraction of the base scale.
    pub pulse_amplitude: f32,
}

impl IdleMotion {
    pub const DEFAULT: IdleMotion = IdleMotion {
        float_y: 0.2,
        float_x: 0.1,
        float_depth: 0.0,
        float_x_frequency: 0.5,
        dispersed_intensity: 1.5,
        formed_intensity: 0.1,
        spin_x: 0.1,
        spin_y: 0.2,
        pulse_frequency: 2.0,
        pulse_amplitude: 0.1,
    };

    /// No idle motion at all; transforms are the bare layout blend.
    pub const STILL: IdleMotion = IdleMotion {
        float_y: 0.0,
        float_x: 0.0,
        float_depth: 0.0,
        float_x_frequency: 0.0,
        dispersed_intensity: 0.0,
        formed_intensity: 0.0,
        spin_x: 0.0,
        spin_y: 0.0,
        pulse_frequency: 0.0,
        pulse_amplitude: 0.0,
    };

    /// How strongly particles float at `progress`.
    #[inline]
    pub fn float_intensity(&self, progress: f32) -> f32 {
        (1.0 - progress) * self.dispersed_intensity + progress * self.formed_intensity
    }

    /// Transform of `record` at `progress` and `elapsed` seconds.
    ///
    /// A non-finite `elapsed` is treated as 0 and `progress` is clamped into
    /// `[0, 1]` (NaN as 0), so the result is always finite for a finite record.
    pub fn evaluate(&self, record: &ParticleRecord, progress: f32, elapsed: f32) -> ParticleTransform {
        let progress = sanitize_progress(progress);
        let t = sanitize_elapsed(elapsed);
        let speed = record.angular_speed;
        let phase = record.phase;

        let blended = record.scattered_position.lerp(record.formed_position, progress);
        let intensity = self.float_intensity(progress);
        let wave = (t * speed + phase).sin();
        let sway = (t * speed * self.float_x_frequency + phase).cos();
        let position = blended
            + Vec3::new(
                sway * self.float_x * intensity,
                wave * self.float_y * intensity,
                wave * self.float_depth * intensity,
            );

        let rotation = record.base_rotation + Vec3::new(t * self.spin_x * speed, t * self.spin_y * speed, 0.0);

        let pulse = 1.0 + (t * self.pulse_frequency + phase).sin() * self.pulse_amplitude;

        ParticleTransform {
            position,
            rotation,
            scale: record.scale * pulse,
        }
    }

    /// Evaluate every record into `out`, reusing its allocation.
    ///
    /// `out` ends up with exactly one transform per record, in id order.
    pub fn evaluate_into(
        &self,
        records: &[ParticleRecord],
        progress: f32,
        elapsed: f32,
        out: &mut Vec<ParticleTransform>,
    ) {
        out.clear();
        out.extend(records.iter().map(|r| self.evaluate(r, progress, elapsed)));
    }
}

impl Default for IdleMotion {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[inline]
fn sanitize_progress(progress: f32) -> f32 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

#[inline]
fn sanitize_elapsed(elapsed: f32) -> f32 {
    if elapsed.is_finite() {
        elapsed
    } else {
        0.0
    }
}

/// Instantaneous placement of one particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleTransform {
    pub position: Vec3,
    /// XYZ Euler angles in radians.
    pub rotation: Vec3,
    /// Uniform scale.
    pub scale: f32,
}

impl ParticleTransform {
    pub const IDENTITY: ParticleTransform = ParticleTransform {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: 1.0,
    };

    /// Rotation as a quaternion, applying X then Y then Z intrinsically.
    #[inline]
    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Model matrix: scale, then rotate, then translate.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.quat(), self.position)
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}

impl Default for ParticleTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// [`IdleMotion::evaluate`] with the default constants.
#[inline]
pub fn evaluate(record: &ParticleRecord, progress: f32, elapsed: f32) -> ParticleTransform {
    IdleMotion::DEFAULT.evaluate(record, progress, elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use std::f32::consts::FRAC_PI_2;

    fn record() -> ParticleRecord {
        ParticleRecord {
            id: 0,
            formed_position: Vec3::new(1.0, 2.0, 3.0),
            scattered_position: Vec3::new(-4.0, 5.0, -6.0),
            base_rotation: Vec3::new(0.3, 0.6, 0.9),
            scale: 1.0,
            color: Color::WHITE,
            angular_speed: 0.5,
            phase: 0.0,
        }
    }

    #[test]
    fn test_float_intensity_endpoints() {
        let m = IdleMotion::DEFAULT;
        assert_eq!(m.float_intensity(0.0), 1.5);
        assert!((m.float_intensity(1.0) - 0.1).abs() < 1e-7);
    }

    #[test]
    fn test_formed_at_time_zero() {
        // phase 0, t 0: sin terms vanish and the x sway is cos(0) * 0.1 * 0.1.
        let r = record();
        let tf = evaluate(&r, 1.0, 0.0);
        assert!((tf.position.x - (1.0 + 0.01)).abs() < 1e-6);
        assert!((tf.position.y - 2.0).abs() < 1e-6);
        assert_eq!(tf.position.z, 3.0);
        assert_eq!(tf.rotation, r.base_rotation);
        assert_eq!(tf.scale, 1.0);
    }

    #[test]
    fn test_dispersed_noise_amplitude() {
        let mut r = record();
        r.phase = FRAC_PI_2;
        let tf = evaluate(&r, 0.0, 0.0);
        // sin(pi/2) = 1 lifts y by 0.2 * 1.5; cos(pi/2) ~ 0 leaves x alone.
        assert!((tf.position.y - (5.0 + 0.3)).abs() < 1e-5);
        assert!((tf.position.x + 4.0).abs() < 1e-5);
        assert_eq!(tf.position.z, -6.0);
        assert!((tf.scale - 1.1).abs() < 1e-6);
    }

    #[test]
    fn test_depth_untouched_by_default() {
        let r = record();
        for i in 0..100 {
            let t = i as f32 * 0.37;
            let p = (i as f32 / 100.0).min(1.0);
            let expected_z = r.scattered_position.lerp(r.formed_position, p).z;
            assert_eq!(evaluate(&r, p, t).position.z, expected_z);
        }
    }

    #[test]
    fn test_float_depth_tunable() {
        let motion = IdleMotion {
            float_depth: 0.2,
            ..IdleMotion::DEFAULT
        };
        let mut r = record();
        r.phase = FRAC_PI_2;
        let tf = motion.evaluate(&r, 0.0, 0.0);
        assert!((tf.position.z - (-6.0 + 0.3)).abs() < 1e-5);
    }

    #[test]
    fn test_spin_accumulates() {
        let r = record();
        let tf = evaluate(&r, 0.5, 10.0);
        assert!((tf.rotation.x - (0.3 + 10.0 * 0.1 * 0.5)).abs() < 1e-5);
        assert!((tf.rotation.y - (0.6 + 10.0 * 0.2 * 0.5)).abs() < 1e-5);
        assert_eq!(tf.rotation.z, 0.9);
    }

    #[test]
    fn test_scale_pulse_bounds() {
        let r = record();
        for i in 0..200 {
            let s = evaluate(&r, 0.5, i as f32 * 0.05).scale;
            assert!((0.9 - 1e-6..=1.1 + 1e-6).contains(&s));
        }
    }

    #[test]
    fn test_deterministic() {
        let r = record();
        let a = evaluate(&r, 0.42, 3.7);
        let b = evaluate(&r, 0.42, 3.7);
        assert_eq!(a.position.to_array().map(f32::to_bits), b.position.to_array().map(f32::to_bits));
        assert_eq!(a.rotation.to_array().map(f32::to_bits), b.rotation.to_array().map(f32::to_bits));
        assert_eq!(a.scale.to_bits(), b.scale.to_bits());
    }

    #[test]
    fn test_non_finite_inputs_stay_finite() {
        let r = record();
        for elapsed in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let tf = evaluate(&r, 0.5, elapsed);
            assert!(tf.is_finite());
            assert_eq!(tf, evaluate(&r, 0.5, 0.0));
        }
        assert_eq!(evaluate(&r, f32::NAN, 1.0), evaluate(&r, 0.0, 1.0));
        assert_eq!(evaluate(&r, 3.0, 1.0), evaluate(&r, 1.0, 1.0));
    }

    #[test]
    fn test_still_motion_is_pure_blend() {
        let r = record();
        let tf = IdleMotion::STILL.evaluate(&r, 0.25, 12.0);
        assert_eq!(tf.position, r.scattered_position.lerp(r.formed_position, 0.25));
        assert_eq!(tf.rotation, r.base_rotation);
        assert_eq!(tf.scale, r.scale);
    }

    #[test]
    fn test_evaluate_into_reuses_buffer() {
        let records = vec![record(); 8];
        let mut out = Vec::with_capacity(8);
        let ptr = out.as_ptr();
        IdleMotion::DEFAULT.evaluate_into(&records, 0.3, 1.0, &mut out);
        IdleMotion::DEFAULT.evaluate_into(&records, 0.4, 2.0, &mut out);
        assert_eq!(out.len(), 8);
        assert_eq!(out.as_ptr(), ptr);
    }

    #[test]
    fn test_matrix_composition() {
        let tf = ParticleTransform {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Vec3::ZERO,
            scale: 2.0,
        };
        let p = tf.to_matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::new(3.0, 2.0, 3.0)).length() < 1e-6);
        assert_eq!(ParticleTransform::IDENTITY.to_matrix(), Mat4::IDENTITY);
    }
}
