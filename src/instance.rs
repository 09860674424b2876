//! Boundary between the swarm and whatever draws it.
//!
//! The core only produces plain slices of transforms and colors. A renderer
//! receives them through [`InstanceSink`]; [`InstanceBuffer`] is a ready-made
//! sink that packs everything into a GPU-friendly per-instance layout.

use crate::color::Color;
use crate::transform::ParticleTransform;
use bytemuck::{Pod, Zeroable};

/// Receives per-instance data keyed by particle id (the slice index).
pub trait InstanceSink {
    /// Called when a particle set is installed. Colors never change in between.
    fn write_colors(&mut self, colors: &[Color]);

    /// Called once per frame with one transform per particle.
    fn write_transforms(&mut self, transforms: &[ParticleTransform]);
}

/// Per-instance vertex data: a column-major model matrix and an RGBA color.
///
/// 80 bytes, no padding needed.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl InstanceRaw {
    pub const SIZE: usize = std::mem::size_of::<InstanceRaw>();

    /// Byte offset of `color`, for vertex attribute setup.
    pub const COLOR_OFFSET: usize = std::mem::size_of::<[[f32; 4]; 4]>();
}

impl Default for InstanceRaw {
    fn default() -> Self {
        Self {
            model: ParticleTransform::IDENTITY.to_matrix().to_cols_array_2d(),
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// CPU-side instance buffer with dirty tracking.
///
/// Upload code reads [`InstanceBuffer::as_bytes`] when either dirty flag is
/// set, then calls [`InstanceBuffer::mark_uploaded`].
#[derive(Debug, Default)]
pub struct InstanceBuffer {
    instances: Vec<InstanceRaw>,
    colors_dirty: bool,
    transforms_dirty: bool,
}

impl InstanceBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    #[inline]
    pub fn instances(&self) -> &[InstanceRaw] {
        &self.instances
    }

    /// Raw bytes for upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    #[inline]
    pub fn colors_dirty(&self) -> bool {
        self.colors_dirty
    }

    #[inline]
    pub fn transforms_dirty(&self) -> bool {
        self.transforms_dirty
    }

    pub fn mark_uploaded(&mut self) {
        self.colors_dirty = false;
        self.transforms_dirty = false;
    }

    fn resize(&mut self, len: usize) {
        if self.instances.len() != len {
            self.instances.resize(len, InstanceRaw::default());
            self.colors_dirty = true;
            self.transforms_dirty = true;
        }
    }
}

impl InstanceSink for InstanceBuffer {
    fn write_colors(&mut self, colors: &[Color]) {
        self.resize(colors.len());
        for (instance, color) in self.instances.iter_mut().zip(colors) {
            instance.color = [color.r, color.g, color.b, 1.0];
        }
        self.colors_dirty = true;
    }

    fn write_transforms(&mut self, transforms: &[ParticleTransform]) {
        self.resize(transforms.len());
        for (instance, transform) in self.instances.iter_mut().zip(transforms) {
            instance.model = transform.to_matrix().to_cols_array_2d();
        }
        self.transforms_dirty = true;
    }
}
