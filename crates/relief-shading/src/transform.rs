//! Vertex-stage transform shared by the heightmap and colored-mesh pipelines.
//!
//! Projects a model-space position into clip space through the host-supplied
//! model, view, and projection matrices, and forwards the per-vertex attribute
//! the matching fragment stage consumes (elevation or color).

use glam::{Mat4, Vec3, Vec4};

/// Per-draw-call transform matrices supplied by the host.
///
/// Immutable for the duration of a draw call; the host may swap them between
/// draw calls (camera movement, per-object model transforms).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformUniforms {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
}

impl TransformUniforms {
    /// All three matrices set to identity. Clip position equals the input
    /// position extended with w = 1.
    pub const IDENTITY: Self = Self {
        model: Mat4::IDENTITY,
        view: Mat4::IDENTITY,
        projection: Mat4::IDENTITY,
    };

    /// Combined model-view-projection matrix, `projection * view * model`.
    pub fn mvp(&self) -> Mat4 {
        self.projection * self.view * self.model
    }

    /// Transform a model-space position into clip space.
    pub fn clip_position(&self, position: Vec3) -> Vec4 {
        self.mvp() * position.extend(1.0)
    }
}

impl Default for TransformUniforms {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Output of the heightmap vertex stage: clip position plus the elevation
/// varying, interpolated across the primitive by the rasterizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightVertex {
    pub clip_position: Vec4,
    /// Model-space z of the vertex, forwarded unchanged.
    pub height: f32,
}

/// Output of the colored-mesh vertex stage: clip position plus the vertex
/// color varying.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorVertex {
    pub clip_position: Vec4,
    pub color: Vec4,
}

/// Heightmap vertex stage. The elevation forwarded to the fragment stage is
/// the vertex's model-space z coordinate, before any transform is applied.
pub fn shade_height_vertex(uniforms: &TransformUniforms, position: Vec3) -> HeightVertex {
    HeightVertex {
        clip_position: uniforms.clip_position(position),
        height: position.z,
    }
}

/// Colored-mesh vertex stage. The vertex color passes through untouched.
pub fn shade_color_vertex(uniforms: &TransformUniforms, position: Vec3, color: Vec4) -> ColorVertex {
    ColorVertex {
        clip_position: uniforms.clip_position(position),
        color,
    }
}
