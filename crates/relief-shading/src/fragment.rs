//! Fragment-stage entry points for the two pipelines.
//!
//! The rasterizer (external) interpolates the vertex-stage varyings across a
//! primitive; these functions turn one interpolated sample into the final
//! pixel color.

use glam::Vec4;

use crate::spectrum::{HeightRange, spectrum_color};

/// Heightmap fragment stage: interpolated elevation → spectrum color.
pub fn shade_height_fragment(height: f32, range: HeightRange) -> Vec4 {
    spectrum_color(height, range)
}

/// Colored-mesh fragment stage: the interpolated vertex color is the final
/// color, bit-for-bit.
pub fn shade_color_fragment(color: Vec4) -> Vec4 {
    color
}
