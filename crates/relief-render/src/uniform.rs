//! GPU-layout mirrors of the host-supplied uniforms.

use bytemuck::{Pod, Zeroable};
use relief_shading::{HeightRange, TransformUniforms};

/// Uniform buffer image of the three transform matrices. 192 bytes, three
/// column-major `mat4x4<f32>`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct TransformUniform {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl TransformUniform {
    /// Byte size of the uniform buffer binding.
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;

    pub fn from_uniforms(uniforms: &TransformUniforms) -> Self {
        Self {
            model: uniforms.model.to_cols_array_2d(),
            view: uniforms.view.to_cols_array_2d(),
            projection: uniforms.projection.to_cols_array_2d(),
        }
    }
}

impl From<&TransformUniforms> for TransformUniform {
    fn from(uniforms: &TransformUniforms) -> Self {
        Self::from_uniforms(uniforms)
    }
}

/// Uniform buffer image of the elevation range. Padded out to the 16-byte
/// uniform stride; field names follow the shader.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct HeightRangeUniform {
    pub height_min: f32,
    pub height_max: f32,
    pub _pad: [f32; 2],
}

impl HeightRangeUniform {
    /// Byte size of the uniform buffer binding.
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;

    pub fn from_range(range: HeightRange) -> Self {
        Self {
            height_min: range.min,
            height_max: range.max,
            _pad: [0.0; 2],
        }
    }
}

impl From<HeightRange> for HeightRangeUniform {
    fn from(range: HeightRange) -> Self {
        Self::from_range(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec3};

    #[test]
    fn test_transform_uniform_is_three_packed_matrices() {
        assert_eq!(std::mem::size_of::<TransformUniform>(), 192);
        assert_eq!(TransformUniform::SIZE, 192);
    }

    #[test]
    fn test_transform_uniform_preserves_matrix_columns() {
        let uniforms = TransformUniforms {
            model: Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)),
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        };
        let gpu = TransformUniform::from_uniforms(&uniforms);
        // Translation lives in the fourth column.
        assert_eq!(gpu.model[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(gpu.view, Mat4::IDENTITY.to_cols_array_2d());
    }

    #[test]
    fn test_height_range_uniform_is_padded_to_sixteen_bytes() {
        assert_eq!(std::mem::size_of::<HeightRangeUniform>(), 16);
        assert_eq!(HeightRangeUniform::SIZE, 16);
    }

    #[test]
    fn test_height_range_uniform_carries_both_bounds() {
        let gpu = HeightRangeUniform::from_range(HeightRange::new(-4.5, 12.25));
        assert_eq!(gpu.height_min, -4.5);
        assert_eq!(gpu.height_max, 12.25);
    }
}
