//! wgpu plumbing for the height-field viewer: vertex formats, uniform
//! layouts, WGSL programs, and the heightmap / colored-mesh render pipelines.
//!
//! The WGSL fragment and vertex stages embedded here implement the same
//! mappings as the CPU core in `relief-shading`; that crate is the reference
//! the shaders are held to.

pub mod buffer;
pub mod pipeline;
pub mod shader;
pub mod uniform;

pub use buffer::{BufferAllocator, IndexData, MeshBuffer, VertexPosition, VertexPositionColor};
pub use pipeline::{
    COLORED_SHADER_SOURCE, ColoredMeshPipeline, HEIGHTMAP_SHADER_SOURCE, HeightmapPipeline,
    draw_colored_mesh, draw_heightmap,
};
pub use shader::{ShaderError, ShaderLibrary};
pub use uniform::{HeightRangeUniform, TransformUniform};
