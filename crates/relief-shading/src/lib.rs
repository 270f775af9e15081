//! CPU reference implementation of the viewer's shading stages: the shared
//! vertex transform, the height-spectrum colorizer for heightmap surfaces, and
//! the passthrough colorizer for generic colored meshes.
//!
//! Everything in this crate is a pure function of its inputs. The GPU-side
//! WGSL programs in `relief-render` implement the same mappings; this crate is
//! the authoritative definition and the one exercised by tests.

pub mod fragment;
pub mod preview;
pub mod spectrum;
pub mod transform;

pub use fragment::{shade_color_fragment, shade_height_fragment};
pub use preview::{PreviewImage, render_heightfield_preview, render_spectrum_strip};
pub use spectrum::{HeightRange, NO_DATA_COLOR, SURFACE_ALPHA, spectrum_color};
pub use transform::{
    ColorVertex, HeightVertex, TransformUniforms, shade_color_vertex, shade_height_vertex,
};
