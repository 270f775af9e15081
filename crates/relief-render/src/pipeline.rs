//! Render pipelines for the heightmap surface and generic colored meshes.
//!
//! Both pipelines draw translucent geometry: fragment alpha is below 1 by
//! contract (0.5 colorized, 0.1 no-data, caller-chosen for colored meshes),
//! so the color target enables standard alpha blending and depth writes stay
//! off. The embedded WGSL mirrors the CPU core in `relief-shading`.

use std::num::NonZeroU64;

use crate::buffer::{MeshBuffer, VertexPosition, VertexPositionColor};
use crate::uniform::{HeightRangeUniform, TransformUniform};

/// Pipeline for the height-field surface: position-only vertices, spectrum
/// colorization in the fragment stage.
pub struct HeightmapPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl HeightmapPipeline {
    /// Create the pipeline against a compiled [`HEIGHTMAP_SHADER_SOURCE`]
    /// module.
    pub fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
        depth_format: Option<wgpu::TextureFormat>,
    ) -> Self {
        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("heightmap-bind-group-layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: NonZeroU64::new(TransformUniform::SIZE),
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: NonZeroU64::new(HeightRangeUniform::SIZE),
                        },
                        count: None,
                    },
                ],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("heightmap-pipeline-layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = create_translucent_pipeline(
            device,
            "heightmap-pipeline",
            &pipeline_layout,
            shader,
            VertexPosition::layout(),
            surface_format,
            depth_format,
        );

        Self {
            pipeline,
            bind_group_layout,
        }
    }
}

/// Pipeline for generic colored meshes: per-vertex RGBA forwarded straight to
/// the output.
pub struct ColoredMeshPipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl ColoredMeshPipeline {
    /// Create the pipeline against a compiled [`COLORED_SHADER_SOURCE`]
    /// module.
    pub fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
        depth_format: Option<wgpu::TextureFormat>,
    ) -> Self {
        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("colored-mesh-bind-group-layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: NonZeroU64::new(TransformUniform::SIZE),
                    },
                    count: None,
                }],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("colored-mesh-pipeline-layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = create_translucent_pipeline(
            device,
            "colored-mesh-pipeline",
            &pipeline_layout,
            shader,
            VertexPositionColor::layout(),
            surface_format,
            depth_format,
        );

        Self {
            pipeline,
            bind_group_layout,
        }
    }
}

/// Shared pipeline descriptor for both mesh types: alpha-blended color
/// target, no depth writes, no culling (the surface is viewed from both
/// sides), reverse-Z depth compare.
fn create_translucent_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    vertex_layout: wgpu::VertexBufferLayout<'_>,
    surface_format: wgpu::TextureFormat,
    depth_format: Option<wgpu::TextureFormat>,
) -> wgpu::RenderPipeline {
    let depth_stencil = depth_format.map(|format| wgpu::DepthStencilState {
        format,
        depth_write_enabled: false, // translucent geometry
        depth_compare: wgpu::CompareFunction::GreaterEqual, // reverse-Z
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[vertex_layout],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil,
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        multiview_mask: None,
        cache: None,
    })
}

/// Draw the height-field surface. The bind group holds the transform uniform
/// at binding 0 and the height range at binding 1.
pub fn draw_heightmap<'a>(
    render_pass: &mut wgpu::RenderPass<'a>,
    pipeline: &HeightmapPipeline,
    bind_group: &'a wgpu::BindGroup,
    mesh: &'a MeshBuffer,
) {
    render_pass.set_pipeline(&pipeline.pipeline);
    render_pass.set_bind_group(0, bind_group, &[]);
    mesh.bind(render_pass);
    mesh.draw(render_pass);
}

/// Draw a colored mesh. The bind group holds the transform uniform at
/// binding 0.
pub fn draw_colored_mesh<'a>(
    render_pass: &mut wgpu::RenderPass<'a>,
    pipeline: &ColoredMeshPipeline,
    bind_group: &'a wgpu::BindGroup,
    mesh: &'a MeshBuffer,
) {
    render_pass.set_pipeline(&pipeline.pipeline);
    render_pass.set_bind_group(0, bind_group, &[]);
    mesh.bind(render_pass);
    mesh.draw(render_pass);
}

/// WGSL for the heightmap pipeline. The fragment stage is the GPU rendition
/// of `relief_shading::spectrum_color`: same degenerate-range short-circuit,
/// same 7-band table, same fixed alphas, no clamping.
pub const HEIGHTMAP_SHADER_SOURCE: &str = r#"
struct TransformUniform {
    model: mat4x4<f32>,
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
};

struct HeightRangeUniform {
    height_min: f32,
    height_max: f32,
    _pad: vec2<f32>,
};

@group(0) @binding(0)
var<uniform> transform: TransformUniform;

@group(0) @binding(1)
var<uniform> range: HeightRangeUniform;

struct VertexInput {
    @location(0) position: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) height: f32,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = transform.projection * transform.view * transform.model
        * vec4<f32>(in.position, 1.0);
    out.height = in.position.z;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    if (range.height_min == 0.0 && range.height_max == 0.0) {
        // No data loaded yet: near-transparent white.
        return vec4<f32>(1.0, 1.0, 1.0, 0.1);
    }

    let a = 6.0 * (in.height - range.height_min) / (range.height_max - range.height_min);
    let x = floor(a);
    let y = a - x;

    var rgb = vec3<f32>(1.0, 1.0, 1.0);
    if (x == 0.0) {
        rgb = vec3<f32>(0.2, 0.2, y);
    } else if (x == 1.0) {
        rgb = vec3<f32>(0.0, y, 1.0);
    } else if (x == 2.0) {
        rgb = vec3<f32>(0.0, 1.0, 1.0 - y);
    } else if (x == 3.0) {
        rgb = vec3<f32>(y, 1.0 - y, 0.0);
    } else if (x == 4.0) {
        rgb = vec3<f32>(1.0, y, 0.0);
    } else if (x == 5.0) {
        rgb = vec3<f32>(1.0, 1.0, y);
    }

    return vec4<f32>(rgb, 0.5);
}
"#;

/// WGSL for the colored-mesh pipeline: transform plus color passthrough.
pub const COLORED_SHADER_SOURCE: &str = r#"
struct TransformUniform {
    model: mat4x4<f32>,
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> transform: TransformUniform;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = transform.projection * transform.view * transform.model
        * vec4<f32>(in.position, 1.0);
    out.color = in.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::ShaderLibrary;

    fn try_create_test_device() -> Option<(wgpu::Device, wgpu::Queue)> {
        pollster::block_on(async {
            let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
                backends: wgpu::Backends::all(),
                ..Default::default()
            });

            let adapter = instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::default(),
                    compatible_surface: None,
                    force_fallback_adapter: false,
                })
                .await
                .ok()?;

            adapter
                .request_device(&wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                    experimental_features: Default::default(),
                    trace: Default::default(),
                })
                .await
                .ok()
        })
    }

    #[test]
    fn test_shader_sources_declare_expected_entry_points() {
        for source in [HEIGHTMAP_SHADER_SOURCE, COLORED_SHADER_SOURCE] {
            assert!(source.contains("fn vs_main"));
            assert!(source.contains("fn fs_main"));
        }
    }

    #[test]
    fn test_heightmap_shader_carries_the_band_table() {
        // The literals the algorithm hinges on: band scale, dark-grey level,
        // no-data alpha, surface alpha.
        assert!(HEIGHTMAP_SHADER_SOURCE.contains("6.0 * (in.height - range.height_min)"));
        assert!(HEIGHTMAP_SHADER_SOURCE.contains("vec3<f32>(0.2, 0.2, y)"));
        assert!(HEIGHTMAP_SHADER_SOURCE.contains("vec4<f32>(1.0, 1.0, 1.0, 0.1)"));
        assert!(HEIGHTMAP_SHADER_SOURCE.contains("return vec4<f32>(rgb, 0.5)"));
    }

    #[test]
    fn test_heightmap_pipeline_creation_succeeds() {
        let Some((device, _queue)) = try_create_test_device() else {
            eprintln!("no GPU adapter available, skipping");
            return;
        };
        let mut shaders = ShaderLibrary::new();
        let module = shaders.load_from_source(&device, "heightmap", HEIGHTMAP_SHADER_SOURCE);
        let _pipeline = HeightmapPipeline::new(
            &device,
            &module,
            wgpu::TextureFormat::Bgra8UnormSrgb,
            Some(wgpu::TextureFormat::Depth32Float),
        );
        // Pipeline creation validates the WGSL against the vertex and bind
        // group layouts; reaching this line is the assertion.
    }

    #[test]
    fn test_colored_mesh_pipeline_creation_succeeds() {
        let Some((device, _queue)) = try_create_test_device() else {
            eprintln!("no GPU adapter available, skipping");
            return;
        };
        let mut shaders = ShaderLibrary::new();
        let module = shaders.load_from_source(&device, "colored-mesh", COLORED_SHADER_SOURCE);
        let _pipeline = ColoredMeshPipeline::new(
            &device,
            &module,
            wgpu::TextureFormat::Bgra8UnormSrgb,
            None,
        );
    }

    #[test]
    fn test_heightmap_bind_group_accepts_both_uniforms() {
        let Some((device, _queue)) = try_create_test_device() else {
            eprintln!("no GPU adapter available, skipping");
            return;
        };
        let mut shaders = ShaderLibrary::new();
        let module = shaders.load_from_source(&device, "heightmap", HEIGHTMAP_SHADER_SOURCE);
        let pipeline = HeightmapPipeline::new(
            &device,
            &module,
            wgpu::TextureFormat::Bgra8UnormSrgb,
            None,
        );

        let transform = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("test-transform"),
            size: TransformUniform::SIZE,
            usage: wgpu::BufferUsages::UNIFORM,
            mapped_at_creation: false,
        });
        let range = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("test-height-range"),
            size: HeightRangeUniform::SIZE,
            usage: wgpu::BufferUsages::UNIFORM,
            mapped_at_creation: false,
        });

        let _bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("test-heightmap-bind-group"),
            layout: &pipeline.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: transform.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: range.as_entire_binding(),
                },
            ],
        });
    }
}
