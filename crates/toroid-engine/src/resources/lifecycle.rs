use std::future::Future;
use std::num::NonZeroU64;

use wgpu::util::DeviceExt;

use crate::config::RendererConfig;
use crate::coords::OutputSize;
use crate::error::ResourceError;
use crate::mesh::{build_screen_quad, build_torus, Vertex};
use crate::render::{create_scene_sampler, RenderTargets, TargetFormats};
use crate::transform::TransformBlock;

use super::{load_shader, ByteLoader, GpuMesh, ReadinessGate, ResourceTask};

/// Everything that has to be rebuilt when the output size changes.
pub struct SizeDependent {
    pub output: OutputSize,
    pub quad: GpuMesh,
    pub targets: RenderTargets,
    /// References the offscreen color view, so it follows the targets.
    pub composite_bind_group: wgpu::BindGroup,
}

/// GPU objects owned by the renderer while ready.
pub struct DeviceResources {
    pub formats: TargetFormats,

    /// Shared by both passes; rewritten before each pass.
    pub uniform: wgpu::Buffer,
    pub torus: GpuMesh,
    pub sampler: wgpu::Sampler,

    pub scene_layout: wgpu::BindGroupLayout,
    pub composite_layout: wgpu::BindGroupLayout,
    pub scene_bind_group: wgpu::BindGroup,

    pub scene_pipeline: wgpu::RenderPipeline,
    pub composite_pipeline: wgpu::RenderPipeline,

    pub sized: SizeDependent,
}

/// Builds all device resources, reporting each task to `gate`.
///
/// Shader loads run concurrently and fail fast. Geometry, targets and
/// pipelines follow once all three modules exist.
pub async fn create_device_resources<L: ByteLoader>(
    device: &wgpu::Device,
    loader: &L,
    config: &RendererConfig,
    output: OutputSize,
    formats: TargetFormats,
    gate: &ReadinessGate,
) -> Result<DeviceResources, ResourceError> {
    let names = &config.shaders;
    log::info!(
        "creating device resources for {}x{}",
        output.viewport.width,
        output.viewport.height
    );

    let (vertex, scene_fragment, screen_fragment) = futures::try_join!(
        tracked(gate, ResourceTask::VertexShader, load_shader(device, loader, &names.vertex)),
        tracked(gate, ResourceTask::SceneFragment, load_shader(device, loader, &names.scene_fragment)),
        tracked(gate, ResourceTask::ScreenFragment, load_shader(device, loader, &names.screen_fragment)),
    )?;

    let shaders = StageModules {
        vertex: &vertex,
        scene_fragment: &scene_fragment,
        screen_fragment: &screen_fragment,
    };
    let result = DeviceResources::assemble(device, config, output, formats, shaders).await;
    report(gate, ResourceTask::Buffers, &result);
    result
}

struct StageModules<'a> {
    vertex: &'a wgpu::ShaderModule,
    scene_fragment: &'a wgpu::ShaderModule,
    screen_fragment: &'a wgpu::ShaderModule,
}

async fn tracked<T>(
    gate: &ReadinessGate,
    task: ResourceTask,
    fut: impl Future<Output = Result<T, ResourceError>>,
) -> Result<T, ResourceError> {
    let result = fut.await;
    report(gate, task, &result);
    result
}

fn report<T>(gate: &ReadinessGate, task: ResourceTask, result: &Result<T, ResourceError>) {
    match result {
        Ok(_) => {
            gate.complete(task);
        }
        Err(e) => {
            log::warn!("{task:?}: {e}");
            gate.fail(task);
        }
    }
}

impl DeviceResources {
    async fn assemble(
        device: &wgpu::Device,
        config: &RendererConfig,
        output: OutputSize,
        formats: TargetFormats,
        shaders: StageModules<'_>,
    ) -> Result<Self, ResourceError> {
        let torus = build_torus(&config.torus)?;
        let torus = GpuMesh::upload(device, &torus, "toroid torus");

        let uniform = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("toroid transforms"),
            contents: bytemuck::bytes_of(&TransformBlock::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let sampler = create_scene_sampler(device);

        let scene_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("toroid scene bgl"),
            entries: &[uniform_layout_entry()],
        });

        let composite_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("toroid composite bgl"),
            entries: &[
                uniform_layout_entry(),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("toroid scene bind group"),
            layout: &scene_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform.as_entire_binding(),
            }],
        });

        let scene_pipeline = create_pipeline(
            device,
            PipelineDesc {
                label: "toroid scene pipeline",
                layout: &scene_layout,
                vertex: shaders.vertex,
                fragment: shaders.scene_fragment,
                color_format: formats.offscreen,
                depth_format: formats.depth,
                cull_mode: Some(wgpu::Face::Back),
            },
        )
        .await?;

        let composite_pipeline = create_pipeline(
            device,
            PipelineDesc {
                label: "toroid composite pipeline",
                layout: &composite_layout,
                vertex: shaders.vertex,
                fragment: shaders.screen_fragment,
                color_format: formats.surface,
                depth_format: formats.depth,
                cull_mode: None,
            },
        )
        .await?;

        let sized = SizeDependent::new(device, output, formats, &composite_layout, &uniform, &sampler)?;

        Ok(Self {
            formats,
            uniform,
            torus,
            sampler,
            scene_layout,
            composite_layout,
            scene_bind_group,
            scene_pipeline,
            composite_pipeline,
            sized,
        })
    }

    /// Rebuilds the screen quad, render targets and composite bind group for
    /// a new output size. On error the previous set stays in place.
    pub fn create_size_dependent_resources(
        &mut self,
        device: &wgpu::Device,
        output: OutputSize,
    ) -> Result<(), ResourceError> {
        self.sized = SizeDependent::new(
            device,
            output,
            self.formats,
            &self.composite_layout,
            &self.uniform,
            &self.sampler,
        )?;
        log::debug!(
            "size-dependent resources rebuilt for {}x{}",
            output.viewport.width,
            output.viewport.height
        );
        Ok(())
    }

    #[inline]
    pub fn output(&self) -> OutputSize {
        self.sized.output
    }
}

impl SizeDependent {
    fn new(
        device: &wgpu::Device,
        output: OutputSize,
        formats: TargetFormats,
        composite_layout: &wgpu::BindGroupLayout,
        uniform: &wgpu::Buffer,
        sampler: &wgpu::Sampler,
    ) -> Result<Self, ResourceError> {
        let targets = RenderTargets::new(device, output.viewport, formats)?;
        let quad = build_screen_quad(output.viewport)?;
        let quad = GpuMesh::upload(device, &quad, "toroid screen quad");

        let composite_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("toroid composite bind group"),
            layout: composite_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&targets.color_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        Ok(Self {
            output,
            quad,
            targets,
            composite_bind_group,
        })
    }
}

fn uniform_layout_entry() -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: NonZeroU64::new(TransformBlock::SIZE),
        },
        count: None,
    }
}

struct PipelineDesc<'a> {
    label: &'a str,
    layout: &'a wgpu::BindGroupLayout,
    vertex: &'a wgpu::ShaderModule,
    fragment: &'a wgpu::ShaderModule,
    color_format: wgpu::TextureFormat,
    depth_format: wgpu::TextureFormat,
    cull_mode: Option<wgpu::Face>,
}

/// Builds a render pipeline inside a validation error scope, so a shader
/// that does not match the layout or vertex interface comes back as
/// [`ResourceError::Pipeline`].
async fn create_pipeline(
    device: &wgpu::Device,
    desc: PipelineDesc<'_>,
) -> Result<wgpu::RenderPipeline, ResourceError> {
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(desc.label),
        bind_group_layouts: &[desc.layout],
        immediate_size: 0,
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(&layout),

        vertex: wgpu::VertexState {
            module: desc.vertex,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[Vertex::layout()],
        },

        fragment: Some(wgpu::FragmentState {
            module: desc.fragment,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: desc.color_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: desc.cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: Some(wgpu::DepthStencilState {
            format: desc.depth_format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),

        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    });

    match scope.pop().await {
        None => Ok(pipeline),
        Some(err) => Err(ResourceError::Pipeline {
            label: desc.label.to_string(),
            message: err.to_string(),
        }),
    }
}
