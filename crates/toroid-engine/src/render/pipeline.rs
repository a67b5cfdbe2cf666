use std::sync::Arc;
use std::thread;

use futures::channel::oneshot;

use crate::config::RendererConfig;
use crate::coords::OutputSize;
use crate::error::ResourceError;
use crate::resources::{create_device_resources, ByteLoader, DeviceResources, ReadinessGate};
use crate::transform::TransformState;

use super::plan::{plan_frame, PassKind, PassPlan, PassTarget};
use super::{RenderCtx, TargetFormats};

type Pending = oneshot::Receiver<Result<DeviceResources, ResourceError>>;

enum State {
    NotReady,
    Creating(Pending),
    Ready(Box<DeviceResources>),
}

/// Result of a `render` call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    Rendered,
    /// Resources not ready, or targets not yet matching the surface.
    Skipped,
}

/// Two-pass renderer: torus into an offscreen target, then a screen quad
/// sampling it into the presented surface.
///
/// Starts not ready. `begin_create` builds device resources on a worker
/// thread; `poll` installs them. Draws only while ready.
pub struct RenderPipeline {
    config: RendererConfig,
    formats: TargetFormats,
    gate: Arc<ReadinessGate>,
    state: State,
    output: OutputSize,
}

impl RenderPipeline {
    pub fn new(config: RendererConfig, surface_format: wgpu::TextureFormat) -> Self {
        Self {
            config,
            formats: TargetFormats::new(surface_format),
            gate: Arc::new(ReadinessGate::new()),
            state: State::NotReady,
            output: OutputSize::default(),
        }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        matches!(self.state, State::Ready(_)) && self.gate.is_ready()
    }

    #[inline]
    pub fn is_creating(&self) -> bool {
        matches!(self.state, State::Creating(_))
    }

    /// Starts building device resources off the render thread.
    ///
    /// Any existing resources are released first. The worker owns clones of
    /// the device and loader and reports through a fresh readiness gate.
    pub fn begin_create<L>(
        &mut self,
        device: &wgpu::Device,
        loader: Arc<L>,
        output: OutputSize,
    ) -> Result<(), ResourceError>
    where
        L: ByteLoader + 'static,
    {
        self.release();
        self.output = output;

        let gate = Arc::clone(&self.gate);
        let device = device.clone();
        let config = self.config.clone();
        let formats = self.formats;
        let (tx, rx) = oneshot::channel();

        thread::Builder::new()
            .name("toroid-resources".to_string())
            .spawn(move || {
                let result = pollster::block_on(create_device_resources(
                    &device,
                    loader.as_ref(),
                    &config,
                    output,
                    formats,
                    &gate,
                ));
                // Receiver gone: the pipeline was released meanwhile.
                let _ = tx.send(result);
            })
            .map_err(ResourceError::Spawn)?;

        self.state = State::Creating(rx);
        Ok(())
    }

    /// Installs resources once the worker has finished.
    ///
    /// Returns `Ok(true)` on the call that made the pipeline ready. A creation
    /// failure returns the pipeline to not-ready and is handed to the caller.
    pub fn poll(&mut self, device: &wgpu::Device) -> Result<bool, ResourceError> {
        let State::Creating(rx) = &mut self.state else {
            return Ok(false);
        };

        let result = match rx.try_recv() {
            Ok(None) => return Ok(false),
            Ok(Some(result)) => result,
            Err(oneshot::Canceled) => Err(ResourceError::Disconnected),
        };

        // The output may have changed while the worker ran.
        let output = self.output;
        let installed = result.and_then(|mut resources| {
            if output.viewport.is_valid() && resources.output() != output {
                resources.create_size_dependent_resources(device, output)?;
            }
            Ok(resources)
        });

        match installed {
            Ok(resources) => {
                self.state = State::Ready(Box::new(resources));
                Ok(self.gate.is_ready())
            }
            Err(e) => {
                self.state = State::NotReady;
                Err(e)
            }
        }
    }

    /// Records a new output size and rebuilds size-dependent resources.
    ///
    /// Zero-sized outputs (minimized windows) are recorded but not built;
    /// rendering is skipped until a usable size arrives.
    pub fn resize(&mut self, device: &wgpu::Device, output: OutputSize) -> Result<(), ResourceError> {
        self.output = output;
        if !output.viewport.is_valid() {
            return Ok(());
        }
        if let State::Ready(resources) = &mut self.state {
            if resources.output() != output {
                resources.create_size_dependent_resources(device, output)?;
            }
        }
        Ok(())
    }

    /// Draws one frame: scene pass, then composite pass.
    ///
    /// Each pass uploads its transform block to the shared uniform buffer and
    /// is submitted before the next one is encoded.
    pub fn render(&self, ctx: &RenderCtx<'_>, transforms: &TransformState) -> FrameOutcome {
        let State::Ready(resources) = &self.state else {
            return FrameOutcome::Skipped;
        };

        let in_sync = resources.output() == self.output
            && resources.sized.targets.size == ctx.surface_size;
        if !in_sync {
            log::debug!(
                "skipping frame: targets {:?}, surface {:?}",
                resources.sized.targets.size,
                ctx.surface_size
            );
            return FrameOutcome::Skipped;
        }

        let passes = plan_frame(
            self.gate.is_ready(),
            &self.config,
            transforms,
            resources.torus.index_count,
        );
        if passes.is_empty() {
            return FrameOutcome::Skipped;
        }

        for pass in &passes {
            ctx.queue
                .write_buffer(&resources.uniform, 0, bytemuck::bytes_of(&pass.block));

            let mut encoder = ctx
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some(pass_label(pass.kind)),
                });
            encode_pass(&mut encoder, ctx, resources, pass);
            ctx.queue.submit(std::iter::once(encoder.finish()));
        }

        FrameOutcome::Rendered
    }

    /// Drops all device resources and returns to not-ready.
    ///
    /// A worker still running keeps its own gate, so its late result can
    /// never mark this pipeline ready.
    pub fn release(&mut self) {
        if !matches!(self.state, State::NotReady) {
            log::info!("releasing device resources");
        }
        self.state = State::NotReady;
        self.gate = Arc::new(ReadinessGate::new());
    }
}

fn pass_label(kind: PassKind) -> &'static str {
    match kind {
        PassKind::Scene => "toroid scene pass",
        PassKind::Composite => "toroid composite pass",
    }
}

fn encode_pass(
    encoder: &mut wgpu::CommandEncoder,
    ctx: &RenderCtx<'_>,
    resources: &DeviceResources,
    pass: &PassPlan,
) {
    let color_view = match pass.target {
        PassTarget::Offscreen => &resources.sized.targets.color_view,
        PassTarget::Surface => ctx.surface_view,
    };
    let (pipeline, bind_group, mesh) = match pass.kind {
        PassKind::Scene => (
            &resources.scene_pipeline,
            &resources.scene_bind_group,
            &resources.torus,
        ),
        PassKind::Composite => (
            &resources.composite_pipeline,
            &resources.sized.composite_bind_group,
            &resources.sized.quad,
        ),
    };

    let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(pass_label(pass.kind)),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(pass.clear.to_wgpu()),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: &resources.sized.targets.depth_view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(0),
                store: wgpu::StoreOp::Store,
            }),
        }),
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    });

    rpass.set_pipeline(pipeline);
    rpass.set_bind_group(0, bind_group, &[]);
    mesh.bind(&mut rpass);
    rpass.draw_indexed(0..pass.index_count, 0, 0..1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::resources::StaticLoader;

    fn pipeline() -> RenderPipeline {
        RenderPipeline::new(RendererConfig::default(), wgpu::TextureFormat::Bgra8UnormSrgb)
    }

    #[test]
    fn starts_not_ready() {
        let p = pipeline();
        assert!(!p.is_ready());
        assert!(!p.is_creating());
    }

    #[test]
    fn release_swaps_in_a_fresh_gate() {
        let mut p = pipeline();
        let old = Arc::clone(&p.gate);
        for task in crate::resources::ResourceTask::ALL {
            old.complete(task);
        }

        p.release();

        assert!(!Arc::ptr_eq(&old, &p.gate));
        assert!(!p.gate.is_ready());
        assert!(!p.is_ready());
    }

    #[test]
    fn formats_pair_surface_with_offscreen_defaults() {
        let p = pipeline();
        assert_eq!(p.formats.surface, wgpu::TextureFormat::Bgra8UnormSrgb);
        assert_eq!(p.formats.offscreen, TargetFormats::OFFSCREEN);
        assert_eq!(p.formats.depth, TargetFormats::DEPTH);
    }

    // ── worker lifecycle (noop backend) ──

    const SURFACE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Bgra8UnormSrgb;

    fn noop_device() -> (wgpu::Device, wgpu::Queue) {
        wgpu::Device::noop(&wgpu::DeviceDescriptor::default())
    }

    /// Polls until the worker has reported.
    fn finish(p: &mut RenderPipeline, device: &wgpu::Device) -> Result<bool, ResourceError> {
        for _ in 0..1000 {
            let polled = p.poll(device);
            if !p.is_creating() {
                return polled;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("resource worker did not report");
    }

    fn installed_size(p: &RenderPipeline) -> Option<(u32, u32)> {
        match &p.state {
            State::Ready(resources) => Some(resources.sized.targets.size),
            _ => None,
        }
    }

    fn surface(device: &wgpu::Device, (width, height): (u32, u32)) -> wgpu::TextureView {
        device
            .create_texture(&wgpu::TextureDescriptor {
                label: Some("test surface"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: SURFACE_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            })
            .create_view(&wgpu::TextureViewDescriptor::default())
    }

    #[test]
    fn becomes_ready_once_worker_reports() {
        let (device, _queue) = noop_device();
        let mut p = pipeline();
        let output = OutputSize::new(800.0, 600.0);

        p.begin_create(&device, Arc::new(StaticLoader::builtin()), output).unwrap();
        assert!(p.is_creating());
        assert!(!p.is_ready());

        assert!(finish(&mut p, &device).unwrap());
        assert!(p.is_ready());
        assert_eq!(installed_size(&p), Some((800, 600)));

        // Later polls have nothing left to install.
        assert!(!p.poll(&device).unwrap());
    }

    #[test]
    fn creation_error_reaches_caller() {
        let (device, _queue) = noop_device();
        let mut config = RendererConfig::default();
        config.shaders.scene_fragment = "missing.wgsl".to_string();
        let mut p = RenderPipeline::new(config, SURFACE_FORMAT);

        p.begin_create(&device, Arc::new(StaticLoader::builtin()), OutputSize::new(800.0, 600.0))
            .unwrap();

        let err = finish(&mut p, &device).unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(_)));
        assert!(!p.is_ready());
        assert!(!p.is_creating());
    }

    #[test]
    fn rejected_shader_override_is_an_error_not_a_disconnect() {
        let (device, _queue) = noop_device();
        let loader = StaticLoader::builtin().with(
            "screen.frag.wgsl",
            b"@fragment fn main() -> @location(0) vec4<f32> { return vec4<f32>(1.0); }",
        );
        let mut p = pipeline();

        p.begin_create(&device, Arc::new(loader), OutputSize::new(800.0, 600.0)).unwrap();

        let err = finish(&mut p, &device).unwrap_err();
        assert!(matches!(err, ResourceError::Pipeline { .. }), "got {err}");
        assert!(!p.is_ready());
    }

    #[test]
    fn resize_while_creating_applies_on_install() {
        let (device, _queue) = noop_device();
        let mut p = pipeline();

        p.begin_create(&device, Arc::new(StaticLoader::builtin()), OutputSize::new(800.0, 600.0))
            .unwrap();
        p.resize(&device, OutputSize::new(1024.0, 768.0)).unwrap();

        assert!(finish(&mut p, &device).unwrap());
        assert_eq!(installed_size(&p), Some((1024, 768)));
    }

    #[test]
    fn zero_size_resize_keeps_previous_targets() {
        let (device, _queue) = noop_device();
        let mut p = pipeline();
        p.begin_create(&device, Arc::new(StaticLoader::builtin()), OutputSize::new(800.0, 600.0))
            .unwrap();
        finish(&mut p, &device).unwrap();

        p.resize(&device, OutputSize::new(0.0, 0.0)).unwrap();
        assert_eq!(installed_size(&p), Some((800, 600)));
        assert!(p.is_ready());
    }

    #[test]
    fn release_returns_to_not_ready() {
        let (device, _queue) = noop_device();
        let mut p = pipeline();
        p.begin_create(&device, Arc::new(StaticLoader::builtin()), OutputSize::new(800.0, 600.0))
            .unwrap();
        finish(&mut p, &device).unwrap();

        p.release();

        assert!(!p.is_ready());
        assert!(!p.is_creating());
        assert_eq!(installed_size(&p), None);
        assert!(!p.poll(&device).unwrap());
    }

    #[test]
    fn release_while_creating_drops_the_late_result() {
        let (device, _queue) = noop_device();
        let mut p = pipeline();
        p.begin_create(&device, Arc::new(StaticLoader::builtin()), OutputSize::new(800.0, 600.0))
            .unwrap();

        p.release();
        thread::sleep(Duration::from_millis(50));

        assert!(!p.poll(&device).unwrap());
        assert!(!p.is_ready());
    }

    #[test]
    fn renders_only_when_targets_match_surface() {
        let (device, queue) = noop_device();
        let config = RendererConfig::default();
        let output = OutputSize::new(800.0, 600.0);
        let transforms = TransformState::new(&config, output);
        let mut p = RenderPipeline::new(config, SURFACE_FORMAT);

        let view = surface(&device, (800, 600));
        let ctx = RenderCtx::new(&device, &queue, &view, (800, 600));
        assert_eq!(p.render(&ctx, &transforms), FrameOutcome::Skipped);

        p.begin_create(&device, Arc::new(StaticLoader::builtin()), output).unwrap();
        finish(&mut p, &device).unwrap();
        assert_eq!(p.render(&ctx, &transforms), FrameOutcome::Rendered);

        let stale = surface(&device, (640, 480));
        let ctx = RenderCtx::new(&device, &queue, &stale, (640, 480));
        assert_eq!(p.render(&ctx, &transforms), FrameOutcome::Skipped);
    }
}
