use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use winit::dpi::LogicalSize;
use winit::window::WindowId;

use toroid_engine::core::{App, AppControl, FrameCtx, WindowCtx};
use toroid_engine::device::{Gpu, GpuInit};
use toroid_engine::input::{Key, MouseButton};
use toroid_engine::logging::{init_logging, LoggingConfig};
use toroid_engine::render::RenderPipeline;
use toroid_engine::resources::{FileLoader, StaticLoader};
use toroid_engine::transform::TransformState;
use toroid_engine::window::{Runtime, RuntimeConfig};
use toroid_engine::RendererConfig;

/// Directory with WGSL overrides; built-in shaders are used when unset.
const SHADER_DIR_VAR: &str = "TOROID_SHADER_DIR";

const LOADING_TITLE: &str = "toroid (loading)";
const READY_TITLE: &str = "toroid";

struct Scene {
    renderer: RenderPipeline,
    transforms: TransformState,
}

struct Demo {
    config: RendererConfig,
    shader_dir: Option<PathBuf>,
    scene: Option<Scene>,
}

impl Demo {
    fn new(config: RendererConfig) -> Self {
        Self {
            config,
            shader_dir: std::env::var_os(SHADER_DIR_VAR).map(PathBuf::from),
            scene: None,
        }
    }

    fn handle_pointer(scene: &mut Scene, ctx: &FrameCtx<'_, '_>) {
        let frame = ctx.input_frame;
        let pointer_x = ctx.input.pointer_x();

        if frame.buttons_pressed.contains(&MouseButton::Left) {
            scene.transforms.start_tracking();
            if let Some(x) = pointer_x {
                scene.transforms.tracking_update(x);
            }
        } else if frame.pointer_moved && scene.transforms.is_tracking() {
            if let Some(x) = pointer_x {
                scene.transforms.tracking_update(x);
            }
        }

        if frame.buttons_released.contains(&MouseButton::Left) {
            scene.transforms.stop_tracking();
        }
    }
}

impl App for Demo {
    fn on_window_created(&mut self, window: &WindowCtx<'_>, gpu: &Gpu<'_>) -> AppControl {
        let output = gpu.output_size();
        let mut renderer = RenderPipeline::new(self.config.clone(), gpu.surface_format());
        let transforms = TransformState::new(&self.config, output);

        let started = match &self.shader_dir {
            Some(dir) => {
                log::info!("loading shaders from {}", dir.display());
                renderer.begin_create(gpu.device(), Arc::new(FileLoader::new(dir)), output)
            }
            None => renderer.begin_create(gpu.device(), Arc::new(StaticLoader::builtin()), output),
        };

        if let Err(e) = started {
            log::error!("could not start resource creation: {e}");
            return AppControl::Exit;
        }

        window.set_title(LOADING_TITLE);
        log::info!(
            "window {:?} on {}; drag with the left button to spin, Escape to quit",
            window.id,
            gpu.adapter_info().name
        );
        self.scene = Some(Scene {
            renderer,
            transforms,
        });
        AppControl::Continue
    }

    fn on_resized(&mut self, _window_id: WindowId, gpu: &Gpu<'_>) -> AppControl {
        let Some(scene) = self.scene.as_mut() else {
            return AppControl::Continue;
        };

        let output = gpu.output_size();
        scene.transforms.set_output(output);
        if let Err(e) = scene.renderer.resize(gpu.device(), output) {
            log::error!("failed to rebuild size-dependent resources: {e}");
            return AppControl::Exit;
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.keys_pressed.contains(&Key::Escape) {
            return AppControl::Exit;
        }

        let Some(scene) = self.scene.as_mut() else {
            return AppControl::Continue;
        };

        match scene.renderer.poll(ctx.gpu.device()) {
            Ok(true) => {
                log::info!("renderer ready");
                ctx.window.set_title(READY_TITLE);
            }
            Ok(false) => {}
            Err(e) => {
                log::error!("device resource creation failed: {e}");
                return AppControl::Exit;
            }
        }

        Self::handle_pointer(scene, ctx);
        scene.transforms.update(&ctx.time);

        let Scene {
            renderer,
            transforms,
        } = scene;
        ctx.render(|rctx| renderer.render(rctx, transforms))
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let runtime = RuntimeConfig {
        title: READY_TITLE.to_string(),
        initial_size: LogicalSize::new(1024.0, 768.0),
    };

    Runtime::run(runtime, GpuInit::default(), Demo::new(RendererConfig::default()))
}
