use glam::{Mat4, Vec4};

use crate::config::RendererConfig;
use crate::coords::OutputSize;
use crate::time::{FrameTime, TimeSource};

use super::camera;
use super::{TrackingHandle, TransformBlock};

/// Light position before the first update.
const INITIAL_LIGHT: Vec4 = Vec4::new(2.0, 2.0, 2.0, 1.0);

/// Rotation angle for idle mode at `total_seconds`, in `[0, 2π)`.
///
/// Wrapped in degrees, in f64.
pub fn idle_angle(total_seconds: f64, degrees_per_second: f32) -> f32 {
    let degrees = (total_seconds * f64::from(degrees_per_second)).rem_euclid(360.0);
    degrees.to_radians() as f32
}

/// Rotation angle for a pointer at `pointer_x`; one window width is two
/// full turns.
pub fn tracking_angle(pointer_x: f32, viewport_width: f32) -> f32 {
    std::f32::consts::TAU * 2.0 * pointer_x / viewport_width
}

/// Per-frame transforms of both passes.
///
/// Two modes: idle, where the torus spins as a function of elapsed time, and
/// tracking, where the horizontal pointer position sets the angle.
#[derive(Debug)]
pub struct TransformState {
    degrees_per_second: f32,
    light_amplitude: f32,
    light_period_frames: f32,
    fov_y_degrees: f32,
    z_near: f32,
    z_far: f32,

    output: OutputSize,
    tracking: TrackingHandle,
    angle: f32,

    scene: TransformBlock,
    composite: TransformBlock,
}

impl TransformState {
    pub fn new(config: &RendererConfig, output: OutputSize) -> Self {
        let mut state = Self {
            degrees_per_second: config.degrees_per_second,
            light_amplitude: config.light_amplitude,
            light_period_frames: config.light_period_frames,
            fov_y_degrees: config.fov_y_degrees,
            z_near: config.z_near,
            z_far: config.z_far,
            output,
            tracking: TrackingHandle::new(),
            angle: 0.0,
            scene: TransformBlock::new(
                Mat4::IDENTITY,
                camera::scene_view(),
                Mat4::IDENTITY,
                camera::SCENE_EYE.extend(1.0),
                INITIAL_LIGHT,
            ),
            composite: TransformBlock::new(
                Mat4::IDENTITY,
                camera::composite_view(),
                Mat4::IDENTITY,
                camera::COMPOSITE_EYE.extend(1.0),
                Vec4::ZERO,
            ),
        };
        state.set_output(output);
        state
    }

    /// Handle for posting pointer input from another thread.
    pub fn tracking_handle(&self) -> TrackingHandle {
        self.tracking.clone()
    }

    pub fn start_tracking(&self) {
        self.tracking.start();
    }

    /// Applies the pointer position immediately. Ignored when not tracking.
    pub fn tracking_update(&mut self, pointer_x: f32) {
        if !self.is_tracking() {
            return;
        }
        self.tracking.post(pointer_x);
        self.apply_pointer(pointer_x);
    }

    pub fn stop_tracking(&self) {
        self.tracking.stop();
    }

    #[inline]
    pub fn is_tracking(&self) -> bool {
        self.tracking.is_tracking()
    }

    /// Advances the animation to `time`.
    pub fn update(&mut self, time: &FrameTime) {
        if self.is_tracking() {
            if let Some(x) = self.tracking.latest() {
                self.apply_pointer(x);
            }
        } else {
            self.set_angle(idle_angle(time.total_seconds(), self.degrees_per_second));
        }

        let frame = time.frame_index as f32;
        let light_x = self.light_amplitude * (frame / self.light_period_frames).sin();
        self.scene.light = [light_x, 2.0, 2.0, 1.0];
        self.composite.light = [frame, 0.0, 0.0, 0.0];
    }

    /// Recomputes both projections for a new output size.
    ///
    /// Only the composite projection carries the orientation correction; the
    /// offscreen target is never rotated.
    pub fn set_output(&mut self, output: OutputSize) {
        self.output = output;
        if !output.viewport.is_valid() {
            log::debug!("skipping projection update for {:?}", output.viewport);
            return;
        }

        let scene_projection = camera::scene_projection(
            output.viewport,
            self.fov_y_degrees,
            self.z_near,
            self.z_far,
        );
        self.scene.projection = scene_projection.to_cols_array_2d();
        self.composite.projection =
            camera::composite_projection(output.viewport, output.orientation).to_cols_array_2d();
    }

    #[inline]
    pub fn output(&self) -> OutputSize {
        self.output
    }

    /// Current model rotation about +Y, in radians.
    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[inline]
    pub fn scene_block(&self) -> &TransformBlock {
        &self.scene
    }

    #[inline]
    pub fn composite_block(&self) -> &TransformBlock {
        &self.composite
    }

    fn apply_pointer(&mut self, pointer_x: f32) {
        let viewport = self.output.viewport;
        if !viewport.is_valid() {
            return;
        }
        self.set_angle(tracking_angle(pointer_x, viewport.width));
    }

    fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
        self.scene.set_model(Mat4::from_rotation_y(angle));
    }
}
