use crate::mesh::TorusParams;
use crate::paint::Color;

/// Names the three shader stages are loaded under.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderNames {
    /// Vertex stage shared by both passes.
    pub vertex: String,
    /// Fragment stage of the scene pass.
    pub scene_fragment: String,
    /// Fragment stage of the composite pass; samples the offscreen target.
    pub screen_fragment: String,
}

impl Default for ShaderNames {
    fn default() -> Self {
        Self {
            vertex: "scene.vert.wgsl".to_string(),
            scene_fragment: "scene.frag.wgsl".to_string(),
            screen_fragment: "screen.frag.wgsl".to_string(),
        }
    }
}

/// Renderer configuration.
///
/// Defaults reproduce the demo scene: a 90x30 torus spinning at 45°/s with
/// a light swinging along X.
#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    pub torus: TorusParams,

    /// Idle-mode spin rate.
    pub degrees_per_second: f32,

    /// Half-width of the light's swing along X.
    pub light_amplitude: f32,

    /// Frames per radian of light phase.
    pub light_period_frames: f32,

    /// Clear color of the offscreen scene target.
    pub scene_clear: Color,

    /// Clear color of the presented surface.
    pub composite_clear: Color,

    /// Vertical field of view in degrees; doubled for portrait outputs.
    pub fov_y_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,

    pub shaders: ShaderNames,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            torus: TorusParams::default(),
            degrees_per_second: 45.0,
            light_amplitude: 5.0,
            light_period_frames: 25.0,
            scene_clear: Color::BLACK,
            composite_clear: Color::CORNSILK,
            fov_y_degrees: 70.0,
            z_near: 0.1,
            z_far: 100.0,
            shaders: ShaderNames::default(),
        }
    }
}
