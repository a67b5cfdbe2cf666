//! Fixed cameras of the two passes.

use glam::{Mat4, Vec3};

use crate::coords::{DisplayOrientation, Viewport};

/// Scene camera position.
pub const SCENE_EYE: Vec3 = Vec3::new(0.0, 0.0, 1.5);
/// Point the scene camera looks at, slightly below the torus centre.
pub const SCENE_TARGET: Vec3 = Vec3::new(0.0, -0.1, 0.0);

/// Composite camera position; looks down +Z at the quad in the z = 0 plane.
pub const COMPOSITE_EYE: Vec3 = Vec3::new(0.0, 0.0, -100.5);
pub const COMPOSITE_NEAR: f32 = 1.0;
pub const COMPOSITE_FAR: f32 = 500.0;

/// Right-handed perspective with depth in `0..1`.
///
/// Portrait outputs double the vertical field of view so the torus keeps
/// roughly the same on-screen width.
pub fn scene_projection(viewport: Viewport, fov_y_degrees: f32, z_near: f32, z_far: f32) -> Mat4 {
    let aspect = viewport.aspect_ratio();
    let mut fov_y = fov_y_degrees.to_radians();
    if aspect < 1.0 {
        fov_y *= 2.0;
    }
    Mat4::perspective_rh(fov_y, aspect, z_near, z_far)
}

pub fn scene_view() -> Mat4 {
    Mat4::look_at_rh(SCENE_EYE, SCENE_TARGET, Vec3::Y)
}

pub fn composite_view() -> Mat4 {
    Mat4::look_to_rh(COMPOSITE_EYE, Vec3::Z, Vec3::Y)
}

/// Orthographic projection sized exactly to the output, one world unit per
/// pixel, followed by the presented surface's orientation correction.
pub fn composite_projection(viewport: Viewport, orientation: DisplayOrientation) -> Mat4 {
    let hx = viewport.width / 2.0;
    let hy = viewport.height / 2.0;
    let ortho = Mat4::orthographic_rh(-hx, hx, -hy, hy, COMPOSITE_NEAR, COMPOSITE_FAR);
    orientation.correction() * ortho
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use glam::Vec4;

    fn ndc(clip: Vec4) -> Vec3 {
        clip.truncate() / clip.w
    }

    #[test]
    fn composite_maps_quad_corners_to_ndc_corners() {
        let vp = Viewport::new(800.0, 600.0);
        let m = composite_projection(vp, DisplayOrientation::Identity) * composite_view();

        // The camera looks down +Z, so world +X lands on the left.
        let p = ndc(m * Vec4::new(400.0, 300.0, 0.0, 1.0));
        assert_abs_diff_eq!(p.x, -1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-5);
        assert!(p.z > 0.0 && p.z < 1.0);

        let q = ndc(m * Vec4::new(-400.0, -300.0, 0.0, 1.0));
        assert_abs_diff_eq!(q.x, 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(q.y, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn orientation_only_rotates_clip_space() {
        let vp = Viewport::new(800.0, 600.0);
        let base = composite_projection(vp, DisplayOrientation::Identity);
        let rotated = composite_projection(vp, DisplayOrientation::Rotate90);
        assert_eq!(rotated, DisplayOrientation::Rotate90.correction() * base);
    }

    #[test]
    fn portrait_doubles_field_of_view() {
        let landscape = scene_projection(Viewport::new(800.0, 600.0), 70.0, 0.1, 100.0);
        let portrait = scene_projection(Viewport::new(600.0, 800.0), 70.0, 0.1, 100.0);
        let y_scale = |fov: f32| 1.0 / (fov.to_radians() / 2.0).tan();
        assert_abs_diff_eq!(landscape.y_axis.y, y_scale(70.0), epsilon = 1e-5);
        assert_abs_diff_eq!(portrait.y_axis.y, y_scale(140.0), epsilon = 1e-5);
    }

    #[test]
    fn scene_depth_range_is_zero_to_one() {
        let proj = scene_projection(Viewport::new(800.0, 600.0), 70.0, 0.1, 100.0);
        let near = ndc(proj * Vec4::new(0.0, 0.0, -0.1, 1.0));
        let far = ndc(proj * Vec4::new(0.0, 0.0, -100.0, 1.0));
        assert_abs_diff_eq!(near.z, 0.0, epsilon = 1e-5);
        assert_abs_diff_eq!(far.z, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn torus_centre_is_in_front_of_scene_camera() {
        let view_pos = scene_view() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(view_pos.z < 0.0);
    }
}
