//! Model and projection matrix construction.
//!
//! Everything here is column-major glam, matching what the uniform upload
//! path hands the driver. The model matrix composition order is fixed:
//! translate, rotate about X then Y then Z, scale last. Callers depend on
//! that exact order, not just on the visual result.

use glam::{Mat4, Vec3, Vec4};

/// Builds the model matrix for a position, per-axis rotation in degrees and
/// uniform scale.
pub fn transformation_matrix(position: Vec3, rotation_deg: Vec3, scale: f32) -> Mat4 {
    Mat4::from_translation(position)
        * Mat4::from_rotation_x(rotation_deg.x.to_radians())
        * Mat4::from_rotation_y(rotation_deg.y.to_radians())
        * Mat4::from_rotation_z(rotation_deg.z.to_radians())
        * Mat4::from_scale(Vec3::splat(scale))
}

/// Builds a standard GL perspective projection from a vertical field of view
/// in degrees, near/far planes and the viewport aspect ratio. Computed once
/// at startup and shared read-only afterwards.
pub fn projection_matrix(fov_deg: f32, near: f32, far: f32, aspect_ratio: f32) -> Mat4 {
    let scale = 1.0 / (fov_deg.to_radians() / 2.0).tan();
    let frustum_len = far - near;
    Mat4::from_cols(
        Vec4::new(scale / aspect_ratio, 0.0, 0.0, 0.0),
        Vec4::new(0.0, scale, 0.0, 0.0),
        Vec4::new(0.0, 0.0, -(near + far) / frustum_len, -1.0),
        Vec4::new(0.0, 0.0, -2.0 * near * far / frustum_len, 0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    #[test]
    fn identity_rotation_and_unit_scale_is_pure_translation() {
        let position = Vec3::new(3.0, -2.0, 7.5);
        let m = transformation_matrix(position, Vec3::ZERO, 1.0);
        assert!(m.abs_diff_eq(Mat4::from_translation(position), EPSILON));
    }

    #[test]
    fn reference_transform_maps_known_points() {
        // Position (1,0,0), rotation (0,90,0) degrees, scale 2.
        let m = transformation_matrix(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 90.0, 0.0), 2.0);

        // The local origin lands on the translation.
        let origin = m.transform_point3(Vec3::ZERO);
        assert!(origin.abs_diff_eq(Vec3::new(1.0, 0.0, 0.0), EPSILON));

        // Local (0,0,1): rotated 90 degrees about Y onto +X, doubled by the
        // scale, then offset by the translation.
        let point = m.transform_point3(Vec3::new(0.0, 0.0, 1.0));
        assert!(point.abs_diff_eq(Vec3::new(3.0, 0.0, 0.0), EPSILON));
    }

    #[test]
    fn rotation_axes_compose_x_then_y_then_z() {
        let rotation = Vec3::new(90.0, 0.0, 90.0);
        let m = transformation_matrix(Vec3::ZERO, rotation, 1.0);
        let expected = Mat4::from_rotation_x(90_f32.to_radians())
            * Mat4::from_rotation_z(90_f32.to_radians());
        assert!(m.abs_diff_eq(expected, EPSILON));

        // The reversed composition is a genuinely different matrix.
        let reversed = Mat4::from_rotation_z(90_f32.to_radians())
            * Mat4::from_rotation_x(90_f32.to_radians());
        assert!(!m.abs_diff_eq(reversed, EPSILON));
    }

    #[test]
    fn scale_applies_in_local_space_before_translation() {
        let m = transformation_matrix(Vec3::new(5.0, 0.0, 0.0), Vec3::ZERO, 3.0);
        let point = m.transform_point3(Vec3::new(1.0, 1.0, 1.0));
        assert!(point.abs_diff_eq(Vec3::new(8.0, 3.0, 3.0), EPSILON));
    }

    #[test]
    fn projection_matches_reference_perspective() {
        let fov = 45.0_f32;
        let (near, far, aspect) = (0.1, 50.0, 1280.0 / 720.0);
        let ours = projection_matrix(fov, near, far, aspect);
        let reference = Mat4::perspective_rh_gl(fov.to_radians(), aspect, near, far);
        assert!(ours.abs_diff_eq(reference, EPSILON));
    }

    #[test]
    fn projection_is_never_identity() {
        let proj = projection_matrix(45.0, 0.1, 50.0, 16.0 / 9.0);
        assert!(!proj.abs_diff_eq(Mat4::IDENTITY, EPSILON));
    }
}
