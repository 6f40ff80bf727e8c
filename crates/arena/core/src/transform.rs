//! Conversions between world space and a contestant's local frame.

use glam::{Affine3A, Vec3};

/// Expresses a world-space point in the frame described by `transform`.
pub fn global_to_local(point: Vec3, transform: &Affine3A) -> Vec3 {
    transform.inverse().transform_point3(point)
}

/// Expresses a point given in the frame of `transform` in world space.
pub fn local_to_global(point: Vec3, transform: &Affine3A) -> Vec3 {
    transform.transform_point3(point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::FRAC_PI_2;

    #[test]
    fn local_round_trip_is_identity() {
        let transform = Affine3A::from_rotation_translation(
            glam::Quat::from_rotation_z(FRAC_PI_2),
            Vec3::new(2.0, -1.0, 0.5),
        );
        let point = Vec3::new(0.3, 0.7, 1.1);
        let back = local_to_global(global_to_local(point, &transform), &transform);
        assert!(back.abs_diff_eq(point, 1e-5));
    }

    #[test]
    fn local_axes_follow_rotation() {
        // Quarter turn about z: local +x points along world +y.
        let transform = Affine3A::from_rotation_z(FRAC_PI_2);
        let world = local_to_global(Vec3::X, &transform);
        assert!(world.abs_diff_eq(Vec3::Y, 1e-5));
    }
}
