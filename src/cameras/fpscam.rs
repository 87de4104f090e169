use glam::Mat4;

use super::camera::{Camera, CameraController};

/// Puts the camera exactly at the target's eye position and orientation
pub struct FirstPersonCam;

impl FirstPersonCam {
    pub fn new() -> FirstPersonCam {
        Self
    }
}

impl CameraController for FirstPersonCam {
    fn tick(&mut self, _dt: f32, camera: &mut Camera, target_transform: &Mat4) {
        let (_, rotation, translation) = target_transform.to_scale_rotation_translation();
        camera.position = translation;
        camera.set_rotation(rotation.normalize());
    }
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Quat, Vec3};

    use super::FirstPersonCam;
    use crate::cameras::{Camera, CameraController};

    #[test]
    fn copies_target_position() {
        let mut camera = Camera::new();
        let target = Mat4::from_rotation_translation(
            Quat::from_rotation_y(1.2),
            Vec3::new(0.5, 10.6, -7.0),
        );
        FirstPersonCam::new().tick(0.016, &mut camera, &target);
        assert!(camera.position.abs_diff_eq(Vec3::new(0.5, 10.6, -7.0), 1e-5));
        // Camera sits in the target's frame: the view undoes the target transform
        let view_target = camera.get_view_matrix() * target;
        assert!(view_target.abs_diff_eq(Mat4::IDENTITY, 1e-4));
    }
}
