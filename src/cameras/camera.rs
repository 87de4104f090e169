use glam::{Mat4, Quat, Vec3};

pub struct Camera {
    pub position: Vec3,
    rotation: Quat,
    aspect_ratio: f32,
}

impl Camera {
    pub fn new() -> Camera {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            aspect_ratio: 800.0 / 600.0,
        }
    }

    pub fn set_rotation(&mut self, rot: Quat) {
        self.rotation = rot;
    }

    /// Follows the framebuffer size. Zero sized (minimized) windows keep the last ratio.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect_ratio = width as f32 / height as f32;
        }
    }

    pub fn get_view_projection_matrix(&self) -> Mat4 {
        self.get_projection_matrix() * self.get_view_matrix()
    }

    // NOTE: Equal to inverse of camera transform
    pub fn get_view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    pub fn get_projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(45f32.to_radians(), self.aspect_ratio, 0.1, 200.0)
    }
}

pub trait CameraController {
    fn tick(&mut self, dt: f32, camera: &mut Camera, target_transform: &Mat4);
}
