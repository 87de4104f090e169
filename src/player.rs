use glam::{Mat4, Quat, Vec3};

use crate::{
    config::WorldConfig,
    input::MovementIntent,
    voxels::{BodyState, GroundResolver, GroundState, VoxelWorld},
};

fn quat_from_yaw_pitch(yaw: f32, pitch: f32) -> Quat {
    // Combine yaw then pitch (Y * X)
    Quat::from_rotation_y(yaw) * Quat::from_rotation_x(pitch)
}

// Clamp pitch to [-89°, 89°] to prevent flipping
const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

pub struct Player {
    pub body: BodyState,
    pitch: f32,
    yaw: f32,

    // Movement speed
    pub speed: f32,
    // Sensitivity of yaw & pitch movement
    pub sensitivity: f32,
    jump_strength: f32,
    resolver: GroundResolver,
}

impl Player {
    pub fn new(config: &WorldConfig) -> Player {
        Self {
            body: BodyState::new(config.spawn),
            pitch: 0.0,
            yaw: 0.0,
            speed: config.move_speed,
            sensitivity: config.mouse_sensitivity,
            jump_strength: config.jump_strength,
            resolver: GroundResolver::new(config.gravity, config.foot_offset),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.body.position
    }

    pub fn rotation(&self) -> Quat {
        quat_from_yaw_pitch(self.yaw, self.pitch)
    }

    pub fn get_transform(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation(), self.body.position)
    }

    pub fn foot_position(&self) -> Vec3 {
        self.body.position - Vec3::Y * self.resolver.foot_offset
    }

    /// One frame: look, walk, jump, then resolve gravity against the world
    pub fn tick(
        &mut self,
        dt: f32,
        intent: &MovementIntent,
        mouse_delta: (f32, f32),
        world: &VoxelWorld,
    ) -> GroundState {
        self.process_mouse_movement(mouse_delta);
        self.process_movement(intent, dt);
        if intent.jump {
            self.resolver.try_jump(&mut self.body, self.jump_strength);
        }
        self.resolver.step(&mut self.body, world, dt)
    }

    fn process_mouse_movement(&mut self, (dx, dy): (f32, f32)) {
        self.yaw -= dx * self.sensitivity;
        self.pitch -= dy * self.sensitivity;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Horizontal movement on the yaw plane only. No horizontal collision.
    fn process_movement(&mut self, intent: &MovementIntent, dt: f32) {
        let yaw_rotation = Quat::from_rotation_y(self.yaw);
        let forward = yaw_rotation * Vec3::NEG_Z;
        let right = yaw_rotation * Vec3::X;
        let mut direction = Vec3::ZERO;
        if intent.forward {
            direction += forward;
        }
        if intent.back {
            direction -= forward;
        }
        if intent.right {
            direction += right;
        }
        if intent.left {
            direction -= right;
        }
        // Avoid normalizing 0 vec
        if direction.length_squared() > 1e-4 {
            let step = direction.normalize() * self.speed * dt;
            self.body.position.x += step.x;
            self.body.position.z += step.z;
        }
    }
}
