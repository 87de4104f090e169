use glam::Vec3;
use log::debug;

use super::VoxelWorld;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GroundState {
    Falling,
    Grounded,
}

/// Vertical motion state of a walking entity. `position` is the eye/camera
/// position, the feet are `foot_offset` below it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BodyState {
    pub position: Vec3,
    pub vertical_velocity: f32,
    pub grounded: bool,
}

impl BodyState {
    pub fn new(position: Vec3) -> BodyState {
        Self {
            position,
            vertical_velocity: 0.0,
            grounded: false,
        }
    }

    pub fn ground_state(&self) -> GroundState {
        if self.grounded {
            GroundState::Grounded
        } else {
            GroundState::Falling
        }
    }
}

/// Gravity integration and ground snapping against a [`VoxelWorld`]
#[derive(Copy, Clone, Debug)]
pub struct GroundResolver {
    /// Acceleration in blocks/s², negative is down
    pub gravity: f32,
    pub foot_offset: f32,
}

impl GroundResolver {
    pub fn new(gravity: f32, foot_offset: f32) -> GroundResolver {
        debug_assert!(gravity < 0.0 && foot_offset > 0.0);
        Self {
            gravity,
            foot_offset,
        }
    }

    /// Advances `body` by `dt` seconds. Grounded state is recomputed from
    /// scratch on every call.
    pub fn step(&self, body: &mut BodyState, world: &VoxelWorld, dt: f32) -> GroundState {
        let previous_foot_y = body.position.y - self.foot_offset;
        body.vertical_velocity += self.gravity * dt;
        body.position.y += body.vertical_velocity * dt;

        let was_grounded = body.grounded;
        body.grounded = false;
        if body.vertical_velocity < 0.0 {
            let foot_y = body.position.y - self.foot_offset;
            let landed_on =
                self.first_solid_below(world, body.position, previous_foot_y, foot_y);
            if let Some(block_y) = landed_on {
                // Snap feet flush onto the block top
                body.position.y = block_y as f32 + 1.0 + self.foot_offset;
                body.vertical_velocity = 0.0;
                body.grounded = true;
                if !was_grounded {
                    debug!("Landed on block top y={}", block_y + 1);
                }
            }
        }
        body.ground_state()
    }

    /// Sets an upward velocity if the body stands on the ground. Returns whether the jump applied.
    pub fn try_jump(&self, body: &mut BodyState, jump_strength: f32) -> bool {
        if !body.grounded {
            return false;
        }
        body.vertical_velocity = jump_strength;
        debug!("Jump with velocity {jump_strength}");
        true
    }

    /// Highest solid block the feet reached while moving from `from_y` down to `to_y`.
    ///
    /// Only blocks whose top is at or below `from_y` count, plus the block the
    /// feet end up in. A snap can therefore never lift the body above where it
    /// started the frame.
    fn first_solid_below(
        &self,
        world: &VoxelWorld,
        position: Vec3,
        from_y: f32,
        to_y: f32,
    ) -> Option<i32> {
        let bottom = to_y.floor() as i32;
        let top = (from_y.floor() as i32 - 1).max(bottom);
        (bottom..=top).rev().find(|&block_y| {
            // Block centre keeps the probe clear of face boundaries
            let probe = Vec3::new(position.x, block_y as f32 + 0.5, position.z);
            world.is_solid(probe)
        })
    }
}
