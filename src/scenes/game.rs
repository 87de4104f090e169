use std::{error::Error, rc::Rc};

use glow::HasContext;
use imgui::Ui;
use log::{debug, info};

use crate::{
    cameras::{Camera, CameraController, FirstPersonCam},
    config::WorldConfig,
    input::InputState,
    player::Player,
    renderer::{VoxelWorldRenderer, format_with_commas},
    scenes::Scene,
    voxels::{GroundState, VoxelWorld},
};

pub struct GameScene {
    gl: Rc<glow::Context>,
    voxel_renderer: VoxelWorldRenderer,
    world: VoxelWorld,

    player: Player,
    ground_state: GroundState,

    camera: Camera,
    camera_controller: Box<dyn CameraController>,
}

impl GameScene {
    pub fn new(
        gl: &Rc<glow::Context>,
        world: VoxelWorld,
        config: &WorldConfig,
    ) -> Result<GameScene, Box<dyn Error>> {
        // Prepare rendering
        unsafe {
            gl.enable(gl::DEPTH_TEST);
            gl.depth_func(gl::LESS); // Default: Pass if the incoming depth is less than the stored depth
            gl.disable(gl::CULL_FACE);
        }

        let voxel_renderer = VoxelWorldRenderer::new(gl.clone(), &world)?;
        let player = Player::new(config);
        let camera_controller = FirstPersonCam::new();

        Ok(Self {
            gl: Rc::clone(gl),
            voxel_renderer,
            world,
            ground_state: player.body.ground_state(),
            player,
            camera: Camera::new(),
            camera_controller: Box::new(camera_controller),
        })
    }
}

impl Scene for GameScene {
    fn get_title(&self) -> String {
        "Game".to_string()
    }

    fn tick(&mut self, dt: f32, input: &mut InputState) {
        let intent = input.movement_intent();
        let mouse_delta = input.take_mouse_delta();
        self.ground_state = self.player.tick(dt, &intent, mouse_delta, &self.world);
        self.camera_controller
            .tick(dt, &mut self.camera, &self.player.get_transform());
    }

    fn render(&mut self) {
        unsafe {
            self.gl.clear_color(0.0, 0.0, 0.0, 1.0);
            self.gl.clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }
        self.voxel_renderer.render(&self.camera);
    }

    fn render_ui(&mut self, ui: &mut Ui) {
        let position = self.player.position();
        let (chunk, local) = self.world.locate(position);
        let body = &self.player.body;
        ui.window("Player")
            .size([280.0, 180.0], imgui::Condition::FirstUseEver)
            .position([0.0, 0.0], imgui::Condition::FirstUseEver)
            .build(|| {
                ui.text(format!(
                    "Position: ({:.3},{:.3},{:.3})",
                    position.x, position.y, position.z
                ));
                ui.text(format!("Chunk: {chunk}"));
                ui.text(format!("Local cell: {local}"));
                ui.text(format!("Vertical velocity: {:.3}", body.vertical_velocity));
                ui.text(format!("Grounded: {} ({:?})", body.grounded, self.ground_state));
                ui.separator();
                ui.text(format!("Chunks: {}", self.world.chunk_count()));
                ui.text(format!(
                    "Rendered cubes: {}",
                    format_with_commas(self.voxel_renderer.get_instance_count() as u64)
                ));
            });
    }

    fn resize(&mut self, width: u32, height: u32) {
        debug!("Resizing viewport to {width}x{height}");
        unsafe {
            self.gl.viewport(0, 0, width as i32, height as i32);
        }
        self.camera.set_viewport(width, height);
    }

    fn start(&mut self) {
        info!(
            "Starting game scene: {} chunks, {} solid cells, player at {} ({:?})",
            self.world.chunk_count(),
            self.world.solid_count(),
            self.player.position(),
            self.ground_state
        );
    }
}
