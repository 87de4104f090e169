use imgui::Ui;

use crate::input::InputState;

pub trait Scene {
    fn get_title(&self) -> String;
    fn tick(&mut self, dt: f32, input: &mut InputState);
    fn render(&mut self);
    fn render_ui(&mut self, ui: &mut Ui);
    // Framebuffer size changed
    fn resize(&mut self, width: u32, height: u32);
    // Perform any initialization logic the scene might need
    fn start(&mut self);
}
