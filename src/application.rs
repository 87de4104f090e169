// Derived from https://github.com/imgui-rs/imgui-glow-renderer/blob/main/examples/glow_01_basic.rs
use std::{error::Error, num::NonZeroU32, rc::Rc, time::Instant};

use glutin::{
    config::ConfigTemplateBuilder,
    context::{ContextAttributesBuilder, NotCurrentGlContext, PossiblyCurrentContext},
    display::{GetGlDisplay, GlDisplay},
    surface::{GlSurface, Surface, SurfaceAttributesBuilder, WindowSurface},
};
use imgui::Context;
use imgui_glow_renderer::AutoRenderer;
use imgui_winit_support::{
    WinitPlatform,
    winit::{
        dpi::{LogicalSize, PhysicalSize},
        event_loop::EventLoop,
        window::{Window, WindowAttributes},
    },
};
use log::{debug, error, info, warn};
use raw_window_handle::HasWindowHandle;
use winit::{
    event::{DeviceEvent, ElementState, Event, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::{input::InputState, scenes::Scene};

const FRAME_WIDTH: u32 = 800;
const FRAME_HEIGHT: u32 = 600;

pub struct Application {
    input: InputState,

    // Rendering & application loop context
    event_loop: Option<EventLoop<()>>,
    window: Window,
    surface: Surface<WindowSurface>,
    winit_platform: WinitPlatform,
    glutin_context: PossiblyCurrentContext,
    imgui_context: Context,
    ig_renderer: AutoRenderer,
}

impl Application {
    pub fn new(title: &str) -> Result<Application, Box<dyn Error>> {
        // Common setup for creating a winit window and imgui context, not specifc
        // to this renderer at all except that glutin is used to create the window
        // since it will give us access to a GL context
        let (event_loop, window, surface, context) =
            create_window(title, FRAME_WIDTH, FRAME_HEIGHT)?;
        let (winit_platform, mut imgui_context) = imgui_init(&window);

        // OpenGL context from glow
        let gl = glow_context(&context);

        // OpenGL renderer from this crate
        let ig_renderer = imgui_glow_renderer::AutoRenderer::new(gl, &mut imgui_context)?;
        Ok(Self {
            input: InputState::new(),
            glutin_context: context,
            winit_platform,
            imgui_context,
            event_loop: Some(event_loop),
            window,
            surface,
            ig_renderer,
        })
    }

    pub fn gl_context(&self) -> &Rc<glow::Context> {
        self.ig_renderer.gl_context()
    }

    pub fn run(&mut self, mut scene: Box<dyn Scene>) -> Result<(), Box<dyn Error>> {
        let event_loop = self
            .event_loop
            .take()
            .ok_or("Could not fetch event loop. Was the application already run?")?;

        let size = self.window.inner_size();
        scene.resize(size.width, size.height);
        info!("Running scene {}", scene.get_title());
        scene.start();

        let mut last_frame = Instant::now();
        let mut last_tick = Instant::now();

        // Standard winit event loop
        #[allow(deprecated)]
        event_loop.run(move |event, window_target| {
            self.winit_platform
                .handle_event(self.imgui_context.io_mut(), &self.window, &event);
            match event {
                Event::NewEvents(_) => {
                    let now = Instant::now();
                    self.imgui_context
                        .io_mut()
                        .update_delta_time(now.duration_since(last_frame));
                    last_frame = now;
                }
                Event::AboutToWait => {
                    if let Err(err) = self
                        .winit_platform
                        .prepare_frame(self.imgui_context.io_mut(), &self.window)
                    {
                        error!("Failed to prepare imgui frame: {err}");
                    }
                    self.window.request_redraw();
                }
                // Raw motion, so looking around keeps working at the window edge
                Event::DeviceEvent {
                    event: DeviceEvent::MouseMotion { delta },
                    ..
                } => {
                    self.input.mouse_moved(delta);
                }
                Event::WindowEvent {
                    event: WindowEvent::RedrawRequested,
                    ..
                } => {
                    // MAIN RENDER LOOP
                    let now = Instant::now();
                    let dt = now.duration_since(last_tick).as_secs_f32();
                    last_tick = now;

                    // Physics completes before this frame's draw calls
                    scene.tick(dt, &mut self.input);
                    scene.render();

                    let ui = self.imgui_context.frame();
                    scene.render_ui(ui);
                    self.winit_platform.prepare_render(ui, &self.window);
                    let draw_data = self.imgui_context.render();

                    if let Err(err) = self.ig_renderer.render(draw_data) {
                        error!("Error rendering imgui: {err}");
                    }
                    if let Err(err) = self.surface.swap_buffers(&self.glutin_context) {
                        error!("Failed to swap buffers: {err}");
                        window_target.exit();
                    }
                }
                Event::WindowEvent {
                    event: WindowEvent::CloseRequested,
                    ..
                } => {
                    window_target.exit();
                }
                Event::WindowEvent {
                    event: WindowEvent::MouseInput { state, button, .. },
                    ..
                } => match state {
                    ElementState::Pressed => self.input.mouse_button_pressed(button),
                    ElementState::Released => self.input.mouse_button_released(&button),
                },
                Event::WindowEvent {
                    event: WindowEvent::KeyboardInput { event, .. },
                    ..
                } => match event.physical_key {
                    PhysicalKey::Code(code) => {
                        // Exit program when esc pressed
                        if code == KeyCode::Escape {
                            info!("User hit ESCAPE. Exiting program");
                            window_target.exit();
                        }
                        match event.state {
                            ElementState::Pressed => self.input.key_pressed(code),
                            ElementState::Released => self.input.key_released(&code),
                        };
                    }
                    PhysicalKey::Unidentified(code) => {
                        debug!("Unknown key pressed: {code:?}");
                    }
                },
                Event::WindowEvent {
                    event: WindowEvent::Resized(new_size),
                    ..
                } => {
                    // Minimised windows report a zero size
                    if let (Some(width), Some(height)) = (
                        NonZeroU32::new(new_size.width),
                        NonZeroU32::new(new_size.height),
                    ) {
                        self.surface.resize(&self.glutin_context, width, height);
                        scene.resize(new_size.width, new_size.height);
                    } else {
                        warn!("Ignoring resize to {}x{}", new_size.width, new_size.height);
                    }
                }
                _ => {}
            }
        })?;
        Ok(())
    }
}

fn create_window(
    title: &str,
    width: u32,
    height: u32,
) -> Result<
    (
        EventLoop<()>,
        Window,
        Surface<WindowSurface>,
        PossiblyCurrentContext,
    ),
    Box<dyn Error>,
> {
    let event_loop = EventLoop::new()?;

    let window_attributes = WindowAttributes::default()
        .with_title(title)
        .with_inner_size(LogicalSize::new(width, height));
    let template = ConfigTemplateBuilder::new().with_depth_size(24);
    let (window, cfg) = glutin_winit::DisplayBuilder::new()
        .with_window_attributes(Some(window_attributes))
        .build(&event_loop, template, |mut configs| {
            // The picker has to return a config, it cannot report an error.
            // An empty match means the driver offers no depth-buffered config at all.
            configs
                .next()
                .expect("glutin reported no GL config for the template")
        })?;

    let window = window.ok_or("Failed to create OpenGL window")?;
    let raw_handle = window.window_handle()?.as_raw();

    let context_attribs = ContextAttributesBuilder::new().build(Some(raw_handle));
    let context = unsafe { cfg.display().create_context(&cfg, &context_attribs)? };

    let PhysicalSize { width, height } = window.inner_size();
    let surface_attribs = SurfaceAttributesBuilder::<WindowSurface>::new()
        .with_srgb(Some(true))
        .build(
            raw_handle,
            NonZeroU32::new(width).ok_or("Window has zero width")?,
            NonZeroU32::new(height).ok_or("Window has zero height")?,
        );
    let surface = unsafe { cfg.display().create_window_surface(&cfg, &surface_attribs)? };

    let context = context.make_current(&surface)?;
    info!("Created {width}x{height} window \"{title}\"");

    Ok((event_loop, window, surface, context))
}

fn glow_context(context: &PossiblyCurrentContext) -> glow::Context {
    unsafe {
        glow::Context::from_loader_function_cstr(|s| context.display().get_proc_address(s).cast())
    }
}

fn imgui_init(window: &Window) -> (WinitPlatform, imgui::Context) {
    let mut imgui_context = imgui::Context::create();
    imgui_context.set_ini_filename(None);

    let mut winit_platform = WinitPlatform::new(&mut imgui_context);
    winit_platform.attach_window(
        imgui_context.io_mut(),
        window,
        imgui_winit_support::HiDpiMode::Rounded,
    );

    imgui_context
        .fonts()
        .add_font(&[imgui::FontSource::DefaultFontData { config: None }]);

    imgui_context.io_mut().font_global_scale = (1.0 / winit_platform.hidpi_factor()) as f32;

    (winit_platform, imgui_context)
}
