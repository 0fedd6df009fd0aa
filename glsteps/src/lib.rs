use glow::{
    Context, HasContext, DEBUG_SEVERITY_HIGH, DEBUG_SEVERITY_MEDIUM, NO_ERROR, RENDERER, VERSION,
};
use log::{error, info, warn};
use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Mod, Scancode};
use sdl2::mouse::MouseButton;
use sdl2::video::GLProfile;

use std::marker::PhantomData;
#[cfg(feature = "imgui")]
use std::path::PathBuf;
use std::rc::Rc;

pub use glam;
pub use glow;
#[cfg(feature = "imgui")]
pub use imgui;
pub use sdl2::{self, video::Window};

pub mod error;
pub mod frame;
mod mesh;
pub mod shader;
mod texture;
pub mod transform;

pub use error::{Error, Result};
pub use frame::{FrameCounter, FrameState};
pub use mesh::{Mesh, TRIANGLE, TRIANGLE_CLEAR_COLOR};
pub use shader::{load_shaders, Program, ProgramBuilder, ShaderDriver, StageKind};
pub use texture::Texture;

/// Drains the gl error queue, reporting every pending code.
pub fn check_error(gl: &Context, what: &str) -> Result<()> {
    let mut codes = Vec::new();
    unsafe {
        let mut error = gl.get_error();
        while error != NO_ERROR {
            codes.push(error);
            error = gl.get_error();
        }
    }
    if codes.is_empty() {
        Ok(())
    } else {
        Err(Error::Gl {
            what: what.to_owned(),
            codes,
        })
    }
}

#[allow(unused)]
pub trait Demo: Sized {
    fn init(gl: &Context, window: &Window) -> Result<Self>;
    fn display(&mut self, gl: &Context, window: &Window);
    #[cfg(feature = "imgui")]
    fn ui(&mut self, gl: &Context, ui: &mut imgui::Ui) {}

    /// Called once after the loop ends, while the context is still current.
    fn exit(self, gl: &Context) {}

    fn mouse_up(&mut self, button: MouseButton, x: i32, y: i32) {}
    fn mouse_down(&mut self, button: MouseButton, x: i32, y: i32) {}
    fn mouse_moved_to(&mut self, x: i32, y: i32) {}

    fn key_down(
        &mut self,
        keycode: Option<Keycode>,
        scancode: Option<Scancode>,
        keymod: Mod,
        repeat: bool,
    ) {
    }

    fn key_up(
        &mut self,
        keycode: Option<Keycode>,
        scancode: Option<Scancode>,
        keymod: Mod,
        repeat: bool,
    ) {
    }

    fn sdl2_window(window_title: impl Into<String>) -> StartBuilder<Self> {
        StartBuilder::new(window_title.into())
    }
}

pub type DebugMessageCallback = dyn Fn(u32, u32, u32, u32, String) + Send + Sync;

fn log_debug_message(_source: u32, _typ: u32, id: u32, severity: u32, message: String) {
    match severity {
        DEBUG_SEVERITY_HIGH => error!("gl debug {id}: {message}"),
        DEBUG_SEVERITY_MEDIUM => warn!("gl debug {id}: {message}"),
        _ => {}
    }
}

pub struct StartBuilder<T: Demo> {
    window_title: String,
    window_width: u32,
    window_height: u32,
    gl_version: (u8, u8),
    gl_profile: GLProfile,
    forward_compatible: bool,
    vsync: bool,
    demo: PhantomData<T>,
    debug_message_callback: Option<Box<DebugMessageCallback>>,
    #[cfg(feature = "imgui")]
    imgui_ini_filename: Option<String>,
}

impl<T: Demo> StartBuilder<T> {
    pub fn new(window_title: String) -> Self {
        StartBuilder {
            window_title,
            window_width: 800,
            window_height: 600,
            gl_version: (3, 3),
            gl_profile: GLProfile::Core,
            forward_compatible: true,
            vsync: true,
            demo: PhantomData,
            debug_message_callback: None,
            #[cfg(feature = "imgui")]
            imgui_ini_filename: None,
        }
    }

    pub fn window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    pub fn gl_version(mut self, major: u8, minor: u8) -> Self {
        self.gl_version = (major, minor);
        self
    }

    pub fn gl_profile(mut self, profile: GLProfile) -> Self {
        self.gl_profile = profile;
        self
    }

    pub fn forward_compatible(mut self, forward_compatible: bool) -> Self {
        self.forward_compatible = forward_compatible;
        self
    }

    pub fn vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn debug_message_callback(
        mut self,
        callback: impl Fn(u32, u32, u32, u32, String) + Send + Sync + 'static,
    ) -> Self {
        self.debug_message_callback = Some(Box::new(callback));
        self
    }

    #[cfg(feature = "imgui")]
    pub fn imgui_ini_filename(mut self, filename: impl Into<String>) -> Self {
        self.imgui_ini_filename = Some(filename.into());
        self
    }

    /// Like [StartBuilder::start], logging a fatal error and exiting with
    /// status 1 instead of returning it.
    pub fn run(self) {
        if let Err(e) = self.start() {
            error!("{e}");
            std::process::exit(1);
        }
    }

    pub fn start(mut self) -> Result<()> {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init();

        let (gl_major_version, gl_minor_version) = self.gl_version;

        let sdl = sdl2::init().map_err(Error::ContextInit)?;
        let video = sdl.video().map_err(Error::ContextInit)?;
        let gl_attr = video.gl_attr();
        gl_attr.set_context_profile(self.gl_profile);
        gl_attr.set_context_version(gl_major_version, gl_minor_version);
        if self.forward_compatible {
            gl_attr.set_context_flags().forward_compatible().set();
        }
        let window = video
            .window(&self.window_title, self.window_width, self.window_height)
            .allow_highdpi()
            .opengl()
            .resizable()
            .build()
            .map_err(|e| Error::ContextInit(e.to_string()))?;
        let gl_context = window.gl_create_context().map_err(Error::DriverInit)?;
        window
            .gl_make_current(&gl_context)
            .map_err(Error::DriverInit)?;
        let swap_interval = if self.vsync {
            sdl2::video::SwapInterval::VSync
        } else {
            sdl2::video::SwapInterval::Immediate
        };
        if let Err(e) = video.gl_set_swap_interval(swap_interval) {
            warn!("could not set swap interval: {e}");
        }

        let mut gl =
            unsafe { Context::from_loader_function(|s| video.gl_get_proc_address(s) as *const _) };
        gl::load_with(|s| video.gl_get_proc_address(s) as *const _);

        let (buffer_width, buffer_height) = window.drawable_size();
        unsafe {
            info!(
                "{} on {}, drawable {buffer_width}x{buffer_height}",
                gl.get_parameter_string(VERSION),
                gl.get_parameter_string(RENDERER),
            );
            gl.viewport(0, 0, buffer_width as i32, buffer_height as i32);
        }

        if gl.supports_debug() {
            let callback = self
                .debug_message_callback
                .take()
                .unwrap_or_else(|| Box::new(log_debug_message));
            unsafe {
                gl.debug_message_callback(move |source, typ, id, severity, message| {
                    callback(source, typ, id, severity, message.to_string())
                });
            }
        }

        self.run_loop(sdl, window, gl)
    }

    fn run_loop(self, sdl: sdl2::Sdl, window: Window, gl: Context) -> Result<()> {
        let mut app = T::init(&gl, &window)?;

        #[cfg(feature = "imgui")]
        let (mut imgui, mut platform, mut renderer, gl) = {
            let mut imgui = imgui::Context::create();
            imgui.set_ini_filename(self.imgui_ini_filename.map(PathBuf::from));
            imgui.set_log_filename(None);

            imgui
                .fonts()
                .add_font(&[imgui::FontSource::DefaultFontData { config: None }]);

            let platform = imgui_sdl2_support::SdlPlatform::new(&mut imgui);
            let renderer = imgui_glow_renderer::AutoRenderer::new(gl, &mut imgui)
                .map_err(|e| Error::DriverInit(format!("debug ui renderer: {e:?}")))?;
            let gl = Rc::clone(renderer.gl_context());
            (imgui, platform, renderer, gl)
        };
        #[cfg(not(feature = "imgui"))]
        let gl = Rc::new(gl);

        let mut state = FrameState::Running;
        let mut frames = FrameCounter::default();
        let mut event_loop = sdl.event_pump().map_err(Error::ContextInit)?;
        loop {
            let mut close_requested = false;
            for event in event_loop.poll_iter() {
                #[cfg(feature = "imgui")]
                platform.handle_event(&mut imgui, &event);

                if frame::is_close_request(&event) {
                    close_requested = true;
                }

                match event {
                    Event::Window {
                        win_event: sdl2::event::WindowEvent::SizeChanged(..),
                        ..
                    } => {
                        let (width, height) = window.drawable_size();
                        unsafe { gl.viewport(0, 0, width as i32, height as i32) };
                    }
                    Event::MouseButtonUp {
                        mouse_btn, x, y, ..
                    } => app.mouse_up(mouse_btn, x, y),
                    Event::MouseButtonDown {
                        mouse_btn, x, y, ..
                    } => app.mouse_down(mouse_btn, x, y),
                    Event::MouseMotion { x, y, .. } => app.mouse_moved_to(x, y),
                    Event::KeyDown {
                        keycode,
                        scancode,
                        keymod,
                        repeat,
                        ..
                    } => app.key_down(keycode, scancode, keymod, repeat),
                    Event::KeyUp {
                        keycode,
                        scancode,
                        keymod,
                        repeat,
                        ..
                    } => app.key_up(keycode, scancode, keymod, repeat),
                    _ => {}
                }
            }
            state = state.next(close_requested);
            if !state.is_running() {
                break;
            }

            #[cfg(feature = "imgui")]
            {
                platform.prepare_frame(&mut imgui, &window, &event_loop);
                let ui = imgui.frame();

                app.ui(&gl, ui);
            }

            app.display(&gl, &window);

            #[cfg(feature = "imgui")]
            {
                let draw_data = imgui.render();
                if let Err(e) = renderer.render(draw_data) {
                    error!("debug ui: {e:?}");
                }
            }

            window.gl_swap_window();
            frames.tick();
        }

        info!("closing after {} frames", frames.frames());
        app.exit(&gl);
        Ok(())
    }
}
