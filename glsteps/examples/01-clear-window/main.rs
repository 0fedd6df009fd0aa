use glow::{Context, HasContext as _, COLOR_BUFFER_BIT};
use glsteps::{Demo, Result};
use sdl2::video::Window;

struct ClearWindow;

impl Demo for ClearWindow {
    fn init(gl: &Context, _window: &Window) -> Result<Self> {
        unsafe { gl.clear_color(1.0, 0.0, 0.0, 1.0) };
        Ok(ClearWindow)
    }

    fn display(&mut self, gl: &Context, _window: &Window) {
        unsafe { gl.clear(COLOR_BUFFER_BIT) };
    }
}

fn main() {
    ClearWindow::sdl2_window("Test Window")
        .window_size(800, 600)
        .gl_version(3, 3)
        .run();
}
