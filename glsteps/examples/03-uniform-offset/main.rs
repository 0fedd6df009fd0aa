use glow::{Context, HasContext as _, COLOR_BUFFER_BIT};
use glsteps::transform::Oscillation;
use glsteps::{
    check_error, load_shaders, Demo, Mesh, Program, Result, TRIANGLE, TRIANGLE_CLEAR_COLOR,
};
use log::{error, info};
use sdl2::video::Window;

struct UniformOffset {
    program: Program,
    triangle: Mesh,
    oscillation: Oscillation,
}

impl Demo for UniformOffset {
    fn init(gl: &Context, _window: &Window) -> Result<Self> {
        let [r, g, b, a] = TRIANGLE_CLEAR_COLOR;
        unsafe { gl.clear_color(r, g, b, a) };

        let mut program = load_shaders(
            gl,
            include_str!("offset.vert"),
            include_str!("offset.frag"),
        )?;
        if program.uniform(gl, "xMove").is_none() {
            info!("xMove is not active, the triangle will stay put");
        }

        let triangle = Mesh::new(gl, &TRIANGLE, None, None)?;
        triangle.bind_attributes(gl, program.handle(), "in_Position", None)?;
        check_error(gl, "init")?;

        Ok(UniformOffset {
            program,
            triangle,
            oscillation: Oscillation::new(0.005, 0.7),
        })
    }

    fn display(&mut self, gl: &Context, _window: &Window) {
        self.oscillation.step();

        unsafe {
            gl.clear(COLOR_BUFFER_BIT);

            gl.use_program(Some(self.program.handle()));
            gl.uniform_1_f32(self.program.location("xMove"), self.oscillation.offset);

            self.triangle.bind(gl);
            self.triangle.draw(gl);
            Mesh::unbind(gl);
            gl.use_program(None);
        }

        if let Err(e) = check_error(gl, "display") {
            error!("{e}");
        }
    }

    fn exit(self, gl: &Context) {
        self.triangle.delete(gl);
        self.program.delete(gl);
    }
}

fn main() {
    UniformOffset::sdl2_window("Uniform offset").run();
}
