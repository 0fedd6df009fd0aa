use glam::Vec3;
use glow::{Context, HasContext as _, COLOR_BUFFER_BIT, DEPTH_BUFFER_BIT, DEPTH_TEST};
use glsteps::transform::{model_matrix, AxisToggles, Oscillation, Rotation};
use glsteps::{
    check_error, Demo, Mesh, Program, ProgramBuilder, Result, TRIANGLE, TRIANGLE_CLEAR_COLOR,
};
use log::{debug, error};
use sdl2::keyboard::{Keycode, Mod, Scancode};
use sdl2::video::Window;

struct MovingTriangle {
    program: Program,
    triangle: Mesh,
    oscillation: Oscillation,
    rotation: Rotation,
    axes: AxisToggles,
}

impl Demo for MovingTriangle {
    fn init(gl: &Context, _window: &Window) -> Result<Self> {
        unsafe {
            let [r, g, b, a] = TRIANGLE_CLEAR_COLOR;
            gl.clear_color(r, g, b, a);
            gl.enable(DEPTH_TEST);
        }

        let program = ProgramBuilder::new(
            include_str!("triangle.vert"),
            include_str!("triangle.frag"),
        )
        .uniforms(["model"])
        .build(gl)?;

        let triangle = Mesh::new(gl, &TRIANGLE, None, None)?;
        triangle.bind_attributes(gl, program.handle(), "in_Position", None)?;
        check_error(gl, "init")?;

        Ok(MovingTriangle {
            program,
            triangle,
            oscillation: Oscillation::default(),
            rotation: Rotation::default(),
            axes: AxisToggles::default(),
        })
    }

    fn display(&mut self, gl: &Context, _window: &Window) {
        self.oscillation.step();
        if self.rotation.advance() {
            debug!("rotation wrapped");
        }
        let model = model_matrix(self.oscillation.offset, self.rotation.angle, self.axes.axis())
            * glam::Mat4::from_scale(Vec3::splat(0.4));

        unsafe {
            gl.clear(COLOR_BUFFER_BIT | DEPTH_BUFFER_BIT);

            gl.use_program(Some(self.program.handle()));
            gl.uniform_matrix_4_f32_slice(self.program.location("model"), false, model.as_ref());

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

    fn key_down(
        &mut self,
        keycode: Option<Keycode>,
        _scancode: Option<Scancode>,
        _keymod: Mod,
        _repeat: bool,
    ) {
        let Some(keycode) = keycode else {
            return;
        };
        match keycode {
            Keycode::X => self.axes.x ^= true,
            Keycode::Y => self.axes.y ^= true,
            Keycode::Z => self.axes.z ^= true,
            Keycode::Space => self.rotation.direction = -self.rotation.direction,
            _ => {}
        }
    }
}

fn main() {
    MovingTriangle::sdl2_window("Moving triangle").run();
}
