use std::f32::consts::PI;

use glam::{Mat4, Vec2, Vec3};
use glow::{Context, HasContext as _, COLOR_BUFFER_BIT, DEPTH_BUFFER_BIT, DEPTH_TEST, TEXTURE0};
use glsteps::imgui;
use glsteps::transform::CubeScene;
use glsteps::{check_error, Demo, Mesh, Program, ProgramBuilder, Result, Texture};
use log::error;
use sdl2::video::Window;

struct TexturedCube {
    program: Program,
    cube: Mesh,
    texture: Texture,
    scene: CubeScene,
}

// Four corners per face so every face gets the full texture.
fn cube_geometry() -> (Vec<Vec3>, Vec<Vec2>, Vec<u32>) {
    let faces = [
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    ];
    let corners = [
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
    ];

    let mut positions = Vec::with_capacity(24);
    let mut texcoords = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, right, up) in faces {
        let base = positions.len() as u32;
        for corner in corners {
            let (u, v) = (corner.x - 0.5, corner.y - 0.5);
            positions.push(normal * 0.5 + right * u + up * v);
            texcoords.push(corner);
        }
        indices.extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    (positions, texcoords, indices)
}

impl Demo for TexturedCube {
    fn init(gl: &Context, _window: &Window) -> Result<Self> {
        let (positions, texcoords, indices) = cube_geometry();

        unsafe {
            gl.clear_color(0.2, 0.2, 0.5, 1.0);
            gl.enable(DEPTH_TEST);
        }

        let program = ProgramBuilder::new(
            include_str!("texcube.vert"),
            include_str!("texcube.frag"),
        )
        .uniforms(["model", "projection", "tex"])
        .build(gl)?;

        let cube = Mesh::new(gl, &positions, Some(&texcoords), Some(&indices))?;
        cube.bind_attributes(gl, program.handle(), "in_Position", Some("in_Texcoord"))?;

        let texture = Texture::load(gl, include_bytes!("checker.tga"), true)?;

        unsafe {
            gl.use_program(Some(program.handle()));
            gl.uniform_1_i32(program.location("tex"), 0);
            gl.use_program(None);
        }
        check_error(gl, "init")?;

        Ok(TexturedCube {
            program,
            cube,
            texture,
            scene: CubeScene::default(),
        })
    }

    fn display(&mut self, gl: &Context, window: &Window) {
        let model = self.scene.advance();

        let (width, height) = window.drawable_size();
        let aspect = width as f32 / height.max(1) as f32;
        let projection = Mat4::perspective_rh_gl(PI / 4.0, aspect, 0.1, 100.0);

        unsafe {
            gl.clear(COLOR_BUFFER_BIT | DEPTH_BUFFER_BIT);

            gl.use_program(Some(self.program.handle()));
            gl.uniform_matrix_4_f32_slice(self.program.location("model"), false, model.as_ref());
            gl.uniform_matrix_4_f32_slice(
                self.program.location("projection"),
                false,
                projection.as_ref(),
            );
            self.texture.bind(gl, TEXTURE0);

            self.cube.bind(gl);
            self.cube.draw(gl);
            Mesh::unbind(gl);
            gl.use_program(None);
        }

        if let Err(e) = check_error(gl, "display") {
            error!("{e}");
        }
    }

    fn ui(&mut self, _gl: &Context, ui: &mut imgui::Ui) {
        let offset = self.scene.oscillation.offset;
        let controls = &mut self.scene.controls;
        ui.window("debug")
            .size([320., -1.], imgui::Condition::FirstUseEver)
            .build(|| {
                ui.checkbox("rotate x", &mut controls.enabled.x);
                ui.slider("x angle", 0.0, 360.0, &mut controls.angles[0]);
                ui.checkbox("rotate y", &mut controls.enabled.y);
                ui.slider("y angle", 0.0, 360.0, &mut controls.angles[1]);
                ui.checkbox("rotate z", &mut controls.enabled.z);
                ui.slider("z angle", 0.0, 360.0, &mut controls.angles[2]);
                ui.separator();
                ui.slider("scale", 0.1, 2.0, &mut controls.scale);
                ui.slider("translate x", -2.0, 2.0, &mut controls.translation[0]);
                ui.slider("translate y", -2.0, 2.0, &mut controls.translation[1]);
                ui.slider("translate z", -10.0, -1.0, &mut controls.translation[2]);
                ui.separator();
                ui.text(format!("offset {offset:+.3}"));
                ui.text(format!("{:.1} fps", ui.io().framerate));
            });
    }

    fn exit(self, gl: &Context) {
        self.texture.delete(gl);
        self.cube.delete(gl);
        self.program.delete(gl);
    }
}

fn main() {
    TexturedCube::sdl2_window("Textured cube").run();
}
