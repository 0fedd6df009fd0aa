use std::collections::HashMap;
use std::fmt;

use glow::{
    Context, HasContext as HasContextExt, NativeProgram, NativeShader, NativeUniformLocation,
    FRAGMENT_SHADER, GEOMETRY_SHADER, VERTEX_SHADER,
};
use log::{debug, warn};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Vertex,
    Fragment,
    Geometry,
}

impl StageKind {
    pub fn gl_enum(self) -> u32 {
        match self {
            StageKind::Vertex => VERTEX_SHADER,
            StageKind::Fragment => FRAGMENT_SHADER,
            StageKind::Geometry => GEOMETRY_SHADER,
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StageKind::Vertex => "vertex",
            StageKind::Fragment => "fragment",
            StageKind::Geometry => "geometry",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub kind: StageKind,
    pub text: String,
}

impl ShaderSource {
    pub fn new(kind: StageKind, text: impl Into<String>) -> Self {
        ShaderSource {
            kind,
            text: text.into(),
        }
    }
}

/// The slice of the GL api the program builder talks to.
///
/// Every method assumes a current context on the calling thread.
pub trait ShaderDriver {
    type Shader: Copy;
    type Program: Copy + fmt::Debug;
    type UniformLocation: Clone + fmt::Debug;

    fn create_shader(&self, kind: StageKind) -> Result<Self::Shader, String>;
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;
    fn delete_shader(&self, shader: Self::Shader);

    fn create_program(&self) -> Result<Self::Program, String>;
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn link_status(&self, program: Self::Program) -> bool;
    fn validate_program(&self, program: Self::Program);
    fn validate_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn delete_program(&self, program: Self::Program);

    fn uniform_location(
        &self,
        program: Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation>;
}

// Methods sharing a name with `ShaderDriver` are called through
// `HasContextExt` explicitly.
impl ShaderDriver for Context {
    type Shader = NativeShader;
    type Program = NativeProgram;
    type UniformLocation = NativeUniformLocation;

    fn create_shader(&self, kind: StageKind) -> Result<NativeShader, String> {
        unsafe { HasContextExt::create_shader(self, kind.gl_enum()) }
    }

    fn shader_source(&self, shader: NativeShader, source: &str) {
        unsafe { HasContextExt::shader_source(self, shader, source) }
    }

    fn compile_shader(&self, shader: NativeShader) {
        unsafe { HasContextExt::compile_shader(self, shader) }
    }

    fn compile_status(&self, shader: NativeShader) -> bool {
        unsafe { self.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: NativeShader) -> String {
        unsafe { self.get_shader_info_log(shader) }
    }

    fn delete_shader(&self, shader: NativeShader) {
        unsafe { HasContextExt::delete_shader(self, shader) }
    }

    fn create_program(&self) -> Result<NativeProgram, String> {
        unsafe { HasContextExt::create_program(self) }
    }

    fn attach_shader(&self, program: NativeProgram, shader: NativeShader) {
        unsafe { HasContextExt::attach_shader(self, program, shader) }
    }

    fn detach_shader(&self, program: NativeProgram, shader: NativeShader) {
        unsafe { HasContextExt::detach_shader(self, program, shader) }
    }

    fn link_program(&self, program: NativeProgram) {
        unsafe { HasContextExt::link_program(self, program) }
    }

    fn link_status(&self, program: NativeProgram) -> bool {
        unsafe { self.get_program_link_status(program) }
    }

    // glow has no entry point for glValidateProgram, so it goes through the
    // `gl` bindings loaded during bring-up.
    fn validate_program(&self, program: NativeProgram) {
        if gl::ValidateProgram::is_loaded() {
            unsafe { gl::ValidateProgram(program.0.get()) }
        }
    }

    fn validate_status(&self, program: NativeProgram) -> bool {
        if !(gl::ValidateProgram::is_loaded() && gl::GetProgramiv::is_loaded()) {
            debug!("glValidateProgram not loaded, skipping validation");
            return true;
        }
        let mut status = 0;
        unsafe { gl::GetProgramiv(program.0.get(), gl::VALIDATE_STATUS, &mut status) };
        status == gl::TRUE as i32
    }

    fn program_info_log(&self, program: NativeProgram) -> String {
        unsafe { self.get_program_info_log(program) }
    }

    fn delete_program(&self, program: NativeProgram) {
        unsafe { HasContextExt::delete_program(self, program) }
    }

    fn uniform_location(
        &self,
        program: NativeProgram,
        name: &str,
    ) -> Option<NativeUniformLocation> {
        unsafe { self.get_uniform_location(program, name) }
    }
}

/// A compiled stage, ready to be attached.
#[derive(Debug, Clone, Copy)]
pub struct Shader<S> {
    pub kind: StageKind,
    pub handle: S,
}

pub fn compile_stage<D: ShaderDriver>(
    driver: &D,
    source: &str,
    kind: StageKind,
) -> Result<Shader<D::Shader>> {
    let handle = driver
        .create_shader(kind)
        .map_err(|e| Error::Resource(format!("{kind} shader: {e}")))?;
    driver.shader_source(handle, source);
    driver.compile_shader(handle);
    if !driver.compile_status(handle) {
        let log = driver.shader_info_log(handle);
        driver.delete_shader(handle);
        return Err(Error::Compile { stage: kind, log });
    }
    Ok(Shader { kind, handle })
}

/// Links `stages` into a new program. The stages are detached and deleted
/// whether or not linking succeeds.
pub fn link_program<D: ShaderDriver>(
    driver: &D,
    stages: &[Shader<D::Shader>],
) -> Result<D::Program> {
    let program = match driver.create_program() {
        Ok(program) => program,
        Err(e) => {
            release_stages(driver, None, stages);
            return Err(Error::Resource(format!("program: {e}")));
        }
    };

    for stage in stages {
        debug!("attaching {} stage to program {program:?}", stage.kind);
        driver.attach_shader(program, stage.handle);
    }
    driver.link_program(program);
    let linked = driver.link_status(program);
    release_stages(driver, Some(program), stages);

    if !linked {
        let log = driver.program_info_log(program);
        driver.delete_program(program);
        return Err(Error::Link { log });
    }
    Ok(program)
}

fn release_stages<D: ShaderDriver>(
    driver: &D,
    program: Option<D::Program>,
    stages: &[Shader<D::Shader>],
) {
    for stage in stages {
        if let Some(program) = program {
            driver.detach_shader(program, stage.handle);
        }
        driver.delete_shader(stage.handle);
    }
}

/// Validation depends on the current driver state, so a failure here is
/// reported but never fatal to [ProgramBuilder::build].
pub fn validate_program<D: ShaderDriver>(driver: &D, program: D::Program) -> Result<()> {
    driver.validate_program(program);
    if driver.validate_status(program) {
        Ok(())
    } else {
        Err(Error::Validation {
            log: driver.program_info_log(program),
        })
    }
}

/// `None` when the name is not an active uniform of `program`.
pub fn resolve_uniform<D: ShaderDriver>(
    driver: &D,
    program: D::Program,
    name: &str,
) -> Option<D::UniformLocation> {
    let location = driver.uniform_location(program, name);
    if location.is_none() {
        warn!("uniform {name:?} is not active in program {program:?}");
    }
    location
}

/// A linked program and the uniform locations resolved against it.
#[derive(Debug)]
pub struct Program<D: ShaderDriver = Context> {
    handle: D::Program,
    uniforms: HashMap<String, Option<D::UniformLocation>>,
}

impl<D: ShaderDriver> Program<D> {
    pub fn handle(&self) -> D::Program {
        self.handle
    }

    /// Cached location of `name`, resolving it on first use.
    pub fn uniform(&mut self, driver: &D, name: &str) -> Option<D::UniformLocation> {
        if let Some(location) = self.uniforms.get(name) {
            return location.clone();
        }
        let location = resolve_uniform(driver, self.handle, name);
        self.uniforms.insert(name.to_owned(), location.clone());
        location
    }

    /// Location of a name resolved earlier, without touching the driver.
    pub fn location(&self, name: &str) -> Option<&D::UniformLocation> {
        self.uniforms.get(name).and_then(Option::as_ref)
    }

    pub fn uniforms(&self) -> &HashMap<String, Option<D::UniformLocation>> {
        &self.uniforms
    }

    pub fn delete(self, driver: &D) {
        driver.delete_program(self.handle);
    }
}

pub struct ProgramBuilder {
    stages: Vec<ShaderSource>,
    uniforms: Vec<String>,
}

impl ProgramBuilder {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        ProgramBuilder {
            stages: vec![
                ShaderSource::new(StageKind::Vertex, vertex),
                ShaderSource::new(StageKind::Fragment, fragment),
            ],
            uniforms: Vec::new(),
        }
    }

    pub fn geometry(mut self, geometry_shader: impl Into<String>) -> Self {
        self.stages
            .push(ShaderSource::new(StageKind::Geometry, geometry_shader));
        self
    }

    /// Names to resolve right after linking.
    pub fn uniforms<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.uniforms.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn build<D: ShaderDriver>(&self, driver: &D) -> Result<Program<D>> {
        let mut compiled = Vec::with_capacity(self.stages.len());
        for source in &self.stages {
            match compile_stage(driver, &source.text, source.kind) {
                Ok(shader) => compiled.push(shader),
                Err(e) => {
                    release_stages(driver, None, &compiled);
                    return Err(e);
                }
            }
        }

        let handle = link_program(driver, &compiled)?;

        if let Err(e) = validate_program(driver, handle) {
            warn!("{e}");
        }

        let uniforms = self
            .uniforms
            .iter()
            .map(|name| (name.clone(), resolve_uniform(driver, handle, name)))
            .collect();

        Ok(Program { handle, uniforms })
    }
}

/// Simplified [ProgramBuilder] for just a vertex and a fragment shader.
pub fn load_shaders<D: ShaderDriver>(
    gl: &D,
    vertex_shader_source: impl Into<String>,
    fragment_shader_source: impl Into<String>,
) -> Result<Program<D>> {
    ProgramBuilder::new(vertex_shader_source, fragment_shader_source).build(gl)
}
