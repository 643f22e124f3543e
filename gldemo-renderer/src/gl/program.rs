use std::{fmt, rc::Rc};

use crate::{
    error::Error,
    gl::{GlBackend, Shader, ShaderStage},
};

/// A program object owned by this wrapper; deleted when dropped.
pub struct ShaderProgram<G: GlBackend> {
    gl: Rc<G>,
    program: G::Program,
}

impl<G: GlBackend> ShaderProgram<G> {
    pub fn new(gl: &Rc<G>) -> Result<Self, Error> {
        let program = gl.create_program().map_err(|e| Error::shader_program_creation_failed(&e))?;
        Ok(Self { gl: gl.clone(), program })
    }

    pub fn attach(&self, shader: &Shader<G>) {
        self.gl.attach_shader(self.program, shader.handle());
    }

    pub fn detach(&self, shader: &Shader<G>) {
        self.gl.detach_shader(self.program, shader.handle());
    }

    pub fn link(&self) {
        self.gl.link_program(self.program);
    }

    /// Whether the last `link()` succeeded.
    pub fn status(&self) -> bool {
        self.gl.program_link_status(self.program)
    }

    pub fn info(&self) -> String {
        self.gl.program_info_log(self.program)
    }

    /// Makes this program the target of subsequent draw calls.
    pub fn use_program(&self) {
        self.gl.use_program(Some(self.program));
    }

    pub fn destroy(self) {}
}

impl<G: GlBackend> Drop for ShaderProgram<G> {
    fn drop(&mut self) {
        self.gl.delete_program(self.program);
    }
}

impl<G: GlBackend> fmt::Debug for ShaderProgram<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShaderProgram").field("program", &self.program).finish()
    }
}

/// When a compile failure aborts program construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ShaderCheck {
    /// Abort only if both stages failed. A single failed stage is left to the
    /// link step, which then reports the failure.
    #[default]
    #[value(name = "both")]
    BothFailed,
    /// Abort as soon as either stage failed.
    #[value(name = "any")]
    AnyFailed,
}

impl ShaderCheck {
    fn should_abort(self, vertex_ok: bool, fragment_ok: bool) -> bool {
        match self {
            ShaderCheck::BothFailed => !vertex_ok && !fragment_ok,
            ShaderCheck::AnyFailed => !vertex_ok || !fragment_ok,
        }
    }
}

/// A linked program together with the shaders attached to it.
///
/// Teardown detaches both shaders, deletes them and then deletes the program.
#[derive(Debug)]
pub struct LinkedProgram<G: GlBackend> {
    program: ShaderProgram<G>,
    vertex: Shader<G>,
    fragment: Shader<G>,
}

impl<G: GlBackend> LinkedProgram<G> {
    pub fn program(&self) -> &ShaderProgram<G> {
        &self.program
    }

    pub fn use_program(&self) {
        self.program.use_program();
    }

    pub fn teardown(self) {
        let Self { program, vertex, fragment } = self;
        program.detach(&vertex);
        program.detach(&fragment);
        vertex.destroy();
        fragment.destroy();
        program.destroy();
    }
}

/// Compiles both stages, checks them according to `check`, then links.
///
/// Diagnostics of every failed stage are logged; the returned error carries
/// the log of the first failure.
pub fn build_program<G: GlBackend>(
    gl: &Rc<G>,
    vertex_source: &str,
    fragment_source: &str,
    check: ShaderCheck,
) -> Result<LinkedProgram<G>, Error> {
    let vertex = compile(gl, ShaderStage::Vertex, vertex_source)?;
    let fragment = compile(gl, ShaderStage::Fragment, fragment_source)?;

    let (vertex_ok, fragment_ok) = (vertex.status(), fragment.status());
    let failed: Vec<&Shader<G>> = [&vertex, &fragment].into_iter().filter(|s| !s.status()).collect();
    for shader in &failed {
        log::error!("{} shader failed to compile:\n{}", shader.stage(), shader.info().trim_end());
    }

    if check.should_abort(vertex_ok, fragment_ok) {
        let first = failed[0];
        return Err(Error::shader_compile_failed(&first.stage().to_string(), &first.info()));
    }
    if !failed.is_empty() {
        log::warn!(
            "continuing to link although the {} shader failed; rerun with --shader-check any to stop here",
            failed[0].stage()
        );
    }

    let program = ShaderProgram::new(gl)?;
    program.attach(&vertex);
    program.attach(&fragment);
    program.link();
    if !program.status() {
        let info = program.info();
        log::error!("program failed to link:\n{}", info.trim_end());
        let linked = LinkedProgram { program, vertex, fragment };
        linked.teardown();
        return Err(Error::shader_link_failed(&info));
    }

    log::debug!("shader program linked: {:?}", program);
    Ok(LinkedProgram { program, vertex, fragment })
}

fn compile<G: GlBackend>(gl: &Rc<G>, stage: ShaderStage, source: &str) -> Result<Shader<G>, Error> {
    let shader = Shader::new(gl, stage)?;
    shader.source(source);
    shader.compile();
    Ok(shader)
}
