use std::{fmt, path::Path, rc::Rc};

use crate::{error::Error, gl::GlBackend};

/// Pipeline stage a [`Shader`] is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl From<ShaderStage> for u32 {
    fn from(stage: ShaderStage) -> u32 {
        match stage {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// A shader object owned by this wrapper; deleted when dropped.
///
/// `status()` must be checked after `compile()` before the shader is trusted,
/// with `info()` carrying the driver's diagnostics on failure.
pub struct Shader<G: GlBackend> {
    gl: Rc<G>,
    shader: G::Shader,
    stage: ShaderStage,
}

impl<G: GlBackend> Shader<G> {
    pub fn new(gl: &Rc<G>, stage: ShaderStage) -> Result<Self, Error> {
        let shader = gl.create_shader(stage.into()).map_err(|e| Error::shader_creation_failed(&e))?;
        Ok(Self { gl: gl.clone(), shader, stage })
    }

    /// Stages `source` for the next `compile()`.
    pub fn source(&self, source: &str) {
        self.gl.shader_source(self.shader, source);
    }

    pub fn compile(&self) {
        self.gl.compile_shader(self.shader);
    }

    /// Whether the last `compile()` succeeded.
    pub fn status(&self) -> bool {
        self.gl.shader_compile_status(self.shader)
    }

    /// The info log of the last compilation.
    pub fn info(&self) -> String {
        self.gl.shader_info_log(self.shader)
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub(crate) fn handle(&self) -> G::Shader {
        self.shader
    }

    /// Releases the shader now rather than at the end of scope.
    pub fn destroy(self) {}
}

/// Reads a GLSL source file whole.
pub fn read_source(path: &Path) -> Result<String, Error> {
    let source =
        std::fs::read_to_string(path).map_err(|e| Error::shader_source_unreadable(path, e))?;
    log::debug!("read shader source {} ({} bytes)", path.display(), source.len());
    Ok(source)
}

impl<G: GlBackend> Drop for Shader<G> {
    fn drop(&mut self) {
        self.gl.delete_shader(self.shader);
    }
}

impl<G: GlBackend> fmt::Debug for Shader<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shader").field("shader", &self.shader).field("stage", &self.stage).finish()
    }
}
