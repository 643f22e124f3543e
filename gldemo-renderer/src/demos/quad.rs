use std::rc::Rc;

use gldemo_data::IndexedMesh;

use crate::{
    demos::{GpuMesh, Scene},
    error::Error,
    gl::{build_program, Drawable, GlBackend, LinkedProgram, Primitive, RenderContext, ShaderCheck},
};

pub const VERTEX_GLSL: &str = r#"#version 330 core
layout(location = 0) in vec4 vposition;
layout(location = 1) in vec4 vcolor;
out vec4 fcolor;
void main()
{
    fcolor = vcolor;
    gl_Position = vposition;
}
"#;

pub const FRAGMENT_GLSL: &str = r#"#version 330 core
in vec4 fcolor;
layout(location = 0) out vec4 FragColor;
void main()
{
    FragColor = fcolor;
}
"#;

/// Two triangles covering the window, colored per corner.
#[derive(Debug)]
pub struct QuadScene<G: GlBackend> {
    program: LinkedProgram<G>,
    mesh: GpuMesh<G>,
}

impl<G: GlBackend> QuadScene<G> {
    pub fn new(gl: &Rc<G>, check: ShaderCheck) -> Result<Self, Error> {
        let program = build_program(gl, VERTEX_GLSL, FRAGMENT_GLSL, check)?;
        let mesh = GpuMesh::upload(gl, &IndexedMesh::quad())?;
        Ok(Self { program, mesh })
    }
}

impl<G: GlBackend> Scene<G> for QuadScene<G> {
    fn teardown(self) {
        self.program.teardown();
        self.mesh.destroy();
    }
}

impl<G: GlBackend> Drawable<G> for QuadScene<G> {
    fn prepare(&mut self, _context: &mut RenderContext<'_, G>) {
        self.program.use_program();
    }

    fn draw(&mut self, _context: &mut RenderContext<'_, G>) {
        self.mesh.draw(Primitive::Triangles, self.mesh.index_count());
    }

    fn cleanup(&mut self, context: &mut RenderContext<'_, G>) {
        context.gl.use_program(None);
    }
}
