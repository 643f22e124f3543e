use std::rc::Rc;

use gldemo_data::{Drand48, IndexedMesh, NoisePattern, PixelBuffer};

use crate::{
    demos::{GpuMesh, Scene},
    error::Error,
    gl::{
        build_program, Drawable, GlBackend, LinkedProgram, Primitive, RenderContext, ShaderCheck,
        Texture,
    },
};

pub const VERTEX_GLSL: &str = r#"#version 330 core
layout(location = 0) in vec3 vposition;
out vec2 uv;
void main()
{
    uv = vposition.xy * 0.5 + 0.5;
    gl_Position = vec4(vposition, 1.0);
}
"#;

pub const FRAGMENT_GLSL: &str = r#"#version 330 core
uniform sampler2D pixels;
in vec2 uv;
layout(location = 0) out vec4 FragColor;
void main()
{
    FragColor = vec4(texture(pixels, uv).rgb, 1.0);
}
"#;

/// Random pixels regenerated every frame, one per window pixel.
#[derive(Debug)]
pub struct NoiseScene<G: GlBackend> {
    program: LinkedProgram<G>,
    mesh: GpuMesh<G>,
    texture: Texture<G>,
    pixels: PixelBuffer,
    rng: Drand48,
    pattern: NoisePattern,
}

impl<G: GlBackend> NoiseScene<G> {
    /// Without a `seed` the generator starts from the `drand48` default state.
    pub fn new(
        gl: &Rc<G>,
        width: u32,
        height: u32,
        pattern: NoisePattern,
        seed: Option<u32>,
    ) -> Result<Self, Error> {
        let program = build_program(gl, VERTEX_GLSL, FRAGMENT_GLSL, ShaderCheck::AnyFailed)?;
        let mesh = GpuMesh::upload(gl, &IndexedMesh::quad())?;
        let texture = Texture::new(gl, width, height)?;
        let rng = seed.map_or_else(Drand48::new, Drand48::with_seed);

        log::debug!("noise buffer {width}x{height}, pattern {pattern:?}, seed {seed:?}");
        Ok(Self {
            program,
            mesh,
            texture,
            pixels: PixelBuffer::new(width, height),
            rng,
            pattern,
        })
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }
}

impl<G: GlBackend> Scene<G> for NoiseScene<G> {
    fn teardown(self) {
        self.program.teardown();
        self.mesh.destroy();
        self.texture.destroy();
    }
}

impl<G: GlBackend> Drawable<G> for NoiseScene<G> {
    fn prepare(&mut self, _context: &mut RenderContext<'_, G>) {
        self.pixels.fill(self.pattern, &mut self.rng);
        if let Err(e) = self.texture.upload(&self.pixels) {
            log::error!("{e}");
        }

        self.program.use_program();
        self.texture.bind(0);
    }

    fn draw(&mut self, _context: &mut RenderContext<'_, G>) {
        self.mesh.draw(Primitive::Triangles, self.mesh.index_count());
    }

    fn cleanup(&mut self, context: &mut RenderContext<'_, G>) {
        self.texture.unbind();
        context.gl.use_program(None);
    }
}
