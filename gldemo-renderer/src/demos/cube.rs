use std::{path::Path, rc::Rc};

use colored::Colorize;
use gldemo_data::{IndexedMesh, Matrix4f};

use crate::{
    demos::{GpuMesh, Scene},
    error::Error,
    gl::{
        build_program, read_source, Drawable, GlBackend, LinkedProgram, Primitive, RenderContext,
        ShaderCheck, Uniform,
    },
};

pub const VERTEX_SHADER_FILE: &str = "vs.glsl";
pub const FRAGMENT_SHADER_FILE: &str = "fs.glsl";

type Mvp = Uniform<2>;

/// How the cube moves as the angle grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Motion {
    /// Distance and roll follow `tan(angle)`; the cube flies through the
    /// camera every half turn.
    #[default]
    Tangent,
    /// Fixed distance, roll equal to the angle.
    Steady,
}

/// Per-run settings of the cube scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeSettings {
    pub motion: Motion,
    pub angle_step: f32,
    pub primitive: Primitive,
    pub print_matrix: bool,
}

impl Default for CubeSettings {
    fn default() -> Self {
        Self {
            motion: Motion::Tangent,
            angle_step: 0.005,
            primitive: Primitive::Lines,
            print_matrix: false,
        }
    }
}

/// Rebuilds the model-view-projection matrix for `angle` from scratch.
pub fn update_transform(mvp: &mut Matrix4f, angle: f32, motion: Motion) {
    let (distance, roll) = match motion {
        Motion::Tangent => (-3.0 + angle.tan(), angle.tan()),
        Motion::Steady => (-3.0, angle),
    };

    mvp.frustum(1.0, 200.0, 1.0, 1.2)
        .translate(0.0, 0.0, distance)
        .rotate_y(angle)
        .rotate_z(roll);
}

/// The rotating wireframe cube.
#[derive(Debug)]
pub struct CubeScene<G: GlBackend> {
    program: LinkedProgram<G>,
    mesh: GpuMesh<G>,
    mvp: Matrix4f,
    angle: f32,
    frame: u64,
    settings: CubeSettings,
}

impl<G: GlBackend> CubeScene<G> {
    /// Compiles `vs.glsl` and `fs.glsl` from `shader_dir` and uploads the cube.
    pub fn load(
        gl: &Rc<G>,
        shader_dir: &Path,
        check: ShaderCheck,
        settings: CubeSettings,
    ) -> Result<Self, Error> {
        let vertex_source = read_source(&shader_dir.join(VERTEX_SHADER_FILE))?;
        let fragment_source = read_source(&shader_dir.join(FRAGMENT_SHADER_FILE))?;
        Self::from_sources(gl, &vertex_source, &fragment_source, check, settings)
    }

    pub fn from_sources(
        gl: &Rc<G>,
        vertex_source: &str,
        fragment_source: &str,
        check: ShaderCheck,
        settings: CubeSettings,
    ) -> Result<Self, Error> {
        let program = build_program(gl, vertex_source, fragment_source, check)?;
        let mesh = GpuMesh::upload(gl, &IndexedMesh::cube())?;

        Ok(Self {
            program,
            mesh,
            mvp: Matrix4f::new_identity(),
            angle: 0.0,
            frame: 0,
            settings,
        })
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn transform(&self) -> &Matrix4f {
        &self.mvp
    }
}

impl<G: GlBackend> Scene<G> for CubeScene<G> {
    fn depth_test(&self) -> bool {
        true
    }

    /// Detaches and deletes the shaders and the program, then the mesh.
    fn teardown(self) {
        self.program.teardown();
        self.mesh.destroy();
    }
}

impl<G: GlBackend> Drawable<G> for CubeScene<G> {
    fn prepare(&mut self, context: &mut RenderContext<'_, G>) {
        self.program.use_program();

        self.angle += self.settings.angle_step;
        update_transform(&mut self.mvp, self.angle, self.settings.motion);
        Mvp::matrix4f(context.gl, &self.mvp);

        self.frame += 1;
        if self.settings.print_matrix {
            let angle = format!("(angle {:.3})", self.angle);
            println!("{} {} {}\n{}", "frame".bold(), self.frame, angle.dimmed(), self.mvp);
        } else {
            log::trace!("frame {} mvp:\n{}", self.frame, self.mvp);
        }
    }

    fn draw(&mut self, _context: &mut RenderContext<'_, G>) {
        self.mesh.draw(self.settings.primitive, self.mesh.index_count());
    }

    fn cleanup(&mut self, context: &mut RenderContext<'_, G>) {
        context.gl.use_program(None);
    }
}
