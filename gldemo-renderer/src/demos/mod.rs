//! The scenes drawn by the demo binaries.

mod cube;
mod mesh;
mod noise;
mod quad;

pub use cube::{
    update_transform, CubeScene, CubeSettings, Motion, FRAGMENT_SHADER_FILE, VERTEX_SHADER_FILE,
};
pub use mesh::GpuMesh;
pub use noise::NoiseScene;
pub use quad::QuadScene;

use crate::gl::{Drawable, GlBackend};

/// A drawable that owns GL objects and releases them in a fixed order.
pub trait Scene<G: GlBackend>: Drawable<G> + Sized {
    /// Whether the renderer should enable depth testing for this scene.
    fn depth_test(&self) -> bool {
        false
    }

    /// Releases the scene's GL objects: program bundle first, then meshes
    /// and textures.
    fn teardown(self);
}
