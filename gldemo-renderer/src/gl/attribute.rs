use gldemo_data::Matrix4f;

use crate::gl::GlBackend;

/// Component type of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    F32,
}

impl From<ComponentType> for u32 {
    fn from(ty: ComponentType) -> u32 {
        match ty {
            ComponentType::F32 => glow::FLOAT,
        }
    }
}

/// The vertex attribute at shader location `SLOT`.
#[derive(Debug, Clone, Copy, Default)]
pub struct VertexAttribute<const SLOT: u32>;

impl<const SLOT: u32> VertexAttribute<SLOT> {
    pub const SLOT: u32 = SLOT;

    pub fn enable<G: GlBackend>(gl: &G) {
        gl.enable_vertex_attrib_array(SLOT);
    }

    pub fn disable<G: GlBackend>(gl: &G) {
        gl.disable_vertex_attrib_array(SLOT);
    }

    /// Describes the layout of this slot within the bound vertex buffer.
    ///
    /// The vertex array that should record the layout must be bound, as must
    /// the vertex buffer the data is read from.
    pub fn set<G: GlBackend>(
        gl: &G,
        components: i32,
        component_type: ComponentType,
        normalize: bool,
        stride: i32,
        offset: i32,
    ) {
        gl.vertex_attrib_pointer(SLOT, components, component_type.into(), normalize, stride, offset);
    }
}

/// The uniform at explicit location `SLOT` of the active program.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uniform<const SLOT: u32>;

impl<const SLOT: u32> Uniform<SLOT> {
    pub const SLOT: u32 = SLOT;

    /// Uploads `matrix` column-major, without transposing.
    pub fn matrix4f<G: GlBackend>(gl: &G, matrix: &Matrix4f) {
        gl.uniform_matrix_4(SLOT, false, matrix.as_array());
    }
}
