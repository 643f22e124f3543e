use std::rc::Rc;

use gldemo_data::{IndexedMesh, Vertex};

use crate::{
    error::Error,
    gl::{
        Buffer, BufferTarget, ComponentType, GlBackend, IndexType, Primitive, VertexArray,
        VertexAttribute,
    },
};

pub(crate) type Position = VertexAttribute<0>;
pub(crate) type Color = VertexAttribute<1>;

/// An indexed mesh uploaded to a vertex array with its two buffers.
#[derive(Debug)]
pub struct GpuMesh<G: GlBackend> {
    vertex_array: VertexArray<G>,
    vertices: Buffer<G>,
    indices: Buffer<G>,
    index_count: i32,
}

impl<G: GlBackend> GpuMesh<G> {
    /// Uploads `mesh` and records position (slot 0) and color (slot 1)
    /// in a new vertex array.
    pub fn upload(gl: &Rc<G>, mesh: &IndexedMesh<'_>) -> Result<Self, Error> {
        let vertex_array = VertexArray::new(gl)?;
        let vertices = Buffer::new(gl, BufferTarget::Vertex)?;
        let indices = Buffer::new(gl, BufferTarget::Index)?;

        {
            let _vao = vertex_array.scoped();
            let vbo = vertices.scoped();
            vbo.upload_array(mesh.vertices());

            let gl = gl.as_ref();
            let (components, stride) = (Vertex::COMPONENTS, Vertex::STRIDE);
            Position::enable(gl);
            Position::set(gl, components, ComponentType::F32, false, stride, Vertex::POSITION_OFFSET);
            Color::enable(gl);
            Color::set(gl, components, ComponentType::F32, false, stride, Vertex::COLOR_OFFSET);

            // stays recorded in the vertex array
            indices.bind();
            indices.upload_array(mesh.indices());
        }

        log::debug!(
            "uploaded mesh: {} vertices, {} indices",
            mesh.vertex_count(),
            mesh.index_count()
        );

        Ok(Self {
            vertex_array,
            vertices,
            indices,
            index_count: mesh.index_count() as i32,
        })
    }

    pub fn index_count(&self) -> i32 {
        self.index_count
    }

    /// Draws `count` indices from the start of the index buffer.
    pub fn draw(&self, primitive: Primitive, count: i32) {
        let vao = self.vertex_array.scoped();
        vao.draw_elements(primitive, count.min(self.index_count), IndexType::U32, 0);
    }

    /// Releases the buffers, then the vertex array.
    pub fn destroy(self) {
        let Self { vertex_array, vertices, indices, .. } = self;
        vertices.destroy();
        indices.destroy();
        vertex_array.destroy();
    }
}
