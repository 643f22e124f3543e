use std::{fmt, rc::Rc};

use crate::{error::Error, gl::GlBackend};

/// Primitive assembly mode of an indexed draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Primitive {
    Lines,
    #[default]
    Triangles,
}

impl From<Primitive> for u32 {
    fn from(primitive: Primitive) -> u32 {
        match primitive {
            Primitive::Lines => glow::LINES,
            Primitive::Triangles => glow::TRIANGLES,
        }
    }
}

/// Element type of the bound index buffer; meshes store `u32` indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexType {
    U32,
}

impl From<IndexType> for u32 {
    fn from(index_type: IndexType) -> u32 {
        match index_type {
            IndexType::U32 => glow::UNSIGNED_INT,
        }
    }
}

/// A vertex array object; records attribute layout and the index buffer binding.
pub struct VertexArray<G: GlBackend> {
    gl: Rc<G>,
    vertex_array: G::VertexArray,
}

impl<G: GlBackend> VertexArray<G> {
    pub fn new(gl: &Rc<G>) -> Result<Self, Error> {
        let vertex_array = gl.create_vertex_array().map_err(|e| {
            log::error!("glCreateVertexArray: {e}");
            Error::vertex_array_creation_failed()
        })?;
        Ok(Self { gl: gl.clone(), vertex_array })
    }

    pub fn bind(&self) {
        self.gl.bind_vertex_array(Some(self.vertex_array));
    }

    /// Binds the vertex array until the returned guard is dropped.
    pub fn scoped(&self) -> BoundVertexArray<'_, G> {
        self.bind();
        BoundVertexArray { vertex_array: self }
    }

    /// Issues an indexed draw from the bound index buffer.
    ///
    /// `offset` is in bytes into the index buffer.
    pub fn draw_elements(&self, primitive: Primitive, count: i32, index_type: IndexType, offset: i32) {
        self.gl.draw_elements(primitive.into(), count, index_type.into(), offset);
    }

    pub fn destroy(self) {}
}

impl<G: GlBackend> Drop for VertexArray<G> {
    fn drop(&mut self) {
        self.gl.delete_vertex_array(self.vertex_array);
    }
}

impl<G: GlBackend> fmt::Debug for VertexArray<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VertexArray").field("vertex_array", &self.vertex_array).finish()
    }
}

/// Guard returned by [`VertexArray::scoped`].
#[must_use]
pub struct BoundVertexArray<'a, G: GlBackend> {
    vertex_array: &'a VertexArray<G>,
}

impl<G: GlBackend> BoundVertexArray<'_, G> {
    pub fn draw_elements(&self, primitive: Primitive, count: i32, index_type: IndexType, offset: i32) {
        self.vertex_array.draw_elements(primitive, count, index_type, offset);
    }
}

impl<G: GlBackend> Drop for BoundVertexArray<'_, G> {
    fn drop(&mut self) {
        self.vertex_array.gl.bind_vertex_array(None);
    }
}
