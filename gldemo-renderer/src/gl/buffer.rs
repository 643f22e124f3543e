use std::{fmt, rc::Rc};

use bytemuck::Pod;

use crate::{error::Error, gl::GlBackend};

/// Binding point of a [`Buffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferTarget {
    /// Per-vertex attribute storage (`GL_ARRAY_BUFFER`).
    Vertex,
    /// Element indices (`GL_ELEMENT_ARRAY_BUFFER`).
    Index,
}

impl BufferTarget {
    pub fn gl_target(self) -> u32 {
        match self {
            BufferTarget::Vertex => glow::ARRAY_BUFFER,
            BufferTarget::Index => glow::ELEMENT_ARRAY_BUFFER,
        }
    }

    fn name(self) -> &'static str {
        match self {
            BufferTarget::Vertex => "vertex",
            BufferTarget::Index => "index",
        }
    }
}

/// A buffer object bound to one target for its whole life.
pub struct Buffer<G: GlBackend> {
    gl: Rc<G>,
    buffer: G::Buffer,
    target: BufferTarget,
}

impl<G: GlBackend> Buffer<G> {
    pub fn new(gl: &Rc<G>, target: BufferTarget) -> Result<Self, Error> {
        let buffer = gl.create_buffer().map_err(|e| {
            log::error!("glCreateBuffer: {e}");
            Error::buffer_creation_failed(target.name())
        })?;
        Ok(Self { gl: gl.clone(), buffer, target })
    }

    pub fn target(&self) -> BufferTarget {
        self.target
    }

    /// Makes this the active buffer of its target.
    pub fn bind(&self) {
        self.gl.bind_buffer(self.target.gl_target(), Some(self.buffer));
    }

    /// Binds the buffer until the returned guard is dropped.
    ///
    /// The index binding is vertex array state: release an index buffer guard
    /// only after the vertex array has been unbound.
    pub fn scoped(&self) -> BoundBuffer<'_, G> {
        self.bind();
        BoundBuffer { buffer: self }
    }

    /// Uploads `data` with `GL_STATIC_DRAW` usage; the buffer must be bound.
    pub fn static_data(&self, data: &[u8]) {
        self.gl.buffer_data(self.target.gl_target(), data, glow::STATIC_DRAW);
    }

    /// Uploads a slice of plain-old-data elements as raw bytes.
    pub fn upload_array<T: Pod>(&self, data: &[T]) {
        self.static_data(bytemuck::cast_slice(data));
    }

    pub fn destroy(self) {}
}

impl<G: GlBackend> Drop for Buffer<G> {
    fn drop(&mut self) {
        self.gl.delete_buffer(self.buffer);
    }
}

impl<G: GlBackend> fmt::Debug for Buffer<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("buffer", &self.buffer)
            .field("target", &self.target)
            .finish()
    }
}

/// Guard returned by [`Buffer::scoped`]; unbinds the target on drop.
#[must_use]
pub struct BoundBuffer<'a, G: GlBackend> {
    buffer: &'a Buffer<G>,
}

impl<G: GlBackend> BoundBuffer<'_, G> {
    pub fn static_data(&self, data: &[u8]) {
        self.buffer.static_data(data);
    }

    pub fn upload_array<T: Pod>(&self, data: &[T]) {
        self.buffer.upload_array(data);
    }
}

impl<G: GlBackend> Drop for BoundBuffer<'_, G> {
    fn drop(&mut self) {
        let buffer = self.buffer;
        buffer.gl.bind_buffer(buffer.target.gl_target(), None);
    }
}

#[cfg(test)]
mod tests {
    use gldemo_data::{Vertex, CUBE_INDICES, CUBE_VERTICES};

    use super::*;
    use crate::gl::testing::RecordingGl;

    #[test]
    fn test_upload_sizes() {
        let gl = Rc::new(RecordingGl::new());
        let vbo = Buffer::new(&gl, BufferTarget::Vertex).unwrap();
        let ibo = Buffer::new(&gl, BufferTarget::Index).unwrap();

        vbo.bind();
        vbo.upload_array(&CUBE_VERTICES);
        ibo.bind();
        ibo.upload_array(&CUBE_INDICES);

        assert_eq!(
            gl.uploads(),
            vec![
                (glow::ARRAY_BUFFER, CUBE_VERTICES.len() * Vertex::STRIDE as usize),
                (glow::ELEMENT_ARRAY_BUFFER, CUBE_INDICES.len() * 4),
            ]
        );
        assert_eq!(gl.bound_buffer(glow::ARRAY_BUFFER), Some(1));
        assert_eq!(gl.bound_buffer(glow::ELEMENT_ARRAY_BUFFER), Some(2));
    }

    #[test]
    fn test_static_data_usage() {
        let gl = Rc::new(RecordingGl::new());
        let vbo = Buffer::new(&gl, BufferTarget::Vertex).unwrap();
        vbo.static_data(&[0u8; 12]);

        assert_eq!(gl.count(&format!("buffer_data({:#06x}, 12, {:#06x})", glow::ARRAY_BUFFER, glow::STATIC_DRAW)), 1);
    }

    #[test]
    fn test_scoped_binding_unbinds() {
        let gl = Rc::new(RecordingGl::new());
        let vbo = Buffer::new(&gl, BufferTarget::Vertex).unwrap();
        {
            let bound = vbo.scoped();
            bound.static_data(&[1, 2, 3, 4]);
            assert_eq!(gl.bound_buffer(glow::ARRAY_BUFFER), Some(1));
        }
        assert_eq!(gl.bound_buffer(glow::ARRAY_BUFFER), None);
    }

    #[test]
    fn test_creation_failure() {
        let gl = Rc::new(RecordingGl::new());
        gl.fail_next_creates(true);

        let err = Buffer::new(&gl, BufferTarget::Index).unwrap_err();
        assert_eq!(err.to_string(), "Resource error: Failed to create index buffer");
    }

    #[test]
    fn test_released_exactly_once() {
        let gl = Rc::new(RecordingGl::new());
        let vbo = Buffer::new(&gl, BufferTarget::Vertex).unwrap();
        let moved = vbo;
        drop(moved);

        assert_eq!(gl.count("delete_buffer"), 1);
        assert_eq!(gl.live_objects(), 0);
    }
}
