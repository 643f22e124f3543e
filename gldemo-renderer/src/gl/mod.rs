mod attribute;
mod backend;
mod buffer;
mod context;
mod native;
mod program;
mod renderer;
mod shader;
mod texture;
mod vertex_array;

#[cfg(test)]
pub(crate) mod testing;

pub use attribute::{ComponentType, Uniform, VertexAttribute};
pub use backend::GlBackend;
pub use buffer::{BoundBuffer, Buffer, BufferTarget};
pub use context::GlState;
pub use program::{build_program, LinkedProgram, ShaderCheck, ShaderProgram};
pub use renderer::{Drawable, RenderContext, Renderer};
pub use shader::{read_source, Shader, ShaderStage};
pub use texture::Texture;
pub use vertex_array::{BoundVertexArray, IndexType, Primitive, VertexArray};
