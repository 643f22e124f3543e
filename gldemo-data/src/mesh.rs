use std::fmt;

use bytemuck::{Pod, Zeroable};
use compact_str::{format_compact, CompactString};

/// Interleaved vertex: position followed by color.
///
/// # Memory Layout
/// `#[repr(C)]`, 24 bytes: `position` at offset 0, `color` at offset 12.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    /// Byte distance between consecutive vertices.
    pub const STRIDE: i32 = size_of::<Vertex>() as i32;
    pub const POSITION_OFFSET: i32 = 0;
    pub const COLOR_OFFSET: i32 = size_of::<[f32; 3]>() as i32;
    /// Components per attribute (xyz, rgb).
    pub const COMPONENTS: i32 = 3;

    pub const fn new(position: [f32; 3], color: [f32; 3]) -> Self {
        Self { position, color }
    }
}

#[derive(Debug)]
pub struct MeshError {
    pub message: CompactString,
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for MeshError {}

/// Vertex and index data that has been checked for out-of-range indices.
///
/// An indexed draw over an `IndexedMesh` can only reference vertices in
/// `[0, vertex_count)`.
#[derive(Debug, Clone, Copy)]
pub struct IndexedMesh<'a> {
    vertices: &'a [Vertex],
    indices: &'a [u32],
}

impl<'a> IndexedMesh<'a> {
    pub fn new(vertices: &'a [Vertex], indices: &'a [u32]) -> Result<Self, MeshError> {
        if vertices.is_empty() || indices.is_empty() {
            return Err(MeshError { message: CompactString::const_new("Empty mesh") });
        }

        let vertex_count = vertices.len();
        if let Some((pos, idx)) =
            indices.iter().enumerate().find(|&(_, &idx)| idx as usize >= vertex_count)
        {
            return Err(MeshError {
                message: format_compact!(
                    "Index {idx} at position {pos} out of bounds for {vertex_count} vertices"
                ),
            });
        }

        Ok(Self { vertices, indices })
    }

    /// The colored cube: 6 faces, 4 vertices and 2 triangles per face.
    pub fn cube() -> IndexedMesh<'static> {
        IndexedMesh { vertices: &CUBE_VERTICES, indices: &CUBE_INDICES }
    }

    /// The two-triangle quad covering clip space.
    pub fn quad() -> IndexedMesh<'static> {
        IndexedMesh { vertices: &QUAD_VERTICES, indices: &QUAD_INDICES }
    }

    pub fn vertices(&self) -> &'a [Vertex] {
        self.vertices
    }

    pub fn indices(&self) -> &'a [u32] {
        self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn vertex_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.vertices)
    }

    pub fn index_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.indices)
    }
}

const RED: [f32; 3] = [1.0, 0.0, 0.0];
const GREEN: [f32; 3] = [0.0, 1.0, 0.0];
const BLUE: [f32; 3] = [0.0, 0.0, 1.0];
const YELLOW: [f32; 3] = [1.0, 1.0, 0.0];
const CYAN: [f32; 3] = [0.0, 1.0, 1.0];
const MAGENTA: [f32; 3] = [1.0, 0.0, 1.0];

#[rustfmt::skip]
pub const CUBE_VERTICES: [Vertex; 24] = [
    // face 0
    Vertex::new([ 1.0,  1.0,  1.0], RED),
    Vertex::new([-1.0,  1.0,  1.0], RED),
    Vertex::new([ 1.0, -1.0,  1.0], RED),
    Vertex::new([-1.0, -1.0,  1.0], RED),
    // face 1
    Vertex::new([ 1.0,  1.0,  1.0], GREEN),
    Vertex::new([ 1.0, -1.0,  1.0], GREEN),
    Vertex::new([ 1.0,  1.0, -1.0], GREEN),
    Vertex::new([ 1.0, -1.0, -1.0], GREEN),
    // face 2
    Vertex::new([ 1.0,  1.0,  1.0], BLUE),
    Vertex::new([ 1.0,  1.0, -1.0], BLUE),
    Vertex::new([-1.0,  1.0,  1.0], BLUE),
    Vertex::new([-1.0,  1.0, -1.0], BLUE),
    // face 3
    Vertex::new([ 1.0,  1.0, -1.0], YELLOW),
    Vertex::new([ 1.0, -1.0, -1.0], YELLOW),
    Vertex::new([-1.0,  1.0, -1.0], YELLOW),
    Vertex::new([-1.0, -1.0, -1.0], YELLOW),
    // face 4
    Vertex::new([-1.0,  1.0,  1.0], CYAN),
    Vertex::new([-1.0,  1.0, -1.0], CYAN),
    Vertex::new([-1.0, -1.0,  1.0], CYAN),
    Vertex::new([-1.0, -1.0, -1.0], CYAN),
    // face 5
    Vertex::new([ 1.0, -1.0,  1.0], MAGENTA),
    Vertex::new([-1.0, -1.0,  1.0], MAGENTA),
    Vertex::new([ 1.0, -1.0, -1.0], MAGENTA),
    Vertex::new([-1.0, -1.0, -1.0], MAGENTA),
];

#[rustfmt::skip]
pub const CUBE_INDICES: [u32; 36] = [
     0,  1,  2,   2,  1,  3, // face 0
     4,  5,  6,   6,  5,  7, // face 1
     8,  9, 10,  10,  9, 11, // face 2
    12, 13, 14,  14, 13, 15, // face 3
    16, 17, 18,  18, 17, 19, // face 4
    20, 21, 22,  22, 21, 23, // face 5
];

#[rustfmt::skip]
pub const QUAD_VERTICES: [Vertex; 4] = [
    Vertex::new([ 1.0,  1.0, 0.0], RED),
    Vertex::new([-1.0,  1.0, 0.0], GREEN),
    Vertex::new([ 1.0, -1.0, 0.0], BLUE),
    Vertex::new([-1.0, -1.0, 0.0], RED),
];

pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 1, 3];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(Vertex::STRIDE, 24);
        assert_eq!(Vertex::COLOR_OFFSET, 12);
        assert_eq!(std::mem::offset_of!(Vertex, color), Vertex::COLOR_OFFSET as usize);
    }

    #[test]
    fn test_builtin_meshes_are_in_bounds() {
        for mesh in [IndexedMesh::cube(), IndexedMesh::quad()] {
            assert!(IndexedMesh::new(mesh.vertices(), mesh.indices()).is_ok());
        }
        assert_eq!(IndexedMesh::cube().index_count(), 36);
        assert_eq!(IndexedMesh::cube().vertex_count(), 24);
        assert_eq!(IndexedMesh::quad().index_count(), 6);
    }

    #[test]
    fn test_out_of_bounds_index_rejected() {
        let indices = [0, 1, 2, 2, 1, 4];
        let err = IndexedMesh::new(&QUAD_VERTICES, &indices).unwrap_err();
        assert_eq!(err.message, "Index 4 at position 5 out of bounds for 4 vertices");
    }

    #[test]
    fn test_empty_mesh_rejected() {
        assert!(IndexedMesh::new(&[], &QUAD_INDICES).is_err());
        assert!(IndexedMesh::new(&QUAD_VERTICES, &[]).is_err());
    }

    #[test]
    fn test_byte_views() {
        let cube = IndexedMesh::cube();
        assert_eq!(cube.vertex_bytes().len(), 24 * 24);
        assert_eq!(cube.index_bytes().len(), 36 * 4);

        let first: &[f32] = bytemuck::cast_slice(&cube.vertex_bytes()[..24]);
        let expected: [f32; 6] = [1.0, 1.0, 1.0, 1.0, 0.0, 0.0];
        assert_eq!(first, &expected[..]);
    }

    #[test]
    fn test_each_cube_face_has_one_color() {
        for face in CUBE_VERTICES.chunks(4) {
            assert!(face.iter().all(|v| v.color == face[0].color));
        }
    }
}
