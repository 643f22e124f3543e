mod matrix;
mod mesh;
mod noise;
mod quaternion;

pub use matrix::Matrix4f;
pub use mesh::{
    IndexedMesh, MeshError, Vertex, CUBE_INDICES, CUBE_VERTICES, QUAD_INDICES, QUAD_VERTICES,
};
pub use noise::{Drand48, NoisePattern, Pixel, PixelBuffer};
pub use quaternion::{ParseQuaternionError, Quaternion};
