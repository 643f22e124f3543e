mod error;
mod frame_loop;
mod window;

pub mod app;
pub mod cli;
pub mod demos;
pub mod gl;
pub mod logging;

pub use ::gldemo_data::{IndexedMesh, Matrix4f, NoisePattern, PixelBuffer, Vertex};

pub use crate::{
    error::Error,
    frame_loop::{run_frames, LoopExit, Presenter, WindowPresenter},
    window::{Platform, Window},
};
