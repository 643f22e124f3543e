use std::path::PathBuf;

use clap::{Args, Parser, ValueEnum};
use gldemo_data::NoisePattern;

use crate::{
    demos::{CubeSettings, Motion},
    gl::{Primitive, ShaderCheck},
    logging::LoggingConfig,
};

/// Window options shared by every demo.
#[derive(Args, Debug, Clone)]
pub struct WindowArgs {
    /// Window width in pixels
    #[arg(long, default_value_t = 640, value_name = "PIXELS")]
    pub width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = 480, value_name = "PIXELS")]
    pub height: u32,

    /// Window title
    #[arg(long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Clear color as RRGGBB hex, e.g. "1e1e2e"
    #[arg(long, default_value = "000000", value_name = "RRGGBB", value_parser = parse_rgb)]
    pub background: u32,

    /// Log filter, e.g. "debug" or "gldemo_renderer=trace" (overrides RUST_LOG)
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,
}

fn parse_rgb(s: &str) -> Result<u32, String> {
    let hex = s.trim_start_matches('#').trim_start_matches("0x");
    if hex.len() != 6 {
        return Err(format!("expected 6 hex digits, got '{s}'"));
    }
    u32::from_str_radix(hex, 16).map_err(|e| format!("invalid color '{s}': {e}"))
}

impl WindowArgs {
    pub fn validate(&self) -> Result<(), String> {
        if self.width == 0 || self.height == 0 {
            return Err(format!("Window size must be non-zero, got {}x{}", self.width, self.height));
        }
        Ok(())
    }

    pub fn title_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.title.as_deref().unwrap_or(default)
    }

    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig { env_filter: self.log.clone(), ..LoggingConfig::default() }
    }
}

#[derive(Parser, Debug)]
#[command(name = "cube", about = "Rotating wireframe cube with a hand-built perspective transform")]
pub struct CubeCli {
    #[command(flatten)]
    pub window: WindowArgs,

    /// Directory holding vs.glsl and fs.glsl
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub shader_dir: PathBuf,

    /// Abort when both shaders failed to compile, or when any did
    #[arg(long, value_enum, default_value_t = ShaderCheck::BothFailed)]
    pub shader_check: ShaderCheck,

    /// How distance and roll follow the angle
    #[arg(long, value_enum, default_value_t = Motion::Tangent)]
    pub motion: Motion,

    /// Angle increment per frame, in radians
    #[arg(long, default_value_t = 0.005, value_name = "RADIANS")]
    pub angle_step: f32,

    /// Primitive used to draw the cube's indices
    #[arg(long, value_enum, default_value_t = Primitive::Lines)]
    pub primitive: Primitive,

    /// Print the transform every frame
    #[arg(long)]
    pub print_matrix: bool,
}

impl CubeCli {
    pub const DEFAULT_TITLE: &'static str = "Title";

    pub fn validate(&self) -> Result<(), String> {
        self.window.validate()?;

        if !self.angle_step.is_finite() {
            return Err(format!("Angle step must be finite, got {}", self.angle_step));
        }

        Ok(())
    }

    pub fn settings(&self) -> CubeSettings {
        CubeSettings {
            motion: self.motion,
            angle_step: self.angle_step,
            primitive: self.primitive,
            print_matrix: self.print_matrix,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "quad", about = "Two triangles with per-vertex colors")]
pub struct QuadCli {
    #[command(flatten)]
    pub window: WindowArgs,
}

impl QuadCli {
    pub const DEFAULT_TITLE: &'static str = "Title";

    pub fn validate(&self) -> Result<(), String> {
        self.window.validate()
    }
}

/// Noise pattern names accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternArg {
    /// Every channel random
    Rgb,
    /// Red and blue saturated, green random
    Magenta,
}

impl From<PatternArg> for NoisePattern {
    fn from(pattern: PatternArg) -> Self {
        match pattern {
            PatternArg::Rgb => NoisePattern::Rgb,
            PatternArg::Magenta => NoisePattern::Magenta,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "static-noise", about = "Full-window random noise, regenerated every frame")]
pub struct NoiseCli {
    #[command(flatten)]
    pub window: WindowArgs,

    /// Noise pattern
    #[arg(long, value_enum, default_value_t = PatternArg::Rgb)]
    pub pattern: PatternArg,

    /// Seed for the generator (default: the drand48 initial state)
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u32>,
}

impl NoiseCli {
    pub const DEFAULT_TITLE: &'static str = "Hello World";

    pub fn validate(&self) -> Result<(), String> {
        self.window.validate()
    }
}
