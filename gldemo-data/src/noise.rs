use bytemuck::{Pod, Zeroable};

/// The POSIX `drand48` generator: a 48-bit linear congruential sequence.
///
/// An unseeded generator starts from the SVID/BSD initial state `0x1234ABCD330E`
/// and matches an unseeded `drand48()` on macOS and the BSDs. glibc starts
/// from state 0 instead; call `with_seed` for a sequence that agrees everywhere.
#[derive(Debug, Clone)]
pub struct Drand48 {
    state: u64,
}

impl Drand48 {
    const MULTIPLIER: u64 = 0x5_DEEC_E66D;
    const INCREMENT: u64 = 0xB;
    const MASK: u64 = (1 << 48) - 1;
    const DEFAULT_STATE: u64 = 0x1234_ABCD_330E;

    pub fn new() -> Self {
        Self { state: Self::DEFAULT_STATE }
    }

    /// Seeds like `srand48`: the high 32 bits take `seed`, the low 16 bits are `0x330E`.
    pub fn with_seed(seed: u32) -> Self {
        Self { state: ((seed as u64) << 16) | 0x330E }
    }

    /// Returns the next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = (Self::MULTIPLIER.wrapping_mul(self.state).wrapping_add(Self::INCREMENT))
            & Self::MASK;
        self.state as f64 / (1u64 << 48) as f64
    }

    pub fn next_f32(&mut self) -> f32 {
        self.next_f64() as f32
    }
}

impl Default for Drand48 {
    fn default() -> Self {
        Self::new()
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Pixel {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// How each frame's pixels are randomized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoisePattern {
    /// Every channel of every pixel is random.
    #[default]
    Rgb,
    /// Red and blue saturated, green random.
    Magenta,
}

/// One `Pixel` per window pixel, rows stored bottom-up as OpenGL expects.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self { width, height, pixels: vec![Pixel::zeroed(); len] }
    }

    /// Overwrites every pixel with fresh noise.
    pub fn fill(&mut self, pattern: NoisePattern, rng: &mut Drand48) {
        match pattern {
            NoisePattern::Rgb => self.pixels.iter_mut().for_each(|p| {
                p.r = rng.next_f32();
                p.g = rng.next_f32();
                p.b = rng.next_f32();
            }),
            NoisePattern::Magenta => self.pixels.iter_mut().for_each(|p| {
                p.r = 1.0;
                p.g = rng.next_f32();
                p.b = 1.0;
            }),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Pixel at column `x`, row `y` (row 0 is the bottom row).
    pub fn pixel(&self, x: u32, y: u32) -> Option<&Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y as usize * self.width as usize + x as usize)
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}
