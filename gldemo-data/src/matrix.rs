use std::fmt;

/// A 4x4 `f32` transform in column-major order, ready for `glUniformMatrix4fv`.
///
/// Element `eRC` (1-based row `R`, column `C`) is stored at index `(C - 1) * 4 + (R - 1)`.
/// All operations mutate the matrix in place; the cube demo rebuilds it from
/// scratch every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix4f {
    pub data: [f32; 16],
}

impl Matrix4f {
    pub fn new_identity() -> Self {
        let mut m = Self { data: [0.0; 16] };
        m.identity();
        m
    }

    pub fn new_zero() -> Self {
        Self { data: [0.0; 16] }
    }

    pub fn from_columns(columns: [[f32; 4]; 4]) -> Self {
        let mut data = [0.0; 16];
        for (c, column) in columns.iter().enumerate() {
            data[c * 4..c * 4 + 4].copy_from_slice(column);
        }
        Self { data }
    }

    /// Resets to the multiplicative identity.
    pub fn identity(&mut self) -> &mut Self {
        self.data = [0.0; 16];
        self.data[0] = 1.0;
        self.data[5] = 1.0;
        self.data[10] = 1.0;
        self.data[15] = 1.0;
        self
    }

    pub fn zero(&mut self) -> &mut Self {
        self.data = [0.0; 16];
        self
    }

    /// Sets a symmetric perspective frustum from the near/far clip distances and
    /// the right/top half-extents at the near plane.
    ///
    /// Only `e11`, `e22`, `e33`, `e34` and `e43` are non-zero; `e34` carries the
    /// `-1` of the perspective divide.
    pub fn frustum(&mut self, near: f32, far: f32, right: f32, top: f32) -> &mut Self {
        self.zero();
        self.set(1, 1, near / right);
        self.set(2, 2, near / top);
        self.set(3, 3, (far + near) / (near - far));
        self.set(3, 4, -1.0);
        self.set(4, 3, (2.0 * far * near) / (near - far));
        self
    }

    /// Post-multiplies a translation: column 4 becomes
    /// `c1 * tx + c2 * ty + c3 * tz + c4`.
    pub fn translate(&mut self, tx: f32, ty: f32, tz: f32) -> &mut Self {
        for i in 0..4 {
            self.data[12 + i] =
                self.data[i] * tx + self.data[4 + i] * ty + self.data[8 + i] * tz + self.data[12 + i];
        }
        self
    }

    /// Replaces this matrix with `other * self`.
    pub fn multiply(&mut self, other: &Matrix4f) -> &mut Self {
        let mut result = [0.0; 16];
        for c in 0..4 {
            for r in 0..4 {
                result[c * 4 + r] = (0..4).map(|i| other.data[i * 4 + r] * self.data[c * 4 + i]).sum();
            }
        }
        self.data = result;
        self
    }

    /// Scales the linear part (columns 1-3); the translation column is untouched.
    pub fn scale(&mut self, factor: f32) -> &mut Self {
        self.data[..12].iter_mut().for_each(|v| *v *= factor);
        self
    }

    /// Post-multiplies a rotation about the Y axis by blending columns 1 and 3.
    pub fn rotate_y(&mut self, angle: f32) -> &mut Self {
        self.rotate_columns(0, 2, angle)
    }

    /// Post-multiplies a rotation about the Z axis by blending columns 1 and 2.
    pub fn rotate_z(&mut self, angle: f32) -> &mut Self {
        self.rotate_columns(0, 1, angle)
    }

    fn rotate_columns(&mut self, a: usize, b: usize, angle: f32) -> &mut Self {
        let (sin, cos) = angle.sin_cos();
        for i in 0..4 {
            let t1 = self.data[a * 4 + i];
            let t2 = self.data[b * 4 + i];
            self.data[a * 4 + i] = t1 * cos - t2 * sin;
            self.data[b * 4 + i] = t1 * sin + t2 * cos;
        }
        self
    }

    /// Returns `eRC`, 1-based like the element names.
    pub fn element(&self, row: usize, col: usize) -> f32 {
        debug_assert!((1..=4).contains(&row) && (1..=4).contains(&col));
        self.data[(col - 1) * 4 + (row - 1)]
    }

    fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[(col - 1) * 4 + (row - 1)] = value;
    }

    /// Returns column `col` (0-based).
    pub fn column(&self, col: usize) -> [f32; 4] {
        let mut out = [0.0; 4];
        out.copy_from_slice(&self.data[col * 4..col * 4 + 4]);
        out
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_array(&self) -> &[f32; 16] {
        &self.data
    }
}

impl Default for Matrix4f {
    fn default() -> Self {
        Self::new_identity()
    }
}

/// Prints the four rows, tab-terminated, each element with two significant
/// digits in `%.2g` style: `1`, `0.83`, `-1e+02`.
impl fmt::Display for Matrix4f {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..4 {
            for c in 0..4 {
                write!(f, "{}\t", significant2(self.data[c * 4 + r]))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn significant2(value: f32) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    // rounds to two significant digits and yields the decimal exponent
    let scientific = format!("{value:.1e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if (-4..2).contains(&exponent) {
        let decimals = (1 - exponent) as usize;
        trim_fraction(format!("{value:.decimals$}"))
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa.to_string()), exponent.abs())
    }
}

fn trim_fraction(mut digits: String) -> String {
    if digits.contains('.') {
        let trimmed = digits.trim_end_matches('0').trim_end_matches('.').len();
        digits.truncate(trimmed);
    }
    digits
}
