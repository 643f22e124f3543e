use std::{
    fmt,
    ops::{Index, IndexMut, Mul},
    str::FromStr,
};

use compact_str::{format_compact, CompactString};

/// A quaternion `(q0, q1, q2, q3)` with the scalar part first.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Quaternion {
    data: [f32; 4],
}

#[derive(Debug)]
pub struct ParseQuaternionError {
    pub message: CompactString,
}

impl fmt::Display for ParseQuaternionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ParseQuaternionError {}

impl Quaternion {
    pub const fn new(q0: f32, q1: f32, q2: f32, q3: f32) -> Self {
        Self { data: [q0, q1, q2, q3] }
    }

    pub fn components(&self) -> [f32; 4] {
        self.data
    }

    /// Replaces `self` with the Hamilton product `self * q`.
    pub fn apply(&mut self, q: &Quaternion) {
        let p = self.data;
        self.data = [
            p[0] * q[0] - p[1] * q[1] - p[2] * q[2] - p[3] * q[3],
            p[0] * q[1] + p[1] * q[0] + p[2] * q[3] - p[3] * q[2],
            p[0] * q[2] - p[1] * q[3] + p[2] * q[0] + p[3] * q[1],
            p[0] * q[3] + p[1] * q[2] - p[2] * q[1] + p[3] * q[0],
        ];
    }
}

impl From<[f32; 4]> for Quaternion {
    fn from(data: [f32; 4]) -> Self {
        Self { data }
    }
}

impl Index<usize> for Quaternion {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.data[index]
    }
}

impl IndexMut<usize> for Quaternion {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.data[index]
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(mut self, rhs: Quaternion) -> Quaternion {
        self.apply(&rhs);
        self
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.data;
        write!(f, "({a},{b},{c},{d})")
    }
}

impl FromStr for Quaternion {
    type Err = ParseQuaternionError;

    /// Parses four comma-separated components, e.g. `2,3,4,5` or `(2, 3, 4, 5)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(ParseQuaternionError {
                message: format_compact!("expected 4 components, found {}", parts.len()),
            });
        }

        let mut data = [0.0; 4];
        for (slot, part) in data.iter_mut().zip(parts) {
            *slot = part.parse().map_err(|_| ParseQuaternionError {
                message: format_compact!("invalid component '{part}'"),
            })?;
        }

        Ok(Self { data })
    }
}
