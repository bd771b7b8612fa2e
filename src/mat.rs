// 4x4 matrix type for the math kernel
//
// Storage is column-major: `cols[c][r]` holds logical row `r` of column `c`,
// so the sixteen floats go to the GPU exactly as stored, without a transpose.
// Multiplication still reads as ordinary math: `b * a` applies `a` first,
// then `b`.

use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut, Mul, MulAssign, Sub, SubAssign};

use approx::{AbsDiffEq, RelativeEq};
use bytemuck::{Pod, Zeroable};

use crate::error::{MathError, MathResult};
use crate::vec::Vector3;

/// A 4x4 `f32` matrix laid out column by column.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Matrix4 {
    cols: [[f32; 4]; 4],
}

impl Matrix4 {
    pub const ZERO: Self = Self::new(0.0);
    pub const IDENTITY: Self = Self::new(1.0);

    /// Creates a matrix with `a` on the diagonal and exactly zero elsewhere.
    pub const fn new(a: f32) -> Self {
        Self {
            cols: [
                [a, 0.0, 0.0, 0.0],
                [0.0, a, 0.0, 0.0],
                [0.0, 0.0, a, 0.0],
                [0.0, 0.0, 0.0, a],
            ],
        }
    }

    /// Builds a matrix from four columns.
    pub const fn from_cols(cols: [[f32; 4]; 4]) -> Self {
        Self { cols }
    }

    /// Builds a matrix from sixteen floats in column-major order.
    pub fn from_cols_array(data: [f32; 16]) -> Self {
        bytemuck::cast(data)
    }

    /// Entry at logical `row`, `col`.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.cols[col][row]
    }

    /// The stored entries, column 0 first. This is the buffer handed to the
    /// rendering backend.
    pub fn data(&self) -> &[f32; 16] {
        bytemuck::cast_ref(&self.cols)
    }

    pub fn data_mut(&mut self) -> &mut [f32; 16] {
        bytemuck::cast_mut(&mut self.cols)
    }

    /// Raw bytes of [`Matrix4::data`], for byte-oriented upload APIs.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Translation part (column 3, rows 0..3).
    pub fn translation(&self) -> Vector3 {
        Vector3::new(self.cols[3][0], self.cols[3][1], self.cols[3][2])
    }

    pub fn transpose(&self) -> Self {
        let mut result = Self::ZERO;
        for c in 0..4 {
            for r in 0..4 {
                result.cols[c][r] = self.cols[r][c];
            }
        }
        result
    }

    pub fn determinant(&self) -> f32 {
        let (s, c) = self.minors();
        det_from_minors(&s, &c)
    }

    /// Inverse via the adjugate.
    ///
    /// Fails with [`MathError::Singular`] when the determinant is zero or not
    /// finite, or when the inverse has entries that don't fit in an `f32`.
    pub fn inverse(&self) -> MathResult<Self> {
        let singular = || MathError::Singular {
            determinant: self.determinant(),
        };

        // Work on a copy scaled so the largest entry is 1, which keeps the
        // determinant out of the subnormal range for tiny or huge matrices.
        // inverse(m) = inverse(m / k) / k
        let k = self.data().iter().fold(0.0_f32, |max, v| max.max(v.abs()));
        if k == 0.0 || !k.is_finite() {
            return Err(singular());
        }
        let m = self.map(|v| v / k);

        let (s, c) = m.minors();
        let det = det_from_minors(&s, &c);
        if det == 0.0 || !det.is_finite() {
            return Err(singular());
        }

        let a = |r: usize, col: usize| m.cols[col][r];

        // Rows of the adjugate, written out by logical (row, col).
        let rows = [
            [
                a(1, 1) * c[5] - a(1, 2) * c[4] + a(1, 3) * c[3],
                -a(0, 1) * c[5] + a(0, 2) * c[4] - a(0, 3) * c[3],
                a(3, 1) * s[5] - a(3, 2) * s[4] + a(3, 3) * s[3],
                -a(2, 1) * s[5] + a(2, 2) * s[4] - a(2, 3) * s[3],
            ],
            [
                -a(1, 0) * c[5] + a(1, 2) * c[2] - a(1, 3) * c[1],
                a(0, 0) * c[5] - a(0, 2) * c[2] + a(0, 3) * c[1],
                -a(3, 0) * s[5] + a(3, 2) * s[2] - a(3, 3) * s[1],
                a(2, 0) * s[5] - a(2, 2) * s[2] + a(2, 3) * s[1],
            ],
            [
                a(1, 0) * c[4] - a(1, 1) * c[2] + a(1, 3) * c[0],
                -a(0, 0) * c[4] + a(0, 1) * c[2] - a(0, 3) * c[0],
                a(3, 0) * s[4] - a(3, 1) * s[2] + a(3, 3) * s[0],
                -a(2, 0) * s[4] + a(2, 1) * s[2] - a(2, 3) * s[0],
            ],
            [
                -a(1, 0) * c[3] + a(1, 1) * c[1] - a(1, 2) * c[0],
                a(0, 0) * c[3] - a(0, 1) * c[1] + a(0, 2) * c[0],
                -a(3, 0) * s[3] + a(3, 1) * s[1] - a(3, 2) * s[0],
                a(2, 0) * s[3] - a(2, 1) * s[1] + a(2, 2) * s[0],
            ],
        ];

        let mut result = Self::ZERO;
        for (r, row) in rows.iter().enumerate() {
            for (col, value) in row.iter().enumerate() {
                result.cols[col][r] = value / det / k;
            }
        }
        if !result.data().iter().all(|v| v.is_finite()) {
            return Err(singular());
        }
        Ok(result)
    }

    /// 2x2 minors of the top two rows (`s`) and bottom two rows (`c`).
    fn minors(&self) -> ([f32; 6], [f32; 6]) {
        let a = |r: usize, col: usize| self.cols[col][r];
        let s = [
            a(0, 0) * a(1, 1) - a(1, 0) * a(0, 1),
            a(0, 0) * a(1, 2) - a(1, 0) * a(0, 2),
            a(0, 0) * a(1, 3) - a(1, 0) * a(0, 3),
            a(0, 1) * a(1, 2) - a(1, 1) * a(0, 2),
            a(0, 1) * a(1, 3) - a(1, 1) * a(0, 3),
            a(0, 2) * a(1, 3) - a(1, 2) * a(0, 3),
        ];
        let c = [
            a(2, 0) * a(3, 1) - a(3, 0) * a(2, 1),
            a(2, 0) * a(3, 2) - a(3, 0) * a(2, 2),
            a(2, 0) * a(3, 3) - a(3, 0) * a(2, 3),
            a(2, 1) * a(3, 2) - a(3, 1) * a(2, 2),
            a(2, 1) * a(3, 3) - a(3, 1) * a(2, 3),
            a(2, 2) * a(3, 3) - a(3, 2) * a(2, 3),
        ];
        (s, c)
    }

    /// Applies the matrix to the point `(x, y, z, 1)`, dividing by `w` when it
    /// is non-zero.
    pub fn transform_point(&self, p: Vector3) -> Vector3 {
        let out = self.apply([p.x, p.y, p.z, 1.0]);
        if out[3] != 0.0 {
            Vector3::new(out[0] / out[3], out[1] / out[3], out[2] / out[3])
        } else {
            Vector3::new(out[0], out[1], out[2])
        }
    }

    /// Applies the matrix to the direction `(x, y, z, 0)`.
    pub fn transform_vector(&self, v: Vector3) -> Vector3 {
        let out = self.apply([v.x, v.y, v.z, 0.0]);
        Vector3::new(out[0], out[1], out[2])
    }

    fn apply(&self, v: [f32; 4]) -> [f32; 4] {
        let mut out = [0.0; 4];
        for (c, col) in self.cols.iter().enumerate() {
            for r in 0..4 {
                out[r] += col[r] * v[c];
            }
        }
        out
    }

    fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            cols: self.cols.map(|col| col.map(&f)),
        }
    }

    fn zip(self, rhs: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        let mut result = self;
        for (a, b) in result.data_mut().iter_mut().zip(rhs.data()) {
            *a = f(*a, *b);
        }
        result
    }
}

fn det_from_minors(s: &[f32; 6], c: &[f32; 6]) -> f32 {
    s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
}

impl Add for Matrix4 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a + b)
    }
}

impl Sub for Matrix4 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a - b)
    }
}

impl AddAssign for Matrix4 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Matrix4 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<f32> for Matrix4 {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        self.map(|a| a * scalar)
    }
}

impl Mul<Matrix4> for f32 {
    type Output = Matrix4;

    fn mul(self, mat: Matrix4) -> Matrix4 {
        mat * self
    }
}

/// `self * rhs`: apply `rhs` first, then `self`.
impl Mul for Matrix4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut result = Self::ZERO;
        for c in 0..4 {
            for r in 0..4 {
                // Row r of self, column c of rhs
                let mut sum = 0.0;
                for i in 0..4 {
                    sum += self.cols[i][r] * rhs.cols[c][i];
                }
                result.cols[c][r] = sum;
            }
        }
        result
    }
}

impl MulAssign for Matrix4 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

/// `m[c]` is column `c`; `m[c][r]` is row `r` of that column.
impl Index<usize> for Matrix4 {
    type Output = [f32; 4];

    fn index(&self, col: usize) -> &[f32; 4] {
        &self.cols[col]
    }
}

impl IndexMut<usize> for Matrix4 {
    fn index_mut(&mut self, col: usize) -> &mut [f32; 4] {
        &mut self.cols[col]
    }
}

impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..4 {
            writeln!(
                f,
                "| {}, {}, {}, {} |",
                self.get(r, 0),
                self.get(r, 1),
                self.get(r, 2),
                self.get(r, 3)
            )?;
        }
        Ok(())
    }
}

impl AbsDiffEq for Matrix4 {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.data()
            .iter()
            .zip(other.data())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Matrix4 {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.data()
            .iter()
            .zip(other.data())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
