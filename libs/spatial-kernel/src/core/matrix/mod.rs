//! # Matrix4
//!
//! 4×4 affine transform stored column-major: flat index `i` addresses
//! `(row = i % 4, col = i / 4)`.
//!
//! ## Conventions
//!
//! - Column vectors: `M * v`, so in `A * B` the right operand applies first
//! - [`Matrix4::trs`] composes `T * R * S` (scale, then rotate, then
//!   translate)
//! - A singular matrix inverts to [`Matrix4::ZERO`]; use
//!   [`Matrix4::try_inverse`] to tell the two apart
//!
//! ## Example
//!
//! ```rust
//! use spatial_kernel::{Matrix4, Quaternion, Vector3};
//!
//! let m = Matrix4::trs(
//!     Vector3::new(1.0, 2.0, 3.0),
//!     Quaternion::angle_axis(90.0, Vector3::UP),
//!     Vector3::splat(2.0),
//! );
//! let p = m.multiply_point3x4(Vector3::FORWARD);
//! assert!(p.approx_eq(Vector3::new(3.0, 2.0, 3.0)));
//! ```

use std::fmt;
use std::ops::{Index, Mul};

use config::constants::EPSILON;
use serde::{Deserialize, Serialize};

use crate::core::quaternion::Quaternion;
use crate::core::vec3::Vector3;
use crate::core::vec4::Vector4;
use crate::error::{KernelError, KernelResult};

/// Name used by the transform-facing parts of the API.
pub type AffineTransform = Matrix4;

/// A 4×4 matrix of `f64`, column-major.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix4 {
    elements: [f64; 16],
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4 {
    /// All elements zero. Also the result of inverting a singular matrix.
    pub const ZERO: Self = Self { elements: [0.0; 16] };

    /// Ones on the diagonal.
    pub const IDENTITY: Self = Self {
        elements: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Creates a matrix from 16 column-major elements.
    #[inline]
    pub const fn from_cols_array(elements: [f64; 16]) -> Self {
        Self { elements }
    }

    /// Creates a matrix from its four columns.
    pub const fn from_cols(c0: Vector4, c1: Vector4, c2: Vector4, c3: Vector4) -> Self {
        Self::from_cols_array([
            c0.x, c0.y, c0.z, c0.w, //
            c1.x, c1.y, c1.z, c1.w, //
            c2.x, c2.y, c2.z, c2.w, //
            c3.x, c3.y, c3.z, c3.w,
        ])
    }

    /// The identity matrix.
    #[inline]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// The 16 elements in column-major order.
    #[inline]
    pub const fn to_cols_array(&self) -> [f64; 16] {
        self.elements
    }

    #[inline]
    const fn at(&self, row: usize, col: usize) -> f64 {
        self.elements[row + col * 4]
    }

    // =========================================================================
    // ELEMENT ACCESS
    // =========================================================================

    /// Element at `(row, col)`, or `MatrixIndexOutOfRange`.
    pub fn get(&self, row: usize, col: usize) -> KernelResult<f64> {
        if row >= 4 || col >= 4 {
            return Err(KernelError::MatrixIndexOutOfRange { row, col });
        }
        Ok(self.at(row, col))
    }

    /// Element at flat column-major `index`, or `IndexOutOfRange`.
    pub fn get_index(&self, index: usize) -> KernelResult<f64> {
        self.elements
            .get(index)
            .copied()
            .ok_or(KernelError::IndexOutOfRange { index, len: 16 })
    }

    /// Copy with the element at `(row, col)` replaced.
    pub fn with_element(self, row: usize, col: usize, value: f64) -> KernelResult<Self> {
        if row >= 4 || col >= 4 {
            return Err(KernelError::MatrixIndexOutOfRange { row, col });
        }
        let mut elements = self.elements;
        elements[row + col * 4] = value;
        Ok(Self { elements })
    }

    /// Column `index` (`0..4`).
    pub fn column(&self, index: usize) -> KernelResult<Vector4> {
        if index >= 4 {
            return Err(KernelError::IndexOutOfRange { index, len: 4 });
        }
        Ok(self.col(index))
    }

    /// Row `index` (`0..4`).
    pub fn row(&self, index: usize) -> KernelResult<Vector4> {
        if index >= 4 {
            return Err(KernelError::IndexOutOfRange { index, len: 4 });
        }
        Ok(self.row_unchecked(index))
    }

    /// Copy with column `index` replaced.
    pub fn with_column(self, index: usize, column: Vector4) -> KernelResult<Self> {
        if index >= 4 {
            return Err(KernelError::IndexOutOfRange { index, len: 4 });
        }
        let mut elements = self.elements;
        elements[index * 4..index * 4 + 4].copy_from_slice(&column.to_array());
        Ok(Self { elements })
    }

    /// Copy with row `index` replaced.
    pub fn with_row(self, index: usize, row: Vector4) -> KernelResult<Self> {
        if index >= 4 {
            return Err(KernelError::IndexOutOfRange { index, len: 4 });
        }
        let mut elements = self.elements;
        for (col, value) in row.to_array().into_iter().enumerate() {
            elements[index + col * 4] = value;
        }
        Ok(Self { elements })
    }

    #[inline]
    fn col(&self, index: usize) -> Vector4 {
        let base = index * 4;
        Vector4::new(
            self.elements[base],
            self.elements[base + 1],
            self.elements[base + 2],
            self.elements[base + 3],
        )
    }

    #[inline]
    fn row_unchecked(&self, index: usize) -> Vector4 {
        Vector4::new(
            self.at(index, 0),
            self.at(index, 1),
            self.at(index, 2),
            self.at(index, 3),
        )
    }

    // =========================================================================
    // CONSTRUCTION
    // =========================================================================

    /// Axis-aligned scale.
    pub fn scale(v: Vector3) -> Self {
        Self::from_cols_array([
            v.x, 0.0, 0.0, 0.0, //
            0.0, v.y, 0.0, 0.0, //
            0.0, 0.0, v.z, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Translation by `v`.
    pub fn translate(v: Vector3) -> Self {
        Self::from_cols_array([
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            v.x, v.y, v.z, 1.0,
        ])
    }

    /// Rotation matrix of a unit quaternion.
    pub fn rotate(q: Quaternion) -> Self {
        let (x2, y2, z2) = (q.x * 2.0, q.y * 2.0, q.z * 2.0);
        let (xx, yy, zz) = (q.x * x2, q.y * y2, q.z * z2);
        let (xy, xz, yz) = (q.x * y2, q.x * z2, q.y * z2);
        let (wx, wy, wz) = (q.w * x2, q.w * y2, q.w * z2);

        Self::from_cols_array([
            1.0 - (yy + zz),
            xy + wz,
            xz - wy,
            0.0,
            //
            xy - wz,
            1.0 - (xx + zz),
            yz + wx,
            0.0,
            //
            xz + wy,
            yz - wx,
            1.0 - (xx + yy),
            0.0,
            //
            0.0,
            0.0,
            0.0,
            1.0,
        ])
    }

    /// `translate(position) * rotate(rotation) * scale(scale)`.
    pub fn trs(position: Vector3, rotation: Quaternion, scale: Vector3) -> Self {
        Self::translate(position)
            .multiply(&Self::rotate(rotation))
            .multiply(&Self::scale(scale))
    }

    // =========================================================================
    // ALGEBRA
    // =========================================================================

    /// Swaps rows and columns.
    pub fn transpose(&self) -> Self {
        let mut elements = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                elements[col + row * 4] = self.at(row, col);
            }
        }
        Self { elements }
    }

    /// Full 4×4 determinant, by cofactor expansion along the first row.
    pub fn determinant(&self) -> f64 {
        let m = |row: usize, col: usize| self.at(row, col);

        // 2×2 minors of the bottom two rows.
        let s0 = m(2, 0) * m(3, 1) - m(2, 1) * m(3, 0);
        let s1 = m(2, 0) * m(3, 2) - m(2, 2) * m(3, 0);
        let s2 = m(2, 0) * m(3, 3) - m(2, 3) * m(3, 0);
        let s3 = m(2, 1) * m(3, 2) - m(2, 2) * m(3, 1);
        let s4 = m(2, 1) * m(3, 3) - m(2, 3) * m(3, 1);
        let s5 = m(2, 2) * m(3, 3) - m(2, 3) * m(3, 2);

        let c0 = m(1, 1) * s5 - m(1, 2) * s4 + m(1, 3) * s3;
        let c1 = m(1, 0) * s5 - m(1, 2) * s2 + m(1, 3) * s1;
        let c2 = m(1, 0) * s4 - m(1, 1) * s2 + m(1, 3) * s0;
        let c3 = m(1, 0) * s3 - m(1, 1) * s1 + m(1, 2) * s0;

        m(0, 0) * c0 - m(0, 1) * c1 + m(0, 2) * c2 - m(0, 3) * c3
    }

    /// Inverse, or [`Matrix4::ZERO`] when the matrix is singular.
    pub fn inverse(&self) -> Self {
        self.try_inverse().unwrap_or(Self::ZERO)
    }

    /// Inverse, or `None` when the determinant is zero or not finite.
    ///
    /// Computed as the adjugate divided by the determinant.
    pub fn try_inverse(&self) -> Option<Self> {
        let m = |row: usize, col: usize| self.at(row, col);

        let s0 = m(0, 0) * m(1, 1) - m(1, 0) * m(0, 1);
        let s1 = m(0, 0) * m(1, 2) - m(1, 0) * m(0, 2);
        let s2 = m(0, 0) * m(1, 3) - m(1, 0) * m(0, 3);
        let s3 = m(0, 1) * m(1, 2) - m(1, 1) * m(0, 2);
        let s4 = m(0, 1) * m(1, 3) - m(1, 1) * m(0, 3);
        let s5 = m(0, 2) * m(1, 3) - m(1, 2) * m(0, 3);

        let c5 = m(2, 2) * m(3, 3) - m(3, 2) * m(2, 3);
        let c4 = m(2, 1) * m(3, 3) - m(3, 1) * m(2, 3);
        let c3 = m(2, 1) * m(3, 2) - m(3, 1) * m(2, 2);
        let c2 = m(2, 0) * m(3, 3) - m(3, 0) * m(2, 3);
        let c1 = m(2, 0) * m(3, 2) - m(3, 0) * m(2, 2);
        let c0 = m(2, 0) * m(3, 1) - m(3, 0) * m(2, 1);

        let det = s0 * c5 - s1 * c4 + s2 * c3 + s3 * c2 - s4 * c1 + s5 * c0;
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv = 1.0 / det;

        let mut out = [[0.0; 4]; 4];
        out[0][0] = (m(1, 1) * c5 - m(1, 2) * c4 + m(1, 3) * c3) * inv;
        out[0][1] = (-m(0, 1) * c5 + m(0, 2) * c4 - m(0, 3) * c3) * inv;
        out[0][2] = (m(3, 1) * s5 - m(3, 2) * s4 + m(3, 3) * s3) * inv;
        out[0][3] = (-m(2, 1) * s5 + m(2, 2) * s4 - m(2, 3) * s3) * inv;

        out[1][0] = (-m(1, 0) * c5 + m(1, 2) * c2 - m(1, 3) * c1) * inv;
        out[1][1] = (m(0, 0) * c5 - m(0, 2) * c2 + m(0, 3) * c1) * inv;
        out[1][2] = (-m(3, 0) * s5 + m(3, 2) * s2 - m(3, 3) * s1) * inv;
        out[1][3] = (m(2, 0) * s5 - m(2, 2) * s2 + m(2, 3) * s1) * inv;

        out[2][0] = (m(1, 0) * c4 - m(1, 1) * c2 + m(1, 3) * c0) * inv;
        out[2][1] = (-m(0, 0) * c4 + m(0, 1) * c2 - m(0, 3) * c0) * inv;
        out[2][2] = (m(3, 0) * s4 - m(3, 1) * s2 + m(3, 3) * s0) * inv;
        out[2][3] = (-m(2, 0) * s4 + m(2, 1) * s2 - m(2, 3) * s0) * inv;

        out[3][0] = (-m(1, 0) * c3 + m(1, 1) * c1 - m(1, 2) * c0) * inv;
        out[3][1] = (m(0, 0) * c3 - m(0, 1) * c1 + m(0, 2) * c0) * inv;
        out[3][2] = (-m(3, 0) * s3 + m(3, 1) * s1 - m(3, 2) * s0) * inv;
        out[3][3] = (m(2, 0) * s3 - m(2, 1) * s1 + m(2, 2) * s0) * inv;

        let mut elements = [0.0; 16];
        for (row, values) in out.iter().enumerate() {
            for (col, value) in values.iter().enumerate() {
                elements[row + col * 4] = *value;
            }
        }
        Some(Self { elements })
    }

    /// Matrix product `self * rhs`.
    pub fn multiply(&self, rhs: &Self) -> Self {
        let mut elements = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                elements[row + col * 4] = (0..4).map(|k| self.at(row, k) * rhs.at(k, col)).sum();
            }
        }
        Self { elements }
    }

    /// Matrix-vector product `self * v`.
    pub fn multiply_vector4(&self, v: Vector4) -> Vector4 {
        let [x, y, z, w] = [0, 1, 2, 3].map(|row| self.row_unchecked(row).dot(v));
        Vector4::new(x, y, z, w)
    }

    /// Transforms a direction by the upper 3×3 block. Ignores translation.
    pub fn multiply_vector(&self, v: Vector3) -> Vector3 {
        Vector3::new(
            self.at(0, 0) * v.x + self.at(0, 1) * v.y + self.at(0, 2) * v.z,
            self.at(1, 0) * v.x + self.at(1, 1) * v.y + self.at(1, 2) * v.z,
            self.at(2, 0) * v.x + self.at(2, 1) * v.y + self.at(2, 2) * v.z,
        )
    }

    /// Transforms a point by the upper 3×4 block, skipping the projective
    /// divide.
    pub fn multiply_point3x4(&self, p: Vector3) -> Vector3 {
        self.multiply_vector(p)
            .add(Vector3::new(self.at(0, 3), self.at(1, 3), self.at(2, 3)))
    }

    /// Transforms a point and divides by the resulting `w`.
    ///
    /// A zero `w` follows IEEE semantics.
    pub fn multiply_point(&self, p: Vector3) -> Vector3 {
        let v = self.multiply_vector4(Vector4::from_point(p));
        v.truncate().divide(v.w)
    }

    // =========================================================================
    // DECOMPOSITION
    // =========================================================================

    /// Translation part (last column).
    #[inline]
    pub fn position(&self) -> Vector3 {
        self.col(3).truncate()
    }

    /// Magnitudes of the first three columns.
    ///
    /// Lossy: a negative scale comes back positive with the flip folded into
    /// the rotation.
    pub fn lossy_scale(&self) -> Vector3 {
        Vector3::new(
            self.col(0).truncate().magnitude(),
            self.col(1).truncate().magnitude(),
            self.col(2).truncate().magnitude(),
        )
    }

    /// Rotation part as a unit quaternion.
    ///
    /// The columns are divided by [`Matrix4::lossy_scale`] first; a zero
    /// scale axis yields the identity.
    pub fn rotation(&self) -> Quaternion {
        let scale = self.lossy_scale();
        if scale.x <= EPSILON || scale.y <= EPSILON || scale.z <= EPSILON {
            return Quaternion::IDENTITY;
        }
        let c0 = self.col(0).truncate().divide(scale.x);
        let c1 = self.col(1).truncate().divide(scale.y);
        let c2 = self.col(2).truncate().divide(scale.z);

        let (m00, m01, m02) = (c0.x, c1.x, c2.x);
        let (m10, m11, m12) = (c0.y, c1.y, c2.y);
        let (m20, m21, m22) = (c0.z, c1.z, c2.z);

        let trace = m00 + m11 + m22;
        let q = if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Quaternion::new((m21 - m12) / s, (m02 - m20) / s, (m10 - m01) / s, 0.25 * s)
        } else if m00 > m11 && m00 > m22 {
            let s = (1.0 + m00 - m11 - m22).sqrt() * 2.0;
            Quaternion::new(0.25 * s, (m01 + m10) / s, (m02 + m20) / s, (m21 - m12) / s)
        } else if m11 > m22 {
            let s = (1.0 + m11 - m00 - m22).sqrt() * 2.0;
            Quaternion::new((m01 + m10) / s, 0.25 * s, (m12 + m21) / s, (m02 - m20) / s)
        } else {
            let s = (1.0 + m22 - m00 - m11).sqrt() * 2.0;
            Quaternion::new((m02 + m20) / s, (m12 + m21) / s, 0.25 * s, (m10 - m01) / s)
        };
        q.normalized()
    }

    // =========================================================================
    // PREDICATES
    // =========================================================================

    /// Exact comparison with [`Matrix4::IDENTITY`].
    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// `true` when every element is finite.
    pub fn is_finite(&self) -> bool {
        self.elements.iter().all(|e| e.is_finite())
    }

    /// `true` when the matrix can be decomposed into translation, rotation
    /// and scale.
    ///
    /// Requires finite elements, a non-zero lossy scale on every axis, a
    /// rotation whose components lie in `[-1, 1]` and a bottom row of exactly
    /// `(0, 0, 0, 1)`.
    pub fn is_valid_trs(&self) -> bool {
        if !self.is_finite() {
            return false;
        }
        let scale = self.lossy_scale();
        if scale.x == 0.0 || scale.y == 0.0 || scale.z == 0.0 {
            return false;
        }
        if self.row_unchecked(3) != Vector4::new(0.0, 0.0, 0.0, 1.0) {
            return false;
        }
        self.rotation()
            .to_array()
            .iter()
            .all(|c| (-1.0..=1.0).contains(c))
    }

    /// `true` when every element differs by less than `epsilon`.
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.elements
            .iter()
            .zip(other.elements.iter())
            .all(|(a, b)| (a - b).abs() < epsilon)
    }
}

impl From<[f64; 16]> for Matrix4 {
    fn from(elements: [f64; 16]) -> Self {
        Self::from_cols_array(elements)
    }
}

impl Index<(usize, usize)> for Matrix4 {
    type Output = f64;

    /// # Panics
    ///
    /// Panics when `row` or `col` is `>= 4`.
    #[allow(clippy::panic)]
    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        if row >= 4 || col >= 4 {
            panic!("Matrix4 index ({row}, {col}) out of range");
        }
        &self.elements[row + col * 4]
    }
}

impl Index<usize> for Matrix4 {
    type Output = f64;

    /// # Panics
    ///
    /// Panics when `index >= 16`.
    #[allow(clippy::panic)]
    fn index(&self, index: usize) -> &f64 {
        match self.elements.get(index) {
            Some(value) => value,
            None => panic!("Matrix4 index {index} out of range"),
        }
    }
}

impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..4 {
            writeln!(
                f,
                "{:.5}\t{:.5}\t{:.5}\t{:.5}",
                self.at(row, 0),
                self.at(row, 1),
                self.at(row, 2),
                self.at(row, 3)
            )?;
        }
        Ok(())
    }
}

// =============================================================================
// OPERATORS
// =============================================================================

impl Mul for Matrix4 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl Mul<Vector4> for Matrix4 {
    type Output = Vector4;
    fn mul(self, rhs: Vector4) -> Vector4 {
        self.multiply_vector4(rhs)
    }
}
