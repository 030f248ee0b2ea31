// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Mul;

use kurbo::{Affine, Point, Vec2};
use nalgebra::{Matrix3, Vector3};

/// Determinants with a smaller magnitude than this are treated as singular.
pub const DEGENERATE_EPSILON: f64 = 1e-10;

/// Returned when a [`Matrix`] cannot be inverted.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
#[error("degenerate transform (determinant {determinant:e})")]
pub struct DegenerateTransform {
    /// Determinant of the offending matrix.
    pub determinant: f64,
}

/// A 3×3 homogeneous 2D transform.
///
/// Points are treated as column vectors `(x, y, 1)`, so `a * b` (or
/// [`Matrix::compose`]) maps a point through `b` first and then `a`.
///
/// The matrix may be affine (bottom row `0 0 1`) or projective. Points are
/// mapped with a perspective divide, which is a no-op for affine matrices.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[[f64; 3]; 3]", into = "[[f64; 3]; 3]")
)]
pub struct Matrix(Matrix3<f64>);

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix {
    /// The identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self(Matrix3::identity())
    }

    /// Builds a matrix from its rows.
    #[must_use]
    pub fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        let [r0, r1, r2] = rows;
        Self(Matrix3::new(
            r0[0], r0[1], r0[2], r1[0], r1[1], r1[2], r2[0], r2[1], r2[2],
        ))
    }

    /// Returns the rows of this matrix.
    #[must_use]
    pub fn rows(&self) -> [[f64; 3]; 3] {
        let m = &self.0;
        [
            [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
            [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
            [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
        ]
    }

    /// Lifts a `kurbo` affine transform into homogeneous form.
    #[must_use]
    pub fn from_affine(affine: Affine) -> Self {
        let [a, b, c, d, e, f] = affine.as_coeffs();
        Self(Matrix3::new(a, c, e, b, d, f, 0.0, 0.0, 1.0))
    }

    /// A pure translation by `v`.
    #[must_use]
    pub fn translate(v: Vec2) -> Self {
        Self::from_affine(Affine::translate(v))
    }

    /// A uniform scale about the origin.
    #[must_use]
    pub fn scale(s: f64) -> Self {
        Self::from_affine(Affine::scale(s))
    }

    /// A uniform scale that keeps `center` fixed.
    #[must_use]
    pub fn scale_about_point(s: f64, center: Point) -> Self {
        let c = center.to_vec2();
        Self::translate(c) * Self::scale(s) * Self::translate(-c)
    }

    /// A rotation by `degrees` about `center`.
    ///
    /// With y pointing down, positive angles turn clockwise on screen.
    /// Multiples of 90° are exact.
    #[must_use]
    pub fn rotate_deg(degrees: f64, center: Point) -> Self {
        let (sin, cos) = sin_cos_deg(degrees);
        let c = center.to_vec2();
        let rotation = Self::from_affine(Affine::new([cos, sin, -sin, cos, 0.0, 0.0]));
        Self::translate(c) * rotation * Self::translate(-c)
    }

    /// Mirrors x about the vertical line through `center`.
    #[must_use]
    pub fn flip_horizontal(center: Point) -> Self {
        Self::from_affine(Affine::new([-1.0, 0.0, 0.0, 1.0, 2.0 * center.x, 0.0]))
    }

    /// Mirrors y about the horizontal line through `center`.
    #[must_use]
    pub fn flip_vertical(center: Point) -> Self {
        Self::from_affine(Affine::new([1.0, 0.0, 0.0, -1.0, 0.0, 2.0 * center.y]))
    }

    /// Returns `self ∘ other`: `other` is applied first.
    #[must_use]
    pub fn compose(self, other: Self) -> Self {
        Self(self.0 * other.0)
    }

    /// Returns the determinant of the full 3×3 matrix.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.0.determinant()
    }

    /// Inverts this matrix.
    ///
    /// Fails when the determinant is not finite or its magnitude is below
    /// [`DEGENERATE_EPSILON`].
    pub fn invert(&self) -> Result<Self, DegenerateTransform> {
        let determinant = self.determinant();
        if !determinant.is_finite() || determinant.abs() < DEGENERATE_EPSILON {
            return Err(DegenerateTransform { determinant });
        }
        self.0
            .try_inverse()
            .map(Self)
            .ok_or(DegenerateTransform { determinant })
    }

    /// Maps a point through this transform, including the perspective divide.
    #[must_use]
    pub fn transform_point(&self, p: Point) -> Point {
        let v = self.0 * Vector3::new(p.x, p.y, 1.0);
        Point::new(v.x / v.z, v.y / v.z)
    }

    /// Uniform scale factor of the linear part.
    ///
    /// For affine matrices this is `sqrt(|det|)` of the upper-left 2×2 block;
    /// projective matrices are normalized by their bottom-right entry first.
    /// Rotation and flips do not change it.
    #[must_use]
    pub fn linear_scale(&self) -> f64 {
        let m = &self.0;
        let w = m[(2, 2)];
        let det = m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)];
        let scale = det.abs().sqrt();
        if w.abs() > DEGENERATE_EPSILON {
            scale / w.abs()
        } else {
            scale
        }
    }

    /// Returns `true` if every entry differs from `other` by at most `tolerance`.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| (a - b).abs() <= tolerance)
    }
}

impl Mul for Matrix {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.compose(rhs)
    }
}

impl From<Affine> for Matrix {
    fn from(affine: Affine) -> Self {
        Self::from_affine(affine)
    }
}

impl From<[[f64; 3]; 3]> for Matrix {
    fn from(rows: [[f64; 3]; 3]) -> Self {
        Self::from_rows(rows)
    }
}

impl From<Matrix> for [[f64; 3]; 3] {
    fn from(m: Matrix) -> Self {
        m.rows()
    }
}

/// Sine and cosine of an angle in degrees, exact for multiples of 90°.
fn sin_cos_deg(degrees: f64) -> (f64, f64) {
    let turns = degrees.rem_euclid(360.0);
    if turns == 0.0 {
        (0.0, 1.0)
    } else if turns == 90.0 {
        (1.0, 0.0)
    } else if turns == 180.0 {
        (0.0, -1.0)
    } else if turns == 270.0 {
        (-1.0, 0.0)
    } else {
        turns.to_radians().sin_cos()
    }
}
