// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Aligning the whole pattern to a measurement line.
//!
//! The reference is the horizontal line through the calibration grid center,
//! running toward +x. These helpers return a new local transform; the line
//! itself stays where it is in pattern space.

use projectory_matrix::{CalibratedPoint, Matrix};

use crate::Line;

/// Rotates and translates the pattern so that `line` starts at `center` and
/// runs along the reference.
///
/// `local` is the current local transform; the result replaces it.
#[must_use]
pub fn align_to_reference(local: Matrix, line: &Line, center: CalibratedPoint) -> Matrix {
    let q0 = local.transform_point(line.anchor().0);
    let q1 = local.transform_point(line.end().0);
    let d = q1 - q0;
    let screen_angle = d.y.atan2(d.x).to_degrees();
    let m = Matrix::translate(center.0.to_vec2())
        * Matrix::rotate_deg(-screen_angle, kurbo::Point::ORIGIN)
        * Matrix::translate(-q0.to_vec2());
    m * local
}

/// Like [`align_to_reference`], then mirrors the pattern across the
/// reference line.
#[must_use]
pub fn flip_along_reference(local: Matrix, line: &Line, center: CalibratedPoint) -> Matrix {
    Matrix::flip_vertical(center.0) * align_to_reference(local, line, center)
}
