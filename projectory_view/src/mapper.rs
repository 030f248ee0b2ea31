// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate mapping through the transform chain.
//!
//! ```text
//!            perspective               local⁻¹
//! device ─────────────────▶ calibrated ───────▶ pattern
//!        ◀───────────────────────────────────────
//!                calibration ∘ local
//! ```
//!
//! Every function reads the current transforms from the [`ViewState`] it is
//! given. The local transform changes on every move of a pan gesture, so
//! nothing here is cached.

use projectory_matrix::{CalibratedPoint, DegenerateTransform, DevicePoint, Matrix, PatternPoint};

use crate::ViewState;

/// Device → calibrated mapping supplied alongside a calibration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Perspective(Matrix);

impl Perspective {
    /// Wraps a device → calibrated matrix supplied by the calibration step.
    #[must_use]
    pub const fn new(matrix: Matrix) -> Self {
        Self(matrix)
    }

    /// Derives the perspective as the inverse of a calibration transform.
    pub fn from_calibration(calibration: &Matrix) -> Result<Self, DegenerateTransform> {
        calibration.invert().map(Self)
    }

    /// The underlying matrix.
    #[must_use]
    pub fn matrix(&self) -> Matrix {
        self.0
    }

    /// Maps a device point into calibrated space.
    #[must_use]
    pub fn apply(&self, device: DevicePoint) -> CalibratedPoint {
        CalibratedPoint(self.0.transform_point(device.0))
    }
}

/// Maps a device point into pattern space.
///
/// Fails when the local transform is singular; callers should drop the
/// current event rather than act on a bogus point.
pub fn screen_to_pattern(
    view: &ViewState,
    device: DevicePoint,
) -> Result<PatternPoint, DegenerateTransform> {
    let calibrated = device_to_calibrated(view, device);
    calibrated_to_pattern(view, calibrated)
}

/// Maps a pattern point to the device position where it is displayed.
#[must_use]
pub fn pattern_to_screen(view: &ViewState, pattern: PatternPoint) -> DevicePoint {
    DevicePoint(view.render_matrix().transform_point(pattern.0))
}

/// Maps a device point into calibrated space.
#[must_use]
pub fn device_to_calibrated(view: &ViewState, device: DevicePoint) -> CalibratedPoint {
    view.perspective().apply(device)
}

/// Maps a pattern point through the local transform.
#[must_use]
pub fn pattern_to_calibrated(view: &ViewState, pattern: PatternPoint) -> CalibratedPoint {
    CalibratedPoint(view.local().transform_point(pattern.0))
}

/// Maps a calibrated point back into pattern space.
pub fn calibrated_to_pattern(
    view: &ViewState,
    calibrated: CalibratedPoint,
) -> Result<PatternPoint, DegenerateTransform> {
    let inverse = view.local().invert()?;
    Ok(PatternPoint(inverse.transform_point(calibrated.0)))
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};
    use projectory_matrix::{DevicePoint, Matrix, PatternPoint};

    use super::{Perspective, pattern_to_screen, screen_to_pattern};
    use crate::ViewState;

    fn calibration() -> Matrix {
        Matrix::from_rows([[0.8, 0.05, 120.0], [-0.02, 0.75, 40.0], [0.0001, 0.00005, 1.0]])
    }

    #[test]
    fn roundtrip_through_projective_chain() {
        let mut view = ViewState::new(calibration()).unwrap();
        view.set_local_transform(
            Matrix::rotate_deg(30.0, Point::new(200.0, 100.0))
                * Matrix::translate(Vec2::new(-15.0, 60.0)),
        );

        for p in [
            PatternPoint::new(0.0, 0.0),
            PatternPoint::new(96.0, 0.0),
            PatternPoint::new(-300.0, 845.5),
        ] {
            let back = screen_to_pattern(&view, pattern_to_screen(&view, p)).unwrap();
            assert!(back.distance(p) < 1e-6, "{back:?} != {p:?}");
        }
    }

    #[test]
    fn singular_local_transform_is_reported() {
        let mut view = ViewState::default();
        view.set_local_transform(Matrix::scale(0.0));
        assert!(screen_to_pattern(&view, DevicePoint::new(1.0, 1.0)).is_err());
    }

    #[test]
    fn perspective_is_inverse_of_calibration() {
        let cal = calibration();
        let perspective = Perspective::from_calibration(&cal).unwrap();
        let p = Point::new(10.0, 20.0);
        let back = perspective.apply(DevicePoint(cal.transform_point(p)));
        assert!(back.0.distance(p) < 1e-9);
    }
}
