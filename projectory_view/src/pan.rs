// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use projectory_event_state::drag::DragState;
use projectory_matrix::{CalibratedPoint, DevicePoint, Matrix};

use crate::{ViewState, mapper};

/// A pan gesture in progress.
///
/// The local transform is rebuilt on every move from the transform captured
/// at the start plus the total displacement since then:
/// `local = translate(total) ∘ transform_start`.
#[derive(Clone, Copy, Debug)]
pub struct PanGesture {
    drag: DragState<CalibratedPoint>,
    transform_start: Matrix,
}

impl PanGesture {
    /// Starts panning from a device point.
    #[must_use]
    pub fn begin(view: &ViewState, at: DevicePoint) -> Self {
        let mut drag = DragState::default();
        drag.start(mapper::device_to_calibrated(view, at));
        Self {
            drag,
            transform_start: view.local(),
        }
    }

    /// The local transform captured when the gesture began.
    #[must_use]
    pub fn transform_start(&self) -> Matrix {
        self.transform_start
    }

    /// Moves the pan to `at`, updating the view's local transform.
    pub fn update(&mut self, view: &mut ViewState, at: DevicePoint) {
        let calibrated = mapper::device_to_calibrated(view, at);
        self.drag.update(calibrated);
        if let Some(total) = self.drag.total_offset(calibrated) {
            view.set_local_transform(Matrix::translate(total) * self.transform_start);
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};
    use projectory_matrix::{DevicePoint, Matrix};

    use super::PanGesture;
    use crate::ViewState;
    use crate::mapper::{pattern_to_screen, screen_to_pattern};

    #[test]
    fn pan_follows_total_displacement() {
        let cal = Matrix::scale(2.0);
        let mut view = ViewState::new(cal).unwrap();
        view.set_local_transform(Matrix::rotate_deg(45.0, Point::ORIGIN));

        let start = DevicePoint::new(100.0, 100.0);
        let grabbed = screen_to_pattern(&view, start).unwrap();
        let mut pan = PanGesture::begin(&view, start);

        // Many small moves end where the pointer is, with no accumulated drift.
        for i in 1..=500 {
            let t = f64::from(i) / 500.0;
            pan.update(&mut view, DevicePoint::new(100.0 + 37.3 * t, 100.0 - 12.9 * t));
        }
        let end = DevicePoint::new(137.3, 87.1);
        pan.update(&mut view, end);

        assert!(pattern_to_screen(&view, grabbed).distance(end) < 1e-9);
        let expected = Matrix::translate(Vec2::new(37.3 / 2.0, -12.9 / 2.0)) * pan.transform_start();
        assert!(view.local().approx_eq(&expected, 1e-9));
    }

    #[test]
    fn pan_back_to_start_restores_local() {
        let mut view = ViewState::default();
        let before = view.local();
        let mut pan = PanGesture::begin(&view, DevicePoint::new(5.0, 5.0));
        pan.update(&mut view, DevicePoint::new(50.0, -20.0));
        pan.update(&mut view, DevicePoint::new(5.0, 5.0));
        assert_eq!(view.local(), before);
    }
}
