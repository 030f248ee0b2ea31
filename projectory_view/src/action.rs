// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Size, Vec2};
use projectory_matrix::{CalibratedPoint, DegenerateTransform, DevicePoint, Matrix, PatternPoint};
use tracing::warn;

use crate::{Perspective, ViewConfig, ViewState, ViewportRegion, mapper};

/// Everything the view needs besides its own state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewContext {
    /// Size of the full pattern layout in pattern units.
    pub layout: Size,
    /// Device viewport and the menus covering it.
    pub viewport: ViewportRegion,
    /// Gesture tunables.
    pub config: ViewConfig,
}

/// Operations on the transform chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewAction {
    /// Replace the local transform outright. Fails for transforms that
    /// cannot be inverted.
    SetLocal(Matrix),
    /// Translate the pattern in calibrated space.
    Translate(Vec2),
    /// Quarter turn clockwise about the grid center.
    Rotate90,
    /// Mirror left-to-right about the grid center.
    FlipHorizontal,
    /// Mirror top-to-bottom about the grid center.
    FlipVertical,
    /// Pan so that a pattern point sits at the grid center.
    Recenter(PatternPoint),
    /// Enter zoom-out, or leave it if active.
    ToggleZoomOut,
    /// Leave zoom-out if active.
    ExitZoomOut,
    /// While zoomed out: leave zoom-out and recenter on the picked point.
    ZoomOutPick(DevicePoint),
    /// Enter magnify about a point, or leave it if active.
    ToggleMagnify(CalibratedPoint),
    /// Leave magnify if active.
    ExitMagnify,
    /// Back to identity for a newly loaded document.
    ResetLocal,
    /// Install a new calibration, optionally with its own perspective.
    SetCalibration {
        /// Pattern → display transform.
        calibration: Matrix,
        /// Device → calibrated transform; the inverse of `calibration` if absent.
        perspective: Option<Perspective>,
    },
}

impl ViewState {
    /// Applies `action`, leaving the state untouched on error.
    pub fn apply(
        &mut self,
        action: ViewAction,
        ctx: &ViewContext,
    ) -> Result<(), DegenerateTransform> {
        let center = ctx.config.grid_center();
        match action {
            ViewAction::SetLocal(m) => {
                // Every later press maps through the inverse.
                m.invert()?;
                self.set_local_transform(m);
            }
            ViewAction::Translate(delta) => self.translate(delta),
            ViewAction::Rotate90 => self.rotate_90(center),
            ViewAction::FlipHorizontal => self.flip_horizontal(center),
            ViewAction::FlipVertical => self.flip_vertical(center),
            ViewAction::Recenter(p) => self.recenter(p, center),
            ViewAction::ToggleZoomOut => {
                if !self.exit_zoom_out() {
                    self.enter_zoom_out(ctx.layout, &ctx.viewport, ctx.config.fit_mode)?;
                }
            }
            ViewAction::ExitZoomOut => {
                self.exit_zoom_out();
            }
            ViewAction::ZoomOutPick(at) => {
                if self.is_zoomed_out() {
                    let picked = mapper::screen_to_pattern(self, at)?;
                    self.exit_zoom_out();
                    self.recenter(picked, center);
                }
            }
            ViewAction::ToggleMagnify(at) => {
                if !self.exit_magnify() {
                    self.enter_magnify(at, ctx.config.magnify_factor);
                }
            }
            ViewAction::ExitMagnify => {
                self.exit_magnify();
            }
            ViewAction::ResetLocal => self.reset_local(),
            ViewAction::SetCalibration {
                calibration,
                perspective,
            } => self.set_calibration(calibration, perspective)?,
        }
        Ok(())
    }

    /// Pure form of [`ViewState::apply`]: failures are logged and the
    /// previous snapshot is returned unchanged.
    #[must_use]
    pub fn reduce(mut self, action: ViewAction, ctx: &ViewContext) -> Self {
        if let Err(err) = self.apply(action, ctx) {
            warn!(?action, %err, "view action aborted");
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;
    use projectory_matrix::{DevicePoint, Matrix, PatternPoint};

    use super::{ViewAction, ViewContext};
    use crate::mapper::{pattern_to_calibrated, pattern_to_screen};
    use crate::{ViewConfig, ViewState, ViewportRegion};

    fn ctx() -> ViewContext {
        ViewContext {
            layout: Size::new(960.0, 480.0),
            viewport: ViewportRegion::new(Size::new(1200.0, 900.0)),
            config: ViewConfig::default(),
        }
    }

    #[test]
    fn toggling_zoom_out_twice_is_identity() {
        let ctx = ctx();
        let view = ViewState::default().reduce(ViewAction::Rotate90, &ctx);
        let before = view.clone();

        let view = view.reduce(ViewAction::ToggleZoomOut, &ctx);
        assert!(view.is_zoomed_out());
        let view = view.reduce(ViewAction::ToggleZoomOut, &ctx);
        assert_eq!(view, before);
    }

    #[test]
    fn zoom_out_pick_recenters_on_grid_center() {
        let ctx = ctx();
        let view = ViewState::default().reduce(ViewAction::ToggleZoomOut, &ctx);
        let target = PatternPoint::new(700.0, 100.0);
        let device = pattern_to_screen(&view, target);

        let view = view.reduce(ViewAction::ZoomOutPick(device), &ctx);
        assert!(!view.is_zoomed_out());
        let shown = pattern_to_calibrated(&view, target);
        assert!(shown.distance(ctx.config.grid_center()) < 1e-6);
    }

    #[test]
    fn zoom_out_pick_outside_zoom_out_does_nothing() {
        let ctx = ctx();
        let view = ViewState::default();
        let after = view.clone().reduce(ViewAction::ZoomOutPick(DevicePoint::new(4.0, 4.0)), &ctx);
        assert_eq!(after, view);
    }

    #[test]
    fn failed_action_keeps_previous_snapshot() {
        let ctx = ctx();
        let view = ViewState::default().reduce(ViewAction::Rotate90, &ctx);
        let after = view.clone().reduce(
            ViewAction::SetCalibration {
                calibration: Matrix::scale(0.0),
                perspective: None,
            },
            &ctx,
        );
        assert_eq!(after, view);
    }

    #[test]
    fn reset_local_ends_temporary_view() {
        let ctx = ctx();
        let view = ViewState::default()
            .reduce(ViewAction::FlipHorizontal, &ctx)
            .reduce(ViewAction::ToggleMagnify(ctx.config.grid_center()), &ctx)
            .reduce(ViewAction::ResetLocal, &ctx);
        assert!(view.temporary().is_none());
        assert_eq!(view.local(), Matrix::identity());
    }

    #[test]
    fn singular_or_non_finite_local_is_rejected() {
        let ctx = ctx();
        let view = ViewState::default().reduce(ViewAction::Rotate90, &ctx);
        let nan = Matrix::from_rows([[1.0, 0.0, f64::NAN], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        for bad in [Matrix::scale(0.0), nan] {
            let mut applied = view.clone();
            assert!(applied.apply(ViewAction::SetLocal(bad), &ctx).is_err());
            assert_eq!(applied, view);
            assert_eq!(view.clone().reduce(ViewAction::SetLocal(bad), &ctx), view);
        }
    }
}
