// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Size, Vec2};
use projectory_matrix::{
    CalibratedPoint, DegenerateTransform, Matrix, PatternPoint, bounding_box, rect_corners,
};
use tracing::debug;

use crate::fit::{FitMode, ViewportRegion, fit_transform};
use crate::temporary::{RestoreTransforms, TemporaryMode, TemporaryView};
use crate::{Perspective, mapper};

/// The transform chain between pattern space and the display.
///
/// `ViewState` is the single writer of the calibration transform, its
/// perspective, the local transform, and the temporary-view snapshot.
///
/// - The **calibration** maps pattern space onto the projected surface.
/// - The **perspective** maps device points back into calibrated space.
/// - The **local** transform holds the user's pan/rotate/flip/magnify.
///
/// Zoom-out and magnify are temporary: entering one captures the transforms
/// and exiting restores them exactly.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewState {
    calibration: Matrix,
    perspective: Perspective,
    local: Matrix,
    temporary: Option<TemporaryView>,
}

impl ViewState {
    /// Creates a view for `calibration`, deriving the perspective as its inverse.
    pub fn new(calibration: Matrix) -> Result<Self, DegenerateTransform> {
        let perspective = Perspective::from_calibration(&calibration)?;
        Ok(Self::with_perspective(calibration, perspective))
    }

    /// Creates a view from a calibration and an externally supplied perspective.
    #[must_use]
    pub fn with_perspective(calibration: Matrix, perspective: Perspective) -> Self {
        Self {
            calibration,
            perspective,
            local: Matrix::identity(),
            temporary: None,
        }
    }

    /// The current calibration transform (pattern → display).
    #[must_use]
    pub fn calibration(&self) -> Matrix {
        self.calibration
    }

    /// The current perspective (device → calibrated).
    #[must_use]
    pub fn perspective(&self) -> Perspective {
        self.perspective
    }

    /// The current local transform.
    #[must_use]
    pub fn local(&self) -> Matrix {
        self.local
    }

    /// The local transform the user has built, ignoring any temporary view.
    #[must_use]
    pub fn user_local(&self) -> Matrix {
        self.temporary.map_or(self.local, |t| t.restore.local)
    }

    /// The matrix applied to the visual layer: `calibration ∘ local`.
    #[must_use]
    pub fn render_matrix(&self) -> Matrix {
        self.calibration * self.local
    }

    /// Scale factor of the local transform, used to keep touch targets a
    /// constant physical size.
    #[must_use]
    pub fn local_scale(&self) -> f64 {
        self.local.linear_scale()
    }

    /// The active temporary view, if any.
    #[must_use]
    pub fn temporary(&self) -> Option<&TemporaryView> {
        self.temporary.as_ref()
    }

    /// The captured transforms, present exactly while a temporary view is active.
    #[must_use]
    pub fn restore_transforms(&self) -> Option<&RestoreTransforms> {
        self.temporary.as_ref().map(|t| &t.restore)
    }

    /// Which temporary view is active, if any.
    #[must_use]
    pub fn temporary_mode(&self) -> Option<TemporaryMode> {
        self.temporary.map(|t| t.mode)
    }

    /// Returns `true` while the zoom-out view is active.
    #[must_use]
    pub fn is_zoomed_out(&self) -> bool {
        self.temporary_mode() == Some(TemporaryMode::ZoomOut)
    }

    /// Returns `true` while the magnify view is active.
    #[must_use]
    pub fn is_magnifying(&self) -> bool {
        self.temporary_mode() == Some(TemporaryMode::Magnify)
    }

    /// Replaces the local transform.
    ///
    /// `local` is taken as is. Input from outside the engine should go through
    /// [`ViewAction::SetLocal`](crate::ViewAction::SetLocal), which rejects
    /// transforms that cannot be inverted.
    pub fn set_local_transform(&mut self, local: Matrix) {
        self.local = local;
    }

    /// Applies `m` after the current local transform: `local = m ∘ local`.
    pub fn apply_to_local(&mut self, m: Matrix) {
        self.local = m * self.local;
    }

    /// Translates the pattern by `delta` in calibrated space.
    pub fn translate(&mut self, delta: Vec2) {
        self.apply_to_local(Matrix::translate(delta));
    }

    /// Rotates the pattern a quarter turn clockwise about `center`.
    pub fn rotate_90(&mut self, center: CalibratedPoint) {
        self.apply_to_local(Matrix::rotate_deg(90.0, center.0));
    }

    /// Mirrors the pattern left-to-right about `center`.
    pub fn flip_horizontal(&mut self, center: CalibratedPoint) {
        self.apply_to_local(Matrix::flip_horizontal(center.0));
    }

    /// Mirrors the pattern top-to-bottom about `center`.
    pub fn flip_vertical(&mut self, center: CalibratedPoint) {
        self.apply_to_local(Matrix::flip_vertical(center.0));
    }

    /// Pans so that `pattern` is displayed at `target`.
    pub fn recenter(&mut self, pattern: PatternPoint, target: CalibratedPoint) {
        let current = mapper::pattern_to_calibrated(self, pattern);
        self.translate(target - current);
    }

    /// Replaces the calibration.
    ///
    /// Without an explicit perspective, the inverse of `calibration` is used.
    /// Any temporary view is ended first so that its snapshot never refers to
    /// a stale calibration.
    pub fn set_calibration(
        &mut self,
        calibration: Matrix,
        perspective: Option<Perspective>,
    ) -> Result<(), DegenerateTransform> {
        let perspective = match perspective {
            Some(p) => p,
            None => Perspective::from_calibration(&calibration)?,
        };
        self.end_temporary();
        self.calibration = calibration;
        self.perspective = perspective;
        Ok(())
    }

    /// Resets the local transform for a newly loaded document.
    pub fn reset_local(&mut self) {
        self.end_temporary();
        self.local = Matrix::identity();
    }

    /// Enters the zoom-out view.
    ///
    /// The `layout` rectangle, as currently placed by the local transform, is
    /// fitted into the available part of `viewport`. The fit becomes the
    /// calibration and the local transform is reset to identity. Does nothing
    /// if already zoomed out; ends magnify first if it is active.
    ///
    /// Returns `Ok(true)` if the view changed.
    pub fn enter_zoom_out(
        &mut self,
        layout: Size,
        viewport: &ViewportRegion,
        mode: FitMode,
    ) -> Result<bool, DegenerateTransform> {
        if self.is_zoomed_out() {
            return Ok(false);
        }

        let local = self.user_local();
        let corners = rect_corners(layout.width, layout.height).map(|p| local.transform_point(p));
        let Some(fit) = bounding_box(corners)
            .and_then(|bbox| fit_transform(bbox, viewport.available(), mode))
        else {
            return Err(DegenerateTransform { determinant: 0.0 });
        };
        let calibration = fit * local;
        let perspective = Perspective::from_calibration(&calibration)?;

        self.end_temporary();
        self.temporary = Some(TemporaryView {
            mode: TemporaryMode::ZoomOut,
            restore: self.capture(),
        });
        self.calibration = calibration;
        self.perspective = perspective;
        self.local = Matrix::identity();
        debug!(?layout, "entered zoom-out");
        Ok(true)
    }

    /// Leaves the zoom-out view. Returns `true` if it was active.
    pub fn exit_zoom_out(&mut self) -> bool {
        self.exit(TemporaryMode::ZoomOut)
    }

    /// Enters the magnify view, scaling the local transform by `factor`
    /// about `at`. Does nothing if already magnifying; ends zoom-out first if
    /// it is active.
    ///
    /// Returns `true` if the view changed.
    pub fn enter_magnify(&mut self, at: CalibratedPoint, factor: f64) -> bool {
        if self.is_magnifying() {
            return false;
        }
        self.end_temporary();
        self.temporary = Some(TemporaryView {
            mode: TemporaryMode::Magnify,
            restore: self.capture(),
        });
        self.apply_to_local(Matrix::scale_about_point(factor, at.0));
        debug!(?at, factor, "entered magnify");
        true
    }

    /// Leaves the magnify view. Returns `true` if it was active.
    pub fn exit_magnify(&mut self) -> bool {
        self.exit(TemporaryMode::Magnify)
    }

    /// Ends whichever temporary view is active, restoring its snapshot.
    ///
    /// Returns the mode that was ended.
    pub fn end_temporary(&mut self) -> Option<TemporaryMode> {
        let view = self.temporary.take()?;
        self.local = view.restore.local;
        self.calibration = view.restore.calibration;
        self.perspective = view.restore.perspective;
        debug!(mode = ?view.mode, "restored transforms");
        Some(view.mode)
    }

    fn exit(&mut self, mode: TemporaryMode) -> bool {
        if self.temporary_mode() == Some(mode) {
            self.end_temporary();
            true
        } else {
            false
        }
    }

    fn capture(&self) -> RestoreTransforms {
        RestoreTransforms {
            local: self.local,
            calibration: self.calibration,
            perspective: self.perspective,
        }
    }
}
