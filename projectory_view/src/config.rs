// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;
use projectory_matrix::CalibratedPoint;

use crate::FitMode;

/// Tunables for view gestures.
///
/// Lengths are in calibrated units, which share the pattern's 96-per-inch
/// density.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewConfig {
    /// Scale applied to the local transform by the magnify view.
    pub magnify_factor: f64,
    /// Arrow-key nudge distance.
    pub nudge_step: f64,
    /// Arrow-key nudge distance with Shift held.
    pub nudge_step_large: f64,
    /// Size of the calibration grid; rotations, flips, and recentering
    /// pivot on its center.
    pub grid_size: Size,
    /// Placement of the layout inside the zoom-out view.
    pub fit_mode: FitMode,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            magnify_factor: 5.0,
            nudge_step: 96.0 / 16.0,
            nudge_step_large: 96.0 / 2.0,
            grid_size: Size::new(24.0 * 96.0, 18.0 * 96.0),
            fit_mode: FitMode::Center,
        }
    }
}

impl ViewConfig {
    /// Sets the magnify factor.
    #[must_use]
    pub fn with_magnify_factor(mut self, factor: f64) -> Self {
        self.magnify_factor = factor;
        self
    }

    /// Sets the calibration grid size.
    #[must_use]
    pub fn with_grid_size(mut self, size: Size) -> Self {
        self.grid_size = size;
        self
    }

    /// Sets the zoom-out fit mode.
    #[must_use]
    pub fn with_fit_mode(mut self, mode: FitMode) -> Self {
        self.fit_mode = mode;
        self
    }

    /// Center of the calibration grid.
    #[must_use]
    pub fn grid_center(&self) -> CalibratedPoint {
        CalibratedPoint::new(self.grid_size.width / 2.0, self.grid_size.height / 2.0)
    }
}
