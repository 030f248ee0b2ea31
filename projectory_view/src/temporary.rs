// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use projectory_matrix::Matrix;

use crate::Perspective;

/// The two temporary views layered on the transform chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TemporaryMode {
    /// The whole layout is fitted into the viewport by replacing calibration.
    ZoomOut,
    /// The local transform is scaled about a point.
    Magnify,
}

/// Transform state captured when a temporary view is entered.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RestoreTransforms {
    /// Local transform before the temporary view.
    pub local: Matrix,
    /// Calibration transform before the temporary view.
    pub calibration: Matrix,
    /// Perspective before the temporary view.
    pub perspective: Perspective,
}

/// An active temporary view and the state needed to undo it exactly.
///
/// Holding the mode and its snapshot in one value means a snapshot exists
/// exactly when a temporary view is active, and only one can be.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemporaryView {
    /// Which view is active.
    pub mode: TemporaryMode,
    /// What to restore when it ends.
    pub restore: RestoreTransforms,
}
