// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use projectory_markers::MarkerOverlay;
use projectory_matrix::{DevicePoint, Matrix};
use projectory_view::mapper::pattern_to_screen;
use serde::Serialize;

use crate::Session;

/// How to draw one measurement line.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineOverlay {
    /// Index into the line list.
    pub index: usize,
    /// Device positions of the anchor and the free end.
    pub endpoints: [DevicePoint; 2],
    /// Distance and angle, e.g. `1.000 in 0°`.
    pub label: String,
    /// Whether this is the selected line.
    pub selected: bool,
}

/// Everything needed to draw one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderFrame {
    /// `calibration ∘ local`, for the pattern layer.
    pub matrix: Matrix,
    /// Line overlays in list order.
    pub lines: Vec<LineOverlay>,
    /// Marker overlays in placement order.
    pub markers: Vec<MarkerOverlay>,
}

impl Session {
    /// Derives the frame for the current state.
    #[must_use]
    pub fn render(&self) -> RenderFrame {
        let view = self.view();
        let selected = self.lines().selected();
        let lines = self
            .lines()
            .lines()
            .iter()
            .enumerate()
            .map(|(index, line)| LineOverlay {
                index,
                endpoints: line.points.map(|p| pattern_to_screen(view, p)),
                label: line.label(),
                selected: selected == Some(index),
            })
            .collect();
        let markers = self
            .markers()
            .markers()
            .iter()
            .map(|m| m.overlay(view.calibration(), view.local(), &self.config().markers))
            .collect();
        RenderFrame {
            matrix: view.render_matrix(),
            lines,
            markers,
        }
    }
}
