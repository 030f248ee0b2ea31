// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Insets, Rect, Size, Vec2};
use projectory_matrix::Matrix;

/// How fitted content should be positioned inside the available region.
///
/// Consulted by [`fit_transform`] and therefore by the zoom-out view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FitMode {
    /// Center the fitted content within the region.
    #[default]
    Center,
    /// Align the content's minimum corner with the region's origin.
    AlignMin,
}

/// The device-space area available for a fitted view.
///
/// Side menus that are open cover part of the viewport; they are expressed
/// as insets from its edges.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportRegion {
    /// Full viewport size in device pixels.
    pub size: Size,
    /// Space taken by open menus along each edge.
    pub insets: Insets,
}

impl Default for ViewportRegion {
    fn default() -> Self {
        Self::new(Size::new(1920.0, 1080.0))
    }
}

impl ViewportRegion {
    /// A region covering the whole viewport.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            insets: Insets::ZERO,
        }
    }

    /// Returns a copy with the given menu insets.
    #[must_use]
    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    /// The uncovered part of the viewport.
    #[must_use]
    pub fn available(&self) -> Rect {
        Rect::new(
            self.insets.x0,
            self.insets.y0,
            self.size.width - self.insets.x1,
            self.size.height - self.insets.y1,
        )
    }
}

/// Transform that scales `content` uniformly to fit inside `target`.
///
/// Aspect ratio is preserved. Returns `None` when either rectangle is empty.
#[must_use]
pub fn fit_transform(content: Rect, target: Rect, mode: FitMode) -> Option<Matrix> {
    if content.width() <= 0.0 || content.height() <= 0.0 {
        return None;
    }
    if target.width() <= 0.0 || target.height() <= 0.0 {
        return None;
    }

    let sx = target.width() / content.width();
    let sy = target.height() / content.height();
    let zoom = sx.min(sy);

    // Choose the offset so that either the content is centered or its
    // minimum corner lands on the target origin.
    let offset: Vec2 = match mode {
        FitMode::Center => target.center().to_vec2() - content.center().to_vec2() * zoom,
        FitMode::AlignMin => target.origin().to_vec2() - content.origin().to_vec2() * zoom,
    };
    Some(Matrix::translate(offset) * Matrix::scale(zoom))
}

#[cfg(test)]
mod tests {
    use kurbo::{Insets, Point, Rect, Size};

    use super::{FitMode, ViewportRegion, fit_transform};

    #[test]
    fn center_fit_respects_aspect_ratio() {
        let content = Rect::new(-50.0, -25.0, 50.0, 25.0);
        let target = Rect::new(0.0, 0.0, 200.0, 200.0);
        let m = fit_transform(content, target, FitMode::Center).unwrap();

        let min = m.transform_point(Point::new(-50.0, -25.0));
        let max = m.transform_point(Point::new(50.0, 25.0));
        assert!((min.x - 0.0).abs() < 1e-9);
        assert!((max.x - 200.0).abs() < 1e-9);
        assert!((min.y - 50.0).abs() < 1e-9);
        assert!((max.y - 150.0).abs() < 1e-9);
    }

    #[test]
    fn align_min_maps_min_corner_to_origin() {
        let content = Rect::new(-50.0, -20.0, 150.0, 80.0);
        let target = Rect::new(10.0, 20.0, 210.0, 120.0);
        let m = fit_transform(content, target, FitMode::AlignMin).unwrap();

        let origin = m.transform_point(content.origin());
        assert!((origin.x - 10.0).abs() < 1e-9);
        assert!((origin.y - 20.0).abs() < 1e-9);
    }

    #[test]
    fn empty_rects_do_not_fit() {
        let target = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(fit_transform(Rect::new(0.0, 0.0, 0.0, 5.0), target, FitMode::Center).is_none());
        assert!(fit_transform(target, Rect::ZERO, FitMode::Center).is_none());
    }

    #[test]
    fn insets_shrink_available_region() {
        let region = ViewportRegion::new(Size::new(800.0, 600.0))
            .with_insets(Insets::new(200.0, 50.0, 0.0, 0.0));
        assert_eq!(region.available(), Rect::new(200.0, 50.0, 800.0, 600.0));
    }
}
