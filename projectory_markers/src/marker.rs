// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Vec2;
use projectory_matrix::{DevicePoint, Matrix, PatternPoint};

/// Identifier of a placed marker.
///
/// Ids are allocated from a counter that only grows, so an id is never
/// reused within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MarkerId(pub u64);

/// A point marker in pattern space.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Marker {
    /// Stable identifier.
    pub id: MarkerId,
    /// Where the marker was placed.
    pub position: PatternPoint,
    /// Host timestamp at placement, in milliseconds.
    pub created_at: u64,
}

/// Marker sizing.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MarkerConfig {
    /// Rendered glyph diameter in pattern units.
    pub diameter: f64,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self { diameter: 288.0 }
    }
}

impl MarkerConfig {
    /// Sets the glyph diameter.
    #[must_use]
    pub fn with_diameter(mut self, diameter: f64) -> Self {
        self.diameter = diameter;
        self
    }

    /// A clearing click removes the nearest marker within this distance.
    #[must_use]
    pub fn removal_radius(&self) -> f64 {
        self.diameter / 2.0
    }
}

/// Where and how to draw one marker.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarkerOverlay {
    /// The marker drawn.
    pub id: MarkerId,
    /// Device position of the marker.
    pub anchor: DevicePoint,
    /// Maps glyph coordinates (centered on the origin, in pattern units) to
    /// the device.
    pub glyph: Matrix,
    /// Glyph diameter after the local scale, in calibrated units.
    pub diameter: f64,
}

impl Marker {
    /// Computes the overlay for this marker.
    ///
    /// The anchor follows `calibration ∘ local`. The glyph only picks up the
    /// local transform's scale, so it is never rotated or mirrored:
    /// `calibration ∘ translate(local(position)) ∘ scale(local scale)`.
    #[must_use]
    pub fn overlay(
        &self,
        calibration: Matrix,
        local: Matrix,
        config: &MarkerConfig,
    ) -> MarkerOverlay {
        let placed = local.transform_point(self.position.0);
        let scale = local.linear_scale();
        MarkerOverlay {
            id: self.id,
            anchor: DevicePoint(calibration.transform_point(placed)),
            glyph: calibration * Matrix::translate(placed.to_vec2()) * Matrix::scale(scale),
            diameter: config.diameter * scale,
        }
    }
}

impl MarkerOverlay {
    /// Device position of a point given in glyph coordinates.
    #[must_use]
    pub fn glyph_point(&self, offset: Vec2) -> DevicePoint {
        DevicePoint(self.glyph.transform_point(offset.to_point()))
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};
    use projectory_matrix::{Matrix, PatternPoint};

    use super::{Marker, MarkerConfig, MarkerId};

    fn marker() -> Marker {
        Marker {
            id: MarkerId(1),
            position: PatternPoint::new(100.0, 200.0),
            created_at: 0,
        }
    }

    #[test]
    fn removal_radius_is_half_the_diameter() {
        assert_eq!(MarkerConfig::default().removal_radius(), 144.0);
        assert_eq!(MarkerConfig::default().with_diameter(10.0).removal_radius(), 5.0);
    }

    #[test]
    fn glyph_ignores_rotation_and_flip() {
        let calibration = Matrix::translate(Vec2::new(7.0, -3.0));
        let local = Matrix::flip_horizontal(Point::new(50.0, 0.0))
            * Matrix::rotate_deg(90.0, Point::ORIGIN)
            * Matrix::scale(2.0);
        let overlay = marker().overlay(calibration, local, &MarkerConfig::default());

        let expected = calibration.transform_point(local.transform_point(Point::new(100.0, 200.0)));
        assert!(overlay.anchor.0.distance(expected) < 1e-9);
        assert!(overlay.glyph_point(Vec2::ZERO).distance(overlay.anchor) < 1e-9);

        // A glyph offset to the right stays to the right, only scaled.
        let right = overlay.glyph_point(Vec2::new(10.0, 0.0));
        assert!((right.x() - overlay.anchor.x() - 20.0).abs() < 1e-9);
        assert!((right.y() - overlay.anchor.y()).abs() < 1e-9);
        assert!((overlay.diameter - 576.0).abs() < 1e-9);
    }
}
