// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Vec2;
use projectory_matrix::PatternPoint;

use crate::{MeasureConfig, Unit};

/// A measurement line in pattern space.
///
/// `points[0]` is the anchor and `points[1]` the free end; endpoint drags
/// always move `points[1]`. The `distance` and `angle` strings are what the
/// editing fields show. They follow the geometry except while the user is
/// typing text that is not yet a complete number.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// Anchor and free end.
    pub points: [PatternPoint; 2],
    /// Displayed length in `unit`, three decimals.
    pub distance: String,
    /// Displayed angle in whole degrees, counterclockwise from the +x axis.
    pub angle: String,
    /// Unit of `distance`.
    pub unit: Unit,
}

impl Line {
    /// Creates a line with display strings derived from its geometry.
    #[must_use]
    pub fn new(p0: PatternPoint, p1: PatternPoint, unit: Unit, config: &MeasureConfig) -> Self {
        let mut line = Self {
            points: [p0, p1],
            distance: String::new(),
            angle: String::new(),
            unit,
        };
        line.refresh(config);
        line
    }

    /// The fixed endpoint.
    #[must_use]
    pub fn anchor(&self) -> PatternPoint {
        self.points[0]
    }

    /// The free endpoint.
    #[must_use]
    pub fn end(&self) -> PatternPoint {
        self.points[1]
    }

    /// Vector from the anchor to the free end.
    #[must_use]
    pub fn vector(&self) -> Vec2 {
        self.points[1] - self.points[0]
    }

    /// Length in pattern units.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.vector().hypot()
    }

    /// Unrounded angle in degrees in `[0, 360)`, measured with y pointing up.
    #[must_use]
    pub fn precise_angle(&self) -> f64 {
        let v = self.vector();
        let degrees = (-v.y).atan2(v.x).to_degrees().rem_euclid(360.0);
        if degrees >= 360.0 { 0.0 } else { degrees }
    }

    /// Distance and angle as shown next to the line, e.g. `1.000 in 0°`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {} {}°", self.distance, self.unit.suffix(), self.angle)
    }

    /// Re-derives both display strings from the geometry.
    pub fn refresh(&mut self, config: &MeasureConfig) {
        self.distance = format_distance(config.length_in_unit(self.length(), self.unit));
        self.angle = format_angle(self.precise_angle());
    }

    /// Changes the display unit.
    pub fn set_unit(&mut self, unit: Unit, config: &MeasureConfig) {
        self.unit = unit;
        self.refresh(config);
    }

    /// Exchanges the anchor and the free end.
    pub fn swap_ends(&mut self) {
        self.points.swap(0, 1);
    }

    /// Stores edited distance text.
    ///
    /// When the text is a complete non-negative number, the free end moves
    /// along the current direction to the new length. Otherwise only the
    /// text changes. Returns `true` if the geometry moved.
    pub fn set_distance_text(&mut self, text: &str, config: &MeasureConfig) -> bool {
        self.distance = text.to_owned();
        let Some(value) = parse_complete_number(text, false) else {
            return false;
        };
        let v = self.vector();
        let current = v.hypot();
        let direction = if current > 0.0 {
            v / current
        } else {
            Vec2::new(1.0, 0.0)
        };
        self.points[1] = self.points[0] + direction * config.length_to_pattern(value, self.unit);
        true
    }

    /// Stores edited angle text.
    ///
    /// When the text is a complete number, the free end rotates about the
    /// anchor to the new angle, keeping the current length. Otherwise only
    /// the text changes. Returns `true` if the geometry moved.
    pub fn set_angle_text(&mut self, text: &str) -> bool {
        self.angle = text.to_owned();
        let Some(degrees) = parse_complete_number(text, true) else {
            return false;
        };
        // Screen y grows downward, so the entered angle runs the other way.
        let (sin, cos) = (360.0 - degrees).to_radians().sin_cos();
        self.points[1] = self.points[0] + Vec2::new(cos, sin) * self.length();
        true
    }
}

/// Formats a length for display.
#[must_use]
pub fn format_distance(value: f64) -> String {
    format!("{value:.3}")
}

/// Formats an angle in degrees as a whole number in `[0, 360)`.
#[must_use]
pub fn format_angle(degrees: f64) -> String {
    // Adding zero turns -0.0 into 0.0.
    let shown = degrees.round().rem_euclid(360.0) + 0.0;
    format!("{shown:.0}")
}

/// Parses text the editing fields accept as a finished number.
///
/// Accepts ASCII digits with at most one decimal point that has digits on
/// both sides, optionally preceded by `-` when `allow_negative` is set.
/// Anything else, including partial input such as `"1."` or `"-"`, yields
/// `None`.
#[must_use]
pub fn parse_complete_number(text: &str, allow_negative: bool) -> Option<f64> {
    let body = match text.strip_prefix('-') {
        Some(rest) if allow_negative => rest,
        Some(_) => return None,
        None => text,
    };
    let (whole, fraction) = match body.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (body, None),
    };
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(whole) || fraction.is_some_and(|f| !digits(f)) {
        return None;
    }
    text.parse().ok()
}
