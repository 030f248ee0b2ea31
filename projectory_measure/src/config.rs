// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// The unit measurements are displayed in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Unit {
    /// Inches.
    #[default]
    Inches,
    /// Centimeters.
    Centimeters,
}

impl Unit {
    /// How many of this unit make up one inch.
    #[must_use]
    pub const fn per_inch(self) -> f64 {
        match self {
            Self::Inches => 1.0,
            Self::Centimeters => 2.54,
        }
    }

    /// Short label shown after a distance.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Inches => "in",
            Self::Centimeters => "cm",
        }
    }
}

/// Physical sizes used by the line engine.
///
/// Radii and lengths are in inches and are converted to pattern units with
/// [`MeasureConfig::density`], then divided by the local transform's scale so
/// that they stay the same size on the projected surface at any zoom.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MeasureConfig {
    /// Pattern units per inch.
    pub density: f64,
    /// Touch radius around line endpoints.
    pub endpoint_radius: f64,
    /// Touch distance around line bodies; slightly larger than the endpoint radius.
    pub body_radius: f64,
    /// Lines shorter than this on release are replaced by a default line.
    pub min_length: f64,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            density: 96.0,
            endpoint_radius: 0.5,
            body_radius: 0.75,
            min_length: 1.0 / 16.0,
        }
    }
}

impl MeasureConfig {
    /// Sets the density in pattern units per inch.
    #[must_use]
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// Sets the endpoint and body touch radii, in inches.
    #[must_use]
    pub fn with_touch_radii(mut self, endpoint: f64, body: f64) -> Self {
        self.endpoint_radius = endpoint;
        self.body_radius = body;
        self
    }

    /// Sets the minimum line length, in inches.
    #[must_use]
    pub fn with_min_length(mut self, min_length: f64) -> Self {
        self.min_length = min_length;
        self
    }

    /// Endpoint touch radius in pattern units at local scale `scale`.
    #[must_use]
    pub fn endpoint_radius_at(&self, scale: f64) -> f64 {
        self.physical(self.endpoint_radius, scale)
    }

    /// Body touch distance in pattern units at local scale `scale`.
    #[must_use]
    pub fn body_radius_at(&self, scale: f64) -> f64 {
        self.physical(self.body_radius, scale)
    }

    /// Minimum line length in pattern units at local scale `scale`.
    #[must_use]
    pub fn min_length_at(&self, scale: f64) -> f64 {
        self.physical(self.min_length, scale)
    }

    /// Converts a length in `unit` to pattern units.
    #[must_use]
    pub fn length_to_pattern(&self, value: f64, unit: Unit) -> f64 {
        value / unit.per_inch() * self.density
    }

    /// Converts a length in pattern units to `unit`.
    #[must_use]
    pub fn length_in_unit(&self, length: f64, unit: Unit) -> f64 {
        length / self.density * unit.per_inch()
    }

    fn physical(&self, inches: f64, scale: f64) -> f64 {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        inches * self.density / scale
    }
}
