// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use projectory_markers::MarkerConfig;
use projectory_measure::MeasureConfig;
use projectory_view::ViewConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while loading a [`Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The text was not valid configuration JSON.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A length or factor that must be positive was not.
    #[error("`{field}` must be positive and finite, got {value}")]
    NotPositive {
        /// Dotted path of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
}

/// Tunables for every subsystem of a session.
///
/// Missing fields take their defaults, so `{}` is a valid configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Line engine sizes and density.
    pub measure: MeasureConfig,
    /// Marker sizes.
    pub markers: MarkerConfig,
    /// View gestures and calibration grid.
    pub view: ViewConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the line engine configuration.
    #[must_use]
    pub fn with_measure(mut self, measure: MeasureConfig) -> Self {
        self.measure = measure;
        self
    }

    /// Sets the marker configuration.
    #[must_use]
    pub fn with_markers(mut self, markers: MarkerConfig) -> Self {
        self.markers = markers;
        self
    }

    /// Sets the view configuration.
    #[must_use]
    pub fn with_view(mut self, view: ViewConfig) -> Self {
        self.view = view;
        self
    }

    /// Checks that every length and factor is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("measure.density", self.measure.density),
            ("measure.endpoint_radius", self.measure.endpoint_radius),
            ("measure.body_radius", self.measure.body_radius),
            ("measure.min_length", self.measure.min_length),
            ("markers.diameter", self.markers.diameter),
            ("view.magnify_factor", self.view.magnify_factor),
            ("view.nudge_step", self.view.nudge_step),
            ("view.nudge_step_large", self.view.nudge_step_large),
            ("view.grid_size.width", self.view.grid_size.width),
            ("view.grid_size.height", self.view.grid_size.height),
        ];
        match checks
            .into_iter()
            .find(|(_, value)| !(value.is_finite() && *value > 0.0))
        {
            Some((field, value)) => Err(ConfigError::NotPositive { field, value }),
            None => Ok(()),
        }
    }
}
