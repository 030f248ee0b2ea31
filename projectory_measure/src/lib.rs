// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Projectory Measure: interactive measurement lines in pattern space.
//!
//! A measurement line is a pair of pattern-space points plus the distance and
//! angle text shown in its editing fields. [`LineState`] owns the list of
//! lines, the selection, and the endpoint drag in progress, and is driven by
//! [`LineAction`]s:
//!
//! - Pointer presses grab an endpoint, toggle a line's selection, start a new
//!   line (in measuring mode), or clear the selection, in that order of
//!   preference.
//! - Touch targets are a fixed physical size: they shrink in pattern units as
//!   the local transform zooms in.
//! - Dragging with the axis constraint keeps the line horizontal or vertical.
//! - Distance and angle text only move the line once it is a complete number.
//!
//! Pointer positions arrive already mapped into pattern space; see
//! `projectory_view::mapper` for that step.
//!
//! ## Minimal example
//!
//! ```rust
//! use projectory_matrix::PatternPoint;
//! use projectory_measure::{LineAction, LineState, MeasureConfig, PointerContext, Unit};
//!
//! let config = MeasureConfig::default();
//! let mut lines = LineState::new();
//! lines.apply(LineAction::SetMeasuring(true), &config);
//! lines.apply(LineAction::PointerDown(PointerContext::at(PatternPoint::new(0.0, 0.0))), &config);
//! lines.apply(LineAction::PointerMove(PointerContext::at(PatternPoint::new(96.0, 0.0))), &config);
//! lines.apply(LineAction::PointerUp(PointerContext::at(PatternPoint::new(96.0, 0.0))), &config);
//!
//! assert_eq!(lines.lines()[0].label(), "1.000 in 0°");
//!
//! let (lines, _) = lines.reduce(LineAction::SetUnit(Unit::Centimeters), &config);
//! assert_eq!(lines.lines()[0].distance, "2.540");
//! ```

pub mod align;
mod config;
mod engine;
mod line;

pub use config::{MeasureConfig, Unit};
pub use engine::{EndpointDrag, LineAction, LineOutcome, LineState, PointerContext, snap_to_axis};
pub use line::{Line, format_angle, format_distance, parse_complete_number};
