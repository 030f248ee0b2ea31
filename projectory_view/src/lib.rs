// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Projectory View: the transform chain between a pattern and its projection.
//!
//! This crate provides a small, headless model of how a document is shown on
//! a calibrated projector. It focuses on:
//! - Transform state: calibration, perspective, and the user's local
//!   pan/rotate/flip transform ([`ViewState`]).
//! - Temporary views that can be undone exactly: zoom-out (fit the whole
//!   layout into the viewport) and magnify (scale about a point).
//! - Coordinate conversion between device, calibrated, and pattern space
//!   ([`mapper`]).
//! - Drift-free pan gestures ([`PanGesture`]).
//!
//! It does **not** render anything or compute calibrations. Callers are
//! expected to:
//! - Derive the calibration from a four-corner correspondence elsewhere.
//! - Feed pointer input through [`mapper::screen_to_pattern`] before
//!   hit testing pattern-space content.
//! - Apply [`ViewState::render_matrix`] to their visual layer.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use projectory_matrix::{Matrix, PatternPoint};
//! use projectory_view::{ViewAction, ViewConfig, ViewContext, ViewState, ViewportRegion, mapper};
//!
//! let view = ViewState::new(Matrix::scale(2.0)).unwrap();
//! let ctx = ViewContext {
//!     layout: Size::new(960.0, 480.0),
//!     viewport: ViewportRegion::new(Size::new(1280.0, 800.0)),
//!     config: ViewConfig::default(),
//! };
//!
//! let view = view.reduce(ViewAction::Rotate90, &ctx);
//! let p = PatternPoint::new(10.0, 20.0);
//! let shown = mapper::pattern_to_screen(&view, p);
//! let back = mapper::screen_to_pattern(&view, shown).unwrap();
//! assert!(back.distance(p) < 1e-9);
//!
//! // Magnify is temporary and exactly reversible.
//! let magnified = view.clone().reduce(ViewAction::ToggleMagnify(ctx.config.grid_center()), &ctx);
//! assert!(magnified.is_magnifying());
//! assert_eq!(magnified.reduce(ViewAction::ExitMagnify, &ctx), view);
//! ```
//!
//! ## Design notes
//!
//! - Every gesture is expressed as a new local transform; the calibration is
//!   only replaced by recalibration and by the zoom-out view.
//! - A temporary view and its restore snapshot are one `Option`, so there is
//!   never a snapshot without an active view or two live snapshots.
//! - Pans rebuild the local transform from the gesture's starting transform
//!   and its total displacement rather than summing per-move deltas.

mod action;
mod config;
mod fit;
pub mod mapper;
mod pan;
mod temporary;
mod view;

pub use action::{ViewAction, ViewContext};
pub use config::ViewConfig;
pub use fit::{FitMode, ViewportRegion, fit_transform};
pub use mapper::Perspective;
pub use pan::PanGesture;
pub use temporary::{RestoreTransforms, TemporaryMode, TemporaryView};
pub use view::ViewState;
