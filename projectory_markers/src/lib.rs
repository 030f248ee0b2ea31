// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Projectory Markers: point markers placed on a projected pattern.
//!
//! [`MarkerState`] owns the placed markers and a single [`MarkerTool`].
//! Placing and removing are one-shot tools: whatever a press does, the tool
//! is back to idle afterwards, and every action reports the tool on either
//! side of it in a [`MarkerTransition`].
//!
//! Markers live in pattern space and move with the pattern, but their glyphs
//! are never rotated or mirrored by the user's local transform; see
//! [`Marker::overlay`].
//!
//! ## Minimal example
//!
//! ```rust
//! use projectory_matrix::PatternPoint;
//! use projectory_markers::{MarkerAction, MarkerConfig, MarkerOutcome, MarkerState, MarkerTool};
//!
//! let config = MarkerConfig::default();
//! let (markers, _) = MarkerState::new().reduce(MarkerAction::ToggleMarking, &config);
//! let (markers, t) = markers.reduce(
//!     MarkerAction::PointerDown { position: PatternPoint::new(100.0, 200.0), now: 0 },
//!     &config,
//! );
//! assert!(matches!(t.outcome, MarkerOutcome::Placed(_)));
//! assert_eq!(t.tool_after, MarkerTool::Idle);
//! assert_eq!(markers.markers().len(), 1);
//! ```

mod marker;
mod state;

pub use marker::{Marker, MarkerConfig, MarkerId, MarkerOverlay};
pub use state::{MarkerAction, MarkerOutcome, MarkerState, MarkerTool, MarkerTransition};
