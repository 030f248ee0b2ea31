// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Projectory Session: one projected document and the input that drives it.
//!
//! A [`Session`] composes the lower crates:
//! - `projectory_view` for the calibration/local transform chain,
//! - `projectory_measure` for measurement lines,
//! - `projectory_markers` for point markers,
//! - `projectory_event_state` for gesture and modifier tracking.
//!
//! Pointer events are classified into gesture steps, mapped into pattern
//! space, and routed to the armed marker tool, the zoom-out pick, the line
//! engine, or a pan, in that order. Everything else arrives as a
//! [`SessionAction`], or as a [`NamedAction`] from another surface.
//!
//! Storage and messaging are ports: hosts implement [`BlobStore`] and
//! [`Broadcast`] and hand them to [`Session::persist_to`],
//! [`Session::restore_from`], and [`Session::publish`].
//!
//! ## Minimal example
//!
//! ```rust
//! use projectory_event_state::pointer::{PointerButtons, PointerInput, PointerType};
//! use projectory_matrix::{DevicePoint, Matrix};
//! use projectory_measure::LineAction;
//! use projectory_session::{Config, Session, SessionAction};
//!
//! let mut session = Session::new(Config::default(), Matrix::scale(2.0)).unwrap();
//! session.dispatch(SessionAction::Line(LineAction::SetMeasuring(true)));
//!
//! let mouse = PointerType::Mouse;
//! let held = PointerButtons::PRIMARY;
//! session.pointer(&PointerInput::down(DevicePoint::new(0.0, 0.0), mouse, held, 0));
//! session.pointer(&PointerInput::moved(DevicePoint::new(192.0, 0.0), mouse, held, 16));
//! session.pointer(&PointerInput::up(DevicePoint::new(192.0, 0.0), mouse, 32));
//!
//! let frame = session.render();
//! assert_eq!(frame.lines[0].label, "1.000 in 0°");
//! ```

mod config;
mod persist;
pub mod ports;
mod render;
mod session;
mod sync;

pub use config::{Config, ConfigError};
pub use ports::{BlobStore, Broadcast, MemoryStore};
pub use render::{LineOverlay, RenderFrame};
pub use session::{Session, SessionAction, SessionOutcome};
pub use sync::{NamedAction, SyncError, SyncSnapshot};
