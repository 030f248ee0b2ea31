// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Projectory Event State: input state machines for projector interactions.
//!
//! This crate provides small, focused state machines for the input patterns
//! the projection engine needs to track across events:
//!
//! - [`pointer`]: classify raw pointer events into ordered gesture steps,
//!   including the synthesized end for mouse releases that are never delivered
//! - [`drag`]: track drag operations with movement deltas and total offsets
//! - [`keyboard`]: held modifiers and directional nudge keys
//!
//! ## Design Philosophy
//!
//! Each state manager is designed to be:
//!
//! - **Minimal and focused**: Each handles one specific interaction pattern
//! - **Stateful but simple**: Track just enough state to compute transitions
//! - **Framework-agnostic**: Hosts translate their native events into
//!   [`pointer::PointerInput`] and [`keyboard::KeyInput`]
//!
//! Positions arrive in device space ([`projectory_matrix::DevicePoint`]);
//! mapping them into pattern space is the job of the view layer.
//!
//! ## Drag Operations
//!
//! ```rust
//! use projectory_event_state::drag::DragState;
//! use projectory_matrix::DevicePoint;
//!
//! let mut drag = DragState::default();
//! drag.start(DevicePoint::new(10.0, 10.0));
//!
//! let delta = drag.update(DevicePoint::new(15.0, 12.0)).unwrap();
//! assert_eq!((delta.x, delta.y), (5.0, 2.0));
//! ```

pub mod drag;
pub mod keyboard;
pub mod pointer;
