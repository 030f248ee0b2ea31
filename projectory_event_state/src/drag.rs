// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag state helper: compute movement deltas and total offsets from position changes.
//!
//! ## Usage
//!
//! 1) Start a drag operation by calling [`DragState::start`] with the initial position.
//! 2) On each move event, call [`DragState::update`] to record the position.
//! 3) Derive the gesture's effect from [`DragState::total_offset`]. Rebuilding
//!    from the start position on every move keeps long drags free of the
//!    drift that summing per-move deltas accumulates.
//! 4) End the drag operation with [`DragState::end`] to reset state.
//!
//! `DragState` is generic over the point type so the offsets stay in the
//! coordinate space the positions were measured in.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Vec2;
//! use projectory_event_state::drag::DragState;
//! use projectory_matrix::CalibratedPoint;
//!
//! let mut drag = DragState::default();
//!
//! drag.start(CalibratedPoint::new(10.0, 20.0));
//! assert!(drag.is_dragging());
//!
//! let delta = drag.update(CalibratedPoint::new(15.0, 25.0)).unwrap();
//! assert_eq!(delta, Vec2::new(5.0, 5.0));
//!
//! let total = drag.total_offset(CalibratedPoint::new(20.0, 25.0)).unwrap();
//! assert_eq!(total, Vec2::new(10.0, 5.0));
//! ```

use core::ops::Sub;

use kurbo::Vec2;

/// Tracks drag state for move event processing.
#[derive(Debug, Clone, Copy)]
pub struct DragState<P> {
    /// Start position of the drag operation.
    pub start_pos: Option<P>,
    /// Last recorded pointer position during drag.
    pub last_pos: Option<P>,
}

impl<P> Default for DragState<P> {
    fn default() -> Self {
        Self {
            start_pos: None,
            last_pos: None,
        }
    }
}

impl<P: Copy + Sub<Output = Vec2>> DragState<P> {
    /// Start tracking a new drag operation from the given position.
    ///
    /// Any previous drag is discarded.
    pub fn start(&mut self, pos: P) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
    }

    /// Record a new position, returning the movement delta since the last update.
    pub fn update(&mut self, pos: P) -> Option<Vec2> {
        self.start_pos?;
        let delta = self.last_pos.map(|last| pos - last);
        self.last_pos = Some(pos);
        delta
    }

    /// Get total offset from drag start position.
    pub fn total_offset(&self, current_pos: P) -> Option<Vec2> {
        self.start_pos.map(|start_pos| current_pos - start_pos)
    }

    /// End the current drag operation and reset state.
    pub fn end(&mut self) {
        self.start_pos = None;
        self.last_pos = None;
    }

    /// Returns `true` while a drag operation is active.
    pub fn is_dragging(&self) -> bool {
        self.start_pos.is_some()
    }
}
