// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer input and gesture tracking.
//!
//! [`GestureTracker`] turns a raw stream of [`PointerInput`]s into ordered
//! [`GestureEvent`]s for a single gesture at a time:
//!
//! - A down always starts a fresh gesture, discarding any stale one.
//! - Moves and ups with no gesture in progress are ignored.
//! - Mouse buttons released outside the capture area never produce an up;
//!   a mouse move reporting no pressed buttons ends the gesture instead.
//!
//! ```
//! use projectory_event_state::pointer::{
//!     GestureEvent, GestureTracker, PointerButtons, PointerInput, PointerType,
//! };
//! use projectory_matrix::DevicePoint;
//!
//! let mut tracker = GestureTracker::new();
//! let at = DevicePoint::new(3.0, 4.0);
//!
//! let down = PointerInput::down(at, PointerType::Mouse, PointerButtons::PRIMARY, 0);
//! assert_eq!(tracker.on_pointer(&down), Some(GestureEvent::Start(at)));
//!
//! // The button was released elsewhere; the next move has no buttons pressed.
//! let stray = PointerInput::moved(at, PointerType::Mouse, PointerButtons::empty(), 16);
//! assert_eq!(tracker.on_pointer(&stray), Some(GestureEvent::End(at)));
//! assert!(!tracker.is_active());
//! ```

use bitflags::bitflags;
use projectory_matrix::DevicePoint;

bitflags! {
    /// Pressed pointer buttons, in the bit order hosts usually report them.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PointerButtons: u8 {
        /// Main button, usually the left mouse button or a touch contact.
        const PRIMARY = 1;
        /// Usually the right mouse button.
        const SECONDARY = 1 << 1;
        /// Usually the middle mouse button.
        const AUXILIARY = 1 << 2;
        /// Browser back button.
        const BACK = 1 << 3;
        /// Browser forward button.
        const FORWARD = 1 << 4;
    }
}

/// Kind of device that produced a pointer event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerType {
    /// A mouse or trackpad.
    #[default]
    Mouse,
    /// A finger on a touch screen.
    Touch,
    /// A stylus.
    Pen,
}

/// Phase of a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    /// A button was pressed or a contact began.
    Down,
    /// The pointer moved.
    Move,
    /// A button was released or a contact ended.
    Up,
}

/// A pointer event in device coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    /// Phase of the event.
    pub phase: PointerPhase,
    /// Device-space position.
    pub position: DevicePoint,
    /// Device that produced the event.
    pub pointer_type: PointerType,
    /// Buttons held when the event was produced.
    pub buttons: PointerButtons,
    /// Host timestamp in milliseconds.
    pub time: u64,
}

impl PointerInput {
    /// A pointer-down event.
    #[must_use]
    pub fn down(
        position: DevicePoint,
        pointer_type: PointerType,
        buttons: PointerButtons,
        time: u64,
    ) -> Self {
        Self {
            phase: PointerPhase::Down,
            position,
            pointer_type,
            buttons,
            time,
        }
    }

    /// A pointer-move event.
    #[must_use]
    pub fn moved(
        position: DevicePoint,
        pointer_type: PointerType,
        buttons: PointerButtons,
        time: u64,
    ) -> Self {
        Self {
            phase: PointerPhase::Move,
            position,
            pointer_type,
            buttons,
            time,
        }
    }

    /// A pointer-up event.
    #[must_use]
    pub fn up(position: DevicePoint, pointer_type: PointerType, time: u64) -> Self {
        Self {
            phase: PointerPhase::Up,
            position,
            pointer_type,
            buttons: PointerButtons::empty(),
            time,
        }
    }
}

/// An ordered step of a single gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// The gesture began at this position.
    Start(DevicePoint),
    /// The pointer moved while the gesture was active.
    Move(DevicePoint),
    /// The gesture ended, either by an up or by a synthesized end.
    End(DevicePoint),
}

/// Classifies pointer events into gesture steps.
#[derive(Clone, Copy, Debug, Default)]
pub struct GestureTracker {
    active: Option<PointerType>,
}

impl GestureTracker {
    /// Creates a tracker with no gesture in progress.
    #[must_use]
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Returns `true` while a gesture is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Forgets any gesture in progress without producing an end.
    pub fn reset(&mut self) {
        self.active = None;
    }

    /// Feeds one pointer event, returning the gesture step it represents.
    ///
    /// Returns `None` for events that do not belong to a gesture (hover moves,
    /// unmatched ups).
    pub fn on_pointer(&mut self, input: &PointerInput) -> Option<GestureEvent> {
        match input.phase {
            PointerPhase::Down => {
                self.active = Some(input.pointer_type);
                Some(GestureEvent::Start(input.position))
            }
            PointerPhase::Move => {
                self.active?;
                if input.pointer_type == PointerType::Mouse && input.buttons.is_empty() {
                    self.active = None;
                    Some(GestureEvent::End(input.position))
                } else {
                    Some(GestureEvent::Move(input.position))
                }
            }
            PointerPhase::Up => {
                self.active.take()?;
                Some(GestureEvent::End(input.position))
            }
        }
    }
}
