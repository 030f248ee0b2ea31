// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard input: held modifiers and directional nudge keys.

use bitflags::bitflags;
use kurbo::Vec2;

bitflags! {
    /// Modifier keys currently held.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift; constrains line drags to the axes and enlarges nudges.
        const SHIFT = 1;
        /// Control.
        const CTRL = 1 << 1;
        /// Alt / Option.
        const ALT = 1 << 2;
        /// Meta / Command.
        const META = 1 << 3;
    }
}

/// Keys the engine reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// A modifier key.
    Modifier(Modifiers),
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
}

impl Key {
    /// Unit direction for arrow keys, with y growing downward.
    #[must_use]
    pub fn nudge_direction(self) -> Option<Vec2> {
        match self {
            Self::ArrowLeft => Some(Vec2::new(-1.0, 0.0)),
            Self::ArrowRight => Some(Vec2::new(1.0, 0.0)),
            Self::ArrowUp => Some(Vec2::new(0.0, -1.0)),
            Self::ArrowDown => Some(Vec2::new(0.0, 1.0)),
            Self::Modifier(_) => None,
        }
    }
}

/// Whether a key went down or up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyState {
    /// Pressed (including auto-repeat).
    Down,
    /// Released.
    Up,
}

/// A keyboard event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyInput {
    /// Key that changed.
    pub key: Key,
    /// New state of the key.
    pub state: KeyState,
}

impl KeyInput {
    /// A key press.
    #[must_use]
    pub const fn down(key: Key) -> Self {
        Self {
            key,
            state: KeyState::Down,
        }
    }

    /// A key release.
    #[must_use]
    pub const fn up(key: Key) -> Self {
        Self {
            key,
            state: KeyState::Up,
        }
    }
}

/// Tracks which modifiers are held across key events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModifierState {
    held: Modifiers,
}

impl ModifierState {
    /// Updates held modifiers from a key event.
    ///
    /// Returns `true` if the held set changed.
    pub fn on_key(&mut self, input: &KeyInput) -> bool {
        let Key::Modifier(m) = input.key else {
            return false;
        };
        let before = self.held;
        match input.state {
            KeyState::Down => self.held.insert(m),
            KeyState::Up => self.held.remove(m),
        }
        before != self.held
    }

    /// Currently held modifiers.
    #[must_use]
    pub fn held(&self) -> Modifiers {
        self.held
    }

    /// Whether line drags should snap to the axes.
    #[must_use]
    pub fn axis_constrained(&self) -> bool {
        self.held.contains(Modifiers::SHIFT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_toggles_axis_constraint() {
        let mut mods = ModifierState::default();
        assert!(!mods.axis_constrained());

        assert!(mods.on_key(&KeyInput::down(Key::Modifier(Modifiers::SHIFT))));
        assert!(mods.axis_constrained());
        // Auto-repeat does not change anything.
        assert!(!mods.on_key(&KeyInput::down(Key::Modifier(Modifiers::SHIFT))));

        assert!(mods.on_key(&KeyInput::up(Key::Modifier(Modifiers::SHIFT))));
        assert!(!mods.axis_constrained());
    }

    #[test]
    fn arrows_are_not_modifiers() {
        let mut mods = ModifierState::default();
        assert!(!mods.on_key(&KeyInput::down(Key::ArrowUp)));
        assert_eq!(mods.held(), Modifiers::empty());
        assert_eq!(Key::ArrowUp.nudge_direction(), Some(Vec2::new(0.0, -1.0)));
        assert_eq!(Key::Modifier(Modifiers::CTRL).nudge_direction(), None);
    }
}
