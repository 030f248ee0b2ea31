// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use projectory_matrix::PatternPoint;
use projectory_precise_hit::{Disc, HitParams, nearest_hit};
use tracing::{debug, warn};

use crate::{Marker, MarkerConfig, MarkerId};

/// The marker tool. Placement and removal are one-shot: the tool returns to
/// [`MarkerTool::Idle`] after every pointer press it handles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MarkerTool {
    /// Pointer presses pass through to other tools.
    #[default]
    Idle,
    /// The next press places a marker.
    Marking,
    /// The next press removes the nearest marker in range.
    Clearing,
}

impl MarkerTool {
    /// Whether the next pointer press belongs to the marker engine.
    #[must_use]
    pub fn is_armed(self) -> bool {
        self != Self::Idle
    }
}

/// Operations on markers.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkerAction {
    /// Arm placement, or disarm it if armed.
    ToggleMarking,
    /// Arm removal, or disarm it if armed.
    ToggleClearing,
    /// Return to idle.
    Cancel,
    /// A pointer press at a pattern-space position.
    PointerDown {
        /// Press position.
        position: PatternPoint,
        /// Host timestamp in milliseconds.
        now: u64,
    },
    /// Remove every marker.
    ClearAll,
    /// Replace all markers, e.g. from persisted state.
    Replace(Vec<Marker>),
}

/// What a marker action did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerOutcome {
    /// A marker was placed.
    Placed(MarkerId),
    /// A marker was removed.
    Removed(MarkerId),
    /// A clearing press found no marker in range.
    NothingInRange,
    /// Only the tool changed.
    ToolChanged,
    /// The marker set was replaced or emptied.
    Reset,
    /// The action did not apply.
    Ignored,
}

/// The result of a marker action, with the tool state on either side of it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkerTransition {
    /// What happened.
    pub outcome: MarkerOutcome,
    /// Tool before the action.
    pub tool_before: MarkerTool,
    /// Tool after the action.
    pub tool_after: MarkerTool,
}

/// Markers and the marker tool.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarkerState {
    markers: Vec<Marker>,
    tool: MarkerTool,
    next_id: u64,
}

impl MarkerState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Placed markers, oldest first.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Current tool.
    #[must_use]
    pub fn tool(&self) -> MarkerTool {
        self.tool
    }

    /// Whether the next press places a marker.
    #[must_use]
    pub fn is_marking(&self) -> bool {
        self.tool == MarkerTool::Marking
    }

    /// Whether the next press removes a marker.
    #[must_use]
    pub fn is_clearing(&self) -> bool {
        self.tool == MarkerTool::Clearing
    }

    /// Applies `action` in place.
    pub fn apply(&mut self, action: MarkerAction, config: &MarkerConfig) -> MarkerTransition {
        let tool_before = self.tool;
        let outcome = match action {
            MarkerAction::ToggleMarking => self.toggle(MarkerTool::Marking),
            MarkerAction::ToggleClearing => self.toggle(MarkerTool::Clearing),
            MarkerAction::Cancel => {
                self.tool = MarkerTool::Idle;
                MarkerOutcome::ToolChanged
            }
            MarkerAction::PointerDown { position, now } => match tool_before {
                MarkerTool::Idle => MarkerOutcome::Ignored,
                MarkerTool::Marking => {
                    self.tool = MarkerTool::Idle;
                    self.place(position, now)
                }
                MarkerTool::Clearing => {
                    self.tool = MarkerTool::Idle;
                    self.remove_near(position, config)
                }
            },
            MarkerAction::ClearAll => {
                self.markers.clear();
                MarkerOutcome::Reset
            }
            MarkerAction::Replace(markers) => {
                self.markers = markers;
                self.adopt_ids();
                MarkerOutcome::Reset
            }
        };
        if self.tool != tool_before {
            debug!(from = ?tool_before, to = ?self.tool, "marker tool changed");
        }
        MarkerTransition {
            outcome,
            tool_before,
            tool_after: self.tool,
        }
    }

    /// Pure form of [`MarkerState::apply`].
    #[must_use]
    pub fn reduce(mut self, action: MarkerAction, config: &MarkerConfig) -> (Self, MarkerTransition) {
        let transition = self.apply(action, config);
        (self, transition)
    }

    fn toggle(&mut self, tool: MarkerTool) -> MarkerOutcome {
        self.tool = if self.tool == tool {
            MarkerTool::Idle
        } else {
            tool
        };
        MarkerOutcome::ToolChanged
    }

    /// Moves the counter past every held id.
    ///
    /// Ids that repeat, or that leave no room for another allocation, are
    /// replaced by a fresh `0..len` numbering.
    fn adopt_ids(&mut self) {
        let mut ids: Vec<u64> = self.markers.iter().map(|m| m.id.0).collect();
        ids.sort_unstable();
        let unique = ids.windows(2).all(|pair| pair[0] != pair[1]);
        match ids.last().map(|max| max.checked_add(1)) {
            None => {}
            Some(Some(next)) if unique => self.next_id = self.next_id.max(next),
            Some(_) => {
                warn!(count = ids.len(), "renumbering markers with unusable ids");
                self.renumber();
            }
        }
    }

    fn renumber(&mut self) {
        for (index, marker) in (0_u64..).zip(self.markers.iter_mut()) {
            marker.id = MarkerId(index);
        }
        self.next_id = self.markers.len() as u64;
    }

    fn allocate_id(&mut self) -> MarkerId {
        if self.next_id.checked_add(1).is_none() {
            self.renumber();
        }
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        id
    }

    fn place(&mut self, position: PatternPoint, now: u64) -> MarkerOutcome {
        let id = self.allocate_id();
        self.markers.push(Marker {
            id,
            position,
            created_at: now,
        });
        debug!(id = id.0, ?position, "placed marker");
        MarkerOutcome::Placed(id)
    }

    fn remove_near(&mut self, position: PatternPoint, config: &MarkerConfig) -> MarkerOutcome {
        let radius = config.removal_radius();
        let discs: Vec<Disc> = self
            .markers
            .iter()
            .map(|m| Disc {
                center: m.position.0,
                radius,
            })
            .collect();
        match nearest_hit(&discs, position.0, &HitParams::default()) {
            Some((index, _)) => {
                let removed = self.markers.remove(index);
                debug!(id = removed.id.0, "removed marker");
                MarkerOutcome::Removed(removed.id)
            }
            None => MarkerOutcome::NothingInRange,
        }
    }
}

#[cfg(test)]
mod tests {
    use projectory_matrix::PatternPoint;

    use super::{MarkerAction, MarkerOutcome, MarkerState, MarkerTool};
    use crate::{Marker, MarkerConfig, MarkerId};

    fn press(x: f64, y: f64) -> MarkerAction {
        MarkerAction::PointerDown {
            position: PatternPoint::new(x, y),
            now: 1_000,
        }
    }

    fn with_marker_at(x: f64, y: f64) -> MarkerState {
        let config = MarkerConfig::default();
        let (state, _) = MarkerState::new().reduce(MarkerAction::ToggleMarking, &config);
        let (state, t) = state.reduce(press(x, y), &config);
        assert_eq!(t.outcome, MarkerOutcome::Placed(MarkerId(0)));
        state
    }

    #[test]
    fn placement_is_one_shot() {
        let config = MarkerConfig::default();
        let mut state = with_marker_at(100.0, 200.0);
        assert_eq!(state.tool(), MarkerTool::Idle);
        assert_eq!(state.markers()[0].created_at, 1_000);

        let t = state.apply(press(5.0, 5.0), &config);
        assert_eq!(t.outcome, MarkerOutcome::Ignored);
        assert_eq!(state.markers().len(), 1);
    }

    #[test]
    fn clearing_within_radius_removes() {
        let config = MarkerConfig::default();
        let mut state = with_marker_at(100.0, 200.0);
        state.apply(MarkerAction::ToggleClearing, &config);

        let t = state.apply(press(100.0, 344.0), &config);
        assert_eq!(t.outcome, MarkerOutcome::Removed(MarkerId(0)));
        assert_eq!(t.tool_before, MarkerTool::Clearing);
        assert_eq!(t.tool_after, MarkerTool::Idle);
        assert!(state.markers().is_empty());
    }

    #[test]
    fn clearing_out_of_range_keeps_markers_and_disarms() {
        let config = MarkerConfig::default();
        let mut state = with_marker_at(100.0, 200.0);
        state.apply(MarkerAction::ToggleClearing, &config);
        let before = state.markers().to_vec();

        let t = state.apply(press(300.0, 200.0), &config);
        assert_eq!(t.outcome, MarkerOutcome::NothingInRange);
        assert_eq!(state.markers(), before.as_slice());
        assert!(!state.is_clearing());
        assert!(!state.is_marking());
    }

    #[test]
    fn clearing_picks_the_nearest_marker() {
        let config = MarkerConfig::default();
        let mut state = with_marker_at(0.0, 0.0);
        state.apply(MarkerAction::ToggleMarking, &config);
        state.apply(press(100.0, 0.0), &config);

        state.apply(MarkerAction::ToggleClearing, &config);
        let t = state.apply(press(70.0, 0.0), &config);
        assert_eq!(t.outcome, MarkerOutcome::Removed(MarkerId(1)));
        assert_eq!(state.markers()[0].id, MarkerId(0));
    }

    #[test]
    fn tools_are_exclusive_and_toggle_off() {
        let config = MarkerConfig::default();
        let mut state = MarkerState::new();
        state.apply(MarkerAction::ToggleMarking, &config);
        assert!(state.is_marking());
        let t = state.apply(MarkerAction::ToggleClearing, &config);
        assert_eq!(t.tool_before, MarkerTool::Marking);
        assert_eq!(t.tool_after, MarkerTool::Clearing);
        assert!(!state.is_marking());

        state.apply(MarkerAction::ToggleClearing, &config);
        assert_eq!(state.tool(), MarkerTool::Idle);
    }

    #[test]
    fn ids_are_not_reused() {
        let config = MarkerConfig::default();
        let mut state = MarkerState::new();
        state.apply(
            MarkerAction::Replace(vec![Marker {
                id: MarkerId(7),
                position: PatternPoint::ORIGIN,
                created_at: 0,
            }]),
            &config,
        );
        state.apply(MarkerAction::ClearAll, &config);
        state.apply(MarkerAction::ToggleMarking, &config);
        let t = state.apply(press(1.0, 1.0), &config);
        assert_eq!(t.outcome, MarkerOutcome::Placed(MarkerId(8)));
    }

    fn marker(id: u64, x: f64) -> Marker {
        Marker {
            id: MarkerId(id),
            position: PatternPoint::new(x, 0.0),
            created_at: 0,
        }
    }

    #[test]
    fn largest_id_is_renumbered_before_placing() {
        let config = MarkerConfig::default();
        let mut state = MarkerState::new();
        state.apply(
            MarkerAction::Replace(vec![marker(3, 0.0), marker(u64::MAX, 500.0)]),
            &config,
        );
        let ids: Vec<_> = state.markers().iter().map(|m| m.id).collect();
        assert_eq!(ids, [MarkerId(0), MarkerId(1)]);

        state.apply(MarkerAction::ToggleMarking, &config);
        let t = state.apply(press(1_000.0, 0.0), &config);
        assert_eq!(t.outcome, MarkerOutcome::Placed(MarkerId(2)));
        assert_eq!(t.tool_after, MarkerTool::Idle);
    }

    #[test]
    fn repeated_ids_are_renumbered() {
        let config = MarkerConfig::default();
        let mut state = MarkerState::new();
        state.apply(
            MarkerAction::Replace(vec![marker(4, 0.0), marker(4, 500.0)]),
            &config,
        );
        assert_ne!(state.markers()[0].id, state.markers()[1].id);

        state.apply(MarkerAction::ToggleClearing, &config);
        let t = state.apply(press(490.0, 0.0), &config);
        assert_eq!(t.outcome, MarkerOutcome::Removed(MarkerId(1)));
        assert_eq!(state.markers()[0].position, PatternPoint::ORIGIN);
    }
}
