// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Vec2;
use projectory_matrix::PatternPoint;
use projectory_precise_hit::{Disc, HitParams, StrokedLine, first_hit};
use tracing::{debug, trace};

use crate::{Line, MeasureConfig, Unit};

/// A pointer sample already mapped into pattern space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerContext {
    /// Pointer position in pattern space.
    pub position: PatternPoint,
    /// Scale factor of the local transform, used to keep touch targets a
    /// constant physical size.
    pub scale: f64,
    /// Whether the axis-constraint modifier is held.
    pub axis_constrained: bool,
}

impl PointerContext {
    /// A pointer sample at `position` with unit scale and no modifier.
    #[must_use]
    pub fn at(position: PatternPoint) -> Self {
        Self {
            position,
            scale: 1.0,
            axis_constrained: false,
        }
    }

    /// Returns a copy with the given local scale.
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Returns a copy with the axis constraint set.
    #[must_use]
    pub fn with_axis_constraint(mut self, constrained: bool) -> Self {
        self.axis_constrained = constrained;
        self
    }
}

/// The endpoint drag in progress.
///
/// The dragged endpoint is always `points[1]` of `line`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EndpointDrag {
    /// Index of the dragged line.
    pub line: usize,
    /// Endpoint minus pointer at the moment the drag began.
    pub offset: Vec2,
}

/// Operations on the line collection.
#[derive(Clone, Debug, PartialEq)]
pub enum LineAction {
    /// Pointer pressed: grab an endpoint, toggle a line, create a line, or
    /// clear the selection.
    PointerDown(PointerContext),
    /// Pointer moved: update the dragged endpoint, if any.
    PointerMove(PointerContext),
    /// Pointer released: finish the drag, replacing too-short lines.
    PointerUp(PointerContext),
    /// Turn line creation on or off.
    SetMeasuring(bool),
    /// Flip line creation.
    ToggleMeasuring,
    /// Select a line by index; out-of-range indices are ignored.
    Select(usize),
    /// Select the next line, wrapping around.
    SelectNext,
    /// Select the previous line, wrapping around.
    SelectPrevious,
    /// Clear the selection.
    Deselect,
    /// Remove the selected line.
    DeleteSelected,
    /// Edited distance text for the selected line.
    SetDistanceText(String),
    /// Edited angle text for the selected line.
    SetAngleText(String),
    /// Change the display unit of every line.
    SetUnit(Unit),
    /// Drop the selection, the drag, and measuring mode.
    Dismiss,
    /// Replace all lines, e.g. from persisted state. Lines keep their own
    /// units; the current unit is left alone.
    Replace(Vec<Line>),
    /// Remove every line.
    Clear,
}

/// What an action did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineOutcome {
    /// An endpoint of this line was grabbed.
    GrabbedEndpoint(usize),
    /// The body of this line was hit and its selection toggled.
    ToggledSelection(usize),
    /// A new line was created at this index and its end grabbed.
    Created(usize),
    /// Nothing was hit; the selection was cleared.
    Missed,
    /// The dragged endpoint of this line moved.
    Dragged(usize),
    /// The drag on this line finished.
    Released {
        /// Index of the released line.
        line: usize,
        /// Whether the line was too short and got replaced.
        replaced: bool,
    },
    /// The line at this index was removed.
    Deleted(usize),
    /// The state changed in some other way.
    Updated,
    /// The action did not apply.
    Ignored,
}

/// Measurement lines, selection, and the active endpoint drag.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineState {
    lines: Vec<Line>,
    selected: Option<usize>,
    #[cfg_attr(feature = "serde", serde(skip))]
    drag: Option<EndpointDrag>,
    measuring: bool,
    unit: Unit,
}

impl LineState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The lines, in hit-test order.
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Index of the selected line.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// The selected line.
    #[must_use]
    pub fn selected_line(&self) -> Option<&Line> {
        self.selected.and_then(|i| self.lines.get(i))
    }

    /// The endpoint drag in progress, if any.
    #[must_use]
    pub fn drag(&self) -> Option<EndpointDrag> {
        self.drag
    }

    /// Whether pointer-down on empty space creates a line.
    #[must_use]
    pub fn is_measuring(&self) -> bool {
        self.measuring
    }

    /// Current display unit.
    #[must_use]
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Applies `action` in place.
    pub fn apply(&mut self, action: LineAction, config: &MeasureConfig) -> LineOutcome {
        match action {
            LineAction::PointerDown(ctx) => self.pointer_down(ctx, config),
            LineAction::PointerMove(ctx) => self.pointer_move(ctx, config),
            LineAction::PointerUp(ctx) => self.pointer_up(ctx, config),
            LineAction::SetMeasuring(on) => {
                self.measuring = on;
                LineOutcome::Updated
            }
            LineAction::ToggleMeasuring => {
                self.measuring = !self.measuring;
                LineOutcome::Updated
            }
            LineAction::Select(i) => {
                if i < self.lines.len() {
                    self.selected = Some(i);
                    LineOutcome::Updated
                } else {
                    LineOutcome::Ignored
                }
            }
            LineAction::SelectNext => self.cycle(true),
            LineAction::SelectPrevious => self.cycle(false),
            LineAction::Deselect => {
                self.selected = None;
                LineOutcome::Updated
            }
            LineAction::DeleteSelected => self.delete_selected(),
            LineAction::SetDistanceText(text) => match self.selected_line_mut() {
                Some(line) => {
                    line.set_distance_text(&text, config);
                    LineOutcome::Updated
                }
                None => LineOutcome::Ignored,
            },
            LineAction::SetAngleText(text) => match self.selected_line_mut() {
                Some(line) => {
                    line.set_angle_text(&text);
                    LineOutcome::Updated
                }
                None => LineOutcome::Ignored,
            },
            LineAction::SetUnit(unit) => {
                self.unit = unit;
                for line in &mut self.lines {
                    line.set_unit(unit, config);
                }
                LineOutcome::Updated
            }
            LineAction::Dismiss => {
                self.selected = None;
                self.drag = None;
                self.measuring = false;
                LineOutcome::Updated
            }
            LineAction::Replace(lines) => {
                self.lines = lines;
                // Each line keeps its own unit; only the strings are re-derived.
                for line in &mut self.lines {
                    line.refresh(config);
                }
                self.selected = None;
                self.drag = None;
                LineOutcome::Updated
            }
            LineAction::Clear => {
                self.lines.clear();
                self.selected = None;
                self.drag = None;
                LineOutcome::Updated
            }
        }
    }

    /// Pure form of [`LineState::apply`].
    #[must_use]
    pub fn reduce(mut self, action: LineAction, config: &MeasureConfig) -> (Self, LineOutcome) {
        let outcome = self.apply(action, config);
        (self, outcome)
    }

    fn selected_line_mut(&mut self) -> Option<&mut Line> {
        self.selected.and_then(|i| self.lines.get_mut(i))
    }

    fn pointer_down(&mut self, ctx: PointerContext, config: &MeasureConfig) -> LineOutcome {
        // A new press always starts from a clean gesture.
        self.drag = None;
        let at = ctx.position.0;

        let radius = config.endpoint_radius_at(ctx.scale);
        let handles: Vec<Disc> = self
            .lines
            .iter()
            .flat_map(|line| line.points.map(|p| Disc { center: p.0, radius }))
            .collect();
        if let Some((hit, _)) = first_hit(&handles, at, &HitParams::default()) {
            let (index, endpoint) = (hit / 2, hit % 2);
            let line = &mut self.lines[index];
            if endpoint == 0 {
                line.swap_ends();
            }
            self.selected = Some(index);
            self.drag = Some(EndpointDrag {
                line: index,
                offset: line.end() - ctx.position,
            });
            trace!(index, endpoint, "grabbed line endpoint");
            return LineOutcome::GrabbedEndpoint(index);
        }

        let half_width = config.body_radius_at(ctx.scale);
        let bodies: Vec<StrokedLine> = self
            .lines
            .iter()
            .map(|line| StrokedLine {
                line: kurbo::Line::new(line.anchor().0, line.end().0),
                half_width,
            })
            .collect();
        if let Some((index, _)) = first_hit(&bodies, at, &HitParams::default()) {
            self.selected = if self.selected == Some(index) {
                None
            } else {
                Some(index)
            };
            return LineOutcome::ToggledSelection(index);
        }

        if self.measuring {
            let index = self.lines.len();
            self.lines
                .push(Line::new(ctx.position, ctx.position, self.unit, config));
            self.selected = Some(index);
            self.drag = Some(EndpointDrag {
                line: index,
                offset: Vec2::ZERO,
            });
            debug!(index, "created measurement line");
            return LineOutcome::Created(index);
        }

        self.selected = None;
        LineOutcome::Missed
    }

    fn pointer_move(&mut self, ctx: PointerContext, config: &MeasureConfig) -> LineOutcome {
        let Some(drag) = self.drag else {
            return LineOutcome::Ignored;
        };
        let Some(line) = self.lines.get_mut(drag.line) else {
            self.drag = None;
            return LineOutcome::Ignored;
        };
        follow_pointer(line, drag, ctx, config);
        LineOutcome::Dragged(drag.line)
    }

    fn pointer_up(&mut self, ctx: PointerContext, config: &MeasureConfig) -> LineOutcome {
        let Some(drag) = self.drag.take() else {
            return LineOutcome::Ignored;
        };
        let Some(line) = self.lines.get_mut(drag.line) else {
            return LineOutcome::Ignored;
        };
        // The release position is the final one, same as for a move.
        follow_pointer(line, drag, ctx, config);
        let replaced = line.length() < config.min_length_at(ctx.scale);
        if replaced {
            let one_unit = config.length_to_pattern(1.0, line.unit);
            line.points[1] = line.anchor() + Vec2::new(one_unit, 0.0);
            line.refresh(config);
            debug!(index = drag.line, "replaced degenerate measurement line");
        }
        LineOutcome::Released {
            line: drag.line,
            replaced,
        }
    }

    fn cycle(&mut self, forward: bool) -> LineOutcome {
        let len = self.lines.len();
        if len == 0 {
            return LineOutcome::Ignored;
        }
        self.selected = Some(match (self.selected, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        });
        LineOutcome::Updated
    }

    fn delete_selected(&mut self) -> LineOutcome {
        let Some(index) = self.selected.filter(|&i| i < self.lines.len()) else {
            return LineOutcome::Ignored;
        };
        self.lines.remove(index);
        self.drag = None;
        // Reselect from the list as it is after removal.
        self.selected = self.lines.len().checked_sub(1).map(|last| index.min(last));
        debug!(index, remaining = self.lines.len(), "deleted measurement line");
        LineOutcome::Deleted(index)
    }
}

/// Projects `end` onto the horizontal or vertical line through `anchor`,
/// whichever is closer.
#[must_use]
pub fn snap_to_axis(anchor: PatternPoint, end: PatternPoint) -> PatternPoint {
    let d = end - anchor;
    if d.x.abs() >= d.y.abs() {
        PatternPoint::new(end.x(), anchor.y())
    } else {
        PatternPoint::new(anchor.x(), end.y())
    }
}

/// Moves the dragged end of `line` to the pointer, keeping the grab offset.
fn follow_pointer(
    line: &mut Line,
    drag: EndpointDrag,
    ctx: PointerContext,
    config: &MeasureConfig,
) {
    let mut end = ctx.position + drag.offset;
    if ctx.axis_constrained {
        end = snap_to_axis(line.anchor(), end);
    }
    line.points[1] = end;
    line.refresh(config);
}
