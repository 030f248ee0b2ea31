// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named actions and state snapshots for keeping a second surface in step.
//!
//! A remote surface (a control window, a phone) sends actions as a name plus
//! JSON parameters and receives full snapshots back. Transport is the host's
//! business; this module only decodes and encodes.

use kurbo::{Insets, Size, Vec2};
use projectory_markers::{Marker, MarkerAction, MarkerTool};
use projectory_matrix::{DegenerateTransform, Matrix, PatternPoint};
use projectory_measure::{Line, LineAction, Unit};
use projectory_view::{Perspective, TemporaryMode, ViewAction, ViewportRegion};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{trace, warn};

use crate::ports::Broadcast;
use crate::{Session, SessionAction, SessionOutcome};

/// Errors from [`Session::apply_named`].
#[derive(Debug, Error)]
pub enum SyncError {
    /// The name is unknown or the parameters do not fit it.
    #[error("cannot decode action `{action}`: {source}")]
    Decode {
        /// The action name as received.
        action: String,
        /// What serde rejected.
        #[source]
        source: serde_json::Error,
    },
    /// The action decoded but hit a degenerate transform.
    #[error(transparent)]
    Aborted(#[from] DegenerateTransform),
}

/// An action as it travels between surfaces.
///
/// Encoded as `{"action": "<snake_case name>", "params": {...}}`; actions
/// without parameters omit `params`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "params", rename_all = "snake_case")]
pub enum NamedAction {
    /// Quarter turn about the grid center.
    Rotate90,
    /// Mirror left-to-right about the grid center.
    FlipHorizontal,
    /// Mirror top-to-bottom about the grid center.
    FlipVertical,
    /// Move the pattern in calibrated units.
    Nudge {
        /// Horizontal offset.
        dx: f64,
        /// Vertical offset.
        dy: f64,
    },
    /// Bring a pattern point to the grid center.
    Recenter {
        /// Pattern x.
        x: f64,
        /// Pattern y.
        y: f64,
    },
    /// Replace the local transform.
    SetLocalTransform {
        /// New local transform.
        matrix: Matrix,
    },
    /// Install a new calibration.
    SetCalibration {
        /// Pattern → display transform.
        calibration: Matrix,
        /// Device → calibrated transform, if not the inverse of `calibration`.
        #[serde(default)]
        perspective: Option<Matrix>,
    },
    /// Back to the identity local transform.
    ResetLocal,
    /// Enter or leave zoom-out.
    ToggleZoomOut,
    /// Leave zoom-out.
    ExitZoomOut,
    /// Enter or leave magnify about the grid center.
    ToggleMagnify,
    /// Leave magnify.
    ExitMagnify,
    /// The device viewport or its open menus changed.
    SetViewport {
        /// Full viewport size.
        size: Size,
        /// Space covered by open menus.
        #[serde(default)]
        insets: Insets,
    },
    /// Turn line creation on or off.
    ToggleMeasuring,
    /// Select a line by index.
    SelectLine {
        /// Line index.
        index: usize,
    },
    /// Select the next line.
    SelectNextLine,
    /// Select the previous line.
    SelectPreviousLine,
    /// Clear the line selection.
    DeselectLine,
    /// Remove the selected line.
    DeleteLine,
    /// Distance field text for the selected line.
    SetDistance {
        /// Raw field text.
        text: String,
    },
    /// Angle field text for the selected line.
    SetAngle {
        /// Raw field text.
        text: String,
    },
    /// Change the measurement unit.
    SetUnit {
        /// New unit.
        unit: Unit,
    },
    /// Remove every line.
    ClearLines,
    /// Align the pattern to the selected line.
    AlignToReference,
    /// Align to the selected line and mirror across it.
    FlipAlongReference,
    /// Arm or disarm marker placement.
    ToggleMarking,
    /// Arm or disarm marker removal.
    ToggleClearing,
    /// Remove every marker.
    ClearMarkers,
    /// A new document was opened.
    LoadDocument {
        /// Layout width in pattern units.
        width: f64,
        /// Layout height in pattern units.
        height: f64,
    },
}

/// Everything a second surface needs to mirror a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SyncSnapshot {
    /// Measurement lines.
    pub lines: Vec<Line>,
    /// Selected line index, or `-1` when nothing is selected.
    pub selected: i64,
    /// Whether line creation is on.
    pub measuring: bool,
    /// Measurement unit.
    pub unit: Unit,
    /// Placed markers.
    pub markers: Vec<Marker>,
    /// Current marker tool.
    pub marker_tool: MarkerTool,
    /// Current local transform.
    pub local_transform: Matrix,
    /// Current calibration transform.
    pub calibration: Matrix,
    /// Active temporary view, if any.
    pub temporary: Option<TemporaryMode>,
}

impl Session {
    /// Decodes and applies an action received from another surface.
    ///
    /// A `params` of `null` is treated as absent.
    pub fn apply_named(&mut self, name: &str, params: Value) -> Result<SessionOutcome, SyncError> {
        let mut message = Map::new();
        message.insert("action".to_owned(), Value::String(name.to_owned()));
        if !params.is_null() {
            message.insert("params".to_owned(), params);
        }
        let action: NamedAction =
            serde_json::from_value(Value::Object(message)).map_err(|source| SyncError::Decode {
                action: name.to_owned(),
                source,
            })?;
        trace!(?action, "applying named action");
        match self.dispatch(self.resolve(action)) {
            SessionOutcome::Aborted(err) => Err(SyncError::Aborted(err)),
            outcome => Ok(outcome),
        }
    }

    /// The current state in mirrorable form.
    #[must_use]
    pub fn sync_snapshot(&self) -> SyncSnapshot {
        let lines = self.lines();
        SyncSnapshot {
            lines: lines.lines().to_vec(),
            selected: lines
                .selected()
                .and_then(|i| i64::try_from(i).ok())
                .unwrap_or(-1),
            measuring: lines.is_measuring(),
            unit: lines.unit(),
            markers: self.markers().markers().to_vec(),
            marker_tool: self.markers().tool(),
            local_transform: self.view().local(),
            calibration: self.view().calibration(),
            temporary: self.view().temporary_mode(),
        }
    }

    /// The current state as a plain JSON value.
    #[must_use]
    pub fn serialize_state(&self) -> Value {
        serde_json::to_value(self.sync_snapshot()).unwrap_or_else(|err| {
            warn!(%err, "could not serialize session state");
            Value::Null
        })
    }

    /// Sends the current state through `out`.
    pub fn publish(&self, out: &mut impl Broadcast) {
        out.broadcast(&self.serialize_state());
    }

    fn resolve(&self, action: NamedAction) -> SessionAction {
        use SessionAction as S;
        match action {
            NamedAction::Rotate90 => S::View(ViewAction::Rotate90),
            NamedAction::FlipHorizontal => S::View(ViewAction::FlipHorizontal),
            NamedAction::FlipVertical => S::View(ViewAction::FlipVertical),
            NamedAction::Nudge { dx, dy } => S::View(ViewAction::Translate(Vec2::new(dx, dy))),
            NamedAction::Recenter { x, y } => S::View(ViewAction::Recenter(PatternPoint::new(x, y))),
            NamedAction::SetLocalTransform { matrix } => S::View(ViewAction::SetLocal(matrix)),
            NamedAction::SetCalibration {
                calibration,
                perspective,
            } => S::View(ViewAction::SetCalibration {
                calibration,
                perspective: perspective.map(Perspective::new),
            }),
            NamedAction::ResetLocal => S::View(ViewAction::ResetLocal),
            NamedAction::ToggleZoomOut => S::View(ViewAction::ToggleZoomOut),
            NamedAction::ExitZoomOut => S::View(ViewAction::ExitZoomOut),
            NamedAction::ToggleMagnify => {
                S::View(ViewAction::ToggleMagnify(self.config().view.grid_center()))
            }
            NamedAction::ExitMagnify => S::View(ViewAction::ExitMagnify),
            NamedAction::SetViewport { size, insets } => {
                S::SetViewport(ViewportRegion::new(size).with_insets(insets))
            }
            NamedAction::ToggleMeasuring => S::Line(LineAction::ToggleMeasuring),
            NamedAction::SelectLine { index } => S::Line(LineAction::Select(index)),
            NamedAction::SelectNextLine => S::Line(LineAction::SelectNext),
            NamedAction::SelectPreviousLine => S::Line(LineAction::SelectPrevious),
            NamedAction::DeselectLine => S::Line(LineAction::Deselect),
            NamedAction::DeleteLine => S::Line(LineAction::DeleteSelected),
            NamedAction::SetDistance { text } => S::Line(LineAction::SetDistanceText(text)),
            NamedAction::SetAngle { text } => S::Line(LineAction::SetAngleText(text)),
            NamedAction::SetUnit { unit } => S::Line(LineAction::SetUnit(unit)),
            NamedAction::ClearLines => S::Line(LineAction::Clear),
            NamedAction::AlignToReference => S::AlignToReference,
            NamedAction::FlipAlongReference => S::FlipAlongReference,
            NamedAction::ToggleMarking => S::Marker(MarkerAction::ToggleMarking),
            NamedAction::ToggleClearing => S::Marker(MarkerAction::ToggleClearing),
            NamedAction::ClearMarkers => S::Marker(MarkerAction::ClearAll),
            NamedAction::LoadDocument { width, height } => S::LoadDocument {
                layout: Size::new(width, height),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::NamedAction;

    #[test]
    fn unit_actions_encode_without_params() {
        let encoded = serde_json::to_value(NamedAction::ToggleZoomOut).unwrap();
        assert_eq!(encoded, json!({"action": "toggle_zoom_out"}));
    }

    #[test]
    fn struct_actions_carry_params() {
        let encoded = serde_json::to_value(NamedAction::SelectLine { index: 2 }).unwrap();
        assert_eq!(encoded, json!({"action": "select_line", "params": {"index": 2}}));
        let decoded: NamedAction = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, NamedAction::SelectLine { index: 2 });
    }

    #[test]
    fn matrices_travel_as_rows() {
        let decoded: NamedAction = serde_json::from_value(json!({
            "action": "set_local_transform",
            "params": {"matrix": [[1.0, 0.0, 5.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]}
        }))
        .unwrap();
        let NamedAction::SetLocalTransform { matrix } = decoded else {
            panic!("decoded {decoded:?}");
        };
        assert_eq!(matrix.rows()[0][2], 5.0);
    }
}
