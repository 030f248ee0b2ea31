// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;
use projectory_event_state::keyboard::{KeyInput, KeyState, ModifierState};
use projectory_event_state::pointer::{GestureEvent, GestureTracker, PointerInput};
use projectory_markers::{MarkerAction, MarkerState, MarkerTransition};
use projectory_matrix::{DegenerateTransform, DevicePoint, Matrix, PatternPoint};
use projectory_measure::align::{align_to_reference, flip_along_reference};
use projectory_measure::{LineAction, LineOutcome, LineState, PointerContext};
use projectory_view::mapper::screen_to_pattern;
use projectory_view::{PanGesture, ViewAction, ViewContext, ViewState, ViewportRegion};
use tracing::{debug, trace, warn};

use crate::Config;

/// Anything a host or a remote surface can ask a session to do.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionAction {
    /// Change the transform chain.
    View(ViewAction),
    /// Change the measurement lines.
    Line(LineAction),
    /// Change the markers or the marker tool.
    Marker(MarkerAction),
    /// Rotate and pan the pattern so the selected line lies on the reference.
    AlignToReference,
    /// Align to the selected line, then mirror across it.
    FlipAlongReference,
    /// The device viewport or its open menus changed.
    SetViewport(ViewportRegion),
    /// A new document was opened.
    LoadDocument {
        /// Size of the full pattern layout in pattern units.
        layout: Size,
    },
}

/// What a session step did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionOutcome {
    /// The transform chain or view settings changed.
    View,
    /// The pattern was panned.
    Panned,
    /// The line engine handled the step.
    Line(LineOutcome),
    /// The marker engine handled the step.
    Marker(MarkerTransition),
    /// Held modifiers changed.
    Modifiers,
    /// A degenerate transform stopped the step; nothing changed.
    Aborted(DegenerateTransform),
    /// Nothing applied.
    Ignored,
}

#[derive(Clone, Copy, Debug)]
enum Gesture {
    Line { last: PatternPoint },
    Pan(PanGesture),
}

/// One projected document: the transform chain, lines, and markers, plus
/// the input state that routes pointer and keyboard events between them.
#[derive(Clone, Debug)]
pub struct Session {
    config: Config,
    view: ViewState,
    lines: LineState,
    markers: MarkerState,
    layout: Size,
    viewport: ViewportRegion,
    gestures: GestureTracker,
    modifiers: ModifierState,
    gesture: Option<Gesture>,
}

impl Default for Session {
    fn default() -> Self {
        Self::with_view(Config::default(), ViewState::default())
    }
}

impl Session {
    /// Creates a session for a calibration transform.
    pub fn new(config: Config, calibration: Matrix) -> Result<Self, DegenerateTransform> {
        Ok(Self::with_view(config, ViewState::new(calibration)?))
    }

    /// Creates a session around an existing view.
    #[must_use]
    pub fn with_view(config: Config, view: ViewState) -> Self {
        Self {
            config,
            view,
            lines: LineState::new(),
            markers: MarkerState::new(),
            layout: Size::ZERO,
            viewport: ViewportRegion::default(),
            gestures: GestureTracker::new(),
            modifiers: ModifierState::default(),
            gesture: None,
        }
    }

    /// Sets the pattern layout size.
    #[must_use]
    pub fn with_layout(mut self, layout: Size) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the device viewport.
    #[must_use]
    pub fn with_viewport(mut self, viewport: ViewportRegion) -> Self {
        self.viewport = viewport;
        self
    }

    /// The session configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The transform chain.
    #[must_use]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// The measurement lines.
    #[must_use]
    pub fn lines(&self) -> &LineState {
        &self.lines
    }

    /// The markers.
    #[must_use]
    pub fn markers(&self) -> &MarkerState {
        &self.markers
    }

    /// Size of the pattern layout.
    #[must_use]
    pub fn layout(&self) -> Size {
        self.layout
    }

    /// The device viewport.
    #[must_use]
    pub fn viewport(&self) -> ViewportRegion {
        self.viewport
    }

    /// Held modifier keys.
    #[must_use]
    pub fn modifiers(&self) -> ModifierState {
        self.modifiers
    }

    /// Whether a line drag or pan is in progress.
    #[must_use]
    pub fn is_gesture_active(&self) -> bool {
        self.gesture.is_some()
    }

    /// What the view needs besides its own state.
    #[must_use]
    pub fn view_context(&self) -> ViewContext {
        ViewContext {
            layout: self.layout,
            viewport: self.viewport,
            config: self.config.view,
        }
    }

    /// Feeds one pointer event.
    ///
    /// A press goes to the marker tool when one is armed, then to the
    /// zoom-out pick, then to the line engine. A press that hits nothing
    /// outside measuring mode starts a pan.
    pub fn pointer(&mut self, input: &PointerInput) -> SessionOutcome {
        let Some(event) = self.gestures.on_pointer(input) else {
            trace!(phase = ?input.phase, "pointer event outside a gesture");
            return SessionOutcome::Ignored;
        };
        match event {
            GestureEvent::Start(at) => self.gesture_start(at, input.time),
            GestureEvent::Move(at) => self.gesture_move(at),
            GestureEvent::End(at) => self.gesture_end(at),
        }
    }

    /// Feeds one keyboard event: modifiers and arrow-key nudges.
    pub fn key(&mut self, input: &KeyInput) -> SessionOutcome {
        if self.modifiers.on_key(input) {
            return SessionOutcome::Modifiers;
        }
        if input.state != KeyState::Down {
            return SessionOutcome::Ignored;
        }
        let Some(direction) = input.key.nudge_direction() else {
            return SessionOutcome::Ignored;
        };
        let step = if self.modifiers.axis_constrained() {
            self.config.view.nudge_step_large
        } else {
            self.config.view.nudge_step
        };
        self.dispatch_view(ViewAction::Translate(direction * step))
    }

    /// Applies one action.
    pub fn dispatch(&mut self, action: SessionAction) -> SessionOutcome {
        match action {
            SessionAction::View(action) => self.dispatch_view(action),
            SessionAction::Line(action) => {
                SessionOutcome::Line(self.lines.apply(action, &self.config.measure))
            }
            SessionAction::Marker(action) => {
                SessionOutcome::Marker(self.markers.apply(action, &self.config.markers))
            }
            SessionAction::AlignToReference => self.align(false),
            SessionAction::FlipAlongReference => self.align(true),
            SessionAction::SetViewport(viewport) => {
                self.viewport = viewport;
                SessionOutcome::View
            }
            SessionAction::LoadDocument { layout } => {
                self.load_document(layout);
                SessionOutcome::View
            }
        }
    }

    /// Pure form of [`Session::dispatch`].
    #[must_use]
    pub fn reduce(mut self, action: SessionAction) -> (Self, SessionOutcome) {
        let outcome = self.dispatch(action);
        (self, outcome)
    }

    fn pointer_context(&self, position: PatternPoint) -> PointerContext {
        PointerContext {
            position,
            scale: self.view.local_scale(),
            axis_constrained: self.modifiers.axis_constrained(),
        }
    }

    fn gesture_start(&mut self, at: DevicePoint, now: u64) -> SessionOutcome {
        // Only one drag at a time; a new press discards any stale one.
        self.gesture = None;
        let position = match screen_to_pattern(&self.view, at) {
            Ok(position) => position,
            Err(err) => {
                warn!(%err, "dropping pointer press");
                return SessionOutcome::Aborted(err);
            }
        };

        if self.markers.tool().is_armed() {
            let transition = self
                .markers
                .apply(MarkerAction::PointerDown { position, now }, &self.config.markers);
            return SessionOutcome::Marker(transition);
        }

        if self.view.is_zoomed_out() {
            return self.dispatch_view(ViewAction::ZoomOutPick(at));
        }

        let ctx = self.pointer_context(position);
        let outcome = self
            .lines
            .apply(LineAction::PointerDown(ctx), &self.config.measure);
        match outcome {
            LineOutcome::GrabbedEndpoint(_) | LineOutcome::Created(_) => {
                self.gesture = Some(Gesture::Line { last: position });
            }
            LineOutcome::Missed => {
                self.gesture = Some(Gesture::Pan(PanGesture::begin(&self.view, at)));
            }
            _ => {}
        }
        SessionOutcome::Line(outcome)
    }

    fn gesture_move(&mut self, at: DevicePoint) -> SessionOutcome {
        match self.gesture {
            Some(Gesture::Line { .. }) => match screen_to_pattern(&self.view, at) {
                Ok(position) => {
                    self.gesture = Some(Gesture::Line { last: position });
                    let ctx = self.pointer_context(position);
                    SessionOutcome::Line(
                        self.lines
                            .apply(LineAction::PointerMove(ctx), &self.config.measure),
                    )
                }
                Err(err) => {
                    warn!(%err, "dropping line drag step");
                    SessionOutcome::Aborted(err)
                }
            },
            Some(Gesture::Pan(mut pan)) => {
                pan.update(&mut self.view, at);
                self.gesture = Some(Gesture::Pan(pan));
                SessionOutcome::Panned
            }
            None => SessionOutcome::Ignored,
        }
    }

    fn gesture_end(&mut self, at: DevicePoint) -> SessionOutcome {
        match self.gesture.take() {
            Some(Gesture::Line { last }) => {
                let position = screen_to_pattern(&self.view, at).unwrap_or(last);
                let ctx = self.pointer_context(position);
                SessionOutcome::Line(
                    self.lines
                        .apply(LineAction::PointerUp(ctx), &self.config.measure),
                )
            }
            Some(Gesture::Pan(mut pan)) => {
                pan.update(&mut self.view, at);
                SessionOutcome::Panned
            }
            None => SessionOutcome::Ignored,
        }
    }

    fn dispatch_view(&mut self, action: ViewAction) -> SessionOutcome {
        let was_zoomed_out = self.view.is_zoomed_out();
        let ctx = self.view_context();
        match self.view.apply(action, &ctx) {
            Ok(()) => {
                if !was_zoomed_out && self.view.is_zoomed_out() {
                    self.lines.apply(LineAction::Dismiss, &self.config.measure);
                    self.gesture = None;
                    debug!("zoom-out dismissed line selection and measuring");
                }
                SessionOutcome::View
            }
            Err(err) => {
                warn!(?action, %err, "view action aborted");
                SessionOutcome::Aborted(err)
            }
        }
    }

    fn align(&mut self, flip: bool) -> SessionOutcome {
        let Some(line) = self.lines.selected_line() else {
            return SessionOutcome::Ignored;
        };
        let center = self.config.view.grid_center();
        // Alignment is a lasting change, so it applies to the user's transform.
        self.view.end_temporary();
        let local = if flip {
            flip_along_reference(self.view.local(), line, center)
        } else {
            align_to_reference(self.view.local(), line, center)
        };
        self.view.set_local_transform(local);
        debug!(flip, "aligned pattern to selected line");
        SessionOutcome::View
    }

    fn load_document(&mut self, layout: Size) {
        self.gesture = None;
        self.gestures.reset();
        self.lines.apply(LineAction::Clear, &self.config.measure);
        self.markers.apply(MarkerAction::Cancel, &self.config.markers);
        self.markers.apply(MarkerAction::ClearAll, &self.config.markers);
        self.view.reset_local();
        self.layout = layout;
        debug!(?layout, "loaded document");
    }
}
