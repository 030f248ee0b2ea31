// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use projectory_markers::{Marker, MarkerAction};
use projectory_matrix::Matrix;
use projectory_measure::{Line, LineAction, Unit};
use projectory_view::ViewAction;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::ports::{BlobStore, LINES_KEY, LOCAL_TRANSFORM_KEY, MARKERS_KEY, UNIT_KEY};
use crate::{Session, SessionAction};

impl Session {
    /// Writes lines, the current unit, markers, and the user's local
    /// transform to `store`.
    ///
    /// While a temporary view is active, the transform captured before it is
    /// written, not the temporary one.
    pub fn persist_to(&self, store: &mut impl BlobStore) {
        store_value(store, LINES_KEY, self.lines().lines());
        store_value(store, UNIT_KEY, &self.lines().unit());
        store_value(store, MARKERS_KEY, self.markers().markers());
        store_value(store, LOCAL_TRANSFORM_KEY, &self.view().user_local());
    }

    /// Reads whatever `store` holds from an earlier session.
    ///
    /// Missing keys are skipped; values that do not decode, and a local
    /// transform that cannot be inverted, are logged and skipped.
    pub fn restore_from(&mut self, store: &impl BlobStore) {
        let lines = load_value::<Vec<Line>>(store, LINES_KEY);
        // Stores written without a unit fall back to the first line's.
        let unit = load_value::<Unit>(store, UNIT_KEY)
            .or_else(|| lines.as_ref().and_then(|l| l.first()).map(|l| l.unit));
        if let Some(unit) = unit {
            self.dispatch(SessionAction::Line(LineAction::SetUnit(unit)));
        }
        if let Some(lines) = lines {
            debug!(count = lines.len(), "restored lines");
            self.dispatch(SessionAction::Line(LineAction::Replace(lines)));
        }
        if let Some(markers) = load_value::<Vec<Marker>>(store, MARKERS_KEY) {
            debug!(count = markers.len(), "restored markers");
            self.dispatch(SessionAction::Marker(MarkerAction::Replace(markers)));
        }
        let local = load_value::<Matrix>(store, LOCAL_TRANSFORM_KEY).filter(|local| {
            local
                .invert()
                .map_err(|err| warn!(%err, "ignoring stored local transform"))
                .is_ok()
        });
        if let Some(local) = local {
            self.dispatch(SessionAction::View(ViewAction::ExitZoomOut));
            self.dispatch(SessionAction::View(ViewAction::ExitMagnify));
            self.dispatch(SessionAction::View(ViewAction::SetLocal(local)));
        }
    }
}

fn store_value<T: Serialize + ?Sized>(store: &mut impl BlobStore, key: &str, value: &T) {
    match serde_json::to_value(value) {
        Ok(value) => store.set(key, value),
        Err(err) => warn!(key, %err, "skipping value that does not serialize"),
    }
}

fn load_value<T: DeserializeOwned>(store: &impl BlobStore, key: &str) -> Option<T> {
    let value = store.get(key)?;
    serde_json::from_value(value)
        .map_err(|err| warn!(key, %err, "ignoring stored value that does not decode"))
        .ok()
}
