// Copyright 2025 the Projectory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ports to the host: a key-value blob store and a snapshot broadcaster.
//!
//! The session never reaches for storage or messaging on its own; hosts pass
//! these in at the points where they are needed.

use std::collections::BTreeMap;

use serde_json::Value;

/// Store key for the measurement lines.
pub const LINES_KEY: &str = "lines";
/// Store key for the markers.
pub const MARKERS_KEY: &str = "markers";
/// Store key for the user's local transform.
pub const LOCAL_TRANSFORM_KEY: &str = "local_transform";
/// Store key for the unit new lines are measured in.
pub const UNIT_KEY: &str = "unit";

/// An opaque key-value store for JSON blobs.
///
/// Writes are fire-and-forget; the session reads once at startup.
pub trait BlobStore {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<Value>;
    /// Stores `value` under `key`.
    fn set(&mut self, key: &str, value: Value);
}

/// A [`BlobStore`] held in memory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    entries: BTreeMap<String, Value>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_owned(), value);
    }
}

/// Outbound channel for state snapshots, e.g. to a second window.
pub trait Broadcast {
    /// Sends one snapshot.
    fn broadcast(&mut self, snapshot: &Value);
}

impl<F: FnMut(&Value)> Broadcast for F {
    fn broadcast(&mut self, snapshot: &Value) {
        self(snapshot);
    }
}
