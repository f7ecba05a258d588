//! Scroll position bridge between the viewport and session history.
//!
//! The offset is stored on the history entry being left, so that coming back
//! to that entry (back/forward, reload) lands on the same spot. Changing the
//! fragment pushes a new entry, therefore [`ScrollMemory::save`] has to run
//! before any fragment mutation.

use serde::{Deserialize, Serialize};
use toplist_logging::{toplist_debug, toplist_trace};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollRecord {
    pub x: f64,
    pub y: f64,
}

/// Shape of the state attached to a history entry.
#[derive(Debug, Serialize, Deserialize)]
struct ScrollState {
    position: ScrollRecord,
}

/// Browser-like session history.
pub trait SessionHistory {
    /// Fragment of the current entry, without the leading `#`.
    fn fragment(&self) -> &str;
    /// Navigates to `fragment`, pushing a new entry and dropping forward entries.
    /// Returns `false`, and leaves history untouched, when the fragment is unchanged.
    fn push_fragment(&mut self, fragment: &str) -> bool;
    /// Replaces the state of the current entry in place.
    fn replace_state(&mut self, state: serde_json::Value);
    fn state(&self) -> Option<&serde_json::Value>;
    /// Moves one entry back. Returns `false` at the oldest entry.
    fn back(&mut self) -> bool;
    /// Moves one entry forward. Returns `false` at the newest entry.
    fn forward(&mut self) -> bool;
}

pub trait Viewport {
    fn offset(&self) -> ScrollRecord;
    /// Jumps to `record` without animation.
    fn scroll_to(&mut self, record: ScrollRecord);
}

/// Holds at most one restore waiting for the next rendering pass to finish.
#[derive(Debug, Default)]
pub struct ScrollMemory {
    pending: Option<ScrollRecord>,
}

impl ScrollMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes the viewport offset into the current history entry.
    pub fn save<H, V>(history: &mut H, viewport: &V)
    where
        H: SessionHistory + ?Sized,
        V: Viewport + ?Sized,
    {
        let position = viewport.offset();
        let state = ScrollState { position };
        match serde_json::to_value(&state) {
            Ok(value) => {
                toplist_trace!(
                    "saved scroll ({}, {}) on #{}",
                    position.x,
                    position.y,
                    history.fragment()
                );
                history.replace_state(value);
            }
            Err(err) => toplist_debug!("scroll state not serializable: {}", err),
        }
    }

    /// Arms a restore from the current history entry. Returns whether one was found.
    pub fn restore<H>(&mut self, history: &H) -> bool
    where
        H: SessionHistory + ?Sized,
    {
        let record = history
            .state()
            .and_then(|value| serde_json::from_value::<ScrollState>(value.clone()).ok())
            .map(|state| state.position);
        if record.is_some() {
            self.pending = record;
        }
        record.is_some()
    }

    /// Applies the armed restore, once. Called after the rendering pass.
    pub fn settle<V>(&mut self, viewport: &mut V) -> Option<ScrollRecord>
    where
        V: Viewport + ?Sized,
    {
        let record = self.pending.take()?;
        viewport.scroll_to(record);
        Some(record)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
