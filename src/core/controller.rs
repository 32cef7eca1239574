//! Tracker state machine
//!
//! Owns the live `TrackerState`, applies the two user transitions (add an
//! entry, reset everything), persists after each one and then renders.
//! A transition whose save fails is rolled back, so memory always matches
//! the last durable state.

use chrono::{DateTime, Utc};
use log::debug;

use super::{LogEntry, Renderer, TrackerState, TrackerView};
use crate::error::StoreError;
use crate::store::{PersistedStore, Storage};
use crate::utils::Timezone;

/// Result of a user action that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// State changed, was saved and rendered
    Applied,
    /// Description was blank after trimming; nothing happened
    EmptyInput,
    /// Reset was not confirmed; nothing happened
    Declined,
}

pub(crate) struct TrackerController<S, R> {
    store: PersistedStore<S>,
    renderer: R,
    timezone: Timezone,
    state: TrackerState,
    input: String,
}

impl<S: Storage, R: Renderer> TrackerController<S, R> {
    /// Loads the stored state once; a missing or corrupt record starts empty.
    pub(crate) fn new(store: PersistedStore<S>, renderer: R, timezone: Timezone) -> Self {
        let state = store.load();
        Self {
            store,
            renderer,
            timezone,
            state,
            input: String::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &TrackerState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &PersistedStore<S> {
        &self.store
    }

    #[cfg(test)]
    pub(crate) fn store_mut_for_tests(&mut self) -> &mut PersistedStore<S> {
        &mut self.store
    }

    #[cfg(test)]
    pub(crate) fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Pending description, as typed
    pub(crate) fn input(&self) -> &str {
        &self.input
    }

    pub(crate) fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Whether `submit` would do anything
    pub(crate) fn can_submit(&self) -> bool {
        !self.input.trim().is_empty()
    }

    /// Add an entry from the pending input.
    pub(crate) fn submit(&mut self) -> Result<Outcome, StoreError> {
        let raw = std::mem::take(&mut self.input);
        let result = self.add_entry(&raw);
        if !matches!(result, Ok(Outcome::Applied)) {
            self.input = raw;
        }
        result
    }

    pub(crate) fn add_entry(&mut self, raw: &str) -> Result<Outcome, StoreError> {
        self.add_entry_at(raw, Utc::now())
    }

    pub(crate) fn add_entry_at(
        &mut self,
        raw: &str,
        now: DateTime<Utc>,
    ) -> Result<Outcome, StoreError> {
        let description = raw.trim();
        if description.is_empty() {
            return Ok(Outcome::EmptyInput);
        }

        let entry = LogEntry::new(description.to_string(), now, self.timezone);
        self.state.record(entry);
        if let Err(e) = self.store.save(&self.state) {
            self.state.discard_newest();
            return Err(e);
        }
        debug!("Recorded entry #{}", self.state.counter);

        self.input.clear();
        self.render();
        Ok(Outcome::Applied)
    }

    /// Clear counter and log once `confirm` agrees. Irreversible.
    pub(crate) fn reset_all<F>(&mut self, confirm: F) -> Result<Outcome, StoreError>
    where
        F: FnOnce(&TrackerState) -> bool,
    {
        if !confirm(&self.state) {
            return Ok(Outcome::Declined);
        }

        let previous = std::mem::take(&mut self.state);
        if let Err(e) = self.store.save(&self.state) {
            self.state = previous;
            return Err(e);
        }
        debug!("Reset tracker ({} entries cleared)", previous.logs.len());

        self.input.clear();
        self.render();
        Ok(Outcome::Applied)
    }

    /// Push the current state to the renderer.
    pub(crate) fn render(&mut self) {
        let view = TrackerView::from(&self.state);
        self.renderer.render(view);
    }
}
