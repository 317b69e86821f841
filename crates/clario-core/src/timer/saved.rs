//! Persisted engine for short-lived callers.
//!
//! A process that exits between commands stores the engine together with the
//! instant of the last applied tick. On the next load, `catch_up` replays the
//! whole seconds that elapsed in between.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::engine::TimerEngine;
use super::settings::TimerSettings;
use crate::app::AppData;
use crate::error::StorageError;
use crate::events::Event;
use crate::storage::{keys, load_json, save_json};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedTimer {
    pub engine: TimerEngine,
    /// Instant the countdown was last brought up to date. `None` while idle.
    #[serde(default)]
    pub last_tick_at: Option<DateTime<Utc>>,
}

impl SavedTimer {
    pub fn new(settings: TimerSettings) -> Self {
        Self {
            engine: TimerEngine::new(settings),
            last_tick_at: None,
        }
    }

    /// Load the stored engine, or a fresh idle one built from `settings`.
    ///
    /// `settings` is the configured source of truth: an idle stored engine
    /// picks it up, while a running one keeps the durations it started with
    /// until it next returns to idle.
    ///
    /// # Errors
    /// Returns an error only if the backend fails to read.
    pub fn load(data: &AppData, settings: TimerSettings) -> Result<Self, StorageError> {
        let saved: Option<SavedTimer> = load_json(data.kv(), keys::TIMER_ENGINE)?;
        let mut timer = saved.unwrap_or_else(|| Self::new(settings));
        if !timer.engine.is_running() && timer.engine.settings() != settings {
            tracing::debug!(?settings, "applying configured durations to idle timer");
            timer.engine.configure(settings);
        }
        Ok(timer)
    }

    /// # Errors
    /// Returns an error if the backend write fails.
    pub fn save(&self, data: &mut AppData) -> Result<(), StorageError> {
        save_json(data.kv_mut(), keys::TIMER_ENGINE, self)
    }

    /// Apply the ticks owed since `last_tick_at`.
    pub fn catch_up(&mut self, data: &mut AppData) -> Vec<Event> {
        let now = data.now();
        let mut events = Vec::new();
        if let (Some(last), true) = (self.last_tick_at, self.engine.is_running()) {
            let owed = (now - last).num_seconds().max(0);
            events = self.engine.advance_from(last, owed as u64, data);
            self.last_tick_at = Some(last + Duration::seconds(owed));
        }
        self.sync(now);
        events
    }

    /// Record `now` as the tick reference after a command changed the mode.
    pub fn sync(&mut self, now: DateTime<Utc>) {
        if !self.engine.is_running() {
            self.last_tick_at = None;
        } else if self.last_tick_at.is_none() {
            self.last_tick_at = Some(now);
        }
    }
}
