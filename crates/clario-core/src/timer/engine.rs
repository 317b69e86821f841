//! Timer engine implementation.
//!
//! The engine is a tick-driven countdown. It owns no thread and reads no
//! clock: the caller invokes `tick()` once per second and passes the
//! [`AppData`] context that session and points bookkeeping is written to.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Focus --time up--> Break --time up--> Idle
//!                   |                  |
//!                   +--pause / reset---+--> Idle
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(TimerSettings::default());
//! engine.start(&mut data);
//! // once per second:
//! if let Some(event) = engine.tick(&mut data) { /* notify */ }
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::settings::TimerSettings;
use crate::app::AppData;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    Idle,
    Focus,
    Break,
}

/// Core timer engine.
///
/// Serializable so a short-lived process (the CLI) can persist it between
/// invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    settings: TimerSettings,
    mode: TimerMode,
    /// Seconds remaining in the current mode.
    time_left: u64,
    /// Open focus session in the store. Reference only, never owned.
    #[serde(default)]
    current_session_id: Option<String>,
    /// Focus periods completed since the last reset.
    #[serde(default)]
    sessions_completed: u32,
}

impl TimerEngine {
    /// Create an idle engine with a full focus period ready.
    pub fn new(settings: TimerSettings) -> Self {
        Self {
            settings,
            mode: TimerMode::Idle,
            time_left: settings.focus_secs(),
            current_session_id: None,
            sessions_completed: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.mode != TimerMode::Idle
    }

    pub fn time_left(&self) -> u64 {
        self.time_left
    }

    pub fn settings(&self) -> TimerSettings {
        self.settings
    }

    pub fn current_session_id(&self) -> Option<&str> {
        self.current_session_id.as_deref()
    }

    pub fn sessions_completed(&self) -> u32 {
        self.sessions_completed
    }

    /// Full length of the current mode in seconds. Idle counts as focus.
    pub fn total_secs(&self) -> u64 {
        match self.mode {
            TimerMode::Break => self.settings.break_secs(),
            TimerMode::Idle | TimerMode::Focus => self.settings.focus_secs(),
        }
    }

    /// 0.0 .. 100.0 progress within the current mode.
    pub fn progress_pct(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.time_left);
        (elapsed as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
    }

    /// `MM:SS` rendering of the remaining time.
    pub fn display_time(&self) -> String {
        format!("{:02}:{:02}", self.time_left / 60, self.time_left % 60)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            mode: self.mode,
            time_left: self.time_left,
            total_secs: self.total_secs(),
            focus_minutes: self.settings.focus_minutes(),
            break_minutes: self.settings.break_minutes(),
            sessions_completed: self.sessions_completed,
            current_session_id: self.current_session_id.clone(),
            progress_pct: self.progress_pct(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a focus period. Only acts from idle; a running timer keeps its mode.
    pub fn start(&mut self, data: &mut AppData) -> Option<Event> {
        if self.mode != TimerMode::Idle {
            return None;
        }
        let focus_secs = self.settings.focus_secs();
        let session_id = data.begin_focus_session(focus_secs, self.settings.break_secs());
        self.current_session_id = Some(session_id.clone());
        self.mode = TimerMode::Focus;
        self.time_left = focus_secs;
        Some(Event::TimerStarted {
            session_id,
            focus_secs,
            at: data.now(),
        })
    }

    /// Stop ticking. The open session is left incomplete.
    pub fn pause(&mut self) -> Option<Event> {
        let from = self.mode;
        if from == TimerMode::Idle {
            return None;
        }
        self.mode = TimerMode::Idle;
        tracing::debug!(?from, time_left = self.time_left, "timer paused");
        Some(Event::TimerPaused {
            from,
            time_left: self.time_left,
            at: Utc::now(),
        })
    }

    pub fn reset(&mut self) -> Event {
        self.clear();
        Event::TimerReset { at: Utc::now() }
    }

    /// Reset away from a running focus or break, reporting the session left
    /// behind. The stored session stays incomplete.
    pub fn abandon(&mut self) -> Option<Event> {
        let from = self.mode;
        if from == TimerMode::Idle {
            return None;
        }
        let session_id = self.current_session_id.clone();
        self.clear();
        tracing::info!(?session_id, ?from, "session abandoned");
        Some(Event::SessionAbandoned {
            session_id,
            from,
            at: Utc::now(),
        })
    }

    /// Change durations. Ignored unless idle.
    pub fn configure(&mut self, settings: TimerSettings) -> Option<Event> {
        if self.mode != TimerMode::Idle {
            tracing::debug!("configure ignored while running");
            return None;
        }
        self.settings = settings;
        self.time_left = settings.focus_secs();
        Some(Event::TimerConfigured {
            focus_minutes: settings.focus_minutes(),
            break_minutes: settings.break_minutes(),
            at: Utc::now(),
        })
    }

    /// Advance one second. Returns an event when a mode runs out.
    ///
    /// The countdown reaches exactly zero on the tick that fires the
    /// transition, and never goes below it.
    pub fn tick(&mut self, data: &mut AppData) -> Option<Event> {
        let now = data.now();
        self.tick_at(now, data)
    }

    /// [`TimerEngine::tick`] for a second that ended at `at`. Completion
    /// bookkeeping and events are stamped with `at`.
    pub fn tick_at(&mut self, at: DateTime<Utc>, data: &mut AppData) -> Option<Event> {
        if self.mode == TimerMode::Idle {
            return None;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left > 0 {
            return None;
        }
        match self.mode {
            TimerMode::Focus => Some(self.complete_focus(at, data)),
            TimerMode::Break => Some(self.complete_break(at)),
            TimerMode::Idle => None,
        }
    }

    /// Apply up to `seconds` ticks at the current instant, stopping early
    /// once idle.
    pub fn advance(&mut self, seconds: u64, data: &mut AppData) -> Vec<Event> {
        let now = data.now();
        self.replay(seconds, data, |_| now)
    }

    /// Replay up to `seconds` ticks that started at `from`, stopping early
    /// once idle. Tick `n` (1-based) is stamped `from + n` seconds, so a
    /// period that ran out while nobody was watching keeps its real end time.
    pub fn advance_from(
        &mut self,
        from: DateTime<Utc>,
        seconds: u64,
        data: &mut AppData,
    ) -> Vec<Event> {
        self.replay(seconds, data, |n| from + Duration::seconds(n as i64))
    }

    fn replay(
        &mut self,
        seconds: u64,
        data: &mut AppData,
        stamp: impl Fn(u64) -> DateTime<Utc>,
    ) -> Vec<Event> {
        let mut events = Vec::new();
        let mut n = 0;
        while n < seconds && self.is_running() {
            n += 1;
            if let Some(event) = self.tick_at(stamp(n), data) {
                events.push(event);
            }
        }
        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete_focus(&mut self, at: DateTime<Utc>, data: &mut AppData) -> Event {
        let completion = match self.current_session_id.as_deref() {
            Some(id) => data.complete_focus_session_at(id, at),
            None => {
                tracing::warn!("focus period ended without an open session");
                None
            }
        };
        self.sessions_completed += 1;
        self.mode = TimerMode::Break;
        self.time_left = self.settings.break_secs();

        let (points_awarded, new_badges): (u64, Vec<String>) = completion
            .as_ref()
            .map(|c| {
                (
                    c.points_awarded,
                    c.new_badges.iter().map(|b| b.id().to_string()).collect(),
                )
            })
            .unwrap_or_default();
        Event::SessionCompleted {
            session_id: completion.map(|c| c.session_id),
            points_awarded,
            current_streak: data.gamification().current_streak(),
            new_badges,
            break_secs: self.time_left,
            at,
        }
    }

    fn complete_break(&mut self, at: DateTime<Utc>) -> Event {
        self.mode = TimerMode::Idle;
        self.time_left = self.settings.focus_secs();
        tracing::debug!("break finished");
        Event::BreakCompleted { at }
    }

    fn clear(&mut self) {
        self.mode = TimerMode::Idle;
        self.current_session_id = None;
        self.time_left = self.settings.focus_secs();
        self.sessions_completed = 0;
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(TimerSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::storage::MemoryKv;
    use chrono::{TimeZone, Utc};

    fn data() -> AppData {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap());
        AppData::load(Box::new(MemoryKv::new()), Box::new(clock)).unwrap()
    }

    fn short() -> TimerSettings {
        TimerSettings::new(1, 1).unwrap()
    }

    #[test]
    fn start_pause_reset() {
        let mut data = data();
        let mut engine = TimerEngine::new(short());
        assert_eq!(engine.mode(), TimerMode::Idle);
        assert_eq!(engine.time_left(), 60);

        assert!(engine.start(&mut data).is_some());
        assert_eq!(engine.mode(), TimerMode::Focus);
        assert!(engine.current_session_id().is_some());

        assert!(engine.pause().is_some());
        assert_eq!(engine.mode(), TimerMode::Idle);
        assert!(engine.pause().is_none());

        engine.reset();
        assert!(engine.current_session_id().is_none());
        assert_eq!(engine.time_left(), 60);
    }

    #[test]
    fn start_while_running_is_noop() {
        let mut data = data();
        let mut engine = TimerEngine::new(short());
        engine.start(&mut data);
        assert!(engine.start(&mut data).is_none());
        assert_eq!(data.sessions().len(), 1);
    }

    #[test]
    fn idle_tick_does_nothing() {
        let mut data = data();
        let mut engine = TimerEngine::new(short());
        assert!(engine.tick(&mut data).is_none());
        assert_eq!(engine.time_left(), 60);
    }

    #[test]
    fn full_cycle_returns_to_idle() {
        let mut data = data();
        let mut engine = TimerEngine::new(short());
        engine.start(&mut data);

        let events = engine.advance(10_000, &mut data);
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], Event::SessionCompleted { points_awarded: 10, .. }));
        assert!(matches!(events[1], Event::BreakCompleted { .. }));
        assert_eq!(engine.mode(), TimerMode::Idle);
        assert_eq!(engine.time_left(), 60);
        assert_eq!(engine.sessions_completed(), 1);
    }

    #[test]
    fn configure_only_while_idle() {
        let mut data = data();
        let mut engine = TimerEngine::new(short());
        let wide = TimerSettings::new(50, 10).unwrap();
        assert!(engine.configure(wide).is_some());
        assert_eq!(engine.time_left(), 3000);

        engine.start(&mut data);
        assert!(engine.configure(short()).is_none());
        assert_eq!(engine.settings(), wide);
    }

    #[test]
    fn abandon_reports_open_session() {
        let mut data = data();
        let mut engine = TimerEngine::new(short());
        assert!(engine.abandon().is_none());
        engine.start(&mut data);
        let id = engine.current_session_id().map(str::to_string);
        match engine.abandon() {
            Some(Event::SessionAbandoned { session_id, from, .. }) => {
                assert_eq!(session_id, id);
                assert_eq!(from, TimerMode::Focus);
            }
            other => panic!("expected SessionAbandoned, got {other:?}"),
        }
        assert!(!data.sessions().sessions()[0].is_completed);
    }

    #[test]
    fn display_time_pads() {
        let engine = TimerEngine::new(TimerSettings::new(5, 1).unwrap());
        assert_eq!(engine.display_time(), "05:00");
    }

    #[test]
    fn snapshot_returns_valid_event() {
        let engine = TimerEngine::default();
        match engine.snapshot() {
            Event::StateSnapshot {
                mode,
                time_left,
                total_secs,
                progress_pct,
                ..
            } => {
                assert_eq!(mode, TimerMode::Idle);
                assert_eq!(time_left, 25 * 60);
                assert_eq!(total_secs, 25 * 60);
                assert_eq!(progress_pct, 0.0);
            }
            other => panic!("Expected StateSnapshot, got {other:?}"),
        }
    }
}
