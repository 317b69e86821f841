//! Application data context.
//!
//! `AppData` owns the three persisted field groups (sessions, gamification,
//! mindfulness) and is the only writer of each. Every committed mutation is
//! followed by an immediate save of the touched key; there is no batching.
//! Save failures are logged and never unwind a mutation that already
//! happened in memory.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::clock::Clock;
use crate::error::StorageError;
use crate::gamification::{award_reached, Badge, BadgeProgress, GamificationLedger, StreakUpdate};
use crate::mindfulness::{MindfulnessKind, MindfulnessLog, MindfulnessSession, MINDFULNESS_POINTS};
use crate::session::{NewFocusSession, SessionStats, SessionStore, SessionType};
use crate::storage::{keys, load_json, save_json, KvStore};

/// Points per whole focus minute of a completed session.
pub const POINTS_PER_FOCUS_MINUTE: u64 = 10;

/// Bookkeeping produced by a completed focus session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FocusCompletion {
    pub session_id: String,
    pub points_awarded: u64,
    pub streak: StreakUpdate,
    pub new_badges: Vec<Badge>,
}

pub struct AppData {
    sessions: SessionStore,
    gamification: GamificationLedger,
    mindfulness: MindfulnessLog,
    kv: Box<dyn KvStore>,
    clock: Box<dyn Clock>,
}

impl AppData {
    /// Load every field group once. Malformed blobs fall back to defaults.
    ///
    /// # Errors
    /// Returns an error only if the backend itself fails to read.
    pub fn load(kv: Box<dyn KvStore>, clock: Box<dyn Clock>) -> Result<Self, StorageError> {
        let sessions = load_json(kv.as_ref(), keys::FOCUS_SESSIONS)?;
        let gamification = load_json(kv.as_ref(), keys::GAMIFICATION)?;
        let mindfulness = load_json(kv.as_ref(), keys::MINDFULNESS_SESSIONS)?;
        Ok(Self {
            sessions,
            gamification,
            mindfulness,
            kv,
            clock,
        })
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn gamification(&self) -> &GamificationLedger {
        &self.gamification
    }

    pub fn mindfulness(&self) -> &MindfulnessLog {
        &self.mindfulness
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn session_stats(&self) -> SessionStats {
        self.sessions.stats(self.today())
    }

    pub fn kv(&self) -> &dyn KvStore {
        self.kv.as_ref()
    }

    pub fn kv_mut(&mut self) -> &mut dyn KvStore {
        self.kv.as_mut()
    }

    // ── Sessions ─────────────────────────────────────────────────────

    /// Open a new, incomplete focus session starting now. Returns its id.
    pub fn begin_focus_session(&mut self, focus_secs: u64, break_secs: u64) -> String {
        let start = self.now();
        let id = self
            .sessions
            .append(NewFocusSession::focus(start, focus_secs, break_secs))
            .id
            .clone();
        tracing::info!(session_id = %id, focus_secs, "focus session started");
        self.persist_sessions();
        id
    }

    /// Mark a session completed now and credit its points and streak.
    ///
    /// Unknown ids are logged and ignored: nothing is credited.
    pub fn complete_focus_session(&mut self, id: &str) -> Option<FocusCompletion> {
        let end = self.now();
        self.complete_focus_session_at(id, end)
    }

    /// Like [`AppData::complete_focus_session`], but for a session that ran
    /// out at `end`. The streak is credited to the UTC date of `end`.
    pub fn complete_focus_session_at(
        &mut self,
        id: &str,
        end: DateTime<Utc>,
    ) -> Option<FocusCompletion> {
        let session = match self.sessions.mark_completed(id, end) {
            Ok(session) => session.clone(),
            Err(e) => {
                tracing::warn!(error = %e, "completion for unknown session ignored");
                return None;
            }
        };
        self.persist_sessions();

        let points_awarded = match session.session_type {
            SessionType::Focus => session.focus_minutes() * POINTS_PER_FOCUS_MINUTE,
            SessionType::Break => 0,
        };
        self.gamification.add_points(points_awarded);
        let streak = self.gamification.record_streak_activity(end.date_naive());
        let progress = BadgeProgress {
            completed_sessions: self.sessions.completed_count(),
            current_streak: self.gamification.current_streak(),
        };
        let new_badges = award_reached(&mut self.gamification, &progress);
        self.persist_gamification();

        tracing::info!(
            session_id = %id,
            points_awarded,
            current_streak = streak.current_streak,
            "focus session completed"
        );
        Some(FocusCompletion {
            session_id: session.id,
            points_awarded,
            streak,
            new_badges,
        })
    }

    // ── Gamification ─────────────────────────────────────────────────

    pub fn add_points(&mut self, amount: u64) {
        self.gamification.add_points(amount);
        self.persist_gamification();
    }

    pub fn add_badge(&mut self, badge: &str) -> bool {
        let added = self.gamification.add_badge(badge);
        if added {
            self.persist_gamification();
        }
        added
    }

    // ── Mindfulness ──────────────────────────────────────────────────

    /// Log a finished mindfulness session and credit its points.
    pub fn complete_mindfulness(
        &mut self,
        duration_secs: u64,
        kind: MindfulnessKind,
    ) -> MindfulnessSession {
        let at = self.now();
        let session = self.mindfulness.append(duration_secs, at, kind).clone();
        self.persist_mindfulness();
        self.add_points(MINDFULNESS_POINTS);
        tracing::info!(session_id = %session.id, duration_secs, "mindfulness session logged");
        session
    }

    // ── Persistence ──────────────────────────────────────────────────

    /// Write every field group.
    ///
    /// # Errors
    /// Returns the first backend failure.
    pub fn save_all(&mut self) -> Result<(), StorageError> {
        save_json(self.kv.as_mut(), keys::FOCUS_SESSIONS, &self.sessions)?;
        save_json(self.kv.as_mut(), keys::GAMIFICATION, &self.gamification)?;
        save_json(self.kv.as_mut(), keys::MINDFULNESS_SESSIONS, &self.mindfulness)?;
        Ok(())
    }

    fn persist_sessions(&mut self) {
        if let Err(e) = save_json(self.kv.as_mut(), keys::FOCUS_SESSIONS, &self.sessions) {
            tracing::error!(error = %e, "failed to save focus sessions");
        }
    }

    fn persist_gamification(&mut self) {
        if let Err(e) = save_json(self.kv.as_mut(), keys::GAMIFICATION, &self.gamification) {
            tracing::error!(error = %e, "failed to save gamification state");
        }
    }

    fn persist_mindfulness(&mut self) {
        if let Err(e) = save_json(self.kv.as_mut(), keys::MINDFULNESS_SESSIONS, &self.mindfulness) {
            tracing::error!(error = %e, "failed to save mindfulness sessions");
        }
    }
}
