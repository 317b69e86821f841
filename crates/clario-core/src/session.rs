//! Append-only log of focus and break sessions.
//!
//! A session is appended when a focus period begins and mutated at most once
//! afterwards, when it completes. Sessions that were paused or reset away stay
//! `is_completed == false` forever; the store never deletes anything.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Focus,
    Break,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusSession {
    pub id: String,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,
    /// Focus length in seconds, fixed at creation.
    pub focus_duration: u64,
    /// Break length in seconds, fixed at creation.
    pub break_duration: u64,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub linked_task_ids: Vec<String>,
    #[serde(rename = "type")]
    pub session_type: SessionType,
}

impl FocusSession {
    /// Whole minutes of focus this session was configured for.
    pub fn focus_minutes(&self) -> u64 {
        self.focus_duration / 60
    }
}

/// Everything but the id, which the store assigns.
#[derive(Debug, Clone)]
pub struct NewFocusSession {
    pub start_time: DateTime<Utc>,
    pub focus_duration: u64,
    pub break_duration: u64,
    pub session_type: SessionType,
    pub linked_task_ids: Vec<String>,
}

impl NewFocusSession {
    pub fn focus(start_time: DateTime<Utc>, focus_duration: u64, break_duration: u64) -> Self {
        Self {
            start_time,
            focus_duration,
            break_duration,
            session_type: SessionType::Focus,
            linked_task_ids: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_sessions: u64,
    pub completed_sessions: u64,
    /// Started but never completed (paused, reset, or abandoned).
    pub abandoned_sessions: u64,
    /// Sum of configured focus seconds across every session.
    pub total_focus_secs: u64,
    pub completed_focus_secs: u64,
    pub today_completed: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionStore {
    sessions: Vec<FocusSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new session under a fresh id and return the stored record.
    pub fn append(&mut self, new: NewFocusSession) -> &FocusSession {
        let session = FocusSession {
            id: Uuid::new_v4().to_string(),
            start_time: new.start_time,
            end_time: None,
            focus_duration: new.focus_duration,
            break_duration: new.break_duration,
            is_completed: false,
            linked_task_ids: new.linked_task_ids,
            session_type: new.session_type,
        };
        self.sessions.push(session);
        &self.sessions[self.sessions.len() - 1]
    }

    /// Mark a session completed.
    ///
    /// # Errors
    /// Returns [`StoreError::NotFound`] if no session has this id.
    pub fn mark_completed(
        &mut self,
        id: &str,
        end_time: DateTime<Utc>,
    ) -> Result<&FocusSession, StoreError> {
        let session = self
            .sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;
        session.is_completed = true;
        session.end_time = Some(end_time);
        Ok(session)
    }

    pub fn get(&self, id: &str) -> Option<&FocusSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// All sessions in insertion order.
    pub fn sessions(&self) -> &[FocusSession] {
        &self.sessions
    }

    /// The `n` most recent sessions, newest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &FocusSession> {
        self.sessions.iter().rev().take(n)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.sessions.iter().filter(|s| s.is_completed).count()
    }

    pub fn stats(&self, today: NaiveDate) -> SessionStats {
        let mut stats = SessionStats::default();
        for s in &self.sessions {
            stats.total_sessions += 1;
            stats.total_focus_secs += s.focus_duration;
            if s.is_completed {
                stats.completed_sessions += 1;
                stats.completed_focus_secs += s.focus_duration;
                if s.end_time.map(|t| t.date_naive()) == Some(today) {
                    stats.today_completed += 1;
                }
            } else {
                stats.abandoned_sessions += 1;
            }
        }
        stats
    }
}
