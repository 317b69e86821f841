use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::quotes::QuoteContext;
use crate::timer::TimerMode;

/// Every timer state change produces an Event.
/// The CLI prints them; notification layers react to completions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        session_id: String,
        focus_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        /// Mode that was running when paused.
        from: TimerMode,
        time_left: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    TimerConfigured {
        focus_minutes: u32,
        break_minutes: u32,
        at: DateTime<Utc>,
    },
    /// Focus period ran out; the break begins.
    SessionCompleted {
        session_id: Option<String>,
        points_awarded: u64,
        current_streak: u32,
        new_badges: Vec<String>,
        break_secs: u64,
        at: DateTime<Utc>,
    },
    /// Break ran out; back to idle.
    BreakCompleted {
        at: DateTime<Utc>,
    },
    /// Left a running focus or break without completing it.
    SessionAbandoned {
        session_id: Option<String>,
        from: TimerMode,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: TimerMode,
        time_left: u64,
        total_secs: u64,
        focus_minutes: u32,
        break_minutes: u32,
        sessions_completed: u32,
        current_session_id: Option<String>,
        progress_pct: f64,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Quote pool for the user-facing notification this event should raise.
    pub fn notification_context(&self) -> Option<QuoteContext> {
        match self {
            Event::SessionCompleted { .. } => Some(QuoteContext::Achievement),
            Event::BreakCompleted { .. } => Some(QuoteContext::Break),
            _ => None,
        }
    }

    /// Headline for the completion notification.
    pub fn notification_message(&self) -> Option<&'static str> {
        match self {
            Event::SessionCompleted { .. } => Some("Focus session complete! Time for a break."),
            Event::BreakCompleted { .. } => {
                Some("Break time's over! Ready for another focus session?")
            }
            _ => None,
        }
    }
}
