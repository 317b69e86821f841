//! Badge catalog and threshold evaluation.

use serde::{Deserialize, Serialize};

use super::ledger::GamificationLedger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    FirstSession,
    FiveSessions,
    TenSessions,
    ThreeDayStreak,
    SevenDayStreak,
}

impl Badge {
    pub const ALL: [Badge; 5] = [
        Badge::FirstSession,
        Badge::FiveSessions,
        Badge::TenSessions,
        Badge::ThreeDayStreak,
        Badge::SevenDayStreak,
    ];

    /// Identifier stored in the ledger's badge set.
    pub fn id(&self) -> &'static str {
        match self {
            Badge::FirstSession => "first-session",
            Badge::FiveSessions => "5-sessions",
            Badge::TenSessions => "10-sessions",
            Badge::ThreeDayStreak => "3-streak",
            Badge::SevenDayStreak => "7-streak",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Badge::FirstSession => "Focused",
            Badge::FiveSessions => "Time Master",
            Badge::TenSessions => "Unstoppable",
            Badge::ThreeDayStreak => "On Fire",
            Badge::SevenDayStreak => "Week Warrior",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Badge::FirstSession => "Complete your first focus session",
            Badge::FiveSessions => "Complete 5 focus sessions",
            Badge::TenSessions => "Complete 10 focus sessions",
            Badge::ThreeDayStreak => "3-day streak",
            Badge::SevenDayStreak => "7-day streak",
        }
    }

    pub fn from_id(id: &str) -> Option<Badge> {
        Badge::ALL.into_iter().find(|b| b.id() == id)
    }

    fn reached(&self, progress: &BadgeProgress) -> bool {
        match self {
            Badge::FirstSession => progress.completed_sessions >= 1,
            Badge::FiveSessions => progress.completed_sessions >= 5,
            Badge::TenSessions => progress.completed_sessions >= 10,
            Badge::ThreeDayStreak => progress.current_streak >= 3,
            Badge::SevenDayStreak => progress.current_streak >= 7,
        }
    }
}

/// Counters the thresholds are checked against.
#[derive(Debug, Clone, Copy, Default)]
pub struct BadgeProgress {
    pub completed_sessions: usize,
    pub current_streak: u32,
}

/// Award every reached badge the ledger does not hold yet.
/// Returns the newly earned ones in catalog order.
pub fn award_reached(ledger: &mut GamificationLedger, progress: &BadgeProgress) -> Vec<Badge> {
    Badge::ALL
        .into_iter()
        .filter(|b| b.reached(progress))
        .filter(|b| ledger.add_badge(b.id()))
        .collect()
}
