//! Points, level, streak and badge accounting.
//!
//! ## Streak rules
//!
//! ```text
//! today == last        -> unchanged
//! today == last + 1    -> current += 1
//! anything else        -> current = 1   (gap, clock skew, or first activity)
//! ```
//!
//! `total_streak` is the best `current_streak` ever observed and never drops.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Points needed to climb one level.
pub const POINTS_PER_LEVEL: u64 = 500;

pub fn level_for(points: u64) -> u64 {
    points / POINTS_PER_LEVEL + 1
}

/// Persisted gamification state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamificationState {
    #[serde(default)]
    pub points: u64,
    /// Derived from `points`; kept in the persisted form for readers only.
    #[serde(default = "default_level")]
    pub level: u64,
    #[serde(default)]
    pub total_streak: u32,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub badges: Vec<String>,
    #[serde(default)]
    pub last_activity_date: Option<NaiveDate>,
}

fn default_level() -> u64 {
    1
}

impl Default for GamificationState {
    fn default() -> Self {
        Self {
            points: 0,
            level: 1,
            total_streak: 0,
            current_streak: 0,
            badges: Vec::new(),
            last_activity_date: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakChange {
    /// Activity already counted for this day.
    Unchanged,
    Extended,
    /// Started over at 1.
    Restarted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakUpdate {
    pub change: StreakChange,
    pub current_streak: u32,
    pub total_streak: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "GamificationState", into = "GamificationState")]
pub struct GamificationLedger {
    state: GamificationState,
}

impl From<GamificationState> for GamificationLedger {
    /// Re-derives the level and repairs `total_streak < current_streak`,
    /// which a hand-edited or stale blob may contain.
    fn from(mut state: GamificationState) -> Self {
        state.level = level_for(state.points);
        state.total_streak = state.total_streak.max(state.current_streak);
        Self { state }
    }
}

impl From<GamificationLedger> for GamificationState {
    fn from(ledger: GamificationLedger) -> Self {
        ledger.state
    }
}

impl GamificationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GamificationState {
        &self.state
    }

    pub fn points(&self) -> u64 {
        self.state.points
    }

    pub fn level(&self) -> u64 {
        self.state.level
    }

    pub fn current_streak(&self) -> u32 {
        self.state.current_streak
    }

    pub fn total_streak(&self) -> u32 {
        self.state.total_streak
    }

    pub fn last_activity_date(&self) -> Option<NaiveDate> {
        self.state.last_activity_date
    }

    pub fn badges(&self) -> &[String] {
        &self.state.badges
    }

    pub fn has_badge(&self, badge: &str) -> bool {
        self.state.badges.iter().any(|b| b == badge)
    }

    /// Points collected toward the next level.
    pub fn level_progress(&self) -> u64 {
        self.state.points % POINTS_PER_LEVEL
    }

    pub fn add_points(&mut self, amount: u64) {
        self.state.points = self.state.points.saturating_add(amount);
        self.state.level = level_for(self.state.points);
    }

    pub fn record_streak_activity(&mut self, today: NaiveDate) -> StreakUpdate {
        let change = match self.state.last_activity_date {
            Some(last) if last == today => StreakChange::Unchanged,
            Some(last) if last.succ_opt() == Some(today) => StreakChange::Extended,
            _ => StreakChange::Restarted,
        };

        match change {
            StreakChange::Unchanged => {}
            StreakChange::Extended => {
                self.state.current_streak = self.state.current_streak.saturating_add(1);
            }
            StreakChange::Restarted => self.state.current_streak = 1,
        }
        self.state.total_streak = self.state.total_streak.max(self.state.current_streak);
        self.state.last_activity_date = Some(today);

        StreakUpdate {
            change,
            current_streak: self.state.current_streak,
            total_streak: self.state.total_streak,
        }
    }

    /// Returns `true` if the badge was not held before.
    pub fn add_badge(&mut self, badge: &str) -> bool {
        if self.has_badge(badge) {
            return false;
        }
        self.state.badges.push(badge.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn ledger_active_on(d: u32, streak: u32) -> GamificationLedger {
        GamificationLedger::from(GamificationState {
            current_streak: streak,
            total_streak: streak,
            last_activity_date: Some(day(d)),
            ..GamificationState::default()
        })
    }

    #[test]
    fn points_accumulate_and_level_follows() {
        let mut ledger = GamificationLedger::new();
        ledger.add_points(10);
        ledger.add_points(20);
        assert_eq!(ledger.points(), 30);
        assert_eq!(ledger.level(), 1);
        ledger.add_points(500);
        assert_eq!(ledger.points(), 530);
        assert_eq!(ledger.level(), 2);
        assert_eq!(ledger.level_progress(), 30);
    }

    #[test]
    fn level_boundary() {
        assert_eq!(level_for(0), 1);
        assert_eq!(level_for(499), 1);
        assert_eq!(level_for(500), 2);
        assert_eq!(level_for(1000), 3);
    }

    #[test]
    fn next_day_extends_streak() {
        let mut ledger = ledger_active_on(1, 4);
        let update = ledger.record_streak_activity(day(2));
        assert_eq!(update.change, StreakChange::Extended);
        assert_eq!(ledger.current_streak(), 5);
        assert_eq!(ledger.total_streak(), 5);
    }

    #[test]
    fn gap_restarts_streak() {
        let mut ledger = ledger_active_on(1, 4);
        let update = ledger.record_streak_activity(day(5));
        assert_eq!(update.change, StreakChange::Restarted);
        assert_eq!(ledger.current_streak(), 1);
        assert_eq!(ledger.total_streak(), 4);
        assert_eq!(ledger.last_activity_date(), Some(day(5)));
    }

    #[test]
    fn same_day_is_unchanged() {
        let mut ledger = ledger_active_on(1, 4);
        let update = ledger.record_streak_activity(day(1));
        assert_eq!(update.change, StreakChange::Unchanged);
        assert_eq!(ledger.current_streak(), 4);
    }

    #[test]
    fn earlier_date_restarts_streak() {
        let mut ledger = ledger_active_on(10, 3);
        ledger.record_streak_activity(day(9));
        assert_eq!(ledger.current_streak(), 1);
        assert_eq!(ledger.total_streak(), 3);
    }

    #[test]
    fn first_activity_starts_at_one() {
        let mut ledger = GamificationLedger::new();
        ledger.record_streak_activity(day(3));
        assert_eq!(ledger.current_streak(), 1);
        assert_eq!(ledger.total_streak(), 1);
    }

    #[test]
    fn streak_crosses_month_boundary() {
        let mut ledger = GamificationLedger::from(GamificationState {
            current_streak: 2,
            total_streak: 2,
            last_activity_date: NaiveDate::from_ymd_opt(2024, 2, 29),
            ..GamificationState::default()
        });
        ledger.record_streak_activity(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(ledger.current_streak(), 3);
    }

    #[test]
    fn badges_are_idempotent() {
        let mut ledger = GamificationLedger::new();
        assert!(ledger.add_badge("x"));
        assert!(!ledger.add_badge("x"));
        assert_eq!(ledger.badges(), ["x".to_string()]);
    }

    #[test]
    fn loading_rederives_level_and_repairs_total() {
        let json = r#"{"points":1200,"level":9,"current_streak":5,"total_streak":2}"#;
        let ledger: GamificationLedger = serde_json::from_str(json).unwrap();
        assert_eq!(ledger.level(), 3);
        assert_eq!(ledger.total_streak(), 5);
        assert!(ledger.badges().is_empty());
    }
}
