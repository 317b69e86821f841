use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const FOCUS_MINUTES_RANGE: (u32, u32) = (1, 120);
pub const BREAK_MINUTES_RANGE: (u32, u32) = (1, 60);

/// Focus and break lengths in minutes.
///
/// Only constructible through [`TimerSettings::new`] (deserialization runs the
/// same checks), so the engine can assume both durations are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSettings")]
pub struct TimerSettings {
    focus_minutes: u32,
    break_minutes: u32,
}

#[derive(Deserialize)]
struct RawSettings {
    focus_minutes: u32,
    break_minutes: u32,
}

impl TryFrom<RawSettings> for TimerSettings {
    type Error = ValidationError;

    fn try_from(raw: RawSettings) -> Result<Self, Self::Error> {
        TimerSettings::new(raw.focus_minutes, raw.break_minutes)
    }
}

impl TimerSettings {
    /// # Errors
    /// Returns [`ValidationError::OutOfRange`] for durations outside
    /// 1..=120 focus minutes or 1..=60 break minutes.
    pub fn new(focus_minutes: u32, break_minutes: u32) -> Result<Self, ValidationError> {
        check_range("focus_minutes", focus_minutes, FOCUS_MINUTES_RANGE)?;
        check_range("break_minutes", break_minutes, BREAK_MINUTES_RANGE)?;
        Ok(Self {
            focus_minutes,
            break_minutes,
        })
    }

    pub fn focus_minutes(&self) -> u32 {
        self.focus_minutes
    }

    pub fn break_minutes(&self) -> u32 {
        self.break_minutes
    }

    pub fn focus_secs(&self) -> u64 {
        u64::from(self.focus_minutes) * 60
    }

    pub fn break_secs(&self) -> u64 {
        u64::from(self.break_minutes) * 60
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            focus_minutes: 25,
            break_minutes: 5,
        }
    }
}

fn check_range(field: &str, value: u32, (min, max): (u32, u32)) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value: i64::from(value),
            min: i64::from(min),
            max: i64::from(max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds() {
        assert!(TimerSettings::new(1, 1).is_ok());
        assert!(TimerSettings::new(120, 60).is_ok());
    }

    #[test]
    fn rejects_zero_and_oversized() {
        assert!(TimerSettings::new(0, 5).is_err());
        assert!(TimerSettings::new(25, 0).is_err());
        assert!(TimerSettings::new(121, 5).is_err());
        assert!(TimerSettings::new(25, 61).is_err());
    }

    #[test]
    fn deserialization_validates() {
        let ok: TimerSettings =
            serde_json::from_str(r#"{"focus_minutes":50,"break_minutes":10}"#).unwrap();
        assert_eq!(ok.focus_secs(), 3000);
        assert!(serde_json::from_str::<TimerSettings>(r#"{"focus_minutes":0,"break_minutes":10}"#)
            .is_err());
    }
}
