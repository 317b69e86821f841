//! Mindfulness sessions and the guided breathing cycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Points credited for each finished mindfulness session.
pub const MINDFULNESS_POINTS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MindfulnessKind {
    Breathing,
    Meditation,
}

impl std::str::FromStr for MindfulnessKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breathing" => Ok(MindfulnessKind::Breathing),
            "meditation" => Ok(MindfulnessKind::Meditation),
            _ => Err(format!("Invalid mindfulness kind: '{s}'. Use breathing or meditation.")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MindfulnessSession {
    pub id: String,
    /// Seconds.
    pub duration: u64,
    pub completed_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: MindfulnessKind,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MindfulnessLog {
    sessions: Vec<MindfulnessSession>,
}

impl MindfulnessLog {
    pub fn append(
        &mut self,
        duration: u64,
        completed_at: DateTime<Utc>,
        kind: MindfulnessKind,
    ) -> &MindfulnessSession {
        self.sessions.push(MindfulnessSession {
            id: Uuid::new_v4().to_string(),
            duration,
            completed_at,
            kind,
        });
        &self.sessions[self.sessions.len() - 1]
    }

    pub fn sessions(&self) -> &[MindfulnessSession] {
        &self.sessions
    }

    pub fn total_secs(&self) -> u64 {
        self.sessions.iter().map(|s| s.duration).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreathingPhase {
    Idle,
    Inhale,
    Hold,
    Exhale,
}

impl BreathingPhase {
    /// Seconds spent in each active phase.
    pub const PHASE_SECS: u32 = 4;

    fn next(self) -> BreathingPhase {
        match self {
            BreathingPhase::Inhale => BreathingPhase::Hold,
            BreathingPhase::Hold => BreathingPhase::Exhale,
            BreathingPhase::Exhale => BreathingPhase::Inhale,
            BreathingPhase::Idle => BreathingPhase::Idle,
        }
    }
}

/// Tick-driven inhale / hold / exhale loop. Call `tick()` once per second.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreathingExercise {
    phase: BreathingPhase,
    phase_elapsed: u32,
    elapsed_secs: u64,
}

impl Default for BreathingExercise {
    fn default() -> Self {
        Self {
            phase: BreathingPhase::Idle,
            phase_elapsed: 0,
            elapsed_secs: 0,
        }
    }
}

impl BreathingExercise {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> BreathingPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase != BreathingPhase::Idle
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn start(&mut self) {
        self.phase = BreathingPhase::Inhale;
        self.phase_elapsed = 0;
        self.elapsed_secs = 0;
    }

    /// Returns the new phase when the tick crosses a phase boundary.
    pub fn tick(&mut self) -> Option<BreathingPhase> {
        if !self.is_active() {
            return None;
        }
        self.elapsed_secs += 1;
        self.phase_elapsed += 1;
        if self.phase_elapsed >= BreathingPhase::PHASE_SECS {
            self.phase = self.phase.next();
            self.phase_elapsed = 0;
            return Some(self.phase);
        }
        None
    }

    /// Stop and report how long the exercise ran, in seconds.
    pub fn stop(&mut self) -> u64 {
        let elapsed = self.elapsed_secs;
        *self = Self::default();
        elapsed
    }
}
