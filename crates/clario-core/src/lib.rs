//! # Clario Core Library
//!
//! Focus timer and session bookkeeping for the Clario productivity app.
//! The CLI binary is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a tick-driven idle/focus/break countdown. The caller
//!   invokes `tick()` once per second.
//! - **App Data**: the context object that owns sessions, gamification and
//!   mindfulness records, and saves each after every committed change.
//! - **Storage**: SQLite key-value blobs and TOML configuration.
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: countdown state machine
//! - [`SessionStore`]: append-only focus session log
//! - [`GamificationLedger`]: points, level, streaks, badges
//! - [`AppData`]: shared context passed to the engine

pub mod app;
pub mod clock;
pub mod error;
pub mod events;
pub mod gamification;
pub mod mindfulness;
pub mod quotes;
pub mod session;
pub mod storage;
pub mod timer;

pub use app::{AppData, FocusCompletion};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ConfigError, CoreError, StorageError, StoreError, ValidationError};
pub use events::Event;
pub use gamification::{Badge, GamificationLedger, GamificationState, StreakChange, StreakUpdate};
pub use mindfulness::{BreathingExercise, BreathingPhase, MindfulnessKind, MindfulnessSession};
pub use quotes::QuoteContext;
pub use session::{FocusSession, SessionStats, SessionStore, SessionType};
pub use storage::{Config, KvStore, MemoryKv, SqliteKv};
pub use timer::{SavedTimer, TimerEngine, TimerMode, TimerSettings};
