mod engine;
mod saved;
mod settings;

pub use engine::{TimerEngine, TimerMode};
pub use saved::SavedTimer;
pub use settings::{TimerSettings, BREAK_MINUTES_RANGE, FOCUS_MINUTES_RANGE};
