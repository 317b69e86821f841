use std::time::Duration;

use clap::Subcommand;
use clario_core::{AppData, BreathingExercise, BreathingPhase, Config, MindfulnessKind};
use serde_json::json;

use super::{open_app, print_json, CmdResult};

#[derive(Subcommand)]
pub enum MindfulnessAction {
    /// Record a finished mindfulness session
    Log {
        /// Length in minutes (defaults to mindfulness.breathing_minutes)
        #[arg(long)]
        minutes: Option<u32>,
        /// breathing or meditation
        #[arg(long, default_value = "breathing")]
        kind: MindfulnessKind,
    },
    /// Guided 4-4-4 breathing in the foreground (Ctrl-C stops early)
    Breathe {
        /// Length in minutes (defaults to mindfulness.breathing_minutes)
        #[arg(long)]
        minutes: Option<u32>,
    },
    /// List logged sessions
    List,
}

pub fn run(action: MindfulnessAction) -> CmdResult {
    let config = Config::load_or_default();
    let mut data = open_app()?;

    match action {
        MindfulnessAction::Log { minutes, kind } => {
            let minutes = minutes.unwrap_or(config.mindfulness.breathing_minutes);
            if minutes == 0 {
                return Err("minutes must be at least 1".into());
            }
            log_session(&mut data, u64::from(minutes) * 60, kind)?;
        }
        MindfulnessAction::Breathe { minutes } => {
            let minutes = minutes.unwrap_or(config.mindfulness.breathing_minutes);
            if minutes == 0 {
                return Err("minutes must be at least 1".into());
            }
            let elapsed = breathe(u64::from(minutes) * 60)?;
            if elapsed == 0 {
                tracing::info!("breathing stopped before the first second");
                return Ok(());
            }
            log_session(&mut data, elapsed, MindfulnessKind::Breathing)?;
        }
        MindfulnessAction::List => {
            print_json(&json!({
                "sessions": data.mindfulness().sessions(),
                "total_secs": data.mindfulness().total_secs(),
            }))?;
        }
    }
    Ok(())
}

fn log_session(data: &mut AppData, duration_secs: u64, kind: MindfulnessKind) -> CmdResult {
    let session = data.complete_mindfulness(duration_secs, kind);
    print_json(&json!({
        "session": session,
        "points": data.gamification().points(),
        "level": data.gamification().level(),
    }))
}

/// Run the breathing loop at 1 Hz for up to `limit_secs`. Returns seconds elapsed.
fn breathe(limit_secs: u64) -> Result<u64, Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let elapsed = rt.block_on(async {
        let mut exercise = BreathingExercise::new();
        exercise.start();
        print_phase(exercise.phase());

        let mut interval = tokio::time::interval(Duration::from_secs(1));
        interval.tick().await;
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Some(phase) = exercise.tick() {
                        print_phase(phase);
                    }
                    if exercise.elapsed_secs() >= limit_secs {
                        break;
                    }
                }
                _ = &mut ctrl_c => break,
            }
        }
        exercise.stop()
    });

    Ok(elapsed)
}

fn print_phase(phase: BreathingPhase) {
    let prompt = match phase {
        BreathingPhase::Inhale => "Breathe in...",
        BreathingPhase::Hold => "Hold...",
        BreathingPhase::Exhale => "Breathe out...",
        BreathingPhase::Idle => return,
    };
    eprintln!("{prompt}");
}
