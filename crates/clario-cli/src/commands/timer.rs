use std::time::Duration;

use clap::Subcommand;
use clario_core::{AppData, Config, SavedTimer, TimerSettings};

use super::{emit, open_app, CmdResult};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start a focus session
    Start,
    /// Pause; the open session is left incomplete
    Pause,
    /// Reset to idle and clear the completed-session counter
    Reset,
    /// Reset away from a running session, reporting it as abandoned
    Abandon,
    /// Print current timer state as JSON
    Status,
    /// Run the countdown in the foreground until the break ends (Ctrl-C pauses)
    Run,
    /// Change focus/break lengths (only while idle)
    Configure {
        /// Focus minutes (1-120)
        #[arg(long)]
        focus: Option<u32>,
        /// Break minutes (1-60)
        #[arg(long = "break")]
        break_minutes: Option<u32>,
    },
}

pub fn run(action: TimerAction) -> CmdResult {
    let mut config = Config::load_or_default();
    let mut data = open_app()?;
    let mut timer = SavedTimer::load(&data, config.timer_settings_or_default())?;

    // Settle whatever ran out while no process was watching.
    let mut events = timer.catch_up(&mut data);

    match action {
        TimerAction::Start => events.extend(timer.engine.start(&mut data)),
        TimerAction::Pause => events.extend(timer.engine.pause()),
        TimerAction::Reset => events.push(timer.engine.reset()),
        TimerAction::Abandon => events.extend(timer.engine.abandon()),
        TimerAction::Status => events.push(timer.engine.snapshot()),
        TimerAction::Configure {
            focus,
            break_minutes,
        } => {
            if timer.engine.is_running() {
                return Err("timer is running; pause or reset it before configuring".into());
            }
            let current = timer.engine.settings();
            let settings = TimerSettings::new(
                focus.unwrap_or(current.focus_minutes()),
                break_minutes.unwrap_or(current.break_minutes()),
            )?;
            events.extend(timer.engine.configure(settings));
            config.timer.focus_minutes = settings.focus_minutes();
            config.timer.break_minutes = settings.break_minutes();
            config.save()?;
        }
        TimerAction::Run => {
            for event in &events {
                emit(event)?;
            }
            return run_foreground(timer, data);
        }
    }

    timer.sync(data.now());
    timer.save(&mut data)?;
    for event in &events {
        emit(event)?;
    }
    Ok(())
}

/// Drive the engine at 1 Hz until it returns to idle or Ctrl-C pauses it.
fn run_foreground(mut timer: SavedTimer, mut data: AppData) -> CmdResult {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(async {
        if let Some(event) = timer.engine.start(&mut data) {
            emit(&event)?;
        }
        timer.sync(data.now());
        timer.save(&mut data)?;

        let mut interval = tokio::time::interval(Duration::from_secs(1));
        interval.tick().await;
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    for event in timer.catch_up(&mut data) {
                        emit(&event)?;
                    }
                    timer.save(&mut data)?;
                    if !timer.engine.is_running() {
                        break;
                    }
                    tracing::debug!(remaining = %timer.engine.display_time(), mode = ?timer.engine.mode(), "tick");
                }
                _ = &mut ctrl_c => {
                    timer.catch_up(&mut data).iter().try_for_each(emit)?;
                    if let Some(event) = timer.engine.pause() {
                        emit(&event)?;
                    }
                    timer.sync(data.now());
                    timer.save(&mut data)?;
                    break;
                }
            }
        }
        Ok::<(), Box<dyn std::error::Error>>(())
    })?;

    Ok(())
}

