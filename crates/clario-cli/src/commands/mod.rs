pub mod config;
pub mod mindfulness;
pub mod progress;
pub mod quote;
pub mod sessions;
pub mod timer;

use clario_core::{AppData, Event, SqliteKv, SystemClock};
use serde::Serialize;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Open the on-disk store with the system clock.
pub fn open_app() -> Result<AppData, Box<dyn std::error::Error>> {
    let kv = SqliteKv::open()?;
    Ok(AppData::load(Box::new(kv), Box::new(SystemClock))?)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print an event, followed by its user-facing notification if it has one.
pub fn emit(event: &Event) -> CmdResult {
    print_json(event)?;
    if let (Some(message), Some(context)) =
        (event.notification_message(), event.notification_context())
    {
        let quote = clario_core::quotes::pick(context, &mut rand::thread_rng());
        print_json(&serde_json::json!({
            "type": "notification",
            "title": "Clario Timer",
            "message": message,
            "quote": quote,
        }))?;
    }
    Ok(())
}
