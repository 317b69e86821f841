//! Integration tests for on-disk persistence.
//!
//! Each field group lives under its own key in a SQLite file; reopening the
//! file restores them, and corrupt blobs degrade to defaults.

use chrono::{Duration, TimeZone, Utc};
use clario_core::storage::keys;
use clario_core::{
    AppData, Clock, KvStore, ManualClock, MindfulnessKind, SavedTimer, SqliteKv, TimerMode,
    TimerSettings,
};

fn open(path: &std::path::Path, clock: &ManualClock) -> AppData {
    let kv = SqliteKv::open_at(path).unwrap();
    AppData::load(Box::new(kv), Box::new(clock.clone())).unwrap()
}

#[test]
fn state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clario.db");
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 4, 2, 7, 30, 0).unwrap());

    {
        let mut data = open(&path, &clock);
        let mut timer = SavedTimer::new(TimerSettings::new(1, 1).unwrap());
        timer.engine.start(&mut data);
        timer.engine.advance(60, &mut data);
        data.complete_mindfulness(300, MindfulnessKind::Meditation);
        timer.sync(data.now());
        timer.save(&mut data).unwrap();
    }

    let data = open(&path, &clock);
    assert_eq!(data.sessions().len(), 1);
    assert!(data.sessions().sessions()[0].is_completed);
    assert_eq!(data.gamification().points(), 15);
    assert_eq!(data.gamification().badges(), ["first-session".to_string()]);
    assert_eq!(data.mindfulness().sessions().len(), 1);

    let timer = SavedTimer::load(&data, TimerSettings::default()).unwrap();
    assert_eq!(timer.engine.mode(), TimerMode::Break);
    assert_eq!(timer.last_tick_at, Some(clock.now()));
}

#[test]
fn corrupt_blobs_fall_back_per_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clario.db");
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 4, 2, 7, 30, 0).unwrap());

    {
        let mut data = open(&path, &clock);
        data.add_points(120);
        let id = data.begin_focus_session(600, 300);
        clock.advance(Duration::minutes(10));
        data.complete_focus_session(&id);
    }
    {
        let mut kv = SqliteKv::open_at(&path).unwrap();
        kv.save(keys::GAMIFICATION, "][").unwrap();
        kv.save(keys::TIMER_ENGINE, r#"{"engine":{"settings":{"focus_minutes":0,"break_minutes":5}}}"#)
            .unwrap();
    }

    let data = open(&path, &clock);
    assert_eq!(data.gamification().points(), 0);
    assert_eq!(data.gamification().level(), 1);
    assert_eq!(data.sessions().len(), 1);

    let timer = SavedTimer::load(&data, TimerSettings::new(30, 5).unwrap()).unwrap();
    assert_eq!(timer.engine.settings().focus_minutes(), 30);
}
