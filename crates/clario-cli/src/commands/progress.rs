use clario_core::gamification::POINTS_PER_LEVEL;
use clario_core::Badge;
use serde_json::json;

use super::{open_app, print_json, CmdResult};

pub fn run() -> CmdResult {
    let data = open_app()?;
    let ledger = data.gamification();

    let mut badges: Vec<_> = Badge::ALL
        .iter()
        .map(|b| {
            json!({
                "id": b.id(),
                "name": b.name(),
                "description": b.description(),
                "earned": ledger.has_badge(b.id()),
            })
        })
        .collect();
    // Badges granted from outside the catalog still show up.
    badges.extend(
        ledger
            .badges()
            .iter()
            .filter(|id| Badge::from_id(id).is_none())
            .map(|id| json!({ "id": id, "earned": true })),
    );

    print_json(&json!({
        "points": ledger.points(),
        "level": ledger.level(),
        "level_progress": ledger.level_progress(),
        "points_to_next_level": POINTS_PER_LEVEL - ledger.level_progress(),
        "current_streak": ledger.current_streak(),
        "total_streak": ledger.total_streak(),
        "last_activity_date": ledger.last_activity_date(),
        "badges": badges,
    }))
}
