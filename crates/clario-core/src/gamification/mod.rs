mod badges;
mod ledger;

pub use badges::{award_reached, Badge, BadgeProgress};
pub use ledger::{
    level_for, GamificationLedger, GamificationState, StreakChange, StreakUpdate,
    POINTS_PER_LEVEL,
};
