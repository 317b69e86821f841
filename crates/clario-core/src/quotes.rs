//! Motivational quotes keyed by context.
//!
//! Selection is a pure lookup plus a caller-supplied RNG, so tests can seed
//! the RNG and check membership in [`candidates`].

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteContext {
    Focus,
    Break,
    Achievement,
    General,
}

impl std::str::FromStr for QuoteContext {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "focus" => Ok(QuoteContext::Focus),
            "break" => Ok(QuoteContext::Break),
            "achievement" => Ok(QuoteContext::Achievement),
            "general" => Ok(QuoteContext::General),
            _ => Err(format!(
                "Invalid quote context: '{s}'. Use focus, break, achievement or general."
            )),
        }
    }
}

const FOCUS: &[&str] = &[
    "Your focus is your superpower. Use it wisely.",
    "Focus on what matters. Ignore the rest.",
    "You've got this! Your brain works best with breaks.",
    "One task at a time. You can do this!",
    "You're stronger than your distractions.",
    "Small steps lead to big achievements.",
];

const BREAK: &[&str] = &[
    "Rest is productive. You deserve this break.",
    "Taking time to breathe makes you stronger.",
    "Your mind is recharging. That's important.",
    "Breaks are part of the process. Enjoy yours!",
];

const ACHIEVEMENT: &[&str] = &[
    "Progress, not perfection. Keep moving forward.",
    "Every completed task is a victory. Celebrate it!",
    "Your effort today is creating a better tomorrow.",
    "This streak represents real progress. Keep it alive!",
    "You're building something great!",
];

const GENERAL: &[&str] = &[
    "Your focus is your superpower. Use it wisely.",
    "Progress, not perfection. Keep moving forward.",
    "Every completed task is a victory. Celebrate it!",
    "You've got this! Your brain works best with breaks.",
    "Focus on what matters. Ignore the rest.",
    "Small steps lead to big achievements.",
    "Your effort today is creating a better tomorrow.",
    "You're stronger than your distractions.",
    "One task at a time. You can do this!",
    "Consistency beats perfection every time.",
    "Your different brain is an advantage. Own it!",
    "Hyperfocus is your hidden talent. Use it strategically.",
    "You're not lazy. You're just operating differently.",
    "Your challenges don't define your worth.",
    "You're doing better than you think.",
    "Break it down, breathe, and believe in yourself.",
    "This streak represents real progress. Keep it alive!",
    "Another day, another win. You're building something great.",
    "Showing up for yourself is powerful.",
    "Your streak is proof that you're capable.",
    "Rest is productive. You deserve this break.",
    "Taking time to breathe makes you stronger.",
    "Self-care isn't selfish. It's essential.",
    "Your mental health matters. Prioritize it.",
    "You're capable of more than you know.",
    "Today is a fresh start. Make it count.",
    "Your potential is limitless.",
    "Success is a journey, not a destination.",
    "You're exactly where you need to be.",
    "Every moment is an opportunity to do better.",
    "You're building the life you want, one task at a time.",
    "Your future self will thank you for your effort today.",
    "Challenges are just opportunities in disguise.",
    "You've overcome obstacles before. You can do it again.",
    "Difficult things often lead to extraordinary results.",
    "Your struggles are making you stronger.",
];

pub fn candidates(context: QuoteContext) -> &'static [&'static str] {
    match context {
        QuoteContext::Focus => FOCUS,
        QuoteContext::Break => BREAK,
        QuoteContext::Achievement => ACHIEVEMENT,
        QuoteContext::General => GENERAL,
    }
}

pub fn pick<R: Rng + ?Sized>(context: QuoteContext, rng: &mut R) -> &'static str {
    let pool = candidates(context);
    pool[rng.gen_range(0..pool.len())]
}
