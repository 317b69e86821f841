use clario_core::quotes::{self, QuoteContext};
use serde_json::json;

use super::{print_json, CmdResult};

pub fn run(context: QuoteContext) -> CmdResult {
    let quote = quotes::pick(context, &mut rand::thread_rng());
    print_json(&json!({ "context": context, "quote": quote }))
}
