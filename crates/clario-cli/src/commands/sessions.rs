use clap::Subcommand;

use super::{open_app, print_json, CmdResult};

#[derive(Subcommand)]
pub enum SessionsAction {
    /// Recent sessions, newest first
    List {
        /// How many to show (0 = all)
        #[arg(long, default_value = "5")]
        limit: usize,
    },
    /// Aggregate statistics across all sessions
    Stats,
}

pub fn run(action: SessionsAction) -> CmdResult {
    let data = open_app()?;

    match action {
        SessionsAction::List { limit } => {
            let limit = if limit == 0 { usize::MAX } else { limit };
            let recent: Vec<_> = data.sessions().recent(limit).collect();
            print_json(&recent)?;
        }
        SessionsAction::Stats => {
            print_json(&data.session_stats())?;
        }
    }
    Ok(())
}
