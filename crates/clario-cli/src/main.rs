use clap::{Parser, Subcommand};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "clario", version, about = "Clario focus timer CLI")]
struct Cli {
    /// Debug-level logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Focus session history
    Sessions {
        #[command(subcommand)]
        action: commands::sessions::SessionsAction,
    },
    /// Points, level, streak and badges
    Progress,
    /// Mindfulness sessions
    Mindfulness {
        #[command(subcommand)]
        action: commands::mindfulness::MindfulnessAction,
    },
    /// Print a motivational quote
    Quote {
        /// focus, break, achievement or general
        #[arg(long, default_value = "general")]
        context: clario_core::QuoteContext,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Sessions { action } => commands::sessions::run(action),
        Commands::Progress => commands::progress::run(),
        Commands::Mindfulness { action } => commands::mindfulness::run(action),
        Commands::Quote { context } => commands::quote::run(context),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
