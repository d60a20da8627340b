use clap::{Parser, Subcommand};
use dayboard_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "dayboard-cli", version, about = "Dayboard CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Daily journal
    Journal {
        #[command(subcommand)]
        action: commands::journal::JournalAction,
    },
    /// Streaks, monthly summary and dashboard
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Score calculator
    Score {
        #[command(subcommand)]
        action: commands::score::ScoreAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Log to stderr. `DAYBOARD_LOG` wins over the configured filter; the config
/// file is only read here if it already exists.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("DAYBOARD_LOG").unwrap_or_else(|_| {
        let configured = Config::load_existing()
            .ok()
            .flatten()
            .map(|config| config.log.filter)
            .unwrap_or_else(|| Config::default().log.filter);
        EnvFilter::try_new(configured).unwrap_or_else(|_| EnvFilter::new("warn"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action),
        Commands::Journal { action } => commands::journal::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Score { action } => commands::score::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
