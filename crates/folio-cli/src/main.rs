use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use folio_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "A developer portfolio you scroll through in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the portfolio (default)
    Run,
    /// Print one section, or the whole page, as plain text
    Show {
        /// Section id: hero, about, projects, skills or contact
        section: Option<String>,
    },
    /// List projects
    Projects {
        /// Only featured projects
        #[arg(short, long)]
        featured: bool,
    },
    /// List skills grouped by category
    Skills,
    /// Send a message through the contact form
    Contact {
        #[arg(short = 'n', long)]
        name: String,
        #[arg(short = 'e', long)]
        email: String,
        #[arg(short = 'm', long)]
        message: String,
    },
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the config file location
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    // The TUI owns the terminal, so it logs to a file instead of stderr
    let tui = matches!(cli.command, None | Some(Commands::Run));
    let _guard = init_logging(&config, tui)?;

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Show { section }) => commands::show::run(&config, section.as_deref()),
        Some(Commands::Projects { featured }) => commands::projects::run(&config, featured),
        Some(Commands::Skills) => commands::skills::run(&config),
        Some(Commands::Contact {
            name,
            email,
            message,
        }) => commands::contact::run(&config, name, email, message).await,
        Some(Commands::Config { action }) => match action {
            ConfigAction::Init { force } => commands::config::init(force),
            ConfigAction::Path => commands::config::path(),
        },
    }
}

fn init_logging(config: &AppConfig, to_file: bool) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    if !to_file {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
        return Ok(None);
    }

    let log_path = config.log_path();
    let dir = log_path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = log_path
        .file_name()
        .ok_or_else(|| anyhow!("invalid log path {}", log_path.display()))?;
    std::fs::create_dir_all(dir)?;
    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();

    Ok(Some(guard))
}
