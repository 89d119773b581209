use clap::Parser;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

mod cli;
mod commands;
mod config;
mod persona;
mod prompt;

use cli::{Cli, Commands, OutputFormat};
use config::{Config, LogLevel};
use persona::{GitConfigWriter, PersonaRegistry, Scope};
use prompt::Prompter;

fn setup_logging(log_level: &LogLevel) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("git-switch")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("git-switch.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // RUST_LOG env var takes precedence, otherwise use config log_level
    let mut builder = env_logger::Builder::new();

    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else {
        builder.filter_level(log_level.to_level_filter());
    }

    builder.target(env_logger::Target::Pipe(target)).init();

    info!("Logging initialized, writing to: {}", log_file.display());
    info!(
        "Log level: {} (from {})",
        log_level.as_filter(),
        if std::env::var("RUST_LOG").is_ok() { "RUST_LOG env" } else { "config" }
    );
    Ok(())
}

fn run(cli: Cli, config: Config) -> Result<()> {
    let personas_path = config.personas_path(cli.file.as_ref());
    info!("Using personas file: {}", personas_path.display());

    // These never touch the personas file
    match cli.command {
        Some(Commands::Config { format }) => {
            return commands::config::run(OutputFormat::resolve(format), &config, &personas_path);
        }
        Some(Commands::Completions { shell }) => return commands::completions::run(shell),
        _ => {}
    }

    PersonaRegistry::session(&personas_path, |registry| -> Result<()> {
        log::debug!("Opened {} ({:?})", registry.path().display(), registry.load_outcome());
        if registry.load_outcome().is_corrupt() {
            log::warn!("Personas file will be reset: {:?}", registry.load_outcome());
        }

        match cli.command {
            None => commands::current::run(registry),
            Some(Commands::Add {
                name,
                commit_name,
                email,
                ssh_key_path,
            }) => {
                let args = commands::add::AddArgs {
                    name,
                    commit_name,
                    email,
                    ssh_key_path,
                };
                commands::add::run(registry, args, &mut Prompter::stdio())
            }
            Some(Commands::List { format }) => {
                commands::list::run(registry, format.unwrap_or(OutputFormat::Text))
            }
            Some(Commands::Remove { name }) => commands::remove::run(registry, name, &mut Prompter::stdio()),
            Some(Commands::Rename { old_name, new_name }) => commands::rename::run(registry, &old_name, &new_name),
            Some(Commands::Become { persona, global }) => {
                commands::switch::run(registry, &persona, Scope::from_global(global), &GitConfigWriter::new())
            }
            Some(Commands::Config { .. }) | Some(Commands::Completions { .. }) => {
                unreachable!("handled before the registry is opened")
            }
        }
    })
}

fn main() -> Result<()> {
    // Parse CLI arguments first
    let cli = Cli::parse();

    // Load configuration (before logging, so log messages in Config::load are silent)
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Setup logging with log level from config (or RUST_LOG env var)
    setup_logging(&config.log_level).context("Failed to setup logging")?;

    info!("Starting git-switch with config from: {:?}", cli.config);

    run(cli, config).context("Command failed")?;

    Ok(())
}
