use colored::*;
use eyre::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::cli::OutputFormat;
use crate::config::{Config, LogLevel};

/// Settings after all overrides have been applied
#[derive(Debug, Serialize)]
struct ResolvedSettings {
    log_level: LogLevel,
    personas_file: PathBuf,
    personas_file_exists: bool,
}

pub fn run(format: OutputFormat, config: &Config, personas_path: &Path) -> Result<()> {
    let settings = ResolvedSettings {
        log_level: config.log_level,
        personas_file: personas_path.to_path_buf(),
        personas_file_exists: personas_path.exists(),
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(&settings)?);
        }
        OutputFormat::Text => {
            println!("{}", "git-switch Configuration".bold());
            println!();
            println!("  log_level: {}", settings.log_level.as_filter());
            println!("  personas_file: {}", settings.personas_file.display());
            if !settings.personas_file_exists {
                println!("  {}", "(not created yet)".dimmed());
            }
        }
    }

    Ok(())
}
