use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl OutputFormat {
    /// Resolve the effective output format.
    /// If user specified a format, use it.
    /// Otherwise: TTY → Text, non-TTY (pipe) → Json
    pub fn resolve(user_choice: Option<OutputFormat>) -> OutputFormat {
        match user_choice {
            Some(fmt) => fmt,
            None => {
                if std::io::stdout().is_terminal() {
                    OutputFormat::Text
                } else {
                    OutputFormat::Json
                }
            }
        }
    }
}

#[derive(Parser)]
#[command(
    name = "git-switch",
    about = "Manage git personas: switch commit name, email and SSH key in one step",
    version = env!("GIT_DESCRIBE"),
    after_help = "With no subcommand, prints the current persona.\n\nLogs are written to: ~/.local/share/git-switch/logs/git-switch.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to git-switch config.yaml")]
    pub config: Option<PathBuf>,

    /// Personas file (overrides GIT_SWITCH_FILE and the config file)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new persona (or replace one with the same name)
    Add {
        /// Persona name (prompted if omitted)
        #[arg(long)]
        name: Option<String>,

        /// Commit author name (prompted if omitted)
        #[arg(long)]
        commit_name: Option<String>,

        /// Commit author email address (prompted if omitted)
        #[arg(long)]
        email: Option<String>,

        /// SSH private key path (prompted if omitted)
        #[arg(long)]
        ssh_key_path: Option<String>,
    },

    /// List all personas
    List {
        /// Output format (default: text, also when piped)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Remove a persona
    Remove {
        /// Persona name (prompted if omitted)
        name: Option<String>,
    },

    /// Rename a persona
    Rename {
        /// The old name of the persona
        old_name: String,

        /// The new name of the persona
        new_name: String,
    },

    /// Switch to another persona
    Become {
        /// The persona to switch to
        persona: String,

        /// Set the persona globally
        #[arg(long)]
        global: bool,
    },

    /// Show resolved settings
    Config {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["git-switch"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_become_global() {
        let cli = Cli::try_parse_from(["git-switch", "become", "work", "--global"]).unwrap();
        match cli.command {
            Some(Commands::Become { persona, global }) => {
                assert_eq!(persona, "work");
                assert!(global);
            }
            _ => panic!("expected become"),
        }
    }

    #[test]
    fn test_rename_requires_both_names() {
        assert!(Cli::try_parse_from(["git-switch", "rename", "old"]).is_err());
        assert!(Cli::try_parse_from(["git-switch", "rename", "old", "new"]).is_ok());
    }

    #[test]
    fn test_file_flag_is_global() {
        let cli = Cli::try_parse_from(["git-switch", "list", "--file", "/tmp/p.json"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/p.json")));
    }
}
