//! Writes identity settings into git's configuration
//!
//! Writes are fire-and-forget: a failed `git config` invocation is logged
//! and otherwise ignored, so a switch never rolls back.

use std::fmt;
use std::path::PathBuf;
use std::process::Command;

/// Which git configuration file a write targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// The repository in the current directory (`.git/config`)
    #[default]
    Local,
    /// The user's global configuration (`~/.gitconfig`)
    Global,
}

impl Scope {
    pub fn from_global(global: bool) -> Self {
        if global { Scope::Global } else { Scope::Local }
    }

    /// Flag passed to `git config`, if any
    pub fn flag(&self) -> Option<&'static str> {
        match self {
            Scope::Local => None,
            Scope::Global => Some("--global"),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Local => write!(f, "local"),
            Scope::Global => write!(f, "global"),
        }
    }
}

/// Something that can apply a single `key = value` configuration setting
pub trait ConfigWriter {
    fn write(&self, key: &str, value: &str, scope: Scope);
}

/// Applies settings by running `git config`
#[derive(Debug)]
pub struct GitConfigWriter {
    program: Option<PathBuf>,
}

impl GitConfigWriter {
    pub fn new() -> Self {
        let program = which::which("git").ok();
        if program.is_none() {
            log::warn!("git executable not found on PATH; configuration writes will be skipped");
        }
        Self { program }
    }

    /// Arguments for a single `git config` invocation
    pub fn args(key: &str, value: &str, scope: Scope) -> Vec<String> {
        let mut args = vec!["config".to_string()];
        if let Some(flag) = scope.flag() {
            args.push(flag.to_string());
        }
        args.push(key.to_string());
        args.push(value.to_string());
        args
    }
}

impl ConfigWriter for GitConfigWriter {
    fn write(&self, key: &str, value: &str, scope: Scope) {
        let Some(program) = &self.program else {
            log::warn!("Skipping git config {} ({}): git not available", key, scope);
            return;
        };

        let args = Self::args(key, value, scope);
        log::debug!("Running {} {}", program.display(), args.join(" "));

        match Command::new(program).args(&args).output() {
            Ok(output) if output.status.success() => {
                log::info!("Set {} ({})", key, scope);
            }
            Ok(output) => {
                log::warn!(
                    "git config {} exited with {}: {}",
                    key,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                );
            }
            Err(e) => {
                log::warn!("Failed to run git config {}: {}", key, e);
            }
        }
    }
}

/// Captures writes instead of touching git
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingWriter {
    pub calls: std::cell::RefCell<Vec<(String, String, Scope)>>,
}

#[cfg(test)]
impl ConfigWriter for RecordingWriter {
    fn write(&self, key: &str, value: &str, scope: Scope) {
        self.calls.borrow_mut().push((key.to_string(), value.to_string(), scope));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_flag() {
        assert_eq!(Scope::Local.flag(), None);
        assert_eq!(Scope::Global.flag(), Some("--global"));
    }

    #[test]
    fn test_scope_from_global() {
        assert_eq!(Scope::from_global(false), Scope::Local);
        assert_eq!(Scope::from_global(true), Scope::Global);
        assert_eq!(Scope::default(), Scope::Local);
    }

    #[test]
    fn test_args_local_has_no_modifier() {
        let args = GitConfigWriter::args("user.name", "Jane Doe", Scope::Local);
        assert_eq!(args, vec!["config", "user.name", "Jane Doe"]);
    }

    #[test]
    fn test_args_global() {
        let args = GitConfigWriter::args("core.sshCommand", "ssh -i ~/.ssh/id_work", Scope::Global);
        assert_eq!(args, vec!["config", "--global", "core.sshCommand", "ssh -i ~/.ssh/id_work"]);
    }

    #[test]
    fn test_missing_git_is_not_an_error() {
        let writer = GitConfigWriter { program: None };
        writer.write("user.name", "Nobody", Scope::Local);
    }

    #[test]
    fn test_recording_writer_captures_calls() {
        let writer = RecordingWriter::default();
        writer.write("user.email", "a@b.example", Scope::Global);

        let calls = writer.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], ("user.email".to_string(), "a@b.example".to_string(), Scope::Global));
    }
}
