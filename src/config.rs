use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Log verbosity for the log file
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }

    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

/// git-switch settings (not the personas themselves)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub log_level: LogLevel,
    /// Where personas are stored; `~` and `$VARS` are expanded
    pub personas_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, it must load
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Check GIT_SWITCH_CONFIG env var
        if let Ok(env_path) = std::env::var("GIT_SWITCH_CONFIG") {
            let path = PathBuf::from(env_path);
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from GIT_SWITCH_CONFIG: {}", e);
                    }
                }
            }
        }

        // Try ~/.config/git-switch/config.yaml
        if let Some(config_dir) = dirs::config_dir() {
            let path = config_dir.join("git-switch").join("config.yaml");
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Resolve the personas file: `--file`, then `GIT_SWITCH_FILE`, then the
    /// config file, then `~/.config/git-switch.json`
    pub fn personas_path(&self, cli_override: Option<&PathBuf>) -> PathBuf {
        if let Some(path) = cli_override {
            return Self::expand_path(path);
        }
        if let Ok(env_path) = std::env::var("GIT_SWITCH_FILE") {
            if !env_path.is_empty() {
                return Self::expand_path(Path::new(&env_path));
            }
        }
        if let Some(path) = &self.personas_file {
            return Self::expand_path(path);
        }
        Self::default_personas_path()
    }

    pub fn default_personas_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("git-switch.json")
    }

    /// Expand a path that may contain ~ or env vars
    pub fn expand_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        let expanded = shellexpand::full(&path_str).unwrap_or_else(|_| path_str.clone());
        PathBuf::from(expanded.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert!(config.personas_file.is_none());
    }

    #[test]
    fn test_default_personas_path() {
        let path = Config::default_personas_path();
        assert!(path.ends_with(".config/git-switch.json"));
    }

    #[test]
    fn test_cli_override_wins() {
        let config = Config {
            personas_file: Some(PathBuf::from("/from/config.json")),
            ..Config::default()
        };
        let cli = PathBuf::from("/from/cli.json");
        assert_eq!(config.personas_path(Some(&cli)), PathBuf::from("/from/cli.json"));
    }

    #[test]
    fn test_expand_path_no_expansion() {
        let path = PathBuf::from("/usr/local/share/personas.json");
        assert_eq!(Config::expand_path(&path), path);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = Config::expand_path(&PathBuf::from("~/personas.json"));
        assert!(!expanded.to_string_lossy().contains('~'));
        assert!(expanded.to_string_lossy().ends_with("personas.json"));
    }

    #[test]
    fn test_load_explicit_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "log_level: debug\npersonas_file: /tmp/personas.json\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.personas_file, Some(PathBuf::from("/tmp/personas.json")));
    }

    #[test]
    fn test_load_partial_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "log_level: info\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.personas_file.is_none());
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nope.yaml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_log_level_filters() {
        assert_eq!(LogLevel::Off.to_level_filter(), log::LevelFilter::Off);
        assert_eq!(LogLevel::Trace.as_filter(), "trace");
    }
}
