use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by [`PersonaRegistry`](super::PersonaRegistry).
///
/// Load problems never show up here: a missing or corrupt personas file is
/// reported through [`LoadOutcome`](super::registry::LoadOutcome) instead.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Persona '{name}' not found")]
    NotFound { name: String },

    #[error("Failed to write personas file at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize personas: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl RegistryError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
