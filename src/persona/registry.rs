//! The personas file and the operations on it
//!
//! A registry is opened once per run, mutated in memory and written back
//! when the run ends. The write happens whether or not anything changed,
//! so a corrupt file is replaced by a valid (empty) one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::error::{RegistryError, Result};
use super::git::{ConfigWriter, Scope};
use super::Persona;

/// On-disk shape of the personas file
#[derive(Debug, Default, Deserialize, Serialize)]
struct PersonasFile {
    /// Nullable but required; older releases wrote `current_persona`
    #[serde(
        rename = "currentPersona",
        alias = "current_persona",
        deserialize_with = "Option::deserialize"
    )]
    current_persona: Option<String>,
    personas: BTreeMap<String, Persona>,
}

/// How the personas file looked when the registry was opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// File parsed and every entry was consistent
    Loaded,
    /// No file yet (first run)
    Absent,
    /// File existed but could not be used; the registry starts empty
    Corrupt { reason: String },
}

impl LoadOutcome {
    pub fn is_corrupt(&self) -> bool {
        matches!(self, LoadOutcome::Corrupt { .. })
    }
}

/// Result of resolving the current-persona pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentPersona<'a> {
    /// No persona has been switched to
    Unset,
    Active(&'a Persona),
    /// The pointer names a persona that was since renamed or removed
    Dangling(&'a str),
}

impl<'a> CurrentPersona<'a> {
    pub fn persona(&self) -> Option<&'a Persona> {
        match *self {
            CurrentPersona::Active(persona) => Some(persona),
            _ => None,
        }
    }
}

/// Personas keyed by name, plus the name of the current one
#[derive(Debug)]
pub struct PersonaRegistry {
    path: PathBuf,
    data: PersonasFile,
    outcome: LoadOutcome,
}

impl PersonaRegistry {
    /// Load the registry at `path`. Never fails: an absent or unusable file
    /// yields an empty registry and the reason is kept in [`load_outcome`].
    ///
    /// [`load_outcome`]: PersonaRegistry::load_outcome
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (data, outcome) = match Self::read(&path) {
            Ok(Some(data)) => (data, LoadOutcome::Loaded),
            Ok(None) => {
                log::info!("No personas file at {} (first run)", path.display());
                (PersonasFile::default(), LoadOutcome::Absent)
            }
            Err(reason) => {
                log::warn!("Personas file at {} is unusable, starting empty: {}", path.display(), reason);
                (PersonasFile::default(), LoadOutcome::Corrupt { reason })
            }
        };

        if outcome == LoadOutcome::Loaded {
            log::info!("Loaded {} persona(s) from {}", data.personas.len(), path.display());
        }

        Self { path, data, outcome }
    }

    fn read(path: &Path) -> std::result::Result<Option<PersonasFile>, String> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(format!("failed to read file: {}", e)),
        };

        let data: PersonasFile = serde_json::from_str(&content).map_err(|e| format!("invalid JSON: {}", e))?;

        if let Some((key, persona)) = data.personas.iter().find(|(key, persona)| **key != persona.name) {
            return Err(format!(
                "persona stored under '{}' is named '{}'",
                key, persona.name
            ));
        }

        Ok(Some(data))
    }

    /// Open, run `f`, then save. The save runs even when `f` fails.
    pub fn session<T, E, F>(path: impl Into<PathBuf>, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut PersonaRegistry) -> std::result::Result<T, E>,
        E: From<RegistryError>,
    {
        let mut registry = Self::open(path);
        let result = f(&mut registry);
        let saved = registry.close();

        match (result, saved) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(e)) => Err(e.into()),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(save_err)) => {
                log::error!("Failed to save personas after an earlier error: {}", save_err);
                Err(e)
            }
        }
    }

    /// Write the registry back to its file and consume it
    pub fn close(self) -> Result<()> {
        self.save()
    }

    /// Write the registry as pretty-printed JSON, creating parent directories.
    /// A symlinked personas file is written through to its target, keeping
    /// the target's permissions.
    pub fn save(&self) -> Result<()> {
        let target = fs::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone());
        let parent = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|e| RegistryError::write(parent, e))?;

        let mut json = serde_json::to_string_pretty(&self.data)?;
        json.push('\n');

        // Write beside the target and rename so a crash never leaves half a file
        let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(|e| RegistryError::write(parent, e))?;
        tmp.write_all(json.as_bytes())
            .and_then(|_| match fs::metadata(&target) {
                Ok(meta) => tmp.as_file().set_permissions(meta.permissions()),
                Err(_) => Ok(()),
            })
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| RegistryError::write(tmp.path(), e))?;
        tmp.persist(&target)
            .map_err(|e| RegistryError::write(&target, e.error))?;

        log::info!("Saved {} persona(s) to {}", self.data.personas.len(), target.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.outcome
    }

    pub fn has_persona(&self, name: &str) -> bool {
        self.data.personas.contains_key(name)
    }

    pub fn get_persona(&self, name: &str) -> Result<&Persona> {
        self.data.personas.get(name).ok_or_else(|| RegistryError::not_found(name))
    }

    /// Insert or replace the persona stored under `persona.name`
    pub fn set_persona(&mut self, persona: Persona) {
        log::debug!("Setting persona '{}'", persona.name);
        self.data.personas.insert(persona.name.clone(), persona);
    }

    /// Move a persona to a new name. An existing persona at `new_name` is
    /// replaced. The current-persona pointer is left untouched.
    pub fn rename_persona(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        let mut persona = self
            .data
            .personas
            .remove(old_name)
            .ok_or_else(|| RegistryError::not_found(old_name))?;

        if old_name != new_name && self.data.personas.contains_key(new_name) {
            log::warn!("Renaming '{}' overwrites existing persona '{}'", old_name, new_name);
        }
        if self.data.current_persona.as_deref() == Some(old_name) && old_name != new_name {
            log::debug!("Current persona '{}' was renamed; pointer now dangles", old_name);
        }

        persona.name = new_name.to_string();
        self.data.personas.insert(persona.name.clone(), persona);
        Ok(())
    }

    /// Delete a persona. The current-persona pointer is left untouched.
    pub fn remove_persona(&mut self, name: &str) -> Result<Persona> {
        let persona = self
            .data
            .personas
            .remove(name)
            .ok_or_else(|| RegistryError::not_found(name))?;

        if self.data.current_persona.as_deref() == Some(name) {
            log::debug!("Current persona '{}' was removed; pointer now dangles", name);
        }
        Ok(persona)
    }

    /// All personas, sorted by name
    pub fn list_personas(&self) -> Vec<&Persona> {
        // BTreeMap iterates in key order and keys always equal persona names
        self.data.personas.values().collect()
    }

    pub fn current_persona_name(&self) -> Option<&str> {
        self.data.current_persona.as_deref()
    }

    pub fn current_persona(&self) -> CurrentPersona<'_> {
        match self.data.current_persona.as_deref() {
            None | Some("") => CurrentPersona::Unset,
            Some(name) => match self.data.personas.get(name) {
                Some(persona) => CurrentPersona::Active(persona),
                None => CurrentPersona::Dangling(name),
            },
        }
    }

    /// Make `name` the current persona and apply its identity to git.
    ///
    /// The three writes are not checked; the pointer is updated even if git
    /// rejects one of them.
    pub fn switch_persona(&mut self, name: &str, scope: Scope, writer: &dyn ConfigWriter) -> Result<()> {
        let persona = self.get_persona(name)?.clone();
        self.data.current_persona = Some(persona.name.clone());

        log::info!("Switching to persona '{}' ({})", persona.name, scope);
        writer.write("user.name", &persona.commit_name, scope);
        writer.write("user.email", &persona.email, scope);
        writer.write("core.sshCommand", &persona.ssh_command(), scope);
        Ok(())
    }
}
