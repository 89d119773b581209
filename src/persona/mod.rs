//! Persona management
//!
//! A persona is a named git identity: the commit author name, the author
//! email and the SSH key used for pushes. Personas live in a single JSON
//! file owned by [`PersonaRegistry`].

use serde::{Deserialize, Serialize};

pub mod error;
pub mod git;
pub mod registry;

pub use git::{ConfigWriter, GitConfigWriter, Scope};
pub use registry::{CurrentPersona, PersonaRegistry};

/// A named git identity
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Persona {
    #[serde(rename = "persona_name")]
    pub name: String,
    pub commit_name: String,
    pub email: String,
    pub ssh_key_path: String,
}

impl Persona {
    pub fn new(
        name: impl Into<String>,
        commit_name: impl Into<String>,
        email: impl Into<String>,
        ssh_key_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            commit_name: commit_name.into(),
            email: email.into(),
            ssh_key_path: ssh_key_path.into(),
        }
    }

    /// Value written to `core.sshCommand` when switching to this persona
    pub fn ssh_command(&self) -> String {
        format!("ssh -i {}", self.ssh_key_path)
    }
}
