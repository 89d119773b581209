use colored::*;
use eyre::Result;

use crate::persona::{CurrentPersona, PersonaRegistry};

pub fn run(registry: &PersonaRegistry) -> Result<()> {
    match registry.current_persona() {
        CurrentPersona::Active(persona) => {
            println!("Currently using persona: {}", persona.name.cyan());
        }
        CurrentPersona::Dangling(name) => {
            log::warn!("Current persona '{}' no longer exists", name);
            println!("No persona set");
        }
        CurrentPersona::Unset => {
            println!("No persona set");
        }
    }
    Ok(())
}
