use colored::*;
use eyre::Result;

use crate::persona::{ConfigWriter, PersonaRegistry, Scope};

pub fn run(registry: &mut PersonaRegistry, name: &str, scope: Scope, writer: &dyn ConfigWriter) -> Result<()> {
    let previous = registry.current_persona_name().map(str::to_owned);

    match registry.switch_persona(name, scope, writer) {
        Ok(()) => {
            log::info!("Switched from {:?} to '{}'", previous, name);
            println!("{} Switched to persona {} ({})", "✓".green(), name.cyan(), scope);
            Ok(())
        }
        Err(e) if e.is_not_found() => {
            println!("Persona {} not found", name.yellow());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
