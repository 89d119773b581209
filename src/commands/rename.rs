use colored::*;
use eyre::Result;

use crate::persona::PersonaRegistry;

pub fn run(registry: &mut PersonaRegistry, old_name: &str, new_name: &str) -> Result<()> {
    if !registry.has_persona(old_name) {
        println!("Persona '{}' not found", old_name.yellow());
        return Ok(());
    }

    if old_name != new_name && registry.has_persona(new_name) {
        println!("  {} Replacing existing persona '{}'", "⚠".yellow(), new_name);
    }

    registry.rename_persona(old_name, new_name)?;
    println!(
        "{} Renamed persona '{}' to '{}'",
        "✓".green(),
        old_name.cyan(),
        new_name.cyan()
    );
    Ok(())
}
