use colored::*;
use eyre::Result;
use std::io::{BufRead, Write};

use crate::persona::PersonaRegistry;
use crate::prompt::Prompter;

pub fn run<R: BufRead, W: Write>(
    registry: &mut PersonaRegistry,
    name: Option<String>,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let name = prompter.value_or_ask(name, "Persona name: ")?;

    if !registry.has_persona(&name) {
        println!("Persona '{}' not found", name.yellow());
        return Ok(());
    }

    registry.remove_persona(&name)?;
    println!("{} Removed persona '{}'", "✓".green(), name.cyan());
    Ok(())
}
