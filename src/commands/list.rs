use colored::*;
use eyre::Result;

use crate::cli::OutputFormat;
use crate::persona::PersonaRegistry;

pub fn run(registry: &PersonaRegistry, format: OutputFormat) -> Result<()> {
    let personas = registry.list_personas();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&personas)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(&personas)?);
        }
        OutputFormat::Text => {
            if personas.is_empty() {
                println!("{}", "No personas configured. Add one with 'git-switch add'.".dimmed());
                return Ok(());
            }

            let current = registry.current_persona().persona().map(|p| p.name.as_str());
            for persona in personas {
                let marker = if Some(persona.name.as_str()) == current { "*" } else { " " };
                println!(
                    "{} {}: {} <{}>",
                    marker.green(),
                    persona.name.cyan(),
                    persona.commit_name,
                    persona.email
                );
            }
        }
    }

    Ok(())
}
