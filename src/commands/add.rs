use colored::*;
use eyre::Result;
use std::io::{BufRead, Write};

use crate::persona::{Persona, PersonaRegistry};
use crate::prompt::Prompter;

/// Values given on the command line; anything missing is prompted for
#[derive(Debug, Default)]
pub struct AddArgs {
    pub name: Option<String>,
    pub commit_name: Option<String>,
    pub email: Option<String>,
    pub ssh_key_path: Option<String>,
}

impl AddArgs {
    fn is_complete(&self) -> bool {
        self.name.is_some() && self.commit_name.is_some() && self.email.is_some() && self.ssh_key_path.is_some()
    }
}

pub fn run<R: BufRead, W: Write>(
    registry: &mut PersonaRegistry,
    args: AddArgs,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    if !args.is_complete() {
        println!("Adding a new persona ...");
    }

    let persona = Persona::new(
        prompter.value_or_ask(args.name, "Persona name: ")?,
        prompter.value_or_ask(args.commit_name, "Commit Author name: ")?,
        prompter.value_or_ask(args.email, "Commit Author Email address: ")?,
        prompter.value_or_ask(args.ssh_key_path, "SSH key path: ")?,
    );
    validate(&persona)?;

    let replaced = registry.has_persona(&persona.name);
    log::info!("Adding persona '{}' (replaces existing: {})", persona.name, replaced);
    registry.set_persona(persona);

    if replaced {
        println!("{} Persona updated", "✓".green());
    } else {
        println!("{} Persona added", "✓".green());
    }
    Ok(())
}

fn validate(persona: &Persona) -> Result<()> {
    let fields = [
        ("Persona name", &persona.name),
        ("Commit Author name", &persona.commit_name),
        ("Commit Author Email address", &persona.email),
        ("SSH key path", &persona.ssh_key_path),
    ];
    for (label, value) in fields {
        if value.trim().is_empty() {
            eyre::bail!("{} cannot be empty", label);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_add_prompts_for_missing_fields() {
        let temp = tempdir().unwrap();
        let mut registry = PersonaRegistry::open(temp.path().join("p.json"));
        let mut prompter = Prompter::new("Jane Doe\njane@corp.example\n".as_bytes(), Vec::new());

        let args = AddArgs {
            name: Some("work".to_string()),
            ssh_key_path: Some("~/.ssh/id_work".to_string()),
            ..AddArgs::default()
        };
        run(&mut registry, args, &mut prompter).unwrap();

        assert_eq!(
            registry.get_persona("work").unwrap(),
            &Persona::new("work", "Jane Doe", "jane@corp.example", "~/.ssh/id_work")
        );
    }

    #[test]
    fn test_add_rejects_empty_field() {
        let temp = tempdir().unwrap();
        let mut registry = PersonaRegistry::open(temp.path().join("p.json"));
        let mut prompter = Prompter::new("work\n\njane@corp.example\nkey\n".as_bytes(), Vec::new());

        let err = run(&mut registry, AddArgs::default(), &mut prompter).unwrap_err();

        assert!(err.to_string().contains("Commit Author name"));
        assert!(!registry.has_persona("work"));
    }
}
