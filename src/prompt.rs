//! Line-based prompts for interactive input

use eyre::{Context, Result};
use std::io::{self, BufRead, Write};

/// Reads answers from `input`, writing questions to `output`
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask `question` and return the answer without its line ending
    pub fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).context("Failed to read input")?;
        if read == 0 {
            eyre::bail!("No input for prompt '{}'", question.trim_end_matches([':', ' ']));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Use `value` if given, otherwise ask
    pub fn value_or_ask(&mut self, value: Option<String>, question: &str) -> Result<String> {
        match value {
            Some(v) => Ok(v),
            None => self.ask(question),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_reads_one_line() {
        let mut output = Vec::new();
        let mut prompter = Prompter::new("work\nhome\n".as_bytes(), &mut output);

        assert_eq!(prompter.ask("Persona name: ").unwrap(), "work");
        assert_eq!(prompter.ask("Persona name: ").unwrap(), "home");
        drop(prompter);
        assert_eq!(String::from_utf8(output).unwrap(), "Persona name: Persona name: ");
    }

    #[test]
    fn test_ask_strips_crlf_only() {
        let mut prompter = Prompter::new("  Jane Doe \r\n".as_bytes(), Vec::new());
        assert_eq!(prompter.ask("Commit Author name: ").unwrap(), "  Jane Doe ");
    }

    #[test]
    fn test_ask_at_eof_fails() {
        let mut prompter = Prompter::new("".as_bytes(), Vec::new());
        assert!(prompter.ask("Persona name: ").is_err());
    }

    #[test]
    fn test_value_or_ask_skips_prompt() {
        let mut output = Vec::new();
        let mut prompter = Prompter::new("ignored\n".as_bytes(), &mut output);

        let value = prompter.value_or_ask(Some("given".to_string()), "Persona name: ").unwrap();
        assert_eq!(value, "given");
        drop(prompter);
        assert!(output.is_empty());
    }
}
