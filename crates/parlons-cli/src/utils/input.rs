//! Line-based prompts for destructive commands.

use std::io::{self, Write};

use anyhow::{Context, Result};

/// Ask a yes/no question. Empty input means no; anything unrecognized asks again.
pub fn prompt_confirmation(prompt: &str) -> Result<bool> {
    loop {
        print!("{prompt} (y/N): ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let mut input = String::new();
        io::stdin()
            .read_line(&mut input)
            .context("Failed to read user input")?;

        match parse_confirmation(&input) {
            Some(answer) => return Ok(answer),
            None => eprintln!("Please enter 'y' for yes or 'n' for no."),
        }
    }
}

fn parse_confirmation(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_answers() {
        assert_eq!(parse_confirmation("Y\n"), Some(true));
        assert_eq!(parse_confirmation(" yes "), Some(true));
        assert_eq!(parse_confirmation("\n"), Some(false));
        assert_eq!(parse_confirmation("no"), Some(false));
        assert_eq!(parse_confirmation("maybe"), None);
    }
}
