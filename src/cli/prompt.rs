//! Interactive prompts as an injected collaborator.
//!
//! The installer and the top-level commands depend on a confirmation/selection
//! capability but do not implement it: they receive a [`Prompt`] trait object,
//! which keeps the core logic testable without any terminal interaction.
//!
//! [`TerminalPrompt`] is the production implementation. It degrades cleanly
//! when stdin is not a TTY (pipes, CI): every question resolves to its
//! default answer instead of blocking.

use anyhow::{Context, Result};
use std::io::{self, BufRead, IsTerminal, Write};

/// Interactive question-asking capability.
pub trait Prompt {
    /// Ask a yes/no question. Returns `default_yes` on empty input.
    fn confirm(&self, message: &str, default_yes: bool) -> Result<bool>;

    /// Ask for a free-form value with a prefilled default.
    fn input(&self, message: &str, initial: &str) -> Result<String>;

    /// Ask the user to pick one of `choices`. Returns the chosen index.
    fn select_one(&self, message: &str, choices: &[&str], initial: usize) -> Result<usize>;

    /// Ask the user to pick any number of `choices`. Returns the chosen
    /// values; empty means nothing was selected.
    fn select_many(&self, message: &str, choices: &[String]) -> Result<Vec<String>>;
}

/// Prompt implementation that reads answers from the terminal.
pub struct TerminalPrompt;

impl TerminalPrompt {
    fn read_line(&self) -> Result<String> {
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        Ok(line.trim().to_string())
    }

    fn is_interactive(&self) -> bool {
        io::stdin().is_terminal()
    }
}

impl Prompt for TerminalPrompt {
    fn confirm(&self, message: &str, default_yes: bool) -> Result<bool> {
        if !self.is_interactive() {
            return Ok(default_yes);
        }

        let hint = if default_yes { "[Y/n]" } else { "[y/N]" };
        print!("{message} {hint}: ");
        io::stdout().flush()?;

        let answer = self.read_line()?.to_lowercase();
        Ok(match answer.as_str() {
            "" => default_yes,
            "y" | "yes" => true,
            _ => false,
        })
    }

    fn input(&self, message: &str, initial: &str) -> Result<String> {
        if !self.is_interactive() {
            return Ok(initial.to_string());
        }

        print!("{message} ({initial}): ");
        io::stdout().flush()?;

        let answer = self.read_line()?;
        Ok(if answer.is_empty() {
            initial.to_string()
        } else {
            answer
        })
    }

    fn select_one(&self, message: &str, choices: &[&str], initial: usize) -> Result<usize> {
        if !self.is_interactive() || choices.is_empty() {
            return Ok(initial);
        }

        println!("{message}");
        for (index, choice) in choices.iter().enumerate() {
            println!("  {}) {choice}", index + 1);
        }
        print!("Choice ({}): ", initial + 1);
        io::stdout().flush()?;

        let answer = self.read_line()?;
        let picked = answer
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .filter(|n| *n < choices.len())
            .unwrap_or(initial);
        Ok(picked)
    }

    fn select_many(&self, message: &str, choices: &[String]) -> Result<Vec<String>> {
        if !self.is_interactive() || choices.is_empty() {
            return Ok(Vec::new());
        }

        println!("{message}");
        for (index, choice) in choices.iter().enumerate() {
            println!("  {}) {choice}", index + 1);
        }
        print!("Selection (numbers separated by spaces, empty to cancel): ");
        io::stdout().flush()?;

        let answer = self.read_line()?;
        let mut selected = Vec::new();
        for token in answer.split_whitespace() {
            if let Some(choice) = token
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|n| choices.get(n))
            {
                if !selected.contains(choice) {
                    selected.push(choice.clone());
                }
            }
        }
        Ok(selected)
    }
}
