//! One-shot command handlers

pub mod config;
pub mod contact;

use std::io::{self, Write};

use anyhow::Result;

/// Ask a yes/no question on the terminal
///
/// Answers no when stdin is not a TTY.
pub fn confirm(prompt: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        return Ok(false);
    }

    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let input = input.trim().to_lowercase();
    Ok(input == "y" || input == "yes")
}
