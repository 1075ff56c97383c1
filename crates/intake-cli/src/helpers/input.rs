//! Input handling for calorie amounts.

use std::io::{self, BufRead, IsTerminal};

use dialoguer::{Confirm, Input};

use crate::errors::CliError;

/// Get the raw calorie text from the argument, a prompt, or stdin.
///
/// With no argument, a terminal gets an interactive prompt and piped stdin
/// supplies its first line. Empty text is returned as-is.
pub fn read_calories_text(arg: Option<&str>, no_input: bool) -> anyhow::Result<String> {
    if let Some(value) = arg {
        return Ok(value.to_string());
    }

    if io::stdin().is_terminal() {
        if no_input {
            return Err(CliError::invalid_input(
                "No calories given.\nHint: Pass an amount, e.g. `intake add 450`.",
            )
            .into());
        }
        return Input::<String>::new()
            .with_prompt("Calories")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| anyhow::anyhow!("Failed to read calories: {}", e));
    }

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
    Ok(line)
}

/// Ask whether to retry a failed action. Non-interactive sessions never retry.
pub fn confirm_retry(message: &str) -> anyhow::Result<bool> {
    if !io::stdin().is_terminal() {
        return Ok(false);
    }
    Confirm::new()
        .with_prompt(message)
        .default(true)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read answer: {}", e))
}
