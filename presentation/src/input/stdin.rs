//! Interactive human gate input.
//!
//! When a gate takes its turn, the user sees the message under review and
//! a prompt naming the gate:
//!
//! ```text
//!   ┌ InnerHumanGate reviewing Developer
//!   │ Approve to advance, anything else sends it back.
//!   └ InnerHumanGate>
//! ```
//!
//! The line is returned verbatim (minus the newline). Whether it approves
//! is decided by the workflow's decision policy, not here.

use async_trait::async_trait;
use colored::Colorize;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::Mutex;
use turnstile_application::ports::human_input::{HumanInputError, HumanInputPort, HumanPrompt};

/// Reads gate replies line by line from an async reader (stdin by default)
pub struct InteractiveHumanInput<R = tokio::io::Stdin> {
    reader: Mutex<BufReader<R>>,
}

impl InteractiveHumanInput {
    pub fn new() -> Self {
        Self::from_reader(tokio::io::stdin())
    }
}

impl Default for InteractiveHumanInput {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: AsyncRead + Unpin + Send> InteractiveHumanInput<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader: Mutex::new(BufReader::new(reader)),
        }
    }

    fn display_prompt(prompt: &HumanPrompt<'_>) -> Result<(), HumanInputError> {
        let reviewing = prompt
            .latest()
            .map(|m| format!("reviewing {}", m.source))
            .unwrap_or_default();

        println!();
        println!(
            "  {} {} {}",
            "┌".magenta(),
            prompt.participant.as_str().magenta().bold(),
            reviewing.dimmed()
        );
        if !prompt.description.is_empty() {
            println!("  {} {}", "│".magenta(), prompt.description.dimmed());
        }
        print!("  {} {} ", "└".magenta(), format!("{}>", prompt.participant).magenta().bold());
        std::io::stdout()
            .flush()
            .map_err(|e| HumanInputError::IoError(format!("Failed to flush stdout: {}", e)))
    }
}

#[async_trait]
impl<R: AsyncRead + Unpin + Send> HumanInputPort for InteractiveHumanInput<R> {
    async fn read_line(&self, prompt: &HumanPrompt<'_>) -> Result<String, HumanInputError> {
        Self::display_prompt(prompt)?;

        let mut line = String::new();
        let read = self
            .reader
            .lock()
            .await
            .read_line(&mut line)
            .await
            .map_err(|e| HumanInputError::IoError(format!("Failed to read input: {}", e)))?;

        if read == 0 {
            return Err(HumanInputError::Eof);
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }
}
