//! Confirmation prompts and notices on the controlling terminal.

use std::{
    io::{self, BufRead, Write},
    sync::Mutex,
};

use client_core::UserInteraction;
use tracing::warn;

pub struct TerminalInteraction {
    input: Mutex<Box<dyn BufRead + Send>>,
    output: Mutex<Box<dyn Write + Send>>,
}

impl TerminalInteraction {
    pub fn new(input: Box<dyn BufRead + Send>, output: Box<dyn Write + Send>) -> Self {
        Self {
            input: Mutex::new(input),
            output: Mutex::new(output),
        }
    }

    /// Prompts and notices go to stderr so stdout carries only results.
    pub fn stdio() -> Self {
        Self::new(Box::new(io::BufReader::new(io::stdin())), Box::new(io::stderr()))
    }

    fn write_text(&self, text: &str, terminate_line: bool) -> io::Result<()> {
        let mut output = self.output.lock().unwrap_or_else(|p| p.into_inner());
        output.write_all(text.as_bytes())?;
        if terminate_line && !text.ends_with('\n') {
            output.write_all(b"\n")?;
        }
        output.flush()
    }
}

impl UserInteraction for TerminalInteraction {
    /// Anything but an explicit yes, including end of input, declines.
    fn confirm(&self, text: &str) -> bool {
        if let Err(error) = self.write_text(&format!("{text}[y/N] "), false) {
            warn!(%error, "failed to write confirmation prompt");
            return false;
        }

        let mut answer = String::new();
        let mut input = self.input.lock().unwrap_or_else(|p| p.into_inner());
        match input.read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(error) => {
                warn!(%error, "failed to read confirmation answer");
                false
            }
        }
    }

    fn notify(&self, text: &str) {
        if let Err(error) = self.write_text(text, true) {
            warn!(%error, notice = %text, "failed to write notice");
        }
    }
}
