//! Confirmation providers for the list-length mismatch gate.
//!
//! The mapping loader never touches stdin directly. It asks a
//! [`ConfirmationProvider`], so the gate can be driven by a real console in
//! production and by a fixed answer in tests.

use std::io::{self, BufRead, Write};

/// The literal token a user must type to accept a truncated mapping.
pub const CONFIRM_TOKEN: &str = "CONTINUE";

/// The answer obtained from a confirmation provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// The user typed the confirmation token.
    Accepted,
    /// The user answered with anything else.
    Declined,
    /// No input could be obtained (end of input, closed stdin).
    Unavailable,
}

/// Something that can ask a yes/no question and report the answer.
pub trait ConfirmationProvider {
    /// Shows `prompt` and waits for an answer.
    fn confirm(&mut self, prompt: &str) -> Confirmation;
}

/// Reads a single line from an input stream after printing the prompt.
///
/// Only the line terminator is stripped before comparing against
/// [`CONFIRM_TOKEN`], so `" CONTINUE"` is a decline.
pub struct LineConfirmation<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConfirmation<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl LineConfirmation<io::StdinLock<'static>, io::Stdout> {
    /// A provider backed by the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConfirmationProvider for LineConfirmation<R, W> {
    fn confirm(&mut self, prompt: &str) -> Confirmation {
        if write!(self.output, "{prompt}")
            .and_then(|()| self.output.flush())
            .is_err()
        {
            return Confirmation::Unavailable;
        }

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => Confirmation::Unavailable,
            Ok(_) => {
                if line.trim_end_matches(['\r', '\n']) == CONFIRM_TOKEN {
                    Confirmation::Accepted
                } else {
                    Confirmation::Declined
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read confirmation from input");
                Confirmation::Unavailable
            }
        }
    }
}

/// Always returns the same answer without prompting anybody.
#[derive(Debug, Clone, Copy)]
pub struct FixedConfirmation(pub Confirmation);

impl ConfirmationProvider for FixedConfirmation {
    fn confirm(&mut self, _prompt: &str) -> Confirmation {
        self.0
    }
}
