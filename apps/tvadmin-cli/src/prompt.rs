//! Interactive confirmation backed by dialoguer.

use std::io::IsTerminal;

use tvadmin_core::{Confirm, ReconcileError, ReconcileResult};

/// Checks if both stdin and stdout are connected to a terminal.
pub fn is_interactive_terminal() -> bool {
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

/// Asks on the controlling terminal. Refuses when there is none.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> ReconcileResult<bool> {
        if !is_interactive_terminal() {
            return Err(ReconcileError::ConfirmationUnavailable);
        }
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|_| ReconcileError::ConfirmationUnavailable)
    }
}
