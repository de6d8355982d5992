//! Terminal detection for the confirmation prompt.

use std::io::{self, IsTerminal};

pub fn is_stdin_tty() -> bool {
    io::stdin().is_terminal()
}

pub fn is_stdout_tty() -> bool {
    io::stdout().is_terminal()
}

/// A prompt is only shown when someone is at the keyboard and watching the output.
pub fn require_tty_for_interactive() -> bool {
    is_stdin_tty() && is_stdout_tty()
}
