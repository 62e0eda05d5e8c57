//! Command trait definition for CLI commands.
//!
//! Every alncmp subcommand implements [`Command`]; `enum_dispatch` routes the parsed
//! subcommand to its implementation without boxing.

use anyhow::Result;
use enum_dispatch::enum_dispatch;

/// Trait implemented by all alncmp CLI commands.
///
/// `command_line` is the full invocation, logged at startup for reproducibility.
#[enum_dispatch]
pub trait Command {
    #[allow(clippy::missing_errors_doc)]
    fn execute(&self, command_line: &str) -> Result<()>;
}
