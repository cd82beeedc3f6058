//! Command dispatch: bridges CLI args -> console calls -> output formatting.

pub mod config_cmd;
pub mod credentials;
pub mod devices;
pub mod discovery;
pub mod targets;
pub mod telemetry;
pub mod util;

use nmsops_core::Console;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, console: &Console, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Devices(args) => devices::handle(console, args, global).await,
        Command::Credentials(args) => credentials::handle(console, args, global).await,
        Command::Discovery(args) => discovery::handle(console, args, global).await,
        Command::Telemetry(args) => telemetry::handle(console, args, global).await,
        // Config, Targets and Completions are handled before dispatch
        Command::Config(_) | Command::Targets(_) | Command::Completions(_) => unreachable!(),
    }
}
