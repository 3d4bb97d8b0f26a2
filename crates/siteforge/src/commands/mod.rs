//! Command dispatch: CLI args -> core workflow -> output formatting.

pub mod build;
pub mod inventory;
pub mod sites;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an API-bound command to its handler.
///
/// `Completions` never reaches here; `main` handles it before any
/// configuration is loaded.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Build(args) => build::handle(args, global).await,
        Command::Inventory => inventory::handle(global).await,
        Command::Sites => sites::handle(global).await,
        Command::Completions(_) => Ok(()),
    }
}
