//! Command dispatch: bridges CLI args -> store operations -> output formatting.

pub mod collections;
pub mod config_cmd;

use marquee_core::{CollectionKind, Session};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Per-invocation context for session-bound commands.
pub struct Context<'a> {
    pub session: &'a Session,
    pub profile_name: &'a str,
    pub global: &'a GlobalOpts,
}

/// Dispatch a session-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, ctx: &Context<'_>) -> Result<(), CliError> {
    match cmd {
        Command::Watchlist(args) => collections::handle(ctx, CollectionKind::Watchlist, args).await,
        Command::Favorites(args) => collections::handle(ctx, CollectionKind::Favorites, args).await,
        Command::Config(_) | Command::Completions(_) => Err(CliError::Validation {
            field: "command".into(),
            reason: "handled before a session is opened".into(),
        }),
    }
}
