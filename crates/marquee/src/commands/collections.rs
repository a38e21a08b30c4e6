//! Watchlist and favorites command handlers.

use tabled::Tabled;

use marquee_core::{CollectionKind, CollectionSnapshot, ContentId, ContentItem, CoreError};

use crate::cli::{CollectionArgs, CollectionCommand, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::Context;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct WatchlistRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Type")]
    media_type: String,
    #[tabled(rename = "Year")]
    year: String,
    #[tabled(rename = "Added")]
    added: String,
}

#[derive(Tabled)]
struct FavoriteRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Type")]
    media_type: String,
    #[tabled(rename = "Year")]
    year: String,
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Added")]
    added: String,
}

fn year(item: &ContentItem) -> String {
    item.release_year().unwrap_or("N/A").to_owned()
}

fn added(item: &ContentItem) -> String {
    item.added_at
        .map(|at| at.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

// A zero rating means "not rated" and is left blank.
fn rating(item: &ContentItem) -> String {
    item.rating
        .filter(|r| *r != 0.0)
        .map(|r| format!("{r}/10"))
        .unwrap_or_default()
}

impl From<&ContentItem> for WatchlistRow {
    fn from(item: &ContentItem) -> Self {
        Self {
            id: item.id.to_string(),
            title: item.title.clone(),
            media_type: item.media_type.to_string(),
            year: year(item),
            added: added(item),
        }
    }
}

impl From<&ContentItem> for FavoriteRow {
    fn from(item: &ContentItem) -> Self {
        Self {
            id: item.id.to_string(),
            title: item.title.clone(),
            media_type: item.media_type.to_string(),
            year: year(item),
            rating: rating(item),
            added: added(item),
        }
    }
}

fn empty_message(kind: CollectionKind) -> &'static str {
    match kind {
        CollectionKind::Watchlist => "Your watchlist is empty",
        CollectionKind::Favorites => "Your favorites list is empty",
    }
}

// ── Rendering ───────────────────────────────────────────────────────

fn render(
    ctx: &Context<'_>,
    kind: CollectionKind,
    snap: &CollectionSnapshot,
) -> Result<(), CliError> {
    let global = ctx.global;
    if snap.is_empty() && global.output == OutputFormat::Table {
        output::notify_info(global, empty_message(kind));
        return Ok(());
    }

    let items = snap.items.as_slice();
    let key = |i: &ContentItem| i.key().to_string();
    let out = match kind {
        CollectionKind::Watchlist => {
            output::render_list(global.output, items, |i| WatchlistRow::from(i), key)?
        }
        CollectionKind::Favorites => {
            output::render_list(global.output, items, |i| FavoriteRow::from(i), key)?
        }
    };
    output::print_output(&out, global.quiet);
    Ok(())
}

fn operation_error(ctx: &Context<'_>, err: &CoreError, fallback: &str) -> CliError {
    CliError::from_operation(
        err,
        fallback,
        ctx.profile_name,
        ctx.session.config().base_url.as_str(),
    )
}

/// Fetch a collection and render it. A failed fetch surfaces the message
/// the store recorded on the collection.
async fn fetch_and_render(ctx: &Context<'_>, kind: CollectionKind) -> Result<(), CliError> {
    let store = ctx.session.store();
    if let Err(err) = store.fetch(kind).await {
        let snap = store.snapshot(kind);
        let fallback = snap.error.as_deref().unwrap_or(kind.fetch_failed_message());
        return Err(operation_error(ctx, &err, fallback));
    }
    render(ctx, kind, &store.snapshot(kind))
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    ctx: &Context<'_>,
    kind: CollectionKind,
    args: CollectionArgs,
) -> Result<(), CliError> {
    let store = ctx.session.store();

    match args.command {
        CollectionCommand::List => fetch_and_render(ctx, kind).await,

        CollectionCommand::Add {
            id,
            media_type,
            refresh,
        } => {
            let id = ContentId::from(id.as_str());
            store
                .add(kind, &id, media_type.into())
                .await
                .map_err(|e| operation_error(ctx, &e, kind.add_failed_message()))?;
            output::notify_success(ctx.global, &format!("Added to {kind}"));
            if refresh {
                fetch_and_render(ctx, kind).await?;
            }
            Ok(())
        }

        CollectionCommand::Remove { id, refresh } => {
            let id = ContentId::from(id.as_str());
            store
                .remove(kind, &id)
                .await
                .map_err(|e| operation_error(ctx, &e, kind.remove_failed_message()))?;
            output::notify_success(ctx.global, &format!("Removed from {kind}"));
            if refresh {
                fetch_and_render(ctx, kind).await?;
            }
            Ok(())
        }
    }
}
