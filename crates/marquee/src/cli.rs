//! Clap derive structures for the `marquee` CLI.

use clap::{Args, Parser, Subcommand, ValueEnum};

use marquee_core::MediaType;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// marquee -- your catalog watchlist and favorites from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "marquee",
    version,
    about = "Manage your movie and TV watchlist and favorites",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Profile to use
    #[arg(long, short = 'p', env = "MARQUEE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Catalog service URL (overrides profile)
    #[arg(long, short = 's', env = "MARQUEE_SERVER", global = true)]
    pub server: Option<String>,

    /// Bearer token (overrides profile, keyring, and token_env)
    #[arg(long, env = "MARQUEE_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "MARQUEE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "MARQUEE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one `id-type` key per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Titles you plan to watch
    #[command(alias = "wl")]
    Watchlist(CollectionArgs),

    /// Titles you liked
    #[command(alias = "likes", alias = "fav")]
    Favorites(CollectionArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Collections ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CollectionArgs {
    #[command(subcommand)]
    pub command: CollectionCommand,
}

#[derive(Debug, Subcommand)]
pub enum CollectionCommand {
    /// Fetch and show the collection
    #[command(alias = "ls")]
    List,

    /// Add a title
    Add {
        /// Catalog id of the title
        id: String,

        /// Whether the id refers to a movie or a TV series
        #[arg(long = "type", short = 't', value_enum)]
        media_type: MediaTypeArg,

        /// Fetch and show the collection afterwards
        #[arg(long)]
        refresh: bool,
    },

    /// Remove a title
    #[command(alias = "rm")]
    Remove {
        /// Catalog id of the title
        id: String,

        /// Fetch and show the collection afterwards
        #[arg(long)]
        refresh: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MediaTypeArg {
    Movie,
    Tv,
}

impl From<MediaTypeArg> for MediaType {
    fn from(arg: MediaTypeArg) -> Self {
        match arg {
            MediaTypeArg::Movie => MediaType::Movie,
            MediaTypeArg::Tv => MediaType::Tv,
        }
    }
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (secrets masked)
    Show,

    /// Set a value on the active profile
    Set {
        /// Profile key: server, token_env, timeout, ca_cert, discard_stale_fetches
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store a bearer token in the system keyring
    SetToken,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
