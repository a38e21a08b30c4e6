//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use marquee_config::ConfigError;
use marquee_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(
        code(marquee::connection_failed),
        help(
            "No usable response from {url}.\n\
             Check that the server is running and reachable, or raise --timeout."
        )
    )]
    ConnectionFailed { url: String, message: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("No authentication token found")]
    #[diagnostic(
        code(marquee::not_authenticated),
        help(
            "Store a token with: marquee config set-token --profile {profile}\n\
             Or set the MARQUEE_TOKEN environment variable."
        )
    )]
    NotAuthenticated { profile: String },

    #[error("{message}")]
    #[diagnostic(
        code(marquee::auth_rejected),
        help("The server rejected the token (HTTP {status}). Sign in again and update it.")
    )]
    AuthRejected { message: String, status: u16 },

    // ── Requests ─────────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(code(marquee::not_found))]
    NotFound { message: String },

    #[error("{message}")]
    #[diagnostic(code(marquee::request_failed))]
    RequestFailed {
        message: String,
        status: Option<u16>,
    },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(marquee::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(marquee::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: marquee config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No server configured")]
    #[diagnostic(
        code(marquee::no_config),
        help(
            "Create a profile with: marquee config init\n\
             Or pass --server <URL>. Config expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("{0}")]
    #[diagnostic(code(marquee::config))]
    Config(String),

    #[error("Keyring error: {0}")]
    #[diagnostic(
        code(marquee::keyring),
        help("Set `token` or `token_env` in the profile instead.")
    )]
    Keyring(String),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotAuthenticated { .. } | Self::AuthRejected { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Map a failed store operation, using `fallback` when the server gave
    /// no message.
    pub fn from_operation(err: &CoreError, fallback: &str, profile: &str, url: &str) -> Self {
        let message = err.message_or(fallback);
        match err {
            CoreError::Unauthenticated => CliError::NotAuthenticated {
                profile: profile.into(),
            },
            CoreError::RequestFailed { status: None, .. } => CliError::ConnectionFailed {
                url: url.into(),
                message,
            },
            CoreError::RequestFailed {
                status: Some(status @ (401 | 403)),
                ..
            } => CliError::AuthRejected {
                message,
                status: *status,
            },
            CoreError::RequestFailed {
                status: Some(404), ..
            } => CliError::NotFound { message },
            CoreError::RequestFailed { status, .. } => CliError::RequestFailed {
                message,
                status: *status,
            },
            CoreError::Config { .. } => CliError::Config(message),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let fallback = err.to_string();
        Self::from_operation(&err, &fallback, "default", "(server)")
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::NoCredentials { profile } => CliError::NotAuthenticated { profile },
            ConfigError::Keyring(e) => CliError::Keyring(e.to_string()),
            ConfigError::Io(e) => CliError::Io(e),
            other @ (ConfigError::Serialization(_) | ConfigError::Figment(_)) => {
                CliError::Config(other.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_failure_kind() {
        let url = "http://localhost:3000/";
        let cases = [
            (CoreError::Unauthenticated, exit_code::AUTH),
            (
                CoreError::RequestFailed {
                    message: None,
                    status: None,
                },
                exit_code::CONNECTION,
            ),
            (
                CoreError::RequestFailed {
                    message: None,
                    status: Some(401),
                },
                exit_code::AUTH,
            ),
            (
                CoreError::RequestFailed {
                    message: None,
                    status: Some(404),
                },
                exit_code::NOT_FOUND,
            ),
            (
                CoreError::RequestFailed {
                    message: Some("db down".into()),
                    status: Some(500),
                },
                exit_code::GENERAL,
            ),
        ];
        for (err, code) in cases {
            let cli = CliError::from_operation(&err, "Failed to fetch watchlist", "default", url);
            assert_eq!(cli.exit_code(), code, "{err:?}");
        }
    }

    #[test]
    fn server_message_is_shown() {
        let err = CoreError::RequestFailed {
            message: Some("db down".into()),
            status: Some(500),
        };
        let cli = CliError::from_operation(&err, "Failed to fetch favorites", "default", "x");
        assert_eq!(cli.to_string(), "db down");
    }

    #[test]
    fn fallback_used_without_server_message() {
        let err = CoreError::RequestFailed {
            message: None,
            status: Some(500),
        };
        let cli = CliError::from_operation(&err, "Failed to add to watchlist", "default", "x");
        assert_eq!(cli.to_string(), "Failed to add to watchlist");
    }
}
