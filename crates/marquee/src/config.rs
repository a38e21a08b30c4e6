//! CLI configuration: thin wrapper around `marquee_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--server, --token, --timeout).

use std::time::Duration;

use secrecy::SecretString;

use marquee_config::ConfigError;
use marquee_core::SessionConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use marquee_config::{
    Config, Profile, config_path, load_config_or_default, save_config, store_token,
};

/// Everything needed to open a session for one command.
pub struct Resolved {
    pub profile_name: String,
    pub session: SessionConfig,
    /// Absent when no source yields a token; store operations then fail
    /// as unauthenticated.
    pub token: Option<SecretString>,
}

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build the session configuration and token from config file, profile,
/// and CLI overrides. Flags take priority over profile values.
pub fn resolve(global: &GlobalOpts) -> Result<Resolved, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let (mut session, token) = if let Some(profile) = cfg.profiles.get(&profile_name) {
        let mut profile = profile.clone();
        if let Some(ref server) = global.server {
            profile.server.clone_from(server);
        }
        let session = marquee_config::profile_to_session_config(&profile, &cfg.defaults)?;
        let token = match global.token {
            Some(ref t) => Some(SecretString::from(t.clone())),
            None => match marquee_config::resolve_token(&profile, &profile_name) {
                Ok(t) => Some(t),
                Err(ConfigError::NoCredentials { .. }) => None,
                Err(e) => return Err(e.into()),
            },
        };
        (session, token)
    } else if global.profile.is_some() && global.server.is_none() {
        let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
        available.sort();
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: if available.is_empty() {
                "(none)".into()
            } else {
                available.join(", ")
            },
        });
    } else {
        // No profile: build from CLI flags / env vars alone
        let server = global.server.as_deref().ok_or_else(|| CliError::NoConfig {
            path: config_path().display().to_string(),
        })?;
        let mut session = SessionConfig::new(marquee_config::parse_server_url(server)?);
        session.timeout = Duration::from_secs(cfg.defaults.timeout);
        session.discard_stale_fetches = cfg.defaults.discard_stale_fetches;
        let token = global.token.clone().map(SecretString::from);
        (session, token)
    };

    if let Some(secs) = global.timeout {
        session.timeout = Duration::from_secs(secs);
    }

    Ok(Resolved {
        profile_name,
        session,
        token,
    })
}
