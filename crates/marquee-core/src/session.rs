// ── Session lifecycle ──
//
// Full lifecycle owner for a signed-in user: holds the credential slot
// the HTTP client reads on every request, the content store built on
// top of it, and a watch channel of the sign-in state.

use std::sync::Arc;

use marquee_api::{SharedToken, UserContentClient};
use secrecy::SecretString;
use strum::Display;
use tokio::sync::watch;
use tracing::info;

use crate::config::SessionConfig;
use crate::error::CoreError;
use crate::store::{ContentCollectionStore, StoreOptions};

/// Whether a credential is currently installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum SessionState {
    SignedOut,
    SignedIn,
}

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<SessionInner>`. Created signed out; call
/// [`sign_in()`](Self::sign_in) to install a token.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    config: SessionConfig,
    token: Arc<SharedToken>,
    store: ContentCollectionStore,
    state: watch::Sender<SessionState>,
}

impl Session {
    /// Build the HTTP client and an empty store. Does not contact the
    /// service.
    pub fn new(config: SessionConfig) -> Result<Self, CoreError> {
        let token = Arc::new(SharedToken::new());
        let client = UserContentClient::new(
            config.base_url.clone(),
            Arc::clone(&token) as Arc<dyn marquee_api::CredentialSource>,
            &config.transport(),
        )?;
        let store = ContentCollectionStore::with_options(
            client,
            StoreOptions {
                discard_stale_fetches: config.discard_stale_fetches,
            },
        );
        let (state, _) = watch::channel(SessionState::SignedOut);

        Ok(Self {
            inner: Arc::new(SessionInner {
                config,
                token,
                store,
                state,
            }),
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &ContentCollectionStore {
        &self.inner.store
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Install a bearer token. Subsequent requests carry it.
    pub fn sign_in(&self, token: SecretString) {
        self.inner.token.set(token);
        self.inner.state.send_replace(SessionState::SignedIn);
        info!(server = %self.inner.config.base_url, "signed in");
    }

    /// Drop the token and discard both collections.
    pub fn sign_out(&self) {
        self.inner.token.clear();
        self.inner.store.reset();
        self.inner.state.send_replace(SessionState::SignedOut);
        info!("signed out");
    }

    pub fn state(&self) -> SessionState {
        *self.inner.state.borrow()
    }

    pub fn is_signed_in(&self) -> bool {
        self.inner.token.is_present()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use url::Url;

    fn session() -> Session {
        Session::new(SessionConfig::new(
            Url::parse("https://catalog.example.com").unwrap(),
        ))
        .unwrap()
    }

    #[test]
    fn starts_signed_out() {
        let session = session();
        assert_eq!(session.state(), SessionState::SignedOut);
        assert!(!session.is_signed_in());
    }

    #[test]
    fn sign_in_and_out_update_state() {
        let session = session();
        let mut rx = session.subscribe_state();

        session.sign_in(SecretString::from("tok"));
        assert!(session.is_signed_in());
        assert_eq!(*rx.borrow_and_update(), SessionState::SignedIn);

        session.sign_out();
        assert!(!session.is_signed_in());
        assert_eq!(*rx.borrow_and_update(), SessionState::SignedOut);
    }

    #[test]
    fn state_display_is_kebab_case() {
        assert_eq!(SessionState::SignedIn.to_string(), "signed-in");
    }
}
