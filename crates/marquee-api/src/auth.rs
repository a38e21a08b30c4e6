use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use secrecy::SecretString;

/// Source of the bearer token attached to every request.
///
/// Read synchronously on each call and never cached by the client, so a
/// token set or cleared between two requests takes effect immediately.
/// Returning `None` short-circuits the request with
/// [`Error::Unauthenticated`](crate::Error::Unauthenticated).
pub trait CredentialSource: Send + Sync {
    fn bearer_token(&self) -> Option<SecretString>;
}

impl<F> CredentialSource for F
where
    F: Fn() -> Option<SecretString> + Send + Sync,
{
    fn bearer_token(&self) -> Option<SecretString> {
        self()
    }
}

/// A fixed token (or fixed absence of one), resolved once at startup.
///
/// Suits one-shot CLI invocations where the token comes from a flag,
/// environment variable, or keyring entry.
#[derive(Clone, Default)]
pub struct StaticToken(Option<SecretString>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(SecretString::from(token.into())))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl From<Option<SecretString>> for StaticToken {
    fn from(token: Option<SecretString>) -> Self {
        Self(token)
    }
}

impl fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StaticToken")
            .field(&self.0.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl CredentialSource for StaticToken {
    fn bearer_token(&self) -> Option<SecretString> {
        self.0.clone()
    }
}

/// A token slot that can be swapped at sign-in and cleared at sign-out.
///
/// Lock-free: reads are wait-free loads, writes replace the whole slot.
#[derive(Default)]
pub struct SharedToken {
    slot: ArcSwapOption<SecretString>,
}

impl SharedToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current token.
    pub fn set(&self, token: SecretString) {
        self.slot.store(Some(Arc::new(token)));
    }

    /// Drop the current token. Subsequent requests fail as unauthenticated.
    pub fn clear(&self) {
        self.slot.store(None);
    }

    pub fn is_present(&self) -> bool {
        self.slot.load().is_some()
    }
}

impl fmt::Debug for SharedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedToken")
            .field("present", &self.is_present())
            .finish()
    }
}

impl CredentialSource for SharedToken {
    fn bearer_token(&self) -> Option<SecretString> {
        self.slot.load_full().map(|token| SecretString::clone(&token))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn static_token_returns_same_token_every_time() {
        let source = StaticToken::new("abc");
        assert_eq!(source.bearer_token().unwrap().expose_secret(), "abc");
        assert_eq!(source.bearer_token().unwrap().expose_secret(), "abc");
        assert!(StaticToken::none().bearer_token().is_none());
    }

    #[test]
    fn shared_token_set_and_clear() {
        let source = SharedToken::new();
        assert!(source.bearer_token().is_none());

        source.set(SecretString::from("first".to_string()));
        assert_eq!(source.bearer_token().unwrap().expose_secret(), "first");

        source.set(SecretString::from("second".to_string()));
        assert_eq!(source.bearer_token().unwrap().expose_secret(), "second");

        source.clear();
        assert!(!source.is_present());
        assert!(source.bearer_token().is_none());
    }

    #[test]
    fn closures_are_credential_sources() {
        let source = || Some(SecretString::from("from-closure".to_string()));
        assert_eq!(
            source.bearer_token().unwrap().expose_secret(),
            "from-closure"
        );
    }

    #[test]
    fn debug_output_redacts_token() {
        let rendered = format!("{:?}", StaticToken::new("super-secret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("REDACTED"));
    }
}
