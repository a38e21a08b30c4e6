// User-content HTTP client
//
// Wraps `reqwest::Client` with bearer-token injection, URL construction
// for `/api/user/{list}[/{id}]`, and error-body extraction. The client is
// stateless apart from its configuration: every call reads the token anew
// and nothing is retried.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::auth::CredentialSource;
use crate::error::Error;
use crate::models::{
    AddItemRequest, ContentId, ErrorBody, MediaType, UserContentItem, UserList, UserListEnvelope,
};
use crate::transport::TransportConfig;

/// Raw HTTP client for the catalog service's user lists.
#[derive(Clone)]
pub struct UserContentClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Arc<dyn CredentialSource>,
}

impl UserContentClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the service root (e.g. `https://catalog.example.com`);
    /// `/api/user/...` is appended to it.
    pub fn new(
        base_url: Url,
        credentials: Arc<dyn CredentialSource>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, credentials))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        credentials: Arc<dyn CredentialSource>,
    ) -> Self {
        Self {
            http,
            base_url,
            credentials,
        }
    }

    /// The service base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether the credential source currently yields a token.
    pub fn is_authenticated(&self) -> bool {
        self.credentials.bearer_token().is_some()
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// `GET /api/user/{list}`: the full list in server order.
    pub async fn list(&self, list: UserList) -> Result<Vec<UserContentItem>, Error> {
        let url = self.list_url(list, None)?;
        let envelope: UserListEnvelope = self.send_json(Method::GET, url).await?;
        Ok(envelope.into_items(list))
    }

    /// `POST /api/user/{list}/{id}` with `{ "media_type": ... }`.
    pub async fn add(
        &self,
        list: UserList,
        id: &ContentId,
        media_type: MediaType,
    ) -> Result<(), Error> {
        let url = self.list_url(list, Some(id))?;
        let builder = self.authorized(Method::POST, url)?;
        let resp = builder
            .json(&AddItemRequest { media_type })
            .send()
            .await?;
        Self::check_status(resp).await.map(drop)
    }

    /// `DELETE /api/user/{list}/{id}`.
    ///
    /// The id is forwarded whether or not it is known locally; the server
    /// decides whether it exists.
    pub async fn remove(&self, list: UserList, id: &ContentId) -> Result<(), Error> {
        let url = self.list_url(list, Some(id))?;
        let resp = self.authorized(Method::DELETE, url)?.send().await?;
        Self::check_status(resp).await.map(drop)
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/api/user/{list}` or `{base}/api/user/{list}/{id}`.
    ///
    /// The id is pushed as an encoded path segment, so text ids containing
    /// `/` or `?` cannot escape their segment.
    pub(crate) fn list_url(&self, list: UserList, id: Option<&ContentId>) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| Error::InvalidBaseUrl(self.base_url.to_string()))?;
            segments
                .pop_if_empty()
                .extend(["api", "user", list.path_segment()]);
            if let Some(id) = id {
                segments.push(&id.to_string());
            }
        }
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Start a request with the bearer token attached.
    ///
    /// Fails with [`Error::Unauthenticated`] before anything is sent when
    /// the credential source has no token.
    fn authorized(&self, method: Method, url: Url) -> Result<RequestBuilder, Error> {
        let token = self
            .credentials
            .bearer_token()
            .ok_or(Error::Unauthenticated)?;
        debug!("{method} {url}");
        Ok(self
            .http
            .request(method, url)
            .bearer_auth(token.expose_secret()))
    }

    async fn send_json<T: DeserializeOwned>(&self, method: Method, url: Url) -> Result<T, Error> {
        let resp = self.authorized(method, url)?.send().await?;
        let resp = Self::check_status(resp).await?;
        let body = resp.text().await?;
        trace!(bytes = body.len(), "response body received");

        serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..floor_char_boundary(&body, 200)];
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }

    /// Pass 2xx responses through; turn anything else into [`Error::Api`]
    /// carrying the body's `message` field when present.
    async fn check_status(resp: Response) -> Result<Response, Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty());
        debug!(status = status.as_u16(), ?message, "request failed");

        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Largest index `<= max` that falls on a char boundary of `s`.
fn floor_char_boundary(s: &str, max: usize) -> usize {
    if max >= s.len() {
        return s.len();
    }
    (0..=max).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}
