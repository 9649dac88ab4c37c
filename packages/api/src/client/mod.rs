//! # Backend clients: public and secure
//!
//! Every call to the REST backend goes through one of two clients that share
//! a base URL and a `reqwest::Client`, but not capabilities:
//!
//! | Client | Token | On 401 |
//! |--------|-------|--------|
//! | [`PublicClient`] | never sent | returned as an ordinary `ApiError::Status` |
//! | [`SecureClient`] | `Authorization: Bearer <token>` when one is stored | token cleared, hard redirect to [`LOGIN_PATH`], `ApiError::Unauthorized` |
//!
//! Keeping them apart means a 401 from an anonymous endpoint (the token
//! exchange, the public listing) can never tear down the signed-in session.
//!
//! Endpoint methods live in the sibling modules, one per resource.

mod admin;
mod favorites;
mod lessons;
mod payments;
mod users;

pub use favorites::FavoriteSettled;

use std::rc::Rc;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use store::TokenStore;

use crate::error::ApiError;

/// Where the secure client sends the browser after a 401.
pub const LOGIN_PATH: &str = "/auth/login";

/// Full page navigation, bypassing the in-app router.
pub trait HardRedirect {
    fn hard_redirect(&self, path: &str);
}

/// Client for endpoints that must work without a session.
#[derive(Clone)]
pub struct PublicClient {
    http: reqwest::Client,
    base_url: Rc<str>,
}

impl PublicClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: Rc::from(base_url.trim_end_matches('/')),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    pub(crate) async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        let resp = req.send().await?;
        decode(resp).await
    }

    pub(crate) async fn send_empty(&self, req: RequestBuilder) -> Result<(), ApiError> {
        let resp = req.send().await?;
        ensure_success(resp).await.map(|_| ())
    }
}

/// Client for endpoints that need the signed-in user's access token.
#[derive(Clone)]
pub struct SecureClient {
    inner: PublicClient,
    tokens: TokenStore,
    redirect: Rc<dyn HardRedirect>,
}

impl SecureClient {
    /// Share the base URL and connection pool of an existing public client.
    pub fn new(public: &PublicClient, tokens: TokenStore, redirect: Rc<dyn HardRedirect>) -> Self {
        Self {
            inner: public.clone(),
            tokens,
            redirect,
        }
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.authorize(self.inner.request(method, path))
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match self.tokens.get() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Tear the session down when the backend rejects the token.
    pub(crate) fn check_unauthorized(&self, status: StatusCode) -> Result<(), ApiError> {
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Backend rejected the access token, signing out of the API");
            self.tokens.clear();
            self.redirect.hard_redirect(LOGIN_PATH);
            return Err(ApiError::Unauthorized);
        }
        Ok(())
    }

    pub(crate) async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        let resp = req.send().await?;
        self.check_unauthorized(resp.status())?;
        decode(resp).await
    }

    pub(crate) async fn send_empty(&self, req: RequestBuilder) -> Result<(), ApiError> {
        let resp = req.send().await?;
        self.check_unauthorized(resp.status())?;
        ensure_success(resp).await.map(|_| ())
    }
}

async fn ensure_success(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::from_status(status.as_u16(), &body))
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let resp = ensure_success(resp).await?;
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Percent-encode a single path segment (emails, ids).
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingRedirect;
    use reqwest::header::AUTHORIZATION;
    use store::{KeyValueStore, MemoryStore, TOKEN_KEY};

    fn secure() -> (MemoryStore, RecordingRedirect, SecureClient) {
        let mem = MemoryStore::new();
        let redirect = RecordingRedirect::default();
        let public = PublicClient::new("http://api.test/");
        let client = SecureClient::new(
            &public,
            TokenStore::new(Rc::new(mem.clone())),
            Rc::new(redirect.clone()),
        );
        (mem, redirect, client)
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let public = PublicClient::new("http://api.test/");
        let req = public.request(Method::GET, "/lessons/public").build().unwrap();
        assert_eq!(req.url().as_str(), "http://api.test/lessons/public");
    }

    #[test]
    fn test_bearer_attached_when_token_present() {
        let (mem, _redirect, client) = secure();
        mem.set(TOKEN_KEY, "jwt-abc");

        let req = client.request(Method::GET, "/favorites").build().unwrap();
        assert_eq!(
            req.headers().get(AUTHORIZATION).unwrap().to_str().unwrap(),
            "Bearer jwt-abc"
        );
    }

    #[test]
    fn test_no_header_without_token() {
        let (_mem, _redirect, client) = secure();

        let req = client.request(Method::GET, "/favorites").build().unwrap();
        assert!(req.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_unauthorized_clears_token_and_redirects() {
        let (mem, redirect, client) = secure();
        mem.set(TOKEN_KEY, "stale");

        let result = client.check_unauthorized(StatusCode::UNAUTHORIZED);

        assert_eq!(result, Err(ApiError::Unauthorized));
        assert!(mem.get(TOKEN_KEY).is_none());
        assert_eq!(redirect.paths(), vec![LOGIN_PATH.to_string()]);
    }

    #[test]
    fn test_other_statuses_leave_session_alone() {
        let (mem, redirect, client) = secure();
        mem.set(TOKEN_KEY, "fresh");

        for status in [StatusCode::OK, StatusCode::FORBIDDEN, StatusCode::NOT_FOUND, StatusCode::INTERNAL_SERVER_ERROR] {
            assert!(client.check_unauthorized(status).is_ok());
        }

        assert_eq!(mem.get(TOKEN_KEY).as_deref(), Some("fresh"));
        assert!(redirect.paths().is_empty());
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment("a+b@example.com"), "a%2Bb%40example.com");
    }
}
