//! # Session bridge: identity changes to backend token
//!
//! [`SessionBridge::handle`] is called once per identity notification, in
//! order. It is the only code (besides the secure client's 401 handler) that
//! writes the access token.
//!
//! | Identity | Effect | Outcome |
//! |----------|--------|---------|
//! | absent | token cleared | [`SessionOutcome::SignedOut`] |
//! | present, exchange succeeds | user upserted, token stored | [`SessionOutcome::Authenticated`] |
//! | present, retries exhausted | user upserted, token cleared | [`SessionOutcome::TokenUnavailable`] |
//!
//! A failed upsert is logged and does not stop the exchange.

use std::future::Future;

use store::TokenStore;

use crate::error::ApiError;
use crate::identity::Identity;
use crate::models::UserUpsert;
use crate::retry::{retry, RetryPolicy, Sleep, TimerSleep};

/// The two anonymous backend calls a sign-in needs.
pub trait SessionBackend {
    fn upsert_user(&self, user: &UserUpsert) -> impl Future<Output = Result<(), ApiError>>;
    fn exchange_token(&self, email: &str) -> impl Future<Output = Result<String, ApiError>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    SignedOut,
    Authenticated { email: String },
    /// Signed in with the identity provider, but the backend never issued a
    /// token. Secure calls will go out without credentials.
    TokenUnavailable { email: String, reason: String },
}

impl SessionOutcome {
    pub fn has_token(&self) -> bool {
        matches!(self, SessionOutcome::Authenticated { .. })
    }
}

pub struct SessionBridge<B, S = TimerSleep> {
    backend: B,
    tokens: TokenStore,
    policy: RetryPolicy,
    sleeper: S,
}

impl<B: SessionBackend> SessionBridge<B, TimerSleep> {
    pub fn new(backend: B, tokens: TokenStore, policy: RetryPolicy) -> Self {
        Self::with_sleeper(backend, tokens, policy, TimerSleep)
    }
}

impl<B: SessionBackend, S: Sleep> SessionBridge<B, S> {
    pub fn with_sleeper(backend: B, tokens: TokenStore, policy: RetryPolicy, sleeper: S) -> Self {
        Self {
            backend,
            tokens,
            policy,
            sleeper,
        }
    }

    pub async fn handle(&self, identity: Option<&Identity>) -> SessionOutcome {
        let Some(identity) = identity else {
            self.tokens.clear();
            tracing::info!("Signed out, access token cleared");
            return SessionOutcome::SignedOut;
        };

        let email = identity.email.clone();
        let upsert = UserUpsert {
            email: email.clone(),
            name: identity.display_name.clone(),
            photo_url: identity.photo_url.clone(),
        };
        if let Err(e) = self.backend.upsert_user(&upsert).await {
            tracing::warn!("Could not save user record for {email}: {e}");
        }

        let exchanged = retry(&self.policy, &self.sleeper, |attempt| {
            tracing::debug!(attempt, "Requesting access token for {email}");
            self.backend.exchange_token(&email)
        })
        .await;

        match exchanged {
            Ok(token) => {
                self.tokens.set(&token);
                tracing::info!("Access token stored for {email}");
                SessionOutcome::Authenticated { email }
            }
            Err(e) => {
                self.tokens.clear();
                tracing::warn!(
                    attempts = self.policy.attempts,
                    "Giving up on access token for {email}: {e}"
                );
                SessionOutcome::TokenUnavailable {
                    email,
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::Backoff;
    use crate::testing::{RecordingSleep, ScriptedBackend};
    use std::rc::Rc;
    use std::time::Duration;
    use store::{KeyValueStore, MemoryStore, TOKEN_KEY};

    fn identity(email: &str) -> Identity {
        Identity {
            uid: format!("uid-{email}"),
            email: email.to_string(),
            display_name: Some("Ana".to_string()),
            photo_url: Some("https://img/a.png".to_string()),
            id_token: String::new(),
            refresh_token: String::new(),
        }
    }

    fn bridge(
        backend: ScriptedBackend,
    ) -> (MemoryStore, RecordingSleep, SessionBridge<ScriptedBackend, RecordingSleep>) {
        let mem = MemoryStore::new();
        let sleeper = RecordingSleep::default();
        let policy = RetryPolicy::new(3, Backoff::Linear(Duration::from_millis(500)));
        let bridge = SessionBridge::with_sleeper(
            backend,
            TokenStore::new(Rc::new(mem.clone())),
            policy,
            sleeper.clone(),
        );
        (mem, sleeper, bridge)
    }

    #[tokio::test]
    async fn test_exchange_persists_returned_token() {
        let backend = ScriptedBackend::default().tokens([Ok("jwt-1")]);
        let (mem, sleeper, bridge) = bridge(backend.clone());

        let outcome = bridge.handle(Some(&identity("ana@example.com"))).await;

        assert_eq!(outcome, SessionOutcome::Authenticated { email: "ana@example.com".into() });
        assert_eq!(mem.get(TOKEN_KEY).as_deref(), Some("jwt-1"));
        assert_eq!(backend.upserts().len(), 1);
        assert_eq!(backend.upserts()[0].photo_url.as_deref(), Some("https://img/a.png"));
        assert!(sleeper.delays().is_empty());
    }

    #[tokio::test]
    async fn test_sequence_ending_in_sign_out_leaves_no_token() {
        let backend = ScriptedBackend::default().tokens([Ok("jwt-1"), Ok("jwt-2")]);
        let (mem, _sleeper, bridge) = bridge(backend);

        bridge.handle(Some(&identity("ana@example.com"))).await;
        bridge.handle(Some(&identity("bo@example.com"))).await;
        assert_eq!(mem.get(TOKEN_KEY).as_deref(), Some("jwt-2"));

        let outcome = bridge.handle(None).await;
        assert_eq!(outcome, SessionOutcome::SignedOut);
        assert!(mem.get(TOKEN_KEY).is_none());
    }

    #[tokio::test]
    async fn test_exhausted_retries_leave_no_token() {
        let backend = ScriptedBackend::default();
        let (mem, sleeper, bridge) = bridge(backend.clone());
        mem.set(TOKEN_KEY, "stale-from-previous-user");

        let outcome = bridge.handle(Some(&identity("ana@example.com"))).await;

        assert!(matches!(outcome, SessionOutcome::TokenUnavailable { .. }));
        assert!(!outcome.has_token());
        assert!(mem.get(TOKEN_KEY).is_none());
        assert_eq!(backend.exchanges(), 3);

        let delays = sleeper.delays();
        assert_eq!(delays.len(), 2);
        assert!(delays[0] < delays[1]);
    }

    #[tokio::test]
    async fn test_retry_recovers_on_third_attempt() {
        let backend = ScriptedBackend::default().tokens([
            Err(ApiError::Network("offline".into())),
            Err(ApiError::Status { status: 500, message: "boom".into() }),
            Ok("jwt-3"),
        ]);
        let (mem, sleeper, bridge) = bridge(backend);

        let outcome = bridge.handle(Some(&identity("ana@example.com"))).await;

        assert!(outcome.has_token());
        assert_eq!(mem.get(TOKEN_KEY).as_deref(), Some("jwt-3"));
        assert_eq!(
            sleeper.delays(),
            vec![Duration::from_millis(500), Duration::from_millis(1000)]
        );
    }

    #[tokio::test]
    async fn test_failed_upsert_does_not_block_exchange() {
        let backend = ScriptedBackend::default()
            .failing_upserts()
            .tokens([Ok("jwt-1")]);
        let (mem, _sleeper, bridge) = bridge(backend);

        let outcome = bridge.handle(Some(&identity("ana@example.com"))).await;

        assert!(outcome.has_token());
        assert_eq!(mem.get(TOKEN_KEY).as_deref(), Some("jwt-1"));
    }
}
