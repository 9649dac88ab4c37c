//! # Identity: who is signed in
//!
//! The identity provider is consumed through its REST surface
//! ([`IdentityProvider`]), which has no notion of a live session. This module
//! supplies the pieces a provider SDK would normally own:
//!
//! - [`Identity`]: the provider's view of the signed-in person plus the
//!   tokens needed to call its profile API again.
//! - [`IdentityWatch`]: the change notification stream. Every sign-in,
//!   profile update and sign-out is published here; the session bridge and
//!   the UI subscribe. The current value is persisted under [`IDENTITY_KEY`]
//!   so a reload comes back signed in.
//!
//! The watch only ever holds the latest value. A subscriber that falls behind
//! sees the final state, never a stale intermediate one.

mod firebase;

pub use firebase::IdentityProvider;

use std::rc::Rc;

use serde::{Deserialize, Serialize};
use store::KeyValueStore;
use tokio::sync::watch;

/// Storage key for the persisted identity.
pub const IDENTITY_KEY: &str = "identity";

/// Stock avatar used when a user registers without a photo.
pub const DEFAULT_AVATAR: &str = "https://i.ibb.co/4pDNDk1/avatar.png";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub id_token: String,
    #[serde(default)]
    pub refresh_token: String,
}

impl Identity {
    /// Name to greet the user with, falling back to the email's local part.
    pub fn display_name(&self) -> &str {
        match self.display_name.as_deref().filter(|n| !n.is_empty()) {
            Some(name) => name,
            None => self.email.split('@').next().unwrap_or(&self.email),
        }
    }

    pub fn initial(&self) -> String {
        self.display_name()
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "?".to_string())
    }
}

/// Latest-value broadcast of the signed-in identity, mirrored to storage.
#[derive(Clone)]
pub struct IdentityWatch {
    tx: Rc<watch::Sender<Option<Identity>>>,
    kv: Rc<dyn KeyValueStore>,
}

impl IdentityWatch {
    pub fn new(kv: Rc<dyn KeyValueStore>) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Rc::new(tx), kv }
    }

    /// Load the persisted identity, if any, and publish it.
    ///
    /// A value that no longer parses is dropped from storage.
    pub fn restore(&self) -> Option<Identity> {
        let raw = self.kv.get(IDENTITY_KEY)?;
        match serde_json::from_str::<Identity>(&raw) {
            Ok(identity) => {
                tracing::info!("Restored identity for {}", identity.email);
                self.tx.send_replace(Some(identity.clone()));
                Some(identity)
            }
            Err(e) => {
                tracing::warn!("Discarding unreadable identity: {e}");
                self.kv.remove(IDENTITY_KEY);
                None
            }
        }
    }

    /// Record a change and notify every subscriber.
    pub fn publish(&self, identity: Option<Identity>) {
        match &identity {
            Some(id) => match serde_json::to_string(id) {
                Ok(json) => self.kv.set(IDENTITY_KEY, &json),
                Err(e) => tracing::warn!("Could not persist identity: {e}"),
            },
            None => self.kv.remove(IDENTITY_KEY),
        }
        self.tx.send_replace(identity);
    }

    pub fn current(&self) -> Option<Identity> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.tx.subscribe()
    }
}

/// Pull the `id_token` out of an OAuth implicit-flow redirect fragment
/// (`#id_token=...&state=...`).
pub fn id_token_from_fragment(fragment: &str) -> Option<String> {
    fragment
        .trim_start_matches('#')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "id_token")
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .map(|v| v.into_owned())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::MemoryStore;

    fn ana() -> Identity {
        Identity {
            uid: "u1".into(),
            email: "ana@example.com".into(),
            display_name: Some("Ana".into()),
            photo_url: None,
            id_token: "idt".into(),
            refresh_token: "rt".into(),
        }
    }

    #[test]
    fn test_display_name_fallback() {
        let mut id = ana();
        assert_eq!(id.display_name(), "Ana");
        assert_eq!(id.initial(), "A");

        id.display_name = Some(String::new());
        assert_eq!(id.display_name(), "ana");
    }

    #[tokio::test]
    async fn test_publish_notifies_and_persists() {
        let mem = MemoryStore::new();
        let watch = IdentityWatch::new(Rc::new(mem.clone()));
        let mut rx = watch.subscribe();

        watch.publish(Some(ana()));
        rx.changed().await.unwrap();
        let seen = rx.borrow_and_update().clone().map(|i| i.email);
        assert_eq!(seen.as_deref(), Some("ana@example.com"));
        assert!(mem.get(IDENTITY_KEY).is_some());

        watch.publish(None);
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_none());
        assert!(mem.get(IDENTITY_KEY).is_none());
    }

    #[test]
    fn test_restore_round_trips_through_storage() {
        let mem = MemoryStore::new();
        IdentityWatch::new(Rc::new(mem.clone())).publish(Some(ana()));

        let reloaded = IdentityWatch::new(Rc::new(mem.clone()));
        assert_eq!(reloaded.restore(), Some(ana()));
        assert_eq!(reloaded.current(), Some(ana()));
    }

    #[test]
    fn test_restore_discards_garbage() {
        let mem = MemoryStore::new();
        mem.set(IDENTITY_KEY, "{not json");

        let watch = IdentityWatch::new(Rc::new(mem.clone()));
        assert!(watch.restore().is_none());
        assert!(mem.get(IDENTITY_KEY).is_none());
    }

    #[test]
    fn test_id_token_from_fragment() {
        assert_eq!(
            id_token_from_fragment("#state=x&id_token=abc.def%3D&token_type=Bearer").as_deref(),
            Some("abc.def=")
        );
        assert!(id_token_from_fragment("#error=access_denied").is_none());
        assert!(id_token_from_fragment("").is_none());
    }
}
