//! # Key/value persistence seam
//!
//! Everything the client keeps across page loads is a short string under a
//! fixed key: the backend access token and the serialised signed-in identity.
//! [`KeyValueStore`] is the one interface those writers go through, so the
//! same session code runs against browser `localStorage` ([`crate::LocalStore`])
//! in the app and against [`crate::MemoryStore`] in tests.
//!
//! Implementations never fail outward. An unavailable backend (private
//! browsing, storage quota, no `window`) reads as "no value" and drops writes.

/// Synchronous string store keyed by name.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}
