//! # localStorage-backed store: browser-side persistence
//!
//! [`LocalStore`] is the [`KeyValueStore`] used on the **web platform**. Values
//! live in the browser's `window.localStorage`, so the access token and the
//! signed-in identity survive reloads the same way the hosted identity SDK
//! keeps its session.
//!
//! Keys are written as-is (`"access-token"`), matching what the backend's
//! other clients expect.
//!
//! ## Error handling
//!
//! `localStorage` can be missing (no `window`, sandboxed iframe) or throw
//! (quota, privacy mode). Reads return `None`. Failed writes and removals are
//! logged at `warn` and otherwise dropped. The backend stays authoritative;
//! losing the token only means the next protected call comes back 401.

use crate::kv::KeyValueStore;

/// `window.localStorage`-backed KeyValueStore for the web platform.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        match Self::storage() {
            Some(storage) => {
                if let Err(e) = storage.set_item(key, value) {
                    tracing::warn!("Could not write {key} to localStorage: {e:?}");
                }
            }
            None => tracing::warn!("localStorage unavailable, dropping write to {key}"),
        }
    }

    fn remove(&self, key: &str) {
        match Self::storage() {
            Some(storage) => {
                if let Err(e) = storage.remove_item(key) {
                    tracing::warn!("Could not remove {key} from localStorage: {e:?}");
                }
            }
            None => tracing::warn!("localStorage unavailable, {key} was not removed"),
        }
    }
}
