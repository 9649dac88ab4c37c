//! # Access token: the one shared mutable value
//!
//! The backend access token is read by every secure request and written by
//! exactly two places: the session bridge (after a successful exchange or a
//! sign-out) and the secure client's 401 handler. [`TokenStore`] is the only
//! type allowed to touch the `access-token` key, which keeps those writes
//! greppable and lets tests run against a [`crate::MemoryStore`].
//!
//! Token presence means a previous exchange succeeded. It says nothing about
//! whether the backend still accepts it.

use std::fmt;
use std::rc::Rc;

use crate::kv::KeyValueStore;

/// Storage key holding the backend access token.
pub const TOKEN_KEY: &str = "access-token";

/// get/set/clear over the persisted access token.
#[derive(Clone)]
pub struct TokenStore {
    kv: Rc<dyn KeyValueStore>,
}

impl TokenStore {
    pub fn new(kv: Rc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    pub fn get(&self) -> Option<String> {
        self.kv.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn set(&self, token: &str) {
        self.kv.set(TOKEN_KEY, token);
    }

    pub fn clear(&self) {
        self.kv.remove(TOKEN_KEY);
    }

    pub fn is_present(&self) -> bool {
        self.get().is_some()
    }
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStore")
            .field("present", &self.is_present())
            .finish()
    }
}
