//! # Per-identity memo cache
//!
//! The admin flag and the backend user record are asked for by the guard
//! components, the navbar and several dashboard views. [`AccountDirectory`]
//! fetches each at most once per email and hands out the cached value until
//! it is invalidated:
//!
//! - [`AccountDirectory::invalidate_all`] on every identity change.
//! - [`AccountDirectory::invalidate`] after something that changes the
//!   record (premium upgrade, profile update, role change).
//!
//! Failures are not cached; the next caller fetches again.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use crate::client::SecureClient;
use crate::error::ApiError;
use crate::models::AppUser;

/// Email-keyed memo table. Cloning shares the table.
#[derive(Clone)]
pub struct IdentityCache<V> {
    entries: Rc<RefCell<HashMap<String, V>>>,
}

impl<V> Default for IdentityCache<V> {
    fn default() -> Self {
        Self {
            entries: Rc::new(RefCell::new(HashMap::new())),
        }
    }
}

impl<V: Clone> IdentityCache<V> {
    pub fn get(&self, email: &str) -> Option<V> {
        self.entries.borrow().get(email).cloned()
    }

    /// Return the cached value or run `fetch` and remember a success.
    pub async fn get_or_fetch<F, Fut>(&self, email: &str, fetch: F) -> Result<V, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, ApiError>>,
    {
        if let Some(hit) = self.get(email) {
            return Ok(hit);
        }
        let value = fetch().await?;
        self.entries
            .borrow_mut()
            .insert(email.to_string(), value.clone());
        Ok(value)
    }

    pub fn invalidate(&self, email: &str) {
        self.entries.borrow_mut().remove(email);
    }

    pub fn invalidate_all(&self) {
        self.entries.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Memoized user records and admin flags for signed-in emails.
#[derive(Clone)]
pub struct AccountDirectory {
    client: SecureClient,
    users: IdentityCache<Option<AppUser>>,
    admins: IdentityCache<bool>,
}

impl AccountDirectory {
    pub fn new(client: SecureClient) -> Self {
        Self {
            client,
            users: IdentityCache::default(),
            admins: IdentityCache::default(),
        }
    }

    /// The backend's record for `email`, `None` if it has none yet.
    pub async fn account(&self, email: &str) -> Result<Option<AppUser>, ApiError> {
        self.users
            .get_or_fetch(email, || self.client.user(email))
            .await
    }

    pub async fn is_admin(&self, email: &str) -> Result<bool, ApiError> {
        self.admins
            .get_or_fetch(email, || self.client.admin_flag(email))
            .await
    }

    pub fn invalidate(&self, email: &str) {
        tracing::debug!("Dropping cached account for {email}");
        self.users.invalidate(email);
        self.admins.invalidate(email);
    }

    pub fn invalidate_all(&self) {
        self.users.invalidate_all();
        self.admins.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[tokio::test]
    async fn test_second_lookup_is_served_from_cache() {
        let cache = IdentityCache::<bool>::default();
        let calls = Cell::new(0);
        let fetch = || {
            calls.set(calls.get() + 1);
            async { Ok(true) }
        };

        assert_eq!(cache.get_or_fetch("ana@example.com", fetch).await, Ok(true));
        assert_eq!(cache.get_or_fetch("ana@example.com", fetch).await, Ok(true));
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn test_keys_are_per_email() {
        let cache = IdentityCache::<bool>::default();

        cache.get_or_fetch("ana@example.com", || async { Ok(true) }).await.unwrap();
        cache.get_or_fetch("bo@example.com", || async { Ok(false) }).await.unwrap();

        assert_eq!(cache.get("ana@example.com"), Some(true));
        assert_eq!(cache.get("bo@example.com"), Some(false));
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let cache = IdentityCache::<bool>::default();

        let first = cache
            .get_or_fetch("ana@example.com", || async { Err(ApiError::Network("offline".into())) })
            .await;
        assert!(first.is_err());
        assert!(cache.is_empty());

        let second = cache.get_or_fetch("ana@example.com", || async { Ok(false) }).await;
        assert_eq!(second, Ok(false));
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let cache = IdentityCache::<bool>::default();
        cache.get_or_fetch("ana@example.com", || async { Ok(false) }).await.unwrap();
        cache.get_or_fetch("bo@example.com", || async { Ok(false) }).await.unwrap();

        cache.invalidate("ana@example.com");
        let refreshed = cache.get_or_fetch("ana@example.com", || async { Ok(true) }).await;
        assert_eq!(refreshed, Ok(true));
        assert_eq!(cache.get("bo@example.com"), Some(false));

        cache.invalidate_all();
        assert!(cache.is_empty());
    }
}
