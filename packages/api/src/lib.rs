//! # API crate: backend, identity and session plumbing for Digital Life Lessons
//!
//! Everything the UI needs to talk to the outside world, with no rendering
//! code. The web package builds one instance of each service at startup and
//! shares it through context.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`access`] | Pure decisions for guarded routes and premium lessons |
//! | [`cache`] | Per-email memo of the backend user record and admin flag (`AccountDirectory`) |
//! | [`client`] | `PublicClient` / `SecureClient` and every REST endpoint |
//! | [`error`] | `ApiError`, shared by backend and identity provider calls |
//! | [`identity`] | `Identity`, the `IdentityWatch` change stream, and the Identity Toolkit REST client |
//! | [`models`] | Wire types: users, lessons, favorites, comments, reports, stats |
//! | [`retry`] | Bounded retry with `Backoff` and an injectable `Sleep` |
//! | [`session`] | `SessionBridge`: identity changes to backend access token |
//! | [`toggle`] | `FavoriteToggle`, the favorite button's state machine |
//!
//! ## Flow
//!
//! ```text
//! IdentityProvider ──publish──▶ IdentityWatch ──▶ SessionBridge ──▶ TokenStore
//!                                                                      │
//!                                     SecureClient ◀── bearer token ───┘
//! ```

pub mod access;
pub mod cache;
pub mod client;
pub mod error;
pub mod identity;
pub mod models;
pub mod retry;
pub mod session;
pub mod toggle;

#[cfg(test)]
mod testing;

pub use cache::{AccountDirectory, IdentityCache};
pub use client::{FavoriteSettled, HardRedirect, PublicClient, SecureClient, LOGIN_PATH};
pub use error::ApiError;
pub use identity::{id_token_from_fragment, Identity, IdentityProvider, IdentityWatch};
pub use models::*;
pub use retry::{retry, Backoff, RetryPolicy, Sleep, TimerSleep};
pub use session::{SessionBackend, SessionBridge, SessionOutcome};
pub use toggle::{FavoriteAction, FavoriteToggle};

pub use store::{KeyValueStore, LessonsConfig, MemoryStore, TokenStore};
