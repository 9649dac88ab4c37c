//! Shared service construction for the app.
//!
//! [`Services`] bundles one instance of every client and is provided once as
//! context by the web package; components get it back with [`use_services`].
//! Storage is platform-dependent:
//! - **Web** (WASM + `web` feature): `localStorage` via [`store::LocalStore`]
//! - **Everything else**: in-memory via [`store::MemoryStore`]

use std::rc::Rc;

use api::{
    AccountDirectory, HardRedirect, IdentityProvider, IdentityWatch, PublicClient, RetryPolicy,
    SecureClient, SessionBridge,
};
use dioxus::prelude::*;
use store::{KeyValueStore, LessonsConfig, TokenStore};

/// Create the platform's key/value store.
pub fn make_store() -> Rc<dyn KeyValueStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        Rc::new(store::LocalStore::new())
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        Rc::new(store::MemoryStore::new())
    }
}

/// Full page load through `window.location`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserRedirect;

impl HardRedirect for BrowserRedirect {
    fn hard_redirect(&self, path: &str) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.location().set_href(path) {
                    tracing::error!("Redirect to {path} failed: {e:?}");
                }
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            tracing::warn!("Hard redirect to {path} requested outside the browser");
        }
    }
}

/// The fragment of the current URL, `#` included, or empty.
pub fn location_fragment() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|w| w.location().hash().ok())
            .unwrap_or_default()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        String::new()
    }
}

/// Random hex string for OAuth nonces.
pub fn nonce() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        (0..4)
            .map(|_| format!("{:08x}", (js_sys::Math::random() * f64::from(u32::MAX)) as u32))
            .collect()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use std::time::{SystemTime, UNIX_EPOCH};
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        format!("{nanos:032x}")
    }
}

/// Every client the views talk through.
#[derive(Clone)]
pub struct Services {
    pub config: Rc<LessonsConfig>,
    pub public: PublicClient,
    pub secure: SecureClient,
    pub identity: IdentityProvider,
    pub bridge: Rc<SessionBridge<PublicClient>>,
    pub accounts: AccountDirectory,
    pub redirect: Rc<dyn HardRedirect>,
}

impl Services {
    pub fn new(
        config: LessonsConfig,
        kv: Rc<dyn KeyValueStore>,
        redirect: Rc<dyn HardRedirect>,
    ) -> Self {
        let tokens = TokenStore::new(kv.clone());
        let public = PublicClient::new(config.base_url());
        let secure = SecureClient::new(&public, tokens.clone(), redirect.clone());
        let identity = IdentityProvider::new(config.identity.clone(), IdentityWatch::new(kv));
        let bridge = SessionBridge::new(
            public.clone(),
            tokens,
            RetryPolicy::from_config(&config.session),
        );
        let accounts = AccountDirectory::new(secure.clone());

        Self {
            config: Rc::new(config),
            public,
            secure,
            identity,
            bridge: Rc::new(bridge),
            accounts,
            redirect,
        }
    }

    /// Browser defaults: platform storage and `window.location` redirects.
    pub fn for_browser(config: LessonsConfig) -> Self {
        Self::new(config, make_store(), Rc::new(BrowserRedirect))
    }
}

pub fn use_services() -> Services {
    use_context::<Services>()
}
