//! Authentication context and hooks for the UI.

use api::access::AuthPhase;
use api::{AppUser, Identity, SessionOutcome};
use dioxus::prelude::*;

use crate::services::use_services;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub identity: Option<Identity>,
    /// True until the session bridge has finished with the latest identity.
    pub loading: bool,
    /// What the bridge did with the latest identity.
    pub session: Option<SessionOutcome>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            identity: None,
            loading: true,
            session: None,
        }
    }
}

impl AuthState {
    pub fn phase(&self) -> AuthPhase {
        match (&self.identity, self.loading) {
            (_, true) => AuthPhase::Resolving,
            (None, false) => AuthPhase::SignedOut,
            (Some(_), false) => AuthPhase::SignedIn,
        }
    }

    pub fn email(&self) -> Option<String> {
        self.identity.as_ref().map(|i| i.email.clone())
    }

    /// State while the session bridge handles a new identity notification.
    ///
    /// A refresh of the same signed-in account (profile update, token
    /// refresh) keeps the settled phase so guarded pages stay mounted; only a
    /// first resolve or a change of account goes back to `Resolving`.
    pub fn resolving(&self, identity: Option<Identity>) -> AuthState {
        let same_account = !self.loading
            && self.identity.is_some()
            && self.identity.as_ref().map(|i| &i.email) == identity.as_ref().map(|i| &i.email);

        AuthState {
            identity,
            loading: !same_account,
            session: if same_account { self.session.clone() } else { None },
        }
    }

    /// State once the bridge has finished with `identity`.
    pub fn settled(identity: Option<Identity>, outcome: SessionOutcome) -> AuthState {
        AuthState {
            identity,
            loading: false,
            session: Some(outcome),
        }
    }

    /// Signed in, but the backend never issued an access token.
    pub fn backend_unavailable(&self) -> bool {
        matches!(self.session, Some(SessionOutcome::TokenUnavailable { .. }))
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user signs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Route the user was headed to when a guard sent them to the login page.
pub fn use_return_to() -> Signal<Option<String>> {
    use_context::<Signal<Option<String>>>()
}

/// The backend's record for the signed-in user (memoized per email).
///
/// Resolves to `None` while signed out, while the session is still settling,
/// or when the lookup fails.
pub fn use_account() -> Resource<Option<AppUser>> {
    let services = use_services();
    let auth = use_auth();

    use_resource(move || {
        let state = auth();
        let accounts = services.accounts.clone();
        async move {
            if state.loading {
                return None;
            }
            let email = state.email()?;
            match accounts.account(&email).await {
                Ok(user) => user,
                Err(e) => {
                    tracing::error!("Loading account for {email} failed: {e}");
                    None
                }
            }
        }
    })
}

/// Provider component that runs the session bridge for the app lifetime.
/// Wrap your app with this component (inside the `Services` context).
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let services = use_services();
    let mut auth_state = use_signal(AuthState::default);
    use_context_provider(|| auth_state);
    use_context_provider(|| Signal::new(Option::<String>::None));

    // One subscription; notifications are handled strictly in order.
    use_future(move || {
        let services = services.clone();
        async move {
            let watch = services.identity.watch().clone();
            let mut changes = watch.subscribe();
            watch.restore();

            loop {
                let identity = changes.borrow_and_update().clone();
                services.accounts.invalidate_all();
                let next = auth_state.peek().resolving(identity.clone());
                auth_state.set(next);

                let outcome = services.bridge.handle(identity.as_ref()).await;
                if let SessionOutcome::TokenUnavailable { reason, .. } = &outcome {
                    tracing::warn!("Access token unavailable: {reason}");
                }
                auth_state.set(AuthState::settled(identity, outcome));

                if changes.changed().await.is_err() {
                    break;
                }
            }
        }
    });

    rsx! {
        {children}
    }
}

/// Button to sign the current user out.
#[component]
pub fn LogoutButton(
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let services = use_services();
    let nav = use_navigator();

    let onclick = move |_| {
        services.identity.sign_out();
        nav.push("/");
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}

/// Start a Google sign-in by leaving the app for the OAuth consent page.
#[component]
pub fn GoogleButton(
    #[props(default = "Continue with Google".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let services = use_services();
    let mut toasts = crate::use_toasts();

    let onclick = move |_| match services.identity.google_sign_in_url(&crate::nonce()) {
        Some(url) => services.redirect.hard_redirect(&url),
        None => crate::notify(&mut toasts, crate::ToastLevel::Error, "Google sign-in is not configured"),
    };

    rsx! {
        button {
            r#type: "button",
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(email: &str, name: &str) -> Identity {
        Identity {
            uid: "u1".into(),
            email: email.into(),
            display_name: Some(name.into()),
            photo_url: None,
            id_token: "id".into(),
            refresh_token: "refresh".into(),
        }
    }

    fn signed_in(email: &str) -> AuthState {
        AuthState::settled(
            Some(identity(email, "Ana")),
            SessionOutcome::Authenticated {
                email: email.into(),
            },
        )
    }

    #[test]
    fn test_first_resolve_is_loading() {
        let next = AuthState::default().resolving(Some(identity("a@example.com", "Ana")));
        assert_eq!(next.phase(), AuthPhase::Resolving);
    }

    #[test]
    fn test_profile_refresh_keeps_signed_in() {
        let state = signed_in("a@example.com");

        let next = state.resolving(Some(identity("a@example.com", "Ana B")));

        assert_eq!(next.phase(), AuthPhase::SignedIn);
        assert_eq!(next.session, state.session);
        assert_eq!(next.identity.unwrap().display_name.as_deref(), Some("Ana B"));
    }

    #[test]
    fn test_account_change_or_sign_out_resolves_again() {
        let state = signed_in("a@example.com");

        let other = state.resolving(Some(identity("b@example.com", "Bo")));
        assert_eq!(other.phase(), AuthPhase::Resolving);
        assert!(other.session.is_none());

        let out = state.resolving(None);
        assert_eq!(out.phase(), AuthPhase::Resolving);
    }

    #[test]
    fn test_settled_after_resolving() {
        let next = AuthState::default().resolving(None);
        let done = AuthState::settled(next.identity, SessionOutcome::SignedOut);
        assert_eq!(done.phase(), AuthPhase::SignedOut);
    }
}
