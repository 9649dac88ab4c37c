//! Route guards.
//!
//! Both guards take the current route as `from` so a bounce to the login page
//! can come back to it afterwards (see [`crate::use_return_to`]).

use api::access::{route_access, Access, RouteGuard, LOGIN_PATH};
use dioxus::prelude::*;

use crate::{use_auth, use_services, Spinner};

/// Renders children only for signed-in users.
#[component]
pub fn PrivateRoute(from: String, children: Element) -> Element {
    let auth = use_auth();
    let decision = use_memo(move || route_access(RouteGuard::Private, auth().phase(), None));
    use_guard_redirect(decision, from);

    render(decision(), children)
}

/// Renders children only for signed-in admins; everyone else signed in is
/// sent to the dashboard.
#[component]
pub fn AdminRoute(from: String, children: Element) -> Element {
    let services = use_services();
    let auth = use_auth();

    let admin_flag = use_resource(move || {
        let state = auth();
        let accounts = services.accounts.clone();
        async move {
            if state.loading {
                return None;
            }
            let email = state.email()?;
            match accounts.is_admin(&email).await {
                Ok(admin) => Some(admin),
                Err(e) => {
                    tracing::error!("Admin check for {email} failed: {e}");
                    Some(false)
                }
            }
        }
    });

    let decision = use_memo(move || {
        let admin = admin_flag().flatten();
        route_access(RouteGuard::Admin, auth().phase(), admin)
    });
    use_guard_redirect(decision, from);

    render(decision(), children)
}

fn render(access: Access, children: Element) -> Element {
    match access {
        Access::Loading => rsx! { Spinner {} },
        Access::Allow => children,
        Access::Redirect { .. } => rsx! {},
    }
}

/// Replace-navigate whenever the decision becomes a redirect. Only the login
/// redirect records where the user came from.
fn use_guard_redirect(decision: Memo<Access>, from: String) {
    let nav = use_navigator();
    let mut return_to = crate::use_return_to();

    // Track `from` in a signal so the effect sees route changes
    let mut origin = use_signal(|| from.clone());
    if *origin.peek() != from {
        origin.set(from);
    }

    use_effect(move || {
        if let Access::Redirect { to } = decision() {
            if to == LOGIN_PATH {
                return_to.set(Some(origin.peek().clone()));
            }
            nav.replace(to);
        }
    });
}
