//! Premium plan: checkout and its return pages.

use dioxus::prelude::*;
use ui::icons::FaCrown;
use ui::{notify, use_account, use_auth, use_return_to, use_services, use_toasts, Icon, Spinner, ToastLevel};

use crate::Route;

const FREE_FEATURES: &[&str] = &[
    "Access to free lessons",
    "Save favorites",
    "Community features (basic)",
];

const PREMIUM_FEATURES: &[&str] = &[
    "Access to premium lessons",
    "Publish premium lessons",
    "Unlimited favorites",
    "Advanced analytics & dashboard",
];

#[component]
pub fn Pricing() -> Element {
    let services = use_services();
    let auth = use_auth();
    let account = use_account();
    let nav = use_navigator();
    let mut return_to = use_return_to();
    let mut toasts = use_toasts();
    let mut starting = use_signal(|| false);

    let is_premium = account().flatten().is_some_and(|u| u.is_premium);

    let handle_upgrade = move |_| {
        let Some(email) = auth().email() else {
            return_to.set(Some(Route::Pricing {}.to_string()));
            nav.push(Route::Login {});
            return;
        };
        let secure = services.secure.clone();
        let redirect = services.redirect.clone();
        spawn(async move {
            starting.set(true);
            match secure.create_checkout_session(&email).await {
                Ok(url) => redirect.hard_redirect(&url),
                Err(e) => {
                    starting.set(false);
                    notify(&mut toasts, ToastLevel::Error, &format!("Could not start checkout: {e}"));
                }
            }
        });
    };

    rsx! {
        div {
            class: "max-w-3xl mx-auto py-10 px-4",
            h2 { class: "text-3xl font-bold mb-6 text-center", "Pricing" }

            div {
                class: "grid md:grid-cols-2 gap-6",
                div {
                    class: "plan-card",
                    h3 { class: "text-xl font-semibold mb-2", "Free Plan" }
                    p { class: "mb-4 text-sm text-gray-500", "Basic access for trying the platform." }
                    ul {
                        class: "space-y-1 text-sm",
                        for feature in FREE_FEATURES.iter() {
                            li { key: "{feature}", "• {feature}" }
                        }
                    }
                }
                div {
                    class: "plan-card plan-premium",
                    h3 {
                        class: "text-xl font-semibold mb-2",
                        Icon { icon: FaCrown, width: 16, height: 16 }
                        " Premium Plan"
                    }
                    p { class: "mb-4 text-sm text-gray-500", "Full access to all premium features. One-time payment." }
                    ul {
                        class: "space-y-1 text-sm mb-6",
                        for feature in PREMIUM_FEATURES.iter() {
                            li { key: "{feature}", "• {feature}" }
                        }
                    }
                    if is_premium {
                        p { class: "badge badge-premium", "You are already Premium" }
                    } else {
                        button {
                            class: "btn btn-primary w-full",
                            disabled: starting(),
                            onclick: handle_upgrade,
                            if starting() { "Redirecting to checkout..." } else { "Upgrade to Premium" }
                        }
                    }
                }
            }
        }
    }
}

/// Landing page after a completed checkout. Confirms the session with the
/// backend, then refreshes the cached premium flag.
#[component]
pub fn PaymentSuccess(session_id: String) -> Element {
    let services = use_services();
    let auth = use_auth();
    let mut account = use_account();

    let confirmation = use_resource(move || {
        let state = auth();
        let session_id = session_id.clone();
        let services = services.clone();
        async move {
            if state.loading {
                return None;
            }
            let Some(email) = state.email() else {
                return Some(Err("Please sign in to activate your premium access.".to_string()));
            };
            if session_id.is_empty() {
                return Some(Err("Missing checkout session.".to_string()));
            }
            let result = services.secure.confirm_payment(&session_id, &email).await;
            services.accounts.invalidate(&email);
            account.restart();
            Some(result.map_err(|e| e.to_string()))
        }
    });

    rsx! {
        div {
            class: "text-center py-16 px-4",
            match confirmation() {
                None | Some(None) => rsx! { Spinner { label: "Confirming your payment..." } },
                Some(Some(Ok(()))) => rsx! {
                    h2 { class: "text-3xl font-bold text-green-600 mb-4", "Payment Successful!" }
                    p { class: "text-lg mb-6", "Thank you! Your premium access is now active." }
                    Link { class: "btn btn-primary", to: Route::PublicLessons {}, "Browse lessons" }
                },
                Some(Some(Err(e))) => rsx! {
                    h2 { class: "text-2xl font-bold text-red-600 mb-4", "We could not confirm your payment" }
                    p { class: "text-sm text-gray-600 mb-6", "{e}" }
                    Link { class: "btn btn-outline", to: Route::Pricing {}, "Back to pricing" }
                },
            }
        }
    }
}

#[component]
pub fn PaymentCancel() -> Element {
    rsx! {
        div {
            class: "text-center py-16 px-4",
            h2 { class: "text-3xl font-bold text-red-600 mb-4", "Payment Cancelled" }
            p { class: "text-lg mb-6", "No charge was made. You can upgrade any time." }
            Link { class: "btn btn-primary", to: Route::Pricing {}, "Back to pricing" }
        }
    }
}
