//! Login page and the Google sign-in return page.

use dioxus::prelude::*;
use ui::{
    location_fragment, notify, use_return_to, use_services, use_toasts, GoogleButton, Spinner,
    ToastLevel,
};

use crate::Route;

/// Where to go after signing in: the guarded page that sent us here, or home.
fn after_login(return_to: &mut Signal<Option<String>>) -> Route {
    return_to
        .write()
        .take()
        .and_then(|path| path.parse::<Route>().ok())
        .unwrap_or(Route::Home {})
}

/// Login page component.
#[component]
pub fn Login() -> Element {
    let services = use_services();
    let nav = use_navigator();
    let mut return_to = use_return_to();
    let mut toasts = use_toasts();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let identity = services.identity.clone();
        spawn(async move {
            error.set(None);

            let e = email().trim().to_string();
            let p = password();
            if e.is_empty() || p.is_empty() {
                error.set(Some("Email and password are required".to_string()));
                return;
            }

            loading.set(true);
            match identity.sign_in(&e, &p).await {
                Ok(user) => {
                    notify(&mut toasts, ToastLevel::Success, &format!("Welcome back, {}!", user.display_name()));
                    nav.replace(after_login(&mut return_to));
                }
                Err(err) => {
                    loading.set(false);
                    error.set(Some(err.to_string()));
                }
            }
        });
    };

    rsx! {
        h1 { class: "mb-2 text-neutral-800 font-bold text-[1.75rem]", "Welcome back" }
        p { class: "mb-8 text-neutral-600 text-[0.9375rem]", "Log in to continue learning" }

        form {
            onsubmit: handle_login,
            class: "flex flex-col gap-3 w-full",

            if let Some(err) = error() {
                div { class: "form-error", "{err}" }
            }

            input {
                class: "input w-full",
                r#type: "email",
                placeholder: "Email",
                value: email(),
                oninput: move |evt: FormEvent| email.set(evt.value()),
            }

            input {
                class: "input w-full",
                r#type: "password",
                placeholder: "Password",
                value: password(),
                oninput: move |evt: FormEvent| password.set(evt.value()),
            }

            button {
                class: "btn btn-primary w-full",
                r#type: "submit",
                disabled: loading(),
                if loading() { "Signing in..." } else { "Log in" }
            }
        }

        div { class: "divider", "or" }
        GoogleButton { class: "btn btn-outline w-full" }

        p {
            class: "mt-6 text-sm text-neutral-600",
            "New here? "
            Link { class: "text-primary", to: Route::Register {}, "Create an account" }
        }
    }
}

/// Google redirects back here with `#id_token=...`.
#[component]
pub fn AuthCallback() -> Element {
    let services = use_services();
    let nav = use_navigator();
    let mut return_to = use_return_to();
    let mut toasts = use_toasts();

    let result = use_resource(move || {
        let identity = services.identity.clone();
        async move {
            let Some(token) = api::id_token_from_fragment(&location_fragment()) else {
                return Err("Google did not return a sign-in token.".to_string());
            };
            identity
                .sign_in_with_google(&token)
                .await
                .map(|user| user.display_name().to_string())
                .map_err(|e| e.to_string())
        }
    });

    use_effect(move || {
        if let Some(Ok(name)) = result() {
            notify(&mut toasts, ToastLevel::Success, &format!("Welcome, {name}!"));
            nav.replace(after_login(&mut return_to));
        }
    });

    rsx! {
        match result() {
            Some(Err(e)) => rsx! {
                h1 { class: "mb-2 font-bold text-xl text-red-600", "Google sign-in failed" }
                p { class: "mb-6 text-sm text-gray-600", "{e}" }
                Link { class: "btn btn-primary", to: Route::Login {}, "Back to login" }
            },
            _ => rsx! { Spinner { label: "Signing you in..." } },
        }
    }
}
