//! Registration page view with email/password form.

use api::identity::DEFAULT_AVATAR;
use dioxus::prelude::*;
use ui::{notify, use_services, use_toasts, GoogleButton, ToastLevel};

use crate::Route;

/// First problem with the form, if any.
fn validate(name: &str, email: &str, password: &str) -> Option<&'static str> {
    if name.is_empty() {
        return Some("Name is required");
    }
    if email.is_empty() || !email.contains('@') {
        return Some("Please enter a valid email");
    }
    if password.len() < 6 {
        return Some("Password must be at least 6 characters");
    }
    None
}

/// Register page component.
#[component]
pub fn Register() -> Element {
    let services = use_services();
    let nav = use_navigator();
    let mut toasts = use_toasts();
    let mut name = use_signal(String::new);
    let mut photo = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let identity = services.identity.clone();
        spawn(async move {
            error.set(None);

            let n = name().trim().to_string();
            let e = email().trim().to_string();
            let p = password();
            let ph = match photo().trim() {
                "" => DEFAULT_AVATAR.to_string(),
                url => url.to_string(),
            };

            if let Some(problem) = validate(&n, &e, &p) {
                error.set(Some(problem.to_string()));
                return;
            }

            loading.set(true);
            match identity.sign_up(&e, &p, &n, &ph).await {
                Ok(_) => {
                    notify(&mut toasts, ToastLevel::Success, "Account created");
                    nav.replace(Route::Home {});
                }
                Err(err) => {
                    loading.set(false);
                    error.set(Some(err.to_string()));
                }
            }
        });
    };

    rsx! {
        h1 { class: "mb-2 text-neutral-800 font-bold text-[1.75rem]", "Create Account" }
        p { class: "mb-8 text-neutral-600 text-[0.9375rem]", "Start sharing your life lessons" }

        form {
            onsubmit: handle_register,
            class: "flex flex-col gap-3 w-full",

            if let Some(err) = error() {
                div { class: "form-error", "{err}" }
            }

            input {
                class: "input w-full",
                r#type: "text",
                placeholder: "Name",
                value: name(),
                oninput: move |evt: FormEvent| name.set(evt.value()),
            }

            input {
                class: "input w-full",
                r#type: "url",
                placeholder: "Photo URL (optional)",
                value: photo(),
                oninput: move |evt: FormEvent| photo.set(evt.value()),
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
                placeholder: "Password (min 6 characters)",
                value: password(),
                oninput: move |evt: FormEvent| password.set(evt.value()),
            }

            button {
                class: "btn btn-primary w-full",
                r#type: "submit",
                disabled: loading(),
                if loading() { "Creating account..." } else { "Sign up" }
            }
        }

        div { class: "divider", "or" }
        GoogleButton { class: "btn btn-outline w-full" }

        p {
            class: "mt-6 text-sm text-neutral-600",
            "Already have an account? "
            Link { class: "text-primary", to: Route::Login {}, "Sign in" }
        }
    }
}
