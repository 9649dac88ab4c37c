//! Dashboard overview and profile.

use api::access::ADMIN_HOME_PATH;
use api::{UserUpsert, Visibility};
use dioxus::prelude::*;
use ui::icons::FaCrown;
use ui::{
    notify, use_account, use_auth, use_services, use_toasts, Icon, LessonCard, Spinner, StatCard,
    ToastLevel,
};

use crate::Route;

#[component]
pub fn UserHome() -> Element {
    let services = use_services();
    let auth = use_auth();
    let account = use_account();
    let nav = use_navigator();

    let secure = services.secure.clone();
    let accounts = services.accounts.clone();
    let summary = use_resource(move || {
        let state = auth();
        let secure = secure.clone();
        let accounts = accounts.clone();
        async move {
            let email = state.email().filter(|_| !state.loading)?;
            let admin = accounts.is_admin(&email).await.unwrap_or(false);
            if admin {
                return Some(None);
            }
            let lessons = secure.my_lessons(&email).await.map(|l| l.len()).unwrap_or(0);
            let favorites = secure.favorites().await.map(|f| f.len()).unwrap_or(0);
            Some(Some((lessons, favorites)))
        }
    });

    // Admins land on their own home
    use_effect(move || {
        if let Some(Some(None)) = summary() {
            nav.replace(ADMIN_HOME_PATH);
        }
    });

    let state = auth();
    let name = state
        .identity
        .as_ref()
        .map(|i| i.display_name().to_string())
        .unwrap_or_default();
    let is_premium = account().flatten().is_some_and(|u| u.is_premium);

    rsx! {
        div {
            class: "p-6",
            h1 { class: "text-2xl font-semibold mb-1", "Welcome to your Dashboard, {name}" }
            p {
                class: "text-sm text-gray-600 mb-6",
                "Here you can add lessons, manage your lessons and see your favorites."
            }

            if state.backend_unavailable() {
                div {
                    class: "form-error mb-6",
                    "We could not connect your account to the server. Some features may not work until you sign in again."
                }
            }

            match summary() {
                Some(Some(Some((lessons, favorites)))) => rsx! {
                    div {
                        class: "grid gap-4 md:grid-cols-3",
                        StatCard { label: "My lessons", value: lessons.to_string() }
                        StatCard { label: "Favorites", value: favorites.to_string() }
                        StatCard {
                            label: "Plan",
                            value: if is_premium { "Premium".to_string() } else { "Free".to_string() },
                        }
                    }
                    div {
                        class: "flex gap-3 mt-6",
                        Link { class: "btn btn-primary", to: Route::AddLesson {}, "Add a lesson" }
                        if !is_premium {
                            Link { class: "btn btn-outline", to: Route::Pricing {}, "Upgrade to Premium" }
                        }
                    }
                },
                _ => rsx! { Spinner {} },
            }
        }
    }
}

#[component]
pub fn Profile() -> Element {
    let services = use_services();
    let auth = use_auth();
    let mut account = use_account();
    let mut toasts = use_toasts();

    let state = auth();
    let identity = state.identity.clone();
    let email = state.email().unwrap_or_default();

    let mut name = use_signal(String::new);
    let mut photo = use_signal(String::new);
    let mut saving = use_signal(|| false);

    // Seed the form whenever the identity changes
    use_effect(move || {
        if let Some(identity) = auth().identity {
            name.set(identity.display_name.unwrap_or_default());
            photo.set(identity.photo_url.unwrap_or_default());
        }
    });

    let secure = services.secure.clone();
    let lessons = use_resource(move || {
        let state = auth();
        let secure = secure.clone();
        async move {
            let email = state.email().filter(|_| !state.loading)?;
            let lessons = secure.my_lessons(&email).await;
            let favorites = secure.favorites().await.map(|f| f.len()).unwrap_or(0);
            Some(lessons.map(|l| (l, favorites)))
        }
    });

    let update_email = email.clone();
    let handle_update = move |evt: FormEvent| {
        evt.prevent_default();
        let services = services.clone();
        let email = update_email.clone();
        spawn(async move {
            let n = name().trim().to_string();
            if n.is_empty() {
                notify(&mut toasts, ToastLevel::Error, "Name is required");
                return;
            }
            saving.set(true);
            match services.identity.update_profile(&n, photo().trim()).await {
                Ok(updated) => {
                    let upsert = UserUpsert {
                        email: updated.email.clone(),
                        name: updated.display_name.clone(),
                        photo_url: updated.photo_url.clone(),
                    };
                    if let Err(e) = services.public.upsert_user(&upsert).await {
                        tracing::warn!("Profile saved but user record not updated: {e}");
                    }
                    services.accounts.invalidate(&email);
                    account.restart();
                    notify(&mut toasts, ToastLevel::Success, "Profile updated");
                }
                Err(e) => notify(&mut toasts, ToastLevel::Error, &e.to_string()),
            }
            saving.set(false);
        });
    };

    let Some(identity) = identity else {
        return rsx! { Spinner {} };
    };
    let user = account().flatten();
    let is_premium = user.as_ref().is_some_and(|u| u.is_premium);
    let role = user
        .as_ref()
        .and_then(|u| u.role.clone())
        .unwrap_or_else(|| "user".to_string());
    let avatar = identity.photo_url.clone().filter(|p| !p.is_empty());

    rsx! {
        div {
            class: "p-6 max-w-5xl",
            div {
                class: "panel flex items-center gap-5 mb-8",
                if let Some(src) = avatar {
                    img { class: "avatar avatar-lg", src: "{src}", alt: "{identity.display_name()}" }
                } else {
                    span { class: "avatar avatar-lg avatar-initial", "{identity.initial()}" }
                }
                div {
                    h1 {
                        class: "text-2xl font-semibold flex items-center gap-2",
                        "{identity.display_name()}"
                        if is_premium {
                            span {
                                class: "badge badge-premium",
                                Icon { icon: FaCrown, width: 12, height: 12 }
                                " Premium"
                            }
                        }
                    }
                    p { class: "text-sm text-gray-600", "{identity.email}" }
                    p { class: "text-xs text-gray-400 capitalize", "Role: {role}" }
                }
            }

            form {
                class: "panel grid gap-3 md:grid-cols-3 items-end mb-8",
                onsubmit: handle_update,
                label {
                    class: "flex flex-col gap-1 text-sm",
                    "Display name"
                    input {
                        class: "input",
                        value: name(),
                        oninput: move |evt: FormEvent| name.set(evt.value()),
                    }
                }
                label {
                    class: "flex flex-col gap-1 text-sm",
                    "Photo URL"
                    input {
                        class: "input",
                        r#type: "url",
                        value: photo(),
                        oninput: move |evt: FormEvent| photo.set(evt.value()),
                    }
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: saving(),
                    if saving() { "Saving..." } else { "Update profile" }
                }
            }

            match lessons() {
                None | Some(None) => rsx! { Spinner {} },
                Some(Some(Err(e))) => rsx! {
                    p { class: "text-sm text-red-600", "Could not load your lessons: {e}" }
                },
                Some(Some(Ok((mine, favorites)))) => {
                    let public: Vec<_> = mine
                        .into_iter()
                        .filter(|l| l.visibility == Visibility::Public)
                        .collect();
                    rsx! {
                        div {
                            class: "grid gap-4 md:grid-cols-2 mb-6",
                            StatCard { label: "Public lessons", value: public.len().to_string() }
                            StatCard { label: "Saved favorites", value: favorites.to_string() }
                        }
                        h2 { class: "text-lg font-semibold mb-3", "My public lessons" }
                        if public.is_empty() {
                            p { class: "text-sm text-gray-500", "You have not published any public lessons yet." }
                        }
                        div {
                            class: "grid gap-5 md:grid-cols-2",
                            for lesson in public {
                                LessonCard { key: "{lesson.id}", lesson, viewer_is_premium: is_premium }
                            }
                        }
                    }
                }
            }
        }
    }
}
