use api::access::PRICING_PATH;
use dioxus::prelude::*;

use crate::icons::{FaBookOpen, FaCrown};
use crate::{use_account, use_auth, Icon, LogoutButton};

#[component]
pub fn Navbar() -> Element {
    let auth = use_auth();
    let account = use_account();

    let identity = auth().identity;
    let signed_in = identity.is_some();
    let is_premium = account().flatten().is_some_and(|u| u.is_premium);
    let name = identity.as_ref().map(|i| i.display_name().to_string()).unwrap_or_default();
    let initial = identity.as_ref().map(|i| i.initial()).unwrap_or_default();
    let photo = identity
        .as_ref()
        .and_then(|i| i.photo_url.clone())
        .filter(|p| !p.is_empty());

    rsx! {
        nav {
            class: "navbar",
            div {
                class: "max-w-6xl mx-auto px-4 py-3 flex items-center justify-between gap-4",

                Link {
                    class: "flex items-center gap-2 font-bold text-lg text-gray-900 no-underline",
                    to: "/",
                    Icon { icon: FaBookOpen, width: 18, height: 18 }
                    span { "Digital Life Lessons" }
                }

                div {
                    class: "flex items-center gap-4 text-sm",
                    Link { class: "nav-link", to: "/", "Home" }
                    Link { class: "nav-link", to: "/lessons", "Public Lessons" }
                    if signed_in {
                        Link { class: "nav-link", to: "/dashboard/add-lesson", "Add Lesson" }
                        Link { class: "nav-link", to: "/dashboard/my-lessons", "My Lessons" }
                    }
                    if !is_premium {
                        Link { class: "nav-link", to: PRICING_PATH, "Upgrade" }
                    }
                }

                div {
                    class: "flex items-center gap-3",
                    if signed_in {
                        if is_premium {
                            span {
                                class: "badge badge-premium",
                                Icon { icon: FaCrown, width: 12, height: 12 }
                                " Premium"
                            }
                        }
                        Link {
                            class: "flex items-center gap-2 no-underline",
                            to: "/dashboard/profile",
                            if let Some(photo) = photo {
                                img { class: "avatar", src: "{photo}", alt: "{name}" }
                            } else {
                                span { class: "avatar avatar-initial", "{initial}" }
                            }
                        }
                        Link { class: "nav-link", to: "/dashboard", "Dashboard" }
                        LogoutButton { class: "btn btn-outline" }
                    } else {
                        Link { class: "btn btn-outline", to: "/auth/login", "Log in" }
                        Link { class: "btn btn-primary", to: "/auth/register", "Sign up" }
                    }
                }
            }
        }
    }
}
