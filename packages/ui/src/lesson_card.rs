use api::access::{lesson_access, LessonAccess, PRICING_PATH};
use api::{display_date, AccessLevel, Lesson};
use dioxus::prelude::*;

use crate::icons::FaLock;
use crate::{notify, use_auth, use_services, use_toasts, Icon, ToastLevel};

/// Summary card used by the listings. Premium lessons are blurred behind an
/// upgrade prompt for viewers who are not premium.
#[component]
pub fn LessonCard(lesson: Lesson, viewer_is_premium: bool) -> Element {
    let services = use_services();
    let auth = use_auth();
    let mut toasts = use_toasts();
    let mut saving = use_signal(|| false);

    let locked = lesson_access(&lesson, viewer_is_premium) == LessonAccess::Locked;
    let premium = lesson.access_level == AccessLevel::Premium;
    let category = lesson.category.clone().unwrap_or_else(|| "LifeLesson".to_string());
    let tone = lesson.emotional_tone.clone().unwrap_or_else(|| "Neutral".to_string());
    let created = display_date(lesson.created_at.as_deref());
    let creator = lesson.creator_display_name().to_string();
    let initial = lesson.creator_initial();
    let photo = lesson.creator_photo_url.clone().filter(|p| !p.is_empty());
    let details = format!("/lessons/{}", lesson.id);
    let lesson_id = lesson.id.clone();

    let handle_save = move |_| {
        let lesson_id = lesson_id.clone();
        let secure = services.secure.clone();
        spawn(async move {
            if auth().identity.is_none() {
                notify(&mut toasts, ToastLevel::Error, "Please log in to save lessons");
                return;
            }
            saving.set(true);
            match secure.add_favorite(&lesson_id).await {
                Ok(_) => notify(&mut toasts, ToastLevel::Success, "Saved to favorites"),
                Err(e) => notify(&mut toasts, ToastLevel::Error, &e.to_string()),
            }
            saving.set(false);
        });
    };

    rsx! {
        div {
            class: if locked { "lesson-card locked" } else { "lesson-card" },

            if locked {
                div {
                    class: "lesson-card-lock",
                    p {
                        class: "text-sm font-semibold text-amber-800 mb-1",
                        Icon { icon: FaLock, width: 12, height: 12 }
                        " Premium Lesson"
                    }
                    p { class: "text-xs text-amber-700 mb-3", "Upgrade to Premium to read the full story and other premium lessons." }
                    Link { class: "btn btn-primary btn-sm", to: PRICING_PATH, "Go to Pricing →" }
                }
            }

            div {
                class: if locked { "opacity-40 pointer-events-none" } else { "" },
                div {
                    class: "flex items-start justify-between gap-4 mb-3",
                    div {
                        h2 { class: "text-base font-semibold text-gray-900 mb-1", "{lesson.title}" }
                        p { class: "text-[11px] uppercase tracking-wide text-gray-400", "#{category}" }
                    }
                    span {
                        class: if premium { "badge badge-premium" } else { "badge badge-free" },
                        if premium { "Premium" } else { "Free" }
                    }
                }

                p { class: "text-sm text-gray-700 mb-3 line-clamp-3", "{lesson.short_description}" }

                div {
                    class: "flex items-center justify-between text-xs text-gray-500 mb-3",
                    div {
                        class: "flex items-center gap-2",
                        if let Some(photo) = photo {
                            img { class: "avatar avatar-sm", src: "{photo}", alt: "{creator}" }
                        } else {
                            span { class: "avatar avatar-sm avatar-initial", "{initial}" }
                        }
                        span { "{creator}" }
                    }
                    div {
                        class: "flex items-center gap-2",
                        span { "{tone}" }
                        span { "•" }
                        span { "{created}" }
                    }
                }

                div {
                    class: "flex items-center justify-between",
                    button {
                        class: "btn btn-outline btn-sm",
                        disabled: saving(),
                        onclick: handle_save,
                        if saving() { "Saving..." } else { "Save" }
                    }
                    Link { class: "btn btn-link btn-sm", to: details, "See details →" }
                }
            }
        }
    }
}

/// A labelled number on the dashboards.
#[component]
pub fn StatCard(label: String, value: String, #[props(default)] hint: Option<String>) -> Element {
    rsx! {
        div {
            class: "stat-card",
            p { class: "text-xs uppercase tracking-wide text-gray-500", "{label}" }
            p { class: "text-3xl font-bold text-gray-900 mt-1", "{value}" }
            if let Some(hint) = hint {
                p { class: "text-xs text-gray-400 mt-1", "{hint}" }
            }
        }
    }
}
