//! The signed-in author's own lessons.

use api::access::can_author;
use api::{display_date, AccessLevel, Lesson, LessonPatch};
use dioxus::prelude::*;
use ui::icons::{FaPenToSquare, FaTrashCan};
use ui::{notify, use_account, use_auth, use_services, use_toasts, Icon, Spinner, ToastLevel};

use crate::Route;

#[component]
pub fn MyLessons() -> Element {
    let services = use_services();
    let auth = use_auth();
    let account = use_account();
    let is_premium = account().flatten().is_some_and(|u| u.is_premium);

    let mut lessons = use_resource(move || {
        let state = auth();
        let secure = services.secure.clone();
        async move {
            let email = state.email().filter(|_| !state.loading)?;
            Some(
                secure
                    .my_lessons(&email)
                    .await
                    .inspect_err(|e| tracing::error!("Loading lessons by {email} failed: {e}")),
            )
        }
    });

    rsx! {
        div {
            class: "p-6",
            div {
                class: "flex items-center justify-between mb-6",
                h1 { class: "text-2xl font-semibold", "My Lessons" }
                Link { class: "btn btn-primary btn-sm", to: Route::AddLesson {}, "Add lesson" }
            }

            match &*lessons.read_unchecked() {
                None | Some(None) => rsx! { Spinner { label: "Loading your lessons..." } },
                Some(Some(Err(e))) => rsx! {
                    p { class: "text-sm text-red-600", "Could not load your lessons: {e}" }
                },
                Some(Some(Ok(list))) if list.is_empty() => rsx! {
                    div {
                        class: "panel text-center",
                        p { class: "text-sm text-gray-600 mb-3", "You have not written any lessons yet." }
                        Link { class: "btn btn-primary", to: Route::AddLesson {}, "Write your first lesson" }
                    }
                },
                Some(Some(Ok(list))) => rsx! {
                    table {
                        class: "data-table",
                        thead {
                            tr {
                                th { "Title" }
                                th { "Created" }
                                th { "Visibility" }
                                th { "Access" }
                                th { "Stats" }
                                th { "" }
                            }
                        }
                        tbody {
                            for lesson in list.iter().cloned() {
                                MyLessonRow {
                                    key: "{lesson.id}",
                                    lesson,
                                    author_is_premium: is_premium,
                                    on_changed: move |_| lessons.restart(),
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

/// Patch that flips a lesson's access level, or the message to show when the
/// author may not make it premium.
fn access_change(current: AccessLevel, author_is_premium: bool) -> Result<LessonPatch, &'static str> {
    let next = current.toggled();
    if can_author(next, author_is_premium) {
        Ok(LessonPatch::access_level(next))
    } else {
        Err("Upgrade to Premium to create Premium lessons")
    }
}

#[component]
fn MyLessonRow(lesson: Lesson, author_is_premium: bool, on_changed: EventHandler<()>) -> Element {
    let services = use_services();
    let mut toasts = use_toasts();
    let mut busy = use_signal(|| false);

    let id = lesson.id.clone();
    let created = display_date(lesson.created_at.as_deref());
    let visibility = lesson.visibility;
    let access = lesson.access_level;

    let patch_services = services.clone();
    let patch_id = id.clone();
    let apply_patch = move |patch: LessonPatch, done: &'static str| {
        let secure = patch_services.secure.clone();
        let id = patch_id.clone();
        spawn(async move {
            busy.set(true);
            match secure.update_lesson(&id, &patch).await {
                Ok(()) => {
                    notify(&mut toasts, ToastLevel::Success, done);
                    on_changed.call(());
                }
                Err(e) => notify(&mut toasts, ToastLevel::Error, &e.to_string()),
            }
            busy.set(false);
        });
    };
    let toggle_visibility = apply_patch.clone();
    let toggle_access = move |_| match access_change(access, author_is_premium) {
        Ok(patch) => apply_patch(patch, "Access level updated"),
        Err(message) => notify(&mut toasts, ToastLevel::Error, message),
    };

    let delete_id = id.clone();
    let handle_delete = move |_| {
        let secure = services.secure.clone();
        let id = delete_id.clone();
        spawn(async move {
            busy.set(true);
            match secure.delete_my_lesson(&id).await {
                Ok(()) => {
                    notify(&mut toasts, ToastLevel::Success, "Lesson deleted");
                    on_changed.call(());
                }
                Err(e) => notify(&mut toasts, ToastLevel::Error, &e.to_string()),
            }
            busy.set(false);
        });
    };

    rsx! {
        tr {
            td {
                Link { class: "font-medium", to: Route::LessonDetails { id: id.clone() }, "{lesson.title}" }
            }
            td { class: "text-xs text-gray-500", "{created}" }
            td {
                button {
                    class: "chip",
                    disabled: busy(),
                    onclick: move |_| toggle_visibility(LessonPatch::visibility(visibility.toggled()), "Visibility updated"),
                    "{visibility.as_str()}"
                }
            }
            td {
                button {
                    class: if access == AccessLevel::Premium { "chip chip-amber" } else { "chip" },
                    disabled: busy(),
                    onclick: toggle_access,
                    "{access.as_str()}"
                }
            }
            td { class: "text-xs text-gray-500", "{lesson.likes_count} likes · {lesson.saved_count} saves" }
            td {
                class: "flex gap-2 justify-end",
                Link {
                    class: "btn btn-outline btn-sm",
                    to: Route::UpdateLesson { id: id.clone() },
                    Icon { icon: FaPenToSquare, width: 12, height: 12 }
                }
                button {
                    class: "btn btn-danger btn-sm",
                    disabled: busy(),
                    onclick: handle_delete,
                    Icon { icon: FaTrashCan, width: 12, height: 12 }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_author_cannot_make_lesson_premium() {
        assert_eq!(
            access_change(AccessLevel::Free, false),
            Err("Upgrade to Premium to create Premium lessons")
        );
    }

    #[test]
    fn test_access_change_patches() {
        assert_eq!(
            access_change(AccessLevel::Free, true),
            Ok(LessonPatch::access_level(AccessLevel::Premium))
        );
        assert_eq!(
            access_change(AccessLevel::Premium, false),
            Ok(LessonPatch::access_level(AccessLevel::Free))
        );
    }
}
