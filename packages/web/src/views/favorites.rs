//! Saved lessons.

use api::{display_date, Favorite};
use dioxus::prelude::*;
use ui::icons::FaTrashCan;
use ui::{notify, use_services, use_toasts, Icon, Spinner, ToastLevel};

use crate::Route;

/// Category filter options present in the saved list.
fn categories(favorites: &[Favorite]) -> Vec<String> {
    let mut found: Vec<String> = favorites
        .iter()
        .filter_map(|f| f.lesson.as_ref()?.category.clone())
        .collect();
    found.sort();
    found.dedup();
    found
}

#[component]
pub fn MyFavorites() -> Element {
    let services = use_services();
    let mut category = use_signal(String::new);

    let secure = services.secure.clone();
    let mut favorites = use_resource(move || {
        let secure = secure.clone();
        async move {
            secure
                .favorites()
                .await
                .inspect_err(|e| tracing::error!("Loading favorites failed: {e}"))
        }
    });

    rsx! {
        div {
            class: "p-6",
            h1 { class: "text-2xl font-semibold mb-6", "My Favorites" }

            match &*favorites.read_unchecked() {
                None => rsx! { Spinner { label: "Loading favorites..." } },
                Some(Err(e)) => rsx! {
                    p { class: "text-sm text-red-600", "Could not load favorites: {e}" }
                },
                Some(Ok(list)) if list.is_empty() => rsx! {
                    div {
                        class: "panel text-center",
                        p { class: "text-sm text-gray-600 mb-3", "You have not saved any lessons yet." }
                        Link { class: "btn btn-primary", to: Route::PublicLessons {}, "Browse lessons" }
                    }
                },
                Some(Ok(list)) => {
                    let selected = category();
                    let shown: Vec<Favorite> = list
                        .iter()
                        .filter(|f| {
                            selected.is_empty()
                                || f.lesson.as_ref().and_then(|l| l.category.as_deref()) == Some(selected.as_str())
                        })
                        .cloned()
                        .collect();
                    rsx! {
                        select {
                            class: "input max-w-xs mb-4",
                            value: selected.clone(),
                            onchange: move |evt: FormEvent| category.set(evt.value()),
                            option { value: "", "All Categories" }
                            for c in categories(list) {
                                option { key: "{c}", value: "{c}", "{c}" }
                            }
                        }
                        table {
                            class: "data-table",
                            thead {
                                tr {
                                    th { "Lesson" }
                                    th { "Category" }
                                    th { "Tone" }
                                    th { "Created" }
                                    th { "" }
                                }
                            }
                            tbody {
                                for favorite in shown {
                                    FavoriteRow {
                                        key: "{favorite.id}",
                                        favorite,
                                        on_removed: move |_| favorites.restart(),
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn FavoriteRow(favorite: Favorite, on_removed: EventHandler<()>) -> Element {
    let services = use_services();
    let mut toasts = use_toasts();
    let mut busy = use_signal(|| false);

    let lesson = favorite.lesson.clone().unwrap_or_default();
    let lesson_id = favorite.lesson_id().to_string();
    let title = if lesson.title.is_empty() {
        "Untitled lesson".to_string()
    } else {
        lesson.title.clone()
    };
    let category = lesson.category.clone().unwrap_or_default();
    let tone = lesson.emotional_tone.clone().unwrap_or_default();
    let created = display_date(lesson.created_at.as_deref());

    let handle_remove = move |_| {
        let secure = services.secure.clone();
        let favorite_id = favorite.id.clone();
        spawn(async move {
            busy.set(true);
            match secure.remove_favorite(&favorite_id).await {
                Ok(()) => {
                    notify(&mut toasts, ToastLevel::Success, "Removed from favorites");
                    on_removed.call(());
                }
                Err(e) => notify(&mut toasts, ToastLevel::Error, &e.to_string()),
            }
            busy.set(false);
        });
    };

    rsx! {
        tr {
            td {
                Link { class: "font-medium", to: Route::LessonDetails { id: lesson_id }, "{title}" }
            }
            td { "{category}" }
            td { "{tone}" }
            td { class: "text-xs text-gray-500", "{created}" }
            td {
                button {
                    class: "btn btn-danger btn-sm",
                    disabled: busy(),
                    onclick: handle_remove,
                    Icon { icon: FaTrashCan, width: 12, height: 12 }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::Lesson;

    fn saved(id: &str, category: Option<&str>) -> Favorite {
        Favorite {
            id: format!("f-{id}"),
            lesson_id: id.into(),
            lesson: Some(Lesson {
                id: id.into(),
                category: category.map(str::to_string),
                ..Lesson::default()
            }),
        }
    }

    #[test]
    fn test_categories_are_sorted_and_unique() {
        let list = vec![
            saved("1", Some("Career")),
            saved("2", Some("Career")),
            saved("3", None),
            saved("4", Some("Calm")),
        ];
        assert_eq!(categories(&list), vec!["Calm", "Career"]);
    }
}
