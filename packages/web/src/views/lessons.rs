//! Public lesson browser: search, filters, sort and pagination.

use api::{LessonQuery, LessonSort};
use dioxus::prelude::*;
use ui::{use_account, use_services, LessonCard, Spinner};

/// Filter options from the current page, keeping the active selection listed
/// even when the filtered page no longer contains other values.
fn options(mut found: Vec<String>, selected: &str) -> Vec<String> {
    if !selected.is_empty() && !found.iter().any(|f| f == selected) {
        found.insert(0, selected.to_string());
    }
    found
}

#[component]
pub fn PublicLessons() -> Element {
    let services = use_services();
    let account = use_account();
    let viewer_is_premium = account().flatten().is_some_and(|u| u.is_premium);

    let mut query = use_signal(LessonQuery::default);
    let mut search = use_signal(String::new);

    let page = use_resource(move || {
        let q = query();
        let public = services.public.clone();
        async move {
            public
                .public_lessons(&q)
                .await
                .inspect_err(|e| tracing::error!("Loading public lessons failed: {e}"))
        }
    });

    let handle_search = move |evt: FormEvent| {
        evt.prevent_default();
        let mut q = query.write();
        q.search = search();
        q.page = 1;
    };

    let handle_clear = move |_| {
        search.set(String::new());
        query.set(LessonQuery::default());
    };

    let current = query();

    rsx! {
        div {
            class: "bg-cream min-h-screen py-10 px-4",
            div {
                class: "max-w-6xl mx-auto",
                h1 { class: "text-3xl font-bold text-gray-900 mb-6", "Public Lessons" }

                div {
                    class: "panel mb-6",
                    form {
                        onsubmit: handle_search,
                        class: "grid grid-cols-1 md:grid-cols-4 gap-3",
                        input {
                            class: "input",
                            placeholder: "Search by title/keyword...",
                            value: search(),
                            oninput: move |evt: FormEvent| search.set(evt.value()),
                        }
                        select {
                            class: "input",
                            value: current.category.clone(),
                            onchange: move |evt: FormEvent| {
                                let mut q = query.write();
                                q.category = evt.value();
                                q.page = 1;
                            },
                            option { value: "", "All Categories" }
                            if let Some(Ok(p)) = &*page.read_unchecked() {
                                for c in options(p.categories(), &current.category) {
                                    option { key: "{c}", value: "{c}", "{c}" }
                                }
                            }
                        }
                        select {
                            class: "input",
                            value: current.tone.clone(),
                            onchange: move |evt: FormEvent| {
                                let mut q = query.write();
                                q.tone = evt.value();
                                q.page = 1;
                            },
                            option { value: "", "All Tones" }
                            if let Some(Ok(p)) = &*page.read_unchecked() {
                                for t in options(p.tones(), &current.tone) {
                                    option { key: "{t}", value: "{t}", "{t}" }
                                }
                            }
                        }
                        select {
                            class: "input",
                            value: current.sort.as_str(),
                            onchange: move |evt: FormEvent| {
                                let mut q = query.write();
                                q.sort = LessonSort::parse(&evt.value());
                                q.page = 1;
                            },
                            option { value: "newest", "Newest first" }
                            option { value: "mostSaved", "Most saved" }
                        }
                        div {
                            class: "flex gap-2 md:col-span-4",
                            button { class: "btn btn-primary", r#type: "submit", "Search" }
                            button { class: "btn btn-outline", r#type: "button", onclick: handle_clear, "Clear" }
                        }
                    }
                }

                match &*page.read_unchecked() {
                    None => rsx! { Spinner {} },
                    Some(Err(e)) => rsx! {
                        p { class: "text-sm text-red-600", "Could not load lessons: {e}" }
                    },
                    Some(Ok(p)) if p.lessons.is_empty() => rsx! {
                        p { class: "text-sm text-gray-500", "No lessons match your filters." }
                    },
                    Some(Ok(p)) => {
                        let pagination = p.pagination.clone();
                        rsx! {
                            p { class: "text-xs text-gray-500 mb-3", "{pagination.total} lessons" }
                            div {
                                class: "grid gap-5 md:grid-cols-3",
                                for lesson in p.lessons.iter().cloned() {
                                    LessonCard { key: "{lesson.id}", lesson, viewer_is_premium }
                                }
                            }
                            div {
                                class: "flex items-center justify-center gap-3 mt-8",
                                button {
                                    class: "btn btn-outline btn-sm",
                                    disabled: !pagination.has_prev(),
                                    onclick: move |_| {
                                        let mut q = query.write();
                                        q.page = q.page.saturating_sub(1).max(1);
                                    },
                                    "← Prev"
                                }
                                span { class: "text-sm text-gray-600", "Page {pagination.page} of {pagination.total_pages}" }
                                button {
                                    class: "btn btn-outline btn-sm",
                                    disabled: !pagination.has_next(),
                                    onclick: move |_| query.write().page += 1,
                                    "Next →"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
