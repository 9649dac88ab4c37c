//! Landing page.

use api::{Contributor, Highlight, LessonQuery};
use dioxus::prelude::*;
use ui::{use_account, use_services, LessonCard, Spinner};

use crate::Route;

const FEATURED_COUNT: u32 = 6;

const SLIDES: &[(&str, &str)] = &[
    (
        "Learn Life's Most Valuable Lessons",
        "Discover wisdom from real experiences shared by people around the world",
    ),
    (
        "Share Your Story, Inspire Others",
        "Your life experiences can guide someone through their journey",
    ),
    (
        "Build Better Habits, Transform Your Life",
        "Access practical lessons that make a real difference in daily living",
    ),
];

const BENEFITS: &[(&str, &str)] = &[
    ("Save time and pain", "Learn from others' mistakes so you don't have to repeat them in your own life."),
    ("Context, not theory", "Stories give you real situations, emotions and decisions, not just abstract tips."),
    ("Remember better", "We remember stories far longer than checklists, so lessons stay with you when you need them."),
    ("Grow your perspective", "See how different people handled career, money and relationships and expand your own options."),
];

#[component]
pub fn Home() -> Element {
    rsx! {
        div {
            class: "bg-white",
            HeroSlider {}
            FeaturedLessons {}
            WhyLearningMatters {}
            TopContributors {}
            MostSaved {}
        }
    }
}

#[component]
fn HeroSlider() -> Element {
    let mut current = use_signal(|| 0usize);
    let (title, subtitle) = SLIDES[current() % SLIDES.len()];

    rsx! {
        section {
            class: "hero",
            div {
                class: "max-w-4xl mx-auto px-4 py-24 text-center",
                h1 { class: "text-5xl font-bold mb-6", "{title}" }
                p { class: "text-xl mb-8", "{subtitle}" }
                div {
                    class: "flex justify-center gap-3",
                    Link { class: "btn btn-primary", to: Route::PublicLessons {}, "Explore Lessons" }
                    Link { class: "btn btn-outline", to: Route::AddLesson {}, "Share a Lesson" }
                }
                div {
                    class: "flex justify-center gap-2 mt-8",
                    for i in 0..SLIDES.len() {
                        button {
                            key: "{i}",
                            class: if i == current() { "slide-dot active" } else { "slide-dot" },
                            onclick: move |_| current.set(i),
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn FeaturedLessons() -> Element {
    let services = use_services();

    let featured = use_resource(move || {
        let public = services.public.clone();
        async move {
            public.featured_lessons().await.unwrap_or_else(|e| {
                tracing::warn!("Featured lessons unavailable: {e}");
                Vec::new()
            })
        }
    });

    rsx! {
        section {
            class: "py-10 max-w-6xl mx-auto px-4",
            div {
                class: "flex justify-between items-center mb-6",
                h2 { class: "text-2xl font-semibold text-gray-900", "Featured Life Lessons" }
                p { class: "text-sm text-gray-500", "Curated by our team from the most impactful stories" }
            }
            match &*featured.read_unchecked() {
                None => rsx! { Spinner {} },
                Some(items) if items.is_empty() => rsx! {
                    p { class: "text-sm text-gray-500", "No featured lessons yet. Admin can feature lessons from the dashboard." }
                },
                Some(items) => rsx! {
                    div {
                        class: "grid gap-5 md:grid-cols-3",
                        for (i, item) in items.iter().cloned().enumerate() {
                            HighlightCard { key: "{i}-{item.id}", item }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn HighlightCard(item: Highlight) -> Element {
    rsx! {
        div {
            class: "highlight-card",
            p { class: "text-xs uppercase tracking-wide text-orange-500 font-semibold mb-1", "{item.category_label()}" }
            h3 { class: "text-base font-semibold text-gray-900 mb-2 line-clamp-2", "{item.title}" }
            p { class: "text-xs text-gray-600 line-clamp-3 mb-3", "{item.summary}" }
            div {
                class: "flex justify-between items-center text-xs text-gray-500",
                span { "By {item.contributor_label()}" }
                span { "{item.saves_count} saves" }
            }
        }
    }
}

#[component]
fn TopContributors() -> Element {
    let services = use_services();

    let contributors = use_resource(move || {
        let public = services.public.clone();
        async move {
            public.top_contributors().await.unwrap_or_else(|e| {
                tracing::warn!("Top contributors unavailable: {e}");
                Vec::new()
            })
        }
    });

    rsx! {
        section {
            class: "py-10 max-w-6xl mx-auto px-4",
            div {
                class: "flex justify-between items-center mb-6",
                h2 { class: "text-2xl font-semibold text-gray-900", "Top Contributors of the Week" }
                p { class: "text-sm text-gray-500", "Most active members sharing real stories" }
            }
            match &*contributors.read_unchecked() {
                None => rsx! { Spinner {} },
                Some(people) if people.is_empty() => rsx! {
                    p { class: "text-sm text-gray-500", "No contributors yet for this week." }
                },
                Some(people) => rsx! {
                    div {
                        class: "grid gap-5 md:grid-cols-3",
                        for (i, person) in people.iter().cloned().enumerate() {
                            ContributorCard { key: "{i}-{person.id}", person }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn ContributorCard(person: Contributor) -> Element {
    rsx! {
        div {
            class: "highlight-card flex items-center gap-3",
            match person.photo_url.as_deref().filter(|p| !p.is_empty()) {
                Some(src) => rsx! {
                    img { class: "h-10 w-10 rounded-full object-cover", src: "{src}", alt: "{person.name}" }
                },
                None => rsx! {
                    div { class: "avatar-initial", "{person.initial()}" }
                },
            }
            div {
                p { class: "text-sm font-semibold text-gray-900", "{person.name}" }
                p { class: "text-xs text-gray-500", "{person.total_lessons} lessons · {person.total_saves} saves" }
            }
        }
    }
}

#[component]
fn MostSaved() -> Element {
    let services = use_services();
    let account = use_account();
    let viewer_is_premium = account().flatten().is_some_and(|u| u.is_premium);

    let lessons = use_resource(move || {
        let public = services.public.clone();
        async move { public.public_lessons(&LessonQuery::most_saved(FEATURED_COUNT)).await }
    });

    rsx! {
        section {
            class: "py-10 max-w-6xl mx-auto px-4",
            div {
                class: "flex justify-between items-center mb-6",
                h2 { class: "text-2xl font-semibold text-gray-900", "Most Saved Lessons" }
                p { class: "text-sm text-gray-500", "Lessons the community keeps coming back to" }
            }
            match &*lessons.read_unchecked() {
                None => rsx! { Spinner {} },
                Some(Err(e)) => rsx! { p { class: "text-sm text-red-600", "Could not load lessons: {e}" } },
                Some(Ok(page)) if page.lessons.is_empty() => rsx! {
                    p { class: "text-sm text-gray-500", "No lessons have been shared yet." }
                },
                Some(Ok(page)) => rsx! {
                    div {
                        class: "grid gap-5 md:grid-cols-3",
                        for lesson in page.lessons.iter().cloned() {
                            LessonCard { key: "{lesson.id}", lesson, viewer_is_premium }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn WhyLearningMatters() -> Element {
    rsx! {
        section {
            class: "py-12 bg-cream",
            div {
                class: "max-w-6xl mx-auto px-4",
                div {
                    class: "text-center mb-8",
                    h2 { class: "text-2xl font-semibold text-gray-900", "Why Learning From Life Matters" }
                    p {
                        class: "mt-2 text-sm text-gray-600 max-w-xl mx-auto",
                        "Life does not come with a handbook, but people's stories are the closest thing to it. When you collect lessons, you collect shortcuts."
                    }
                }
                div {
                    class: "grid gap-5 md:grid-cols-4",
                    for (title, text) in BENEFITS.iter() {
                        div {
                            key: "{title}",
                            class: "benefit-card",
                            h3 { class: "text-sm font-semibold text-gray-900 mb-2", "{title}" }
                            p { class: "text-xs text-gray-600", "{text}" }
                        }
                    }
                }
            }
        }
    }
}
