//! Lesson page: body (or premium lock), likes, favorite, comments and report.

use api::access::{lesson_access, LessonAccess};
use api::{display_date, Comment, FavoriteToggle, Lesson, NewComment, NewReport};
use dioxus::prelude::*;
use ui::icons::{FaBookmark, FaFlag, FaHeart, FaLock};
use ui::{notify, use_account, use_auth, use_services, use_toasts, Icon, Spinner, ToastLevel};

use crate::Route;

const REPORT_REASONS: &[&str] = &[
    "Inappropriate content",
    "Hate speech or harassment",
    "Misleading or false information",
    "Spam or promotional content",
    "Other",
];

#[component]
pub fn LessonDetails(id: String) -> Element {
    // Track the id in a signal so resources re-run on route param change
    let mut lesson_id = use_signal(|| id.clone());
    if *lesson_id.peek() != id {
        lesson_id.set(id.clone());
    }

    let services = use_services();
    let account = use_account();

    let lesson = use_resource(move || {
        let id = lesson_id();
        let secure = services.secure.clone();
        async move {
            secure
                .lesson(&id)
                .await
                .inspect_err(|e| tracing::error!("Loading lesson {id} failed: {e}"))
        }
    });

    let viewer_is_premium = account().flatten().is_some_and(|u| u.is_premium);

    rsx! {
        div {
            class: "max-w-3xl mx-auto px-4 py-16",
            Link { class: "text-xs text-primary", to: Route::PublicLessons {}, "← Back to lessons" }

            match &*lesson.read_unchecked() {
                None => rsx! { Spinner { label: "Loading lesson..." } },
                Some(Err(e)) => rsx! {
                    p { class: "text-sm text-red-600 mt-3", "Unable to load this lesson: {e}" }
                },
                Some(Ok(lesson)) => rsx! {
                    LessonBody { lesson: lesson.clone(), viewer_is_premium }
                    if lesson_access(lesson, viewer_is_premium) == LessonAccess::Full {
                        LessonActions { lesson: lesson.clone() }
                        Comments { lesson_id: lesson.id.clone() }
                    }
                },
            }
        }
    }
}

#[component]
fn LessonBody(lesson: Lesson, viewer_is_premium: bool) -> Element {
    let locked = lesson_access(&lesson, viewer_is_premium) == LessonAccess::Locked;
    let category = lesson.category.clone().unwrap_or_else(|| "Self-Growth".to_string());
    let tone = lesson.emotional_tone.clone().unwrap_or_else(|| "Reflective".to_string());
    let created = lesson
        .created_at
        .as_deref()
        .map(|d| display_date(Some(d)))
        .unwrap_or_else(|| "N/A".to_string());
    let creator = lesson.creator_display_name().to_string();
    let initial = lesson.creator_initial();
    let photo = lesson.creator_photo_url.clone().filter(|p| !p.is_empty());

    rsx! {
        div {
            class: "mt-3 mb-2 flex items-center gap-2",
            span { class: "chip chip-orange", "{category}" }
            span { class: "chip chip-amber", "{tone}" }
            span { class: "chip", "{lesson.access_level.as_str()}" }
        }

        h1 { class: "text-3xl font-bold text-gray-900 mb-2", "{lesson.title}" }

        div {
            class: "flex items-center justify-between text-xs text-gray-500 mb-6",
            div {
                class: "flex items-center gap-2",
                if let Some(photo) = photo {
                    img { class: "avatar", src: "{photo}", alt: "{creator}" }
                } else {
                    span { class: "avatar avatar-initial", "{initial}" }
                }
                span { "{creator}" }
            }
            span { "{created}" }
        }

        if locked {
            div {
                class: "premium-lock",
                div { class: "text-3xl mb-2", Icon { icon: FaLock, width: 28, height: 28 } }
                h2 { class: "font-semibold text-gray-900 mb-1", "This is a Premium Lesson" }
                p { class: "text-sm text-gray-700 mb-3", "{lesson.short_description}" }
                p {
                    class: "text-sm text-gray-700 mb-3",
                    "Upgrade to Premium to unlock the full story and details of this lesson."
                }
                Link { class: "btn btn-primary", to: Route::Pricing {}, "Go to Pricing" }
            }
        } else {
            div { class: "prose text-gray-800 text-sm leading-relaxed", "{lesson.body()}" }
        }
    }
}

/// Like, favorite and report controls.
#[component]
fn LessonActions(lesson: Lesson) -> Element {
    let services = use_services();
    let auth = use_auth();
    let mut toasts = use_toasts();

    let email = auth().email().unwrap_or_default();
    let mut liked = use_signal(|| lesson.is_liked_by(&email));
    let mut likes_count = use_signal(|| lesson.likes_count);
    let mut favorite = use_signal(|| Option::<FavoriteToggle>::None);
    let mut busy = use_signal(|| false);
    let mut report_reason = use_signal(|| REPORT_REASONS[0].to_string());
    let mut reporting = use_signal(|| false);

    let lesson_id = lesson.id.clone();
    let lesson_title = lesson.title.clone();

    // Favorite state comes from the user's favorites list
    let secure = services.secure.clone();
    let favorites_for = lesson_id.clone();
    let _favorites = use_resource(move || {
        let secure = secure.clone();
        let lesson_id = favorites_for.clone();
        async move {
            match secure.favorites().await {
                Ok(list) => favorite.set(Some(FavoriteToggle::from_favorites(&lesson_id, &list))),
                Err(e) => tracing::error!("Loading favorites failed: {e}"),
            }
        }
    });

    let secure = services.secure.clone();
    let like_id = lesson_id.clone();
    let like_email = email.clone();
    let handle_like = move |_| {
        let secure = secure.clone();
        let id = like_id.clone();
        let email = like_email.clone();
        spawn(async move {
            match secure.toggle_like(&id, &email).await {
                Ok(status) => {
                    liked.set(status.liked);
                    likes_count.set(status.likes_count);
                }
                Err(e) => notify(&mut toasts, ToastLevel::Error, &e.to_string()),
            }
        });
    };

    let secure = services.secure.clone();
    let handle_favorite = move |_| {
        let Some(toggle) = favorite() else {
            return;
        };
        let secure = secure.clone();
        spawn(async move {
            busy.set(true);
            match secure.perform_favorite(&toggle.next_action()).await {
                Ok(settled) => {
                    let mut next = toggle.clone();
                    next.settle(settled);
                    let message = if next.is_favorited() {
                        "Saved to favorites"
                    } else {
                        "Removed from favorites"
                    };
                    favorite.set(Some(next));
                    notify(&mut toasts, ToastLevel::Success, message);
                }
                Err(e) => notify(&mut toasts, ToastLevel::Error, &e.to_string()),
            }
            busy.set(false);
        });
    };

    let secure = services.secure.clone();
    let report_email = email.clone();
    let handle_report = move |evt: FormEvent| {
        evt.prevent_default();
        let report = NewReport {
            lesson_id: lesson_id.clone(),
            lesson_title: lesson_title.clone(),
            reason: report_reason(),
            reporter_email: report_email.clone(),
        };
        let secure = secure.clone();
        spawn(async move {
            match secure.submit_report(&report).await {
                Ok(()) => {
                    reporting.set(false);
                    notify(&mut toasts, ToastLevel::Success, "Thanks, the lesson was reported");
                }
                Err(e) => notify(&mut toasts, ToastLevel::Error, &e.to_string()),
            }
        });
    };

    let favorited = favorite().is_some_and(|f| f.is_favorited());

    rsx! {
        div {
            class: "flex items-center gap-3 mt-8 pt-4 border-t",
            button {
                class: if liked() { "btn btn-sm btn-liked" } else { "btn btn-sm btn-outline" },
                onclick: handle_like,
                Icon { icon: FaHeart, width: 12, height: 12 }
                " {likes_count}"
            }
            button {
                class: if favorited { "btn btn-sm btn-primary" } else { "btn btn-sm btn-outline" },
                disabled: busy() || favorite().is_none(),
                onclick: handle_favorite,
                Icon { icon: FaBookmark, width: 12, height: 12 }
                if favorited { " Saved" } else { " Save" }
            }
            span { class: "text-xs text-gray-500", "Saved {lesson.saved_count} times" }
            button {
                class: "btn btn-sm btn-ghost ml-auto",
                onclick: move |_| reporting.set(!reporting()),
                Icon { icon: FaFlag, width: 12, height: 12 }
                " Report"
            }
        }

        if reporting() {
            form {
                class: "panel mt-3 flex gap-2 items-center",
                onsubmit: handle_report,
                select {
                    class: "input flex-1",
                    value: report_reason(),
                    onchange: move |evt: FormEvent| report_reason.set(evt.value()),
                    for reason in REPORT_REASONS.iter() {
                        option { key: "{reason}", value: "{reason}", "{reason}" }
                    }
                }
                button { class: "btn btn-sm btn-primary", r#type: "submit", "Submit report" }
            }
        }
    }
}

#[component]
fn Comments(lesson_id: String) -> Element {
    let services = use_services();
    let auth = use_auth();
    let mut toasts = use_toasts();
    let mut text = use_signal(String::new);
    let mut posting = use_signal(|| false);

    let secure = services.secure.clone();
    let load_id = lesson_id.clone();
    let mut comments = use_resource(move || {
        let secure = secure.clone();
        let id = load_id.clone();
        async move { secure.comments(&id).await }
    });

    let secure = services.secure.clone();
    let handle_comment = move |evt: FormEvent| {
        evt.prevent_default();
        let body = text().trim().to_string();
        if body.is_empty() {
            return;
        }
        let state = auth();
        let Some(identity) = state.identity else {
            return;
        };
        let comment = NewComment {
            text: body,
            user_email: identity.email.clone(),
            user_name: identity.display_name().to_string(),
        };
        let secure = secure.clone();
        let id = lesson_id.clone();
        spawn(async move {
            posting.set(true);
            match secure.add_comment(&id, &comment).await {
                Ok(()) => {
                    text.set(String::new());
                    comments.restart();
                }
                Err(e) => notify(&mut toasts, ToastLevel::Error, &e.to_string()),
            }
            posting.set(false);
        });
    };

    rsx! {
        section {
            class: "mt-10",
            h2 { class: "text-lg font-semibold text-gray-900 mb-3", "Comments" }

            form {
                class: "flex gap-2 mb-4",
                onsubmit: handle_comment,
                input {
                    class: "input flex-1",
                    placeholder: "Share your thoughts...",
                    value: text(),
                    oninput: move |evt: FormEvent| text.set(evt.value()),
                }
                button {
                    class: "btn btn-primary btn-sm",
                    r#type: "submit",
                    disabled: posting(),
                    if posting() { "Posting..." } else { "Post" }
                }
            }

            match &*comments.read_unchecked() {
                None => rsx! { Spinner {} },
                Some(Err(e)) => rsx! { p { class: "text-sm text-red-600", "Could not load comments: {e}" } },
                Some(Ok(list)) if list.is_empty() => rsx! {
                    p { class: "text-sm text-gray-500", "No comments yet. Be the first!" }
                },
                Some(Ok(list)) => rsx! {
                    ul {
                        class: "space-y-3",
                        for comment in list.iter().cloned() {
                            CommentItem { key: "{comment.id}", comment }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn CommentItem(comment: Comment) -> Element {
    let when = display_date(comment.created_at.as_deref());
    rsx! {
        li {
            class: "comment",
            div {
                class: "flex justify-between text-xs text-gray-500 mb-1",
                span { class: "font-semibold text-gray-700", "{comment.author()}" }
                span { "{when}" }
            }
            p { class: "text-sm text-gray-800", "{comment.text}" }
        }
    }
}
