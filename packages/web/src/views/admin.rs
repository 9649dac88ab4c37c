//! Moderation views: platform totals, users, lessons and reports.

use api::{display_date, AdminStats, AppUser, Lesson, Report, Visibility};
use dioxus::prelude::*;
use ui::icons::{FaCrown, FaTrashCan};
use ui::{notify, use_auth, use_services, use_toasts, Icon, Spinner, StatCard, ToastLevel};

use crate::Route;

/// Lesson ids with the number of reports filed against each, most reported first.
fn report_counts(reports: &[Report]) -> Vec<(String, String, usize)> {
    let mut counts: Vec<(String, String, usize)> = Vec::new();
    for report in reports {
        match counts.iter_mut().find(|(id, _, _)| *id == report.lesson_id) {
            Some(entry) => entry.2 += 1,
            None => counts.push((report.lesson_id.clone(), report.lesson_title.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.2.cmp(&a.2));
    counts
}

#[component]
pub fn AdminHome() -> Element {
    let services = use_services();
    let stats = use_resource(move || {
        let secure = services.secure.clone();
        async move {
            secure
                .admin_stats()
                .await
                .inspect_err(|e| tracing::error!("Loading admin stats failed: {e}"))
        }
    });

    rsx! {
        div {
            class: "p-6",
            h1 { class: "text-2xl font-semibold mb-6", "Admin Dashboard" }
            match stats() {
                None => rsx! { Spinner { label: "Loading platform stats..." } },
                Some(Err(e)) => rsx! {
                    p { class: "text-sm text-red-600", "Could not load stats: {e}" }
                },
                Some(Ok(AdminStats { total_users, total_lessons, public_lessons, total_reports })) => rsx! {
                    div {
                        class: "grid gap-4 md:grid-cols-4",
                        StatCard { label: "Users", value: total_users.to_string() }
                        StatCard { label: "Lessons", value: total_lessons.to_string() }
                        StatCard {
                            label: "Public lessons",
                            value: public_lessons.to_string(),
                            hint: format!("{} private", total_lessons.saturating_sub(public_lessons)),
                        }
                        StatCard { label: "Reports", value: total_reports.to_string() }
                    }
                    div {
                        class: "flex gap-3 mt-6",
                        Link { class: "btn btn-outline", to: Route::ManageUsers {}, "Manage users" }
                        Link { class: "btn btn-outline", to: Route::ManageLessons {}, "Manage lessons" }
                        Link { class: "btn btn-outline", to: Route::ReportedLessons {}, "Reported lessons" }
                    }
                },
            }
        }
    }
}

#[component]
pub fn ManageUsers() -> Element {
    let services = use_services();
    let auth = use_auth();
    let mut toasts = use_toasts();

    let secure = services.secure.clone();
    let mut users = use_resource(move || {
        let secure = secure.clone();
        async move { secure.users().await.inspect_err(|e| tracing::error!("Loading users failed: {e}")) }
    });

    let promote_services = services.clone();
    let promote = move |user: AppUser| {
        let secure = promote_services.secure.clone();
        let accounts = promote_services.accounts.clone();
        spawn(async move {
            match secure.make_admin(&user.id).await {
                Ok(()) => {
                    accounts.invalidate(&user.email);
                    notify(&mut toasts, ToastLevel::Success, &format!("{} is now an admin", user.display_name()));
                    users.restart();
                }
                Err(e) => notify(&mut toasts, ToastLevel::Error, &e.to_string()),
            }
        });
    };

    let remove = move |user: AppUser| {
        let secure = services.secure.clone();
        let accounts = services.accounts.clone();
        spawn(async move {
            match secure.delete_user(&user.id).await {
                Ok(()) => {
                    accounts.invalidate(&user.email);
                    notify(&mut toasts, ToastLevel::Success, "User deleted");
                    users.restart();
                }
                Err(e) => notify(&mut toasts, ToastLevel::Error, &e.to_string()),
            }
        });
    };

    let me = auth().email().unwrap_or_default();

    rsx! {
        div {
            class: "p-6",
            h1 { class: "text-2xl font-semibold mb-6", "Manage Users" }
            match &*users.read_unchecked() {
                None => rsx! { Spinner { label: "Loading users..." } },
                Some(Err(e)) => rsx! {
                    p { class: "text-sm text-red-600", "Could not load users: {e}" }
                },
                Some(Ok(list)) => rsx! {
                    table {
                        class: "data-table",
                        thead {
                            tr {
                                th { "Name" }
                                th { "Email" }
                                th { "Role" }
                                th { "Plan" }
                                th { "" }
                            }
                        }
                        tbody {
                            for user in list.iter().cloned() {
                                {
                                    let is_self = user.email == me;
                                    let promote_user = user.clone();
                                    let remove_user = user.clone();
                                    let promote = promote.clone();
                                    let remove = remove.clone();
                                    rsx! {
                                        tr {
                                            key: "{user.id}",
                                            td { "{user.display_name()}" }
                                            td { class: "text-xs", "{user.email}" }
                                            td {
                                                if user.is_admin() {
                                                    span { class: "chip chip-amber", "admin" }
                                                } else {
                                                    span { class: "chip", "user" }
                                                }
                                            }
                                            td {
                                                if user.is_premium {
                                                    span {
                                                        class: "badge badge-premium",
                                                        Icon { icon: FaCrown, width: 10, height: 10 }
                                                        " Premium"
                                                    }
                                                } else {
                                                    span { class: "badge badge-free", "Free" }
                                                }
                                            }
                                            td {
                                                class: "flex gap-2 justify-end",
                                                if !user.is_admin() {
                                                    button {
                                                        class: "btn btn-outline btn-sm",
                                                        onclick: move |_| promote(promote_user.clone()),
                                                        "Make admin"
                                                    }
                                                }
                                                button {
                                                    class: "btn btn-danger btn-sm",
                                                    disabled: is_self,
                                                    title: if is_self { "You cannot delete your own account" } else { "" },
                                                    onclick: move |_| remove(remove_user.clone()),
                                                    Icon { icon: FaTrashCan, width: 12, height: 12 }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
pub fn ManageLessons() -> Element {
    let services = use_services();
    let mut toasts = use_toasts();
    let mut filter = use_signal(String::new);

    let secure = services.secure.clone();
    let mut lessons = use_resource(move || {
        let secure = secure.clone();
        async move {
            secure
                .all_lessons()
                .await
                .inspect_err(|e| tracing::error!("Loading lessons failed: {e}"))
        }
    });

    let toggle_services = services.clone();
    let toggle = move |lesson: Lesson| {
        let secure = toggle_services.secure.clone();
        spawn(async move {
            match secure.toggle_lesson_visibility(&lesson.id).await {
                Ok(now) => {
                    let now = now.unwrap_or(lesson.visibility.toggled());
                    notify(&mut toasts, ToastLevel::Success, &format!("\"{}\" is now {}", lesson.title, now.as_str()));
                    lessons.restart();
                }
                Err(e) => notify(&mut toasts, ToastLevel::Error, &e.to_string()),
            }
        });
    };

    let remove = move |lesson: Lesson| {
        let secure = services.secure.clone();
        spawn(async move {
            match secure.delete_lesson(&lesson.id).await {
                Ok(()) => {
                    notify(&mut toasts, ToastLevel::Success, "Lesson deleted");
                    lessons.restart();
                }
                Err(e) => notify(&mut toasts, ToastLevel::Error, &e.to_string()),
            }
        });
    };

    rsx! {
        div {
            class: "p-6",
            div {
                class: "flex items-center justify-between mb-6",
                h1 { class: "text-2xl font-semibold", "Manage Lessons" }
                select {
                    class: "input max-w-xs",
                    value: filter(),
                    onchange: move |evt: FormEvent| filter.set(evt.value()),
                    option { value: "", "All lessons" }
                    option { value: "public", "Public only" }
                    option { value: "private", "Private only" }
                }
            }
            match &*lessons.read_unchecked() {
                None => rsx! { Spinner { label: "Loading lessons..." } },
                Some(Err(e)) => rsx! {
                    p { class: "text-sm text-red-600", "Could not load lessons: {e}" }
                },
                Some(Ok(list)) => {
                    let wanted = filter();
                    let shown: Vec<Lesson> = list
                        .iter()
                        .filter(|l| wanted.is_empty() || l.visibility == Visibility::parse(&wanted))
                        .cloned()
                        .collect();
                    rsx! {
                        table {
                            class: "data-table",
                            thead {
                                tr {
                                    th { "Title" }
                                    th { "Author" }
                                    th { "Created" }
                                    th { "Visibility" }
                                    th { "" }
                                }
                            }
                            tbody {
                                for lesson in shown {
                                    {
                                        let toggle_lesson = lesson.clone();
                                        let remove_lesson = lesson.clone();
                                        let toggle = toggle.clone();
                                        let remove = remove.clone();
                                        rsx! {
                                            tr {
                                                key: "{lesson.id}",
                                                td {
                                                    Link { class: "font-medium", to: Route::LessonDetails { id: lesson.id.clone() }, "{lesson.title}" }
                                                }
                                                td { class: "text-xs", "{lesson.creator_display_name()}" }
                                                td { class: "text-xs text-gray-500", "{display_date(lesson.created_at.as_deref())}" }
                                                td {
                                                    button {
                                                        class: "chip",
                                                        onclick: move |_| toggle(toggle_lesson.clone()),
                                                        "{lesson.visibility.as_str()}"
                                                    }
                                                }
                                                td {
                                                    button {
                                                        class: "btn btn-danger btn-sm",
                                                        onclick: move |_| remove(remove_lesson.clone()),
                                                        Icon { icon: FaTrashCan, width: 12, height: 12 }
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
            }
        }
    }
}

#[component]
pub fn ReportedLessons() -> Element {
    let services = use_services();
    let reports = use_resource(move || {
        let secure = services.secure.clone();
        async move { secure.reports().await.inspect_err(|e| tracing::error!("Loading reports failed: {e}")) }
    });

    rsx! {
        div {
            class: "p-6",
            h1 { class: "text-2xl font-semibold mb-6", "Reported Lessons" }
            match &*reports.read_unchecked() {
                None => rsx! { Spinner { label: "Loading reports..." } },
                Some(Err(e)) => rsx! {
                    p { class: "text-sm text-red-600", "Could not load reports: {e}" }
                },
                Some(Ok(list)) if list.is_empty() => rsx! {
                    p { class: "text-sm text-gray-500", "No reports. Everything looks fine." }
                },
                Some(Ok(list)) => rsx! {
                    div {
                        class: "grid gap-4 md:grid-cols-3 mb-8",
                        for (lesson_id, title, count) in report_counts(list).into_iter().take(3) {
                            Link {
                                key: "{lesson_id}",
                                class: "stat-card",
                                to: Route::LessonDetails { id: lesson_id.clone() },
                                p { class: "text-xs uppercase tracking-wide text-gray-500", "{title}" }
                                p { class: "text-3xl font-bold text-gray-900 mt-1", "{count}" }
                            }
                        }
                    }
                    table {
                        class: "data-table",
                        thead {
                            tr {
                                th { "Lesson" }
                                th { "Reason" }
                                th { "Reporter" }
                                th { "Date" }
                            }
                        }
                        tbody {
                            for report in list.iter() {
                                tr {
                                    key: "{report.id}",
                                    td {
                                        Link { to: Route::LessonDetails { id: report.lesson_id.clone() }, "{report.lesson_title}" }
                                    }
                                    td { "{report.reason}" }
                                    td { class: "text-xs", "{report.reporter_email.clone().unwrap_or_default()}" }
                                    td { class: "text-xs text-gray-500", "{display_date(report.created_at.as_deref())}" }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(lesson_id: &str, title: &str) -> Report {
        Report {
            id: format!("r-{lesson_id}"),
            lesson_id: lesson_id.into(),
            lesson_title: title.into(),
            reason: "Spam or promotional content".into(),
            reporter_email: None,
            created_at: None,
        }
    }

    #[test]
    fn test_report_counts_group_by_lesson() {
        let reports = vec![report("a", "A"), report("b", "B"), report("b", "B"), report("c", "C")];
        let counts = report_counts(&reports);

        assert_eq!(counts[0], ("b".to_string(), "B".to_string(), 2));
        assert_eq!(counts.len(), 3);
        assert!(report_counts(&[]).is_empty());
    }
}
