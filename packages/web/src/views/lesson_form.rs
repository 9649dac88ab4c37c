//! Lesson authoring: create and update share one form.

use api::access::can_author;
use api::{AccessLevel, Lesson, LessonPatch, NewLesson, Visibility, CATEGORIES, TONES};
use dioxus::prelude::*;
use ui::{notify, use_account, use_auth, use_services, use_toasts, Spinner, ToastLevel};

use crate::Route;

/// Editable fields of a lesson.
#[derive(Debug, Clone, PartialEq)]
struct LessonDraft {
    title: String,
    short_description: String,
    description: String,
    category: String,
    emotional_tone: String,
    access_level: AccessLevel,
    visibility: Visibility,
}

impl Default for LessonDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            short_description: String::new(),
            description: String::new(),
            category: CATEGORIES[0].to_string(),
            emotional_tone: TONES[0].to_string(),
            access_level: AccessLevel::Free,
            visibility: Visibility::Public,
        }
    }
}

impl LessonDraft {
    fn from_lesson(lesson: &Lesson) -> Self {
        let defaults = Self::default();
        Self {
            title: lesson.title.clone(),
            short_description: lesson.short_description.clone(),
            description: lesson.body().to_string(),
            category: lesson.category.clone().unwrap_or(defaults.category),
            emotional_tone: lesson.emotional_tone.clone().unwrap_or(defaults.emotional_tone),
            access_level: lesson.access_level,
            visibility: lesson.visibility,
        }
    }

    /// First problem with the draft, if any.
    fn validate(&self, author_is_premium: bool) -> Option<&'static str> {
        if self.title.trim().is_empty() {
            return Some("Title is required");
        }
        if self.short_description.trim().is_empty() {
            return Some("Short description is required");
        }
        if self.description.trim().is_empty() {
            return Some("Please write the full lesson");
        }
        if !can_author(self.access_level, author_is_premium) {
            return Some("Only Premium members can create premium lessons");
        }
        None
    }

    fn to_new(&self, email: &str, name: &str, photo: &str) -> NewLesson {
        NewLesson {
            title: self.title.trim().to_string(),
            short_description: self.short_description.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category.clone(),
            emotional_tone: self.emotional_tone.clone(),
            access_level: self.access_level,
            visibility: self.visibility,
            creator_email: email.to_string(),
            creator_name: name.to_string(),
            creator_photo_url: photo.to_string(),
        }
    }

    fn to_patch(&self) -> LessonPatch {
        LessonPatch {
            title: Some(self.title.trim().to_string()),
            short_description: Some(self.short_description.trim().to_string()),
            description: Some(self.description.trim().to_string()),
            category: Some(self.category.clone()),
            emotional_tone: Some(self.emotional_tone.clone()),
            access_level: Some(self.access_level),
            visibility: Some(self.visibility),
        }
    }
}

#[component]
fn LessonFields(
    draft: Signal<LessonDraft>,
    author_is_premium: bool,
    busy: bool,
    submit_label: String,
) -> Element {
    let current = draft();

    rsx! {
        div {
            class: "grid gap-4",
            label {
                class: "flex flex-col gap-1 text-sm",
                "Title"
                input {
                    class: "input",
                    value: current.title.clone(),
                    oninput: move |evt: FormEvent| draft.write().title = evt.value(),
                }
            }
            label {
                class: "flex flex-col gap-1 text-sm",
                "Short description"
                input {
                    class: "input",
                    value: current.short_description.clone(),
                    oninput: move |evt: FormEvent| draft.write().short_description = evt.value(),
                }
            }
            label {
                class: "flex flex-col gap-1 text-sm",
                "Full lesson"
                textarea {
                    class: "input min-h-[180px]",
                    value: current.description.clone(),
                    oninput: move |evt: FormEvent| draft.write().description = evt.value(),
                }
            }
            div {
                class: "grid gap-4 md:grid-cols-2",
                label {
                    class: "flex flex-col gap-1 text-sm",
                    "Category"
                    select {
                        class: "input",
                        value: current.category.clone(),
                        onchange: move |evt: FormEvent| draft.write().category = evt.value(),
                        for c in CATEGORIES {
                            option { key: "{c}", value: "{c}", "{c}" }
                        }
                    }
                }
                label {
                    class: "flex flex-col gap-1 text-sm",
                    "Emotional tone"
                    select {
                        class: "input",
                        value: current.emotional_tone.clone(),
                        onchange: move |evt: FormEvent| draft.write().emotional_tone = evt.value(),
                        for t in TONES {
                            option { key: "{t}", value: "{t}", "{t}" }
                        }
                    }
                }
                label {
                    class: "flex flex-col gap-1 text-sm",
                    "Visibility"
                    select {
                        class: "input",
                        value: current.visibility.as_str(),
                        onchange: move |evt: FormEvent| draft.write().visibility = Visibility::parse(&evt.value()),
                        option { value: "public", "Public" }
                        option { value: "private", "Private" }
                    }
                }
                label {
                    class: "flex flex-col gap-1 text-sm",
                    "Access level"
                    select {
                        class: "input",
                        value: current.access_level.as_str(),
                        disabled: !author_is_premium,
                        title: if author_is_premium { "" } else { "Upgrade to Premium to create paid lessons" },
                        onchange: move |evt: FormEvent| draft.write().access_level = AccessLevel::parse(&evt.value()),
                        option { value: "free", "Free" }
                        option { value: "premium", "Premium" }
                    }
                }
            }
            if !author_is_premium {
                p {
                    class: "text-xs text-gray-500",
                    "Premium lessons are available to Premium members. "
                    Link { class: "underline", to: Route::Pricing {}, "Upgrade" }
                }
            }
            button {
                class: "btn btn-primary",
                r#type: "submit",
                disabled: busy,
                if busy { "Saving..." } else { "{submit_label}" }
            }
        }
    }
}

#[component]
pub fn AddLesson() -> Element {
    let services = use_services();
    let auth = use_auth();
    let account = use_account();
    let nav = use_navigator();
    let mut toasts = use_toasts();

    let draft = use_signal(LessonDraft::default);
    let mut busy = use_signal(|| false);
    let is_premium = account().flatten().is_some_and(|u| u.is_premium);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let secure = services.secure.clone();
        spawn(async move {
            let current = draft();
            if let Some(problem) = current.validate(is_premium) {
                notify(&mut toasts, ToastLevel::Error, problem);
                return;
            }
            let Some(identity) = auth().identity else {
                notify(&mut toasts, ToastLevel::Error, "Please sign in again");
                return;
            };
            let lesson = current.to_new(
                &identity.email,
                identity.display_name(),
                identity.photo_url.as_deref().unwrap_or_default(),
            );

            busy.set(true);
            match secure.create_lesson(&lesson).await {
                Ok(id) => {
                    tracing::info!("Created lesson {id}");
                    notify(&mut toasts, ToastLevel::Success, "Lesson created");
                    nav.push(Route::MyLessons {});
                }
                Err(e) => notify(&mut toasts, ToastLevel::Error, &e.to_string()),
            }
            busy.set(false);
        });
    };

    rsx! {
        div {
            class: "p-6 max-w-3xl",
            h1 { class: "text-2xl font-semibold mb-6", "Add a Lesson" }
            form {
                class: "panel",
                onsubmit: handle_submit,
                LessonFields {
                    draft,
                    author_is_premium: is_premium,
                    busy: busy(),
                    submit_label: "Create lesson",
                }
            }
        }
    }
}

#[component]
pub fn UpdateLesson(id: String) -> Element {
    let services = use_services();
    let account = use_account();
    let nav = use_navigator();
    let mut toasts = use_toasts();

    let mut draft = use_signal(LessonDraft::default);
    let mut busy = use_signal(|| false);
    let mut current_id = use_signal(|| id.clone());
    if *current_id.peek() != id {
        current_id.set(id.clone());
    }
    let is_premium = account().flatten().is_some_and(|u| u.is_premium);

    let secure = services.secure.clone();
    let lesson = use_resource(move || {
        let id = current_id();
        let secure = secure.clone();
        async move { secure.lesson(&id).await }
    });

    use_effect(move || {
        if let Some(Ok(l)) = &*lesson.read() {
            draft.set(LessonDraft::from_lesson(l));
        }
    });

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let secure = services.secure.clone();
        spawn(async move {
            let current = draft();
            // An existing premium lesson stays editable after a plan lapses
            let was_premium = matches!(
                &*lesson.peek(),
                Some(Ok(l)) if l.access_level == AccessLevel::Premium
            );
            if let Some(problem) = current.validate(is_premium || was_premium) {
                notify(&mut toasts, ToastLevel::Error, problem);
                return;
            }

            busy.set(true);
            match secure.update_lesson(&current_id(), &current.to_patch()).await {
                Ok(()) => {
                    notify(&mut toasts, ToastLevel::Success, "Lesson updated");
                    nav.push(Route::MyLessons {});
                }
                Err(e) => notify(&mut toasts, ToastLevel::Error, &e.to_string()),
            }
            busy.set(false);
        });
    };

    rsx! {
        div {
            class: "p-6 max-w-3xl",
            h1 { class: "text-2xl font-semibold mb-6", "Update Lesson" }
            match &*lesson.read_unchecked() {
                None => rsx! { Spinner { label: "Loading lesson..." } },
                Some(Err(e)) => rsx! {
                    p { class: "text-sm text-red-600", "Could not load this lesson: {e}" }
                    Link { class: "btn btn-outline mt-4", to: Route::MyLessons {}, "Back to my lessons" }
                },
                Some(Ok(_)) => rsx! {
                    form {
                        class: "panel",
                        onsubmit: handle_submit,
                        LessonFields {
                            draft,
                            author_is_premium: is_premium,
                            busy: busy(),
                            submit_label: "Save changes",
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

    fn filled() -> LessonDraft {
        LessonDraft {
            title: "Ask for help early".into(),
            short_description: "Stuck alone is slower".into(),
            description: "Three days lost before I asked.".into(),
            ..LessonDraft::default()
        }
    }

    #[test]
    fn test_validate_requires_text_fields() {
        assert_eq!(LessonDraft::default().validate(false), Some("Title is required"));

        let mut draft = filled();
        draft.description = "   ".into();
        assert_eq!(draft.validate(false), Some("Please write the full lesson"));
        assert_eq!(filled().validate(false), None);
    }

    #[test]
    fn test_premium_lessons_need_premium_author() {
        let draft = LessonDraft {
            access_level: AccessLevel::Premium,
            ..filled()
        };
        assert!(draft.validate(false).is_some());
        assert_eq!(draft.validate(true), None);
    }

    #[test]
    fn test_from_lesson_uses_full_body() {
        let lesson = Lesson {
            id: "l1".into(),
            title: "T".into(),
            short_description: "S".into(),
            details: "Long form".into(),
            category: None,
            visibility: Visibility::Private,
            ..Lesson::default()
        };
        let draft = LessonDraft::from_lesson(&lesson);

        assert_eq!(draft.description, "Long form");
        assert_eq!(draft.category, CATEGORIES[0]);
        assert_eq!(draft.visibility, Visibility::Private);
    }

    #[test]
    fn test_new_lesson_carries_creator_and_trims() {
        let mut draft = filled();
        draft.title = "  Padded  ".into();
        let lesson = draft.to_new("a@example.com", "Ana", "https://img/a.png");

        assert_eq!(lesson.title, "Padded");
        assert_eq!(lesson.creator_email, "a@example.com");
        assert_eq!(lesson.creator_photo_url, "https://img/a.png");
        assert_eq!(draft.to_patch().visibility, Some(Visibility::Public));
    }
}
