use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));
    tracing::debug!("No route for {path}");

    rsx! {
        div {
            class: "min-h-screen flex flex-col items-center justify-center bg-cream px-4 text-center",
            p { class: "text-6xl font-bold text-primary mb-2", "404" }
            h1 { class: "text-2xl font-semibold mb-2", "Page not found" }
            p { class: "text-sm text-gray-600 mb-6", "Nothing lives at {path}." }
            div {
                class: "flex gap-3",
                Link { class: "btn btn-primary", to: Route::Home {}, "Go home" }
                Link { class: "btn btn-outline", to: Route::PublicLessons {}, "Browse lessons" }
            }
        }
    }
}
