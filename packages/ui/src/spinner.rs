use dioxus::prelude::*;

/// Loading placeholder.
#[component]
pub fn Spinner(#[props(default)] label: Option<String>) -> Element {
    rsx! {
        div {
            class: "flex flex-col justify-center items-center gap-3 py-10",
            div { class: "spinner" }
            if let Some(label) = label {
                p { class: "text-sm text-gray-500", "{label}" }
            }
        }
    }
}
