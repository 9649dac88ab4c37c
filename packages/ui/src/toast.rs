//! Short-lived notifications shown in the corner of the screen.

use dioxus::prelude::*;

/// How long a toast stays up before it dismisses itself.
const TOAST_MILLIS: u32 = 4000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct Toasts {
    pub entries: Vec<Toast>,
    next_id: u64,
}

impl Toasts {
    fn push(&mut self, level: ToastLevel, message: &str) -> u64 {
        self.next_id += 1;
        self.entries.push(Toast {
            id: self.next_id,
            level,
            message: message.to_string(),
        });
        self.next_id
    }

    fn dismiss(&mut self, id: u64) {
        self.entries.retain(|t| t.id != id);
    }
}

pub fn use_toasts() -> Signal<Toasts> {
    use_context::<Signal<Toasts>>()
}

/// Show a toast; it disappears on its own after a few seconds.
pub fn notify(toasts: &mut Signal<Toasts>, level: ToastLevel, message: &str) {
    match level {
        ToastLevel::Error => tracing::error!("{message}"),
        ToastLevel::Warning => tracing::warn!("{message}"),
        _ => tracing::info!("{message}"),
    }
    let id = toasts.write().push(level, message);

    #[cfg(target_arch = "wasm32")]
    {
        let mut toasts = *toasts;
        spawn(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_MILLIS).await;
            toasts.write().dismiss(id);
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (id, TOAST_MILLIS);
}

/// Provides the toast context and renders the stack.
#[component]
pub fn ToastHost(children: Element) -> Element {
    let mut toasts = use_context_provider(|| Signal::new(Toasts::default()));
    let entries = toasts().entries.clone();

    rsx! {
        {children}

        div {
            class: "fixed bottom-4 right-4 z-50 flex flex-col gap-2 w-80",
            for toast in entries {
                div {
                    key: "{toast.id}",
                    class: match toast.level {
                        ToastLevel::Error => "toast toast-error",
                        ToastLevel::Warning => "toast toast-warning",
                        ToastLevel::Success => "toast toast-success",
                        ToastLevel::Info => "toast toast-info",
                    },
                    span { class: "flex-1", "{toast.message}" }
                    button {
                        class: "toast-close",
                        onclick: move |_| toasts.write().dismiss(toast.id),
                        "×"
                    }
                }
            }
        }
    }
}
