use dioxus::prelude::*;

#[component]
pub fn ErrorBanner(message: String, on_dismiss: Option<EventHandler<()>>) -> Element {
    rsx! {
        div {
            class: "flex items-start justify-between gap-3 px-3 py-2.5 bg-red-950/60 border border-red-800 rounded text-red-300 text-sm",
            role: "alert",
            span { "{message}" }
            if let Some(on_dismiss) = on_dismiss {
                button {
                    class: "text-red-400 hover:text-white",
                    onclick: move |_| on_dismiss.call(()),
                    "×"
                }
            }
        }
    }
}
