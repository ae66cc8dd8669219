use dioxus::prelude::*;

/// Top bar with the brand on the left and `children` (links, buttons) on the right.
#[component]
pub fn Navbar(children: Element) -> Element {
    rsx! {
        nav {
            class: "sticky top-0 z-40 bg-black/95 border-b border-red-900/40",
            div {
                class: "max-w-6xl mx-auto px-4 h-16 flex items-center justify-between",
                span {
                    class: "text-2xl font-extrabold tracking-tight",
                    span { class: "text-red-600", "Red" }
                    span { class: "text-white", "Puppet" }
                }
                div {
                    class: "flex items-center gap-4 text-sm",
                    {children}
                }
            }
        }
    }
}
