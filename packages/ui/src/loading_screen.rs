use dioxus::prelude::*;

use crate::auth::use_auth;

/// Full-screen overlay shown while a sign-in or sign-up is in flight.
#[component]
pub fn LoadingScreen(#[props(default = "Please wait...".to_string())] message: String) -> Element {
    let auth = use_auth();

    if !auth().loading {
        return rsx! {};
    }

    rsx! {
        div {
            class: "fixed inset-0 flex items-center justify-center bg-black/80",
            style: "z-index: 2000",
            div {
                class: "flex flex-col items-center gap-4",
                div { class: "h-12 w-12 rounded-full border-4 border-red-600 border-t-transparent animate-spin" }
                p { class: "text-gray-300", "{message}" }
            }
        }
    }
}
