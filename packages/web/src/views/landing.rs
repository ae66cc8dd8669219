use dioxus::prelude::*;

use crate::Route;

const FEATURES: [(&str, &str); 4] = [
    (
        "Showcase Portfolio",
        "Display your best work with high-quality video and image uploads.",
    ),
    (
        "Find Collaborators",
        "Connect with talented professionals across all film disciplines.",
    ),
    (
        "Build Reputation",
        "Earn recognition for your work and build industry credibility.",
    ),
    (
        "Fast Networking",
        "Quick connections and instant collaboration opportunities.",
    ),
];

#[component]
pub fn Landing() -> Element {
    rsx! {
        section {
            class: "max-w-5xl mx-auto px-4 pt-24 pb-16 text-center flex flex-col items-center gap-6",
            h1 {
                class: "text-5xl md:text-6xl font-extrabold leading-tight",
                span { class: "block text-red-600", "Where Filmmakers" }
                span { class: "block text-white", "Meet, Collaborate & Create." }
            }
            p {
                class: "max-w-2xl text-lg text-gray-400",
                "Connect with directors, actors, editors, musicians, and producers. "
                "Build your network, showcase your work, and find your next big project."
            }
            div {
                class: "flex gap-4",
                Link {
                    to: Route::Signup {},
                    class: "px-6 py-3 rounded bg-red-600 hover:bg-red-700 font-semibold",
                    "Start Your Journey"
                }
                Link {
                    to: Route::login(),
                    class: "px-6 py-3 rounded border border-zinc-600 hover:border-white",
                    "Login"
                }
            }
        }

        section {
            class: "max-w-5xl mx-auto px-4 py-16",
            h2 {
                class: "text-3xl font-bold text-center mb-10",
                "Built for "
                span { class: "text-red-600", "Filmmakers" }
            }
            div {
                class: "grid grid-cols-1 md:grid-cols-2 gap-6",
                for (title, blurb) in FEATURES {
                    div {
                        key: "{title}",
                        class: "bg-zinc-900 border border-zinc-800 rounded-xl p-6",
                        h3 { class: "text-xl font-bold mb-3 text-white", "{title}" }
                        p { class: "text-gray-400", "{blurb}" }
                    }
                }
            }
        }

        section {
            class: "max-w-3xl mx-auto px-4 py-20 text-center flex flex-col items-center gap-4",
            h2 { class: "text-3xl font-bold", "Ready to Join the Community?" }
            p { class: "text-gray-400", "Your next great collaboration is just a click away." }
            Link {
                to: Route::Signup {},
                class: "px-6 py-3 rounded bg-red-600 hover:bg-red-700 font-semibold",
                "Join Now - It's Free"
            }
        }
    }
}
