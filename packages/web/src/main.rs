use dioxus::prelude::*;

use ui::{use_auth, ClientProvider, LoadingScreen, LogoutButton, Navbar};
use views::{Feed, Landing, Login, Profile, Signup};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Landing {},
        #[route("/login?:redirect")]
        Login { redirect: String },
        #[route("/signup")]
        Signup {},
        #[route("/feed")]
        Feed {},
        #[route("/profile")]
        Profile {},
}

impl Route {
    fn login() -> Self {
        Route::Login {
            redirect: String::new(),
        }
    }

    /// Login route that returns to `self` once signed in.
    fn login_then(self) -> Self {
        Route::Login {
            redirect: self.to_string(),
        }
    }

    /// Where to go after signing in. Only signed-in pages are valid targets.
    fn after_sign_in(redirect: &str) -> Self {
        match redirect.parse::<Route>() {
            Ok(route @ (Route::Feed {} | Route::Profile {})) => route,
            _ => Route::Feed {},
        }
    }
}

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "RedPuppet" }
        document::Script { src: TAILWIND_CDN }

        div {
            class: "min-h-screen bg-black text-white",
            ClientProvider {
                Router::<Route> {}
            }
        }
    }
}

/// Navbar above every page; links depend on whether someone is signed in.
#[component]
fn Shell() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let link = "text-gray-300 hover:text-white";
    let active = "text-red-500";

    rsx! {
        Navbar {
            if auth().user.is_some() {
                Link { to: Route::Feed {}, class: "{link}", active_class: "{active}", "Feed" }
                Link { to: Route::Profile {}, class: "{link}", active_class: "{active}", "Profile" }
                LogoutButton {
                    class: "px-3 py-1.5 rounded border border-zinc-700 text-gray-300 hover:text-white",
                    on_logout: move |_| {
                        nav.replace(Route::Landing {});
                    },
                }
            } else {
                Link { to: Route::login(), class: "{link}", "Login" }
                Link {
                    to: Route::Signup {},
                    class: "px-4 py-1.5 rounded bg-red-600 hover:bg-red-700 text-white font-medium",
                    "Join Now"
                }
            }
        }
        LoadingScreen {}
        Outlet::<Route> {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_returns_to_origin() {
        let Route::Login { redirect } = Route::Profile {}.login_then() else {
            panic!("expected the login route");
        };
        assert_eq!(Route::after_sign_in(&redirect), Route::Profile {});
    }

    #[test]
    fn test_sign_in_defaults_to_feed() {
        assert_eq!(Route::after_sign_in(""), Route::Feed {});
        assert_eq!(Route::after_sign_in("/nowhere"), Route::Feed {});
        assert_eq!(Route::after_sign_in(&Route::login().to_string()), Route::Feed {});
        assert_eq!(Route::after_sign_in(&Route::Landing {}.to_string()), Route::Feed {});
    }
}
