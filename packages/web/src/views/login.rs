//! Login page view with email/password form.

use dioxus::prelude::*;
use ui::{sign_in, use_auth, use_client, ErrorBanner};

use crate::Route;

/// Login page component.
#[component]
pub fn Login(redirect: String) -> Element {
    let client = use_client();
    let auth = use_auth();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut show_password = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let target = Route::after_sign_in(&redirect);

    // If already logged in, go where the visitor was headed
    let landing = target.clone();
    use_effect(move || {
        if auth().user.is_some() {
            nav.replace(landing.clone());
        }
    });

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        let target = target.clone();
        spawn(async move {
            error.set(None);
            match sign_in(&client, auth, &email(), &password()).await {
                Ok(()) => {
                    nav.replace(target);
                }
                Err(message) => error.set(Some(message)),
            }
        });
    };

    let input_type = if show_password() { "text" } else { "password" };

    rsx! {
        div {
            class: "flex flex-col items-center justify-center min-h-[80vh] p-8",

            h1 { class: "mb-2 text-3xl font-bold", "Welcome Back" }
            p { class: "mb-8 text-gray-400", "Sign in to continue to RedPuppet" }

            form {
                onsubmit: handle_login,
                class: "flex flex-col gap-3 w-full max-w-sm",

                if let Some(message) = error() {
                    ErrorBanner { message }
                }

                input {
                    class: "w-full bg-zinc-900 border border-zinc-700 rounded p-3 text-white placeholder-gray-500",
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }

                div {
                    class: "relative",
                    input {
                        class: "w-full bg-zinc-900 border border-zinc-700 rounded p-3 pr-16 text-white placeholder-gray-500",
                        r#type: input_type,
                        placeholder: "Password",
                        value: password(),
                        oninput: move |evt: FormEvent| password.set(evt.value()),
                    }
                    button {
                        r#type: "button",
                        class: "absolute right-3 top-3 text-xs text-gray-400 hover:text-white",
                        onclick: move |_| show_password.toggle(),
                        if show_password() { "Hide" } else { "Show" }
                    }
                }

                button {
                    r#type: "submit",
                    class: "w-full py-3 rounded bg-red-600 hover:bg-red-700 font-medium disabled:opacity-50",
                    disabled: auth().loading,
                    "Login"
                }
            }

            p {
                class: "mt-6 text-sm text-gray-400",
                "Don't have an account? "
                Link { to: Route::Signup {}, class: "text-red-500", "Sign up" }
            }
        }
    }
}
