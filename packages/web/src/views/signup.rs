//! Registration page view with name, email, password and role.

use dioxus::prelude::*;
use store::ROLES;
use ui::{sign_up, use_auth, use_client, ErrorBanner};

use crate::Route;

/// Signup page component.
#[component]
pub fn Signup() -> Element {
    let client = use_client();
    let auth = use_auth();
    let nav = use_navigator();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut role = use_signal(String::new);
    let mut show_password = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    use_effect(move || {
        if auth().user.is_some() {
            nav.replace(Route::Feed {});
        }
    });

    let handle_signup = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            error.set(None);
            match sign_up(&client, auth, &name(), &email(), &password(), &role()).await {
                Ok(()) => {
                    nav.push(Route::Feed {});
                }
                Err(message) => error.set(Some(message)),
            }
        });
    };

    let input_type = if show_password() { "text" } else { "password" };
    let field = "w-full bg-zinc-900 border border-zinc-700 rounded p-3 text-white placeholder-gray-500";

    rsx! {
        div {
            class: "flex flex-col items-center justify-center min-h-[80vh] p-8",

            h1 { class: "mb-2 text-3xl font-bold", "Join RedPuppet" }
            p { class: "mb-8 text-gray-400", "Create your filmmaker profile" }

            form {
                onsubmit: handle_signup,
                class: "flex flex-col gap-3 w-full max-w-sm",

                if let Some(message) = error() {
                    ErrorBanner { message }
                }

                input {
                    class: "{field}",
                    r#type: "text",
                    placeholder: "Full name",
                    value: name(),
                    oninput: move |evt: FormEvent| name.set(evt.value()),
                }

                input {
                    class: "{field}",
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }

                div {
                    class: "relative",
                    input {
                        class: "{field} pr-16",
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

                select {
                    class: "{field}",
                    value: role(),
                    onchange: move |evt: FormEvent| role.set(evt.value()),
                    option { value: "", disabled: true, "Select your role" }
                    for r in ROLES {
                        option { key: "{r}", value: r, "{r}" }
                    }
                }

                button {
                    r#type: "submit",
                    class: "w-full py-3 rounded bg-red-600 hover:bg-red-700 font-medium disabled:opacity-50",
                    disabled: auth().loading,
                    "Create Account"
                }
            }

            p {
                class: "mt-6 text-sm text-gray-400",
                "Already have an account? "
                Link { to: Route::login(), class: "text-red-500", "Login" }
            }
        }
    }
}
