//! Client context and authentication hooks for the UI.

use dioxus::prelude::*;
use store::UserIdentity;

use crate::client::{make_client, Client};

/// Authentication state for the application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<UserIdentity>,
    /// A sign-in or sign-up request is in flight.
    pub loading: bool,
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Get the shared [`Client`]. Only valid below a [`ClientProvider`].
pub fn use_client() -> Client {
    use_context::<Client>()
}

/// Provider component that builds the client and tracks authentication state.
/// Wrap your app with this component; it renders a configuration error instead of
/// its children when no backend is configured.
#[component]
pub fn ClientProvider(children: Element) -> Element {
    let client = use_hook(make_client);

    match client {
        Ok(client) => rsx! {
            ClientScope { client, {children} }
        },
        Err(message) => {
            tracing::error!("Client not started: {}", message);
            rsx! {
                div {
                    class: "min-h-screen flex flex-col items-center justify-center gap-3 bg-black text-white p-8",
                    h1 { class: "text-2xl font-bold text-red-600", "RedPuppet is not configured" }
                    p { class: "text-gray-400", "{message}" }
                }
            }
        }
    }
}

#[component]
fn ClientScope(client: Client, children: Element) -> Element {
    let user = client.session.identity();
    use_context_provider(|| client);
    let auth_state = use_signal(|| AuthState {
        user,
        loading: false,
    });
    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Sign in and publish the outcome on `auth`. Returns the message to show on failure.
pub async fn sign_in(
    client: &Client,
    mut auth: Signal<AuthState>,
    email: &str,
    password: &str,
) -> Result<(), String> {
    auth.write().loading = true;
    let ok = client.session.login(email, password).await;
    settle(client, auth, ok)
}

/// Create an account and sign in with it.
pub async fn sign_up(
    client: &Client,
    mut auth: Signal<AuthState>,
    name: &str,
    email: &str,
    password: &str,
    role: &str,
) -> Result<(), String> {
    auth.write().loading = true;
    let ok = client.session.signup(name, email, password, role).await;
    settle(client, auth, ok)
}

fn settle(client: &Client, mut auth: Signal<AuthState>, ok: bool) -> Result<(), String> {
    auth.set(AuthState {
        user: client.session.identity(),
        loading: false,
    });
    if ok {
        Ok(())
    } else {
        Err(client
            .session
            .error()
            .unwrap_or_else(|| "Something went wrong. Please try again.".to_string()))
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    on_logout: EventHandler<()>,
) -> Element {
    let client = use_client();
    let mut auth_state = use_auth();

    let onclick = move |_| {
        client.sign_out();
        auth_state.set(AuthState::default());
        on_logout.call(());
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
