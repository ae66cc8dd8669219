//! # Session store
//!
//! Holds the signed-in [`UserIdentity`] for the lifetime of the client. One
//! [`SessionStore`] is created at startup and handed (cloned) to every controller
//! and view that needs to know who is acting; clones share the same state.
//!
//! Login and signup are single attempts: a failure is recorded as a user-facing
//! message (see [`SessionStore::error`]) and the identity stays unset.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::ClientError;
use crate::gateway::Gateway;
use crate::models::{Registration, UserIdentity};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub identity: Option<UserIdentity>,
    pub error: Option<String>,
}

/// Shared handle onto the current session.
#[derive(Clone, Debug)]
pub struct SessionStore<G> {
    gateway: G,
    state: Arc<Mutex<SessionState>>,
}

impl<G: Gateway> SessionStore<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: Arc::new(Mutex::new(SessionState::default())),
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Sign in. On failure the identity is left unset and [`error`](Self::error) says why.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        self.state().error = None;

        let email = email.trim();
        if let Err(err) = validate_credentials(email, password) {
            self.fail(err);
            return false;
        }

        match self.gateway.authenticate(email, password).await {
            Ok(identity) => {
                tracing::info!("Signed in as {}", identity.id);
                self.state().identity = Some(identity);
                true
            }
            Err(e) => {
                tracing::warn!("Login failed for {}: {}", email, e);
                self.fail(e.into());
                false
            }
        }
    }

    /// Create an account with the given role, then behave as a successful login.
    pub async fn signup(&self, name: &str, email: &str, password: &str, role: &str) -> bool {
        self.state().error = None;

        let registration = Registration {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
            role: role.trim().to_string(),
        };
        if let Err(err) = validate_registration(&registration) {
            self.fail(err);
            return false;
        }

        match self.gateway.register(&registration).await {
            Ok(identity) => {
                tracing::info!("Registered {} as {}", identity.id, identity.role);
                self.state().identity = Some(identity);
                true
            }
            Err(e) => {
                tracing::warn!("Signup failed for {}: {}", registration.email, e);
                self.fail(e.into());
                false
            }
        }
    }

    /// Clear the identity. Safe to call when already signed out.
    pub fn logout(&self) {
        let mut state = self.state();
        if let Some(identity) = state.identity.take() {
            tracing::info!("Signed out {}", identity.id);
        }
        state.error = None;
        drop(state);
        self.gateway.end_session();
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().identity.is_some()
    }

    pub fn identity(&self) -> Option<UserIdentity> {
        self.state().identity.clone()
    }

    /// Message from the last failed login or signup.
    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }

    pub fn snapshot(&self) -> SessionState {
        self.state().clone()
    }

    /// True when both handles are clones of the same store.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    fn fail(&self, err: ClientError) {
        self.state().error = Some(err.to_string());
    }
}

fn validate_credentials(email: &str, password: &str) -> Result<(), ClientError> {
    if email.is_empty() || !email.contains('@') {
        return Err(ClientError::Validation(
            "Please enter a valid email".to_string(),
        ));
    }
    if password.is_empty() {
        return Err(ClientError::Validation("Password is required".to_string()));
    }
    Ok(())
}

fn validate_registration(registration: &Registration) -> Result<(), ClientError> {
    if registration.name.is_empty() {
        return Err(ClientError::Validation("Name is required".to_string()));
    }
    validate_credentials(&registration.email, &registration.password)?;
    if registration.role.is_empty() {
        return Err(ClientError::Validation("Please select your role".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryGateway;

    #[tokio::test]
    async fn test_login_sets_identity() {
        let gateway = MemoryGateway::new();
        gateway.seed_account("Alex Rodriguez", "a@b.com", "x", "Director");
        let session = SessionStore::new(gateway);

        assert!(!session.is_authenticated());
        assert!(session.login("a@b.com", "x").await);
        assert!(session.is_authenticated());
        let identity = session.identity().unwrap();
        assert_eq!(identity.email, "a@b.com");
        assert_eq!(identity.role, "Director");
        assert!(session.error().is_none());
    }

    #[tokio::test]
    async fn test_failed_login_leaves_session_unset() {
        let gateway = MemoryGateway::new();
        gateway.seed_account("Alex Rodriguez", "a@b.com", "x", "Director");
        let session = SessionStore::new(gateway);

        assert!(!session.login("a@b.com", "wrong").await);
        assert!(!session.is_authenticated());
        assert_eq!(session.error().as_deref(), Some("Invalid email or password"));
    }

    #[tokio::test]
    async fn test_login_validation_skips_gateway() {
        let gateway = MemoryGateway::new();
        let session = SessionStore::new(gateway.clone());

        assert!(!session.login("not-an-email", "x").await);
        assert!(!session.login("a@b.com", "").await);
        assert_eq!(session.error().as_deref(), Some("Password is required"));
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_gateway_failure_is_soft() {
        let gateway = MemoryGateway::new();
        gateway.set_offline(true);
        let session = SessionStore::new(gateway);

        assert!(!session.login("a@b.com", "x").await);
        assert!(session.error().unwrap().contains("offline"));
    }

    #[tokio::test]
    async fn test_signup_then_logout() {
        let gateway = MemoryGateway::new();
        let session = SessionStore::new(gateway.clone());

        assert!(session.signup("Meera Patel", "meera@example.com", "pw", "Cinematographer").await);
        let identity = session.identity().unwrap();
        assert_eq!(identity.display_name, "Meera Patel");
        let profile = gateway.read_profile(&identity.id).await.unwrap();
        assert_eq!(profile.role, "Cinematographer");

        session.logout();
        assert!(!session.is_authenticated());
        session.logout();
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_signup_requires_role() {
        let gateway = MemoryGateway::new();
        let session = SessionStore::new(gateway.clone());

        assert!(!session.signup("Meera Patel", "meera@example.com", "pw", "  ").await);
        assert_eq!(session.error().as_deref(), Some("Please select your role"));
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let gateway = MemoryGateway::new();
        gateway.seed_account("Alex Rodriguez", "a@b.com", "x", "Director");
        let session = SessionStore::new(gateway);
        let other = session.clone();

        assert!(session.login("a@b.com", "x").await);
        assert!(other.is_authenticated());
        other.logout();
        assert!(!session.is_authenticated());

        assert!(session.ptr_eq(&other));
        assert!(!session.ptr_eq(&SessionStore::new(MemoryGateway::new())));
    }
}
