//! # Gateway: the contract with the remote data service
//!
//! Controllers never talk to a backend directly. Everything they read or write goes
//! through [`Gateway`], so the same session, feed and profile logic runs against the
//! hosted backend (`api::SupabaseGateway`) or the in-process
//! [`MemoryGateway`](crate::MemoryGateway) used by tests and the demo build.
//!
//! Implementations are cheap to clone handles onto shared state. Like the rest of
//! the client they are used from a single cooperative task, so the returned futures
//! are not required to be `Send`.

use std::collections::HashSet;
use std::future::Future;

use crate::error::GatewayError;
use crate::models::{NewPost, Post, Profile, ProfileUpdate, Registration, UserIdentity};

/// Async operations offered by the external persistence and auth service.
pub trait Gateway {
    fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<UserIdentity, GatewayError>>;

    /// Create an identity and its profile row carrying the chosen role.
    fn register(
        &self,
        registration: &Registration,
    ) -> impl Future<Output = Result<UserIdentity, GatewayError>>;

    /// All posts, newest first, each with its author joined in.
    fn read_posts(&self) -> impl Future<Output = Result<Vec<Post>, GatewayError>>;

    fn read_liked_post_ids(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<HashSet<String>, GatewayError>>;

    fn insert_like(
        &self,
        post_id: &str,
        user_id: &str,
    ) -> impl Future<Output = Result<(), GatewayError>>;

    fn delete_like(
        &self,
        post_id: &str,
        user_id: &str,
    ) -> impl Future<Output = Result<(), GatewayError>>;

    fn insert_post(&self, post: &NewPost) -> impl Future<Output = Result<Post, GatewayError>>;

    /// `Err(GatewayError::NotFound)` when the identity has no profile row.
    fn read_profile(&self, user_id: &str) -> impl Future<Output = Result<Profile, GatewayError>>;

    fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> impl Future<Output = Result<Profile, GatewayError>>;

    /// Forget any credentials held for the signed-in user.
    fn end_session(&self) {}
}
