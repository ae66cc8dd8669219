//! Gateway wrapper for interleaving tests: chosen calls wait at a gate until released.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

use crate::error::GatewayError;
use crate::gateway::Gateway;
use crate::models::{NewPost, Post, Profile, ProfileUpdate, Registration, UserIdentity};
use crate::MemoryGateway;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Call {
    ReadPosts,
    InsertPost,
    ReadProfile,
    UpdateProfile,
}

#[derive(Clone, Default)]
pub(crate) struct GatedGateway {
    pub inner: MemoryGateway,
    gates: Arc<Mutex<HashMap<Call, oneshot::Receiver<()>>>>,
    /// Whether a gated `read_posts` reads before waiting rather than after.
    read_before_wait: bool,
}

impl GatedGateway {
    pub fn new(read_before_wait: bool) -> Self {
        Self {
            read_before_wait,
            ..Self::default()
        }
    }

    /// Hold the next `call` until the returned sender fires (or is dropped).
    pub fn arm(&self, call: Call) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(call, rx);
        tx
    }

    fn take(&self, call: Call) -> Option<oneshot::Receiver<()>> {
        self.gates.lock().unwrap().remove(&call)
    }

    async fn pass(&self, call: Call) {
        if let Some(gate) = self.take(call) {
            let _ = gate.await;
        }
    }
}

impl Gateway for GatedGateway {
    async fn authenticate(&self, email: &str, password: &str) -> Result<UserIdentity, GatewayError> {
        self.inner.authenticate(email, password).await
    }

    async fn register(&self, registration: &Registration) -> Result<UserIdentity, GatewayError> {
        self.inner.register(registration).await
    }

    async fn read_posts(&self) -> Result<Vec<Post>, GatewayError> {
        let Some(gate) = self.take(Call::ReadPosts) else {
            return self.inner.read_posts().await;
        };
        if self.read_before_wait {
            let posts = self.inner.read_posts().await;
            let _ = gate.await;
            posts
        } else {
            let _ = gate.await;
            self.inner.read_posts().await
        }
    }

    async fn read_liked_post_ids(&self, user_id: &str) -> Result<HashSet<String>, GatewayError> {
        self.inner.read_liked_post_ids(user_id).await
    }

    async fn insert_like(&self, post_id: &str, user_id: &str) -> Result<(), GatewayError> {
        self.inner.insert_like(post_id, user_id).await
    }

    async fn delete_like(&self, post_id: &str, user_id: &str) -> Result<(), GatewayError> {
        self.inner.delete_like(post_id, user_id).await
    }

    // Writes land in the backend first, then wait.
    async fn insert_post(&self, post: &NewPost) -> Result<Post, GatewayError> {
        let result = self.inner.insert_post(post).await;
        self.pass(Call::InsertPost).await;
        result
    }

    async fn read_profile(&self, user_id: &str) -> Result<Profile, GatewayError> {
        let result = self.inner.read_profile(user_id).await;
        self.pass(Call::ReadProfile).await;
        result
    }

    async fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> Result<Profile, GatewayError> {
        let result = self.inner.update_profile(user_id, update).await;
        self.pass(Call::UpdateProfile).await;
        result
    }
}
