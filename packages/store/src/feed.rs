//! # Feed controller
//!
//! Owns the in-memory post list for the signed-in viewer and every mutation the feed
//! page can make to it.
//!
//! ## Loading
//!
//! [`FeedController::fetch_posts`] moves `Idle → Loading → Loaded | Errored`. Posts come
//! back newest first and that order is enforced again locally. For a signed-in viewer the
//! set of liked post ids is read as well and joined in as `viewer_has_liked`. A failed load
//! keeps whatever list was there before.
//!
//! ## Likes
//!
//! [`FeedController::toggle_like`] awaits the remote insert/delete first and only then
//! bumps the local counter and flag. A failed write is logged and surfaced, but nothing is
//! rolled back or retried: the counter may be stale until the next full load.
//!
//! ## Overlapping loads
//!
//! Each load takes a generation number. A load that finishes after a newer one started is
//! dropped. Likes and posts confirmed while a load is in flight are re-applied on top of
//! its result, so the most recently confirmed change wins.
//!
//! [`FeedController::clear`] starts a new epoch. Likes and posts confirmed after it are
//! left to the backend and never touch the cleared list.

use std::collections::HashSet;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{ClientError, GatewayError};
use crate::gateway::Gateway;
use crate::models::{non_blank, NewPost, Post, PostKind, SkillSet};
use crate::session::SessionStore;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Errored,
}

/// The composer form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PostDraft {
    pub content: String,
    pub kind: PostKind,
    pub is_paid: bool,
    pub location: String,
    pub required_skills: SkillSet,
}

/// Everything the feed page renders.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeedState {
    pub status: LoadStatus,
    pub posts: Vec<Post>,
    pub draft: PostDraft,
    /// A post is being submitted.
    pub posting: bool,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct Inner {
    view: FeedState,
    /// Bumped by every load and by `clear`.
    generation: u64,
    /// Bumped by `clear` only.
    epoch: u64,
    /// Post ids whose like toggle was confirmed during the in-flight load.
    toggled_during_load: Vec<String>,
    /// Posts created during the in-flight load.
    created_during_load: Vec<Post>,
    /// Post ids with a like write in flight.
    liking: HashSet<String>,
}

#[derive(Clone, Debug)]
pub struct FeedController<G> {
    session: SessionStore<G>,
    inner: Arc<Mutex<Inner>>,
}

impl<G: Gateway> FeedController<G> {
    pub fn new(session: SessionStore<G>) -> Self {
        Self {
            session,
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> FeedState {
        self.inner().view.clone()
    }

    pub fn status(&self) -> LoadStatus {
        self.inner().view.status
    }

    pub fn posts(&self) -> Vec<Post> {
        self.inner().view.posts.clone()
    }

    pub fn post(&self, post_id: &str) -> Option<Post> {
        self.inner()
            .view
            .posts
            .iter()
            .find(|p| p.id == post_id)
            .cloned()
    }

    pub fn error(&self) -> Option<String> {
        self.inner().view.error.clone()
    }

    pub fn dismiss_error(&self) {
        self.inner().view.error = None;
    }

    pub fn draft(&self) -> PostDraft {
        self.inner().view.draft.clone()
    }

    pub fn update_draft(&self, edit: impl FnOnce(&mut PostDraft)) {
        edit(&mut self.inner().view.draft);
    }

    /// Drop all per-viewer state, e.g. after logout. In-flight loads are discarded.
    pub fn clear(&self) {
        let mut inner = self.inner();
        *inner = Inner {
            generation: inner.generation + 1,
            epoch: inner.epoch + 1,
            ..Inner::default()
        };
    }

    /// Load every post, newest first, with the viewer's likes joined in.
    pub async fn fetch_posts(&self) -> bool {
        let generation = {
            let mut inner = self.inner();
            inner.generation += 1;
            inner.view.status = LoadStatus::Loading;
            inner.toggled_during_load.clear();
            inner.created_during_load.clear();
            inner.generation
        };

        let result = self.load().await;

        let mut inner = self.inner();
        if inner.generation != generation {
            tracing::debug!("Discarding stale feed load #{}", generation);
            return false;
        }

        match result {
            Ok(mut posts) => {
                for post_id in std::mem::take(&mut inner.toggled_during_load) {
                    let local = inner.view.posts.iter().find(|p| p.id == post_id).cloned();
                    if let (Some(local), Some(fetched)) =
                        (local, posts.iter_mut().find(|p| p.id == post_id))
                    {
                        fetched.like_count = local.like_count;
                        fetched.viewer_has_liked = local.viewer_has_liked;
                    }
                }
                for created in std::mem::take(&mut inner.created_during_load) {
                    if !posts.iter().any(|p| p.id == created.id) {
                        posts.insert(0, created);
                    }
                }
                posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

                tracing::debug!("Loaded {} posts", posts.len());
                inner.view.posts = posts;
                inner.view.status = LoadStatus::Loaded;
                inner.view.error = None;
                true
            }
            Err(e) => {
                tracing::error!("Failed to load posts: {}", e);
                inner.view.status = LoadStatus::Errored;
                inner.view.error = Some(ClientError::from(e).to_string());
                false
            }
        }
    }

    async fn load(&self) -> Result<Vec<Post>, GatewayError> {
        let gateway = self.session.gateway();
        let mut posts = gateway.read_posts().await?;

        if let Some(viewer) = self.session.identity() {
            let liked = gateway.read_liked_post_ids(&viewer.id).await?;
            for post in &mut posts {
                post.viewer_has_liked = liked.contains(&post.id);
            }
        }
        Ok(posts)
    }

    /// Like or unlike a loaded post for the signed-in viewer.
    ///
    /// Returns `false` without touching anything when nobody is signed in, the post is
    /// not in the list, or a toggle for it is already in flight.
    pub async fn toggle_like(&self, post_id: &str) -> bool {
        let Some(viewer) = self.session.identity() else {
            tracing::debug!("Ignoring like on {} while signed out", post_id);
            return false;
        };

        let (liked, epoch) = {
            let mut inner = self.inner();
            let Some(liked) = inner
                .view
                .posts
                .iter()
                .find(|p| p.id == post_id)
                .map(|p| p.viewer_has_liked)
            else {
                tracing::debug!("Ignoring like on unknown post {}", post_id);
                return false;
            };
            if !inner.liking.insert(post_id.to_string()) {
                tracing::debug!("Like on {} already in flight", post_id);
                return false;
            }
            (liked, inner.epoch)
        };

        let gateway = self.session.gateway();
        let result = if liked {
            gateway.delete_like(post_id, &viewer.id).await
        } else {
            gateway.insert_like(post_id, &viewer.id).await
        };

        let mut inner = self.inner();
        if inner.epoch != epoch {
            tracing::debug!("Like on {} finished after the feed was cleared", post_id);
            return result.is_ok();
        }
        inner.liking.remove(post_id);

        if let Err(e) = result {
            tracing::error!("Failed to toggle like on {}: {}", post_id, e);
            inner.view.error = Some(ClientError::from(e).to_string());
            return false;
        }

        if let Some(post) = inner.view.posts.iter_mut().find(|p| p.id == post_id) {
            if liked {
                post.like_count = post.like_count.saturating_sub(1);
                post.viewer_has_liked = false;
            } else {
                post.like_count += 1;
                post.viewer_has_liked = true;
            }
        }
        if inner.view.status == LoadStatus::Loading {
            inner.toggled_during_load.push(post_id.to_string());
        }
        true
    }

    /// Publish `draft` as the signed-in viewer.
    ///
    /// The draft is kept as the composer state; it is reset only once the post is stored.
    /// Blank content is rejected before any remote call. Validation and the `posting`
    /// flag are applied when this is called, before the returned future is polled.
    pub fn create_post(&self, draft: PostDraft) -> impl Future<Output = bool> + '_ {
        let prepared = self.begin_post(draft);
        async move {
            let Some((new_post, epoch)) = prepared else {
                return false;
            };
            let result = self.session.gateway().insert_post(&new_post).await;

            let mut inner = self.inner();
            if inner.epoch != epoch {
                match &result {
                    Ok(post) => tracing::debug!("Post {} stored after the feed was cleared", post.id),
                    Err(e) => tracing::debug!("Post failed after the feed was cleared: {}", e),
                }
                return result.is_ok();
            }
            inner.view.posting = false;
            match result {
                Ok(post) => {
                    tracing::info!("Published post {}", post.id);
                    if inner.view.status == LoadStatus::Loading {
                        inner.created_during_load.push(post.clone());
                    }
                    inner.view.posts.insert(0, post);
                    inner.view.draft = PostDraft::default();
                    inner.view.error = None;
                    true
                }
                Err(e) => {
                    tracing::error!("Failed to publish post: {}", e);
                    inner.view.error = Some(ClientError::from(e).to_string());
                    false
                }
            }
        }
    }

    /// Submit whatever is currently in the composer.
    pub fn submit_draft(&self) -> impl Future<Output = bool> + '_ {
        self.create_post(self.draft())
    }

    /// Store the draft, validate it and mark the composer busy. `None` means nothing
    /// should be sent.
    fn begin_post(&self, draft: PostDraft) -> Option<(NewPost, u64)> {
        self.inner().view.draft = draft.clone();

        let Some(viewer) = self.session.identity() else {
            self.fail(ClientError::Validation("Sign in to share a post".to_string()));
            return None;
        };
        let content = draft.content.trim();
        if content.is_empty() {
            self.fail(ClientError::Validation(
                "Post content cannot be empty".to_string(),
            ));
            return None;
        }

        let new_post = NewPost {
            author_id: viewer.id,
            content: content.to_string(),
            kind: draft.kind,
            is_paid: draft.is_paid,
            location: non_blank(&draft.location),
            required_skills: draft.required_skills.into_vec(),
        };

        let mut inner = self.inner();
        inner.view.posting = true;
        Some((new_post, inner.epoch))
    }

    fn fail(&self, err: ClientError) {
        tracing::debug!("Rejected post: {}", err);
        self.inner().view.error = Some(err.to_string());
    }
}
