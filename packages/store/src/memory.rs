use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::error::GatewayError;
use crate::gateway::Gateway;
use crate::models::{
    NewPost, Post, PostKind, Profile, ProfileUpdate, Registration, SkillSet, UserIdentity,
};

/// In-memory Gateway for testing and the offline demo build.
///
/// Behaves like the hosted backend would: unique like pairs, a like counter kept in
/// step with the pairs, newest-first post listing. `set_offline(true)` makes every
/// call fail with a transport error.
#[derive(Clone, Debug, Default)]
pub struct MemoryGateway {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    accounts: HashMap<String, Account>,
    profiles: HashMap<String, Profile>,
    posts: Vec<Post>,
    likes: HashSet<(String, String)>,
    offline: bool,
    calls: usize,
    writes: usize,
}

#[derive(Debug)]
struct Account {
    password: String,
    identity: UserIdentity,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock the state for a read call, failing if offline.
    fn read(&self) -> Result<MutexGuard<'_, Inner>, GatewayError> {
        let mut inner = self.inner();
        inner.calls += 1;
        if inner.offline {
            return Err(GatewayError::Transport("gateway offline".to_string()));
        }
        Ok(inner)
    }

    /// Lock the state for a write call, failing if offline.
    fn write(&self) -> Result<MutexGuard<'_, Inner>, GatewayError> {
        let mut inner = self.inner();
        inner.calls += 1;
        inner.writes += 1;
        if inner.offline {
            return Err(GatewayError::Transport("gateway offline".to_string()));
        }
        Ok(inner)
    }

    pub fn set_offline(&self, offline: bool) {
        self.inner().offline = offline;
    }

    /// Number of gateway calls issued so far, reads and writes.
    pub fn call_count(&self) -> usize {
        self.inner().calls
    }

    /// Number of write calls issued so far, including failed ones.
    pub fn write_count(&self) -> usize {
        self.inner().writes
    }

    /// Number of like pairs stored for a post.
    pub fn like_rows(&self, post_id: &str) -> usize {
        self.inner()
            .likes
            .iter()
            .filter(|(post, _)| post == post_id)
            .count()
    }

    /// Create an account and its profile without going through `register`.
    pub fn seed_account(&self, name: &str, email: &str, password: &str, role: &str) -> UserIdentity {
        let mut inner = self.inner();
        inner.create_account(name, email, password, role, None)
    }

    /// Insert a post with a fixed id, counter and timestamp.
    pub fn seed_post(
        &self,
        id: &str,
        post: NewPost,
        like_count: u32,
        created_at: DateTime<Utc>,
    ) -> Result<Post, GatewayError> {
        let mut inner = self.inner();
        inner.create_post(id.to_string(), post, like_count, created_at)
    }

    /// A gateway pre-filled with a demo account and a handful of posts.
    ///
    /// Sign in with `demo@redpuppet.app` / `password`.
    pub fn with_demo_data() -> Self {
        let gateway = Self::new();
        let now = Utc::now();
        gateway.seed_account("Alex Rodriguez", "demo@redpuppet.app", "password", "Director");

        let samples = [
            (
                "Priya Sharma",
                "Producer",
                "Mumbai",
                "Looking for an experienced Editor in Mumbai for a paid commercial project. 3-day shoot, competitive rates. Must have experience with color grading and motion graphics.",
                PostKind::Job,
                true,
                12,
                vec!["Editing", "Color Grading", "Motion Graphics"],
                Duration::hours(2),
            ),
            (
                "Rajesh Kumar",
                "Director",
                "Delhi",
                "Excited to share that our short film \"Midnight Express\" has been selected for the Delhi Independent Film Festival! Looking for a Sound Designer to join our post-production team.",
                PostKind::Collaboration,
                false,
                24,
                vec!["Sound Design", "Audio Mixing"],
                Duration::hours(5),
            ),
            (
                "Meera Patel",
                "Cinematographer",
                "Bangalore",
                "Portfolio update! Just wrapped an amazing music video shoot. The lighting challenges pushed my creativity to new levels. Always looking for collaborative directors who value cinematography.",
                PostKind::Showcase,
                false,
                31,
                vec!["Cinematography", "Lighting"],
                Duration::days(1),
            ),
            (
                "Arjun Singh",
                "Actor",
                "Hyderabad",
                "Seeking talented filmmakers for an upcoming web series project. We have funding secured and are looking for passionate storytellers. Drama/Thriller genre. Paid positions available.",
                PostKind::Job,
                true,
                18,
                vec!["Direction", "Writing", "Production"],
                Duration::days(2),
            ),
        ];

        let mut inner = gateway.inner();
        for (name, role, location, content, kind, is_paid, likes, skills, age) in samples {
            let email = format!("{}@redpuppet.app", name.to_lowercase().replace(' ', "."));
            let author = inner.create_account(name, &email, "password", role, Some(location));
            let post = NewPost {
                author_id: author.id,
                content: content.to_string(),
                kind,
                is_paid,
                location: Some(location.to_string()),
                required_skills: skills.into_iter().map(str::to_string).collect(),
            };
            let id = Uuid::new_v4().to_string();
            // Authors were created just above, so this cannot miss.
            let _ = inner.create_post(id, post, likes, now - age);
        }
        drop(inner);
        gateway
    }
}

impl Inner {
    fn create_account(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        role: &str,
        location: Option<&str>,
    ) -> UserIdentity {
        let now = Utc::now();
        let identity = UserIdentity {
            id: Uuid::new_v4().to_string(),
            display_name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
        };
        self.profiles.insert(
            identity.id.clone(),
            Profile {
                id: identity.id.clone(),
                name: name.to_string(),
                role: role.to_string(),
                bio: None,
                location: location.map(str::to_string),
                skills: SkillSet::new(),
                avatar_url: None,
                created_at: now,
                updated_at: now,
            },
        );
        self.accounts.insert(
            email.trim().to_lowercase(),
            Account {
                password: password.to_string(),
                identity: identity.clone(),
            },
        );
        identity
    }

    fn create_post(
        &mut self,
        id: String,
        post: NewPost,
        like_count: u32,
        created_at: DateTime<Utc>,
    ) -> Result<Post, GatewayError> {
        let author = self
            .profiles
            .get(&post.author_id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound("Author profile".to_string()))?;
        let stored = Post {
            id,
            author_id: post.author_id,
            content: post.content,
            kind: post.kind,
            is_paid: post.is_paid,
            location: post.location,
            required_skills: post.required_skills,
            like_count,
            comment_count: 0,
            created_at,
            updated_at: created_at,
            author,
            viewer_has_liked: false,
        };
        self.posts.push(stored.clone());
        Ok(stored)
    }

    fn post_mut(&mut self, post_id: &str) -> Result<&mut Post, GatewayError> {
        self.posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or_else(|| GatewayError::NotFound("Post".to_string()))
    }
}

impl Gateway for MemoryGateway {
    async fn authenticate(&self, email: &str, password: &str) -> Result<UserIdentity, GatewayError> {
        let inner = self.read()?;
        match inner.accounts.get(&email.trim().to_lowercase()) {
            Some(account) if account.password == password => Ok(account.identity.clone()),
            _ => Err(GatewayError::InvalidCredentials),
        }
    }

    async fn register(&self, registration: &Registration) -> Result<UserIdentity, GatewayError> {
        let mut inner = self.write()?;
        if inner
            .accounts
            .contains_key(&registration.email.trim().to_lowercase())
        {
            return Err(GatewayError::Conflict(
                "An account with this email already exists".to_string(),
            ));
        }
        Ok(inner.create_account(
            &registration.name,
            registration.email.trim(),
            &registration.password,
            &registration.role,
            None,
        ))
    }

    async fn read_posts(&self) -> Result<Vec<Post>, GatewayError> {
        let inner = self.read()?;
        // Reverse first so equal timestamps list the later insert first.
        let mut posts: Vec<Post> = inner.posts.iter().rev().cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn read_liked_post_ids(&self, user_id: &str) -> Result<HashSet<String>, GatewayError> {
        let inner = self.read()?;
        Ok(inner
            .likes
            .iter()
            .filter(|(_, user)| user == user_id)
            .map(|(post, _)| post.clone())
            .collect())
    }

    async fn insert_like(&self, post_id: &str, user_id: &str) -> Result<(), GatewayError> {
        let mut inner = self.write()?;
        inner.post_mut(post_id)?;
        if !inner.likes.insert((post_id.to_string(), user_id.to_string())) {
            return Err(GatewayError::Conflict("Post already liked".to_string()));
        }
        let post = inner.post_mut(post_id)?;
        post.like_count += 1;
        Ok(())
    }

    async fn delete_like(&self, post_id: &str, user_id: &str) -> Result<(), GatewayError> {
        let mut inner = self.write()?;
        if inner.likes.remove(&(post_id.to_string(), user_id.to_string())) {
            let post = inner.post_mut(post_id)?;
            post.like_count = post.like_count.saturating_sub(1);
        }
        Ok(())
    }

    async fn insert_post(&self, post: &NewPost) -> Result<Post, GatewayError> {
        let mut inner = self.write()?;
        let id = Uuid::new_v4().to_string();
        inner.create_post(id, post.clone(), 0, Utc::now())
    }

    async fn read_profile(&self, user_id: &str) -> Result<Profile, GatewayError> {
        let inner = self.read()?;
        inner
            .profiles
            .get(user_id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound("Profile".to_string()))
    }

    async fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> Result<Profile, GatewayError> {
        let mut inner = self.write()?;
        let profile = inner
            .profiles
            .get_mut(user_id)
            .ok_or_else(|| GatewayError::NotFound("Profile".to_string()))?;
        profile.name = update.name.clone();
        profile.bio = update.bio.clone();
        profile.location = update.location.clone();
        profile.skills = update.skills.clone();
        profile.updated_at = Utc::now();
        let updated = profile.clone();

        // Keep the denormalized author copies in step, as the join would.
        for post in inner.posts.iter_mut().filter(|p| p.author_id == user_id) {
            post.author = updated.clone();
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_post(author_id: &str, content: &str) -> NewPost {
        NewPost {
            author_id: author_id.to_string(),
            content: content.to_string(),
            kind: PostKind::Showcase,
            is_paid: false,
            location: None,
            required_skills: vec![],
        }
    }

    #[tokio::test]
    async fn test_authenticate() {
        let gateway = MemoryGateway::new();
        let seeded = gateway.seed_account("Meera Patel", "meera@example.com", "secret", "Cinematographer");

        let identity = gateway.authenticate("Meera@Example.com", "secret").await.unwrap();
        assert_eq!(identity, seeded);

        let err = gateway.authenticate("meera@example.com", "nope").await.unwrap_err();
        assert_eq!(err, GatewayError::InvalidCredentials);
        let err = gateway.authenticate("who@example.com", "secret").await.unwrap_err();
        assert_eq!(err, GatewayError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_register_creates_profile_and_rejects_duplicates() {
        let gateway = MemoryGateway::new();
        let registration = Registration {
            name: "Arjun Singh".to_string(),
            email: "arjun@example.com".to_string(),
            password: "pw".to_string(),
            role: "Actor".to_string(),
        };

        let identity = gateway.register(&registration).await.unwrap();
        let profile = gateway.read_profile(&identity.id).await.unwrap();
        assert_eq!(profile.role, "Actor");
        assert_eq!(profile.name, "Arjun Singh");

        let err = gateway.register(&registration).await.unwrap_err();
        assert!(matches!(err, GatewayError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_read_posts_newest_first() {
        let gateway = MemoryGateway::new();
        let author = gateway.seed_account("Rajesh Kumar", "rajesh@example.com", "pw", "Director");
        let now = Utc::now();
        gateway
            .seed_post("old", new_post(&author.id, "old"), 0, now - Duration::days(3))
            .unwrap();
        gateway
            .seed_post("new", new_post(&author.id, "new"), 0, now)
            .unwrap();
        gateway
            .seed_post("mid", new_post(&author.id, "mid"), 0, now - Duration::hours(4))
            .unwrap();

        let ids: Vec<String> = gateway
            .read_posts()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, ["new", "mid", "old"]);
    }

    #[tokio::test]
    async fn test_like_pair_is_unique_and_counted() {
        let gateway = MemoryGateway::new();
        let author = gateway.seed_account("Priya Sharma", "priya@example.com", "pw", "Producer");
        gateway
            .seed_post("post-1", new_post(&author.id, "hello"), 0, Utc::now())
            .unwrap();

        gateway.insert_like("post-1", &author.id).await.unwrap();
        let err = gateway.insert_like("post-1", &author.id).await.unwrap_err();
        assert!(matches!(err, GatewayError::Conflict(_)));
        assert_eq!(gateway.like_rows("post-1"), 1);

        let liked = gateway.read_liked_post_ids(&author.id).await.unwrap();
        assert!(liked.contains("post-1"));
        assert_eq!(gateway.read_posts().await.unwrap()[0].like_count, 1);

        gateway.delete_like("post-1", &author.id).await.unwrap();
        gateway.delete_like("post-1", &author.id).await.unwrap();
        assert_eq!(gateway.read_posts().await.unwrap()[0].like_count, 0);
        assert_eq!(gateway.like_rows("post-1"), 0);
    }

    #[tokio::test]
    async fn test_offline_fails_and_counts_writes() {
        let gateway = MemoryGateway::new();
        gateway.set_offline(true);

        assert!(matches!(
            gateway.read_posts().await,
            Err(GatewayError::Transport(_))
        ));
        assert!(gateway.insert_like("p", "u").await.is_err());
        assert_eq!(gateway.call_count(), 2);
        assert_eq!(gateway.write_count(), 1);
    }

    #[tokio::test]
    async fn test_demo_data() {
        let gateway = MemoryGateway::with_demo_data();
        let demo = gateway.authenticate("demo@redpuppet.app", "password").await.unwrap();
        assert_eq!(demo.display_name, "Alex Rodriguez");

        let posts = gateway.read_posts().await.unwrap();
        assert_eq!(posts.len(), 4);
        assert_eq!(posts[0].author.name, "Priya Sharma");
        assert_eq!(posts[0].like_count, 12);
    }
}
