//! # Supabase gateway
//!
//! [`SupabaseGateway`] implements [`store::Gateway`] over the hosted backend's two
//! HTTP surfaces:
//!
//! | Surface | Used for |
//! |---------|----------|
//! | `/auth/v1` | password sign-in (`token?grant_type=password`) and signup |
//! | `/rest/v1` | `posts` (with the author embedded), `likes`, `profiles` |
//!
//! Every request carries the project's anon key as `apikey` and a bearer token:
//! the signed-in user's access token when there is one, the anon key otherwise.
//! Row level security on the backend decides what that token may read and write.
//!
//! Error bodies are mined for a message (see [`rows::error_message`]); a 409 becomes
//! [`GatewayError::Conflict`], everything else [`GatewayError::Backend`] carrying the
//! backend's text unchanged.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use store::{
    BackendConfig, Gateway, GatewayError, NewPost, Post, Profile, ProfileUpdate, Registration,
    UserIdentity,
};

use crate::config::ConfigError;
use crate::rows::{
    error_message, AuthSession, Credentials, LikeRow, NewPostRow, NewProfileRow, PostRow,
    ProfilePatch, ProfileRow, SignupRequest, SignupResponse, UserMetadata,
};

const POST_SELECT: &str = "*,profiles(*)";

#[derive(Clone, Debug)]
pub struct SupabaseGateway {
    http: reqwest::Client,
    config: BackendConfig,
    access_token: Arc<Mutex<Option<String>>>,
}

impl SupabaseGateway {
    pub fn new(config: BackendConfig) -> Result<Self, ConfigError> {
        if config.url.trim().is_empty() {
            return Err(ConfigError::Missing(crate::config::URL_VAR));
        }
        if config.anon_key.trim().is_empty() {
            return Err(ConfigError::Missing(crate::config::ANON_KEY_VAR));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            config,
            access_token: Arc::new(Mutex::new(None)),
        })
    }

    fn token(&self) -> MutexGuard<'_, Option<String>> {
        self.access_token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_signed_in(&self) -> bool {
        self.token().is_some()
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.config.url, path)
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url, table)
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        let bearer = self
            .token()
            .clone()
            .unwrap_or_else(|| self.config.anon_key.clone());
        self.http
            .request(method, url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(bearer)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<reqwest::Response, GatewayError> {
        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(status_error(status.as_u16(), &body))
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, GatewayError> {
        self.execute(request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }

    async fn fetch_profile_row(&self, user_id: &str) -> Result<ProfileRow, GatewayError> {
        let rows: Vec<ProfileRow> = self
            .fetch(
                self.request(Method::GET, self.rest_url("profiles"))
                    .query(&[("id", format!("eq.{}", user_id)), ("select", "*".to_string())]),
            )
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| GatewayError::NotFound("Profile".to_string()))
    }
}

fn status_error(status: u16, body: &str) -> GatewayError {
    let message =
        error_message(body).unwrap_or_else(|| format!("Request failed with status {}", status));
    match status {
        409 => GatewayError::Conflict(message),
        _ => GatewayError::Backend { status, message },
    }
}

impl Gateway for SupabaseGateway {
    async fn authenticate(&self, email: &str, password: &str) -> Result<UserIdentity, GatewayError> {
        let request = self
            .request(Method::POST, self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .json(&Credentials { email, password });

        let session: AuthSession = match self.fetch(request).await {
            Ok(session) => session,
            Err(GatewayError::Backend { status: 400, .. }) => {
                return Err(GatewayError::InvalidCredentials)
            }
            Err(e) => return Err(e),
        };
        *self.token() = Some(session.access_token);

        let mut identity = session.user.to_identity();
        let metadata = &session.user.user_metadata;
        if metadata.name.is_none() || metadata.role.is_none() {
            // Older accounts carry name and role only on the profile row.
            match self.fetch_profile_row(&identity.id).await {
                Ok(profile) => {
                    identity.display_name = profile.name;
                    identity.role = profile.role;
                }
                Err(e) => tracing::warn!("No profile for {}: {}", identity.id, e),
            }
        }
        Ok(identity)
    }

    async fn register(&self, registration: &Registration) -> Result<UserIdentity, GatewayError> {
        let request = self
            .request(Method::POST, self.auth_url("signup"))
            .json(&SignupRequest {
                email: &registration.email,
                password: &registration.password,
                data: UserMetadata {
                    name: Some(registration.name.clone()),
                    role: Some(registration.role.clone()),
                },
            });

        let user = match self.fetch::<SignupResponse>(request).await? {
            SignupResponse::Session(session) => {
                *self.token() = Some(session.access_token);
                session.user
            }
            SignupResponse::User(user) => {
                tracing::info!("Account {} awaits email confirmation", user.id);
                user
            }
        };

        self.execute(
            self.request(Method::POST, self.rest_url("profiles"))
                .header("Prefer", "return=minimal")
                .json(&NewProfileRow {
                    id: &user.id,
                    name: &registration.name,
                    role: &registration.role,
                }),
        )
        .await?;

        Ok(UserIdentity {
            id: user.id,
            display_name: registration.name.clone(),
            email: registration.email.clone(),
            role: registration.role.clone(),
        })
    }

    async fn read_posts(&self) -> Result<Vec<Post>, GatewayError> {
        let rows: Vec<PostRow> = self
            .fetch(
                self.request(Method::GET, self.rest_url("posts"))
                    .query(&[("select", POST_SELECT), ("order", "created_at.desc")]),
            )
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let id = row.id.clone();
                let post = row.into_post();
                if post.is_none() {
                    tracing::warn!("Skipping post {} without an author profile", id);
                }
                post
            })
            .collect())
    }

    async fn read_liked_post_ids(&self, user_id: &str) -> Result<HashSet<String>, GatewayError> {
        let rows: Vec<LikeRow> = self
            .fetch(
                self.request(Method::GET, self.rest_url("likes")).query(&[
                    ("select", "post_id".to_string()),
                    ("user_id", format!("eq.{}", user_id)),
                ]),
            )
            .await?;
        Ok(rows.into_iter().map(|row| row.post_id).collect())
    }

    async fn insert_like(&self, post_id: &str, user_id: &str) -> Result<(), GatewayError> {
        self.execute(
            self.request(Method::POST, self.rest_url("likes"))
                .header("Prefer", "return=minimal")
                .json(&LikeRow {
                    post_id: post_id.to_string(),
                    user_id: Some(user_id.to_string()),
                }),
        )
        .await?;
        Ok(())
    }

    async fn delete_like(&self, post_id: &str, user_id: &str) -> Result<(), GatewayError> {
        self.execute(
            self.request(Method::DELETE, self.rest_url("likes")).query(&[
                ("post_id", format!("eq.{}", post_id)),
                ("user_id", format!("eq.{}", user_id)),
            ]),
        )
        .await?;
        Ok(())
    }

    async fn insert_post(&self, post: &NewPost) -> Result<Post, GatewayError> {
        let rows: Vec<PostRow> = self
            .fetch(
                self.request(Method::POST, self.rest_url("posts"))
                    .query(&[("select", POST_SELECT)])
                    .header("Prefer", "return=representation")
                    .json(&NewPostRow::from(post)),
            )
            .await?;
        rows.into_iter()
            .next()
            .and_then(PostRow::into_post)
            .ok_or_else(|| GatewayError::Decode("insert returned no post with author".to_string()))
    }

    async fn read_profile(&self, user_id: &str) -> Result<Profile, GatewayError> {
        self.fetch_profile_row(user_id).await.map(Profile::from)
    }

    async fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> Result<Profile, GatewayError> {
        let rows: Vec<ProfileRow> = self
            .fetch(
                self.request(Method::PATCH, self.rest_url("profiles"))
                    .query(&[("id", format!("eq.{}", user_id))])
                    .header("Prefer", "return=representation")
                    .json(&ProfilePatch::from(update)),
            )
            .await?;
        rows.into_iter()
            .next()
            .map(Profile::from)
            .ok_or_else(|| GatewayError::NotFound("Profile".to_string()))
    }

    fn end_session(&self) {
        *self.token() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(url: &str) -> SupabaseGateway {
        SupabaseGateway::new(BackendConfig::new(url, "anon")).unwrap()
    }

    #[test]
    fn test_new_rejects_incomplete_config() {
        let err = SupabaseGateway::new(BackendConfig::default()).unwrap_err();
        assert_eq!(err, ConfigError::Missing("SUPABASE_URL"));
        let err = SupabaseGateway::new(BackendConfig::new("https://x.supabase.co", "")).unwrap_err();
        assert_eq!(err, ConfigError::Missing("SUPABASE_ANON_KEY"));
    }

    #[test]
    fn test_urls() {
        let gateway = gateway("https://x.supabase.co/");
        assert_eq!(gateway.auth_url("signup"), "https://x.supabase.co/auth/v1/signup");
        assert_eq!(gateway.rest_url("posts"), "https://x.supabase.co/rest/v1/posts");
    }

    #[test]
    fn test_status_error_mapping() {
        assert_eq!(
            status_error(409, r#"{"message":"duplicate key value violates unique constraint"}"#),
            GatewayError::Conflict("duplicate key value violates unique constraint".to_string())
        );
        assert_eq!(
            status_error(500, ""),
            GatewayError::Backend {
                status: 500,
                message: "Request failed with status 500".to_string()
            }
        );
    }

    #[test]
    fn test_end_session_forgets_token() {
        let gateway = gateway("https://x.supabase.co");
        *gateway.token() = Some("token".to_string());
        assert!(gateway.is_signed_in());
        gateway.end_session();
        assert!(!gateway.is_signed_in());
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let gateway = gateway("http://127.0.0.1:9");
        let err = gateway.read_posts().await.unwrap_err();
        assert!(matches!(err, GatewayError::Transport(_)));
    }
}
