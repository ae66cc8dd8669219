//! # Wire rows for the hosted backend
//!
//! The backend speaks snake_case JSON with its own column names (`user_id`,
//! `type`, `skills_required`, `likes_count`, an embedded `profiles` object for the
//! author join). These structs mirror those payloads and convert into the
//! [`store`] models the controllers work with.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use store::{NewPost, Post, PostKind, Profile, ProfileUpdate, SkillSet, UserIdentity};

/// A `profiles` row.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ProfileRow {
    pub id: String,
    pub name: String,
    pub role: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            id: row.id,
            name: row.name,
            role: row.role,
            bio: row.bio,
            location: row.location,
            skills: SkillSet::from(row.skills.unwrap_or_default()),
            avatar_url: row.avatar_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A `posts` row with the author embedded as `profiles`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PostRow {
    pub id: String,
    pub user_id: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: PostKind,
    #[serde(default)]
    pub is_paid: Option<bool>,
    pub location: Option<String>,
    #[serde(default)]
    pub skills_required: Option<Vec<String>>,
    #[serde(default)]
    pub likes_count: u32,
    #[serde(default)]
    pub comments_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub profiles: Option<ProfileRow>,
}

impl PostRow {
    /// `None` when the author join came back empty.
    pub fn into_post(self) -> Option<Post> {
        let author = self.profiles?;
        Some(Post {
            id: self.id,
            author_id: self.user_id,
            content: self.content,
            kind: self.kind,
            is_paid: self.is_paid.unwrap_or(false),
            location: self.location,
            required_skills: self.skills_required.unwrap_or_default(),
            like_count: self.likes_count,
            comment_count: self.comments_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
            author: author.into(),
            viewer_has_liked: false,
        })
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct NewPostRow<'a> {
    pub user_id: &'a str,
    pub content: &'a str,
    #[serde(rename = "type")]
    pub kind: PostKind,
    pub is_paid: bool,
    pub location: Option<&'a str>,
    pub skills_required: &'a [String],
}

impl<'a> From<&'a NewPost> for NewPostRow<'a> {
    fn from(post: &'a NewPost) -> Self {
        NewPostRow {
            user_id: &post.author_id,
            content: &post.content,
            kind: post.kind,
            is_paid: post.is_paid,
            location: post.location.as_deref(),
            skills_required: &post.required_skills,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct LikeRow {
    pub post_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewProfileRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub role: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ProfilePatch<'a> {
    pub name: &'a str,
    pub bio: Option<&'a str>,
    pub location: Option<&'a str>,
    pub skills: &'a [String],
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a ProfileUpdate> for ProfilePatch<'a> {
    fn from(update: &'a ProfileUpdate) -> Self {
        ProfilePatch {
            name: &update.name,
            bio: update.bio.as_deref(),
            location: update.location.as_deref(),
            skills: update.skills.as_slice(),
            updated_at: Utc::now(),
        }
    }
}

/// Signup metadata stored on the auth user.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub(crate) struct UserMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

impl AuthUser {
    pub fn to_identity(&self) -> UserIdentity {
        let email = self.email.clone().unwrap_or_default();
        UserIdentity {
            id: self.id.clone(),
            display_name: self
                .user_metadata
                .name
                .clone()
                .unwrap_or_else(|| email.clone()),
            email,
            role: self.user_metadata.role.clone().unwrap_or_default(),
        }
    }
}

/// Token grant response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AuthSession {
    pub access_token: String,
    pub user: AuthUser,
}

/// Signup answers with a session when accounts are auto-confirmed, or with the bare
/// user when email confirmation is pending.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum SignupResponse {
    Session(AuthSession),
    User(AuthUser),
}

#[derive(Debug, Serialize)]
pub(crate) struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct SignupRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub data: UserMetadata,
}

/// Pull a human readable message out of an error body.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "msg", "error_description", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSTS: &str = r#"[
        {
            "id": "8d1c",
            "user_id": "u-1",
            "content": "Looking for an experienced Editor in Mumbai",
            "type": "job",
            "is_paid": true,
            "location": "Mumbai",
            "skills_required": ["Editing", "Color Grading"],
            "likes_count": 12,
            "comments_count": 5,
            "created_at": "2024-03-10T10:00:00+00:00",
            "updated_at": "2024-03-10T10:00:00+00:00",
            "profiles": {
                "id": "u-1",
                "name": "Priya Sharma",
                "role": "Producer",
                "bio": null,
                "location": "Mumbai",
                "skills": null,
                "avatar_url": null,
                "created_at": "2024-01-01T00:00:00+00:00",
                "updated_at": "2024-01-01T00:00:00+00:00"
            }
        },
        {
            "id": "9e2d",
            "user_id": "u-2",
            "content": "Orphaned",
            "type": "showcase",
            "is_paid": null,
            "location": null,
            "likes_count": 0,
            "comments_count": 0,
            "created_at": "2024-03-09T10:00:00Z",
            "updated_at": "2024-03-09T10:00:00Z",
            "profiles": null
        }
    ]"#;

    #[test]
    fn test_post_rows_decode() {
        let rows: Vec<PostRow> = serde_json::from_str(POSTS).unwrap();
        assert_eq!(rows.len(), 2);

        let mut rows = rows.into_iter();
        let post = rows.next().unwrap().into_post().unwrap();
        assert_eq!(post.kind, PostKind::Job);
        assert!(post.is_paid);
        assert_eq!(post.like_count, 12);
        assert_eq!(post.comment_count, 5);
        assert_eq!(post.required_skills, ["Editing", "Color Grading"]);
        assert_eq!(post.author.name, "Priya Sharma");
        assert!(post.author.skills.is_empty());
        assert!(!post.viewer_has_liked);

        assert!(rows.next().unwrap().into_post().is_none());
    }

    #[test]
    fn test_new_post_row_uses_column_names() {
        let post = NewPost {
            author_id: "u-1".to_string(),
            content: "Short film crew call".to_string(),
            kind: PostKind::Collaboration,
            is_paid: false,
            location: None,
            required_skills: vec!["Sound Design".to_string()],
        };
        let json = serde_json::to_value(NewPostRow::from(&post)).unwrap();
        assert_eq!(json["user_id"], "u-1");
        assert_eq!(json["type"], "collaboration");
        assert_eq!(json["skills_required"][0], "Sound Design");
        assert!(json["location"].is_null());
    }

    #[test]
    fn test_signup_response_variants() {
        let with_session = r#"{"access_token":"t","user":{"id":"u","email":"a@b.com","user_metadata":{"name":"A","role":"Actor"}}}"#;
        match serde_json::from_str::<SignupResponse>(with_session).unwrap() {
            SignupResponse::Session(session) => {
                assert_eq!(session.access_token, "t");
                let identity = session.user.to_identity();
                assert_eq!(identity.display_name, "A");
                assert_eq!(identity.role, "Actor");
            }
            SignupResponse::User(_) => panic!("expected a session"),
        }

        let bare = r#"{"id":"u","email":"a@b.com"}"#;
        match serde_json::from_str::<SignupResponse>(bare).unwrap() {
            SignupResponse::User(user) => assert_eq!(user.to_identity().display_name, "a@b.com"),
            SignupResponse::Session(_) => panic!("expected a bare user"),
        }
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(r#"{"code":"23505","message":"duplicate key value"}"#).as_deref(),
            Some("duplicate key value")
        );
        assert_eq!(
            error_message(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#)
                .as_deref(),
            Some("Invalid login credentials")
        );
        assert_eq!(error_message("<html>bad gateway</html>"), None);
    }
}
