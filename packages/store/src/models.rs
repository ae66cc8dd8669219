//! # Domain models for identities, profiles and feed posts
//!
//! These are the types the controllers hold in memory and the gateways hand back.
//! They are `Serialize + Deserialize` so a gateway can decode them straight from a
//! backend payload or keep them in memory as-is.
//!
//! ## Types
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`UserIdentity`] | The minimal account record held by the session once signed in. |
//! | [`Profile`] | The public record for an identity: role, bio, location, skills, avatar. |
//! | [`Post`] | A feed entry with its denormalized author and the per-viewer `viewer_has_liked` flag. |
//! | [`PostKind`] | One of `job`, `collaboration`, `showcase`. |
//! | [`NewPost`] | The write payload for inserting a post. |
//! | [`ProfileUpdate`] | The editable subset of a profile sent on save. |
//! | [`Registration`] | Everything needed to create an account and its profile. |
//! | [`SkillSet`] | Order-preserving, duplicate-free list of skill tags. |
//!
//! [`ROLES`] is the catalog of primary roles offered at signup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Primary roles a member can pick when signing up.
pub const ROLES: [&str; 14] = [
    "Actor",
    "Director",
    "Editor",
    "Musician",
    "Producer",
    "Cinematographer",
    "Writer",
    "Sound Designer",
    "Production Designer",
    "Costume Designer",
    "Makeup Artist",
    "Visual Effects Artist",
    "Stunt Coordinator",
    "Casting Director",
];

/// An authenticated user's account record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub role: String,
}

/// Public profile attached to an identity (same id).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub role: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub skills: SkillSet,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    #[default]
    Job,
    Collaboration,
    Showcase,
}

impl PostKind {
    pub const ALL: [PostKind; 3] = [PostKind::Job, PostKind::Collaboration, PostKind::Showcase];

    /// Badge text shown on a post card.
    pub fn label(self) -> &'static str {
        match self {
            PostKind::Job => "Job Opportunity",
            PostKind::Collaboration => "Collaboration",
            PostKind::Showcase => "Showcase",
        }
    }

    /// Wire name, as stored by the backend.
    pub fn as_str(self) -> &'static str {
        match self {
            PostKind::Job => "job",
            PostKind::Collaboration => "collaboration",
            PostKind::Showcase => "showcase",
        }
    }
}

/// A feed entry as seen by one viewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub author_id: String,
    pub content: String,
    pub kind: PostKind,
    pub is_paid: bool,
    pub location: Option<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    pub like_count: u32,
    pub comment_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Denormalized join of the author's profile.
    pub author: Profile,
    /// Derived from the like relation for the requesting viewer; never persisted.
    #[serde(default)]
    pub viewer_has_liked: bool,
}

/// Payload for inserting a post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub author_id: String,
    pub content: String,
    pub kind: PostKind,
    pub is_paid: bool,
    pub location: Option<String>,
    pub required_skills: Vec<String>,
}

/// Fields a profile owner may change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub skills: SkillSet,
}

/// Signup form contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Skill tags in insertion order, without duplicates.
///
/// Tags are trimmed on the way in and blank input is ignored, including when decoded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SkillSet(Vec<String>);

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `skill` unless it is blank or already present. Returns whether the set changed.
    pub fn add(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() || self.contains(skill) {
            return false;
        }
        self.0.push(skill.to_string());
        true
    }

    /// Removes `skill` if present. Returns whether the set changed.
    pub fn remove(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        let before = self.0.len();
        self.0.retain(|s| s != skill);
        self.0.len() != before
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.0.iter().any(|s| s == skill.trim())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    /// Parse a comma separated list as typed into a form field.
    pub fn from_csv(input: &str) -> Self {
        input.split(',').collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for skill in iter {
            set.add(skill.as_ref());
        }
        set
    }
}

impl From<Vec<String>> for SkillSet {
    fn from(skills: Vec<String>) -> Self {
        skills.into_iter().collect()
    }
}

impl From<SkillSet> for Vec<String> {
    fn from(skills: SkillSet) -> Self {
        skills.0
    }
}

/// Collapse a free-text optional field: blank becomes `None`.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
