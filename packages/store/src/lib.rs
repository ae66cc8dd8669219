pub mod config;
pub mod error;
pub mod feed;
pub mod format;
pub mod gateway;
pub mod models;
pub mod profile;
pub mod session;

mod memory;
#[cfg(test)]
mod testing;
pub use memory::MemoryGateway;

pub use config::{BackendConfig, ClientConfig};
pub use error::{ClientError, GatewayError};
pub use feed::{FeedController, FeedState, LoadStatus, PostDraft};
pub use gateway::Gateway;
pub use models::{
    NewPost, Post, PostKind, Profile, ProfileUpdate, Registration, SkillSet, UserIdentity, ROLES,
};
pub use profile::{ProfileController, ProfileDraft, ProfileMode, ProfileState};
pub use session::{SessionState, SessionStore};
