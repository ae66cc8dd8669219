//! This crate contains all shared UI for the workspace.

mod client;
pub use client::{make_client, AppGateway, Client};

mod auth;
pub use auth::{sign_in, sign_up, use_auth, use_client, AuthState, ClientProvider, LogoutButton};

mod navbar;
pub use navbar::Navbar;

mod loading_screen;
pub use loading_screen::LoadingScreen;

mod error_banner;
pub use error_banner::ErrorBanner;

mod skill_tags;
pub use skill_tags::SkillTags;

mod post_card;
pub use post_card::PostCard;

pub mod views;
