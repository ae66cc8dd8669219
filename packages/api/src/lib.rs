//! # API crate: remote data gateway for RedPuppet
//!
//! Implements [`store::Gateway`] against the hosted backend (Supabase auth plus its
//! PostgREST tables) so the session, feed and profile controllers in `store` can run
//! against real data.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`SupabaseGateway`]: request building, auth token handling, error mapping |
//! | [`config`] | Backend URL and anon key from runtime or build-time environment |
//! | `rows` | Wire representations of `posts`, `profiles`, `likes` and auth payloads |

pub mod client;
pub mod config;
mod rows;

pub use client::SupabaseGateway;
pub use config::ConfigError;
