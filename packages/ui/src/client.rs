//! Shared client constructor for all platforms.
//!
//! Builds the [`Client`] (session store plus feed and profile controllers) over the
//! gateway chosen at compile time:
//! - **`demo` feature**: a seeded [`store::MemoryGateway`]
//! - **otherwise**: [`api::SupabaseGateway`], configured from `redpuppet.toml`
//!   or the environment on native builds, and from build-time variables on WASM

use store::{FeedController, ProfileController, SessionStore};

#[cfg(feature = "demo")]
pub type AppGateway = store::MemoryGateway;
#[cfg(not(feature = "demo"))]
pub type AppGateway = api::SupabaseGateway;

/// Everything a view needs to talk to the backend. Clones share state.
#[derive(Clone, Debug)]
pub struct Client {
    pub session: SessionStore<AppGateway>,
    pub feed: FeedController<AppGateway>,
    pub profile: ProfileController<AppGateway>,
}

impl Client {
    pub fn new(gateway: AppGateway) -> Self {
        let session = SessionStore::new(gateway);
        Self {
            feed: FeedController::new(session.clone()),
            profile: ProfileController::new(session.clone()),
            session,
        }
    }

    /// End the session and drop everything loaded for the previous viewer.
    pub fn sign_out(&self) {
        self.session.logout();
        self.feed.clear();
        self.profile.clear();
    }
}

impl PartialEq for Client {
    fn eq(&self, other: &Self) -> bool {
        self.session.ptr_eq(&other.session)
    }
}

/// Create the platform-appropriate client, or say why the backend is unusable.
pub fn make_client() -> Result<Client, String> {
    make_gateway().map(Client::new)
}

#[cfg(feature = "demo")]
fn make_gateway() -> Result<AppGateway, String> {
    tracing::info!("Using the in-memory demo backend");
    Ok(store::MemoryGateway::with_demo_data())
}

#[cfg(not(feature = "demo"))]
fn make_gateway() -> Result<AppGateway, String> {
    let config = backend_config().map_err(|e| e.to_string())?;
    tracing::info!("Using backend at {}", config.url);
    api::SupabaseGateway::new(config).map_err(|e| e.to_string())
}

#[cfg(all(not(feature = "demo"), target_arch = "wasm32"))]
fn backend_config() -> Result<store::BackendConfig, api::ConfigError> {
    api::config::backend_from_build_env()
}

#[cfg(all(not(feature = "demo"), not(target_arch = "wasm32")))]
fn backend_config() -> Result<store::BackendConfig, api::ConfigError> {
    let path = store::ClientConfig::filename();
    match std::fs::read_to_string(path) {
        Ok(text) => match store::ClientConfig::from_toml(&text) {
            Ok(config) if config.backend.is_complete() => return Ok(config.backend),
            Ok(_) => tracing::debug!("{} has no complete [backend] section", path),
            Err(e) => tracing::warn!("Ignoring malformed {}: {}", path, e),
        },
        Err(e) => tracing::debug!("No {}: {}", path, e),
    }
    api::config::backend_from_env()
}
