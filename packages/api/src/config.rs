//! Backend configuration from environment variables.

use store::BackendConfig;
use thiserror::Error;

pub const URL_VAR: &str = "SUPABASE_URL";
pub const ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),
}

/// Read the backend location at runtime, loading `.env` first if present.
#[cfg(not(target_arch = "wasm32"))]
pub fn backend_from_env() -> Result<BackendConfig, ConfigError> {
    dotenvy::dotenv().ok();
    backend_from_lookup(|name| std::env::var(name).ok())
}

/// Read the backend location baked in at compile time (the only option on WASM).
pub fn backend_from_build_env() -> Result<BackendConfig, ConfigError> {
    backend_from_lookup(|name| match name {
        URL_VAR => option_env!("SUPABASE_URL").map(str::to_string),
        ANON_KEY_VAR => option_env!("SUPABASE_ANON_KEY").map(str::to_string),
        _ => None,
    })
}

fn backend_from_lookup(
    lookup: impl Fn(&'static str) -> Option<String>,
) -> Result<BackendConfig, ConfigError> {
    let required = |name: &'static str| {
        lookup(name)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing(name))
    };
    let url = required(URL_VAR)?;
    let anon_key = required(ANON_KEY_VAR)?;
    Ok(BackendConfig::new(url.trim(), anon_key.trim()))
}
