//! Backend factory for creating backend instances from configuration.

use anyhow::{anyhow, Context, Result};
use std::sync::Arc;
use std::time::Duration;

use super::{
    http::HttpBackend,
    memory::{Dataset, MemoryBackend},
    Backend,
};
use crate::config::ApiConfig;

/// Create the backend selected by `api.backend`.
///
/// # Errors
/// Returns error if:
/// - Backend type is unknown
/// - The memory dataset cannot be read or parsed
/// - The HTTP client cannot be built
pub fn create_backend(config: &ApiConfig) -> Result<Arc<dyn Backend>> {
    match config.backend.as_str() {
        "http" => {
            let token = std::env::var(&config.token_env).ok().filter(|t| !t.is_empty());
            if token.is_none() {
                log::info!("{} not set, talking to {} without a token", config.token_env, config.base_url);
            }
            let timeout = (config.request_timeout_secs > 0).then(|| Duration::from_secs(config.request_timeout_secs));
            let backend = HttpBackend::new(config.base_url.clone(), token, timeout).context("Failed to create HTTP backend")?;
            Ok(Arc::new(backend))
        }
        "memory" => {
            let dataset = match &config.dataset {
                Some(path) => Dataset::load_from_file(path)?,
                None => Dataset::sample(),
            };
            Ok(Arc::new(MemoryBackend::new(dataset)))
        }
        other => Err(anyhow!("Unknown backend type: {}", other)),
    }
}
