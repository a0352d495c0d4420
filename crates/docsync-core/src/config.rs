//! Configuration loading: defaults → JSON file → environment, then validation.
//!
//! CLI flags are applied by the binary on top of [`load_config`]'s result,
//! before [`validate`] runs.

use docsync_types::{AppConfig, ConfigError, RouteRule, RoutingTable};
use std::fs;
use std::path::Path;

pub const ENV_MINIO_ENDPOINT: &str = "MINIO_ENDPOINT";
pub const ENV_MINIO_ACCESS_KEY: &str = "MINIO_ACCESS_KEY";
pub const ENV_MINIO_SECRET_KEY: &str = "MINIO_SECRET_KEY";
pub const ENV_MINIO_BUCKET: &str = "MINIO_BUCKET";
pub const ENV_DIFY_API_BASE: &str = "DIFY_API_BASE";
pub const ENV_DIFY_API_KEY: &str = "DIFY_API_KEY";
pub const ENV_ROUTES: &str = "DOCSYNC_ROUTES";
pub const ENV_STATE_KEY: &str = "DOCSYNC_STATE_KEY";

/// Load configuration from an optional JSON file and the process environment.
///
/// A missing `path` means defaults only; a path that cannot be read is an error.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let config = match path {
        Some(path) => read_file(path)?,
        None => AppConfig::new(),
    };
    apply_env(config, |name| std::env::var(name).ok())
}

fn read_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::NotReadable {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let config = serde_json::from_str(&content).map_err(|e| ConfigError::from_json_error(&e))?;
    tracing::debug!("Loaded config file {}", path.display());
    Ok(config)
}

/// Overlay environment variables onto `config`. Empty values are ignored.
pub fn apply_env<F>(mut config: AppConfig, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(v) = var(ENV_MINIO_ENDPOINT) {
        config.store.endpoint = v;
    }
    if let Some(v) = var(ENV_MINIO_ACCESS_KEY) {
        config.store.access_key = v;
    }
    if let Some(v) = var(ENV_MINIO_SECRET_KEY) {
        config.store.secret_key = v;
    }
    if let Some(v) = var(ENV_MINIO_BUCKET) {
        config.store.bucket = v;
    }
    if let Some(v) = var(ENV_STATE_KEY) {
        config.store.state_key = v;
    }
    if let Some(v) = var(ENV_DIFY_API_BASE) {
        config.knowledge.base_url = v.trim_end_matches('/').to_string();
    }
    if let Some(v) = var(ENV_DIFY_API_KEY) {
        config.knowledge.api_key = v;
    }
    if let Some(v) = var(ENV_ROUTES) {
        config.routes = parse_routes(&v)?;
    }

    Ok(config)
}

/// Parse `prefix=collection,prefix=collection`, keeping the given order.
pub fn parse_routes(raw: &str) -> Result<RoutingTable, ConfigError> {
    let mut rules = Vec::new();
    for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (prefix, collection_id) = pair.split_once('=').ok_or_else(|| {
            ConfigError::invalid(ENV_ROUTES, format!("expected prefix=collection, got '{pair}'"))
        })?;
        rules.push(RouteRule::new(prefix.trim(), collection_id.trim()));
    }
    Ok(RoutingTable::new(rules))
}

/// Startup checks. Credentials are reported before any other problem.
pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.store.access_key.is_empty() {
        return Err(ConfigError::missing(ENV_MINIO_ACCESS_KEY));
    }
    if config.store.secret_key.is_empty() {
        return Err(ConfigError::missing(ENV_MINIO_SECRET_KEY));
    }
    if config.knowledge.api_key.is_empty() {
        return Err(ConfigError::missing(ENV_DIFY_API_KEY));
    }

    if config.store.bucket.is_empty() {
        return Err(ConfigError::invalid("store.bucket", "must not be empty"));
    }
    if config.store.state_key.is_empty() {
        return Err(ConfigError::invalid("store.state_key", "must not be empty"));
    }
    if config.routes.is_empty() {
        return Err(ConfigError::invalid("routes", "at least one route is required"));
    }
    for (i, rule) in config.routes.rules().iter().enumerate() {
        if rule.prefix.is_empty() {
            return Err(ConfigError::invalid(format!("routes[{i}].prefix"), "must not be empty"));
        }
        if rule.collection_id.is_empty() {
            return Err(ConfigError::invalid(
                format!("routes[{i}].collection_id"),
                "must not be empty",
            ));
        }
    }
    if config.interval_secs < 1 {
        return Err(ConfigError::invalid("interval_secs", "must be at least 1"));
    }
    if config.knowledge.page_size < 1 {
        return Err(ConfigError::invalid("knowledge.page_size", "must be at least 1"));
    }

    Ok(())
}
