//! Application configuration.
//!
//! Built once at startup (defaults → JSON file → environment → CLI flags),
//! validated, and then shared read-only with the engine.

use serde::{Deserialize, Serialize};

use super::routing::RoutingTable;

pub const DEFAULT_BUCKET: &str = "jarvis-docrepo";
pub const DEFAULT_STATE_KEY: &str = ".docsync-manifest.json";
pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_INTERVAL_SECS: u64 = 300;
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Suffixes eligible for sync, compared case-insensitively.
pub const DEFAULT_EXTENSIONS: &[&str] =
    &[".md", ".txt", ".pdf", ".docx", ".html", ".json", ".yaml", ".yml"];

/// S3-compatible object store connection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StoreConfig {
    /// Endpoint URL, e.g. `http://minio.local:9000`
    pub endpoint: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
    /// Reserved key of the persisted sync state inside `bucket`
    pub state_key: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:9000".to_string(),
            region: DEFAULT_REGION.to_string(),
            access_key: String::new(),
            secret_key: String::new(),
            bucket: DEFAULT_BUCKET.to_string(),
            state_key: DEFAULT_STATE_KEY.to_string(),
            timeout_secs: 60,
        }
    }
}

/// Knowledge service (document sink) connection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KnowledgeConfig {
    /// API base, e.g. `https://dify.example.com/v1`
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
    /// Documents requested per listing page
    pub page_size: u32,
    /// Indexing technique sent on create (`high_quality` or `economy`)
    pub indexing_technique: String,
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1/v1".to_string(),
            api_key: String::new(),
            timeout_secs: 60,
            page_size: DEFAULT_PAGE_SIZE,
            indexing_technique: "high_quality".to_string(),
            max_retries: 3,
            base_delay_ms: 500,
            max_delay_ms: 30_000,
        }
    }
}

/// Full application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub knowledge: KnowledgeConfig,
    /// Ordered prefix → collection rules
    pub routes: RoutingTable,
    /// Supported suffixes (with leading dot)
    pub extensions: Vec<String>,
    /// Seconds between passes in daemon mode
    pub interval_secs: u64,
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            store: StoreConfig::default(),
            knowledge: KnowledgeConfig::default(),
            routes: RoutingTable::default(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
            interval_secs: DEFAULT_INTERVAL_SECS,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}
