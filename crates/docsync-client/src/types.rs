use docsync_types::KnowledgeConfig;

/// Configuration for retry behavior on transient errors.
#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    /// Maximum number of retry attempts.
    pub max_retries: u32,
    /// Initial delay between retries in milliseconds.
    pub base_delay_ms: u64,
    /// Maximum delay between retries in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self { max_retries: 3, base_delay_ms: 500, max_delay_ms: 30_000 }
    }
}

/// Configuration for the knowledge client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL including version segment, e.g. `https://dify.example.com/v1`.
    pub base_url: String,
    /// Dataset API key, sent as a bearer token.
    pub api_key: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Documents per listing page.
    pub page_size: u32,
    /// Indexing technique requested when creating documents.
    pub indexing_technique: String,
    /// Retry configuration for transient errors.
    pub retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1/v1".to_string(),
            api_key: String::new(),
            timeout_secs: 60,
            page_size: 100,
            indexing_technique: "high_quality".to_string(),
            retry: RetryConfig::default(),
        }
    }
}

impl From<&KnowledgeConfig> for ClientConfig {
    fn from(cfg: &KnowledgeConfig) -> Self {
        Self {
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
            timeout_secs: cfg.timeout_secs,
            page_size: cfg.page_size.max(1),
            indexing_technique: cfg.indexing_technique.clone(),
            retry: RetryConfig {
                max_retries: cfg.max_retries,
                base_delay_ms: cfg.base_delay_ms,
                max_delay_ms: cfg.max_delay_ms,
            },
        }
    }
}
