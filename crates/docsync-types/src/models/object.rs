use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One object as enumerated from the store during a pass.
///
/// Never persisted; only its fingerprint ends up in [`crate::SyncState`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObjectRecord {
    /// Full object key (path within the bucket)
    pub key: String,
    /// Store-provided content fingerprint (ETag without quotes)
    pub fingerprint: String,
    /// Size in bytes
    pub size: u64,
    pub last_modified: DateTime<Utc>,
}

impl ObjectRecord {
    pub fn new(key: impl Into<String>, fingerprint: impl Into<String>, size: u64) -> Self {
        Self { key: key.into(), fingerprint: fingerprint.into(), size, last_modified: Utc::now() }
    }

    /// Lowercased extension including the dot, e.g. `.md`.
    ///
    /// Only the final path segment is considered, so `docs.v2/README` has no extension.
    pub fn extension(&self) -> Option<String> {
        let file_name = self.key.rsplit('/').next().unwrap_or(&self.key);
        let dot = file_name.rfind('.')?;
        if dot == 0 {
            return None;
        }
        file_name.get(dot..).map(str::to_ascii_lowercase)
    }
}
