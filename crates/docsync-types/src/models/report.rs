use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome counters of one reconciliation pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncReport {
    /// Objects created or updated in their collection (`created + updated`)
    pub synced: usize,
    /// Objects whose fingerprint matched the persisted state
    pub skipped: usize,
    /// Routing misses, download/decode failures and rejected writes
    pub failed: usize,
    pub created: usize,
    pub updated: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Whether the state blob was written at the end of the pass
    pub state_saved: bool,
}

impl SyncReport {
    pub fn begin() -> Self {
        let now = Utc::now();
        Self {
            synced: 0,
            skipped: 0,
            failed: 0,
            created: 0,
            updated: 0,
            started_at: now,
            finished_at: now,
            state_saved: false,
        }
    }

    pub fn total(&self) -> usize {
        self.synced + self.skipped + self.failed
    }
}

/// Dry-run classification of one candidate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlanAction {
    Skip,
    Sync,
}

impl std::fmt::Display for PlanAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skip => f.write_str("SKIP"),
            Self::Sync => f.write_str("SYNC"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanEntry {
    pub key: String,
    pub action: PlanAction,
    /// Routed collection, `None` on a routing miss
    pub collection_id: Option<String>,
}
