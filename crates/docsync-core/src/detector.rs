//! Change detection by store fingerprint.
//!
//! The store's ETag changes on every content mutation, so comparing it with
//! the persisted fingerprint decides skip vs. process without downloading.
//! Sizes and timestamps are deliberately ignored.

use docsync_types::SyncState;

/// True iff `state` holds `key` with exactly `fingerprint` (byte-for-byte).
pub fn is_unchanged(key: &str, fingerprint: &str, state: &SyncState) -> bool {
    state.fingerprint_of(key) == Some(fingerprint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsync_types::SyncEntry;

    fn state_with(key: &str, fingerprint: &str) -> SyncState {
        let mut state = SyncState::new();
        state.record(key, SyncEntry::new(fingerprint, "D"));
        state
    }

    #[test]
    fn test_same_fingerprint_is_unchanged() {
        let state = state_with("infra/setup.md", "abc123");
        assert!(is_unchanged("infra/setup.md", "abc123", &state));
    }

    #[test]
    fn test_new_key_is_changed() {
        let state = state_with("infra/setup.md", "abc123");
        assert!(!is_unchanged("infra/other.md", "abc123", &state));
        assert!(!is_unchanged("infra/setup.md", "abc123", &SyncState::new()));
    }

    #[test]
    fn test_no_normalization() {
        let state = state_with("a.md", "ABC123");
        assert!(!is_unchanged("a.md", "abc123", &state));
        assert!(!is_unchanged("a.md", "\"ABC123\"", &state));
        assert!(!is_unchanged("a.md", "ABC123 ", &state));
    }
}
