//! Candidate selection for a pass.

use docsync_types::ObjectRecord;
use std::collections::HashSet;

/// Decides which listed objects take part in reconciliation.
///
/// Excluded: the state blob itself, directory markers (`…/` and `…/.keep`)
/// and any key whose extension is not in the supported set.
#[derive(Debug, Clone)]
pub struct CandidateFilter {
    state_key: String,
    extensions: HashSet<String>,
}

impl CandidateFilter {
    pub fn new<I, S>(state_key: impl Into<String>, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions.into_iter().map(|e| normalize_extension(e.as_ref())).collect();
        Self { state_key: state_key.into(), extensions }
    }

    pub fn is_candidate(&self, object: &ObjectRecord) -> bool {
        let key = object.key.as_str();
        if key == self.state_key || key.ends_with('/') || key.ends_with("/.keep") {
            return false;
        }
        object.extension().is_some_and(|ext| self.extensions.contains(&ext))
    }
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_ascii_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}
