use serde::{Deserialize, Serialize};

/// A document as reported by the knowledge service.
///
/// `name` is the join key (equal to the object key); everything the service
/// adds beyond `id` and `name` is kept verbatim in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoteDocument {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RemoteDocument {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), extra: serde_json::Map::new() }
    }
}
