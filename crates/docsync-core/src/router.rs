//! Prefix routing of object keys to collections.

use docsync_types::RoutingTable;

/// Maps an object key to the collection of the first rule whose prefix it starts with.
///
/// Matching is case-sensitive and order-sensitive: a more specific prefix only
/// overrides a broader one when it is listed earlier.
#[derive(Debug, Clone)]
pub struct Router {
    table: RoutingTable,
}

impl Router {
    pub fn new(table: RoutingTable) -> Self {
        Self { table }
    }

    /// `None` is a routing miss, not an error.
    pub fn route(&self, key: &str) -> Option<&str> {
        self.table
            .rules()
            .iter()
            .find(|rule| key.starts_with(rule.prefix.as_str()))
            .map(|rule| rule.collection_id.as_str())
    }
}
