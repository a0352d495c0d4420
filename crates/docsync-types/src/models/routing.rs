use serde::{Deserialize, Serialize};

/// One prefix → collection rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteRule {
    pub prefix: String,
    pub collection_id: String,
}

impl RouteRule {
    pub fn new(prefix: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), collection_id: collection_id.into() }
    }
}

/// Ordered routing rules. Order is significant: the first matching prefix wins.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct RoutingTable {
    rules: Vec<RouteRule>,
}

impl RoutingTable {
    pub fn new(rules: Vec<RouteRule>) -> Self {
        Self { rules }
    }

    pub fn from_pairs<I, P, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: Into<String>,
        C: Into<String>,
    {
        Self { rules: pairs.into_iter().map(|(p, c)| RouteRule::new(p, c)).collect() }
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
