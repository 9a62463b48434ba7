use serde::{Deserialize, Serialize};

/// Reachability as probed by the backend. Never set by this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectionStatus {
    Reachable,
    Unreachable,
}

/// List envelope returned by the collection endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paged<T> {
    pub content: Vec<T>,
}
