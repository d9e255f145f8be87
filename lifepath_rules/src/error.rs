//! Error types for graph construction and lookup.

use thiserror::Error;

use crate::NodeId;

/// Result type alias using the crate's `GraphError`.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Malformed input found while loading records or building the graph.
#[derive(Error, Debug)]
pub enum DataError {
    /// Two records declare the same node id.
    #[error("duplicate node id '{0}'")]
    DuplicateId(NodeId),

    /// A record lacks one of the required fields.
    #[error("record #{index} is missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },

    /// JSON data group could not be parsed.
    #[error("invalid JSON node data: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML data group or config could not be parsed.
    #[error("invalid TOML data: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Errors surfaced by the choice graph.
#[derive(Error, Debug)]
pub enum GraphError {
    /// Construction aborted on bad input.
    #[error(transparent)]
    Data(#[from] DataError),

    /// Lookup of an id with no node behind it. Under correct data this only
    /// happens for a dangling successor reference, so callers should treat it
    /// as fatal.
    #[error("node '{0}' not found in choice graph")]
    NodeNotFound(NodeId),
}

impl GraphError {
    /// Whether this error came from malformed input data.
    pub fn is_data_error(&self) -> bool {
        matches!(self, GraphError::Data(_))
    }
}
