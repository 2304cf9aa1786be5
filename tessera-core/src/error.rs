//! Error types shared by every component of the core.

use thiserror::Error;

use crate::graph::{EdgeId, NodeId};

/// Which end of an edge a record or operation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// The edge's `node1` endpoint.
    First,
    /// The edge's `node2` endpoint.
    Second,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::First => f.write_str("node1"),
            Endpoint::Second => f.write_str("node2"),
        }
    }
}

/// Errors surfaced to callers of the graph core.
///
/// Bookkeeping drift between the side maps is not an error: it is logged
/// and the operation carries on.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("unknown node `{0}`")]
    UnknownNode(NodeId),

    #[error("unknown edge `{0}`")]
    UnknownEdge(EdgeId),

    #[error("record for edge `{edge}` does not name its {endpoint}")]
    MissingEndpoint { edge: EdgeId, endpoint: Endpoint },

    #[error("node `{0}` already exists")]
    DuplicateNode(NodeId),

    #[error("edge `{0}` already exists")]
    DuplicateEdge(EdgeId),

    #[error("could not decode input: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        GraphError::Decode(err.to_string())
    }
}

impl From<rmp_serde::decode::Error> for GraphError {
    fn from(err: rmp_serde::decode::Error) -> Self {
        GraphError::Decode(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GraphError>;
