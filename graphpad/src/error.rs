use crate::model::NodeId;
use thiserror::Error;

/// Why a document could not be loaded. The store is untouched in every case.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("malformed document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("edge references unknown node id {id}")]
    DanglingReference { id: NodeId },
    #[error("node id {id} appears more than once")]
    DuplicateNode { id: NodeId },
    #[error("edge connects node {id} to itself")]
    SelfLoop { id: NodeId },
    #[error("{what} exceeds the cap of {cap}")]
    CapsExceeded { what: &'static str, cap: usize },
    #[error("node {id} has a non-finite coordinate")]
    OutOfBounds { id: NodeId },
}

impl LoadError {
    /// Stable machine-readable code, shared with the wasm error objects.
    pub fn code(&self) -> &'static str {
        match self {
            LoadError::Parse(_) => "json_parse",
            LoadError::DanglingReference { .. } => "dangling_reference",
            LoadError::DuplicateNode { .. } => "duplicate_id",
            LoadError::SelfLoop { .. } => "invalid_structure",
            LoadError::CapsExceeded { .. } => "caps_exceeded",
            LoadError::OutOfBounds { .. } => "out_of_bounds",
        }
    }

    /// The node id the failure is about, when there is one.
    pub fn node_id(&self) -> Option<NodeId> {
        match self {
            LoadError::DanglingReference { id }
            | LoadError::DuplicateNode { id }
            | LoadError::SelfLoop { id }
            | LoadError::OutOfBounds { id } => Some(*id),
            LoadError::Parse(_) | LoadError::CapsExceeded { .. } => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("connect and edit affordances cannot share the {key} modifier")]
    SharedModifier { key: &'static str },
    #[error("{param} must be a finite, non-negative distance (got {got})")]
    InvalidDistance { param: &'static str, got: f64 },
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Parse(_) => "json_parse",
            ConfigError::SharedModifier { .. } => "invalid_mode",
            ConfigError::InvalidDistance { .. } => "out_of_range",
        }
    }
}
