//! Error types for Paramgraph Core

use crate::kind::CoreKind;
use crate::name::InvalidName;
use thiserror::Error;

/// Result type alias using Paramgraph's Error
pub type Result<T> = std::result::Result<T, Error>;

/// A value rejected by a parameter type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValueError {
    #[error("parameter \"{parameter}\" expects a {expected} value, got {found}")]
    WrongKind {
        parameter: String,
        expected: CoreKind,
        found: CoreKind,
    },

    #[error("value {value} for parameter \"{parameter}\" is outside [{min}, {max}]")]
    OutOfRange {
        parameter: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Paramgraph error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid name: {0}")]
    InvalidName(#[from] InvalidName),

    #[error("Invalid value: {0}")]
    Value(#[from] ValueError),

    #[error("Unknown parameter \"{parameter}\" on node type \"{node_type}\"")]
    UnknownParameter { node_type: String, parameter: String },

    #[error("Network \"{network}\" already has a child named \"{name}\"")]
    DuplicateName { network: String, name: String },

    #[error("Invalid range for parameter \"{parameter}\": {reason}")]
    InvalidRange { parameter: String, reason: String },

    #[error("Parameter \"{parameter}\" holds a {found} value, not {expected}")]
    TypeMismatch {
        parameter: String,
        expected: CoreKind,
        found: CoreKind,
    },

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Node \"{node}\" already belongs to network \"{network}\"")]
    NodeAttached { node: String, network: String },
}
