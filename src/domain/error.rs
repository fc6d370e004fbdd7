//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent business logic violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid prompt mode: {0} (expected 'question' or 'code')")]
    InvalidMode(String),

    #[error("no answer received in model response")]
    NoAnswer,

    #[error("invalid model response envelope: {0}")]
    InvalidEnvelope(String),
}

/// Why a fenced JSON block could not be decoded into a recursion tree.
///
/// `path` values use a JSON-pointer-like notation (`$`, `$.children[1]`, ...)
/// so the offending node can be located in the model output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("malformed JSON: {0}")]
    Syntax(String),

    #[error("invalid tree shape at {path}: {reason}")]
    Shape { path: String, reason: String },

    #[error("tree exceeds maximum depth of {limit}")]
    TooDeep { limit: usize },

    #[error("tree exceeds maximum of {limit} nodes")]
    TooManyNodes { limit: usize },
}
