//! Error types shared by every stage of the pipeline.

use thiserror::Error;

use crate::graph::{EdgeId, NodeId};

/// The HTML input could not be turned into a parse tree.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read HTML input: {0}")]
    Read(#[from] std::io::Error),

    #[error("expected an HTML dict object, found {0}")]
    NotAnObject(&'static str),
}

/// An engine invariant was violated. These are programming mistakes, never
/// the result of odd HTML.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("node {0} does not exist")]
    MissingNode(NodeId),

    #[error("edge {0} does not exist")]
    MissingEdge(EdgeId),

    #[error("invalid node path: {0:?}")]
    InvalidPath(String),

    #[error("position {position} already used under parent {parent}")]
    DuplicatePosition { parent: NodeId, position: usize },
}

/// A render option named something the renderer does not know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown preset: {0:?}")]
    UnknownPreset(String),

    #[error("unknown color scheme: {0:?}")]
    UnknownColorScheme(String),

    #[error("unknown export format: {0:?}")]
    UnknownFormat(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("unknown transformation: {0:?}")]
    Unknown(String),
}

/// Umbrella error returned by the service layer.
#[derive(Debug, Error)]
pub enum HtmlGraphError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error("failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HtmlGraphError>;
