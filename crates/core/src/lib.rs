//! Multi-graph model of an HTML document.
//!
//! An HTML string is split into five graphs that share node ids: the body
//! tree, the head tree, a tag/attribute index, inline scripts and styles.
//! The [`Document`] can be written back as HTML or extracted into a flat
//! styled node/edge list and emitted as DOT, vis.js, D3, Cytoscape, Mermaid
//! or a text/JSON tree.
//!
//! ```no_run
//! use htmlgraph_core::{service, RenderConfig};
//!
//! let doc = service::from_html("<div><p>Hi</p></div>").unwrap();
//! let export = service::to_dot(&doc, &RenderConfig::default(), None).unwrap();
//! println!("{}", export.dot);
//! ```

pub mod dom;
pub mod error;
pub mod export;
pub mod extract;
pub mod graph;
pub mod html;
pub mod ingest;
pub mod model;
pub mod render;
pub mod service;
pub mod transform;

pub use error::{ConfigError, GraphError, HtmlGraphError, ParseError, Result, TransformError};
pub use extract::{Extraction, Extractor, GraphSelection};
pub use graph::{IdGenerator, NodeId, NodePath, Predicate};
pub use model::Document;
pub use render::{ColorScheme, Preset, RenderConfig};

/// Parse an HTML string into a [`Document`].
/// This is the primary entry point for htmlgraph-core.
pub fn parse(html: &str) -> std::result::Result<Document, ParseError> {
    ingest::from_html(html)
}
