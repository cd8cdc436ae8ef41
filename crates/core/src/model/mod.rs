//! The five component graphs and the document that owns them.
//!
//! Body and Head own the element tree and its text. Attributes, Scripts and
//! Styles hold anchor nodes that reuse the element's [`NodeId`], so any
//! cross-graph lookup is a plain id lookup.
//!
//! [`NodeId`]: crate::graph::NodeId

mod attributes;
mod document;
mod element;
mod resources;
mod stats;

pub use attributes::{AttributeMap, AttributesGraph};
pub use document::{Document, ElementInfo, GraphSource};
pub(crate) use document::{BODY_POSITION, HEAD_POSITION};
pub use element::{ElementGraph, Section};
pub use resources::{ResourceKind, ScriptsGraph, StylesGraph};
pub use stats::{AttributesStats, DocumentStats, ElementGraphStats, ScriptsStats, StylesStats};
