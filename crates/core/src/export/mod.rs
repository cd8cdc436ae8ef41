//! Emitters from an [`Extraction`](crate::extract::Extraction) into the
//! supported visualization formats.
//!
//! Every emitter is a pure function of its input.

pub mod cytoscape;
pub mod d3;
pub mod dot;
pub mod mermaid;
pub mod tree;
pub mod visjs;

pub use cytoscape::CytoscapeGraph;
pub use d3::D3Graph;
pub use dot::DotBuilder;
pub use tree::TreeNode;
pub use visjs::VisJsGraph;
