use serde::Serialize;

use crate::graph::NodeId;

/// Counts for a Body or Head graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementGraphStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub root_id: Option<NodeId>,
    pub element_nodes: usize,
    pub text_nodes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributesStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub root_id: Option<NodeId>,
    pub registered_elements: usize,
    pub total_attributes: usize,
    pub unique_tags: usize,
    pub unique_names: usize,
    pub unique_values: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptsStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub root_id: Option<NodeId>,
    pub total_scripts: usize,
    pub inline_scripts: usize,
    pub external_scripts: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StylesStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub root_id: Option<NodeId>,
    pub total_styles: usize,
    pub inline_styles: usize,
    pub external_styles: usize,
}

/// One record per component graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentStats {
    pub root_id: NodeId,
    pub body: ElementGraphStats,
    pub head: ElementGraphStats,
    pub attributes: AttributesStats,
    pub scripts: ScriptsStats,
    pub styles: StylesStats,
}
