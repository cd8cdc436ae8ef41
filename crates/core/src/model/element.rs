use std::collections::HashSet;

use serde::Serialize;

use super::stats::ElementGraphStats;
use crate::error::GraphError;
use crate::graph::{EdgeId, IdGenerator, MGraph, NodeId, NodePath, NodePathKind, Predicate};

/// Which half of the document an [`ElementGraph`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Body,
    Head,
}

/// Element tree of either `<body>` or `<head>`.
///
/// Children hang off `child` edges, text off `text` edges; both carry the
/// sibling position as their edge path and share one position space per parent.
#[derive(Debug)]
pub struct ElementGraph {
    section: Section,
    graph: MGraph,
    root: Option<NodeId>,
    positions: HashSet<(NodeId, usize)>,
}

impl ElementGraph {
    pub fn new(section: Section, ids: IdGenerator) -> Self {
        Self {
            section,
            graph: MGraph::new(ids),
            root: None,
            positions: HashSet::new(),
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn graph(&self) -> &MGraph {
        &self.graph
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn create_element(&mut self, path: NodePath, id: Option<NodeId>) -> NodeId {
        self.graph.add_node(id, path)
    }

    /// Structural `element:<id>` node re-referencing an element owned by
    /// another graph, so edges can start from it here.
    pub fn create_anchor(&mut self, id: NodeId) -> NodeId {
        self.graph.add_node(Some(id), NodePath::element_anchor(id))
    }

    pub fn set_root(&mut self, id: NodeId) -> Result<(), GraphError> {
        if !self.graph.contains(id) {
            return Err(GraphError::MissingNode(id));
        }
        self.root = Some(id);
        Ok(())
    }

    pub fn create_text(
        &mut self,
        text: &str,
        parent: NodeId,
        position: usize,
    ) -> Result<NodeId, GraphError> {
        self.claim_position(parent, position)?;
        let id = self
            .graph
            .add_value_node(text, Some(NodePath::text()), None);
        self.graph
            .add_edge(parent, id, Some(Predicate::Text), Some(position.to_string()))?;
        Ok(id)
    }

    pub fn add_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
        position: usize,
    ) -> Result<EdgeId, GraphError> {
        if !self.graph.contains(child) {
            return Err(GraphError::MissingNode(child));
        }
        self.claim_position(parent, position)?;
        self.graph
            .add_edge(parent, child, Some(Predicate::Child), Some(position.to_string()))
    }

    fn claim_position(&mut self, parent: NodeId, position: usize) -> Result<(), GraphError> {
        if !self.graph.contains(parent) {
            return Err(GraphError::MissingNode(parent));
        }
        if !self.positions.insert((parent, position)) {
            return Err(GraphError::DuplicatePosition { parent, position });
        }
        Ok(())
    }

    /// Element children in sibling order; text excluded.
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.targets(id, &[Predicate::Child])
    }

    /// Text children in sibling order.
    pub fn text_nodes(&self, id: NodeId) -> Vec<NodeId> {
        self.targets(id, &[Predicate::Text])
    }

    /// Elements and text merged in sibling order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.targets(id, &[Predicate::Child, Predicate::Text])
    }

    fn targets(&self, id: NodeId, predicates: &[Predicate]) -> Vec<NodeId> {
        self.graph
            .ordered_edges(id, predicates)
            .into_iter()
            .map(|e| e.target)
            .collect()
    }

    /// Concatenated direct text, no separator, no trimming.
    pub fn text_content(&self, id: NodeId) -> String {
        self.text_nodes(id)
            .into_iter()
            .filter_map(|t| self.graph.node_value(t))
            .collect()
    }

    /// All descendant text in document order.
    pub fn all_text_recursive(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        for child in self.children(id) {
            if self.is_text_node(child) {
                if let Some(value) = self.graph.node_value(child) {
                    out.push_str(value);
                }
            } else {
                self.collect_text(child, out);
            }
        }
    }

    pub fn is_text_node(&self, id: NodeId) -> bool {
        self.graph.node_path(id).is_some_and(|p| p.is_text())
    }

    /// Any node with a non-text path. Anchors count as elements here.
    pub fn is_element_node(&self, id: NodeId) -> bool {
        self.graph.node_path(id).is_some_and(|p| !p.is_text())
    }

    /// True for elements this graph owns (anchors excluded).
    pub fn owns_element(&self, id: NodeId) -> bool {
        self.graph
            .node_path(id)
            .is_some_and(|p| p.kind() == NodePathKind::Element)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.graph.contains(id)
    }

    pub fn stats(&self) -> ElementGraphStats {
        let mut element_nodes = 0;
        let mut text_nodes = 0;
        for id in self.graph.node_ids() {
            match self.graph.node_path(id).map(NodePath::kind) {
                Some(NodePathKind::Element) => element_nodes += 1,
                Some(NodePathKind::Text) => text_nodes += 1,
                _ => {}
            }
        }
        ElementGraphStats {
            total_nodes: self.graph.node_count(),
            total_edges: self.graph.edge_count(),
            root_id: self.root,
            element_nodes,
            text_nodes,
        }
    }
}
