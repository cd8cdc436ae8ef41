use serde::Serialize;

use super::stats::{ScriptsStats, StylesStats};
use crate::error::GraphError;
use crate::graph::{IdGenerator, MGraph, NodeId, NodePath, Predicate, SCRIPTS_ROOT, STYLES_ROOT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Script,
    Style,
}

impl ResourceKind {
    fn root_path(self) -> &'static str {
        match self {
            ResourceKind::Script => SCRIPTS_ROOT,
            ResourceKind::Style => STYLES_ROOT,
        }
    }

    fn anchor_path(self, id: NodeId) -> NodePath {
        match self {
            ResourceKind::Script => NodePath::script_anchor(id),
            ResourceKind::Style => NodePath::style_anchor(id),
        }
    }

    /// Predicate of the root → anchor edge.
    pub fn predicate(self) -> Predicate {
        match self {
            ResourceKind::Script => Predicate::Script,
            ResourceKind::Style => Predicate::Style,
        }
    }
}

/// Shared layout of the Scripts and Styles graphs:
/// `root --script|style (order)--> anchor --content ("0")--> source`.
#[derive(Debug)]
struct ResourceGraph {
    kind: ResourceKind,
    graph: MGraph,
    root: NodeId,
    order: usize,
}

impl ResourceGraph {
    fn new(kind: ResourceKind, ids: IdGenerator) -> Self {
        let mut graph = MGraph::new(ids);
        let root = graph.add_node(None, NodePath::new(kind.root_path()));
        Self {
            kind,
            graph,
            root,
            order: 0,
        }
    }

    /// Empty and missing content both mean an external reference.
    fn register(&mut self, id: NodeId, content: Option<&str>) -> Result<Option<NodeId>, GraphError> {
        let anchor = self.graph.add_node(Some(id), self.kind.anchor_path(id));
        self.graph.add_edge(
            self.root,
            anchor,
            Some(self.kind.predicate()),
            Some(self.order.to_string()),
        )?;
        self.order += 1;

        match content {
            Some(source) if !source.is_empty() => {
                let node = self
                    .graph
                    .add_value_node(source, Some(NodePath::position(0)), None);
                self.graph
                    .add_edge(anchor, node, Some(Predicate::Content), Some("0".to_string()))?;
                Ok(Some(node))
            }
            _ => Ok(None),
        }
    }

    fn content(&self, id: NodeId) -> Option<&str> {
        self.graph
            .outgoing_with(id, Predicate::Content)
            .next()
            .and_then(|e| self.graph.node_value(e.target))
    }

    fn content_node(&self, id: NodeId) -> Option<NodeId> {
        self.graph
            .outgoing_with(id, Predicate::Content)
            .next()
            .map(|e| e.target)
    }

    fn all(&self) -> Vec<NodeId> {
        self.graph
            .ordered_edges(self.root, &[self.kind.predicate()])
            .into_iter()
            .map(|e| e.target)
            .collect()
    }

    fn inline(&self) -> Vec<NodeId> {
        self.all()
            .into_iter()
            .filter(|id| self.content(*id).is_some())
            .collect()
    }

    fn external(&self) -> Vec<NodeId> {
        self.all()
            .into_iter()
            .filter(|id| self.content(*id).is_none())
            .collect()
    }
}

#[derive(Debug)]
pub struct ScriptsGraph(ResourceGraph);

impl ScriptsGraph {
    pub fn new(ids: IdGenerator) -> Self {
        Self(ResourceGraph::new(ResourceKind::Script, ids))
    }

    pub fn graph(&self) -> &MGraph {
        &self.0.graph
    }

    pub fn root(&self) -> NodeId {
        self.0.root
    }

    pub fn register_script(
        &mut self,
        id: NodeId,
        content: Option<&str>,
    ) -> Result<Option<NodeId>, GraphError> {
        self.0.register(id, content)
    }

    pub fn script_content(&self, id: NodeId) -> Option<&str> {
        self.0.content(id)
    }

    pub fn content_node(&self, id: NodeId) -> Option<NodeId> {
        self.0.content_node(id)
    }

    pub fn all_scripts(&self) -> Vec<NodeId> {
        self.0.all()
    }

    pub fn inline_scripts(&self) -> Vec<NodeId> {
        self.0.inline()
    }

    pub fn external_scripts(&self) -> Vec<NodeId> {
        self.0.external()
    }

    pub fn stats(&self) -> ScriptsStats {
        let inline = self.0.inline().len();
        let total = self.0.all().len();
        ScriptsStats {
            total_nodes: self.0.graph.node_count(),
            total_edges: self.0.graph.edge_count(),
            root_id: Some(self.0.root),
            total_scripts: total,
            inline_scripts: inline,
            external_scripts: total - inline,
        }
    }
}

#[derive(Debug)]
pub struct StylesGraph(ResourceGraph);

impl StylesGraph {
    pub fn new(ids: IdGenerator) -> Self {
        Self(ResourceGraph::new(ResourceKind::Style, ids))
    }

    pub fn graph(&self) -> &MGraph {
        &self.0.graph
    }

    pub fn root(&self) -> NodeId {
        self.0.root
    }

    pub fn register_style(
        &mut self,
        id: NodeId,
        content: Option<&str>,
    ) -> Result<Option<NodeId>, GraphError> {
        self.0.register(id, content)
    }

    /// `<link>`: a style with no inline content.
    pub fn register_link(&mut self, id: NodeId) -> Result<(), GraphError> {
        self.0.register(id, None).map(|_| ())
    }

    pub fn style_content(&self, id: NodeId) -> Option<&str> {
        self.0.content(id)
    }

    pub fn content_node(&self, id: NodeId) -> Option<NodeId> {
        self.0.content_node(id)
    }

    pub fn all_styles(&self) -> Vec<NodeId> {
        self.0.all()
    }

    pub fn inline_styles(&self) -> Vec<NodeId> {
        self.0.inline()
    }

    pub fn external_styles(&self) -> Vec<NodeId> {
        self.0.external()
    }

    pub fn stats(&self) -> StylesStats {
        let inline = self.0.inline().len();
        let total = self.0.all().len();
        StylesStats {
            total_nodes: self.0.graph.node_count(),
            total_edges: self.0.graph.edge_count(),
            root_id: Some(self.0.root),
            total_styles: total,
            inline_styles: inline,
            external_styles: total - inline,
        }
    }
}
