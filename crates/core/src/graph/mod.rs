//! In-memory labeled multigraph shared by all component graphs.
//!
//! Nodes are either structural (path only) or value nodes (path + string).
//! Edges are directed, carry an optional [`Predicate`] and an optional edge
//! path. Insertion order never decides traversal order: callers sort by the
//! edge path (see [`MGraph::ordered_edges`]).

mod path;

pub use path::{NodePath, NodePathKind, ATTRIBUTES_ROOT, NAME, SCRIPTS_ROOT, STYLES_ROOT, TEXT, VALUE};

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::GraphError;

/// Opaque node handle, shared by every graph of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(Uuid);

impl NodeId {
    pub fn from_u128(raw: u128) -> Self {
        Self(Uuid::from_u128(raw))
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Mints fresh [`NodeId`]s.
///
/// Clones share their counter, so one sequential generator handed to several
/// graphs never produces the same id twice.
#[derive(Debug, Clone, Default)]
pub enum IdGenerator {
    #[default]
    Random,
    Sequential(Arc<AtomicU64>),
}

impl IdGenerator {
    /// Deterministic ids `...0001`, `...0002`, ... for reproducible output.
    pub fn sequential() -> Self {
        Self::Sequential(Arc::new(AtomicU64::new(1)))
    }

    pub fn next_id(&self) -> NodeId {
        match self {
            IdGenerator::Random => NodeId(Uuid::new_v4()),
            IdGenerator::Sequential(counter) => {
                NodeId::from_u128(u128::from(counter.fetch_add(1, Ordering::Relaxed)))
            }
        }
    }
}

/// Per-graph edge handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(u32);

impl EdgeId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Role of an edge. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Predicate {
    Child,
    Text,
    Tag,
    Element,
    Attr,
    Name,
    Value,
    Script,
    Content,
    Style,
}

impl Predicate {
    pub const ALL: [Predicate; 10] = [
        Predicate::Child,
        Predicate::Text,
        Predicate::Tag,
        Predicate::Element,
        Predicate::Attr,
        Predicate::Name,
        Predicate::Value,
        Predicate::Script,
        Predicate::Content,
        Predicate::Style,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Predicate::Child => "child",
            Predicate::Text => "text",
            Predicate::Tag => "tag",
            Predicate::Element => "element",
            Predicate::Attr => "attr",
            Predicate::Name => "name",
            Predicate::Value => "value",
            Predicate::Script => "script",
            Predicate::Content => "content",
            Predicate::Style => "style",
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Predicate {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Predicate::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| GraphError::InvalidPath(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Structural,
    Value { value: String, key: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub path: Option<NodePath>,
    pub data: NodeData,
}

impl Node {
    pub fn value(&self) -> Option<&str> {
        match &self.data {
            NodeData::Value { value, .. } => Some(value),
            NodeData::Structural => None,
        }
    }

    pub fn is_value(&self) -> bool {
        matches!(self.data, NodeData::Value { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub predicate: Option<Predicate>,
    pub path: Option<String>,
}

impl Edge {
    /// Edge path parsed as a sibling position.
    pub fn position(&self) -> Option<usize> {
        self.path.as_deref().and_then(|p| p.parse().ok())
    }
}

/// Labeled multigraph with path and key indices.
#[derive(Debug, Default)]
pub struct MGraph {
    ids: IdGenerator,
    nodes: HashMap<NodeId, Node>,
    node_order: Vec<NodeId>,
    edges: Vec<Edge>,
    outgoing: HashMap<NodeId, Vec<EdgeId>>,
    incoming: HashMap<NodeId, Vec<EdgeId>>,
    path_index: HashMap<NodePath, Vec<NodeId>>,
    key_index: HashMap<String, NodeId>,
}

impl MGraph {
    pub fn new(ids: IdGenerator) -> Self {
        Self {
            ids,
            ..Default::default()
        }
    }

    pub fn ids(&self) -> &IdGenerator {
        &self.ids
    }

    /// Create a structural node, minting an id unless one is supplied.
    /// Re-adding an existing id replaces its record.
    pub fn add_node(&mut self, id: Option<NodeId>, path: NodePath) -> NodeId {
        let id = id.unwrap_or_else(|| self.ids.next_id());
        self.insert(Node {
            id,
            path: Some(path),
            data: NodeData::Structural,
        });
        id
    }

    pub fn add_value_node(
        &mut self,
        value: impl Into<String>,
        path: Option<NodePath>,
        key: Option<String>,
    ) -> NodeId {
        let id = self.ids.next_id();
        if let Some(key) = &key {
            self.key_index.insert(key.clone(), id);
        }
        self.insert(Node {
            id,
            path,
            data: NodeData::Value {
                value: value.into(),
                key,
            },
        });
        id
    }

    fn insert(&mut self, node: Node) {
        let id = node.id;
        if let Some(path) = &node.path {
            self.path_index.entry(path.clone()).or_default().push(id);
        }
        if self.nodes.insert(id, node).is_none() {
            self.node_order.push(id);
        }
    }

    pub fn add_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        predicate: Option<Predicate>,
        path: Option<String>,
    ) -> Result<EdgeId, GraphError> {
        for id in [source, target] {
            if !self.nodes.contains_key(&id) {
                return Err(GraphError::MissingNode(id));
            }
        }
        Ok(self.push_edge(source, target, predicate, path))
    }

    /// Append an edge between nodes the caller has just created.
    pub(crate) fn push_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        predicate: Option<Predicate>,
        path: Option<String>,
    ) -> EdgeId {
        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(Edge {
            id,
            source,
            target,
            predicate,
            path,
        });
        self.outgoing.entry(source).or_default().push(id);
        self.incoming.entry(target).or_default().push(id);
        id
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, GraphError> {
        self.nodes.get(&id).ok_or(GraphError::MissingNode(id))
    }

    pub fn node_path(&self, id: NodeId) -> Option<&NodePath> {
        self.nodes.get(&id).and_then(|n| n.path.as_ref())
    }

    pub fn node_value(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(&id).and_then(Node::value)
    }

    pub fn edge(&self, id: EdgeId) -> Result<&Edge, GraphError> {
        self.edges.get(id.index()).ok_or(GraphError::MissingEdge(id))
    }

    /// Node ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.node_order.iter().copied()
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.iter().map(|e| e.id)
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn outgoing(&self, id: NodeId) -> impl Iterator<Item = &Edge> {
        self.outgoing
            .get(&id)
            .into_iter()
            .flatten()
            .map(|e| &self.edges[e.index()])
    }

    pub fn incoming(&self, id: NodeId) -> impl Iterator<Item = &Edge> {
        self.incoming
            .get(&id)
            .into_iter()
            .flatten()
            .map(|e| &self.edges[e.index()])
    }

    pub fn outgoing_with(&self, id: NodeId, predicate: Predicate) -> impl Iterator<Item = &Edge> {
        self.outgoing(id)
            .filter(move |e| e.predicate == Some(predicate))
    }

    pub fn incoming_with(&self, id: NodeId, predicate: Predicate) -> impl Iterator<Item = &Edge> {
        self.incoming(id)
            .filter(move |e| e.predicate == Some(predicate))
    }

    /// Outgoing edges matching any of `predicates`, sorted by
    /// `(edge path as integer, insertion order)`.
    pub fn ordered_edges(&self, id: NodeId, predicates: &[Predicate]) -> Vec<&Edge> {
        let mut edges: Vec<&Edge> = self
            .outgoing(id)
            .filter(|e| e.predicate.is_some_and(|p| predicates.contains(&p)))
            .collect();
        edges.sort_by_key(|e| (e.position().unwrap_or(usize::MAX), e.id));
        edges
    }

    pub fn nodes_by_path(&self, path: &str) -> &[NodeId] {
        self.path_index
            .get(&NodePath::new(path))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn node_by_key(&self, key: &str) -> Option<NodeId> {
        self.key_index.get(key).copied()
    }

    pub fn node_count(&self) -> usize {
        self.node_order.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
