use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::stats::AttributesStats;
use crate::error::GraphError;
use crate::graph::{IdGenerator, MGraph, NodeId, NodePath, NodePathKind, Predicate, NAME, VALUE};

/// Attributes of one element in source order. `None` marks a boolean
/// attribute (`<input disabled>`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap(Vec<(String, Option<String>)>);

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: Option<String>) {
        self.0.push((name.into(), value));
    }

    /// `None` when absent, `Some(None)` for a boolean attribute.
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(n, _)| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Option<String>)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (K, Option<String>)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl Serialize for AttributeMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Tag index and attribute store.
///
/// ```text
/// attributes --tag--> tag:div --element--> element:<id> --attr--> "0"
///                                                           "0" --name--> "class"
///                                                           "0" --value--> "container"
/// ```
///
/// Tag, name and value nodes are interned by their string.
#[derive(Debug)]
pub struct AttributesGraph {
    graph: MGraph,
    root: NodeId,
    tag_nodes: HashMap<String, NodeId>,
    name_nodes: HashMap<String, NodeId>,
    value_nodes: HashMap<String, NodeId>,
    elements: Vec<NodeId>,
    total_attributes: usize,
}

impl AttributesGraph {
    /// A fresh index with the document element `html` already registered.
    pub fn new(ids: IdGenerator, html: NodeId) -> Self {
        let mut graph = MGraph::new(ids);
        let root = graph.add_node(None, NodePath::new(crate::graph::ATTRIBUTES_ROOT));
        let tag_node = graph.add_value_node("html", Some(NodePath::tag("html")), Some("tag:html".to_string()));
        graph.push_edge(root, tag_node, Some(Predicate::Tag), None);
        let anchor = graph.add_node(Some(html), NodePath::element_anchor(html));
        graph.push_edge(tag_node, anchor, Some(Predicate::Element), None);

        Self {
            graph,
            root,
            tag_nodes: HashMap::from([("html".to_string(), tag_node)]),
            name_nodes: HashMap::new(),
            value_nodes: HashMap::new(),
            elements: vec![anchor],
            total_attributes: 0,
        }
    }

    pub fn graph(&self) -> &MGraph {
        &self.graph
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Anchor `id` under the (interned) tag node for `tag`.
    pub fn register_element(&mut self, id: NodeId, tag: &str) -> Result<NodeId, GraphError> {
        let tag_node = match self.tag_nodes.get(tag) {
            Some(node) => *node,
            None => {
                let node = self
                    .graph
                    .add_value_node(tag, Some(NodePath::tag(tag)), Some(format!("tag:{tag}")));
                self.graph
                    .add_edge(self.root, node, Some(Predicate::Tag), None)?;
                self.tag_nodes.insert(tag.to_string(), node);
                node
            }
        };
        let anchor = self.graph.add_node(Some(id), NodePath::element_anchor(id));
        self.graph
            .add_edge(tag_node, anchor, Some(Predicate::Element), None)?;
        self.elements.push(anchor);
        Ok(anchor)
    }

    /// Attach one attribute occurrence to a registered element and return the
    /// fresh instance node.
    pub fn add_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        value: Option<&str>,
        position: usize,
    ) -> Result<NodeId, GraphError> {
        if !self.is_registered(id) {
            return Err(GraphError::MissingNode(id));
        }
        let instance = self.graph.add_node(None, NodePath::position(position));
        self.graph
            .add_edge(id, instance, Some(Predicate::Attr), Some(position.to_string()))?;

        let name_node = Self::intern(&mut self.graph, &mut self.name_nodes, NAME, name);
        self.graph
            .add_edge(instance, name_node, Some(Predicate::Name), None)?;

        if let Some(value) = value {
            let value_node = Self::intern(&mut self.graph, &mut self.value_nodes, VALUE, value);
            self.graph
                .add_edge(instance, value_node, Some(Predicate::Value), None)?;
        }
        self.total_attributes += 1;
        Ok(instance)
    }

    fn intern(
        graph: &mut MGraph,
        cache: &mut HashMap<String, NodeId>,
        path: &str,
        value: &str,
    ) -> NodeId {
        if let Some(node) = cache.get(value) {
            return *node;
        }
        let node = graph.add_value_node(value, Some(NodePath::new(path)), None);
        cache.insert(value.to_string(), node);
        node
    }

    pub fn is_registered(&self, id: NodeId) -> bool {
        self.graph
            .node_path(id)
            .is_some_and(|p| p.kind() == NodePathKind::ElementAnchor)
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.graph
            .incoming_with(id, Predicate::Element)
            .next()
            .and_then(|e| self.graph.node_value(e.source))
    }

    /// Elements registered under `tag`. Lookups miss the interning cache for
    /// non-lowercase names and fall back to the lowercase path index.
    pub fn elements_by_tag(&self, tag: &str) -> Vec<NodeId> {
        let tag_node = self.tag_nodes.get(tag).copied().or_else(|| {
            self.graph
                .nodes_by_path(NodePath::tag(&tag.to_ascii_lowercase()).as_str())
                .first()
                .copied()
        });
        match tag_node {
            Some(node) => self
                .graph
                .outgoing_with(node, Predicate::Element)
                .map(|e| e.target)
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn all_tags(&self) -> Vec<&str> {
        self.graph
            .outgoing_with(self.root, Predicate::Tag)
            .filter_map(|e| self.graph.node_value(e.target))
            .collect()
    }

    /// Registered elements in registration order.
    pub fn elements(&self) -> &[NodeId] {
        &self.elements
    }

    pub fn attributes(&self, id: NodeId) -> AttributeMap {
        let mut entries: Vec<(usize, String, Option<String>)> = self
            .graph
            .outgoing_with(id, Predicate::Attr)
            .filter_map(|edge| {
                let instance = edge.target;
                let position = self
                    .graph
                    .node_path(instance)
                    .and_then(NodePath::as_position)?;
                let name = self.instance_name(instance)?;
                let value = self.instance_value(instance);
                Some((position, name.to_string(), value.map(str::to_string)))
            })
            .collect();
        entries.sort_by_key(|(position, _, _)| *position);
        entries
            .into_iter()
            .map(|(_, name, value)| (name, value))
            .collect()
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<Option<String>> {
        self.attributes(id)
            .get(name)
            .map(|v| v.map(str::to_string))
    }

    /// Name of an instance node.
    pub fn instance_name(&self, instance: NodeId) -> Option<&str> {
        self.graph
            .outgoing_with(instance, Predicate::Name)
            .next()
            .and_then(|e| self.graph.node_value(e.target))
    }

    /// Value of an instance node; `None` for boolean attributes.
    pub fn instance_value(&self, instance: NodeId) -> Option<&str> {
        self.graph
            .outgoing_with(instance, Predicate::Value)
            .next()
            .and_then(|e| self.graph.node_value(e.target))
    }

    /// Elements carrying `name`, optionally restricted to one value.
    pub fn elements_with_attribute(&self, name: &str, value: Option<&str>) -> Vec<NodeId> {
        let Some(name_node) = self.name_nodes.get(name) else {
            return Vec::new();
        };
        let mut found = Vec::new();
        for edge in self.graph.incoming_with(*name_node, Predicate::Name) {
            let instance = edge.source;
            if let Some(wanted) = value {
                if self.instance_value(instance) != Some(wanted) {
                    continue;
                }
            }
            for owner in self.graph.incoming_with(instance, Predicate::Attr) {
                if !found.contains(&owner.source) {
                    found.push(owner.source);
                }
            }
        }
        found
    }

    pub fn stats(&self) -> AttributesStats {
        AttributesStats {
            total_nodes: self.graph.node_count(),
            total_edges: self.graph.edge_count(),
            root_id: Some(self.root),
            registered_elements: self.elements.len(),
            total_attributes: self.total_attributes,
            unique_tags: self.tag_nodes.len(),
            unique_names: self.name_nodes.len(),
            unique_values: self.value_nodes.len(),
        }
    }
}
