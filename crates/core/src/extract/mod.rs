//! Document → flat node/edge lists with rendering hints.
//!
//! Every emitter consumes an [`Extraction`]; none of them look at the
//! [`Document`] directly.
//!
//! Projection rules: graph roots of Attributes/Scripts/Styles are not drawn;
//! attribute name/value nodes are folded into the label of their instance
//! node; the tag index is drawn as `element --tag--> tag node`; script/style
//! content hangs off its element with a `script`/`style` edge.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::graph::{Edge, MGraph, NodeId, NodePath, NodePathKind, Predicate};
use crate::model::{Document, GraphSource};
use crate::render::{self, RenderConfig, TagCategory};

/// Amount subtracted per channel to derive a border from a fill.
const BORDER_DARKEN: u8 = 30;

const SCRIPT_SHAPE: &str = "component";
const STYLE_SHAPE: &str = "tab";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Element,
    Tag,
    Attr,
    Text,
    Script,
    Style,
}

impl NodeKind {
    pub const ALL: [NodeKind; 6] = [
        NodeKind::Element,
        NodeKind::Tag,
        NodeKind::Attr,
        NodeKind::Text,
        NodeKind::Script,
        NodeKind::Style,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Element => "element",
            NodeKind::Tag => "tag",
            NodeKind::Attr => "attr",
            NodeKind::Text => "text",
            NodeKind::Script => "script",
            NodeKind::Style => "style",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedNode {
    pub id: String,
    pub label: String,
    pub node_type: NodeKind,
    pub dom_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub depth: usize,
    pub category: String,
    pub graph_source: GraphSource,
    pub fill_color: String,
    pub font_color: String,
    pub border_color: String,
    pub shape: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub predicate: Predicate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    pub graph_source: GraphSource,
    pub color: String,
    pub dashed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub nodes_by_type: BTreeMap<String, usize>,
    pub edges_by_predicate: BTreeMap<String, usize>,
}

/// Format-agnostic intermediate shared by all emitters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Extraction {
    pub nodes: Vec<ExtractedNode>,
    pub edges: Vec<ExtractedEdge>,
    pub root_id: Option<String>,
}

impl Extraction {
    pub fn node(&self, id: &str) -> Option<&ExtractedNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Keep nodes matching `keep`, dropping edges that touch removed ones.
    pub fn retain_nodes(&mut self, mut keep: impl FnMut(&ExtractedNode) -> bool) {
        let mut removed = HashSet::new();
        self.nodes.retain(|n| {
            let kept = keep(n);
            if !kept {
                removed.insert(n.id.clone());
            }
            kept
        });
        self.edges
            .retain(|e| !removed.contains(&e.source) && !removed.contains(&e.target));
        if self.root_id.as_ref().is_some_and(|r| removed.contains(r)) {
            self.root_id = None;
        }
    }

    pub fn stats(&self) -> ExtractionStats {
        let mut nodes_by_type = BTreeMap::new();
        for node in &self.nodes {
            *nodes_by_type.entry(node.node_type.to_string()).or_insert(0) += 1;
        }
        let mut edges_by_predicate = BTreeMap::new();
        for edge in &self.edges {
            *edges_by_predicate.entry(edge.predicate.to_string()).or_insert(0) += 1;
        }
        ExtractionStats {
            total_nodes: self.nodes.len(),
            total_edges: self.edges.len(),
            nodes_by_type,
            edges_by_predicate,
        }
    }
}

/// Which component graphs an extraction walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphSelection {
    pub body: bool,
    pub head: bool,
    pub attrs: bool,
    pub scripts: bool,
    pub styles: bool,
}

impl GraphSelection {
    pub const ALL: Self = Self {
        body: true,
        head: true,
        attrs: true,
        scripts: true,
        styles: true,
    };

    pub fn only(sources: &[GraphSource]) -> Self {
        let has = |s| sources.contains(&s);
        Self {
            body: has(GraphSource::Body),
            head: has(GraphSource::Head),
            attrs: has(GraphSource::Attrs),
            scripts: has(GraphSource::Scripts),
            styles: has(GraphSource::Styles),
        }
    }

    pub fn includes(&self, source: GraphSource) -> bool {
        match source {
            GraphSource::Body => self.body,
            GraphSource::Head => self.head,
            GraphSource::Attrs => self.attrs,
            GraphSource::Scripts => self.scripts,
            GraphSource::Styles => self.styles,
        }
    }
}

impl Default for GraphSelection {
    fn default() -> Self {
        Self::ALL
    }
}

pub struct Extractor<'a> {
    doc: &'a Document,
    config: &'a RenderConfig,
    selection: GraphSelection,
}

#[derive(Default)]
struct State {
    nodes: Vec<ExtractedNode>,
    edges: Vec<ExtractedEdge>,
    emitted: HashSet<NodeId>,
    excluded: HashSet<NodeId>,
}

impl State {
    fn push(&mut self, id: NodeId, node: ExtractedNode) {
        if self.emitted.insert(id) {
            self.nodes.push(node);
        }
    }
}

impl<'a> Extractor<'a> {
    pub fn new(doc: &'a Document, config: &'a RenderConfig) -> Self {
        Self {
            doc,
            config,
            selection: GraphSelection::ALL,
        }
    }

    pub fn with_selection(mut self, selection: GraphSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn extract(&self) -> Extraction {
        let mut state = State::default();

        for source in GraphSource::ALL {
            if self.selection.includes(source) {
                self.extract_nodes(source, &mut state);
            }
        }
        for source in GraphSource::ALL {
            if self.selection.includes(source) {
                self.extract_edges(source, &mut state);
            }
        }

        let root_id = self.find_root(&state);
        debug!(
            nodes = state.nodes.len(),
            edges = state.edges.len(),
            excluded = state.excluded.len(),
            "extracted document graph"
        );
        Extraction {
            nodes: state.nodes,
            edges: state.edges,
            root_id,
        }
    }

    fn graph(&self, source: GraphSource) -> &'a MGraph {
        match source {
            GraphSource::Body => self.doc.body().graph(),
            GraphSource::Head => self.doc.head().graph(),
            GraphSource::Attrs => self.doc.attributes().graph(),
            GraphSource::Scripts => self.doc.scripts().graph(),
            GraphSource::Styles => self.doc.styles().graph(),
        }
    }

    fn extract_nodes(&self, source: GraphSource, state: &mut State) {
        let graph = self.graph(source);
        for id in graph.node_ids() {
            if state.emitted.contains(&id) {
                continue;
            }
            let Some(path) = graph.node_path(id) else {
                state.excluded.insert(id);
                continue;
            };
            match (source, path.kind()) {
                (GraphSource::Body | GraphSource::Head, NodePathKind::Element) => {
                    state.push(id, self.element_node(id, path, source));
                }
                (GraphSource::Body | GraphSource::Head, NodePathKind::Text) => {
                    if self.config.show_text_nodes {
                        let text = graph.node_value(id).unwrap_or_default();
                        state.push(id, self.text_node(id, text, source));
                    } else {
                        state.excluded.insert(id);
                    }
                }
                (GraphSource::Attrs, NodePathKind::Tag) => {
                    let tag = graph.node_value(id).unwrap_or_default();
                    let used = graph
                        .outgoing_with(id, Predicate::Element)
                        .any(|e| state.emitted.contains(&e.target));
                    if self.config.show_tag_nodes && used {
                        state.push(id, self.tag_node(id, path, tag));
                    } else {
                        state.excluded.insert(id);
                    }
                }
                (GraphSource::Attrs, NodePathKind::Position) => {
                    let owner_emitted = graph
                        .incoming_with(id, Predicate::Attr)
                        .any(|e| state.emitted.contains(&e.source));
                    let attributes = self.doc.attributes();
                    match attributes.instance_name(id) {
                        Some(name) if self.config.show_attr_nodes && owner_emitted => {
                            let value = attributes.instance_value(id);
                            state.push(id, self.attr_node(id, path, name, value));
                        }
                        _ => {
                            state.excluded.insert(id);
                        }
                    }
                }
                (GraphSource::Scripts | GraphSource::Styles, NodePathKind::Position) => {
                    let owner_emitted = graph
                        .incoming_with(id, Predicate::Content)
                        .any(|e| state.emitted.contains(&e.source));
                    if owner_emitted {
                        let content = graph.node_value(id).unwrap_or_default();
                        state.push(id, self.content_node(id, path, content, source));
                    } else {
                        state.excluded.insert(id);
                    }
                }
                // Anchors share the id of an element drawn from Body/Head.
                (_, NodePathKind::ElementAnchor | NodePathKind::ScriptAnchor | NodePathKind::StyleAnchor) => {}
                _ => {
                    state.excluded.insert(id);
                }
            }
        }
    }

    /// Map a graph edge onto the drawn edge, or drop it.
    fn project(source: GraphSource, edge: &Edge) -> Option<(NodeId, NodeId, Predicate)> {
        let predicate = edge.predicate?;
        match (source, predicate) {
            (GraphSource::Body | GraphSource::Head, Predicate::Child | Predicate::Text) => {
                Some((edge.source, edge.target, predicate))
            }
            (GraphSource::Attrs, Predicate::Element) => Some((edge.target, edge.source, Predicate::Tag)),
            (GraphSource::Attrs, Predicate::Attr) => Some((edge.source, edge.target, predicate)),
            (GraphSource::Scripts, Predicate::Content) => {
                Some((edge.source, edge.target, Predicate::Script))
            }
            (GraphSource::Styles, Predicate::Content) => {
                Some((edge.source, edge.target, Predicate::Style))
            }
            _ => None,
        }
    }

    fn extract_edges(&self, source: GraphSource, state: &mut State) {
        let graph = self.graph(source);
        let palette = self.config.palette();
        for edge in graph.edges() {
            let Some((from, to, predicate)) = Self::project(source, edge) else {
                continue;
            };
            if !self.config.shows_edge(predicate) {
                continue;
            }
            let visible = |id: &NodeId| state.emitted.contains(id) && !state.excluded.contains(id);
            if !visible(&from) || !visible(&to) {
                continue;
            }
            state.edges.push(ExtractedEdge {
                id: format!("{}:{}", source, edge.id),
                source: from.to_string(),
                target: to.to_string(),
                predicate,
                position: edge.position(),
                graph_source: source,
                color: palette.edge_color(predicate).to_string(),
                dashed: matches!(
                    predicate,
                    Predicate::Tag | Predicate::Attr | Predicate::Script | Predicate::Style
                ),
            });
        }
    }

    fn find_root(&self, state: &State) -> Option<String> {
        let root = self.doc.root_id();
        if state.emitted.contains(&root) {
            return Some(root.to_string());
        }
        let elements = || state.nodes.iter().filter(|n| n.node_type == NodeKind::Element);
        elements()
            .find(|n| n.depth == 1)
            .or_else(|| elements().next())
            .map(|n| n.id.clone())
    }

    fn styled(
        &self,
        id: NodeId,
        label: String,
        node_type: NodeKind,
        path: &NodePath,
        source: GraphSource,
        fill: &str,
    ) -> ExtractedNode {
        let palette = self.config.palette();
        ExtractedNode {
            id: id.to_string(),
            label,
            node_type,
            dom_path: path.to_string(),
            value: None,
            depth: path.depth(),
            category: String::new(),
            graph_source: source,
            fill_color: fill.to_string(),
            font_color: palette.font_for(fill).to_string(),
            border_color: render::darken(fill, BORDER_DARKEN),
            shape: String::new(),
        }
    }

    fn element_node(&self, id: NodeId, path: &NodePath, source: GraphSource) -> ExtractedNode {
        let tag = self
            .doc
            .tag(id)
            .unwrap_or_else(|| path.last_segment());
        let fill = self.config.palette().element_fill(path.depth());
        let label = render::element_label(path, self.config.show_tag_brackets);
        let mut node = self.styled(id, label, NodeKind::Element, path, source, fill);
        node.category = TagCategory::of(tag).as_str().to_string();
        node.shape = self.config.element_shape.clone();
        node
    }

    fn text_node(&self, id: NodeId, text: &str, source: GraphSource) -> ExtractedNode {
        let label = render::text_label(text, self.config.max_text_length);
        let fill = self.config.palette().text;
        let mut node = self.styled(id, label, NodeKind::Text, &NodePath::text(), source, fill);
        node.value = Some(text.to_string());
        node.shape = self.config.text_shape.clone();
        node
    }

    fn tag_node(&self, id: NodeId, path: &NodePath, tag: &str) -> ExtractedNode {
        let label = render::tag_label(tag, self.config.show_tag_brackets);
        let fill = self.config.palette().category_fill(TagCategory::of(tag));
        let mut node = self.styled(id, label, NodeKind::Tag, path, GraphSource::Attrs, fill);
        node.value = Some(tag.to_string());
        node.shape = self.config.tag_shape.clone();
        node
    }

    fn attr_node(&self, id: NodeId, path: &NodePath, name: &str, value: Option<&str>) -> ExtractedNode {
        let label = render::attr_label(name, value, self.config.max_text_length);
        let fill = self.config.palette().attr;
        let mut node = self.styled(id, label, NodeKind::Attr, path, GraphSource::Attrs, fill);
        node.value = value.map(str::to_string);
        node.shape = self.config.attr_shape.clone();
        node
    }

    fn content_node(&self, id: NodeId, path: &NodePath, content: &str, source: GraphSource) -> ExtractedNode {
        let palette = self.config.palette();
        let (kind, fill, shape) = match source {
            GraphSource::Styles => (NodeKind::Style, palette.style, STYLE_SHAPE),
            _ => (NodeKind::Script, palette.script, SCRIPT_SHAPE),
        };
        let label = render::text_label(content, self.config.max_text_length);
        let mut node = self.styled(id, label, kind, path, source, fill);
        node.value = Some(content.to_string());
        node.shape = shape.to_string();
        node
    }
}
