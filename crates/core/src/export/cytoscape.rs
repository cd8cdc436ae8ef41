//! Cytoscape.js `elements` output.

use serde::Serialize;
use serde_json::{json, Value};

use crate::extract::{ExtractedEdge, ExtractedNode, Extraction, NodeKind};
use crate::graph::Predicate;
use crate::render::CytoscapeOptions;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CytoscapeGraph {
    pub elements: CyElements,
    pub root_id: Option<String>,
    pub layout: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CyElements {
    pub nodes: Vec<CyNode>,
    pub edges: Vec<CyEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CyNode {
    pub data: CyNodeData,
    pub group: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CyNodeData {
    pub id: String,
    pub label: String,
    pub color: String,
    pub font_color: String,
    pub border_color: String,
    pub node_type: String,
    pub dom_path: String,
    pub category: String,
    pub depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CyEdge {
    pub data: CyEdgeData,
    pub group: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CyEdgeData {
    pub id: String,
    pub source: String,
    pub target: String,
    pub color: String,
    pub dashed: bool,
    pub predicate: Predicate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

fn node(node: &ExtractedNode) -> CyNode {
    CyNode {
        data: CyNodeData {
            id: node.id.clone(),
            label: node.label.clone(),
            color: node.fill_color.clone(),
            font_color: node.font_color.clone(),
            border_color: node.border_color.clone(),
            node_type: node.node_type.to_string(),
            dom_path: node.dom_path.clone(),
            category: node.category.clone(),
            depth: node.depth,
            value: node.value.clone(),
        },
        group: "nodes",
    }
}

fn edge(edge: &ExtractedEdge) -> CyEdge {
    CyEdge {
        data: CyEdgeData {
            id: edge.id.clone(),
            source: edge.source.clone(),
            target: edge.target.clone(),
            color: edge.color.clone(),
            dashed: edge.dashed,
            predicate: edge.predicate,
            position: edge.position,
        },
        group: "edges",
    }
}

fn cy_shape(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Element => "round-rectangle",
        NodeKind::Tag => "hexagon",
        NodeKind::Attr => "tag",
        NodeKind::Text => "ellipse",
        NodeKind::Script | NodeKind::Style => "barrel",
    }
}

fn stylesheet() -> Vec<Value> {
    let mut style = vec![
        json!({
            "selector": "node",
            "style": {
                "label": "data(label)",
                "background-color": "data(color)",
                "color": "data(fontColor)",
                "border-color": "data(borderColor)",
                "border-width": 1,
                "text-valign": "center",
                "font-size": 10,
            }
        }),
        json!({
            "selector": "edge",
            "style": {
                "line-color": "data(color)",
                "target-arrow-color": "data(color)",
                "target-arrow-shape": "triangle",
                "curve-style": "bezier",
                "width": 1,
            }
        }),
        json!({
            "selector": "edge[?dashed]",
            "style": { "line-style": "dashed" }
        }),
    ];
    for kind in NodeKind::ALL {
        style.push(json!({
            "selector": format!("node[nodeType = \"{kind}\"]"),
            "style": { "shape": cy_shape(kind) }
        }));
    }
    style
}

pub fn render(extraction: &Extraction, options: &CytoscapeOptions) -> CytoscapeGraph {
    let mut layout = json!({ "name": options.layout, "directed": true });
    if let Some(root) = &extraction.root_id {
        layout["roots"] = json!(format!("[id = \"{root}\"]"));
    }
    CytoscapeGraph {
        elements: CyElements {
            nodes: extraction.nodes.iter().map(node).collect(),
            edges: extraction.edges.iter().map(edge).collect(),
        },
        root_id: extraction.root_id.clone(),
        layout,
        style: options.include_style.then(stylesheet),
    }
}
