//! vis.js network output (`nodes`/`edges` with `from`/`to` edge keys).

use serde::Serialize;
use serde_json::{json, Value};

use crate::extract::{ExtractedEdge, ExtractedNode, Extraction};
use crate::graph::Predicate;
use crate::model::GraphSource;
use crate::render::{darken, VisJsOptions};

const FONT_SIZE: u32 = 14;
const HIGHLIGHT_BORDER: &str = "#2B7CE9";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisJsGraph {
    pub nodes: Vec<VisNode>,
    pub edges: Vec<VisEdge>,
    pub root_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisNode {
    pub id: String,
    pub label: String,
    pub title: String,
    pub shape: String,
    pub color: VisNodeColor,
    pub font: VisFont,
    pub node_type: String,
    pub dom_path: String,
    pub category: String,
    pub depth: usize,
    pub graph_source: GraphSource,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisNodeColor {
    pub background: String,
    pub border: String,
    pub highlight: VisHighlight,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisHighlight {
    pub background: String,
    pub border: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisFont {
    pub color: String,
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisEdge {
    pub id: String,
    pub from: String,
    pub to: String,
    pub dashes: bool,
    pub color: VisEdgeColor,
    pub predicate: Predicate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisEdgeColor {
    pub color: String,
    pub highlight: String,
}

/// vis.js has no `note`/`plaintext`/`component`/`tab`; map to nearest.
pub fn shape_for(shape: &str) -> &str {
    match shape {
        "note" | "tab" | "rect" | "rectangle" => "box",
        "plaintext" | "none" => "text",
        "component" | "cylinder" => "database",
        other => other,
    }
}

fn node(node: &ExtractedNode) -> VisNode {
    VisNode {
        id: node.id.clone(),
        label: node.label.clone(),
        title: node.value.clone().unwrap_or_else(|| node.dom_path.clone()),
        shape: shape_for(&node.shape).to_string(),
        color: VisNodeColor {
            background: node.fill_color.clone(),
            border: node.border_color.clone(),
            highlight: VisHighlight {
                background: node.fill_color.clone(),
                border: HIGHLIGHT_BORDER.to_string(),
            },
        },
        font: VisFont {
            color: node.font_color.clone(),
            size: FONT_SIZE,
        },
        node_type: node.node_type.to_string(),
        dom_path: node.dom_path.clone(),
        category: node.category.clone(),
        depth: node.depth,
        graph_source: node.graph_source,
    }
}

fn edge(edge: &ExtractedEdge) -> VisEdge {
    VisEdge {
        id: edge.id.clone(),
        from: edge.source.clone(),
        to: edge.target.clone(),
        dashes: edge.dashed,
        color: VisEdgeColor {
            color: edge.color.clone(),
            highlight: darken(&edge.color, 40),
        },
        predicate: edge.predicate,
        position: edge.position,
    }
}

fn network_options(options: &VisJsOptions) -> Value {
    json!({
        "layout": {
            "hierarchical": {
                "enabled": options.hierarchical,
                "direction": options.direction,
                "sortMethod": "directed",
            }
        },
        "physics": { "enabled": options.physics },
        "edges": {
            "arrows": "to",
            "smooth": { "type": "cubicBezier" },
        },
        "interaction": { "hover": true },
    })
}

pub fn render(extraction: &Extraction, options: &VisJsOptions) -> VisJsGraph {
    VisJsGraph {
        nodes: extraction.nodes.iter().map(node).collect(),
        edges: extraction.edges.iter().map(edge).collect(),
        root_id: extraction.root_id.clone(),
        options: options.include_options.then(|| network_options(options)),
    }
}
