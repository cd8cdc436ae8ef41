//! D3 force-directed output.

use serde::Serialize;

use crate::extract::{ExtractedEdge, ExtractedNode, Extraction, NodeKind};
use crate::graph::Predicate;
use crate::model::GraphSource;
use crate::render::D3Options;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct D3Graph {
    pub nodes: Vec<D3Node>,
    pub links: Vec<D3Link>,
    pub root_id: Option<String>,
    pub simulation: D3Simulation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct D3Node {
    pub id: String,
    pub label: String,
    pub color: String,
    pub font_color: String,
    pub radius: f64,
    pub node_type: String,
    pub dom_path: String,
    pub category: String,
    pub depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub graph_source: GraphSource,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct D3Link {
    pub source: String,
    pub target: String,
    pub color: String,
    pub dashed: bool,
    pub width: u32,
    pub predicate: Predicate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    pub graph_source: GraphSource,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct D3Simulation {
    pub link_distance: f64,
    pub charge: f64,
}

fn base_radius(kind: NodeKind) -> f64 {
    match kind {
        NodeKind::Element => 20.0,
        NodeKind::Tag => 15.0,
        NodeKind::Attr => 12.0,
        NodeKind::Text => 10.0,
        NodeKind::Script | NodeKind::Style => 14.0,
    }
}

/// Base radius for the kind, grown by label length up to 10.
pub fn radius(kind: NodeKind, label: &str) -> f64 {
    let growth = (label.chars().count() as f64 / 5.0).min(10.0);
    base_radius(kind) + growth
}

fn node(node: &ExtractedNode) -> D3Node {
    D3Node {
        id: node.id.clone(),
        label: node.label.clone(),
        color: node.fill_color.clone(),
        font_color: node.font_color.clone(),
        radius: radius(node.node_type, &node.label),
        node_type: node.node_type.to_string(),
        dom_path: node.dom_path.clone(),
        category: node.category.clone(),
        depth: node.depth,
        value: node.value.clone(),
        graph_source: node.graph_source,
    }
}

fn link(edge: &ExtractedEdge) -> D3Link {
    D3Link {
        source: edge.source.clone(),
        target: edge.target.clone(),
        color: edge.color.clone(),
        dashed: edge.dashed,
        width: if edge.predicate == Predicate::Child { 2 } else { 1 },
        predicate: edge.predicate,
        position: edge.position,
        graph_source: edge.graph_source,
    }
}

pub fn render(extraction: &Extraction, options: &D3Options) -> D3Graph {
    D3Graph {
        nodes: extraction.nodes.iter().map(node).collect(),
        links: extraction.edges.iter().map(link).collect(),
        root_id: extraction.root_id.clone(),
        simulation: D3Simulation {
            link_distance: options.link_distance,
            charge: options.charge,
        },
    }
}
