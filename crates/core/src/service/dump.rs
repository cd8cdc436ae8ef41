use serde::Serialize;

use crate::graph::{MGraph, NodeData, NodeId, Predicate};
use crate::model::{Document, DocumentStats};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDump {
    pub id: NodeId,
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeDump {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
    pub predicate: Option<Predicate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphDump {
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
}

/// Raw node/edge listing of all five graphs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentDump {
    pub root_id: NodeId,
    pub body: GraphDump,
    pub head: GraphDump,
    pub attributes: GraphDump,
    pub scripts: GraphDump,
    pub styles: GraphDump,
    pub stats: DocumentStats,
}

impl GraphDump {
    pub fn of(graph: &MGraph) -> Self {
        let nodes = graph
            .node_ids()
            .filter_map(|id| graph.node(id).ok())
            .map(|node| {
                let (value, key) = match &node.data {
                    NodeData::Value { value, key } => (Some(value.clone()), key.clone()),
                    NodeData::Structural => (None, None),
                };
                NodeDump {
                    id: node.id,
                    path: node.path.as_ref().map(|p| p.to_string()),
                    value,
                    key,
                }
            })
            .collect();
        let edges = graph
            .edges()
            .map(|edge| EdgeDump {
                id: edge.id.to_string(),
                source: edge.source,
                target: edge.target,
                predicate: edge.predicate,
                path: edge.path.clone(),
            })
            .collect();
        Self { nodes, edges }
    }
}

impl DocumentDump {
    pub fn of(doc: &Document) -> Self {
        Self {
            root_id: doc.root_id(),
            body: GraphDump::of(doc.body().graph()),
            head: GraphDump::of(doc.head().graph()),
            attributes: GraphDump::of(doc.attributes().graph()),
            scripts: GraphDump::of(doc.scripts().graph()),
            styles: GraphDump::of(doc.styles().graph()),
            stats: doc.stats(),
        }
    }
}
