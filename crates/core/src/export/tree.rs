//! Root-first tree rendering of an extraction, as text or nested JSON.
//!
//! Children are ordered by edge position, then by edge order. Nodes already
//! placed are never visited again, so a cyclic extraction still terminates.
//! Nodes unreachable from the root start trees of their own.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::extract::{ExtractedNode, Extraction, NodeKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    pub id: String,
    pub label: String,
    pub node_type: NodeKind,
    pub children: Vec<TreeNode>,
}

struct Walker<'a> {
    nodes: HashMap<&'a str, &'a ExtractedNode>,
    children: HashMap<&'a str, Vec<&'a str>>,
    visited: HashSet<&'a str>,
}

impl<'a> Walker<'a> {
    fn new(extraction: &'a Extraction) -> Self {
        let nodes = extraction
            .nodes
            .iter()
            .map(|n| (n.id.as_str(), n))
            .collect();

        let mut keyed: HashMap<&str, Vec<(usize, usize, &str)>> = HashMap::new();
        for (index, edge) in extraction.edges.iter().enumerate() {
            keyed.entry(edge.source.as_str()).or_default().push((
                edge.position.unwrap_or(usize::MAX),
                index,
                edge.target.as_str(),
            ));
        }
        let children = keyed
            .into_iter()
            .map(|(source, mut targets)| {
                targets.sort_unstable();
                (source, targets.into_iter().map(|(_, _, t)| t).collect())
            })
            .collect();

        Self {
            nodes,
            children,
            visited: HashSet::new(),
        }
    }

    /// Roots in walk order: the extraction root, then any leftovers.
    fn roots(extraction: &'a Extraction) -> impl Iterator<Item = &'a str> {
        extraction
            .root_id
            .as_deref()
            .into_iter()
            .chain(extraction.nodes.iter().map(|n| n.id.as_str()))
    }

    fn build(&mut self, id: &'a str) -> Option<TreeNode> {
        let node = *self.nodes.get(id)?;
        if !self.visited.insert(id) {
            return None;
        }
        let child_ids = self.children.get(id).cloned().unwrap_or_default();
        let children = child_ids
            .into_iter()
            .filter_map(|child| self.build(child))
            .collect();
        Some(TreeNode {
            id: node.id.clone(),
            label: node.label.clone(),
            node_type: node.node_type,
            children,
        })
    }
}

/// Forest of trees covering every node exactly once.
pub fn build(extraction: &Extraction) -> Vec<TreeNode> {
    let mut walker = Walker::new(extraction);
    Walker::roots(extraction)
        .filter_map(|id| walker.build(id))
        .collect()
}

fn line_label(node: &TreeNode) -> String {
    match node.node_type {
        NodeKind::Element => node.label.clone(),
        NodeKind::Text => format!("\"{}\"", node.label),
        other => format!("{} ({other})", node.label),
    }
}

fn write_children(out: &mut String, children: &[TreeNode], prefix: &str) {
    for (i, child) in children.iter().enumerate() {
        let last = i + 1 == children.len();
        out.push_str(prefix);
        out.push_str(if last { "└── " } else { "├── " });
        out.push_str(&line_label(child));
        out.push('\n');
        let nested = format!("{prefix}{}", if last { "    " } else { "│   " });
        write_children(out, &child.children, &nested);
    }
}

/// Box-drawing text rendering of [`build`].
pub fn render_text(extraction: &Extraction) -> String {
    let mut out = String::new();
    for root in build(extraction) {
        out.push_str(&line_label(&root));
        out.push('\n');
        write_children(&mut out, &root.children, "");
    }
    out
}
