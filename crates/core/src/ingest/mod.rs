//! HTML → [`Document`] ingestion.
//!
//! Walks an [`HtmlNode`] tree and splits it into the five component graphs.
//! Malformed sub-trees are logged and skipped; ingestion itself never fails.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use crate::dom::{self, HtmlNode};
use crate::error::{GraphError, ParseError};
use crate::graph::{IdGenerator, NodeId, NodePath};
use crate::model::{Document, ElementGraph, Section, BODY_POSITION, HEAD_POSITION};

pub fn from_html(html: &str) -> Result<Document, ParseError> {
    from_html_with(html, IdGenerator::default())
}

pub fn from_html_with(html: &str, ids: IdGenerator) -> Result<Document, ParseError> {
    let tree = dom::parse_html(html)?;
    Ok(ingest(&tree, ids))
}

/// Build a document from a pre-parsed dict tree.
pub fn from_html_dict(value: &Value) -> Result<Document, ParseError> {
    from_html_dict_with(value, IdGenerator::default())
}

pub fn from_html_dict_with(value: &Value, ids: IdGenerator) -> Result<Document, ParseError> {
    let tree = match value {
        Value::Object(_) => HtmlNode::from_value(value).unwrap_or_else(HtmlNode::new_document),
        Value::Null => return Err(ParseError::NotAnObject("null")),
        Value::Bool(_) => return Err(ParseError::NotAnObject("a boolean")),
        Value::Number(_) => return Err(ParseError::NotAnObject("a number")),
        Value::String(_) => return Err(ParseError::NotAnObject("a string")),
        Value::Array(_) => return Err(ParseError::NotAnObject("an array")),
    };
    Ok(ingest(&tree, ids))
}

/// Split a parse tree into a new document.
pub fn ingest(tree: &HtmlNode, ids: IdGenerator) -> Document {
    let mut ingester = Ingester {
        doc: Document::new(ids),
    };
    ingester.run(tree);
    let doc = ingester.doc;
    let stats = doc.stats();
    debug!(
        body_elements = stats.body.element_nodes,
        head_elements = stats.head.element_nodes,
        text_nodes = stats.body.text_nodes + stats.head.text_nodes,
        attributes = stats.attributes.total_attributes,
        scripts = stats.scripts.total_scripts,
        styles = stats.styles.total_styles,
        "ingested html document"
    );
    doc
}

fn find_html(tree: &HtmlNode) -> Option<&HtmlNode> {
    if tree.has_tag("html") {
        Some(tree)
    } else {
        tree.find_child("html")
    }
}

/// Direct text of `node`, or `None` when it is all whitespace.
fn inline_text(node: &HtmlNode) -> Option<String> {
    let text: String = node
        .nodes
        .iter()
        .filter(|n| n.is_text())
        .map(|n| n.data.as_str())
        .collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Tags that occur more than once among `node`'s element children.
fn repeated_tags(node: &HtmlNode) -> HashMap<String, usize> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for child in node.nodes.iter().filter(|n| n.is_element()) {
        *counts.entry(child.tag.to_ascii_lowercase()).or_default() += 1;
    }
    counts.retain(|_, count| *count > 1);
    counts
}

struct Ingester {
    doc: Document,
}

impl Ingester {
    fn run(&mut self, tree: &HtmlNode) {
        let Some(html) = find_html(tree) else {
            debug!("no <html> element; document left empty");
            return;
        };
        let root = self.doc.root_id();
        if let Err(err) = self.register_attributes(root, html) {
            warn!(error = %err, "skipping <html> attributes");
        }
        if let Some(head) = html.find_child("head") {
            if let Err(err) = self.ingest_root(Section::Head, head) {
                warn!(error = %err, "skipping malformed <head>");
            }
        }
        if let Some(body) = html.find_child("body") {
            if let Err(err) = self.ingest_root(Section::Body, body) {
                warn!(error = %err, "skipping malformed <body>");
            }
        }
    }

    fn graph(&mut self, section: Section) -> &mut ElementGraph {
        match section {
            Section::Body => self.doc.body_mut(),
            Section::Head => self.doc.head_mut(),
        }
    }

    fn ingest_root(&mut self, section: Section, node: &HtmlNode) -> Result<(), GraphError> {
        let html = self.doc.root_id();
        let (tag, position) = match section {
            Section::Head => ("head", HEAD_POSITION),
            Section::Body => ("body", BODY_POSITION),
        };
        let path = NodePath::new("html").child(tag, None);
        let id = self.doc.ids().next_id();

        let graph = self.graph(section);
        graph.create_element(path.clone(), Some(id));
        graph.set_root(id)?;
        graph.add_child(html, id, position)?;
        self.doc.attributes_mut().register_element(id, tag)?;
        self.register_attributes(id, node)?;

        self.walk(section, id, &path, node);
        Ok(())
    }

    fn register_attributes(&mut self, id: NodeId, node: &HtmlNode) -> Result<(), GraphError> {
        let attributes = self.doc.attributes_mut();
        for (position, (name, value)) in node.attrs.iter().enumerate() {
            attributes.add_attribute(id, name, value, position)?;
        }
        Ok(())
    }

    fn walk(&mut self, section: Section, parent: NodeId, parent_path: &NodePath, node: &HtmlNode) {
        let repeated = match section {
            Section::Body => repeated_tags(node),
            Section::Head => HashMap::new(),
        };
        let mut seen: HashMap<String, usize> = HashMap::new();

        for (position, child) in node.nodes.iter().enumerate() {
            if child.is_text() {
                if child.data.trim().is_empty() {
                    continue;
                }
                if let Err(err) = self.graph(section).create_text(&child.data, parent, position) {
                    warn!(error = %err, "skipping text node");
                }
            } else if child.is_element() {
                let tag = child.tag.to_ascii_lowercase();
                let index = repeated.contains_key(&tag).then(|| {
                    let slot = seen.entry(tag.clone()).or_default();
                    let index = *slot;
                    *slot += 1;
                    index
                });
                let path = parent_path.child(&tag, index);
                if let Err(err) = self.ingest_element(section, parent, path, &tag, child, position) {
                    warn!(error = %err, tag = %tag, "skipping malformed element");
                }
            }
        }
    }

    fn ingest_element(
        &mut self,
        section: Section,
        parent: NodeId,
        path: NodePath,
        tag: &str,
        node: &HtmlNode,
        position: usize,
    ) -> Result<(), GraphError> {
        let id = self.doc.ids().next_id();
        let graph = self.graph(section);
        graph.create_element(path.clone(), Some(id));
        graph.add_child(parent, id, position)?;
        self.doc.attributes_mut().register_element(id, tag)?;
        self.register_attributes(id, node)?;

        match (tag, section) {
            ("script", _) => {
                self.doc
                    .scripts_mut()
                    .register_script(id, inline_text(node).as_deref())?;
            }
            ("style", Section::Head) => {
                self.doc
                    .styles_mut()
                    .register_style(id, inline_text(node).as_deref())?;
            }
            ("link", Section::Head) => {
                self.doc.styles_mut().register_link(id)?;
            }
            _ => self.walk(section, id, &path, node),
        }
        Ok(())
    }
}
