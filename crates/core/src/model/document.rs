use std::fmt;

use serde::Serialize;

use super::attributes::{AttributeMap, AttributesGraph};
use super::element::{ElementGraph, Section};
use super::resources::{ScriptsGraph, StylesGraph};
use super::stats::DocumentStats;
use crate::graph::{IdGenerator, NodeId, NodePath};

/// The component graph a node or edge comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphSource {
    Body,
    Head,
    Attrs,
    Scripts,
    Styles,
}

impl GraphSource {
    pub const ALL: [GraphSource; 5] = [
        GraphSource::Body,
        GraphSource::Head,
        GraphSource::Attrs,
        GraphSource::Scripts,
        GraphSource::Styles,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GraphSource::Body => "body",
            GraphSource::Head => "head",
            GraphSource::Attrs => "attrs",
            GraphSource::Scripts => "scripts",
            GraphSource::Styles => "styles",
        }
    }
}

impl fmt::Display for GraphSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the document knows about one element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementInfo {
    pub node_id: NodeId,
    pub tag: Option<String>,
    pub attributes: AttributeMap,
    pub in_head: bool,
    pub in_body: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_content: Option<String>,
}

/// An HTML document split into five graphs that share node ids.
///
/// The `<html>` element is owned by the Body graph (path `html`) and linked to
/// the body root at position 1. The Head graph holds an anchor for it linking
/// to the head root at position 0.
#[derive(Debug)]
pub struct Document {
    root: NodeId,
    ids: IdGenerator,
    body: ElementGraph,
    head: ElementGraph,
    attributes: AttributesGraph,
    scripts: ScriptsGraph,
    styles: StylesGraph,
}

pub(crate) const HEAD_POSITION: usize = 0;
pub(crate) const BODY_POSITION: usize = 1;

impl Document {
    pub fn new(ids: IdGenerator) -> Self {
        let mut body = ElementGraph::new(Section::Body, ids.clone());
        let mut head = ElementGraph::new(Section::Head, ids.clone());
        let root = ids.next_id();
        let attributes = AttributesGraph::new(ids.clone(), root);
        let scripts = ScriptsGraph::new(ids.clone());
        let styles = StylesGraph::new(ids.clone());

        body.create_element(NodePath::new("html"), Some(root));
        head.create_anchor(root);

        Self {
            root,
            ids,
            body,
            head,
            attributes,
            scripts,
            styles,
        }
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn ids(&self) -> &IdGenerator {
        &self.ids
    }

    pub fn body(&self) -> &ElementGraph {
        &self.body
    }

    pub fn head(&self) -> &ElementGraph {
        &self.head
    }

    pub fn attributes(&self) -> &AttributesGraph {
        &self.attributes
    }

    pub fn scripts(&self) -> &ScriptsGraph {
        &self.scripts
    }

    pub fn styles(&self) -> &StylesGraph {
        &self.styles
    }

    pub(crate) fn body_mut(&mut self) -> &mut ElementGraph {
        &mut self.body
    }

    pub(crate) fn head_mut(&mut self) -> &mut ElementGraph {
        &mut self.head
    }

    pub(crate) fn attributes_mut(&mut self) -> &mut AttributesGraph {
        &mut self.attributes
    }

    pub(crate) fn scripts_mut(&mut self) -> &mut ScriptsGraph {
        &mut self.scripts
    }

    pub(crate) fn styles_mut(&mut self) -> &mut StylesGraph {
        &mut self.styles
    }

    pub fn graph(&self, section: Section) -> &ElementGraph {
        match section {
            Section::Body => &self.body,
            Section::Head => &self.head,
        }
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.attributes.tag(id)
    }

    pub fn attributes_of(&self, id: NodeId) -> AttributeMap {
        self.attributes.attributes(id)
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<Option<String>> {
        self.attributes.attribute(id, name)
    }

    pub fn text_content(&self, id: NodeId, in_head: bool) -> String {
        if in_head {
            self.head.text_content(id)
        } else {
            self.body.text_content(id)
        }
    }

    pub fn script_content(&self, id: NodeId) -> Option<&str> {
        self.scripts.script_content(id)
    }

    pub fn style_content(&self, id: NodeId) -> Option<&str> {
        self.styles.style_content(id)
    }

    pub fn is_in_head(&self, id: NodeId) -> bool {
        self.head.owns_element(id)
    }

    pub fn is_in_body(&self, id: NodeId) -> bool {
        self.body.owns_element(id)
    }

    pub fn element_info(&self, id: NodeId) -> Option<ElementInfo> {
        let in_head = self.is_in_head(id);
        let in_body = self.is_in_body(id);
        if !in_head && !in_body {
            return None;
        }
        Some(ElementInfo {
            node_id: id,
            tag: self.tag(id).map(str::to_string),
            attributes: self.attributes_of(id),
            in_head,
            in_body,
            script_content: self.script_content(id).map(str::to_string),
            style_content: self.style_content(id).map(str::to_string),
        })
    }

    pub fn stats(&self) -> DocumentStats {
        DocumentStats {
            root_id: self.root,
            body: self.body.stats(),
            head: self.head.stats(),
            attributes: self.attributes.stats(),
            scripts: self.scripts.stats(),
            styles: self.styles.stats(),
        }
    }
}
