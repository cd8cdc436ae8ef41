//! [`Document`] → HTML.
//!
//! Layout rules, which keep `to_html(from_html(to_html(from_html(h))))`
//! byte-identical to `to_html(from_html(h))`:
//! - an element with no children is `<tag></tag>`, a void element `<tag />`;
//! - an element with any text child is written inline, with no added whitespace;
//! - an element with only element children is written as a block, one child
//!   per line, four spaces per level.
//!
//! Re-parsing a block only adds whitespace-only text, which ingestion drops.

use crate::dom::HtmlNode;
use crate::graph::NodeId;
use crate::model::{Document, ElementGraph, Section};

const INDENT: &str = "    ";

/// Elements whose text the parser keeps raw, so it is never escaped.
const RAW_TEXT_TAGS: &[&str] = &[
    "script", "style", "noscript", "xmp", "iframe", "noembed", "noframes", "plaintext",
];

/// Elements where the parser drops one leading newline.
const NEWLINE_SENSITIVE_TAGS: &[&str] = &["pre", "textarea", "listing"];

pub fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Render the document as pretty-printed HTML with a doctype prologue.
pub fn to_html(doc: &Document) -> String {
    let writer = HtmlWriter { doc };
    let mut out = String::from("<!DOCTYPE html>\n<html");
    writer.write_attrs(doc.root_id(), &mut out);
    out.push_str(">\n");
    for (section, tag) in [(Section::Head, "head"), (Section::Body, "body")] {
        match doc.graph(section).root() {
            Some(root) => writer.write_block(section, root, 1, &mut out),
            None => {
                out.push_str(INDENT);
                out.push_str(&format!("<{tag}></{tag}>\n"));
            }
        }
    }
    out.push_str("</html>\n");
    out
}

/// Rebuild the dict-shaped parse tree, rooted at `<html>`.
pub fn to_html_dict(doc: &Document) -> HtmlNode {
    let writer = HtmlWriter { doc };
    let mut html = writer.dict_element(None, doc.root_id(), "html");
    for section in [Section::Head, Section::Body] {
        if let Some(root) = doc.graph(section).root() {
            let tag = match section {
                Section::Head => "head",
                Section::Body => "body",
            };
            html.nodes.push(writer.dict_element(Some(section), root, tag));
        }
    }
    html
}

struct HtmlWriter<'a> {
    doc: &'a Document,
}

impl<'a> HtmlWriter<'a> {
    fn tag(&self, graph: &ElementGraph, id: NodeId) -> String {
        match self.doc.tag(id) {
            Some(tag) => tag.to_string(),
            None => graph
                .graph()
                .node_path(id)
                .map(|p| p.last_segment().to_string())
                .unwrap_or_default(),
        }
    }

    /// Inline source of a registered script or style element.
    fn resource_content(&self, tag: &str, id: NodeId) -> Option<&'a str> {
        match tag {
            "script" => self.doc.script_content(id),
            "style" => self.doc.style_content(id),
            _ => None,
        }
    }

    fn write_attrs(&self, id: NodeId, out: &mut String) {
        for (name, value) in self.doc.attributes_of(id).iter() {
            out.push(' ');
            out.push_str(name);
            if let Some(value) = value {
                out.push_str("=\"");
                out.push_str(&escape_attr(value));
                out.push('"');
            }
        }
    }

    fn write_open(&self, tag: &str, id: NodeId, out: &mut String) {
        out.push('<');
        out.push_str(tag);
        self.write_attrs(id, out);
    }

    fn write_block(&self, section: Section, id: NodeId, depth: usize, out: &mut String) {
        let graph = self.doc.graph(section);
        let tag = self.tag(graph, id);
        let indent = INDENT.repeat(depth);

        out.push_str(&indent);
        self.write_open(&tag, id, out);
        if is_void_element(&tag) {
            out.push_str(" />\n");
            return;
        }
        out.push('>');

        let children = graph.children(id);
        if let Some(content) = self.resource_content(&tag, id) {
            out.push_str(content);
        } else if children.iter().any(|c| graph.is_text_node(*c)) {
            self.write_inline_children(section, id, &tag, out);
        } else if !children.is_empty() {
            out.push('\n');
            for child in children {
                self.write_block(section, child, depth + 1, out);
            }
            out.push_str(&indent);
        }
        out.push_str(&format!("</{tag}>\n"));
    }

    fn write_inline(&self, section: Section, id: NodeId, out: &mut String) {
        let graph = self.doc.graph(section);
        let tag = self.tag(graph, id);
        self.write_open(&tag, id, out);
        if is_void_element(&tag) {
            out.push_str(" />");
            return;
        }
        out.push('>');
        match self.resource_content(&tag, id) {
            Some(content) => out.push_str(content),
            None => self.write_inline_children(section, id, &tag, out),
        }
        out.push_str(&format!("</{tag}>"));
    }

    fn write_inline_children(&self, section: Section, id: NodeId, tag: &str, out: &mut String) {
        let graph = self.doc.graph(section);
        let raw = RAW_TEXT_TAGS.contains(&tag);
        for (i, child) in graph.children(id).into_iter().enumerate() {
            if graph.is_text_node(child) {
                let text = graph.graph().node_value(child).unwrap_or_default();
                if i == 0 && NEWLINE_SENSITIVE_TAGS.contains(&tag) && text.starts_with('\n') {
                    out.push('\n');
                }
                if raw {
                    out.push_str(text);
                } else {
                    out.push_str(&escape_text(text));
                }
            } else {
                self.write_inline(section, child, out);
            }
        }
    }

    fn dict_element(&self, section: Option<Section>, id: NodeId, fallback_tag: &str) -> HtmlNode {
        let mut node = HtmlNode::new_element(self.doc.tag(id).unwrap_or(fallback_tag));
        node.attrs = self.doc.attributes_of(id);
        if let Some(content) = self.resource_content(&node.tag, id) {
            node.nodes.push(HtmlNode::new_text(content));
            return node;
        }
        let Some(section) = section else {
            return node;
        };
        let graph = self.doc.graph(section);
        for child in graph.children(id) {
            if graph.is_text_node(child) {
                let text = graph.graph().node_value(child).unwrap_or_default();
                node.nodes.push(HtmlNode::new_text(text));
            } else {
                let tag = self.tag(graph, child);
                node.nodes.push(self.dict_element(Some(section), child, &tag));
            }
        }
        node
    }
}

fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}
