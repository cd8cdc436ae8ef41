//! HTML parsing into an owned, dict-shaped tree.
//!
//! html5ever does the tag-soup recovery; the result is converted straight
//! into [`HtmlNode`]s so nothing reference-counted outlives parsing. The same
//! tree is what `from_html_dict` accepts and `to_html_dict` produces:
//!
//! ```text
//! {"tag": "div", "attrs": {"class": "a"}, "nodes": [{"type": "TEXT", "data": "Hi"}]}
//! ```

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use markup5ever::Attribute;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::error::ParseError;
use crate::model::AttributeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Element,
    Text,
    Document,
}

/// A node of the parse tree.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlNode {
    pub tag: String,
    pub attrs: AttributeMap,
    pub data: String,
    pub nodes: Vec<HtmlNode>,
    pub node_type: NodeType,
}

impl HtmlNode {
    pub fn new_element(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: AttributeMap::new(),
            data: String::new(),
            nodes: Vec::new(),
            node_type: NodeType::Element,
        }
    }

    pub fn new_text(text: &str) -> Self {
        Self {
            tag: String::new(),
            attrs: AttributeMap::new(),
            data: text.to_string(),
            nodes: Vec::new(),
            node_type: NodeType::Text,
        }
    }

    pub fn new_document() -> Self {
        Self {
            tag: String::new(),
            attrs: AttributeMap::new(),
            data: String::new(),
            nodes: Vec::new(),
            node_type: NodeType::Document,
        }
    }

    pub fn with_attr(mut self, name: &str, value: Option<&str>) -> Self {
        self.attrs.push(name, value.map(str::to_string));
        self
    }

    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Case-insensitive tag comparison.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.is_element() && self.tag.eq_ignore_ascii_case(tag)
    }

    /// First direct element child with the given tag.
    pub fn find_child(&self, tag: &str) -> Option<&HtmlNode> {
        self.nodes.iter().find(|n| n.has_tag(tag))
    }

    /// Read a dict-shaped JSON value, dropping children that are not dicts or
    /// have no recognisable shape. Returns `None` when `value` itself is one.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let tag = obj.get("tag").and_then(Value::as_str);
        let data = obj.get("data").and_then(Value::as_str);
        let node_type = obj.get("type").and_then(Value::as_str);

        if node_type.is_some_and(|t| t.eq_ignore_ascii_case("TEXT")) || (data.is_some() && tag.is_none()) {
            return Some(Self::new_text(data.unwrap_or_default()));
        }

        let children: Vec<HtmlNode> = obj
            .get("nodes")
            .and_then(Value::as_array)
            .map(|nodes| nodes.iter().filter_map(Self::from_value).collect())
            .unwrap_or_default();

        let mut node = match tag {
            Some(tag) => {
                let mut el = Self::new_element(&tag.to_ascii_lowercase());
                el.attrs = obj.get("attrs").map(attrs_from_value).unwrap_or_default();
                el
            }
            None if obj.contains_key("nodes") => Self::new_document(),
            None => return None,
        };
        node.nodes = children;
        Some(node)
    }
}

/// Accepts `{"name": "value" | null}` or `[["name", "value" | null], ...]`.
fn attrs_from_value(value: &Value) -> AttributeMap {
    let as_attr_value = |v: &Value| match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    };
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(name, v)| (name.clone(), as_attr_value(v)))
            .collect(),
        Value::Array(pairs) => pairs
            .iter()
            .filter_map(|pair| {
                let pair = pair.as_array()?;
                let name = pair.first()?.as_str()?;
                Some((name.to_string(), pair.get(1).and_then(as_attr_value)))
            })
            .collect(),
        _ => AttributeMap::new(),
    }
}

impl Serialize for HtmlNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self.node_type {
            NodeType::Text => {
                map.serialize_entry("type", "TEXT")?;
                map.serialize_entry("data", &self.data)?;
            }
            NodeType::Document => {
                map.serialize_entry("type", "DOCUMENT")?;
                map.serialize_entry("nodes", &self.nodes)?;
            }
            NodeType::Element => {
                map.serialize_entry("tag", &self.tag)?;
                map.serialize_entry("attrs", &self.attrs)?;
                map.serialize_entry("nodes", &self.nodes)?;
            }
        }
        map.end()
    }
}

/// Parse an HTML string into an [`HtmlNode`] document tree.
pub fn parse_html(html: &str) -> Result<HtmlNode, ParseError> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };

    let dom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut html.as_bytes())?;

    let mut root = convert_node(&dom.document).unwrap_or_else(HtmlNode::new_document);
    trim_body_tail(&mut root);
    Ok(root)
}

/// Whitespace after `</body>` and `</html>` is appended to the body's last
/// text node by the tree builder. Trailing whitespace there is dropped so a
/// re-parsed document does not grow.
fn trim_body_tail(doc: &mut HtmlNode) {
    let Some(body) = doc
        .nodes
        .iter_mut()
        .find(|n| n.has_tag("html"))
        .and_then(|html| html.nodes.iter_mut().find(|n| n.has_tag("body")))
    else {
        return;
    };
    if body.nodes.last().is_some_and(HtmlNode::is_text) {
        let trimmed = body.nodes.last().map(|n| n.data.trim_end().len()).unwrap_or(0);
        if trimmed == 0 {
            body.nodes.pop();
        } else if let Some(last) = body.nodes.last_mut() {
            last.data.truncate(trimmed);
        }
    }
}

/// `<plaintext>` swallows the rest of the input, closing tags included.
/// Strip the trailing run of whitespace and `</name>` tags from its text.
fn strip_closing_tags(text: &str) -> &str {
    let mut rest = text.trim_end();
    while let Some(inner) = rest.strip_suffix('>') {
        let Some(open) = inner.rfind("</") else {
            break;
        };
        let name = &inner[open + 2..];
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
            break;
        }
        rest = inner[..open].trim_end();
    }
    rest
}

fn convert_node(handle: &Handle) -> Option<HtmlNode> {
    match &handle.data {
        NodeData::Document => {
            let mut doc = HtmlNode::new_document();
            doc.nodes = convert_children(handle);
            Some(doc)
        }
        NodeData::Element { name, attrs, .. } => {
            let mut node = HtmlNode::new_element(&name.local);
            node.attrs = attrs.borrow().iter().map(convert_attr).collect();
            node.nodes = convert_children(handle);
            if node.tag == "plaintext" {
                for text in node.nodes.iter_mut().filter(|n| n.is_text()) {
                    text.data = strip_closing_tags(&text.data).to_string();
                }
                node.nodes.retain(|n| !n.is_text() || !n.data.is_empty());
            }
            Some(node)
        }
        NodeData::Text { contents } => Some(HtmlNode::new_text(&contents.borrow())),
        // Comments, doctypes, processing instructions
        _ => None,
    }
}

fn convert_children(handle: &Handle) -> Vec<HtmlNode> {
    handle
        .children
        .borrow()
        .iter()
        .filter_map(convert_node)
        .collect()
}

/// html5ever reports valueless attributes as `""`; those become boolean.
fn convert_attr(attr: &Attribute) -> (String, Option<String>) {
    let name = match &attr.name.prefix {
        Some(prefix) => format!("{}:{}", prefix, attr.name.local),
        None => attr.name.local.to_string(),
    };
    let value = if attr.value.is_empty() {
        None
    } else {
        Some(attr.value.to_string())
    };
    (name, value)
}
