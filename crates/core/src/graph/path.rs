//! Node paths: the small tagged string grammar every node carries.
//!
//! ```text
//! html.body.div[1].p   element in the DOM hierarchy
//! text                 text literal
//! tag:div              tag-name value node
//! attr:class           legacy attribute path
//! element:<id>         anchor re-referencing a node owned elsewhere
//! script:<id>, style:<id>
//! 0, 1, 2              positional instance
//! attributes, scripts, styles   fixed roots
//! name, value          attribute name/value nodes
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use super::NodeId;
use crate::error::GraphError;

pub const TEXT: &str = "text";
pub const NAME: &str = "name";
pub const VALUE: &str = "value";
pub const ATTRIBUTES_ROOT: &str = "attributes";
pub const SCRIPTS_ROOT: &str = "scripts";
pub const STYLES_ROOT: &str = "styles";

const TAG_PREFIX: &str = "tag:";
const ATTR_PREFIX: &str = "attr:";
const ELEMENT_PREFIX: &str = "element:";
const SCRIPT_PREFIX: &str = "script:";
const STYLE_PREFIX: &str = "style:";

/// What a path says about its node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodePathKind {
    Element,
    Text,
    Tag,
    LegacyAttr,
    ElementAnchor,
    ScriptAnchor,
    StyleAnchor,
    Position,
    Root,
    Name,
    Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodePath(String);

impl NodePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn text() -> Self {
        Self::new(TEXT)
    }

    pub fn tag(name: &str) -> Self {
        Self(format!("{TAG_PREFIX}{name}"))
    }

    pub fn element_anchor(id: NodeId) -> Self {
        Self(format!("{ELEMENT_PREFIX}{id}"))
    }

    pub fn script_anchor(id: NodeId) -> Self {
        Self(format!("{SCRIPT_PREFIX}{id}"))
    }

    pub fn style_anchor(id: NodeId) -> Self {
        Self(format!("{STYLE_PREFIX}{id}"))
    }

    pub fn position(position: usize) -> Self {
        Self(position.to_string())
    }

    /// Path of a child element: `parent.tag` or `parent.tag[index]`.
    pub fn child(&self, tag: &str, index: Option<usize>) -> Self {
        let segment = match index {
            Some(i) => format!("{tag}[{i}]"),
            None => tag.to_string(),
        };
        if self.0.is_empty() {
            Self(segment)
        } else {
            Self(format!("{}.{}", self.0, segment))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> NodePathKind {
        let p = self.0.as_str();
        match p {
            TEXT => NodePathKind::Text,
            NAME => NodePathKind::Name,
            VALUE => NodePathKind::Value,
            ATTRIBUTES_ROOT | SCRIPTS_ROOT | STYLES_ROOT => NodePathKind::Root,
            _ if p.starts_with(TAG_PREFIX) => NodePathKind::Tag,
            _ if p.starts_with(ATTR_PREFIX) => NodePathKind::LegacyAttr,
            _ if p.starts_with(ELEMENT_PREFIX) => NodePathKind::ElementAnchor,
            _ if p.starts_with(SCRIPT_PREFIX) => NodePathKind::ScriptAnchor,
            _ if p.starts_with(STYLE_PREFIX) => NodePathKind::StyleAnchor,
            _ if !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()) => NodePathKind::Position,
            _ => NodePathKind::Element,
        }
    }

    pub fn is_text(&self) -> bool {
        self.0 == TEXT
    }

    pub fn is_anchor(&self) -> bool {
        matches!(
            self.kind(),
            NodePathKind::ElementAnchor | NodePathKind::ScriptAnchor | NodePathKind::StyleAnchor
        )
    }

    /// DOM depth: `count('.') + 1` for element paths, 0 for anything else.
    pub fn depth(&self) -> usize {
        match self.kind() {
            NodePathKind::Element => self.0.matches('.').count() + 1,
            _ => 0,
        }
    }

    /// Last dotted segment with any `[n]` suffix removed.
    pub fn last_segment(&self) -> &str {
        let last = self.0.rsplit('.').next().unwrap_or("");
        match last.find('[') {
            Some(i) => &last[..i],
            None => last,
        }
    }

    /// Decimal position of an instance node.
    pub fn as_position(&self) -> Option<usize> {
        match self.kind() {
            NodePathKind::Position => self.0.parse().ok(),
            _ => None,
        }
    }

    /// Tag name of a `tag:NAME` path.
    pub fn tag_name(&self) -> Option<&str> {
        self.0.strip_prefix(TAG_PREFIX)
    }

    /// NodeId referenced by an anchor path; `None` for non-anchor paths.
    pub fn anchor_target(&self) -> Result<Option<NodeId>, GraphError> {
        let rest = [ELEMENT_PREFIX, SCRIPT_PREFIX, STYLE_PREFIX]
            .iter()
            .find_map(|prefix| self.0.strip_prefix(prefix));
        match rest {
            None => Ok(None),
            Some(raw) => NodeId::parse_str(raw)
                .map(Some)
                .ok_or_else(|| GraphError::InvalidPath(self.0.clone())),
        }
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
