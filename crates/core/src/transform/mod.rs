//! Named transformations applied around an export.
//!
//! A transformation may hook four points of the pipeline: the raw HTML before
//! parsing, the choice of component graphs to extract, the render config for
//! a given engine, and the extraction right before emission. Every hook
//! defaults to a no-op.

use std::fmt;

use tracing::debug;

use crate::error::TransformError;
use crate::extract::{Extraction, GraphSelection, NodeKind};
use crate::model::{Document, GraphSource};
use crate::render::{ColorScheme, Preset, RenderConfig};

/// Export engine a transformation is configuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Engine {
    Dot,
    VisJs,
    D3,
    Cytoscape,
    Mermaid,
    Tree,
}

impl Engine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Dot => "dot",
            Engine::VisJs => "visjs",
            Engine::D3 => "d3",
            Engine::Cytoscape => "cytoscape",
            Engine::Mermaid => "mermaid",
            Engine::Tree => "tree",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait Transformation: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn preprocess_html(&self, html: String) -> String {
        html
    }

    fn preprocess_graph(&self, _doc: &Document) -> GraphSelection {
        GraphSelection::ALL
    }

    fn configure(&self, _engine: Engine, _config: &mut RenderConfig) {}

    fn postprocess(&self, _engine: Engine, _extraction: &mut Extraction) {}
}

struct Passthrough;

impl Transformation for Passthrough {
    fn name(&self) -> &'static str {
        "default"
    }

    fn description(&self) -> &'static str {
        "All graphs with the caller's configuration"
    }
}

struct BodyOnly;

impl Transformation for BodyOnly {
    fn name(&self) -> &'static str {
        "body_only"
    }

    fn description(&self) -> &'static str {
        "Body structure with its attributes and scripts"
    }

    fn preprocess_graph(&self, _doc: &Document) -> GraphSelection {
        GraphSelection::only(&[GraphSource::Body, GraphSource::Attrs, GraphSource::Scripts])
    }
}

struct HeadOnly;

impl Transformation for HeadOnly {
    fn name(&self) -> &'static str {
        "head_only"
    }

    fn description(&self) -> &'static str {
        "Head structure with its attributes, scripts and styles"
    }

    fn preprocess_graph(&self, _doc: &Document) -> GraphSelection {
        GraphSelection::only(&[
            GraphSource::Head,
            GraphSource::Attrs,
            GraphSource::Scripts,
            GraphSource::Styles,
        ])
    }
}

struct FullDocument;

impl Transformation for FullDocument {
    fn name(&self) -> &'static str {
        "document"
    }

    fn description(&self) -> &'static str {
        "Every node and edge of the document"
    }

    fn configure(&self, _engine: Engine, config: &mut RenderConfig) {
        config.apply_preset(Preset::FullDetail);
    }
}

struct Attributes;

impl Transformation for Attributes {
    fn name(&self) -> &'static str {
        "attributes"
    }

    fn description(&self) -> &'static str {
        "Elements and their attributes, without text"
    }

    fn preprocess_graph(&self, _doc: &Document) -> GraphSelection {
        GraphSelection::only(&[GraphSource::Body, GraphSource::Head, GraphSource::Attrs])
    }

    fn configure(&self, _engine: Engine, config: &mut RenderConfig) {
        config.show_attr_nodes = true;
        config.show_attr_edges = true;
        config.show_text_nodes = false;
        config.show_text_edges = false;
    }
}

struct Scripts;

impl Transformation for Scripts {
    fn name(&self) -> &'static str {
        "scripts"
    }

    fn description(&self) -> &'static str {
        "Element structure with inline script sources"
    }

    fn preprocess_graph(&self, _doc: &Document) -> GraphSelection {
        GraphSelection::only(&[GraphSource::Body, GraphSource::Head, GraphSource::Scripts])
    }

    fn configure(&self, _engine: Engine, config: &mut RenderConfig) {
        config.apply_preset(Preset::StructureOnly);
    }
}

struct Styles;

impl Transformation for Styles {
    fn name(&self) -> &'static str {
        "styles"
    }

    fn description(&self) -> &'static str {
        "Head structure with inline stylesheets"
    }

    fn preprocess_graph(&self, _doc: &Document) -> GraphSelection {
        GraphSelection::only(&[GraphSource::Head, GraphSource::Styles])
    }

    fn configure(&self, _engine: Engine, config: &mut RenderConfig) {
        config.apply_preset(Preset::StructureOnly);
    }
}

struct StructureOnly;

impl Transformation for StructureOnly {
    fn name(&self) -> &'static str {
        "structure_only"
    }

    fn description(&self) -> &'static str {
        "Element tree only"
    }

    fn configure(&self, _engine: Engine, config: &mut RenderConfig) {
        config.apply_preset(Preset::StructureOnly);
    }
}

struct Clean;

impl Transformation for Clean {
    fn name(&self) -> &'static str {
        "clean"
    }

    fn description(&self) -> &'static str {
        "Comment-free monochrome rendering with text"
    }

    fn preprocess_html(&self, html: String) -> String {
        strip_comments(&html)
    }

    fn configure(&self, _engine: Engine, config: &mut RenderConfig) {
        config.apply_preset(Preset::Minimal);
        config.color_scheme = ColorScheme::Monochrome;
    }
}

struct Compact;

impl Transformation for Compact {
    fn name(&self) -> &'static str {
        "compact"
    }

    fn description(&self) -> &'static str {
        "Dense layout with short labels"
    }

    fn configure(&self, engine: Engine, config: &mut RenderConfig) {
        config.apply_preset(Preset::Minimal);
        config.max_text_length = 15;
        config.show_tag_brackets = false;
        if engine == Engine::Dot {
            config.dot.nodesep = 0.15;
            config.dot.ranksep = 0.25;
            config.dot.max_label_length = 20;
        }
    }

    fn postprocess(&self, _engine: Engine, extraction: &mut Extraction) {
        extraction.retain_nodes(|n| n.node_type != NodeKind::Text || !n.label.trim().is_empty());
    }
}

struct Expanded;

impl Transformation for Expanded {
    fn name(&self) -> &'static str {
        "expanded"
    }

    fn description(&self) -> &'static str {
        "Full detail with long labels and wide spacing"
    }

    fn configure(&self, engine: Engine, config: &mut RenderConfig) {
        config.apply_preset(Preset::FullDetail);
        config.max_text_length = 60;
        if engine == Engine::Dot {
            config.dot.nodesep = 0.6;
            config.dot.ranksep = 1.0;
            config.dot.max_label_length = 80;
        }
    }
}

static REGISTRY: &[&dyn Transformation] = &[
    &Passthrough,
    &BodyOnly,
    &HeadOnly,
    &FullDocument,
    &Attributes,
    &Scripts,
    &Styles,
    &StructureOnly,
    &Clean,
    &Compact,
    &Expanded,
];

/// Look up a registered transformation by name.
pub fn transformation(name: &str) -> Result<&'static dyn Transformation, TransformError> {
    let found = REGISTRY.iter().copied().find(|t| t.name() == name);
    match found {
        Some(t) => {
            debug!(transformation = name, "resolved transformation");
            Ok(t)
        }
        None => Err(TransformError::Unknown(name.to_string())),
    }
}

/// Registered names in registry order.
pub fn transformation_names() -> Vec<&'static str> {
    REGISTRY.iter().map(|t| t.name()).collect()
}

/// Remove `<!-- ... -->` comments. An unterminated comment runs to the end.
pub fn strip_comments(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(start) = rest.find("<!--") {
        out.push_str(&rest[..start]);
        match rest[start + 4..].find("-->") {
            Some(end) => rest = &rest[start + 4 + end + 3..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}
