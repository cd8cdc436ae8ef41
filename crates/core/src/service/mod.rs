//! Pure-function export surface: one call per output format.
//!
//! Graph exports take an optional transformation name (`None` means
//! `default`). The transformation may override the render config for the
//! engine, narrow the set of component graphs and post-process the extraction.

mod dump;

pub use dump::{DocumentDump, EdgeDump, GraphDump, NodeDump};

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::export::{self, CytoscapeGraph, D3Graph, TreeNode, VisJsGraph};
use crate::extract::{Extraction, ExtractionStats, Extractor};
use crate::html;
use crate::model::Document;
use crate::render::RenderConfig;
use crate::transform::{self, Engine, Transformation};

pub use crate::ingest::{from_html, from_html_dict, from_html_with};

const DEFAULT_TRANSFORMATION: &str = "default";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DotExport {
    pub dot: String,
    pub dot_size: usize,
    /// Milliseconds spent extracting and emitting.
    pub duration: f64,
    pub stats: ExtractionStats,
    pub transformation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MermaidExport {
    pub mermaid: String,
    pub node_count: usize,
    pub edge_count: usize,
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeExport {
    pub root_id: Option<String>,
    pub tree: Vec<TreeNode>,
    pub node_count: usize,
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeTextExport {
    pub text: String,
    pub node_count: usize,
    pub duration: f64,
}

/// Output formats reachable through [`render_html`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Html,
    HtmlDict,
    Json,
    Dot,
    VisJs,
    D3,
    Cytoscape,
    Mermaid,
    Tree,
    TreeText,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 10] = [
        ExportFormat::Html,
        ExportFormat::HtmlDict,
        ExportFormat::Json,
        ExportFormat::Dot,
        ExportFormat::VisJs,
        ExportFormat::D3,
        ExportFormat::Cytoscape,
        ExportFormat::Mermaid,
        ExportFormat::Tree,
        ExportFormat::TreeText,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Html => "html",
            ExportFormat::HtmlDict => "html_dict",
            ExportFormat::Json => "json",
            ExportFormat::Dot => "dot",
            ExportFormat::VisJs => "visjs",
            ExportFormat::D3 => "d3",
            ExportFormat::Cytoscape => "cytoscape",
            ExportFormat::Mermaid => "mermaid",
            ExportFormat::Tree => "tree",
            ExportFormat::TreeText => "tree_text",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ExportFormat::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownFormat(s.to_string()))
    }
}

/// Extraction after every transformation stage, with the config it used.
struct Prepared {
    extraction: Extraction,
    config: RenderConfig,
    transformation: &'static str,
}

fn prepare(
    doc: &Document,
    config: &RenderConfig,
    transformation: Option<&str>,
    engine: Engine,
) -> Result<Prepared> {
    let t = transform::transformation(transformation.unwrap_or(DEFAULT_TRANSFORMATION))?;
    let mut config = config.clone();
    t.configure(engine, &mut config);
    let selection = t.preprocess_graph(doc);
    let mut extraction = Extractor::new(doc, &config)
        .with_selection(selection)
        .extract();
    t.postprocess(engine, &mut extraction);
    Ok(Prepared {
        extraction,
        config,
        transformation: t.name(),
    })
}

fn millis(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

pub fn to_html(doc: &Document) -> String {
    html::to_html(doc)
}

pub fn to_html_dict(doc: &Document) -> Result<Value> {
    Ok(serde_json::to_value(html::to_html_dict(doc))?)
}

pub fn to_json(doc: &Document) -> DocumentDump {
    DocumentDump::of(doc)
}

pub fn to_dot(doc: &Document, config: &RenderConfig, transformation: Option<&str>) -> Result<DotExport> {
    let start = Instant::now();
    let prepared = prepare(doc, config, transformation, Engine::Dot)?;
    let dot = export::dot::render(&prepared.extraction, &prepared.config.dot);
    let duration = millis(start);
    debug!(
        transformation = prepared.transformation,
        bytes = dot.len(),
        duration_ms = duration,
        "exported dot"
    );
    Ok(DotExport {
        dot_size: dot.len(),
        dot,
        duration,
        stats: prepared.extraction.stats(),
        transformation: prepared.transformation.to_string(),
    })
}

pub fn to_visjs(doc: &Document, config: &RenderConfig, transformation: Option<&str>) -> Result<VisJsGraph> {
    let prepared = prepare(doc, config, transformation, Engine::VisJs)?;
    Ok(export::visjs::render(&prepared.extraction, &prepared.config.visjs))
}

pub fn to_d3(doc: &Document, config: &RenderConfig, transformation: Option<&str>) -> Result<D3Graph> {
    let prepared = prepare(doc, config, transformation, Engine::D3)?;
    Ok(export::d3::render(&prepared.extraction, &prepared.config.d3))
}

pub fn to_cytoscape(
    doc: &Document,
    config: &RenderConfig,
    transformation: Option<&str>,
) -> Result<CytoscapeGraph> {
    let prepared = prepare(doc, config, transformation, Engine::Cytoscape)?;
    Ok(export::cytoscape::render(&prepared.extraction, &prepared.config.cytoscape))
}

pub fn to_mermaid(doc: &Document, config: &RenderConfig, transformation: Option<&str>) -> Result<MermaidExport> {
    let start = Instant::now();
    let prepared = prepare(doc, config, transformation, Engine::Mermaid)?;
    let mermaid = export::mermaid::render(&prepared.extraction);
    Ok(MermaidExport {
        mermaid,
        node_count: prepared.extraction.nodes.len(),
        edge_count: prepared.extraction.edges.len(),
        duration: millis(start),
    })
}

pub fn to_tree(doc: &Document, config: &RenderConfig, transformation: Option<&str>) -> Result<TreeExport> {
    let start = Instant::now();
    let prepared = prepare(doc, config, transformation, Engine::Tree)?;
    Ok(TreeExport {
        root_id: prepared.extraction.root_id.clone(),
        tree: export::tree::build(&prepared.extraction),
        node_count: prepared.extraction.nodes.len(),
        duration: millis(start),
    })
}

pub fn to_tree_text(
    doc: &Document,
    config: &RenderConfig,
    transformation: Option<&str>,
) -> Result<TreeTextExport> {
    let start = Instant::now();
    let prepared = prepare(doc, config, transformation, Engine::Tree)?;
    Ok(TreeTextExport {
        text: export::tree::render_text(&prepared.extraction),
        node_count: prepared.extraction.nodes.len(),
        duration: millis(start),
    })
}

/// Parse `html` and export it in `format`, running every stage of the named
/// transformation.
pub fn render_html(
    html: &str,
    format: ExportFormat,
    config: &RenderConfig,
    transformation: Option<&str>,
) -> Result<Value> {
    let name = transformation.unwrap_or(DEFAULT_TRANSFORMATION);
    let t = transform::transformation(name)?;
    let html = t.preprocess_html(html.to_string());
    let doc = from_html(&html)?;
    let chosen = Some(name);
    let value = match format {
        ExportFormat::Html => Value::String(to_html(&doc)),
        ExportFormat::HtmlDict => to_html_dict(&doc)?,
        ExportFormat::Json => serde_json::to_value(to_json(&doc))?,
        ExportFormat::Dot => serde_json::to_value(to_dot(&doc, config, chosen)?)?,
        ExportFormat::VisJs => serde_json::to_value(to_visjs(&doc, config, chosen)?)?,
        ExportFormat::D3 => serde_json::to_value(to_d3(&doc, config, chosen)?)?,
        ExportFormat::Cytoscape => serde_json::to_value(to_cytoscape(&doc, config, chosen)?)?,
        ExportFormat::Mermaid => serde_json::to_value(to_mermaid(&doc, config, chosen)?)?,
        ExportFormat::Tree => serde_json::to_value(to_tree(&doc, config, chosen)?)?,
        ExportFormat::TreeText => serde_json::to_value(to_tree_text(&doc, config, chosen)?)?,
    };
    debug!(format = %format, transformation = name, "rendered html");
    Ok(value)
}
