//! Render configuration: visibility presets, palettes, shapes and labels.

mod colors;
mod labels;

pub use colors::{darken, font_color_for, Palette, TagCategory};
pub use labels::{attr_label, element_label, normalize_whitespace, tag_label, text_label, truncate};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::graph::Predicate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    #[default]
    FullDetail,
    StructureOnly,
    Minimal,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::FullDetail => "full_detail",
            Preset::StructureOnly => "structure_only",
            Preset::Minimal => "minimal",
        }
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full_detail" => Ok(Preset::FullDetail),
            "structure_only" => Ok(Preset::StructureOnly),
            "minimal" => Ok(Preset::Minimal),
            other => Err(ConfigError::UnknownPreset(other.to_string())),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    #[default]
    Default,
    Monochrome,
    HighContrast,
}

impl ColorScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorScheme::Default => "default",
            ColorScheme::Monochrome => "monochrome",
            ColorScheme::HighContrast => "high_contrast",
        }
    }

    pub fn palette(&self) -> &'static Palette {
        colors::palette(*self)
    }
}

impl FromStr for ColorScheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(ColorScheme::Default),
            "monochrome" => Ok(ColorScheme::Monochrome),
            "high_contrast" => Ok(ColorScheme::HighContrast),
            other => Err(ConfigError::UnknownColorScheme(other.to_string())),
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Graphviz graph-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotOptions {
    pub rankdir: String,
    pub splines: String,
    pub nodesep: f64,
    pub ranksep: f64,
    pub font_name: String,
    pub font_size: u32,
    pub edge_font_size: u32,
    pub show_edge_labels: bool,
    pub max_label_length: usize,
}

impl Default for DotOptions {
    fn default() -> Self {
        Self {
            rankdir: "TB".to_string(),
            splines: "true".to_string(),
            nodesep: 0.3,
            ranksep: 0.5,
            font_name: "Arial".to_string(),
            font_size: 10,
            edge_font_size: 8,
            show_edge_labels: true,
            max_label_length: 40,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisJsOptions {
    pub include_options: bool,
    pub hierarchical: bool,
    pub direction: String,
    pub physics: bool,
}

impl Default for VisJsOptions {
    fn default() -> Self {
        Self {
            include_options: true,
            hierarchical: true,
            direction: "UD".to_string(),
            physics: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct D3Options {
    pub link_distance: f64,
    pub charge: f64,
}

impl Default for D3Options {
    fn default() -> Self {
        Self {
            link_distance: 60.0,
            charge: -300.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CytoscapeOptions {
    pub layout: String,
    pub include_style: bool,
}

impl Default for CytoscapeOptions {
    fn default() -> Self {
        Self {
            layout: "breadthfirst".to_string(),
            include_style: true,
        }
    }
}

/// Everything the extractor and emitters read.
///
/// The preset only changes through [`RenderConfig::apply_preset`], so the
/// visibility flags always reflect it. Deserializing applies the preset first
/// and then any `show_*` flag the input names explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRenderConfig")]
pub struct RenderConfig {
    preset: Preset,
    pub show_tag_nodes: bool,
    pub show_attr_nodes: bool,
    pub show_text_nodes: bool,
    pub show_tag_edges: bool,
    pub show_attr_edges: bool,
    pub show_text_edges: bool,
    pub show_child_edges: bool,
    pub color_scheme: ColorScheme,
    pub element_shape: String,
    pub tag_shape: String,
    pub attr_shape: String,
    pub text_shape: String,
    pub max_text_length: usize,
    pub show_tag_brackets: bool,
    pub dot: DotOptions,
    pub visjs: VisJsOptions,
    pub d3: D3Options,
    pub cytoscape: CytoscapeOptions,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            preset: Preset::FullDetail,
            show_tag_nodes: true,
            show_attr_nodes: true,
            show_text_nodes: true,
            show_tag_edges: true,
            show_attr_edges: true,
            show_text_edges: true,
            show_child_edges: true,
            color_scheme: ColorScheme::Default,
            element_shape: "box".to_string(),
            tag_shape: "ellipse".to_string(),
            attr_shape: "note".to_string(),
            text_shape: "plaintext".to_string(),
            max_text_length: 30,
            show_tag_brackets: true,
            dot: DotOptions::default(),
            visjs: VisJsOptions::default(),
            d3: D3Options::default(),
            cytoscape: CytoscapeOptions::default(),
        }
    }
}

impl RenderConfig {
    pub fn with_preset(preset: Preset) -> Self {
        let mut config = Self::default();
        config.apply_preset(preset);
        config
    }

    /// Build from option names, as a request would carry them.
    pub fn from_names(preset: &str, color_scheme: &str) -> Result<Self, ConfigError> {
        let mut config = Self::with_preset(preset.parse()?);
        config.color_scheme = color_scheme.parse()?;
        Ok(config)
    }

    /// Set the six preset-controlled visibility flags. Child edges are left
    /// alone.
    pub fn apply_preset(&mut self, preset: Preset) {
        let (tags, attrs, text) = match preset {
            Preset::FullDetail => (true, true, true),
            Preset::StructureOnly => (false, false, false),
            Preset::Minimal => (false, false, true),
        };
        self.preset = preset;
        self.show_tag_nodes = tags;
        self.show_tag_edges = tags;
        self.show_attr_nodes = attrs;
        self.show_attr_edges = attrs;
        self.show_text_nodes = text;
        self.show_text_edges = text;
    }

    pub fn preset(&self) -> Preset {
        self.preset
    }

    pub fn palette(&self) -> &'static Palette {
        self.color_scheme.palette()
    }

    /// Whether edges with `predicate` are emitted.
    pub fn shows_edge(&self, predicate: Predicate) -> bool {
        match predicate {
            Predicate::Child => self.show_child_edges,
            Predicate::Text => self.show_text_edges,
            Predicate::Tag | Predicate::Element => self.show_tag_edges,
            Predicate::Attr | Predicate::Name | Predicate::Value => self.show_attr_edges,
            Predicate::Script | Predicate::Style | Predicate::Content => true,
        }
    }
}

/// Wire form of [`RenderConfig`]: every field optional, names unparsed.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRenderConfig {
    preset: Option<String>,
    show_tag_nodes: Option<bool>,
    show_attr_nodes: Option<bool>,
    show_text_nodes: Option<bool>,
    show_tag_edges: Option<bool>,
    show_attr_edges: Option<bool>,
    show_text_edges: Option<bool>,
    show_child_edges: Option<bool>,
    color_scheme: Option<String>,
    element_shape: Option<String>,
    tag_shape: Option<String>,
    attr_shape: Option<String>,
    text_shape: Option<String>,
    max_text_length: Option<usize>,
    show_tag_brackets: Option<bool>,
    dot: Option<DotOptions>,
    visjs: Option<VisJsOptions>,
    d3: Option<D3Options>,
    cytoscape: Option<CytoscapeOptions>,
}

impl TryFrom<RawRenderConfig> for RenderConfig {
    type Error = ConfigError;

    fn try_from(raw: RawRenderConfig) -> Result<Self, Self::Error> {
        let mut config = Self::default();
        if let Some(preset) = raw.preset {
            config.apply_preset(preset.parse()?);
        }
        if let Some(scheme) = raw.color_scheme {
            config.color_scheme = scheme.parse()?;
        }

        let flags = [
            (raw.show_tag_nodes, &mut config.show_tag_nodes),
            (raw.show_attr_nodes, &mut config.show_attr_nodes),
            (raw.show_text_nodes, &mut config.show_text_nodes),
            (raw.show_tag_edges, &mut config.show_tag_edges),
            (raw.show_attr_edges, &mut config.show_attr_edges),
            (raw.show_text_edges, &mut config.show_text_edges),
            (raw.show_child_edges, &mut config.show_child_edges),
            (raw.show_tag_brackets, &mut config.show_tag_brackets),
        ];
        for (value, slot) in flags {
            if let Some(value) = value {
                *slot = value;
            }
        }

        let shapes = [
            (raw.element_shape, &mut config.element_shape),
            (raw.tag_shape, &mut config.tag_shape),
            (raw.attr_shape, &mut config.attr_shape),
            (raw.text_shape, &mut config.text_shape),
        ];
        for (value, slot) in shapes {
            if let Some(value) = value {
                *slot = value;
            }
        }

        if let Some(max) = raw.max_text_length {
            config.max_text_length = max;
        }
        if let Some(dot) = raw.dot {
            config.dot = dot;
        }
        if let Some(visjs) = raw.visjs {
            config.visjs = visjs;
        }
        if let Some(d3) = raw.d3 {
            config.d3 = d3;
        }
        if let Some(cytoscape) = raw.cytoscape {
            config.cytoscape = cytoscape;
        }
        Ok(config)
    }
}
