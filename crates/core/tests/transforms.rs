use htmlgraph_core::extract::NodeKind;
use htmlgraph_core::ingest::from_html;
use htmlgraph_core::model::GraphSource;
use htmlgraph_core::render::{self, TagCategory};
use htmlgraph_core::service::{self, render_html, ExportFormat};
use htmlgraph_core::transform::{strip_comments, transformation, transformation_names, Engine, Transformation};
use htmlgraph_core::{
    ColorScheme, ConfigError, Document, HtmlGraphError, NodePath, Preset, RenderConfig, TransformError,
};
use pretty_assertions::assert_eq;

const PAGE: &str = r#"<html><head><title>A very long page title for testing</title><style>h1{}</style>
<script>init()</script></head><body><div id="main"><h1>Heading</h1><p>Some paragraph text that runs on</p></div></body></html>"#;

fn page() -> Document {
    from_html(PAGE).unwrap()
}

fn kinds(doc: &Document, config: &RenderConfig, name: &str) -> Vec<String> {
    let vis = service::to_visjs(doc, config, Some(name)).unwrap();
    let mut kinds: Vec<String> = vis.nodes.into_iter().map(|n| n.node_type).collect();
    kinds.sort();
    kinds.dedup();
    kinds
}

#[test]
fn test_registry_names() {
    assert_eq!(
        transformation_names(),
        vec![
            "default",
            "body_only",
            "head_only",
            "document",
            "attributes",
            "scripts",
            "styles",
            "structure_only",
            "clean",
            "compact",
            "expanded",
        ]
    );
    for name in transformation_names() {
        let t = transformation(name).unwrap();
        assert_eq!(t.name(), name);
        assert!(!t.description().is_empty());
    }
}

#[test]
fn test_unknown_transformation() {
    assert!(matches!(
        transformation("sparkly"),
        Err(TransformError::Unknown(name)) if name == "sparkly"
    ));
    let err = service::to_dot(&page(), &RenderConfig::default(), Some("sparkly")).unwrap_err();
    assert!(matches!(err, HtmlGraphError::Transform(_)), "{err}");
}

#[test]
fn test_body_only() {
    let vis = service::to_visjs(&page(), &RenderConfig::default(), Some("body_only")).unwrap();
    assert!(vis.nodes.iter().all(|n| n.graph_source != GraphSource::Head));
    assert!(vis.nodes.iter().all(|n| !n.dom_path.starts_with("html.head")));
    assert!(vis.nodes.iter().any(|n| n.dom_path == "html.body.div"));
    assert!(vis.nodes.iter().all(|n| n.node_type != "style"));
}

#[test]
fn test_head_only() {
    let vis = service::to_visjs(&page(), &RenderConfig::default(), Some("head_only")).unwrap();
    assert!(vis.nodes.iter().all(|n| !n.dom_path.starts_with("html.body")));
    assert!(vis.nodes.iter().any(|n| n.dom_path == "html.head.title"));
    assert!(vis.nodes.iter().any(|n| n.node_type == "style"));
    assert!(vis.nodes.iter().any(|n| n.node_type == "script"));

    // No html element without the body graph; the head becomes the root
    let head = vis.nodes.iter().find(|n| n.dom_path == "html.head").unwrap();
    assert_eq!(vis.root_id.as_deref(), Some(head.id.as_str()));
}

#[test]
fn test_document_forces_full_detail() {
    let config = RenderConfig::with_preset(Preset::StructureOnly);
    assert_eq!(
        kinds(&page(), &config, "document"),
        vec!["attr", "element", "script", "style", "tag", "text"]
    );
}

#[test]
fn test_attributes_view() {
    let config = RenderConfig::with_preset(Preset::StructureOnly);
    assert_eq!(kinds(&page(), &config, "attributes"), vec!["attr", "element"]);
}

#[test]
fn test_scripts_and_styles_views() {
    let config = RenderConfig::default();
    assert_eq!(kinds(&page(), &config, "scripts"), vec!["element", "script"]);
    assert_eq!(kinds(&page(), &config, "styles"), vec!["element", "style"]);
    assert_eq!(kinds(&page(), &config, "structure_only"), vec!["element", "script", "style"]);
}

#[test]
fn test_clean() {
    assert_eq!(strip_comments("a<!-- x -->b<!--y-->c"), "abc");
    assert_eq!(strip_comments("a<!-- open"), "a");

    let export = service::to_dot(&page(), &RenderConfig::default(), Some("clean")).unwrap();
    assert_eq!(export.transformation, "clean");
    assert!(export.stats.nodes_by_type.get("tag").is_none());
    assert!(export.stats.nodes_by_type.get("text").is_some());

    let mut mono = RenderConfig::default();
    mono.color_scheme = ColorScheme::Monochrome;
    let fill = mono.palette().element_fill(1);
    assert!(export.dot.contains(&format!("fillcolor=\"{fill}\"")));
}

#[test]
fn test_compact() {
    let vis = service::to_visjs(&page(), &RenderConfig::default(), Some("compact")).unwrap();
    assert!(vis.nodes.iter().any(|n| n.label == "div"));
    let text = vis
        .nodes
        .iter()
        .find(|n| n.node_type == "text" && n.dom_path == "text" && n.title.starts_with("Some"))
        .unwrap();
    assert_eq!(text.label, "Some paragraph ...");

    let dot = service::to_dot(&page(), &RenderConfig::default(), Some("compact")).unwrap();
    assert!(dot.dot.contains(r#"nodesep="0.15""#), "{}", dot.dot);
}

#[test]
fn test_expanded() {
    let mut config = RenderConfig::with_preset(Preset::Minimal);
    config.max_text_length = 5;
    let vis = service::to_visjs(&page(), &config, Some("expanded")).unwrap();
    assert!(vis.nodes.iter().any(|n| n.label == "Some paragraph text that runs on"));
    assert!(vis.nodes.iter().any(|n| n.node_type == "tag"));

    let dot = service::to_dot(&page(), &config, Some("expanded")).unwrap();
    assert!(dot.dot.contains(r#"ranksep="1""#), "{}", dot.dot);
}

#[test]
fn test_configure_is_per_engine() {
    let mut config = RenderConfig::default();
    transformation("compact").unwrap().configure(Engine::Mermaid, &mut config);
    assert_eq!(config.dot.nodesep, RenderConfig::default().dot.nodesep);
    assert_eq!(config.max_text_length, 15);
    assert!(!config.show_tag_brackets);
}

#[test]
fn test_render_html_formats() {
    let config = RenderConfig::default();
    let html = "<p>Hi<!-- note --></p>";

    let out = render_html(html, ExportFormat::Html, &config, None).unwrap();
    assert!(out.as_str().unwrap().starts_with("<!DOCTYPE html>\n"));

    let out = render_html(html, ExportFormat::Dot, &config, Some("clean")).unwrap();
    assert!(out["dot"].as_str().unwrap().contains("digraph G {"));
    assert_eq!(out["transformation"], "clean");

    let out = render_html(html, ExportFormat::Json, &config, None).unwrap();
    assert!(out["body"]["nodes"].is_array());
    assert!(out["stats"]["attributes"]["unique_tags"].is_number());

    let out = render_html(html, ExportFormat::Mermaid, &config, None).unwrap();
    assert!(out["mermaid"].as_str().unwrap().starts_with("flowchart TB"));

    let out = render_html(html, ExportFormat::TreeText, &config, None).unwrap();
    assert!(out["text"].as_str().unwrap().contains("\"Hi\""));

    let out = render_html(html, ExportFormat::HtmlDict, &config, None).unwrap();
    assert_eq!(out["tag"], "html");

    assert!(render_html(html, ExportFormat::Tree, &config, Some("nope")).is_err());
}

#[test]
fn test_export_format_names() {
    for format in ExportFormat::ALL {
        assert_eq!(format.as_str().parse::<ExportFormat>(), Ok(format));
    }
    assert_eq!(
        "png".parse::<ExportFormat>(),
        Err(ConfigError::UnknownFormat("png".to_string()))
    );
}

#[test]
fn test_config_from_names() {
    let config = RenderConfig::from_names("minimal", "high_contrast").unwrap();
    assert_eq!(config.preset(), Preset::Minimal);
    assert_eq!(config.color_scheme, ColorScheme::HighContrast);
    assert!(config.show_text_nodes && config.show_text_edges);
    assert!(!config.show_tag_nodes && !config.show_attr_nodes);
    assert!(config.show_child_edges);

    assert_eq!(
        RenderConfig::from_names("everything", "default").unwrap_err(),
        ConfigError::UnknownPreset("everything".to_string())
    );
    assert_eq!(
        RenderConfig::from_names("minimal", "neon").unwrap_err(),
        ConfigError::UnknownColorScheme("neon".to_string())
    );
}

#[test]
fn test_config_deserializes_with_defaults() {
    let config: RenderConfig =
        serde_json::from_str(r#"{"max_text_length": 10, "color_scheme": "monochrome"}"#).unwrap();
    assert_eq!(config.max_text_length, 10);
    assert_eq!(config.color_scheme, ColorScheme::Monochrome);
    assert!(config.show_tag_brackets);
    assert_eq!(config.dot.rankdir, "TB");
}

#[test]
fn test_config_deserializes_preset_into_flags() {
    let config: RenderConfig = serde_json::from_str(r#"{"preset": "structure_only"}"#).unwrap();
    assert_eq!(config.preset(), Preset::StructureOnly);
    assert_eq!(config, RenderConfig::with_preset(Preset::StructureOnly));

    let doc = from_html(r#"<div class="a">Hi</div>"#).unwrap();
    let stats = htmlgraph_core::Extractor::new(&doc, &config).extract().stats();
    assert!(stats.nodes_by_type.get("text").is_none());
    assert!(stats.nodes_by_type.get("attr").is_none());
    assert!(stats.nodes_by_type.get("tag").is_none());

    let config: RenderConfig =
        serde_json::from_str(r#"{"preset": "minimal", "show_attr_nodes": true}"#).unwrap();
    assert!(config.show_attr_nodes);
    assert!(!config.show_attr_edges);
    assert!(!config.show_tag_nodes);
    assert!(config.show_text_nodes);

    let err = serde_json::from_str::<RenderConfig>(r#"{"preset": "everything"}"#).unwrap_err();
    assert!(err
        .to_string()
        .starts_with(&ConfigError::UnknownPreset("everything".to_string()).to_string()));
    let err = serde_json::from_str::<RenderConfig>(r#"{"color_scheme": "neon"}"#).unwrap_err();
    assert!(err
        .to_string()
        .starts_with(&ConfigError::UnknownColorScheme("neon".to_string()).to_string()));
}

#[test]
fn test_config_serializes_and_reads_back() {
    let config = RenderConfig::from_names("minimal", "monochrome").unwrap();
    let json = serde_json::to_string(&config).unwrap();
    let back: RenderConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_labels_and_colors() {
    assert_eq!(render::truncate("abcdef", 3), "abc...");
    assert_eq!(render::truncate("abc", 3), "abc");
    assert_eq!(render::text_label("  a \n  b  ", 30), "a b");
    assert_eq!(render::attr_label("checked", None, 30), "checked");
    assert_eq!(render::attr_label("href", Some("abcdef"), 3), r#"href="abc...""#);
    assert_eq!(render::element_label(&NodePath::new("html.body.div[2]"), true), "<div>");
    assert_eq!(render::element_label(&NodePath::new("html.body.div[2]"), false), "div");

    assert_eq!(render::darken("#FFFFFF", 30), "#E1E1E1");
    assert_eq!(render::darken("#101010", 30), "#000000");
    assert_eq!(render::darken("red", 30), "red");
    assert_eq!(render::font_color_for("#FFFFFF", "dark", "light"), "dark");
    assert_eq!(render::font_color_for("#000000", "dark", "light"), "light");

    assert_eq!(TagCategory::of("TABLE"), TagCategory::Table);
    assert_eq!(TagCategory::of("blink"), TagCategory::Unknown);

    let palette = RenderConfig::default().palette();
    assert_eq!(palette.element_fill(0), palette.element_fill(1));
    assert_eq!(palette.element_fill(500), palette.element_fill(palette.depth.len()));
}

#[test]
fn test_postprocess_drops_text_only_in_compact() {
    let doc = page();
    let config = RenderConfig::default();
    let mut extraction = htmlgraph_core::Extractor::new(&doc, &config).extract();
    let before = extraction.nodes.len();
    extraction.retain_nodes(|n| n.node_type != NodeKind::Text);
    assert!(extraction.nodes.len() < before);
    let ids: std::collections::HashSet<&str> =
        extraction.nodes.iter().map(|n| n.id.as_str()).collect();
    assert!(extraction
        .edges
        .iter()
        .all(|e| ids.contains(e.source.as_str()) && ids.contains(e.target.as_str())));
}
