use std::collections::HashSet;

use htmlgraph_core::export::{dot, mermaid, tree};
use htmlgraph_core::extract::NodeKind;
use htmlgraph_core::ingest::{from_html, from_html_with};
use htmlgraph_core::model::GraphSource;
use htmlgraph_core::render::darken;
use htmlgraph_core::service;
use htmlgraph_core::{Document, Extractor, IdGenerator, Predicate, Preset, RenderConfig};
use pretty_assertions::assert_eq;

const PAGE: &str = r#"<html><head><title>Demo</title><style>p{}</style></head>
<body><div class="box" hidden><p>Hi</p><p>there</p></div><script>run()</script></body></html>"#;

fn page() -> Document {
    from_html_with(PAGE, IdGenerator::sequential()).unwrap()
}

#[test]
fn test_dot_scenario() {
    let doc = from_html("<div><p>Hi</p></div>").unwrap();
    let export = service::to_dot(&doc, &RenderConfig::default(), None).unwrap();

    assert_eq!(export.dot.matches("digraph G {").count(), 1);
    assert!(export.dot.contains("->"));
    assert!(export.dot.contains(r#"label="Hi""#), "{}", export.dot);
    assert!(export.dot.ends_with("}\n"));
    assert_eq!(export.dot_size, export.dot.len());
    assert_eq!(export.transformation, "default");
    assert_eq!(export.stats.nodes_by_type.get("text"), Some(&1));
    assert!(export.duration >= 0.0);
}

#[test]
fn test_dot_escapes_labels() {
    let doc = from_html(r#"<p>say "hi" \o/</p>"#).unwrap();
    let export = service::to_dot(&doc, &RenderConfig::default(), None).unwrap();
    assert!(export.dot.contains(r#"label="say \"hi\" \\o/""#), "{}", export.dot);
}

#[test]
fn test_dot_options_reach_output() {
    let mut config = RenderConfig::default();
    config.dot.rankdir = "LR".to_string();
    config.dot.show_edge_labels = false;
    let export = service::to_dot(&page(), &config, None).unwrap();
    assert!(export.dot.contains(r#"rankdir="LR""#));
    assert!(!export.dot.contains(r#"label="child""#));
}

#[test]
fn test_dot_builder() {
    let mut builder = dot::DotBuilder::new("G");
    builder
        .node("a", &[("label", "A".to_string())])
        .edge("a", "b", &[]);
    assert_eq!(
        builder.build(),
        "digraph G {\n    \"a\" [label=\"A\"];\n    \"a\" -> \"b\";\n}\n"
    );
    assert_eq!(dot::escape_label("one\ntwo \"q\" \\"), "one\\ntwo \\\"q\\\" \\\\");
}

#[test]
fn test_mermaid_scenario() {
    let doc = page();
    let config = RenderConfig::default();
    let first = service::to_mermaid(&doc, &config, None).unwrap();
    let second = service::to_mermaid(&doc, &config, None).unwrap();
    assert_eq!(first.mermaid, second.mermaid);

    let text = first.mermaid;
    assert!(text.starts_with("flowchart TB\n"));

    // Node definitions use n0, n1, ... in order
    let defined: Vec<&str> = text
        .lines()
        .skip(1)
        .map(str::trim)
        .filter(|l| !l.contains("-->") && !l.contains("-.->") && !l.starts_with("class"))
        .map(|l| l.split(|c: char| c == '[' || c == '(' || c == '{' || c == '>').next().unwrap())
        .collect();
    let expected: Vec<String> = (0..defined.len()).map(|i| format!("n{i}")).collect();
    assert_eq!(defined, expected);
    assert_eq!(defined.len(), first.node_count);

    for line in text.lines().filter(|l| l.contains("-->") || l.contains("-.->")) {
        let parts: Vec<&str> = line.split_whitespace().collect();
        assert_eq!(parts.len(), 3, "{line}");
        assert_ne!(parts[0], parts[2], "self loop: {line}");
    }
    assert!(text.contains("-.->"), "dashed edges expected:\n{text}");
    assert!(text.contains("classDef elementNode fill:"));
    assert!(!text.contains(&doc.root_id().to_string()));
}

#[test]
fn test_mermaid_same_document_twice_is_identical() {
    let a = service::to_mermaid(&page(), &RenderConfig::default(), None).unwrap();
    let b = service::to_mermaid(&page(), &RenderConfig::default(), None).unwrap();
    assert_eq!(a.mermaid, b.mermaid);
}

#[test]
fn test_mermaid_label_escaping() {
    assert_eq!(mermaid::escape_label(r#"<a>(b)[c]{d} "q""#), "abcd 'q'");
    let long = "x".repeat(50);
    assert_eq!(mermaid::escape_label(&long).len(), mermaid::MAX_LABEL);
}

#[test]
fn test_edges_reference_emitted_nodes() {
    let doc = page();
    let config = RenderConfig::default();

    let vis = service::to_visjs(&doc, &config, None).unwrap();
    let ids: HashSet<&str> = vis.nodes.iter().map(|n| n.id.as_str()).collect();
    for edge in &vis.edges {
        assert!(ids.contains(edge.from.as_str()) && ids.contains(edge.to.as_str()), "{edge:?}");
    }

    let d3 = service::to_d3(&doc, &config, None).unwrap();
    let ids: HashSet<&str> = d3.nodes.iter().map(|n| n.id.as_str()).collect();
    for link in &d3.links {
        assert!(ids.contains(link.source.as_str()) && ids.contains(link.target.as_str()));
    }

    let cy = service::to_cytoscape(&doc, &config, None).unwrap();
    let ids: HashSet<&str> = cy.elements.nodes.iter().map(|n| n.data.id.as_str()).collect();
    for edge in &cy.elements.edges {
        assert!(ids.contains(edge.data.source.as_str()) && ids.contains(edge.data.target.as_str()));
    }
}

#[test]
fn test_hidden_text_nodes_disappear_everywhere() {
    let doc = page();
    let mut config = RenderConfig::default();
    config.show_text_nodes = false;

    let vis = service::to_visjs(&doc, &config, None).unwrap();
    assert!(vis.nodes.iter().all(|n| n.node_type != "text"));
    assert!(vis.edges.iter().all(|e| e.predicate != Predicate::Text));

    let d3 = service::to_d3(&doc, &config, None).unwrap();
    assert!(d3.nodes.iter().all(|n| n.node_type != "text"));

    let tree = service::to_tree_text(&doc, &config, None).unwrap();
    assert!(!tree.text.contains("\"Hi\""));
}

#[test]
fn test_hidden_attr_and_tag_nodes() {
    let doc = page();
    let mut config = RenderConfig::default();
    config.show_attr_nodes = false;
    config.show_tag_nodes = false;

    let extraction = Extractor::new(&doc, &config).extract();
    assert!(extraction
        .nodes
        .iter()
        .all(|n| n.node_type != NodeKind::Attr && n.node_type != NodeKind::Tag));
    assert!(extraction
        .edges
        .iter()
        .all(|e| e.predicate != Predicate::Attr && e.predicate != Predicate::Tag));
}

#[test]
fn test_extraction_projection() {
    let doc = page();
    let extraction = Extractor::new(&doc, &RenderConfig::default()).extract();

    assert_eq!(extraction.root_id, Some(doc.root_id().to_string()));

    // ids are unique across graphs
    let ids: HashSet<&str> = extraction.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids.len(), extraction.nodes.len());

    let attrs: Vec<&str> = extraction
        .nodes
        .iter()
        .filter(|n| n.node_type == NodeKind::Attr)
        .map(|n| n.label.as_str())
        .collect();
    assert_eq!(attrs, vec![r#"class="box""#, "hidden"]);

    let tag = extraction
        .nodes
        .iter()
        .find(|n| n.node_type == NodeKind::Tag && n.value.as_deref() == Some("p"))
        .unwrap();
    assert_eq!(tag.label, "<p>");
    assert_eq!(tag.category, "");
    let tag_edges = extraction
        .edges
        .iter()
        .filter(|e| e.predicate == Predicate::Tag && e.target == tag.id)
        .count();
    assert_eq!(tag_edges, 2);

    let script = extraction
        .nodes
        .iter()
        .find(|n| n.node_type == NodeKind::Script)
        .unwrap();
    assert_eq!(script.value.as_deref(), Some("run()"));
    assert_eq!(script.shape, "component");

    let style = extraction
        .nodes
        .iter()
        .find(|n| n.node_type == NodeKind::Style)
        .unwrap();
    assert_eq!(style.graph_source, GraphSource::Styles);
    assert_eq!(style.shape, "tab");

    let div = extraction.nodes.iter().find(|n| n.label == "<div>").unwrap();
    assert_eq!(div.depth, 3);
    assert_eq!(div.category, "structural");
    assert_eq!(div.dom_path, "html.body.div");

    for node in &extraction.nodes {
        assert_eq!(node.border_color, darken(&node.fill_color, 30));
    }
    for edge in &extraction.edges {
        let dashed = matches!(
            edge.predicate,
            Predicate::Tag | Predicate::Attr | Predicate::Script | Predicate::Style
        );
        assert_eq!(edge.dashed, dashed, "{edge:?}");
        assert!(edge.id.starts_with(&format!("{}:e", edge.graph_source)), "{}", edge.id);
    }

    let stats = extraction.stats();
    assert_eq!(stats.total_nodes, extraction.nodes.len());
    assert_eq!(stats.edges_by_predicate.get("script"), Some(&1));
    assert_eq!(stats.edges_by_predicate.get("style"), Some(&1));
}

#[test]
fn test_structure_only_keeps_elements() {
    let doc = page();
    let config = RenderConfig::with_preset(Preset::StructureOnly);
    let cy = service::to_cytoscape(&doc, &config, None).unwrap();
    let kinds: HashSet<&str> = cy
        .elements
        .nodes
        .iter()
        .map(|n| n.data.node_type.as_str())
        .collect();
    assert!(kinds.contains("element"));
    assert!(!kinds.contains("text") && !kinds.contains("tag") && !kinds.contains("attr"));
    assert!(cy
        .elements
        .edges
        .iter()
        .all(|e| e.group == "edges" && e.data.predicate != Predicate::Text));
}

#[test]
fn test_visjs_shape() {
    let vis = service::to_visjs(&page(), &RenderConfig::default(), None).unwrap();
    let value = serde_json::to_value(&vis).unwrap();

    assert!(value["rootId"].is_string());
    assert_eq!(value["options"]["layout"]["hierarchical"]["direction"], "UD");
    let edge = &value["edges"][0];
    assert!(edge["from"].is_string() && edge["to"].is_string());
    let node = &value["nodes"][0];
    assert!(node["color"]["highlight"]["background"].is_string());
    assert!(node["nodeType"].is_string() && node["domPath"].is_string());

    let text = vis.nodes.iter().find(|n| n.node_type == "text").unwrap();
    assert_eq!(text.shape, "text");
    let attr = vis.nodes.iter().find(|n| n.node_type == "attr").unwrap();
    assert_eq!(attr.shape, "box");
    let script = vis.nodes.iter().find(|n| n.node_type == "script").unwrap();
    assert_eq!(script.shape, "database");

    let mut config = RenderConfig::default();
    config.visjs.include_options = false;
    let bare = serde_json::to_value(service::to_visjs(&page(), &config, None).unwrap()).unwrap();
    assert!(bare.get("options").is_none());
}

#[test]
fn test_d3_radius_and_width() {
    let d3 = service::to_d3(&page(), &RenderConfig::default(), None).unwrap();
    let div = d3.nodes.iter().find(|n| n.label == "<div>").unwrap();
    assert_eq!(div.radius, 21.0);
    let text = d3.nodes.iter().find(|n| n.label == "Hi").unwrap();
    assert!((text.radius - 10.4).abs() < 1e-9, "{}", text.radius);

    for link in &d3.links {
        let width = if link.predicate == Predicate::Child { 2 } else { 1 };
        assert_eq!(link.width, width);
    }
    assert_eq!(d3.simulation.charge, -300.0);
}

#[test]
fn test_cytoscape_shape() {
    let cy = service::to_cytoscape(&page(), &RenderConfig::default(), None).unwrap();
    let value = serde_json::to_value(&cy).unwrap();
    assert_eq!(value["layout"]["name"], "breadthfirst");
    assert_eq!(value["elements"]["nodes"][0]["group"], "nodes");
    assert!(value["elements"]["nodes"][0]["data"]["borderColor"].is_string());
    assert!(value["style"].is_array());
}

#[test]
fn test_tree_text() {
    let doc = from_html("<ul><li>a</li><li>b</li></ul>").unwrap();
    let config = RenderConfig::with_preset(Preset::Minimal);
    let export = service::to_tree_text(&doc, &config, None).unwrap();
    assert_eq!(
        export.text,
        "<html>\n\
         ├── <head>\n\
         └── <body>\n\
         \x20   └── <ul>\n\
         \x20       ├── <li>\n\
         \x20       │   └── \"a\"\n\
         \x20       └── <li>\n\
         \x20           └── \"b\"\n"
    );
}

#[test]
fn test_tree_json_covers_every_node_once() {
    let doc = page();
    let export = service::to_tree(&doc, &RenderConfig::default(), None).unwrap();
    assert_eq!(export.tree[0].label, "<html>");
    assert_eq!(export.tree[0].children.len(), 3);

    fn count(nodes: &[tree::TreeNode]) -> usize {
        nodes.iter().map(|n| 1 + count(&n.children)).sum()
    }
    assert_eq!(count(&export.tree), export.node_count);
}
