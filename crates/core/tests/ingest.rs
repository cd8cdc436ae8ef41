use htmlgraph_core::ingest::{from_html, from_html_dict, from_html_with};
use htmlgraph_core::{IdGenerator, NodeId, ParseError};
use pretty_assertions::assert_eq;
use serde_json::json;

fn only(ids: Vec<NodeId>) -> NodeId {
    assert_eq!(ids.len(), 1, "expected exactly one match, got {ids:?}");
    ids[0]
}

#[test]
fn test_fragment_gets_inferred_wrappers() {
    let doc = from_html(r#"<div class="main">Hello World</div>"#).unwrap();
    let stats = doc.stats();

    assert!(stats.body.element_nodes + stats.head.element_nodes >= 2);
    assert_eq!(stats.body.text_nodes + stats.head.text_nodes, 1);
    assert_eq!(stats.attributes.total_attributes, 1);
    assert!(stats.attributes.unique_tags >= 2);

    let div = only(doc.attributes().elements_by_tag("div"));
    assert_eq!(doc.body().text_content(div), "Hello World");
    assert_eq!(doc.attribute(div, "class"), Some(Some("main".to_string())));
}

#[test]
fn test_scripts_in_document_order() {
    let doc = from_html(
        "<html><head><script>var a=1;</script></head><body><script>var b=2;</script></body></html>",
    )
    .unwrap();
    let scripts = doc.scripts();
    let all = scripts.all_scripts();

    assert_eq!(all.len(), 2);
    assert!(doc.is_in_head(all[0]));
    assert!(doc.is_in_body(all[1]));
    assert_eq!(scripts.script_content(all[0]), Some("var a=1;"));
    assert_eq!(scripts.script_content(all[1]), Some("var b=2;"));
    assert_eq!(scripts.inline_scripts().len(), 2);
    assert_eq!(scripts.external_scripts().len(), 0);
}

#[test]
fn test_external_script_has_no_content() {
    let doc = from_html(r#"<html><body><script src="app.js"></script></body></html>"#).unwrap();
    let script = only(doc.scripts().all_scripts());
    assert_eq!(doc.script_content(script), None);
    assert_eq!(doc.scripts().external_scripts(), vec![script]);
    assert_eq!(doc.attribute(script, "src"), Some(Some("app.js".to_string())));
}

#[test]
fn test_head_styles_and_links() {
    let doc = from_html(
        r#"<html><head><link rel="stylesheet" href="styles.css"><style>.a{}</style></head><body></body></html>"#,
    )
    .unwrap();
    let stats = doc.stats().styles;
    assert_eq!(stats.total_styles, 2);
    assert_eq!(stats.inline_styles, 1);
    assert_eq!(stats.external_styles, 1);

    let styles = doc.styles().all_styles();
    assert_eq!(doc.tag(styles[0]), Some("link"));
    assert_eq!(doc.style_content(styles[1]), Some(".a{}"));
}

#[test]
fn test_body_style_is_an_ordinary_element() {
    let doc = from_html("<html><body><style>.x{}</style></body></html>").unwrap();
    assert_eq!(doc.stats().styles.total_styles, 0);

    let style = only(doc.attributes().elements_by_tag("style"));
    assert!(doc.is_in_body(style));
    assert_eq!(doc.body().text_content(style), ".x{}");
}

#[test]
fn test_node_ids_shared_with_attributes() {
    let doc = from_html(
        r#"<html><head><title>T</title></head><body><div id="x"><p>a</p><img src="i.png"></div></body></html>"#,
    )
    .unwrap();

    for graph in [doc.body(), doc.head()] {
        for id in graph.graph().node_ids().filter(|id| graph.owns_element(*id)) {
            assert!(doc.attributes().is_registered(id), "{id} not in attributes");
            let path = graph.graph().node_path(id).unwrap();
            assert_eq!(doc.tag(id), Some(path.last_segment()));
        }
    }
    assert_eq!(doc.tag(doc.root_id()), Some("html"));
}

#[test]
fn test_children_keep_source_order() {
    let doc = from_html("<ul><li>one</li><li>two</li><li>three</li></ul>").unwrap();
    let ul = only(doc.attributes().elements_by_tag("ul"));
    let texts: Vec<String> = doc
        .body()
        .element_children(ul)
        .into_iter()
        .map(|li| doc.body().text_content(li))
        .collect();
    assert_eq!(texts, vec!["one", "two", "three"]);
}

#[test]
fn test_repeated_body_tags_get_indices() {
    let doc = from_html("<div><p>a</p><span>b</span><p>c</p></div>").unwrap();
    let div = only(doc.attributes().elements_by_tag("div"));
    let paths: Vec<String> = doc
        .body()
        .element_children(div)
        .into_iter()
        .map(|id| doc.body().graph().node_path(id).unwrap().to_string())
        .collect();
    assert_eq!(
        paths,
        vec!["html.body.div.p[0]", "html.body.div.span", "html.body.div.p[1]"]
    );
}

#[test]
fn test_head_paths_are_not_indexed() {
    let doc = from_html(r#"<html><head><meta a="1"><meta b="2"></head><body></body></html>"#)
        .unwrap();
    let metas = doc.attributes().elements_by_tag("meta");
    assert_eq!(metas.len(), 2);
    for meta in metas {
        assert_eq!(doc.head().graph().node_path(meta).unwrap().as_str(), "html.head.meta");
    }
}

#[test]
fn test_attributes_round_trip_in_source_order() {
    let doc = from_html(r#"<input type="checkbox" checked name="agree">"#).unwrap();
    let input = only(doc.attributes().elements_by_tag("input"));
    let attrs: Vec<(String, Option<String>)> = doc
        .attributes_of(input)
        .iter()
        .map(|(name, value)| (name.to_string(), value.map(str::to_string)))
        .collect();
    assert_eq!(
        attrs,
        vec![
            ("type".to_string(), Some("checkbox".to_string())),
            ("checked".to_string(), None),
            ("name".to_string(), Some("agree".to_string())),
        ]
    );
    assert_eq!(
        doc.attributes().elements_with_attribute("checked", None),
        vec![input]
    );
}

#[test]
fn test_attribute_values_are_interned() {
    let doc = from_html(r#"<p class="a">1</p><p class="a">2</p><p class="b">3</p>"#).unwrap();
    let stats = doc.stats().attributes;
    assert_eq!(stats.total_attributes, 3);
    assert_eq!(stats.unique_names, 1);
    assert_eq!(stats.unique_values, 2);
}

#[test]
fn test_html_attributes_on_root() {
    let doc = from_html(r#"<html lang="en"><body></body></html>"#).unwrap();
    assert_eq!(doc.attribute(doc.root_id(), "lang"), Some(Some("en".to_string())));
    assert_eq!(doc.tag(doc.root_id()), Some("html"));
    assert_eq!(doc.attributes().elements()[0], doc.root_id());
    assert_eq!(doc.attributes().elements_by_tag("html"), vec![doc.root_id()]);
}

#[test]
fn test_whitespace_text_dropped() {
    let doc = from_html("<html><body>\n  <div>\n    <p>x</p>\n  </div>\n</body></html>").unwrap();
    assert_eq!(doc.stats().body.text_nodes, 1);
}

#[test]
fn test_element_info() {
    let doc = from_html(r#"<html><head><style>b{}</style></head><body></body></html>"#).unwrap();
    let style = only(doc.attributes().elements_by_tag("style"));
    let info = doc.element_info(style).unwrap();
    assert_eq!(info.tag.as_deref(), Some("style"));
    assert!(info.in_head);
    assert!(!info.in_body);
    assert_eq!(info.style_content.as_deref(), Some("b{}"));
    assert_eq!(info.script_content, None);
}

#[test]
fn test_from_dict() {
    let value = json!({
        "tag": "html",
        "nodes": [
            {"tag": "head", "nodes": []},
            {"tag": "body", "attrs": {"class": "page"}, "nodes": [
                {"tag": "P", "nodes": [{"type": "TEXT", "data": "Hi"}]},
                "not a dict",
                {"data": "tail"}
            ]}
        ]
    });
    let doc = from_html_dict(&value).unwrap();
    let body = doc.body().root().unwrap();
    assert_eq!(doc.attribute(body, "class"), Some(Some("page".to_string())));

    let p = only(doc.attributes().elements_by_tag("p"));
    assert_eq!(doc.body().text_content(p), "Hi");
    assert_eq!(doc.body().text_content(body), "tail");
}

#[test]
fn test_from_dict_rejects_non_objects() {
    let err = from_html_dict(&json!("<p>hi</p>")).unwrap_err();
    assert!(matches!(err, ParseError::NotAnObject(_)));
    assert!(from_html_dict(&json!([1, 2])).is_err());
}

#[test]
fn test_missing_html_wrapper_leaves_document_empty() {
    let doc = from_html_dict(&json!({"tag": "div", "nodes": [{"data": "x"}]})).unwrap();
    assert_eq!(doc.body().root(), None);
    assert_eq!(doc.head().root(), None);
    assert_eq!(doc.stats().body.text_nodes, 0);
}

#[test]
fn test_sequential_ids_are_deterministic() {
    let html = r#"<div class="a"><p>x</p><script>1</script></div>"#;
    let a = from_html_with(html, IdGenerator::sequential()).unwrap();
    let b = from_html_with(html, IdGenerator::sequential()).unwrap();
    assert_eq!(a.root_id(), b.root_id());
    assert_eq!(a.stats(), b.stats());
}

#[test]
fn test_all_tags_are_unique() {
    let doc = from_html("<html><head><title>T</title></head><body><div><p>a</p><p>b</p></div></body></html>").unwrap();
    let tags = doc.attributes().all_tags();
    assert_eq!(tags[0], "html");
    for tag in ["title", "div", "p"] {
        assert_eq!(tags.iter().filter(|t| **t == tag).count(), 1, "{tag} in {tags:?}");
    }
    assert!(!tags.contains(&"span"));
}

#[test]
fn test_elements_by_tag_falls_back_to_lowercase_path() {
    let doc = from_html("<div><P>a</P><p>b</p></div>").unwrap();
    let lower = doc.attributes().elements_by_tag("p");
    assert_eq!(lower.len(), 2);
    assert_eq!(doc.attributes().elements_by_tag("P"), lower);
    assert!(doc.attributes().elements_by_tag("SPAN").is_empty());
}

#[test]
fn test_text_content_in_head() {
    let doc = from_html("<html><head><title>Page title</title></head><body><p>Body</p></body></html>").unwrap();
    let title = only(doc.attributes().elements_by_tag("title"));
    assert!(doc.is_in_head(title));
    assert_eq!(doc.text_content(title, true), "Page title");
    assert_eq!(doc.text_content(title, false), "");

    let p = only(doc.attributes().elements_by_tag("p"));
    assert_eq!(doc.text_content(p, false), "Body");
}

#[test]
fn test_body_tail_text_keeps_no_trailing_whitespace() {
    let doc = from_html("<body><p>one</p>tail  \n</body>\n\n").unwrap();
    let body = only(doc.attributes().elements_by_tag("body"));
    assert_eq!(doc.body().text_content(body), "tail");
}
