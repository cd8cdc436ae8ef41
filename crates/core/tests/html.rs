use htmlgraph_core::html::{is_void_element, to_html, to_html_dict};
use htmlgraph_core::ingest::{from_html, from_html_dict};
use pretty_assertions::assert_eq;

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Round &amp; trip</title>
    <link rel="stylesheet" href="site.css">
    <style>body > p { color: red; }</style>
    <script>if (a < b && c) { go(); }</script>
</head>
<body class="page">
    <!-- navigation -->
    <nav><a href="/">Home</a><a href="/about?x=1&amp;y=2">About</a></nav>
    <main>
        <h1>Title</h1>
        <p>Hello <b>bold</b> and <i>italic</i> world &lt;3</p>
        <ul>
            <li>one</li>
            <li>two</li>
        </ul>
        <form><input type="text" name="q" required><button>Go</button></form>
        <pre>
indented
  text</pre>
        <style>.inline { margin: 0; }</style>
    </main>
    <script src="app.js"></script>
</body>
</html>
"#;

#[test]
fn test_empty_document_layout() {
    let doc = from_html("<html><head></head><body></body></html>").unwrap();
    let html = to_html(&doc);
    assert!(
        html.starts_with("<!DOCTYPE html>\n<html>\n    <head></head>\n    <body></body>\n</html>\n"),
        "unexpected layout:\n{html}"
    );
}

#[test]
fn test_nested_block_layout() {
    let doc = from_html("<div><p>Hi</p><br></div>").unwrap();
    assert_eq!(
        to_html(&doc),
        "<!DOCTYPE html>\n\
         <html>\n\
         \x20   <head></head>\n\
         \x20   <body>\n\
         \x20       <div>\n\
         \x20           <p>Hi</p>\n\
         \x20           <br />\n\
         \x20       </div>\n\
         \x20   </body>\n\
         </html>\n"
    );
}

#[test]
fn test_link_is_self_closed_with_attributes_in_order() {
    let doc = from_html(
        r#"<html><head><link rel="stylesheet" href="styles.css"><style>.a{}</style></head><body></body></html>"#,
    )
    .unwrap();
    let html = to_html(&doc);
    assert!(html.contains(r#"<link rel="stylesheet" href="styles.css" />"#), "{html}");
    assert!(html.contains("<style>.a{}</style>"), "{html}");
}

#[test]
fn test_boolean_attributes_have_no_value() {
    let doc = from_html(r#"<input type="checkbox" checked>"#).unwrap();
    let html = to_html(&doc);
    assert!(html.contains(r#"<input type="checkbox" checked />"#), "{html}");
}

#[test]
fn test_script_content_is_verbatim() {
    let doc = from_html("<script>if (a < b && c) { go(); }</script>").unwrap();
    assert!(to_html(&doc).contains("<script>if (a < b && c) { go(); }</script>"));
}

#[test]
fn test_text_and_attributes_are_escaped() {
    let doc = from_html(r#"<p title="say &quot;hi&quot;">1 &lt; 2 &amp; 3</p>"#).unwrap();
    let html = to_html(&doc);
    assert!(html.contains(r#"<p title="say &quot;hi&quot;">1 &lt; 2 &amp; 3</p>"#), "{html}");
}

#[test]
fn test_mixed_content_stays_inline() {
    let doc = from_html("<p>Hello <b>bold</b> world</p>").unwrap();
    assert!(to_html(&doc).contains("        <p>Hello <b>bold</b> world</p>\n"));
}

#[test]
fn test_idempotent() {
    let once = to_html(&from_html(PAGE).unwrap());
    let twice = to_html(&from_html(&once).unwrap());
    assert_eq!(once, twice);
}

#[test]
fn test_idempotent_across_layouts() {
    let inputs = [
        "<body><p>one</p>tail</body>",
        "<html><head></head><body>t<span> </span>u</body></html>",
        "<body>text only</body>",
        "<body>trailing space   </body>",
        "<div><p>Hi</p><br></div>",
        "<ul><li>a</li><li>b <em>c</em></li></ul>",
        "<table><tr><td>1</td><td>2</td></tr></table>",
        "<p>a &amp; b &lt; c</p>",
        "<pre>\n\nkeep</pre>",
        "<textarea>x</textarea>",
        r#"<input type="checkbox" checked><label>ok</label>"#,
        r#"<html><head><title>T</title><script>var a = 1 < 2;</script></head><body><script src="a.js"></script></body></html>"#,
        "<plaintext>a<b>",
        PAGE,
    ];
    for input in inputs {
        let once = to_html(&from_html(input).unwrap());
        let twice = to_html(&from_html(&once).unwrap());
        assert_eq!(once, twice, "not idempotent for {input:?}");
    }
}

#[test]
fn test_body_ending_in_text_stays_inline() {
    let doc = from_html("<body><p>one</p>tail</body>").unwrap();
    let html = to_html(&doc);
    assert!(html.contains("    <body><p>one</p>tail</body>\n</html>\n"), "{html}");
}

#[test]
fn test_plaintext_is_written_raw() {
    let doc = from_html("<plaintext>a<b>").unwrap();
    let html = to_html(&doc);
    assert!(html.contains("<plaintext>a<b></plaintext>"), "{html}");
}

#[test]
fn test_dict_round_trip() {
    let original = from_html(PAGE).unwrap();
    let dict = serde_json::to_value(to_html_dict(&original)).unwrap();
    let rebuilt = from_html_dict(&dict).unwrap();
    assert_eq!(to_html_dict(&rebuilt), to_html_dict(&original));
    assert_eq!(to_html(&rebuilt), to_html(&original));
}

#[test]
fn test_semantic_round_trip() {
    let original = from_html(PAGE).unwrap();
    let reparsed = from_html(&to_html(&original)).unwrap();
    assert_eq!(to_html_dict(&original), to_html_dict(&reparsed));

    let stats = original.stats();
    let again = reparsed.stats();
    assert_eq!(stats.attributes.total_attributes, again.attributes.total_attributes);
    assert_eq!(stats.scripts.total_scripts, again.scripts.total_scripts);
    assert_eq!(stats.styles.total_styles, again.styles.total_styles);
    assert_eq!(stats.body.text_nodes, again.body.text_nodes);
}

#[test]
fn test_html_dict_shape() {
    let doc = from_html(r#"<div id="a">x</div>"#).unwrap();
    let value = serde_json::to_value(to_html_dict(&doc)).unwrap();

    assert_eq!(value["tag"], "html");
    assert_eq!(value["nodes"][0]["tag"], "head");
    let div = &value["nodes"][1]["nodes"][0];
    assert_eq!(div["tag"], "div");
    assert_eq!(div["attrs"]["id"], "a");
    assert_eq!(div["nodes"][0]["data"], "x");
}

#[test]
fn test_void_elements() {
    for tag in ["br", "img", "input", "link", "meta", "hr"] {
        assert!(is_void_element(tag), "{tag} should be void");
    }
    assert!(!is_void_element("div"));
    assert!(!is_void_element("script"));
}
