//! Node label rules.

use crate::graph::NodePath;

/// Collapse runs of whitespace to one space and trim the ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut to `max` characters, appending `...` when something was dropped.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max).collect();
        out.push_str("...");
        out
    }
}

pub fn tag_label(tag: &str, brackets: bool) -> String {
    if brackets {
        format!("<{tag}>")
    } else {
        tag.to_string()
    }
}

/// Last path segment, bracket index stripped: `html.body.div[2]` → `div`.
pub fn element_label(path: &NodePath, brackets: bool) -> String {
    tag_label(path.last_segment(), brackets)
}

/// `name="value"`, or just `name` for a boolean attribute.
pub fn attr_label(name: &str, value: Option<&str>, max: usize) -> String {
    match value {
        Some(value) => format!("{name}=\"{}\"", truncate(value, max)),
        None => name.to_string(),
    }
}

pub fn text_label(text: &str, max: usize) -> String {
    truncate(&normalize_whitespace(text), max)
}
