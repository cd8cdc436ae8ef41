//! Mermaid `flowchart` DSL output.
//!
//! Node ids are remapped to `n0`, `n1`, ... in first-seen order so the
//! output stays readable and deterministic for a given extraction.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write;

use crate::extract::{ExtractedNode, Extraction, NodeKind};

/// Mermaid labels are cut at this many characters.
pub const MAX_LABEL: usize = 30;

/// Drop characters that close Mermaid shapes; swap `"` for `'`.
pub fn escape_label(label: &str) -> String {
    let cleaned: String = label
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '[' | ']' | '(' | ')' | '{' | '}'))
        .map(|c| if c == '"' { '\'' } else { c })
        .collect();
    let cleaned = cleaned.replace('\n', " ");
    if cleaned.chars().count() > MAX_LABEL {
        cleaned.chars().take(MAX_LABEL).collect()
    } else {
        cleaned
    }
}

fn shape(kind: NodeKind, label: &str) -> String {
    match kind {
        NodeKind::Element | NodeKind::Script | NodeKind::Style => format!("[\"{label}\"]"),
        NodeKind::Text => format!("((\"{label}\"))"),
        NodeKind::Tag => format!("{{{{\"{label}\"}}}}"),
        NodeKind::Attr => format!(">\"{label}\"]"),
    }
}

fn class_name(kind: NodeKind) -> String {
    format!("{kind}Node")
}

fn class_def(node: &ExtractedNode) -> String {
    format!(
        "fill:{},stroke:{},color:{}",
        node.fill_color, node.border_color, node.font_color
    )
}

pub fn render(extraction: &Extraction) -> String {
    let mut out = String::from("flowchart TB\n");
    let mut ids: HashMap<&str, String> = HashMap::new();
    let mut classes: BTreeMap<&'static str, (String, Vec<String>)> = BTreeMap::new();

    for node in &extraction.nodes {
        if ids.contains_key(node.id.as_str()) {
            continue;
        }
        let short = format!("n{}", ids.len());
        let _ = writeln!(out, "    {}{}", short, shape(node.node_type, &escape_label(&node.label)));
        classes
            .entry(node.node_type.as_str())
            .or_insert_with(|| (class_def(node), Vec::new()))
            .1
            .push(short.clone());
        ids.insert(node.id.as_str(), short);
    }

    for edge in &extraction.edges {
        if edge.source == edge.target {
            continue;
        }
        let (Some(from), Some(to)) = (ids.get(edge.source.as_str()), ids.get(edge.target.as_str()))
        else {
            continue;
        };
        let arrow = if edge.dashed { "-.->" } else { "-->" };
        let _ = writeln!(out, "    {from} {arrow} {to}");
    }

    for kind in NodeKind::ALL {
        if let Some((def, members)) = classes.get(kind.as_str()) {
            let class = class_name(kind);
            let _ = writeln!(out, "    classDef {class} {def}");
            let _ = writeln!(out, "    class {} {class}", members.join(","));
        }
    }
    out
}
