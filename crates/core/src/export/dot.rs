//! Graphviz DOT output.

use std::fmt::Write;

use crate::extract::Extraction;
use crate::render::{truncate, DotOptions};

/// Escape special characters for DOT strings.
pub fn escape_label(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

fn write_attrs(output: &mut String, attrs: &[(&str, String)]) {
    output.push('[');
    for (i, (key, value)) in attrs.iter().enumerate() {
        if i > 0 {
            output.push_str(", ");
        }
        let _ = write!(output, "{}=\"{}\"", key, escape_label(value));
    }
    output.push_str("];\n");
}

/// Line-oriented DOT writer; every statement is indented one level.
pub struct DotBuilder {
    output: String,
}

impl DotBuilder {
    pub fn new(name: &str) -> Self {
        let mut output = String::with_capacity(4096);
        let _ = writeln!(output, "digraph {name} {{");
        Self { output }
    }

    /// Defaults statement: `graph`, `node` or `edge`.
    pub fn defaults(&mut self, kind: &str, attrs: &[(&str, String)]) -> &mut Self {
        let _ = write!(self.output, "    {kind} ");
        write_attrs(&mut self.output, attrs);
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.output.push('\n');
        self
    }

    pub fn node(&mut self, id: &str, attrs: &[(&str, String)]) -> &mut Self {
        let _ = write!(self.output, "    \"{}\" ", escape_label(id));
        write_attrs(&mut self.output, attrs);
        self
    }

    pub fn edge(&mut self, from: &str, to: &str, attrs: &[(&str, String)]) -> &mut Self {
        let _ = write!(
            self.output,
            "    \"{}\" -> \"{}\"",
            escape_label(from),
            escape_label(to)
        );
        if attrs.is_empty() {
            self.output.push_str(";\n");
        } else {
            self.output.push(' ');
            write_attrs(&mut self.output, attrs);
        }
        self
    }

    pub fn build(mut self) -> String {
        self.output.push_str("}\n");
        self.output
    }
}

pub fn render(extraction: &Extraction, options: &DotOptions) -> String {
    let mut dot = DotBuilder::new("G");
    dot.defaults(
        "graph",
        &[
            ("rankdir", options.rankdir.clone()),
            ("splines", options.splines.clone()),
            ("nodesep", options.nodesep.to_string()),
            ("ranksep", options.ranksep.to_string()),
            ("fontname", options.font_name.clone()),
        ],
    )
    .defaults(
        "node",
        &[
            ("style", "filled".to_string()),
            ("fontname", options.font_name.clone()),
            ("fontsize", options.font_size.to_string()),
        ],
    )
    .defaults(
        "edge",
        &[
            ("fontname", options.font_name.clone()),
            ("fontsize", options.edge_font_size.to_string()),
        ],
    )
    .blank();

    for node in &extraction.nodes {
        dot.node(
            &node.id,
            &[
                ("label", truncate(&node.label, options.max_label_length)),
                ("shape", node.shape.clone()),
                ("fillcolor", node.fill_color.clone()),
                ("fontcolor", node.font_color.clone()),
                ("color", node.border_color.clone()),
            ],
        );
    }
    if !extraction.edges.is_empty() {
        dot.blank();
    }
    for edge in &extraction.edges {
        let mut attrs = Vec::with_capacity(3);
        if options.show_edge_labels {
            attrs.push(("label", edge.predicate.to_string()));
        }
        attrs.push(("color", edge.color.clone()));
        if edge.dashed {
            attrs.push(("style", "dashed".to_string()));
        }
        dot.edge(&edge.source, &edge.target, &attrs);
    }
    dot.build()
}

