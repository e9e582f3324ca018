//! Graphviz DOT source for a [`GraphDescription`].

use crate::tree::{GraphDescription, Highlight};
use std::fmt::Write;

const NODE_COLOR: &str = "lightblue2";

fn highlight_color(highlight: Highlight) -> &'static str {
    match highlight {
        Highlight::Ready => "lemonchiffon2",
        Highlight::Blocked => "lightpink",
    }
}

/// Quote a string as a DOT identifier.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Render the graph as a `digraph` in the DOT language.
pub fn to_dot(graph: &GraphDescription) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "digraph \"scenario-tree\" {{");
    let _ = writeln!(out, "    graph [size=\"7,5\"];");
    let _ = writeln!(out, "    node [color={NODE_COLOR}, style=filled];");
    let _ = writeln!(out, "    edge [fontsize=11];");

    for node in graph.nodes() {
        let mut attrs = vec![format!("label={}", quote(&node.label))];
        if let Some(tooltip) = &node.tooltip {
            attrs.push(format!("tooltip={}", quote(tooltip)));
        }
        if let Some(highlight) = node.highlight {
            attrs.push(format!("color={}", highlight_color(highlight)));
        }
        let _ = writeln!(out, "    {} [{}];", quote(node.id.as_str()), attrs.join(", "));
    }

    for edge in graph.edges() {
        let _ = match &edge.label {
            Some(label) => writeln!(
                out,
                "    {} -> {} [label={}];",
                quote(edge.from.as_str()),
                quote(edge.to.as_str()),
                quote(label)
            ),
            None => writeln!(
                out,
                "    {} -> {};",
                quote(edge.from.as_str()),
                quote(edge.to.as_str())
            ),
        };
    }

    out.push_str("}\n");
    out
}
