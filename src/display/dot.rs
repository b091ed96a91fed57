//! Graphviz DOT export.
//!
//! Layers become `rank=same` groups so the drawing keeps the computed
//! sequence; Graphviz only positions nodes within a rank.

use crate::matrix::HarrisMatrix;
use crate::store::UnitNumber;
use crate::validation::DiagnosticKind;
use std::collections::HashSet;
use std::fmt::Write;

pub fn to_dot(matrix: &HarrisMatrix) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "digraph \"{}\" {{", escape(&matrix.scope.to_string()));
    let _ = writeln!(out, "  rankdir=TB;");
    let _ = writeln!(out, "  node [shape=box];");

    let in_cycle: HashSet<&UnitNumber> = matrix
        .diagnostics_of(DiagnosticKind::Cycle)
        .flat_map(|d| d.units.iter())
        .collect();

    // Node declarations, labelled with their equivalence class.
    for class in &matrix.equivalence_classes {
        let Some(rep) = class.first() else { continue };
        let label: Vec<&str> = class.iter().map(UnitNumber::as_str).collect();
        let colour = if in_cycle.contains(rep) { ", color=red" } else { "" };
        let _ = writeln!(out, "  \"{}\" [label=\"{}\"{}];", rep, label.join(" = "), colour);
    }

    for layer in matrix.layers.iter().rev() {
        let members: Vec<String> = layer.iter().map(|u| format!("\"{}\";", u)).collect();
        let _ = writeln!(out, "  {{ rank=same; {} }}", members.join(" "));
    }

    for edge in &matrix.order_edges {
        let _ = writeln!(out, "  \"{}\" -> \"{}\";", edge.upper, edge.lower);
    }
    for link in &matrix.adjacencies {
        let _ = writeln!(
            out,
            "  \"{}\" -> \"{}\" [style=dashed, arrowhead=none, constraint=false, label=\"{}\"];",
            link.from, link.to, link.kind
        );
    }

    let _ = writeln!(out, "}}");
    out
}

fn escape(s: &str) -> String { s.replace('\\', "\\\\").replace('"', "\\\"") }
