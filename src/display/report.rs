//! Plain-text audit listing of a matrix, top layer first.

use crate::matrix::HarrisMatrix;
use crate::store::UnitNumber;
use std::fmt::Write;

pub fn format_report(matrix: &HarrisMatrix) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "HARRIS MATRIX for scope '{}':", matrix.scope);
    let _ = writeln!(output, "--------------------------------------------------");

    if matrix.is_empty() {
        let _ = writeln!(output, "(no units)");
    }

    for (level, layer) in matrix.layers.iter().enumerate().rev() {
        for unit in layer {
            let _ = writeln!(output, "[L{}] {}{}", level, unit, class_suffix(matrix, unit));
            write_links(&mut output, matrix, unit);
        }
    }

    if !matrix.diagnostics.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "Diagnostics ({}):", matrix.diagnostics.len());
        for d in &matrix.diagnostics {
            let _ = writeln!(output, "  {}", d);
        }
    }
    output
}

/// `" (= 20, 30)"` for a representative standing for other units.
fn class_suffix(matrix: &HarrisMatrix, rep: &UnitNumber) -> String {
    match matrix.equivalence_classes.iter().find(|c| c.first() == Some(rep)) {
        Some(class) if class.len() > 1 => {
            let others: Vec<&str> = class[1..].iter().map(UnitNumber::as_str).collect();
            format!(" (= {})", others.join(", "))
        }
        _ => String::new(),
    }
}

fn write_links(output: &mut String, matrix: &HarrisMatrix, unit: &UnitNumber) {
    let mut lines: Vec<String> = matrix
        .order_edges
        .iter()
        .filter(|e| &e.upper == unit)
        .map(|e| format!("above {}", e.lower))
        .collect();
    lines.extend(
        matrix
            .adjacencies
            .iter()
            .filter(|a| &a.from == unit)
            .map(|a| format!("~ {} {}", a.kind, a.to)),
    );

    for (i, line) in lines.iter().enumerate() {
        let connector = if i == lines.len() - 1 { "`--" } else { "|--" };
        let _ = writeln!(output, "     {} {}", connector, line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::StratigraphicEngine;
    use crate::store::{Scope, UnitKind, UnitRecord};

    #[test]
    fn test_report_lists_layers_top_first() {
        let scope = Scope::new("Roma", "A");
        let rec = |n: &str, t: &str| UnitRecord::new(&scope, UnitNumber::parse(n).unwrap(), UnitKind::Layer, t);
        let units = vec![
            rec("1000", "Copre 1002, Si appoggia a 1001, Uguale a 1003"),
            rec("1001", "Gli si appoggia 1000"),
            rec("1002", "Coperto da 1000"),
            rec("1003", "Uguale a 1000"),
        ];
        let m = StratigraphicEngine::default().generate(&scope, &units);
        let report = format_report(&m);

        let expected = "\
HARRIS MATRIX for scope 'Roma/A':
--------------------------------------------------
[L1] 1000 (= 1003)
     |-- above 1002
     `-- ~ LeansAgainst 1001
[L0] 1001
[L0] 1002
";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_report_includes_diagnostics() {
        let m = HarrisMatrix::empty(Scope::new("Roma", "A"));
        assert!(format_report(&m).contains("(no units)"));

        let scope = Scope::new("Roma", "A");
        let units = vec![UnitRecord::new(&scope, UnitNumber::parse("1").unwrap(), UnitKind::Layer, "Copre 9")];
        let report = format_report(&StratigraphicEngine::default().generate(&scope, &units));
        assert!(report.contains("Diagnostics (1):"));
        assert!(report.contains("[UnknownTarget] 1, 9"));
    }
}
