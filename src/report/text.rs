//! Plain terminal rendering

use crate::risk::RiskTable;
use crate::sliders::Slider;
use crate::topology::TopologyGraph;
use crate::Snapshot;

const RULE: &str = "──────────────────────────────────────";

const UL_OVERVIEW: &str = "\
UL (UNDERWRITERS LABORATORIES) OVERVIEW
UL ensures safety, compliance, and risk mitigation globally.
Simulated cloud architectures must align with UL standards \
for security, scalability, and governance.
";

const CLOSING: &str = "\
May this knowledge guide architects to build secure, scalable, and intelligent cloud systems.
UL standards and enterprise principles simulated for learning and decision support.
";

pub fn render_graph(graph: &TopologyGraph) -> String {
    let mut out = String::new();
    out.push_str(&format!("Nodes ({}):\n", graph.node_count()));
    for label in graph.labels() {
        out.push_str(&format!("  {label}\n"));
    }
    out.push_str(&format!("Edges ({}):\n", graph.edge_count()));
    for (from, to) in graph.edges() {
        out.push_str(&format!("  {from} -> {to}\n"));
    }
    out
}

pub fn render_table(table: &RiskTable) -> String {
    let headers = ["Component", "Failure Mode", "S", "O", "D", "RPN"];
    let cells: Vec<[String; 6]> = table
        .rows()
        .iter()
        .map(|row| {
            [
                row.component.clone(),
                row.failure_mode.clone(),
                row.severity.to_string(),
                row.occurrence.to_string(),
                row.detection.to_string(),
                row.rpn.to_string(),
            ]
        })
        .collect();

    let mut widths = headers.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &headers.map(String::from), &widths);
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(separator.join("  ").trim_end());
    out.push('\n');
    for row in &cells {
        push_row(&mut out, row, &widths);
    }
    out
}

// text columns left-aligned, numbers right-aligned
fn push_row(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &width))| {
            if i < 2 {
                format!("{cell:<width$}")
            } else {
                format!("{cell:>width$}")
            }
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

pub fn render_sliders(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    for slider in Slider::ALL {
        out.push_str(&format!(
            "  {:<28} {:>2}\n",
            slider.label(),
            snapshot.sliders.get(slider)
        ));
    }
    out
}

pub fn render_snapshot(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    out.push_str("Multi-Cloud Architect MVP\n");
    out.push_str(&format!("{RULE}\n"));
    out.push_str(&format!("Variant: {}", snapshot.variant));
    if let Some(scenario) = &snapshot.scenario {
        out.push_str(&format!("  Scenario: {scenario}"));
    }
    out.push_str("\n\n");
    out.push_str(UL_OVERVIEW);
    out.push_str("\nINPUT PARAMETERS\n");
    out.push_str(&render_sliders(snapshot));

    out.push_str("\nENTERPRISE CLOUD ARCHITECTURE\n");
    out.push_str(&render_graph(&snapshot.topology));

    out.push_str("\nARCHITECT EXPLANATION\n");
    out.push_str(&snapshot.explanation);

    out.push_str("\nFMEA ANALYSIS\n");
    out.push_str(&render_table(&snapshot.fmea));
    if let Some(top) = snapshot.fmea.highest() {
        out.push_str(&format!(
            "\nHighest risk: {} ({}) RPN {}\n",
            top.component, top.failure_mode, top.rpn
        ));
    }
    out.push_str(&format!("\n{RULE}\n"));
    out.push_str(CLOSING);
    out
}
