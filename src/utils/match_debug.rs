// src/utils/match_debug.rs
use std::fmt::Write;

use crate::reports::ReportRegistry;

/// Renders a plain-text report of which fingerprint phrases matched a
/// document, per report type, and the lines they matched on.
pub fn render_match_report(source: &str, text: &str, registry: &ReportRegistry) -> String {
    let lower_text = text.to_lowercase();
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "Fingerprint match report for {}", source);
    let _ = writeln!(out, "{} characters inspected", text.len());
    match registry.identify_report_type(text) {
        Some(id) => {
            let _ = writeln!(
                out,
                "Identified as: {} ({:.2}% confidence, {}/{} fingerprints)",
                id.name, id.confidence, id.match_count, id.total_fingerprints
            );
        }
        None => {
            let _ = writeln!(out, "Identified as: none");
        }
    }

    for definition in registry.definitions() {
        let matched = definition.matched_fingerprints(&lower_text);
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "== {} ({}): {}/{} matched, {} required",
            definition.name,
            definition.report_type,
            matched.len(),
            definition.fingerprints.len(),
            definition.min_match_count
        );
        for fingerprint in &definition.fingerprints {
            let mark = if matched.contains(&fingerprint.as_str()) { "x" } else { " " };
            let _ = writeln!(out, "  [{}] {}", mark, fingerprint);
        }

        if matched.is_empty() {
            continue;
        }
        let _ = writeln!(out, "  Matching lines:");
        for (idx, line) in text.lines().enumerate() {
            let lower_line = line.to_lowercase();
            let hits: Vec<&str> = matched
                .iter()
                .copied()
                .filter(|f| lower_line.contains(f))
                .collect();
            if !hits.is_empty() {
                let _ = writeln!(out, "  {:>5}: {}  <- {}", idx + 1, line.trim(), hits.join(", "));
            }
        }
    }

    out
}
