use std::path::Path;

use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::engine::ScanSummary;
use crate::models::{Confidence, Dependency, EvidenceType};

const IDENTITY_PREFIX: usize = 12;

/// Render a colored terminal report.
pub fn render(deps: &[Dependency], summary: &ScanSummary, path: &Path, verbose: bool, quiet: bool) {
    let (records, unexpanded): (Vec<&Dependency>, Vec<&Dependency>) =
        deps.iter().partition(|d| d.ecosystem.is_some());

    if quiet {
        println!(
            "Lock files: {}  Dependencies: {}  Skipped: {}",
            summary.files,
            records.len().to_string().green(),
            summary.skipped.to_string().yellow(),
        );
        return;
    }

    println!(
        "\n {} v{}",
        "composer-inventory".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(" Scanning: {}\n", path.display());

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Lock files         : {:>4}", summary.files));
    println!(
        " │  {:<48} │",
        format!("{}  Dependencies    : {:>4}", "✓".green(), records.len())
    );
    println!(
        " │  {:<48} │",
        format!("{}  Skipped         : {:>4}", "⚠".yellow(), summary.skipped)
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if !records.is_empty() {
        println!(" {} Locked dependencies:\n", "[DEPS]".green().bold());
        render_records(&records);
        println!();
    }

    if !unexpanded.is_empty() {
        println!(" {} Files kept as-is:\n", "[FILE]".yellow().bold());
        render_files(&unexpanded);
        println!();
    }

    if verbose && !records.is_empty() {
        println!(" {} Evidence:\n", "[EVIDENCE]".cyan().bold());
        render_evidence(&records);
        println!();
    }
}

fn header(titles: &[&str]) -> Vec<Cell> {
    titles
        .iter()
        .map(|t| Cell::new(t).add_attribute(Attribute::Bold))
        .collect()
}

fn new_table(titles: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header(titles));
    table
}

fn render_records(records: &[&Dependency]) {
    let mut table = new_table(&["Vendor", "Package", "Version", "Ecosystem", "Lock file", "Identity"]);

    for dep in records {
        let vendor = dep.evidence_value(EvidenceType::Vendor).unwrap_or("");
        let lock_file = dep
            .file_path
            .rsplit_once(':')
            .map(|(container, _)| container)
            .unwrap_or(&dep.file_path);
        let ecosystem = dep
            .ecosystem
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();

        table.add_row(vec![
            Cell::new(if vendor.is_empty() { "-" } else { vendor }).fg(Color::DarkGrey),
            Cell::new(dep.name.as_deref().unwrap_or("")),
            Cell::new(dep.version.as_deref().unwrap_or("")),
            Cell::new(ecosystem),
            Cell::new(lock_file),
            Cell::new(short_hash(&dep.content_hash)).fg(Color::DarkGrey),
        ]);
    }

    println!("{}", table);
}

fn render_files(files: &[&Dependency]) {
    let mut table = new_table(&["File", "Identity"]);
    for dep in files {
        table.add_row(vec![
            Cell::new(&dep.file_path),
            Cell::new(short_hash(&dep.content_hash)).fg(Color::DarkGrey),
        ]);
    }
    println!("{}", table);
}

fn render_evidence(records: &[&Dependency]) {
    let mut table = new_table(&["Dependency", "Type", "Source", "Field", "Value", "Confidence"]);

    for dep in records {
        for evidence in &dep.evidence {
            let confidence_color = match evidence.confidence {
                Confidence::Highest => Color::Green,
                Confidence::High => Color::Cyan,
                Confidence::Medium => Color::Yellow,
                Confidence::Low => Color::DarkGrey,
            };
            table.add_row(vec![
                Cell::new(&dep.display_file_name),
                Cell::new(evidence.evidence_type.to_string()),
                Cell::new(&evidence.source),
                Cell::new(&evidence.name),
                Cell::new(&evidence.value),
                Cell::new(evidence.confidence.to_string())
                    .fg(confidence_color)
                    .set_alignment(CellAlignment::Center),
            ]);
        }
    }

    println!("{}", table);
}

fn short_hash(hash: &str) -> &str {
    hash.get(..IDENTITY_PREFIX).unwrap_or(hash)
}
