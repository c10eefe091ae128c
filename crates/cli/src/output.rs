//! Output formatting for CLI responses

use std::path::{Path, PathBuf};

use anyhow::Error;
use colored::*;
use curvetab_core::{CurveConfig, CurveError, GeneratedArtifacts};
use serde_json::{Value, json};

use crate::commands::CurveDocument;
use crate::error::CliError;

/// Width of the bar drawn next to each preview value.
const PREVIEW_BAR_WIDTH: u64 = 40;

fn print_json(value: &Value, what: &str) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to format {} as JSON: {}", what, e),
    }
}

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": format!("{:#}", error),
            "type": error_type_name(error)
        }
    });
    print_json(&error_json, "error");
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    // Print error chain if available
    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

fn error_type_name(error: &Error) -> &'static str {
    if let Some(err) = error.downcast_ref::<CurveError>() {
        return match err {
            CurveError::Configuration(_) | CurveError::DegenerateCurve(_) => "configuration",
            CurveError::IndexOutOfRange { .. } => "index_out_of_range",
            CurveError::PointCountMismatch { .. }
            | CurveError::NonFiniteValue { .. }
            | CurveError::NonIncreasingAbscissa { .. } => "invalid_points",
            CurveError::SingularSystem => "numeric",
        };
    }
    match error.downcast_ref::<CliError>() {
        Some(CliError::DocumentNotFound(_)) => "document_not_found",
        Some(CliError::InvalidDocument { .. }) | Some(CliError::JsonError(_)) => "invalid_document",
        Some(CliError::OutputExists(_)) => "output_exists",
        Some(CliError::IoError(_)) => "io",
        None => "unknown",
    }
}

/// Print a simple success message
pub fn print_success(message: &str, json: bool) {
    if json {
        print_json(
            &json!({
                "success": true,
                "message": message
            }),
            "success message",
        );
    } else {
        println!("{} {}", "✓".green(), message);
    }
}

/// Print a summary of a stored curve document
pub fn print_document(path: &Path, document: &CurveDocument, action: &str, json: bool) {
    if json {
        print_json(
            &json!({
                "success": true,
                "path": path.display().to_string(),
                "document": document
            }),
            "curve document",
        );
        return;
    }

    print_success(&format!("{} {}", action, path.display()), false);
    print_config_line(&document.config);
    println!(
        "  Points: {}",
        document
            .points
            .iter()
            .map(|p| format!("{p}"))
            .collect::<Vec<_>>()
            .join(", ")
    );
}

/// Print the outcome of moving one control point
pub fn print_point_update(path: &Path, index: usize, requested: f64, applied: f64, json: bool) {
    let clamped = requested.to_bits() != applied.to_bits();

    if json {
        print_json(
            &json!({
                "success": true,
                "path": path.display().to_string(),
                "index": index,
                "requested": requested,
                "applied": applied,
                "clamped": clamped
            }),
            "point update",
        );
        return;
    }

    print_success(
        &format!("Point {} set to {} in {}", index, applied, path.display()),
        false,
    );
    if clamped {
        println!(
            "  {} requested {} was clamped to the curve bounds",
            "Note:".yellow(),
            requested
        );
    }
}

/// Print the `(index, value)` pairs of a table
pub fn print_preview(config: &CurveConfig, rows: &[(usize, u16)], json: bool) {
    if json {
        let entries: Vec<Value> = rows
            .iter()
            .map(|(index, value)| json!({ "index": index, "value": value }))
            .collect();
        print_json(
            &json!({
                "success": true,
                "table": config.table_name,
                "domain": config.domain,
                "range": config.range,
                "element_type": config.element_type().c_type(),
                "entries": entries
            }),
            "preview",
        );
        return;
    }

    println!("{} {}", "Table:".bold(), config.table_name.cyan());
    print_config_line(config);

    let top = u64::from(config.range.saturating_sub(1));
    for &(index, value) in rows {
        let filled = match top {
            0 => 0,
            _ => u64::from(value) * PREVIEW_BAR_WIDTH / top,
        };
        let bar = "#".repeat(usize::try_from(filled).unwrap_or_default());
        println!("  {:>5}  {:>6}  {}", index, value, bar.dimmed());
    }
}

/// Print generated header and source text
pub fn print_artifacts(artifacts: &GeneratedArtifacts, json: bool) {
    if json {
        print_json(
            &json!({
                "success": true,
                "artifacts": artifacts
            }),
            "artifacts",
        );
    } else {
        print!("{}", artifacts.header_text);
        println!();
        print!("{}", artifacts.source_text);
    }
}

/// Print the paths of files written by `generate`
pub fn print_written_files(paths: &[PathBuf], json: bool) {
    if json {
        let files: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
        print_json(
            &json!({
                "success": true,
                "files": files
            }),
            "file list",
        );
        return;
    }

    for path in paths {
        print_success(&format!("Wrote {}", path.display()), false);
    }
}

fn print_config_line(config: &CurveConfig) {
    println!(
        "  {} entries, range {} ({}), y in [{}, {}]",
        config.domain,
        config.range,
        config.element_type().c_type(),
        config.y_min,
        config.y_max
    );
}
