//! Commands that create or modify a stored curve document

use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::commands::{CurveArgs, CurveDocument};
use crate::error::CliError;
use crate::output;

/// Write a new curve document built from `args`.
pub fn init(args: &CurveArgs, output_path: &Path, force: bool, json: bool) -> Result<()> {
    if output_path.exists() && !force {
        return Err(CliError::OutputExists(output_path.to_path_buf()).into());
    }

    let document = args.resolve()?;
    // Round-trip through the pipeline so only valid, clamped documents are written.
    let document = CurveDocument::from_pipeline(&document.pipeline()?);
    document.save(output_path)?;

    info!(path = %output_path.display(), "created curve document");
    output::print_document(output_path, &document, "Created", json);
    Ok(())
}

/// Move one control point of a stored document.
pub fn set(curve: &Path, index: usize, value: f64, json: bool) -> Result<()> {
    let mut pipeline = CurveDocument::load(curve)?.pipeline()?;
    let applied = pipeline.set_point(index, value)?;
    CurveDocument::from_pipeline(&pipeline).save(curve)?;

    info!(path = %curve.display(), index, applied, "updated control point");
    output::print_point_update(curve, index, value, applied, json);
    Ok(())
}

/// Put every control point of a stored document back at the midpoint.
pub fn reset(curve: &Path, json: bool) -> Result<()> {
    let mut pipeline = CurveDocument::load(curve)?.pipeline()?;
    pipeline.reset()?;
    let document = CurveDocument::from_pipeline(&pipeline);
    document.save(curve)?;

    info!(path = %curve.display(), "reset control points");
    output::print_document(curve, &document, "Reset", json);
    Ok(())
}
