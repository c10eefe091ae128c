//! Table preview

use anyhow::Result;

use crate::commands::CurveArgs;
use crate::output;

/// Print the `(index, value)` pairs of the table `args` describes.
pub fn execute(args: &CurveArgs, json: bool) -> Result<()> {
    let pipeline = args.resolve()?.pipeline()?;
    let rows = pipeline.preview()?;

    output::print_preview(pipeline.config(), &rows, json);
    Ok(())
}
