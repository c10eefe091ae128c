//! Header and source generation

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::commands::CurveArgs;
use crate::output;

/// Export the table `args` describes, to `out_dir` or to stdout.
pub fn execute(args: &CurveArgs, out_dir: Option<&Path>, stdout: bool, json: bool) -> Result<()> {
    let artifacts = args.resolve()?.pipeline()?.export()?;

    if stdout {
        output::print_artifacts(&artifacts, json);
        return Ok(());
    }

    let dir = out_dir.unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let mut written: Vec<PathBuf> = Vec::with_capacity(2);
    for (name, text) in [
        (&artifacts.header_file, &artifacts.header_text),
        (&artifacts.source_file, &artifacts.source_text),
    ] {
        let path = dir.join(name);
        fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }

    info!(dir = %dir.display(), files = written.len(), "generated table sources");
    output::print_written_files(&written, json);
    Ok(())
}
