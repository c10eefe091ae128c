//! Command implementations for the curvetab CLI

pub mod document;
pub mod edit;
pub mod generate;
pub mod preview;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

pub use document::CurveDocument;

/// Point count used when neither a document, `--points` nor `--count` gives one.
pub const DEFAULT_POINT_COUNT: usize = 5;

/// Where a curve comes from: an optional document plus flag overrides.
#[derive(Args, Debug, Default, Clone)]
pub struct CurveArgs {
    /// Curve document (JSON) to start from
    #[arg(short, long)]
    pub curve: Option<PathBuf>,

    /// Number of table entries (128, 256, 512 or 1024)
    #[arg(short, long)]
    pub domain: Option<usize>,

    /// Number of distinct output values (1 to 65536)
    #[arg(short, long)]
    pub range: Option<u32>,

    /// C symbol of the generated table
    #[arg(short, long)]
    pub name: Option<String>,

    /// Curve value mapped to 0
    #[arg(long, allow_hyphen_values = true)]
    pub y_min: Option<f64>,

    /// Curve value mapped to range - 1
    #[arg(long, allow_hyphen_values = true)]
    pub y_max: Option<f64>,

    /// Control-point values, comma separated
    #[arg(
        short,
        long,
        value_delimiter = ',',
        allow_hyphen_values = true,
        conflicts_with = "count"
    )]
    pub points: Option<Vec<f64>>,

    /// Number of control points, all starting at the midpoint
    #[arg(long)]
    pub count: Option<usize>,
}

impl CurveArgs {
    /// Load the document (if any) and apply the flag overrides.
    pub fn resolve(&self) -> Result<CurveDocument> {
        let (mut config, stored_points) = match &self.curve {
            Some(path) => {
                let document = CurveDocument::load(path)?;
                (document.config, Some(document.points))
            }
            None => (CurveDocument::default().config, None),
        };

        if let Some(domain) = self.domain {
            config.domain = domain;
        }
        if let Some(range) = self.range {
            config.range = range;
        }
        if let Some(name) = &self.name {
            config.table_name.clone_from(name);
        }
        if let Some(y_min) = self.y_min {
            config.y_min = y_min;
        }
        if let Some(y_max) = self.y_max {
            config.y_max = y_max;
        }

        let points = match (&self.points, self.count, stored_points) {
            (Some(points), _, _) => points.clone(),
            (None, Some(count), _) => vec![config.midpoint(); count],
            (None, None, Some(points)) => points,
            (None, None, None) => vec![config.midpoint(); DEFAULT_POINT_COUNT],
        };

        Ok(CurveDocument { config, points })
    }
}
