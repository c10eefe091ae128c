//! Curve documents: a table configuration plus control-point values, as JSON.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::Result;
use curvetab_core::{CurveConfig, CurveError, TablePipeline};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::commands::DEFAULT_POINT_COUNT;
use crate::error::CliError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveDocument {
    pub config: CurveConfig,
    pub points: Vec<f64>,
}

impl Default for CurveDocument {
    fn default() -> Self {
        let config = CurveConfig::default();
        let points = vec![config.midpoint(); DEFAULT_POINT_COUNT];
        Self { config, points }
    }
}

impl CurveDocument {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CliError::DocumentNotFound(path.to_path_buf()),
            _ => CliError::IoError(e),
        })?;

        let document: Self =
            serde_json::from_str(&content).map_err(|source| CliError::InvalidDocument {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(
            path = %path.display(),
            table = %document.config.table_name,
            points = document.points.len(),
            "loaded curve document"
        );
        Ok(document)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let mut content = serde_json::to_string_pretty(self).map_err(CliError::JsonError)?;
        content.push('\n');
        fs::write(path, content).map_err(CliError::IoError)?;

        debug!(path = %path.display(), "saved curve document");
        Ok(())
    }

    /// Pipeline holding this document's configuration and points.
    pub fn pipeline(&self) -> Result<TablePipeline, CurveError> {
        let mut pipeline = TablePipeline::configure(self.config.clone(), self.points.len())?;
        pipeline.set_values(&self.points)?;
        Ok(pipeline)
    }

    pub fn from_pipeline(pipeline: &TablePipeline) -> Self {
        Self {
            config: pipeline.config().clone(),
            points: pipeline.values(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn default_document_is_valid() -> TestResult {
        let document = CurveDocument::default();
        let pipeline = document.pipeline()?;
        assert_eq!(pipeline.values(), vec![0.5; DEFAULT_POINT_COUNT]);
        Ok(())
    }

    #[test]
    fn document_json_shape() -> TestResult {
        let document = CurveDocument {
            config: CurveConfig::new(128, 65536, "wave", -1.0, 1.0)?,
            points: vec![0.0, 1.0, -1.0],
        };
        let value = serde_json::to_value(&document)?;

        assert_eq!(value["config"]["domain"], 128);
        assert_eq!(value["config"]["table_name"], "wave");
        assert_eq!(value["points"][1], 1.0);

        let parsed: CurveDocument = serde_json::from_value(value)?;
        assert_eq!(parsed, document);
        Ok(())
    }

    #[test]
    fn pipeline_clamps_stored_points() -> TestResult {
        let document = CurveDocument {
            config: CurveConfig::new(256, 256, "gamma", 0.0, 1.0)?,
            points: vec![-3.0, 0.5, 7.0],
        };
        let round_trip = CurveDocument::from_pipeline(&document.pipeline()?);
        assert_eq!(round_trip.points, vec![0.0, 0.5, 1.0]);
        Ok(())
    }

    #[test]
    fn invalid_config_in_document_is_rejected() {
        let document = CurveDocument {
            config: CurveConfig {
                domain: 300,
                ..CurveConfig::default()
            },
            points: vec![0.0, 1.0],
        };
        assert!(matches!(
            document.pipeline(),
            Err(CurveError::Configuration(_))
        ));
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let result = CurveDocument::load(Path::new("/nonexistent/curvetab/curve.json"));
        let is_not_found = result
            .err()
            .and_then(|e| e.downcast::<CliError>().ok())
            .is_some_and(|e| matches!(e, CliError::DocumentNotFound(_)));
        assert!(is_not_found);
    }
}
