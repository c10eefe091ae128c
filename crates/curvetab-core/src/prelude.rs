//! Prelude for the curvetab core crate.
//!
//! This module re-exports the types needed to drive the pipeline.
//!
//! # Example
//!
//! ```
//! use curvetab_core::prelude::*;
//!
//! let config = CurveConfig::new(128, 256, "ramp", 0.0, 1.0)?;
//! let pipeline = TablePipeline::configure(config, 2)?;
//! let artifacts: GeneratedArtifacts = pipeline.export()?;
//! assert_eq!(artifacts.header_file, "ramp.h");
//! # Ok::<(), CurveError>(())
//! ```

pub use crate::config::{CurveConfig, TableDomain};
pub use crate::curve::ControlPoint;
pub use crate::emit::GeneratedArtifacts;
pub use crate::error::{ConfigError, CurveError};
pub use crate::pipeline::TablePipeline;
pub use crate::quantize::{ElementType, QuantizedTable};
