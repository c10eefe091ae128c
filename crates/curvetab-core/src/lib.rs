//! Curve-to-Table Generation for Firmware Lookup Tables
//!
//! This crate turns a handful of control points into a fixed-size integer
//! lookup table and the C sources that define it, so firmware can evaluate
//! a waveform, gamma curve or compression curve with a single masked array
//! access instead of runtime floating-point interpolation.
//!
//! # Overview
//!
//! The pipeline runs in four stages, each usable on its own:
//! - **Curve**: natural cubic spline through the control points
//!   ([`CubicSpline`], [`CurveModel`])
//! - **Quantize**: samples mapped onto `[0, range - 1]` with floor rounding
//!   and clamping ([`quantize`])
//! - **Format**: values rendered in the fixed column layout of generated
//!   tables ([`TableLayout`])
//! - **Emit**: header and source text with include guard, access macro and
//!   array definition ([`emit`])
//!
//! [`TablePipeline`] ties the stages together behind a `configure` /
//! `set_point` / `export` API for editing front ends.
//!
//! # Determinism
//!
//! Every artifact is a pure function of the control-point values and the
//! [`CurveConfig`]; repeated exports of the same state are byte-identical.
//! The crate performs no file I/O.
//!
//! # Example
//!
//! ```
//! use curvetab_core::{CurveConfig, TablePipeline};
//!
//! let config = CurveConfig::new(256, 256, "gamma", 0.0, 1.0)?;
//! let mut pipeline = TablePipeline::configure(config, 3)?;
//! pipeline.set_point(0, 0.0)?;
//! pipeline.set_point(1, 0.2)?;
//! pipeline.set_point(2, 1.0)?;
//!
//! let table = pipeline.table()?;
//! assert_eq!(table.len(), 256);
//! assert_eq!(table.values()[0], 0);
//! assert_eq!(table.values()[255], 255);
//!
//! let artifacts = pipeline.export()?;
//! assert!(artifacts.source_text.contains("uint8_t gamma[256] = {"));
//! # Ok::<(), curvetab_core::CurveError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod curve;
pub mod emit;
pub mod error;
pub mod format;
pub mod pipeline;
pub mod prelude;
pub mod quantize;

pub use config::{CurveConfig, MAX_RANGE, TableDomain};
pub use curve::{ControlPoint, CubicSpline, CurveModel};
pub use emit::{GeneratedArtifacts, emit, emit_with_body};
pub use error::{ConfigError, CurveError};
pub use format::{TableLayout, format_table};
pub use pipeline::TablePipeline;
pub use quantize::{ElementType, QuantizedTable, quantize};
