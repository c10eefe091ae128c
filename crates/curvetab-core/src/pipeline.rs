//! The curve-to-table pipeline owned by an editing front end.

use tracing::{debug, trace};

use crate::config::CurveConfig;
use crate::curve::{ControlPoint, CurveModel};
use crate::emit::{GeneratedArtifacts, emit};
use crate::error::CurveError;
use crate::quantize::{QuantizedTable, quantize};

/// Control points plus table configuration, and every derived artifact.
///
/// The pipeline keeps no caches: samples, tables, previews and exports are
/// recomputed from the current points and configuration on every call, so
/// a front end only has to call [`TablePipeline::set_point`] and ask again.
///
/// # Example
///
/// ```
/// use curvetab_core::{CurveConfig, TablePipeline};
///
/// let config = CurveConfig::new(128, 65536, "wave", -1.0, 1.0)?;
/// let mut pipeline = TablePipeline::configure(config, 5)?;
///
/// for (index, value) in [0.0, 1.0, -1.0, 0.5, 0.0].into_iter().enumerate() {
///     pipeline.set_point(index, value)?;
/// }
///
/// let artifacts = pipeline.export()?;
/// assert!(artifacts.header_text.contains("#define UINT16_WAVE(x) wave[(x) & 0x7F]"));
/// # Ok::<(), curvetab_core::CurveError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TablePipeline {
    config: CurveConfig,
    model: CurveModel,
}

impl TablePipeline {
    /// Create a pipeline with `point_count` points at the y-range midpoint.
    ///
    /// # Errors
    ///
    /// - any [`ConfigError`](crate::ConfigError) from [`CurveConfig::validate`]
    /// - [`CurveError::DegenerateCurve`] for fewer than two points
    /// - [`ConfigError::TooManyPoints`](crate::ConfigError::TooManyPoints) for more points than table entries
    pub fn configure(config: CurveConfig, point_count: usize) -> Result<Self, CurveError> {
        let domain = config.validate()?;
        let model = CurveModel::evenly_spaced(domain.size(), point_count, config.midpoint())?;

        debug!(
            table = %config.table_name,
            domain = domain.size(),
            range = config.range,
            points = point_count,
            "configured curve table"
        );

        Ok(Self { config, model })
    }

    /// Replace configuration and point set.
    ///
    /// All points restart at the new midpoint. On error the pipeline keeps
    /// its previous state.
    ///
    /// # Errors
    ///
    /// Same as [`TablePipeline::configure`].
    pub fn reconfigure(
        &mut self,
        config: CurveConfig,
        point_count: usize,
    ) -> Result<(), CurveError> {
        *self = Self::configure(config, point_count)?;
        Ok(())
    }

    /// Move control point `index` to `value`, clamped to the y-bounds.
    ///
    /// Returns the value actually stored.
    ///
    /// # Errors
    ///
    /// - [`CurveError::IndexOutOfRange`] for an index past the last point
    /// - [`CurveError::NonFiniteValue`] for NaN or infinite input
    ///
    /// The pipeline is unchanged on error.
    pub fn set_point(&mut self, index: usize, value: f64) -> Result<f64, CurveError> {
        let count = self.model.len();
        if index >= count {
            return Err(CurveError::IndexOutOfRange { index, count });
        }
        if !value.is_finite() {
            return Err(CurveError::NonFiniteValue { index, value });
        }
        let applied = self.config.clamp(value);
        self.model.set_point(index, applied)?;

        trace!(index, value, applied, "control point moved");
        Ok(applied)
    }

    /// Replace every control-point value at once, e.g. from a stored snapshot.
    ///
    /// Values are clamped like [`TablePipeline::set_point`]. Either all
    /// values are applied or none.
    ///
    /// # Errors
    ///
    /// - [`CurveError::PointCountMismatch`] unless there is one value per point
    /// - [`CurveError::NonFiniteValue`] for NaN or infinite values
    pub fn set_values(&mut self, values: &[f64]) -> Result<(), CurveError> {
        let count = self.model.len();
        if values.len() != count {
            return Err(CurveError::PointCountMismatch {
                expected: count,
                actual: values.len(),
            });
        }

        let mut model = self.model.clone();
        for (index, &value) in values.iter().enumerate() {
            if !value.is_finite() {
                return Err(CurveError::NonFiniteValue { index, value });
            }
            model.set_point(index, self.config.clamp(value))?;
        }
        self.model = model;

        debug!(points = count, "control point values replaced");
        Ok(())
    }

    /// Put every control point back at the y-range midpoint.
    ///
    /// # Errors
    ///
    /// [`CurveError::NonFiniteValue`] if the midpoint is not finite, which
    /// validated bounds rule out.
    pub fn reset(&mut self) -> Result<(), CurveError> {
        let midpoint = self.config.midpoint();
        self.model.fill(midpoint)?;
        debug!(midpoint, "control points reset");
        Ok(())
    }

    /// Current configuration.
    pub fn config(&self) -> &CurveConfig {
        &self.config
    }

    /// Current control points.
    pub fn points(&self) -> &[ControlPoint] {
        self.model.points()
    }

    /// Current control-point values.
    pub fn values(&self) -> Vec<f64> {
        self.model.values()
    }

    /// Interpolated curve, one sample per table entry.
    ///
    /// # Errors
    ///
    /// Propagates spline construction failures.
    pub fn samples(&self) -> Result<Vec<f64>, CurveError> {
        self.model.interpolate(self.config.domain)
    }

    /// Quantized table of the current curve.
    ///
    /// # Errors
    ///
    /// Propagates spline and quantization failures.
    pub fn table(&self) -> Result<QuantizedTable, CurveError> {
        let samples = self.samples()?;
        quantize(&samples, self.config.y_min, self.config.y_max, self.config.range)
    }

    /// `(index, value)` pairs of the current table, for display.
    ///
    /// # Errors
    ///
    /// Same as [`TablePipeline::table`].
    pub fn preview(&self) -> Result<Vec<(usize, u16)>, CurveError> {
        Ok(self.table()?.indexed())
    }

    /// Header and source for the current table.
    ///
    /// # Errors
    ///
    /// Same as [`TablePipeline::table`], plus emitter configuration errors.
    pub fn export(&self) -> Result<GeneratedArtifacts, CurveError> {
        let table = self.table()?;
        let artifacts = emit(&self.config, &table)?;

        debug!(
            header = %artifacts.header_file,
            source = %artifacts.source_file,
            bytes = artifacts.header_text.len() + artifacts.source_text.len(),
            "exported table sources"
        );
        Ok(artifacts)
    }
}
