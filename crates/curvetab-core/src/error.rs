//! Error types for curve, quantization and code generation operations.

use thiserror::Error;

/// Configuration problems detected before any table is computed.
///
/// None of these produce partial output: the requested operation is
/// abandoned and the caller decides how to present the error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Domain size is not one of the supported power-of-two sizes.
    #[error("unsupported domain size {0} (expected one of 128, 256, 512, 1024)")]
    UnsupportedDomain(usize),

    /// Range is zero or wider than the 16-bit element type can hold.
    #[error("range {0} is outside [1, 65536]")]
    InvalidRange(u32),

    /// Table name cannot be used as a C symbol.
    #[error("table name '{name}' is invalid: {reason}")]
    InvalidTableName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// Y bounds are non-finite or not strictly ordered.
    #[error("y bounds [{y_min}, {y_max}] are invalid: y_min must be finite and below y_max")]
    InvalidBounds {
        /// Lower bound.
        y_min: f64,
        /// Upper bound.
        y_max: f64,
    },

    /// More control points than table entries.
    #[error("{count} control points do not fit a domain of {domain} entries")]
    TooManyPoints {
        /// Requested point count.
        count: usize,
        /// Configured domain size.
        domain: usize,
    },

    /// Table handed to the emitter does not match the configured domain.
    #[error("table has {actual} entries but the domain is {expected}")]
    TableLengthMismatch {
        /// Configured domain size.
        expected: usize,
        /// Length of the supplied table.
        actual: usize,
    },
}

/// Error type for the curve-to-table pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    /// Invalid domain, range, table name, bounds or point count.
    #[error("invalid configuration")]
    Configuration(#[from] ConfigError),

    /// Control point index outside `[0, count)`.
    #[error("control point index {index} is out of range (point count {count})")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of control points.
        count: usize,
    },

    /// Fewer than two control points.
    #[error("a curve needs at least 2 control points, got {0}")]
    DegenerateCurve(usize),

    /// A value list does not have one entry per control point.
    #[error("expected {expected} control point values, got {actual}")]
    PointCountMismatch {
        /// Number of control points.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },

    /// NaN or infinite coordinate.
    #[error("control point {index} has non-finite value {value}")]
    NonFiniteValue {
        /// Index of the offending point.
        index: usize,
        /// The rejected value.
        value: f64,
    },

    /// Control point x is not greater than its predecessor.
    #[error("control point {index} does not have a strictly increasing x coordinate")]
    NonIncreasingAbscissa {
        /// Index of the offending point.
        index: usize,
    },

    /// The spline system could not be solved.
    #[error("spline coefficient system is singular")]
    SingularSystem,
}

impl CurveError {
    /// Whether this error belongs to the configuration taxonomy.
    ///
    /// A degenerate curve is caught at configuration time as well, so it
    /// counts as one.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::DegenerateCurve(_))
    }
}
