//! Table configuration: domain, range, symbol name and y-bounds.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::quantize::ElementType;

/// Largest supported range; values must fit a 16-bit element.
pub const MAX_RANGE: u32 = 1 << 16;

/// Words a table name must not collide with once emitted as a C symbol.
const C_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while",
];

/// Supported lookup table sizes.
///
/// Every size is a power of two so the generated access macro can wrap its
/// index with a bitmask instead of a modulo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableDomain {
    /// 128 entries, mask `0x7F`.
    D128,
    /// 256 entries, mask `0xFF`.
    D256,
    /// 512 entries, mask `0x1FF`.
    D512,
    /// 1024 entries, mask `0x3FF`.
    D1024,
}

impl TableDomain {
    /// All supported domains, smallest first.
    pub const ALL: [TableDomain; 4] = [Self::D128, Self::D256, Self::D512, Self::D1024];

    /// Number of table entries.
    pub const fn size(self) -> usize {
        match self {
            Self::D128 => 128,
            Self::D256 => 256,
            Self::D512 => 512,
            Self::D1024 => 1024,
        }
    }

    /// Index mask (`size - 1`).
    pub const fn mask(self) -> usize {
        match self {
            Self::D128 => 0x7F,
            Self::D256 => 0xFF,
            Self::D512 => 0x1FF,
            Self::D1024 => 0x3FF,
        }
    }

    /// Mask as it appears in generated C, e.g. `0x1FF`.
    pub fn mask_literal(self) -> String {
        format!("{:#X}", self.mask())
    }
}

impl TryFrom<usize> for TableDomain {
    type Error = ConfigError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|domain| domain.size() == size)
            .ok_or(ConfigError::UnsupportedDomain(size))
    }
}

/// Configuration of one generated table.
///
/// Plain data so callers can persist it; [`CurveConfig::validate`] is run by
/// every operation that consumes it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveConfig {
    /// Number of table entries (one of 128, 256, 512, 1024).
    pub domain: usize,
    /// Number of distinct output values; entries lie in `[0, range - 1]`.
    pub range: u32,
    /// C symbol of the table; uppercased for the guard and macro.
    pub table_name: String,
    /// Lower y-bound, quantized to 0.
    pub y_min: f64,
    /// Upper y-bound, quantized to `range - 1`.
    pub y_max: f64,
}

impl CurveConfig {
    /// Create a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found by [`CurveConfig::validate`].
    ///
    /// # Example
    ///
    /// ```
    /// use curvetab_core::CurveConfig;
    ///
    /// let config = CurveConfig::new(128, 65536, "wave", -1.0, 1.0)?;
    /// assert_eq!(config.upper_name(), "WAVE");
    /// assert!(CurveConfig::new(100, 256, "wave", -1.0, 1.0).is_err());
    /// # Ok::<(), curvetab_core::ConfigError>(())
    /// ```
    pub fn new(
        domain: usize,
        range: u32,
        table_name: impl Into<String>,
        y_min: f64,
        y_max: f64,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            domain,
            range,
            table_name: table_name.into(),
            y_min,
            y_max,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check every field and return the parsed domain.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::UnsupportedDomain`] for a domain outside the enumerated set
    /// - [`ConfigError::InvalidRange`] for a range outside `[1, 65536]`
    /// - [`ConfigError::InvalidTableName`] for a name that is not a usable C symbol
    /// - [`ConfigError::InvalidBounds`] unless `y_min < y_max` and both are finite
    pub fn validate(&self) -> Result<TableDomain, ConfigError> {
        let domain = TableDomain::try_from(self.domain)?;
        validate_range(self.range)?;
        validate_table_name(&self.table_name)?;
        validate_bounds(self.y_min, self.y_max)?;
        Ok(domain)
    }

    /// Element type selected by the range.
    pub fn element_type(&self) -> ElementType {
        ElementType::for_range(self.range)
    }

    /// Table name uppercased for the include guard and macro.
    pub fn upper_name(&self) -> String {
        self.table_name.to_ascii_uppercase()
    }

    /// Midpoint of the y-bounds, the initial value of new control points.
    pub fn midpoint(&self) -> f64 {
        self.y_min / 2.0 + self.y_max / 2.0
    }

    /// Clamp a y-value to the configured bounds.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.y_min, self.y_max)
    }

    /// File name of the generated header.
    pub fn header_file_name(&self) -> String {
        format!("{}.h", self.table_name)
    }

    /// File name of the generated source.
    pub fn source_file_name(&self) -> String {
        format!("{}.c", self.table_name)
    }
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            domain: TableDomain::D256.size(),
            range: 256,
            table_name: "curve".to_string(),
            y_min: 0.0,
            y_max: 1.0,
        }
    }
}

pub(crate) fn validate_range(range: u32) -> Result<(), ConfigError> {
    if range == 0 || range > MAX_RANGE {
        return Err(ConfigError::InvalidRange(range));
    }
    Ok(())
}

pub(crate) fn validate_bounds(y_min: f64, y_max: f64) -> Result<(), ConfigError> {
    if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
        return Err(ConfigError::InvalidBounds { y_min, y_max });
    }
    Ok(())
}

fn validate_table_name(name: &str) -> Result<(), ConfigError> {
    let invalid = |reason| ConfigError::InvalidTableName {
        name: name.to_string(),
        reason,
    };

    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err(invalid("must not be empty"));
    };
    if first.is_ascii_digit() {
        return Err(invalid("must not start with a digit"));
    }
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(invalid("must start with a letter or underscore"));
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(invalid("may only contain ASCII letters, digits and underscores"));
    }
    if C_KEYWORDS.contains(&name) {
        return Err(invalid("is a reserved C keyword"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_masks() {
        let literals: Vec<String> = TableDomain::ALL
            .iter()
            .map(|domain| domain.mask_literal())
            .collect();
        assert_eq!(literals, ["0x7F", "0xFF", "0x1FF", "0x3FF"]);
    }

    #[test]
    fn test_domain_mask_is_size_minus_one() {
        for domain in TableDomain::ALL {
            assert_eq!(domain.mask(), domain.size() - 1);
            assert!(domain.size().is_power_of_two());
        }
    }

    #[test]
    fn test_domain_try_from() {
        assert_eq!(TableDomain::try_from(512), Ok(TableDomain::D512));
        for bad in [0, 16, 100, 127, 2048] {
            assert_eq!(
                TableDomain::try_from(bad),
                Err(ConfigError::UnsupportedDomain(bad))
            );
        }
    }

    #[test]
    fn test_range_limits() {
        assert!(validate_range(1).is_ok());
        assert!(validate_range(MAX_RANGE).is_ok());
        assert_eq!(validate_range(0), Err(ConfigError::InvalidRange(0)));
        assert_eq!(
            validate_range(MAX_RANGE + 1),
            Err(ConfigError::InvalidRange(MAX_RANGE + 1))
        );
    }

    #[test]
    fn test_bounds() {
        assert!(validate_bounds(-1.0, 1.0).is_ok());
        assert!(validate_bounds(1.0, 1.0).is_err());
        assert!(validate_bounds(2.0, 1.0).is_err());
        assert!(validate_bounds(f64::NAN, 1.0).is_err());
        assert!(validate_bounds(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_table_names() {
        for good in ["wave", "_gamma", "sine_128", "Curve2"] {
            assert!(validate_table_name(good).is_ok(), "{good} should be accepted");
        }
        for bad in ["", "9lives", "has space", "dash-name", "int", "ümlaut"] {
            assert!(validate_table_name(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_new_validates() {
        assert!(CurveConfig::new(256, 256, "curve", 0.0, 1.0).is_ok());
        assert_eq!(
            CurveConfig::new(300, 256, "curve", 0.0, 1.0),
            Err(ConfigError::UnsupportedDomain(300))
        );
        assert!(matches!(
            CurveConfig::new(256, 256, "curve", 1.0, 0.0),
            Err(ConfigError::InvalidBounds { .. })
        ));
    }

    #[test]
    fn test_default_is_valid() {
        assert!(CurveConfig::default().validate().is_ok());
    }

    #[test]
    fn test_midpoint_and_clamp() -> Result<(), ConfigError> {
        let config = CurveConfig::new(128, 256, "wave", -1.0, 3.0)?;
        assert!((config.midpoint() - 1.0).abs() < f64::EPSILON);
        assert!((config.clamp(5.0) - 3.0).abs() < f64::EPSILON);
        assert!((config.clamp(-2.0) + 1.0).abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn test_file_names() -> Result<(), ConfigError> {
        let config = CurveConfig::new(128, 256, "gamma", 0.0, 1.0)?;
        assert_eq!(config.header_file_name(), "gamma.h");
        assert_eq!(config.source_file_name(), "gamma.c");
        Ok(())
    }

    #[test]
    fn test_serde_round_trip() -> Result<(), serde_json::Error> {
        let config = CurveConfig::default();
        let json = serde_json::to_string(&config)?;
        let back: CurveConfig = serde_json::from_str(&json)?;
        assert_eq!(config, back);
        Ok(())
    }
}
