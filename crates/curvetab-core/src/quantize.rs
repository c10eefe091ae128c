//! Mapping of interpolated samples onto an integer output range.

use crate::config::{validate_bounds, validate_range};
use crate::error::CurveError;

/// Integer element type of a generated table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// `uint8_t`, used for ranges up to 256.
    U8,
    /// `uint16_t`, used for ranges above 256.
    U16,
}

impl ElementType {
    /// Narrowest type that holds `[0, range - 1]`.
    pub const fn for_range(range: u32) -> Self {
        if range > 256 { Self::U16 } else { Self::U8 }
    }

    /// C type name, e.g. `uint16_t`.
    pub const fn c_type(self) -> &'static str {
        match self {
            Self::U8 => "uint8_t",
            Self::U16 => "uint16_t",
        }
    }

    /// Macro prefix, e.g. `UINT16`.
    pub const fn macro_prefix(self) -> &'static str {
        match self {
            Self::U8 => "UINT8",
            Self::U16 => "UINT16",
        }
    }

    /// Width in bits.
    pub const fn bits(self) -> u32 {
        match self {
            Self::U8 => 8,
            Self::U16 => 16,
        }
    }
}

/// Quantized table values together with the range that produced them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuantizedTable {
    values: Vec<u16>,
    range: u32,
}

impl QuantizedTable {
    /// Table entries, each in `[0, range - 1]`.
    pub fn values(&self) -> &[u16] {
        &self.values
    }

    /// Output range the entries were quantized to.
    pub fn range(&self) -> u32 {
        self.range
    }

    /// Element type implied by the range.
    pub fn element_type(&self) -> ElementType {
        ElementType::for_range(self.range)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(index, value)` pairs for display.
    pub fn indexed(&self) -> Vec<(usize, u16)> {
        self.values.iter().copied().enumerate().collect()
    }

    /// Consume the table and return its entries.
    pub fn into_values(self) -> Vec<u16> {
        self.values
    }
}

/// Quantize `samples` from `[y_min, y_max]` onto `[0, range - 1]`.
///
/// Each sample maps to `floor((s - y_min) / (y_max - y_min) * (range - 1))`,
/// clamped to the output range so spline overshoot past the bounds saturates.
/// NaN samples map to 0. When `y_max - y_min` overflows, samples and bounds
/// are halved first, so any finite bounds quantize correctly.
///
/// # Errors
///
/// Returns a configuration error, before touching any sample, when the
/// bounds are not finite with `y_min < y_max` or `range` is outside
/// `[1, 65536]`.
///
/// # Example
///
/// ```
/// use curvetab_core::quantize;
///
/// let table = quantize(&[-1.0, 0.0, 0.999, 1.0, 1.2], -1.0, 1.0, 256)?;
/// assert_eq!(table.values(), &[0, 127, 254, 255, 255]);
/// # Ok::<(), curvetab_core::CurveError>(())
/// ```
pub fn quantize(
    samples: &[f64],
    y_min: f64,
    y_max: f64,
    range: u32,
) -> Result<QuantizedTable, CurveError> {
    validate_bounds(y_min, y_max)?;
    validate_range(range)?;

    let top = f64::from(range - 1);
    let span = y_max - y_min;
    let shrink = if span.is_finite() { 1.0 } else { 0.5 };
    let offset = y_min * shrink;
    let scale = y_max * shrink - offset;

    let values = samples
        .iter()
        .map(|&sample| quantize_sample(sample * shrink, offset, scale, top))
        .collect();

    Ok(QuantizedTable { values, range })
}

#[inline]
fn quantize_sample(sample: f64, offset: f64, scale: f64, top: f64) -> u16 {
    let raw = ((sample - offset) / scale * top).floor();
    if raw.is_nan() {
        return 0;
    }
    // Clamped to [0, 65535] first, so the cast is exact.
    raw.clamp(0.0, top) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    fn must<T, E: std::fmt::Debug>(result: Result<T, E>) -> T {
        match result {
            Ok(v) => v,
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }

    #[test]
    fn test_element_type_selection() {
        assert_eq!(ElementType::for_range(1), ElementType::U8);
        assert_eq!(ElementType::for_range(256), ElementType::U8);
        assert_eq!(ElementType::for_range(257), ElementType::U16);
        assert_eq!(ElementType::for_range(65536), ElementType::U16);
    }

    #[test]
    fn test_element_type_names() {
        assert_eq!(ElementType::U8.c_type(), "uint8_t");
        assert_eq!(ElementType::U16.c_type(), "uint16_t");
        assert_eq!(ElementType::U8.macro_prefix(), "UINT8");
        assert_eq!(ElementType::U16.macro_prefix(), "UINT16");
        assert_eq!(ElementType::U16.bits(), 16);
    }

    #[test]
    fn test_bounds_map_to_ends() {
        let table = must(quantize(&[0.0, 1.0], 0.0, 1.0, 65536));
        assert_eq!(table.values(), &[0, 65535]);
    }

    #[test]
    fn test_truncates_toward_floor() {
        // 0.5 * 255 = 127.5 truncates to 127.
        let table = must(quantize(&[0.5], 0.0, 1.0, 256));
        assert_eq!(table.values(), &[127]);
    }

    #[test]
    fn test_overshoot_is_clamped() {
        let table = must(quantize(&[-0.3, 1.7, f64::INFINITY, f64::NEG_INFINITY], 0.0, 1.0, 100));
        assert_eq!(table.values(), &[0, 99, 99, 0]);
    }

    #[test]
    fn test_nan_maps_to_zero() {
        let table = must(quantize(&[f64::NAN], 0.0, 1.0, 256));
        assert_eq!(table.values(), &[0]);
    }

    #[test]
    fn test_range_of_one() {
        let table = must(quantize(&[0.0, 0.5, 1.0], 0.0, 1.0, 1));
        assert_eq!(table.values(), &[0, 0, 0]);
    }

    #[test]
    fn test_rejects_bad_bounds() {
        assert_eq!(
            quantize(&[0.5], 1.0, 1.0, 256),
            Err(CurveError::Configuration(ConfigError::InvalidBounds {
                y_min: 1.0,
                y_max: 1.0
            }))
        );
        assert!(quantize(&[0.5], 2.0, 1.0, 256).is_err());
    }

    #[test]
    fn test_rejects_bad_range() {
        assert_eq!(
            quantize(&[0.5], 0.0, 1.0, 0),
            Err(CurveError::Configuration(ConfigError::InvalidRange(0)))
        );
        assert!(quantize(&[0.5], 0.0, 1.0, 65537).is_err());
    }

    #[test]
    fn test_indexed_and_metadata() {
        let table = must(quantize(&[0.0, 0.5, 1.0], 0.0, 1.0, 1024));
        assert_eq!(table.len(), 3);
        assert_eq!(table.range(), 1024);
        assert_eq!(table.element_type(), ElementType::U16);
        assert_eq!(table.indexed(), vec![(0, 0), (1, 511), (2, 1023)]);
    }

    #[test]
    fn test_empty_samples() {
        let table = must(quantize(&[], 0.0, 1.0, 256));
        assert!(table.is_empty());
    }
}
