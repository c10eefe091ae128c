//! Control points and the natural cubic spline through them.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, CurveError};

/// A user-specified anchor the curve must pass through exactly.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    /// Abscissa, in table-index units for pipeline curves.
    pub x: f64,
    /// Curve value at `x`.
    pub y: f64,
}

impl ControlPoint {
    /// Create a control point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One cubic piece in local form `a + scale * t(b + t(c + t d))`,
/// `t = x - x0`.
///
/// `a` is the knot value itself; `b`, `c` and `d` are stored divided by the
/// spline's value scale.
#[derive(Clone, Debug, PartialEq)]
struct Segment {
    x0: f64,
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl Segment {
    #[inline]
    fn evaluate(&self, x: f64, scale: f64) -> f64 {
        let t = x - self.x0;
        self.a + scale * (t * (self.b + t * (self.c + t * self.d)))
    }
}

/// Natural cubic spline (zero second derivative at both ends).
///
/// The spline is C2-continuous and passes through every knot. With two knots
/// it is the straight line between them.
///
/// # Example
///
/// ```
/// use curvetab_core::{ControlPoint, CubicSpline};
///
/// let spline = CubicSpline::new(&[
///     ControlPoint::new(0.0, 0.0),
///     ControlPoint::new(1.0, 1.0),
///     ControlPoint::new(2.0, 0.0),
/// ])?;
///
/// assert_eq!(spline.evaluate(1.0), 1.0);
/// assert_eq!(spline.interpolate(5).len(), 5);
/// # Ok::<(), curvetab_core::CurveError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CubicSpline {
    segments: Vec<Segment>,
    scale: f64,
    x_first: f64,
    x_last: f64,
    y_last: f64,
}

impl CubicSpline {
    /// Fit a natural cubic spline through `points`.
    ///
    /// # Errors
    ///
    /// - [`CurveError::DegenerateCurve`] for fewer than two points
    /// - [`CurveError::NonFiniteValue`] for NaN or infinite coordinates
    /// - [`CurveError::NonIncreasingAbscissa`] unless x is strictly increasing
    /// - [`CurveError::SingularSystem`] if the coefficient system cannot be solved
    pub fn new(points: &[ControlPoint]) -> Result<Self, CurveError> {
        validate_points(points)?;

        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return Err(CurveError::DegenerateCurve(points.len()));
        };

        let scale = value_scale(points);
        let scaled: Vec<ControlPoint> = points
            .iter()
            .map(|point| ControlPoint::new(point.x, point.y / scale))
            .collect();
        let second_derivatives = solve_second_derivatives(&scaled)?;

        let segments = points
            .iter()
            .zip(scaled.windows(2))
            .zip(second_derivatives.windows(2))
            .filter_map(|((knot, scaled_knots), moments)| match (scaled_knots, moments) {
                ([k0, k1], [m0, m1]) => {
                    let h = k1.x - k0.x;
                    Some(Segment {
                        x0: knot.x,
                        a: knot.y,
                        b: (k1.y - k0.y) / h - h * (2.0 * m0 + m1) / 6.0,
                        c: m0 / 2.0,
                        d: (m1 - m0) / (6.0 * h),
                    })
                }
                _ => None,
            })
            .collect();

        Ok(Self {
            segments,
            scale,
            x_first: first.x,
            x_last: last.x,
            y_last: last.y,
        })
    }

    /// Evaluate the spline at `x`, clamped to the knot span.
    ///
    /// At a knot abscissa the knot's y-value is returned exactly.
    pub fn evaluate(&self, x: f64) -> f64 {
        let index = self.segment_index(x);
        self.evaluate_in(index, x)
    }

    /// Sample the spline at `count` evenly spaced abscissas from the first to
    /// the last knot, inclusive.
    pub fn interpolate(&self, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![self.evaluate(self.x_first)],
            _ => {
                let span = self.x_last - self.x_first;
                let steps = (count - 1) as f64;
                let mut index = 0;

                (0..count)
                    .map(|j| {
                        let x = if j + 1 == count {
                            self.x_last
                        } else {
                            self.x_first + (span * j as f64) / steps
                        };
                        index = self.segment_index_with_hint(index, x);
                        self.evaluate_in(index, x)
                    })
                    .collect()
            }
        }
    }

    /// Abscissa span `(x_first, x_last)`.
    pub fn span(&self) -> (f64, f64) {
        (self.x_first, self.x_last)
    }

    fn evaluate_in(&self, index: usize, x: f64) -> f64 {
        let x = x.clamp(self.x_first, self.x_last);
        if x >= self.x_last {
            return self.y_last;
        }
        self.segments
            .get(index)
            .map_or(self.y_last, |segment| segment.evaluate(x, self.scale))
    }

    fn segment_index(&self, x: f64) -> usize {
        let after = self.segments.partition_point(|segment| segment.x0 <= x);
        after.saturating_sub(1)
    }

    fn segment_index_with_hint(&self, hint: usize, x: f64) -> usize {
        let contains = |index: usize| {
            let start = self.segments.get(index).map(|segment| segment.x0);
            let end = self
                .segments
                .get(index + 1)
                .map_or(self.x_last, |segment| segment.x0);
            start.is_some_and(|start| start <= x && x < end)
        };

        if contains(hint) {
            hint
        } else if contains(hint + 1) {
            hint + 1
        } else {
            self.segment_index(x)
        }
    }
}

/// Check the spline preconditions on a point sequence.
fn validate_points(points: &[ControlPoint]) -> Result<(), CurveError> {
    if points.len() < 2 {
        return Err(CurveError::DegenerateCurve(points.len()));
    }

    for (index, point) in points.iter().enumerate() {
        if !point.x.is_finite() {
            return Err(CurveError::NonFiniteValue {
                index,
                value: point.x,
            });
        }
        if !point.y.is_finite() {
            return Err(CurveError::NonFiniteValue {
                index,
                value: point.y,
            });
        }
    }

    if let Some(index) = points
        .windows(2)
        .position(|pair| matches!(pair, [p0, p1] if p1.x <= p0.x))
    {
        return Err(CurveError::NonIncreasingAbscissa { index: index + 1 });
    }

    Ok(())
}

/// Power of two at or below the largest `|y|`, or 1 when every `y` is zero
/// or subnormal.
///
/// The solve runs on `y / scale`, so secant slopes stay finite even when the
/// knots span most of the `f64` range. Dividing by a power of two is exact,
/// so ordinary inputs give bit-identical coefficients.
fn value_scale(points: &[ControlPoint]) -> f64 {
    let largest = points.iter().map(|point| point.y.abs()).fold(0.0, f64::max);
    // Keep the exponent, drop the mantissa.
    let scale = f64::from_bits(largest.to_bits() & 0x7FF0_0000_0000_0000);
    if scale.is_normal() { scale } else { 1.0 }
}

/// Second derivatives at every knot, ends fixed to zero.
///
/// Interior values come from the tridiagonal continuity system
/// `h[i-1] M[i-1] + 2 (h[i-1] + h[i]) M[i] + h[i] M[i+1] = 6 (s[i] - s[i-1])`
/// where `s` are the secant slopes.
fn solve_second_derivatives(points: &[ControlPoint]) -> Result<Vec<f64>, CurveError> {
    let n = points.len();
    let interior = n.saturating_sub(2);
    if interior == 0 {
        return Ok(vec![0.0; n]);
    }

    let widths: Vec<f64> = points
        .windows(2)
        .map(|pair| match pair {
            [p0, p1] => p1.x - p0.x,
            _ => 0.0,
        })
        .collect();
    let slopes: Vec<f64> = points
        .windows(2)
        .zip(&widths)
        .map(|(pair, h)| match pair {
            [p0, p1] => (p1.y - p0.y) / h,
            _ => 0.0,
        })
        .collect();

    let mut matrix = DMatrix::<f64>::zeros(interior, interior);
    let mut rhs = DVector::<f64>::zeros(interior);

    for (row, (h, s)) in widths.windows(2).zip(slopes.windows(2)).enumerate() {
        let ([h0, h1], [s0, s1]) = (h, s) else {
            continue;
        };
        if row > 0 {
            matrix[(row, row - 1)] = *h0;
        }
        matrix[(row, row)] = 2.0 * (h0 + h1);
        if row + 1 < interior {
            matrix[(row, row + 1)] = *h1;
        }
        rhs[row] = 6.0 * (s1 - s0);
    }

    let solution = matrix.lu().solve(&rhs).ok_or(CurveError::SingularSystem)?;

    let mut moments = Vec::with_capacity(n);
    moments.push(0.0);
    moments.extend(solution.iter().copied());
    moments.push(0.0);
    Ok(moments)
}

/// Control points with fixed abscissas and mutable values.
///
/// This is the editable half of the curve: a caller moves points up and
/// down one at a time, and every derived sample is recomputed from the
/// current values.
#[derive(Clone, Debug, PartialEq)]
pub struct CurveModel {
    points: Vec<ControlPoint>,
}

impl CurveModel {
    /// Build a model from explicit points.
    ///
    /// # Errors
    ///
    /// Same preconditions as [`CubicSpline::new`], minus the solve.
    pub fn new(points: Vec<ControlPoint>) -> Result<Self, CurveError> {
        validate_points(&points)?;
        Ok(Self { points })
    }

    /// Place `count` points across a table of `domain` entries, all at
    /// `initial_y`.
    ///
    /// Point `i` sits on index `round(i * (domain - 1) / (count - 1))`, so
    /// every anchor lands exactly on a table entry.
    ///
    /// # Errors
    ///
    /// - [`CurveError::DegenerateCurve`] for `count < 2`
    /// - [`ConfigError::TooManyPoints`] for `count > domain`
    /// - [`CurveError::NonFiniteValue`] for a non-finite `initial_y`
    pub fn evenly_spaced(domain: usize, count: usize, initial_y: f64) -> Result<Self, CurveError> {
        if count < 2 {
            return Err(CurveError::DegenerateCurve(count));
        }
        if count > domain {
            return Err(ConfigError::TooManyPoints { count, domain }.into());
        }

        let last_index = (domain - 1) as f64;
        let intervals = (count - 1) as f64;
        let points = (0..count)
            .map(|i| ControlPoint::new((i as f64 * last_index / intervals).round(), initial_y))
            .collect();

        Self::new(points)
    }

    /// Replace the value of point `index`.
    ///
    /// # Errors
    ///
    /// - [`CurveError::IndexOutOfRange`] if `index >= len()`
    /// - [`CurveError::NonFiniteValue`] for NaN or infinite values
    ///
    /// The model is unchanged on error.
    pub fn set_point(&mut self, index: usize, value: f64) -> Result<(), CurveError> {
        let count = self.points.len();
        let point = self
            .points
            .get_mut(index)
            .ok_or(CurveError::IndexOutOfRange { index, count })?;
        if !value.is_finite() {
            return Err(CurveError::NonFiniteValue { index, value });
        }
        point.y = value;
        Ok(())
    }

    /// Set every point to `value`.
    ///
    /// # Errors
    ///
    /// [`CurveError::NonFiniteValue`] for NaN or infinite values; the model
    /// is unchanged on error.
    pub fn fill(&mut self, value: f64) -> Result<(), CurveError> {
        if !value.is_finite() {
            return Err(CurveError::NonFiniteValue { index: 0, value });
        }
        for point in &mut self.points {
            point.y = value;
        }
        Ok(())
    }

    /// Current control points.
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Current control-point values, in order.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.y).collect()
    }

    /// Number of control points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a model holds at least two points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Spline through the current points.
    ///
    /// # Errors
    ///
    /// Propagates [`CubicSpline::new`] failures.
    pub fn spline(&self) -> Result<CubicSpline, CurveError> {
        CubicSpline::new(&self.points)
    }

    /// `count` samples of the current curve over the full point span.
    ///
    /// # Errors
    ///
    /// Propagates [`CubicSpline::new`] failures.
    pub fn interpolate(&self, count: usize) -> Result<Vec<f64>, CurveError> {
        Ok(self.spline()?.interpolate(count))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn must<T, E: std::fmt::Debug>(result: Result<T, E>) -> T {
        match result {
            Ok(v) => v,
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }

    fn points(coords: &[(f64, f64)]) -> Vec<ControlPoint> {
        coords.iter().map(|&(x, y)| ControlPoint::new(x, y)).collect()
    }

    #[test]
    fn test_two_points_is_a_line() {
        let spline = must(CubicSpline::new(&points(&[(0.0, 1.0), (4.0, 3.0)])));

        for i in 0..=8 {
            let x = i as f64 * 0.5;
            assert_relative_eq!(spline.evaluate(x), 1.0 + x * 0.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_passes_through_knots() {
        let knots = points(&[(0.0, 0.0), (0.9, 0.81), (1.1, 1.21), (1.7, 2.89), (2.0, 4.0)]);
        let spline = must(CubicSpline::new(&knots));

        for knot in &knots {
            assert_relative_eq!(spline.evaluate(knot.x), knot.y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_natural_end_conditions() {
        // Symmetric data gives a symmetric curve with a flat top.
        let spline = must(CubicSpline::new(&points(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)])));

        assert_relative_eq!(spline.evaluate(0.5), spline.evaluate(1.5), epsilon = 1e-12);
        // Natural spline through (0,0), (1,1), (2,0): M1 = -3, value at 0.5 is 0.6875.
        assert_relative_eq!(spline.evaluate(0.5), 0.6875, epsilon = 1e-12);
    }

    #[test]
    fn test_known_natural_spline_moments() {
        // Unit spacing, y = [0, 1, -1, 0.5, 0]: interior second derivatives
        // solve 4 M1 + M2 = -18, M1 + 4 M2 + M3 = 21, M2 + 4 M3 = -12.
        let knots = points(&[(0.0, 0.0), (1.0, 1.0), (2.0, -1.0), (3.0, 0.5), (4.0, 0.0)]);
        let moments = must(solve_second_derivatives(&knots));

        assert_eq!(moments.len(), 5);
        assert_relative_eq!(moments[0], 0.0);
        assert_relative_eq!(moments[1], -183.0 / 28.0, epsilon = 1e-12);
        assert_relative_eq!(moments[2], 57.0 / 7.0, epsilon = 1e-12);
        assert_relative_eq!(moments[3], -141.0 / 28.0, epsilon = 1e-12);
        assert_relative_eq!(moments[4], 0.0);
    }

    #[test]
    fn test_evaluate_clamps_outside_span() {
        let spline = must(CubicSpline::new(&points(&[(0.0, 2.0), (1.0, 5.0), (3.0, -1.0)])));

        assert_relative_eq!(spline.evaluate(-10.0), 2.0);
        assert_relative_eq!(spline.evaluate(10.0), -1.0);
    }

    #[test]
    fn test_interpolate_endpoints_and_count() {
        let spline = must(CubicSpline::new(&points(&[(2.0, 1.0), (5.0, -2.0), (9.0, 4.0)])));
        let samples = spline.interpolate(64);

        assert_eq!(samples.len(), 64);
        assert_relative_eq!(samples[0], 1.0);
        assert_relative_eq!(samples[63], 4.0);
    }

    #[test]
    fn test_interpolate_small_counts() {
        let spline = must(CubicSpline::new(&points(&[(0.0, 3.0), (1.0, 7.0)])));

        assert!(spline.interpolate(0).is_empty());
        assert_eq!(spline.interpolate(1), vec![3.0]);
    }

    #[test]
    fn test_interpolate_matches_evaluate() {
        let spline = must(CubicSpline::new(&points(&[
            (0.0, 0.0),
            (3.0, 2.0),
            (4.0, -1.0),
            (10.0, 0.5),
        ])));
        let samples = spline.interpolate(41);

        for (j, sample) in samples.iter().enumerate() {
            let x = 10.0 * j as f64 / 40.0;
            assert_relative_eq!(*sample, spline.evaluate(x), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_rejects_degenerate() {
        assert_eq!(
            CubicSpline::new(&points(&[(0.0, 1.0)])),
            Err(CurveError::DegenerateCurve(1))
        );
        assert_eq!(CubicSpline::new(&[]), Err(CurveError::DegenerateCurve(0)));
    }

    #[test]
    fn test_rejects_non_increasing_x() {
        assert_eq!(
            CubicSpline::new(&points(&[(0.0, 0.0), (1.0, 1.0), (1.0, 2.0)])),
            Err(CurveError::NonIncreasingAbscissa { index: 2 })
        );
        assert_eq!(
            CubicSpline::new(&points(&[(1.0, 0.0), (0.0, 1.0)])),
            Err(CurveError::NonIncreasingAbscissa { index: 1 })
        );
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(matches!(
            CubicSpline::new(&points(&[(0.0, f64::NAN), (1.0, 1.0)])),
            Err(CurveError::NonFiniteValue { index: 0, .. })
        ));
    }

    #[test]
    fn test_evenly_spaced_positions() {
        let model = must(CurveModel::evenly_spaced(128, 5, 0.0));
        let xs: Vec<f64> = model.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 32.0, 64.0, 95.0, 127.0]);
    }

    #[test]
    fn test_evenly_spaced_limits() {
        assert_eq!(
            CurveModel::evenly_spaced(128, 1, 0.0),
            Err(CurveError::DegenerateCurve(1))
        );
        assert_eq!(
            CurveModel::evenly_spaced(128, 129, 0.0),
            Err(CurveError::Configuration(ConfigError::TooManyPoints {
                count: 129,
                domain: 128
            }))
        );

        let dense = must(CurveModel::evenly_spaced(128, 128, 0.0));
        assert!(dense
            .points()
            .iter()
            .enumerate()
            .all(|(i, p)| (p.x - i as f64).abs() < f64::EPSILON));
    }

    #[test]
    fn test_set_point() {
        let mut model = must(CurveModel::evenly_spaced(256, 4, 0.5));
        must(model.set_point(2, 0.9));
        assert_eq!(model.values(), vec![0.5, 0.5, 0.9, 0.5]);
    }

    #[test]
    fn test_fill() {
        let mut model = must(CurveModel::evenly_spaced(128, 3, 0.0));
        must(model.fill(0.25));
        assert_eq!(model.values(), vec![0.25; 3]);
        assert!(model.fill(f64::NAN).is_err());
        assert_eq!(model.values(), vec![0.25; 3]);
    }

    #[test]
    fn test_set_point_errors_leave_state() {
        let mut model = must(CurveModel::evenly_spaced(256, 3, 0.5));
        let before = model.clone();

        assert_eq!(
            model.set_point(3, 1.0),
            Err(CurveError::IndexOutOfRange { index: 3, count: 3 })
        );
        assert!(matches!(
            model.set_point(0, f64::INFINITY),
            Err(CurveError::NonFiniteValue { index: 0, .. })
        ));
        assert_eq!(
            model.set_point(7, f64::NAN),
            Err(CurveError::IndexOutOfRange { index: 7, count: 3 })
        );
        assert_eq!(model, before);
    }

    #[test]
    fn test_model_interpolate_hits_anchors() {
        let mut model = must(CurveModel::evenly_spaced(128, 5, 0.0));
        for (i, y) in [0.0, 1.0, -1.0, 0.5, 0.0].into_iter().enumerate() {
            must(model.set_point(i, y));
        }
        let samples = must(model.interpolate(128));

        for point in model.points() {
            let index = point.x as usize;
            assert_relative_eq!(samples[index], point.y, epsilon = 1e-12);
        }
    }
}
