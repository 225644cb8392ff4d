//! # Axis Remap Tables
//!
//! Converts the drone's native axis convention into the consumer's convention.
//!
//! Every remap is a fixed table of `(source index, sign, divisor)` terms, one
//! per output component. The pose, IMU and transform converters all go through
//! [`POSITION_REMAP`] and [`ORIENTATION_REMAP`], so the three outputs cannot
//! drift apart.
//!
//! ## Tables
//!
//! | Output | Source | Sign | Divisor |
//! |--------|--------|------|---------|
//! | position.x | pos_x | + | 10 |
//! | position.y | pos_y | - | 10 |
//! | position.z | pos_z | + | 10 |
//! | orientation.x | q1 | + | 1 |
//! | orientation.y | q2 | - | 1 |
//! | orientation.z | q3 | - | 1 |
//! | orientation.w | q0 | + | 1 |
//!
//! Values are widened to `f64` before dividing. No validation or clamping is
//! done, so NaN and infinities pass straight through.

use crate::messages::{Quaternion, Vector3};
use crate::telemetry::types::{InertialData, VisualOdometry};

/// MVO positions are reported in tenths of a metre.
pub const MVO_POSITION_DIVISOR: f64 = 10.0;

/// Sign applied to a remapped component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Keep,
    Negate,
}

/// One output component of a remap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisTerm {
    /// Index into the input array
    pub source: usize,
    pub sign: Sign,
    /// Unit scaling, applied as a division before the sign
    pub divisor: f64,
}

impl AxisTerm {
    /// Term that copies `source` with `sign`, no scaling.
    #[must_use]
    pub const fn copy(source: usize, sign: Sign) -> Self {
        Self {
            source,
            sign,
            divisor: 1.0,
        }
    }

    /// Term that divides `source` by `divisor`, then applies `sign`.
    #[must_use]
    pub const fn scaled(source: usize, sign: Sign, divisor: f64) -> Self {
        Self {
            source,
            sign,
            divisor,
        }
    }

    fn apply(&self, value: f32) -> f64 {
        let scaled = f64::from(value) / self.divisor;
        match self.sign {
            Sign::Keep => scaled,
            Sign::Negate => -scaled,
        }
    }
}

/// A fixed sign/permutation/scale table from `IN` inputs to `OUT` outputs.
///
/// # Examples
///
/// ```
/// use tello_bridge::convert::remap::{AxisRemap, AxisTerm, Sign};
///
/// // Swap two axes and flip the second.
/// let swap = AxisRemap::new([AxisTerm::copy(1, Sign::Keep), AxisTerm::copy(0, Sign::Negate)]);
/// assert_eq!(swap.apply([1.0, 2.0]), [2.0, -1.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRemap<const IN: usize, const OUT: usize> {
    terms: [AxisTerm; OUT],
}

impl<const IN: usize, const OUT: usize> AxisRemap<IN, OUT> {
    /// Builds a remap table.
    ///
    /// # Panics
    ///
    /// Panics (at compile time for `const` tables) if a term's source index is
    /// out of range for `IN`.
    #[must_use]
    pub const fn new(terms: [AxisTerm; OUT]) -> Self {
        let mut i = 0;
        while i < OUT {
            assert!(terms[i].source < IN, "remap source index out of range");
            i += 1;
        }
        Self { terms }
    }

    /// Terms in output order.
    #[must_use]
    pub fn terms(&self) -> &[AxisTerm; OUT] {
        &self.terms
    }

    /// Applies the table to `input`.
    #[must_use]
    pub fn apply(&self, input: [f32; IN]) -> [f64; OUT] {
        self.terms.map(|term| term.apply(input[term.source]))
    }
}

/// `[pos_x, pos_y, pos_z]` -> `[x, y, z]`
pub const POSITION_REMAP: AxisRemap<3, 3> = AxisRemap::new([
    AxisTerm::scaled(0, Sign::Keep, MVO_POSITION_DIVISOR),
    AxisTerm::scaled(1, Sign::Negate, MVO_POSITION_DIVISOR),
    AxisTerm::scaled(2, Sign::Keep, MVO_POSITION_DIVISOR),
]);

/// `[q0, q1, q2, q3]` -> `[x, y, z, w]`
pub const ORIENTATION_REMAP: AxisRemap<4, 4> = AxisRemap::new([
    AxisTerm::copy(1, Sign::Keep),
    AxisTerm::copy(2, Sign::Negate),
    AxisTerm::copy(3, Sign::Negate),
    AxisTerm::copy(0, Sign::Keep),
]);

/// Remapped MVO position in metres.
#[must_use]
pub fn remap_position(mvo: &VisualOdometry) -> Vector3 {
    Vector3::from_array(POSITION_REMAP.apply([mvo.pos_x, mvo.pos_y, mvo.pos_z]))
}

/// Remapped IMU attitude quaternion.
#[must_use]
pub fn remap_orientation(imu: &InertialData) -> Quaternion {
    Quaternion::from_array(ORIENTATION_REMAP.apply([imu.q0, imu.q1, imu.q2, imu.q3]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn imu_with_quaternion(q0: f32, q1: f32, q2: f32, q3: f32) -> InertialData {
        InertialData {
            q0,
            q1,
            q2,
            q3,
            ..InertialData::default()
        }
    }

    // ==================== Position ====================

    #[test]
    fn test_position_scales_and_flips_y() {
        let mvo = VisualOdometry {
            pos_x: 100.0,
            pos_y: 50.0,
            pos_z: 20.0,
            ..VisualOdometry::default()
        };

        let p = remap_position(&mvo);
        assert_eq!(p, Vector3::new(10.0, -5.0, 2.0));
    }

    #[test]
    fn test_position_matches_division_exactly() {
        // Division (not multiplication by 0.1) keeps results bit-identical.
        for &(x, y, z) in &[(3.0f32, 7.0f32, -1.0f32), (0.3, 123.456, -99.9), (1e-6, 1e6, 33.3)] {
            let mvo = VisualOdometry {
                pos_x: x,
                pos_y: y,
                pos_z: z,
                ..VisualOdometry::default()
            };
            let p = remap_position(&mvo);
            assert_eq!(p.x, f64::from(x) / 10.0);
            assert_eq!(p.y, -f64::from(y) / 10.0);
            assert_eq!(p.z, f64::from(z) / 10.0);
        }
    }

    #[test]
    fn test_position_passes_non_finite_through() {
        let mvo = VisualOdometry {
            pos_x: f32::NAN,
            pos_y: f32::INFINITY,
            pos_z: f32::NEG_INFINITY,
            ..VisualOdometry::default()
        };

        let p = remap_position(&mvo);
        assert!(p.x.is_nan());
        assert_eq!(p.y, f64::NEG_INFINITY);
        assert_eq!(p.z, f64::NEG_INFINITY);
    }

    // ==================== Orientation ====================

    #[test]
    fn test_orientation_fixed_point() {
        let imu = imu_with_quaternion(0.5, 0.5, -0.5, 0.5);
        let q = remap_orientation(&imu);

        assert_eq!(q.w, f64::from(imu.q0));
        assert_eq!(q.x, f64::from(imu.q1));
        assert_eq!(q.y, -f64::from(imu.q2));
        assert_eq!(q.z, -f64::from(imu.q3));
    }

    #[test]
    fn test_orientation_identity() {
        let q = remap_orientation(&imu_with_quaternion(1.0, 0.0, 0.0, 0.0));
        assert_eq!(q, Quaternion::identity());
    }

    #[test]
    fn test_orientation_preserves_norm() {
        let samples: [[f32; 4]; 4] = [
            [1.0, 0.0, 0.0, 0.0],
            [0.5, 0.5, 0.5, 0.5],
            [0.7071068, 0.0, 0.7071068, 0.0],
            [0.182574, 0.365148, 0.547723, 0.730297],
        ];

        for s in &samples {
            let input_norm: f64 = s.iter().map(|v| f64::from(*v) * f64::from(*v)).sum();
            let q = remap_orientation(&imu_with_quaternion(s[0], s[1], s[2], s[3]));
            assert!((q.norm_squared() - input_norm).abs() < 1e-12);
            assert!((q.norm_squared() - 1.0).abs() < 1e-5, "sample {:?}", s);
        }
    }

    #[test]
    fn test_orientation_passes_nan_through() {
        let q = remap_orientation(&imu_with_quaternion(f32::NAN, 0.0, f32::NAN, 0.0));
        assert!(q.w.is_nan());
        assert!(q.y.is_nan());
    }

    // ==================== Tables ====================

    #[test]
    fn test_tables_are_permutations() {
        let mut seen = [false; 4];
        for term in ORIENTATION_REMAP.terms() {
            assert!(!seen[term.source], "source {} used twice", term.source);
            seen[term.source] = true;
            assert_eq!(term.divisor, 1.0);
        }
        assert!(seen.iter().all(|s| *s));

        let mut seen = [false; 3];
        for term in POSITION_REMAP.terms() {
            assert!(!seen[term.source]);
            seen[term.source] = true;
            assert_eq!(term.divisor, MVO_POSITION_DIVISOR);
        }
    }

    #[test]
    fn test_generic_remap() {
        let remap: AxisRemap<3, 2> =
            AxisRemap::new([AxisTerm::scaled(2, Sign::Negate, 2.0), AxisTerm::copy(0, Sign::Keep)]);
        assert_eq!(remap.apply([1.0, 5.0, 8.0]), [-4.0, 1.0]);
    }

    #[test]
    #[should_panic(expected = "remap source index out of range")]
    fn test_out_of_range_source_panics() {
        let _ = AxisRemap::<2, 1>::new([AxisTerm::copy(2, Sign::Keep)]);
    }
}
