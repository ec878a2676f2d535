//! Planar coordinates and angle helpers.
//!
//! The café floor is the simulator's horizontal `x`/`z` plane; the vertical
//! axis never matters to the control core, so it is not represented here.

/// A position on the café floor, in metres.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub z: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, z: 0.0 };

    #[inline]
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// Per-axis closeness check: `true` when both `|dx|` and `|dz|` are
    /// strictly below `tolerance`.
    #[inline]
    pub fn within(self, other: Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() < tolerance && (self.z - other.z).abs() < tolerance
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.z)
    }
}

/// Wrap any angle in degrees into `[0, 360)`.
#[inline]
pub fn normalize_deg(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Smallest absolute difference between two headings, in `[0, 180]`.
///
/// `359.98` and `0.01` are 0.03° apart, not 359.97°.
#[inline]
pub fn angular_error_deg(a: f64, b: f64) -> f64 {
    let d = normalize_deg(a - b);
    if d > 180.0 { 360.0 - d } else { d }
}
