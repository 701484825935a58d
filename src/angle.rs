use std::f64::consts::PI;
use std::fmt;

/// Orientation in the 256-step circular fixed-point domain.
///
/// The full turn is divided into 256 units, so one unit is 360/256 degrees.
/// All arithmetic wraps modulo 256; there is no signed interpretation
/// anywhere in the domain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Angle(pub u8);

impl Angle {
    /// Half a turn, 180 degrees.
    pub const OPPOSITE: Angle = Angle(128);

    pub fn from_degrees(degrees: f64) -> Self {
        Angle((degrees * 256.0 / 360.0).round() as i64 as u8)
    }

    pub fn to_degrees(self) -> f64 {
        f64::from(self.0) * 360.0 / 256.0
    }

    pub fn from_radians(radians: f64) -> Self {
        Angle((radians * 256.0 / (2.0 * PI)).round() as i64 as u8)
    }

    pub fn to_radians(self) -> f64 {
        f64::from(self.0) * 2.0 * PI / 256.0
    }

    /// Direction of the vector `(dx, dy)`, quantized to the byte domain.
    pub fn atan(dx: f64, dy: f64) -> Self {
        let radians = dy.atan2(dx).rem_euclid(2.0 * PI);
        Angle::from_radians(radians)
    }

    /// One-directional circular distance from `other` to `self`, in [0, 255].
    pub fn difference(self, other: Angle) -> Angle {
        Angle(self.0.wrapping_sub(other.0))
    }

    /// Modulo-256 sum.
    pub fn add(self, other: Angle) -> Angle {
        Angle(self.0.wrapping_add(other.0))
    }

    /// `256 - self`, or 0 for the zero angle.
    ///
    /// Used to test circular closeness from the other end of the ring.
    pub fn complementary(self) -> Angle {
        Angle(0u8.wrapping_sub(self.0))
    }

    /// The angle pointing the opposite way, half a turn away.
    pub fn opposite(self) -> Angle {
        self.add(Angle::OPPOSITE)
    }

    /// True circular closeness test for the given tolerance.
    ///
    /// `difference` is a one-directional offset, so the minimal circular
    /// distance can surface at either end of the [0, 255] range. Both ends
    /// have to be checked.
    pub fn is_within(self, other: Angle, tolerance: Angle) -> bool {
        let delta = self.difference(other);
        delta.0 <= tolerance.0 || delta.0 >= tolerance.complementary().0
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.to_degrees())
    }
}
