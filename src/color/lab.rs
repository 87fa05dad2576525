//! Perceptual color value used for matching, averaging and error accumulation

use num_traits::Zero;
use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};

/// CIE Lab triplet with lightness in `[0, 100]` and unbounded chroma axes
///
/// Euclidean distance approximates perceived difference, so token search and
/// quantization residuals are both expressed in this space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Lab {
    /// Lightness
    pub l: f32,
    /// Green-red axis
    pub a: f32,
    /// Blue-yellow axis
    pub b: f32,
}

impl Lab {
    /// Create a color from its three channels
    pub const fn new(l: f32, a: f32, b: f32) -> Self {
        Self { l, a, b }
    }

    /// Channels in `[l, a, b]` order
    pub const fn to_array(self) -> [f32; 3] {
        [self.l, self.a, self.b]
    }

    /// Squared distance with the lightness term scaled by `luminance_weight`
    ///
    /// The chroma terms are plain squared differences.
    pub fn weighted_distance_squared(self, other: Self, luminance_weight: f32) -> f32 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        luminance_weight * dl * dl + da * da + db * db
    }
}

impl From<[f32; 3]> for Lab {
    fn from(channels: [f32; 3]) -> Self {
        let [l, a, b] = channels;
        Self { l, a, b }
    }
}

impl Add for Lab {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.l + rhs.l, self.a + rhs.a, self.b + rhs.b)
    }
}

impl Sub for Lab {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.l - rhs.l, self.a - rhs.a, self.b - rhs.b)
    }
}

impl AddAssign for Lab {
    fn add_assign(&mut self, rhs: Self) {
        self.l += rhs.l;
        self.a += rhs.a;
        self.b += rhs.b;
    }
}

impl SubAssign for Lab {
    fn sub_assign(&mut self, rhs: Self) {
        self.l -= rhs.l;
        self.a -= rhs.a;
        self.b -= rhs.b;
    }
}

impl Mul<f32> for Lab {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.l * rhs, self.a * rhs, self.b * rhs)
    }
}

impl Div<f32> for Lab {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        Self::new(self.l / rhs, self.a / rhs, self.b / rhs)
    }
}

impl Zero for Lab {
    fn zero() -> Self {
        Self::default()
    }

    fn is_zero(&self) -> bool {
        self.l == 0.0 && self.a == 0.0 && self.b == 0.0
    }
}
