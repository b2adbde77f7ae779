#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

use crate::copy::copy_components;
use crate::error::{FpError, Result};
use crate::fixed::Fp;
use crate::trig::sqrt_non_negative;

use super::Fp3;

/// A 2D fixed-point vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Fp2 {
    pub x: Fp,
    pub y: Fp,
}

impl_vector!(Fp2, 2, x, y);

impl Fp2 {
    pub const UNIT_X: Self = Self::new(Fp::ONE, Fp::ZERO);
    pub const UNIT_Y: Self = Self::new(Fp::ZERO, Fp::ONE);

    #[inline]
    pub const fn new(x: Fp, y: Fp) -> Self {
        Self { x, y }
    }

    /// z component of the 3D cross product of `(self, 0)` and `(rhs, 0)`.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn cross(self, rhs: Self) -> Fp {
        self.x * rhs.y - self.y * rhs.x
    }

    #[inline]
    #[must_use]
    pub const fn extend(self, z: Fp) -> Fp3 {
        Fp3::new(self.x, self.y, z)
    }
}
