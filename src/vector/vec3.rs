#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

use crate::copy::copy_components;
use crate::error::{FpError, Result};
use crate::fixed::Fp;
use crate::trig::sqrt_non_negative;

use super::{Fp2, Fp4};

/// A 3D fixed-point vector
///
/// Positions, directions and translations in simulation space. For hashing
/// simulation state use [`to_le_bytes`](Self::to_le_bytes), never text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Fp3 {
    pub x: Fp,
    pub y: Fp,
    pub z: Fp,
}

impl_vector!(Fp3, 3, x, y, z);

impl Fp3 {
    pub const UNIT_X: Self = Self::new(Fp::ONE, Fp::ZERO, Fp::ZERO);
    pub const UNIT_Y: Self = Self::new(Fp::ZERO, Fp::ONE, Fp::ZERO);
    pub const UNIT_Z: Self = Self::new(Fp::ZERO, Fp::ZERO, Fp::ONE);

    /// Create a new Fp3.
    #[inline]
    pub const fn new(x: Fp, y: Fp, z: Fp) -> Self {
        Self { x, y, z }
    }

    /// Right-handed cross product.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn cross(self, rhs: Self) -> Self {
        Self {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    /// Unsigned angle between two vectors in `[0, π]`.
    ///
    /// The cosine is clamped into `[-1, 1]` by [`Fp::acos`], so rounding just
    /// past parallel still yields `0` or `π`. Fails with `DivideByZero` when
    /// either vector has zero length, and with `Overflow` when a squared
    /// length or the product of lengths is out of range.
    pub fn angle(self, rhs: Self) -> Result<Fp> {
        let length = |v: Self| v.checked_dot(v).map(sqrt_non_negative);
        let denominator = length(self)?.checked_mul(length(rhs)?)?;
        Ok(self.checked_dot(rhs)?.checked_div(denominator)?.acos())
    }

    #[inline]
    #[must_use]
    pub const fn truncate(self) -> Fp2 {
        Fp2::new(self.x, self.y)
    }

    #[inline]
    #[must_use]
    pub const fn extend(self, w: Fp) -> Fp4 {
        Fp4::new(self.x, self.y, self.z, w)
    }
}
