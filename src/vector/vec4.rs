#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

use crate::copy::copy_components;
use crate::error::{FpError, Result};
use crate::fixed::Fp;
use crate::trig::sqrt_non_negative;

use super::Fp3;

/// A 4D fixed-point vector, also used for homogeneous coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Fp4 {
    pub x: Fp,
    pub y: Fp,
    pub z: Fp,
    pub w: Fp,
}

impl_vector!(Fp4, 4, x, y, z, w);

impl Fp4 {
    pub const UNIT_X: Self = Self::new(Fp::ONE, Fp::ZERO, Fp::ZERO, Fp::ZERO);
    pub const UNIT_Y: Self = Self::new(Fp::ZERO, Fp::ONE, Fp::ZERO, Fp::ZERO);
    pub const UNIT_Z: Self = Self::new(Fp::ZERO, Fp::ZERO, Fp::ONE, Fp::ZERO);
    pub const UNIT_W: Self = Self::new(Fp::ZERO, Fp::ZERO, Fp::ZERO, Fp::ONE);

    #[inline]
    pub const fn new(x: Fp, y: Fp, z: Fp, w: Fp) -> Self {
        Self { x, y, z, w }
    }

    /// Drop `w`.
    #[inline]
    #[must_use]
    pub const fn truncate(self) -> Fp3 {
        Fp3::new(self.x, self.y, self.z)
    }
}
