//! Rotation-then-translation transforms with snap-to-zero.
//!
//! Every composing operation ([`mul`](std::ops::Mul), [`rotate`],
//! [`transform`], [`inverse`]) snaps components with magnitude below
//! [`SNAP_THRESHOLD`] to exactly zero, so rounding residue from repeated
//! composition does not drift away from exact axes.
//!
//! [`rotate`]: RigidTransform::rotate
//! [`transform`]: RigidTransform::transform
//! [`inverse`]: RigidTransform::inverse

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

use tracing::trace;

use crate::error::Result;
use crate::fixed::Fp;
use crate::matrix::Fp4x4;
use crate::quaternion::FpQuaternion;
use crate::vector::Fp3;

/// Components strictly smaller than this in magnitude snap to zero (1e-8).
pub const SNAP_THRESHOLD: Fp = Fp::ONE_E_MINUS_8;

fn snap(value: Fp) -> Fp {
    if value > -SNAP_THRESHOLD && value < SNAP_THRESHOLD {
        if !value.is_zero() {
            trace!(raw = value.raw(), "snapped component to zero");
        }
        Fp::ZERO
    } else {
        value
    }
}

fn snap_vector(v: Fp3) -> Fp3 {
    Fp3::new(snap(v.x), snap(v.y), snap(v.z))
}

fn snap_rotation(q: FpQuaternion) -> FpQuaternion {
    FpQuaternion::new(snap(q.x), snap(q.y), snap(q.z), snap(q.w))
}

/// Maps `p` to `rotation.rotate(p) + translation`.
///
/// `rotation` is expected to be a unit quaternion; nothing renormalizes it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct RigidTransform {
    pub rotation: FpQuaternion,
    pub translation: Fp3,
}

impl RigidTransform {
    pub const IDENTITY: Self = Self::new(FpQuaternion::IDENTITY, Fp3::ZERO);

    #[inline]
    pub const fn new(rotation: FpQuaternion, translation: Fp3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    #[inline]
    pub const fn from_translation(translation: Fp3) -> Self {
        Self::new(FpQuaternion::IDENTITY, translation)
    }

    #[inline]
    pub const fn from_rotation(rotation: FpQuaternion) -> Self {
        Self::new(rotation, Fp3::ZERO)
    }

    /// Rotate a direction; translation does not apply.
    #[must_use]
    #[track_caller]
    pub fn rotate(&self, v: Fp3) -> Fp3 {
        snap_vector(self.rotation.rotate(v))
    }

    #[must_use]
    #[track_caller]
    pub fn transform(&self, p: Fp3) -> Fp3 {
        snap_vector(self.rotation.rotate(p) + self.translation)
    }

    /// The transform undoing `self`. Fails with `DivideByZero` for a zero
    /// rotation.
    ///
    /// The translation is rotated by the unsnapped inverse; snapping applies
    /// to each result separately.
    pub fn inverse(&self) -> Result<Self> {
        let rotation = self.rotation.inverse()?;
        let translation = rotation.rotate(-self.translation);
        Ok(Self::new(snap_rotation(rotation), snap_vector(translation)))
    }

    /// Homogeneous matrix with the rotation block and translation column.
    #[must_use]
    #[track_caller]
    pub fn to_matrix(&self) -> Fp4x4 {
        Fp4x4::from_rigid_transform(self)
    }

    /// Inverse of [`to_matrix`](Self::to_matrix), assuming the upper 3x3
    /// block is orthonormal.
    pub fn from_matrix(m: &Fp4x4) -> Result<Self> {
        let rotation = FpQuaternion::from_matrix(&m.linear())?;
        Ok(Self::new(rotation, m.translation()))
    }

    /// Lerp the translation and slerp the rotation.
    pub fn interpolate(&self, to: &Self, t: Fp) -> Result<Self> {
        let rotation = self.rotation.slerp(to.rotation, t)?;
        let translation = self.translation.lerp(to.translation, t);
        Ok(Self::new(snap_rotation(rotation), snap_vector(translation)))
    }

    /// Rotation words then translation words, raw little-endian.
    #[must_use]
    pub fn to_le_bytes(&self) -> [u8; 56] {
        let mut buf = [0u8; 56];
        buf[..32].copy_from_slice(&self.rotation.to_le_bytes());
        buf[32..].copy_from_slice(&self.translation.to_le_bytes());
        buf
    }

    #[must_use]
    pub fn from_le_bytes(bytes: [u8; 56]) -> Self {
        let mut rotation = [0u8; 32];
        let mut translation = [0u8; 24];
        rotation.copy_from_slice(&bytes[..32]);
        translation.copy_from_slice(&bytes[32..]);
        Self::new(
            FpQuaternion::from_le_bytes(rotation),
            Fp3::from_le_bytes(translation),
        )
    }
}

/// `a * b` applies `b` first, then `a`.
impl std::ops::Mul for RigidTransform {
    type Output = Self;
    #[track_caller]
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            snap_rotation(self.rotation * rhs.rotation),
            snap_vector(self.rotation.rotate(rhs.translation) + self.translation),
        )
    }
}
