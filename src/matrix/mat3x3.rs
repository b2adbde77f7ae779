#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

use tracing::debug;

use crate::copy::copy_components;
use crate::error::{FpError, Result};
use crate::fixed::Fp;
use crate::quaternion::FpQuaternion;
use crate::vector::Fp3;

use super::{is_singular, minor};

/// 3x3 linear map stored as three columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Fp3x3 {
    pub c0: Fp3,
    pub c1: Fp3,
    pub c2: Fp3,
}

impl Fp3x3 {
    pub const IDENTITY: Self = Self::new(Fp3::UNIT_X, Fp3::UNIT_Y, Fp3::UNIT_Z);

    #[inline]
    pub const fn new(c0: Fp3, c1: Fp3, c2: Fp3) -> Self {
        Self { c0, c1, c2 }
    }

    pub fn create_scale(scale: Fp3) -> Self {
        Self::new(
            Fp3::new(scale.x, Fp::ZERO, Fp::ZERO),
            Fp3::new(Fp::ZERO, scale.y, Fp::ZERO),
            Fp3::new(Fp::ZERO, Fp::ZERO, scale.z),
        )
    }

    /// Right-handed rotation about the x axis.
    #[track_caller]
    pub fn create_rotation_x(radians: Fp) -> Self {
        let (s, c) = radians.sin_cos();
        Self::new(
            Fp3::UNIT_X,
            Fp3::new(Fp::ZERO, c, s),
            Fp3::new(Fp::ZERO, -s, c),
        )
    }

    /// Right-handed rotation about the y axis.
    #[track_caller]
    pub fn create_rotation_y(radians: Fp) -> Self {
        let (s, c) = radians.sin_cos();
        Self::new(
            Fp3::new(c, Fp::ZERO, -s),
            Fp3::UNIT_Y,
            Fp3::new(s, Fp::ZERO, c),
        )
    }

    /// Right-handed rotation about the z axis.
    #[track_caller]
    pub fn create_rotation_z(radians: Fp) -> Self {
        let (s, c) = radians.sin_cos();
        Self::new(
            Fp3::new(c, s, Fp::ZERO),
            Fp3::new(-s, c, Fp::ZERO),
            Fp3::UNIT_Z,
        )
    }

    /// Rotation matrix of a (near-)unit quaternion.
    #[must_use]
    #[track_caller]
    pub fn from_quaternion(rotation: FpQuaternion) -> Self {
        rotation.to_matrix()
    }

    #[must_use]
    pub const fn transpose(&self) -> Self {
        Self::new(
            Fp3::new(self.c0.x, self.c1.x, self.c2.x),
            Fp3::new(self.c0.y, self.c1.y, self.c2.y),
            Fp3::new(self.c0.z, self.c1.z, self.c2.z),
        )
    }

    /// Scalar triple product `c0 · (c1 × c2)`.
    #[must_use]
    #[track_caller]
    pub fn determinant(&self) -> Fp {
        self.c0.dot(self.c1.cross(self.c2))
    }

    /// Invert via the adjugate; `(false, *self)` when `|det| < EPSILON` or
    /// the inverse is not representable.
    #[must_use]
    pub fn invert(&self) -> (bool, Self) {
        match self.try_inverse() {
            Ok(inverse) => (true, inverse),
            Err(err) => {
                debug!(error = %err, "3x3 matrix is not invertible");
                (false, *self)
            }
        }
    }

    fn try_inverse(&self) -> Result<Self> {
        // rows of the adjugate
        let r0 = checked_cross(self.c1, self.c2)?;
        let r1 = checked_cross(self.c2, self.c0)?;
        let r2 = checked_cross(self.c0, self.c1)?;
        let det = self.c0.checked_dot(r0)?;
        if is_singular(det) {
            return Err(FpError::DivideByZero);
        }
        let scaled = |row: Fp3| -> Result<Fp3> {
            Ok(Fp3::new(
                row.x.checked_div(det)?,
                row.y.checked_div(det)?,
                row.z.checked_div(det)?,
            ))
        };
        Ok(Self::new(scaled(r0)?, scaled(r1)?, scaled(r2)?).transpose())
    }

    /// `M · v`, summed column by column.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn transform(&self, v: Fp3) -> Fp3 {
        self.c0 * v.x + self.c1 * v.y + self.c2 * v.z
    }

    /// `Mᵀ · v`, for carrying normals through the inverse of a
    /// non-uniformly scaled matrix.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn transform_transpose(&self, v: Fp3) -> Fp3 {
        Fp3::new(self.c0.dot(v), self.c1.dot(v), self.c2.dot(v))
    }

    #[must_use]
    pub const fn to_array(&self) -> [Fp; 9] {
        [
            self.c0.x, self.c0.y, self.c0.z, self.c1.x, self.c1.y, self.c1.z, self.c2.x,
            self.c2.y, self.c2.z,
        ]
    }

    /// Copy column by column into `array` starting at `index`.
    pub fn copy_to(&self, array: Option<&mut [Fp]>, index: isize) -> Result<()> {
        copy_components(&self.to_array(), array, index)
    }
}

fn checked_cross(a: Fp3, b: Fp3) -> Result<Fp3> {
    Ok(Fp3::new(
        minor(a.y, b.z, a.z, b.y)?,
        minor(a.z, b.x, a.x, b.z)?,
        minor(a.x, b.y, a.y, b.x)?,
    ))
}

impl std::ops::Add for Fp3x3 {
    type Output = Self;
    #[track_caller]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.c0 + rhs.c0, self.c1 + rhs.c1, self.c2 + rhs.c2)
    }
}

impl std::ops::Sub for Fp3x3 {
    type Output = Self;
    #[track_caller]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.c0 - rhs.c0, self.c1 - rhs.c1, self.c2 - rhs.c2)
    }
}

impl std::ops::Neg for Fp3x3 {
    type Output = Self;
    #[track_caller]
    fn neg(self) -> Self {
        Self::new(-self.c0, -self.c1, -self.c2)
    }
}

impl std::ops::Mul<Fp> for Fp3x3 {
    type Output = Self;
    #[track_caller]
    fn mul(self, rhs: Fp) -> Self {
        Self::new(self.c0 * rhs, self.c1 * rhs, self.c2 * rhs)
    }
}

impl std::ops::Mul<Fp3> for Fp3x3 {
    type Output = Fp3;
    #[track_caller]
    fn mul(self, rhs: Fp3) -> Fp3 {
        self.transform(rhs)
    }
}

/// `a * b` applies `b` first, then `a`.
impl std::ops::Mul for Fp3x3 {
    type Output = Self;
    #[track_caller]
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.transform(rhs.c0),
            self.transform(rhs.c1),
            self.transform(rhs.c2),
        )
    }
}
