#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

use tracing::debug;

use crate::copy::copy_components;
use crate::error::{FpError, Result};
use crate::fixed::{or_panic, Fp};
use crate::vector::{Fp2, Fp3};

use super::{is_singular, minor};

/// round(0.001° in radians · 2^32). Angles this close to a multiple of π/2
/// produce exact `0` / `±1` rotation entries.
const ROTATION_SNAP: Fp = Fp::from_raw(74_961);

/// 2D affine transform: three rows, two columns.
///
/// Each column holds the coefficients for one output coordinate, so a point
/// maps to `(c0 · (x, y, 1), c1 · (x, y, 1))`; `z` of each column is the
/// translation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Fp3x2 {
    pub c0: Fp3,
    pub c1: Fp3,
}

impl Fp3x2 {
    pub const IDENTITY: Self = Self::new(Fp3::UNIT_X, Fp3::UNIT_Y);

    #[inline]
    pub const fn new(c0: Fp3, c1: Fp3) -> Self {
        Self { c0, c1 }
    }

    pub fn create_translation(translation: Fp2) -> Self {
        Self::new(
            Fp3::new(Fp::ONE, Fp::ZERO, translation.x),
            Fp3::new(Fp::ZERO, Fp::ONE, translation.y),
        )
    }

    pub fn create_scale(scale: Fp2) -> Self {
        Self::new(
            Fp3::new(scale.x, Fp::ZERO, Fp::ZERO),
            Fp3::new(Fp::ZERO, scale.y, Fp::ZERO),
        )
    }

    /// Scale about `center` instead of the origin.
    #[track_caller]
    pub fn create_scale_at(scale: Fp2, center: Fp2) -> Self {
        Self::new(
            Fp3::new(scale.x, Fp::ZERO, center.x * (Fp::ONE - scale.x)),
            Fp3::new(Fp::ZERO, scale.y, center.y * (Fp::ONE - scale.y)),
        )
    }

    /// Counter-clockwise rotation about the origin.
    #[track_caller]
    pub fn create_rotation(radians: Fp) -> Self {
        Self::create_rotation_at(radians, Fp2::ZERO)
    }

    /// Counter-clockwise rotation about `center`.
    ///
    /// The angle is reduced with the exact fixed-point remainder; angles
    /// within 0.001° of a quarter turn use exact entries so that, for
    /// example, four quarter turns compose back to the identity.
    #[track_caller]
    pub fn create_rotation_at(radians: Fp, center: Fp2) -> Self {
        let (cos, sin) = rotation_entries(radians);
        let tx = center.x * (Fp::ONE - cos) + center.y * sin;
        let ty = center.y * (Fp::ONE - cos) - center.x * sin;
        Self::new(Fp3::new(cos, -sin, tx), Fp3::new(sin, cos, ty))
    }

    /// Skew by the given angles; fails with `DivideByZero` at ±π/2.
    pub fn create_skew(radians_x: Fp, radians_y: Fp) -> Result<Self> {
        Ok(Self::new(
            Fp3::new(Fp::ONE, radians_x.tan()?, Fp::ZERO),
            Fp3::new(radians_y.tan()?, Fp::ONE, Fp::ZERO),
        ))
    }

    #[inline]
    #[must_use]
    pub const fn translation(&self) -> Fp2 {
        Fp2::new(self.c0.z, self.c1.z)
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Determinant of the linear 2x2 block.
    #[must_use]
    #[track_caller]
    pub fn determinant(&self) -> Fp {
        or_panic(minor(self.c0.x, self.c1.y, self.c0.y, self.c1.x))
    }

    /// Invert the affine map.
    ///
    /// When `|det| < EPSILON`, or the inverse is not representable, returns
    /// `(false, *self)` unchanged; there is no NaN matrix to hand back.
    #[must_use]
    pub fn invert(&self) -> (bool, Self) {
        match self.try_inverse() {
            Ok(inverse) => (true, inverse),
            Err(err) => {
                debug!(error = %err, "3x2 matrix is not invertible");
                (false, *self)
            }
        }
    }

    fn try_inverse(&self) -> Result<Self> {
        let (m11, m21, m31) = (self.c0.x, self.c0.y, self.c0.z);
        let (m12, m22, m32) = (self.c1.x, self.c1.y, self.c1.z);
        let det = minor(m11, m22, m21, m12)?;
        if is_singular(det) {
            return Err(FpError::DivideByZero);
        }
        Ok(Self::new(
            Fp3::new(
                m22.checked_div(det)?,
                m21.checked_neg()?.checked_div(det)?,
                minor(m21, m32, m31, m22)?.checked_div(det)?,
            ),
            Fp3::new(
                m12.checked_neg()?.checked_div(det)?,
                m11.checked_div(det)?,
                minor(m31, m12, m11, m32)?.checked_div(det)?,
            ),
        ))
    }

    /// Apply the full affine map to a point.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn transform(&self, point: Fp2) -> Fp2 {
        Fp2::new(
            point.x * self.c0.x + point.y * self.c0.y + self.c0.z,
            point.x * self.c1.x + point.y * self.c1.y + self.c1.z,
        )
    }

    /// Apply only the linear part, ignoring translation.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn transform_normal(&self, normal: Fp2) -> Fp2 {
        Fp2::new(
            normal.x * self.c0.x + normal.y * self.c0.y,
            normal.x * self.c1.x + normal.y * self.c1.y,
        )
    }

    #[must_use]
    #[track_caller]
    pub fn lerp(&self, to: &Self, t: Fp) -> Self {
        Self::new(self.c0.lerp(to.c0, t), self.c1.lerp(to.c1, t))
    }

    #[must_use]
    pub const fn to_array(&self) -> [Fp; 6] {
        [self.c0.x, self.c0.y, self.c0.z, self.c1.x, self.c1.y, self.c1.z]
    }

    /// Copy column by column into `array` starting at `index`.
    pub fn copy_to(&self, array: Option<&mut [Fp]>, index: isize) -> Result<()> {
        copy_components(&self.to_array(), array, index)
    }
}

/// `(cos, sin)` of the reduced angle, snapping near quarter turns.
fn rotation_entries(radians: Fp) -> (Fp, Fp) {
    let mut angle = radians % Fp::TWO_PI;
    if angle > Fp::PI {
        angle -= Fp::TWO_PI;
    } else if angle < -Fp::PI {
        angle += Fp::TWO_PI;
    }
    let near = |target: Fp| (angle - target).abs() <= ROTATION_SNAP;
    if near(Fp::ZERO) {
        (Fp::ONE, Fp::ZERO)
    } else if near(Fp::HALF_PI) {
        (Fp::ZERO, Fp::ONE)
    } else if near(-Fp::HALF_PI) {
        (Fp::ZERO, -Fp::ONE)
    } else if near(Fp::PI) || near(-Fp::PI) {
        (-Fp::ONE, Fp::ZERO)
    } else {
        let (sin, cos) = angle.sin_cos();
        (cos, sin)
    }
}

impl std::ops::Add for Fp3x2 {
    type Output = Self;
    #[track_caller]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.c0 + rhs.c0, self.c1 + rhs.c1)
    }
}

impl std::ops::Sub for Fp3x2 {
    type Output = Self;
    #[track_caller]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.c0 - rhs.c0, self.c1 - rhs.c1)
    }
}

impl std::ops::Neg for Fp3x2 {
    type Output = Self;
    #[track_caller]
    fn neg(self) -> Self {
        Self::new(-self.c0, -self.c1)
    }
}

impl std::ops::Mul<Fp> for Fp3x2 {
    type Output = Self;
    #[track_caller]
    fn mul(self, rhs: Fp) -> Self {
        Self::new(self.c0 * rhs, self.c1 * rhs)
    }
}

/// `a * b` applies `b` first, then `a`.
impl std::ops::Mul for Fp3x2 {
    type Output = Self;
    #[track_caller]
    fn mul(self, rhs: Self) -> Self {
        let a = self;
        let b = rhs;
        Self::new(
            Fp3::new(
                a.c0.x * b.c0.x + a.c0.y * b.c1.x,
                a.c0.x * b.c0.y + a.c0.y * b.c1.y,
                a.c0.x * b.c0.z + a.c0.y * b.c1.z + a.c0.z,
            ),
            Fp3::new(
                a.c1.x * b.c0.x + a.c1.y * b.c1.x,
                a.c1.x * b.c0.y + a.c1.y * b.c1.y,
                a.c1.x * b.c0.z + a.c1.y * b.c1.z + a.c1.z,
            ),
        )
    }
}
