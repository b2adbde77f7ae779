//! Rotation quaternions.
//!
//! Stored as `(x, y, z, w)` with `w` the scalar part. `a * b` is the Hamilton
//! product and applies `b` first. [`FpQuaternion::rotate`] and
//! [`FpQuaternion::to_matrix`] share the same intermediates and summation
//! order, so rotating a vector directly or through the matrix gives the same
//! bits.

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

use crate::copy::copy_components;
use crate::error::{FpError, Result};
use crate::fixed::Fp;
use crate::matrix::Fp3x3;
use crate::trig::sqrt_non_negative;
use crate::vector::Fp3;

/// Above this dot product `slerp` falls back to a normalized lerp (0.9995).
const SLERP_LINEAR_THRESHOLD: Fp = Fp::from_raw(4_292_819_812);

/// Order in which [`FpQuaternion::from_euler`] applies the per-axis
/// rotations. `Xyz` rotates about x first, then y, then z.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum EulerOrder {
    #[default]
    Xyz,
    Xzy,
    Yxz,
    Yzx,
    Zxy,
    Zyx,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct FpQuaternion {
    pub x: Fp,
    pub y: Fp,
    pub z: Fp,
    pub w: Fp,
}

impl Default for FpQuaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// The nine doubled products shared by `rotate` and `to_matrix`.
struct RotationTerms {
    xx2: Fp,
    yy2: Fp,
    zz2: Fp,
    xy2: Fp,
    xz2: Fp,
    yz2: Fp,
    wx2: Fp,
    wy2: Fp,
    wz2: Fp,
}

impl RotationTerms {
    #[track_caller]
    fn new(q: &FpQuaternion) -> Self {
        let x2 = q.x + q.x;
        let y2 = q.y + q.y;
        let z2 = q.z + q.z;
        Self {
            xx2: q.x * x2,
            yy2: q.y * y2,
            zz2: q.z * z2,
            xy2: q.x * y2,
            xz2: q.x * z2,
            yz2: q.y * z2,
            wx2: q.w * x2,
            wy2: q.w * y2,
            wz2: q.w * z2,
        }
    }
}

impl FpQuaternion {
    pub const IDENTITY: Self = Self::new(Fp::ZERO, Fp::ZERO, Fp::ZERO, Fp::ONE);

    #[inline]
    pub const fn new(x: Fp, y: Fp, z: Fp, w: Fp) -> Self {
        Self { x, y, z, w }
    }

    /// Rotation of `radians` about a unit `axis`.
    #[track_caller]
    pub fn from_axis_angle(axis: Fp3, radians: Fp) -> Self {
        let (s, c) = (radians * Fp::HALF).sin_cos();
        Self::new(axis.x * s, axis.y * s, axis.z * s, c)
    }

    #[track_caller]
    pub fn from_rotation_x(radians: Fp) -> Self {
        Self::from_axis_angle(Fp3::UNIT_X, radians)
    }

    #[track_caller]
    pub fn from_rotation_y(radians: Fp) -> Self {
        Self::from_axis_angle(Fp3::UNIT_Y, radians)
    }

    #[track_caller]
    pub fn from_rotation_z(radians: Fp) -> Self {
        Self::from_axis_angle(Fp3::UNIT_Z, radians)
    }

    /// Compose per-axis rotations of `angles.x`, `angles.y` and `angles.z`
    /// radians in the given order.
    #[track_caller]
    pub fn from_euler(angles: Fp3, order: EulerOrder) -> Self {
        let x = Self::from_rotation_x(angles.x);
        let y = Self::from_rotation_y(angles.y);
        let z = Self::from_rotation_z(angles.z);
        // the rightmost factor is applied first
        match order {
            EulerOrder::Xyz => z * y * x,
            EulerOrder::Xzy => y * z * x,
            EulerOrder::Yxz => z * x * y,
            EulerOrder::Yzx => x * z * y,
            EulerOrder::Zxy => y * x * z,
            EulerOrder::Zyx => x * y * z,
        }
    }

    /// Extract the rotation of an orthonormal matrix with Shepperd's method:
    /// the branch is chosen by the largest of the trace and the diagonal.
    ///
    /// The result is not renormalized. Fails with `Overflow` when the entries
    /// are too large for the intermediate sums.
    pub fn from_matrix(m: &Fp3x3) -> Result<Self> {
        let (m00, m11, m22) = (m.c0.x, m.c1.y, m.c2.z);
        let (m01, m10) = (m.c1.x, m.c0.y);
        let (m02, m20) = (m.c2.x, m.c0.z);
        let (m12, m21) = (m.c2.y, m.c1.z);
        let four = Fp::from_int(4);
        // s = 4 * (largest component)
        let scale = |dominant: Fp, a: Fp, b: Fp| -> Result<Fp> {
            Fp::ONE
                .checked_add(dominant)?
                .checked_sub(a)?
                .checked_sub(b)?
                .sqrt()?
                .checked_mul(Fp::TWO)
        };

        let trace = m00.checked_add(m11)?.checked_add(m22)?;
        let q = if trace > Fp::ZERO {
            let s = trace.checked_add(Fp::ONE)?.sqrt()?.checked_mul(Fp::TWO)?;
            Self::new(
                m21.checked_sub(m12)?.checked_div(s)?,
                m02.checked_sub(m20)?.checked_div(s)?,
                m10.checked_sub(m01)?.checked_div(s)?,
                s / four,
            )
        } else if m00 > m11 && m00 > m22 {
            let s = scale(m00, m11, m22)?;
            Self::new(
                s / four,
                m01.checked_add(m10)?.checked_div(s)?,
                m02.checked_add(m20)?.checked_div(s)?,
                m21.checked_sub(m12)?.checked_div(s)?,
            )
        } else if m11 > m22 {
            let s = scale(m11, m00, m22)?;
            Self::new(
                m01.checked_add(m10)?.checked_div(s)?,
                s / four,
                m12.checked_add(m21)?.checked_div(s)?,
                m02.checked_sub(m20)?.checked_div(s)?,
            )
        } else {
            let s = scale(m22, m00, m11)?;
            Self::new(
                m02.checked_add(m20)?.checked_div(s)?,
                m12.checked_add(m21)?.checked_div(s)?,
                s / four,
                m10.checked_sub(m01)?.checked_div(s)?,
            )
        };
        Ok(q)
    }

    /// Rotation matrix; its columns are the images of the unit axes.
    #[must_use]
    #[track_caller]
    pub fn to_matrix(&self) -> Fp3x3 {
        let t = RotationTerms::new(self);
        Fp3x3::new(
            Fp3::new(Fp::ONE - (t.yy2 + t.zz2), t.xy2 + t.wz2, t.xz2 - t.wy2),
            Fp3::new(t.xy2 - t.wz2, Fp::ONE - (t.xx2 + t.zz2), t.yz2 + t.wx2),
            Fp3::new(t.xz2 + t.wy2, t.yz2 - t.wx2, Fp::ONE - (t.xx2 + t.yy2)),
        )
    }

    /// Rotate `v` by this (unit) quaternion.
    #[must_use]
    #[track_caller]
    pub fn rotate(&self, v: Fp3) -> Fp3 {
        let t = RotationTerms::new(self);
        Fp3::new(
            (Fp::ONE - (t.yy2 + t.zz2)) * v.x + (t.xy2 - t.wz2) * v.y + (t.xz2 + t.wy2) * v.z,
            (t.xy2 + t.wz2) * v.x + (Fp::ONE - (t.xx2 + t.zz2)) * v.y + (t.yz2 - t.wx2) * v.z,
            (t.xz2 - t.wy2) * v.x + (t.yz2 + t.wx2) * v.y + (Fp::ONE - (t.xx2 + t.yy2)) * v.z,
        )
    }

    #[inline]
    #[must_use]
    #[track_caller]
    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// `conjugate / length²`, so non-unit quaternions invert too.
    pub fn inverse(self) -> Result<Self> {
        let length_squared = self.length_squared();
        if length_squared.is_zero() {
            return Err(FpError::DivideByZero);
        }
        let c = self.conjugate();
        Ok(Self::new(
            c.x.checked_div(length_squared)?,
            c.y.checked_div(length_squared)?,
            c.z.checked_div(length_squared)?,
            c.w.checked_div(length_squared)?,
        ))
    }

    #[inline]
    #[must_use]
    #[track_caller]
    pub fn dot(self, rhs: Self) -> Fp {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z + self.w * rhs.w
    }

    #[inline]
    #[must_use]
    #[track_caller]
    pub fn length_squared(self) -> Fp {
        self.dot(self)
    }

    #[inline]
    #[must_use]
    #[track_caller]
    pub fn length(self) -> Fp {
        sqrt_non_negative(self.length_squared())
    }

    pub fn normalize(self) -> Result<Self> {
        let length = self.length();
        if length.is_zero() {
            return Err(FpError::DivideByZero);
        }
        Ok(Self::new(
            self.x.checked_div(length)?,
            self.y.checked_div(length)?,
            self.z.checked_div(length)?,
            self.w.checked_div(length)?,
        ))
    }

    /// Normalized linear blend along the shorter arc.
    pub fn lerp(self, to: Self, t: Fp) -> Result<Self> {
        let to = if self.dot(to).is_negative() { -to } else { to };
        (self + (to - self) * t).normalize()
    }

    /// Constant-speed interpolation along the shorter arc. Nearly parallel
    /// inputs fall back to [`lerp`](Self::lerp).
    pub fn slerp(self, to: Self, t: Fp) -> Result<Self> {
        let mut cos_theta = self.dot(to);
        let to = if cos_theta.is_negative() {
            cos_theta = -cos_theta;
            -to
        } else {
            to
        };
        let cos_theta = Ord::min(cos_theta, Fp::ONE);
        if cos_theta > SLERP_LINEAR_THRESHOLD {
            return self.lerp(to, t);
        }

        let theta = cos_theta.acos();
        let sin_theta = theta.sin();
        let s0 = ((Fp::ONE - t) * theta).sin().checked_div(sin_theta)?;
        let s1 = (t * theta).sin().checked_div(sin_theta)?;
        Ok(self * s0 + to * s1)
    }

    /// Angle of the rotation taking `self` to `other`, in `[0, π]`.
    #[must_use]
    #[track_caller]
    pub fn angle_between(self, other: Self) -> Fp {
        Fp::TWO * self.dot(other).abs().acos()
    }

    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [Fp; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Copy `x, y, z, w` into `array` starting at `index`.
    pub fn copy_to(&self, array: Option<&mut [Fp]>, index: isize) -> Result<()> {
        copy_components(&self.to_array(), array, index)
    }

    #[must_use]
    pub fn to_le_bytes(&self) -> [u8; 32] {
        let mut buf = [0u8; 32];
        for (chunk, component) in buf.chunks_exact_mut(8).zip(self.to_array()) {
            chunk.copy_from_slice(&component.to_le_bytes());
        }
        buf
    }

    #[must_use]
    pub fn from_le_bytes(bytes: [u8; 32]) -> Self {
        let word = |i: usize| {
            let mut w = [0u8; 8];
            w.copy_from_slice(&bytes[i * 8..i * 8 + 8]);
            Fp::from_le_bytes(w)
        };
        Self::new(word(0), word(1), word(2), word(3))
    }
}

impl std::ops::Add for FpQuaternion {
    type Output = Self;
    #[track_caller]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z, self.w + rhs.w)
    }
}

impl std::ops::Sub for FpQuaternion {
    type Output = Self;
    #[track_caller]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z, self.w - rhs.w)
    }
}

impl std::ops::Neg for FpQuaternion {
    type Output = Self;
    #[track_caller]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl std::ops::Mul<Fp> for FpQuaternion {
    type Output = Self;
    #[track_caller]
    fn mul(self, rhs: Fp) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

/// Hamilton product: `a * b` applies `b`, then `a`.
impl std::ops::Mul for FpQuaternion {
    type Output = Self;
    #[track_caller]
    fn mul(self, rhs: Self) -> Self {
        let (a, b) = (self, rhs);
        Self::new(
            a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
            a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        )
    }
}

impl std::ops::Mul<Fp3> for FpQuaternion {
    type Output = Fp3;
    #[track_caller]
    fn mul(self, rhs: Fp3) -> Fp3 {
        self.rotate(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Fp3, expected: Fp3, ulps: i64) {
        for (a, e) in actual.to_array().into_iter().zip(expected.to_array()) {
            assert!((a.raw() - e.raw()).abs() <= ulps, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn quarter_turns_land_within_a_few_ulps() {
        let qz = FpQuaternion::from_rotation_z(Fp::HALF_PI);
        assert_eq!(
            qz,
            FpQuaternion::new(
                Fp::ZERO,
                Fp::ZERO,
                Fp::from_raw(3_037_000_501),
                Fp::from_raw(3_037_000_500)
            )
        );
        assert_eq!(
            qz.rotate(Fp3::UNIT_X),
            Fp3::new(Fp::from_raw(-3), Fp::from_raw(4_294_967_297), Fp::ZERO)
        );
        assert_close(FpQuaternion::from_rotation_y(Fp::HALF_PI) * Fp3::UNIT_Z, Fp3::UNIT_X, 4);
        assert_close(FpQuaternion::from_rotation_x(Fp::HALF_PI) * Fp3::UNIT_Y, Fp3::UNIT_Z, 4);
    }

    #[test]
    fn rotate_matches_matrix_bit_for_bit() {
        let q = FpQuaternion::from_euler(
            Fp3::new(Fp::from_raw(1_234_567_890), -Fp::HALF, Fp::TWO),
            EulerOrder::Zxy,
        );
        let m = q.to_matrix();
        for v in [
            Fp3::UNIT_X,
            Fp3::new(Fp::from_int(3), Fp::from_int(-7), Fp::HALF),
            Fp3::new(Fp::from_raw(-98_765_432_101), Fp::from_raw(5), Fp::from_int(100)),
        ] {
            assert_eq!(q.rotate(v), m.transform(v));
        }
    }

    #[test]
    fn euler_order_controls_application_order() {
        let angles = Fp3::new(Fp::HALF_PI, Fp::HALF_PI, Fp::ZERO);
        let xyz = FpQuaternion::from_euler(angles, EulerOrder::Xyz);
        let zyx = FpQuaternion::from_euler(angles, EulerOrder::Zyx);
        // x first sends y to z, then y sends z to x
        assert_close(xyz.rotate(Fp3::UNIT_Y), Fp3::UNIT_X, 8);
        // y first leaves y alone, then x sends it to z
        assert_close(zyx.rotate(Fp3::UNIT_Y), Fp3::UNIT_Z, 8);
        assert_eq!(
            FpQuaternion::from_euler(Fp3::new(Fp::HALF_PI, Fp::ZERO, Fp::ZERO), EulerOrder::Yzx),
            FpQuaternion::from_rotation_x(Fp::HALF_PI)
        );
    }

    #[test]
    fn hamilton_product_composes_rotations() {
        let qz = FpQuaternion::from_rotation_z(Fp::HALF_PI);
        let half_turn = qz * qz;
        assert_close(half_turn.rotate(Fp3::UNIT_X), -Fp3::UNIT_X, 8);
        assert_eq!(FpQuaternion::IDENTITY * qz, qz);
        assert_eq!(qz * FpQuaternion::IDENTITY, qz);
    }

    #[test]
    fn inverse_undoes_rotation() {
        let q = FpQuaternion::from_rotation_z(Fp::HALF_PI);
        assert_eq!(q * q.inverse().unwrap(), FpQuaternion::IDENTITY);
        let zero = FpQuaternion::new(Fp::ZERO, Fp::ZERO, Fp::ZERO, Fp::ZERO);
        assert_eq!(zero.inverse(), Err(FpError::DivideByZero));
        assert_eq!(zero.normalize(), Err(FpError::DivideByZero));
    }

    #[test]
    fn from_matrix_recovers_rotation() {
        for q in [
            FpQuaternion::IDENTITY,
            FpQuaternion::from_rotation_x(Fp::PI),
            FpQuaternion::from_rotation_z(Fp::PI),
            FpQuaternion::from_rotation_z(Fp::ONE),
            FpQuaternion::from_rotation_y(Fp::HALF_PI),
            FpQuaternion::from_rotation_y(Fp::from_int(-2)),
        ] {
            let recovered = FpQuaternion::from_matrix(&q.to_matrix()).unwrap();
            for (a, e) in recovered.to_array().into_iter().zip(q.to_array()) {
                assert!((a.raw() - e.raw()).abs() <= 4, "{recovered:?} != {q:?}");
            }
        }
    }

    #[test]
    fn from_matrix_reports_overflow() {
        let huge = Fp3x3::create_scale(Fp3::splat(Fp::MAX));
        assert_eq!(FpQuaternion::from_matrix(&huge), Err(FpError::Overflow));
    }

    #[test]
    fn slerp_endpoints_and_midpoint() {
        let to = FpQuaternion::from_rotation_y(Fp::HALF_PI);
        let start = FpQuaternion::IDENTITY.slerp(to, Fp::ZERO).unwrap();
        assert_eq!(start, FpQuaternion::IDENTITY);
        let end = FpQuaternion::IDENTITY.slerp(to, Fp::ONE).unwrap();
        assert_eq!(end, to);

        let mid = FpQuaternion::IDENTITY.slerp(to, Fp::HALF).unwrap();
        let expected = FpQuaternion::from_rotation_y(Fp::QUARTER_PI);
        assert!((mid.y - expected.y).abs() <= Fp::from_raw(8));
        assert!((mid.w - expected.w).abs() <= Fp::from_raw(8));
    }

    #[test]
    fn slerp_takes_shorter_arc() {
        let to = FpQuaternion::from_rotation_y(Fp::HALF_PI);
        let flipped = FpQuaternion::IDENTITY.slerp(-to, Fp::HALF).unwrap();
        let direct = FpQuaternion::IDENTITY.slerp(to, Fp::HALF).unwrap();
        assert_eq!(flipped, direct);
    }

    #[test]
    fn nearly_parallel_slerp_is_normalized_lerp() {
        let to = FpQuaternion::from_rotation_z(Fp::from_raw(1 << 20));
        let blended = FpQuaternion::IDENTITY.slerp(to, Fp::HALF).unwrap();
        assert_eq!(blended, FpQuaternion::IDENTITY.lerp(to, Fp::HALF).unwrap());
    }

    #[test]
    fn angle_between_rotations() {
        let a = FpQuaternion::from_rotation_x(Fp::HALF_PI);
        let angle = FpQuaternion::IDENTITY.angle_between(a);
        assert_eq!(angle, Fp::HALF_PI);
        assert_eq!(a.angle_between(a), Fp::ZERO);
    }

    #[test]
    fn le_bytes_roundtrip_and_copy_to() {
        let q = FpQuaternion::from_rotation_z(Fp::ONE);
        assert_eq!(FpQuaternion::from_le_bytes(q.to_le_bytes()), q);

        let mut array = [Fp::ZERO; 4];
        q.copy_to(Some(&mut array), 0).unwrap();
        assert_eq!(array, q.to_array());
        assert_eq!(q.copy_to(None, 0), Err(FpError::NullArgument));
    }
}
