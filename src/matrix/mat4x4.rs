#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

use tracing::debug;

use crate::copy::copy_components;
use crate::error::{FpError, Result};
use crate::fixed::Fp;
use crate::quaternion::FpQuaternion;
use crate::rigid::RigidTransform;
use crate::vector::{Fp3, Fp4};

use super::{is_singular, minor, Fp3x3};

/// 4x4 homogeneous transform stored as four columns; `c3` carries the
/// translation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Fp4x4 {
    pub c0: Fp4,
    pub c1: Fp4,
    pub c2: Fp4,
    pub c3: Fp4,
}

impl Fp4x4 {
    pub const IDENTITY: Self = Self::new(Fp4::UNIT_X, Fp4::UNIT_Y, Fp4::UNIT_Z, Fp4::UNIT_W);

    #[inline]
    pub const fn new(c0: Fp4, c1: Fp4, c2: Fp4, c3: Fp4) -> Self {
        Self { c0, c1, c2, c3 }
    }

    /// Embed a 3x3 linear map, with no translation.
    pub const fn from_3x3(m: Fp3x3) -> Self {
        Self::new(
            Fp4::new(m.c0.x, m.c0.y, m.c0.z, Fp::ZERO),
            Fp4::new(m.c1.x, m.c1.y, m.c1.z, Fp::ZERO),
            Fp4::new(m.c2.x, m.c2.y, m.c2.z, Fp::ZERO),
            Fp4::UNIT_W,
        )
    }

    pub const fn create_translation(translation: Fp3) -> Self {
        Self::new(
            Fp4::UNIT_X,
            Fp4::UNIT_Y,
            Fp4::UNIT_Z,
            Fp4::new(translation.x, translation.y, translation.z, Fp::ONE),
        )
    }

    pub fn create_scale(scale: Fp3) -> Self {
        Self::from_3x3(Fp3x3::create_scale(scale))
    }

    #[track_caller]
    pub fn create_rotation_x(radians: Fp) -> Self {
        Self::from_3x3(Fp3x3::create_rotation_x(radians))
    }

    #[track_caller]
    pub fn create_rotation_y(radians: Fp) -> Self {
        Self::from_3x3(Fp3x3::create_rotation_y(radians))
    }

    #[track_caller]
    pub fn create_rotation_z(radians: Fp) -> Self {
        Self::from_3x3(Fp3x3::create_rotation_z(radians))
    }

    #[must_use]
    #[track_caller]
    pub fn from_quaternion(rotation: FpQuaternion) -> Self {
        Self::from_3x3(rotation.to_matrix())
    }

    /// Rotation first, then translation.
    #[must_use]
    #[track_caller]
    pub fn from_rigid_transform(transform: &RigidTransform) -> Self {
        let mut m = Self::from_quaternion(transform.rotation);
        m.c3 = transform.translation.extend(Fp::ONE);
        m
    }

    #[inline]
    #[must_use]
    pub const fn translation(&self) -> Fp3 {
        self.c3.truncate()
    }

    /// Upper-left 3x3 block.
    #[must_use]
    pub const fn linear(&self) -> Fp3x3 {
        Fp3x3::new(self.c0.truncate(), self.c1.truncate(), self.c2.truncate())
    }

    #[must_use]
    pub const fn transpose(&self) -> Self {
        Self::new(
            Fp4::new(self.c0.x, self.c1.x, self.c2.x, self.c3.x),
            Fp4::new(self.c0.y, self.c1.y, self.c2.y, self.c3.y),
            Fp4::new(self.c0.z, self.c1.z, self.c2.z, self.c3.z),
            Fp4::new(self.c0.w, self.c1.w, self.c2.w, self.c3.w),
        )
    }

    /// Laplace expansion along the first column.
    #[must_use]
    #[track_caller]
    pub fn determinant(&self) -> Fp {
        let [a, b, c, d, e, f, g, h, i, j, k, l, m, n, o, p] = self.to_array();

        let kp_lo = k * p - l * o;
        let jp_ln = j * p - l * n;
        let jo_kn = j * o - k * n;
        let ip_lm = i * p - l * m;
        let io_km = i * o - k * m;
        let in_jm = i * n - j * m;

        a * (f * kp_lo - g * jp_ln + h * jo_kn) - b * (e * kp_lo - g * ip_lm + h * io_km)
            + c * (e * jp_ln - f * ip_lm + h * in_jm)
            - d * (e * jo_kn - f * io_km + g * in_jm)
    }

    /// Cofactor inverse; `(false, *self)` when `|det| < EPSILON` or an
    /// entry of the inverse is not representable.
    #[must_use]
    pub fn invert(&self) -> (bool, Self) {
        match self.try_inverse() {
            Ok(inverse) => (true, inverse),
            Err(err) => {
                debug!(error = %err, "4x4 matrix is not invertible");
                (false, *self)
            }
        }
    }

    fn try_inverse(&self) -> Result<Self> {
        // Elements are read column-major, so the cofactor matrix below is the
        // transpose of the usual one and entry (i, j) lands in column i.
        let [a, b, c, d, e, f, g, h, i, j, k, l, m, n, o, p] = self.to_array();

        let kp_lo = minor(k, p, l, o)?;
        let jp_ln = minor(j, p, l, n)?;
        let jo_kn = minor(j, o, k, n)?;
        let ip_lm = minor(i, p, l, m)?;
        let io_km = minor(i, o, k, m)?;
        let in_jm = minor(i, n, j, m)?;

        let a11 = cofactor(f, kp_lo, g, jp_ln, h, jo_kn)?;
        let a12 = cofactor(e, kp_lo, g, ip_lm, h, io_km)?.checked_neg()?;
        let a13 = cofactor(e, jp_ln, f, ip_lm, h, in_jm)?;
        let a14 = cofactor(e, jo_kn, f, io_km, g, in_jm)?.checked_neg()?;

        let det = a
            .checked_mul(a11)?
            .checked_add(b.checked_mul(a12)?)?
            .checked_add(c.checked_mul(a13)?)?
            .checked_add(d.checked_mul(a14)?)?;
        if is_singular(det) {
            return Err(FpError::DivideByZero);
        }

        let gp_ho = minor(g, p, h, o)?;
        let fp_hn = minor(f, p, h, n)?;
        let fo_gn = minor(f, o, g, n)?;
        let ep_hm = minor(e, p, h, m)?;
        let eo_gm = minor(e, o, g, m)?;
        let en_fm = minor(e, n, f, m)?;

        let gl_hk = minor(g, l, h, k)?;
        let fl_hj = minor(f, l, h, j)?;
        let fk_gj = minor(f, k, g, j)?;
        let el_hi = minor(e, l, h, i)?;
        let ek_gi = minor(e, k, g, i)?;
        let ej_fi = minor(e, j, f, i)?;

        let cofactors = [
            [
                a11,
                cofactor(b, kp_lo, c, jp_ln, d, jo_kn)?.checked_neg()?,
                cofactor(b, gp_ho, c, fp_hn, d, fo_gn)?,
                cofactor(b, gl_hk, c, fl_hj, d, fk_gj)?.checked_neg()?,
            ],
            [
                a12,
                cofactor(a, kp_lo, c, ip_lm, d, io_km)?,
                cofactor(a, gp_ho, c, ep_hm, d, eo_gm)?.checked_neg()?,
                cofactor(a, gl_hk, c, el_hi, d, ek_gi)?,
            ],
            [
                a13,
                cofactor(a, jp_ln, b, ip_lm, d, in_jm)?.checked_neg()?,
                cofactor(a, fp_hn, b, ep_hm, d, en_fm)?,
                cofactor(a, fl_hj, b, el_hi, d, ej_fi)?.checked_neg()?,
            ],
            [
                a14,
                cofactor(a, jo_kn, b, io_km, c, in_jm)?,
                cofactor(a, fo_gn, b, eo_gm, c, en_fm)?.checked_neg()?,
                cofactor(a, fk_gj, b, ek_gi, c, ej_fi)?,
            ],
        ];

        let mut columns = [Fp4::ZERO; 4];
        for (column, row) in columns.iter_mut().zip(cofactors) {
            *column = Fp4::new(
                row[0].checked_div(det)?,
                row[1].checked_div(det)?,
                row[2].checked_div(det)?,
                row[3].checked_div(det)?,
            );
        }
        let [c0, c1, c2, c3] = columns;
        Ok(Self::new(c0, c1, c2, c3))
    }

    /// `M · v`, summed column by column.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn transform(&self, v: Fp4) -> Fp4 {
        self.c0 * v.x + self.c1 * v.y + self.c2 * v.z + self.c3 * v.w
    }

    /// Affine point transform (`w = 1`, no perspective divide).
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn transform_point(&self, p: Fp3) -> Fp3 {
        self.transform(p.extend(Fp::ONE)).truncate()
    }

    /// Direction transform (`w = 0`), ignoring translation.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn transform_normal(&self, n: Fp3) -> Fp3 {
        self.transform(n.extend(Fp::ZERO)).truncate()
    }

    /// `Mᵀ · v`.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn transform_transpose(&self, v: Fp4) -> Fp4 {
        Fp4::new(self.c0.dot(v), self.c1.dot(v), self.c2.dot(v), self.c3.dot(v))
    }

    #[must_use]
    pub const fn to_array(&self) -> [Fp; 16] {
        [
            self.c0.x, self.c0.y, self.c0.z, self.c0.w, self.c1.x, self.c1.y, self.c1.z,
            self.c1.w, self.c2.x, self.c2.y, self.c2.z, self.c2.w, self.c3.x, self.c3.y,
            self.c3.z, self.c3.w,
        ]
    }

    /// Copy column by column into `array` starting at `index`.
    pub fn copy_to(&self, array: Option<&mut [Fp]>, index: isize) -> Result<()> {
        copy_components(&self.to_array(), array, index)
    }
}

/// `x·p − y·q + z·r`.
fn cofactor(x: Fp, p: Fp, y: Fp, q: Fp, z: Fp, r: Fp) -> Result<Fp> {
    x.checked_mul(p)?
        .checked_sub(y.checked_mul(q)?)?
        .checked_add(z.checked_mul(r)?)
}

impl std::ops::Add for Fp4x4 {
    type Output = Self;
    #[track_caller]
    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.c0 + rhs.c0,
            self.c1 + rhs.c1,
            self.c2 + rhs.c2,
            self.c3 + rhs.c3,
        )
    }
}

impl std::ops::Sub for Fp4x4 {
    type Output = Self;
    #[track_caller]
    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.c0 - rhs.c0,
            self.c1 - rhs.c1,
            self.c2 - rhs.c2,
            self.c3 - rhs.c3,
        )
    }
}

impl std::ops::Neg for Fp4x4 {
    type Output = Self;
    #[track_caller]
    fn neg(self) -> Self {
        Self::new(-self.c0, -self.c1, -self.c2, -self.c3)
    }
}

impl std::ops::Mul<Fp> for Fp4x4 {
    type Output = Self;
    #[track_caller]
    fn mul(self, rhs: Fp) -> Self {
        Self::new(self.c0 * rhs, self.c1 * rhs, self.c2 * rhs, self.c3 * rhs)
    }
}

impl std::ops::Mul<Fp4> for Fp4x4 {
    type Output = Fp4;
    #[track_caller]
    fn mul(self, rhs: Fp4) -> Fp4 {
        self.transform(rhs)
    }
}

/// `a * b` applies `b` first, then `a`.
impl std::ops::Mul for Fp4x4 {
    type Output = Self;
    #[track_caller]
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.transform(rhs.c0),
            self.transform(rhs.c1),
            self.transform(rhs.c2),
            self.transform(rhs.c3),
        )
    }
}
