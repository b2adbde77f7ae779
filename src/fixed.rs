//! Q31.32 fixed-point scalar.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Bit layout: Q31.32 (64-bit signed integer)              │
//! ├──────────────────────────────────────────────────────────┤
//! │  [S][ 31 integer bits ][ 32 fractional bits ]            │
//! │                                                          │
//! │  Range:     -2147483648.0 to +2147483647.99999999977     │
//! │  Precision: 2^-32 ≈ 2.33e-10                             │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Every rounding site (multiply, divide, decimal parsing, [`Fp::round`])
//! rounds the magnitude to nearest with ties to even, so `(-a) * b` is always
//! exactly `-(a * b)`.

use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};
use std::str::FromStr;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

use tracing::debug;

use crate::error::{FpError, Result};

/// Number of fractional bits in every [`Fp`].
pub const FRACTIONAL_BITS: u32 = 32;

const ONE_RAW: i64 = 1 << FRACTIONAL_BITS;
const FRACTION_MASK: i64 = ONE_RAW - 1;

/// Deterministic fixed-point number: `raw / 2^32` stored in an `i64`.
///
/// Equality and ordering compare the raw integers exactly.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(transparent))]
pub struct Fp {
    raw: i64,
}

impl Fp {
    pub const ZERO: Fp = Fp::from_raw(0);
    pub const ONE: Fp = Fp::from_raw(ONE_RAW);
    pub const TWO: Fp = Fp::from_raw(2 * ONE_RAW);
    pub const HALF: Fp = Fp::from_raw(ONE_RAW / 2);
    /// Smallest representable step, 2^-32.
    pub const DELTA: Fp = Fp::from_raw(1);
    pub const MIN: Fp = Fp::from_raw(i64::MIN);
    pub const MAX: Fp = Fp::from_raw(i64::MAX);

    /// Tolerance used by matrix inversion: round(1e-6 · 2^32).
    pub const EPSILON: Fp = Fp::from_raw(4_295);
    /// round(1e-8 · 2^32).
    pub const ONE_E_MINUS_8: Fp = Fp::from_raw(43);

    /// round(π · 2^32)
    pub const PI: Fp = Fp::from_raw(13_493_037_705);
    /// round(π/2 · 2^32)
    pub const HALF_PI: Fp = Fp::from_raw(6_746_518_852);
    /// round(π/4 · 2^32)
    pub const QUARTER_PI: Fp = Fp::from_raw(3_373_259_426);
    /// round(2π · 2^32), rounded independently of `PI`.
    pub const TWO_PI: Fp = Fp::from_raw(26_986_075_409);
    /// round(π/180 · 2^32)
    pub const PI_OVER_180: Fp = Fp::from_raw(74_961_321);
    /// round(180/π · 2^32)
    pub const PI_OVER_180_INVERSE: Fp = Fp::from_raw(246_083_499_208);

    /// Construct directly from raw Q31.32 bits.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: i64) -> Self {
        Self { raw }
    }

    /// Return the raw Q31.32 representation.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> i64 {
        self.raw
    }

    /// Construct from an integer. Every `i32` is representable.
    #[inline]
    #[must_use]
    pub const fn from_int(n: i32) -> Self {
        Self::from_raw((n as i64) << FRACTIONAL_BITS)
    }

    /// Construct from a wide integer, failing with `Overflow` outside
    /// `[-2^31, 2^31)`.
    pub fn from_i64(n: i64) -> Result<Self> {
        n.checked_mul(ONE_RAW)
            .map(Self::from_raw)
            .ok_or(FpError::Overflow)
    }

    /// Largest integer not greater than `self`.
    #[inline]
    #[must_use]
    pub const fn to_int(self) -> i64 {
        self.raw >> FRACTIONAL_BITS
    }

    /// Explicit, lossy conversion from `f64` (nearest, ties to even).
    ///
    /// Non-finite and out-of-range inputs fail with `Overflow`; there is no
    /// NaN representation to fall back on.
    pub fn from_f64(value: f64) -> Result<Self> {
        const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
        if !value.is_finite() {
            return Err(FpError::Overflow);
        }
        let scaled = (value * ONE_RAW as f64).round_ties_even();
        if !(-LIMIT..LIMIT).contains(&scaled) {
            return Err(FpError::Overflow);
        }
        Ok(Self::from_raw(scaled as i64))
    }

    /// Explicit, lossy conversion to `f64`. For presentation only.
    #[inline]
    #[must_use]
    pub fn to_f64(self) -> f64 {
        self.raw as f64 / ONE_RAW as f64
    }

    /// Raw value as little-endian bytes, for hashing simulation state.
    #[inline]
    #[must_use]
    pub const fn to_le_bytes(self) -> [u8; 8] {
        self.raw.to_le_bytes()
    }

    /// Inverse of [`to_le_bytes`](Self::to_le_bytes).
    #[inline]
    #[must_use]
    pub const fn from_le_bytes(bytes: [u8; 8]) -> Self {
        Self::from_raw(i64::from_le_bytes(bytes))
    }

    #[inline]
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.raw == 0
    }

    #[inline]
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.raw < 0
    }

    pub fn checked_add(self, rhs: Fp) -> Result<Fp> {
        self.raw
            .checked_add(rhs.raw)
            .map(Fp::from_raw)
            .ok_or(FpError::Overflow)
    }

    pub fn checked_sub(self, rhs: Fp) -> Result<Fp> {
        self.raw
            .checked_sub(rhs.raw)
            .map(Fp::from_raw)
            .ok_or(FpError::Overflow)
    }

    /// Widens to `i128`, then rescales by `2^32` rounding the magnitude to
    /// nearest, ties to even.
    pub fn checked_mul(self, rhs: Fp) -> Result<Fp> {
        let product = i128::from(self.raw) * i128::from(rhs.raw);
        from_magnitude(round_shift(product.unsigned_abs()), product < 0)
    }

    /// Pre-shifts the dividend in `i128` and rounds like [`checked_mul`](Self::checked_mul).
    pub fn checked_div(self, rhs: Fp) -> Result<Fp> {
        if rhs.raw == 0 {
            return Err(FpError::DivideByZero);
        }
        let numerator = (i128::from(self.raw) << FRACTIONAL_BITS).unsigned_abs();
        let denominator = i128::from(rhs.raw).unsigned_abs();
        from_magnitude(
            round_div(numerator, denominator),
            (self.raw < 0) != (rhs.raw < 0),
        )
    }

    /// Exact truncated remainder; the sign follows the dividend.
    ///
    /// Both operands share the same scale, so this is the integer remainder
    /// of the raw values and never rounds.
    pub fn checked_rem(self, rhs: Fp) -> Result<Fp> {
        if rhs.raw == 0 {
            return Err(FpError::DivideByZero);
        }
        // MIN % -DELTA is mathematically zero
        Ok(Fp::from_raw(self.raw.wrapping_rem(rhs.raw)))
    }

    pub fn checked_neg(self) -> Result<Fp> {
        self.raw
            .checked_neg()
            .map(Fp::from_raw)
            .ok_or(FpError::Overflow)
    }

    pub fn checked_abs(self) -> Result<Fp> {
        self.raw
            .checked_abs()
            .map(Fp::from_raw)
            .ok_or(FpError::Overflow)
    }

    /// Absolute value.
    ///
    /// # Panics
    ///
    /// Panics with `Overflow` for [`Fp::MIN`].
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn abs(self) -> Fp {
        or_panic(self.checked_abs())
    }

    /// `-1`, `0` or `1`.
    #[inline]
    #[must_use]
    pub fn signum(self) -> Fp {
        match self.raw {
            0 => Fp::ZERO,
            r if r < 0 => -Fp::ONE,
            _ => Fp::ONE,
        }
    }

    /// Clamp against `max` first, then against `min`, so `min > max` yields
    /// `min` (the HLSL convention). Unlike [`Ord::clamp`] this never panics.
    #[inline]
    #[must_use]
    pub fn clamp(self, min: Fp, max: Fp) -> Fp {
        let value = if self > max { max } else { self };
        if value < min {
            min
        } else {
            value
        }
    }

    /// `self + (to - self) * t`
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn lerp(self, to: Fp, t: Fp) -> Fp {
        self + (to - self) * t
    }

    #[inline]
    #[must_use]
    pub const fn floor(self) -> Fp {
        Fp::from_raw(self.raw & !FRACTION_MASK)
    }

    /// # Panics
    ///
    /// Panics with `Overflow` when the ceiling exceeds [`Fp::MAX`].
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn ceil(self) -> Fp {
        if self.raw & FRACTION_MASK == 0 {
            self
        } else {
            self.floor() + Fp::ONE
        }
    }

    /// Nearest integer, ties to even.
    #[must_use]
    #[track_caller]
    pub fn round(self) -> Fp {
        let floor = self.floor();
        let fraction = self.raw & FRACTION_MASK;
        let half = ONE_RAW / 2;
        let floor_is_odd = floor.to_int() & 1 == 1;
        if fraction > half || (fraction == half && floor_is_odd) {
            floor + Fp::ONE
        } else {
            floor
        }
    }

    /// `self - self.floor()`, always in `[0, 1)`.
    #[inline]
    #[must_use]
    pub const fn fract(self) -> Fp {
        Fp::from_raw(self.raw & FRACTION_MASK)
    }

    /// Degrees to radians.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn to_radians(self) -> Fp {
        self * Fp::PI_OVER_180
    }

    /// Radians to degrees.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn to_degrees(self) -> Fp {
        self * Fp::PI_OVER_180_INVERSE
    }
}

/// Divide a magnitude by `2^FRACTIONAL_BITS`, rounding to nearest, ties to even.
#[inline]
fn round_shift(magnitude: u128) -> u128 {
    let quotient = magnitude >> FRACTIONAL_BITS;
    let remainder = magnitude & ((1_u128 << FRACTIONAL_BITS) - 1);
    let half = 1_u128 << (FRACTIONAL_BITS - 1);
    if remainder > half || (remainder == half && quotient & 1 == 1) {
        quotient + 1
    } else {
        quotient
    }
}

/// `numerator / denominator` rounded to nearest, ties to even.
#[inline]
fn round_div(numerator: u128, denominator: u128) -> u128 {
    let quotient = numerator / denominator;
    let twice_remainder = (numerator % denominator) * 2;
    if twice_remainder > denominator || (twice_remainder == denominator && quotient & 1 == 1) {
        quotient + 1
    } else {
        quotient
    }
}

/// Round the decimal fraction `0.<digits>` to `FRACTIONAL_BITS` binary
/// places, nearest with ties to even, using every digit.
///
/// Each doubling of the decimal digits shifts out the next binary digit, so
/// the expansion is exact. A result of `2^FRACTIONAL_BITS` means the
/// fraction rounded up to one.
fn round_decimal_fraction(ascii_digits: &[u8]) -> u128 {
    fn double(digits: &mut [u8]) -> u128 {
        let mut carry = 0;
        for digit in digits.iter_mut().rev() {
            let doubled = *digit * 2 + carry;
            *digit = doubled % 10;
            carry = doubled / 10;
        }
        u128::from(carry)
    }

    let mut digits: Vec<u8> = ascii_digits.iter().map(|b| b - b'0').collect();
    let mut fraction = 0_u128;
    for _ in 0..FRACTIONAL_BITS {
        fraction = (fraction << 1) | double(&mut digits);
    }
    let round_bit = double(&mut digits) == 1;
    let sticky = digits.iter().any(|&digit| digit != 0);
    if round_bit && (sticky || fraction & 1 == 1) {
        fraction + 1
    } else {
        fraction
    }
}

fn from_magnitude(magnitude: u128, negative: bool) -> Result<Fp> {
    let magnitude = i128::try_from(magnitude).map_err(|_| FpError::Overflow)?;
    let signed = if negative { -magnitude } else { magnitude };
    i64::try_from(signed)
        .map(Fp::from_raw)
        .map_err(|_| FpError::Overflow)
}

/// `a·b − c·d` computed exactly in `i128` and rounded once.
///
/// Fails only when the rounded difference itself is out of range, so
/// cancelling products may each exceed it.
pub(crate) fn mul_sub(a: Fp, b: Fp, c: Fp, d: Fp) -> Result<Fp> {
    let difference = (i128::from(a.raw) * i128::from(b.raw))
        .checked_sub(i128::from(c.raw) * i128::from(d.raw))
        .ok_or(FpError::Overflow)?;
    from_magnitude(round_shift(difference.unsigned_abs()), difference < 0)
}

#[track_caller]
pub(crate) fn or_panic(result: Result<Fp>) -> Fp {
    match result {
        Ok(value) => value,
        Err(err) => panic!("fixed-point {err}"),
    }
}

macro_rules! checked_operator {
    ($op:ident, $method:ident, $assign_op:ident, $assign_method:ident, $checked:ident) => {
        impl $op for Fp {
            type Output = Fp;

            #[inline]
            #[track_caller]
            fn $method(self, rhs: Fp) -> Fp {
                or_panic(self.$checked(rhs))
            }
        }

        impl $assign_op for Fp {
            #[inline]
            #[track_caller]
            fn $assign_method(&mut self, rhs: Fp) {
                *self = $op::$method(*self, rhs);
            }
        }
    };
}

// The operators panic with the `FpError` message, like integer `/` on zero.
// Use the `checked_*` methods to receive the error instead.
checked_operator!(Add, add, AddAssign, add_assign, checked_add);
checked_operator!(Sub, sub, SubAssign, sub_assign, checked_sub);
checked_operator!(Mul, mul, MulAssign, mul_assign, checked_mul);
checked_operator!(Div, div, DivAssign, div_assign, checked_div);
checked_operator!(Rem, rem, RemAssign, rem_assign, checked_rem);

impl Neg for Fp {
    type Output = Fp;

    #[inline]
    #[track_caller]
    fn neg(self) -> Fp {
        or_panic(self.checked_neg())
    }
}

impl From<i32> for Fp {
    #[inline]
    fn from(n: i32) -> Self {
        Fp::from_int(n)
    }
}

impl FromStr for Fp {
    type Err = FpError;

    /// Parse a decimal literal such as `"-12.375"` exactly, rounding the
    /// fraction to nearest with ties to even.
    fn from_str(text: &str) -> Result<Self> {
        let invalid = || FpError::InvalidLiteral(text.to_owned());
        let trimmed = text.trim();
        let (negative, body) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        if body.contains(['e', 'E']) {
            debug!(literal = text, "exponent notation rejected");
            return Err(FpError::Unsupported("exponent notation in decimal literal"));
        }

        let (int_digits, frac_digits) = body.split_once('.').unwrap_or((body, ""));
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if (int_digits.is_empty() && frac_digits.is_empty())
            || !all_digits(int_digits)
            || !all_digits(frac_digits)
        {
            debug!(literal = text, "malformed decimal literal");
            return Err(invalid());
        }

        let mut integer: u128 = 0;
        for b in int_digits.bytes() {
            integer = integer * 10 + u128::from(b - b'0');
            if integer > 1 << 63 {
                return Err(FpError::Overflow);
            }
        }

        let fraction = round_decimal_fraction(frac_digits.as_bytes());

        from_magnitude((integer << FRACTIONAL_BITS) + fraction, negative)
    }
}

impl fmt::Debug for Fp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fp({} raw={})", self.to_f64(), self.raw)
    }
}

impl fmt::Display for Fp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f64(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(text: &str) -> Fp {
        text.parse().unwrap()
    }

    #[test]
    fn constants_have_exact_raw_values() {
        assert_eq!(Fp::ONE.raw(), 4_294_967_296);
        assert_eq!(Fp::TWO.raw(), 8_589_934_592);
        assert_eq!(Fp::HALF.raw(), 2_147_483_648);
        assert_eq!(Fp::PI.raw(), 13_493_037_705);
        assert_eq!(Fp::PI_OVER_180_INVERSE.raw(), 246_083_499_208);
        assert_eq!(Fp::EPSILON.raw(), 4_295);
        assert_eq!(Fp::ONE_E_MINUS_8.raw(), 43);
    }

    #[test]
    fn mul_rounds_ties_to_even() {
        // 1 raw * 0.5 = 0.5 raw -> 0 (even)
        assert_eq!(Fp::DELTA * Fp::HALF, Fp::ZERO);
        // 3 raw * 0.5 = 1.5 raw -> 2
        assert_eq!(Fp::from_raw(3) * Fp::HALF, Fp::from_raw(2));
        // 5 raw * 0.5 = 2.5 raw -> 2
        assert_eq!(Fp::from_raw(5) * Fp::HALF, Fp::from_raw(2));
        assert_eq!(Fp::from_int(2) * Fp::from_int(3), Fp::from_int(6));
    }

    #[test]
    fn mul_is_sign_symmetric() {
        let a = Fp::from_raw(123_456_789_123);
        let b = Fp::from_raw(-987_654_321);
        assert_eq!(-a * b, -(a * b));
        assert_eq!(Fp::from_raw(-3) * Fp::HALF, Fp::from_raw(-2));
    }

    #[test]
    fn div_rounds_and_reports_zero() {
        assert_eq!(Fp::from_int(6) / Fp::from_int(2), Fp::from_int(3));
        assert_eq!(Fp::ONE / Fp::from_int(4), fp("0.25"));
        // 1/3 = 1431655765.33 raw
        assert_eq!((Fp::ONE / Fp::from_int(3)).raw(), 1_431_655_765);
        assert_eq!((-Fp::ONE / Fp::from_int(3)).raw(), -1_431_655_765);
        assert_eq!(Fp::ONE.checked_div(Fp::ZERO), Err(FpError::DivideByZero));
    }

    #[test]
    fn overflow_is_reported_not_wrapped() {
        assert_eq!(Fp::MAX.checked_add(Fp::DELTA), Err(FpError::Overflow));
        assert_eq!(Fp::MIN.checked_sub(Fp::DELTA), Err(FpError::Overflow));
        assert_eq!(
            Fp::from_int(65_536).checked_mul(Fp::from_int(65_536)),
            Err(FpError::Overflow)
        );
        assert_eq!(
            Fp::from_int(1 << 20).checked_div(Fp::from_raw(1)),
            Err(FpError::Overflow)
        );
        assert_eq!(Fp::MIN.checked_neg(), Err(FpError::Overflow));
        assert_eq!(Fp::MIN.checked_abs(), Err(FpError::Overflow));
        assert_eq!(Fp::from_i64(1 << 31), Err(FpError::Overflow));
        assert_eq!(Fp::from_i64(-(1 << 31)), Ok(Fp::MIN));
    }

    #[test]
    #[should_panic(expected = "fixed-point arithmetic overflow")]
    fn operator_panics_on_overflow() {
        let _ = Fp::MAX + Fp::ONE;
    }

    #[test]
    #[should_panic(expected = "fixed-point division by zero")]
    fn operator_panics_on_zero_divisor() {
        let _ = Fp::ONE / Fp::ZERO;
    }

    #[test]
    fn add_then_sub_round_trips() {
        let a = fp("12345.6789");
        let b = fp("-0.000001");
        assert_eq!(a + b - b, a);
    }

    #[test]
    fn remainder_is_exact_and_follows_dividend() {
        assert_eq!(fp("7.5") % Fp::TWO, fp("1.5"));
        assert_eq!(fp("-7.5") % Fp::TWO, fp("-1.5"));
        assert_eq!(Fp::MIN % -Fp::DELTA, Fp::ZERO);
        assert_eq!(Fp::ONE.checked_rem(Fp::ZERO), Err(FpError::DivideByZero));
    }

    #[test]
    fn parses_decimal_literals() {
        assert_eq!(fp("1.5").raw(), 6_442_450_944);
        assert_eq!(fp("-0.25").raw(), -1_073_741_824);
        // 0.1 * 2^32 = 429496729.6
        assert_eq!(fp("0.1").raw(), 429_496_730);
        assert_eq!(fp("+.5"), Fp::HALF);
        assert_eq!(fp("3."), Fp::from_int(3));
        assert_eq!(fp("3.14159265358979323846"), Fp::PI);
        assert_eq!(fp("-2147483648"), Fp::MIN);
        assert_eq!(fp("-0"), Fp::ZERO);
        // 2^-32 written out in full
        assert_eq!(fp("0.00000000023283064365386962890625"), Fp::DELTA);
    }

    #[test]
    fn mul_sub_rounds_once_and_survives_cancellation() {
        let big = Fp::from_int(65_536);
        assert_eq!(mul_sub(big, big, big, big), Ok(Fp::ZERO));
        assert_eq!(big.checked_mul(big), Err(FpError::Overflow));
        // 2^-33 + 2^-33; rounding each product first would give zero
        let half = Fp::HALF;
        let delta = Fp::DELTA;
        assert_eq!(mul_sub(delta, half, -delta, half), Ok(delta));
        assert_eq!(mul_sub(big, big, -big, big), Err(FpError::Overflow));
    }

    #[test]
    fn long_literals_round_on_every_digit() {
        // 2^-33 is exactly half a step and ties to the even raw 0
        assert_eq!(fp("0.000000000116415321826934814453125").raw(), 0);
        assert_eq!(fp("0.0000000001164153218269348144531251").raw(), 1);
        assert_eq!(fp("0.0000000001164153218269348144531249999").raw(), 0);
        // 3 * 2^-33 ties up to the even raw 2
        assert_eq!(fp("0.000000000349245965480804443359375").raw(), 2);
        assert_eq!(fp("-0.00000000011641532182693481445312500000000001").raw(), -1);
        // 1 - 2^-33 rounds up into the integer part
        assert_eq!(fp("0.999999999883584678173065185546875"), Fp::ONE);
        assert_eq!(fp("1.99999999999999999999999999999999999999"), Fp::TWO);
    }

    #[test]
    fn rejects_bad_literals() {
        assert_eq!(
            "2147483648".parse::<Fp>(),
            Err(FpError::Overflow)
        );
        assert!(matches!("abc".parse::<Fp>(), Err(FpError::InvalidLiteral(_))));
        assert!(matches!("".parse::<Fp>(), Err(FpError::InvalidLiteral(_))));
        assert!(matches!(".".parse::<Fp>(), Err(FpError::InvalidLiteral(_))));
        assert!(matches!("1.2.3".parse::<Fp>(), Err(FpError::InvalidLiteral(_))));
        assert!(matches!("1e-8".parse::<Fp>(), Err(FpError::Unsupported(_))));
    }

    #[test]
    fn float_conversion_is_explicit_and_checked() {
        assert_eq!(Fp::from_f64(1.5), Ok(fp("1.5")));
        assert_eq!(Fp::from_f64(-2.0), Ok(Fp::from_int(-2)));
        assert_eq!(Fp::from_f64(f64::NAN), Err(FpError::Overflow));
        assert_eq!(Fp::from_f64(f64::INFINITY), Err(FpError::Overflow));
        assert_eq!(Fp::from_f64(3.0e9), Err(FpError::Overflow));
        assert_eq!(fp("0.75").to_f64(), 0.75);
    }

    #[test]
    fn rounding_helpers() {
        assert_eq!(fp("2.5").floor(), Fp::TWO);
        assert_eq!(fp("-2.5").floor(), Fp::from_int(-3));
        assert_eq!(fp("2.25").ceil(), Fp::from_int(3));
        assert_eq!(fp("-2.25").ceil(), Fp::from_int(-2));
        assert_eq!(fp("2.5").round(), Fp::TWO);
        assert_eq!(fp("3.5").round(), Fp::from_int(4));
        assert_eq!(fp("-2.5").round(), Fp::from_int(-2));
        assert_eq!(fp("-2.75").fract(), fp("0.25"));
        assert_eq!(fp("-2.75").to_int(), -3);
    }

    #[test]
    fn clamp_applies_max_then_min() {
        let five = Fp::from_int(5);
        assert_eq!(five.clamp(Fp::from_int(10), Fp::from_int(2)), Fp::from_int(10));
        assert_eq!(five.clamp(Fp::ZERO, Fp::from_int(2)), Fp::from_int(2));
        assert_eq!(five.clamp(Fp::ZERO, Fp::from_int(10)), five);
    }

    #[test]
    fn le_bytes_roundtrip() {
        let original = fp("-1234.5678");
        assert_eq!(Fp::from_le_bytes(original.to_le_bytes()), original);
    }

    #[test]
    fn angle_units() {
        assert_eq!(Fp::from_int(180).to_radians().raw(), 13_493_037_780);
        assert_eq!(Fp::PI.to_degrees().to_int(), 180);
    }
}
