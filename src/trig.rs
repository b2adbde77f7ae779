//! Deterministic square root and trigonometry over [`Fp`].
//!
//! Nothing here touches floating point. Polynomial coefficients are stored as
//! raw Q31.32 integers so every platform evaluates the same integer program.
//!
//! Error bounds (ulp = 2^-32):
//!
//! | function | bound |
//! |---|---|
//! | `sqrt` | correctly rounded, ≤ 0.5 ulp |
//! | `sin`, `cos` | ≤ 2 ulp for `|x| ≤ 4π`, plus ≤ 1 ulp per further period |
//! | `atan`, `atan2` | ≤ 2 ulp |
//! | `acos`, `asin` | ≤ 4 ulp |

use crate::error::{FpError, Result};
use crate::fixed::{Fp, FRACTIONAL_BITS};

/// Newton–Raphson steps taken by [`Fp::sqrt`]. The starting guess is within a
/// factor of two of the root, so six steps already reach the integer floor.
pub const SQRT_ITERATIONS: u32 = 8;

/// round(tan(π/8) · 2^32)
const TAN_PI_OVER_8: Fp = Fp::from_raw(1_779_033_704);

/// 1, -1/3!, 1/5!, ..., 1/13!
const SIN_COEFFS: [i64; 7] = [1 << 32, -715_827_883, 35_791_394, -852_176, 11_836, -108, 1];

/// 1, -1/2!, 1/4!, ..., 1/12!
const COS_COEFFS: [i64; 7] = [1 << 32, -2_147_483_648, 178_956_971, -5_965_232, 106_522, -1_184, 9];

/// 1, -1/3, 1/5, ..., 1/25
const ATAN_COEFFS: [i64; 13] = [
    1 << 32,
    -1_431_655_765,
    858_993_459,
    -613_566_757,
    477_218_588,
    -390_451_572,
    330_382_100,
    -286_331_153,
    252_645_135,
    -226_050_910,
    204_522_252,
    -186_737_709,
    171_798_692,
];

/// Horner evaluation of `c0 + c1·t + c2·t² + ...`.
fn horner(coeffs: &[i64], t: Fp) -> Fp {
    let (last, rest) = match coeffs.split_last() {
        Some(split) => split,
        None => return Fp::ZERO,
    };
    rest.iter()
        .rev()
        .fold(Fp::from_raw(*last), |acc, &c| acc * t + Fp::from_raw(c))
}

/// Correctly rounded `sqrt(raw / 2^32) · 2^32` for a non-negative raw value.
fn sqrt_raw(raw: i64) -> i64 {
    if raw <= 0 {
        return 0;
    }
    let n = (raw as u128) << FRACTIONAL_BITS;
    let bits = 128 - n.leading_zeros();
    // 2^ceil(bits/2) is >= sqrt(n) and at most twice it
    let mut guess: u128 = 1 << ((bits + 1) / 2);
    for _ in 0..SQRT_ITERATIONS {
        guess = (guess + n / guess) >> 1;
    }
    // Integer Newton can settle one above the floor
    if guess * guess > n {
        guess -= 1;
    }
    // (g + 1/2)^2 = g^2 + g + 1/4
    if n - guess * guess > guess {
        guess += 1;
    }
    guess as i64
}

/// Square root of a value known to be non-negative, such as a squared length.
pub(crate) fn sqrt_non_negative(x: Fp) -> Fp {
    debug_assert!(!x.is_negative());
    Fp::from_raw(sqrt_raw(x.raw()))
}

/// Reduce to `[-π, π]` with the exact fixed-point remainder.
fn reduce_angle(x: Fp) -> i64 {
    let two_pi = Fp::TWO_PI.raw();
    let mut r = x.raw() % two_pi;
    if r > Fp::PI.raw() {
        r -= two_pi;
    } else if r < -Fp::PI.raw() {
        r += two_pi;
    }
    r
}

fn atan_series(t: Fp) -> Fp {
    horner(&ATAN_COEFFS, t * t) * t
}

impl Fp {
    /// Square root, correctly rounded.
    ///
    /// Runs a fixed [`SQRT_ITERATIONS`] Newton steps on the widened raw value;
    /// there is no convergence loop.
    pub fn sqrt(self) -> Result<Fp> {
        if self.is_negative() {
            return Err(FpError::NegativeArgument);
        }
        Ok(Fp::from_raw(sqrt_raw(self.raw())))
    }

    /// Sine and cosine of an angle in radians, evaluated together.
    #[must_use]
    pub fn sin_cos(self) -> (Fp, Fp) {
        let x = reduce_angle(self);
        let half_pi = Fp::HALF_PI.raw();
        // nearest multiple of π/2, leaving |r| <= π/4
        let k = {
            let q = (x.unsigned_abs() as i64 + half_pi / 2) / half_pi;
            if x < 0 {
                -q
            } else {
                q
            }
        };
        let r = Fp::from_raw(x - k * half_pi);
        let r2 = r * r;
        let sin = horner(&SIN_COEFFS, r2) * r;
        let cos = horner(&COS_COEFFS, r2);
        match k.rem_euclid(4) {
            0 => (sin, cos),
            1 => (cos, -sin),
            2 => (-sin, -cos),
            _ => (-cos, sin),
        }
    }

    #[inline]
    #[must_use]
    pub fn sin(self) -> Fp {
        self.sin_cos().0
    }

    #[inline]
    #[must_use]
    pub fn cos(self) -> Fp {
        self.sin_cos().1
    }

    /// Tangent; fails with `DivideByZero` where the cosine is exactly zero.
    pub fn tan(self) -> Result<Fp> {
        let (sin, cos) = self.sin_cos();
        sin.checked_div(cos)
    }

    /// Arctangent in `[-π/2, π/2]`.
    #[must_use]
    pub fn atan(self) -> Fp {
        let negative = self.is_negative();
        let x = Fp::from_raw(self.raw().checked_abs().unwrap_or(i64::MAX));
        let (x, reciprocal) = if x > Fp::ONE {
            (Fp::ONE / x, true)
        } else {
            (x, false)
        };
        let mut angle = if x > TAN_PI_OVER_8 {
            // atan(x) = π/4 + atan((x - 1) / (x + 1))
            Fp::QUARTER_PI + atan_series((x - Fp::ONE) / (x + Fp::ONE))
        } else {
            atan_series(x)
        };
        if reciprocal {
            angle = Fp::HALF_PI - angle;
        }
        if negative {
            -angle
        } else {
            angle
        }
    }

    /// Four-quadrant arctangent of `self / x` in `[-π, π]`.
    ///
    /// `atan2(0, 0)` is zero. The ratio is always formed with the larger
    /// magnitude as divisor, so this never overflows.
    #[must_use]
    pub fn atan2(self, x: Fp) -> Fp {
        let y = self;
        if y.is_zero() && x.is_zero() {
            return Fp::ZERO;
        }
        if x.raw().unsigned_abs() >= y.raw().unsigned_abs() {
            let angle = (y / x).atan();
            if !x.is_negative() {
                angle
            } else if y.is_negative() {
                angle - Fp::PI
            } else {
                angle + Fp::PI
            }
        } else {
            let quarter_turn = if y.is_negative() {
                -Fp::HALF_PI
            } else {
                Fp::HALF_PI
            };
            quarter_turn - (x / y).atan()
        }
    }

    /// Arccosine in `[0, π]`.
    ///
    /// Inputs outside `[-1, 1]` are clamped rather than rejected: vector angle
    /// code routinely lands a step past ±1 through rounding.
    #[must_use]
    pub fn acos(self) -> Fp {
        let x = self.clamp(-Fp::ONE, Fp::ONE);
        if x == -Fp::ONE {
            return Fp::PI;
        }
        // 1 ± x is exact in fixed point, which keeps the result well conditioned near ±1
        let num = sqrt_non_negative(Fp::ONE - x);
        let den = sqrt_non_negative(Fp::ONE + x);
        Fp::TWO * (num / den).atan()
    }

    /// Arcsine in `[-π/2, π/2]`, clamping like [`acos`](Self::acos).
    #[inline]
    #[must_use]
    pub fn asin(self) -> Fp {
        Fp::HALF_PI - self.acos()
    }
}
