//! Fixed-point matrices stored as column vectors.
//!
//! For every type, `a * b` applies `b` first and then `a`, the same order as
//! quaternion and rigid-transform composition. Nothing here checks for
//! orthonormality; constructors that need it assume it.
//!
//! `invert` never fails the call: singular (or unrepresentable) inverses
//! return `(false, original)` and callers must check the flag.

mod mat3x2;
mod mat3x3;
mod mat4x4;

pub use mat3x2::Fp3x2;
pub use mat3x3::Fp3x3;
pub use mat4x4::Fp4x4;

use crate::error::Result;
use crate::fixed::{mul_sub, Fp};

/// `true` when `|det|` is below the inversion tolerance.
fn is_singular(det: Fp) -> bool {
    det > -Fp::EPSILON && det < Fp::EPSILON
}

/// `a·b − c·d` with a single rounding; only the difference has to fit.
fn minor(a: Fp, b: Fp, c: Fp, d: Fp) -> Result<Fp> {
    mul_sub(a, b, c, d)
}
