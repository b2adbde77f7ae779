//! Lockstep-Fixed: Deterministic Fixed-Point Geometry
//!
//! Provides a Q31.32 fixed-point scalar ([`Fp`]) and the geometry built on it:
//! vectors, column-major matrices, quaternions and rigid transforms. Every
//! operation is integer arithmetic with one documented rounding rule, so the
//! same inputs give the same bits on every platform and compiler. This is the
//! property lockstep simulations and replay systems rely on.
//!
//! # Usage
//!
//! ```rust
//! use lockstep_fixed::{Fp, Fp3, FpQuaternion, RigidTransform};
//!
//! let speed: Fp = "1.25".parse()?;
//! let heading = FpQuaternion::from_rotation_z(Fp::HALF_PI);
//! let body = RigidTransform::new(heading, Fp3::new(speed, Fp::ZERO, Fp::ZERO));
//!
//! let tip = body.transform(Fp3::UNIT_X);
//! assert_eq!(tip.z, Fp::ZERO);
//!
//! // Hash the raw words, never formatted text.
//! let bytes = tip.to_le_bytes();
//! assert_eq!(Fp3::from_le_bytes(bytes), tip);
//! # Ok::<(), lockstep_fixed::FpError>(())
//! ```
//!
//! # Errors
//!
//! `checked_*` methods and fallible constructors return [`Result`]. The
//! `std::ops` operators panic on overflow or division by zero instead of
//! wrapping or saturating; nothing in this crate silently clamps a value.
//!
//! # Serialization
//!
//! The `serialization` feature enables serde support on every value type.
//! [`Fp`] serializes as its raw `i64`, so a serialized state restores
//! bit-for-bit.

mod copy;
pub mod error;
mod fixed;
pub mod matrix;
mod quaternion;
mod rigid;
mod trig;
pub mod vector;

pub use error::{FpError, Result};
pub use fixed::{Fp, FRACTIONAL_BITS};
pub use matrix::{Fp3x2, Fp3x3, Fp4x4};
pub use quaternion::{EulerOrder, FpQuaternion};
pub use rigid::{RigidTransform, SNAP_THRESHOLD};
pub use trig::SQRT_ITERATIONS;
pub use vector::{Fp2, Fp3, Fp4};
