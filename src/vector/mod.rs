//! Two-, three- and four-component fixed-point vectors.
//!
//! Every operation is component-wise or goes through [`dot`](Fp3::dot), so the
//! only numeric policy is the scalar one: products rounded individually, then
//! summed left to right.

/// Shared surface of `Fp2`, `Fp3` and `Fp4`.
macro_rules! impl_vector {
    ($name:ident, $len:literal, $($field:ident),+) => {
        impl $name {
            pub const ZERO: Self = Self { $($field: Fp::ZERO),+ };
            pub const ONE: Self = Self { $($field: Fp::ONE),+ };

            /// Same value in every component.
            #[inline]
            #[must_use]
            pub const fn splat(value: Fp) -> Self {
                Self { $($field: value),+ }
            }

            #[inline]
            #[must_use]
            pub const fn to_array(self) -> [Fp; $len] {
                [$(self.$field),+]
            }

            #[inline]
            #[must_use]
            pub const fn from_array(array: [Fp; $len]) -> Self {
                let [$($field),+] = array;
                Self { $($field),+ }
            }

            /// Copy the components into `array` starting at `index`.
            pub fn copy_to(&self, array: Option<&mut [Fp]>, index: isize) -> Result<()> {
                copy_components(&self.to_array(), array, index)
            }

            /// Raw little-endian words, the only valid input for state hashing.
            #[must_use]
            pub fn to_le_bytes(&self) -> [u8; $len * 8] {
                let mut buf = [0u8; $len * 8];
                for (chunk, component) in buf.chunks_exact_mut(8).zip(self.to_array()) {
                    chunk.copy_from_slice(&component.to_le_bytes());
                }
                buf
            }

            /// Inverse of [`to_le_bytes`](Self::to_le_bytes).
            #[must_use]
            pub fn from_le_bytes(bytes: [u8; $len * 8]) -> Self {
                let mut components = [Fp::ZERO; $len];
                for (component, chunk) in components.iter_mut().zip(bytes.chunks_exact(8)) {
                    let mut word = [0u8; 8];
                    word.copy_from_slice(chunk);
                    *component = Fp::from_le_bytes(word);
                }
                Self::from_array(components)
            }

            #[inline]
            #[must_use]
            #[track_caller]
            pub fn dot(self, rhs: Self) -> Fp {
                Fp::ZERO $(+ self.$field * rhs.$field)+
            }

            /// [`dot`](Self::dot) with the same rounding, reporting overflow.
            pub fn checked_dot(self, rhs: Self) -> Result<Fp> {
                let mut sum = Fp::ZERO;
                $(sum = sum.checked_add(self.$field.checked_mul(rhs.$field)?)?;)+
                Ok(sum)
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

            #[inline]
            #[must_use]
            #[track_caller]
            pub fn distance_squared(self, rhs: Self) -> Fp {
                (self - rhs).length_squared()
            }

            #[inline]
            #[must_use]
            #[track_caller]
            pub fn distance(self, rhs: Self) -> Fp {
                (self - rhs).length()
            }

            /// Unit vector in the same direction.
            ///
            /// Fails with `DivideByZero` when the length is zero, including
            /// vectors so short that their squared length rounds to zero.
            pub fn normalize(self) -> Result<Self> {
                let length = self.length();
                if length.is_zero() {
                    return Err(FpError::DivideByZero);
                }
                Ok(Self { $($field: self.$field.checked_div(length)?),+ })
            }

            /// Reflect about the plane with the given unit `normal`.
            #[inline]
            #[must_use]
            #[track_caller]
            pub fn reflect(self, normal: Self) -> Self {
                self - normal * (Fp::TWO * self.dot(normal))
            }

            /// Component-wise clamp, against `max` first and then `min`, so a
            /// component with `min > max` yields `min`.
            #[inline]
            #[must_use]
            pub fn clamp(self, min: Self, max: Self) -> Self {
                Self { $($field: self.$field.clamp(min.$field, max.$field)),+ }
            }

            #[inline]
            #[must_use]
            #[track_caller]
            pub fn lerp(self, to: Self, t: Fp) -> Self {
                Self { $($field: self.$field.lerp(to.$field, t)),+ }
            }

            #[inline]
            #[must_use]
            pub fn min(self, rhs: Self) -> Self {
                Self { $($field: Ord::min(self.$field, rhs.$field)),+ }
            }

            #[inline]
            #[must_use]
            pub fn max(self, rhs: Self) -> Self {
                Self { $($field: Ord::max(self.$field, rhs.$field)),+ }
            }

            #[inline]
            #[must_use]
            #[track_caller]
            pub fn abs(self) -> Self {
                Self { $($field: self.$field.abs()),+ }
            }

            /// Component-wise square root.
            pub fn square_root(self) -> Result<Self> {
                Ok(Self { $($field: self.$field.sqrt()?),+ })
            }
        }

        impl From<[Fp; $len]> for $name {
            #[inline]
            fn from(array: [Fp; $len]) -> Self {
                Self::from_array(array)
            }
        }

        impl From<$name> for [Fp; $len] {
            #[inline]
            fn from(v: $name) -> Self {
                v.to_array()
            }
        }

        impl std::ops::Add for $name {
            type Output = Self;
            #[track_caller]
            fn add(self, rhs: Self) -> Self {
                Self { $($field: self.$field + rhs.$field),+ }
            }
        }

        impl std::ops::Sub for $name {
            type Output = Self;
            #[track_caller]
            fn sub(self, rhs: Self) -> Self {
                Self { $($field: self.$field - rhs.$field),+ }
            }
        }

        impl std::ops::Neg for $name {
            type Output = Self;
            #[track_caller]
            fn neg(self) -> Self {
                Self { $($field: -self.$field),+ }
            }
        }

        impl std::ops::Mul for $name {
            type Output = Self;
            #[track_caller]
            fn mul(self, rhs: Self) -> Self {
                Self { $($field: self.$field * rhs.$field),+ }
            }
        }

        impl std::ops::Mul<Fp> for $name {
            type Output = Self;
            #[track_caller]
            fn mul(self, rhs: Fp) -> Self {
                Self { $($field: self.$field * rhs),+ }
            }
        }

        impl std::ops::Mul<$name> for Fp {
            type Output = $name;
            #[track_caller]
            fn mul(self, rhs: $name) -> $name {
                rhs * self
            }
        }

        impl std::ops::Div for $name {
            type Output = Self;
            #[track_caller]
            fn div(self, rhs: Self) -> Self {
                Self { $($field: self.$field / rhs.$field),+ }
            }
        }

        impl std::ops::Div<Fp> for $name {
            type Output = Self;
            #[track_caller]
            fn div(self, rhs: Fp) -> Self {
                Self { $($field: self.$field / rhs),+ }
            }
        }

        impl std::ops::AddAssign for $name {
            #[track_caller]
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl std::ops::SubAssign for $name {
            #[track_caller]
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl std::ops::MulAssign<Fp> for $name {
            #[track_caller]
            fn mul_assign(&mut self, rhs: Fp) {
                *self = *self * rhs;
            }
        }

        impl std::ops::DivAssign<Fp> for $name {
            #[track_caller]
            fn div_assign(&mut self, rhs: Fp) {
                *self = *self / rhs;
            }
        }

        /// Product order: `a <= b` when every component of `a` is `<=` the
        /// matching component of `b`. Vectors that are ahead on one axis and
        /// behind on another are unordered.
        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                use std::cmp::Ordering;
                let all_le = true $(&& self.$field <= other.$field)+;
                let all_ge = true $(&& self.$field >= other.$field)+;
                match (all_le, all_ge) {
                    (true, true) => Some(Ordering::Equal),
                    (true, false) => Some(Ordering::Less),
                    (false, true) => Some(Ordering::Greater),
                    (false, false) => None,
                }
            }
        }
    };
}

mod vec2;
mod vec3;
mod vec4;

pub use vec2::Fp2;
pub use vec3::Fp3;
pub use vec4::Fp4;
