use alloc::vec::Vec;
use core::cmp::Ordering;
use core::iter::{Product, Sum};
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Rem, RemAssign, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::limb::{self, RADIX};
use crate::NatError;

/// Arbitrary-precision non-negative integer.
///
/// Stored as little-endian limbs in base 10^9. The limbs are always
/// normalized: no most-significant zero limb, and zero is the single limb `0`.
/// Because of that, derived equality and hashing agree with numeric equality.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Nat {
    limbs: Vec<u32>,
}

// ============================================================================
// Constants
// ============================================================================

impl Nat {
    /// Zero
    #[inline]
    pub fn zero() -> Self {
        Self { limbs: alloc::vec![0] }
    }

    /// One
    #[inline]
    pub fn one() -> Self {
        Self { limbs: alloc::vec![1] }
    }
}

impl Default for Nat {
    fn default() -> Self {
        Self::zero()
    }
}

// ============================================================================
// Constructors and Raw Access
// ============================================================================

impl Nat {
    /// Creates a Nat from a u64.
    #[inline]
    pub fn from_u64(value: u64) -> Self {
        Self::from_u128(u128::from(value))
    }

    /// Creates a Nat from a u128.
    #[inline]
    pub fn from_u128(value: u128) -> Self {
        Self {
            limbs: limb::from_u128(value),
        }
    }

    /// Creates a Nat from little-endian base 10^9 limbs.
    ///
    /// Most-significant zero limbs are dropped and an empty vector is zero.
    ///
    /// # Errors
    /// Returns `NatError::LimbOutOfRange` if any limb is 10^9 or larger.
    pub fn from_limbs(mut limbs: Vec<u32>) -> crate::Result<Self> {
        if limbs.iter().any(|&l| l >= RADIX) {
            return Err(NatError::LimbOutOfRange);
        }
        limb::normalize(&mut limbs);
        Ok(Self { limbs })
    }

    /// Returns the little-endian limbs.
    #[inline(always)]
    pub fn limbs(&self) -> &[u32] {
        &self.limbs
    }

    /// Consumes the value, returning its little-endian limbs.
    #[inline(always)]
    pub fn into_limbs(self) -> Vec<u32> {
        self.limbs
    }

    /// Number of limbs. Zero has one.
    #[inline(always)]
    pub fn limb_len(&self) -> usize {
        self.limbs.len()
    }

    #[inline(always)]
    pub fn is_zero(&self) -> bool {
        self.limbs == [0]
    }

    #[inline(always)]
    pub fn is_one(&self) -> bool {
        self.limbs == [1]
    }
}

// ============================================================================
// Integer Conversions
// ============================================================================

impl Nat {
    /// Converts to u128, or `None` if the value does not fit.
    pub fn to_u128(&self) -> Option<u128> {
        self.limbs.iter().rev().try_fold(0u128, |acc, &l| {
            acc.checked_mul(u128::from(RADIX))?
                .checked_add(u128::from(l))
        })
    }

    /// Converts to u64, or `None` if the value does not fit.
    pub fn to_u64(&self) -> Option<u64> {
        self.to_u128().and_then(|v| u64::try_from(v).ok())
    }
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Nat {
                #[inline]
                fn from(value: $t) -> Self {
                    Self::from_u128(value as u128)
                }
            }
        )*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);

impl TryFrom<&Nat> for u64 {
    type Error = NatError;

    fn try_from(value: &Nat) -> crate::Result<Self> {
        value.to_u64().ok_or(NatError::Overflow)
    }
}

impl TryFrom<&Nat> for u128 {
    type Error = NatError;

    fn try_from(value: &Nat) -> crate::Result<Self> {
        value.to_u128().ok_or(NatError::Overflow)
    }
}

// ============================================================================
// Comparison
// ============================================================================

impl Ord for Nat {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        limb::cmp(&self.limbs, &other.limbs)
    }
}

impl PartialOrd for Nat {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================================
// Arithmetic Operations - Subtraction
// ============================================================================

impl Nat {
    /// Checked subtraction. Returns `None` if `rhs > self`.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn checked_sub(&self, rhs: &Self) -> Option<Self> {
        let mut limbs = self.limbs.clone();
        if limb::sub_assign(&mut limbs, &rhs.limbs).underflowed {
            None
        } else {
            Some(Self { limbs })
        }
    }

    /// Saturating subtraction. Clamps at zero.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn saturating_sub(&self, rhs: &Self) -> Self {
        self.checked_sub(rhs).unwrap_or_default()
    }

    /// Checked subtraction. Returns an error if `rhs > self`.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn try_sub(&self, rhs: &Self) -> crate::Result<Self> {
        self.checked_sub(rhs).ok_or(NatError::Underflow)
    }
}

// ============================================================================
// Arithmetic Operations - Multiplication
// ============================================================================

impl Nat {
    /// Multiplies by a single machine word.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn mul_limb(&self, rhs: u32) -> Self {
        let mut limbs = self.limbs.clone();
        limb::mul_limb_assign(&mut limbs, rhs);
        Self { limbs }
    }

    /// Raises to the power `exp` by repeated squaring.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn pow(&self, mut exp: u32) -> Self {
        let mut base = self.clone();
        let mut result = Self::one();
        while exp > 0 {
            if exp & 1 == 1 {
                result *= &base;
            }
            exp >>= 1;
            if exp > 0 {
                base = &base * &base;
            }
        }
        result
    }
}

// ============================================================================
// Arithmetic Operations - Division
// ============================================================================

impl Nat {
    /// Quotient and remainder in one pass.
    ///
    /// # Errors
    /// Returns `NatError::DivisionByZero` if `rhs` is zero.
    pub fn div_rem(&self, rhs: &Self) -> crate::Result<(Self, Self)> {
        if rhs.is_zero() {
            return Err(NatError::DivisionByZero);
        }
        let mut rem = self.limbs.clone();
        let quotient = limb::div_rem(&mut rem, &rhs.limbs);
        Ok((Self { limbs: quotient }, Self { limbs: rem }))
    }

    /// Quotient and remainder by a single machine word.
    ///
    /// # Errors
    /// Returns `NatError::DivisionByZero` if `rhs` is zero.
    pub fn div_rem_limb(&self, rhs: u32) -> crate::Result<(Self, u32)> {
        if rhs == 0 {
            return Err(NatError::DivisionByZero);
        }
        let mut limbs = self.limbs.clone();
        let rem = limb::div_rem_limb_assign(&mut limbs, rhs);
        Ok((Self { limbs }, rem))
    }

    /// Checked division. Returns `None` if `rhs` is zero.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn checked_div(&self, rhs: &Self) -> Option<Self> {
        self.div_rem(rhs).ok().map(|(q, _)| q)
    }

    /// Checked remainder. Returns `None` if `rhs` is zero.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn checked_rem(&self, rhs: &Self) -> Option<Self> {
        self.div_rem(rhs).ok().map(|(_, r)| r)
    }

    /// Checked division. Returns an error if `rhs` is zero.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn try_div(&self, rhs: &Self) -> crate::Result<Self> {
        self.div_rem(rhs).map(|(q, _)| q)
    }

    /// Checked remainder. Returns an error if `rhs` is zero.
    #[must_use = "this returns the result of the operation, without modifying the original"]
    pub fn try_rem(&self, rhs: &Self) -> crate::Result<Self> {
        self.div_rem(rhs).map(|(_, r)| r)
    }
}

// ============================================================================
// Operator Overloading
// ============================================================================

impl AddAssign<&Nat> for Nat {
    #[inline]
    fn add_assign(&mut self, rhs: &Nat) {
        limb::add_assign(&mut self.limbs, &rhs.limbs);
    }
}

impl SubAssign<&Nat> for Nat {
    /// # Panics
    /// Panics if `rhs > self`.
    #[inline]
    fn sub_assign(&mut self, rhs: &Nat) {
        assert!(*self >= *rhs, "attempt to subtract with overflow");
        let borrow = limb::sub_assign(&mut self.limbs, &rhs.limbs);
        debug_assert!(!borrow.underflowed);
    }
}

impl MulAssign<&Nat> for Nat {
    #[inline]
    fn mul_assign(&mut self, rhs: &Nat) {
        self.limbs = limb::mul(&self.limbs, &rhs.limbs);
    }
}

impl DivAssign<&Nat> for Nat {
    /// # Panics
    /// Panics if `rhs` is zero.
    #[inline]
    fn div_assign(&mut self, rhs: &Nat) {
        assert!(!rhs.is_zero(), "attempt to divide by zero");
        self.limbs = limb::div_rem(&mut self.limbs, &rhs.limbs);
    }
}

impl RemAssign<&Nat> for Nat {
    /// # Panics
    /// Panics if `rhs` is zero.
    #[inline]
    fn rem_assign(&mut self, rhs: &Nat) {
        assert!(
            !rhs.is_zero(),
            "attempt to calculate the remainder with a divisor of zero"
        );
        let _ = limb::div_rem(&mut self.limbs, &rhs.limbs);
    }
}

/// Derives the by-value and by-reference operator forms from the
/// `XxxAssign<&Nat>` implementation.
macro_rules! forward_binop {
    ($imp:ident, $method:ident, $imp_assign:ident, $method_assign:ident) => {
        impl $imp_assign<Nat> for Nat {
            #[inline]
            fn $method_assign(&mut self, rhs: Nat) {
                $imp_assign::$method_assign(self, &rhs);
            }
        }

        impl $imp<&Nat> for Nat {
            type Output = Nat;

            #[inline]
            fn $method(mut self, rhs: &Nat) -> Nat {
                $imp_assign::$method_assign(&mut self, rhs);
                self
            }
        }

        impl $imp<Nat> for Nat {
            type Output = Nat;

            #[inline]
            fn $method(mut self, rhs: Nat) -> Nat {
                $imp_assign::$method_assign(&mut self, &rhs);
                self
            }
        }

        impl $imp<&Nat> for &Nat {
            type Output = Nat;

            #[inline]
            fn $method(self, rhs: &Nat) -> Nat {
                $imp::$method(self.clone(), rhs)
            }
        }

        impl $imp<Nat> for &Nat {
            type Output = Nat;

            #[inline]
            fn $method(self, rhs: Nat) -> Nat {
                $imp::$method(self.clone(), &rhs)
            }
        }
    };
}

forward_binop!(Add, add, AddAssign, add_assign);
forward_binop!(Sub, sub, SubAssign, sub_assign);
forward_binop!(Mul, mul, MulAssign, mul_assign);
forward_binop!(Div, div, DivAssign, div_assign);
forward_binop!(Rem, rem, RemAssign, rem_assign);

// ===== Single-limb operands =====

impl MulAssign<u32> for Nat {
    #[inline]
    fn mul_assign(&mut self, rhs: u32) {
        limb::mul_limb_assign(&mut self.limbs, rhs);
    }
}

impl Mul<u32> for Nat {
    type Output = Nat;

    #[inline]
    fn mul(mut self, rhs: u32) -> Nat {
        self *= rhs;
        self
    }
}

impl Mul<u32> for &Nat {
    type Output = Nat;

    #[inline]
    fn mul(self, rhs: u32) -> Nat {
        self.mul_limb(rhs)
    }
}

impl DivAssign<u32> for Nat {
    /// # Panics
    /// Panics if `rhs` is zero.
    #[inline]
    fn div_assign(&mut self, rhs: u32) {
        let _ = limb::div_rem_limb_assign(&mut self.limbs, rhs);
    }
}

impl Div<u32> for Nat {
    type Output = Nat;

    #[inline]
    fn div(mut self, rhs: u32) -> Nat {
        self /= rhs;
        self
    }
}

impl Div<u32> for &Nat {
    type Output = Nat;

    #[inline]
    fn div(self, rhs: u32) -> Nat {
        self.clone() / rhs
    }
}

impl Rem<u32> for &Nat {
    type Output = u32;

    /// # Panics
    /// Panics if `rhs` is zero.
    #[inline]
    fn rem(self, rhs: u32) -> u32 {
        assert!(
            rhs != 0,
            "attempt to calculate the remainder with a divisor of zero"
        );
        // remainder only, so skip the quotient allocation
        let rhs = u64::from(rhs);
        self.limbs.iter().rev().fold(0u64, |rem, &l| {
            (rem * u64::from(RADIX) + u64::from(l)) % rhs
        }) as u32
    }
}

impl Rem<u32> for Nat {
    type Output = u32;

    #[inline]
    fn rem(self, rhs: u32) -> u32 {
        &self % rhs
    }
}

// ============================================================================
// Iterator Trait Implementations
// ============================================================================

impl Sum for Nat {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Nat> for Nat {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc + x)
    }
}

impl Product for Nat {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::one(), |acc, x| acc * x)
    }
}

impl<'a> Product<&'a Nat> for Nat {
    fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Self::one(), |acc, x| acc * x)
    }
}

// ============================================================================
// Serde Support
// ============================================================================

#[cfg(feature = "serde")]
impl Serialize for Nat {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            // JSON, TOML, etc. - decimal string
            serializer.collect_str(self)
        } else {
            // Bincode, MessagePack, etc. - raw limbs
            self.limbs.serialize(serializer)
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Nat {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let s = alloc::string::String::deserialize(deserializer)?;
            Self::parse(&s).map_err(de::Error::custom)
        } else {
            let limbs = Vec::<u32>::deserialize(deserializer)?;
            Self::from_limbs(limbs).map_err(de::Error::custom)
        }
    }
}


#[cfg(test)]
mod comparison_tests {
    use super::*;

    #[test]
    fn test_ordering() {
        let small = Nat::from_u64(999_999_999);
        let big = Nat::from_u64(1_000_000_000);
        assert!(small < big);
        assert!(big > small);
        assert_eq!(small.cmp(&small), Ordering::Equal);
    }

    #[test]
    fn test_ordering_within_equal_length() {
        // low limb larger but high limb smaller
        let a = Nat::from_limbs(alloc::vec![999_999_999, 1]).unwrap();
        let b = Nat::from_limbs(alloc::vec![0, 2]).unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_max_min() {
        let a = Nat::from_u64(5);
        let b = Nat::from_u64(9);
        assert_eq!(a.clone().max(b.clone()), b);
        assert_eq!(a.clone().min(b), a);
    }
}
