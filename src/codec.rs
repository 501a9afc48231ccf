//! Decimal text codec.
//!
//! Limbs hold exactly nine decimal digits, so the digit string is cut into
//! 9-digit groups from the right and each group becomes one limb.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write};
use core::str::{FromStr, SplitAsciiWhitespace};

use tracing::debug;

use crate::limb::{self, LIMB_DIGITS};
use crate::{Nat, NatError};

/// Parses an ASCII numeral, ignoring surrounding ASCII whitespace.
fn parse_limbs(bytes: &[u8]) -> crate::Result<Vec<u32>> {
    let digits = bytes.trim_ascii();

    if digits.is_empty() {
        debug!("rejecting numeral with no digits");
        return Err(NatError::Empty);
    }

    for (index, &byte) in digits.iter().enumerate() {
        if byte.wrapping_sub(b'0') > 9 {
            debug!(index, byte, "rejecting numeral with non-digit byte");
            return Err(NatError::InvalidDigit { index });
        }
    }

    let mut limbs = Vec::with_capacity(digits.len().div_ceil(LIMB_DIGITS));
    for group in digits.rchunks(LIMB_DIGITS) {
        let value = group
            .iter()
            .fold(0u32, |acc, &byte| acc * 10 + u32::from(byte - b'0'));
        limbs.push(value);
    }

    limb::normalize(&mut limbs);
    Ok(limbs)
}

// ============================================================================
// String Parsing
// ============================================================================

impl Nat {
    /// Parses a decimal numeral.
    ///
    /// Surrounding ASCII whitespace is ignored and leading zeros are accepted
    /// (`"007"` is 7). Signs, separators, and other radices are not.
    ///
    /// # Errors
    /// Returns `NatError::Empty` if no digits remain after trimming.
    /// Returns `NatError::InvalidDigit` at the first non-digit byte, counted
    /// from the start of the trimmed numeral.
    pub fn parse(s: &str) -> crate::Result<Self> {
        Self::from_utf8_bytes(s.as_bytes())
    }

    /// Parses a decimal numeral from raw bytes (useful for binary protocols).
    pub fn from_utf8_bytes(bytes: &[u8]) -> crate::Result<Self> {
        let limbs = parse_limbs(bytes)?;
        // parse_limbs only emits limbs below RADIX
        Self::from_limbs(limbs)
    }
}

impl FromStr for Nat {
    type Err = NatError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ============================================================================
// Token Reader
// ============================================================================

/// Iterator over the whitespace-separated numerals of a text.
///
/// Created by [`tokens`]. Each item is parsed independently, so one bad
/// token does not stop the ones after it.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    inner: SplitAsciiWhitespace<'a>,
}

/// Splits `input` on ASCII whitespace and parses each piece as a [`Nat`].
///
/// ```rust
/// let values: Vec<decnat::Nat> = decnat::tokens("12 007\n1000000000")
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(values[1].to_string(), "7");
/// assert_eq!(values[2].limbs(), &[0, 1]);
/// ```
pub fn tokens(input: &str) -> Tokens<'_> {
    Tokens {
        inner: input.split_ascii_whitespace(),
    }
}

impl Iterator for Tokens<'_> {
    type Item = crate::Result<Nat>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Nat::parse)
    }
}

// ============================================================================
// Formatting
// ============================================================================

impl fmt::Display for Nat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let limbs = self.limbs();

        // Fast path for single-limb values
        if let [only] = limbs {
            return fmt::Display::fmt(only, f);
        }

        let mut buffer = String::with_capacity(limbs.len() * LIMB_DIGITS);
        let mut iter = limbs.iter().rev();
        if let Some(top) = iter.next() {
            write!(buffer, "{}", top)?;
        }
        for limb in iter {
            write!(buffer, "{:09}", limb)?;
        }

        f.pad_integral(true, "", &buffer)
    }
}

impl fmt::Debug for Nat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            // {:#?} shows raw limbs
            f.debug_struct("Nat").field("limbs", &self.limbs()).finish()
        } else {
            write!(f, "Nat({})", self)
        }
    }
}



#[cfg(test)]
mod display_tests {
    use std::format;
    use std::string::ToString;

    use super::*;

    #[test]
    fn test_display_zero() {
        assert_eq!(Nat::zero().to_string(), "0");
        assert_eq!((Nat::zero() + Nat::zero()).to_string(), "0");
    }

    #[test]
    fn test_display_pads_inner_limbs() {
        let n = Nat::from_limbs(alloc::vec![7, 0, 42]).unwrap();
        assert_eq!(n.to_string(), "42000000000000000007");
    }

    #[test]
    fn test_display_top_limb_unpadded() {
        assert_eq!(Nat::from_u64(1_000_000_000).to_string(), "1000000000");
        assert_eq!(Nat::from_u64(u64::MAX).to_string(), "18446744073709551615");
    }

    #[test]
    fn test_display_product_scenario() {
        let a: Nat = "999999999999999999".parse().unwrap();
        let b: Nat = "2".parse().unwrap();
        assert_eq!((a * b).to_string(), "1999999999999999998");
    }

    #[test]
    fn test_display_width() {
        let n = Nat::from_u64(1_000_000_000);
        assert_eq!(format!("{:>12}", n), "  1000000000");
        assert_eq!(format!("{:012}", n), "001000000000");
        assert_eq!(format!("{:<4}|", Nat::from_u64(7)), "7   |");
    }

    #[test]
    fn test_debug() {
        let n = Nat::from_u64(1_000_000_005);
        assert_eq!(format!("{:?}", n), "Nat(1000000005)");
        assert!(format!("{:#?}", n).contains("limbs"));
    }
}
