//! Limb kernels.
//!
//! Everything here works on little-endian `u32` limbs in base [`RADIX`].
//! Routines that take `&mut Vec<u32>` leave the vector normalized: no
//! most-significant zero limb, and zero is exactly `[0]`.

use alloc::vec;
use alloc::vec::Vec;
use core::cmp::Ordering;

use tracing::trace;

/// The limb base: 10^9.
pub const RADIX: u32 = 1_000_000_000;

/// Decimal digits held by one limb.
pub const LIMB_DIGITS: usize = 9;

const RADIX_U64: u64 = RADIX as u64;

// ============================================================================
// Representation & Normalization
// ============================================================================

/// Strips most-significant zero limbs, keeping a single `0` for zero.
#[inline]
pub(crate) fn normalize(limbs: &mut Vec<u32>) {
    while limbs.len() > 1 && limbs.last() == Some(&0) {
        limbs.pop();
    }
    if limbs.is_empty() {
        limbs.push(0);
    }
}

/// Splits a machine integer into limbs. Zero yields `[0]`.
pub(crate) fn from_u128(mut value: u128) -> Vec<u32> {
    let mut limbs = Vec::with_capacity(5);
    loop {
        limbs.push((value % RADIX as u128) as u32);
        value /= RADIX as u128;
        if value == 0 {
            return limbs;
        }
    }
}

/// Number of limbs up to and including the most significant non-zero one.
#[inline]
fn significant_len(limbs: &[u32]) -> usize {
    limbs.iter().rposition(|&limb| limb != 0).map_or(0, |i| i + 1)
}

// ============================================================================
// Comparator
// ============================================================================

/// Total order over two limb sequences, tolerating unnormalized input.
///
/// Any non-zero limb in the part of the longer operand that the shorter one
/// lacks decides the order. Otherwise the aligned limbs are compared from the
/// most significant end down.
pub(crate) fn cmp(a: &[u32], b: &[u32]) -> Ordering {
    let (longer, shorter, swapped) = if a.len() >= b.len() {
        (a, b, false)
    } else {
        (b, a, true)
    };

    let (low, extra) = longer.split_at(shorter.len());
    let order = if extra.iter().rev().any(|&limb| limb != 0) {
        Ordering::Greater
    } else {
        low.iter()
            .rev()
            .zip(shorter.iter().rev())
            .map(|(x, y)| x.cmp(y))
            .find(|order| order.is_ne())
            .unwrap_or(Ordering::Equal)
    };

    if swapped {
        order.reverse()
    } else {
        order
    }
}

// ============================================================================
// Additive Core
// ============================================================================

/// Outcome of [`sub_assign`].
///
/// When `underflowed` is set the subtrahend was larger, and the limbs hold the
/// magnitude of the (negative) difference instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub(crate) struct Borrow {
    pub underflowed: bool,
}

#[inline(always)]
const fn add_limb(x: u32, y: u32, carry: bool) -> (u32, bool) {
    // x + y + 1 < 2 * RADIX < u32::MAX
    let sum = x + y + carry as u32;
    if sum >= RADIX {
        (sum - RADIX, true)
    } else {
        (sum, false)
    }
}

#[inline(always)]
const fn sub_limb(x: u32, y: u32, borrow: bool) -> (u32, bool) {
    let subtrahend = y + borrow as u32;
    if x >= subtrahend {
        (x - subtrahend, false)
    } else {
        (x + RADIX - subtrahend, true)
    }
}

/// `a += b`.
#[inline]
pub(crate) fn add_assign(a: &mut Vec<u32>, b: &[u32]) {
    add_assign_at(a, b, 0);
}

/// `a += b * RADIX^offset`.
pub(crate) fn add_assign_at(a: &mut Vec<u32>, b: &[u32], offset: usize) {
    if a.len() < offset + b.len() {
        a.resize(offset + b.len(), 0);
    }

    let mut carry = false;
    for (x, &y) in a[offset..].iter_mut().zip(b) {
        (*x, carry) = add_limb(*x, y, carry);
    }

    // b is exhausted; keep rippling only while there is a carry
    let mut i = offset + b.len();
    while carry && i < a.len() {
        (a[i], carry) = add_limb(a[i], 0, true);
        i += 1;
    }
    if carry {
        a.push(1);
    }

    normalize(a);
}

/// `a -= b`, reporting whether the subtraction underflowed.
#[inline]
pub(crate) fn sub_assign(a: &mut Vec<u32>, b: &[u32]) -> Borrow {
    sub_assign_at(a, b, 0)
}

/// `a -= b * RADIX^offset`.
///
/// On underflow `a` is replaced with `b * RADIX^offset - a` and the returned
/// [`Borrow`] is flagged.
pub(crate) fn sub_assign_at(a: &mut Vec<u32>, b: &[u32], offset: usize) -> Borrow {
    if a.len() < offset + b.len() {
        a.resize(offset + b.len(), 0);
    }

    let mut borrow = false;
    for (x, &y) in a[offset..].iter_mut().zip(b) {
        (*x, borrow) = sub_limb(*x, y, borrow);
    }

    let mut i = offset + b.len();
    while borrow && i < a.len() {
        (a[i], borrow) = sub_limb(a[i], 0, true);
        i += 1;
    }

    if borrow {
        // a now holds RADIX^len + a - b; flip it to b - a
        let mut inner = false;
        for limb in a.iter_mut() {
            (*limb, inner) = sub_limb(0, *limb, inner);
        }
    }

    normalize(a);
    Borrow {
        underflowed: borrow,
    }
}

// ============================================================================
// Multiplicative Core
// ============================================================================

/// `a *= k` for a single machine word `k`.
pub(crate) fn mul_limb_assign(a: &mut Vec<u32>, k: u32) {
    let k = u64::from(k);
    let mut carry = 0u64;
    for limb in a.iter_mut() {
        // < RADIX * 2^32 + 2^32, well inside u64
        carry = carry / RADIX_U64 + u64::from(*limb) * k;
        *limb = (carry % RADIX_U64) as u32;
    }

    carry /= RADIX_U64;
    while carry != 0 {
        a.push((carry % RADIX_U64) as u32);
        carry /= RADIX_U64;
    }

    normalize(a);
}

/// Schoolbook product: one scaled copy of `a` per limb of `b`, summed in at
/// that limb's offset.
pub(crate) fn mul(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut product = Vec::with_capacity(a.len() + b.len());
    product.push(0);

    let mut partial = Vec::with_capacity(a.len() + 1);
    for (offset, &digit) in b.iter().enumerate() {
        if digit == 0 {
            continue;
        }
        partial.clear();
        partial.extend_from_slice(a);
        mul_limb_assign(&mut partial, digit);
        add_assign_at(&mut product, &partial, offset);
    }

    product
}

// ============================================================================
// Divisive Core
// ============================================================================

/// `a /= d`, returning `a % d`.
///
/// # Panics
/// Panics if `d` is zero.
pub(crate) fn div_rem_limb_assign(a: &mut Vec<u32>, d: u32) -> u32 {
    assert!(d != 0, "attempt to divide by zero");

    let d = u64::from(d);
    let mut rem = 0u64;
    for limb in a.iter_mut().rev() {
        let cur = rem * RADIX_U64 + u64::from(*limb);
        *limb = (cur / d) as u32;
        rem = cur % d;
    }

    normalize(a);
    rem as u32
}

/// Long division. Leaves `a % b` in `a` and returns `a / b`.
///
/// Each round estimates one quotient limb from the top two limbs of the
/// running remainder against the top two limbs of `b` rounded up, so the
/// estimate never exceeds the true digit and the trial subtraction cannot
/// underflow. Rounds repeat until the remainder drops below `b`.
///
/// # Panics
/// Panics if `b` is zero.
pub(crate) fn div_rem(a: &mut Vec<u32>, b: &[u32]) -> Vec<u32> {
    let m = significant_len(b);
    assert!(m != 0, "attempt to divide by zero");
    normalize(a);

    if m == 1 {
        let mut quotient = core::mem::take(a);
        let rem = div_rem_limb_assign(&mut quotient, b[0]);
        a.push(rem);
        return quotient;
    }

    let b = &b[..m];
    let _span = tracing::trace_span!("div_rem", dividend_limbs = a.len(), divisor_limbs = m)
        .entered();

    let top = u64::from(b[m - 1]);
    let den0 = top * RADIX_U64 + u64::from(b[m - 2]) + 1;

    let mut quotient = vec![0];
    let mut trial = Vec::with_capacity(m + 1);

    // invariant: quotient * b + a == original a
    while cmp(a, b) != Ordering::Less {
        let n = a.len();
        let num0 = u64::from(a[n - 1]) * RADIX_U64 + u64::from(a[n - 2]);

        let (z, offset) = match num0 / den0 {
            0 if n == m => {
                // same length and a >= b, so the digit is at least one
                trace!(num0, den0, "two-limb probe gave zero on equal lengths, using 1");
                (1, 0)
            }
            0 => {
                let z = num0 / (top + 1);
                trace!(num0, z, "two-limb probe gave zero, retrying one limb lower");
                (z, n - m - 1)
            }
            z => (z, n - m),
        };

        // z < RADIX in every branch
        let z = z as u32;
        add_assign_at(&mut quotient, &[z], offset);

        trial.clear();
        trial.extend_from_slice(b);
        mul_limb_assign(&mut trial, z);
        let borrow = sub_assign_at(a, &trial, offset);
        debug_assert!(!borrow.underflowed, "quotient digit overestimated");
    }

    quotient
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        let mut limbs = vec![5, 0, 0];
        normalize(&mut limbs);
        assert_eq!(limbs, vec![5]);

        let mut limbs = vec![0, 0];
        normalize(&mut limbs);
        assert_eq!(limbs, vec![0]);

        let mut limbs = vec![];
        normalize(&mut limbs);
        assert_eq!(limbs, vec![0]);
    }

    #[test]
    fn test_from_u128() {
        assert_eq!(from_u128(0), vec![0]);
        assert_eq!(from_u128(999_999_999), vec![999_999_999]);
        assert_eq!(from_u128(1_000_000_000), vec![0, 1]);
        assert_eq!(
            from_u128(u128::MAX),
            vec![768_211_455, 374_607_431, 938_463_463, 282_366_920, 340]
        );
    }

    #[test]
    fn test_cmp_ignores_high_zero_limbs() {
        assert_eq!(cmp(&[7, 0, 0], &[7]), Ordering::Equal);
        assert_eq!(cmp(&[7], &[7, 0, 0]), Ordering::Equal);
        assert_eq!(cmp(&[0, 0, 1], &[999_999_999, 999_999_999]), Ordering::Greater);
        assert_eq!(cmp(&[999_999_999, 999_999_999], &[0, 0, 1]), Ordering::Less);
    }

    #[test]
    fn test_cmp_most_significant_first() {
        // little-endian lexicographic order would get both of these wrong
        assert_eq!(cmp(&[1, 2], &[2, 1]), Ordering::Greater);
        assert_eq!(cmp(&[9, 1], &[0, 2]), Ordering::Less);
        assert_eq!(cmp(&[], &[0]), Ordering::Equal);
    }

    #[test]
    fn test_add_carry_boundary() {
        let mut a = vec![RADIX - 1];
        add_assign(&mut a, &[1]);
        assert_eq!(a, vec![0, 1]);
    }

    #[test]
    fn test_add_carry_ripples_through_longer_operand() {
        let mut a = vec![RADIX - 1, RADIX - 1, RADIX - 1];
        add_assign(&mut a, &[1]);
        assert_eq!(a, vec![0, 0, 0, 1]);

        let mut a = vec![1];
        add_assign(&mut a, &[RADIX - 1, RADIX - 1]);
        assert_eq!(a, vec![0, 0, 1]);
    }

    #[test]
    fn test_add_at_offset() {
        let mut a = vec![0];
        add_assign_at(&mut a, &[3], 2);
        assert_eq!(a, vec![0, 0, 3]);

        let mut a = vec![0];
        add_assign_at(&mut a, &[0], 4);
        assert_eq!(a, vec![0]);
    }

    #[test]
    fn test_sub_borrow() {
        let mut a = vec![0, 1];
        let borrow = sub_assign(&mut a, &[1]);
        assert!(!borrow.underflowed);
        assert_eq!(a, vec![RADIX - 1]);

        let mut a = vec![5, 5];
        let borrow = sub_assign(&mut a, &[5, 5]);
        assert!(!borrow.underflowed);
        assert_eq!(a, vec![0]);
    }

    #[test]
    fn test_sub_underflow_reports_magnitude() {
        // 3 - 1_000_000_005 = -1_000_000_002
        let mut a = vec![3];
        let borrow = sub_assign(&mut a, &[5, 1]);
        assert!(borrow.underflowed);
        assert_eq!(a, vec![2, 1]);

        let mut a = vec![0, 7];
        let borrow = sub_assign_at(&mut a, &[1], 2);
        assert!(borrow.underflowed);
        assert_eq!(a, vec![0, RADIX - 7]);
    }

    #[test]
    fn test_mul_limb() {
        let mut a = vec![999_999_999, 999_999_999];
        mul_limb_assign(&mut a, 2);
        assert_eq!(a, vec![999_999_998, 999_999_999, 1]);

        let mut a = vec![123, 456];
        mul_limb_assign(&mut a, 0);
        assert_eq!(a, vec![0]);

        let mut a = vec![RADIX - 1];
        mul_limb_assign(&mut a, u32::MAX);
        // (10^9 - 1) * (2^32 - 1) = 4_294_967_290_705_032_705
        assert_eq!(a, vec![705_032_705, 294_967_290, 4]);
    }

    #[test]
    fn test_mul_schoolbook() {
        assert_eq!(mul(&[RADIX - 1], &[RADIX - 1]), vec![1, RADIX - 2]);
        assert_eq!(mul(&[0], &[5, 6]), vec![0]);
        assert_eq!(mul(&[5, 6], &[0, 1]), vec![0, 5, 6]);
    }

    #[test]
    fn test_div_rem_limb() {
        let mut a = vec![0, 0, 1]; // 10^18
        let rem = div_rem_limb_assign(&mut a, 999_999_999);
        assert_eq!(a, vec![1, 1]);
        assert_eq!(rem, 1);

        let mut a = vec![0];
        assert_eq!(div_rem_limb_assign(&mut a, 7), 0);
        assert_eq!(a, vec![0]);
    }

    #[test]
    #[should_panic(expected = "attempt to divide by zero")]
    fn test_div_rem_limb_by_zero() {
        let mut a = vec![1];
        let _ = div_rem_limb_assign(&mut a, 0);
    }

    #[test]
    #[should_panic(expected = "attempt to divide by zero")]
    fn test_div_rem_by_zero_limbs() {
        let mut a = vec![1];
        let _ = div_rem(&mut a, &[0, 0]);
    }

    #[test]
    fn test_div_rem_single_limb_divisor_with_zero_padding() {
        let mut a = vec![0, 0, 1];
        let q = div_rem(&mut a, &[999_999_999, 0, 0]);
        assert_eq!(q, vec![1, 1]);
        assert_eq!(a, vec![1]);
    }

    #[test]
    fn test_div_rem_equal_length_forced_digit() {
        // top two limbs agree, so num0 / den0 == 0 with n == m
        let divisor = [5, 7, 9];
        let mut a = vec![6, 7, 9];
        let q = div_rem(&mut a, &divisor);
        assert_eq!(q, vec![1]);
        assert_eq!(a, vec![1]);
    }

    #[test]
    fn test_div_rem_one_limb_lower_retry() {
        // dividend's top two limbs are below the divisor's, one limb longer
        let divisor = [0, 0, 999_999_999];
        let mut a = vec![0, 0, 0, 999_999_998];
        let q = div_rem(&mut a, &divisor);
        assert_eq!(q, vec![999_999_998]);
        assert_eq!(a, vec![0, 0, 999_999_998]);
    }

    #[test]
    fn test_div_rem_dividend_smaller() {
        let mut a = vec![4, 1];
        let q = div_rem(&mut a, &[0, 2]);
        assert_eq!(q, vec![0]);
        assert_eq!(a, vec![4, 1]);
    }
}
