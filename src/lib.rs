//! Arbitrary-precision unsigned integers in base 10^9
//!
//! This library provides [`Nat`], a non-negative integer of unbounded
//! magnitude stored as little-endian limbs of nine decimal digits each:
//!
//! - **Limb radix**: 10^9, so every limb fits a `u32` and every
//!   limb-by-limb product plus carry fits a `u64`
//! - **Decimal I/O**: limbs line up with 9-digit groups, so parsing and
//!   printing never need a base conversion
//!
//! ## Features
//!
//! - **Schoolbook arithmetic**: add, subtract, multiply, and long division
//!   with quotient-digit estimation
//! - **Checked and panicking variants**: `try_*`/`checked_*` return errors
//!   where the operators panic, matching the primitive integer types
//! - **no_std compatible**: needs only `alloc`
//! - **Serde support**: decimal strings for human-readable formats, raw
//!   limbs for binary formats (feature `serde`)
//!
//! ## Example
//!
//! ```rust
//! use decnat::Nat;
//!
//! let a: Nat = "1000000000000000000".parse().unwrap();
//! let b: Nat = "999999999".parse().unwrap();
//!
//! let (q, r) = a.div_rem(&b).unwrap();
//! assert_eq!(q.to_string(), "1000000001");
//! assert_eq!(r.to_string(), "1");
//! assert_eq!(&q * &b + &r, a);
//! ```

#![no_std]
#![cfg_attr(test, allow(unused_imports))]

#[cfg(test)]
extern crate std;

extern crate alloc;

mod codec;
mod limb;
mod nat;

pub use codec::{tokens, Tokens};
pub use limb::{LIMB_DIGITS, RADIX};
pub use nat::Nat;

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NatError {
    #[error("underflow: subtrahend is larger than minuend")]
    Underflow,

    #[error("overflow: value too large for the target type")]
    Overflow,

    #[error("division by zero")]
    DivisionByZero,

    #[error("empty numeral")]
    Empty,

    #[error("invalid digit at byte {index}")]
    InvalidDigit { index: usize },

    #[error("limb out of range: every limb must be below 10^9")]
    LimbOutOfRange,
}

pub type Result<T> = core::result::Result<T, NatError>;
