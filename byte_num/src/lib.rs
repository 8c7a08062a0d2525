//! Byte Num \
//! This crate provides:
//! - [`BigNum`]: a mutable arbitrary-precision unsigned integer stored as little-endian bytes, with a flag for underflowed subtraction.
//! - [`PowerTable`]: powers of a base, used to read the bits of a [`BigNum`] as digits in that base.
//! - [`DivisorTable`]: quotient lookup for repeated division by a small divisor.

mod byte_num;
mod cache;
mod constants;
mod convert;
mod error;
mod tables;

#[cfg(test)]
mod tests;

pub use crate::byte_num::{BigNum, SubOutcome};
pub use crate::constants::{DEFAULT_CAPACITY, MAX_BASE, MAX_TABLE_DIVISOR, MIN_BASE};
pub use crate::convert::limited_precision_base_conv;
pub use crate::error::{BigNumError, Result};
pub use crate::tables::{DivisorTable, PowerTable};
