//! # BigNum
//! Arbitrary-precision unsigned integers stored as little-endian base-256 digits.
//! Every operation mutates its receiver in place and grows the digit buffer on demand.
//! # Example
//! ```
//! use byte_num::BigNum;
//!
//! let mut a = BigNum::from_value(82000).unwrap();
//! let b = BigNum::from_value(150000).unwrap();
//! a.add(&b).unwrap();
//! assert_eq!(a.digits(), &[64, 138, 3]);
//! let r = a.div_mod_small(7).unwrap();
//! println!("a = {}, r = {}", a, r);
//! ```
//!

use std::cmp::Ordering;

use tracing::trace;

use crate::cache::SMALL_CACHE;
use crate::constants::*;
use crate::error::{BigNumError, Result};
use crate::tables::DivisorTable;

macro_rules! try_zeroed_vec {
    ($cap: expr) => {
        {
            let cap: usize = $cap;
            let mut v: Vec<u8> = Vec::new();
            match v.try_reserve_exact(cap) {
                Ok(()) => {
                    v.resize(cap, 0);
                    Ok(v)
                },
                Err(_) => Err(BigNumError::Allocation { requested: cap }),
            }
        }
    };
}

/// A growable byte-digit integer.
///
/// `digits.len()` is the capacity, `len` the number of significant digits.
/// Slots at or beyond `len` always hold zero.
#[derive(Debug, Clone)]
pub struct BigNum {
    digits: Vec<u8>,
    len: usize,
    negative: bool,
}

/// Result of [`BigNum::sub`].
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubOutcome {
    /// The difference was stored in the minuend.
    Exact,
    /// The subtrahend was larger. The minuend keeps its old magnitude and is flagged negative.
    Underflow,
}

impl SubOutcome {
    pub fn is_underflow(self) -> bool {
        self == SubOutcome::Underflow
    }
}

// construction
impl BigNum {
    pub(crate) fn from_raw(digits: Vec<u8>, len: usize) -> Self {
        BigNum { digits, len, negative: false }
    }

    /// Allocates `capacity` zeroed digit slots. The result has no significant digits yet.
    pub fn with_capacity(capacity: usize) -> Result<BigNum> {
        let digits = try_zeroed_vec!(capacity)?;
        Ok(BigNum::from_raw(digits, 0))
    }

    pub fn new() -> Result<BigNum> {
        BigNum::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn zero() -> BigNum {
        SMALL_CACHE[0].clone()
    }

    pub fn one() -> BigNum {
        SMALL_CACHE[1].clone()
    }

    /// Returns the cached value `val` if it is at most [`SMALL_CACHE_MAX`].
    pub fn small(val: u8) -> Option<BigNum> {
        SMALL_CACHE.get(val as usize).cloned()
    }

    pub fn from_value(val: u32) -> Result<BigNum> {
        let mut n = BigNum::new()?;
        n.from_u32(val)?;
        Ok(n)
    }
}

// storage
impl BigNum {
    /// Number of significant digits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True for a freshly allocated or released value that holds no digits at all.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.digits.len()
    }

    /// The significant digits, least significant first.
    pub fn digits(&self) -> &[u8] {
        &self.digits[..self.len]
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn clear_negative(&mut self) {
        self.negative = false;
    }

    pub fn is_zero(&self) -> bool {
        self.len == 0 || (self.len == 1 && self.digits[0] == 0)
    }

    /// Doubles the capacity. Every existing slot keeps its value.
    pub fn grow(&mut self) -> Result<()> {
        let cap = self.capacity();
        let new_cap = if cap == 0 { 1 } else { cap * 2 };
        trace!(from = cap, to = new_cap, "growing digit buffer");
        self.digits
            .try_reserve_exact(new_cap - cap)
            .map_err(|_| BigNumError::Allocation { requested: new_cap })?;
        self.digits.resize(new_cap, 0);
        Ok(())
    }

    /// Grows until at least `n` digit slots are available.
    pub fn reserve_digits(&mut self, n: usize) -> Result<()> {
        while self.capacity() < n {
            self.grow()?;
        }
        Ok(())
    }

    /// Replaces this value with a deep copy of `src`, including its capacity.
    pub fn copy_from(&mut self, src: &BigNum) -> Result<()> {
        let mut digits = try_zeroed_vec!(src.capacity())?;
        digits.copy_from_slice(&src.digits);
        self.digits = digits;
        self.len = src.len;
        self.negative = src.negative;
        Ok(())
    }

    /// Frees the digit buffer. Length and capacity drop to zero.
    pub fn release(&mut self) {
        self.digits = Vec::new();
        self.len = 0;
        self.negative = false;
    }

    /// Canonical zero: one digit holding 0.
    pub fn set_zero(&mut self) -> Result<()> {
        if self.capacity() == 0 {
            self.grow()?;
        }
        self.digits[..self.len].fill(0);
        self.len = 1;
        self.negative = false;
        Ok(())
    }

    /// Significant length with every zero representation counted as empty.
    pub(crate) fn significant_len(&self) -> usize {
        if self.is_zero() { 0 } else { self.len }
    }

    /// Drops trailing zero digits, keeping at least one.
    fn normalize(&mut self) {
        while self.len > 1 && self.digits[self.len - 1] == 0 {
            self.len -= 1;
        }
        if self.len == 0 && self.capacity() > 0 {
            self.len = 1;
        }
    }

    /// Copies the significant digits of `src` in without giving up capacity.
    fn load_digits(&mut self, src: &BigNum) -> Result<()> {
        self.reserve_digits(src.len)?;
        let old_len = self.len;
        self.digits[..src.len].copy_from_slice(src.digits());
        if old_len > src.len {
            self.digits[src.len..old_len].fill(0);
        }
        self.len = src.len;
        self.negative = src.negative;
        Ok(())
    }

    /// Multiplies by 256 and stores `digit` as the new least significant digit.
    fn shift_in(&mut self, digit: u8) -> Result<()> {
        if self.is_zero() {
            if self.capacity() == 0 {
                self.grow()?;
            }
            self.digits[0] = digit;
            self.len = 1;
            return Ok(());
        }
        self.reserve_digits(self.len + 1)?;
        self.digits.copy_within(0..self.len, 1);
        self.digits[0] = digit;
        self.len += 1;
        Ok(())
    }
}

// fixed width integers
impl BigNum {
    pub fn from_u32(&mut self, val: u32) -> Result<()> {
        if self.capacity() < U32_BYTES {
            return Err(BigNumError::Capacity { need: U32_BYTES, got: self.capacity() });
        }
        let old_len = self.len;
        self.digits[..U32_BYTES].copy_from_slice(&val.to_le_bytes());
        if old_len > U32_BYTES {
            self.digits[U32_BYTES..old_len].fill(0);
        }
        self.len = U32_BYTES;
        self.negative = false;
        self.normalize();
        Ok(())
    }

    pub fn from_u8(&mut self, val: u8) -> Result<()> {
        if self.capacity() < 1 {
            return Err(BigNumError::Capacity { need: 1, got: 0 });
        }
        if self.len > 1 {
            self.digits[1..self.len].fill(0);
        }
        self.digits[0] = val;
        self.len = 1;
        self.negative = false;
        Ok(())
    }

    /// Reassembles the low four digits. Only meaningful while `len() <= 4`.
    pub fn to_u32(&self) -> u32 {
        let mut bytes = [0u8; U32_BYTES];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = self.digits.get(i).copied().unwrap_or(0);
        }
        u32::from_le_bytes(bytes)
    }

    /// `None` when the value has more than four significant digits.
    pub fn to_u32_checked(&self) -> Option<u32> {
        if self.len > U32_BYTES {
            None
        } else {
            Some(self.to_u32())
        }
    }
}

// increment
impl BigNum {
    pub fn increment(&mut self) -> Result<()> {
        self.negative = false;
        let mut i = 0;
        loop {
            if i >= self.capacity() {
                self.grow()?;
            }
            let (val, carry) = self.digits[i].overflowing_add(1);
            self.digits[i] = val;
            i += 1;
            if !carry {
                break;
            }
        }
        if i > self.len {
            self.len = i;
        }
        Ok(())
    }
}

// addition
impl BigNum {
    /// `self += other`
    pub fn add(&mut self, other: &BigNum) -> Result<()> {
        self.negative = false;
        let mut carry: u16 = 0;
        let mut i = 0;
        while i < other.len || carry != 0 {
            if i >= self.capacity() {
                self.grow()?;
            }
            // slots past our own length are zero, never stale
            let mine = if i < self.len { self.digits[i] as u16 } else { 0 };
            let theirs = if i < other.len { other.digits[i] as u16 } else { 0 };
            let sum = mine + theirs + carry;
            self.digits[i] = sum as u8;
            carry = sum >> DIGIT_BITS;
            i += 1;
        }
        if i > self.len {
            self.len = i;
        }
        Ok(())
    }
}

// subtraction
impl BigNum {
    /// `self -= other`
    ///
    /// On underflow the magnitude is left untouched and the negative flag is set.
    /// An exact subtraction clears the flag.
    pub fn sub(&mut self, other: &BigNum) -> SubOutcome {
        if self.less_than(other) {
            self.negative = true;
            return SubOutcome::Underflow;
        }
        let other_len = other.significant_len();
        let mut borrow: i16 = 0;
        let mut i = 0;
        while i < other_len || borrow != 0 {
            let theirs = if i < other_len { other.digits[i] as i16 } else { 0 };
            let mut difference = self.digits[i] as i16 - theirs - borrow;
            if difference < 0 {
                difference += 1 << DIGIT_BITS;
                borrow = 1;
            } else {
                borrow = 0;
            }
            self.digits[i] = difference as u8;
            i += 1;
        }
        self.normalize();
        self.negative = false;
        SubOutcome::Exact
    }
}

// multiplication
impl BigNum {
    /// `self *= factor`, schoolbook over the significant bytes of `factor`.
    pub fn mul_small(&mut self, factor: u32) -> Result<()> {
        let factor_digits = factor.to_le_bytes();
        let k = factor_digits
            .iter()
            .rposition(|&d| d != 0)
            .map_or(0, |pos| pos + 1);
        if k == 0 || self.is_zero() {
            return self.set_zero();
        }

        let len = self.len;
        let mut scratch = try_zeroed_vec!(len + k)?;
        for (j, &m) in factor_digits[..k].iter().enumerate() {
            let mut carry: u32 = 0;
            for i in 0..len {
                let product = scratch[i + j] as u32
                            + self.digits[i] as u32 * m as u32
                            + carry;
                scratch[i + j] = product as u8;
                carry = product >> DIGIT_BITS;
            }
            scratch[len + j] = carry as u8;
        }

        self.reserve_digits(len + k)?;
        self.digits[..len + k].copy_from_slice(&scratch);
        self.len = len + k;
        self.negative = false;
        self.normalize();
        Ok(())
    }

    /// `self *= factor` by repeated addition. O(factor); only useful as a reference.
    pub fn mul_small_naive(&mut self, factor: u32) -> Result<()> {
        if factor == 0 {
            return self.set_zero();
        }
        self.negative = false;
        let original = self.clone();
        for _ in 1..factor {
            self.add(&original)?;
        }
        Ok(())
    }
}

// comparison
impl BigNum {
    pub fn compare_mag(&self, other: &BigNum) -> Ordering {
        let self_len = self.significant_len();
        let other_len = other.significant_len();

        if self_len != other_len {
            return self_len.cmp(&other_len);
        }

        for pos in (0..self_len).rev() {
            let a = self.digits[pos];
            let b = other.digits[pos];
            if a != b {
                return a.cmp(&b);
            }
        }

        Ordering::Equal
    }

    pub fn less_than(&self, other: &BigNum) -> bool {
        self.compare_mag(other).is_lt()
    }

    pub fn less_or_equal(&self, other: &BigNum) -> bool {
        self.compare_mag(other).is_le()
    }
}

impl PartialEq for BigNum {
    fn eq(&self, other: &Self) -> bool {
        self.negative == other.negative && self.compare_mag(other).is_eq()
    }
}
impl Eq for BigNum {}

// division
impl BigNum {
    /// Quotient replaces `self`; the remainder is written to `remainder` when given.
    pub fn div_mod(&mut self, divisor: &BigNum, remainder: Option<&mut BigNum>) -> Result<()> {
        if divisor.is_zero() {
            return Err(BigNumError::DivideByZero);
        }

        if divisor.len <= U32_BYTES {
            let r = self.div_mod_small(divisor.to_u32())?;
            if let Some(out) = remainder {
                let mut rem = BigNum::with_capacity(U32_BYTES)?;
                rem.from_u32(r)?;
                out.copy_from(&rem)?;
            }
            return Ok(());
        }

        // Long division one dividend digit at a time. The running remainder stays
        // below divisor * 256, so each quotient digit needs at most 255 subtractions.
        let mut rem = BigNum::with_capacity(divisor.len + 1)?;
        let mut quotient = try_zeroed_vec!(self.len)?;
        for i in (0..self.len).rev() {
            rem.shift_in(self.digits[i])?;
            let mut q: u8 = 0;
            while divisor.less_or_equal(&rem) {
                let outcome = rem.sub(divisor);
                debug_assert_eq!(outcome, SubOutcome::Exact);
                q += 1;
            }
            quotient[i] = q;
        }
        self.digits[..self.len].copy_from_slice(&quotient);
        self.negative = false;
        self.normalize();

        if let Some(out) = remainder {
            out.copy_from(&rem)?;
        }
        Ok(())
    }

    /// `self /= divisor`
    pub fn div(&mut self, divisor: &BigNum) -> Result<()> {
        self.div_mod(divisor, None)
    }

    /// `self %= divisor`
    pub fn rem(&mut self, divisor: &BigNum) -> Result<()> {
        let mut r = BigNum::with_capacity(divisor.len + 1)?;
        self.div_mod(divisor, Some(&mut r))?;
        self.load_digits(&r)
    }

    /// Divides by a machine word, most significant digit first. Returns the remainder.
    pub fn div_mod_small(&mut self, divisor: u32) -> Result<u32> {
        if divisor == 0 {
            return Err(BigNumError::DivideByZero);
        }
        let divisor = divisor as u64;
        let mut rem: u64 = 0;
        for i in (0..self.len).rev() {
            let temp = (rem << DIGIT_BITS) | self.digits[i] as u64;
            let q = temp / divisor;
            self.digits[i] = q as u8;
            rem = temp - q * divisor;
        }
        self.negative = false;
        self.normalize();
        Ok(rem as u32)
    }

    /// Same as [`div_mod_small`](Self::div_mod_small) with quotients read from `table`.
    pub fn div_mod_small_with(&mut self, table: &DivisorTable) -> u32 {
        let mut rem: usize = 0;
        for i in (0..self.len).rev() {
            let temp = (rem << DIGIT_BITS) | self.digits[i] as usize;
            let (q, product) = table.lookup(temp);
            self.digits[i] = q;
            rem = temp - product as usize;
        }
        self.negative = false;
        self.normalize();
        rem as u32
    }
}

#[test]
fn test_from_u32() {
    let mut n = BigNum::new().unwrap();
    n.from_u32(42).unwrap();
    assert_eq!(n.digits(), &[42]);
    n.from_u32(256).unwrap();
    assert_eq!(n.digits(), &[0, 1]);
    n.from_u32(65535 + 17).unwrap();
    assert_eq!(n.digits(), &[16, 0, 1]);
    n.from_u32(0).unwrap();
    assert_eq!(n.len(), 1);
    assert!(n.is_zero());
    n.from_u32(u32::MAX).unwrap();
    assert_eq!(n.to_u32(), u32::MAX);
    assert_eq!(n.to_u32_checked(), Some(u32::MAX));

    let mut tiny = BigNum::with_capacity(3).unwrap();
    assert_eq!(tiny.from_u32(1), Err(BigNumError::Capacity { need: 4, got: 3 }));
}

#[test]
fn test_increment() {
    let mut n = BigNum::from_value(1).unwrap();
    n.increment().unwrap();
    assert_eq!(n.digits(), &[2]);
    n.from_u32(255).unwrap();
    n.increment().unwrap();
    assert_eq!(n.digits(), &[0, 1]);
    n.increment().unwrap();
    assert_eq!(n.digits(), &[1, 1]);

    n.from_u32(u32::MAX).unwrap();
    n.increment().unwrap();
    assert_eq!(n.digits(), &[0, 0, 0, 0, 1]);
    assert_eq!(n.to_u32_checked(), None);
}

#[test]
fn test_increment_grows() {
    let mut small = BigNum::with_capacity(1).unwrap();
    small.from_u8(254).unwrap();
    small.increment().unwrap();
    assert_eq!((small.len(), small.capacity()), (1, 1));
    small.increment().unwrap();
    assert_eq!((small.len(), small.capacity()), (2, 2));
    assert_eq!(small.digits(), &[0, 1]);
}

#[test]
fn test_grow_keeps_every_slot() {
    let mut n = BigNum::with_capacity(4).unwrap();
    n.from_u32(0x04030201).unwrap();
    // shrink to one digit, then write past len by hand
    n.from_u8(9).unwrap();
    n.digits[1..4].copy_from_slice(&[7, 8, 6]);
    n.grow().unwrap();
    assert_eq!(n.capacity(), 8);
    assert_eq!(&n.digits[..4], &[9, 7, 8, 6]);
    assert_eq!(&n.digits[4..], &[0, 0, 0, 0]);
    assert_eq!(n.len(), 1);

    n.grow().unwrap();
    assert_eq!(n.capacity(), 16);
    assert_eq!(&n.digits[..4], &[9, 7, 8, 6]);

    let mut empty = BigNum::with_capacity(0).unwrap();
    empty.grow().unwrap();
    assert_eq!(empty.capacity(), 1);
}

#[test]
fn test_add() {
    let mut a = BigNum::from_value(82).unwrap();
    let b = BigNum::from_value(250).unwrap();
    a.add(&b).unwrap();
    assert_eq!(a.digits(), &[76, 1]);

    a.from_u32(15).unwrap();
    a.add(&BigNum::from_value(232000).unwrap()).unwrap();
    assert_eq!(a.digits(), &[79, 138, 3]);

    // stale high slots from a previous larger value must not leak in
    a.from_u32(0x01020304).unwrap();
    a.from_u32(1).unwrap();
    a.add(&BigNum::from_value(0xffff).unwrap()).unwrap();
    assert_eq!(a.digits(), &[0, 0, 1]);
}

#[test]
fn test_sub() {
    let mut a = BigNum::from_value(17).unwrap();
    let b = BigNum::from_value(13).unwrap();
    assert_eq!(a.sub(&b), SubOutcome::Exact);
    assert_eq!(a.digits(), &[4]);
    assert!(!a.is_negative());

    a.from_u32(13).unwrap();
    let b = BigNum::from_value(17).unwrap();
    assert!(a.sub(&b).is_underflow());
    assert!(a.is_negative());
    assert_eq!(a.digits(), &[13]);

    a.from_u32(13).unwrap();
    let b = BigNum::from_value(13).unwrap();
    assert_eq!(a.sub(&b), SubOutcome::Exact);
    assert_eq!(a.len(), 1);
    assert!(a.is_zero());

    a.from_u32(13987654).unwrap();
    let b = BigNum::from_value(13987651).unwrap();
    assert_eq!(a.sub(&b), SubOutcome::Exact);
    assert_eq!(a.digits(), &[3]);
}

#[test]
fn test_negative_flag_clears_after_arithmetic() {
    let nine = BigNum::from_value(9).unwrap();
    let two = BigNum::from_value(2).unwrap();

    let mut a = BigNum::from_value(5).unwrap();
    assert!(a.sub(&nine).is_underflow());
    assert!(a.is_negative());
    assert_eq!(a.sub(&two), SubOutcome::Exact);
    assert!(!a.is_negative());
    assert_eq!(a, BigNum::from_value(3).unwrap());

    let underflowed = || {
        let mut a = BigNum::from_value(5).unwrap();
        assert!(a.sub(&nine).is_underflow());
        a
    };

    let mut a = underflowed();
    a.add(&two).unwrap();
    assert_eq!(a, BigNum::from_value(7).unwrap());

    let mut a = underflowed();
    a.increment().unwrap();
    assert_eq!(a, BigNum::from_value(6).unwrap());

    let mut a = underflowed();
    a.mul_small(3).unwrap();
    assert_eq!(a, BigNum::from_value(15).unwrap());

    let mut a = underflowed();
    a.mul_small_naive(1).unwrap();
    assert_eq!(a, BigNum::from_value(5).unwrap());

    let mut a = underflowed();
    a.div_mod(&two, None).unwrap();
    assert_eq!(a, BigNum::from_value(2).unwrap());

    let mut a = underflowed();
    assert_eq!(a.div_mod_small(5).unwrap(), 0);
    assert_eq!(a, BigNum::one());
}

#[test]
fn test_mul_small() {
    let mut x = BigNum::from_value(17).unwrap();
    x.mul_small(3).unwrap();
    assert_eq!(x.digits(), &[51]);

    let mut p = BigNum::one();
    for _ in 0..16 {
        p.mul_small(5).unwrap();
    }
    assert_eq!(p.digits(), &[0xc1, 0x6f, 0xf2, 0x86, 0x23]);

    let mut q = BigNum::one();
    q.mul_small(5u32.pow(8)).unwrap();
    q.mul_small(5u32.pow(8)).unwrap();
    assert_eq!(p, q);

    x.mul_small(0).unwrap();
    assert!(x.is_zero());
}

#[test]
fn test_compare() {
    let a = BigNum::from_value(17).unwrap();
    let b = BigNum::from_value(42000).unwrap();
    assert!(a.less_than(&b));
    assert!(!b.less_than(&a));
    let c = BigNum::from_value(17324).unwrap();
    let d = BigNum::from_value(17323).unwrap();
    assert!(d.less_than(&c));
    assert!(!c.less_than(&c.clone()));
    assert!(c.less_or_equal(&c.clone()));

    let empty = BigNum::with_capacity(8).unwrap();
    assert_eq!(empty.compare_mag(&BigNum::zero()), Ordering::Equal);
}

#[test]
fn test_div_mod() {
    let mut a = BigNum::from_value(82000).unwrap();
    assert_eq!(a.div_mod_small(2).unwrap(), 0);
    assert_eq!(a.to_u32(), 41000);

    let mut a = BigNum::from_value(256).unwrap();
    a.div_mod(&BigNum::from_value(2).unwrap(), None).unwrap();
    assert_eq!(a.digits(), &[128]);

    // five-digit divisor takes the long division path
    let mut divisor = BigNum::from_value(u32::MAX).unwrap();
    divisor.increment().unwrap();
    let mut a = divisor.clone();
    a.mul_small(1000).unwrap();
    a.add(&BigNum::from_value(77).unwrap()).unwrap();
    let mut r = BigNum::new().unwrap();
    a.div_mod(&divisor, Some(&mut r)).unwrap();
    assert_eq!(a.to_u32(), 1000);
    assert_eq!(r.to_u32(), 77);

    // the scalar path hands back a deep copy of its four-slot remainder
    let mut a = BigNum::from_value(82003).unwrap();
    let mut r = BigNum::new().unwrap();
    a.div_mod(&BigNum::from_value(10).unwrap(), Some(&mut r)).unwrap();
    assert_eq!(a.to_u32(), 8200);
    assert_eq!(r.digits(), &[3]);
    assert_eq!(r.capacity(), U32_BYTES);

    let mut a = BigNum::from_value(5).unwrap();
    assert_eq!(a.div_mod(&BigNum::zero(), None), Err(BigNumError::DivideByZero));
    assert_eq!(a.div_mod_small(0), Err(BigNumError::DivideByZero));
}

#[test]
fn test_rem_keeps_capacity() {
    let mut a = BigNum::from_value(1_000_003).unwrap();
    a.rem(&BigNum::from_value(10).unwrap()).unwrap();
    assert_eq!(a.digits(), &[3]);
    assert_eq!(a.capacity(), DEFAULT_CAPACITY);
}

#[test]
fn test_copy_and_release() {
    let src = BigNum::from_value(0x0a0b0c).unwrap();
    let mut dest = BigNum::with_capacity(1).unwrap();
    dest.copy_from(&src).unwrap();
    assert_eq!(dest.capacity(), src.capacity());
    assert_eq!(dest, src);

    dest.release();
    assert_eq!((dest.len(), dest.capacity()), (0, 0));
    assert!(dest.is_zero());
}
