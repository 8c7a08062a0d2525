use std::fmt::{self, Display};

use crate::BigNum;
use crate::constants::*;
use crate::error::{BigNumError, Result};

fn check_radix(base: u32) -> Result<()> {
    if !(MIN_BASE..=MAX_BASE).contains(&base) {
        return Err(BigNumError::UnsupportedBase(base));
    }
    Ok(())
}

// parsing
impl BigNum {
    /// Parses a literal of `'0'`/`'1'` characters, most significant first, as the
    /// digits of a number written in `base`.
    ///
    /// `"10111000"` in base 5 is `5^3 + 5^4 + 5^5 + 5^7 = 82000`.
    pub fn from_binary_string(&mut self, literal: &str, base: u32) -> Result<()> {
        check_radix(base)?;
        if literal.is_empty() {
            return Err(BigNumError::EmptyLiteral);
        }
        if let Some((index, ch)) = literal.char_indices().find(|&(_, c)| c != '0' && c != '1') {
            return Err(BigNumError::InvalidDigit { ch, index });
        }

        self.set_zero()?;
        let mut multiplier = BigNum::one();
        let last = literal.len() - 1;
        for (i, ch) in literal.bytes().rev().enumerate() {
            if ch == b'1' {
                self.add(&multiplier)?;
            }
            if i != last {
                multiplier.mul_small(base)?;
            }
        }
        Ok(())
    }

    /// Reads the bits of `src` as digits in `base`, like
    /// [`PowerTable::base_convert`](crate::PowerTable::base_convert) without a table.
    pub fn reinterpret_bits(&mut self, src: &BigNum, base: u32) -> Result<()> {
        if base < MIN_BASE {
            return Err(BigNumError::UnsupportedBase(base));
        }
        self.set_zero()?;
        let mut multiplier = BigNum::one();
        for &digit in src.digits() {
            for bit in 0..DIGIT_BITS {
                if digit & (1 << bit) != 0 {
                    self.add(&multiplier)?;
                }
                multiplier.mul_small(base)?;
            }
        }
        Ok(())
    }
}

// printing
impl BigNum {
    /// Digits in `base`, most significant first, using `0-9A-F`.
    pub fn to_string_radix(&self, base: u32) -> Result<String> {
        check_radix(base)?;
        if self.is_zero() {
            return Ok(String::from("0"));
        }
        let mut work = self.clone();
        let mut digits = Vec::new();
        while !work.is_zero() {
            let r = work.div_mod_small(base)?;
            digits.push(DIGITS[r as usize]);
        }
        Ok(digits.iter().rev().collect())
    }

    /// `{len (capacity): [d0, d1, ...]}`
    pub fn dump(&self) -> String {
        let digits: Vec<String> = self.digits().iter().map(|d| d.to_string()).collect();
        format!("{{{} ({}): [{}]}}", self.len(), self.capacity(), digits.join(", "))
    }

    /// Every significant digit as two nibbles, most significant digit first.
    pub fn to_bit_string(&self) -> String {
        let digits: Vec<String> = self
            .digits()
            .iter()
            .rev()
            .map(|&d| format!("{} {}", NIBBLES[(d >> 4) as usize], NIBBLES[(d & 0x0f) as usize]))
            .collect();
        digits.join("  ")
    }
}

impl Display for BigNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.to_string_radix(10).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

/// Digits of a machine integer in `base`, most significant first.
pub fn limited_precision_base_conv(mut val: u64, base: u32) -> Result<String> {
    check_radix(base)?;
    if val == 0 {
        return Ok(String::from("0"));
    }
    let mut digits = Vec::new();
    while val != 0 {
        digits.push(DIGITS[(val % base as u64) as usize]);
        val /= base as u64;
    }
    Ok(digits.iter().rev().collect())
}

#[test]
fn test_from_binary_string() {
    let literals = ["10100000001010000", "11011111001", "110001100", "10111000"];
    let mut n = BigNum::new().unwrap();
    for (base, literal) in (2..).zip(literals) {
        n.from_binary_string(literal, base).unwrap();
        assert_eq!(n.digits(), &[80, 64, 1], "base {}", base);
    }

    assert_eq!(n.from_binary_string("", 2), Err(BigNumError::EmptyLiteral));
    assert_eq!(
        n.from_binary_string("1021", 3),
        Err(BigNumError::InvalidDigit { ch: '2', index: 2 })
    );
    assert_eq!(n.from_binary_string("1", 17), Err(BigNumError::UnsupportedBase(17)));
    // failed parses leave the value alone
    assert_eq!(n.to_u32(), 82000);

    n.from_binary_string("0", 7).unwrap();
    assert!(n.is_zero());
}

#[test]
fn test_to_string_radix() {
    let expected = ["10100000001010000", "11011111001", "110001100", "10111000", "1431344"];
    let n = BigNum::from_value(82000).unwrap();
    for (base, s) in (2..).zip(expected) {
        assert_eq!(n.to_string_radix(base).unwrap(), s);
        assert_eq!(limited_precision_base_conv(82000, base).unwrap(), s);
    }
    assert_eq!(n.to_string(), "82000");
    assert_eq!(n.to_string_radix(16).unwrap(), "14050");
    assert_eq!(BigNum::zero().to_string_radix(2).unwrap(), "0");
    assert_eq!(limited_precision_base_conv(255, 16).unwrap(), "FF");
    assert_eq!(limited_precision_base_conv(1, 1), Err(BigNumError::UnsupportedBase(1)));
}

#[test]
fn test_reinterpret_bits() {
    let src = BigNum::from_value(1047).unwrap();
    let mut n = BigNum::new().unwrap();
    n.reinterpret_bits(&src, 2).unwrap();
    assert_eq!(n.digits(), &[23, 4]);

    n.reinterpret_bits(&BigNum::from_value(0b1011_1000).unwrap(), 5).unwrap();
    assert_eq!(n.to_u32(), 82000);
}

#[test]
fn test_printers() {
    let n = BigNum::from_value(82000).unwrap();
    assert_eq!(n.dump(), "{3 (128): [80, 64, 1]}");
    assert_eq!(n.to_bit_string(), "0000 0001  0100 0000  0101 0000");
    assert_eq!(BigNum::with_capacity(2).unwrap().dump(), "{0 (2): []}");
}
