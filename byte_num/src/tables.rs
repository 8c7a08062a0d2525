//! Precomputed tables used by the repeated conversions of a search.
//! Both are built once by their owner and only read afterwards.

use tracing::debug;

use crate::BigNum;
use crate::constants::*;
use crate::error::{BigNumError, Result};

/// `base^0 .. base^(count - 1)`
#[derive(Debug, Clone)]
pub struct PowerTable {
    base: u32,
    entries: Vec<BigNum>,
}

impl PowerTable {
    /// `count` has to exceed the highest bit position ever converted.
    pub fn new(count: usize, base: u32) -> Result<PowerTable> {
        if count == 0 {
            return Err(BigNumError::EmptyTable);
        }
        if base < MIN_BASE {
            return Err(BigNumError::UnsupportedBase(base));
        }

        let mut entries = Vec::new();
        entries
            .try_reserve_exact(count)
            .map_err(|_| BigNumError::Allocation { requested: count * std::mem::size_of::<BigNum>() })?;
        let mut power = BigNum::one();
        for i in 0..count {
            if i > 0 {
                power.mul_small(base)?;
            }
            entries.push(power.clone());
        }
        debug!(count, base, "built power table");

        Ok(PowerTable { base, entries })
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, exponent: usize) -> Option<&BigNum> {
        self.entries.get(exponent)
    }

    /// Reads the bits of `src` (low byte first, low bit first) as digits in `base`
    /// and stores the value in `dest`.
    pub fn base_convert(&self, dest: &mut BigNum, src: &BigNum) -> Result<()> {
        dest.set_zero()?;
        for (i, &digit) in src.digits().iter().enumerate() {
            if digit == 0 {
                continue;
            }
            for bit in 0..DIGIT_BITS {
                if digit & (1 << bit) == 0 {
                    continue;
                }
                let m = i * DIGIT_BITS as usize + bit as usize;
                let power = self.entries.get(m).ok_or(BigNumError::TableTooSmall {
                    bit: m,
                    available: self.entries.len(),
                })?;
                dest.add(power)?;
            }
        }
        Ok(())
    }
}

/// Quotient and product of every running remainder for one small divisor.
///
/// A running remainder is `(r << 8) | digit` with `r < divisor`, so `divisor * 256`
/// entries cover every value it can take.
#[derive(Debug, Clone)]
pub struct DivisorTable {
    divisor: u32,
    entries: Vec<(u8, u16)>,
}

impl DivisorTable {
    pub fn new(divisor: u32) -> Result<DivisorTable> {
        if divisor == 0 {
            return Err(BigNumError::DivideByZero);
        }
        if divisor > MAX_TABLE_DIVISOR {
            return Err(BigNumError::UnsupportedDivisor(divisor));
        }

        let size = (divisor as usize) << DIGIT_BITS;
        let mut entries = Vec::new();
        entries
            .try_reserve_exact(size)
            .map_err(|_| BigNumError::Allocation { requested: size * std::mem::size_of::<(u8, u16)>() })?;
        let d = divisor as usize;
        entries.extend((0..size).map(|temp| {
            let q = temp / d;
            (q as u8, (q * d) as u16)
        }));
        debug!(divisor, size, "built divisor table");

        Ok(DivisorTable { divisor, entries })
    }

    pub fn divisor(&self) -> u32 {
        self.divisor
    }

    #[inline(always)]
    pub(crate) fn lookup(&self, temp: usize) -> (u8, u16) {
        self.entries[temp]
    }
}

#[test]
fn test_power_table() {
    let table = PowerTable::new(20, 5).unwrap();
    assert_eq!(table.len(), 20);
    assert_eq!(table.get(0).unwrap().digits(), &[1]);
    assert_eq!(table.get(3).unwrap().to_u32(), 125);
    assert_eq!(table.get(16).unwrap().digits(), &[0xc1, 0x6f, 0xf2, 0x86, 0x23]);

    assert!(matches!(PowerTable::new(0, 5), Err(BigNumError::EmptyTable)));
    assert!(matches!(PowerTable::new(4, 1), Err(BigNumError::UnsupportedBase(1))));
}

#[test]
fn test_base_convert() {
    // binary 10 read in base 5
    let table = PowerTable::new(40, 5).unwrap();
    let mut dest = BigNum::new().unwrap();
    table.base_convert(&mut dest, &BigNum::from_value(2).unwrap()).unwrap();
    assert_eq!(dest.to_u32(), 5);

    // 0b10111000 in base 5 is 82000
    table.base_convert(&mut dest, &BigNum::from_value(0b1011_1000).unwrap()).unwrap();
    assert_eq!(dest.to_u32(), 82000);

    table.base_convert(&mut dest, &BigNum::zero()).unwrap();
    assert!(dest.is_zero());

    let short = PowerTable::new(4, 3).unwrap();
    assert_eq!(
        short.base_convert(&mut dest, &BigNum::from_value(0b10000).unwrap()),
        Err(BigNumError::TableTooSmall { bit: 4, available: 4 })
    );
}

#[test]
fn test_divisor_table() {
    assert!(matches!(DivisorTable::new(0), Err(BigNumError::DivideByZero)));
    assert!(matches!(DivisorTable::new(17), Err(BigNumError::UnsupportedDivisor(17))));

    for d in 1..=MAX_TABLE_DIVISOR {
        let table = DivisorTable::new(d).unwrap();
        let mut a = BigNum::from_value(82000).unwrap();
        let mut b = a.clone();
        assert_eq!(a.div_mod_small_with(&table), b.div_mod_small(d).unwrap());
        assert_eq!(a, b);
    }
}
