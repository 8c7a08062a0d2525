use anyhow::{ensure, Result};
use byte_num::{BigNum, PowerTable, SubOutcome};
use tracing::debug;

fn check_increment() -> Result<()> {
    let mut n = BigNum::from_value(1)?;
    n.increment()?;
    ensure!(n.digits() == [2], "1 + 1 gave {}", n.dump());
    n.from_u32(255)?;
    n.increment()?;
    ensure!(n.digits() == [0, 1], "255 + 1 gave {}", n.dump());
    n.increment()?;
    ensure!(n.digits() == [1, 1], "256 + 1 gave {}", n.dump());

    let mut small = BigNum::with_capacity(1)?;
    small.from_u8(254)?;
    small.increment()?;
    ensure!(small.len() == 1 && small.capacity() == 1, "255 in one slot gave {}", small.dump());
    small.increment()?;
    ensure!(
        small.digits() == [0, 1] && small.capacity() == 2,
        "256 from one slot gave {}",
        small.dump()
    );
    Ok(())
}

fn check_add() -> Result<()> {
    let cases: [(u32, u32, &[u8]); 3] = [
        (82, 250, &[76, 1]),
        (82000, 150000, &[64, 138, 3]),
        (15, 232000, &[79, 138, 3]),
    ];
    for (a, b, expected) in cases {
        let mut x = BigNum::from_value(a)?;
        x.add(&BigNum::from_value(b)?)?;
        ensure!(x.digits() == expected, "{} + {} gave {}", a, b, x.dump());
    }
    Ok(())
}

fn check_mul() -> Result<()> {
    let mut x = BigNum::from_value(17)?;
    x.mul_small(3)?;
    ensure!(x.digits() == [51], "17 * 3 gave {}", x.dump());

    let mut p = BigNum::one();
    for _ in 0..16 {
        p.mul_small(5)?;
    }
    ensure!(p.digits() == [0xc1, 0x6f, 0xf2, 0x86, 0x23], "5^16 gave {}", p.dump());
    Ok(())
}

fn check_compare() -> Result<()> {
    let cases = [(17, 42000, true), (17324, 17324, false), (17323, 17324, true), (23, 17324, true), (17324, 23, false)];
    for (a, b, expected) in cases {
        let less = BigNum::from_value(a)?.less_than(&BigNum::from_value(b)?);
        ensure!(less == expected, "{} < {} reported {}", a, b, less);
    }
    Ok(())
}

fn check_sub() -> Result<()> {
    let mut a = BigNum::from_value(17)?;
    ensure!(a.sub(&BigNum::from_value(13)?) == SubOutcome::Exact && a.digits() == [4], "17 - 13 gave {}", a.dump());

    a.from_u32(13)?;
    ensure!(a.sub(&BigNum::from_value(17)?).is_underflow() && a.is_negative(), "13 - 17 did not underflow");

    a.from_u32(13)?;
    ensure!(a.sub(&BigNum::from_value(13)?) == SubOutcome::Exact && a.is_zero() && a.len() == 1, "13 - 13 gave {}", a.dump());

    a.from_u32(13987654)?;
    ensure!(a.sub(&BigNum::from_value(13987651)?) == SubOutcome::Exact && a.digits() == [3], "shrinking subtraction gave {}", a.dump());
    Ok(())
}

fn check_div() -> Result<()> {
    let mut a = BigNum::from_value(82000)?;
    let r = a.div_mod_small(2)?;
    ensure!(a.to_u32() == 41000 && r == 0, "82000 / 2 gave {} r {}", a, r);

    let mut a = BigNum::from_value(256)?;
    a.div_mod(&BigNum::from_value(2)?, None)?;
    ensure!(a.digits() == [128], "256 / 2 gave {}", a.dump());
    Ok(())
}

fn check_conversions() -> Result<()> {
    let literals = ["10100000001010000", "11011111001", "110001100", "10111000"];
    let mut n = BigNum::new()?;
    let mut bits = BigNum::new()?;
    for (base, literal) in (2..).zip(literals) {
        n.from_binary_string(literal, base)?;
        ensure!(n.digits() == [80, 64, 1], "{} in base {} gave {}", literal, base, n.dump());

        let printed = n.to_string_radix(base)?;
        ensure!(printed == literal, "82000 in base {} printed as {}", base, printed);

        // the literal read in base 2 is the bit pattern that converts back to 82000
        bits.from_binary_string(literal, 2)?;
        let powers = PowerTable::new(24, base)?;
        powers.base_convert(&mut n, &bits)?;
        ensure!(n.to_u32() == 82000, "converting {} to base {} gave {}", literal, base, n);
    }

    let src = BigNum::from_value(1047)?;
    n.reinterpret_bits(&src, 2)?;
    ensure!(n.digits() == [23, 4], "1047 reinterpreted in base 2 gave {}", n.dump());
    Ok(())
}

/// Built-in assertions over the engine. The first failure is returned.
pub fn self_checks() -> Result<()> {
    let checks: [(&str, fn() -> Result<()>); 7] = [
        ("increment", check_increment),
        ("add", check_add),
        ("mul", check_mul),
        ("compare", check_compare),
        ("sub", check_sub),
        ("div", check_div),
        ("conversions", check_conversions),
    ];
    for (name, check) in checks {
        check()?;
        debug!(name, "check passed");
    }
    Ok(())
}

#[test]
fn test_self_checks_pass() {
    self_checks().unwrap();
}
