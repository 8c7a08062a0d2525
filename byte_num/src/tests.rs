use proptest::prelude::*;

use crate::{BigNum, DivisorTable, PowerTable, SubOutcome, MAX_TABLE_DIVISOR};

fn big(val: u64) -> BigNum {
    let mut n = BigNum::from_value((val >> 32) as u32).unwrap();
    n.mul_small(1 << 16).unwrap();
    n.mul_small(1 << 16).unwrap();
    n.add(&BigNum::from_value(val as u32).unwrap()).unwrap();
    n
}

fn to_u64(n: &BigNum) -> u64 {
    assert!(n.len() <= 8, "{} digits do not fit a u64", n.len());
    n.digits().iter().rev().fold(0u64, |acc, &d| (acc << 8) | d as u64)
}

#[test]
fn it_works() {
    let mut a = BigNum::from_value(82000).unwrap();
    let b = BigNum::from_value(150000).unwrap();
    println!("a = {}", a);
    a.add(&b).unwrap();
    println!("a + b = {}", a);
    let _ = a.sub(&b);
    println!("a + b - b = {}", a);
    a.mul_small(3).unwrap();
    println!("a * 3 = {}", a);
    let r = a.div_mod_small(7).unwrap();
    println!("a / 7 = {}, r = {}", a, r);

    let table = PowerTable::new(24, 5).unwrap();
    let mut n = BigNum::new().unwrap();
    table.base_convert(&mut n, &BigNum::from_value(184).unwrap()).unwrap();
    println!("184 read in base 5 = {}", n);
}

#[test]
fn test_increment_matches_from_u32() {
    let mut n = BigNum::zero();
    for v in 1..=70_000u32 {
        n.increment().unwrap();
        if v.is_power_of_two() || v % 997 == 0 {
            assert_eq!(n, BigNum::from_value(v).unwrap(), "after {} increments", v);
        }
    }
}

#[test]
fn test_zero_forms() {
    assert!(BigNum::zero().is_zero());
    assert!(BigNum::with_capacity(4).unwrap().is_zero());
    let mut n = BigNum::from_value(300).unwrap();
    assert!(!n.is_zero());
    n.div_mod_small(301).unwrap();
    assert_eq!(n.len(), 1);
    assert!(n.is_zero());
    n.increment().unwrap();
    assert!(!n.is_zero());
}

proptest! {
    #[test]
    fn prop_u32_round_trip(v: u32) {
        let n = BigNum::from_value(v).unwrap();
        prop_assert_eq!(n.to_u32(), v);
        prop_assert!(n.len() >= 1);
        prop_assert!(n.len() == 1 || *n.digits().last().unwrap() != 0);
    }

    #[test]
    fn prop_add_matches_u64(a: u32, b: u32) {
        let mut x = BigNum::from_value(a).unwrap();
        x.add(&BigNum::from_value(b).unwrap()).unwrap();
        prop_assert_eq!(to_u64(&x), a as u64 + b as u64);
    }

    #[test]
    fn prop_sub_then_add_restores(a: u64, b: u64) {
        let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
        let original = big(hi);
        let subtrahend = big(lo);
        let mut x = original.clone();
        prop_assert_eq!(x.sub(&subtrahend), SubOutcome::Exact);
        prop_assert_eq!(to_u64(&x), hi - lo);
        x.add(&subtrahend).unwrap();
        prop_assert_eq!(x, original);
    }

    #[test]
    fn prop_underflow_keeps_magnitude(a: u64, b: u64) {
        prop_assume!(a < b);
        let mut x = big(a);
        prop_assert!(x.sub(&big(b)).is_underflow());
        prop_assert!(x.is_negative());
        prop_assert_eq!(to_u64(&x), a);
    }

    #[test]
    fn prop_mul_small_matches_naive(a: u32, factor in 0u32..600) {
        let mut fast = BigNum::from_value(a).unwrap();
        let mut slow = fast.clone();
        fast.mul_small(factor).unwrap();
        slow.mul_small_naive(factor).unwrap();
        prop_assert_eq!(&fast, &slow);
        prop_assert_eq!(to_u64(&fast), a as u64 * factor as u64);
    }

    #[test]
    fn prop_mul_small_matches_u64(a: u32, factor: u32) {
        let mut x = BigNum::from_value(a).unwrap();
        x.mul_small(factor).unwrap();
        prop_assert_eq!(to_u64(&x), a as u64 * factor as u64);
    }

    #[test]
    fn prop_div_mod_matches_u64(a: u64, b in 1u64..) {
        let mut q = big(a);
        let mut r = BigNum::new().unwrap();
        q.div_mod(&big(b), Some(&mut r)).unwrap();
        prop_assert_eq!(to_u64(&q), a / b);
        prop_assert_eq!(to_u64(&r), a % b);
    }

    #[test]
    fn prop_long_division(a: u64, b in (1u64 << 32)..) {
        let mut q = big(a);
        let mut r = BigNum::with_capacity(1).unwrap();
        q.div_mod(&big(b), Some(&mut r)).unwrap();
        prop_assert_eq!(to_u64(&q), a / b);
        prop_assert_eq!(to_u64(&r), a % b);
    }

    #[test]
    fn prop_divisor_table_matches_direct(a: u64, d in 1..=MAX_TABLE_DIVISOR) {
        let table = DivisorTable::new(d).unwrap();
        let mut x = big(a);
        let mut y = x.clone();
        let r = x.div_mod_small_with(&table);
        prop_assert_eq!(r, y.div_mod_small(d).unwrap());
        prop_assert_eq!(r as u64, a % d as u64);
        prop_assert_eq!(x, y);
    }

    #[test]
    fn prop_base_convert_matches_reinterpret(v: u32, base in 2u32..=16) {
        let table = PowerTable::new(32, base).unwrap();
        let src = BigNum::from_value(v).unwrap();
        let mut with_table = BigNum::new().unwrap();
        let mut without = BigNum::new().unwrap();
        table.base_convert(&mut with_table, &src).unwrap();
        without.reinterpret_bits(&src, base).unwrap();
        prop_assert_eq!(with_table, without);
    }

    #[test]
    fn prop_binary_literal_round_trip(literal in "1[01]{0,40}", base in 2u32..=16) {
        let mut n = BigNum::new().unwrap();
        n.from_binary_string(&literal, base).unwrap();
        prop_assert_eq!(n.to_string_radix(base).unwrap(), literal);
    }
}
