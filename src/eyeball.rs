use std::fmt::Write;

use anyhow::Result;
use byte_num::{limited_precision_base_conv, BigNum};

const INF_MARKER: &str = "<Inf>";

fn int_or_marker(n: &BigNum) -> String {
    match n.to_u32_checked() {
        Some(val) => val.to_string(),
        None => INF_MARKER.to_string(),
    }
}

/// Human-inspectable output: digit dumps, bit strings and conversions.
pub fn eyeball() -> Result<String> {
    let mut out = String::new();
    let mut n = BigNum::new()?;
    writeln!(out, "{}", n.dump())?;
    for val in [42, 255, 256, 257, 258, 65535 + 17] {
        n.from_u32(val)?;
        writeln!(out, "{} = {}", val, n.dump())?;
    }

    n.from_u32(65536)?;
    for _ in 0..22 {
        n.increment()?;
        writeln!(out, "{}", n.to_bit_string())?;
    }
    n.from_u32(82000)?;
    writeln!(out, "{}", n.to_bit_string())?;

    let m = 82000;
    for base in 2..7 {
        writeln!(out, "{} (base {}) = {}", m, base, limited_precision_base_conv(m, base)?)?;
    }

    for val in [82000, 149327, u32::MAX] {
        n.from_u32(val)?;
        writeln!(out, "{}", int_or_marker(&n))?;
    }
    n.increment()?;
    writeln!(out, "{}", int_or_marker(&n))?;
    Ok(out)
}

#[test]
fn test_eyeball_output() {
    let out = eyeball().unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "{0 (128): []}");
    assert_eq!(lines[3], "256 = {2 (128): [0, 1]}");
    assert!(lines.contains(&"82000 (base 6) = 1431344"));
    assert_eq!(lines[lines.len() - 2], "4294967295");
    assert_eq!(lines[lines.len() - 1], INF_MARKER);
}
