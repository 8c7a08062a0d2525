use anyhow::{ensure, Result};
use byte_num::{BigNum, DivisorTable, PowerTable, MAX_TABLE_DIVISOR};
use tracing::{debug, info};

/// Bounds of a brute-force search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Highest base every hit has to be written in with only 0 and 1.
    pub base_cap: u32,
    /// The search stops once the enumerated bit pattern needs this many bytes.
    pub max_bytes: usize,
    /// Number of powers of `base_cap` to precompute. Must exceed the bit count of the last pattern.
    pub table_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig { base_cap: 5, max_bytes: 4, table_size: 40 }
    }
}

/// True if every digit of `n` in the table's base is 0 or 1.
pub fn check_base(n: &BigNum, table: &DivisorTable) -> bool {
    let mut work = n.clone();
    while !work.is_zero() {
        if work.div_mod_small_with(table) > 1 {
            return false;
        }
    }
    true
}

/// Enumerates every bit pattern below `max_bytes` bytes, reads it in base `base_cap`
/// and keeps the values that only use 0 and 1 in all smaller bases as well.
///
/// Base `base_cap` holds by construction and base 2 trivially, so only
/// `base_cap - 1` down to 3 are checked.
pub fn search<F>(config: &SearchConfig, mut on_hit: F) -> Result<Vec<BigNum>>
where
    F: FnMut(&BigNum),
{
    ensure!(
        (3..=MAX_TABLE_DIVISOR).contains(&config.base_cap),
        "base cap {} is outside 3..={}",
        config.base_cap,
        MAX_TABLE_DIVISOR
    );
    ensure!(
        config.table_size >= 8 * config.max_bytes.saturating_sub(1),
        "a table of {} powers cannot convert {}-byte patterns",
        config.table_size,
        config.max_bytes.saturating_sub(1)
    );

    let powers = PowerTable::new(config.table_size, config.base_cap)?;
    let divisors = (3..config.base_cap)
        .rev()
        .map(DivisorTable::new)
        .collect::<Result<Vec<_>, _>>()?;
    info!(?config, "starting search");

    let mut hits = Vec::new();
    let mut pattern = BigNum::one();
    let mut candidate = BigNum::new()?;
    let mut checked: u64 = 0;
    while pattern.len() < config.max_bytes {
        powers.base_convert(&mut candidate, &pattern)?;
        if divisors.iter().all(|table| check_base(&candidate, table)) {
            info!(%candidate, "covers all bases from 2 to {}", config.base_cap);
            on_hit(&candidate);
            hits.push(candidate.clone());
        }
        pattern.increment()?;
        checked += 1;
        if checked % (1 << 20) == 0 {
            debug!(checked, "search progress");
        }
    }
    info!(checked, hits = hits.len(), "search finished");
    Ok(hits)
}

#[test]
fn test_check_base() {
    let table = DivisorTable::new(3).unwrap();
    assert!(check_base(&BigNum::from_value(82000).unwrap(), &table));
    assert!(!check_base(&BigNum::from_value(82001).unwrap(), &table));
    assert!(check_base(&BigNum::zero(), &table));
    let table = DivisorTable::new(6).unwrap();
    assert!(!check_base(&BigNum::from_value(82000).unwrap(), &table));
}

#[test]
fn test_search_finds_82000() {
    let config = SearchConfig { max_bytes: 2, ..SearchConfig::default() };
    let mut reported = Vec::new();
    let hits = search(&config, |n| reported.push(n.to_u32())).unwrap();
    let values: Vec<u32> = hits.iter().map(|n| n.to_u32()).collect();
    assert_eq!(values, vec![1, 82000]);
    assert_eq!(reported, values);
}

#[test]
fn test_search_rejects_bad_config() {
    let config = SearchConfig { base_cap: 2, ..SearchConfig::default() };
    assert!(search(&config, |_| {}).is_err());
    let config = SearchConfig { table_size: 8, ..SearchConfig::default() };
    assert!(search(&config, |_| {}).is_err());
}
