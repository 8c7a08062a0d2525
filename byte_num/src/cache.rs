use lazy_static::*;

use crate::BigNum;
use crate::constants::*;

lazy_static! {
    /// Default-capacity values `0..=SMALL_CACHE_MAX`, handed out as clones.
    pub static ref SMALL_CACHE: Vec<BigNum> = (0..=SMALL_CACHE_MAX)
        .map(|val| {
            let mut digits = vec![0u8; DEFAULT_CAPACITY];
            digits[0] = val as u8;
            BigNum::from_raw(digits, 1)
        })
        .collect();
}

#[test]
fn test_small_cache() {
    assert_eq!(SMALL_CACHE.len(), SMALL_CACHE_MAX + 1);
    assert!(SMALL_CACHE[0].is_zero());
    assert_eq!(SMALL_CACHE[16].digits(), &[16]);
    assert_eq!(BigNum::small(17), None);

    // handed out values are deep copies
    let mut one = BigNum::one();
    one.increment().unwrap();
    assert_eq!(BigNum::one().digits(), &[1]);
    assert_eq!(one.capacity(), DEFAULT_CAPACITY);
}
