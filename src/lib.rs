mod checks;
mod eyeball;
mod search;

pub use crate::checks::self_checks;
pub use crate::eyeball::eyeball;
pub use crate::search::{check_base, search, SearchConfig};

#[cfg(test)]
mod tests {
    use crate::{search, SearchConfig};

    #[test]
    fn it_works() {
        let config = SearchConfig { base_cap: 4, max_bytes: 3, table_size: 24 };
        let hits = search(&config, |n| println!("hit = {}", n)).unwrap();
        println!("{} hits", hits.len());
        assert!(hits.iter().any(|n| n.to_u32() == 82000));
    }
}
