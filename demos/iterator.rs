use rand::{distr::Alphanumeric, rng, Rng};
use trie_map::error::TrieError;
use trie_map::trie::TrieString;

fn main() -> Result<(), TrieError> {
    env_logger::init();

    static POPULATION_SIZE: usize = 10;
    static SIZE: usize = 10;

    // Create our map and a collection of searches
    let mut map = TrieString::new();
    let mut searches = vec![];

    // Store 10 random strings composed of between 1 and 10
    // characters in our search collection and our map.
    for _i in 0..POPULATION_SIZE {
        let entry: String = rng()
            .sample_iter(&Alphanumeric)
            .take(rng().random_range(1..=SIZE))
            .map(char::from)
            .collect();
        searches.push(entry.clone());
        let len = entry.len();
        map.insert(entry, len)?;
    }

    // Iteration is already sorted by key
    println!("sorted");
    for (key, value) in map.iter() {
        assert!(searches.contains(key));
        println!("key: {}, value: {}", key, value);
    }

    // Drop every key with an even length while walking the map
    let mut cursor = map.entries().cursor();
    while let Some((_, len)) = cursor.next(&map)? {
        if len % 2 == 0 {
            let (key, _) = cursor.remove(&mut map)?;
            println!("removed: {}", key);
        }
    }
    println!("{} keys remain", map.len());
    map.check()
}
