use trie_map::error::TrieError;
use trie_map::trie::TrieVec;
use unicode_segmentation::UnicodeSegmentation;

fn main() -> Result<(), TrieError> {
    env_logger::init();

    // Create our map
    let mut map = TrieVec::new();

    // Insert a key made of graphemes
    let s = "a̐éö̲\r\n";
    let key: Vec<&str> = s.graphemes(true).collect();
    let count = key.len();
    map.insert(key.clone(), count)?;
    assert!(map.contains_key(&key)?);
    assert_eq!(map.get(&key)?, Some(&count));

    // Keys sharing a prefix share nodes
    let longer: Vec<&str> = "a̐éö̲\r\nx".graphemes(true).collect();
    map.insert(longer.clone(), longer.len())?;
    for (key, value) in &map {
        println!("{:?} -> {}", key, value);
    }
    map.check()
}
