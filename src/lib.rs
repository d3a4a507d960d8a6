//! Provides a trie backed map, [`crate::trie::TrieMap`], and set,
//! [`crate::set::TrieSet`].
//!
//! Keys are split into a sequence of atoms by the key codec
//! ([`crate::key::TrieKey`]) and stored one atom per node, so keys with a
//! common prefix share storage. Every map operation a `BTreeMap` user
//! expects is available, with two differences:
//!
//!  - Operations which must split a key return a `Result`, because a
//!    codec may reject a key ([`crate::error::TrieError::UnsupportedKey`]).
//!  - Iteration is a depth first, pre-order walk. For the provided codecs
//!    that is lexicographic order of the atoms, preceded by the null key
//!    and then the empty key.
//!
//! Since the most common use of a trie is to store the chars of a String,
//! a convenience type, [`crate::trie::TrieString`] is provided. The second
//! most common use is to hold a Vec of atoms, for which the
//! [`crate::trie::TrieVec`] type is provided.
//!
//! Besides borrowing iterators, the map hands out fail-fast cursors
//! ([`crate::iterator::Cursor`]) which can remove the entry they just
//! returned and which report any other modification of the map.
//!
//! Examples:
//! * trie : [`crate::trie`]
//! * set : [`crate::set`]
//! * iterator : [`crate::iterator`]
//!
//! Typical usages for this data structure:
//!  - Interning
//!  - Storing large numbers of keys with significant amounts of
//!    sub-key duplication
//!  - Ordered walks over string keys
//!
//! Enable the `logger` feature to emit `trace` and `debug` records through
//! the [`log`](https://docs.rs/log) facade, and the `serde` feature for
//! serialization.

#[cfg(feature = "serde")]
extern crate serde_crate;

mod logger;

pub mod error;
pub mod iterator;
pub mod key;
mod node;
pub mod set;
pub mod trie;

#[cfg(test)]
mod proptests;

pub use error::TrieError;
pub use key::{Decompose, TrieAtom, TrieKey};
pub use set::TrieSet;
pub use trie::{TrieMap, TrieString, TrieVec};
