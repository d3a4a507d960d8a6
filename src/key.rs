//! Provides the key codec: the translation between application keys and
//! the sequence of atoms stored along a path of the trie.
//!
//! A key either decomposes into a (possibly empty) sequence of atoms or
//! is the *null key*, which has no atoms at all and lives at the root of
//! the trie. Only `Option<K>` keys have a null key: `None`.
//!
//! ```
//! use trie_map::key::{Decompose, TrieKey};
//!
//! assert_eq!(Ok(Some(vec!['a', 'b'])), "ab".decompose());
//! assert_eq!(Ok(Some(vec![])), "".decompose());
//! assert_eq!(Ok(None), None::<String>.decompose());
//! assert_eq!(Ok("ab".to_string()), String::recompose(Some(&['a', 'b'][..])));
//! ```
//!
//! Decomposition must be deterministic and must round trip:
//! `K::recompose(k.decompose()?) == k` for every key used in a map.

use crate::error::TrieError;
use std::fmt::Debug;
use std::path::{Path, PathBuf};

/// Atoms which we wish to store in a Trie must implement
/// TrieAtom.
pub trait TrieAtom: Copy + Ord + Debug {}

// Blanket implementation which satisfies the compiler
impl<A> TrieAtom for A where A: Copy + Ord + Debug {}

/// Split a key into atoms.
///
/// `Ok(None)` is the null key. This is separate from [`TrieKey`] so that
/// unsized borrowed forms (`str`, `[A]`, `Path`) can be used for lookups.
pub trait Decompose<A> {
    fn decompose(&self) -> Result<Option<Vec<A>>, TrieError>;
}

/// Keys which we wish to store in a Trie must implement TrieKey.
pub trait TrieKey<A>: Decompose<A> + Sized {
    /// Rebuild a key from the atoms on a root-to-node path. `None` asks
    /// for the null key.
    fn recompose(atoms: Option<&[A]>) -> Result<Self, TrieError>;
}

fn no_null_key<K>() -> TrieError {
    TrieError::UnsupportedKey(format!(
        "{} has no null key",
        std::any::type_name::<K>()
    ))
}

impl Decompose<char> for str {
    fn decompose(&self) -> Result<Option<Vec<char>>, TrieError> {
        Ok(Some(self.chars().collect()))
    }
}

impl Decompose<char> for String {
    fn decompose(&self) -> Result<Option<Vec<char>>, TrieError> {
        self.as_str().decompose()
    }
}

impl TrieKey<char> for String {
    fn recompose(atoms: Option<&[char]>) -> Result<Self, TrieError> {
        atoms
            .map(|atoms| atoms.iter().collect())
            .ok_or_else(no_null_key::<Self>)
    }
}

impl<A: TrieAtom> Decompose<A> for [A] {
    fn decompose(&self) -> Result<Option<Vec<A>>, TrieError> {
        Ok(Some(self.to_vec()))
    }
}

impl<A: TrieAtom> Decompose<A> for Vec<A> {
    fn decompose(&self) -> Result<Option<Vec<A>>, TrieError> {
        self.as_slice().decompose()
    }
}

impl<A: TrieAtom> TrieKey<A> for Vec<A> {
    fn recompose(atoms: Option<&[A]>) -> Result<Self, TrieError> {
        atoms.map(<[A]>::to_vec).ok_or_else(no_null_key::<Self>)
    }
}

// Paths compare by component, so `a/`, `a//` and `a` are one key. Rebuilding
// the path from its components gives every spelling the same atoms.
impl Decompose<char> for Path {
    fn decompose(&self) -> Result<Option<Vec<char>>, TrieError> {
        let normalized: PathBuf = self.components().collect();
        match normalized.to_str() {
            Some(s) => s.decompose(),
            None => Err(TrieError::UnsupportedKey(format!(
                "path {} is not valid unicode",
                self.display()
            ))),
        }
    }
}

impl Decompose<char> for PathBuf {
    fn decompose(&self) -> Result<Option<Vec<char>>, TrieError> {
        self.as_path().decompose()
    }
}

impl TrieKey<char> for PathBuf {
    fn recompose(atoms: Option<&[char]>) -> Result<Self, TrieError> {
        String::recompose(atoms)
            .map(PathBuf::from)
            .map_err(|_| no_null_key::<Self>())
    }
}

impl<A, K: Decompose<A>> Decompose<A> for Option<K> {
    fn decompose(&self) -> Result<Option<Vec<A>>, TrieError> {
        match self {
            // `Some(k)` may not share the null key with `None`.
            Some(key) => key.decompose()?.map(Some).ok_or_else(|| {
                TrieError::UnsupportedKey(format!(
                    "{} wraps a null key",
                    std::any::type_name::<Self>()
                ))
            }),
            None => Ok(None),
        }
    }
}

impl<A, K: TrieKey<A>> TrieKey<A> for Option<K> {
    fn recompose(atoms: Option<&[A]>) -> Result<Self, TrieError> {
        match atoms {
            Some(atoms) => K::recompose(Some(atoms)).map(Some),
            None => Ok(None),
        }
    }
}

// Unsigned integers are stored big endian, so that lexicographic order of
// the atoms matches numeric order.
macro_rules! unsigned_key {
    ($($t:ty),*) => {
        $(
            impl Decompose<u8> for $t {
                fn decompose(&self) -> Result<Option<Vec<u8>>, TrieError> {
                    Ok(Some(self.to_be_bytes().to_vec()))
                }
            }

            impl TrieKey<u8> for $t {
                fn recompose(atoms: Option<&[u8]>) -> Result<Self, TrieError> {
                    let atoms = atoms.ok_or_else(no_null_key::<Self>)?;
                    let bytes = atoms.try_into().map_err(|_| {
                        TrieError::UnsupportedKey(format!(
                            "{} atoms do not form a {}",
                            atoms.len(),
                            stringify!($t)
                        ))
                    })?;
                    Ok(<$t>::from_be_bytes(bytes))
                }
            }
        )*
    };
}

unsigned_key!(u16, u32, u64, u128, usize);
