//! Provides a trie backed set, a [`TrieMap`] whose values are `()`.
//!
//! ```
//! use trie_map::set::TrieSet;
//!
//! let mut set: TrieSet<String, char> = TrieSet::new();
//! assert!(set.insert("foo".to_string())?);
//! assert!(!set.insert("foo".to_string())?);
//! assert!(set.contains("foo")?);
//! assert!(set.remove("foo")?);
//! assert!(set.is_empty());
//! # Ok::<(), trie_map::error::TrieError>(())
//! ```

use crate::error::TrieError;
use crate::iterator::{KeyCursor, Keys};
use crate::key::{Decompose, TrieAtom, TrieKey};
use crate::trie::TrieMap;
use std::borrow::Borrow;
use std::fmt;

#[cfg(feature = "serde")]
use serde_crate::{
    de::{SeqAccess, Visitor},
    ser::SerializeSeq,
    Deserialize, Deserializer, Serialize, Serializer,
};

/// Set of keys, stored the same way as the keys of a [`TrieMap`].
#[derive(Clone)]
pub struct TrieSet<K, A> {
    map: TrieMap<K, A, ()>,
}

impl<K, A: TrieAtom> Default for TrieSet<K, A> {
    fn default() -> Self {
        Self {
            map: TrieMap::default(),
        }
    }
}

impl<K, A: TrieAtom> TrieSet<K, A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear()
    }

    /// Iterate over the members, in the same order as [`TrieMap::iter`].
    pub fn iter(&self) -> Keys<'_, K, A, ()> {
        self.map.keys().iter()
    }

    /// Fail-fast cursor over the members. Removal through the cursor is
    /// done with [`TrieSet::remove_at`].
    pub fn cursor(&self) -> KeyCursor<K, A, ()> {
        self.map.keys().cursor()
    }

    /// Remove the member most recently returned by `cursor`.
    pub fn remove_at(&mut self, cursor: &mut KeyCursor<K, A, ()>) -> Result<K, TrieError> {
        cursor.remove(&mut self.map).map(|(key, _)| key)
    }

    /// Advance `cursor` over this set.
    pub fn advance<'s>(
        &'s self,
        cursor: &mut KeyCursor<K, A, ()>,
    ) -> Result<Option<&'s K>, TrieError> {
        cursor.next(&self.map)
    }
}

impl<K: TrieKey<A>, A: TrieAtom> TrieSet<K, A> {
    /// Add a member. Returns `true` if it was not already present.
    pub fn insert(&mut self, key: K) -> Result<bool, TrieError> {
        Ok(self.map.insert(key, ())?.is_none())
    }

    pub fn contains<Q>(&self, key: &Q) -> Result<bool, TrieError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Decompose<A> + PartialEq,
    {
        self.map.contains_key(key)
    }

    /// Remove a member. Returns `true` if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<bool, TrieError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Decompose<A> + PartialEq,
    {
        Ok(self.map.remove_entry(key)?.is_some())
    }

    pub fn insert_all<I: IntoIterator<Item = K>>(&mut self, keys: I) -> Result<(), TrieError> {
        self.map.insert_all(keys.into_iter().map(|key| (key, ())))
    }

    pub fn try_from_iter<I: IntoIterator<Item = K>>(keys: I) -> Result<Self, TrieError> {
        let mut set = Self::new();
        set.insert_all(keys)?;
        Ok(set)
    }
}

impl<K: fmt::Debug, A: TrieAtom> fmt::Debug for TrieSet<K, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, A: TrieAtom> PartialEq for TrieSet<K, A> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<K: Eq, A: TrieAtom> Eq for TrieSet<K, A> {}

impl<'a, K, A: TrieAtom> IntoIterator for &'a TrieSet<K, A> {
    type Item = &'a K;
    type IntoIter = Keys<'a, K, A, ()>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "serde")]
impl<K: Serialize, A: TrieAtom> Serialize for TrieSet<K, A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for key in self.iter() {
            seq.serialize_element(key)?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, K, A> Deserialize<'de> for TrieSet<K, A>
where
    K: TrieKey<A> + Deserialize<'de>,
    A: TrieAtom,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TrieSetVisitor<K, A>(std::marker::PhantomData<fn() -> TrieSet<K, A>>);

        impl<'de, K, A> Visitor<'de> for TrieSetVisitor<K, A>
        where
            K: TrieKey<A> + Deserialize<'de>,
            A: TrieAtom,
        {
            type Value = TrieSet<K, A>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a sequence")
            }

            fn visit_seq<S: SeqAccess<'de>>(self, mut access: S) -> Result<Self::Value, S::Error> {
                let mut set = TrieSet::new();
                while let Some(key) = access.next_element()? {
                    set.insert(key)
                        .map_err(<S::Error as serde_crate::de::Error>::custom)?;
                }
                Ok(set)
            }
        }

        deserializer.deserialize_seq(TrieSetVisitor(std::marker::PhantomData))
    }
}
