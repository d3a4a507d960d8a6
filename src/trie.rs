//! Provides a trie backed map. Keys are split into atoms by the key codec
//! ([`crate::key`]) and every atom becomes one node on the key's path, so
//! keys with a common prefix share storage.
//!
//! Because the trie is based on the concept of atoms, it is up to the
//! key type to decide what kind of atoms make most sense. Strings are
//! split into chars, `Vec<A>` keys into their elements and unsigned
//! integers into big endian bytes. `Option<K>` keys add a *null key*
//! (`None`) which is distinct from the empty key.
//!
//! Example 1
//! ```
//! use trie_map::trie::TrieString;
//!
//! let mut map = TrieString::new();
//! map.insert("bar".to_string(), "BAR")?;
//! map.insert("foo".to_string(), "FOO")?;
//! map.insert("zot".to_string(), "ZOT")?;
//!
//! assert_eq!(3, map.len());
//! assert_eq!(Some(&"BAR"), map.get("bar")?);
//! assert!(map.contains_value(&"ZOT"));
//! assert_eq!(Some("BAR"), map.remove("bar")?);
//! assert_eq!(None, map.get("bar")?);
//! # Ok::<(), trie_map::error::TrieError>(())
//! ```
//!
//! Example 2
//! ```
//! use trie_map::trie::TrieMap;
//!
//! // The null key and the empty key are separate slots
//! let mut map: TrieMap<Option<String>, char, &str> = TrieMap::new();
//! map.insert(None, "NULL")?;
//! map.insert(Some(String::new()), "BLANK")?;
//! assert_eq!(Some(&"NULL"), map.get(&None)?);
//! assert_eq!(Some(&"BLANK"), map.get(&Some(String::new()))?);
//! # Ok::<(), trie_map::error::TrieError>(())
//! ```
//!
//! Iteration is a depth first, pre-order walk. Children are ordered by
//! atom, so entries come back as: the null key, the empty key, then every
//! other key in lexicographic order of its atoms.
//!
//! Example 3
//! ```
//! use trie_map::trie::TrieString;
//!
//! let mut map = TrieString::new();
//! for word in ["zot", "foo", "bar"] {
//!     map.insert(word.to_string(), word.len())?;
//! }
//! let keys: Vec<&String> = map.keys().iter().collect();
//! assert_eq!(vec!["bar", "foo", "zot"], keys);
//! # Ok::<(), trie_map::error::TrieError>(())
//! ```
//!
//! The map is not synchronised. Share it between threads only behind
//! external locking.

use crate::error::TrieError;
use crate::iterator::{EntryView, Iter, KeyView, ValueView};
use crate::key::{Decompose, TrieAtom, TrieKey};
use crate::logger::trace;
use crate::node::{Edge, Entry, NodeId, Nodes, ROOT};
use std::borrow::Borrow;
use std::fmt;

#[cfg(feature = "serde")]
use serde_crate::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

/// Stores each key as a path of atom nodes, with the value on the last one.
#[derive(Clone)]
pub struct TrieMap<K, A, V> {
    pub(crate) nodes: Nodes<K, A, V>,
    len: usize,
    modifications: u64,
}

/// A map keyed by `String`, one node per char.
pub type TrieString<V> = TrieMap<String, char, V>;

/// A map keyed by `Vec<A>`, one node per element.
pub type TrieVec<A, V> = TrieMap<Vec<A>, A, V>;

impl<K, A: TrieAtom, V> Default for TrieMap<K, A, V> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<K, A: TrieAtom, V> TrieMap<K, A, V> {
    /// Create a new TrieMap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new TrieMap with room for `nodes` nodes before the node
    /// arena reallocates.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            nodes: Nodes::with_capacity(nodes),
            len: 0,
            modifications: 0,
        }
    }

    /// How many entries does the map contain?
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Is the map empty?
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove every entry.
    ///
    /// This counts as a modification: cursors created before the call fail
    /// on their next use.
    pub fn clear(&mut self) {
        trace!("clearing {} entries", self.len);
        self.nodes.clear();
        self.len = 0;
        self.modifications += 1;
    }

    /// Is `value` stored under any key?
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.nodes.contains_value(ROOT, value)
    }

    /// Create an iterator over the entries, in pre-order.
    pub fn iter(&self) -> Iter<'_, K, A, V> {
        Iter::new(self)
    }

    /// Live view of the entries.
    pub fn entries(&self) -> EntryView<&Self> {
        EntryView::new(self)
    }

    /// Live view of the entries which can remove from the map.
    pub fn entries_mut(&mut self) -> EntryView<&mut Self> {
        EntryView::new(self)
    }

    /// Live view of the keys.
    pub fn keys(&self) -> KeyView<&Self> {
        KeyView::new(self)
    }

    /// Live view of the keys which can remove from the map.
    pub fn keys_mut(&mut self) -> KeyView<&mut Self> {
        KeyView::new(self)
    }

    /// Live view of the values.
    pub fn values(&self) -> ValueView<&Self> {
        ValueView::new(self)
    }

    /// Live view of the values which can remove from the map.
    pub fn values_mut(&mut self) -> ValueView<&mut Self> {
        ValueView::new(self)
    }

    /// Current value of the modification counter.
    pub(crate) fn modifications(&self) -> u64 {
        self.modifications
    }

    /// Remove the entry held by `id`, pruning the path behind it.
    pub(crate) fn remove_node(&mut self, id: NodeId) -> Option<(K, V)> {
        let (entry, pruned) = self.nodes.remove_entry(id);
        let Entry { key, value } = entry?;
        trace!("removed entry at node {}, pruned {} nodes", id, pruned);
        self.len -= 1;
        self.modifications += 1;
        Some((key, value))
    }
}

impl<K: TrieKey<A>, A: TrieAtom, V> TrieMap<K, A, V> {
    /// Insert the key and value into the map. If the key is already
    /// present the value is replaced. Returns the previously associated
    /// value.
    ///
    /// Every insert counts as a modification, overwrites included.
    pub fn insert(&mut self, key: K, value: V) -> Result<Option<V>, TrieError> {
        let atoms = key.decompose()?;
        let (id, created) = self.nodes.find_or_create(ROOT, Edge::path(atoms));
        if created > 0 {
            trace!("created {} nodes ending at node {}", created, id);
        }
        let old = self.nodes.set_entry(id, key, value);
        if old.is_none() {
            self.len += 1;
        }
        self.modifications += 1;
        Ok(old.map(|entry| entry.value))
    }

    /// Insert every pair from `pairs`. Stops at the first key the codec
    /// rejects; pairs before it stay inserted.
    pub fn insert_all<I: IntoIterator<Item = (K, V)>>(
        &mut self,
        pairs: I,
    ) -> Result<(), TrieError> {
        for (key, value) in pairs {
            self.insert(key, value)?;
        }
        Ok(())
    }

    /// Build a map from `pairs`, failing on the first rejected key.
    pub fn try_from_iter<I: IntoIterator<Item = (K, V)>>(pairs: I) -> Result<Self, TrieError> {
        let mut map = Self::new();
        map.insert_all(pairs)?;
        Ok(map)
    }

    /// Get a reference to a key's associated value.
    pub fn get<Q>(&self, key: &Q) -> Result<Option<&V>, TrieError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Decompose<A> + PartialEq,
    {
        Ok(self
            .locate(key)?
            .and_then(|id| self.nodes[id].entry.as_ref())
            .map(|entry| &entry.value))
    }

    /// Get a mutable reference to a key's associated value. Changing a
    /// value in place is not a modification.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Result<Option<&mut V>, TrieError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Decompose<A> + PartialEq,
    {
        Ok(match self.locate(key)? {
            Some(id) => self.nodes[id].entry.as_mut().map(|entry| &mut entry.value),
            None => None,
        })
    }

    /// Does the map contain the supplied key?
    pub fn contains_key<Q>(&self, key: &Q) -> Result<bool, TrieError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Decompose<A> + PartialEq,
    {
        Ok(self.locate(key)?.is_some())
    }

    /// Remove the key from the map, returning its value if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<Option<V>, TrieError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Decompose<A> + PartialEq,
    {
        Ok(self.remove_entry(key)?.map(|(_, value)| value))
    }

    /// Remove the key from the map, returning the stored key and value if
    /// it was present.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Result<Option<(K, V)>, TrieError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Decompose<A> + PartialEq,
    {
        Ok(match self.locate(key)? {
            Some(id) => self.remove_node(id),
            None => None,
        })
    }

    /// Find the node holding `key`. The stored key must also compare equal,
    /// which guards against codecs mapping two keys to the same atoms.
    pub(crate) fn locate<Q>(&self, key: &Q) -> Result<Option<NodeId>, TrieError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Decompose<A> + PartialEq,
    {
        let atoms = key.decompose()?;
        Ok(self.nodes.find(ROOT, Edge::path(atoms)).filter(|&id| {
            self.nodes[id]
                .entry
                .as_ref()
                .is_some_and(|entry| <K as Borrow<Q>>::borrow(&entry.key) == key)
        }))
    }

    /// Verify the structure of the trie.
    ///
    /// Checks that no node is left without both entry and children, that
    /// parent links mirror the child edges, that every stored key matches
    /// the key rebuilt from its path and that the entry count is accurate.
    pub fn check(&self) -> Result<(), TrieError>
    where
        K: PartialEq,
    {
        let mut visited = 0;
        let mut entries = 0;
        for id in self.nodes.stream(ROOT) {
            visited += 1;
            let node = &self.nodes[id];
            if id != ROOT && node.is_dead() {
                return Err(TrieError::Inconsistent(format!(
                    "node {id} has neither entry nor children"
                )));
            }
            for (&edge, &child) in &node.children {
                if edge == Edge::Origin && id != ROOT {
                    return Err(TrieError::Inconsistent(format!(
                        "origin edge below node {id}"
                    )));
                }
                match self.nodes.get(child) {
                    Some(c) if c.parent == Some(id) && c.edge == Some(edge) => {}
                    _ => {
                        return Err(TrieError::Inconsistent(format!(
                            "edge {edge:?} of node {id} does not lead back to it"
                        )))
                    }
                }
            }
            if let Some(entry) = &node.entry {
                entries += 1;
                let path = self.nodes.path(id);
                let key = K::recompose(Edge::atoms(&path).as_deref())?;
                if key != entry.key {
                    return Err(TrieError::Inconsistent(format!(
                        "key stored at {path:?} does not match its path"
                    )));
                }
            }
        }
        if entries != self.len {
            return Err(TrieError::Inconsistent(format!(
                "{entries} entries found, {} counted",
                self.len
            )));
        }
        if visited != self.nodes.live() {
            return Err(TrieError::Inconsistent(format!(
                "{} nodes allocated, {visited} reachable",
                self.nodes.live()
            )));
        }
        debug_assert_eq!(entries, self.nodes.count_entries(ROOT));
        Ok(())
    }
}

impl<K: fmt::Debug, A: TrieAtom, V: fmt::Debug> fmt::Debug for TrieMap<K, A, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, A: TrieAtom, V: PartialEq> PartialEq for TrieMap<K, A, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K: Eq, A: TrieAtom, V: Eq> Eq for TrieMap<K, A, V> {}

#[cfg(feature = "serde")]
impl<K, A, V> Serialize for TrieMap<K, A, V>
where
    K: Serialize,
    A: TrieAtom,
    V: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, K, A, V> Deserialize<'de> for TrieMap<K, A, V>
where
    K: TrieKey<A> + Deserialize<'de>,
    A: TrieAtom,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TrieMapVisitor<K, A, V>(std::marker::PhantomData<fn() -> TrieMap<K, A, V>>);

        impl<'de, K, A, V> Visitor<'de> for TrieMapVisitor<K, A, V>
        where
            K: TrieKey<A> + Deserialize<'de>,
            A: TrieAtom,
            V: Deserialize<'de>,
        {
            type Value = TrieMap<K, A, V>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
                let mut map = TrieMap::new();
                while let Some((key, value)) = access.next_entry()? {
                    map.insert(key, value)
                        .map_err(<M::Error as serde_crate::de::Error>::custom)?;
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(TrieMapVisitor(std::marker::PhantomData))
    }
}
