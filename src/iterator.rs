//! Provides TrieMap iterators, views and cursors.
//!
//! There are two ways to walk a map. Both visit entries in the same
//! depth first, pre-order sequence.
//!
//! [`Iter`], [`Keys`] and [`Values`] borrow the map, so the compiler
//! rules out modification while they are alive.
//!
//! A [`Cursor`] borrows nothing. It keeps node indices and the map's
//! modification count, and each call is handed the map explicitly. This
//! allows removing the entry just returned while the walk continues, and
//! any other modification made behind the cursor's back is reported as
//! [`TrieError::ConcurrentModification`] on its next use.
//!
//! ```
//! use trie_map::trie::TrieString;
//!
//! let mut map = TrieString::new();
//! for word in ["bar", "foo", "zot"] {
//!     map.insert(word.to_string(), word.to_uppercase())?;
//! }
//!
//! let mut cursor = map.entries().cursor();
//! while let Some((key, _)) = cursor.next(&map)? {
//!     if key.starts_with('f') {
//!         cursor.remove(&mut map)?;
//!     }
//! }
//! assert_eq!(2, map.len());
//! assert!(!map.contains_key("foo")?);
//! # Ok::<(), trie_map::error::TrieError>(())
//! ```

use crate::error::TrieError;
use crate::key::{Decompose, TrieAtom, TrieKey};
use crate::logger::debug;
use crate::node::{Entry, NodeId, Nodes, Preorder, ROOT};
use crate::trie::TrieMap;
use std::borrow::Borrow;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

/// Iterator over the entries of a TrieMap.
#[derive(Debug)]
pub struct Iter<'a, K, A, V> {
    nodes: &'a Nodes<K, A, V>,
    walk: Preorder,
    remaining: usize,
}

impl<'a, K, A: TrieAtom, V> Iter<'a, K, A, V> {
    pub(crate) fn new(map: &'a TrieMap<K, A, V>) -> Self {
        Self {
            nodes: &map.nodes,
            walk: Preorder::new(ROOT),
            remaining: map.len(),
        }
    }
}

impl<'a, K, A: TrieAtom, V> Iterator for Iter<'a, K, A, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes;
        let id = self.walk.advance_to_entry(nodes)?;
        self.remaining -= 1;
        nodes[id]
            .entry
            .as_ref()
            .map(|entry| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, A: TrieAtom, V> ExactSizeIterator for Iter<'_, K, A, V> {}

impl<K, A: TrieAtom, V> FusedIterator for Iter<'_, K, A, V> {}

/// Iterator over the keys of a TrieMap.
#[derive(Debug)]
pub struct Keys<'a, K, A, V> {
    inner: Iter<'a, K, A, V>,
}

impl<'a, K, A: TrieAtom, V> Iterator for Keys<'a, K, A, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, A: TrieAtom, V> ExactSizeIterator for Keys<'_, K, A, V> {}

/// Iterator over the values of a TrieMap.
#[derive(Debug)]
pub struct Values<'a, K, A, V> {
    inner: Iter<'a, K, A, V>,
}

impl<'a, K, A: TrieAtom, V> Iterator for Values<'a, K, A, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, A: TrieAtom, V> ExactSizeIterator for Values<'_, K, A, V> {}

/// Consuming iterator over a TrieMap.
#[derive(Debug)]
pub struct TrieIntoIterator<K, A, V> {
    nodes: Nodes<K, A, V>,
    order: std::vec::IntoIter<NodeId>,
}

impl<K, A: TrieAtom, V> IntoIterator for TrieMap<K, A, V> {
    type Item = (K, V);
    type IntoIter = TrieIntoIterator<K, A, V>;

    fn into_iter(self) -> Self::IntoIter {
        let nodes = self.nodes;
        // Fix the visiting order before any entry is taken out.
        let order: Vec<NodeId> = nodes
            .stream(ROOT)
            .filter(|&id| nodes[id].has_entry())
            .collect();
        TrieIntoIterator {
            nodes,
            order: order.into_iter(),
        }
    }
}

impl<K, A: TrieAtom, V> Iterator for TrieIntoIterator<K, A, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.order.next()?;
        self.nodes
            .take_entry(id)
            .map(|Entry { key, value }| (key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<K, A: TrieAtom, V> ExactSizeIterator for TrieIntoIterator<K, A, V> {}

impl<'a, K, A: TrieAtom, V> IntoIterator for &'a TrieMap<K, A, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, A, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Cursor projection yielding `(&K, &V)`.
#[derive(Debug)]
pub enum ByEntry {}

/// Cursor projection yielding `&K`.
#[derive(Debug)]
pub enum ByKey {}

/// Cursor projection yielding `&V`.
#[derive(Debug)]
pub enum ByValue {}

pub type EntryCursor<K, A, V> = Cursor<K, A, V, ByEntry>;
pub type KeyCursor<K, A, V> = Cursor<K, A, V, ByKey>;
pub type ValueCursor<K, A, V> = Cursor<K, A, V, ByValue>;

/// Fail-fast, removal capable walk over a TrieMap.
///
/// The cursor must only be used with the map that created it. Handed
/// another map it returns errors or unrelated entries, but never panics.
#[derive(Debug)]
pub struct Cursor<K, A, V, P> {
    walk: Preorder,
    next: Option<NodeId>,
    last: Option<NodeId>,
    expected: u64,
    marker: PhantomData<fn() -> (K, A, V, P)>,
}

impl<K, A: TrieAtom, V, P> Clone for Cursor<K, A, V, P> {
    fn clone(&self) -> Self {
        Self {
            walk: self.walk.clone(),
            next: self.next,
            last: self.last,
            expected: self.expected,
            marker: PhantomData,
        }
    }
}

impl<K, A: TrieAtom, V, P> Cursor<K, A, V, P> {
    pub(crate) fn new(map: &TrieMap<K, A, V>) -> Self {
        let mut walk = Preorder::new(ROOT);
        let next = walk.advance_to_entry(&map.nodes);
        Self {
            walk,
            next,
            last: None,
            expected: map.modifications(),
            marker: PhantomData,
        }
    }

    /// Is there another entry to return?
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    fn check(&self, map: &TrieMap<K, A, V>) -> Result<(), TrieError> {
        let actual = map.modifications();
        if actual != self.expected {
            return Err(TrieError::ConcurrentModification {
                expected: self.expected,
                actual,
            });
        }
        Ok(())
    }

    fn advance<'m>(
        &mut self,
        map: &'m TrieMap<K, A, V>,
    ) -> Result<Option<&'m Entry<K, V>>, TrieError> {
        self.check(map)?;
        let Some(id) = self.next else {
            return Ok(None);
        };
        let entry = map
            .nodes
            .get(id)
            .and_then(|node| node.entry.as_ref())
            .ok_or(TrieError::ConcurrentModification {
                expected: self.expected,
                actual: map.modifications(),
            })?;
        self.last = Some(id);
        self.next = self.walk.advance_to_entry(&map.nodes);
        Ok(Some(entry))
    }

    /// Remove the entry most recently returned by `next`, returning it.
    ///
    /// The cursor stays valid and continues with the following entry.
    pub fn remove(&mut self, map: &mut TrieMap<K, A, V>) -> Result<(K, V), TrieError> {
        let last = self.last.ok_or(TrieError::IllegalIteratorState)?;
        self.check(map)?;
        self.last = None;
        if !map.nodes.get(last).is_some_and(|node| node.has_entry()) {
            return Err(TrieError::IllegalIteratorState);
        }
        let removed = map
            .remove_node(last)
            .ok_or(TrieError::IllegalIteratorState)?;
        debug!("cursor removed entry at node {}", last);
        self.expected = map.modifications();
        Ok(removed)
    }
}

impl<K, A: TrieAtom, V> Cursor<K, A, V, ByEntry> {
    /// Return the next entry, or `None` once the walk is complete.
    pub fn next<'m>(
        &mut self,
        map: &'m TrieMap<K, A, V>,
    ) -> Result<Option<(&'m K, &'m V)>, TrieError> {
        Ok(self
            .advance(map)?
            .map(|entry| (&entry.key, &entry.value)))
    }
}

impl<K, A: TrieAtom, V> Cursor<K, A, V, ByKey> {
    /// Return the next key, or `None` once the walk is complete.
    pub fn next<'m>(&mut self, map: &'m TrieMap<K, A, V>) -> Result<Option<&'m K>, TrieError> {
        Ok(self.advance(map)?.map(|entry| &entry.key))
    }
}

impl<K, A: TrieAtom, V> Cursor<K, A, V, ByValue> {
    /// Return the next value, or `None` once the walk is complete.
    pub fn next<'m>(&mut self, map: &'m TrieMap<K, A, V>) -> Result<Option<&'m V>, TrieError> {
        Ok(self.advance(map)?.map(|entry| &entry.value))
    }
}

/// Live view of the entries of a map. `M` is `&TrieMap` or `&mut TrieMap`;
/// the mutable form can also remove.
#[derive(Debug)]
pub struct EntryView<M> {
    map: M,
}

/// Live view of the keys of a map.
#[derive(Debug)]
pub struct KeyView<M> {
    map: M,
}

/// Live view of the values of a map.
#[derive(Debug)]
pub struct ValueView<M> {
    map: M,
}

macro_rules! common_view {
    ($view:ident, $cursor:ident) => {
        impl<M> $view<M> {
            pub(crate) fn new(map: M) -> Self {
                Self { map }
            }
        }

        impl<K, A: TrieAtom, V, M: Deref<Target = TrieMap<K, A, V>>> $view<M> {
            /// Entries in the underlying map.
            pub fn len(&self) -> usize {
                self.map.len()
            }

            pub fn is_empty(&self) -> bool {
                self.map.is_empty()
            }

            /// Start a fail-fast cursor at the first entry.
            pub fn cursor(&self) -> $cursor<K, A, V> {
                Cursor::new(&*self.map)
            }
        }

        impl<K, A: TrieAtom, V, M: DerefMut<Target = TrieMap<K, A, V>>> $view<M> {
            /// Clear the underlying map.
            pub fn clear(&mut self) {
                self.map.clear()
            }
        }
    };
}

common_view!(EntryView, EntryCursor);
common_view!(KeyView, KeyCursor);
common_view!(ValueView, ValueCursor);

impl<'a, K, A: TrieAtom, V> EntryView<&'a TrieMap<K, A, V>> {
    /// The iterator borrows the map, so it may outlive the view.
    pub fn iter(&self) -> Iter<'a, K, A, V> {
        self.map.iter()
    }
}

impl<K, A: TrieAtom, V> EntryView<&mut TrieMap<K, A, V>> {
    pub fn iter(&self) -> Iter<'_, K, A, V> {
        self.map.iter()
    }
}

impl<'a, K, A: TrieAtom, V> IntoIterator for EntryView<&'a TrieMap<K, A, V>> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, A, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.iter()
    }
}

impl<'a, K, A: TrieAtom, V> IntoIterator for KeyView<&'a TrieMap<K, A, V>> {
    type Item = &'a K;
    type IntoIter = Keys<'a, K, A, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, A: TrieAtom, V> IntoIterator for ValueView<&'a TrieMap<K, A, V>> {
    type Item = &'a V;
    type IntoIter = Values<'a, K, A, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: TrieKey<A>, A: TrieAtom, V: PartialEq, M: Deref<Target = TrieMap<K, A, V>>>
    EntryView<M>
{
    /// Is `key` present and mapped to `value`?
    pub fn contains<Q>(&self, key: &Q, value: &V) -> Result<bool, TrieError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Decompose<A> + PartialEq,
    {
        Ok(self.map.get(key)? == Some(value))
    }
}

impl<K: TrieKey<A>, A: TrieAtom, V: PartialEq, M: DerefMut<Target = TrieMap<K, A, V>>>
    EntryView<M>
{
    /// Remove `key` only if it is mapped to `value`.
    pub fn remove<Q>(&mut self, key: &Q, value: &V) -> Result<bool, TrieError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Decompose<A> + PartialEq,
    {
        let map = &mut *self.map;
        let Some(id) = map.locate(key)? else {
            return Ok(false);
        };
        if map.nodes[id].entry.as_ref().map(|entry| &entry.value) != Some(value) {
            return Ok(false);
        }
        Ok(map.remove_node(id).is_some())
    }
}

impl<'a, K, A: TrieAtom, V> KeyView<&'a TrieMap<K, A, V>> {
    pub fn iter(&self) -> Keys<'a, K, A, V> {
        Keys {
            inner: self.map.iter(),
        }
    }
}

impl<K, A: TrieAtom, V> KeyView<&mut TrieMap<K, A, V>> {
    pub fn iter(&self) -> Keys<'_, K, A, V> {
        Keys {
            inner: self.map.iter(),
        }
    }
}

impl<K: TrieKey<A>, A: TrieAtom, V, M: Deref<Target = TrieMap<K, A, V>>> KeyView<M> {
    pub fn contains<Q>(&self, key: &Q) -> Result<bool, TrieError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Decompose<A> + PartialEq,
    {
        self.map.contains_key(key)
    }
}

impl<K: TrieKey<A>, A: TrieAtom, V, M: DerefMut<Target = TrieMap<K, A, V>>> KeyView<M> {
    /// Remove `key`, reporting whether it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<bool, TrieError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Decompose<A> + PartialEq,
    {
        Ok(self.map.remove_entry(key)?.is_some())
    }
}

impl<'a, K, A: TrieAtom, V> ValueView<&'a TrieMap<K, A, V>> {
    pub fn iter(&self) -> Values<'a, K, A, V> {
        Values {
            inner: self.map.iter(),
        }
    }
}

impl<K, A: TrieAtom, V> ValueView<&mut TrieMap<K, A, V>> {
    pub fn iter(&self) -> Values<'_, K, A, V> {
        Values {
            inner: self.map.iter(),
        }
    }
}

impl<K, A: TrieAtom, V, M: Deref<Target = TrieMap<K, A, V>>> ValueView<M> {
    pub fn contains(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.map.contains_value(value)
    }
}

impl<K, A: TrieAtom, V: PartialEq, M: DerefMut<Target = TrieMap<K, A, V>>> ValueView<M> {
    /// Remove the first entry, in iteration order, holding `value`.
    pub fn remove(&mut self, value: &V) -> bool {
        let map = &mut *self.map;
        let found = map.nodes.stream(ROOT).find(|&id| {
            map.nodes[id]
                .entry
                .as_ref()
                .is_some_and(|entry| entry.value == *value)
        });
        match found {
            Some(id) => map.remove_node(id).is_some(),
            None => false,
        }
    }
}
