//! Trie nodes and the arena which owns them.
//!
//! Every node is owned by the [`Nodes`] arena and addressed by a
//! [`NodeId`]. The parent → child edges held in `children` are the owning
//! structure; `parent` is a plain index back to the owner, used to rebuild
//! a node's key and to prune upwards after a removal.
//!
//! The root (always [`ROOT`]) holds the null key. Its only possible
//! [`Edge::Origin`] child holds the empty key, and every other key lives
//! below that origin node, one node per atom.

use crate::key::TrieAtom;
use std::collections::BTreeMap;
use std::ops::{Index, IndexMut};

pub(crate) type NodeId = usize;

/// The root node is never freed.
pub(crate) const ROOT: NodeId = 0;

/// Label on the edge between a node and its parent.
///
/// `Origin` sorts before every atom, so the empty key is visited before
/// any longer key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum Edge<A> {
    Origin,
    Atom(A),
}

impl<A: TrieAtom> Edge<A> {
    /// The edge path for a decomposed key. The null key (`None`) is the
    /// empty path and addresses the root itself.
    pub(crate) fn path(atoms: Option<Vec<A>>) -> impl Iterator<Item = Edge<A>> {
        atoms
            .map(|atoms| std::iter::once(Edge::Origin).chain(atoms.into_iter().map(Edge::Atom)))
            .into_iter()
            .flatten()
    }

    /// Inverse of [`Edge::path`].
    pub(crate) fn atoms(path: &[Edge<A>]) -> Option<Vec<A>> {
        let (first, rest) = path.split_first()?;
        debug_assert_eq!(*first, Edge::Origin);
        Some(
            rest.iter()
                .filter_map(|edge| match edge {
                    Edge::Atom(atom) => Some(*atom),
                    Edge::Origin => None,
                })
                .collect(),
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
}

#[derive(Clone, Debug)]
pub(crate) struct Node<K, A, V> {
    pub(crate) parent: Option<NodeId>,
    pub(crate) edge: Option<Edge<A>>,
    pub(crate) children: BTreeMap<Edge<A>, NodeId>,
    pub(crate) entry: Option<Entry<K, V>>,
}

impl<K, A, V> Node<K, A, V> {
    fn root() -> Self {
        Self {
            parent: None,
            edge: None,
            children: BTreeMap::new(),
            entry: None,
        }
    }

    fn child(parent: NodeId, edge: Edge<A>) -> Self {
        Self {
            parent: Some(parent),
            edge: Some(edge),
            children: BTreeMap::new(),
            entry: None,
        }
    }

    pub(crate) fn has_entry(&self) -> bool {
        self.entry.is_some()
    }

    /// A node with neither entry nor children is dead weight.
    pub(crate) fn is_dead(&self) -> bool {
        self.entry.is_none() && self.children.is_empty()
    }
}

/// Arena of trie nodes. Freed slots are recycled.
#[derive(Clone, Debug)]
pub(crate) struct Nodes<K, A, V> {
    slots: Vec<Option<Node<K, A, V>>>,
    free: Vec<NodeId>,
}

impl<K, A, V> Index<NodeId> for Nodes<K, A, V> {
    type Output = Node<K, A, V>;

    fn index(&self, id: NodeId) -> &Self::Output {
        match self.slots.get(id) {
            Some(Some(node)) => node,
            _ => panic!("node {id} is not live"),
        }
    }
}

impl<K, A, V> IndexMut<NodeId> for Nodes<K, A, V> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match self.slots.get_mut(id) {
            Some(Some(node)) => node,
            _ => panic!("node {id} is not live"),
        }
    }
}

impl<K, A: TrieAtom, V> Nodes<K, A, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity.max(1));
        slots.push(Some(Node::root()));
        Self {
            slots,
            free: vec![],
        }
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<K, A, V>> {
        self.slots.get(id).and_then(Option::as_ref)
    }

    /// Number of live nodes, the root included.
    pub(crate) fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    fn alloc(&mut self, node: Node<K, A, V>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, id: NodeId) {
        debug_assert_ne!(id, ROOT);
        self.slots[id] = None;
        self.free.push(id);
    }

    /// Walk `path` down from `from`. Returns `None` as soon as an edge is
    /// missing. An empty path finds `from` itself.
    pub(crate) fn find<P: IntoIterator<Item = Edge<A>>>(
        &self,
        from: NodeId,
        path: P,
    ) -> Option<NodeId> {
        let mut node = from;
        for edge in path {
            node = *self[node].children.get(&edge)?;
        }
        Some(node)
    }

    /// Walk `path` down from `from`, creating the missing suffix in one
    /// pass. Returns the final node and the number of nodes created.
    pub(crate) fn find_or_create<P: IntoIterator<Item = Edge<A>>>(
        &mut self,
        from: NodeId,
        path: P,
    ) -> (NodeId, usize) {
        let mut node = from;
        let mut edges = path.into_iter();
        while let Some(edge) = edges.next() {
            match self[node].children.get(&edge) {
                Some(&child) => node = child,
                None => {
                    node = self.attach(node, edge);
                    let mut created = 1;
                    for edge in edges.by_ref() {
                        node = self.attach(node, edge);
                        created += 1;
                    }
                    return (node, created);
                }
            }
        }
        (node, 0)
    }

    fn attach(&mut self, parent: NodeId, edge: Edge<A>) -> NodeId {
        let child = self.alloc(Node::child(parent, edge));
        self[parent].children.insert(edge, child);
        child
    }

    /// Install an entry, returning the one it replaces.
    pub(crate) fn set_entry(&mut self, id: NodeId, key: K, value: V) -> Option<Entry<K, V>> {
        self[id].entry.replace(Entry { key, value })
    }

    /// Take the entry of `id` without pruning. Only for consuming the arena.
    pub(crate) fn take_entry(&mut self, id: NodeId) -> Option<Entry<K, V>> {
        self[id].entry.take()
    }

    /// Clear the entry of `id` and prune whatever became dead. Returns the
    /// removed entry and the number of nodes pruned.
    pub(crate) fn remove_entry(&mut self, id: NodeId) -> (Option<Entry<K, V>>, usize) {
        let entry = self[id].entry.take();
        let pruned = if entry.is_some() { self.prune(id) } else { 0 };
        (entry, pruned)
    }

    /// Detach dead nodes from `id` upwards. The root is never detached.
    fn prune(&mut self, id: NodeId) -> usize {
        let mut node = id;
        let mut pruned = 0;
        while node != ROOT && self[node].is_dead() {
            let (parent, edge) = match (self[node].parent, self[node].edge) {
                (Some(parent), Some(edge)) => (parent, edge),
                _ => break,
            };
            self[parent].children.remove(&edge);
            self.release(node);
            pruned += 1;
            node = parent;
        }
        pruned
    }

    /// Drop every node but the root, and empty the root.
    pub(crate) fn clear(&mut self) {
        self.slots.truncate(1);
        self.free.clear();
        self.slots[ROOT] = Some(Node::root());
    }

    /// Depth first, pre-order walk of the subtree under `from`.
    pub(crate) fn stream(&self, from: NodeId) -> Stream<'_, K, A, V> {
        Stream {
            nodes: self,
            walk: Preorder::new(from),
        }
    }

    /// Short circuiting search for an entry holding `value`.
    pub(crate) fn contains_value(&self, from: NodeId, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.stream(from).any(|id| {
            self[id]
                .entry
                .as_ref()
                .is_some_and(|entry| entry.value == *value)
        })
    }

    /// Entry bearing nodes under `from`, counted by walking.
    pub(crate) fn count_entries(&self, from: NodeId) -> usize {
        self.stream(from).filter(|&id| self[id].has_entry()).count()
    }

    /// Edge labels from the root down to `id`.
    pub(crate) fn path(&self, id: NodeId) -> Vec<Edge<A>> {
        let mut path = vec![];
        let mut node = &self[id];
        while let (Some(edge), Some(parent)) = (node.edge, node.parent) {
            path.push(edge);
            node = &self[parent];
        }
        path.reverse();
        path
    }
}

/// Detached pre-order walk state. It holds only indices, so it can be
/// kept across calls that borrow the arena mutably.
#[derive(Clone, Debug, Default)]
pub(crate) struct Preorder {
    stack: Vec<NodeId>,
}

impl Preorder {
    pub(crate) fn new(from: NodeId) -> Self {
        Self { stack: vec![from] }
    }

    pub(crate) fn advance<K, A: TrieAtom, V>(&mut self, nodes: &Nodes<K, A, V>) -> Option<NodeId> {
        loop {
            let id = self.stack.pop()?;
            // Only a pruned sibling can be missing; skip it.
            if let Some(node) = nodes.get(id) {
                self.stack.extend(node.children.values().rev());
                return Some(id);
            }
        }
    }

    /// Advance to the next node holding an entry.
    pub(crate) fn advance_to_entry<K, A: TrieAtom, V>(
        &mut self,
        nodes: &Nodes<K, A, V>,
    ) -> Option<NodeId> {
        while let Some(id) = self.advance(nodes) {
            if nodes[id].has_entry() {
                return Some(id);
            }
        }
        None
    }
}

/// Lazy stream of node ids, produced in pre-order.
pub(crate) struct Stream<'a, K, A, V> {
    nodes: &'a Nodes<K, A, V>,
    walk: Preorder,
}

impl<K, A: TrieAtom, V> Iterator for Stream<'_, K, A, V> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        self.walk.advance(self.nodes)
    }
}
