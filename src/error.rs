//! Errors raised by trie operations.
//!
//! Absence of a key is never an error: lookups return `Option`. Errors
//! are reserved for keys the codec cannot handle and for misuse of a
//! [`crate::iterator::Cursor`].

use thiserror::Error;

/// Errors returned by [`crate::trie::TrieMap`] and its cursors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TrieError {
    /// The key codec could not turn a key into atoms, or atoms back into a key.
    #[error("unsupported key: {0}")]
    UnsupportedKey(String),

    /// The map was structurally modified after the cursor captured its state.
    #[error("map modified during iteration (expected modification {expected}, found {actual})")]
    ConcurrentModification {
        /// Counter value captured by the cursor
        expected: u64,
        /// Counter value of the map at the time of the call
        actual: u64,
    },

    /// `remove` was called before `next`, or twice for the same entry.
    #[error("no current entry to remove")]
    IllegalIteratorState,

    /// The structural checker found a broken invariant.
    #[error("inconsistent trie: {0}")]
    Inconsistent(String),
}
