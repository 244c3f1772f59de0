//! The prefix-search index engine.
//!
//! [`TriePrefixIndex`] owns an atomically swappable snapshot (model list,
//! inverted word map, prefix trie) and answers conjunctive prefix and exact
//! queries over it. The [`PrefixSearch`] trait is the query-side surface; it
//! is also implemented by the [`Filtered`] and [`Mapped`] views, which
//! post-process result streams without touching the underlying snapshot.

pub mod engine;
pub mod search;

pub use engine::{SearchHits, TriePrefixIndex};
pub use search::{Filtered, Mapped, PrefixSearch};
