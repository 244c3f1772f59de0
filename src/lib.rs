//! # Presage
//!
//! An instant in-memory prefix-search index for Rust, with subword
//! highlighting.
//!
//! Presage manages a collection of models (arbitrary user data) and answers
//! multi-word prefix queries over it in sub-linear time. It is designed to be
//! filled once and queried often: the index is rebuilt as a whole and
//! published atomically, so concurrent readers always observe a consistent
//! snapshot.
//!
//! ## Features
//!
//! - Compact patricia-style radix trie mapping every prefix of every indexed
//!   word to the words sharing it
//! - Conjunctive prefix and exact queries with results in insertion order
//! - Unicode case/diacritic folding (`"dóe"` finds `"Doe"`)
//! - Subword highlighting of result values, with an HTML-aware mode
//! - Lock-free snapshot publication; readers never block a rebuild
//!
//! ## Example
//!
//! ```
//! use presage::index::{PrefixSearch, TriePrefixIndex};
//!
//! let index = TriePrefixIndex::new(|s: &String| Some(s.clone()));
//! index.create_index(vec![
//!     "Der kleine Hobbit / J. R. R. Tolkien".to_string(),
//!     "Buddy / Bully Herbig".to_string(),
//! ]);
//!
//! let hits = index.search("hob tol");
//! assert_eq!(hits.len(), 1);
//! ```

pub mod analysis;
pub mod error;
pub mod highlight;
pub mod index;
pub mod trie;

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
