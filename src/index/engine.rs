//! The trie-backed prefix index.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use arc_swap::ArcSwap;

use crate::analysis::splitter::{StringWordSplitter, WordSplitter};
use crate::highlight::{HighlightedString, SubwordHighlighter};
use crate::trie::Trie;

/// One generation of the index: the model list, the word-to-model-ids map,
/// and the trie mapping every prefix to the full words bearing it.
///
/// Snapshots are immutable once published. Search words are shared between
/// the inverted map and the trie payload sets.
struct IndexSnapshot<T> {
    /// All indexed models, addressed by their insertion position.
    models: Vec<T>,
    /// For each search word, the ids of the models containing it.
    words_to_models: AHashMap<Arc<str>, AHashSet<usize>>,
    /// For each non-empty prefix of a search word, the full words sharing
    /// that prefix.
    prefix_trie: Trie<AHashSet<Arc<str>>>,
}

impl<T> IndexSnapshot<T> {
    fn empty() -> Self {
        IndexSnapshot {
            models: Vec::new(),
            words_to_models: AHashMap::new(),
            prefix_trie: Trie::new(),
        }
    }
}

/// An in-memory prefix-search index over a collection of models.
///
/// The index is designed to be filled once with [`Self::create_index`] and
/// then queried from any number of threads. Rebuilding assembles a fresh
/// snapshot in isolation and publishes it with a single atomic store;
/// readers keep using the snapshot they started with, so queries are never
/// torn by a concurrent rebuild.
///
/// Models are split into search words by the data splitter; query strings
/// are split by the query splitter (by default an identity string splitter
/// that also serves as the highlighter).
pub struct TriePrefixIndex<T> {
    /// Splitter deriving search words from a model.
    data_splitter: Arc<dyn WordSplitter<T>>,
    /// Splitter deriving query words from a query string.
    query_splitter: Arc<dyn WordSplitter<str>>,
    /// Highlighter for marking query matches in model values.
    highlighter: Arc<dyn SubwordHighlighter>,
    /// The current snapshot.
    data: ArcSwap<IndexSnapshot<T>>,
}

impl<T: 'static> TriePrefixIndex<T> {
    /// Create an index whose models are indexed by the string the given
    /// projection extracts. Query splitting and highlighting use the
    /// default configuration (lowercase, Unicode folding, alphanumeric
    /// subwords).
    pub fn new(projection: impl Fn(&T) -> Option<String> + Send + Sync + 'static) -> Self {
        Self::with_data_splitter(Arc::new(StringWordSplitter::new(projection)))
    }

    /// Create an index with a custom data splitter and the default query
    /// splitter and highlighter.
    pub fn with_data_splitter(data_splitter: Arc<dyn WordSplitter<T>>) -> Self {
        let query_splitter = Arc::new(StringWordSplitter::identity());
        let highlighter = query_splitter.clone();
        Self::with_splitter_parts(data_splitter, query_splitter, highlighter)
    }

    /// Create an index with custom data and query splitters; the query
    /// splitter doubles as the highlighter.
    pub fn with_splitters(
        data_splitter: Arc<dyn WordSplitter<T>>,
        query_splitter: Arc<StringWordSplitter<str>>,
    ) -> Self {
        let highlighter = query_splitter.clone();
        Self::with_splitter_parts(data_splitter, query_splitter, highlighter)
    }

    /// Create an index from all three configurable parts.
    pub fn with_splitter_parts(
        data_splitter: Arc<dyn WordSplitter<T>>,
        query_splitter: Arc<dyn WordSplitter<str>>,
        highlighter: Arc<dyn SubwordHighlighter>,
    ) -> Self {
        TriePrefixIndex {
            data_splitter,
            query_splitter,
            highlighter,
            data: ArcSwap::from_pointee(IndexSnapshot::empty()),
        }
    }

    /// Build the index for the given models, replacing any previous
    /// contents.
    ///
    /// Model ids are assigned by enumeration order, which is also the order
    /// results are emitted in. The new snapshot becomes visible atomically
    /// once it is fully constructed; concurrent readers finish their
    /// queries on the snapshot they started with.
    pub fn create_index<I>(&self, models: I)
    where
        I: IntoIterator<Item = T>,
    {
        let mut model_data = Vec::new();
        let mut words_to_models: AHashMap<Arc<str>, AHashSet<usize>> = AHashMap::new();
        let mut all_words: BTreeSet<Arc<str>> = BTreeSet::new();

        for model in models {
            let model_id = model_data.len();
            if let Some(words) = self.data_splitter.split(&model) {
                for word in words {
                    if word.is_empty() {
                        // Exotic subword patterns can match nothing; an
                        // empty word has no prefixes and is never indexed.
                        continue;
                    }
                    let word: Arc<str> = match all_words.get(word.as_str()) {
                        Some(shared) => shared.clone(),
                        None => {
                            let shared: Arc<str> = Arc::from(word.as_str());
                            all_words.insert(shared.clone());
                            shared
                        }
                    };
                    words_to_models.entry(word).or_default().insert(model_id);
                }
            }
            model_data.push(model);
        }

        // Group the full words by every non-empty prefix.
        let mut words_by_prefix: AHashMap<String, AHashSet<Arc<str>>> = AHashMap::new();
        for word in &all_words {
            for end in char_boundaries(word) {
                words_by_prefix
                    .entry(word[..end].to_owned())
                    .or_default()
                    .insert(word.clone());
            }
        }

        // Inserting shorter prefixes first keeps edge splits predictable:
        // every insert extends an existing path or adds a leaf.
        let mut prefix_entries: Vec<(String, AHashSet<Arc<str>>)> =
            words_by_prefix.into_iter().collect();
        prefix_entries.sort_by(|a, b| a.0.len().cmp(&b.0.len()).then_with(|| a.0.cmp(&b.0)));

        let mut prefix_trie = Trie::new();
        for (prefix, words) in prefix_entries {
            prefix_trie.insert(&prefix, words);
        }

        self.data.store(Arc::new(IndexSnapshot {
            models: model_data,
            words_to_models,
            prefix_trie,
        }));
    }

    /// Search for models whose words contain every query word as a prefix.
    ///
    /// The returned iterator is lazy and pinned to the snapshot current at
    /// call time; it yields matching models in insertion order. A query
    /// with no extractable words matches everything.
    pub fn search_stream(&self, query: &str) -> SearchHits<T> {
        let snapshot = self.data.load_full();
        let filter = self.prefix_filter(&snapshot, query);
        SearchHits::new(snapshot, filter)
    }

    /// Search for models containing every query word exactly.
    pub fn search_exact_stream(&self, query: &str) -> SearchHits<T> {
        let snapshot = self.data.load_full();
        let filter = self.exact_filter(&snapshot, query);
        SearchHits::new(snapshot, filter)
    }

    /// Highlight the query's words in a model value.
    ///
    /// The query is split with the query splitter; an empty query leaves
    /// the value unhighlighted.
    pub fn get_highlighted(&self, value: &str, query: &str) -> HighlightedString {
        let query_words = self.query_splitter.split(query).unwrap_or_default();
        self.highlighter
            .highlight_subword_prefixes(value, &query_words)
    }

    /// Highlight the query's words in an HTML model value; simple tags are
    /// skipped over and never highlighted.
    pub fn get_highlighted_html(&self, value: &str, query: &str) -> HighlightedString {
        let query_words = self.query_splitter.split(query).unwrap_or_default();
        self.highlighter
            .highlight_subword_prefixes_html(value, &query_words)
    }

    /// Compute the id filter for a prefix query. `None` means no filtering;
    /// an empty set means the conjunction failed.
    fn prefix_filter(&self, snapshot: &IndexSnapshot<T>, query: &str) -> Option<AHashSet<usize>> {
        let query_words = match self.query_splitter.split(query) {
            Some(words) if !words.is_empty() => words,
            _ => return None,
        };

        let mut filtered: Option<AHashSet<usize>> = None;
        for query_word in &query_words {
            let Some(words_for_prefix) = snapshot.prefix_trie.get(query_word) else {
                // The prefix is unknown, so no model can match the query.
                return Some(AHashSet::new());
            };
            let mut ids_for_word = AHashSet::new();
            for word in words_for_prefix {
                if let Some(ids) = snapshot.words_to_models.get(word) {
                    ids_for_word.extend(ids.iter().copied());
                }
            }
            filtered = Some(intersect(filtered, ids_for_word));
        }
        filtered
    }

    /// Compute the id filter for an exact query.
    fn exact_filter(&self, snapshot: &IndexSnapshot<T>, query: &str) -> Option<AHashSet<usize>> {
        let query_words = match self.query_splitter.split(query) {
            Some(words) if !words.is_empty() => words,
            _ => return None,
        };

        let mut filtered: Option<AHashSet<usize>> = None;
        for query_word in &query_words {
            let ids_for_word = snapshot
                .words_to_models
                .get(query_word.as_str())
                .cloned()
                .unwrap_or_default();
            filtered = Some(intersect(filtered, ids_for_word));
        }
        filtered
    }
}

fn intersect(accumulated: Option<AHashSet<usize>>, ids: AHashSet<usize>) -> AHashSet<usize> {
    match accumulated {
        // The first id set seeds the intersection.
        None => ids,
        Some(previous) => previous.intersection(&ids).copied().collect(),
    }
}

/// Enumerate the byte positions of all non-empty prefixes of a word that
/// end on a character boundary, in ascending order.
fn char_boundaries(word: &str) -> impl Iterator<Item = usize> + '_ {
    word.char_indices()
        .map(|(i, _)| i)
        .skip(1)
        .chain(std::iter::once(word.len()))
}

impl<T: fmt::Debug> fmt::Debug for TriePrefixIndex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = self.data.load();
        f.debug_struct("TriePrefixIndex")
            .field("models", &snapshot.models.len())
            .field("words", &snapshot.words_to_models.len())
            .field("trie_depth", &snapshot.prefix_trie.depth())
            .finish()
    }
}

/// Lazy result stream of a search.
///
/// The stream holds the snapshot it was created from, so it keeps yielding
/// consistent results while the index is rebuilt concurrently. Models are
/// yielded in insertion order; each step costs one membership check.
pub struct SearchHits<T> {
    snapshot: Arc<IndexSnapshot<T>>,
    /// `None` means the query does not filter at all.
    filter: Option<AHashSet<usize>>,
    position: usize,
}

impl<T> SearchHits<T> {
    fn new(snapshot: Arc<IndexSnapshot<T>>, filter: Option<AHashSet<usize>>) -> Self {
        SearchHits {
            snapshot,
            filter,
            position: 0,
        }
    }
}

impl<T: Clone> Iterator for SearchHits<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        while self.position < self.snapshot.models.len() {
            let id = self.position;
            self.position += 1;
            let matches = match &self.filter {
                None => true,
                Some(ids) => ids.contains(&id),
            };
            if matches {
                return Some(self.snapshot.models[id].clone());
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.snapshot.models.len() - self.position;
        match &self.filter {
            None => (remaining, Some(remaining)),
            Some(ids) => (0, Some(remaining.min(ids.len()))),
        }
    }
}
