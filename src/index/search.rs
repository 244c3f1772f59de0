//! The query-side search surface and its derived views.

use std::marker::PhantomData;

use crate::index::engine::TriePrefixIndex;

/// Query operations of a prefix index.
///
/// All result lists and streams preserve the insertion order of the indexed
/// collection. Implementors only provide the two stream primitives; list
/// variants, limits and the [`Self::filter`]/[`Self::map`] views come for
/// free.
pub trait PrefixSearch<T: 'static> {
    /// Search for models matching every query word completely or as a
    /// prefix. The stream is lazy and must be consumed to do its work.
    fn search_stream(&self, query: &str) -> Box<dyn Iterator<Item = T> + '_>;

    /// Search for models matching every query word completely.
    fn search_exact_stream(&self, query: &str) -> Box<dyn Iterator<Item = T> + '_>;

    /// Collect the prefix-search results for a query.
    fn search(&self, query: &str) -> Vec<T> {
        self.search_stream(query).collect()
    }

    /// Collect at most `max_size` prefix-search results for a query; any
    /// further matches are not computed.
    fn search_limited(&self, query: &str, max_size: usize) -> Vec<T> {
        self.search_stream(query).take(max_size).collect()
    }

    /// Collect the exact-search results for a query.
    fn search_exact(&self, query: &str) -> Vec<T> {
        self.search_exact_stream(query).collect()
    }

    /// All indexed models, in insertion order.
    fn get_all(&self) -> Vec<T> {
        self.search("")
    }

    /// Derive a search that filters every result stream with the given
    /// predicate. Filters compose as a conjunction.
    fn filter<P>(self, predicate: P) -> Filtered<Self, P>
    where
        Self: Sized,
        P: Fn(&T) -> bool,
    {
        Filtered {
            base: self,
            predicate,
        }
    }

    /// Derive a search that maps every result through the given projection.
    fn map<U, F>(self, projection: F) -> Mapped<Self, F, T>
    where
        Self: Sized,
        F: Fn(T) -> U,
    {
        Mapped {
            base: self,
            projection,
            _source: PhantomData,
        }
    }
}

impl<T: Clone + 'static> PrefixSearch<T> for TriePrefixIndex<T> {
    fn search_stream(&self, query: &str) -> Box<dyn Iterator<Item = T> + '_> {
        Box::new(TriePrefixIndex::search_stream(self, query))
    }

    fn search_exact_stream(&self, query: &str) -> Box<dyn Iterator<Item = T> + '_> {
        Box::new(TriePrefixIndex::search_exact_stream(self, query))
    }
}

/// Searches can be taken by reference, so an index can hand out views
/// without being consumed.
impl<T: 'static, S: PrefixSearch<T> + ?Sized> PrefixSearch<T> for &S {
    fn search_stream(&self, query: &str) -> Box<dyn Iterator<Item = T> + '_> {
        (**self).search_stream(query)
    }

    fn search_exact_stream(&self, query: &str) -> Box<dyn Iterator<Item = T> + '_> {
        (**self).search_exact_stream(query)
    }
}

/// A search view applying a predicate to all results of a base search.
pub struct Filtered<S, P> {
    base: S,
    predicate: P,
}

impl<T: 'static, S, P> PrefixSearch<T> for Filtered<S, P>
where
    S: PrefixSearch<T>,
    P: Fn(&T) -> bool,
{
    fn search_stream(&self, query: &str) -> Box<dyn Iterator<Item = T> + '_> {
        let predicate = &self.predicate;
        Box::new(
            self.base
                .search_stream(query)
                .filter(move |model| predicate(model)),
        )
    }

    fn search_exact_stream(&self, query: &str) -> Box<dyn Iterator<Item = T> + '_> {
        let predicate = &self.predicate;
        Box::new(
            self.base
                .search_exact_stream(query)
                .filter(move |model| predicate(model)),
        )
    }
}

/// A search view projecting all results of a base search to another type.
pub struct Mapped<S, F, T> {
    base: S,
    projection: F,
    _source: PhantomData<fn(T)>,
}

impl<T: 'static, U: 'static, S, F> PrefixSearch<U> for Mapped<S, F, T>
where
    S: PrefixSearch<T>,
    F: Fn(T) -> U,
{
    fn search_stream(&self, query: &str) -> Box<dyn Iterator<Item = U> + '_> {
        let projection = &self.projection;
        Box::new(self.base.search_stream(query).map(projection))
    }

    fn search_exact_stream(&self, query: &str) -> Box<dyn Iterator<Item = U> + '_> {
        let projection = &self.projection;
        Box::new(self.base.search_exact_stream(query).map(projection))
    }
}
