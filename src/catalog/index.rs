//! Identifier lookup over the catalog's book arena.

use crate::{book::BookId, catalog::BookKey};

/// Number of fixed hash buckets
pub const BUCKET_COUNT: usize = 101;

/// Same modulus as [`BUCKET_COUNT`], in the id's integer domain
const BUCKET_MODULUS: i64 = 101;

/// Chained hash table from book id to arena key
///
/// The bucket count never changes and entries are never removed.
#[derive(Debug, Clone)]
pub struct CatalogIndex {
    /// One chain of `(id, key)` pairs per bucket
    buckets: Vec<Vec<(BookId, BookKey)>>,
}

impl Default for CatalogIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogIndex {
    /// Create an empty index
    #[must_use]
    pub fn new() -> Self {
        Self { buckets: vec![Vec::new(); BUCKET_COUNT] }
    }

    /// Bucket an id hashes to; negative ids wrap around
    fn bucket_of(id: BookId) -> usize {
        usize::try_from(id.0.rem_euclid(BUCKET_MODULUS)).unwrap_or_default()
    }

    /// Append an entry to the id's chain
    ///
    /// Duplicate ids are accepted; callers check for them first.
    pub fn insert(&mut self, id: BookId, key: BookKey) {
        if let Some(chain) = self.buckets.get_mut(Self::bucket_of(id)) {
            chain.push((id, key));
        }
    }

    /// Find the first entry for an id
    #[must_use]
    pub fn lookup(&self, id: BookId) -> Option<BookKey> {
        self.buckets
            .get(Self::bucket_of(id))?
            .iter()
            .find_map(|&(entry_id, key)| (entry_id == id).then_some(key))
    }

    /// Total number of entries across all chains
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Whether the index holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Length of the longest chain
    #[must_use]
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or_default()
    }
}
