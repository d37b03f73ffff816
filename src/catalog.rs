//! Book catalog: a single arena of book records with two secondary indexes.
//!
//! [`CatalogIndex`] answers exact id lookups and [`CatalogOrder`] walks the
//! books by title. Both hold [`BookKey`]s into the same arena, so a change
//! to a book's copies is visible through every view.

pub mod index;
pub mod order;

use tracing::debug;

use crate::book::{Book, BookId};

pub use index::CatalogIndex;
pub use order::{CatalogOrder, InOrder};

/// Stable position of a book in the catalog arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookKey(usize);

impl BookKey {
    /// Position in the arena
    #[must_use]
    pub const fn position(self) -> usize {
        self.0
    }
}

/// Owner of every book record in the library
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Book records in insertion order
    books: Vec<Book>,
    /// Id lookup
    index: CatalogIndex,
    /// Title order
    order: CatalogOrder,
}

impl Catalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a book and register it with both indexes
    ///
    /// Id uniqueness is not checked here; see [`Catalog::contains`].
    pub fn insert(&mut self, book: Book) -> BookKey {
        let key = BookKey(self.books.len());
        self.index.insert(book.id, key);
        self.order.insert(key, &book.title);
        debug!(book_id = %book.id, title = %book.title, "book catalogued");
        self.books.push(book);
        key
    }

    /// Whether a book with this id is catalogued
    #[must_use]
    pub fn contains(&self, id: BookId) -> bool {
        self.index.lookup(id).is_some()
    }

    /// Arena key of the book with this id
    #[must_use]
    pub fn key_of(&self, id: BookId) -> Option<BookKey> {
        self.index.lookup(id)
    }

    /// Book stored under a key
    #[must_use]
    pub fn get(&self, key: BookKey) -> Option<&Book> {
        self.books.get(key.0)
    }

    /// Mutable access to the book stored under a key
    pub(crate) fn get_mut(&mut self, key: BookKey) -> Option<&mut Book> {
        self.books.get_mut(key.0)
    }

    /// Book with this id
    #[must_use]
    pub fn lookup(&self, id: BookId) -> Option<&Book> {
        self.key_of(id).and_then(|key| self.get(key))
    }

    /// Every book in ascending title order
    pub fn list_all(&self) -> impl Iterator<Item = &Book> {
        self.order.iter().filter_map(|key| self.get(key))
    }

    /// Books on a topic in ascending title order
    pub fn by_topic<'a>(&'a self, topic: &'a str) -> impl Iterator<Item = &'a Book> + 'a {
        self.list_all().filter(move |book| book.topic == topic)
    }

    /// Every book in the order it was catalogued
    #[must_use]
    pub fn in_catalog_order(&self) -> &[Book] {
        &self.books
    }

    /// Number of catalogued books
    #[must_use]
    pub fn len(&self) -> usize {
        self.books.len()
    }

    /// Whether the catalog holds no books
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// The id index
    #[must_use]
    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    /// The title order
    #[must_use]
    pub fn order(&self) -> &CatalogOrder {
        &self.order
    }
}
