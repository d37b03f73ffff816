use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier of a book in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct BookId(pub i64);

impl From<i64> for BookId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A title held by the library, with its shelf stock and selection value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Book {
    /// Catalog identifier
    pub id: BookId,
    /// Title, used as the ordering key of the catalog
    pub title: String,
    /// Subject used for topic listings and borrow suggestions
    pub topic: String,
    /// Copies currently on the shelf
    pub copies: u32,
    /// Worth of the book when picking a selection
    pub value: i64,
}

impl Book {
    /// Create a new book record
    #[must_use]
    pub fn new(
        id: i64,
        title: impl Into<String>,
        topic: impl Into<String>,
        copies: u32,
        value: i64,
    ) -> Self {
        Self { id: BookId(id), title: title.into(), topic: topic.into(), copies, value }
    }

    /// Whether a copy can leave the shelf while one still stays behind
    #[must_use]
    pub fn can_lend(&self) -> bool {
        self.copies > 1
    }

    /// Whether the book may take part in a value selection
    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        self.copies > 0
    }
}
