//! Borrow and return rules applied to the catalog.
//!
//! A borrow never takes the last shelf copy. A return always adds a copy,
//! with no ceiling tied to how many copies were originally catalogued.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    book::{Book, BookId},
    catalog::Catalog,
    error::LibraryError,
    reservation::Priority,
    users::{UserId, UserRegistry},
};

/// A same-topic alternative offered when a borrow is refused
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Suggestion {
    /// Suggested book
    pub book_id: BookId,
    /// Its title
    pub title: String,
    /// Copies currently on the shelf
    pub copies: u32,
}

/// Outcome of a successful borrow
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BorrowReceipt {
    /// Borrowing user
    pub user_id: UserId,
    /// Name of the borrowing user
    pub user_name: String,
    /// Borrowed book
    pub book_id: BookId,
    /// Title of the borrowed book
    pub title: String,
    /// Service class the borrow ran under
    pub priority: Priority,
    /// Copies left on the shelf
    pub remaining: u32,
}

/// Outcome of a successful return
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReturnReceipt {
    /// Returning user
    pub user_id: UserId,
    /// Name of the returning user
    pub user_name: String,
    /// Returned book
    pub book_id: BookId,
    /// Title of the returned book
    pub title: String,
    /// Copies on the shelf after the return
    pub copies: u32,
}

/// Lend one copy of a book to a user
///
/// # Errors
///
/// - `LibraryError::UnknownUser` if the user is not registered
/// - `LibraryError::UnknownBook` if the book is not catalogued
/// - `LibraryError::InsufficientCopies` if one copy or fewer is on the
///   shelf; the error lists same-topic alternatives that can be lent
pub fn borrow(
    catalog: &mut Catalog,
    users: &UserRegistry,
    user_id: UserId,
    book_id: BookId,
    priority: Priority,
) -> Result<BorrowReceipt, LibraryError> {
    let user = users.lookup(user_id).ok_or(LibraryError::UnknownUser { user_id })?;
    let key = catalog.key_of(book_id).ok_or(LibraryError::UnknownBook { book_id })?;

    if let Some(book) = catalog.get(key).filter(|book| !book.can_lend()) {
        debug!(%user_id, %book_id, copies = book.copies, "borrow refused, last copy");
        return Err(LibraryError::InsufficientCopies {
            book_id,
            title: book.title.clone(),
            topic: book.topic.clone(),
            suggestions: suggest_alternatives(catalog, book),
        });
    }

    let book = catalog.get_mut(key).ok_or(LibraryError::UnknownBook { book_id })?;
    book.copies = book.copies.saturating_sub(1);
    debug!(%user_id, %book_id, remaining = book.copies, "book lent");

    Ok(BorrowReceipt {
        user_id,
        user_name: user.name.clone(),
        book_id,
        title: book.title.clone(),
        priority,
        remaining: book.copies,
    })
}

/// Take a copy of a book back onto the shelf
///
/// # Errors
///
/// - `LibraryError::UnknownUser` if the user is not registered
/// - `LibraryError::UnknownBook` if the book is not catalogued
pub fn return_book(
    catalog: &mut Catalog,
    users: &UserRegistry,
    user_id: UserId,
    book_id: BookId,
) -> Result<ReturnReceipt, LibraryError> {
    let user = users.lookup(user_id).ok_or(LibraryError::UnknownUser { user_id })?;
    let book = catalog
        .key_of(book_id)
        .and_then(|key| catalog.get_mut(key))
        .ok_or(LibraryError::UnknownBook { book_id })?;

    book.copies = book.copies.saturating_add(1);
    debug!(%user_id, %book_id, copies = book.copies, "book returned");

    Ok(ReturnReceipt {
        user_id,
        user_name: user.name.clone(),
        book_id,
        title: book.title.clone(),
        copies: book.copies,
    })
}

/// Lendable books sharing the refused book's topic, in title order
fn suggest_alternatives(catalog: &Catalog, refused: &Book) -> Vec<Suggestion> {
    catalog
        .by_topic(&refused.topic)
        .filter(|candidate| candidate.id != refused.id && candidate.can_lend())
        .map(|candidate| Suggestion {
            book_id: candidate.id,
            title: candidate.title.clone(),
            copies: candidate.copies,
        })
        .collect()
}
