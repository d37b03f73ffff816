//! Error types for library operations and start-up configuration.
//!
//! Every [`LibraryError`] is recoverable: the caller reports it and carries
//! on with the next request.

use std::path::PathBuf;

use thiserror::Error;

use crate::{book::BookId, engine::Suggestion, users::UserId};

/// Errors raised by catalog, registry, reservation and lending operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    /// A user with this id is already registered
    #[error("user with ID {user_id} already exists")]
    DuplicateUser {
        /// The id that was already taken
        user_id: UserId,
    },

    /// A book with this id is already in the catalog
    #[error("book with ID {book_id} already exists, please use a unique ID")]
    DuplicateBook {
        /// The id that was already taken
        book_id: BookId,
    },

    /// No user is registered under this id
    #[error("user ID {user_id} not found")]
    UnknownUser {
        /// The id that was looked up
        user_id: UserId,
    },

    /// No book is catalogued under this id
    #[error("book ID {book_id} not found")]
    UnknownBook {
        /// The id that was looked up
        book_id: BookId,
    },

    /// Lending would take the last shelf copy
    #[error("cannot borrow '{title}' (ID: {book_id}): must keep at least one copy in the library")]
    InsufficientCopies {
        /// The requested book
        book_id: BookId,
        /// Title of the requested book
        title: String,
        /// Topic the suggestions were drawn from
        topic: String,
        /// Same-topic books that can still be lent, in title order
        suggestions: Vec<Suggestion>,
    },

    /// Only VIP reservations are queued under the current policy
    #[error("reservation for user ID {user_id} rejected: reservations are only for VIP members")]
    NormalReservationRejected {
        /// The user who asked for the reservation
        user_id: UserId,
    },
}

/// Errors raised while loading seed data at start-up
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The seed file could not be read
    #[error("failed to read seed file '{}': {source}", .path.display())]
    Read {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The seed data is not valid JSON for the expected shape
    #[error("invalid seed data: {0}")]
    Parse(#[from] serde_json::Error),
}
