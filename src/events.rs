use serde::{Deserialize, Serialize};

use crate::{
    book::BookId,
    reservation::{Priority, Reservation},
    users::UserId,
};

/// Changes to library state, published to observers and kept in the history
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum LibraryEvent {
    /// A book entered the catalog
    BookAdded {
        /// Catalogued book
        book_id: BookId,
        /// Its title
        title: String,
    },
    /// A user was registered
    UserAdded {
        /// New user
        user_id: UserId,
        /// Their display name
        name: String,
    },
    /// A reservation entered the queue
    ReservationQueued(Reservation),
    /// A copy was lent
    Borrowed {
        /// Borrowing user
        user_id: UserId,
        /// Lent book
        book_id: BookId,
        /// Service class of the borrow
        priority: Priority,
        /// Copies left on the shelf
        remaining: u32,
    },
    /// A borrow was refused
    BorrowRefused {
        /// Requesting user
        user_id: UserId,
        /// Requested book
        book_id: BookId,
        /// Why it was refused
        reason: String,
    },
    /// A copy came back
    Returned {
        /// Returning user
        user_id: UserId,
        /// Returned book
        book_id: BookId,
        /// Copies on the shelf afterwards
        copies: u32,
    },
    /// The reservation queue was drained
    ReservationsProcessed {
        /// Reservations taken from the queue
        processed: usize,
        /// How many of them ended in a borrow
        fulfilled: usize,
    },
}
