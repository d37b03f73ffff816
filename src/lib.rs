//! In-memory library management: a book catalog, registered users, a
//! reservation queue, borrow/return rules and a value-based book selection.
//!
//! All state lives in a [`Library`] session owned by the caller. Nothing is
//! persisted and nothing is shared between threads.

pub mod book;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod library;
pub mod observers;
pub mod reservation;
pub mod selection;
pub mod users;

pub use book::{Book, BookId};
pub use catalog::Catalog;
pub use config::{LibraryConfig, SeedData};
pub use engine::{BorrowReceipt, ReturnReceipt, Suggestion};
pub use error::{ConfigError, LibraryError};
pub use events::LibraryEvent;
pub use library::{ActivityRecord, Library, ProcessingReport, ReservationOutcome};
pub use observers::LibraryObserver;
pub use reservation::{Priority, Reservation, ReservationPolicy};
pub use selection::Selection;
pub use users::{User, UserId, UserRegistry};
