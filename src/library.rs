use std::{collections::VecDeque, fmt};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    book::{Book, BookId},
    catalog::Catalog,
    config::{LibraryConfig, SeedData},
    engine::{self, BorrowReceipt, ReturnReceipt},
    error::LibraryError,
    events::LibraryEvent,
    observers::{ActivityLogger, LibraryObserver, LowStockNotifier},
    reservation::{Priority, Reservation, ReservationPolicy, ReservationQueue},
    selection::{self, Selection},
    users::{User, UserId, UserRegistry},
};

/// An entry in the activity history
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ActivityRecord {
    /// Position of the event since the session started
    pub sequence: u64,
    /// What happened
    pub event: LibraryEvent,
}

/// What happened to one reservation during processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationOutcome {
    /// The processed reservation
    pub reservation: Reservation,
    /// Borrow result; a failure is final, the reservation is not re-queued
    pub result: Result<BorrowReceipt, LibraryError>,
}

/// Result of draining the reservation queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingReport {
    /// The queue was empty; nothing changed
    NoReservations,
    /// Outcomes in service order
    Processed(Vec<ReservationOutcome>),
}

/// A library session: catalog, users and reservations with their observers
pub struct Library {
    /// Book records and their indexes
    catalog: Catalog,
    /// Registered users
    users: UserRegistry,
    /// Pending reservations
    reservations: ReservationQueue,
    /// Registered event observers
    observers: Vec<Box<dyn LibraryObserver>>,
    /// Most recent events, oldest first
    history: VecDeque<ActivityRecord>,
    /// Maximum number of history entries to keep
    history_limit: usize,
    /// Sequence number of the next event
    next_sequence: u64,
}

// Manual implementation of Debug for Library
impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("catalog", &self.catalog)
            .field("users", &self.users)
            .field("reservations", &self.reservations)
            .field("observers_count", &self.observers.len())
            .field("history", &self.history)
            .field("history_limit", &self.history_limit)
            .field("next_sequence", &self.next_sequence)
            .finish()
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::new(LibraryConfig::default())
    }
}

impl Library {
    /// Create an empty session without observers
    #[must_use]
    pub fn new(config: LibraryConfig) -> Self {
        Self {
            catalog: Catalog::new(),
            users: UserRegistry::new(),
            reservations: ReservationQueue::new(config.reservation_policy),
            observers: Vec::new(),
            history: VecDeque::new(),
            history_limit: config.history_limit,
            next_sequence: 0,
        }
    }

    /// Create an empty session with the standard logging observers
    #[must_use]
    pub fn with_default_observers(config: LibraryConfig) -> Self {
        let mut library = Self::new(config);
        library.register_observer(Box::new(ActivityLogger));
        library.register_observer(Box::new(LowStockNotifier));
        library
    }

    /// Register an observer to be notified of every event
    pub fn register_observer(&mut self, observer: Box<dyn LibraryObserver>) {
        self.observers.push(observer);
    }

    /// Load seed books and users, collecting the entries that were rejected
    pub fn apply_seed(&mut self, seed: SeedData) -> Vec<LibraryError> {
        let book_errors = seed.books.into_iter().filter_map(|book| self.add_book(book).err());
        let mut rejected: Vec<LibraryError> = book_errors.collect();
        rejected.extend(seed.users.into_iter().filter_map(|user| self.add_user(user).err()));
        rejected
    }

    /// Register a user
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::DuplicateUser` if the id is taken
    pub fn add_user(&mut self, user: User) -> Result<(), LibraryError> {
        let event = LibraryEvent::UserAdded { user_id: user.id, name: user.name.clone() };
        self.users.add(user)?;
        self.publish(event);
        Ok(())
    }

    /// The user registry
    #[must_use]
    pub fn users(&self) -> &UserRegistry {
        &self.users
    }

    /// User with this id
    #[must_use]
    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.lookup(id)
    }

    /// Add a book to the catalog
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::DuplicateBook` if a book with the same id is
    /// already catalogued; nothing is inserted
    pub fn add_book(&mut self, book: Book) -> Result<(), LibraryError> {
        if self.catalog.contains(book.id) {
            return Err(LibraryError::DuplicateBook { book_id: book.id });
        }
        let event = LibraryEvent::BookAdded { book_id: book.id, title: book.title.clone() };
        self.catalog.insert(book);
        self.publish(event);
        Ok(())
    }

    /// Whether a book with this id is catalogued
    #[must_use]
    pub fn contains_book(&self, id: BookId) -> bool {
        self.catalog.contains(id)
    }

    /// Book with this id
    #[must_use]
    pub fn find_book(&self, id: BookId) -> Option<&Book> {
        self.catalog.lookup(id)
    }

    /// The catalog
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Every book in ascending title order
    pub fn books_by_title(&self) -> impl Iterator<Item = &Book> {
        self.catalog.list_all()
    }

    /// Books on a topic in ascending title order
    pub fn books_by_topic<'a>(&'a self, topic: &'a str) -> impl Iterator<Item = &'a Book> + 'a {
        self.catalog.by_topic(topic)
    }

    /// Queue a reservation
    ///
    /// # Errors
    ///
    /// - `LibraryError::UnknownUser` if the user is not registered
    /// - `LibraryError::UnknownBook` if the book is not catalogued
    /// - `LibraryError::NormalReservationRejected` for a normal reservation
    ///   under [`ReservationPolicy::VipOnly`]
    pub fn submit_reservation(
        &mut self,
        user_id: UserId,
        book_id: BookId,
        priority: Priority,
    ) -> Result<Reservation, LibraryError> {
        if !self.users.contains(user_id) {
            return Err(LibraryError::UnknownUser { user_id });
        }
        if !self.catalog.contains(book_id) {
            return Err(LibraryError::UnknownBook { book_id });
        }
        let reservation = self.reservations.submit(&self.users, user_id, book_id, priority)?;
        self.publish(LibraryEvent::ReservationQueued(reservation));
        Ok(reservation)
    }

    /// Number of reservations waiting to be processed
    #[must_use]
    pub fn pending_reservations(&self) -> usize {
        self.reservations.len()
    }

    /// The reservation queue
    #[must_use]
    pub fn reservations(&self) -> &ReservationQueue {
        &self.reservations
    }

    /// Admission policy for reservations
    #[must_use]
    pub fn reservation_policy(&self) -> ReservationPolicy {
        self.reservations.policy()
    }

    /// Drain the queue, lending a copy for each reservation in service order
    pub fn process_reservations(&mut self) -> ProcessingReport {
        if self.reservations.is_empty() {
            debug!("no reservations to process");
            return ProcessingReport::NoReservations;
        }

        let mut outcomes = Vec::with_capacity(self.reservations.len());
        while let Some(reservation) = self.reservations.pop_next() {
            let result = self.borrow(reservation.user_id, reservation.book_id, reservation.priority);
            outcomes.push(ReservationOutcome { reservation, result });
        }

        let fulfilled = outcomes.iter().filter(|outcome| outcome.result.is_ok()).count();
        self.publish(LibraryEvent::ReservationsProcessed { processed: outcomes.len(), fulfilled });
        ProcessingReport::Processed(outcomes)
    }

    /// Lend a copy of a book
    ///
    /// # Errors
    ///
    /// See [`engine::borrow`]; refusals are also published as events
    pub fn borrow(
        &mut self,
        user_id: UserId,
        book_id: BookId,
        priority: Priority,
    ) -> Result<BorrowReceipt, LibraryError> {
        let result = engine::borrow(&mut self.catalog, &self.users, user_id, book_id, priority);
        let event = match &result {
            Ok(receipt) => LibraryEvent::Borrowed {
                user_id,
                book_id,
                priority,
                remaining: receipt.remaining,
            },
            Err(error) => LibraryEvent::BorrowRefused { user_id, book_id, reason: error.to_string() },
        };
        self.publish(event);
        result
    }

    /// Take a copy of a book back
    ///
    /// # Errors
    ///
    /// See [`engine::return_book`]
    pub fn return_book(
        &mut self,
        user_id: UserId,
        book_id: BookId,
    ) -> Result<ReturnReceipt, LibraryError> {
        let receipt = engine::return_book(&mut self.catalog, &self.users, user_id, book_id)?;
        self.publish(LibraryEvent::Returned { user_id, book_id, copies: receipt.copies });
        Ok(receipt)
    }

    /// Best-value choice of at most `capacity` books over the whole catalog
    #[must_use]
    pub fn select_books(&self, capacity: usize) -> Selection<'_> {
        selection::select(self.catalog.in_catalog_order(), capacity)
    }

    /// Recorded events, oldest first
    pub fn history(&self) -> impl Iterator<Item = &ActivityRecord> {
        self.history.iter()
    }

    /// Notify observers and record the event
    fn publish(&mut self, event: LibraryEvent) {
        for observer in &self.observers {
            observer.on_event(&event);
        }

        self.history.push_back(ActivityRecord { sequence: self.next_sequence, event });
        self.next_sequence = self.next_sequence.wrapping_add(1);

        // Maintain history size limit
        while self.history.len() > self.history_limit {
            self.history.pop_front();
        }
    }
}

#[cfg(test)]
mod tests;
