#[cfg(test)]
use std::{cell::RefCell, rc::Rc};

use crate::{
    book::{Book, BookId},
    config::{LibraryConfig, SeedData},
    error::LibraryError,
    events::LibraryEvent,
    library::{Library, ProcessingReport},
    observers::LibraryObserver,
    reservation::{Priority, ReservationPolicy},
    users::{User, UserId},
};

/// Observer that keeps every event it sees
#[derive(Debug, Default)]
struct Recorder {
    /// Shared with the test body
    events: Rc<RefCell<Vec<LibraryEvent>>>,
}

impl LibraryObserver for Recorder {
    fn on_event(&self, event: &LibraryEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}

/// Helper function to set up a seeded library
fn setup_test_library(policy: ReservationPolicy) -> Library {
    let mut library =
        Library::new(LibraryConfig { reservation_policy: policy, ..LibraryConfig::default() });
    assert!(library.apply_seed(SeedData::builtin()).is_empty());
    library
}

fn copies(library: &Library, id: i64) -> Option<u32> {
    library.find_book(BookId(id)).map(|book| book.copies)
}

#[test]
fn test_duplicate_book_is_rejected() {
    let mut library = setup_test_library(ReservationPolicy::VipOnly);

    let result = library.add_book(Book::new(101, "Another Gatsby", "Fiction", 1, 1));
    assert_eq!(result, Err(LibraryError::DuplicateBook { book_id: BookId(101) }));
    assert_eq!(library.catalog().len(), 3);
    assert_eq!(library.find_book(BookId(101)).map(|book| book.title.as_str()), Some("The Great Gatsby"));
}

#[test]
fn test_seed_reports_rejected_entries() {
    let mut library = Library::default();
    let mut seed = SeedData::builtin();
    seed.users.push(User::new(2, "Duplicate"));

    let rejected = library.apply_seed(seed);
    assert_eq!(rejected, vec![LibraryError::DuplicateUser { user_id: UserId(2) }]);
    assert_eq!(library.users().len(), 3);
}

#[test]
fn test_borrow_is_visible_in_title_and_topic_views() {
    let mut library = setup_test_library(ReservationPolicy::VipOnly);

    assert!(library.borrow(UserId(1), BookId(102), Priority::Normal).is_ok());

    let listed = library.books_by_title().find(|book| book.id == BookId(102)).map(|b| b.copies);
    let by_topic: Vec<u32> = library.books_by_topic("History").map(|book| book.copies).collect();
    assert_eq!(listed, Some(2));
    assert_eq!(by_topic, vec![2]);
}

#[test]
#[allow(clippy::panic)]
fn test_vip_reservations_drain_by_user_id() {
    let mut library = setup_test_library(ReservationPolicy::VipOnly);
    assert!(library.add_user(User::new(5, "Rumi")).is_ok());

    assert!(library.submit_reservation(UserId(5), BookId(101), Priority::Vip).is_ok());
    assert!(library.submit_reservation(UserId(2), BookId(103), Priority::Vip).is_ok());
    assert_eq!(library.pending_reservations(), 2);

    let ProcessingReport::Processed(outcomes) = library.process_reservations() else {
        panic!("queue should not have been empty");
    };
    let served: Vec<i64> = outcomes.iter().map(|outcome| outcome.reservation.user_id.0).collect();
    assert_eq!(served, vec![2, 5]);
    assert!(outcomes.iter().all(|outcome| outcome.result.is_ok()));
    assert_eq!(library.pending_reservations(), 0);
    assert_eq!(copies(&library, 101), Some(4));
    assert_eq!(copies(&library, 103), Some(3));
}

#[test]
#[allow(clippy::panic)]
fn test_failed_reservation_is_dropped() {
    let mut library = setup_test_library(ReservationPolicy::VipOnly);
    assert!(library.add_book(Book::new(104, "Dune", "Fiction", 1, 9)).is_ok());
    assert!(library.submit_reservation(UserId(1), BookId(104), Priority::Vip).is_ok());

    let ProcessingReport::Processed(outcomes) = library.process_reservations() else {
        panic!("queue should not have been empty");
    };
    let [outcome] = outcomes.as_slice() else {
        panic!("expected one outcome, got {outcomes:?}");
    };
    assert!(matches!(
        &outcome.result,
        Err(LibraryError::InsufficientCopies { suggestions, .. }) if suggestions.len() == 1
    ));
    assert_eq!(library.pending_reservations(), 0);
    assert_eq!(library.process_reservations(), ProcessingReport::NoReservations);
}

#[test]
fn test_empty_queue_changes_nothing() {
    let mut library = setup_test_library(ReservationPolicy::VipOnly);
    let before: Vec<Book> = library.books_by_title().cloned().collect();
    let history_len = library.history().count();

    assert_eq!(library.process_reservations(), ProcessingReport::NoReservations);

    let after: Vec<Book> = library.books_by_title().cloned().collect();
    assert_eq!(before, after);
    assert_eq!(library.history().count(), history_len);
}

#[test]
fn test_reservation_checks() {
    let mut library = setup_test_library(ReservationPolicy::VipOnly);

    assert_eq!(
        library.submit_reservation(UserId(9), BookId(101), Priority::Vip),
        Err(LibraryError::UnknownUser { user_id: UserId(9) })
    );
    assert_eq!(
        library.submit_reservation(UserId(1), BookId(999), Priority::Vip),
        Err(LibraryError::UnknownBook { book_id: BookId(999) })
    );
    assert_eq!(
        library.submit_reservation(UserId(1), BookId(101), Priority::Normal),
        Err(LibraryError::NormalReservationRejected { user_id: UserId(1) })
    );
    assert_eq!(library.pending_reservations(), 0);
}

#[test]
#[allow(clippy::panic)]
fn test_normal_reservations_follow_vip_when_accepted() {
    let mut library = setup_test_library(ReservationPolicy::AcceptNormal);
    assert_eq!(library.reservation_policy(), ReservationPolicy::AcceptNormal);

    assert!(library.submit_reservation(UserId(1), BookId(102), Priority::Normal).is_ok());
    assert!(library.submit_reservation(UserId(3), BookId(102), Priority::Vip).is_ok());
    assert!(library.submit_reservation(UserId(2), BookId(102), Priority::Normal).is_ok());

    let ProcessingReport::Processed(outcomes) = library.process_reservations() else {
        panic!("queue should not have been empty");
    };
    let served: Vec<(i64, bool)> = outcomes
        .iter()
        .map(|outcome| (outcome.reservation.user_id.0, outcome.result.is_ok()))
        .collect();
    // Three copies: two can be lent, the third request hits the shelf copy.
    assert_eq!(served, vec![(3, true), (1, true), (2, false)]);
    assert_eq!(copies(&library, 102), Some(1));
}

#[test]
fn test_return_after_borrow() {
    let mut library = setup_test_library(ReservationPolicy::VipOnly);

    for _ in 0..2 {
        assert!(library.borrow(UserId(2), BookId(102), Priority::Normal).is_ok());
    }
    assert_eq!(copies(&library, 102), Some(1));

    let receipt = library.return_book(UserId(2), BookId(102));
    assert!(matches!(receipt, Ok(r) if r.copies == 2 && r.user_name == "Zearin"));
}

#[test]
fn test_select_books_over_catalog() {
    let library = setup_test_library(ReservationPolicy::VipOnly);

    let selection = library.select_books(2);
    let ids: Vec<i64> = selection.books.iter().map(|book| book.id.0).collect();
    assert_eq!(ids, vec![102, 103]);
    assert_eq!(selection.total_value, 33);
    assert!(library.select_books(0).is_empty());
}

#[test]
fn test_observers_see_every_event() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let mut library = Library::new(LibraryConfig::default());
    library.register_observer(Box::new(Recorder { events: Rc::clone(&events) }));

    assert!(library.add_user(User::new(1, "Faria")).is_ok());
    assert!(library.add_book(Book::new(7, "Dune", "Fiction", 2, 9)).is_ok());
    assert!(library.borrow(UserId(1), BookId(7), Priority::Normal).is_ok());
    assert!(library.borrow(UserId(1), BookId(7), Priority::Normal).is_err());
    assert!(library.return_book(UserId(1), BookId(7)).is_ok());

    let seen = events.borrow();
    assert_eq!(seen.len(), 5);
    assert!(matches!(seen.get(2), Some(LibraryEvent::Borrowed { remaining: 1, .. })));
    assert!(matches!(seen.get(3), Some(LibraryEvent::BorrowRefused { .. })));
    assert!(matches!(seen.get(4), Some(LibraryEvent::Returned { copies: 2, .. })));
}

#[test]
fn test_history_drops_oldest_entries() {
    let mut library =
        Library::new(LibraryConfig { history_limit: 2, ..LibraryConfig::default() });
    for id in 1..=4 {
        assert!(library.add_user(User::new(id, format!("user {id}"))).is_ok());
    }

    let sequences: Vec<u64> = library.history().map(|record| record.sequence).collect();
    assert_eq!(sequences, vec![2, 3]);
    assert!(matches!(
        library.history().last().map(|record| &record.event),
        Some(LibraryEvent::UserAdded { user_id: UserId(4), .. })
    ));
}
