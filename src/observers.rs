use tracing::{info, warn};

use crate::events::LibraryEvent;

/// Trait for library event observation
pub trait LibraryObserver {
    /// Called after every state change
    fn on_event(&self, event: &LibraryEvent);
}

/// Logs every event at info level
#[derive(Debug)]
pub struct ActivityLogger;

impl LibraryObserver for ActivityLogger {
    fn on_event(&self, event: &LibraryEvent) {
        info!(?event, "library activity");
    }
}

/// Warns when a book is down to its shelf copy or a borrow is refused
#[derive(Debug)]
pub struct LowStockNotifier;

impl LibraryObserver for LowStockNotifier {
    fn on_event(&self, event: &LibraryEvent) {
        match event {
            LibraryEvent::Borrowed { book_id, remaining: 1, .. } => {
                warn!(%book_id, "only the shelf copy remains");
            }
            LibraryEvent::BorrowRefused { user_id, book_id, reason } => {
                warn!(%user_id, %book_id, %reason, "borrow refused");
            }
            _ => {}
        }
    }
}
