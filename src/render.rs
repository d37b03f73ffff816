//! Text output for the console.

use std::io::{self, Write};

use colored::Colorize;
use library_system::{
    ActivityRecord, Book, BorrowReceipt, Library, LibraryError, ProcessingReport, ReturnReceipt,
    Selection, UserRegistry,
};

use crate::menu::Command;

/// Print the numbered menu
pub fn menu(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n{}", "--- Library Management System Menu ---".bold())?;
    for (number, command) in (1_u32..).zip(Command::ALL) {
        writeln!(out, "{number}. {}", command.label())?;
    }
    Ok(())
}

/// Print a section heading
pub fn heading(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out, "\n{}", format!("--- {title} ---").bold())
}

/// Print one book with every field
pub fn book_line(out: &mut impl Write, book: &Book) -> io::Result<()> {
    writeln!(
        out,
        "ID: {}, Title: {}, Topic: {}, Copies: {}, Value: {}",
        book.id, book.title, book.topic, book.copies, book.value
    )
}

/// Print every book in title order
pub fn inventory(out: &mut impl Write, library: &Library) -> io::Result<()> {
    if library.catalog().is_empty() {
        return writeln!(out, "The library is currently empty.");
    }
    for book in library.books_by_title() {
        book_line(out, book)?;
    }
    Ok(())
}

/// Print the books found for a topic
pub fn topic_listing(out: &mut impl Write, topic: &str, books: &[&Book]) -> io::Result<()> {
    if books.is_empty() {
        return writeln!(out, "No books found on topic '{topic}'.");
    }
    writeln!(out, "Books on topic '{topic}':")?;
    for book in books {
        writeln!(out, "- ID: {}, Title: {}, Copies: {}", book.id, book.title, book.copies)?;
    }
    Ok(())
}

/// Print every registered user by id
pub fn users(out: &mut impl Write, registry: &UserRegistry) -> io::Result<()> {
    if registry.is_empty() {
        return writeln!(out, "No users registered in the system.");
    }
    heading(out, "Registered Users")?;
    for user in registry.list_all() {
        writeln!(out, "ID: {}, Name: {}", user.id, user.name)?;
    }
    Ok(())
}

/// Print a success line
pub fn success(out: &mut impl Write, message: &str) -> io::Result<()> {
    writeln!(out, "{}", message.green())
}

/// Print a failed operation, with suggestions for a refused borrow
pub fn error(out: &mut impl Write, error: &LibraryError) -> io::Result<()> {
    writeln!(out, "{} {error}", "Error:".red().bold())?;
    if let LibraryError::InsufficientCopies { topic, suggestions, .. } = error {
        if suggestions.is_empty() {
            writeln!(out, "No other suitable books on this topic are available for borrowing.")?;
        } else {
            writeln!(out, "Suggested books on topic '{topic}':")?;
            for suggestion in suggestions {
                writeln!(
                    out,
                    "- {} (ID {}, Copies: {})",
                    suggestion.title, suggestion.book_id, suggestion.copies
                )?;
            }
        }
    }
    Ok(())
}

/// Print the outcome of a borrow
pub fn borrow_result(
    out: &mut impl Write,
    result: &Result<BorrowReceipt, LibraryError>,
) -> io::Result<()> {
    match result {
        Ok(receipt) => success(
            out,
            &format!(
                "User {}{} borrowed book: {} (ID: {}). Remaining copies: {}",
                receipt.user_name,
                if receipt.priority.is_vip() { " (VIP)" } else { "" },
                receipt.title,
                receipt.book_id,
                receipt.remaining
            ),
        ),
        Err(e) => error(out, e),
    }
}

/// Print the outcome of a return
pub fn return_result(
    out: &mut impl Write,
    result: &Result<ReturnReceipt, LibraryError>,
) -> io::Result<()> {
    match result {
        Ok(receipt) => success(
            out,
            &format!(
                "User {} returned book: {} (ID: {}). New copies: {}",
                receipt.user_name, receipt.title, receipt.book_id, receipt.copies
            ),
        ),
        Err(e) => error(out, e),
    }
}

/// Print what processing the reservation queue did, naming the user of each failure
pub fn processing_report(
    out: &mut impl Write,
    library: &Library,
    report: &ProcessingReport,
) -> io::Result<()> {
    match report {
        ProcessingReport::NoReservations => writeln!(out, "No reservations to process."),
        ProcessingReport::Processed(outcomes) => {
            writeln!(out, "\nProcessing reservations...")?;
            for outcome in outcomes {
                if outcome.result.is_err() {
                    let user_id = outcome.reservation.user_id;
                    let name = library.user(user_id).map_or("unknown", |user| user.name.as_str());
                    writeln!(
                        out,
                        "Reservation for user {name} (ID: {user_id}) could not be fulfilled:"
                    )?;
                }
                borrow_result(out, &outcome.result)?;
            }
            writeln!(out, "Finished processing reservations.")
        }
    }
}

/// Print a value selection
pub fn selection(out: &mut impl Write, selection: &Selection<'_>) -> io::Result<()> {
    if selection.is_empty() {
        return writeln!(out, "No books could be selected for the given capacity.");
    }
    writeln!(out, "Selected books for maximum value:")?;
    for book in &selection.books {
        writeln!(out, "Selected: {} (Value: {}, ID: {})", book.title, book.value, book.id)?;
    }
    writeln!(out, "Total value: {}", selection.total_value)
}

/// Print the activity history, one JSON record per line
pub fn history(out: &mut impl Write, library: &Library) -> io::Result<()> {
    let records: Vec<&ActivityRecord> = library.history().collect();
    if records.is_empty() {
        return writeln!(out, "No activity recorded yet.");
    }
    for record in records {
        writeln!(out, "{}", serde_json::to_string(record)?)?;
    }
    Ok(())
}
