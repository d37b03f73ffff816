//! Value-maximizing choice of at most `capacity` books.
//!
//! Every book weighs one slot, so this is a count-bounded 0/1 selection.
//! Books with no copies on the shelf are never chosen.

use std::iter;

use crate::book::Book;

/// Books picked by [`select`] and their combined value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<'a> {
    /// Chosen books in catalog order
    pub books: Vec<&'a Book>,
    /// Sum of the chosen books' values
    pub total_value: i64,
}

impl Selection<'_> {
    /// Whether nothing was chosen
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

/// Choose at most `capacity` in-stock books with the greatest total value
///
/// Builds the table `best[i][w]`, the best value using the first `i` books
/// and `w` slots, then walks it back from the last book to the first. When
/// two choices tie, the earlier book is kept. The result preserves the
/// order of `books`.
#[must_use]
pub fn select(books: &[Book], capacity: usize) -> Selection<'_> {
    // More slots than books cannot change the outcome.
    let capacity = capacity.min(books.len());
    if capacity == 0 {
        return Selection { books: Vec::new(), total_value: 0 };
    }

    let mut table: Vec<Vec<i64>> = Vec::with_capacity(books.len().saturating_add(1));
    table.push(vec![0; capacity.saturating_add(1)]);

    for book in books {
        let previous = table.last().map(Vec::as_slice).unwrap_or_default();
        let row: Vec<i64> = iter::once(0)
            .chain(previous.windows(2).map(|slots| match slots {
                [fewer, same] if book.is_in_stock() => (*same).max(book.value.saturating_add(*fewer)),
                [_, same] => *same,
                _ => 0,
            }))
            .collect();
        table.push(row);
    }

    let mut chosen = Vec::new();
    let mut slots = capacity;
    for (rows, book) in table.windows(2).zip(books).rev() {
        if slots == 0 {
            break;
        }
        if let [above, current] = rows
            && current.get(slots) != above.get(slots)
        {
            chosen.push(book);
            slots = slots.saturating_sub(1);
        }
    }
    chosen.reverse();

    let total_value = chosen.iter().fold(0_i64, |total, book| total.saturating_add(book.value));
    Selection { books: chosen, total_value }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::select;
    use crate::book::Book;

    fn starter_books() -> Vec<Book> {
        vec![
            Book::new(101, "The Great Gatsby", "Fiction", 5, 12),
            Book::new(102, "Sapiens: A Brief History of Humankind", "History", 3, 15),
            Book::new(103, "Clean Code", "Programming", 4, 18),
        ]
    }

    fn ids(books: &[Book], capacity: usize) -> Vec<i64> {
        select(books, capacity).books.iter().map(|book| book.id.0).collect()
    }

    #[rstest]
    #[case(0, vec![], 0)]
    #[case(1, vec![103], 18)]
    #[case(2, vec![102, 103], 33)]
    #[case(3, vec![101, 102, 103], 45)]
    #[case(50, vec![101, 102, 103], 45)]
    fn test_select_starter_books(
        #[case] capacity: usize,
        #[case] expected: Vec<i64>,
        #[case] total: i64,
    ) {
        let books = starter_books();
        let selection = select(&books, capacity);

        assert_eq!(selection.books.iter().map(|book| book.id.0).collect::<Vec<_>>(), expected);
        assert_eq!(selection.total_value, total);
    }

    #[test]
    fn test_empty_input() {
        let selection = select(&[], 4);
        assert!(selection.is_empty());
        assert_eq!(selection.total_value, 0);
    }

    #[test]
    fn test_out_of_stock_books_are_skipped() {
        let books = vec![
            Book::new(1, "A", "T", 0, 100),
            Book::new(2, "B", "T", 1, 3),
            Book::new(3, "C", "T", 2, 4),
        ];
        assert_eq!(ids(&books, 2), vec![2, 3]);
        assert_eq!(ids(&books, 1), vec![3]);
    }

    #[test]
    fn test_ties_keep_earlier_book() {
        let books = vec![
            Book::new(1, "A", "T", 1, 10),
            Book::new(2, "B", "T", 1, 10),
            Book::new(3, "C", "T", 1, 10),
        ];
        assert_eq!(ids(&books, 1), vec![1]);
        assert_eq!(ids(&books, 2), vec![1, 2]);
    }

    #[test]
    fn test_worthless_books_are_not_picked() {
        let books = vec![
            Book::new(1, "A", "T", 1, -5),
            Book::new(2, "B", "T", 1, 0),
            Book::new(3, "C", "T", 1, 7),
        ];
        let selection = select(&books, 3);
        assert_eq!(selection.books.iter().map(|book| book.id.0).collect::<Vec<_>>(), vec![3]);
        assert_eq!(selection.total_value, 7);
    }
}
