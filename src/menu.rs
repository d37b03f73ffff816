//! Numbered console menu over a [`Library`] session.

use std::io::{self, BufRead, Write};

use library_system::{Book, BookId, Library, LibraryError, Priority, User, UserId};

use crate::render;

/// A menu entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Register a user
    AddUser,
    /// List users by id
    ListUsers,
    /// Catalog a new book
    AddBook,
    /// Look a book up by id
    FindBook,
    /// List books by title
    ListBooks,
    /// List books on a topic
    BooksByTopic,
    /// Queue a reservation
    SubmitReservation,
    /// Drain the reservation queue
    ProcessReservations,
    /// Borrow a book directly
    Borrow,
    /// Return a book
    Return,
    /// Pick the most valuable books for a capacity
    SelectBooks,
    /// Show recorded activity
    ShowHistory,
    /// Leave the menu
    Exit,
}

impl Command {
    /// Every command, in menu order
    pub const ALL: [Self; 13] = [
        Self::AddUser,
        Self::ListUsers,
        Self::AddBook,
        Self::FindBook,
        Self::ListBooks,
        Self::BooksByTopic,
        Self::SubmitReservation,
        Self::ProcessReservations,
        Self::Borrow,
        Self::Return,
        Self::SelectBooks,
        Self::ShowHistory,
        Self::Exit,
    ];

    /// Command for a 1-based menu number
    pub fn from_choice(choice: i64) -> Option<Self> {
        let position = usize::try_from(choice).ok()?.checked_sub(1)?;
        Self::ALL.get(position).copied()
    }

    /// Menu text
    pub fn label(self) -> &'static str {
        match self {
            Self::AddUser => "Add User",
            Self::ListUsers => "Display All Users",
            Self::AddBook => "Add a New Book",
            Self::FindBook => "Search Book by ID",
            Self::ListBooks => "Display All Books (by Title)",
            Self::BooksByTopic => "Get Books by Topic",
            Self::SubmitReservation => "Add Reservation",
            Self::ProcessReservations => "Process Reservations",
            Self::Borrow => "Borrow a Book (Directly)",
            Self::Return => "Return a Book",
            Self::SelectBooks => "Select Most Valuable Books",
            Self::ShowHistory => "Show Activity History",
            Self::Exit => "Exit",
        }
    }
}

/// Whether the menu loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Show the menu again
    Continue,
    /// Leave the loop
    Exit,
}

/// Prompting reader and writer pair driving the menu
#[derive(Debug)]
pub struct Console<R, W> {
    /// Where answers come from
    input: R,
    /// Where prompts and results go
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Create a console over an input and an output
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Show the menu and run commands until exit or end of input
    ///
    /// # Errors
    ///
    /// Returns any I/O error other than the input closing
    pub fn run(&mut self, library: &mut Library) -> io::Result<()> {
        loop {
            render::menu(&mut self.output)?;
            let flow = self
                .prompt_int("Enter your choice: ")
                .and_then(|choice| self.dispatch(library, choice));
            match flow {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    writeln!(self.output)?;
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Run the command for a menu number
    fn dispatch(&mut self, library: &mut Library, choice: i64) -> io::Result<Flow> {
        let Some(command) = Command::from_choice(choice) else {
            writeln!(self.output, "Invalid choice. Please try again.")?;
            return Ok(Flow::Continue);
        };

        match command {
            Command::AddUser => self.add_user(library)?,
            Command::ListUsers => render::users(&mut self.output, library.users())?,
            Command::AddBook => self.add_book(library)?,
            Command::FindBook => self.find_book(library)?,
            Command::ListBooks => {
                render::heading(&mut self.output, "All Books in Library (Sorted by Title)")?;
                render::inventory(&mut self.output, library)?;
            }
            Command::BooksByTopic => self.books_by_topic(library)?,
            Command::SubmitReservation => self.submit_reservation(library)?,
            Command::ProcessReservations => {
                let report = library.process_reservations();
                render::processing_report(&mut self.output, library, &report)?;
                render::heading(&mut self.output, "Current Book Inventory After Processing")?;
                render::inventory(&mut self.output, library)?;
            }
            Command::Borrow => self.borrow(library)?,
            Command::Return => self.return_book(library)?,
            Command::SelectBooks => self.select_books(library)?,
            Command::ShowHistory => {
                render::heading(&mut self.output, "Activity History")?;
                render::history(&mut self.output, library)?;
            }
            Command::Exit => {
                writeln!(self.output, "Exiting Library Management System. Goodbye!!")?;
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    /// Register a user from prompted fields
    fn add_user(&mut self, library: &mut Library) -> io::Result<()> {
        render::heading(&mut self.output, "Add New User")?;
        let id = self.prompt_int("Enter User ID: ")?;
        let name = self.prompt_text("Enter User Name: ")?;

        match library.add_user(User::new(id, name.as_str())) {
            Ok(()) => render::success(
                &mut self.output,
                &format!("User '{name}' (ID: {id}) added successfully."),
            ),
            Err(e) => render::error(&mut self.output, &e),
        }
    }

    /// Catalog a book from prompted fields, stopping early on a taken id
    fn add_book(&mut self, library: &mut Library) -> io::Result<()> {
        render::heading(&mut self.output, "Add New Book")?;
        let id = self.prompt_int("Enter Book ID: ")?;
        if library.contains_book(BookId(id)) {
            return render::error(
                &mut self.output,
                &LibraryError::DuplicateBook { book_id: BookId(id) },
            );
        }

        let title = self.prompt_text("Enter Title: ")?;
        let topic = self.prompt_text("Enter Topic: ")?;
        let copies = self.prompt_int("Enter Number of Copies: ")?;
        let Ok(copies) = u32::try_from(copies) else {
            return writeln!(self.output, "Number of copies must be between 0 and {}.", u32::MAX);
        };
        let value = self.prompt_int("Enter Value (for selection): ")?;

        let message = format!("Book '{title}' added successfully!");
        match library.add_book(Book::new(id, title, topic, copies, value)) {
            Ok(()) => render::success(&mut self.output, &message),
            Err(e) => render::error(&mut self.output, &e),
        }
    }

    /// Show one book by id
    fn find_book(&mut self, library: &Library) -> io::Result<()> {
        render::heading(&mut self.output, "Search Book by ID")?;
        let id = self.prompt_int("Enter Book ID to search: ")?;

        match library.find_book(BookId(id)) {
            Some(book) => {
                write!(self.output, "Book Found: ")?;
                render::book_line(&mut self.output, book)
            }
            None => writeln!(self.output, "Book with ID {id} not found."),
        }
    }

    /// List the books on a prompted topic
    fn books_by_topic(&mut self, library: &Library) -> io::Result<()> {
        render::heading(&mut self.output, "Get Books by Topic")?;
        let topic = self.prompt_text("Enter Topic to search: ")?;
        let books: Vec<&Book> = library.books_by_topic(&topic).collect();
        render::topic_listing(&mut self.output, &topic, &books)
    }

    /// Queue a reservation for a known user and book
    fn submit_reservation(&mut self, library: &mut Library) -> io::Result<()> {
        render::heading(&mut self.output, "Add Reservation")?;
        let Some(user_id) = self.prompt_known_user(library)? else {
            return Ok(());
        };
        let book_id = BookId(self.prompt_int("Enter Book ID to reserve: ")?);
        if !library.contains_book(book_id) {
            return render::error(&mut self.output, &LibraryError::UnknownBook { book_id });
        }
        let vip = self.prompt_int("Is this a VIP reservation? (1 for Yes, 0 for No): ")? == 1;

        match library.submit_reservation(user_id, book_id, Priority::from_vip(vip)) {
            Ok(reservation) => {
                let name = library.user(user_id).map_or("", |user| user.name.as_str());
                render::success(
                    &mut self.output,
                    &format!(
                        "{} reservation added for User {name} (ID: {user_id}) for Book ID {book_id}.",
                        reservation.priority
                    ),
                )
            }
            Err(e) => render::error(&mut self.output, &e),
        }
    }

    /// Lend a book at normal priority
    fn borrow(&mut self, library: &mut Library) -> io::Result<()> {
        render::heading(&mut self.output, "Borrow a Book")?;
        let Some(user_id) = self.prompt_known_user(library)? else {
            return Ok(());
        };
        let book_id = BookId(self.prompt_int("Enter Book ID to borrow: ")?);

        let result = library.borrow(user_id, book_id, Priority::Normal);
        render::borrow_result(&mut self.output, &result)
    }

    /// Take a book back
    fn return_book(&mut self, library: &mut Library) -> io::Result<()> {
        render::heading(&mut self.output, "Return a Book")?;
        let Some(user_id) = self.prompt_known_user(library)? else {
            return Ok(());
        };
        let book_id = BookId(self.prompt_int("Enter Book ID to return: ")?);

        let result = library.return_book(user_id, book_id);
        render::return_result(&mut self.output, &result)
    }

    /// Show the most valuable books for a prompted capacity
    fn select_books(&mut self, library: &Library) -> io::Result<()> {
        render::heading(&mut self.output, "Select Most Valuable Books")?;
        let capacity = self.prompt_int("Enter maximum number of books to select (capacity): ")?;
        let Some(capacity) = usize::try_from(capacity).ok().filter(|&capacity| capacity > 0) else {
            return writeln!(self.output, "Capacity must be a positive number.");
        };
        render::selection(&mut self.output, &library.select_books(capacity))
    }

    /// Ask for a user id, reporting it when nobody has it
    fn prompt_known_user(&mut self, library: &Library) -> io::Result<Option<UserId>> {
        let user_id = UserId(self.prompt_int("Enter User ID: ")?);
        if library.user(user_id).is_some() {
            return Ok(Some(user_id));
        }
        render::error(&mut self.output, &LibraryError::UnknownUser { user_id })?;
        Ok(None)
    }

    /// Read one line without its terminator; undecodable bytes become U+FFFD
    fn read_line(&mut self) -> io::Result<String> {
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(String::from_utf8_lossy(&raw).trim_end_matches(['\r', '\n']).to_owned())
    }

    /// Show a prompt and read a line of text
    fn prompt_text(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Show a prompt and read an integer, asking again until one parses
    fn prompt_int(&mut self, prompt: &str) -> io::Result<i64> {
        let mut line = self.prompt_text(prompt)?;
        loop {
            if let Ok(value) = line.trim().parse() {
                return Ok(value);
            }
            line = self.prompt_text("Invalid input. Please enter a number: ")?;
        }
    }
}
