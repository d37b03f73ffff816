//! Interactive console for the library system.

mod menu;
mod render;

use std::{io, path::PathBuf, process::ExitCode};

use clap::Parser;
use colored::Colorize;
use library_system::{
    Library, LibraryConfig, ReservationPolicy, SeedData, config::DEFAULT_HISTORY_LIMIT,
};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// Command-line arguments for the library console
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file with the books and users to start with
    #[arg(long, value_name = "PATH", conflicts_with = "no_seed")]
    seed_file: Option<PathBuf>,

    /// Start with an empty catalog and no users
    #[arg(long)]
    no_seed: bool,

    /// Queue normal-priority reservations instead of turning them away
    #[arg(long)]
    accept_normal_reservations: bool,

    /// Number of activity records to keep
    #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
    history_limit: usize,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Session settings selected on the command line
    fn config(&self) -> LibraryConfig {
        LibraryConfig {
            reservation_policy: if self.accept_normal_reservations {
                ReservationPolicy::AcceptNormal
            } else {
                ReservationPolicy::VipOnly
            },
            history_limit: self.history_limit,
        }
    }

    /// Seed data selected on the command line
    fn seed(&self) -> Result<SeedData, library_system::ConfigError> {
        match &self.seed_file {
            Some(path) => SeedData::from_path(path),
            None if self.no_seed => Ok(SeedData::default()),
            None => Ok(SeedData::builtin()),
        }
    }
}

/// Log to stderr, at debug level when verbose, otherwise per `RUST_LOG`
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    if let Err(e) = fmt().with_env_filter(filter).with_writer(io::stderr).try_init() {
        warn!(error = %e, "tracing init failed");
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let seed = match args.seed() {
        Ok(seed) => seed,
        Err(e) => {
            error!(error = %e, "could not load seed data");
            eprintln!("{} {e}", "Error:".red().bold());
            return ExitCode::FAILURE;
        }
    };

    let mut library = Library::with_default_observers(args.config());
    let (book_count, user_count) = (seed.books.len(), seed.users.len());
    for rejected in library.apply_seed(seed) {
        warn!(error = %rejected, "seed entry skipped");
    }
    info!(
        books = library.catalog().len(),
        users = library.users().len(),
        policy = ?library.reservation_policy(),
        "library ready"
    );

    println!("{}", "Library Management System".green().bold());
    println!(
        "Loaded {} of {book_count} books and {} of {user_count} users.",
        library.catalog().len(),
        library.users().len()
    );

    let stdin = io::stdin();
    let mut console = menu::Console::new(stdin.lock(), io::stdout().lock());
    match console.run(&mut library) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "console failed");
            ExitCode::FAILURE
        }
    }
}
