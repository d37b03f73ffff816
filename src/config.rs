//! Start-up configuration and seed data.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{book::Book, error::ConfigError, reservation::ReservationPolicy, users::User};

/// Default number of activity records kept
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Settings for a [`crate::Library`] session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct LibraryConfig {
    /// Which reservations the queue accepts
    pub reservation_policy: ReservationPolicy,
    /// Maximum number of activity records kept
    pub history_limit: usize,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self { reservation_policy: ReservationPolicy::VipOnly, history_limit: DEFAULT_HISTORY_LIMIT }
    }
}

/// Books and users loaded into a fresh session
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SeedData {
    /// Books to catalog, in catalog order
    #[serde(default)]
    pub books: Vec<Book>,
    /// Users to register
    #[serde(default)]
    pub users: Vec<User>,
}

impl SeedData {
    /// The starter catalog and users
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            books: vec![
                Book::new(101, "The Great Gatsby", "Fiction", 5, 12),
                Book::new(102, "Sapiens: A Brief History of Humankind", "History", 3, 15),
                Book::new(103, "Clean Code", "Programming", 4, 18),
            ],
            users: vec![User::new(1, "Faria"), User::new(2, "Zearin"), User::new(3, "Lamia")],
        }
    }

    /// Parse seed data from JSON
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::Parse` if the text is not valid seed JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON seed file
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::Read` if the file cannot be read, or a
    /// `ConfigError::Parse` if its contents are not valid seed JSON
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_json(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::SeedData;
    use crate::{book::BookId, error::ConfigError};

    #[test]
    fn test_builtin_seed() {
        let seed = SeedData::builtin();
        assert_eq!(seed.books.len(), 3);
        assert_eq!(seed.users.len(), 3);
        assert_eq!(seed.books.first().map(|book| book.id), Some(BookId(101)));
    }

    #[test]
    fn test_seed_from_json() {
        let json = r#"{
            "books": [
                {"id": 7, "title": "Dune", "topic": "Fiction", "copies": 2, "value": 9}
            ],
            "users": [{"id": 4, "name": "Nabil"}]
        }"#;

        let seed = SeedData::from_json(json);
        assert!(matches!(&seed, Ok(s) if s.books.len() == 1 && s.users.len() == 1));
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let seed = SeedData::from_json(r#"{"users": []}"#);
        assert!(matches!(seed, Ok(s) if s.books.is_empty()));
    }

    #[test]
    fn test_negative_copies_rejected() {
        let json = r#"{"books": [{"id": 1, "title": "A", "topic": "T", "copies": -1, "value": 1}]}"#;
        assert!(matches!(SeedData::from_json(json), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = SeedData::from_path(std::path::Path::new("/nonexistent/library-seed.json"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
