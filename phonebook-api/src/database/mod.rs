pub mod contacts;
pub mod memory;

pub use contacts::PgContactStore;
pub use memory::MemoryContactStore;

use async_trait::async_trait;
use shared_types::Contact;
use std::sync::Arc;
use thiserror::Error;

/// SQLSTATE raised by Postgres for a malformed regular expression.
const INVALID_REGULAR_EXPRESSION: &str = "2201B";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(sqlx::Error),

    #[error("invalid search pattern: {0}")]
    InvalidPattern(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(INVALID_REGULAR_EXPRESSION) {
                return StoreError::InvalidPattern(db_err.message().to_string());
            }
        }
        StoreError::Database(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Data access for the `contacts` table.
///
/// Each method maps to exactly one statement, so atomicity is whatever the
/// backend gives a single statement. Delete methods return the number of
/// rows removed.
#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn list_contacts(&self) -> StoreResult<Vec<Contact>>;

    /// Insert a contact and return the surrogate id assigned by storage.
    async fn insert_contact(&self, contact: &Contact) -> StoreResult<i64>;

    async fn delete_contacts_by_phone_number(&self, phone_number: &str) -> StoreResult<u64>;
    async fn delete_contacts_by_full_name(&self, full_name: &str) -> StoreResult<u64>;
    async fn delete_all_contacts(&self) -> StoreResult<u64>;

    /// Contacts whose full name matches `pattern` as a case-insensitive
    /// regular expression.
    async fn search_contacts_by_full_name(&self, pattern: &str) -> StoreResult<Vec<Contact>>;

    async fn ping(&self) -> StoreResult<()>;
}

pub type SharedStore = Arc<dyn ContactStore>;

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    #[derive(Debug)]
    struct PgErrorStub {
        code: &'static str,
        message: &'static str,
    }

    impl fmt::Display for PgErrorStub {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.message)
        }
    }

    impl StdError for PgErrorStub {}

    impl DatabaseError for PgErrorStub {
        fn message(&self) -> &str {
            self.message
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    fn database_error(code: &'static str, message: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(PgErrorStub { code, message }))
    }

    #[test]
    fn test_invalid_regular_expression_maps_to_invalid_pattern() {
        let err = StoreError::from(database_error(
            "2201B",
            "invalid regular expression: parentheses () not balanced",
        ));

        match err {
            StoreError::InvalidPattern(reason) => {
                assert_eq!(reason, "invalid regular expression: parentheses () not balanced");
            }
            other => panic!("Expected InvalidPattern, got {other:?}"),
        }
    }

    #[test]
    fn test_other_database_errors_stay_database_errors() {
        let err = StoreError::from(database_error("42P01", "relation \"contacts\" does not exist"));
        assert!(matches!(err, StoreError::Database(_)));

        let err = StoreError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Database(_)));
    }
}
