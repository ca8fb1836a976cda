//! Port abstraction for persisting generated fixtures.
//!
//! The seeding service talks to storage only through [`FixtureRepository`].
//! Adapters must run each bulk insert as a single statement in its own
//! transaction, so a failed batch leaves earlier batches committed and
//! itself fully rolled back.

use fixture_data::{SchematicFixture, UserFixture};
use thiserror::Error;
use uuid::Uuid;

/// Persistence errors raised by fixture repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixtureRepositoryError {
    /// The database could not be reached or rejected the connection.
    #[error("fixture repository connection failed: {message}")]
    Connection {
        /// Rendered driver error.
        message: String,
    },
    /// A statement or transaction failed.
    #[error("fixture repository query failed: {message}")]
    Query {
        /// Rendered driver error.
        message: String,
    },
    /// A batch needs more bind parameters than one statement can carry.
    #[error("batch of {rows} rows needs {parameters} bind parameters; the limit is {limit}")]
    TooManyParameters {
        /// Rows in the rejected batch.
        rows: usize,
        /// Parameters the statement would need.
        parameters: usize,
        /// Maximum parameters per statement.
        limit: usize,
    },
}

impl FixtureRepositoryError {
    /// Builds a [`FixtureRepositoryError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Builds a [`FixtureRepositoryError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// A user row as stored, identified by its database-assigned key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedUser {
    /// Primary key assigned by the database.
    pub user_id: Uuid,
    /// Username stored with the row.
    pub username: String,
}

/// Port for inserting fixture batches over one open connection.
#[cfg_attr(test, mockall::automock)]
pub trait FixtureRepository {
    /// Inserts all `users` in one statement and returns the stored rows.
    ///
    /// The result holds exactly one entry per input user. Entries are not
    /// guaranteed to follow input order; each carries its own username.
    fn insert_users(
        &mut self,
        users: &[UserFixture],
    ) -> Result<Vec<CreatedUser>, FixtureRepositoryError>;

    /// Inserts all `schematics` in one statement and returns the row count.
    fn insert_schematics(
        &mut self,
        schematics: &[SchematicFixture],
    ) -> Result<u64, FixtureRepositoryError>;

    /// Releases the underlying connection.
    fn close(self) -> Result<(), FixtureRepositoryError>;
}
