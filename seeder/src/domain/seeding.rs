//! Fixture seeding orchestration.
//!
//! Generates fixtures through a [`FakeSource`] and hands each batch to the
//! [`FixtureRepository`] port. One user batch is inserted first, then one
//! schematic batch per created user.

use fixture_data::{FakeSource, VersionRefs, mock_schematics, mock_users};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::ports::{CreatedUser, FixtureRepository, FixtureRepositoryError};

/// Number of users, and schematics per user, when not overridden.
pub const DEFAULT_BATCH_COUNT: usize = 5;

/// How much data a run inserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPlan {
    /// Users to create.
    pub users: usize,
    /// Schematics to create for each created user.
    pub schematics_per_user: usize,
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self {
            users: DEFAULT_BATCH_COUNT,
            schematics_per_user: DEFAULT_BATCH_COUNT,
        }
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedOutcome {
    /// Users created, as returned by the database.
    pub users: Vec<CreatedUser>,
    /// Schematics inserted across all users.
    pub schematics_created: u64,
}

/// Errors raised while seeding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedingError {
    /// A batch insert failed.
    #[error("fixture persistence error: {0}")]
    Persistence(#[from] FixtureRepositoryError),
    /// The adapter returned a different number of users than requested.
    #[error("expected {expected} created users, repository returned {actual}")]
    UserCountMismatch {
        /// Users sent.
        expected: usize,
        /// Users returned.
        actual: usize,
    },
}

/// Service that generates fixtures and persists them batch by batch.
pub struct FixtureSeeder<R, S> {
    repository: R,
    source: S,
    versions: VersionRefs,
}

impl<R, S> FixtureSeeder<R, S> {
    /// Creates a seeder that references the default version rows.
    pub fn new(repository: R, source: S) -> Self {
        Self {
            repository,
            source,
            versions: VersionRefs::default(),
        }
    }

    /// Overrides the version rows new schematics reference.
    #[must_use]
    pub const fn with_versions(mut self, versions: VersionRefs) -> Self {
        self.versions = versions;
        self
    }

    /// Gives back the repository, e.g. to close it.
    pub fn into_repository(self) -> R {
        self.repository
    }
}

impl<R, S> FixtureSeeder<R, S>
where
    R: FixtureRepository,
    S: FakeSource,
{
    /// Generates and inserts `count` users in one batch.
    ///
    /// A zero count skips the repository entirely.
    ///
    /// # Errors
    ///
    /// Returns [`SeedingError::Persistence`] if the insert fails and
    /// [`SeedingError::UserCountMismatch`] if the repository returns the
    /// wrong number of rows.
    pub fn create_users(&mut self, count: usize) -> Result<Vec<CreatedUser>, SeedingError> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let fixtures = mock_users(&mut self.source, count);
        let created = self.repository.insert_users(&fixtures)?;
        if created.len() != count {
            return Err(SeedingError::UserCountMismatch {
                expected: count,
                actual: created.len(),
            });
        }

        info!(user_count = created.len(), "created fixture users");
        Ok(created)
    }

    /// Generates and inserts `count` schematics authored by `author`.
    ///
    /// A zero count skips the repository entirely.
    ///
    /// # Errors
    ///
    /// Returns [`SeedingError::Persistence`] if the insert fails.
    pub fn create_schematics(&mut self, author: Uuid, count: usize) -> Result<u64, SeedingError> {
        if count == 0 {
            return Ok(0);
        }

        let fixtures = mock_schematics(&mut self.source, author, self.versions, count);
        let inserted = self.repository.insert_schematics(&fixtures)?;

        debug!(%author, schematic_count = inserted, "created fixture schematics");
        Ok(inserted)
    }

    /// Runs a whole plan: one user batch, then one schematic batch per user.
    ///
    /// Batches already inserted stay committed when a later batch fails.
    ///
    /// # Errors
    ///
    /// Propagates the first [`SeedingError`] encountered.
    pub fn seed(&mut self, plan: SeedPlan) -> Result<SeedOutcome, SeedingError> {
        let users = self.create_users(plan.users)?;

        let mut schematics_created = 0;
        for user in &users {
            schematics_created += self.create_schematics(user.user_id, plan.schematics_per_user)?;
        }

        info!(
            user_count = users.len(),
            schematic_count = schematics_created,
            "fixture seeding complete"
        );
        Ok(SeedOutcome {
            users,
            schematics_created,
        })
    }
}
