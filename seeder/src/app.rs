//! End-to-end seeding run: configuration, connection, batches, close.
//!
//! The run is strictly linear and never retries. Connection failures come
//! back as [`RunError::Connect`] so the entry point can decide how loudly to
//! fail; every other error is meant to propagate.

use std::io::Write;
use std::process::ExitCode;

use fixture_data::FakerSource;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{ConfigError, SeederConfig};
use crate::domain::ports::{FixtureRepository, FixtureRepositoryError};
use crate::domain::{FixtureSeeder, SeedOutcome, SeedPlan, SeedingError};
use crate::outbound::PostgresFixtureRepository;

/// Errors ending a seeding run.
#[derive(Debug, Error)]
pub enum RunError {
    /// Configuration could not be loaded; no connection was attempted.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    /// The database connection could not be opened; nothing was inserted.
    #[error("Error while connecting to PostgreSQL: {0}")]
    Connect(#[source] FixtureRepositoryError),
    /// A batch failed; earlier batches remain committed.
    #[error("seeding failed: {0}")]
    Seeding(#[from] SeedingError),
    /// All batches committed but the connection did not close cleanly.
    #[error("failed to close the database connection: {0}")]
    Close(#[source] FixtureRepositoryError),
}

/// Runs `plan` with injected configuration and connection steps.
///
/// `load_config` always runs before `connect`, so a configuration failure
/// never reaches the database.
///
/// # Errors
///
/// See [`RunError`] for the failure at each stage.
pub fn run<R, L, C>(plan: SeedPlan, load_config: L, connect: C) -> Result<SeedOutcome, RunError>
where
    R: FixtureRepository,
    L: FnOnce() -> Result<SeederConfig, ConfigError>,
    C: FnOnce(&SeederConfig) -> Result<R, FixtureRepositoryError>,
{
    let config = load_config()?;
    let repository = connect(&config).map_err(RunError::Connect)?;

    let source = config
        .seed()
        .map_or_else(FakerSource::from_random_seed, FakerSource::seeded);
    info!(
        seed = source.seed(),
        users = plan.users,
        schematics_per_user = plan.schematics_per_user,
        "seeding fixtures"
    );

    let mut seeder = FixtureSeeder::new(repository, source);
    let outcome = seeder.seed(plan)?;
    seeder.into_repository().close().map_err(RunError::Close)?;

    Ok(outcome)
}

/// Runs `plan` against the database named by the process environment.
///
/// # Errors
///
/// See [`run`].
pub fn run_from_env(plan: SeedPlan) -> Result<SeedOutcome, RunError> {
    run(
        plan,
        SeederConfig::from_env,
        PostgresFixtureRepository::connect,
    )
}

/// Maps a finished run to the process exit code.
///
/// A connection failure is written to `stderr` as a single line and becomes
/// [`ExitCode::FAILURE`]. Every other error is handed back for a full report.
///
/// # Errors
///
/// Returns the [`RunError`] unchanged unless it is [`RunError::Connect`].
pub fn conclude(
    result: Result<SeedOutcome, RunError>,
    mut stderr: impl Write,
) -> Result<ExitCode, RunError> {
    match result {
        Ok(outcome) => {
            info!(
                user_count = outcome.users.len(),
                schematic_count = outcome.schematics_created,
                "done"
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(err @ RunError::Connect(_)) => {
            debug!(error = ?err, "could not connect to the database");
            if let Err(write_err) = writeln!(stderr, "{err}") {
                drop(write_err);
            }
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err),
    }
}
