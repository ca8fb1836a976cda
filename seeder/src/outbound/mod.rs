//! Outbound adapters: the PostgreSQL fixture repository and its statements.

mod postgres_fixture_repository;
pub mod statements;

pub use postgres_fixture_repository::{PostgresFixtureRepository, describe_postgres_error};
