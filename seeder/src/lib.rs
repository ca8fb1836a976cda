//! Development database seeder for the schematics service.
//!
//! Generates fake users and schematics with [`fixture_data`] and writes them
//! to PostgreSQL in batches: one multi-row insert for all users, then one per
//! user for that user's schematics. The `seed-fixtures` binary wires the
//! pieces together; [`app::run`] is the same flow with injectable
//! configuration and connection steps.

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod outbound;
