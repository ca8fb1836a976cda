//! Seeding domain: the persistence port and the orchestrating service.

pub mod ports;
mod seeding;

pub use seeding::{DEFAULT_BATCH_COUNT, FixtureSeeder, SeedOutcome, SeedPlan, SeedingError};
