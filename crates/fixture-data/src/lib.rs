//! Fake user and schematic fixtures for seeding a development database.
//!
//! This crate produces the rows a seeding run inserts. It knows nothing about
//! the database: fixtures are plain values that a persistence adapter turns
//! into statement parameters.
//!
//! # Overview
//!
//! - [`FakeSource`] abstracts the fake-data generator so tests can swap in a
//!   scripted implementation.
//! - [`FakerSource`] is the production source, backed by `fake` and a seeded
//!   `ChaCha8Rng`.
//! - [`mock_user`] and [`mock_schematic`] build one fixture per call.
//! - [`snake_case`] derives usernames from display names.
//!
//! # Example
//!
//! ```
//! use fixture_data::{FakerSource, VersionRefs, mock_schematic, mock_user};
//! use uuid::Uuid;
//!
//! let mut source = FakerSource::seeded(42);
//! let user = mock_user(&mut source);
//! assert_eq!(user.oauth_provider, "fixture");
//!
//! let author = Uuid::new_v4();
//! let schematic = mock_schematic(&mut source, author, VersionRefs::default());
//! assert_eq!(schematic.author, author);
//! assert_eq!(schematic.game_version_id, 5);
//! ```

mod fixture;
mod source;
mod username;

pub use fixture::{
    FIXTURE_OAUTH_PROVIDER, SchematicFixture, UserFixture, VersionRefs, mock_schematic,
    mock_schematics, mock_user, mock_users,
};
pub use source::{FakeSource, FakerSource};
pub use username::snake_case;
