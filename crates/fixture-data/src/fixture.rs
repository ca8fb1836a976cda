//! User and schematic fixture types and their builders.

use uuid::Uuid;

use crate::source::FakeSource;
use crate::username::snake_case;

/// OAuth provider recorded for every generated user.
pub const FIXTURE_OAUTH_PROVIDER: &str = "fixture";

/// Game version row referenced by generated schematics unless overridden.
const DEFAULT_GAME_VERSION_ID: i32 = 5;

/// Create version row referenced by generated schematics unless overridden.
const DEFAULT_CREATE_VERSION_ID: i32 = 8;

/// A generated user row, ready to be bound into an insert statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFixture {
    /// Human-readable name, e.g. `"Jane Doe"`.
    pub display_name: String,
    /// [`snake_case`] of the display name.
    pub username: String,
    /// Contact email address.
    pub email: String,
    /// Identifier at the OAuth provider.
    pub oauth_id: String,
    /// Always [`FIXTURE_OAUTH_PROVIDER`].
    pub oauth_provider: String,
}

/// Version rows a schematic points at.
///
/// These rows are assumed to exist in the target database already; nothing
/// here creates or checks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionRefs {
    /// Primary key of the game version row.
    pub game_version_id: i32,
    /// Primary key of the create version row.
    pub create_version_id: i32,
}

impl Default for VersionRefs {
    fn default() -> Self {
        Self {
            game_version_id: DEFAULT_GAME_VERSION_ID,
            create_version_id: DEFAULT_CREATE_VERSION_ID,
        }
    }
}

/// A generated schematic row owned by `author`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchematicFixture {
    /// Schematic title.
    pub name: String,
    /// Description text.
    pub body: String,
    /// Owning user's primary key (`users.user_id`), not their username.
    pub author: Uuid,
    /// Image references; always empty.
    pub images: Vec<String>,
    /// File references; always empty.
    pub files: Vec<String>,
    /// See [`VersionRefs::game_version_id`].
    pub game_version_id: i32,
    /// See [`VersionRefs::create_version_id`].
    pub create_version_id: i32,
}

/// Builds one user fixture.
///
/// The username is derived from the generated display name, so two users
/// with the same name share a username. Nothing here prevents that.
pub fn mock_user(source: &mut impl FakeSource) -> UserFixture {
    let display_name = source.name();
    let username = snake_case(&display_name);

    UserFixture {
        display_name,
        username,
        email: source.email(),
        oauth_id: source.identifier(),
        oauth_provider: FIXTURE_OAUTH_PROVIDER.to_owned(),
    }
}

/// Builds `count` user fixtures.
pub fn mock_users(source: &mut impl FakeSource, count: usize) -> Vec<UserFixture> {
    (0..count).map(|_| mock_user(source)).collect()
}

/// Builds one schematic fixture authored by `author`.
pub fn mock_schematic(
    source: &mut impl FakeSource,
    author: Uuid,
    versions: VersionRefs,
) -> SchematicFixture {
    SchematicFixture {
        name: source.word(),
        body: source.paragraph(),
        author,
        images: Vec::new(),
        files: Vec::new(),
        game_version_id: versions.game_version_id,
        create_version_id: versions.create_version_id,
    }
}

/// Builds `count` schematic fixtures, all authored by `author`.
pub fn mock_schematics(
    source: &mut impl FakeSource,
    author: Uuid,
    versions: VersionRefs,
    count: usize,
) -> Vec<SchematicFixture> {
    (0..count)
        .map(|_| mock_schematic(source, author, versions))
        .collect()
}
