//! Throwaway databases carrying the tables the seeder writes to.

use postgres::{Client, NoTls};
use seeder::outbound::describe_postgres_error;
use uuid::Uuid;

/// Version and user tables, with the version rows fixtures reference.
const BASE_SCHEMA: &str = concat!(
    "CREATE TABLE game_versions (",
    "  game_version_id INTEGER PRIMARY KEY,",
    "  game_version_name TEXT NOT NULL",
    ");",
    "CREATE TABLE create_versions (",
    "  create_version_id INTEGER PRIMARY KEY,",
    "  create_version_name TEXT NOT NULL",
    ");",
    "CREATE TABLE users (",
    "  user_id UUID PRIMARY KEY DEFAULT gen_random_uuid(),",
    "  displayname TEXT NOT NULL,",
    "  username TEXT NOT NULL,",
    "  email TEXT NOT NULL,",
    "  oauth_id TEXT NOT NULL,",
    "  oauth_provider TEXT NOT NULL",
    ");",
    "CREATE TABLE schematics (",
    "  schematic_id UUID PRIMARY KEY DEFAULT gen_random_uuid(),",
    "  schematic_name TEXT NOT NULL,",
    "  body TEXT NOT NULL,",
    "  author UUID NOT NULL REFERENCES users (user_id),",
    "  images TEXT[] NOT NULL,",
    "  files TEXT[] NOT NULL,",
    "  game_version_id INTEGER NOT NULL REFERENCES game_versions (game_version_id),",
    "  create_version_id INTEGER NOT NULL REFERENCES create_versions (create_version_id)",
    ");",
);

const VERSION_ROWS: &str = concat!(
    "INSERT INTO game_versions (game_version_id, game_version_name) VALUES (5, '1.20.1');",
    "INSERT INTO create_versions (create_version_id, create_version_name) VALUES (8, '0.5.1');",
);

/// Whether the referenced version rows are inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionRows {
    /// Game version 5 and Create version 8 exist.
    Present,
    /// Both version tables are empty.
    Missing,
}

/// Creates a uniquely named database on the cluster behind `admin_url`,
/// applies the schema, and returns the new database's URL.
pub fn fresh_database(
    admin_url: &str,
    database_url_for: impl FnOnce(&str) -> String,
    versions: VersionRows,
) -> Result<String, String> {
    let name = format!("seeder_{}", Uuid::new_v4().simple());

    let mut admin = Client::connect(admin_url, NoTls).map_err(|err| describe_postgres_error(&err))?;
    admin
        .batch_execute(&format!("CREATE DATABASE {name}"))
        .map_err(|err| describe_postgres_error(&err))?;

    let url = database_url_for(&name);
    let mut client = Client::connect(&url, NoTls).map_err(|err| describe_postgres_error(&err))?;
    client
        .batch_execute(BASE_SCHEMA)
        .map_err(|err| describe_postgres_error(&err))?;
    if versions == VersionRows::Present {
        client
            .batch_execute(VERSION_ROWS)
            .map_err(|err| describe_postgres_error(&err))?;
    }

    Ok(url)
}
