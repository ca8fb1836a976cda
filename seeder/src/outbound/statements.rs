//! Multi-row `INSERT` statements for fixture batches.
//!
//! Every batch becomes exactly one statement with one value group per row.
//! Placeholders are numbered row-major: row 0 binds `$1..$w`, row 1 binds
//! `$w+1..$2w`, and so on, where `w` is the column count.

use crate::domain::ports::FixtureRepositoryError;

/// Most bind parameters one PostgreSQL statement can carry.
pub const MAX_BIND_PARAMETERS: usize = 65_535;

/// Shape of a bulk insert into one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkInsert {
    table: &'static str,
    columns: &'static [&'static str],
    returning: Option<&'static str>,
}

/// Insert into `users`, returning each row's key and username.
pub const USER_INSERT: BulkInsert = BulkInsert {
    table: "users",
    columns: &[
        "displayname",
        "username",
        "email",
        "oauth_id",
        "oauth_provider",
    ],
    returning: Some("user_id, username"),
};

/// Insert into `schematics`.
pub const SCHEMATIC_INSERT: BulkInsert = BulkInsert {
    table: "schematics",
    columns: &[
        "schematic_name",
        "body",
        "author",
        "images",
        "files",
        "game_version_id",
        "create_version_id",
    ],
    returning: None,
};

impl BulkInsert {
    /// Number of bind parameters per row.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.columns.len()
    }

    /// Renders the statement for `rows` value groups.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureRepositoryError::TooManyParameters`] when the batch
    /// would exceed [`MAX_BIND_PARAMETERS`].
    pub fn sql(&self, rows: usize) -> Result<String, FixtureRepositoryError> {
        self.check_parameter_limit(rows)?;

        let width = self.width();
        let groups = (0..rows)
            .map(|row| {
                let offset = row * width;
                let placeholders = (1..=width)
                    .map(|column| format!("${}", offset + column))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("({placeholders})")
            })
            .collect::<Vec<_>>()
            .join(", ");

        let mut sql = format!(
            "INSERT INTO {} ({}) VALUES {groups}",
            self.table,
            self.columns.join(", ")
        );
        if let Some(returning) = self.returning {
            sql.push_str(" RETURNING ");
            sql.push_str(returning);
        }
        Ok(sql)
    }

    fn check_parameter_limit(&self, rows: usize) -> Result<(), FixtureRepositoryError> {
        let parameters = rows.checked_mul(self.width()).unwrap_or(usize::MAX);
        if parameters > MAX_BIND_PARAMETERS {
            return Err(FixtureRepositoryError::TooManyParameters {
                rows,
                parameters,
                limit: MAX_BIND_PARAMETERS,
            });
        }
        Ok(())
    }
}
