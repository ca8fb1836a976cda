//! Command-line arguments for `seed-fixtures`.

use clap::Parser;

use crate::domain::{DEFAULT_BATCH_COUNT, SeedPlan};

/// `seed-fixtures` command arguments.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "seed-fixtures",
    about = "Populate a development database with fake users and schematics",
    version
)]
pub struct Cli {
    /// The number of mock users to create.
    #[arg(
        short = 'u',
        long = "users",
        value_name = "count",
        default_value_t = DEFAULT_BATCH_COUNT,
        value_parser = parse_count
    )]
    pub users: usize,
    /// The number of mock schematics to create on each user.
    #[arg(
        short = 's',
        long = "schematics",
        value_name = "count",
        default_value_t = DEFAULT_BATCH_COUNT,
        value_parser = parse_count
    )]
    pub schematics: usize,
}

impl Cli {
    /// The seeding plan these arguments describe.
    #[must_use]
    pub const fn plan(&self) -> SeedPlan {
        SeedPlan {
            users: self.users,
            schematics_per_user: self.schematics,
        }
    }
}

fn parse_count(raw: &str) -> Result<usize, String> {
    let count = raw
        .trim()
        .parse::<usize>()
        .map_err(|error| format!("expected a positive integer: {error}"))?;
    if count == 0 {
        return Err("count must be at least 1".to_owned());
    }
    Ok(count)
}
