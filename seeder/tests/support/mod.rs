//! Shared helpers for seeder integration tests.
//!
//! Each suite compiles as its own crate, so the cluster bootstrap, skip
//! policy, and schema setup live here instead of being copied per file.

pub mod cluster_skip;
pub mod pg_embed;
pub mod schema;

pub use cluster_skip::handle_cluster_setup_failure;
