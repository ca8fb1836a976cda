//! `SKIP_TEST_CLUSTER` policy for suites needing embedded PostgreSQL.

/// Returns true when `SKIP_TEST_CLUSTER` is "1", "true", or "yes"
/// (case-insensitive).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skips the calling test when the cluster is unavailable and skipping is
/// allowed; panics otherwise so CI breakage is not masked.
#[expect(clippy::print_stderr, reason = "skip marker is read from test output")]
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
