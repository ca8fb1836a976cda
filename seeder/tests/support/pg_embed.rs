//! Embedded PostgreSQL bootstrap for integration tests.
//!
//! `pg-embed-setup-unpriv` installs into `/var/tmp` by default. Unprivileged
//! runs point `PG_RUNTIME_DIR` and `PG_DATA_DIR` (when either is unset) at
//! unique directories under the target dir for the duration of the bootstrap,
//! with environment mutation serialised through `env_lock`.
//!
//! Root runs keep the library's defaults, which it prepares for the `nobody`
//! account, and hand the privileged steps to this crate's `pg_worker` binary
//! located next to the test executable.

use std::any::Any;
use std::panic;
use std::path::PathBuf;
use std::time::Duration;

use pg_embedded_setup_unpriv::test_support::ensure_worker_env;
use pg_embedded_setup_unpriv::{
    ExecutionPrivileges, ScopedEnv, TestCluster, detect_execution_privileges,
};
use uuid::Uuid;

/// Retries after a transient download or startup error.
const MAX_RETRIES: u32 = 3;

/// Base delay between attempts; doubles on each retry.
const RETRY_DELAY: Duration = Duration::from_millis(500);

fn pg_embed_target_dir() -> PathBuf {
    if let Some(target_dir) = std::env::var_os("CARGO_TARGET_DIR") {
        return PathBuf::from(target_dir).join("pg-embed");
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("target")
        .join("pg-embed")
}

fn create_unique_pg_embed_dirs() -> Result<(PathBuf, PathBuf), std::io::Error> {
    let base = pg_embed_target_dir().join(format!("seeder-{}", Uuid::new_v4().simple()));
    let runtime_dir = base.join("install");
    let data_dir = base.join("data");

    std::fs::create_dir_all(&runtime_dir)?;
    std::fs::create_dir_all(&data_dir)?;

    Ok((runtime_dir, data_dir))
}

fn is_transient_error(err: &str) -> bool {
    let err_lower = err.to_lowercase();
    [
        "error decoding response body",
        "connection reset",
        "connection refused",
        "timed out",
        "timeout",
        "temporarily unavailable",
        "network unreachable",
        "dns error",
    ]
    .iter()
    .any(|pattern| err_lower.contains(pattern))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "worker setup panicked".to_owned())
}

/// Points `PG_EMBEDDED_WORKER` at `pg_worker` when running as root.
fn worker_env() -> Result<Option<ScopedEnv>, String> {
    panic::catch_unwind(ensure_worker_env).map_err(|payload| panic_message(payload.as_ref()))
}

/// Starts a [`TestCluster`], retrying transient failures.
///
/// A missing `pg_worker` under root surfaces as a `SKIP-TEST-CLUSTER` error.
pub fn test_cluster() -> Result<TestCluster, String> {
    let worker_guard = worker_env()?;

    let needs_override = detect_execution_privileges() == ExecutionPrivileges::Unprivileged
        && (std::env::var_os("PG_RUNTIME_DIR").is_none()
            || std::env::var_os("PG_DATA_DIR").is_none());

    let _env_guard = if needs_override {
        let (runtime_dir, data_dir) =
            create_unique_pg_embed_dirs().map_err(|err| err.to_string())?;
        Some(env_lock::lock_env([
            ("PG_RUNTIME_DIR", Some(runtime_dir.to_string_lossy().into_owned())),
            ("PG_DATA_DIR", Some(data_dir.to_string_lossy().into_owned())),
        ]))
    } else {
        None
    };

    let mut last_error = String::new();
    let mut delay = RETRY_DELAY;
    for attempt in 0..=MAX_RETRIES {
        match TestCluster::new() {
            Ok(cluster) => return Ok(cluster.with_worker_guard(worker_guard)),
            Err(err) => {
                last_error = format!("{err:?}");
                if attempt == MAX_RETRIES || !is_transient_error(&last_error) {
                    break;
                }
                std::thread::sleep(delay);
                delay *= 2;
            }
        }
    }

    Err(last_error)
}
