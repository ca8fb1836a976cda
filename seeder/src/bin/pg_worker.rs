//! Helper binary invoked by `pg_embedded_setup_unpriv` when tests run as root.
//!
//! The bootstrapper drops privileges and runs this worker with an operation
//! (`setup`, `start`, `stop`, `cleanup`, or `cleanup-full`) and the path of a
//! JSON [`WorkerPayload`]. The payload's environment has to be in place before
//! `postgresql_embedded` spawns `initdb` or `pg_ctl`, so the worker re-runs
//! itself once with that environment applied to the child process.

use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use color_eyre::eyre::{Context, Report, Result, eyre};
use pg_embedded_setup_unpriv::worker::{PlainSecret, WorkerPayload};
use postgresql_embedded::{PostgreSQL, Status};
use tokio::runtime::Builder;

/// Set on the re-executed worker once the payload environment is applied.
const ENVIRONMENT_APPLIED: &str = "SEEDER_PG_WORKER_ENVIRONMENT_APPLIED";

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let args: Vec<OsString> = env::args_os().collect();
    let request = WorkerRequest::parse(args.iter().cloned())?;
    let payload = load_payload(&request.config_path)?;

    if env::var_os(ENVIRONMENT_APPLIED).is_none() && !payload.environment.is_empty() {
        let program = env::current_exe().wrap_err("failed to locate pg_worker executable")?;
        let status = environment_command(&program, args.iter().skip(1), &payload.environment)
            .status()
            .wrap_err("failed to re-run pg_worker with the payload environment")?;
        return Ok(if status.success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    execute(request.operation, payload)?;
    Ok(ExitCode::SUCCESS)
}

#[derive(Debug)]
struct WorkerRequest {
    operation: Operation,
    config_path: PathBuf,
}

impl WorkerRequest {
    fn parse(mut args: impl Iterator<Item = OsString>) -> Result<Self> {
        let _program = args.next();
        let operation = Operation::parse(
            &args
                .next()
                .ok_or_else(|| eyre!("missing operation argument"))?,
        )?;
        let config_path = PathBuf::from(
            args.next()
                .ok_or_else(|| eyre!("missing config path argument"))?,
        );
        if let Some(extra) = args.next() {
            return Err(eyre!(
                "unexpected extra argument: {}; expected only operation and config path",
                extra.to_string_lossy()
            ));
        }
        Ok(Self {
            operation,
            config_path,
        })
    }
}

fn load_payload(path: &Path) -> Result<WorkerPayload> {
    let payload = fs::read(path)
        .with_context(|| format!("failed to read worker config at {}", path.display()))?;
    serde_json::from_slice(&payload)
        .with_context(|| format!("failed to parse worker config at {}", path.display()))
}

/// Builds the command that re-runs the worker with `environment` applied.
fn environment_command<'a>(
    program: &Path,
    args: impl Iterator<Item = &'a OsString>,
    environment: &[(String, Option<PlainSecret>)],
) -> Command {
    let mut command = Command::new(program);
    command.args(args).env(ENVIRONMENT_APPLIED, "1");
    for (key, value) in environment {
        match value {
            Some(secret) => command.env(key, secret.expose()),
            None => command.env_remove(key),
        };
    }
    command
}

fn execute(operation: Operation, payload: WorkerPayload) -> Result<()> {
    let settings = payload
        .settings
        .into_settings()
        .map_err(|err| Report::new(err).wrap_err("failed to rebuild postgres settings"))?;

    match operation {
        Operation::Cleanup => return remove_dir(&settings.data_dir),
        Operation::CleanupFull => {
            remove_dir(&settings.data_dir)?;
            return remove_dir(&settings.installation_dir);
        }
        Operation::Setup | Operation::Start | Operation::Stop => {}
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build pg_worker runtime")?;

    let data_dir = settings.data_dir.clone();
    let mut postgres = PostgreSQL::new(settings);
    runtime
        .block_on(async {
            match operation {
                Operation::Stop => match postgres.stop().await {
                    Err(err) if is_missing_pid(&err) => Ok(()),
                    other => other,
                },
                _ => {
                    if !is_set_up(&postgres, &data_dir) {
                        postgres.setup().await?;
                    }
                    if operation == Operation::Start && postgres.status() != Status::Started {
                        postgres.start().await?;
                    }
                    Ok::<(), postgresql_embedded::Error>(())
                }
            }
        })
        .with_context(|| format!("postgresql_embedded::{operation} failed"))?;

    if operation == Operation::Start {
        // Dropping the handle would stop the server this worker just started.
        std::mem::forget(postgres);
    }
    Ok(())
}

fn is_set_up(postgres: &PostgreSQL, data_dir: &Path) -> bool {
    data_dir.join("PG_VERSION").is_file() && postgres.status() != Status::NotInstalled
}

fn is_missing_pid(err: &postgresql_embedded::Error) -> bool {
    let message = err.to_string();
    message.contains("postmaster.pid") && message.contains("does not exist")
}

fn remove_dir(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() || path.parent().is_none() {
        return Err(eyre!("refusing to remove {}", path.display()));
    }
    match fs::remove_dir_all(path) {
        Err(err) if err.kind() != std::io::ErrorKind::NotFound => {
            Err(Report::new(err).wrap_err(format!("failed to remove {}", path.display())))
        }
        _ => Ok(()),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Operation {
    Setup,
    Start,
    Stop,
    Cleanup,
    CleanupFull,
}

impl Operation {
    fn parse(raw: &OsStr) -> Result<Self> {
        match raw.to_string_lossy().as_ref() {
            "setup" => Ok(Self::Setup),
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            "cleanup" => Ok(Self::Cleanup),
            "cleanup-full" => Ok(Self::CleanupFull),
            other => Err(eyre!(
                "unknown pg_worker operation '{other}'; valid operations are setup, start, stop, cleanup, and cleanup-full"
            )),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Setup => "setup",
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Cleanup => "cleanup",
            Self::CleanupFull => "cleanup-full",
        })
    }
}
