//! Shared helpers for CLI commands

use anyhow::{Context, Result};
use mr_core::{Config, MigrationPlan, RemoteConfig};
use mr_db::{RpcBackend, RpcOptions};
use std::fmt;

use crate::cli::GlobalArgs;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; the failure has already been reported.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Load the config from `--config` or the project directory
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    match &global.config {
        Some(path) => Config::load(path).context("Failed to load configuration file"),
        None => Config::load_from_dir(&global.project_dir)
            .context("Failed to load project configuration"),
    }
}

/// Build the migration plan, honoring a `--migrations` override
pub(crate) fn load_plan(
    global: &GlobalArgs,
    config: &Config,
    migrations_arg: Option<&str>,
) -> Result<MigrationPlan> {
    let explicit = migrations_arg
        .map(MigrationPlan::parse_name_list)
        .transpose()
        .context("Invalid --migrations list")?;

    let plan = MigrationPlan::for_project(config, &global.project_dir, explicit)
        .context("Failed to build migration plan")?;

    log::debug!(
        "Plan has {} migrations ({}) from {}",
        plan.len(),
        plan.source,
        plan.dir.display()
    );
    Ok(plan)
}

/// Remote settings for the selected target
pub(crate) fn resolve_remote(global: &GlobalArgs, config: &Config) -> Result<RemoteConfig> {
    let target = Config::resolve_target(global.target.as_deref());
    if let Some(name) = &target {
        log::debug!("Using target '{}'", name);
    }
    config
        .get_remote_config(target.as_deref())
        .context("Failed to resolve remote configuration")
}

/// Build the RPC backend.
///
/// An explicit `service_key` wins over the configured environment variable.
pub(crate) fn connect(remote: &RemoteConfig, service_key: Option<&str>) -> Result<RpcBackend> {
    let base_url = remote.require_url()?.to_string();
    let service_key = match service_key.filter(|k| !k.trim().is_empty()) {
        Some(key) => key.to_string(),
        None => remote.service_key_from_env()?,
    };

    let backend = RpcBackend::new(RpcOptions {
        base_url,
        function: remote.rpc_function.clone(),
        param: remote.query_param.clone(),
        service_key,
        timeout: remote.timeout(),
    })
    .context("Failed to create RPC client")?;

    log::debug!("RPC endpoint: {}", backend.endpoint());
    Ok(backend)
}
