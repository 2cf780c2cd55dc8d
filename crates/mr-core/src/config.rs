//! Configuration types and parsing for migrun.yml

use crate::error::{CoreError, CoreResult};
use crate::migration_name::MigrationName;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable consulted when `--target` is not given
pub const TARGET_ENV_VAR: &str = "MR_TARGET";

/// Default environment variable holding the service-role key
pub const DEFAULT_SERVICE_KEY_ENV: &str = "MIGRUN_SERVICE_KEY";

/// Main project configuration from migrun.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Directory holding the migration files, relative to the project root
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: String,

    /// Explicit ordered manifest. When absent the directory is scanned.
    #[serde(default)]
    pub migrations: Option<Vec<MigrationName>>,

    /// Fail on missing migration files instead of skipping them
    #[serde(default)]
    pub strict: bool,

    /// Remote RPC endpoint settings
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Named target configurations (e.g., dev, staging, prod)
    #[serde(default)]
    pub targets: HashMap<String, TargetConfig>,
}

/// Remote RPC endpoint configuration.
///
/// Holds no secrets: the service key is looked up in the environment
/// variable named by `service_key_env`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteConfig {
    /// Project base URL, e.g. `https://abcd.supabase.co`
    #[serde(default)]
    pub url: Option<String>,

    /// Name of the SQL execution function exposed over RPC
    #[serde(default = "default_rpc_function")]
    pub rpc_function: String,

    /// Name of the parameter carrying the SQL text
    #[serde(default = "default_query_param")]
    pub query_param: String,

    /// Environment variable holding the service-role key
    #[serde(default = "default_service_key_env")]
    pub service_key_env: String,

    /// Per-request timeout in seconds (transport default when unset)
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: None,
            rpc_function: default_rpc_function(),
            query_param: default_query_param(),
            service_key_env: default_service_key_env(),
            timeout_secs: None,
        }
    }
}

impl RemoteConfig {
    /// The configured URL, validated to be an http(s) URL
    pub fn require_url(&self) -> CoreResult<&str> {
        let url = self
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| CoreError::InvalidRemoteUrl {
                message: "remote.url is not set".to_string(),
            })?;
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(CoreError::InvalidRemoteUrl {
                message: format!("'{}' must start with http:// or https://", url),
            });
        }
        Ok(url)
    }

    /// Request timeout, if configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Look up the service key from `service_key_env`
    pub fn service_key_from_env(&self) -> CoreResult<String> {
        match std::env::var(&self.service_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(CoreError::MissingServiceKey {
                env_var: self.service_key_env.clone(),
            }),
        }
    }
}

/// Target-specific overrides of the remote settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    /// URL override
    #[serde(default)]
    pub url: Option<String>,

    /// Service key variable override
    #[serde(default)]
    pub service_key_env: Option<String>,

    /// Timeout override
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_migrations_dir() -> String {
    "migrations".to_string()
}

fn default_rpc_function() -> String {
    "exec_sql".to_string()
}

fn default_query_param() -> String {
    "query".to_string()
}

fn default_service_key_env() -> String {
    DEFAULT_SERVICE_KEY_ENV.to_string()
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> CoreResult<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for migrun.yml or migrun.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("migrun.yml");
        let yaml_path = dir.join("migrun.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: yml_path.display().to_string(),
            })
        }
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Project name cannot be empty".to_string(),
            });
        }

        if self.migrations_dir.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "migrations_dir cannot be empty".to_string(),
            });
        }

        if let Some(manifest) = &self.migrations {
            let mut seen = HashSet::new();
            for name in manifest {
                if !seen.insert(name.as_str()) {
                    return Err(CoreError::DuplicateMigration {
                        name: name.to_string(),
                    });
                }
            }
        }

        let timeouts = std::iter::once(self.remote.timeout_secs)
            .chain(self.targets.values().map(|t| t.timeout_secs));
        if timeouts.flatten().any(|t| t == 0) {
            return Err(CoreError::ConfigInvalid {
                message: "timeout_secs must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// Absolute path of the migrations directory
    pub fn migrations_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.migrations_dir)
    }

    /// Names of all defined targets, sorted
    pub fn available_targets(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.targets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Remote configuration with the given target's overrides applied
    pub fn get_remote_config(&self, target: Option<&str>) -> CoreResult<RemoteConfig> {
        let mut remote = self.remote.clone();
        let Some(name) = target else {
            return Ok(remote);
        };

        let overrides = self
            .targets
            .get(name)
            .ok_or_else(|| CoreError::UnknownTarget {
                name: name.to_string(),
                available: if self.targets.is_empty() {
                    "(none)".to_string()
                } else {
                    self.available_targets().join(", ")
                },
            })?;

        if let Some(url) = &overrides.url {
            remote.url = Some(url.clone());
        }
        if let Some(env_var) = &overrides.service_key_env {
            remote.service_key_env = env_var.clone();
        }
        if overrides.timeout_secs.is_some() {
            remote.timeout_secs = overrides.timeout_secs;
        }
        Ok(remote)
    }

    /// Resolve the target name from the CLI flag or MR_TARGET
    pub fn resolve_target(cli_target: Option<&str>) -> Option<String> {
        cli_target
            .map(String::from)
            .or_else(|| std::env::var(TARGET_ENV_VAR).ok())
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
