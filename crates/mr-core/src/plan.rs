//! Migration plan: the ordered list of migrations to apply
//!
//! A plan comes from one of three places, in priority order: an explicit
//! list given on the command line, the `migrations:` manifest in the config,
//! or the lexicographically sorted `*.sql` files of the migrations directory.
//! Order is execution order; nothing reorders a plan once it is built.

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::migration_name::MigrationName;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Where the plan's ordering came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanSource {
    /// Names passed explicitly (e.g. `--migrations`)
    Explicit,
    /// The `migrations:` list in the config
    Manifest,
    /// Sorted directory listing
    Discovered,
}

impl std::fmt::Display for PlanSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanSource::Explicit => write!(f, "explicit"),
            PlanSource::Manifest => write!(f, "manifest"),
            PlanSource::Discovered => write!(f, "discovered"),
        }
    }
}

/// One entry of a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedMigration {
    /// Migration name as listed
    pub name: MigrationName,

    /// Resolved path under the migrations directory
    pub path: PathBuf,
}

impl PlannedMigration {
    /// Build an entry by resolving `name` against `dir`
    pub fn new(name: MigrationName, dir: &Path) -> Self {
        let path = name.resolve(dir);
        Self { name, path }
    }

    /// Whether the path currently exists on disk
    pub fn is_present(&self) -> bool {
        self.path.exists()
    }
}

/// Ordered list of migrations bound to a directory
#[derive(Debug, Clone, Serialize)]
pub struct MigrationPlan {
    /// Migrations directory
    pub dir: PathBuf,

    /// Where the ordering came from
    pub source: PlanSource,

    /// Entries in execution order
    pub entries: Vec<PlannedMigration>,
}

impl MigrationPlan {
    /// Build a plan from a list of names, preserving their order
    pub fn from_names(
        dir: &Path,
        names: Vec<MigrationName>,
        source: PlanSource,
    ) -> CoreResult<Self> {
        let mut seen = HashSet::new();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(CoreError::DuplicateMigration {
                    name: name.to_string(),
                });
            }
        }

        let entries = names
            .into_iter()
            .map(|name| PlannedMigration::new(name, dir))
            .collect();

        Ok(Self {
            dir: dir.to_path_buf(),
            source,
            entries,
        })
    }

    /// Build a plan from the sorted `*.sql` files directly under `dir`
    pub fn discover(dir: &Path) -> CoreResult<Self> {
        if !dir.is_dir() {
            return Err(CoreError::MigrationsDirNotFound {
                path: dir.display().to_string(),
            });
        }

        let entries = std::fs::read_dir(dir).map_err(|e| CoreError::IoWithPath {
            path: dir.display().to_string(),
            source: e,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() || !path.extension().is_some_and(|e| e == "sql") {
                continue;
            }
            match path.file_name().and_then(|n| n.to_str()) {
                Some(file_name) => names.push(MigrationName::parse(file_name)?),
                None => log::warn!("Skipping non UTF-8 file name: {}", path.display()),
            }
        }
        names.sort();

        Self::from_names(dir, names, PlanSource::Discovered)
    }

    /// Build the plan for a project.
    ///
    /// `explicit` takes precedence over the config manifest, which takes
    /// precedence over directory discovery. Explicit and manifest plans do
    /// not require the directory to exist: their missing files are simply
    /// reported as missing when the plan runs.
    pub fn for_project(
        config: &Config,
        root: &Path,
        explicit: Option<Vec<MigrationName>>,
    ) -> CoreResult<Self> {
        let dir = config.migrations_dir_absolute(root);
        if let Some(names) = explicit {
            return Self::from_names(&dir, names, PlanSource::Explicit);
        }
        if let Some(manifest) = &config.migrations {
            return Self::from_names(&dir, manifest.clone(), PlanSource::Manifest);
        }
        Self::discover(&dir)
    }

    /// Parse a comma-separated list of migration names
    pub fn parse_name_list(list: &str) -> CoreResult<Vec<MigrationName>> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(MigrationName::parse)
            .collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the plan has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod tests;
