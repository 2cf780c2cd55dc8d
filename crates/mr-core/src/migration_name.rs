//! Strongly-typed migration file name.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;
use std::path::{Component, Path, PathBuf};

/// A migration file name, relative to the migrations directory.
///
/// Identity is the normalized string: `.` components are dropped and
/// separators collapse to `/`. The name may contain subdirectories but can
/// never point outside the migrations directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MigrationName(String);

impl MigrationName {
    /// Parse and validate a migration name.
    pub fn parse(name: impl Into<String>) -> CoreResult<Self> {
        let name = name.into();
        let invalid = |reason: &str| CoreError::InvalidMigrationName {
            name: name.clone(),
            reason: reason.to_string(),
        };

        if name.trim().is_empty() {
            return Err(invalid("name is empty"));
        }

        // "./a.sql" and "a.sql" must compare equal for duplicate checks
        let mut parts = Vec::new();
        for component in Path::new(&name).components() {
            match component {
                Component::Normal(part) => parts.push(part.to_string_lossy()),
                Component::CurDir => {}
                Component::ParentDir => return Err(invalid("'..' is not allowed")),
                Component::RootDir | Component::Prefix(_) => {
                    return Err(invalid("must be a relative path"))
                }
            }
        }

        if parts.is_empty() {
            return Err(invalid("does not name a file"));
        }

        Ok(Self(parts.join("/")))
    }

    /// Return the underlying name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve this migration against the migrations directory.
    pub fn resolve(&self, dir: &Path) -> PathBuf {
        dir.join(&self.0)
    }
}

impl<'de> Deserialize<'de> for MigrationName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        MigrationName::parse(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for MigrationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MigrationName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for MigrationName {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for MigrationName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for MigrationName {
    type Error = CoreError;

    fn try_from(s: &str) -> CoreResult<Self> {
        Self::parse(s)
    }
}

impl PartialEq<str> for MigrationName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for MigrationName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
#[path = "migration_name_test.rs"]
mod tests;
