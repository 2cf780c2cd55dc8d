//! Per-migration outcomes and run summaries

use crate::migration_name::MigrationName;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Result of processing a single migration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum MigrationOutcome {
    /// The file was submitted and the remote side accepted it
    Applied,
    /// The file does not exist on disk; counts as success
    SkippedMissing,
    /// Reading or executing the migration failed
    Failed(String),
}

impl MigrationOutcome {
    /// Whether this outcome lets the run continue
    pub fn is_success(&self) -> bool {
        !matches!(self, MigrationOutcome::Failed(_))
    }
}

impl fmt::Display for MigrationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MigrationOutcome::Applied => write!(f, "applied"),
            MigrationOutcome::SkippedMissing => write!(f, "skipped"),
            MigrationOutcome::Failed(_) => write!(f, "failed"),
        }
    }
}

/// A migration paired with its outcome
#[derive(Debug, Clone, Serialize)]
pub struct MigrationResult {
    /// Migration name
    pub name: MigrationName,

    /// What happened
    pub outcome: MigrationOutcome,

    /// Time spent on this migration
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

/// Summary of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Entries in the plan
    pub total: usize,

    /// Migrations applied
    pub applied: usize,

    /// Migrations skipped because the file was missing
    pub skipped: usize,

    /// Migrations that failed (0 or 1, the run stops at the first)
    pub failed: usize,

    /// Migrations never attempted because an earlier one failed
    pub not_attempted: usize,

    /// Total execution time
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl RunSummary {
    /// Create a summary from the results of a plan of `total` entries
    pub fn from_results(total: usize, results: &[MigrationResult], duration: Duration) -> Self {
        let count = |pred: fn(&MigrationOutcome) -> bool| {
            results.iter().filter(|r| pred(&r.outcome)).count()
        };
        let applied = count(|o| matches!(o, MigrationOutcome::Applied));
        let skipped = count(|o| matches!(o, MigrationOutcome::SkippedMissing));
        let failed = count(|o| matches!(o, MigrationOutcome::Failed(_)));

        Self {
            total,
            applied,
            skipped,
            failed,
            not_attempted: total.saturating_sub(results.len()),
            duration,
        }
    }

    /// True iff every migration was applied or skipped
    pub fn succeeded(&self) -> bool {
        self.failed == 0 && self.not_attempted == 0
    }
}

#[cfg(test)]
#[path = "outcome_test.rs"]
mod tests;
