//! Migration execution

use mr_core::{MigrationOutcome, MigrationPlan, MigrationResult, PlannedMigration, RunSummary};
use mr_db::Database;
use std::time::Instant;

/// Results of a plan run, in execution order
#[derive(Debug, Clone)]
pub struct RunReport {
    /// One result per attempted migration
    pub results: Vec<MigrationResult>,

    /// Aggregated counts
    pub summary: RunSummary,
}

impl RunReport {
    /// The migration that stopped the run, if any
    pub fn failure(&self) -> Option<&MigrationResult> {
        self.results.iter().find(|r| !r.outcome.is_success())
    }
}

/// Applies migrations one at a time through a `Database`
pub struct MigrationRunner<'a> {
    db: &'a dyn Database,
    strict: bool,
}

impl<'a> MigrationRunner<'a> {
    /// Create a runner that skips missing files
    pub fn new(db: &'a dyn Database) -> Self {
        Self { db, strict: false }
    }

    /// Fail on missing files instead of skipping them
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Apply a single migration.
    ///
    /// Never returns an error: read and execution failures become
    /// `MigrationOutcome::Failed` carrying the stringified cause.
    pub async fn run_migration(&self, migration: &PlannedMigration) -> MigrationResult {
        let start = Instant::now();
        let outcome = self.apply(migration).await;
        MigrationResult {
            name: migration.name.clone(),
            outcome,
            duration: start.elapsed(),
        }
    }

    async fn apply(&self, migration: &PlannedMigration) -> MigrationOutcome {
        if !migration.is_present() {
            if self.strict {
                return MigrationOutcome::Failed(format!(
                    "file not found: {}",
                    migration.path.display()
                ));
            }
            log::debug!("{} not found, skipping", migration.path.display());
            return MigrationOutcome::SkippedMissing;
        }

        let sql = match tokio::fs::read_to_string(&migration.path).await {
            Ok(sql) => sql,
            Err(e) => {
                return MigrationOutcome::Failed(format!(
                    "failed to read {}: {}",
                    migration.path.display(),
                    e
                ))
            }
        };

        log::debug!(
            "Submitting {} ({} bytes) via {}",
            migration.name,
            sql.len(),
            self.db.db_type()
        );

        match self.db.execute_batch(&sql).await {
            Ok(()) => MigrationOutcome::Applied,
            Err(e) => MigrationOutcome::Failed(e.to_string()),
        }
    }

    /// Apply every migration of `plan` in order, stopping at the first failure
    pub async fn run_plan(&self, plan: &MigrationPlan) -> RunReport {
        self.run_plan_with(plan, |_| {}).await
    }

    /// Like [`run_plan`](Self::run_plan), calling `on_result` after each migration
    pub async fn run_plan_with<F>(&self, plan: &MigrationPlan, mut on_result: F) -> RunReport
    where
        F: FnMut(&MigrationResult),
    {
        let start = Instant::now();
        let mut results = Vec::with_capacity(plan.len());

        for migration in &plan.entries {
            let result = self.run_migration(migration).await;
            on_result(&result);
            let stop = !result.outcome.is_success();
            results.push(result);
            if stop {
                break;
            }
        }

        let summary = RunSummary::from_results(plan.len(), &results, start.elapsed());
        RunReport { results, summary }
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
