//! Run command implementation

use anyhow::Result;
use mr_core::{MigrationOutcome, MigrationPlan, MigrationResult, RunSummary};
use mr_run::MigrationRunner;

use crate::cli::{GlobalArgs, RunArgs};
use crate::commands::common::{connect, load_config, load_plan, resolve_remote, ExitCode};

/// Execute the run command
pub async fn execute(args: &RunArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let plan = load_plan(global, &config, args.migrations.as_deref())?;
    let strict = args.strict || config.strict;

    if args.dry_run {
        return dry_run(&plan, strict);
    }

    let remote = resolve_remote(global, &config)?;
    let backend = connect(&remote, args.service_key.as_deref())?;

    println!("Running database migrations...\n");
    println!("  Project: {}", config.name);
    println!("  Target: {}", remote.require_url()?);
    println!("  Total migrations: {}\n", plan.len());

    let runner = MigrationRunner::new(&backend).strict(strict);
    let report = runner.run_plan_with(&plan, print_result).await;

    if let Some(failure) = report.failure() {
        println!("\n✗ Migration failed: {}", failure.name);
        println!("Stopping migration process.");
        print_summary(&report.summary);
        return Err(ExitCode(1).into());
    }

    println!("\n✓ All migrations completed successfully!");
    print_summary(&report.summary);
    Ok(())
}

fn print_result(result: &MigrationResult) {
    match &result.outcome {
        MigrationOutcome::Applied => {
            println!("  ✓ {} ({}ms)", result.name, result.duration.as_millis())
        }
        MigrationOutcome::SkippedMissing => {
            println!("  - {} - file not found, skipping", result.name)
        }
        MigrationOutcome::Failed(reason) => println!("  ✗ {} - Error: {}", result.name, reason),
    }
}

fn print_summary(summary: &RunSummary) {
    let mut line = format!(
        "{} applied, {} skipped",
        summary.applied, summary.skipped
    );
    if summary.failed > 0 {
        line.push_str(&format!(", {} failed", summary.failed));
    }
    if summary.not_attempted > 0 {
        line.push_str(&format!(", {} not attempted", summary.not_attempted));
    }
    println!("{} (total time: {}ms)", line, summary.duration.as_millis());
}

/// Report what a run would do without contacting the database
fn dry_run(plan: &MigrationPlan, strict: bool) -> Result<()> {
    println!("Dry run - {} migrations from {}\n", plan.len(), plan.dir.display());

    let mut missing = 0;
    for entry in &plan.entries {
        if entry.is_present() {
            println!("  would apply: {}", entry.name);
        } else {
            missing += 1;
            if strict {
                println!("  would fail (missing): {}", entry.name);
            } else {
                println!("  would skip (missing): {}", entry.name);
            }
        }
    }

    println!();
    if strict && missing > 0 {
        println!("{} missing migration files (strict mode)", missing);
        return Err(ExitCode(1).into());
    }
    println!("{} to apply, {} missing", plan.len() - missing, missing);
    Ok(())
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
