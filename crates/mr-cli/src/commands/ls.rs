//! List command implementation

use anyhow::{Context, Result};
use mr_core::MigrationPlan;
use serde::Serialize;

use crate::cli::{GlobalArgs, LsArgs, LsOutput};
use crate::commands::common::{load_config, load_plan};

/// One row of `mr ls`
#[derive(Debug, Serialize)]
struct MigrationInfo {
    /// Position in the plan, starting at 1
    order: usize,
    name: String,
    path: String,
    present: bool,
    /// File size in bytes, if present
    #[serde(skip_serializing_if = "Option::is_none")]
    bytes: Option<u64>,
}

fn collect_info(plan: &MigrationPlan) -> Vec<MigrationInfo> {
    plan.entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let bytes = std::fs::metadata(&entry.path).ok().map(|m| m.len());
            MigrationInfo {
                order: i + 1,
                name: entry.name.to_string(),
                path: entry.path.display().to_string(),
                present: entry.is_present(),
                bytes,
            }
        })
        .collect()
}

/// Execute the ls command
pub async fn execute(args: &LsArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let plan = load_plan(global, &config, args.migrations.as_deref())?;
    let infos = collect_info(&plan);

    match args.output {
        LsOutput::Table => print_table(&plan, &infos),
        LsOutput::Json => print_json(&infos)?,
    }

    Ok(())
}

fn print_table(plan: &MigrationPlan, infos: &[MigrationInfo]) {
    if infos.is_empty() {
        println!("No migrations found in {}", plan.dir.display());
        return;
    }

    let name_width = infos
        .iter()
        .map(|m| m.name.len())
        .max()
        .unwrap_or(4)
        .max(4);
    let status_width = 7;

    println!(
        "{:>3}  {:<name_width$}  {:<status_width$}  BYTES",
        "#",
        "NAME",
        "STATUS",
        name_width = name_width,
        status_width = status_width
    );
    println!(
        "{:->3}  {:-<name_width$}  {:-<status_width$}  {}",
        "",
        "",
        "",
        "-".repeat(8),
        name_width = name_width,
        status_width = status_width
    );

    for info in infos {
        let status = if info.present { "present" } else { "missing" };
        let bytes = info
            .bytes
            .map(|b| b.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>3}  {:<name_width$}  {:<status_width$}  {}",
            info.order,
            info.name,
            status,
            bytes,
            name_width = name_width,
            status_width = status_width
        );
    }

    let missing = infos.iter().filter(|m| !m.present).count();
    println!();
    println!(
        "{} migrations ({} present, {} missing) from {} in {}",
        infos.len(),
        infos.len() - missing,
        missing,
        plan.source,
        plan.dir.display()
    );
}

fn print_json(infos: &[MigrationInfo]) -> Result<()> {
    let json = serde_json::to_string_pretty(infos).context("Failed to serialize to JSON")?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
#[path = "ls_test.rs"]
mod tests;
