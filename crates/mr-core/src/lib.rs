//! mr-core - Core library for migrun
//!
//! This crate provides configuration parsing, migration names, migration
//! plan construction, and the outcome types shared by the runner and CLI.

pub mod config;
pub mod error;
pub mod migration_name;
pub mod outcome;
pub mod plan;

pub use config::{Config, RemoteConfig, TargetConfig};
pub use error::{CoreError, CoreResult};
pub use migration_name::MigrationName;
pub use outcome::{MigrationOutcome, MigrationResult, RunSummary};
pub use plan::{MigrationPlan, PlanSource, PlannedMigration};
