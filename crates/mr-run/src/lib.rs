//! mr-run - Migration runner for migrun
//!
//! This crate applies a `MigrationPlan` through a `Database`, one migration
//! at a time, stopping at the first failure.

pub mod runner;

pub use runner::{MigrationRunner, RunReport};
