//! Database trait definition

use crate::error::DbResult;
use async_trait::async_trait;

/// SQL execution seam for migrun
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute SQL text (possibly several statements) as one opaque query
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
