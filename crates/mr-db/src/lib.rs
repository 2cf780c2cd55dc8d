//! mr-db - Database abstraction layer for migrun
//!
//! This crate provides the `Database` trait and the RPC backend that
//! submits SQL to a hosted database through its generic SQL execution
//! function.

pub mod error;
pub mod rpc;
pub mod traits;

pub use error::{DbError, DbResult};
pub use rpc::{RpcBackend, RpcOptions};
pub use traits::Database;
