//! Task storage for the task tracking API
//!
//! This crate provides the [`TaskStore`] abstraction and three backends: an
//! in-memory store, an embedded SQLite file, and PostgreSQL (behind the
//! `postgres` feature). The [`selector`] module picks exactly one of them at
//! startup.

mod error;
mod memory;
#[cfg(feature = "postgres")]
mod postgres;
mod row;
mod seed;
pub mod selector;
mod sqlite;
#[cfg(test)]
mod testing;
mod traits;

pub use error::*;
pub use memory::*;
#[cfg(feature = "postgres")]
pub use postgres::*;
pub use seed::*;
pub use selector::{open_store, BackendKind, BackendName, SelectError, StoreConfig};
pub use sqlite::*;
pub use traits::*;
