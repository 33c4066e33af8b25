//! Database crate for the task/user roster system
//!
//! This crate provides the SQLite implementation of the roster repository
//! traits: name-based user resolution, wholesale skill-set and
//! assignment-set replacement, and the single-transaction writers that
//! tie them together.
//!
//! # Features
//!
//! - SQLite with WAL mode for file-backed databases
//! - Explicit transaction handles threaded through every write step
//! - Embedded SQL migrations
//! - Error mapping from sqlx failures to the domain taxonomy
//!
//! # Usage
//!
//! ```rust,no_run
//! use roster_db::SqliteRosterRepository;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = SqliteRosterRepository::new(":memory:").await?;
//!     repo.migrate().await?;
//!     repo.health_check().await?;
//!     Ok(())
//! }
//! ```

mod common;
mod sqlite;
mod sync;

pub use sqlite::SqliteRosterRepository;

// Re-export commonly used types from roster-core for convenience
pub use roster_core::{
    error::{Result, StoreError},
    models::{TaskOverview, TaskPayload, UserDescriptor, UserProfile},
    repository::{TaskRepository, UserRepository},
};
