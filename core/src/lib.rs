//! Roster Core Library
//!
//! This crate provides the domain models, error taxonomy, and trait
//! interfaces for the task/user roster system. All other crates depend on
//! the types defined here.
//!
//! # Architecture
//!
//! - [`models`] - Write payloads and read projections
//! - [`error`] - Error types and result handling
//! - [`repository`] - Repository traits for data persistence
//! - [`validation`] - Payload validation and date normalization
//!
//! # Example
//!
//! ```rust
//! use roster_core::{
//!     models::UserDescriptor,
//!     validation::PayloadValidator,
//! };
//!
//! let user = UserDescriptor {
//!     name: "Ana".to_string(),
//!     age: 34,
//!     skills: vec!["sql".to_string()],
//! };
//!
//! PayloadValidator::validate_user(&user).unwrap();
//! ```

pub mod error;
pub mod models;
pub mod repository;
pub mod validation;

// Re-export commonly used types at the crate root for convenience
pub use error::{Result, StoreError};
pub use models::{TaskOverview, TaskPayload, UserDescriptor, UserProfile};
pub use repository::{TaskRepository, UserRepository};
pub use validation::{normalize_task_date, PayloadValidator};

/// Current version of the core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Current crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
