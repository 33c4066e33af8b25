//! Service layer for the task/user roster system
//!
//! Provides configuration loading, telemetry bootstrap, repository setup,
//! and the handlers that map repository outcomes to the JSON response
//! envelope. HTTP routing itself is the embedding application's concern.

pub mod config;
pub mod handlers;
pub mod setup;
pub mod telemetry;

pub use config::{Config, DatabaseConfig, LogFormat, LoggingConfig};
pub use handlers::ApiEnvelope;
pub use setup::create_repository;
pub use telemetry::init_telemetry;
