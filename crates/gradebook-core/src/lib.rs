//! gradebook-core — In-memory student roster and class statistics.
//!
//! This crate defines the student record, the `RosterStore` that owns all
//! records for a session, and the configuration that fixes the record shape.

pub mod config;
pub mod error;
pub mod model;
pub mod statistics;
pub mod store;

pub use config::{load_config_from, GradebookConfig, RosterConfig};
pub use error::RosterError;
pub use model::{Grade, Student, StudentId};
pub use statistics::ClassStatistics;
pub use store::RosterStore;
