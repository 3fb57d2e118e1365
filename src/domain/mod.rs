//! Domain module containing core business logic and data types
//!
//! This module defines the core entities (Habit, EffortEntry), the streak
//! state machine, and milestone message resolution.

pub mod habit;
pub mod entry;
pub mod messages;
pub mod streak;
pub mod types;

// Re-export public types for easy access
pub use habit::*;
pub use entry::*;
pub use messages::*;
pub use streak::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid effort: {0}")]
    InvalidEffort(String),
}
