//! MCP tools for habit management
//!
//! This module contains the operations external clients can call: create,
//! mark done, delete, and the read-only home view and weekly summary.

pub mod create;
pub mod log;
pub mod delete;
pub mod home;
pub mod insights;

// Re-export tool functions for easy access
pub use create::*;
pub use log::*;
pub use delete::*;
pub use home::*;
pub use insights::*;
