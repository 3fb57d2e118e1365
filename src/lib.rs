//! Public library interface for the Habit Streaks MCP server
//!
//! This module exports the server implementation and the domain, storage
//! and analytics types so they can be used by other applications or tests.

use std::path::PathBuf;
use chrono::NaiveDate;
use thiserror::Error;

// Internal modules
mod domain;
mod storage;
mod analytics;
mod tools;
mod mcp;

// Re-export public modules and types
pub use domain::*;
pub use storage::{HabitStorage, JsonFileStorage, Mutation, StorageError};
pub use analytics::{AnalyticsEngine, WeeklySummary, WEEK_WINDOW_DAYS};
pub use tools::{
    create_habit, delete_habit, home_view, log_habit, weekly_summary,
    CreateHabitParams, CreateHabitResponse, CreateOutcome,
    DeleteHabitParams, DeleteHabitResponse, HomeView,
    LogHabitParams, LogHabitResponse, LogOutcome,
};
pub use mcp::McpServer;
pub use mcp::protocol::{JsonRpcError, JsonRpcResponse};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Storage error: {0}")]
    Database(#[from] storage::StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Today's date on the local clock; completions are always recorded for it
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Main habit tracker server that implements the MCP protocol
///
/// This server keeps habits in a JSON document and provides tools for
/// creating habits, marking them done and viewing streaks and summaries.
pub struct HabitTrackerServer {
    storage: JsonFileStorage,
}

impl HabitTrackerServer {
    /// Create a new habit tracker server backed by the document at `data_path`
    ///
    /// The document is created empty if it doesn't already exist.
    pub async fn new(data_path: PathBuf) -> Result<Self, ServerError> {
        tracing::info!("Initializing Habit Streaks server with data file: {:?}", data_path);

        let storage = JsonFileStorage::new(data_path)?;

        Ok(Self { storage })
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method will block until stdin is closed or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Starting MCP server...");

        // Fail early on an unreadable document
        let habits = self.storage.load_habits()?;
        tracing::info!("Server started successfully, found {} existing habits", habits.len());

        let mut mcp_server = McpServer::new(self);
        mcp_server.run().await?;

        Ok(())
    }

    /// Get a reference to the storage layer (useful for testing)
    pub fn storage(&self) -> &JsonFileStorage {
        &self.storage
    }
}
