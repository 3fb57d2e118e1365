//! MCP server implementation that handles JSON-RPC communication
//!
//! This module implements the actual MCP server that:
//! 1. Reads JSON-RPC requests from stdin
//! 2. Processes tool calls against the habits document
//! 3. Sends JSON-RPC responses to stdout

use std::collections::HashMap;
use chrono::NaiveDate;
use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::mcp::protocol::*;
use crate::tools;
use crate::{HabitTrackerServer, ServerError};

/// MCP server for one client session
pub struct McpServer {
    /// The underlying habit tracker server
    habit_tracker: HabitTrackerServer,
    /// Whether the client has finished initialization
    initialized: bool,
    /// Milestone message from the last habit_done, shown once by habit_home
    pending_notification: Option<String>,
    /// Source of "today" for completions and summaries
    clock: fn() -> NaiveDate,
}

impl McpServer {
    /// Create a new MCP server using the local clock
    pub fn new(habit_tracker: HabitTrackerServer) -> Self {
        Self::with_clock(habit_tracker, crate::today)
    }

    /// Create a new MCP server with a custom notion of "today"
    pub fn with_clock(habit_tracker: HabitTrackerServer, clock: fn() -> NaiveDate) -> Self {
        Self {
            habit_tracker,
            initialized: false,
            pending_notification: None,
            clock,
        }
    }

    /// Run the MCP server, handling JSON-RPC over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.handle_line(&line).await {
                        let response_str = serde_json::to_string(&response)?;

                        // Write response + newline
                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    ///
    /// Returns `None` for blank lines and notifications, which get no reply.
    pub async fn handle_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        self.handle_request(request).await
    }

    async fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id else {
            self.handle_notification(&request.method);
            return None;
        };

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tools_call(id, request.params),
            _ => JsonRpcResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            ),
        };
        Some(response)
    }

    fn handle_notification(&mut self, method: &str) {
        match method {
            "initialized" | "notifications/initialized" => {
                self.initialized = true;
                info!("MCP client initialized");
            }
            _ => debug!("Ignoring notification: {}", method),
        }
    }

    /// Handle MCP initialization request
    fn handle_initialize(&mut self, id: Value) -> JsonRpcResponse {
        info!("MCP client connected");

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: "Habit Streaks MCP".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        JsonRpcResponse::from_serializable(id, &result)
    }

    /// Handle tools/list request
    fn handle_tools_list(&self, id: Value) -> JsonRpcResponse {
        let tools = vec![
            ToolDefinition {
                name: "habit_create".to_string(),
                description: "Create a new daily habit to track".to_string(),
                input_schema: input_schema::<tools::CreateHabitParams>(),
            },
            ToolDefinition {
                name: "habit_done".to_string(),
                description: "Mark a habit done for today, with an optional 1-10 effort rating".to_string(),
                input_schema: input_schema::<tools::LogHabitParams>(),
            },
            ToolDefinition {
                name: "habit_delete".to_string(),
                description: "Permanently delete a habit and its history".to_string(),
                input_schema: input_schema::<tools::DeleteHabitParams>(),
            },
            ToolDefinition {
                name: "habit_home".to_string(),
                description: "Show all habits with their streaks, any new milestone message, and this week's summary".to_string(),
                input_schema: json!({"type": "object", "properties": {}}),
            },
            ToolDefinition {
                name: "habit_weekly_summary".to_string(),
                description: "Summarize check-ins and average effort over the last seven days".to_string(),
                input_schema: json!({"type": "object", "properties": {}}),
            },
        ];

        JsonRpcResponse::success(id, json!({ "tools": tools }))
    }

    /// Handle tools/call request
    fn handle_tools_call(&mut self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let tool_params: ToolCallParams = match params.map(serde_json::from_value::<ToolCallParams>) {
            Some(Ok(p)) => p,
            Some(Err(e)) => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    format!("Invalid parameters: {}", e),
                    None,
                );
            }
            None => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                    None,
                );
            }
        };

        if !self.initialized {
            debug!("Tool call {} before client initialization", tool_params.name);
        }

        let result = match tool_params.name.as_str() {
            "habit_create" => self.call_habit_create(tool_params.arguments),
            "habit_done" => self.call_habit_done(tool_params.arguments),
            "habit_delete" => self.call_habit_delete(tool_params.arguments),
            "habit_home" => self.call_habit_home(),
            "habit_weekly_summary" => self.call_habit_weekly_summary(),
            _ => ToolCallResult::error(format!("Unknown tool: {}", tool_params.name)),
        };

        if result.is_error {
            warn!("Tool {} failed: {}", tool_params.name, result.text());
        }

        JsonRpcResponse::from_serializable(id, &result)
    }

    /// Call the habit_create tool
    fn call_habit_create(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params = match parse_arguments::<tools::CreateHabitParams>(args) {
            Ok(params) => params,
            Err(result) => return result,
        };

        match tools::create_habit(self.habit_tracker.storage(), params) {
            Ok(response) => ToolCallResult::with_structured(response.message.clone(), &response),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Call the habit_done tool
    fn call_habit_done(&mut self, args: HashMap<String, Value>) -> ToolCallResult {
        let params = match parse_arguments::<tools::LogHabitParams>(args) {
            Ok(params) => params,
            Err(result) => return result,
        };

        match tools::log_habit(self.habit_tracker.storage(), params, (self.clock)()) {
            Ok(response) => {
                let text = match &response.notification {
                    Some(notification) => format!("{}\n🎉 {}", response.message, notification),
                    None => response.message.clone(),
                };
                if response.notification.is_some() {
                    self.pending_notification = response.notification.clone();
                }
                ToolCallResult::with_structured(text, &response)
            }
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Call the habit_delete tool
    fn call_habit_delete(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params = match parse_arguments::<tools::DeleteHabitParams>(args) {
            Ok(params) => params,
            Err(result) => return result,
        };

        match tools::delete_habit(self.habit_tracker.storage(), params) {
            Ok(response) => ToolCallResult::with_structured(response.message.clone(), &response),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Call the habit_home tool
    ///
    /// Hands over the pending notification, so it is shown at most once.
    fn call_habit_home(&mut self) -> ToolCallResult {
        let notification = self.pending_notification.take();

        match tools::home_view(self.habit_tracker.storage(), (self.clock)(), notification) {
            Ok(view) => ToolCallResult::with_structured(view.message.clone(), &view),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Call the habit_weekly_summary tool
    fn call_habit_weekly_summary(&self) -> ToolCallResult {
        match tools::weekly_summary(self.habit_tracker.storage(), (self.clock)()) {
            Ok(Some(summary)) => ToolCallResult::with_structured(summary.message.clone(), &summary),
            Ok(None) => ToolCallResult::success("No habit check-ins in the last seven days.".to_string()),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }
}

/// Deserialize tool arguments into a tool's parameter struct
fn parse_arguments<T: DeserializeOwned>(args: HashMap<String, Value>) -> Result<T, ToolCallResult> {
    serde_json::from_value(Value::Object(args.into_iter().collect()))
        .map_err(|e| ToolCallResult::error(format!("Invalid arguments: {}", e)))
}

/// JSON schema advertised for a tool's parameter struct
fn input_schema<T: JsonSchema>() -> Value {
    serde_json::to_value(schema_for!(T)).unwrap_or_else(|e| {
        warn!("Failed to build input schema: {}", e);
        json!({"type": "object"})
    })
}
