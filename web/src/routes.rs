//! Route definitions and handlers

use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use rpi2c_i2c::I2cCommand;
use rpi2c_mcp::{all_tools, dispatch};
use serde::Deserialize;
use serde_json::Value;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Tool call request body: a tool name plus its argument object.
#[derive(Deserialize, Debug)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/i2c", post(execute_command))
        .route("/tools/list", get(list_tools))
        .route("/tools/call", post(call_tool))
        // Discovery mirrors for MCP server scanners
        .route("/api/scan/tools", get(list_tools).post(call_tool))
        .route("/api/scan/info", get(server_info))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Plain REST endpoint: validate and execute one I2C command.
///
/// Success maps to 200, every captured failure to 400; panics (which
/// would be 500) never originate from the executor.
async fn execute_command(
    State(state): State<AppState>,
    Json(command): Json<I2cCommand>,
) -> Response {
    info!(
        operation = %command.operation,
        bus = command.bus,
        "REST I2C command received"
    );

    let response = state.executor.execute(&command).await;
    let status = if response.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(response)).into_response()
}

/// List the MCP tool catalog.
async fn list_tools() -> Response {
    info!("Listing available MCP tools");
    Json(all_tools()).into_response()
}

/// Execute an MCP tool call. Always 200; failures ride in `isError`.
async fn call_tool(State(state): State<AppState>, Json(call): Json<ToolCall>) -> Response {
    info!(tool = %call.name, "HTTP MCP tool call received");

    let result = dispatch(&state.executor, &call.name, &call.arguments).await;
    Json(result).into_response()
}

/// Server identity for MCP discovery.
async fn server_info(State(state): State<AppState>) -> Response {
    Json(state.info.clone()).into_response()
}
