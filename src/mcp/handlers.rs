//! MCP (Model Context Protocol) route handlers
//!
//! This module implements the Model Context Protocol surface of the storefront
//! server. Tool execution is delegated to [`crate::shop::handle_tool_call`].

use super::{helpers::*, models::*};
use crate::shop::{handle_tool_call, SharedState};
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde_json::{json, Value};
use tracing::{debug, warn};

/// Creates routes for MCP-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/", post(handle_mcp))
        .route("/mcp", post(handle_mcp)) // Standard endpoint
        .route("/mcp/", post(handle_mcp)) // Trailing slash safety
}

/// Endpoint: POST /mcp
/// Handles the Model Context Protocol communication for POST requests.
async fn handle_mcp(
    State(state): State<SharedState>,
    body: Result<Json<JsonRpcRequest>, axum::extract::rejection::JsonRejection>,
) -> impl IntoResponse {
    // Parse JSON-RPC Request (POST)
    let req = match body {
        Ok(Json(r)) => r,
        Err(e) => {
            warn!(error = %e.body_text(), "JSON parse error");
            return (
                StatusCode::BAD_REQUEST,
                Json(rpc_error(Value::Null, PARSE_ERROR, "Parse error")),
            )
                .into_response();
        }
    };

    // Notifications get no JSON-RPC response.
    if req.is_notification() {
        debug!(method = %req.method, "MCP notification");
        return StatusCode::ACCEPTED.into_response();
    }

    let id = req.id.unwrap_or(Value::Null);
    let method_name = req.method.as_str();
    let params = req.params.unwrap_or(Value::Null);

    debug!(method = %method_name, id = %id, "MCP call");

    // Dispatch Method
    let response_body = match method_name {
        "initialize" => rpc_success(id, handle_initialize()),
        "notifications/initialized" => rpc_success(id, json!({})),
        "tools/list" => rpc_success(id, handle_tools_list()),
        "tools/call" => handle_tools_call(&state, id, params).await,
        "ping" => rpc_success(id, json!({})),
        _ => {
            warn!(method = %method_name, "Unknown method");
            rpc_error(id, METHOD_NOT_FOUND, "Method not found")
        }
    };

    Json(response_body).into_response()
}

// =============================================================================
// MCP Method Handlers
// =============================================================================

/// Handles `initialize` request (Handshake).
fn handle_initialize() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": { "listChanged": false }
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        },
        "instructions": SERVER_INSTRUCTIONS
    })
}

/// Handles `tools/list` request.
fn handle_tools_list() -> Value {
    json!({ "tools": tool_descriptors() })
}

/// Handles `tools/call` request.
async fn handle_tools_call(state: &SharedState, id: Value, params: Value) -> Value {
    let call: ToolCallParams = match serde_json::from_value(params) {
        Ok(call) => call,
        Err(e) => return rpc_error(id, INVALID_PARAMS, format!("Invalid params: {e}")),
    };

    match handle_tool_call(state, &call.name, call.arguments).await {
        Ok(output) => rpc_success(id, output.into_call_result()),
        Err(e) => {
            warn!(tool = %call.name, error = %e, "tool call rejected");
            rpc_error(id, e.rpc_code(), e.to_string())
        }
    }
}
