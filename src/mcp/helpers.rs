//! MCP Protocol Helpers
//!
//! This module contains helper functions for JSON-RPC communication
//! and the static tool catalog.

use crate::shop::models::{
    ADD_TO_CART_TOOL, GET_CART_TOOL, PRODUCT_DETAILS_TOOL, SEARCH_PRODUCTS_TOOL,
};
use serde_json::{json, Value};

/// Builds a JSON-RPC 2.0 success response.
///
/// # Arguments
///
/// * `id` – The request identifier that must be echoed back.
/// * `result` – The payload representing the successful outcome.
///
/// # Returns
///
/// A `serde_json::Value` shaped as a JSON-RPC success envelope.
pub fn rpc_success(id: Value, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result,
    })
}

/// Builds a JSON-RPC 2.0 error response.
///
/// # Arguments
///
/// * `id` – The request identifier (or `null` if unavailable).
/// * `code` – The JSON-RPC error code (e.g., -32601 for method not found).
/// * `message` – Human-readable description of the error.
///
/// # Returns
///
/// A `serde_json::Value` shaped as a JSON-RPC error envelope.
pub fn rpc_error(id: Value, code: i32, message: impl Into<String>) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {
            "code": code,
            "message": message.into(),
        }
    })
}

fn annotations(title: &str, read_only: bool) -> Value {
    json!({
        "title": title,
        "readOnlyHint": read_only,
        "openWorldHint": false,
    })
}

/// Descriptors returned by `tools/list`.
pub fn tool_descriptors() -> Vec<Value> {
    vec![
        json!({
            "name": SEARCH_PRODUCTS_TOOL,
            "title": "Search Products on Shopify Store.",
            "description": "Search for Shopify store products by product name or category.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "query": { "type": "string" }
                },
                "required": ["query"],
                "additionalProperties": false
            },
            "annotations": annotations("Search Products on Shopify Store.", true)
        }),
        json!({
            "name": PRODUCT_DETAILS_TOOL,
            "title": "Get Product Details",
            "description": "Get Shopify store product's details by product ID.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "product_id": { "type": "string" }
                },
                "required": ["product_id"],
                "additionalProperties": false
            },
            "annotations": annotations("Get Product Details", true)
        }),
        json!({
            "name": ADD_TO_CART_TOOL,
            "title": "Create Cart",
            "description": "Add the product variant to the cart, creating a new Shopify store cart when no cart_id is given.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "product_variant_id": { "type": "string" },
                    "cart_id": { "type": "string" },
                    "quantity": { "type": "integer", "minimum": 1, "default": 1 }
                },
                "required": ["product_variant_id"],
                "additionalProperties": false
            },
            "annotations": annotations("Create Cart", false)
        }),
        json!({
            "name": GET_CART_TOOL,
            "title": "Get Cart",
            "description": "Retrieve the Shopify store cart for the current session.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "cart_id": { "type": "string" }
                },
                "required": ["cart_id"],
                "additionalProperties": false
            },
            "annotations": annotations("Get Cart", true)
        }),
    ]
}
