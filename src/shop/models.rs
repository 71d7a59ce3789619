//! Storefront Tool Models
//!
//! This module contains the tool inputs accepted from MCP callers and the
//! output shape every tool adapter produces.

use crate::render::UiResource;
use serde::Deserialize;
use serde_json::{json, Value};

// =============================================================================
// Tool Constants
// =============================================================================

/// Search the store catalog
pub const SEARCH_PRODUCTS_TOOL: &str = "search_products";
/// Fetch one product by id
pub const PRODUCT_DETAILS_TOOL: &str = "get_product_details_by_id";
/// Add a product variant to a (new or existing) cart
pub const ADD_TO_CART_TOOL: &str = "add_to_cart";
/// Fetch a cart by id
pub const GET_CART_TOOL: &str = "get_cart";

/// Upstream tool names, as exposed by the storefront MCP endpoint
pub mod upstream_tools {
    pub const SEARCH_CATALOG: &str = "search_shop_catalog";
    pub const PRODUCT_DETAILS: &str = "get_product_details";
    pub const UPDATE_CART: &str = "update_cart";
    pub const GET_CART: &str = "get_cart";
}

pub const CART_CREATION_FAILED: &str = "Cart creation failed";
pub const NO_ACTIVE_CART: &str = "No active cart found.";

// =============================================================================
// Tool Inputs
// =============================================================================

/// Returns the default quantity (1) for added items
fn default_quantity() -> u32 {
    1
}

/// Input for the search_products tool
#[derive(Debug, Deserialize)]
pub struct SearchProductsInput {
    /// Product name or category
    pub query: String,
}

/// Input for the get_product_details_by_id tool
#[derive(Debug, Deserialize)]
pub struct ProductDetailsInput {
    pub product_id: String,
}

/// Input for the add_to_cart tool
#[derive(Debug, Deserialize)]
pub struct AddToCartInput {
    /// Variant to add
    pub product_variant_id: String,

    /// Existing cart to extend; a new cart is created when absent
    #[serde(default)]
    pub cart_id: Option<String>,

    /// Quantity to add (defaults to 1)
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

/// Input for the get_cart tool
#[derive(Debug, Deserialize)]
pub struct GetCartInput {
    pub cart_id: String,
}

// =============================================================================
// Tool Output
// =============================================================================

/// What a tool adapter hands back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    /// A render payload alongside the domain data it was built from
    Rendered { resource: UiResource, data: Value },

    /// Plain domain data
    Data(Value),

    /// A failure reported as data (normalized upstream error, render failure)
    Error(Value),
}

impl ToolOutput {
    pub fn is_error(&self) -> bool {
        matches!(self, ToolOutput::Error(_))
    }

    /// `[render, data]` for rendered output, the mapping otherwise.
    pub fn into_value(self) -> Value {
        match self {
            ToolOutput::Rendered { resource, data } => json!([resource, data]),
            ToolOutput::Data(value) | ToolOutput::Error(value) => value,
        }
    }

    /// MCP `CallToolResult` for this output.
    ///
    /// The render payload becomes an embedded resource; domain data is sent
    /// as JSON text and, when it is an object, as `structuredContent`.
    pub fn into_call_result(self) -> Value {
        let (resource, data, is_error) = match self {
            ToolOutput::Rendered { resource, data } => (Some(resource), data, false),
            ToolOutput::Data(value) => (None, value, false),
            ToolOutput::Error(value) => (None, value, true),
        };

        let mut content = Vec::with_capacity(2);
        if let Some(resource) = resource {
            content.push(json!(resource));
        }
        content.push(json!({ "type": "text", "text": data.to_string() }));

        let mut result = json!({ "content": content, "isError": is_error });
        if data.is_object() {
            result["structuredContent"] = data;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_to_cart_input_defaults() {
        let input: AddToCartInput =
            serde_json::from_value(json!({ "product_variant_id": "V1" })).unwrap();
        assert_eq!(input.quantity, 1);
        assert!(input.cart_id.is_none());
    }

    #[test]
    fn test_negative_quantity_is_rejected() {
        let input = serde_json::from_value::<AddToCartInput>(
            json!({ "product_variant_id": "V1", "quantity": -2 }),
        );
        assert!(input.is_err());
    }

    #[test]
    fn test_rendered_output_shapes() {
        let resource = UiResource::raw_html("ui://Shopify/cart/", "<p/>".into()).unwrap();
        let output = ToolOutput::Rendered {
            resource: resource.clone(),
            data: json!({ "id": "c1" }),
        };

        let value = output.clone().into_value();
        assert_eq!(value[0], json!(resource));
        assert_eq!(value[1], json!({ "id": "c1" }));

        let result = output.into_call_result();
        assert_eq!(result["content"][0]["type"], "resource");
        assert_eq!(result["content"][1]["type"], "text");
        assert_eq!(result["structuredContent"]["id"], "c1");
        assert_eq!(result["isError"], false);
    }

    #[test]
    fn test_array_data_has_no_structured_content() {
        let result = ToolOutput::Data(json!([1, 2])).into_call_result();
        assert!(result.get("structuredContent").is_none());
        assert_eq!(result["content"][0]["text"], "[1,2]");
    }

    #[test]
    fn test_error_output_flags_is_error() {
        let result = ToolOutput::Error(json!({ "error": true })).into_call_result();
        assert_eq!(result["isError"], true);
        assert_eq!(result["structuredContent"]["error"], true);
    }
}
