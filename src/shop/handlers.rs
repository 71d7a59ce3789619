//! Storefront tool adapters
//!
//! One adapter per tool. Each shapes its upstream arguments, performs a
//! single upstream call, unwraps the nested payload and projects it.
//! `handle_tool_call` is public so tests can drive adapters without HTTP.

use super::{helpers::*, models::*, state::AppState};
use crate::error::ToolError;
use crate::render::{project_cart, project_products, RenderError, UiResource};
use crate::upstream::{ShopifyClient, UpstreamResult};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{error, info, warn};

/// Dispatches a `tools/call` request to its adapter.
pub async fn handle_tool_call(
    state: &AppState,
    name: &str,
    args: Value,
) -> Result<ToolOutput, ToolError> {
    info!(tool = %name, "tool call");
    match name {
        SEARCH_PRODUCTS_TOOL => search_products(&state.client, parse_args(args)?).await,
        PRODUCT_DETAILS_TOOL => get_product_details_by_id(&state.client, parse_args(args)?).await,
        ADD_TO_CART_TOOL => add_to_cart(&state.client, parse_args(args)?).await,
        GET_CART_TOOL => get_cart(&state.client, parse_args(args)?).await,
        _ => Err(ToolError::UnknownTool(name.to_string())),
    }
}

fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ToolError> {
    // Tools without required fields may be called with no arguments at all.
    let args = if args.is_null() { json!({}) } else { args };
    serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments(e.to_string()))
}

/// Calls upstream and decodes the nested payload.
///
/// `Ok(Err(output))` carries an upstream failure to hand back unchanged.
async fn fetch_payload(
    client: &ShopifyClient,
    tool: &'static str,
    upstream_tool: &str,
    arguments: Value,
) -> Result<Result<Value, ToolOutput>, ToolError> {
    match client.call(upstream_tool, arguments).await {
        UpstreamResult::Failure(err) => {
            error!(tool, error_message = %err.error_message, "upstream call failed");
            Ok(Err(ToolOutput::Error(err.to_value())))
        }
        UpstreamResult::Success { body, .. } => decode_tool_payload(&body).map(Ok),
    }
}

/// Render failures are reported as data rather than raised.
fn rendered(projection: Result<UiResource, RenderError>, data: Value) -> ToolOutput {
    match projection {
        Ok(resource) => ToolOutput::Rendered { resource, data },
        Err(e) => {
            warn!(error = %e, "failed to create UI resource");
            ToolOutput::Error(json!({ "success": false, "error": e.to_string() }))
        }
    }
}

/// Searches the catalog by product name or category.
pub async fn search_products(
    client: &ShopifyClient,
    input: SearchProductsInput,
) -> Result<ToolOutput, ToolError> {
    let arguments = json!({ "query": input.query, "context": "" });
    let payload = match fetch_payload(
        client,
        SEARCH_PRODUCTS_TOOL,
        upstream_tools::SEARCH_CATALOG,
        arguments,
    )
    .await?
    {
        Ok(payload) => payload,
        Err(output) => return Ok(output),
    };

    let products = match require_key(&payload, "products")? {
        Value::Array(products) => products,
        Value::Null => return Ok(ToolOutput::Data(json!({ "search_result": [] }))),
        other => {
            return Err(ToolError::MalformedUpstreamPayload(format!(
                "`products` is not a list: {other}"
            )))
        }
    };

    if products.is_empty() {
        return Ok(ToolOutput::Data(json!({ "search_result": [] })));
    }

    Ok(rendered(
        project_products(products),
        Value::Array(products.clone()),
    ))
}

/// Fetches one product's details.
pub async fn get_product_details_by_id(
    client: &ShopifyClient,
    input: ProductDetailsInput,
) -> Result<ToolOutput, ToolError> {
    require_non_empty("product_id", &input.product_id)?;

    let arguments = json!({ "product_id": input.product_id, "context": "" });
    let payload = match fetch_payload(
        client,
        PRODUCT_DETAILS_TOOL,
        upstream_tools::PRODUCT_DETAILS,
        arguments,
    )
    .await?
    {
        Ok(payload) => payload,
        Err(output) => return Ok(output),
    };

    let product = require_key(&payload, "product")?;
    Ok(ToolOutput::Data(json!({ "search_results": product })))
}

/// Adds a variant to `cart_id`, or to a fresh cart when no id is given.
pub async fn add_to_cart(
    client: &ShopifyClient,
    input: AddToCartInput,
) -> Result<ToolOutput, ToolError> {
    require_non_empty("product_variant_id", &input.product_variant_id)?;
    if input.quantity == 0 {
        return Err(ToolError::InvalidArguments(
            "`quantity` must be at least 1".to_string(),
        ));
    }

    let mut arguments = json!({
        "add_items": [{
            "product_variant_id": input.product_variant_id,
            "quantity": input.quantity,
        }]
    });
    if let Some(cart_id) = input.cart_id.filter(|id| !id.trim().is_empty()) {
        arguments["cart_id"] = json!(cart_id);
    }

    let payload = match fetch_payload(
        client,
        ADD_TO_CART_TOOL,
        upstream_tools::UPDATE_CART,
        arguments,
    )
    .await?
    {
        Ok(payload) => payload,
        Err(output) => return Ok(output),
    };

    Ok(cart_output(&payload, CART_CREATION_FAILED))
}

/// Retrieves a cart by id.
pub async fn get_cart(client: &ShopifyClient, input: GetCartInput) -> Result<ToolOutput, ToolError> {
    require_non_empty("cart_id", &input.cart_id)?;

    let arguments = json!({ "cart_id": input.cart_id });
    let payload = match fetch_payload(client, GET_CART_TOOL, upstream_tools::GET_CART, arguments)
        .await?
    {
        Ok(payload) => payload,
        Err(output) => return Ok(output),
    };

    Ok(cart_output(&payload, NO_ACTIVE_CART))
}

fn cart_output(payload: &Value, absent_reason: &str) -> ToolOutput {
    match present_cart(payload) {
        Some(cart) => rendered(project_cart(cart), cart.clone()),
        None => ToolOutput::Data(json!({ "cart": null, "error": absent_reason })),
    }
}
