use anyhow::{Context, Result};
use shopify_storefront_mcp::config::Config;
use shopify_storefront_mcp::logging;
use shopify_storefront_mcp::router::create_app_router;
use shopify_storefront_mcp::shop::AppState;
use shopify_storefront_mcp::upstream::ShopifyClient;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration and logging are set up once, before anything else runs
    let dotenv = dotenvy::dotenv();
    let config = Config::from_env()?;
    logging::init(config.log_level()?, &config.logging.format)?;
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env file"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "failed to load .env file"),
    }

    // Compose the upstream client and application state
    let client = ShopifyClient::new(config.shopify.endpoint_url()?, config.shopify.timeout());
    tracing::info!(
        endpoint = %client.endpoint(),
        timeout_secs = client.timeout().as_secs(),
        "upstream storefront configured"
    );
    let state = Arc::new(AppState::new(client));

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    // Start the server
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, "MCP server listening");
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shopify_storefront_mcp::error::ToolError;
    use shopify_storefront_mcp::shop::{handle_tool_call, AppState};
    use shopify_storefront_mcp::upstream::ShopifyClient;
    use std::time::Duration;

    fn offline_state() -> AppState {
        AppState::new(ShopifyClient::new(
            "http://127.0.0.1:1/api/mcp",
            Duration::from_secs(1),
        ))
    }

    #[tokio::test]
    async fn test_argument_errors_never_reach_upstream() {
        let state = offline_state();

        let err = handle_tool_call(&state, "get_cart", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));

        let err = handle_tool_call(&state, "add_to_cart", json!({ "product_variant_id": "V1", "quantity": 0 }))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));

        let err = handle_tool_call(&state, "checkout", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool(_)));

        assert_eq!(state.client.session_stats().opened, 0);
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_returned_as_data() {
        let state = offline_state();

        let output = handle_tool_call(&state, "get_cart", json!({ "cart_id": "c1" }))
            .await
            .expect("transport failures are data, not errors");
        assert!(output.is_error());

        let value = output.into_value();
        assert_eq!(value["error"], true);
        assert!(value.get("status_code").is_none());
    }
}
