//! Shopify Storefront MCP Library
//!
//! This library exposes a small set of storefront tools (product search,
//! product details, add to cart, get cart) over the Model Context Protocol,
//! forwarding each call to a remote storefront MCP endpoint.

// Ambient
pub mod config;
pub mod error;
pub mod logging;

// Domain modules
pub mod render;
pub mod shop;
pub mod upstream;

// Protocol surface
pub mod mcp;

// Infrastructure
pub mod router;
