//! Upstream Storefront Module
//!
//! This module talks to the remote storefront MCP endpoint:
//! - Wire models (JSON-RPC envelope, response body, normalized error)
//! - Per-call session management
//! - The client that performs one POST per tool invocation

pub mod client;
pub mod models;
pub mod session;

pub use client::ShopifyClient;
pub use models::{NormalizedError, UpstreamBody, UpstreamEnvelope, UpstreamResult};
pub use session::SessionSnapshot;
