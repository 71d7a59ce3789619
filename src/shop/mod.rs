//! Storefront Tool Module
//!
//! This module contains the tool adapters exposed over MCP, including:
//! - Tool inputs and the shared output shape
//! - Payload unwrapping helpers
//! - Application state (the upstream client)
//! - The four adapters and their dispatcher

pub mod handlers;
pub mod helpers;
pub mod models;
pub mod state;

// Re-export commonly used types for convenience
pub use handlers::handle_tool_call;
pub use models::ToolOutput;
pub use state::{AppState, SharedState};
