//! Storefront Application State
//!
//! The state is built once by the composition root and shared by every
//! request handler. Tool calls keep no state of their own.

use crate::upstream::ShopifyClient;
use std::sync::Arc;

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state
pub struct AppState {
    /// Client for the upstream storefront endpoint
    pub client: ShopifyClient,
}

impl AppState {
    pub fn new(client: ShopifyClient) -> Self {
        Self { client }
    }
}
