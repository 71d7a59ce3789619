//! Render Projection Module
//!
//! Pure projections from storefront data to embeddable UI resources:
//! - `UiResource`: the `resource` content item handed to MCP clients
//! - `products`: product card grid for search results
//! - `cart`: cart lines and totals
//!
//! Nothing here touches the network; missing fields fall back to defaults.

pub mod cart;
pub mod products;

use serde::Serialize;
use serde_json::Value;

pub use cart::project_cart;
pub use products::project_products;

/// URI scheme every UI resource must use
pub const UI_URI_SCHEME: &str = "ui://";
/// URI of the product grid resource
pub const PRODUCTS_RESOURCE_URI: &str = "ui://Shopify/products/";
/// URI of the cart resource
pub const CART_RESOURCE_URI: &str = "ui://Shopify/cart/";
/// MIME type of raw HTML resources
pub const HTML_MIME_TYPE: &str = "text/html";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RenderError {
    #[error("Invalid URI: {0} must start with 'ui://'")]
    InvalidUri(String),
}

/// Embedded resource content item.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UiResource {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub resource: ResourceContents,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContents {
    pub uri: String,
    pub mime_type: String,
    pub text: String,
}

impl UiResource {
    /// Wraps an HTML document as a text-encoded UI resource.
    pub fn raw_html(uri: impl Into<String>, html: String) -> Result<Self, RenderError> {
        let uri = uri.into();
        if !uri.starts_with(UI_URI_SCHEME) {
            return Err(RenderError::InvalidUri(uri));
        }
        Ok(Self {
            kind: "resource",
            resource: ResourceContents {
                uri,
                mime_type: HTML_MIME_TYPE.to_string(),
                text: html,
            },
        })
    }

    pub fn uri(&self) -> &str {
        &self.resource.uri
    }

    pub fn html(&self) -> &str {
        &self.resource.text
    }
}

/// Escapes text for element content and quoted attribute values.
pub(crate) fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Reads a scalar at `pointer` as display text, or `default`.
pub(crate) fn text_at(value: &Value, pointer: &str, default: &str) -> String {
    match value.pointer(pointer) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_html_rejects_foreign_scheme() {
        let err = UiResource::raw_html("https://example.com/", String::new()).unwrap_err();
        assert_eq!(err, RenderError::InvalidUri("https://example.com/".into()));
        assert!(err.to_string().contains("ui://"));
    }

    #[test]
    fn test_resource_serialization() {
        let resource = UiResource::raw_html(CART_RESOURCE_URI, "<p>hi</p>".into()).unwrap();
        assert_eq!(
            serde_json::to_value(&resource).unwrap(),
            json!({
                "type": "resource",
                "resource": {
                    "uri": "ui://Shopify/cart/",
                    "mimeType": "text/html",
                    "text": "<p>hi</p>"
                }
            })
        );
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_text_at_defaults() {
        let value = json!({"a": {"b": 12.5, "c": "x"}});
        assert_eq!(text_at(&value, "/a/b", "0.0"), "12.5");
        assert_eq!(text_at(&value, "/a/c", "0.0"), "x");
        assert_eq!(text_at(&value, "/a/missing", "0.0"), "0.0");
    }
}
