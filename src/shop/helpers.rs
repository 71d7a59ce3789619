//! Storefront Tool Helpers
//!
//! Unwrapping of the upstream tool payload and small argument checks.

use crate::error::ToolError;
use crate::upstream::UpstreamBody;
use serde_json::Value;

/// Decodes the domain payload carried as JSON text in
/// `result.content[0].text` of an upstream JSON-RPC answer.
pub fn decode_tool_payload(body: &UpstreamBody) -> Result<Value, ToolError> {
    let envelope = body.as_json().ok_or_else(|| {
        ToolError::MalformedUpstreamPayload("response body is not JSON".to_string())
    })?;

    let text = envelope
        .pointer("/result/content/0/text")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            ToolError::MalformedUpstreamPayload("missing result.content[0].text".to_string())
        })?;

    serde_json::from_str(text).map_err(|e| {
        ToolError::MalformedUpstreamPayload(format!("content text is not valid JSON: {e}"))
    })
}

/// Looks up `key` in the decoded payload, failing when it is missing.
pub fn require_key<'a>(payload: &'a Value, key: &str) -> Result<&'a Value, ToolError> {
    payload
        .get(key)
        .ok_or_else(|| ToolError::MalformedUpstreamPayload(format!("payload has no `{key}` key")))
}

/// The payload's cart when it is a non-empty object.
///
/// Any other value (`null`, `false`, `0`, `""`, `[]`, `{}`) means no cart.
pub fn present_cart(payload: &Value) -> Option<&Value> {
    payload
        .get("cart")
        .filter(|cart| cart.as_object().is_some_and(|map| !map.is_empty()))
}

/// Rejects blank identifiers.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), ToolError> {
    if value.trim().is_empty() {
        return Err(ToolError::InvalidArguments(format!("`{field}` must not be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_tool_payload() {
        let body = UpstreamBody::Json(json!({
            "result": { "content": [{ "type": "text", "text": "{\"products\": []}" }] }
        }));
        assert_eq!(decode_tool_payload(&body).unwrap(), json!({ "products": [] }));
    }

    #[test]
    fn test_decode_rejects_text_body() {
        let err = decode_tool_payload(&UpstreamBody::Text("oops".into())).unwrap_err();
        assert!(matches!(err, ToolError::MalformedUpstreamPayload(_)));
    }

    #[test]
    fn test_decode_rejects_missing_content() {
        let err = decode_tool_payload(&UpstreamBody::Json(json!({ "result": {} }))).unwrap_err();
        assert!(err.to_string().contains("result.content[0].text"));
    }

    #[test]
    fn test_decode_rejects_non_json_text() {
        let body = UpstreamBody::Json(json!({
            "result": { "content": [{ "text": "not json" }] }
        }));
        let err = decode_tool_payload(&body).unwrap_err();
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn test_present_cart() {
        assert!(present_cart(&json!({})).is_none());
        assert!(present_cart(&json!({ "cart": null })).is_none());
        assert!(present_cart(&json!({ "cart": {} })).is_none());
        for falsy in [json!([]), json!(""), json!(false), json!(0)] {
            assert!(present_cart(&json!({ "cart": falsy })).is_none());
        }
        assert!(present_cart(&json!({ "cart": "c1" })).is_none());
        assert!(present_cart(&json!({ "cart": { "id": "c1" } })).is_some());
    }

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("cart_id", "c1").is_ok());
        assert!(matches!(
            require_non_empty("cart_id", "  "),
            Err(ToolError::InvalidArguments(_))
        ));
    }
}
