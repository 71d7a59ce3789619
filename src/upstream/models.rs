//! Upstream wire models and the normalized result shape.

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// JSON-RPC method used for every upstream tool invocation
pub const TOOLS_CALL_METHOD: &str = "tools/call";

/// Status reported for every HTTP-level or API-reported upstream failure.
pub const NORMALIZED_ERROR_STATUS: u16 = 500;

/// Maximum number of characters of a non-JSON error body kept for diagnostics.
pub const ERROR_TEXT_LIMIT: usize = 500;

/// JSON-RPC 2.0 request body sent to the storefront.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UpstreamEnvelope {
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub id: u64,
    pub params: ToolCallParams,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ToolCallParams {
    pub name: String,
    pub arguments: Value,
}

impl UpstreamEnvelope {
    pub fn tools_call(id: u64, tool_name: &str, arguments: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            method: TOOLS_CALL_METHOD,
            id,
            params: ToolCallParams {
                name: tool_name.to_string(),
                arguments,
            },
        }
    }
}

/// Response body of a successful exchange.
///
/// Bodies that are not valid JSON are kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamBody {
    Json(Value),
    Text(String),
}

impl UpstreamBody {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        match serde_json::from_slice(bytes) {
            Ok(value) => UpstreamBody::Json(value),
            Err(_) => UpstreamBody::Text(String::from_utf8_lossy(bytes).into_owned()),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            UpstreamBody::Json(value) => Some(value),
            UpstreamBody::Text(_) => None,
        }
    }

    /// Body as a JSON value; text bodies become JSON strings.
    pub fn into_value(self) -> Value {
        match self {
            UpstreamBody::Json(value) => value,
            UpstreamBody::Text(text) => Value::String(text),
        }
    }
}

/// The single error shape produced for transport, HTTP and API-reported failures.
///
/// Serializes to `{error: true, error_message, status_code?, error_data?}`.
/// A missing `status_code` means the request never produced an HTTP answer.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NormalizedError {
    pub error: bool,
    pub error_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_data: Option<Value>,
}

impl NormalizedError {
    /// Connection refused, timeout, DNS failure and the like.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            error: true,
            error_message: message.into(),
            status_code: None,
            error_data: None,
        }
    }

    /// Non-2xx answer. The real status survives in `error_data.upstream_status`.
    pub fn http_status(status: StatusCode, url: &str, body: UpstreamBody) -> Self {
        let mut message = format!("upstream returned HTTP {status} for url '{url}'");
        let response = match body {
            UpstreamBody::Json(value) => {
                let detail = api_message(&value).unwrap_or_else(|| value.to_string());
                message.push_str(&format!(" | API Error: {detail}"));
                value
            }
            UpstreamBody::Text(text) => {
                let truncated: String = text.chars().take(ERROR_TEXT_LIMIT).collect();
                message.push_str(&format!(" | Response: {truncated}"));
                Value::String(truncated)
            }
        };

        Self {
            error: true,
            error_message: message,
            status_code: Some(NORMALIZED_ERROR_STATUS),
            error_data: Some(json!({
                "upstream_status": status.as_u16(),
                "response": response,
            })),
        }
    }

    /// A 2xx answer whose JSON-RPC body reports a failure.
    pub fn api_reported(status: StatusCode, detail: String, response: Value) -> Self {
        Self {
            error: true,
            error_message: format!("upstream reported an error | API Error: {detail}"),
            status_code: Some(NORMALIZED_ERROR_STATUS),
            error_data: Some(json!({
                "upstream_status": status.as_u16(),
                "response": response,
            })),
        }
    }

    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("error".into(), Value::Bool(self.error));
        map.insert(
            "error_message".into(),
            Value::String(self.error_message.clone()),
        );
        if let Some(code) = self.status_code {
            map.insert("status_code".into(), json!(code));
        }
        if let Some(data) = &self.error_data {
            map.insert("error_data".into(), data.clone());
        }
        Value::Object(map)
    }
}

/// Outcome of one upstream call. Exactly one of the two shapes, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamResult {
    Success { body: UpstreamBody, status: u16 },
    Failure(NormalizedError),
}

impl UpstreamResult {
    pub fn is_failure(&self) -> bool {
        matches!(self, UpstreamResult::Failure(_))
    }

    /// The `(body, status)` pair; failures report their normalized mapping
    /// and `status_code`, which is `None` for transport failures.
    pub fn into_parts(self) -> (Value, Option<u16>) {
        match self {
            UpstreamResult::Success { body, status } => (body.into_value(), Some(status)),
            UpstreamResult::Failure(err) => {
                let status = err.status_code;
                (err.to_value(), status)
            }
        }
    }
}

/// Human readable message carried by an upstream error body.
pub(crate) fn api_message(value: &Value) -> Option<String> {
    ["message", "error", "detail"].iter().find_map(|key| {
        value.get(*key).map(|v| match v {
            Value::String(s) => s.clone(),
            Value::Object(obj) => obj
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| v.to_string()),
            other => other.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let envelope = UpstreamEnvelope::tools_call(7, "get_cart", json!({"cart_id": "c1"}));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({
                "jsonrpc": "2.0",
                "method": "tools/call",
                "id": 7,
                "params": { "name": "get_cart", "arguments": { "cart_id": "c1" } }
            })
        );
    }

    #[test]
    fn test_transport_error_omits_status_code() {
        let value = NormalizedError::transport("connection refused").to_value();
        assert_eq!(value["error"], true);
        assert_eq!(value["error_message"], "connection refused");
        assert!(value.get("status_code").is_none());
        assert!(value.get("error_data").is_none());
        assert_eq!(
            value,
            serde_json::to_value(NormalizedError::transport("connection refused")).unwrap()
        );
    }

    #[test]
    fn test_http_error_keeps_real_status_in_error_data() {
        let err = NormalizedError::http_status(
            StatusCode::NOT_FOUND,
            "http://shop/api/mcp",
            UpstreamBody::Json(json!({"detail": "no such shop"})),
        );
        assert_eq!(err.status_code, Some(500));
        assert!(err.error_message.contains("no such shop"));
        let data = err.error_data.unwrap();
        assert_eq!(data["upstream_status"], 404);
        assert_eq!(data["response"]["detail"], "no such shop");
    }

    #[test]
    fn test_http_error_truncates_text_body() {
        let body = "x".repeat(ERROR_TEXT_LIMIT * 2);
        let err = NormalizedError::http_status(
            StatusCode::BAD_GATEWAY,
            "http://shop/api/mcp",
            UpstreamBody::Text(body),
        );
        let data = err.error_data.unwrap();
        assert_eq!(data["response"].as_str().unwrap().len(), ERROR_TEXT_LIMIT);
    }

    #[test]
    fn test_api_message_prefers_message_key() {
        assert_eq!(
            api_message(&json!({"message": "m", "error": "e"})).as_deref(),
            Some("m")
        );
        assert_eq!(
            api_message(&json!({"error": {"code": -32000, "message": "boom"}})).as_deref(),
            Some("boom")
        );
        assert_eq!(api_message(&json!({"other": 1})), None);
    }
}
