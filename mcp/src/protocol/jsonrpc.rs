//! JSON-RPC 2.0 message types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request or response ID; JSON-RPC 2.0 allows either form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    String(String),
    Number(i64),
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestId::String(s) => write!(f, "{s}"),
            RequestId::Number(n) => write!(f, "{n}"),
        }
    }
}

/// An incoming JSON-RPC 2.0 request.
///
/// A request without an `id` is a notification and gets no response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RequestId>,

    pub method: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    pub fn new(id: RequestId, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: Some(id),
            method: method.into(),
            params,
        }
    }

    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// An outgoing JSON-RPC 2.0 response; exactly one of `result`/`error` is
/// set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,

    /// Echoes the request ID; None when the request was unreadable
    pub id: Option<RequestId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: Some(id),
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<RequestId>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// JSON-RPC 2.0 error object with the standard error codes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// -32700: the request was not valid JSON
    pub fn parse_error() -> Self {
        Self::new(-32700, "Parse error")
    }

    /// -32600: the request was not a valid request object
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::new(-32600, format!("Invalid request: {}", msg.into()))
    }

    /// -32601: the method does not exist
    pub fn method_not_found(method: impl Into<String>) -> Self {
        Self::new(-32601, format!("Method not found: {}", method.into()))
    }

    /// -32602: invalid method parameters
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self::new(-32602, format!("Invalid params: {}", msg.into()))
    }

    /// -32603: internal server error
    pub fn internal_error(msg: impl Into<String>) -> Self {
        Self::new(-32603, format!("Internal error: {}", msg.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_round_trips() {
        let req = JsonRpcRequest::new(
            RequestId::Number(7),
            "tools/call",
            Some(json!({"name": "i2cget"})),
        );
        let parsed: JsonRpcRequest =
            serde_json::from_str(&serde_json::to_string(&req).unwrap()).unwrap();
        assert_eq!(parsed.jsonrpc, "2.0");
        assert_eq!(parsed.method, "tools/call");
        assert_eq!(parsed.id, Some(RequestId::Number(7)));
        assert!(!parsed.is_notification());
    }

    #[test]
    fn string_ids_are_accepted() {
        let raw = r#"{"jsonrpc":"2.0","id":"req-1","method":"tools/list"}"#;
        let parsed: JsonRpcRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.id, Some(RequestId::String("req-1".to_string())));
    }

    #[test]
    fn missing_id_means_notification() {
        let raw = r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#;
        let parsed: JsonRpcRequest = serde_json::from_str(raw).unwrap();
        assert!(parsed.is_notification());
    }

    #[test]
    fn success_response_omits_error_field() {
        let resp = JsonRpcResponse::success(RequestId::Number(1), json!({"tools": []}));
        let raw = serde_json::to_string(&resp).unwrap();
        assert!(raw.contains("\"result\""));
        assert!(!raw.contains("\"error\""));
    }

    #[test]
    fn error_response_carries_the_code() {
        let resp = JsonRpcResponse::error(
            Some(RequestId::Number(1)),
            JsonRpcError::method_not_found("resources/list"),
        );
        let raw = serde_json::to_string(&resp).unwrap();
        assert!(raw.contains("-32601"));
        assert!(!raw.contains("\"result\""));
    }
}
