use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// Request is malformed JSON.
pub const PARSE_ERROR: i32 = -32700;
/// Method is not one the server exposes.
pub const METHOD_NOT_FOUND: i32 = -32601;
/// A page handler returned an error.
pub const PAGE_ERROR: i32 = -32000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: u64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

impl JsonRpcRequest {
    pub fn new(method: &str, params: Option<serde_json::Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: REQUEST_ID.fetch_add(1, Ordering::SeqCst),
            method: method.to_string(),
            params,
        }
    }

    pub fn from_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line.trim())
    }

    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        let mut s = serde_json::to_string(self)?;
        s.push('\n');
        Ok(s)
    }
}

impl JsonRpcResponse {
    pub fn success(id: u64, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: u64, code: i32, message: &str) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.to_string(),
                data: None,
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn from_line(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line.trim())
    }

    pub fn to_line(&self) -> Result<String, serde_json::Error> {
        let mut s = serde_json::to_string(self)?;
        s.push('\n');
        Ok(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_to_valid_json() {
        let req = JsonRpcRequest::new("pages:list", None);
        let line = req.to_line().unwrap();
        assert!(line.ends_with('\n'));
        let parsed: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(parsed["jsonrpc"], "2.0");
        assert_eq!(parsed["method"], "pages:list");
    }

    #[test]
    fn request_with_params() {
        let params = serde_json::json!({"title": "Homepage"});
        let req = JsonRpcRequest::new("pages:run", Some(params));
        let line = req.to_line().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(parsed["params"]["title"], "Homepage");
    }

    #[test]
    fn request_ids_auto_increment() {
        let r1 = JsonRpcRequest::new("a", None);
        let r2 = JsonRpcRequest::new("b", None);
        assert!(r2.id > r1.id);
    }

    #[test]
    fn request_roundtrips_through_line() {
        let req = JsonRpcRequest::new("pages:list", Some(serde_json::json!({})));
        let line = req.to_line().unwrap();
        let parsed = JsonRpcRequest::from_line(&line).unwrap();
        assert_eq!(parsed.id, req.id);
        assert_eq!(parsed.method, "pages:list");
    }

    #[test]
    fn success_response_roundtrips() {
        let resp = JsonRpcResponse::success(7, serde_json::json!({"status": "ok"}));
        assert!(resp.is_success());
        let line = resp.to_line().unwrap();
        let parsed = JsonRpcResponse::from_line(&line).unwrap();
        assert!(parsed.is_success());
        assert_eq!(parsed.id, 7);
        assert_eq!(parsed.result.unwrap()["status"], "ok");
    }

    #[test]
    fn failure_response_carries_code_and_message() {
        let resp = JsonRpcResponse::failure(3, METHOD_NOT_FOUND, "Method not found");
        assert!(!resp.is_success());
        let line = resp.to_line().unwrap();
        let parsed = JsonRpcResponse::from_line(&line).unwrap();
        let error = parsed.error.unwrap();
        assert_eq!(error.code, METHOD_NOT_FOUND);
        assert_eq!(error.message, "Method not found");
    }

    #[test]
    fn malformed_line_fails_to_parse() {
        assert!(JsonRpcRequest::from_line("not json at all").is_err());
    }
}
