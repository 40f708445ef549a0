//! Parsed console reply.

use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleResponse {
    pub status: u16,
    /// Request id echoed by the console (`requestId` / `log_id` / header), when present.
    pub request_id: Option<String>,
    pub body: Value,
}

impl ConsoleResponse {
    pub fn new(status: u16, body: Value) -> Self {
        let request_id = request_id_from_body(&body);
        Self {
            status,
            request_id,
            body,
        }
    }

    /// The `result` member of the body, or the whole body when the route
    /// does not wrap its payload.
    pub fn result(&self) -> &Value {
        self.body.get("result").unwrap_or(&self.body)
    }

    /// Deserialize [`result`](Self::result) into a caller type.
    pub fn result_as<T: DeserializeOwned>(&self) -> crate::Result<T> {
        Ok(serde_json::from_value(self.result().clone())?)
    }

    pub fn into_body(self) -> Value {
        self.body
    }
}

pub(crate) fn request_id_from_body(body: &Value) -> Option<String> {
    ["requestId", "log_id"]
        .iter()
        .filter_map(|key| body.get(*key))
        .find_map(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}
