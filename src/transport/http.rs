use super::{ConsoleTransport, TransportError};
use crate::config::ConsoleConfig;
use crate::types::response::request_id_from_body;
use crate::types::{ConsoleRequest, ConsoleResponse, HttpMethod};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Proxy;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, trace, warn};
use url::Url;
use uuid::Uuid;

const CLIENT_REQUEST_ID_HEADER: &str = "x-client-request-id";
const BCE_REQUEST_ID_HEADER: &str = "x-bce-request-id";

/// Sends console requests over HTTPS with a pooled `reqwest` client.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    pub fn new(config: &ConsoleConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout())
            .pool_idle_timeout(Some(Duration::from_secs(90)));

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::configuration(format!("invalid proxy url '{}': {}", proxy_url, e))
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            bearer_token: config.bearer_token.clone(),
        })
    }

    /// Build from `QIANFAN_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(&ConsoleConfig::from_env()?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, route: &str) -> Result<Url> {
        let route = if route.starts_with('/') {
            route.to_string()
        } else {
            format!("/{}", route)
        };
        Url::parse(&format!("{}{}", self.base_url, route))
            .map_err(|e| Error::Transport(TransportError::Url(e)))
    }
}

#[async_trait]
impl ConsoleTransport for HttpTransport {
    async fn send(&self, request: ConsoleRequest) -> Result<ConsoleResponse> {
        let url = self.endpoint(&request.url)?;
        let client_request_id = Uuid::new_v4().to_string();
        debug!(
            method = %request.method,
            url = %url,
            action = request.action().unwrap_or("-"),
            client_request_id = %client_request_id,
            "dispatching console request"
        );
        let body = Value::Object(request.json_body.clone());
        trace!(body = %body, "console request body");

        let mut req = match request.method {
            HttpMethod::Post => self.client.post(url).json(&request.json_body),
            HttpMethod::Get => self.client.get(url),
        };
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        if let Some(token) = &self.bearer_token {
            req = req.bearer_auth(token);
        }
        req = req.header(CLIENT_REQUEST_ID_HEADER, &client_request_id);

        let response = req
            .send()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        let status = response.status();
        let header_request_id = response
            .headers()
            .get(BCE_REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let text = response
            .text()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        if !status.is_success() {
            let parsed: Option<Value> = serde_json::from_str(&text).ok();
            let (code, message) = parsed
                .as_ref()
                .and_then(console_error)
                .map(|(code, message)| (Some(code), message))
                .unwrap_or_else(|| (None, text.clone()));
            warn!(
                status = status.as_u16(),
                code = code.as_deref().unwrap_or("-"),
                client_request_id = %client_request_id,
                "console request failed"
            );
            return Err(Error::Remote {
                status: status.as_u16(),
                code,
                message,
            });
        }

        let body: Value = if text.trim().is_empty() {
            Value::Object(Default::default())
        } else {
            serde_json::from_str(&text)?
        };

        if let Some((code, message)) = console_error(&body) {
            let request_id = request_id_from_body(&body).or(header_request_id);
            warn!(
                code = %code,
                request_id = request_id.as_deref().unwrap_or("-"),
                "console returned an error payload"
            );
            return Err(Error::Api {
                code,
                message,
                request_id,
            });
        }

        let mut resp = ConsoleResponse::new(status.as_u16(), body);
        if resp.request_id.is_none() {
            resp.request_id = header_request_id;
        }
        Ok(resp)
    }
}

/// Extract `(code, message)` from a console error payload.
///
/// Legacy routes use `error_code`/`error_msg`; V2 routes use `code`/`message`
/// next to `requestId` and never alongside `result`.
fn console_error(body: &Value) -> Option<(String, String)> {
    let code_text = |v: &Value| match v {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    };
    let message_text = |key: &str| {
        body.get(key)
            .and_then(|m| m.as_str())
            .unwrap_or_default()
            .to_string()
    };

    if let Some(code) = body.get("error_code").and_then(code_text) {
        if code == "0" {
            return None;
        }
        return Some((code, message_text("error_msg")));
    }
    if body.get("result").is_none() {
        if let Some(code) = body.get("code").and_then(code_text) {
            return Some((code, message_text("message")));
        }
    }
    None
}
