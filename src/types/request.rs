//! Request descriptor handed to a [`ConsoleTransport`](crate::transport::ConsoleTransport).

use crate::consts::CONSOLE_V2_ACTION_KEY;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

pub type JsonObject = Map<String, Value>;

/// Caller-supplied passthrough keys merged into a request body.
pub type Extra = JsonObject;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single console call, built fresh per operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleRequest {
    pub method: HttpMethod,
    /// Route relative to the console base URL (e.g. "/v2/finetuning").
    pub url: String,
    pub query: BTreeMap<String, String>,
    pub json_body: JsonObject,
}

impl ConsoleRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: BTreeMap::new(),
            json_body: Map::new(),
        }
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    /// POST to a V2 route with the `Action` query set.
    pub fn v2_action(url: impl Into<String>, action: &str) -> Self {
        Self::post(url).with_query(CONSOLE_V2_ACTION_KEY, action)
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: JsonObject) -> Self {
        self.json_body = body;
        self
    }

    /// The V2 action this request targets, if any.
    pub fn action(&self) -> Option<&str> {
        self.query.get(CONSOLE_V2_ACTION_KEY).map(String::as_str)
    }
}
