//! Dispatch seam between the request builders and the network.
//!
//! Builders produce a [`ConsoleRequest`]; something implementing
//! [`ConsoleTransport`] sends it and maps the reply. [`HttpTransport`] is the
//! `reqwest` implementation; tests substitute their own.

mod http;

pub use http::HttpTransport;

use crate::types::{ConsoleRequest, ConsoleResponse};
use crate::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait ConsoleTransport: Send + Sync {
    /// Send one request and return the parsed reply, or the transport/API failure.
    async fn send(&self, request: ConsoleRequest) -> Result<ConsoleResponse>;
}

#[async_trait]
impl<T: ConsoleTransport + ?Sized> ConsoleTransport for Arc<T> {
    async fn send(&self, request: ConsoleRequest) -> Result<ConsoleResponse> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<T: ConsoleTransport + ?Sized> ConsoleTransport for Box<T> {
    async fn send(&self, request: ConsoleRequest) -> Result<ConsoleResponse> {
        (**self).send(request).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Transport error: {0}")]
    Other(String),
}
