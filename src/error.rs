use crate::error_code::ConsoleErrorCode;
use crate::transport::TransportError;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Argument or configuration key that caused the error
    /// (e.g., "dataset_config", "QIANFAN_CONSOLE_BASE_URL")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected type, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "finetune.v2.create_task", "console_config")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the fine-tuning console client.
///
/// `InvalidType` and `Validation` are raised locally before any request is
/// dispatched. Everything else comes out of the transport unchanged.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid type: expected {expected}, but got {received}")]
    InvalidType {
        expected: &'static str,
        received: String,
    },

    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Console API error {code}: {message}{}", format_request_id(.request_id))]
    Api {
        code: String,
        message: String,
        request_id: Option<String>,
    },

    #[error("Remote error: HTTP {status}: {message}")]
    Remote {
        status: u16,
        code: Option<String>,
        message: String,
    },
}

// Lets infallible argument conversions share the `?` path with fallible ones.
impl From<std::convert::Infallible> for Error {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

fn format_request_id(request_id: &Option<String>) -> String {
    request_id
        .as_ref()
        .map(|id| format!(" (request id: {})", id))
        .unwrap_or_default()
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a new validation error with structured context
    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::configuration_with_context(msg, ErrorContext::new())
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Configuration { context, .. } | Error::Validation { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }

    /// Numeric console error code carried by the failure, if the remote side sent one.
    ///
    /// V2 routes may answer with symbolic codes (e.g. "InvalidParameter"), which
    /// have no numeric classification.
    pub fn console_code(&self) -> Option<ConsoleErrorCode> {
        match self {
            Error::Api { code, .. } => code.parse().ok().map(ConsoleErrorCode::from_code),
            Error::Remote { code, status, .. } => Some(
                code.as_deref()
                    .and_then(|c| c.parse().ok())
                    .map(ConsoleErrorCode::from_code)
                    .unwrap_or_else(|| ConsoleErrorCode::from_http_status(*status)),
            ),
            _ => None,
        }
    }

    /// Whether the same request may succeed if sent again later.
    ///
    /// Local validation failures are never retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport(TransportError::Http(e)) => e.is_timeout() || e.is_connect(),
            _ => self.console_code().map(|c| c.retryable()).unwrap_or(false),
        }
    }
}
