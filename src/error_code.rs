//! Console error codes and their retry semantics.
//!
//! The console reports failures either as `{"error_code": .., "error_msg": ..}`
//! (legacy routes) or `{"code": .., "message": ..}` (V2 routes). Both carry the
//! same numeric code space, classified here.
//!
//! ## Example
//!
//! ```rust
//! use qianfan_finetune::error_code::ConsoleErrorCode;
//!
//! let code = ConsoleErrorCode::from_code(18);
//! assert_eq!(code, ConsoleErrorCode::QpsLimitReached);
//! assert!(code.retryable());
//! assert_eq!(code.category(), "rate");
//! ```

use std::fmt;

/// Classified console error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsoleErrorCode {
    /// 1: Unknown error
    UnknownError,
    /// 2: Service temporarily unavailable
    ServiceUnavailable,
    /// 3: Unsupported openapi method
    UnsupportedMethod,
    /// 4: Open api request limit reached
    RequestLimitReached,
    /// 6: No permission to access data
    NoPermission,
    /// 13: Get service token failed
    GetServiceTokenFailed,
    /// 15: App not exist or create failed
    AppNotExist,
    /// 17: Open api daily request limit reached
    DailyLimitReached,
    /// 18: Open api qps request limit reached
    QpsLimitReached,
    /// 19: Open api total request limit reached
    TotalRequestLimitReached,
    /// 100: Invalid parameter
    InvalidRequest,
    /// 110: Access token invalid or no longer valid
    AccessTokenInvalid,
    /// 111: Access token expired
    AccessTokenExpired,
    /// 336000: Internal error
    InternalError,
    /// 336001: Invalid argument
    InvalidArgument,
    /// 336100: Server high load
    ServerHighLoad,
    /// 336501: Rpm limit reached
    RpmLimitReached,
    /// 336502: Tpm limit reached
    TpmLimitReached,
    /// Any code without a dedicated variant
    Other(i64),
}

impl ConsoleErrorCode {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::UnknownError,
            2 => Self::ServiceUnavailable,
            3 => Self::UnsupportedMethod,
            4 => Self::RequestLimitReached,
            6 => Self::NoPermission,
            13 => Self::GetServiceTokenFailed,
            15 => Self::AppNotExist,
            17 => Self::DailyLimitReached,
            18 => Self::QpsLimitReached,
            19 => Self::TotalRequestLimitReached,
            100 => Self::InvalidRequest,
            110 => Self::AccessTokenInvalid,
            111 => Self::AccessTokenExpired,
            336000 => Self::InternalError,
            336001 => Self::InvalidArgument,
            336100 => Self::ServerHighLoad,
            336501 => Self::RpmLimitReached,
            336502 => Self::TpmLimitReached,
            other => Self::Other(other),
        }
    }

    /// Numeric code as sent on the wire.
    #[inline]
    pub fn code(&self) -> i64 {
        match self {
            Self::UnknownError => 1,
            Self::ServiceUnavailable => 2,
            Self::UnsupportedMethod => 3,
            Self::RequestLimitReached => 4,
            Self::NoPermission => 6,
            Self::GetServiceTokenFailed => 13,
            Self::AppNotExist => 15,
            Self::DailyLimitReached => 17,
            Self::QpsLimitReached => 18,
            Self::TotalRequestLimitReached => 19,
            Self::InvalidRequest => 100,
            Self::AccessTokenInvalid => 110,
            Self::AccessTokenExpired => 111,
            Self::InternalError => 336000,
            Self::InvalidArgument => 336001,
            Self::ServerHighLoad => 336100,
            Self::RpmLimitReached => 336501,
            Self::TpmLimitReached => 336502,
            Self::Other(code) => *code,
        }
    }

    /// Codes the console documents as transient.
    #[inline]
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            Self::ServiceUnavailable
                | Self::ServerHighLoad
                | Self::QpsLimitReached
                | Self::RpmLimitReached
                | Self::TpmLimitReached
                | Self::AppNotExist
        )
    }

    /// Returns the category: `"client"`, `"auth"`, `"rate"`, `"server"`, or `"unknown"`.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnsupportedMethod
            | Self::InvalidRequest
            | Self::InvalidArgument
            | Self::NoPermission => "client",
            Self::GetServiceTokenFailed
            | Self::AccessTokenInvalid
            | Self::AccessTokenExpired
            | Self::AppNotExist => "auth",
            Self::RequestLimitReached
            | Self::DailyLimitReached
            | Self::QpsLimitReached
            | Self::TotalRequestLimitReached
            | Self::RpmLimitReached
            | Self::TpmLimitReached => "rate",
            Self::ServiceUnavailable | Self::InternalError | Self::ServerHighLoad => "server",
            Self::UnknownError | Self::Other(_) => "unknown",
        }
    }

    /// Best-effort classification when the response carried no code.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 => Self::InvalidArgument,
            401 => Self::AccessTokenInvalid,
            403 => Self::NoPermission,
            429 => Self::QpsLimitReached,
            500 => Self::InternalError,
            502 | 503 | 504 => Self::ServiceUnavailable,
            _ => Self::UnknownError,
        }
    }
}

impl fmt::Display for ConsoleErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_round_trip() {
        for code in [
            1, 2, 3, 4, 6, 13, 15, 17, 18, 19, 100, 110, 111, 336000, 336001, 336100, 336501,
            336502,
        ] {
            let classified = ConsoleErrorCode::from_code(code);
            assert!(!matches!(classified, ConsoleErrorCode::Other(_)), "code {}", code);
            assert_eq!(classified.code(), code);
        }
    }

    #[test]
    fn unknown_code_is_preserved() {
        let code = ConsoleErrorCode::from_code(500123);
        assert_eq!(code, ConsoleErrorCode::Other(500123));
        assert_eq!(code.to_string(), "500123");
        assert!(!code.retryable());
        assert_eq!(code.category(), "unknown");
    }

    #[test]
    fn retryable_set() {
        let retryable: Vec<i64> = [2, 15, 18, 336100, 336501, 336502].to_vec();
        for code in retryable {
            assert!(ConsoleErrorCode::from_code(code).retryable(), "code {}", code);
        }
        for code in [1, 4, 17, 100, 110, 336000, 336001] {
            assert!(!ConsoleErrorCode::from_code(code).retryable(), "code {}", code);
        }
    }

    #[test]
    fn http_status_fallback() {
        assert_eq!(
            ConsoleErrorCode::from_http_status(429),
            ConsoleErrorCode::QpsLimitReached
        );
        assert_eq!(
            ConsoleErrorCode::from_http_status(418),
            ConsoleErrorCode::UnknownError
        );
    }
}
