//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! - [`ProbeError`]: 1回のプローブの失敗。バッチを中断せず、失敗結果として記録される
//! - [`StatusError`]: バッチ全体の失敗。呼び出し元にエラーレスポンスとして返る

use thiserror::Error;

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Settings source could not be read or deserialized
    #[error("Configuration error: {0}")]
    Settings(#[from] config::ConfigError),
}

/// Failure of a single probe against the remote account-listing API.
///
/// The `Display` text is what ends up as the key of the error histogram,
/// so it carries only the message and never transport internals.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProbeError {
    /// The remote endpoint could not be reached
    #[error("Connectivity error: {0}")]
    Connectivity(String),

    /// Credentials are missing, expired or rejected
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The remote service answered with an error
    #[error("{0}")]
    Remote(String),

    /// The probe did not complete within the configured timeout (ms)
    #[error("Probe timed out after {0} ms")]
    Timeout(u64),
}

/// Batch-level error type
#[derive(Debug, Error)]
pub enum StatusError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// Bad caller input
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The runtime could not run the batch to completion
    #[error("Scheduling error: {0}")]
    Scheduling(String),

    /// Every probe in the batch failed
    #[error("No successful probe out of {attempts} attempts")]
    NoSuccessfulProbe {
        /// Number of probes issued
        attempts: usize,
    },
}

impl StatusError {
    /// Returns the error type string used in logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Common(_) => "configuration_error",
            Self::InvalidRequest(_) => "invalid_request_error",
            Self::Scheduling(_) => "server_error",
            Self::NoSuccessfulProbe { .. } => "server_error",
        }
    }

    /// Whether the caller is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }
}

/// Result alias for batch-level operations
pub type StatusResult<T> = Result<T, StatusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_error_display_is_message_only() {
        let err = ProbeError::Remote("StackSet demo not found".to_string());
        assert_eq!(err.to_string(), "StackSet demo not found");

        let err = ProbeError::Timeout(1500);
        assert_eq!(err.to_string(), "Probe timed out after 1500 ms");
    }

    #[test]
    fn test_connectivity_and_auth_are_prefixed() {
        let err = ProbeError::Connectivity("dns error".to_string());
        assert_eq!(err.to_string(), "Connectivity error: dns error");

        let err = ProbeError::Auth("no credentials".to_string());
        assert_eq!(err.to_string(), "Authentication error: no credentials");
    }

    #[test]
    fn test_no_successful_probe_message() {
        let err = StatusError::NoSuccessfulProbe { attempts: 3 };
        assert_eq!(err.to_string(), "No successful probe out of 3 attempts");
        assert_eq!(err.error_type(), "server_error");
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_invalid_request_is_client_error() {
        let err = StatusError::InvalidRequest("num_requests must be at least 1".to_string());
        assert!(err.is_client_error());
        assert_eq!(err.error_type(), "invalid_request_error");
    }

    #[test]
    fn test_common_error_is_transparent() {
        let err = StatusError::from(CommonError::Config("aws_region missing".to_string()));
        assert_eq!(err.to_string(), "Configuration error: aws_region missing");
    }
}
