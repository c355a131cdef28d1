//! Error types for the ntfy publishing client
//!
//! Validation failures (arity, topic, message, action kind, option values) are
//! raised before any request leaves the process. The remaining variants wrap
//! whatever the transport, the filesystem or a decoder produced.

use std::path::PathBuf;
use thiserror::Error;

/// Main library error type
#[derive(Error, Debug)]
pub enum AppError {
    // Call-shape errors
    #[error("Unsupported number of arguments for {operation}: {count}")]
    ArgumentArity {
        operation: String,
        count: usize,
    },

    #[error("Invalid argument '{argument}': {reason}")]
    InvalidArgument {
        argument: String,
        reason: String,
    },

    #[error("Topic is not specified")]
    MissingTopic,

    #[error("Message is not specified")]
    MissingMessage,

    #[error("Action \"{kind}\" is not supported")]
    UnsupportedActionKind {
        kind: String,
    },

    // Configuration errors
    #[error("Invalid value for option '{key}': {reason}")]
    InvalidOption {
        key: String,
        reason: String,
    },

    #[error("Invalid ntfy server URL: {url}")]
    InvalidUrl {
        url: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Invalid header '{name}'")]
    InvalidHeader {
        name: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // I/O errors
    #[error("File I/O error for '{path}': {operation}")]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Network and decoding errors
    #[error("HTTP request failed: {method} {url}")]
    HttpRequest {
        method: String,
        url: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("JSON deserialization error: {context}")]
    JsonDeserialization {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("TOML parsing error: {context}")]
    TomlParsing {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create an arity error for the named entry point
    pub fn arity(operation: impl Into<String>, count: usize) -> Self {
        Self::ArgumentArity {
            operation: operation.into(),
            count,
        }
    }

    /// Create an error for an argument whose shape does not fit its slot
    pub fn invalid_argument(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_option(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create a new I/O error with source
    pub fn io_with_source(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Io {
            path: path.into(),
            operation: operation.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn invalid_header(
        name: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            source: Some(Box::new(source)),
        }
    }

    /// True for failures detected before any network or file I/O
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ArgumentArity { .. }
                | Self::InvalidArgument { .. }
                | Self::MissingTopic
                | Self::MissingMessage
                | Self::UnsupportedActionKind { .. }
                | Self::InvalidOption { .. }
        )
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::ArgumentArity { .. }
            | Self::InvalidArgument { .. }
            | Self::MissingTopic
            | Self::MissingMessage => "call",
            Self::UnsupportedActionKind { .. } => "action",
            Self::InvalidOption { .. } | Self::InvalidUrl { .. } | Self::TomlParsing { .. } => {
                "config"
            }
            Self::InvalidHeader { .. } | Self::HttpRequest { .. } => "network",
            Self::Io { .. } => "io",
            Self::JsonDeserialization { .. } => "serialization",
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        let operation = match err.kind() {
            std::io::ErrorKind::NotFound => "file not found",
            std::io::ErrorKind::PermissionDenied => "permission denied",
            _ => "I/O operation",
        }
        .to_string();

        Self::Io {
            path: PathBuf::from("unknown"),
            operation,
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        let context = if err.is_syntax() {
            format!(
                "JSON syntax error at line {} column {}",
                err.line(),
                err.column()
            )
        } else if err.is_eof() {
            "Unexpected end of JSON input".to_string()
        } else {
            "JSON data error".to_string()
        };

        Self::JsonDeserialization {
            context,
            source: Some(Box::new(err)),
        }
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::TomlParsing {
            context: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "unknown".to_string());

        if err.is_decode() {
            Self::JsonDeserialization {
                context: format!("response body from {url}"),
                source: Some(Box::new(err)),
            }
        } else {
            Self::HttpRequest {
                method: "PUT".to_string(),
                url,
                source: Some(Box::new(err)),
            }
        }
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl {
            url: "unknown".to_string(),
            source: Some(Box::new(err)),
        }
    }
}
