//! Unified error types for Opaque-Driver

use thiserror::Error;

/// Unified Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for Opaque-Driver
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CDP protocol errors
    #[error("CDP error: {0}")]
    Cdp(String),

    /// Script execution failed
    #[error("Script execution failed: {0}")]
    ScriptExecutionFailed(String),

    /// Element not found
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Explicit version does not match `<major>.<minor>.<build>.<patch>`
    #[error("Invalid version format: {0}")]
    InvalidVersionFormat(String),

    /// Pool constructed with an unusable size/platform combination
    #[error("Invalid pool config: {0}")]
    InvalidPoolConfig(String),

    /// Draw attempted from a zero-sized pool
    #[error("User agent pool is empty")]
    EmptyPool,

    /// Identity string lacks the minimum recognizable structure
    #[error("Unparsable user agent: {0}")]
    UnparsableIdentity(String),

    /// Click target is not visible or not enabled
    #[error("Target not interactable: {0}")]
    TargetNotInteractable(String),

    /// Directional scroll requested without a positive pixel amount
    #[error("Invalid scroll amount: {0}")]
    InvalidScrollAmount(String),

    /// Delay range is inverted or negative
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Create a new CDP error
    pub fn cdp<S: Into<String>>(msg: S) -> Self {
        Error::Cdp(msg.into())
    }

    /// Create a new script execution failed error
    pub fn script_execution_failed<S: Into<String>>(msg: S) -> Self {
        Error::ScriptExecutionFailed(msg.into())
    }

    /// Create a new element not found error
    pub fn element_not_found<S: Into<String>>(selector: S) -> Self {
        Error::ElementNotFound(selector.into())
    }

    /// Create a new invalid version format error
    pub fn invalid_version<S: Into<String>>(version: S) -> Self {
        Error::InvalidVersionFormat(version.into())
    }

    /// Create a new invalid pool config error
    pub fn invalid_pool_config<S: Into<String>>(msg: S) -> Self {
        Error::InvalidPoolConfig(msg.into())
    }

    /// Create a new unparsable identity error
    pub fn unparsable<S: Into<String>>(value: S) -> Self {
        Error::UnparsableIdentity(value.into())
    }

    /// Create a new target not interactable error
    pub fn not_interactable<S: Into<String>>(selector: S) -> Self {
        Error::TargetNotInteractable(selector.into())
    }

    /// Create a new invalid scroll amount error
    pub fn invalid_scroll_amount<S: Into<String>>(msg: S) -> Self {
        Error::InvalidScrollAmount(msg.into())
    }

    /// Create a new invalid range error
    pub fn invalid_range<S: Into<String>>(msg: S) -> Self {
        Error::InvalidRange(msg.into())
    }

    /// Create a new configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        Error::Configuration(msg.into())
    }
}
