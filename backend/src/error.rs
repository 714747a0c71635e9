//! Error types for the DevPay CLI and relay.
//!
//! - [`ConfigError`] - Environment configuration errors
//! - [`CheckoutError`] - CLI checkout orchestration errors
//! - [`ServerError`] - Relay request errors
//!
//! Core errors (`FormError`, `WorkflowError`, ...) convert into these via
//! `From`, so `?` works across the boundary.

use devpay_core::{FormError, SubmissionError, ValidationError, WorkflowError};
use thiserror::Error;

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither a relay URL nor a Telegram bot is configured.
    #[error("No notification endpoint configured: set DEVPAY_RELAY_URL or DEVPAY_TELEGRAM_BOT_TOKEN")]
    MissingEndpoint,

    /// One variable of a pair is set without the other.
    #[error("{var} is set but {requires} is missing")]
    Incomplete { var: &'static str, requires: &'static str },

    /// A variable holds an unusable value.
    #[error("Invalid value '{value}' for {var}: {message}")]
    InvalidValue {
        var: &'static str,
        value: String,
        message: String,
    },
}

// =============================================================================
// Checkout Errors
// =============================================================================

/// Errors from a CLI-driven checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Configuration error.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A workflow transition was refused.
    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    /// Validation or transport failure from the upload form.
    #[error("{0}")]
    Form(#[from] FormError),

    /// The HTTP client could not be created.
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Terminal or file IO failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Server Errors
// =============================================================================

/// Relay request errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Malformed multipart request.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Required field missing or invalid.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Forwarding to the notification endpoint failed.
    #[error("Forwarding failed: {0}")]
    Forward(#[from] SubmissionError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for CLI checkout.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

/// Result type for relay handlers.
pub type ServerResult<T> = Result<T, ServerError>;
