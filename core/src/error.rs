//! Error types for the payment-proof workflow.
//!
//! - [`ValidationError`] - Local form validation failures
//! - [`SubmissionError`] - Transport failures reported by a submission client
//! - [`FormError`] - Everything `UploadForm::submit` can return
//! - [`WorkflowError`] - Rejected step transitions
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

use crate::models::WorkflowStep;

// =============================================================================
// Validation Errors
// =============================================================================

/// Form preconditions checked at submission time.
///
/// Recovered locally: the network is never contacted and the
/// workflow step does not change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No proof image attached.
    #[error("Missing required argument: --attachment")]
    MissingFile,

    /// Product name is empty or blank.
    #[error("Missing required argument: --product")]
    EmptyProductName,

    /// Amount is empty or blank.
    #[error("Missing required argument: --amount")]
    EmptyAmount,

    /// Amount contains something other than digits and separators.
    #[error("Invalid amount '{0}': expected digits with optional '.' or ',' separators")]
    InvalidAmount(String),

    /// Attached proof exceeds the upload limit. Retrying cannot help.
    #[error("Attachment too large: {size} bytes (max {max} bytes)")]
    FileTooLarge { size: u64, max: u64 },
}

// =============================================================================
// Transport Errors
// =============================================================================

/// Failure of a single submission attempt.
///
/// Always retryable from the user's point of view; never carries
/// partial-success state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The proof file could not be read.
    #[error("Failed to read proof file: {0}")]
    File(String),

    /// The request could not be built or sent.
    #[error("Network request failed: {0}")]
    Network(String),

    /// The endpoint answered with a non-success status.
    #[error("Server error ({status}): {message}")]
    Status { status: u16, message: String },

    /// The endpoint answered 2xx but refused the payload.
    #[error("Notification rejected: {0}")]
    Rejected(String),
}

// =============================================================================
// Form Errors
// =============================================================================

/// Outcome of a failed `UploadForm::submit`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// Local precondition failed; nothing was sent.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The submission client reported a failure.
    #[error("Transport error: {0}")]
    Transport(#[from] SubmissionError),

    /// Another submission is already in flight; this call did nothing.
    #[error("A submission is already in progress")]
    Busy,
}

impl FormError {
    /// Whether the user can simply press submit again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FormError::Transport(_))
    }

    /// The one-line status shown to the user, `None` for `Busy`.
    ///
    /// Tags the inner error rather than this wrapper so the transport
    /// message is not repeated.
    pub fn notice(&self) -> Option<String> {
        match self {
            FormError::Validation(e) => Some(format!("[ERROR] {}", e)),
            FormError::Transport(e) => Some(format!("[FATAL] {}", e)),
            FormError::Busy => None,
        }
    }
}

// =============================================================================
// Workflow Errors
// =============================================================================

/// A transition that is not allowed from the current step.
///
/// The workflow state is left untouched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// The action is not defined for the current step.
    #[error("Cannot {action} from step {step}")]
    InvalidTransition {
        action: &'static str,
        step: WorkflowStep,
    },

    /// A submission is pending; navigation must wait for it to resolve.
    #[error("Cannot {action} while a submission is in flight")]
    SubmissionPending { action: &'static str },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for submission clients.
pub type SubmissionResult<T> = Result<T, SubmissionError>;

/// Result type for form operations.
pub type FormResult<T> = Result<T, FormError>;

/// Result type for workflow transitions.
pub type WorkflowResult<T> = Result<T, WorkflowError>;
