//! # DevPay core - guided payment-proof submission
//!
//! Platform-neutral heart of DevPay: the checkout state machine, the upload
//! form controller and the contract a submission client must fulfil. The
//! CLI/relay (`devpay-backend`) and the web frontend (`devpay-frontend`)
//! only supply a file type and a [`ProofSubmitter`].
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   select/back/confirm   ┌──────────────┐   submit()   ┌─────────────────┐
//! │    User     │────────────────────────▶│   Workflow   │─────────────▶│   UploadForm    │
//! │  (any UI)   │◀────── step/stage ──────│ (state mach.)│◀── summary ──│ (in-flight flag)│
//! └─────────────┘                         └──────────────┘              └────────┬────────┘
//!                                                                                │ send()
//!                                                                       ┌────────▼────────┐
//!                                                                       │ ProofSubmitter  │
//!                                                                       │ (HTTP, FormData)│
//!                                                                       └─────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use devpay_core::{FormField, PaymentMethod, Workflow};
//!
//! let mut workflow = Workflow::new();
//! workflow.select_method(PaymentMethod::Dana)?;
//! workflow.confirm_detail()?;
//!
//! let mut form = workflow.upload_form()?;
//! form.set_field(FormField::ProductName, "SCRIPT BUG");
//! form.set_field(FormField::Amount, "20000");
//! form.attach(proof_file);
//!
//! let summary = form.submit(&client).await?;
//! workflow.submission_succeeded(summary)?;
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Validation, transport, form and workflow errors
//! - [`models`] - PaymentMethod, WorkflowStep, TransactionSummary
//! - [`payload`] - SubmissionPayload and the ProofSubmitter trait
//! - [`form`] - Upload form controller and in-flight guard
//! - [`workflow`] - Checkout state machine
//! - [`instructions`] - Per-method payment instructions

pub mod error;
pub mod models;

pub mod payload;
pub mod form;
pub mod workflow;

pub mod instructions;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{
    FormError, FormResult,
    SubmissionError, SubmissionResult,
    ValidationError,
    WorkflowError, WorkflowResult,
};

pub use models::{PaymentMethod, TransactionSummary, WorkflowStep};

pub use payload::{ProofSubmitter, SubmissionPayload};

pub use form::{check_file_size, is_numeric_amount, validate_fields, FormField, InFlight, PendingSubmission, UploadForm};

pub use workflow::{Stage, Workflow};

pub use instructions::{
    PaymentDirectory, PaymentInstructions, QrisCode, WalletAccount, QR_DOWNLOAD_NAME,
};
