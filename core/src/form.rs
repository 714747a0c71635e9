//! Upload form controller.
//!
//! Collects the proof-of-payment fields, validates them at submit time and
//! drives one [`ProofSubmitter`] call per attempt.
//!
//! # In-flight guard
//!
//! The submitting flag lives in an [`InFlight`] handle shared with the
//! [`Workflow`](crate::Workflow) that created the form. `submit` checks and
//! sets it synchronously, before its first `.await`, and an RAII guard
//! clears it on every exit path (success, failure, or a dropped future).
//! While it is set a second `submit` is a no-op ([`FormError::Busy`]) and the
//! workflow refuses to navigate away from the proof step.

use std::cell::Cell;
use std::rc::Rc;
use std::str::FromStr;

use crate::error::{FormError, FormResult, ValidationError};
use crate::models::{PaymentMethod, TransactionSummary};
use crate::payload::{ProofSubmitter, SubmissionPayload};

// =============================================================================
// In-flight flag
// =============================================================================

/// Shared submitting/idle flag.
#[derive(Debug, Clone, Default)]
pub struct InFlight(Rc<Cell<bool>>);

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a submission currently holds the flag.
    pub fn is_set(&self) -> bool {
        self.0.get()
    }

    /// Set the flag unless it is already set.
    fn try_acquire(&self) -> Option<InFlightGuard> {
        if self.0.replace(true) {
            None
        } else {
            Some(InFlightGuard(self.clone()))
        }
    }
}

/// Clears the in-flight flag when dropped.
#[derive(Debug)]
struct InFlightGuard(InFlight);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0 .0.set(false);
    }
}

// =============================================================================
// Fields
// =============================================================================

/// Text fields of the upload form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    ProductName,
    Amount,
    Note,
}

impl FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches("--") {
            "product" | "productName" | "product_name" => Ok(FormField::ProductName),
            "amount" | "nominal" => Ok(FormField::Amount),
            "note" | "name" => Ok(FormField::Note),
            other => Err(format!("unknown form field '{}'", other)),
        }
    }
}

/// Whether `amount` looks like a number in the user's locale
/// (digits, optionally grouped with `.` or `,`).
pub fn is_numeric_amount(amount: &str) -> bool {
    let amount = amount.trim();
    amount.chars().any(|c| c.is_ascii_digit())
        && amount.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
}

/// Reject an attachment over `max` bytes before anything is sent.
pub fn check_file_size(size: u64, max: u64) -> Result<(), ValidationError> {
    if size > max {
        return Err(ValidationError::FileTooLarge { size, max });
    }
    Ok(())
}

/// Submit-time preconditions, in the order the user sees them.
pub fn validate_fields(has_file: bool, product_name: &str, amount: &str) -> Result<(), ValidationError> {
    if !has_file {
        return Err(ValidationError::MissingFile);
    }
    if product_name.trim().is_empty() {
        return Err(ValidationError::EmptyProductName);
    }
    if amount.trim().is_empty() {
        return Err(ValidationError::EmptyAmount);
    }
    if !is_numeric_amount(amount) {
        return Err(ValidationError::InvalidAmount(amount.trim().to_string()));
    }
    Ok(())
}

// =============================================================================
// Upload Form
// =============================================================================

/// Proof-submission form bound to one payment method.
///
/// `F` is the platform's file handle: a path on the CLI, a browser `File`
/// in the web frontend. Clones share the in-flight flag.
#[derive(Debug, Clone)]
pub struct UploadForm<F> {
    method: PaymentMethod,
    product_name: String,
    amount: String,
    note: String,
    file: Option<F>,
    in_flight: InFlight,
}

impl<F> UploadForm<F> {
    /// Empty form for `method`, sharing `in_flight` with its workflow.
    pub fn new(method: PaymentMethod, in_flight: InFlight) -> Self {
        Self {
            method,
            product_name: String::new(),
            amount: String::new(),
            note: String::new(),
            file: None,
            in_flight,
        }
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    /// Update one text field. No validation happens here.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::ProductName => self.product_name = value,
            FormField::Amount => self.amount = value,
            FormField::Note => self.note = value,
        }
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::ProductName => &self.product_name,
            FormField::Amount => &self.amount,
            FormField::Note => &self.note,
        }
    }

    /// Attach (or replace) the proof image.
    pub fn attach(&mut self, file: F) {
        self.file = Some(file);
    }

    pub fn file(&self) -> Option<&F> {
        self.file.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_set()
    }

    /// Check preconditions and return the attached file.
    pub fn validate(&self) -> Result<&F, ValidationError> {
        validate_fields(self.file.is_some(), &self.product_name, &self.amount)?;
        self.file.as_ref().ok_or(ValidationError::MissingFile)
    }

    /// Validate and claim the in-flight flag without suspending.
    ///
    /// The returned [`PendingSubmission`] holds the flag until it is
    /// dispatched or dropped.
    pub fn prepare(&self) -> FormResult<PendingSubmission<'_, F>> {
        if self.in_flight.is_set() {
            log::debug!("Submit ignored: submission already in flight");
            return Err(FormError::Busy);
        }
        let file = self.validate()?;
        let guard = self.in_flight.try_acquire().ok_or(FormError::Busy)?;

        let note = self.note.trim();
        let payload = SubmissionPayload {
            file,
            product_name: self.product_name.trim().to_string(),
            amount: self.amount.trim().to_string(),
            note: (!note.is_empty()).then(|| note.to_string()),
            method: self.method,
        };
        Ok(PendingSubmission { payload, _guard: guard })
    }

    /// Validate, send once through `client`, and report the outcome.
    ///
    /// On success the caller forwards the summary to
    /// [`Workflow::submission_succeeded`](crate::Workflow::submission_succeeded).
    pub async fn submit<S>(&self, client: &S) -> FormResult<TransactionSummary>
    where
        S: ProofSubmitter<File = F>,
    {
        self.prepare()?.dispatch(client).await
    }
}

/// A validated payload holding the in-flight flag.
#[derive(Debug)]
pub struct PendingSubmission<'a, F> {
    payload: SubmissionPayload<'a, F>,
    _guard: InFlightGuard,
}

impl<'a, F> PendingSubmission<'a, F> {
    pub fn payload(&self) -> &SubmissionPayload<'a, F> {
        &self.payload
    }

    /// Perform the single network attempt. The flag is released on return.
    pub async fn dispatch<S>(self, client: &S) -> FormResult<TransactionSummary>
    where
        S: ProofSubmitter<File = F>,
    {
        log::info!(
            "📤 Sending proof for '{}' ({} via {})",
            self.payload.product_name,
            self.payload.amount,
            self.payload.method
        );

        match client.send(&self.payload).await {
            Ok(()) => {
                log::info!("✅ Proof accepted for '{}'", self.payload.product_name);
                Ok(TransactionSummary::now(self.payload.product_name))
            }
            Err(e) => {
                log::warn!("❌ Proof submission failed: {}", e);
                Err(FormError::Transport(e))
            }
        }
    }
}
