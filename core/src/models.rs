//! Domain models shared by every surface.
//!
//! # Types
//!
//! - [`PaymentMethod`] - The two supported payment channels
//! - [`WorkflowStep`] - Position in the four-step checkout
//! - [`TransactionSummary`] - What the completion screen shows

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Payment Method
// =============================================================================

/// Payment channel chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// DANA e-wallet transfer to a phone-number account.
    Dana,
    /// QRIS code scanned from any banking or wallet app.
    Qris,
}

impl PaymentMethod {
    /// Every selectable method, in display order.
    pub const ALL: [PaymentMethod; 2] = [PaymentMethod::Dana, PaymentMethod::Qris];

    /// Wire identifier (`dana`, `qris`).
    pub fn id(&self) -> &'static str {
        match self {
            PaymentMethod::Dana => "dana",
            PaymentMethod::Qris => "qris",
        }
    }

    /// Upper-case display label.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Dana => "DANA",
            PaymentMethod::Qris => "QRIS",
        }
    }

    /// Package-style handle shown on the selector.
    pub fn handle(&self) -> &'static str {
        match self {
            PaymentMethod::Dana => "@wallet/dana",
            PaymentMethod::Qris => "@scan/qris",
        }
    }

    /// One-line description shown on the selector.
    pub fn description(&self) -> &'static str {
        match self {
            PaymentMethod::Dana => "Seamless digital wallet integration for instant transfers.",
            PaymentMethod::Qris => "Universal QR code standard for standardized payments.",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dana" | "@wallet/dana" | "wallet" => Ok(PaymentMethod::Dana),
            "qris" | "@scan/qris" | "qr" => Ok(PaymentMethod::Qris),
            other => Err(format!("unknown payment method '{}' (expected dana or qris)", other)),
        }
    }
}

// =============================================================================
// Workflow Step
// =============================================================================

/// Ordered position in the checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WorkflowStep {
    Selection = 0,
    Detail = 1,
    Proof = 2,
    Complete = 3,
}

impl WorkflowStep {
    /// All steps in order.
    pub const ALL: [WorkflowStep; 4] = [
        WorkflowStep::Selection,
        WorkflowStep::Detail,
        WorkflowStep::Proof,
        WorkflowStep::Complete,
    ];

    /// Zero-based index of the step.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Step for a zero-based index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Short title for step indicators.
    pub fn title(&self) -> &'static str {
        match self {
            WorkflowStep::Selection => "Select method",
            WorkflowStep::Detail => "Pay",
            WorkflowStep::Proof => "Upload proof",
            WorkflowStep::Complete => "Done",
        }
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowStep::Selection => "Selection",
            WorkflowStep::Detail => "Detail",
            WorkflowStep::Proof => "Proof",
            WorkflowStep::Complete => "Complete",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Transaction Summary
// =============================================================================

/// Record of a successful submission, shown once on the completion step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    /// Product the user paid for
    pub product_name: String,
    /// When the notification endpoint accepted the proof
    pub completed_at: DateTime<Utc>,
}

impl TransactionSummary {
    /// Summary stamped with the current time.
    pub fn now(product_name: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            completed_at: Utc::now(),
        }
    }

    /// Completion time in the local timezone, long form.
    pub fn completed_at_display(&self) -> String {
        self.completed_at
            .with_timezone(&Local)
            .format("%A, %d %B %Y %H:%M")
            .to_string()
    }
}
