//! REST API types for the proof relay.
//!
//! The frontend posts a multipart form to `/api/proof` and receives a
//! [`ProofReceipt`] or an [`error_response`] body.

use chrono::{DateTime, Utc};
use devpay_core::PaymentMethod;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

/// Response sent after a proof was forwarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofReceipt {
    /// Unique identifier of this relayed proof
    pub proof_id: String,

    /// Always "sent"
    pub status: String,

    /// Product the proof was for
    pub product_name: String,

    /// Channel the user paid through
    pub method: PaymentMethod,

    /// When the relay accepted the proof
    pub received_at: DateTime<Utc>,
}

impl ProofReceipt {
    pub fn sent(product_name: impl Into<String>, method: PaymentMethod) -> Self {
        Self {
            proof_id: Uuid::new_v4().to_string(),
            status: "sent".to_string(),
            product_name: product_name.into(),
            method,
            received_at: Utc::now(),
        }
    }
}

/// Create an error response body.
pub fn error_response(error: &str) -> Value {
    json!({
        "proofId": Uuid::new_v4().to_string(),
        "status": "error",
        "error": error,
    })
}
