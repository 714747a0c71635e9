//! Submission payload and the client contract.
//!
//! A [`SubmissionPayload`] is built fresh for every attempt by the upload
//! form and handed to a [`ProofSubmitter`]. The payload only borrows the
//! attached file; the submitter reads it at send time, so a retry always
//! re-reads the file instead of reusing consumed content.

use crate::error::SubmissionResult;
use crate::models::PaymentMethod;

/// Everything the notification endpoint receives for one attempt.
#[derive(Debug)]
pub struct SubmissionPayload<'a, F> {
    /// Proof image, read by the submitter
    pub file: &'a F,
    /// Product the payment was for
    pub product_name: String,
    /// Amount as typed by the user
    pub amount: String,
    /// Optional free-text note
    pub note: Option<String>,
    /// Channel the user paid through
    pub method: PaymentMethod,
}

impl<F> SubmissionPayload<'_, F> {
    /// Note text, or `-` when none was given.
    pub fn note_or_dash(&self) -> &str {
        self.note.as_deref().unwrap_or("-")
    }

    /// Human-readable summary sent alongside the image.
    pub fn caption(&self) -> String {
        format!(
            "NEW PAYMENT PROOF\nProduct : {}\nAmount  : Rp {}\nMethod  : {}\nNote    : {}",
            self.product_name,
            self.amount,
            self.method.label(),
            self.note_or_dash(),
        )
    }

    /// Metadata fields in wire order, as `(name, value)` pairs.
    pub fn metadata_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("productName", self.product_name.clone()),
            ("amount", self.amount.clone()),
            ("note", self.note.clone().unwrap_or_default()),
            ("method", self.method.id().to_string()),
            ("caption", self.caption()),
        ]
    }
}

/// Delivers a payload to the notification endpoint.
///
/// Implementations perform exactly one network attempt per call and map
/// every failure (I/O, transport, status, rejection) to a
/// [`SubmissionError`](crate::SubmissionError).
#[allow(async_fn_in_trait)]
pub trait ProofSubmitter {
    /// Platform-specific handle to the proof image.
    type File;

    /// Send the payload once.
    async fn send(&self, payload: &SubmissionPayload<'_, Self::File>) -> SubmissionResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(note: Option<&str>) -> SubmissionPayload<'static, ()> {
        SubmissionPayload {
            file: &(),
            product_name: "SCRIPT BUG".into(),
            amount: "20000".into(),
            note: note.map(str::to_string),
            method: PaymentMethod::Dana,
        }
    }

    #[test]
    fn test_caption_contains_metadata() {
        let caption = payload(Some("MAUL GANTENG")).caption();
        assert!(caption.starts_with("NEW PAYMENT PROOF"));
        assert!(caption.contains("Product : SCRIPT BUG"));
        assert!(caption.contains("Amount  : Rp 20000"));
        assert!(caption.contains("Method  : DANA"));
        assert!(caption.contains("Note    : MAUL GANTENG"));
    }

    #[test]
    fn test_missing_note_renders_dash() {
        let p = payload(None);
        assert!(p.caption().ends_with("Note    : -"));

        let fields = p.metadata_fields();
        let note = fields.iter().find(|(k, _)| *k == "note").unwrap();
        assert_eq!(note.1, "");
        let method = fields.iter().find(|(k, _)| *k == "method").unwrap();
        assert_eq!(method.1, "dana");
    }
}
