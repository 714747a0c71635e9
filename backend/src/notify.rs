//! HTTP submission client.
//!
//! Delivers a proof payload to the configured [`NotifyTarget`] as a single
//! multipart request. There is no retry loop: every failure is returned to
//! the caller, who decides whether to submit again.
//!
//! # Wire profiles
//!
//! | Target   | Request                                   | Success            |
//! |----------|-------------------------------------------|--------------------|
//! | Relay    | `POST <url>` with `file` + metadata fields | any 2xx            |
//! | Telegram | `POST <api>/bot<token>/sendPhoto`          | 2xx and `ok: true` |

use devpay_core::{ProofSubmitter, SubmissionError, SubmissionPayload, SubmissionResult};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::config::{BackendConfig, NotifyTarget};
use crate::error::{CheckoutError, CheckoutResult};
use crate::proof::ProofFile;

/// Telegram Bot API response envelope.
#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Relay error body (`{"error": "..."}`).
#[derive(Debug, Deserialize)]
struct RelayError {
    error: String,
}

/// reqwest-based [`ProofSubmitter`].
#[derive(Debug, Clone)]
pub struct HttpSubmissionClient {
    http: reqwest::Client,
    target: NotifyTarget,
}

impl HttpSubmissionClient {
    /// Create a client with an explicit target and reqwest client.
    pub fn new(http: reqwest::Client, target: NotifyTarget) -> Self {
        Self { http, target }
    }

    /// Create a client for the configured endpoint.
    pub fn from_config(config: &BackendConfig) -> CheckoutResult<Self> {
        let target = config.require_target()?.clone();
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CheckoutError::Client(e.to_string()))?;
        Ok(Self::new(http, target))
    }

    pub fn target(&self) -> &NotifyTarget {
        &self.target
    }

    /// Send `payload` once.
    pub async fn deliver(&self, payload: &SubmissionPayload<'_, ProofFile>) -> SubmissionResult<()> {
        let bytes = payload
            .file
            .read()
            .await
            .map_err(|e| SubmissionError::File(e.to_string()))?;

        let part = Part::bytes(bytes)
            .file_name(payload.file.file_name())
            .mime_str(payload.file.content_type().as_ref())
            .map_err(|e| SubmissionError::Network(format!("Failed to build multipart: {}", e)))?;

        let (url, form) = match &self.target {
            NotifyTarget::Relay { url } => {
                let form = payload
                    .metadata_fields()
                    .into_iter()
                    .fold(Form::new(), |form, (name, value)| form.text(name, value))
                    .part("file", part);
                (url.clone(), form)
            }
            NotifyTarget::Telegram { api_base, bot_token, chat_id } => {
                let form = Form::new()
                    .text("chat_id", chat_id.clone())
                    .text("caption", payload.caption())
                    .part("photo", part);
                (format!("{}/bot{}/sendPhoto", api_base, bot_token), form)
            }
        };

        log::debug!("Posting proof to {}", self.target.describe());
        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| SubmissionError::Network(e.without_url().to_string()))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        log::debug!("Notification endpoint answered {}", status);

        match &self.target {
            NotifyTarget::Relay { .. } => check_relay(status, &body),
            NotifyTarget::Telegram { .. } => check_telegram(status, &body),
        }
    }
}

impl ProofSubmitter for HttpSubmissionClient {
    type File = ProofFile;

    async fn send(&self, payload: &SubmissionPayload<'_, ProofFile>) -> SubmissionResult<()> {
        self.deliver(payload).await
    }
}

fn check_relay(status: reqwest::StatusCode, body: &str) -> SubmissionResult<()> {
    if status.is_success() {
        return Ok(());
    }
    let message = serde_json::from_str::<RelayError>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| body.to_string());
    Err(SubmissionError::Status {
        status: status.as_u16(),
        message,
    })
}

fn check_telegram(status: reqwest::StatusCode, body: &str) -> SubmissionResult<()> {
    let parsed = serde_json::from_str::<TelegramResponse>(body);
    match parsed {
        Ok(TelegramResponse { ok: true, .. }) if status.is_success() => Ok(()),
        Ok(TelegramResponse { description, .. }) if status.is_success() => Err(SubmissionError::Rejected(
            description.unwrap_or_else(|| "Telegram returned ok=false".to_string()),
        )),
        Ok(TelegramResponse { description, .. }) => Err(SubmissionError::Status {
            status: status.as_u16(),
            message: description.unwrap_or_else(|| body.to_string()),
        }),
        Err(_) if status.is_success() => Err(SubmissionError::Rejected(format!(
            "Unexpected response: {}",
            body.chars().take(200).collect::<String>()
        ))),
        Err(_) => Err(SubmissionError::Status {
            status: status.as_u16(),
            message: body.to_string(),
        }),
    }
}
