//! # DevPay - payment proof submission from the terminal and over HTTP
//!
//! Native side of DevPay. Drives the [`devpay_core`] checkout workflow from a
//! terminal, and relays proofs sent by the web frontend to the seller.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CLI / Web  │────▶│  Workflow   │────▶│ UploadForm  │────▶│   Notify    │
//! │  (wizard)   │     │ (4 steps)   │     │ (validate)  │     │ (relay/bot) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use devpay::{run_checkout, BackendConfig, CheckoutRequest, HttpSubmissionClient};
//! use devpay_core::PaymentMethod;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = BackendConfig::from_env().unwrap();
//!     let client = HttpSubmissionClient::from_config(&config).unwrap();
//!     let request = CheckoutRequest {
//!         method: PaymentMethod::Dana,
//!         product_name: "SCRIPT BUG".into(),
//!         amount: "20000".into(),
//!         note: None,
//!         attachment: "bukti.jpg".into(),
//!     };
//!     run_checkout(&mut std::io::stdout(), &config.directory, &client, request).await.unwrap();
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Backend error types
//! - [`config`] - Environment configuration
//! - [`proof`] - Proof image handles
//! - [`notify`] - HTTP submission client (relay / Telegram)
//! - [`checkout`] - Terminal checkout and wizard
//! - [`api`] - HTTP relay server

// Core modules
pub mod config;
pub mod error;

// Submission
pub mod notify;
pub mod proof;

// Terminal
pub mod checkout;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CheckoutError, CheckoutResult, ConfigError, ConfigResult, ServerError, ServerResult};

// =============================================================================
// Re-exports - Configuration
// =============================================================================

pub use config::{BackendConfig, NotifyTarget, DEFAULT_PORT, MAX_PROOF_SIZE};

// =============================================================================
// Re-exports - Submission
// =============================================================================

pub use notify::HttpSubmissionClient;
pub use proof::ProofFile;

// =============================================================================
// Re-exports - Checkout
// =============================================================================

pub use checkout::{
    render_instructions,
    render_methods,
    render_summary,
    run_checkout,
    run_wizard,
    CheckoutRequest,
};

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::types::{error_response, ProofReceipt};

// Server
pub mod server {
    pub use crate::api::server::{router, start_server};
}
