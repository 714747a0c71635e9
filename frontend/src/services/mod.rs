//! Backend services.
//!
//! # Services
//!
//! - [`submission`] - Proof upload to the DevPay relay (`devpay serve`)
//! - [`download`] - QRIS image download

pub mod download;
pub mod submission;

pub use download::*;
pub use submission::*;
