//! UI Components for the DevPay checkout.
//!
//! One component per workflow screen, plus the step indicator:
//!
//! - [`StepIndicator`] - Selection → Detail → Proof → Complete
//! - [`MethodSelector`] - Payment method cards
//! - [`PaymentDetails`] - Wallet account / QR code for the chosen method
//! - [`UploadSection`] - Proof form and submission
//! - [`CompletionCard`] - Success summary and `NEW_TRANSACTION()`

mod completion;
mod details;
mod selector;
mod steps;
mod upload;

pub use completion::*;
pub use details::*;
pub use selector::*;
pub use steps::*;
pub use upload::*;
