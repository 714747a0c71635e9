//! Application configuration.
//!
//! Centralized configuration for the DevPay frontend.
//! In development, these are hardcoded. In production, they could be
//! injected at build time.

use devpay_core::{PaymentDirectory, QrisCode, WalletAccount};

/// Proof relay endpoint.
///
/// `devpay serve` on its default port. The relay holds the bot token.
pub const NOTIFY_ENDPOINT: &str = "http://localhost:8787/api/proof";

/// Maximum proof image size (in bytes).
///
/// 10 MB, same limit as the relay.
pub const MAX_PROOF_SIZE: u64 = 10 * 1024 * 1024;

/// How long the `COPIED` badge stays up (ms).
pub const COPY_FEEDBACK_MS: u32 = 2_000;

pub const DANA_NUMBER: &str = "088100000000";
pub const DANA_OWNER: &str = "MAUL STORE";
pub const QRIS_IMAGE_URL: &str = "https://files.devpay.dev/qris.jpg";
pub const QRIS_NMID: &str = "ID1024361924573 A01";
pub const QRIS_MERCHANT: &str = "MAUL STORE";

/// Receiving accounts shown on the detail screen.
pub fn payment_directory() -> PaymentDirectory {
    PaymentDirectory {
        wallet: WalletAccount {
            provider: "DANA_WALLET".to_string(),
            number: DANA_NUMBER.to_string(),
            owner: DANA_OWNER.to_string(),
        },
        qris: QrisCode {
            image_url: QRIS_IMAGE_URL.to_string(),
            nmid: QRIS_NMID.to_string(),
            merchant: QRIS_MERCHANT.to_string(),
        },
    }
}
