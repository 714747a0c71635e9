//! Method-specific payment instructions.
//!
//! What the detail step shows for each [`PaymentMethod`]: the wallet
//! account to transfer to, or the QRIS code to scan.

use serde::{Deserialize, Serialize};

use crate::models::PaymentMethod;

/// Character used to hide account digits until revealed.
const MASK_CHAR: char = '•';

/// Number of leading characters left visible in a masked account.
const VISIBLE_PREFIX: usize = 4;

/// Default file name for a downloaded QR code.
pub const QR_DOWNLOAD_NAME: &str = "QRIS_PAYMENT.jpg";

/// Receiving wallet account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletAccount {
    /// Provider identifier, e.g. `DANA_WALLET`
    pub provider: String,
    /// Account (phone) number
    pub number: String,
    /// Registered owner name
    pub owner: String,
}

impl WalletAccount {
    /// Account number with everything after the first four characters hidden.
    pub fn masked_number(&self) -> String {
        self.number
            .chars()
            .enumerate()
            .map(|(i, c)| if i < VISIBLE_PREFIX { c } else { MASK_CHAR })
            .collect()
    }
}

/// QRIS merchant code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrisCode {
    /// Where the QR image can be fetched
    pub image_url: String,
    /// National Merchant ID
    pub nmid: String,
    /// Merchant display name
    pub merchant: String,
}

/// Receiving accounts for every method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDirectory {
    pub wallet: WalletAccount,
    pub qris: QrisCode,
}

/// Instructions for a single method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentInstructions<'a> {
    Wallet(&'a WalletAccount),
    Qris(&'a QrisCode),
}

impl PaymentDirectory {
    /// Instructions to show for `method`.
    pub fn instructions(&self, method: PaymentMethod) -> PaymentInstructions<'_> {
        match method {
            PaymentMethod::Dana => PaymentInstructions::Wallet(&self.wallet),
            PaymentMethod::Qris => PaymentInstructions::Qris(&self.qris),
        }
    }
}
