//! Backend configuration.
//!
//! Loaded from the environment (and a `.env` file if present). Everything
//! has a default except the notification endpoint, which is only required
//! by commands that actually submit.

use std::time::Duration;

use devpay_core::{PaymentDirectory, QrisCode, WalletAccount};

use crate::error::{ConfigError, ConfigResult};

/// Telegram Bot API base URL.
pub const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";

/// HTTP timeout for a single submission attempt.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Port the relay listens on.
pub const DEFAULT_PORT: u16 = 8787;

/// Maximum accepted proof image size (in bytes).
///
/// 10 MB, the Telegram photo upload limit.
pub const MAX_PROOF_SIZE: usize = 10 * 1024 * 1024;

const DEFAULT_DANA_NUMBER: &str = "088100000000";
const DEFAULT_DANA_OWNER: &str = "MAUL STORE";
const DEFAULT_QRIS_IMAGE_URL: &str = "https://files.devpay.dev/qris.jpg";
const DEFAULT_QRIS_NMID: &str = "ID1024361924573 A01";
const DEFAULT_QRIS_MERCHANT: &str = "MAUL STORE";

/// Where submitted proofs are delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyTarget {
    /// Generic multipart relay (e.g. `devpay serve`).
    Relay { url: String },
    /// Telegram `sendPhoto` to a chat.
    Telegram {
        api_base: String,
        bot_token: String,
        chat_id: String,
    },
}

impl NotifyTarget {
    /// Description safe to print (no bot token).
    pub fn describe(&self) -> String {
        match self {
            NotifyTarget::Relay { url } => format!("relay {}", url),
            NotifyTarget::Telegram { chat_id, .. } => format!("telegram chat {}", chat_id),
        }
    }
}

/// Backend settings.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Notification endpoint, if configured
    pub target: Option<NotifyTarget>,
    /// Receiving accounts shown on the detail step
    pub directory: PaymentDirectory,
    /// Timeout for one HTTP attempt
    pub timeout: Duration,
}

impl BackendConfig {
    /// Load from the process environment, reading `.env` first.
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variables. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let telegram = match (get("DEVPAY_TELEGRAM_BOT_TOKEN"), get("DEVPAY_TELEGRAM_CHAT_ID")) {
            (Some(bot_token), Some(chat_id)) => Some(NotifyTarget::Telegram {
                api_base: or("DEVPAY_TELEGRAM_API", DEFAULT_TELEGRAM_API)
                    .trim_end_matches('/')
                    .to_string(),
                bot_token,
                chat_id,
            }),
            (Some(_), None) => {
                return Err(ConfigError::Incomplete {
                    var: "DEVPAY_TELEGRAM_BOT_TOKEN",
                    requires: "DEVPAY_TELEGRAM_CHAT_ID",
                })
            }
            (None, Some(_)) => {
                return Err(ConfigError::Incomplete {
                    var: "DEVPAY_TELEGRAM_CHAT_ID",
                    requires: "DEVPAY_TELEGRAM_BOT_TOKEN",
                })
            }
            (None, None) => None,
        };
        let target = telegram.or_else(|| get("DEVPAY_RELAY_URL").map(|url| NotifyTarget::Relay { url }));

        let timeout_secs = match get("DEVPAY_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| ConfigError::InvalidValue {
                var: "DEVPAY_TIMEOUT_SECS",
                value: raw.clone(),
                message: "expected a positive number of seconds".to_string(),
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let directory = PaymentDirectory {
            wallet: WalletAccount {
                provider: "DANA_WALLET".to_string(),
                number: or("DEVPAY_DANA_NUMBER", DEFAULT_DANA_NUMBER),
                owner: or("DEVPAY_DANA_OWNER", DEFAULT_DANA_OWNER),
            },
            qris: QrisCode {
                image_url: or("DEVPAY_QRIS_IMAGE_URL", DEFAULT_QRIS_IMAGE_URL),
                nmid: or("DEVPAY_QRIS_NMID", DEFAULT_QRIS_NMID),
                merchant: or("DEVPAY_QRIS_MERCHANT", DEFAULT_QRIS_MERCHANT),
            },
        };

        Ok(Self {
            target,
            directory,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Point submissions at a relay URL, overriding the environment.
    pub fn with_relay_url(mut self, url: impl Into<String>) -> Self {
        self.target = Some(NotifyTarget::Relay { url: url.into() });
        self
    }

    /// The configured endpoint, or an error for commands that need one.
    pub fn require_target(&self) -> ConfigResult<&NotifyTarget> {
        self.target.as_ref().ok_or(ConfigError::MissingEndpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> ConfigResult<BackendConfig> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        BackendConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert!(config.target.is_none());
        assert!(matches!(config.require_target(), Err(ConfigError::MissingEndpoint)));
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.directory.wallet.provider, "DANA_WALLET");
        assert_eq!(config.directory.qris.nmid, DEFAULT_QRIS_NMID);
    }

    #[test]
    fn test_telegram_wins_over_relay() {
        let config = load(&[
            ("DEVPAY_RELAY_URL", "http://localhost:8787/api/proof"),
            ("DEVPAY_TELEGRAM_BOT_TOKEN", "123:abc"),
            ("DEVPAY_TELEGRAM_CHAT_ID", "42"),
            ("DEVPAY_TELEGRAM_API", "http://127.0.0.1:9000/"),
        ])
        .unwrap();
        assert_eq!(
            config.target,
            Some(NotifyTarget::Telegram {
                api_base: "http://127.0.0.1:9000".into(),
                bot_token: "123:abc".into(),
                chat_id: "42".into(),
            })
        );
        assert_eq!(config.require_target().unwrap().describe(), "telegram chat 42");
    }

    #[test]
    fn test_relay_and_overrides() {
        let config = load(&[
            ("DEVPAY_RELAY_URL", "http://relay/api/proof"),
            ("DEVPAY_DANA_NUMBER", "081234567890"),
            ("DEVPAY_TIMEOUT_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(config.target, Some(NotifyTarget::Relay { url: "http://relay/api/proof".into() }));
        assert_eq!(config.directory.wallet.number, "081234567890");
        assert_eq!(config.timeout, Duration::from_secs(5));

        let config = config.with_relay_url("http://other/api/proof");
        assert_eq!(config.require_target().unwrap().describe(), "relay http://other/api/proof");
    }

    #[test]
    fn test_incomplete_telegram() {
        let err = load(&[("DEVPAY_TELEGRAM_BOT_TOKEN", "123:abc")]).unwrap_err();
        assert!(matches!(err, ConfigError::Incomplete { requires: "DEVPAY_TELEGRAM_CHAT_ID", .. }));
    }

    #[test]
    fn test_invalid_timeout() {
        let err = load(&[("DEVPAY_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("DEVPAY_TIMEOUT_SECS"));
        assert!(load(&[("DEVPAY_TIMEOUT_SECS", "0")]).is_err());
    }
}
