//! KuCoin Futures authentication and request signing
//!
//! KC-API v2 scheme: every request carries a base64 HMAC-SHA256 signature
//! over `{timestamp}{METHOD}{path}{body}` plus a passphrase digest computed
//! with the same secret.

use crate::errors::{ExchangeError, Result};
use peregrine_core::millis;

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

/// API key schema version sent in `KC-API-KEY-VERSION`
pub const API_KEY_VERSION: &str = "2";

/// KuCoin API credentials
#[derive(Debug, Clone)]
pub struct KucoinCredentials {
    pub api_key: String,
    pub api_secret: String,
    pub api_passphrase: String,
}

impl KucoinCredentials {
    /// Create new credentials
    pub fn new(api_key: String, api_secret: String, api_passphrase: String) -> Self {
        Self {
            api_key,
            api_secret,
            api_passphrase,
        }
    }

    /// Load credentials from environment variables
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("KUCOIN_API_KEY")
            .map_err(|_| ExchangeError::MissingCredentials("KUCOIN_API_KEY".to_string()))?;
        let api_secret = std::env::var("KUCOIN_API_SECRET")
            .map_err(|_| ExchangeError::MissingCredentials("KUCOIN_API_SECRET".to_string()))?;
        let api_passphrase = std::env::var("KUCOIN_API_PASSPHRASE")
            .map_err(|_| ExchangeError::MissingCredentials("KUCOIN_API_PASSPHRASE".to_string()))?;

        Ok(Self::new(api_key, api_secret, api_passphrase))
    }

    /// Check if credentials are valid (non-empty)
    pub fn is_valid(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty() && !self.api_passphrase.is_empty()
    }
}

/// KuCoin request signer
pub struct KucoinSigner {
    credentials: KucoinCredentials,
}

impl KucoinSigner {
    /// Create new signer with credentials
    pub fn new(credentials: KucoinCredentials) -> Result<Self> {
        if !credentials.is_valid() {
            return Err(ExchangeError::InvalidCredentials);
        }

        Ok(Self { credentials })
    }

    /// Sign a request string with HMAC-SHA256, base64-encoded
    ///
    /// The string-to-sign is `{timestamp}{METHOD}{path}{body}` with the
    /// method upper-cased and the path including the `/api/{version}`
    /// prefix. A GET without a body signs the empty string.
    pub fn sign(&self, timestamp: u64, method: &str, path: &str, body: &str) -> Result<String> {
        let str_to_sign = format!("{timestamp}{}{path}{body}", method.to_ascii_uppercase());
        self.hmac_b64(str_to_sign.as_bytes())
    }

    /// Base64 HMAC-SHA256 digest of the passphrase, keyed with the secret
    pub fn passphrase_digest(&self) -> Result<String> {
        self.hmac_b64(self.credentials.api_passphrase.as_bytes())
    }

    /// Sign a request and assemble the full KC-API header set
    pub fn sign_request(&self, method: &str, path: &str, body: &str) -> Result<SignedRequest> {
        let timestamp = millis();
        let signature = self.sign(timestamp, method, path, body)?;
        let passphrase = self.passphrase_digest()?;

        let headers = vec![
            ("accept".to_string(), "application/json".to_string()),
            ("content-type".to_string(), "application/json".to_string()),
            ("KC-API-TIMESTAMP".to_string(), timestamp.to_string()),
            ("KC-API-SIGN".to_string(), signature),
            ("KC-API-KEY".to_string(), self.credentials.api_key.clone()),
            ("KC-API-PASSPHRASE".to_string(), passphrase),
            ("KC-API-KEY-VERSION".to_string(), API_KEY_VERSION.to_string()),
        ];

        debug!("🔐 Signed request: {} {}", method, path);

        Ok(SignedRequest {
            method: method.to_string(),
            path: path.to_string(),
            body: body.to_string(),
            headers,
            timestamp,
        })
    }

    fn hmac_b64(&self, payload: &[u8]) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(self.credentials.api_secret.as_bytes())
            .map_err(|e| ExchangeError::SigningError(format!("HMAC setup failed: {e}")))?;

        mac.update(payload);
        let digest = mac.finalize().into_bytes();

        Ok(BASE64.encode(digest))
    }
}

/// Signed request with all necessary components
///
/// Ephemeral; constructed per call and never persisted.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
    pub headers: Vec<(String, String)>,
    pub timestamp: u64,
}
