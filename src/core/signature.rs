//! Request integrity signature
//!
//! Lowercase hex HMAC-SHA256 over the exact bytes sent as the request body.
//! The key ships with the client, so this deters casual tampering and nothing more.

use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Signs request payloads with a shared secret
#[derive(Clone)]
pub struct Signer {
    secret: Vec<u8>,
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer").field("secret", &"<redacted>").finish()
    }
}

impl Signer {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }

    /// Hex signature of raw bytes
    pub fn sign_bytes(&self, data: &[u8]) -> String {
        // HMAC takes keys of any length
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .unwrap_or_else(|_| unreachable!("hmac accepts any key length"));
        mac.update(data);
        hex::encode(mac.finalize().into_bytes())
    }

    /// Serialize to compact JSON and sign it. Returns the body and its signature,
    /// so callers send exactly the bytes that were signed.
    pub fn sign_json<T: Serialize>(&self, payload: &T) -> Result<(String, String), serde_json::Error> {
        let body = serde_json::to_string(payload)?;
        let signature = self.sign_bytes(body.as_bytes());
        Ok((body, signature))
    }

    /// Constant-time check of a hex signature against `data`
    pub fn verify(&self, data: &[u8], signature_hex: &str) -> bool {
        let Ok(expected) = hex::decode(signature_hex.trim()) else {
            return false;
        };
        let Ok(mut mac) = HmacSha256::new_from_slice(&self.secret) else {
            return false;
        };
        mac.update(data);
        mac.verify_slice(&expected).is_ok()
    }
}
