use std::fmt;

use chrono::{DateTime, Duration, Utc};
use rand::RngExt;
use sha2::{Digest, Sha256};

use crate::domain::types::{
    PendingVerification, VERIFICATION_TOKEN_BYTES, VERIFICATION_TOKEN_TTL_SECS,
};

/// Hex-encoded SHA-256 of a verification token, the only form that is persisted.
pub fn digest_token(plaintext: &str) -> String {
    hex::encode(Sha256::digest(plaintext.as_bytes()))
}

/// Freshly generated email verification token.
///
/// `plaintext` leaves the service once, inside the verification URL.
pub struct VerificationToken {
    pub plaintext: String,
    pub digest: String,
}

impl VerificationToken {
    pub fn generate() -> Self {
        let bytes: [u8; VERIFICATION_TOKEN_BYTES] = rand::rng().random();
        let plaintext = hex::encode(bytes);
        let digest = digest_token(&plaintext);
        Self { plaintext, digest }
    }

    /// Pending verification expiring 24h after `now`.
    pub fn pending(&self, now: DateTime<Utc>) -> PendingVerification {
        PendingVerification {
            token_digest: self.digest.clone(),
            expires_at: now + Duration::seconds(VERIFICATION_TOKEN_TTL_SECS),
        }
    }
}

impl fmt::Debug for VerificationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationToken")
            .field("plaintext", &"<redacted>")
            .field("digest", &self.digest)
            .finish()
    }
}
