//! Argon2id password hashing.
//!
//! Both operations are CPU-bound and run on the blocking pool.

use anyhow::{Context as _, anyhow};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::error::AuthServiceError;

/// Adaptive-cost hasher producing PHC-format Argon2id digests.
#[derive(Debug, Clone)]
pub struct CredentialHasher {
    params: Params,
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self {
            params: Params::DEFAULT,
        }
    }
}

impl CredentialHasher {
    /// Hasher with explicit memory cost (KiB) and iteration count, single lane.
    pub fn new(memory_kib: u32, iterations: u32) -> Result<Self, AuthServiceError> {
        let params = Params::new(memory_kib, iterations, 1, None)
            .map_err(|e| anyhow!("invalid argon2 parameters: {e}"))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    pub async fn hash(&self, plaintext: &str) -> Result<String, AuthServiceError> {
        let argon2 = self.argon2();
        let plaintext = plaintext.to_owned();
        let digest = tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(plaintext.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| anyhow!("hash password: {e}"))
        })
        .await
        .context("password hashing task")??;
        Ok(digest)
    }

    /// `Ok(false)` on mismatch; `Err` only when the digest is unreadable or the task fails.
    /// Cost parameters are taken from the digest itself.
    pub async fn verify(&self, plaintext: &str, digest: &str) -> Result<bool, AuthServiceError> {
        let argon2 = self.argon2();
        let plaintext = plaintext.to_owned();
        let digest = digest.to_owned();
        let matched = tokio::task::spawn_blocking(move || {
            let parsed =
                PasswordHash::new(&digest).map_err(|e| anyhow!("malformed password digest: {e}"))?;
            match argon2.verify_password(plaintext.as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(password_hash::Error::Password) => Ok(false),
                Err(e) => Err(anyhow!("verify password: {e}")),
            }
        })
        .await
        .context("password verification task")??;
        Ok(matched)
    }
}
