//! Cryptographic logics.

use argon2::password_hash::{
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use rand::rngs::OsRng;

use crate::account::Encrypter;
use crate::config::Argon2 as ArgonConfig;

type Result<T> = std::result::Result<T, CryptoError>;

#[derive(thiserror::Error, Debug)]
pub enum CryptoError {
    #[error("argon2 error: {0}")]
    Argon2(String),
}

/// Password manager that uses Argon2id and PHC string format for hashing and
/// verification.
pub struct PasswordManager {
    params: Params,
}

impl PasswordManager {
    /// Create a new [`PasswordManager`].
    pub fn new(config: Option<ArgonConfig>) -> Result<Self> {
        let config = config.unwrap_or_default();

        let params = Params::new(
            config.memory_cost,
            config.iterations,
            config.parallelism,
            Some(config.hash_length),
        )
        .map_err(|err| CryptoError::Argon2(err.to_string()))?;

        Ok(Self { params })
    }

    /// Hash password using Argon2id.
    pub fn hash_password(
        &self,
        password: impl AsRef<[u8]>,
    ) -> Result<String> {
        let argon2 = Argon2::new(
            Algorithm::Argon2id,
            Version::V0x13,
            self.params.clone(),
        );
        let salt = SaltString::generate(&mut OsRng);
        let hash = argon2
            .hash_password(password.as_ref(), &salt)
            .map_err(|e| CryptoError::Argon2(e.to_string()))?;

        Ok(hash.to_string())
    }

    /// Verify password against a PHC.
    pub fn verify_password(
        &self,
        password: impl AsRef<[u8]>,
        phc_hash: &str,
    ) -> Result<()> {
        let argon2 = Argon2::new(
            Algorithm::Argon2id,
            Version::V0x13,
            self.params.clone(),
        );

        let parsed = PasswordHash::new(phc_hash)
            .map_err(|e| CryptoError::Argon2(e.to_string()))?;

        argon2
            .verify_password(password.as_ref(), &parsed)
            .map_err(|e| CryptoError::Argon2(e.to_string()))
    }
}

#[async_trait]
impl Encrypter for PasswordManager {
    async fn encrypt(&self, plaintext: &str) -> crate::error::Result<String> {
        Ok(self.hash_password(plaintext)?)
    }
}
