//! Account creation use case.

use std::sync::Arc;

use async_trait::async_trait;

use crate::account::{Account, AddAccountRepository, NewAccount};
use crate::error::Result;

/// One-way hash of a plaintext password.
#[async_trait]
pub trait Encrypter: Send + Sync {
    async fn encrypt(&self, plaintext: &str) -> Result<String>;
}

/// Create a persisted account from submitted data.
#[async_trait]
pub trait AddAccount: Send + Sync {
    async fn add(&self, data: NewAccount) -> Result<Account>;
}

/// [`AddAccount`] backed by an [`Encrypter`] and an [`AddAccountRepository`].
///
/// A single forward pipeline: hash the password, persist the account with
/// the hash substituted in, return the stored projection unchanged.
pub struct DbAddAccount {
    encrypter: Arc<dyn Encrypter>,
    repository: Arc<dyn AddAccountRepository>,
}

impl DbAddAccount {
    /// Create a new [`DbAddAccount`].
    pub fn new(
        encrypter: Arc<dyn Encrypter>,
        repository: Arc<dyn AddAccountRepository>,
    ) -> Self {
        Self {
            encrypter,
            repository,
        }
    }
}

#[async_trait]
impl AddAccount for DbAddAccount {
    async fn add(&self, data: NewAccount) -> Result<Account> {
        // The repository must never see the plaintext; a hashing failure
        // stops the pipeline before any write.
        let password = self.encrypter.encrypt(&data.password).await?;

        self.repository.add(NewAccount { password, ..data }).await
    }
}
