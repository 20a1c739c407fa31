//! Handle database requests.

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::account::{Account, NewAccount};
use crate::error::Result;

/// Persists an account record and returns the stored projection.
#[async_trait]
pub trait AddAccountRepository: Send + Sync {
    async fn add(&self, account: NewAccount) -> Result<Account>;
}

/// [`AddAccountRepository`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: Pool<Postgres>,
}

impl PgAccountRepository {
    /// Create a new [`PgAccountRepository`].
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AddAccountRepository for PgAccountRepository {
    /// Insert [`NewAccount`] into database.
    ///
    /// The returned projection carries the generated identifier and no
    /// password column.
    async fn add(&self, account: NewAccount) -> Result<Account> {
        let id = Uuid::new_v4().to_string();

        let stored = sqlx::query_as::<_, Account>(
            r#"INSERT INTO accounts (id, name, email, password, "group", country, role, status)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING id, name, email"#,
        )
        .bind(&id)
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.password)
        .bind(&account.group)
        .bind(&account.country)
        .bind(account.role)
        .bind(account.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }
}
