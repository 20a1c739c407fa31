mod repository;
mod usecase;

pub use repository::*;
pub use usecase::*;

use serde::{Deserialize, Serialize};

/// Account data as submitted on signup. Transient, built per request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub group: String,
    /// Opaque country payload, stored as-is.
    pub country: serde_json::Value,
    pub role: i32,
    pub status: i32,
}

/// Account as returned to clients once persisted.
///
/// The password never leaves the database: this projection has no field to
/// carry it.
#[derive(
    Clone, Debug, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow,
)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
}
