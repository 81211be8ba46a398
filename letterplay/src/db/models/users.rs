//! Database models for users.

use crate::types::UserId;
use serde::{Deserialize, Serialize};

/// The columns of `users` this service reads
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub username: String,
}
