//! User model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use quills_core::{Email, UserId};

/// A registered user.
///
/// Created on registration, read on login and `/me`, never mutated
/// elsewhere. The password hash lives only in the repository layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub created_at: DateTime<Utc>,
}
