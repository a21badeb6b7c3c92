//! User account model.

use chrono::{DateTime, Utc};

use freightline_core::{Email, Role, UserId};

/// A registered account.
///
/// Password hashes live in a sibling table and never appear on this type.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub name: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}
