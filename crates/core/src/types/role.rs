//! User roles.

use serde::{Deserialize, Serialize};

/// Account role controlling access to the operations dashboard.
///
/// Stored in `PostgreSQL` as the `user_role` enum and in sessions as
/// snake_case JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "user_role", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Operations staff: full dashboard and presence-channel access.
    Admin,
    /// Regular customer: tracking and own support channel only.
    Customer,
}

impl Role {
    /// Whether this role grants dashboard access.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Customer => write!(f, "customer"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "customer" => Ok(Self::Customer),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_through_str() {
        for role in [Role::Admin, Role::Customer] {
            let parsed: Role = role.to_string().parse().expect("parses back");
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::Customer.is_admin());
    }

    #[test]
    fn test_rejects_unknown() {
        assert!("superuser".parse::<Role>().is_err());
    }
}
