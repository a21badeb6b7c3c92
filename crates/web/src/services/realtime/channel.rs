//! Channel names and the channel-access gate.
//!
//! Channel names are parsed into structure before any authorization
//! decision. An `admin-{id}` channel only matches when the entire suffix is
//! the owner's numeric id; `admin-123extra` is not a channel of user 123,
//! it is not a channel at all.

use serde::Serialize;

use freightline_core::{Role, UserId};

use crate::models::CurrentUser;

/// A parsed channel name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelName {
    /// `presence-*`: shared operations channel, subscriber identities
    /// visible to all members. Admin only.
    Presence(String),
    /// `admin-{userId}`: per-customer support channel, owner only.
    Admin(UserId),
}

impl ChannelName {
    /// Parse a raw channel name into one of the two supported shapes.
    ///
    /// Returns `None` for anything else, including an `admin-` name whose
    /// suffix is not entirely a positive integer.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        if let Some(rest) = raw.strip_prefix("presence-") {
            if rest.is_empty() {
                return None;
            }
            return Some(Self::Presence(raw.to_owned()));
        }

        if let Some(suffix) = raw.strip_prefix("admin-") {
            // Reject sign characters up front: "admin--1" and "admin-+1"
            // are malformed names, not negative ids.
            if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let id = suffix.parse::<i32>().ok()?;
            return Some(Self::Admin(UserId::new(id)));
        }

        None
    }
}

impl std::fmt::Display for ChannelName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Presence(name) => f.write_str(name),
            Self::Admin(id) => write!(f, "admin-{id}"),
        }
    }
}

/// Metadata bound into a presence-channel token.
///
/// The provider relays `user_info` to every other subscriber on the channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresenceData {
    pub user_id: String,
    pub user_info: PresenceUserInfo,
}

/// Identity shown to other presence-channel subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresenceUserInfo {
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl PresenceData {
    fn for_user(user: &CurrentUser) -> Self {
        Self {
            user_id: user.id.to_string(),
            user_info: PresenceUserInfo {
                name: user.display_name().to_owned(),
                email: user.email.to_string(),
                role: user.role,
            },
        }
    }
}

/// A positive gate decision: the channel plus any presence metadata to bind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelGrant {
    pub channel: ChannelName,
    pub presence: Option<PresenceData>,
}

/// A negative gate decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDenied {
    /// No session at all (401).
    Unauthenticated,
    /// Authenticated, but the channel is not theirs to join (403).
    Forbidden,
}

impl std::fmt::Display for GateDenied {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthenticated => f.write_str("not authenticated"),
            Self::Forbidden => f.write_str("channel access denied"),
        }
    }
}

/// Decide whether `session` may join `channel_name`.
///
/// Pure function over the parsed channel shape and the session:
/// - no session: denied, regardless of channel
/// - `presence-*`: admin role required; grant carries presence metadata
/// - `admin-{id}`: the session's own id must equal `{id}` exactly
/// - unrecognized names: denied
///
/// # Errors
///
/// Returns `GateDenied` describing which of 401/403 applies.
pub fn authorize(
    channel_name: &str,
    session: Option<&CurrentUser>,
) -> Result<ChannelGrant, GateDenied> {
    let user = session.ok_or(GateDenied::Unauthenticated)?;

    let Some(channel) = ChannelName::parse(channel_name) else {
        return Err(GateDenied::Forbidden);
    };

    match &channel {
        ChannelName::Presence(_) => {
            if user.role != Role::Admin {
                return Err(GateDenied::Forbidden);
            }
            let presence = PresenceData::for_user(user);
            Ok(ChannelGrant {
                channel,
                presence: Some(presence),
            })
        }
        ChannelName::Admin(owner_id) => {
            if *owner_id != user.id {
                return Err(GateDenied::Forbidden);
            }
            Ok(ChannelGrant {
                channel,
                presence: None,
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use freightline_core::Email;

    fn user(id: i32, role: Role, name: Option<&str>) -> CurrentUser {
        CurrentUser {
            id: UserId::new(id),
            email: Email::parse("someone@freightline.dev").unwrap(),
            name: name.map(String::from),
            role,
        }
    }

    #[test]
    fn test_parse_presence() {
        assert_eq!(
            ChannelName::parse("presence-ops"),
            Some(ChannelName::Presence("presence-ops".to_owned()))
        );
        assert_eq!(ChannelName::parse("presence-"), None);
    }

    #[test]
    fn test_parse_admin_full_integer_only() {
        assert_eq!(
            ChannelName::parse("admin-123"),
            Some(ChannelName::Admin(UserId::new(123)))
        );
        // Trailing garbage never matches a shorter id
        assert_eq!(ChannelName::parse("admin-123extra"), None);
        assert_eq!(ChannelName::parse("admin-"), None);
        assert_eq!(ChannelName::parse("admin--1"), None);
        assert_eq!(ChannelName::parse("admin-+1"), None);
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        assert_eq!(ChannelName::parse("private-ops"), None);
        assert_eq!(ChannelName::parse("ops"), None);
        assert_eq!(ChannelName::parse(""), None);
    }

    #[test]
    fn test_no_session_is_unauthenticated_for_any_channel() {
        for name in ["presence-ops", "admin-1", "garbage"] {
            assert_eq!(authorize(name, None), Err(GateDenied::Unauthenticated));
        }
    }

    #[test]
    fn test_presence_requires_admin_role() {
        let customer = user(5, Role::Customer, Some("Cass"));
        assert_eq!(
            authorize("presence-ops", Some(&customer)),
            Err(GateDenied::Forbidden)
        );

        let admin = user(5, Role::Admin, Some("Avery"));
        let grant = authorize("presence-ops", Some(&admin)).unwrap();
        assert!(grant.presence.is_some());
    }

    #[test]
    fn test_presence_metadata_carries_identity() {
        let admin = user(9, Role::Admin, Some("Avery"));
        let grant = authorize("presence-ops", Some(&admin)).unwrap();
        let presence = grant.presence.unwrap();
        assert_eq!(presence.user_id, "9");
        assert_eq!(presence.user_info.name, "Avery");
        assert_eq!(presence.user_info.email, "someone@freightline.dev");
        assert_eq!(presence.user_info.role, Role::Admin);
    }

    #[test]
    fn test_presence_name_falls_back_to_agent() {
        let unnamed = user(9, Role::Admin, None);
        let grant = authorize("presence-ops", Some(&unnamed)).unwrap();
        assert_eq!(grant.presence.unwrap().user_info.name, "Agent");

        let empty = user(9, Role::Admin, Some(""));
        let grant = authorize("presence-ops", Some(&empty)).unwrap();
        assert_eq!(grant.presence.unwrap().user_info.name, "Agent");
    }

    #[test]
    fn test_admin_channel_owner_only() {
        let owner = user(123, Role::Customer, None);
        let grant = authorize("admin-123", Some(&owner)).unwrap();
        assert_eq!(grant.channel, ChannelName::Admin(UserId::new(123)));
        assert!(grant.presence.is_none());

        // Someone else's channel
        assert_eq!(
            authorize("admin-124", Some(&owner)),
            Err(GateDenied::Forbidden)
        );
        // Admin role does not override ownership
        let admin = user(7, Role::Admin, None);
        assert_eq!(
            authorize("admin-123", Some(&admin)),
            Err(GateDenied::Forbidden)
        );
    }

    #[test]
    fn test_admin_channel_suffix_must_match_entirely() {
        let owner = user(123, Role::Customer, None);
        assert_eq!(
            authorize("admin-123extra", Some(&owner)),
            Err(GateDenied::Forbidden)
        );
    }

    #[test]
    fn test_unrecognized_channel_is_forbidden() {
        let admin = user(1, Role::Admin, None);
        assert_eq!(
            authorize("private-whatever", Some(&admin)),
            Err(GateDenied::Forbidden)
        );
    }
}
