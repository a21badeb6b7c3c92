//! Integration tests for the channel-access gate and token signing.
//!
//! These cover the authorization matrix end to end: parse, decide, sign.

use freightline_integration_tests::{admin_session, customer_session, realtime_client};
use freightline_web::services::realtime::{GateDenied, authorize};

// =============================================================================
// Denial Matrix
// =============================================================================

#[test]
fn test_every_channel_requires_a_session() {
    for channel in ["presence-ops", "admin-1", "admin-", "unrelated"] {
        assert_eq!(
            authorize(channel, None),
            Err(GateDenied::Unauthenticated),
            "channel {channel} must 401 without a session"
        );
    }
}

#[test]
fn test_presence_channel_rejects_customers() {
    let customer = customer_session(5);
    assert_eq!(
        authorize("presence-ops", Some(&customer)),
        Err(GateDenied::Forbidden)
    );
}

#[test]
fn test_admin_channel_rejects_everyone_but_the_owner() {
    let owner = customer_session(123);

    assert!(authorize("admin-123", Some(&owner)).is_ok());
    assert_eq!(
        authorize("admin-124", Some(&owner)),
        Err(GateDenied::Forbidden)
    );

    // Even operations staff cannot join another user's channel
    let admin = admin_session(7, Some("Avery"));
    assert_eq!(
        authorize("admin-123", Some(&admin)),
        Err(GateDenied::Forbidden)
    );
}

#[test]
fn test_admin_channel_suffix_is_matched_in_full() {
    // A name like admin-123extra belongs to nobody; the id must parse whole
    let owner = customer_session(123);
    assert_eq!(
        authorize("admin-123extra", Some(&owner)),
        Err(GateDenied::Forbidden)
    );
    assert_eq!(
        authorize("admin-0123x", Some(&owner)),
        Err(GateDenied::Forbidden)
    );
}

#[test]
fn test_unknown_channel_shapes_are_forbidden() {
    let admin = admin_session(1, None);
    for channel in ["private-ops", "presence", "admin", "cache-anything", ""] {
        assert_eq!(
            authorize(channel, Some(&admin)),
            Err(GateDenied::Forbidden),
            "channel {channel:?} must not authorize"
        );
    }
}

// =============================================================================
// Token Contents
// =============================================================================

#[test]
fn test_presence_token_metadata_uses_session_name() {
    let admin = admin_session(9, Some("Avery"));
    let grant = authorize("presence-ops", Some(&admin)).expect("admin joins presence");
    let auth = realtime_client()
        .sign_subscription("81.9944", &grant)
        .expect("signs");

    let data: serde_json::Value =
        serde_json::from_str(&auth.channel_data.expect("presence has channel_data"))
            .expect("channel_data is JSON");
    assert_eq!(data["user_id"], "9");
    assert_eq!(data["user_info"]["name"], "Avery");
    assert_eq!(data["user_info"]["email"], "avery@freightline.dev");
    assert_eq!(data["user_info"]["role"], "admin");
}

#[test]
fn test_presence_token_name_falls_back_to_agent() {
    let unnamed = admin_session(9, None);
    let grant = authorize("presence-ops", Some(&unnamed)).expect("admin joins presence");
    let auth = realtime_client()
        .sign_subscription("81.9944", &grant)
        .expect("signs");

    let data: serde_json::Value =
        serde_json::from_str(&auth.channel_data.expect("presence has channel_data"))
            .expect("channel_data is JSON");
    assert_eq!(data["user_info"]["name"], "Agent");
}

#[test]
fn test_private_token_has_no_metadata() {
    let owner = customer_session(42);
    let grant = authorize("admin-42", Some(&owner)).expect("owner joins own channel");
    let auth = realtime_client()
        .sign_subscription("81.9944", &grant)
        .expect("signs");

    assert!(auth.channel_data.is_none());
    let json = serde_json::to_value(&auth).expect("serializes");
    assert!(json.get("channel_data").is_none(), "absent, not null");
}

#[test]
fn test_token_is_key_colon_hex_and_deterministic() {
    let owner = customer_session(42);
    let grant = authorize("admin-42", Some(&owner)).expect("owner joins own channel");
    let client = realtime_client();

    let first = client.sign_subscription("81.9944", &grant).expect("signs");
    let second = client.sign_subscription("81.9944", &grant).expect("signs");
    assert_eq!(first.auth, second.auth, "pure function of its inputs");

    let (key, signature) = first.auth.split_once(':').expect("key:signature");
    assert_eq!(key, "test_public_key");
    assert_eq!(signature.len(), 64);
    assert!(signature.bytes().all(|b| b.is_ascii_hexdigit()));
}
