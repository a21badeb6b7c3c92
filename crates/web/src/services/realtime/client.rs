//! Real-time provider client.
//!
//! Implements the provider's wire protocol directly: channel-authorization
//! tokens are an HMAC-SHA256 over `socket_id:channel_name[:channel_data]`,
//! and trigger events are POSTed to the REST API with an MD5 body digest and
//! a signed query string.

use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use sha2::Sha256;
use tracing::{debug, instrument};

use super::channel::ChannelGrant;
use super::error::RealtimeError;
use crate::config::RealtimeConfig;

/// A signed channel-authorization payload, returned verbatim to the browser
/// SDK.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelAuth {
    /// `"{key}:{hex signature}"`
    pub auth: String,
    /// Presence metadata as a JSON string, bound into the signature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_data: Option<String>,
}

/// Client for the real-time messaging provider.
#[derive(Clone)]
pub struct RealtimeClient {
    /// HTTP client.
    client: Client,
    /// Provider application id.
    app_id: String,
    /// Public key (also embedded in browser pages).
    key: String,
    /// Signing secret.
    secret: SecretString,
    /// Provider cluster.
    cluster: String,
}

impl std::fmt::Debug for RealtimeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeClient")
            .field("app_id", &self.app_id)
            .field("key", &self.key)
            .field("secret", &"[REDACTED]")
            .field("cluster", &self.cluster)
            .finish_non_exhaustive()
    }
}

/// Trigger request body, per the provider's REST API.
#[derive(Serialize)]
struct TriggerBody<'a> {
    name: &'a str,
    channels: Vec<String>,
    data: String,
}

impl RealtimeClient {
    /// Create a new client from configuration.
    #[must_use]
    pub fn new(config: &RealtimeConfig) -> Self {
        Self {
            client: Client::new(),
            app_id: config.app_id.clone(),
            key: config.key.clone(),
            secret: config.secret.clone(),
            cluster: config.cluster.clone(),
        }
    }

    /// The public key, for embedding in browser pages.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Sign a channel-authorization token for an allowed subscription.
    ///
    /// Signing is a pure deterministic function of the secret, the socket
    /// id, the channel name, and (for presence channels) the metadata; the
    /// same inputs always produce the same token.
    ///
    /// # Errors
    ///
    /// Returns `RealtimeError::Serialization` if presence metadata cannot be
    /// rendered as JSON.
    pub fn sign_subscription(
        &self,
        socket_id: &str,
        grant: &ChannelGrant,
    ) -> Result<ChannelAuth, RealtimeError> {
        let channel_data = grant
            .presence
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let channel_name = grant.channel.to_string();
        let payload = auth_payload(socket_id, &channel_name, channel_data.as_deref());
        let signature = self.hmac_hex(payload.as_bytes());

        Ok(ChannelAuth {
            auth: format!("{}:{signature}", self.key),
            channel_data,
        })
    }

    /// Post an event to a channel via the provider's REST API.
    ///
    /// One round trip, no retries; a failed trigger surfaces as an error and
    /// the caller decides whether it matters.
    ///
    /// # Errors
    ///
    /// Returns `RealtimeError::Request` if the request cannot be sent and
    /// `RealtimeError::Api` if the provider rejects it.
    #[instrument(skip(self, data), fields(channel = %channel, event = %event))]
    pub async fn trigger<T: Serialize + Sync>(
        &self,
        channel: &str,
        event: &str,
        data: &T,
    ) -> Result<(), RealtimeError> {
        let body = TriggerBody {
            name: event,
            channels: vec![channel.to_owned()],
            data: serde_json::to_string(data)?,
        };
        let body_json = serde_json::to_string(&body)?;

        let body_md5 = hex::encode(Md5::digest(body_json.as_bytes()));
        let timestamp = unix_timestamp();
        let path = format!("/apps/{}/events", self.app_id);

        // Query keys must be signed in alphabetical order
        let query = format!(
            "auth_key={}&auth_timestamp={timestamp}&auth_version=1.0&body_md5={body_md5}",
            self.key
        );
        let string_to_sign = format!("POST\n{path}\n{query}");
        let signature = self.hmac_hex(string_to_sign.as_bytes());

        let url = format!(
            "https://api-{}.pusher.com{path}?{query}&auth_signature={signature}",
            self.cluster
        );

        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body_json)
            .send()
            .await
            .map_err(|e| RealtimeError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RealtimeError::Api {
                status: status.as_u16(),
                body,
            });
        }

        debug!("event triggered");

        Ok(())
    }

    /// Lowercase hex HMAC-SHA256 under the provider secret.
    fn hmac_hex(&self, payload: &[u8]) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(payload);
        hex::encode(mac.finalize().into_bytes())
    }
}

/// The string the provider expects under the subscription signature.
fn auth_payload(socket_id: &str, channel_name: &str, channel_data: Option<&str>) -> String {
    match channel_data {
        Some(data) => format!("{socket_id}:{channel_name}:{data}"),
        None => format!("{socket_id}:{channel_name}"),
    }
}

/// Seconds since the Unix epoch, for the trigger query string.
fn unix_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::CurrentUser;
    use crate::services::realtime::channel::authorize;
    use freightline_core::{Email, Role, UserId};

    fn client() -> RealtimeClient {
        RealtimeClient::new(&RealtimeConfig {
            app_id: "100001".to_string(),
            key: "fl_public_key".to_string(),
            secret: SecretString::from("fl_signing_value"),
            cluster: "mt1".to_string(),
        })
    }

    fn admin() -> CurrentUser {
        CurrentUser {
            id: UserId::new(9),
            email: Email::parse("avery@freightline.dev").unwrap(),
            name: Some("Avery".to_string()),
            role: Role::Admin,
        }
    }

    fn customer(id: i32) -> CurrentUser {
        CurrentUser {
            id: UserId::new(id),
            email: Email::parse("cass@example.com").unwrap(),
            name: None,
            role: Role::Customer,
        }
    }

    #[test]
    fn test_auth_payload_shapes() {
        assert_eq!(
            auth_payload("1234.5678", "admin-42", None),
            "1234.5678:admin-42"
        );
        assert_eq!(
            auth_payload("1234.5678", "presence-ops", Some("{\"user_id\":\"9\"}")),
            "1234.5678:presence-ops:{\"user_id\":\"9\"}"
        );
    }

    #[test]
    fn test_private_token_format() {
        let grant = authorize("admin-42", Some(&customer(42))).unwrap();
        let auth = client().sign_subscription("1234.5678", &grant).unwrap();

        let (key, sig) = auth.auth.split_once(':').unwrap();
        assert_eq!(key, "fl_public_key");
        assert_eq!(sig.len(), 64);
        assert!(sig.bytes().all(|b| b.is_ascii_hexdigit()));
        assert!(!sig.bytes().any(|b| b.is_ascii_uppercase()));
        assert!(auth.channel_data.is_none());
    }

    #[test]
    fn test_presence_token_binds_metadata() {
        let grant = authorize("presence-ops", Some(&admin())).unwrap();
        let auth = client().sign_subscription("1234.5678", &grant).unwrap();

        let data = auth.channel_data.unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&data).unwrap();
        assert_eq!(parsed["user_id"], "9");
        assert_eq!(parsed["user_info"]["name"], "Avery");
        assert_eq!(parsed["user_info"]["role"], "admin");
    }

    #[test]
    fn test_signing_is_deterministic() {
        let grant = authorize("presence-ops", Some(&admin())).unwrap();
        let c = client();
        let first = c.sign_subscription("1234.5678", &grant).unwrap();
        let second = c.sign_subscription("1234.5678", &grant).unwrap();
        assert_eq!(first.auth, second.auth);
        assert_eq!(first.channel_data, second.channel_data);
    }

    #[test]
    fn test_signature_depends_on_inputs() {
        let c = client();
        let grant = authorize("admin-42", Some(&customer(42))).unwrap();
        let a = c.sign_subscription("1234.5678", &grant).unwrap();
        let b = c.sign_subscription("1234.9999", &grant).unwrap();
        assert_ne!(a.auth, b.auth);

        let other_grant = authorize("admin-43", Some(&customer(43))).unwrap();
        let other = c.sign_subscription("1234.5678", &other_grant).unwrap();
        assert_ne!(a.auth, other.auth);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let output = format!("{:?}", client());
        assert!(output.contains("[REDACTED]"));
        assert!(!output.contains("fl_signing_value"));
    }
}
