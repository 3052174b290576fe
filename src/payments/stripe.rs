use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

use crate::error::{AppError, AppResult};

type HmacSha256 = Hmac<Sha256>;

pub const CHECKOUT_SESSION_COMPLETED: &str = "checkout.session.completed";

#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("invalid signature format")]
    InvalidFormat,
    #[error("invalid timestamp in signature")]
    InvalidTimestamp,
    #[error("timestamp outside tolerance")]
    TimestampOutsideTolerance,
    #[error("signature mismatch")]
    Mismatch,
    #[error("invalid webhook secret")]
    InvalidSecret,
    #[error("invalid event payload")]
    InvalidPayload,
}

/// Verifies and parses inbound Stripe webhook deliveries.
///
/// Stripe signs each delivery with `Stripe-Signature: t=<unix ts>,v1=<hex>`
/// where `v1` is HMAC-SHA256 over `"{t}.{raw body}"` keyed by the endpoint
/// secret. Verification must run against the raw bytes, never a re-serialized
/// body.
#[derive(Debug, Clone)]
pub struct StripeWebhook {
    webhook_secret: String,
}

impl StripeWebhook {
    /// Maximum age of a webhook timestamp before it's rejected (in seconds).
    /// Stripe recommends 300 seconds (5 minutes).
    const TIMESTAMP_TOLERANCE_SECS: i64 = 300;

    /// Allowed clock skew into the future (in seconds).
    const FUTURE_SKEW_SECS: i64 = 60;

    pub fn new(webhook_secret: impl Into<String>) -> Self {
        Self {
            webhook_secret: webhook_secret.into(),
        }
    }

    /// Verify the signature and parse the event in one step. Any failure
    /// rejects the whole delivery before the database is touched; the
    /// provider's own retry policy governs redelivery.
    pub fn construct_event(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> AppResult<StripeWebhookEvent> {
        self.verify_signature(payload, signature)
            .map_err(|e| AppError::WebhookVerification(e.to_string()))?;

        serde_json::from_slice(payload)
            .map_err(|_| AppError::WebhookVerification(SignatureError::InvalidPayload.to_string()))
    }

    fn verify_signature(&self, payload: &[u8], signature: &str) -> Result<(), SignatureError> {
        let mut timestamp = None;
        let mut sig_v1 = None;

        for part in signature.split(',') {
            if let Some(t) = part.strip_prefix("t=") {
                timestamp = Some(t);
            } else if let Some(s) = part.strip_prefix("v1=") {
                sig_v1 = Some(s);
            }
        }

        let timestamp_str = timestamp.ok_or(SignatureError::InvalidFormat)?;
        let sig_v1 = sig_v1.ok_or(SignatureError::InvalidFormat)?;

        // Reject replayed and future-dated deliveries.
        let timestamp: i64 = timestamp_str
            .parse()
            .map_err(|_| SignatureError::InvalidTimestamp)?;

        let age = chrono::Utc::now().timestamp() - timestamp;
        if age > Self::TIMESTAMP_TOLERANCE_SECS || age < -Self::FUTURE_SKEW_SECS {
            tracing::warn!(age, "stripe webhook rejected: timestamp outside tolerance");
            return Err(SignatureError::TimestampOutsideTolerance);
        }

        // The MAC covers "{t}.{raw body}" as bytes; the body is never
        // round-tripped through a string.
        let mut mac = HmacSha256::new_from_slice(self.webhook_secret.as_bytes())
            .map_err(|_| SignatureError::InvalidSecret)?;
        mac.update(timestamp_str.as_bytes());
        mac.update(b".");
        mac.update(payload);
        let expected = hex::encode(mac.finalize().into_bytes());

        // Constant-time comparison; the length itself is not secret
        // (always 64 hex chars for SHA-256).
        let expected_bytes = expected.as_bytes();
        let provided_bytes = sig_v1.as_bytes();
        if expected_bytes.len() != provided_bytes.len() {
            return Err(SignatureError::Mismatch);
        }
        if bool::from(expected_bytes.ct_eq(provided_bytes)) {
            Ok(())
        } else {
            Err(SignatureError::Mismatch)
        }
    }
}

/// Generic Stripe webhook event - object is parsed based on event_type.
#[derive(Debug, Deserialize)]
pub struct StripeWebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: StripeEventData,
}

#[derive(Debug, Deserialize)]
pub struct StripeEventData {
    pub object: serde_json::Value,
}

// ============ checkout.session.completed ============

#[derive(Debug, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub customer_details: Option<CustomerDetails>,
    #[serde(default)]
    pub metadata: SessionMetadata,
}

#[derive(Debug, Deserialize)]
pub struct CustomerDetails {
    pub address: Option<Address>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SessionMetadata {
    /// Set into the session at checkout-session creation time; names the
    /// order this payment settles.
    pub order_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Address {
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl Address {
    /// Join the present components with ", ", dropping nulls and empty
    /// strings so the result never carries double separators.
    pub fn to_joined_string(&self) -> String {
        [
            &self.line1,
            &self.line2,
            &self.city,
            &self.state,
            &self.postal_code,
            &self.country,
        ]
        .into_iter()
        .flatten()
        .filter(|component| !component.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(secret: &str, timestamp: i64, payload: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        format!("t={},v1={}", timestamp, hex::encode(mac.finalize().into_bytes()))
    }

    #[test]
    fn valid_signature_verifies_and_parses() {
        let webhook = StripeWebhook::new("whsec_test");
        let payload = br#"{"type":"checkout.session.completed","data":{"object":{"id":"cs_1"}}}"#;
        let signature = sign("whsec_test", chrono::Utc::now().timestamp(), payload);

        let event = webhook.construct_event(payload, &signature).unwrap();
        assert_eq!(event.event_type, CHECKOUT_SESSION_COMPLETED);
    }

    #[test]
    fn tampered_body_is_rejected() {
        let webhook = StripeWebhook::new("whsec_test");
        let payload = br#"{"type":"checkout.session.completed","data":{"object":{}}}"#;
        let signature = sign("whsec_test", chrono::Utc::now().timestamp(), payload);

        let tampered = br#"{"type":"checkout.session.completed","data":{"object":{"id":"x"}}}"#;
        let err = webhook.construct_event(tampered, &signature).unwrap_err();
        assert!(matches!(err, AppError::WebhookVerification(_)));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let webhook = StripeWebhook::new("whsec_real");
        let payload = br#"{"type":"charge.refunded","data":{"object":{}}}"#;
        let signature = sign("whsec_other", chrono::Utc::now().timestamp(), payload);

        assert!(webhook.construct_event(payload, &signature).is_err());
    }

    #[test]
    fn expired_timestamp_is_rejected() {
        let webhook = StripeWebhook::new("whsec_test");
        let payload = br#"{"type":"checkout.session.completed","data":{"object":{}}}"#;
        let stale = chrono::Utc::now().timestamp() - 600;
        let signature = sign("whsec_test", stale, payload);

        let err = webhook.construct_event(payload, &signature).unwrap_err();
        assert!(err.to_string().contains("timestamp outside tolerance"));
    }

    #[test]
    fn non_utf8_body_still_verifies() {
        let webhook = StripeWebhook::new("whsec_test");
        let payload = b"\xff\xfe{\"type\":\"x\"}";
        let signature = sign("whsec_test", chrono::Utc::now().timestamp(), payload);

        // The signature itself is accepted; only the JSON parse fails.
        let err = webhook.construct_event(payload, &signature).unwrap_err();
        assert!(err.to_string().contains("invalid event payload"));
    }

    #[test]
    fn malformed_header_is_rejected() {
        let webhook = StripeWebhook::new("whsec_test");
        let err = webhook
            .construct_event(b"{}", "v1=deadbeef")
            .unwrap_err();
        assert!(err.to_string().contains("invalid signature format"));
    }

    #[test]
    fn address_join_drops_missing_components() {
        let address = Address {
            line1: Some("1 Main St".into()),
            line2: None,
            city: Some("Springfield".into()),
            state: None,
            postal_code: None,
            country: Some("US".into()),
        };
        assert_eq!(address.to_joined_string(), "1 Main St, Springfield, US");
    }

    #[test]
    fn address_join_drops_empty_strings() {
        let address = Address {
            line1: Some("1 Main St".into()),
            line2: Some(String::new()),
            city: Some("Springfield".into()),
            state: None,
            postal_code: None,
            country: None,
        };
        assert_eq!(address.to_joined_string(), "1 Main St, Springfield");
    }

    #[test]
    fn checkout_session_parses_nested_payload() {
        let object = serde_json::json!({
            "id": "cs_test_1",
            "customer_details": {
                "address": { "line1": "1 Main St", "city": "Springfield", "country": "US" },
                "phone": "+15551234567",
                "email": "buyer@example.com"
            },
            "metadata": { "order_id": "0b54f5c0-3f0e-4a76-93b5-6f9d3a3a2f11" }
        });
        let session: CheckoutSession = serde_json::from_value(object).unwrap();
        assert_eq!(
            session.metadata.order_id.as_deref(),
            Some("0b54f5c0-3f0e-4a76-93b5-6f9d3a3a2f11")
        );
        let details = session.customer_details.unwrap();
        assert_eq!(details.phone.as_deref(), Some("+15551234567"));
        assert_eq!(
            details.address.unwrap().to_joined_string(),
            "1 Main St, Springfield, US"
        );
    }

    #[test]
    fn metadata_defaults_when_absent() {
        let session: CheckoutSession = serde_json::from_value(serde_json::json!({
            "id": "cs_test_2"
        }))
        .unwrap();
        assert!(session.metadata.order_id.is_none());
        assert!(session.customer_details.is_none());
    }
}
