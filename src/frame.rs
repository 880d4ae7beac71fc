//! Notification batches: decode many incoming events, dropping the ones that fail.
//!
//! A notification that names an unknown method or does not decode is removed
//! from the batch and reported with its reason; the rest of the batch still
//! decodes.

use crate::codec::Codec;
use crate::value::Value;
use serde::Deserialize;

/// Raw notification as received from the transport.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Notification {
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Result of decoding a batch: decoded events and rejected notifications.
#[derive(Debug, Default)]
pub struct NotificationBatch {
    pub events: Vec<DecodedEvent>,
    pub rejected: Vec<RejectedNotification>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodedEvent {
    pub method: String,
    /// Position in the input batch.
    pub index: usize,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RejectedNotification {
    pub method: String,
    pub index: usize,
    pub reason: String,
}

/// Decode every notification; failures are collected instead of aborting the batch.
pub fn decode_notifications(codec: &Codec, notifications: &[Notification]) -> NotificationBatch {
    let mut batch = NotificationBatch::default();
    for (index, n) in notifications.iter().enumerate() {
        match codec.decode_event(&n.method, &n.params) {
            Ok(value) => batch.events.push(DecodedEvent {
                method: n.method.clone(),
                index,
                value,
            }),
            Err(e) => batch.rejected.push(RejectedNotification {
                method: n.method.clone(),
                index,
                reason: e.to_string(),
            }),
        }
    }
    batch
}
