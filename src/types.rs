use std::collections::HashMap;

use bytes::Bytes;
use chrono::{DateTime, Utc};

/// A raw record as delivered by an SQS-compatible queue service.
///
/// Everything the consumer core does not interpret is carried through untouched,
/// so advanced callers can still reach the original wire fields.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReceivedMessage {
    pub message_id: String,
    pub receipt_handle: String,
    #[serde(default, rename = "MD5OfBody")]
    pub md5_of_body: Option<String>,
    pub body: String,
    /// System attributes (ApproximateReceiveCount, SentTimestamp, ...).
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    /// Caller-defined typed attributes.
    #[serde(default)]
    pub message_attributes: HashMap<String, MessageAttributeValue>,
}

impl ReceivedMessage {
    /// Checks the body against the digest the service reported, if any.
    pub fn body_digest_ok(&self) -> bool {
        match &self.md5_of_body {
            Some(digest) => hex::encode(md5::compute(&self.body).as_ref()) == *digest,
            None => true,
        }
    }

    pub fn approximate_receive_count(&self) -> Option<u64> {
        self.attributes
            .get("ApproximateReceiveCount")
            .and_then(|count| count.parse().ok())
    }
}

/// A typed message attribute as transmitted on the wire.
///
/// `DataType` is an open set (custom tags like `String.custom` are legal), so this
/// is a struct of optional fields rather than a closed enum. Decoding into a
/// concrete value happens in [`crate::envelope`].
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageAttributeValue {
    #[serde(default)]
    pub data_type: Option<String>,
    #[serde(default)]
    pub string_value: Option<String>,
    #[serde(default, with = "crate::utils::base64_bytes")]
    pub binary_value: Option<Bytes>,
}

/// The pub/sub notification wrapper an SNS-subscribed queue delivers.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnsNotification {
    #[serde(default, rename = "Type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub message_id: Option<String>,
    pub topic_arn: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_received_message() {
        let raw: ReceivedMessage = serde_json::from_str(
            r#"{
                "MessageId": "id-1",
                "ReceiptHandle": "rh-1",
                "MD5OfBody": "5eb63bbbe01eeed093cb22bb8f5acdc3",
                "Body": "hello world",
                "Attributes": {"ApproximateReceiveCount": "3"},
                "MessageAttributes": {
                    "trace": {"DataType": "Binary", "BinaryValue": "AQID"}
                }
            }"#,
        )
        .unwrap();

        assert!(raw.body_digest_ok());
        assert_eq!(raw.approximate_receive_count(), Some(3));
        assert_eq!(
            raw.message_attributes["trace"].binary_value.as_deref(),
            Some(&[1u8, 2, 3][..])
        );
    }

    #[test]
    fn test_body_digest_mismatch() {
        let raw: ReceivedMessage = serde_json::from_str(
            r#"{
                "MessageId": "id-1",
                "ReceiptHandle": "rh-1",
                "MD5OfBody": "00000000000000000000000000000000",
                "Body": "hello world"
            }"#,
        )
        .unwrap();

        assert!(!raw.body_digest_ok());
    }
}
