//! Pure decoding of a received record into its application-facing parts.
//!
//! Parsing has no side effects and touches no network: it unwraps an optional
//! SNS notification envelope, decodes the body according to the configured
//! [`BodyFormat`], and decodes each typed message attribute independently.
//! Any failure aborts the whole parse, so a half-decoded record is never
//! handed to application code.

use std::collections::HashMap;

use bytes::Bytes;
use serde_json::Value;
use snafu::ResultExt;

use crate::{
    config::{BodyFormat, Config},
    error::{Error, MalformedBodySnafu, MalformedEnvelopeSnafu},
    types::{MessageAttributeValue, ReceivedMessage, SnsNotification},
};

/// A message body after format decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Plain(String),
    Json(Value),
}

impl Body {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Plain(body) => Some(body),
            Self::Json(_) => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Plain(_) => None,
            Self::Json(body) => Some(body),
        }
    }
}

/// A decoded message attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Number(f64),
    String(String),
    Binary(Bytes),
}

/// The decoded parts of a received record, prior to lifecycle tracking.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub body: Body,
    pub subject: Option<String>,
    pub topic_arn: Option<String>,
    pub topic_name: Option<String>,
    pub attributes: HashMap<String, AttributeValue>,
}

pub fn parse(raw: &ReceivedMessage, config: &Config) -> Result<Envelope, Error> {
    let mut body = raw.body.clone();
    let mut subject = None;
    let mut topic_arn = None;
    let mut topic_name = None;

    if config.unwrap_sns() {
        let notification: SnsNotification =
            serde_json::from_str(&body).context(MalformedEnvelopeSnafu)?;

        body = notification.message;
        subject = notification.subject;
        topic_name = Some(topic_name_of(&notification.topic_arn).to_owned());
        topic_arn = Some(notification.topic_arn);
    }

    let body = match config.body_format() {
        BodyFormat::Plain => Body::Plain(body),
        BodyFormat::Json => Body::Json(serde_json::from_str(&body).context(MalformedBodySnafu)?),
    };

    let attributes = raw
        .message_attributes
        .iter()
        .map(|(name, attr)| decode_attribute(name, attr).map(|value| (name.clone(), value)))
        .collect::<Result<HashMap<_, _>, _>>()?;

    Ok(Envelope {
        body,
        subject,
        topic_arn,
        topic_name,
        attributes,
    })
}

/// The trailing segment of a topic ARN, e.g. `topicX` for
/// `arn:aws:sns:us-east-1:123:topicX`.
fn topic_name_of(topic_arn: &str) -> &str {
    topic_arn.rsplit(':').next().unwrap_or(topic_arn)
}

// Decoding is selected by the attribute's DataType tag. Tags other than Number
// and Binary (including absent ones) prefer the string value and fall back to
// the binary payload.
fn decode_attribute(name: &str, attr: &MessageAttributeValue) -> Result<AttributeValue, Error> {
    match attr.data_type.as_deref() {
        Some("Number") => attr
            .string_value
            .as_deref()
            .ok_or_else(|| Error::malformed_attribute(name, "missing string value"))?
            .parse()
            .map(AttributeValue::Number)
            .map_err(|_| Error::malformed_attribute(name, "non-numeric string value")),
        Some("Binary") => attr
            .binary_value
            .clone()
            .map(AttributeValue::Binary)
            .ok_or_else(|| Error::malformed_attribute(name, "missing binary value")),
        _ => attr
            .string_value
            .clone()
            .map(AttributeValue::String)
            .or_else(|| attr.binary_value.clone().map(AttributeValue::Binary))
            .ok_or_else(|| Error::malformed_attribute(name, "no string or binary value")),
    }
}
