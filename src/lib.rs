//! Message envelope and disposition core for SQS-compatible queue consumers.
//!
//! millrace normalizes raw queue records into decoded [`message::Message`]s
//! (optionally unwrapping an SNS notification envelope and decoding typed
//! message attributes) and enforces a once-only disposition contract — delete,
//! keep, or release — against the [`poller::Poller`] that handed the record
//! out. Polling, network calls, and in-flight accounting stay on the poller's
//! side of that trait.

pub mod config;
pub mod envelope;
pub mod error;
pub mod message;
pub mod poller;
pub mod types;
pub mod utils;
