//! The application-facing message entity and its disposition lifecycle.
//!
//! A [`Message`] is built once per received record: construction runs the
//! envelope parser over the raw record and fails outright on a malformed
//! envelope, body, or attribute, so application code only ever sees fully
//! decoded messages.
//!
//! # Message Lifecycle
//!
//! A message starts out pending and reaches its terminal state on the first
//! [`delete`](Message::delete) or [`keep`](Message::keep) call. That first call
//! invokes the corresponding [`Poller`] callback; every later `delete`/`keep`
//! is a silent no-op, so racing or repeated disposition from application code
//! can neither double-count the poller's in-flight slots nor issue duplicate
//! delete requests.
//!
//! [`change_visibility`](Message::change_visibility) (and its
//! [`release`](Message::release) shorthand) is deliberately NOT guarded: it is
//! not a terminal disposition, and a visibility adjustment can legitimately
//! follow an already-resolved message in some flows. The asymmetry is inherited
//! consumer behavior, not an oversight.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use crate::{
    config::Config,
    envelope::{self, AttributeValue, Body},
    error::Error,
    poller::Poller,
    types::ReceivedMessage,
};

/// A decoded queue message, owned by application code until disposed.
pub struct Message {
    /// The original record, untouched.
    pub raw: ReceivedMessage,
    /// The application payload, after any unwrapping and format decoding.
    pub body: Body,
    /// Notification subject; only present when SNS unwrapping is enabled.
    pub subject: Option<String>,
    /// Publishing topic ARN; only present when SNS unwrapping is enabled.
    pub topic_arn: Option<String>,
    /// Trailing segment of the topic ARN.
    pub topic_name: Option<String>,
    /// Decoded typed attributes, keyed by their raw names.
    pub attributes: HashMap<String, AttributeValue>,

    handled: AtomicBool,
    poller: Arc<dyn Poller>,
}

#[bon::bon]
impl Message {
    /// Returns a builder that decodes a received record into a `Message`.
    ///
    /// Fails with [`Error::MalformedEnvelope`], [`Error::MalformedBody`] or
    /// [`Error::MalformedAttribute`] when the record does not decode under the
    /// given configuration.
    #[builder(finish_fn = parse)]
    pub fn received(
        raw: ReceivedMessage,
        poller: Arc<dyn Poller>,
        #[builder(default)] config: Config,
    ) -> Result<Self, Error> {
        let envelope = envelope::parse(&raw, &config)?;

        Ok(Self {
            raw,
            body: envelope.body,
            subject: envelope.subject,
            topic_arn: envelope.topic_arn,
            topic_name: envelope.topic_name,
            attributes: envelope.attributes,
            handled: AtomicBool::new(false),
            poller,
        })
    }
}

impl Message {
    /// Requests permanent removal of this message from the queue.
    ///
    /// No-op if the message was already deleted or kept.
    pub fn delete(&self) {
        if self.disposed("delete") {
            return;
        }

        self.poller.delete_message(self);
    }

    /// Keeps this message on the queue for redelivery after its visibility
    /// timeout, releasing its in-flight slot now.
    ///
    /// No-op if the message was already deleted or kept.
    pub fn keep(&self) {
        if self.disposed("keep") {
            return;
        }

        self.poller.release_in_flight_slot(self);
    }

    /// Makes this message immediately eligible for redelivery.
    ///
    /// Shorthand for [`change_visibility`](Self::change_visibility) with a zero
    /// timeout.
    pub fn release(&self) {
        self.change_visibility(0);
    }

    /// Requests a new visibility timeout for this message.
    ///
    /// Unlike [`delete`](Self::delete) and [`keep`](Self::keep) this is not a
    /// terminal disposition: it may be called repeatedly, and it still reaches
    /// the poller after the message has been disposed.
    pub fn change_visibility(&self, timeout_seconds: u64) {
        self.poller.change_visibility(self, timeout_seconds);
    }

    /// Whether a terminal disposition has already been issued.
    pub fn is_handled(&self) -> bool {
        self.handled.load(Ordering::SeqCst)
    }

    // Atomically claims the one terminal disposition. Returns true when the
    // message was already disposed and the call must be ignored.
    fn disposed(&self, operation: &'static str) -> bool {
        let already = self.handled.swap(true, Ordering::SeqCst);

        if already {
            tracing::debug!(
                message_id = %self.raw.message_id,
                operation,
                "Ignoring disposition of already-handled message"
            );
        }

        already
    }
}
