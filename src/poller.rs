use crate::message::Message;

/// The capability set a poller exposes to messages it has handed out.
///
/// Each [`Message`] holds its poller as an injected `Arc<dyn Poller>`
/// back-reference resolved at construction time; the message never controls the
/// poller's lifetime. Methods are expected to return quickly: a networked
/// implementation should enqueue or spawn the underlying request rather than
/// block the caller, and surface request failures through its own reporting.
pub trait Poller: Send + Sync {
    /// Request permanent removal of the underlying queue record.
    fn delete_message(&self, message: &Message);

    /// Decrement the in-flight counter without deleting, leaving the record on
    /// the queue for redelivery once its visibility timeout expires.
    fn release_in_flight_slot(&self, message: &Message);

    /// Request that the queue service adjust when the record becomes eligible
    /// for redelivery.
    fn change_visibility(&self, message: &Message, timeout_seconds: u64);
}
