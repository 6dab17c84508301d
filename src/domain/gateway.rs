//! Outbound notification capability
//!
//! The trait defines the contract for message delivery.
//! Implementations live in the infrastructure layer.

/// Delivery of one message to one address.
///
/// Fire-and-forget: callers never inspect an outcome and implementations
/// must not fail circulation on delivery problems.
pub trait NotificationGateway: Send + Sync {
    fn send_email(&self, to: &str, subject: &str, body: &str);
}
