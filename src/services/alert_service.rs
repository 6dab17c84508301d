//! BioAlert - availability notifications
//!
//! Registry of readers waiting for a book to come back, plus the dispatch
//! that tells them when it does. Storage access happens through injected
//! resolver closures, so this module knows nothing about the store.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use crate::domain::NotificationGateway;

#[derive(Default)]
struct AlertState {
    /// book id -> readers to notify when it becomes available again
    subscriptions: HashMap<String, BTreeSet<String>>,
    gateway: Option<Arc<dyn NotificationGateway>>,
}

/// Availability notifier shared across the whole process.
///
/// Whoever composes the system owns one instance and hands it to the
/// services that need it; `reset` restores the pristine state between
/// independent scenarios.
#[derive(Default)]
pub struct BioAlert {
    state: Mutex<AlertState>,
}

impl BioAlert {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the outbound delivery backend. Until one is installed,
    /// notifications are silently dropped.
    pub fn set_gateway(&self, gateway: Arc<dyn NotificationGateway>) {
        self.state.lock().expect("alert state poisoned").gateway = Some(gateway);
    }

    /// Register `reader_id` for availability alerts on `book_id`.
    /// Idempotent; the book id is not checked against any catalog.
    pub fn subscribe(&self, book_id: &str, reader_id: &str) {
        self.state
            .lock()
            .expect("alert state poisoned")
            .subscriptions
            .entry(book_id.to_owned())
            .or_default()
            .insert(reader_id.to_owned());
    }

    /// Tell every subscriber of `book_id` that it is available again.
    ///
    /// Addresses and the title come from the injected resolvers; a
    /// subscriber the resolver does not know is skipped. Subscriptions
    /// survive delivery, so readers keep hearing about future returns.
    /// Never fails.
    pub fn notify_available<E, T>(&self, book_id: &str, email_of: E, title_of: T)
    where
        E: Fn(&str) -> Option<String>,
        T: Fn(&str) -> Option<String>,
    {
        // Snapshot under the lock, deliver outside it
        let (gateway, subscribers) = {
            let state = self.state.lock().expect("alert state poisoned");
            let Some(gateway) = state.gateway.clone() else {
                return;
            };
            let Some(subscribers) = state.subscriptions.get(book_id) else {
                return;
            };
            (gateway, subscribers.iter().cloned().collect::<Vec<_>>())
        };

        let Some(title) = title_of(book_id) else {
            return;
        };

        for reader_id in subscribers {
            match email_of(&reader_id) {
                Some(to) => {
                    tracing::debug!("Notifying {} that '{}' is available", reader_id, title);
                    gateway.send_email(
                        &to,
                        &format!("Disponible: {}", title),
                        "Ya puedes solicitarlo",
                    );
                }
                None => tracing::warn!("No address for subscriber {}, skipping", reader_id),
            }
        }
    }

    /// Drop all subscriptions and detach the gateway.
    pub fn reset(&self) {
        let mut state = self.state.lock().expect("alert state poisoned");
        state.subscriptions.clear();
        state.gateway = None;
    }
}
