//! Typed publish/subscribe bus for cross-application navigation events.
//!
//! The bus replaces an ambient broadcast channel with an explicit
//! contract: publishers hand in a [`NavigationEvent`], and consumers
//! hold a [`Subscription`] whose lifetime bounds delivery. Dropping the
//! subscription unsubscribes on every exit path; events published while
//! nobody matching is subscribed are lost, by design.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex, Weak};
use uuid::Uuid;

/// Optional payload details attached to a navigation event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referrer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// A cross-application navigation notice, as received on the wire.
///
/// Externally supplied and untrusted: every field except `route` is
/// optional and defaults downstream rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_app_id: Option<String>,
    /// Route the event pertains to; consumers filter on this.
    pub route: String,
    /// Epoch milliseconds, if the publisher supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<NavigationData>,
}

impl NavigationEvent {
    /// Source application id, defaulted for partially-populated events.
    pub fn source_or_unknown(&self) -> &str {
        self.source_app_id.as_deref().unwrap_or("unknown")
    }

    pub fn referrer_or_unknown(&self) -> &str {
        self.data
            .as_ref()
            .and_then(|d| d.referrer.as_deref())
            .unwrap_or("unknown")
    }

    pub fn action_or_default(&self) -> &str {
        self.data
            .as_ref()
            .and_then(|d| d.action.as_deref())
            .unwrap_or("NAVIGATE")
    }
}

/// Process-wide broadcast bus.
///
/// Any component may publish; every live subscriber receives a copy in
/// publish order. Delivery is best-effort: there is no buffering for
/// future subscribers and no acknowledgement.
pub struct EventBus {
    subscribers: Mutex<HashMap<Uuid, Sender<NavigationEvent>>>,
}

impl EventBus {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            subscribers: Mutex::new(HashMap::new()),
        })
    }

    /// Register a subscriber. The returned handle unsubscribes when
    /// dropped.
    pub fn subscribe(self: &Arc<Self>) -> Subscription {
        let (tx, rx) = channel();
        let id = Uuid::new_v4();
        self.subscribers
            .lock()
            .expect("event bus lock poisoned")
            .insert(id, tx);
        tracing::debug!(subscriber = %id, "event bus subscription opened");
        Subscription {
            id,
            bus: Arc::downgrade(self),
            receiver: rx,
        }
    }

    /// Broadcast an event to all live subscribers. Returns the number
    /// of subscribers the event was delivered to.
    pub fn publish(&self, event: &NavigationEvent) -> usize {
        let mut subscribers = self.subscribers.lock().expect("event bus lock poisoned");
        let mut delivered = 0;
        // Prune subscribers whose receiving side is gone.
        subscribers.retain(|_, tx| match tx.send(event.clone()) {
            Ok(()) => {
                delivered += 1;
                true
            }
            Err(_) => false,
        });
        tracing::debug!(route = %event.route, delivered, "navigation event published");
        delivered
    }

    /// Current number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .expect("event bus lock poisoned")
            .len()
    }

    fn unsubscribe(&self, id: Uuid) {
        self.subscribers
            .lock()
            .expect("event bus lock poisoned")
            .remove(&id);
        tracing::debug!(subscriber = %id, "event bus subscription closed");
    }
}

/// RAII handle for a bus subscription.
///
/// Events are queued per subscriber in publish order and drained with
/// [`Subscription::try_recv`]. Dropping the handle removes the
/// subscriber from the bus.
pub struct Subscription {
    id: Uuid,
    bus: Weak<EventBus>,
    receiver: Receiver<NavigationEvent>,
}

impl Subscription {
    /// Next pending event, if any. Never blocks.
    pub fn try_recv(&self) -> Option<NavigationEvent> {
        self.receiver.try_recv().ok()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.unsubscribe(self.id);
        }
    }
}
