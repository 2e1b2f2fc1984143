//! In-process change notification bus.
//!
//! Presentation layers subscribe to named events and re-query the backend
//! when one fires. Delivery is synchronous on the publishing thread, in
//! registration order, with no queuing and no cross-event ordering
//! guarantee. A panicking subscriber is caught and logged; it never takes
//! down the publisher or the subscribers registered after it.

use log::warn;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, Weak};

/// The events the backend publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppEvent {
    /// Weekly/monthly collections were rebuilt or replaced
    ReportsUpdated,
    ProfileUpdated,
    SettingsUpdated,
    AuthUpdated,
    /// All report collections were cleared
    DataCleared,
}

type Callback = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct BusInner {
    next_id: u64,
    subscribers: HashMap<AppEvent, Vec<(u64, Callback)>>,
}

/// Synchronous publish/subscribe bus keyed by event name.
///
/// Cheap to clone; all clones share the same subscriber list. Constructed
/// explicitly and injected into services so each test can run against a
/// fresh bus.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Arc<Mutex<BusInner>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for `event`. The returned handle unsubscribes
    /// explicitly; dropping it without calling `unsubscribe` leaves the
    /// subscription in place.
    pub fn subscribe<F>(&self, event: AppEvent, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id;
        inner.next_id += 1;
        inner
            .subscribers
            .entry(event)
            .or_default()
            .push((id, Arc::new(callback)));
        Subscription {
            bus: Arc::downgrade(&self.inner),
            event,
            id,
        }
    }

    /// Invoke all current subscribers of `event` on the calling thread, in
    /// registration order.
    pub fn publish(&self, event: AppEvent) {
        // Snapshot the callbacks so a subscriber may subscribe/unsubscribe
        // reentrantly without deadlocking on the bus lock.
        let callbacks: Vec<Callback> = {
            let inner = self.inner.lock().unwrap();
            inner
                .subscribers
                .get(&event)
                .map(|subs| subs.iter().map(|(_, cb)| cb.clone()).collect())
                .unwrap_or_default()
        };

        for callback in callbacks {
            if catch_unwind(AssertUnwindSafe(|| callback())).is_err() {
                warn!("Subscriber for {:?} panicked; continuing with remaining subscribers", event);
            }
        }
    }

    /// Number of live subscriptions for `event`.
    pub fn subscriber_count(&self, event: AppEvent) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.subscribers.get(&event).map_or(0, |subs| subs.len())
    }
}

/// Handle returned by [`EventBus::subscribe`].
pub struct Subscription {
    bus: Weak<Mutex<BusInner>>,
    event: AppEvent,
    id: u64,
}

impl Subscription {
    /// Remove this subscription from the bus. A no-op if the bus is gone.
    pub fn unsubscribe(self) {
        if let Some(bus) = self.bus.upgrade() {
            let mut inner = bus.lock().unwrap();
            if let Some(subs) = inner.subscribers.get_mut(&self.event) {
                subs.retain(|(id, _)| *id != self.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_publish_reaches_subscribers() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicUsize::new(0));

        let count_clone = count.clone();
        let _sub = bus.subscribe(AppEvent::ReportsUpdated, move || {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(AppEvent::ReportsUpdated);
        bus.publish(AppEvent::ReportsUpdated);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_events_are_independent() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicUsize::new(0));

        let count_clone = count.clone();
        let _sub = bus.subscribe(AppEvent::ProfileUpdated, move || {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(AppEvent::ReportsUpdated);
        assert_eq!(count.load(Ordering::SeqCst), 0);

        bus.publish(AppEvent::ProfileUpdated);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_delivery_in_registration_order() {
        let bus = EventBus::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let order_a = order.clone();
        let _a = bus.subscribe(AppEvent::DataCleared, move || {
            order_a.lock().unwrap().push("a");
        });
        let order_b = order.clone();
        let _b = bus.subscribe(AppEvent::DataCleared, move || {
            order_b.lock().unwrap().push("b");
        });
        let order_c = order.clone();
        let _c = bus.subscribe(AppEvent::DataCleared, move || {
            order_c.lock().unwrap().push("c");
        });

        bus.publish(AppEvent::DataCleared);
        assert_eq!(*order.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicUsize::new(0));

        let count_clone = count.clone();
        let sub = bus.subscribe(AppEvent::SettingsUpdated, move || {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(bus.subscriber_count(AppEvent::SettingsUpdated), 1);

        bus.publish(AppEvent::SettingsUpdated);
        sub.unsubscribe();
        bus.publish(AppEvent::SettingsUpdated);

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(bus.subscriber_count(AppEvent::SettingsUpdated), 0);
    }

    #[test]
    fn test_panicking_subscriber_is_isolated() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicUsize::new(0));

        let _bad = bus.subscribe(AppEvent::ReportsUpdated, || {
            panic!("subscriber failure");
        });
        let count_clone = count.clone();
        let _good = bus.subscribe(AppEvent::ReportsUpdated, move || {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        // The publisher survives and the later subscriber still runs.
        bus.publish(AppEvent::ReportsUpdated);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
