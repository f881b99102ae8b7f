use std::collections::HashMap;

use parking_lot::RwLock;
use resurrect_model::EventSink;

/// A namespaced publish-subscribe bus. Listeners are registered against
/// a stable event name and invoked synchronously, in registration
/// order, whenever that name is emitted; a panicking listener is caught
/// at the call site so it cannot take down the emitter.
///
/// Grounded in the host mux layer's own subscriber registry: a
/// generation-keyed map of boxed closures, walked on every notification.
pub struct EventBus {
    subscribers: RwLock<HashMap<String, Vec<(usize, Box<dyn Fn(Option<&str>) + Send + Sync>)>>>,
    next_token: RwLock<usize>,
}

pub struct Subscription {
    name: String,
    token: usize,
}

impl EventBus {
    pub fn new() -> Self {
        EventBus {
            subscribers: RwLock::new(HashMap::new()),
            next_token: RwLock::new(0),
        }
    }

    pub fn subscribe<F>(&self, name: &str, listener: F) -> Subscription
    where
        F: Fn(Option<&str>) + Send + Sync + 'static,
    {
        let token = {
            let mut next = self.next_token.write();
            let token = *next;
            *next += 1;
            token
        };
        self.subscribers
            .write()
            .entry(name.to_string())
            .or_default()
            .push((token, Box::new(listener)));
        Subscription { name: name.to_string(), token }
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        if let Some(listeners) = self.subscribers.write().get_mut(&subscription.name) {
            listeners.retain(|(token, _)| *token != subscription.token);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for EventBus {
    fn emit(&self, name: &str, message: Option<&str>) {
        let listeners = self.subscribers.read();
        let Some(listeners) = listeners.get(name) else {
            return;
        };
        for (_, listener) in listeners {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| listener(message)));
            if result.is_err() {
                log::error!("event listener for {name} panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn subscribers_receive_emitted_events_in_order() {
        let bus = EventBus::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let seen2 = Arc::clone(&seen);
        bus.subscribe("state_manager.periodic_save.start", move |_| {
            seen2.fetch_add(1, Ordering::SeqCst);
        });
        bus.emit("state_manager.periodic_save.start", None);
        bus.emit("state_manager.periodic_save.start", None);
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn emitting_an_unsubscribed_name_is_a_no_op() {
        let bus = EventBus::new();
        bus.emit("resurrect.error", Some("nobody is listening"));
    }

    #[test]
    fn a_panicking_listener_does_not_break_emission() {
        let bus = EventBus::new();
        bus.subscribe("resurrect.error", |_| panic!("boom"));
        let seen = Arc::new(AtomicUsize::new(0));
        let seen2 = Arc::clone(&seen);
        bus.subscribe("resurrect.error", move |_| {
            seen2.fetch_add(1, Ordering::SeqCst);
        });
        bus.emit("resurrect.error", Some("oops"));
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unsubscribed_listener_stops_receiving_events() {
        let bus = EventBus::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let seen2 = Arc::clone(&seen);
        let sub = bus.subscribe("file_io.write_state.start", move |_| {
            seen2.fetch_add(1, Ordering::SeqCst);
        });
        bus.unsubscribe(sub);
        bus.emit("file_io.write_state.start", None);
        assert_eq!(seen.load(Ordering::SeqCst), 0);
    }
}
