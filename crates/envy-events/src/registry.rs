use std::collections::HashMap;
use std::fmt;

use tracing::{debug, trace};

/// Name of the event fired once a document or resource finishes loading.
pub const LOAD_EVENT: &str = "load";

/// A registered observer. Receives the event payload by reference.
pub type Observer<E> = Box<dyn Fn(&E) + Send + Sync>;

/// Per-event ordered lists of observers.
pub struct EventRegistry<E> {
    observers: HashMap<String, Vec<Observer<E>>>,
}

impl<E> EventRegistry<E> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            observers: HashMap::new(),
        }
    }

    /// Append an observer to `event`.
    pub fn on<F>(&mut self, event: impl Into<String>, observer: F)
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let event = event.into();
        let list = self.observers.entry(event.clone()).or_default();
        list.push(Box::new(observer));
        debug!(event = %event, position = list.len(), "observer registered");
    }

    /// Shortcut for `on(LOAD_EVENT, observer)`.
    pub fn on_load<F>(&mut self, observer: F)
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.on(LOAD_EVENT, observer);
    }

    /// Call every observer of `event` in registration order.
    ///
    /// Returns the number of observers invoked; an event nobody listens to
    /// yields 0.
    pub fn emit(&self, event: &str, payload: &E) -> usize {
        let Some(list) = self.observers.get(event) else {
            trace!(event, "no observers");
            return 0;
        };
        for observer in list {
            observer(payload);
        }
        trace!(event, count = list.len(), "event emitted");
        list.len()
    }

    /// Number of observers registered for `event`.
    pub fn observer_count(&self, event: &str) -> usize {
        self.observers.get(event).map_or(0, Vec::len)
    }

    /// Names of all events with at least one observer, sorted.
    pub fn event_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.observers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Remove every observer of `event`, returning how many were removed.
    pub fn clear(&mut self, event: &str) -> usize {
        let removed = self.observers.remove(event).map_or(0, |list| list.len());
        if removed > 0 {
            debug!(event, removed, "observers cleared");
        }
        removed
    }

    /// Returns `true` if no observers are registered.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl<E> Default for EventRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for EventRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for name in self.event_names() {
            map.entry(&name, &self.observer_count(name));
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder() -> (Arc<Mutex<Vec<String>>>, Arc<Mutex<Vec<String>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        (Arc::clone(&log), log)
    }

    #[test]
    fn observers_run_in_registration_order() {
        let (log, handle) = recorder();
        let mut events = EventRegistry::<u32>::new();
        for tag in ["first", "second", "third"] {
            let log = Arc::clone(&log);
            events.on("resize", move |n| log.lock().unwrap().push(format!("{tag}:{n}")));
        }

        assert_eq!(events.emit("resize", &3), 3);
        assert_eq!(*handle.lock().unwrap(), vec!["first:3", "second:3", "third:3"]);
    }

    #[test]
    fn registration_never_clobbers() {
        let (log, handle) = recorder();
        let mut events = EventRegistry::<()>::new();
        let early = Arc::clone(&log);
        events.on_load(move |_| early.lock().unwrap().push("early".into()));
        events.on_load(move |_| log.lock().unwrap().push("late".into()));

        events.emit(LOAD_EVENT, &());
        assert_eq!(*handle.lock().unwrap(), vec!["early", "late"]);
    }

    #[test]
    fn events_are_independent() {
        let (log, handle) = recorder();
        let mut events = EventRegistry::<&str>::new();
        let a = Arc::clone(&log);
        events.on("a", move |p| a.lock().unwrap().push(format!("a:{p}")));
        events.on("b", move |p| log.lock().unwrap().push(format!("b:{p}")));

        assert_eq!(events.emit("b", &"x"), 1);
        assert_eq!(*handle.lock().unwrap(), vec!["b:x"]);
        assert_eq!(events.event_names(), vec!["a", "b"]);
    }

    #[test]
    fn unknown_event_invokes_nothing() {
        let events = EventRegistry::<u8>::new();
        assert_eq!(events.emit("missing", &0), 0);
        assert!(events.is_empty());
    }

    #[test]
    fn clear_removes_observers() {
        let mut events = EventRegistry::<u8>::new();
        events.on("tick", |_| {});
        events.on("tick", |_| {});
        assert_eq!(events.observer_count("tick"), 2);

        assert_eq!(events.clear("tick"), 2);
        assert_eq!(events.observer_count("tick"), 0);
        assert_eq!(events.clear("tick"), 0);
        assert_eq!(events.emit("tick", &1), 0);
    }

    #[test]
    fn debug_lists_counts() {
        let mut events = EventRegistry::<u8>::new();
        events.on_load(|_| {});
        assert_eq!(format!("{events:?}"), "{\"load\": 1}");
    }
}
