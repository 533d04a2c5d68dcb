//! Named lifecycle events with any number of observers.
//!
//! Registering an observer appends it to the event's list; it never replaces
//! an observer registered earlier. Emitting an event calls every observer in
//! registration order.
//!
//! ```rust
//! use envy_events::EventRegistry;
//!
//! let mut events: EventRegistry<u32> = EventRegistry::new();
//! events.on_load(|n| println!("first saw {n}"));
//! events.on_load(|n| println!("second saw {n}"));
//! assert_eq!(events.emit("load", &7), 2);
//! ```

pub mod registry;

pub use registry::{EventRegistry, Observer, LOAD_EVENT};
