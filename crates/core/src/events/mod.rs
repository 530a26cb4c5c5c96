//! Store events module.
//!
//! Provides the event types published by the state store after a mutation
//! and the sink trait presentation components implement to observe them.

mod sink;
mod store_event;

pub use sink::*;
pub use store_event::*;
