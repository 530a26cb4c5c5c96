//! Store module - the shared portfolio state container.
//!
//! The store is constructed explicitly and handed to presentation components
//! by reference (or `Arc`). Mutations publish [`StoreEvent`]s to every
//! subscribed sink.
//!
//! [`StoreEvent`]: crate::events::StoreEvent

mod store_model;
mod store_service;
mod store_traits;


pub use store_model::{StoreSnapshot, SubscriptionId};
pub use store_service::PortfolioStateStore;
pub use store_traits::PortfolioStateStoreTrait;
